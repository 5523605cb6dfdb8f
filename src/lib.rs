#![doc(test(attr(deny(warnings))))]

//! Gift Ledger tracks holiday gift ideas per recipient, with budget totals,
//! per-recipient waterfall charts, CSV import/export and a SQLite snapshot store.

pub mod cli;
pub mod errors;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Gift Ledger tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }
}
