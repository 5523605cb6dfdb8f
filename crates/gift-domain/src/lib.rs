//! gift-domain
//!
//! Pure domain models for the gift ledger (records, ledger, field schema, report shapes).
//! No I/O, no CLI, no storage. Only data types and the shared header mapping table.

pub mod ledger;
pub mod record;
pub mod report;
pub mod schema;

pub use ledger::*;
pub use record::*;
pub use report::*;
pub use schema::*;
