//! gift-core
//!
//! Ledger operations, import normalization, budget reporting and the command reducer.
//! Depends on gift-domain. No CLI, no terminal I/O, no concrete storage backends.

pub mod error;
pub mod import_service;
pub mod ledger_service;
pub mod session;
pub mod storage;
pub mod summary_service;

pub use error::CoreError;
pub use import_service::*;
pub use ledger_service::*;
pub use session::*;
pub use storage::GiftStore;
pub use summary_service::*;
