use gift_domain::GiftRecord;

use crate::CoreError;

/// Abstraction over relational backends that hold the saved gift table.
pub trait GiftStore {
    /// Replaces the stored table with `records`, in order.
    fn replace_all(&mut self, records: &[GiftRecord]) -> Result<(), CoreError>;
    /// Reads the stored table back in insertion order. A missing table is empty.
    fn load_all(&self) -> Result<Vec<GiftRecord>, CoreError>;
    /// Human-readable location, used in status messages.
    fn location(&self) -> String;
}
