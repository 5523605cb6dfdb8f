//! Ordered collection of gift records for one session.

use serde::{Deserialize, Serialize};

use crate::record::GiftRecord;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
/// Insertion-ordered gift records. Recipients may repeat.
pub struct Ledger {
    records: Vec<GiftRecord>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<GiftRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[GiftRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&GiftRecord> {
        self.records.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GiftRecord> {
        self.records.iter()
    }

    /// Appends a record and returns its position.
    pub fn push(&mut self, record: GiftRecord) -> usize {
        self.records.push(record);
        self.records.len() - 1
    }

    /// Swaps in `record` at `index`, returning the previous value.
    pub fn replace(&mut self, index: usize, record: GiftRecord) -> Option<GiftRecord> {
        let slot = self.records.get_mut(index)?;
        Some(std::mem::replace(slot, record))
    }

    pub fn remove(&mut self, index: usize) -> Option<GiftRecord> {
        if index < self.records.len() {
            Some(self.records.remove(index))
        } else {
            None
        }
    }

    /// Distinct recipients in order of first appearance.
    pub fn recipients(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for record in &self.records {
            if !seen.contains(&record.recipient.as_str()) {
                seen.push(record.recipient.as_str());
            }
        }
        seen
    }
}

impl FromIterator<GiftRecord> for Ledger {
    fn from_iter<I: IntoIterator<Item = GiftRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Ledger {
    type Item = &'a GiftRecord;
    type IntoIter = std::slice::Iter<'a, GiftRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn record(recipient: &str, gift: &str) -> GiftRecord {
        GiftRecord::new(recipient, gift, Decimal::TEN)
    }

    #[test]
    fn push_preserves_insertion_order() {
        let mut ledger = Ledger::new();
        assert_eq!(ledger.push(record("Alice", "Book")), 0);
        assert_eq!(ledger.push(record("Bob", "Toy")), 1);
        let gifts: Vec<_> = ledger.iter().map(|r| r.gift.as_str()).collect();
        assert_eq!(gifts, vec!["Book", "Toy"]);
    }

    #[test]
    fn replace_and_remove_ignore_out_of_range() {
        let mut ledger = Ledger::from_records(vec![record("Alice", "Book")]);
        assert!(ledger.replace(3, record("Bob", "Toy")).is_none());
        assert!(ledger.remove(3).is_none());
        assert_eq!(ledger.len(), 1);

        let old = ledger.replace(0, record("Bob", "Toy")).expect("replaced");
        assert_eq!(old.gift, "Book");
        assert_eq!(ledger.get(0).map(|r| r.gift.as_str()), Some("Toy"));
    }

    #[test]
    fn recipients_follow_first_appearance() {
        let ledger: Ledger = vec![
            record("Bob", "Toy"),
            record("Alice", "Book"),
            record("Bob", "Kite"),
        ]
        .into_iter()
        .collect();
        assert_eq!(ledger.recipients(), vec!["Bob", "Alice"]);
    }
}
