//! Validated mutations over a [`Ledger`].

use gift_domain::{looks_like_url, max_amount, GiftRecord, Ledger};

use crate::CoreError;

/// Provides the add/update/remove operations of the ledger store.
pub struct LedgerService;

impl LedgerService {
    /// Checks the record invariants. Link shape is only logged, never rejected.
    pub fn validate(record: &GiftRecord) -> Result<(), CoreError> {
        check_record(record).map_err(CoreError::Validation)
    }

    /// Appends a validated record and returns its index.
    pub fn add(ledger: &mut Ledger, record: GiftRecord) -> Result<usize, CoreError> {
        Self::validate(&record)?;
        let index = ledger.push(record);
        tracing::debug!(index, "gift added");
        Ok(index)
    }

    /// Replaces the record at `index`. Returns `Ok(false)` when the index is out of range.
    pub fn update(ledger: &mut Ledger, index: usize, record: GiftRecord) -> Result<bool, CoreError> {
        Self::validate(&record)?;
        let replaced = ledger.replace(index, record).is_some();
        if replaced {
            tracing::debug!(index, "gift updated");
        } else {
            tracing::debug!(index, len = ledger.len(), "update ignored, index out of range");
        }
        Ok(replaced)
    }

    /// Removes the record at `index`, if any.
    pub fn remove(ledger: &mut Ledger, index: usize) -> Option<GiftRecord> {
        let removed = ledger.remove(index);
        if removed.is_none() {
            tracing::debug!(index, len = ledger.len(), "remove ignored, index out of range");
        }
        removed
    }

    pub fn all(ledger: &Ledger) -> &[GiftRecord] {
        ledger.records()
    }

    /// Swaps the whole table for an edited copy. Nothing changes if any row is invalid.
    pub fn replace_all(ledger: &mut Ledger, records: Vec<GiftRecord>) -> Result<(), CoreError> {
        for (index, record) in records.iter().enumerate() {
            check_record(record)
                .map_err(|message| CoreError::Validation(format!("row {index}: {message}")))?;
        }
        *ledger = Ledger::from_records(records);
        Ok(())
    }
}

fn check_record(record: &GiftRecord) -> Result<(), String> {
    if record.budget.is_sign_negative() && !record.budget.is_zero() {
        return Err(format!("budget for `{}` cannot be negative", record.gift));
    }
    if record.budget > max_amount() {
        return Err(format!("budget for `{}` exceeds {}", record.gift, max_amount()));
    }
    if let Some(cost) = record.cost {
        if cost.is_sign_negative() && !cost.is_zero() {
            return Err(format!("cost for `{}` cannot be negative", record.gift));
        }
        if cost > max_amount() {
            return Err(format!("cost for `{}` exceeds {}", record.gift, max_amount()));
        }
    }
    if let Some(link) = record.link.as_deref() {
        if !looks_like_url(link) {
            tracing::warn!(gift = %record.gift, link, "gift link does not look like a URL");
        }
    }
    Ok(())
}
