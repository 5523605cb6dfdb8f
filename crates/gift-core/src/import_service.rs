//! Normalizes uploaded tables into typed gift records.

use std::{collections::BTreeMap, str::FromStr};

use rust_decimal::Decimal;

use gift_domain::{
    amount_in_range, parse_flag, CoercionWarning, GiftField, GiftRecord, HeaderDialect, Ledger,
};

use crate::CoreError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Untyped table as read from an upload: a header row plus string cells.
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// Builds a table from header-keyed rows, taking the column set from `headers`.
    pub fn from_maps(headers: &[&str], maps: &[BTreeMap<String, String>]) -> Self {
        let rows = maps
            .iter()
            .map(|map| {
                headers
                    .iter()
                    .map(|header| map.get(*header).cloned().unwrap_or_default())
                    .collect()
            })
            .collect();
        Self {
            headers: headers.iter().map(|header| header.to_string()).collect(),
            rows,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportOutcome {
    pub ledger: Ledger,
    pub warnings: CoercionWarning,
}

/// Column positions resolved from a header row.
#[derive(Debug, Default)]
struct ColumnMap {
    positions: BTreeMap<GiftField, usize>,
    saw_export: bool,
    saw_form: bool,
}

impl ColumnMap {
    fn resolve(headers: &[String]) -> Self {
        let mut map = ColumnMap::default();
        for (position, header) in headers.iter().enumerate() {
            let header = header.trim_start_matches('\u{feff}');
            let Some((field, dialect)) = GiftField::from_header(header) else {
                continue;
            };
            if map.positions.contains_key(&field) {
                tracing::warn!(header, column = position, "duplicate column for field ignored");
                continue;
            }
            match dialect {
                HeaderDialect::Export => map.saw_export = true,
                HeaderDialect::Form => map.saw_form = true,
                HeaderDialect::Shared => {}
            }
            map.positions.insert(field, position);
        }
        map
    }

    fn missing(&self) -> Vec<String> {
        GiftField::ALL
            .into_iter()
            .filter(|field| field.required_on_import() && !self.positions.contains_key(field))
            .map(|field| field.import_header().to_string())
            .collect()
    }

    fn cell<'a>(&self, row: &'a [String], field: GiftField) -> Option<&'a str> {
        self.positions
            .get(&field)
            .and_then(|position| row.get(*position))
            .map(|cell| cell.trim())
    }
}

/// Converts raw uploaded rows into a ledger.
pub struct ImportService;

impl ImportService {
    /// Imports every row or nothing. Missing required columns fail with [`CoreError::Schema`];
    /// unreadable cells are substituted and counted in the outcome.
    pub fn import_table(table: &RawTable) -> Result<ImportOutcome, CoreError> {
        let columns = ColumnMap::resolve(&table.headers);
        let missing = columns.missing();
        if !missing.is_empty() {
            tracing::debug!(?missing, "import rejected");
            return Err(CoreError::Schema { missing });
        }
        if columns.saw_export && columns.saw_form {
            tracing::warn!("upload mixes export and form header names");
        }

        let mut warnings = CoercionWarning::default();
        let mut records = Vec::with_capacity(table.rows.len());
        for row in &table.rows {
            if row.iter().all(|cell| cell.trim().is_empty()) {
                continue;
            }
            records.push(Self::normalize_row(&columns, row, &mut warnings));
        }

        if !warnings.is_empty() {
            tracing::warn!(
                costs = warnings.invalid_costs,
                budgets = warnings.invalid_budgets,
                flags = warnings.invalid_flags,
                "import substituted unreadable values"
            );
        }
        tracing::info!(rows = records.len(), "table imported");
        Ok(ImportOutcome {
            ledger: Ledger::from_records(records),
            warnings,
        })
    }

    fn normalize_row(
        columns: &ColumnMap,
        row: &[String],
        warnings: &mut CoercionWarning,
    ) -> GiftRecord {
        let text = |field| columns.cell(row, field).unwrap_or("");

        let budget = match text(GiftField::Budget) {
            "" => Decimal::ZERO,
            raw => parse_amount(raw).unwrap_or_else(|| {
                warnings.invalid_budgets += 1;
                Decimal::ZERO
            }),
        };
        let cost = match text(GiftField::Cost) {
            "" => None,
            raw => {
                let parsed = parse_amount(raw);
                if parsed.is_none() {
                    warnings.invalid_costs += 1;
                }
                parsed
            }
        };
        let purchased = parse_flag(text(GiftField::Purchased)).unwrap_or_else(|| {
            warnings.invalid_flags += 1;
            false
        });
        let link = match text(GiftField::Link) {
            "" => None,
            raw => Some(raw.to_string()),
        };

        GiftRecord {
            recipient: text(GiftField::Recipient).to_string(),
            gift: text(GiftField::Gift).to_string(),
            budget,
            cost,
            purchased,
            link,
        }
    }
}

/// Reads a non-negative decimal no larger than [`gift_domain::max_amount`], tolerating a
/// leading `$` and scientific notation.
pub fn parse_amount(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_prefix('$').unwrap_or(trimmed).trim();
    let value = Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()?;
    amount_in_range(value).then_some(value)
}
