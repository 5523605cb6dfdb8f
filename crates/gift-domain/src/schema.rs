//! Canonical field names and the header mapping table shared by import and export.
//!
//! Exported files use the `export_header` column names. The original gift form
//! uploaded files with different names for three of the columns (`Recipient Name`,
//! `Gift Idea`, `Purchased?`). Both names stay listed here so the mismatch is visible
//! in one place instead of being patched over in either direction.

use std::fmt;

pub const EXPORT_FILE_NAME: &str = "christmas_gift_list.csv";
pub const STORE_TABLE: &str = "gift_tracker";
pub const REMAINING_LABEL: &str = "Remaining";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
/// Enumerates the columns of a gift record.
pub enum GiftField {
    Recipient,
    Gift,
    Budget,
    Cost,
    Purchased,
    Link,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Which naming convention a header belongs to.
pub enum HeaderDialect {
    /// Written by `to_delimited_text`.
    Export,
    /// Produced by the gift form and its uploads.
    Form,
    /// Identical in both conventions.
    Shared,
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub field: GiftField,
    pub export_header: &'static str,
    pub import_header: &'static str,
    pub required_on_import: bool,
}

/// Ordered mapping table. Export column order follows this array.
pub const FIELD_SCHEMA: [FieldSpec; 6] = [
    FieldSpec {
        field: GiftField::Recipient,
        export_header: "Recipient",
        import_header: "Recipient Name",
        required_on_import: true,
    },
    FieldSpec {
        field: GiftField::Gift,
        export_header: "Gift",
        import_header: "Gift Idea",
        required_on_import: true,
    },
    FieldSpec {
        field: GiftField::Budget,
        export_header: "Budget",
        import_header: "Budget",
        required_on_import: false,
    },
    FieldSpec {
        field: GiftField::Cost,
        export_header: "Cost",
        import_header: "Cost",
        required_on_import: true,
    },
    FieldSpec {
        field: GiftField::Purchased,
        export_header: "Purchased",
        import_header: "Purchased?",
        required_on_import: true,
    },
    FieldSpec {
        field: GiftField::Link,
        export_header: "Gift Link",
        import_header: "Gift Link",
        required_on_import: true,
    },
];

impl GiftField {
    pub const ALL: [GiftField; 6] = [
        GiftField::Recipient,
        GiftField::Gift,
        GiftField::Budget,
        GiftField::Cost,
        GiftField::Purchased,
        GiftField::Link,
    ];

    pub fn spec(self) -> &'static FieldSpec {
        &FIELD_SCHEMA[self as usize]
    }

    pub fn export_header(self) -> &'static str {
        self.spec().export_header
    }

    pub fn import_header(self) -> &'static str {
        self.spec().import_header
    }

    pub fn required_on_import(self) -> bool {
        self.spec().required_on_import
    }

    /// Lowercase key used by the shell (`edit 0 cost 12`).
    pub fn key(self) -> &'static str {
        match self {
            GiftField::Recipient => "recipient",
            GiftField::Gift => "gift",
            GiftField::Budget => "budget",
            GiftField::Cost => "cost",
            GiftField::Purchased => "purchased",
            GiftField::Link => "link",
        }
    }

    /// Resolves a header cell against the mapping table.
    pub fn from_header(header: &str) -> Option<(GiftField, HeaderDialect)> {
        let header = header.trim();
        FIELD_SCHEMA.iter().find_map(|spec| {
            let export = spec.export_header == header;
            let form = spec.import_header == header;
            match (export, form) {
                (true, true) => Some((spec.field, HeaderDialect::Shared)),
                (true, false) => Some((spec.field, HeaderDialect::Export)),
                (false, true) => Some((spec.field, HeaderDialect::Form)),
                (false, false) => None,
            }
        })
    }

    /// Accepts a shell key or either header name, ignoring case.
    pub fn from_key(key: &str) -> Option<GiftField> {
        let key = key.trim();
        GiftField::ALL.into_iter().find(|field| {
            field.key().eq_ignore_ascii_case(key)
                || field.export_header().eq_ignore_ascii_case(key)
                || field.import_header().eq_ignore_ascii_case(key)
        })
    }
}

impl fmt::Display for GiftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.export_header())
    }
}

/// Header row written on export.
pub fn export_headers() -> Vec<&'static str> {
    FIELD_SCHEMA.iter().map(|spec| spec.export_header).collect()
}

pub fn format_flag(value: bool) -> &'static str {
    if value {
        "Yes"
    } else {
        "No"
    }
}

/// Parses a purchased flag. Empty input is `Some(false)`; unrecognized input is `None`.
pub fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "yes" | "y" | "true" | "1" => Some(true),
        "no" | "n" | "false" | "0" | "" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_order_matches_field_discriminants() {
        for field in GiftField::ALL {
            assert_eq!(field.spec().field, field);
        }
    }

    #[test]
    fn export_header_row_is_stable() {
        assert_eq!(
            export_headers(),
            vec!["Recipient", "Gift", "Budget", "Cost", "Purchased", "Gift Link"]
        );
    }

    #[test]
    fn headers_resolve_in_both_dialects() {
        assert_eq!(
            GiftField::from_header("Recipient Name"),
            Some((GiftField::Recipient, HeaderDialect::Form))
        );
        assert_eq!(
            GiftField::from_header("Recipient"),
            Some((GiftField::Recipient, HeaderDialect::Export))
        );
        assert_eq!(
            GiftField::from_header(" Cost "),
            Some((GiftField::Cost, HeaderDialect::Shared))
        );
        assert_eq!(GiftField::from_header("recipient"), None);
    }

    #[test]
    fn shell_keys_are_case_insensitive() {
        assert_eq!(GiftField::from_key("COST"), Some(GiftField::Cost));
        assert_eq!(GiftField::from_key("gift link"), Some(GiftField::Link));
        assert_eq!(GiftField::from_key("purchased?"), Some(GiftField::Purchased));
        assert_eq!(GiftField::from_key("price"), None);
    }

    #[test]
    fn flags_parse_common_spellings() {
        assert_eq!(parse_flag("Yes"), Some(true));
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag("0"), Some(false));
        assert_eq!(parse_flag(""), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }
}
