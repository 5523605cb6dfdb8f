//! gift-storage-csv
//!
//! Comma-delimited export of a ledger and raw-table parsing for uploads.
//! Column names come from the shared field mapping table in gift-domain.

use std::{
    fs::{self, File},
    io::{Read, Write},
    path::{Path, PathBuf},
};

use gift_core::{CoreError, RawTable};
use gift_domain::{export_headers, GiftField, Ledger};

const TMP_SUFFIX: &str = "tmp";

/// Serializes every record, header row first, in ledger order.
pub fn to_delimited_text(ledger: &Ledger) -> Result<String, CoreError> {
    let mut buffer = Vec::new();
    write_ledger(ledger, &mut buffer)?;
    String::from_utf8(buffer).map_err(|err| CoreError::Format(err.to_string()))
}

/// Streams the delimited form of `ledger` into `writer`.
pub fn write_ledger<W: Write>(ledger: &Ledger, writer: W) -> Result<(), CoreError> {
    let mut csv = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);
    csv.write_record(export_headers()).map_err(format_error)?;
    for record in ledger {
        csv.write_record(GiftField::ALL.map(|field| record.field_text(field)))
            .map_err(format_error)?;
    }
    csv.flush()?;
    Ok(())
}

/// Parses uploaded bytes into a header row plus string cells.
///
/// Invalid UTF-8 is replaced rather than rejected; rows may be ragged.
pub fn read_table<R: Read>(reader: R) -> Result<RawTable, CoreError> {
    let mut csv = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);
    let headers = csv
        .byte_headers()
        .map_err(format_error)?
        .iter()
        .map(decode_cell)
        .collect();
    let mut rows = Vec::new();
    for result in csv.byte_records() {
        let record = result.map_err(format_error)?;
        rows.push(record.iter().map(decode_cell).collect());
    }
    tracing::debug!(rows = rows.len(), "delimited table parsed");
    Ok(RawTable::new(headers, rows))
}

pub fn read_table_from_bytes(bytes: &[u8]) -> Result<RawTable, CoreError> {
    read_table(bytes)
}

pub fn import_from_path(path: &Path) -> Result<RawTable, CoreError> {
    let file = File::open(path)?;
    read_table(file)
}

/// Writes the export through a temporary file so a failed write never truncates `path`.
pub fn export_to_path(ledger: &Ledger, path: &Path) -> Result<(), CoreError> {
    let text = to_delimited_text(ledger)?;
    let tmp = tmp_path(path);
    write_atomic(&tmp, &text)?;
    fs::rename(&tmp, path)?;
    tracing::info!(rows = ledger.len(), path = %path.display(), "gift list exported");
    Ok(())
}

fn decode_cell(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

fn format_error(err: csv::Error) -> CoreError {
    CoreError::Format(err.to_string())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), CoreError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
