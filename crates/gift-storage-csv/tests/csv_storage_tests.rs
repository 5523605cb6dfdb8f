use gift_core::ImportService;
use gift_domain::{GiftRecord, Ledger, EXPORT_FILE_NAME};
use gift_storage_csv::{
    export_to_path, import_from_path, read_table_from_bytes, to_delimited_text,
};
use insta::assert_snapshot;
use rust_decimal::Decimal;
use tempfile::tempdir;

fn dec(value: i64) -> Decimal {
    Decimal::from(value)
}

fn sample_ledger() -> Ledger {
    Ledger::from_records(vec![
        GiftRecord::new("Alice", "Book", dec(50))
            .with_cost(dec(40))
            .with_purchased(true)
            .with_link("https://shop.example/book"),
        GiftRecord::new("Alice", "Game", dec(50)),
        GiftRecord::new("Bob", "Toy", dec(30))
            .with_cost(dec(25))
            .with_purchased(true),
    ])
}

#[test]
fn export_writes_headers_then_rows_in_order() {
    let text = to_delimited_text(&sample_ledger()).expect("export");
    assert_snapshot!(text, @r###"
    Recipient,Gift,Budget,Cost,Purchased,Gift Link
    Alice,Book,50,40,Yes,https://shop.example/book
    Alice,Game,50,0,No,
    Bob,Toy,30,25,Yes,
    "###);
}

#[test]
fn empty_ledger_exports_header_only() {
    let text = to_delimited_text(&Ledger::new()).expect("export");
    assert_eq!(text, "Recipient,Gift,Budget,Cost,Purchased,Gift Link\n");
}

#[test]
fn export_quotes_commas_quotes_and_newlines() {
    let ledger = Ledger::from_records(vec![GiftRecord::new(
        "Smith, Jo",
        "Mug \"large\"\nblue",
        dec(12),
    )]);
    let text = to_delimited_text(&ledger).expect("export");
    assert!(text.contains("\"Smith, Jo\""));
    assert!(text.contains("\"Mug \"\"large\"\"\nblue\""));

    let table = read_table_from_bytes(text.as_bytes()).expect("parse");
    assert_eq!(table.rows.len(), 1);
    assert_eq!(table.rows[0][0], "Smith, Jo");
    assert_eq!(table.rows[0][1], "Mug \"large\"\nblue");
}

#[test]
fn unknown_cost_exports_as_empty_cell() {
    let ledger = Ledger::from_records(vec![
        GiftRecord::new("Cara", "Scarf", dec(20)).with_unknown_cost()
    ]);
    let text = to_delimited_text(&ledger).expect("export");
    assert!(text.ends_with("Cara,Scarf,20,,No,\n"));
}

#[test]
fn exported_text_imports_back_to_same_records() {
    let ledger = sample_ledger();
    let text = to_delimited_text(&ledger).expect("export");
    let table = read_table_from_bytes(text.as_bytes()).expect("parse");
    let outcome = ImportService::import_table(&table).expect("import");
    assert!(outcome.warnings.is_empty());
    assert_eq!(outcome.ledger, ledger);
}

#[test]
fn form_headers_import_with_coercion() {
    let upload = "\u{feff}Recipient Name,Gift Idea,Budget,Cost,Purchased?,Gift Link\n\
                  Alice,Book,50,$40.00,yes,\n\
                  Bob,Toy,,abc,maybe,https://shop.example/toy\n";
    let table = read_table_from_bytes(upload.as_bytes()).expect("parse");
    let outcome = ImportService::import_table(&table).expect("import");

    let records = outcome.ledger.records();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].cost, Some(dec(40)));
    assert!(records[0].purchased);
    assert_eq!(records[1].budget, Decimal::ZERO);
    assert_eq!(records[1].cost, None);
    assert!(!records[1].purchased);
    assert_eq!(
        records[1].link.as_deref(),
        Some("https://shop.example/toy")
    );
    assert_eq!(outcome.warnings.invalid_costs, 1);
    assert_eq!(outcome.warnings.invalid_flags, 1);
}

#[test]
fn export_to_path_creates_file_and_parent_dirs() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("out").join(EXPORT_FILE_NAME);
    export_to_path(&sample_ledger(), &path).expect("export");

    assert!(path.exists());
    assert!(!path.with_extension("csv.tmp").exists());

    let table = import_from_path(&path).expect("read back");
    assert_eq!(table.rows.len(), 3);
    assert_eq!(table.headers[5], "Gift Link");
}

#[test]
fn import_from_missing_path_is_io_error() {
    let dir = tempdir().expect("tempdir");
    let err = import_from_path(&dir.path().join("absent.csv")).unwrap_err();
    assert!(matches!(err, gift_core::CoreError::Io(_)));
}
