use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rust_decimal::Decimal;
use tempfile::tempdir;

use gift_core::SummaryService;
use gift_domain::{GiftRecord, Ledger};
use gift_storage_csv::{export_to_path, import_from_path, to_delimited_text};

fn build_sample_ledger(gift_count: usize) -> Ledger {
    let records = (0..gift_count)
        .map(|idx| {
            let record = GiftRecord::new(
                format!("Recipient {}", idx % 250),
                format!("Gift {idx}"),
                Decimal::from(20 + (idx % 80) as i64),
            )
            .with_purchased(idx % 3 != 0);
            if idx % 17 == 0 {
                record.with_unknown_cost()
            } else {
                record.with_cost(Decimal::new(1_500 + (idx % 4_000) as i64, 2))
            }
        })
        .collect();
    Ledger::from_records(records)
}

fn bench_reports(c: &mut Criterion) {
    let ledger = build_sample_ledger(black_box(10_000));
    let fixed_budget = Decimal::from(300);

    c.bench_function("group_by_recipient_10k", |b| {
        b.iter(|| black_box(SummaryService::group_by_recipient(&ledger, fixed_budget)))
    });

    c.bench_function("waterfall_report_10k", |b| {
        b.iter(|| black_box(SummaryService::waterfall_report(&ledger, fixed_budget)))
    });
}

fn bench_csv(c: &mut Criterion) {
    let ledger = build_sample_ledger(black_box(10_000));
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("gifts.csv");

    c.bench_function("csv_text_10k", |b| {
        b.iter(|| black_box(to_delimited_text(&ledger).expect("render csv")))
    });

    export_to_path(&ledger, &path).expect("seed");

    c.bench_function("csv_read_10k", |b| {
        b.iter(|| black_box(import_from_path(&path).expect("read csv")))
    });
}

criterion_group!(benches, bench_reports, bench_csv);
criterion_main!(benches);
