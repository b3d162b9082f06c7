//! Property-based tests for cleaning and encoding.
//!
//! These tests use proptest to generate random tables and verify the
//! invariants the cleaning operations and encoders promise.

use std::collections::BTreeSet;

use proptest::prelude::*;

use datasweep::output::{encode_csv, encode_xlsx};
use datasweep::{
    CellValue, CleaningOp, Column, ColumnType, FileFormat, Parser, Table, TransformEngine,
};

// =============================================================================
// Strategies
// =============================================================================

/// Text that never reads as a number, boolean or missing marker.
fn text_strategy() -> impl Strategy<Value = String> {
    "x[a-z]{0,7}"
}

/// Values for a column of `dtype` with `rows` cells.
fn values_strategy(
    dtype: ColumnType,
    rows: usize,
    with_missing: bool,
) -> BoxedStrategy<Vec<CellValue>> {
    let cell: BoxedStrategy<CellValue> = match dtype {
        ColumnType::Integer => (-1_000i64..1_000).prop_map(CellValue::Integer).boxed(),
        ColumnType::Float => (-1.0e6f64..1.0e6).prop_map(CellValue::Float).boxed(),
        ColumnType::Boolean => any::<bool>().prop_map(CellValue::Boolean).boxed(),
        ColumnType::String => text_strategy().prop_map(CellValue::Text).boxed(),
    };
    let cell = if with_missing {
        prop_oneof![3 => cell, 1 => Just(CellValue::Missing)].boxed()
    } else {
        cell
    };
    prop::collection::vec(cell, rows).boxed()
}

fn dtype_strategy() -> impl Strategy<Value = ColumnType> {
    prop_oneof![
        Just(ColumnType::Integer),
        Just(ColumnType::Float),
        Just(ColumnType::Boolean),
        Just(ColumnType::String),
    ]
}

/// Tables with up to five columns named `c0`, `c1`, ...
fn table_strategy(rows: std::ops::Range<usize>, with_missing: bool) -> BoxedStrategy<Table> {
    (prop::collection::vec(dtype_strategy(), 1..5), rows)
        .prop_flat_map(move |(dtypes, rows)| {
            dtypes
                .into_iter()
                .map(|dtype| values_strategy(dtype, rows, with_missing).prop_map(move |v| (dtype, v)))
                .collect::<Vec<_>>()
        })
        .prop_map(|columns| {
            Table::from_columns(
                columns
                    .into_iter()
                    .enumerate()
                    .map(|(i, (dtype, values))| (format!("c{}", i), Column::new(dtype, values))),
            )
            .expect("generated columns share a length")
        })
        .boxed()
}

/// Small value pools so duplicate rows actually occur.
fn duplicate_heavy_table() -> impl Strategy<Value = Table> {
    (1usize..4, 0usize..30).prop_flat_map(|(cols, rows)| {
        prop::collection::vec(
            prop::collection::vec(
                prop_oneof![
                    Just(CellValue::Missing),
                    (0i64..3).prop_map(CellValue::Integer)
                ],
                rows,
            ),
            cols,
        )
        .prop_map(move |columns| {
            let mut table = Table::with_row_count(rows);
            for (i, values) in columns.into_iter().enumerate() {
                table
                    .push_column(format!("c{}", i), Column::new(ColumnType::Float, values))
                    .expect("generated columns share a length");
            }
            table
        })
    })
}

fn owned_rows(table: &Table) -> Vec<Vec<CellValue>> {
    table.head(table.row_count())
}

// =============================================================================
// Cleaning Properties
// =============================================================================

proptest! {
    #[test]
    fn drop_duplicates_is_idempotent(table in duplicate_heavy_table()) {
        let engine = TransformEngine::new();
        let (once, _) = engine.apply(CleaningOp::DropDuplicateRows, table);
        let (twice, change) = engine.apply(CleaningOp::DropDuplicateRows, once.clone());

        prop_assert_eq!(change.values_changed, 0);
        prop_assert_eq!(twice, once);
    }

    #[test]
    fn drop_duplicates_keeps_first_occurrences_in_order(table in duplicate_heavy_table()) {
        let original = owned_rows(&table);
        let (deduped, change) = TransformEngine::new().apply(CleaningOp::DropDuplicateRows, table);
        let survivors = owned_rows(&deduped);

        let mut expected: Vec<Vec<CellValue>> = Vec::new();
        for row in &original {
            if !expected.contains(row) {
                expected.push(row.clone());
            }
        }

        prop_assert_eq!(change.values_changed, original.len() - survivors.len());
        prop_assert_eq!(survivors, expected);
    }

    #[test]
    fn fill_missing_leaves_no_gaps_and_keeps_mean(table in table_strategy(1..25, true)) {
        let before = table.clone();
        let (filled, _) =
            TransformEngine::new().apply(CleaningOp::FillMissingNumericWithColumnMean, table);

        prop_assert_eq!(filled.column_names(), before.column_names());
        prop_assert_eq!(filled.row_count(), before.row_count());

        for (name, column) in before.columns() {
            let after = filled.column(name).unwrap();
            match (column.dtype.is_numeric(), column.mean()) {
                (true, Some(mean)) => {
                    prop_assert_eq!(after.missing_count(), 0);
                    let new_mean = after.mean().unwrap();
                    prop_assert!((new_mean - mean).abs() <= 1e-6 * mean.abs().max(1.0));
                }
                _ => prop_assert_eq!(after, column),
            }
        }
    }

    #[test]
    fn standardize_names_is_idempotent(
        names in prop::collection::btree_set("[A-Za-z ]{1,6}", 1..6)
    ) {
        let names: BTreeSet<String> = names;
        let table = Table::from_columns(
            names
                .into_iter()
                .map(|n| (n, Column::new(ColumnType::Integer, vec![CellValue::Integer(1)]))),
        )
        .unwrap();
        let count = table.column_count();

        let engine = TransformEngine::new();
        let (once, _) = engine.apply(CleaningOp::StandardizeColumnNames, table);
        let (twice, change) = engine.apply(CleaningOp::StandardizeColumnNames, once.clone());

        prop_assert_eq!(once.column_count(), count);
        prop_assert_eq!(change.values_changed, 0);
        prop_assert_eq!(twice.column_names(), once.column_names());
        for name in once.column_names() {
            prop_assert!(!name.contains(' '));
            prop_assert_eq!(name.to_lowercase(), name);
        }
    }
}

// =============================================================================
// Encoding Properties
// =============================================================================

proptest! {
    #[test]
    fn csv_round_trip_preserves_table(table in table_strategy(1..20, false)) {
        let bytes = encode_csv(&table).unwrap();
        let parsed = Parser::new().parse(&bytes, FileFormat::Csv).unwrap();
        prop_assert_eq!(parsed, table);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn xlsx_round_trip_preserves_table(table in table_strategy(1..12, false)) {
        // Whole floats read back as integers, so keep a fractional part.
        let table = Table::from_columns(table.columns().map(|(name, column)| {
            let values = column
                .values
                .iter()
                .map(|v| match v {
                    CellValue::Float(f) => CellValue::Float(f.trunc() + 0.5),
                    other => other.clone(),
                })
                .collect();
            (name.to_string(), Column::new(column.dtype, values))
        }))
        .unwrap();

        let bytes = encode_xlsx(&table).unwrap();
        let parsed = Parser::new().parse(&bytes, FileFormat::Spreadsheet).unwrap();
        prop_assert_eq!(parsed, table);
    }
}
