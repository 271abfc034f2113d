//! Property-based tests for the assay pipeline.
//!
//! These tests use proptest to generate random inputs and verify that the
//! cleaning stages maintain their invariants under all conditions:
//!
//! 1. **No panics**: no stage crashes on any input
//! 2. **Charset**: normalized names stay within `[a-z0-9_]`
//! 3. **Idempotence**: normalizing twice equals normalizing once
//! 4. **Alignment**: row counts survive every stage

use proptest::prelude::*;

use assay::{
    Assay, AssayConfig, CleanConfig, CleanEngine, Column, DataTable, GateConfig, QualityGate,
    Value, add_null_flags, normalize_name,
};

// =============================================================================
// Test Strategies
// =============================================================================

/// Arbitrary unicode column names, including accents and punctuation.
fn raw_name() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z0-9_ ]{0,30}",
        "[A-Za-zÁÉÍÓÚáéíóúñÑ $/@?¿!.,-]{1,30}",
        any::<String>(),
    ]
}

/// Arbitrary cell text, biased toward messy real-world values.
fn raw_cell() -> impl Strategy<Value = String> {
    prop_oneof![
        "[0-9]{1,8}",
        "\\$[0-9,]{1,10}",
        "(uno|dos|tres|cuatro|cinco)",
        "[a-záéíóúñ ]{0,20}",
        Just("nan".to_string()),
        Just(String::new()),
        any::<String>(),
    ]
}

fn value_column(rows: usize) -> impl Strategy<Value = Vec<Value>> {
    prop::collection::vec(
        prop_oneof![
            Just(Value::Null),
            any::<i64>().prop_map(Value::Int),
            raw_cell().prop_map(Value::Text),
        ],
        rows..=rows,
    )
}

// =============================================================================
// Name Normalizer Properties
// =============================================================================

proptest! {
    /// Normalized names only contain lowercase ASCII, digits and underscores,
    /// with no leading or trailing underscore.
    #[test]
    fn normalize_restricts_charset(name in raw_name()) {
        let normalized = normalize_name(&name);
        prop_assert!(normalized.chars().all(|c| matches!(c, 'a'..='z' | '0'..='9' | '_')));
        prop_assert!(!normalized.starts_with('_'));
        prop_assert!(!normalized.ends_with('_'));
    }

    /// Normalization is idempotent.
    #[test]
    fn normalize_is_idempotent(name in raw_name()) {
        let once = normalize_name(&name);
        prop_assert_eq!(normalize_name(&once), once);
    }
}

// =============================================================================
// Sanitizer Properties
// =============================================================================

proptest! {
    /// The standard pass sequence never panics and never changes the row
    /// count, whatever the cell contents.
    #[test]
    fn passes_preserve_alignment(
        monto in value_column(7),
        score in value_column(7),
        comentarios in value_column(7),
    ) {
        let mut table = DataTable::from_columns(vec![
            Column::new("monto", monto),
            Column::new("score", score),
            Column::new("comentarios", comentarios),
        ]).unwrap();

        let config = CleanConfig::default();
        CleanEngine::new().apply(&config.passes(), &mut table);

        prop_assert_eq!(table.row_count(), 7);
        for column in table.columns() {
            prop_assert_eq!(column.len(), 7);
        }
    }

    /// After the amount pass, the amount column holds only floats or nulls.
    #[test]
    fn currency_column_is_float_or_null(monto in value_column(5)) {
        let mut table = DataTable::from_columns(vec![
            Column::new("monto", monto),
        ]).unwrap();

        let config = CleanConfig::default();
        CleanEngine::new().apply(&config.passes(), &mut table);

        for value in &table.column("monto").unwrap().values {
            prop_assert!(matches!(value, Value::Float(_) | Value::Null));
        }
    }
}

// =============================================================================
// Null-Flag Properties
// =============================================================================

proptest! {
    /// Every flag matches the nullness of its source cell, and a second
    /// invocation adds no further columns.
    #[test]
    fn flags_match_nullness(values in value_column(6)) {
        let mut table = DataTable::from_columns(vec![
            Column::new("monto", values),
        ]).unwrap();

        add_null_flags(&mut table);
        let columns_after_first = table.column_count();
        add_null_flags(&mut table);
        prop_assert_eq!(table.column_count(), columns_after_first);

        let source = table.column("monto").unwrap().values.clone();
        let flags = table.column("monto_nan").unwrap().values.clone();
        for (value, flag) in source.iter().zip(&flags) {
            let expected = i64::from(value.is_null());
            prop_assert_eq!(flag, &Value::Int(expected));
        }
    }
}

// =============================================================================
// Quality Gate Properties
// =============================================================================

proptest! {
    /// The gate passes exactly when every present critical column's null
    /// fraction is at or below the threshold.
    #[test]
    fn gate_agrees_with_direct_computation(
        values in value_column(10),
        threshold in 0.0f64..=1.0,
    ) {
        let table = DataTable::from_columns(vec![
            Column::new("monto", values),
        ]).unwrap();

        let fraction = table.column("monto").unwrap().null_count() as f64 / 10.0;
        let config = GateConfig {
            critical_columns: vec!["monto".to_string()],
            threshold,
        };

        let outcome = QualityGate::new().evaluate(&table, &config);
        prop_assert_eq!(outcome.is_ok(), fraction <= threshold);
    }

    /// The whole pipeline either cleans the table or rejects it; it never
    /// panics on arbitrary text input.
    #[test]
    fn pipeline_never_panics(
        monto in value_column(4),
        otros in value_column(4),
    ) {
        let table = DataTable::from_columns(vec![
            Column::new("Monto $$", monto),
            Column::new("Comentario Extraño", otros),
        ]).unwrap();

        let _ = Assay::with_config(AssayConfig::default()).run_table(table);
    }
}
