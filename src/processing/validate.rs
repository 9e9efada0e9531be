//! Column validation against a [`crate::types::Schema`].

use crate::error::{ColumnMismatch, PipelineError, PipelineResult};
use crate::types::{Schema, Table};

const MISMATCH_MESSAGE: &str = "column names or order do not match schema";

/// Check that the table's labels equal the schema's column names, in declared order.
///
/// Comparison is exact: same length, same names, same order, case-sensitive. On mismatch
/// returns [`PipelineError::Validation`] listing every differing position.
pub fn validate_columns(table: &Table, schema: &Schema) -> PipelineResult<()> {
    let actual: Vec<&str> = table.column_names().collect();
    let expected: Vec<&str> = schema.column_names().collect();

    if actual == expected {
        return Ok(());
    }

    let mismatches = column_mismatches(&expected, &actual);
    let message = match mismatches.first() {
        Some(first) => format!(
            "{MISMATCH_MESSAGE} ({} mismatch(es), first at {first}); expected={expected:?} actual={actual:?}",
            mismatches.len()
        ),
        None => MISMATCH_MESSAGE.to_string(),
    };

    Err(PipelineError::Validation { message, mismatches })
}

fn column_mismatches(expected: &[&str], actual: &[&str]) -> Vec<ColumnMismatch> {
    let len = expected.len().max(actual.len());
    (0..len)
        .filter_map(|position| {
            let e = expected.get(position).copied();
            let a = actual.get(position).copied();
            (e != a).then(|| ColumnMismatch {
                position,
                expected: e.map(str::to_owned),
                actual: a.map(str::to_owned),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::normalize_columns;
    use crate::types::ColumnSpec;

    fn id_value_schema() -> Schema {
        Schema::new(',', vec![ColumnSpec::new("id"), ColumnSpec::new("value")])
    }

    fn table(columns: &[&str]) -> Table {
        Table::new(columns.iter().map(|c| c.to_string()).collect(), Vec::new())
    }

    #[test]
    fn exact_match_succeeds() {
        validate_columns(&table(&["id", "value"]), &id_value_schema()).unwrap();
    }

    #[test]
    fn normalized_labels_match() {
        let t = normalize_columns(table(&["id", "val ue!"]));
        validate_columns(&t, &id_value_schema()).unwrap();
    }

    #[test]
    fn wrong_order_fails_with_positions() {
        let err = validate_columns(&table(&["value", "id"]), &id_value_schema()).unwrap_err();
        assert!(err.to_string().contains("column names or order do not match schema"));

        match err {
            PipelineError::Validation { mismatches, .. } => {
                assert_eq!(mismatches.len(), 2);
                assert_eq!(mismatches[0].position, 0);
                assert_eq!(mismatches[0].expected.as_deref(), Some("id"));
                assert_eq!(mismatches[0].actual.as_deref(), Some("value"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn comparison_is_case_sensitive() {
        assert!(validate_columns(&table(&["ID", "value"]), &id_value_schema()).is_err());
    }

    #[test]
    fn extra_or_missing_columns_fail() {
        let err = validate_columns(&table(&["id", "value", "extra"]), &id_value_schema()).unwrap_err();
        match err {
            PipelineError::Validation { mismatches, .. } => {
                assert_eq!(
                    mismatches,
                    vec![ColumnMismatch {
                        position: 2,
                        expected: None,
                        actual: Some("extra".to_string()),
                    }]
                );
            }
            other => panic!("unexpected error: {other}"),
        }

        assert!(validate_columns(&table(&["id"]), &id_value_schema()).is_err());
    }

    #[test]
    fn empty_schema_matches_empty_table() {
        let schema = Schema::new(',', Vec::new());
        validate_columns(&Table::default(), &schema).unwrap();
        assert!(validate_columns(&table(&["id"]), &schema).is_err());
    }
}
