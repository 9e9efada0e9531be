//! Column label normalization for [`crate::types::Table`].

use std::sync::LazyLock;

use regex::Regex;

use crate::types::Table;

// Anything that is neither a word character nor whitespace.
static NON_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\w\s]").expect("valid regex"));
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s").expect("valid regex"));

/// Rewrite a single label into canonical form.
///
/// First every character that is not a word character (letter, digit, underscore) or
/// whitespace is removed, then all whitespace is removed. Never fails; a label may become
/// empty.
pub fn normalize_label(label: &str) -> String {
    let word_chars = NON_WORD.replace_all(label, "");
    WHITESPACE.replace_all(&word_chars, "").into_owned()
}

/// Returns the table with every column label normalized.
///
/// Row data, column count and column order are untouched.
pub fn normalize_columns(mut table: Table) -> Table {
    for label in &mut table.columns {
        *label = normalize_label(label);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(columns: &[&str]) -> Table {
        Table::new(
            columns.iter().map(|c| c.to_string()).collect(),
            vec![columns.iter().map(|c| format!("{c} cell!")).collect()],
        )
    }

    #[test]
    fn strips_punctuation_then_whitespace() {
        assert_eq!(normalize_label("val ue!"), "value");
        assert_eq!(normalize_label("  Total (USD) "), "TotalUSD");
        assert_eq!(normalize_label("first_name"), "first_name");
        assert_eq!(normalize_label("a\tb\nc"), "abc");
    }

    #[test]
    fn keeps_unicode_word_characters() {
        assert_eq!(normalize_label("größe €"), "größe");
    }

    #[test]
    fn label_may_become_empty() {
        assert_eq!(normalize_label("?! -"), "");
        assert_eq!(normalize_label(""), "");
    }

    #[test]
    fn normalization_is_idempotent() {
        let once = normalize_columns(table(&["id", "val ue!", "#Count", "x-y z"]));
        let twice = normalize_columns(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn only_labels_change() {
        let original = table(&["i d", "val ue!"]);
        let normalized = normalize_columns(original.clone());

        assert_eq!(normalized.columns, vec!["id", "value"]);
        assert_eq!(normalized.rows, original.rows);
        assert_eq!(normalized.row_count(), original.row_count());
        assert_eq!(normalized.column_count(), original.column_count());
    }
}
