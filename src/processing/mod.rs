//! In-memory table transformations and checks.
//!
//! - [`normalize_columns()`]: rewrite column labels into canonical form
//! - [`validate_columns()`]: exact, ordered comparison of labels against a schema
//!
//! ## Example: normalize → validate
//!
//! ```rust
//! use schema_gzip_ingest::processing::{normalize_columns, validate_columns};
//! use schema_gzip_ingest::types::{ColumnSpec, Schema, Table};
//!
//! let schema = Schema::new(',', vec![ColumnSpec::new("id"), ColumnSpec::new("value")]);
//! let table = Table::new(
//!     vec!["id".to_string(), "val ue!".to_string()],
//!     vec![vec!["1".to_string(), "10.5".to_string()]],
//! );
//!
//! let table = normalize_columns(table);
//! assert_eq!(table.columns, vec!["id", "value"]);
//! validate_columns(&table, &schema).unwrap();
//! ```

pub mod normalize;
pub mod validate;

pub use normalize::{normalize_columns, normalize_label};
pub use validate::validate_columns;
