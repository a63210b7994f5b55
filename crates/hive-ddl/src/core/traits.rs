//! Core traits at the seams of DDL generation.
//!
//! - [`SchemaIntrospector`]: reads column names and types from a source
//! - [`TypeMapper`]: maps a SQL type code to a Hive type name
//! - [`ColumnTypeSource`]: one strategy for producing a column's Hive type
//!
//! # Design Patterns
//!
//! - **Strategy**: `TypeMapper` and `ColumnTypeSource` provide interchangeable
//!   algorithms; the table definition writer tries type sources in a fixed order.

use crate::error::Result;

use super::schema::{ColumnDescriptor, ColumnTypeMap, SqlType};

/// Read schema metadata from a source database.
///
/// Implementations may block on a network round trip. The table definition
/// writer calls each method at most once per table per generation.
pub trait SchemaIntrospector: Send + Sync {
    /// Column names of `table`, in source order.
    fn column_names(&self, table: &str) -> Result<Vec<String>>;

    /// Column types of `table`, keyed case-insensitively.
    fn column_info(&self, table: &str) -> Result<ColumnTypeMap>;
}

/// Maps SQL type codes to Hive type names.
pub trait TypeMapper: Send + Sync {
    /// Hive type name for `sql_type`, or `None` when Hive has no equivalent.
    fn to_hive_type(&self, sql_type: SqlType) -> Option<&'static str>;

    /// Whether the mapping for `sql_type` loses fidelity.
    fn is_approximate(&self, sql_type: SqlType) -> bool;
}

/// One strategy for producing the Hive type of a column.
///
/// Returns `Ok(None)` when this source has no opinion about the column, so
/// the next source in line is consulted.
pub trait ColumnTypeSource {
    fn hive_type(&self, column: &ColumnDescriptor) -> Result<Option<String>>;
}
