//! Core abstractions for schema-driven DDL generation.
//!
//! - [`schema`]: SQL type codes, column descriptors, case-insensitive column map
//! - [`identifier`]: identifier quoting and string literal escaping
//! - [`traits`]: seams for schema introspection, type mapping and type resolution

pub mod identifier;
pub mod schema;
pub mod traits;

pub use schema::{ColumnDescriptor, ColumnKey, ColumnTypeMap, SqlType};
pub use traits::{ColumnTypeSource, SchemaIntrospector, TypeMapper};
