//! # hive-ddl
//!
//! Hive table definitions for data imported from relational databases.
//!
//! This library generates the statements needed to expose imported,
//! delimited text files as a Hive table:
//!
//! - **Type mapping** from JDBC SQL types to Hive column types
//! - **User overrides** of individual column types (`col=Type,...`)
//! - **CREATE TABLE** with partitions, external locations and LZO input formats
//! - **LOAD DATA** moving imported files into the (partitioned) table
//! - **TimeValue**, a time of day that keeps its written fractional precision
//!
//! ## Example
//!
//! ```rust,no_run
//! use hive_ddl::{Config, StaticSchema};
//!
//! fn main() -> hive_ddl::Result<()> {
//!     let config = Config::load("config.yaml")?;
//!     let schema = StaticSchema::load("schema.yaml")?;
//!     let ddl = config.table_def_writer(Some(&schema)).generate()?;
//!     println!("{}", ddl.create_table);
//!     println!("{}", ddl.load_data);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod hive;
pub mod source;
pub mod time;
pub mod typemap;

// Re-exports for convenient access
pub use config::{Config, HiveOptions, PartitionSpec, TableConfig};
pub use error::{DdlError, Result};
pub use hive::{CompressionCodec, TableDefWriter, TableDefinition};
pub use source::{StaticSchema, TableSchema};
pub use time::TimeValue;
pub use typemap::HiveTypeMapper;
