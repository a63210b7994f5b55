//! Configuration type definitions.

use serde::{Deserialize, Serialize};

use crate::hive::CompressionCodec;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Source and destination table names.
    pub table: TableConfig,

    /// Hive DDL generation options.
    #[serde(default)]
    pub hive: HiveOptions,
}

impl Config {
    /// Name of the Hive table to create (defaults to the input table).
    pub fn output_table(&self) -> &str {
        self.table.output.as_deref().unwrap_or(&self.table.input)
    }
}

/// Table names for one import.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableConfig {
    /// Source table, passed to schema introspection.
    pub input: String,

    /// Hive table name (default: same as input).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
}

/// Options controlling the generated `CREATE TABLE` and `LOAD DATA` statements.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HiveOptions {
    /// Hive database; statements qualify the table as `` `db`.`table` ``.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,

    /// Directory the data was imported into (default: the input table name).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_dir: Option<String>,

    /// Root that relative target directories are resolved against.
    pub staging_root: String,

    /// Static partition for the load.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partition: Option<PartitionSpec>,

    /// Codec the imported files were compressed with.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compression_codec: Option<CompressionCodec>,

    /// Type overrides, `col=Type[,col=Type]*`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub map_column_hive: Option<String>,

    /// Import only these columns, in this order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<String>>,

    /// Emit `LOAD DATA ... OVERWRITE`.
    pub overwrite: bool,

    /// Emit `CREATE TABLE` without `IF NOT EXISTS`.
    pub fail_if_exists: bool,

    /// Create an EXTERNAL table at this location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_table_dir: Option<String>,

    /// Field delimiter of the imported text files (default: `,`).
    pub field_delimiter: char,

    /// Record delimiter of the imported text files (default: newline).
    pub line_delimiter: char,

    /// Add a `COMMENT` with the import time to `CREATE TABLE`.
    pub comments: bool,
}

impl Default for HiveOptions {
    fn default() -> Self {
        Self {
            database: None,
            target_dir: None,
            staging_root: default_staging_root(),
            partition: None,
            compression_codec: None,
            map_column_hive: None,
            columns: None,
            overwrite: false,
            fail_if_exists: false,
            external_table_dir: None,
            field_delimiter: ',',
            line_delimiter: '\n',
            comments: false,
        }
    }
}

/// A single static partition `key='value'`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionSpec {
    pub key: String,
    pub value: String,
}

impl PartitionSpec {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

fn default_staging_root() -> String {
    "/user/hive/warehouse".to_string()
}
