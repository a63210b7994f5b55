//! Configuration validation.

use super::Config;
use std::collections::HashSet;

use crate::core::identifier::{validate_bare_identifier, validate_identifier};
use crate::core::ColumnKey;
use crate::error::{DdlError, Result};
use crate::hive::{encode_delimiter, TypeOverrideMap};

/// Validate the configuration.
pub fn validate(config: &Config) -> Result<()> {
    // Table validation
    if config.table.input.is_empty() {
        return Err(DdlError::config("table.input is required"));
    }
    if let Some(output) = &config.table.output {
        validate_identifier(output)
            .map_err(|e| DdlError::Config(format!("table.output: {}", e)))?;
    }

    let hive = &config.hive;

    if let Some(db) = &hive.database {
        validate_identifier(db).map_err(|e| DdlError::Config(format!("hive.database: {}", e)))?;
    }

    if hive.staging_root.is_empty() {
        return Err(DdlError::config("hive.staging_root cannot be empty"));
    }

    if let Some(partition) = &hive.partition {
        if partition.key.is_empty() {
            return Err(DdlError::config("hive.partition.key is required"));
        }
        if partition.value.is_empty() {
            return Err(DdlError::config("hive.partition.value is required"));
        }
        validate_bare_identifier(&partition.key)
            .map_err(|e| DdlError::Config(format!("hive.partition.key: {}", e)))?;
    }

    if hive.target_dir.as_deref() == Some("") {
        return Err(DdlError::config("hive.target_dir cannot be empty"));
    }
    if hive.external_table_dir.as_deref() == Some("") {
        return Err(DdlError::config("hive.external_table_dir cannot be empty"));
    }

    if let Some(columns) = &hive.columns {
        if columns.iter().any(|c| c.is_empty()) {
            return Err(DdlError::config("hive.columns cannot contain empty names"));
        }
        let mut seen = HashSet::new();
        if let Some(dup) = columns.iter().find(|c| !seen.insert(ColumnKey::new(c))) {
            return Err(DdlError::Config(format!(
                "hive.columns lists column {} more than once",
                dup
            )));
        }
    }

    encode_delimiter(hive.field_delimiter)?;
    encode_delimiter(hive.line_delimiter)?;
    if hive.field_delimiter == hive.line_delimiter {
        return Err(DdlError::config(
            "hive.field_delimiter and hive.line_delimiter must differ",
        ));
    }

    if let Some(text) = &hive.map_column_hive {
        TypeOverrideMap::parse(text)?;
    }

    Ok(())
}
