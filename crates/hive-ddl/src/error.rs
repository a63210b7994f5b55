//! Error types for DDL generation and time value handling.

use thiserror::Error;

use crate::core::SqlType;

/// Exit code for configuration errors (bad YAML, bad toggles, bad overrides).
pub const EXIT_CONFIG_ERROR: u8 = 1;
/// Exit code for schema errors (unsupported types, unknown tables).
pub const EXIT_SCHEMA_ERROR: u8 = 2;
/// Exit code for malformed user input (time text).
pub const EXIT_INPUT_ERROR: u8 = 3;
/// Exit code for I/O errors (missing files).
pub const EXIT_IO_ERROR: u8 = 7;

/// Main error type for DDL generation.
#[derive(Error, Debug)]
pub enum DdlError {
    /// Configuration error (invalid YAML, missing fields, bad toggles, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Schema introspection failed (unknown table, inconsistent metadata)
    #[error("Schema error: {0}")]
    Schema(String),

    /// Column type has neither a Hive mapping nor a user override
    #[error("Hive does not support the SQL type {sql_type} for column {column}")]
    UnsupportedType { column: String, sql_type: SqlType },

    /// A user type override names a column absent from the schema
    #[error("No column by the name {column} found while importing data")]
    UnresolvedOverride { column: String },

    /// Delimiter code outside the 7-bit range the octal escape can express
    #[error("Character code {0} cannot be escaped as a Hive octal sequence (must be 0-127)")]
    InvalidEscapeCode(u32),

    /// Time text does not follow hh:mm:ss[.fraction]
    #[error("Malformed time value {input:?}: {reason}")]
    MalformedTime { input: String, reason: String },

    /// IO error (file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization/deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DdlError {
    /// Create a Config error.
    pub fn config(message: impl Into<String>) -> Self {
        DdlError::Config(message.into())
    }

    /// Create a MalformedTime error.
    pub fn malformed_time(input: impl Into<String>, reason: impl Into<String>) -> Self {
        DdlError::MalformedTime {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Process exit code for this error category.
    pub fn exit_code(&self) -> u8 {
        match self {
            DdlError::Config(_)
            | DdlError::UnresolvedOverride { .. }
            | DdlError::InvalidEscapeCode(_)
            | DdlError::Yaml(_)
            | DdlError::Json(_) => EXIT_CONFIG_ERROR,
            DdlError::Schema(_) | DdlError::UnsupportedType { .. } => EXIT_SCHEMA_ERROR,
            DdlError::MalformedTime { .. } => EXIT_INPUT_ERROR,
            DdlError::Io(_) => EXIT_IO_ERROR,
        }
    }

    /// Format error with full details including error chain
    pub fn format_detailed(&self) -> String {
        let mut output = format!("Error: {}\n", self);

        let mut source = std::error::Error::source(self);
        let mut depth = 1;
        while let Some(err) = source {
            output.push_str(&format!("\nCaused by:\n  {}: {}", depth, err));
            source = err.source();
            depth += 1;
        }

        output
    }
}

/// Result type alias for DDL operations.
pub type Result<T> = std::result::Result<T, DdlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(DdlError::config("x").exit_code(), EXIT_CONFIG_ERROR);
        assert_eq!(
            DdlError::UnresolvedOverride {
                column: "id".into()
            }
            .exit_code(),
            EXIT_CONFIG_ERROR
        );
        assert_eq!(
            DdlError::UnsupportedType {
                column: "blob".into(),
                sql_type: SqlType::Blob,
            }
            .exit_code(),
            EXIT_SCHEMA_ERROR
        );
        assert_eq!(
            DdlError::malformed_time("x", "y").exit_code(),
            EXIT_INPUT_ERROR
        );
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        assert_eq!(DdlError::from(io).exit_code(), EXIT_IO_ERROR);
    }

    #[test]
    fn test_unsupported_type_message_names_column_and_type() {
        let err = DdlError::UnsupportedType {
            column: "payload".into(),
            sql_type: SqlType::Blob,
        };
        let msg = err.to_string();
        assert!(msg.contains("payload"));
        assert!(msg.contains("BLOB"));
    }

    #[test]
    fn test_format_detailed_includes_chain() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "schema.yaml");
        let err = DdlError::from(io);
        let detailed = err.format_detailed();
        assert!(detailed.starts_with("Error: IO error: schema.yaml"));
    }
}
