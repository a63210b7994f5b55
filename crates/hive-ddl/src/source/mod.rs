//! Schema sources.
//!
//! [`StaticSchema`] answers column lookups from a YAML document instead of a
//! live database, which is enough to generate DDL ahead of an import.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{ColumnDescriptor, ColumnKey, ColumnTypeMap, SchemaIntrospector};
use crate::error::{DdlError, Result};

/// One table of a static schema file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableSchema {
    pub name: String,
    #[serde(default)]
    pub columns: Vec<ColumnDescriptor>,
}

#[derive(Debug, Deserialize)]
struct SchemaFile {
    #[serde(default)]
    tables: Vec<TableSchema>,
}

/// File-backed schema introspector. Table lookups are case-insensitive.
#[derive(Debug, Clone, Default)]
pub struct StaticSchema {
    tables: HashMap<ColumnKey, ColumnTypeMap>,
}

impl StaticSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a schema from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading schema from {}", path.display());
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse a schema from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let file: SchemaFile = serde_yaml::from_str(yaml)?;
        let mut schema = Self::new();
        for table in file.tables {
            schema.add_table(table)?;
        }
        Ok(schema)
    }

    /// Register a table. Column names must be unique ignoring case.
    pub fn add_table(&mut self, table: TableSchema) -> Result<()> {
        if table.name.trim().is_empty() {
            return Err(DdlError::Schema("Table name cannot be empty".into()));
        }
        let key = ColumnKey::new(&table.name);
        if self.tables.contains_key(&key) {
            return Err(DdlError::Schema(format!(
                "Table {} is defined more than once",
                table.name
            )));
        }

        let mut columns = ColumnTypeMap::new();
        for column in table.columns {
            if column.name.is_empty() {
                return Err(DdlError::Schema(format!(
                    "Table {} has a column without a name",
                    table.name
                )));
            }
            let name = column.name.clone();
            if columns.insert(column).is_some() {
                return Err(DdlError::Schema(format!(
                    "Column {} is defined more than once in table {}",
                    name, table.name
                )));
            }
        }

        debug!("Registered table {} ({} columns)", table.name, columns.len());
        self.tables.insert(key, columns);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    fn table(&self, name: &str) -> Result<&ColumnTypeMap> {
        self.tables
            .get(&ColumnKey::new(name))
            .ok_or_else(|| DdlError::Schema(format!("Table {} not found in schema", name)))
    }
}

impl SchemaIntrospector for StaticSchema {
    fn column_names(&self, table: &str) -> Result<Vec<String>> {
        Ok(self.table(table)?.names())
    }

    fn column_info(&self, table: &str) -> Result<ColumnTypeMap> {
        Ok(self.table(table)?.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SqlType;
    use std::io::Write;

    const SCHEMA: &str = r#"
tables:
  - name: employees
    columns:
      - { name: id, type: INTEGER }
      - { name: Name, type: varchar }
      - { name: salary, type: DECIMAL, precision: 10, scale: 2 }
      - { name: hired, type: 93 }
  - name: empty
"#;

    #[test]
    fn test_from_yaml() {
        let schema = StaticSchema::from_yaml(SCHEMA).unwrap();
        assert_eq!(schema.len(), 2);

        let names = schema.column_names("employees").unwrap();
        assert_eq!(names, vec!["id", "Name", "salary", "hired"]);

        let info = schema.column_info("EMPLOYEES").unwrap();
        assert_eq!(info.get("name").unwrap().sql_type, SqlType::Varchar);
        assert_eq!(info.get("hired").unwrap().sql_type, SqlType::Timestamp);

        let salary = info.get("salary").unwrap();
        assert_eq!(salary.sql_type, SqlType::Decimal);
        assert_eq!(salary.precision, Some(10));
        assert_eq!(salary.scale, Some(2));
    }

    #[test]
    fn test_table_without_columns() {
        let schema = StaticSchema::from_yaml(SCHEMA).unwrap();
        assert!(schema.column_names("empty").unwrap().is_empty());
    }

    #[test]
    fn test_unknown_table() {
        let schema = StaticSchema::from_yaml(SCHEMA).unwrap();
        let err = schema.column_info("missing").unwrap_err();
        assert!(matches!(err, DdlError::Schema(_)));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_duplicate_column_ignoring_case() {
        let yaml = r#"
tables:
  - name: t
    columns:
      - { name: id, type: INTEGER }
      - { name: ID, type: BIGINT }
"#;
        let err = StaticSchema::from_yaml(yaml).unwrap_err();
        assert!(err.to_string().contains("Column ID is defined more than once"));
    }

    #[test]
    fn test_duplicate_table() {
        let yaml = "tables:\n  - name: t\n  - name: T\n";
        assert!(matches!(
            StaticSchema::from_yaml(yaml),
            Err(DdlError::Schema(_))
        ));
    }

    #[test]
    fn test_unknown_type_name_is_rejected() {
        let yaml = "tables:\n  - name: t\n    columns:\n      - { name: a, type: WIDGET }\n";
        assert!(matches!(StaticSchema::from_yaml(yaml), Err(DdlError::Yaml(_))));
    }

    #[test]
    fn test_unlisted_type_code_is_kept() {
        let yaml = "tables:\n  - name: t\n    columns:\n      - { name: a, type: -155 }\n";
        let schema = StaticSchema::from_yaml(yaml).unwrap();
        let info = schema.column_info("t").unwrap();
        assert_eq!(info.get("a").unwrap().sql_type, SqlType::Unknown(-155));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SCHEMA.as_bytes()).unwrap();
        let schema = StaticSchema::load(file.path()).unwrap();
        assert_eq!(schema.column_names("employees").unwrap().len(), 4);
    }
}
