//! User-supplied Hive column types (`--map-column-hive` style).

use indexmap::IndexMap;

use crate::core::ColumnKey;
use crate::error::{DdlError, Result};

/// One `column=Type` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeOverride {
    /// Column name as written by the user.
    pub column: String,
    /// Hive type, used verbatim.
    pub hive_type: String,
}

/// Column → Hive type overrides, keyed case-insensitively.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeOverrideMap {
    entries: IndexMap<ColumnKey, TypeOverride>,
}

impl TypeOverrideMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `col=Type[,col2=Type2]*`.
    ///
    /// Types are URL-decoded so a comma can be written as `%2C`, e.g.
    /// `price=DECIMAL(10%2C2)`. Empty entries are skipped.
    pub fn parse(text: &str) -> Result<Self> {
        let mut map = Self::new();
        for entry in text.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let mut parts = entry.split('=');
            let (Some(column), Some(hive_type), None) = (parts.next(), parts.next(), parts.next())
            else {
                return Err(malformed(entry));
            };
            let column = column.trim();
            let hive_type = urlencoding::decode(hive_type.trim())
                .map_err(|e| DdlError::Config(format!("Invalid encoding in '{}': {}", entry, e)))?;
            if column.is_empty() || hive_type.trim().is_empty() {
                return Err(malformed(entry));
            }
            map.insert(column, hive_type.trim())?;
        }
        Ok(map)
    }

    /// Add an override; a column may only be mapped once.
    pub fn insert(&mut self, column: &str, hive_type: &str) -> Result<()> {
        let key = ColumnKey::new(column);
        if self.entries.contains_key(&key) {
            return Err(DdlError::Config(format!(
                "Column {} is mapped to a Hive type more than once",
                column
            )));
        }
        self.entries.insert(
            key,
            TypeOverride {
                column: column.to_string(),
                hive_type: hive_type.to_string(),
            },
        );
        Ok(())
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.entries
            .get(&ColumnKey::new(column))
            .map(|o| o.hive_type.as_str())
    }

    pub fn contains(&self, column: &str) -> bool {
        self.entries.contains_key(&ColumnKey::new(column))
    }

    pub fn iter(&self) -> impl Iterator<Item = &TypeOverride> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn malformed(entry: &str) -> DdlError {
    DdlError::Config(format!(
        "Malformed mapping '{}'. Column mapping should be the form key=value[,key=value]*",
        entry
    ))
}
