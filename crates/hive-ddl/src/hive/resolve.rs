//! Column type sources, tried in order: user overrides, then the type mapper.

use crate::core::{ColumnDescriptor, ColumnTypeSource, TypeMapper};
use crate::error::Result;

use super::overrides::TypeOverrideMap;

/// Types the user asked for explicitly.
pub struct UserOverrides<'a> {
    overrides: &'a TypeOverrideMap,
}

impl<'a> UserOverrides<'a> {
    pub fn new(overrides: &'a TypeOverrideMap) -> Self {
        Self { overrides }
    }
}

impl ColumnTypeSource for UserOverrides<'_> {
    fn hive_type(&self, column: &ColumnDescriptor) -> Result<Option<String>> {
        Ok(self.overrides.get(&column.name).map(str::to_string))
    }
}

/// Types derived from the SQL type code.
pub struct MappedTypes<'a> {
    mapper: &'a dyn TypeMapper,
}

impl<'a> MappedTypes<'a> {
    pub fn new(mapper: &'a dyn TypeMapper) -> Self {
        Self { mapper }
    }
}

impl ColumnTypeSource for MappedTypes<'_> {
    fn hive_type(&self, column: &ColumnDescriptor) -> Result<Option<String>> {
        Ok(self.mapper.to_hive_type(column.sql_type).map(str::to_string))
    }
}

/// First non-empty answer from `sources`, in order.
pub fn first_match(
    sources: &[&dyn ColumnTypeSource],
    column: &ColumnDescriptor,
) -> Result<Option<String>> {
    for source in sources {
        if let Some(hive_type) = source.hive_type(column)?.filter(|t| !t.is_empty()) {
            return Ok(Some(hive_type));
        }
    }
    Ok(None)
}
