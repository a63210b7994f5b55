//! Configuration loading and validation.

mod types;
mod validation;

pub use types::*;

use crate::core::SchemaIntrospector;
use crate::error::Result;
use crate::hive::TableDefWriter;
use std::path::Path;

impl Config {
    /// Load configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        validation::validate(self)
    }

    /// Build a table definition writer for the configured tables.
    pub fn table_def_writer<'a>(
        &'a self,
        introspector: Option<&'a dyn SchemaIntrospector>,
    ) -> TableDefWriter<'a> {
        TableDefWriter::new(
            &self.hive,
            introspector,
            self.table.input.clone(),
            self.output_table().to_string(),
        )
    }
}
