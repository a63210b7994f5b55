//! Hive table definition generation.
//!
//! [`TableDefWriter`] turns a source table's columns into the two statements
//! a Hive import needs: a `CREATE TABLE` describing the delimited text files,
//! and a `LOAD DATA` moving the imported files into the table.
//!
//! # Usage
//!
//! ```rust
//! use hive_ddl::config::{HiveOptions, PartitionSpec};
//! use hive_ddl::core::{ColumnDescriptor, ColumnTypeMap, SqlType};
//! use hive_ddl::hive::TableDefWriter;
//!
//! let options = HiveOptions {
//!     partition: Some(PartitionSpec::new("ds", "20110413")),
//!     ..HiveOptions::default()
//! };
//! let columns: ColumnTypeMap = vec![ColumnDescriptor::new("id", SqlType::Integer)]
//!     .into_iter()
//!     .collect();
//!
//! let ddl = TableDefWriter::new(&options, None, "orders", "orders")
//!     .with_column_types(columns)
//!     .generate()?;
//! assert!(ddl.create_table.contains("`id` INT"));
//! assert!(ddl.load_data.ends_with("PARTITION (ds='20110413')"));
//! # Ok::<(), hive_ddl::DdlError>(())
//! ```

mod codec;
mod escape;
mod overrides;
mod resolve;

pub use codec::{CompressionCodec, IGNORE_KEY_TEXT_OUTPUT_FORMAT, LZO_INPUT_FORMAT};
pub use escape::{encode_delimiter, encode_octal_byte};
pub use overrides::{TypeOverride, TypeOverrideMap};
pub use resolve::{first_match, MappedTypes, UserOverrides};

use std::borrow::Cow;
use std::collections::HashSet;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::HiveOptions;
use crate::core::identifier::{qualify_hive, quote_hive, quote_literal, validate_bare_identifier};
use crate::core::{
    ColumnDescriptor, ColumnKey, ColumnTypeMap, ColumnTypeSource, SchemaIntrospector, SqlType,
    TypeMapper,
};
use crate::error::{DdlError, Result};
use crate::typemap::{self, HiveTypeMapper};

static STANDARD_MAPPER: HiveTypeMapper = HiveTypeMapper;

/// Both statements for one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableDefinition {
    pub create_table: String,
    pub load_data: String,
    /// Columns whose type was cast to a less precise Hive type.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub approximate_columns: Vec<String>,
}

/// A column with its resolved Hive type.
#[derive(Debug, Clone, PartialEq, Eq)]
struct HiveColumn {
    name: String,
    hive_type: String,
    approximate: bool,
}

/// Generates Hive DDL for one imported table.
pub struct TableDefWriter<'a> {
    options: &'a HiveOptions,
    introspector: Option<&'a dyn SchemaIntrospector>,
    mapper: &'a dyn TypeMapper,
    input_table: String,
    output_table: String,
    column_types: Option<ColumnTypeMap>,
    with_comments: bool,
}

impl<'a> TableDefWriter<'a> {
    /// Create a writer. Column types come from `introspector` unless set
    /// explicitly with [`with_column_types`](Self::with_column_types).
    pub fn new(
        options: &'a HiveOptions,
        introspector: Option<&'a dyn SchemaIntrospector>,
        input_table: impl Into<String>,
        output_table: impl Into<String>,
    ) -> Self {
        Self {
            options,
            introspector,
            mapper: &STANDARD_MAPPER,
            input_table: input_table.into(),
            output_table: output_table.into(),
            column_types: None,
            with_comments: options.comments,
        }
    }

    /// Use these column types (in this order) instead of introspecting.
    pub fn with_column_types(mut self, column_types: ColumnTypeMap) -> Self {
        self.column_types = Some(column_types);
        self
    }

    /// Replace the standard JDBC → Hive mapper.
    pub fn with_type_mapper(mut self, mapper: &'a dyn TypeMapper) -> Self {
        self.mapper = mapper;
        self
    }

    /// Toggle the `COMMENT 'Imported by ...'` clause.
    pub fn with_comments(mut self, enabled: bool) -> Self {
        self.with_comments = enabled;
        self
    }

    /// Generate both statements from a single schema lookup.
    pub fn generate(&self) -> Result<TableDefinition> {
        let columns = self.resolve_columns()?;
        let definition = TableDefinition {
            create_table: self.render_create_table(&columns)?,
            load_data: self.render_load_data()?,
            approximate_columns: columns
                .iter()
                .filter(|c| c.approximate)
                .map(|c| c.name.clone())
                .collect(),
        };
        info!(
            "Generated Hive DDL for {} -> {} ({} columns)",
            self.input_table,
            self.output_table,
            columns.len()
        );
        Ok(definition)
    }

    /// The `CREATE TABLE` statement.
    pub fn create_table_stmt(&self) -> Result<String> {
        let columns = self.resolve_columns()?;
        self.render_create_table(&columns)
    }

    /// The `LOAD DATA` statement.
    ///
    /// Runs the same column checks as [`create_table_stmt`](Self::create_table_stmt),
    /// so a table that cannot be created never gets a load statement.
    pub fn load_data_stmt(&self) -> Result<String> {
        self.resolve_columns()?;
        self.render_load_data()
    }

    fn render_load_data(&self) -> Result<String> {
        let mut sql = format!("LOAD DATA INPATH {}", quote_literal(&self.source_path()));
        if self.options.overwrite {
            sql.push_str(" OVERWRITE");
        }
        sql.push_str(" INTO TABLE ");
        sql.push_str(&self.qualified_output_table()?);

        if let Some(partition) = &self.options.partition {
            validate_bare_identifier(&partition.key)?;
            sql.push_str(&format!(
                " PARTITION ({}={})",
                partition.key,
                quote_literal(&partition.value)
            ));
        }

        debug!("Load data statement: {}", sql);
        Ok(sql)
    }

    /// Where the imported files live: the target directory, or the input
    /// table name, under the staging root. Absolute directories are used as is.
    pub fn source_path(&self) -> String {
        let dir = self
            .options
            .target_dir
            .as_deref()
            .unwrap_or(&self.input_table);
        if dir.starts_with('/') || dir.contains("://") {
            dir.to_string()
        } else {
            format!("{}/{}", self.options.staging_root.trim_end_matches('/'), dir)
        }
    }

    /// Hive type for one column: the user override verbatim if any, else the
    /// mapped type. A mapped DECIMAL column gets its precision and scale.
    pub fn resolve_column_type(&self, column: &ColumnDescriptor) -> Result<String> {
        let overrides = self.overrides()?;
        Ok(self.resolve_with(&overrides, column)?.hive_type)
    }

    fn resolve_with(
        &self,
        overrides: &TypeOverrideMap,
        column: &ColumnDescriptor,
    ) -> Result<HiveColumn> {
        let user = UserOverrides::new(overrides);
        let mapped = MappedTypes::new(self.mapper);
        let sources: [&dyn ColumnTypeSource; 2] = [&user, &mapped];

        let hive_type =
            first_match(&sources, column)?.ok_or_else(|| DdlError::UnsupportedType {
                column: column.name.clone(),
                sql_type: column.sql_type,
            })?;

        let overridden = overrides.contains(&column.name);
        let approximate = !overridden && self.mapper.is_approximate(column.sql_type);
        if approximate {
            warn!(
                "Column {} had to be cast to a less precise type ({} -> {}) in Hive",
                column.name, column.sql_type, hive_type
            );
        }

        let hive_type = match column.precision {
            Some(precision)
                if !overridden
                    && column.sql_type == SqlType::Decimal
                    && hive_type == typemap::DECIMAL =>
            {
                typemap::decimal_type(precision, column.scale.unwrap_or(0))
            }
            _ => hive_type,
        };

        debug!("Column {} ({}) -> {}", column.name, column.sql_type, hive_type);
        Ok(HiveColumn {
            name: column.name.clone(),
            hive_type,
            approximate,
        })
    }

    fn overrides(&self) -> Result<TypeOverrideMap> {
        match &self.options.map_column_hive {
            Some(text) => TypeOverrideMap::parse(text),
            None => Ok(TypeOverrideMap::new()),
        }
    }

    /// Column names and types, from explicit types or one introspection pass.
    fn load_schema(&self) -> Result<(Vec<String>, Cow<'_, ColumnTypeMap>)> {
        let (names, types) = match (&self.column_types, self.introspector) {
            (Some(types), _) => (types.names(), Cow::Borrowed(types)),
            (None, Some(introspector)) => {
                debug!("Introspecting columns of {}", self.input_table);
                let names = introspector.column_names(&self.input_table)?;
                let types = introspector.column_info(&self.input_table)?;
                (names, Cow::Owned(types))
            }
            (None, None) => {
                return Err(DdlError::Config(format!(
                    "No column types available for table {}: set them explicitly or provide a schema source",
                    self.input_table
                )));
            }
        };

        let names = match &self.options.columns {
            Some(selected) if !selected.is_empty() => {
                if let Some(missing) = selected.iter().find(|c| !types.contains(c)) {
                    return Err(DdlError::Schema(format!(
                        "Column {} does not exist in table {}",
                        missing, self.input_table
                    )));
                }
                let mut seen = HashSet::new();
                if let Some(dup) = selected.iter().find(|c| !seen.insert(ColumnKey::new(c))) {
                    return Err(DdlError::Config(format!(
                        "Column {} is selected more than once",
                        dup
                    )));
                }
                selected.clone()
            }
            _ => names,
        };

        Ok((names, types))
    }

    fn resolve_columns(&self) -> Result<Vec<HiveColumn>> {
        let overrides = self.overrides()?;
        let (names, types) = self.load_schema()?;

        for entry in overrides.iter() {
            if !types.contains(&entry.column) {
                return Err(DdlError::UnresolvedOverride {
                    column: entry.column.clone(),
                });
            }
        }

        let partition_key = self
            .options
            .partition
            .as_ref()
            .map(|p| ColumnKey::new(&p.key));

        let mut columns = Vec::with_capacity(names.len());
        for name in names {
            if partition_key.as_ref() == Some(&ColumnKey::new(&name)) {
                return Err(DdlError::Config(format!(
                    "Partition key {} cannot be a column to import",
                    name
                )));
            }
            let descriptor = types.get(&name).ok_or_else(|| {
                DdlError::Schema(format!(
                    "No type information for column {} of table {}",
                    name, self.input_table
                ))
            })?;
            let column = self.resolve_with(&overrides, descriptor)?;
            columns.push(HiveColumn { name, ..column });
        }

        Ok(columns)
    }

    fn qualified_output_table(&self) -> Result<String> {
        qualify_hive(self.options.database.as_deref(), &self.output_table)
    }

    fn render_create_table(&self, columns: &[HiveColumn]) -> Result<String> {
        let opts = self.options;

        let mut sql = String::from("CREATE ");
        if opts.external_table_dir.is_some() {
            sql.push_str("EXTERNAL ");
        }
        sql.push_str("TABLE ");
        if !opts.fail_if_exists {
            sql.push_str("IF NOT EXISTS ");
        }
        sql.push_str(&self.qualified_output_table()?);

        let defs = columns
            .iter()
            .map(|c| Ok(format!("{} {}", quote_hive(&c.name)?, c.hive_type)))
            .collect::<Result<Vec<_>>>()?;
        sql.push_str(" ( ");
        sql.push_str(&defs.join(", "));
        sql.push_str(") ");

        if self.with_comments {
            let now = chrono::Local::now().format("%Y/%m/%d %H:%M:%S");
            sql.push_str("COMMENT ");
            sql.push_str(&quote_literal(&format!("Imported by hive-ddl on {}", now)));
            sql.push(' ');
        }

        if let Some(partition) = &opts.partition {
            validate_bare_identifier(&partition.key)?;
            sql.push_str(&format!("PARTITIONED BY ({} STRING) ", partition.key));
        }

        sql.push_str(&format!(
            "ROW FORMAT DELIMITED FIELDS TERMINATED BY '{}' LINES TERMINATED BY '{}' ",
            encode_delimiter(opts.field_delimiter)?,
            encode_delimiter(opts.line_delimiter)?
        ));

        match opts.compression_codec {
            Some(codec) if codec.needs_lzo_input_format() => {
                sql.push_str(&format!(
                    "STORED AS INPUTFORMAT '{}' OUTPUTFORMAT '{}'",
                    LZO_INPUT_FORMAT, IGNORE_KEY_TEXT_OUTPUT_FORMAT
                ));
            }
            _ => sql.push_str("STORED AS TEXTFILE"),
        }

        if let Some(dir) = &opts.external_table_dir {
            sql.push_str(" LOCATION ");
            sql.push_str(&quote_literal(dir));
        }

        debug!("Create table statement: {}", sql);
        Ok(sql)
    }
}
