//! Schema metadata types: SQL type codes, column descriptors, and the
//! case-insensitive column map used during DDL generation.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{DdlError, Result};

macro_rules! sql_types {
    ($($variant:ident = $code:literal => $name:literal,)+) => {
        /// A JDBC SQL type code (`java.sql.Types`).
        ///
        /// Codes without a named variant are carried as [`SqlType::Unknown`] so
        /// that a driver reporting a vendor-specific code still produces a
        /// descriptor; the type mapper then reports it as unsupported.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "SqlTypeRepr", into = "i32")]
        pub enum SqlType {
            $($variant,)+
            /// Vendor-specific or otherwise unlisted code.
            Unknown(i32),
        }

        impl SqlType {
            /// Look up the type for a JDBC code.
            pub fn from_code(code: i32) -> Self {
                match code {
                    $($code => SqlType::$variant,)+
                    other => SqlType::Unknown(other),
                }
            }

            /// The JDBC code for this type.
            pub fn code(self) -> i32 {
                match self {
                    $(SqlType::$variant => $code,)+
                    SqlType::Unknown(code) => code,
                }
            }

            /// Upper-case JDBC name, or `None` for unlisted codes.
            pub fn name(self) -> Option<&'static str> {
                match self {
                    $(SqlType::$variant => Some($name),)+
                    SqlType::Unknown(_) => None,
                }
            }

            fn from_name(name: &str) -> Option<Self> {
                $(if name.eq_ignore_ascii_case($name) {
                    return Some(SqlType::$variant);
                })+
                None
            }
        }
    };
}

sql_types! {
    Bit = -7 => "BIT",
    TinyInt = -6 => "TINYINT",
    SmallInt = 5 => "SMALLINT",
    Integer = 4 => "INTEGER",
    BigInt = -5 => "BIGINT",
    Float = 6 => "FLOAT",
    Real = 7 => "REAL",
    Double = 8 => "DOUBLE",
    Numeric = 2 => "NUMERIC",
    Decimal = 3 => "DECIMAL",
    Char = 1 => "CHAR",
    Varchar = 12 => "VARCHAR",
    LongVarchar = -1 => "LONGVARCHAR",
    NChar = -15 => "NCHAR",
    NVarchar = -9 => "NVARCHAR",
    LongNVarchar = -16 => "LONGNVARCHAR",
    Date = 91 => "DATE",
    Time = 92 => "TIME",
    Timestamp = 93 => "TIMESTAMP",
    Binary = -2 => "BINARY",
    VarBinary = -3 => "VARBINARY",
    LongVarBinary = -4 => "LONGVARBINARY",
    Boolean = 16 => "BOOLEAN",
    Clob = 2005 => "CLOB",
    Blob = 2004 => "BLOB",
    NClob = 2011 => "NCLOB",
    Array = 2003 => "ARRAY",
    Struct = 2002 => "STRUCT",
    Ref = 2006 => "REF",
    Distinct = 2001 => "DISTINCT",
    JavaObject = 2000 => "JAVA_OBJECT",
    Other = 1111 => "OTHER",
    Null = 0 => "NULL",
    RowId = -8 => "ROWID",
    SqlXml = 2009 => "SQLXML",
    DataLink = 70 => "DATALINK",
}

impl fmt::Display for SqlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "type code {}", self.code()),
        }
    }
}

/// Parses either a JDBC name (`VARCHAR`, case-insensitive) or a numeric code (`12`).
impl FromStr for SqlType {
    type Err = DdlError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Ok(code) = s.parse::<i32>() {
            return Ok(SqlType::from_code(code));
        }
        SqlType::from_name(s)
            .ok_or_else(|| DdlError::Schema(format!("Unknown SQL type name '{}'", s)))
    }
}

impl From<SqlType> for i32 {
    fn from(t: SqlType) -> Self {
        t.code()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SqlTypeRepr {
    Code(i32),
    Name(String),
}

impl TryFrom<SqlTypeRepr> for SqlType {
    type Error = DdlError;

    fn try_from(repr: SqlTypeRepr) -> Result<Self> {
        match repr {
            SqlTypeRepr::Code(code) => Ok(SqlType::from_code(code)),
            SqlTypeRepr::Name(name) => name.parse(),
        }
    }
}

/// One source column as reported by schema introspection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    /// Column name, original spelling.
    pub name: String,

    /// JDBC type code.
    #[serde(rename = "type")]
    pub sql_type: SqlType,

    /// Numeric precision, when the source reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precision: Option<u32>,

    /// Numeric scale, when the source reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<u32>,
}

impl ColumnDescriptor {
    pub fn new(name: impl Into<String>, sql_type: SqlType) -> Self {
        Self {
            name: name.into(),
            sql_type,
            precision: None,
            scale: None,
        }
    }

    pub fn with_precision_scale(mut self, precision: u32, scale: u32) -> Self {
        self.precision = Some(precision);
        self.scale = Some(scale);
        self
    }
}

/// Case-normalized column name used for every case-insensitive lookup.
///
/// Hive resolves column names case-insensitively, so `ID`, `id` and `Id`
/// collapse to the same key. The original spelling lives in the value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColumnKey(String);

impl ColumnKey {
    pub fn new(name: &str) -> Self {
        Self(name.to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ColumnKey {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl fmt::Display for ColumnKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Insertion-ordered, case-insensitive map of column name to descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnTypeMap {
    columns: IndexMap<ColumnKey, ColumnDescriptor>,
}

impl ColumnTypeMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a column, replacing (and returning) any column whose name
    /// differs only by case.
    pub fn insert(&mut self, column: ColumnDescriptor) -> Option<ColumnDescriptor> {
        self.columns.insert(ColumnKey::new(&column.name), column)
    }

    pub fn get(&self, name: &str) -> Option<&ColumnDescriptor> {
        self.columns.get(&ColumnKey::new(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.columns.contains_key(&ColumnKey::new(name))
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Descriptors in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &ColumnDescriptor> {
        self.columns.values()
    }

    /// Original column names in insertion order.
    pub fn names(&self) -> Vec<String> {
        self.columns.values().map(|c| c.name.clone()).collect()
    }
}

impl FromIterator<ColumnDescriptor> for ColumnTypeMap {
    fn from_iter<I: IntoIterator<Item = ColumnDescriptor>>(iter: I) -> Self {
        let mut map = Self::new();
        for column in iter {
            map.insert(column);
        }
        map
    }
}
