//! Type mapping between JDBC SQL types and Hive.

use crate::core::{SqlType, TypeMapper};

pub const INT: &str = "INT";
pub const STRING: &str = "STRING";
pub const DOUBLE: &str = "DOUBLE";
pub const BOOLEAN: &str = "BOOLEAN";
pub const TINYINT: &str = "TINYINT";
pub const BIGINT: &str = "BIGINT";
pub const DECIMAL: &str = "DECIMAL";

/// Largest precision Hive accepts for `DECIMAL(p, s)`.
pub const DECIMAL_MAX_PRECISION: u32 = 38;
/// Largest scale Hive accepts for `DECIMAL(p, s)`.
pub const DECIMAL_MAX_SCALE: u32 = 38;

/// Map a JDBC SQL type to the closest Hive type.
///
/// `DECIMAL` is returned bare; precision and scale are appended by the caller.
pub fn to_hive_type(sql_type: SqlType) -> Option<&'static str> {
    match sql_type {
        SqlType::Integer | SqlType::SmallInt => Some(INT),

        SqlType::Varchar
        | SqlType::Char
        | SqlType::LongVarchar
        | SqlType::NVarchar
        | SqlType::NChar
        | SqlType::LongNVarchar
        | SqlType::Date
        | SqlType::Time
        | SqlType::Timestamp
        | SqlType::Clob => Some(STRING),

        SqlType::Numeric | SqlType::Float | SqlType::Double | SqlType::Real => Some(DOUBLE),

        SqlType::Bit | SqlType::Boolean => Some(BOOLEAN),

        SqlType::TinyInt => Some(TINYINT),
        SqlType::BigInt => Some(BIGINT),

        SqlType::Decimal => Some(DECIMAL),

        // TODO: BINARY/VARBINARY/LONGVARBINARY could map to Hive BINARY once
        // the text import path can encode raw bytes.
        _ => None,
    }
}

/// True when the Hive type cannot represent the SQL type exactly and the
/// value is cast to something more generic.
pub fn is_approximate_mapping(sql_type: SqlType) -> bool {
    matches!(
        sql_type,
        SqlType::Date | SqlType::Time | SqlType::Timestamp | SqlType::Numeric
    )
}

/// Render `DECIMAL(p, s)`, clamping both to `(38, 38)` when either is out of range.
pub fn decimal_type(precision: u32, scale: u32) -> String {
    if precision > DECIMAL_MAX_PRECISION || scale > DECIMAL_MAX_SCALE {
        format!("{}({}, {})", DECIMAL, DECIMAL_MAX_PRECISION, DECIMAL_MAX_SCALE)
    } else {
        format!("{}({}, {})", DECIMAL, precision, scale)
    }
}

/// The standard JDBC → Hive mapper.
#[derive(Debug, Clone, Copy, Default)]
pub struct HiveTypeMapper;

impl HiveTypeMapper {
    pub fn new() -> Self {
        Self
    }
}

impl TypeMapper for HiveTypeMapper {
    fn to_hive_type(&self, sql_type: SqlType) -> Option<&'static str> {
        to_hive_type(sql_type)
    }

    fn is_approximate(&self, sql_type: SqlType) -> bool {
        is_approximate_mapping(sql_type)
    }
}
