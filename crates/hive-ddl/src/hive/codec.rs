//! Compression codecs recognized for Hive imports.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{DdlError, Result};

/// Input format able to split indexed `.lzo` files.
pub const LZO_INPUT_FORMAT: &str = "com.hadoop.mapred.DeprecatedLzoTextInputFormat";
/// Text output format that ignores the key, paired with [`LZO_INPUT_FORMAT`].
pub const IGNORE_KEY_TEXT_OUTPUT_FORMAT: &str =
    "org.apache.hadoop.hive.ql.io.HiveIgnoreKeyTextOutputFormat";

/// A compression codec, by short name or Hadoop codec class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CompressionCodec {
    Deflate,
    Gzip,
    Bzip2,
    Lzo,
    Lzop,
    Lz4,
    Snappy,
}

impl CompressionCodec {
    const ALL: [CompressionCodec; 7] = [
        CompressionCodec::Deflate,
        CompressionCodec::Gzip,
        CompressionCodec::Bzip2,
        CompressionCodec::Lzo,
        CompressionCodec::Lzop,
        CompressionCodec::Lz4,
        CompressionCodec::Snappy,
    ];

    pub fn short_name(self) -> &'static str {
        match self {
            CompressionCodec::Deflate => "deflate",
            CompressionCodec::Gzip => "gzip",
            CompressionCodec::Bzip2 => "bzip2",
            CompressionCodec::Lzo => "lzo",
            CompressionCodec::Lzop => "lzop",
            CompressionCodec::Lz4 => "lz4",
            CompressionCodec::Snappy => "snappy",
        }
    }

    pub fn class_name(self) -> &'static str {
        match self {
            CompressionCodec::Deflate => "org.apache.hadoop.io.compress.DefaultCodec",
            CompressionCodec::Gzip => "org.apache.hadoop.io.compress.GzipCodec",
            CompressionCodec::Bzip2 => "org.apache.hadoop.io.compress.BZip2Codec",
            CompressionCodec::Lzo => "com.hadoop.compression.lzo.LzoCodec",
            CompressionCodec::Lzop => "com.hadoop.compression.lzo.LzopCodec",
            CompressionCodec::Lz4 => "org.apache.hadoop.io.compress.Lz4Codec",
            CompressionCodec::Snappy => "org.apache.hadoop.io.compress.SnappyCodec",
        }
    }

    /// Whether files written with this codec need the LZO input format to be
    /// split correctly. Only `lzop` writes indexable `.lzo` files; the raw
    /// `lzo` stream is stored as plain text.
    pub fn needs_lzo_input_format(self) -> bool {
        matches!(self, CompressionCodec::Lzop)
    }
}

impl FromStr for CompressionCodec {
    type Err = DdlError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("default") {
            return Ok(CompressionCodec::Deflate);
        }
        CompressionCodec::ALL
            .into_iter()
            .find(|c| s.eq_ignore_ascii_case(c.short_name()) || s == c.class_name())
            .ok_or_else(|| DdlError::Config(format!("Unknown compression codec '{}'", s)))
    }
}

impl TryFrom<String> for CompressionCodec {
    type Error = DdlError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<CompressionCodec> for String {
    fn from(c: CompressionCodec) -> Self {
        c.short_name().to_string()
    }
}

impl fmt::Display for CompressionCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}
