//! Format registry for xliffcodec.
//!
//! This module re-exports the store type and provides the [`FormatType`] enum
//! so an external format registry can discover the formats this crate handles
//! by extension and version.

pub mod xliff;

use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

pub use xliff::XliffStore;

use crate::Error;

/// Represents all file formats this crate can read and write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatType {
    /// XLIFF 1.2 (`.xlf`).
    Xliff,
}

impl Display for FormatType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FormatType::Xliff => write!(f, "xliff"),
        }
    }
}

/// Accepts `"xliff"` or `"xlf"`, case-insensitive.
///
/// Returns [`crate::error::Error::UnknownFormat`] for anything else.
impl FromStr for FormatType {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        match s.as_str() {
            "xliff" | "xlf" => Ok(FormatType::Xliff),
            other => Err(Error::UnknownFormat(other.to_string())),
        }
    }
}

impl FormatType {
    /// Returns the typical file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            FormatType::Xliff => "xlf",
        }
    }

    /// Returns the format version this crate emits.
    pub fn version(&self) -> &'static str {
        match self {
            FormatType::Xliff => XliffStore::VERSION,
        }
    }
}
