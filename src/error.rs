//! All error types for the xliffcodec crate.
//!
//! These are returned from all fallible operations (parsing, serialization, etc.).
//! No error is recoverable: a read either appends every unit of a document or
//! appends nothing new, and a serialize either returns the complete document or
//! fails before producing output.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("unknown format `{0}`")]
    UnknownFormat(String),

    #[error("XML parse error: {0}")]
    XmlParse(#[from] quick_xml::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid document: {0}")]
    InvalidDocument(String),

    #[error("trans-unit is missing its mandatory source element")]
    MissingSource,

    #[error("element language ({element}) must be the same defined at file element ({file})")]
    LanguageMismatch { element: String, file: String },

    #[error("at least one unit is required to serialize an XLIFF document")]
    EmptyStore,
}

impl Error {
    /// Creates a new invalid-document error
    pub fn invalid_document(message: impl Into<String>) -> Self {
        Error::InvalidDocument(message.into())
    }
}
