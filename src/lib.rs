#![forbid(unsafe_code)]
//! XLIFF 1.2 translation-memory toolkit for Rust.
//!
//! Parses XLIFF 1.2 documents into an ordered collection of [`Unit`] records and
//! serializes such a collection back into a pretty-printed XLIFF document.
//! Language tags declared on `source`/`target` elements are validated against the
//! `file`-level `source-language`/`target-language` attributes during parsing.
//!
//! # Quick Start
//!
//! ```rust
//! use xliffcodec::XliffStore;
//!
//! let xml = r#"<xliff version="1.2">
//!   <file source-language="en" target-language="pt-BR">
//!     <body>
//!       <trans-unit id="0">
//!         <source>London</source>
//!         <target>Londres</target>
//!       </trans-unit>
//!     </body>
//!   </file>
//! </xliff>"#;
//!
//! let mut store = XliffStore::new();
//! store.read_str(xml, "pt-BR", "en")?;
//! assert_eq!(store.units.len(), 2);
//!
//! let document = store.serialize()?;
//! assert!(document.contains("<source>London</source>"));
//! # Ok::<(), xliffcodec::Error>(())
//! ```
//!
//! # Scope
//!
//! - XLIFF version 1.2 only
//! - One `file` element per serialized document
//! - No schema validation beyond what unit extraction needs

pub mod error;
pub mod formats;
pub mod types;
pub mod xml;

// Re-export most used types for easy consumption
pub use crate::{
    error::Error,
    formats::{FormatType, XliffStore},
    types::Unit,
    xml::Element,
};
