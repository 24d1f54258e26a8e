//! Support for the XLIFF 1.2 localization interchange format.
//!
//! A document is a `xliff` root holding `file` elements; each `file` carries
//! `source-language`/`target-language` attributes and a `body` of `trans-unit`
//! elements, each with a mandatory `source` and an optional `target`. Reading
//! extracts every `file` element; writing always produces a single `file`
//! element, per the OASIS XLIFF 1.2 specification at
//! <http://docs.oasis-open.org/xliff/v1.2/os/xliff-core.html>.

use std::{
    fs::File,
    io::{BufRead, BufWriter, Cursor, Read, Write},
    path::Path,
};

use crate::{error::Error, types::Unit, xml::Element};

/// Element names recognized in XLIFF 1.2 documents.
mod tag {
    pub const XLIFF: &str = "xliff";
    pub const FILE: &str = "file";
    pub const BODY: &str = "body";
    pub const TRANS_UNIT: &str = "trans-unit";
    pub const SOURCE: &str = "source";
    pub const TARGET: &str = "target";
}

/// Attribute names recognized in XLIFF 1.2 documents.
mod attr {
    pub const VERSION: &str = "version";
    pub const ID: &str = "id";
    pub const SOURCE_LANGUAGE: &str = "source-language";
    pub const TARGET_LANGUAGE: &str = "target-language";
    /// `lang` in the standard XML namespace
    /// (`http://www.w3.org/XML/1998/namespace`). The `xml` prefix is
    /// predefined and cannot be rebound, so the qualified name is matched
    /// directly.
    pub const XML_LANG: &str = "xml:lang";
}

/// An ordered collection of translation units backed by XLIFF 1.2.
///
/// Reading appends to [`units`](Self::units) without ever replacing prior
/// contents, so several documents can accumulate into one store. Serializing
/// never modifies the store.
#[derive(Debug, Default, Clone)]
pub struct XliffStore {
    /// All units read so far, in extraction order: per `file` element, all
    /// source-side units first, then all target-side units.
    pub units: Vec<Unit>,
}

impl XliffStore {
    /// File-extension globs handled by this store.
    pub const GLOB: &'static [&'static str] = &[".xlf"];
    /// The only XLIFF version this store reads and writes.
    pub const VERSION: &'static str = "1.2";

    /// Creates a new, empty store.
    pub fn new() -> Self {
        XliffStore { units: Vec::new() }
    }

    /// Parses an XLIFF document and appends its units to the store.
    ///
    /// `lang` is the fallback language tag for target units when neither the
    /// `file` element nor any `target` element declares one. `srclang` plays
    /// the same role for source units and additionally gates their
    /// extraction: when blank after trimming, source-side units are skipped
    /// entirely and only translations are collected.
    ///
    /// Per `file` element, all source units are appended before all target
    /// units. A `trans-unit` without a `source` child fails with
    /// [`Error::MissingSource`]; an element whose `xml:lang` conflicts with
    /// the established file-level language fails with
    /// [`Error::LanguageMismatch`].
    pub fn read<R: BufRead>(&mut self, reader: R, lang: &str, srclang: &str) -> Result<(), Error> {
        let root = Element::from_reader(reader)?;
        for file in root.children_named(tag::FILE) {
            self.read_file_element(file, lang, srclang)?;
        }
        Ok(())
    }

    /// Parses an XLIFF document from a string.
    pub fn read_str(&mut self, s: &str, lang: &str, srclang: &str) -> Result<(), Error> {
        self.read(Cursor::new(s), lang, srclang)
    }

    /// Parses an XLIFF file from disk, with BOM-aware decoding
    /// (e.g. UTF-16 documents decode transparently).
    pub fn read_file<P: AsRef<Path>>(
        &mut self,
        path: P,
        lang: &str,
        srclang: &str,
    ) -> Result<(), Error> {
        let file = File::open(path).map_err(Error::Io)?;
        // Auto-detect BOM, decode to UTF-8; passthrough UTF-8
        let mut decoder = encoding_rs_io::DecodeReaderBytesBuilder::new()
            .bom_override(true)
            .build(file);

        let mut decoded = String::new();
        decoder.read_to_string(&mut decoded).map_err(Error::Io)?;

        self.read_str(&decoded, lang, srclang)
    }

    fn read_file_element(&mut self, file: &Element, lang: &str, srclang: &str) -> Result<(), Error> {
        let mut source_language = file.attr(attr::SOURCE_LANGUAGE).map(str::to_string);
        let mut target_language = file.attr(attr::TARGET_LANGUAGE).map(str::to_string);

        let Some(body) = file.child(tag::BODY) else {
            return Ok(());
        };

        // Source units may be skipped entirely when given a blank `srclang`.
        let extract_sources = !srclang.trim().is_empty();

        let mut source_units = Vec::new();
        let mut target_units = Vec::new();
        for trans_unit in body.children_named(tag::TRANS_UNIT) {
            let source = trans_unit.child(tag::SOURCE).ok_or(Error::MissingSource)?;
            let source_text = source.text().unwrap_or_default().to_string();

            if extract_sources {
                source_language = validate_language(source, source_language)?;
                source_units.push(Unit::new(source_text.clone(), Some(source_text.clone())));
            }

            // Target is optional.
            let Some(target) = trans_unit.child(tag::TARGET) else {
                continue;
            };
            target_language = validate_language(target, target_language)?;
            target_units.push(Unit::new(source_text, target.text().map(str::to_string)));
        }

        // The file-level language may only become known partway through the
        // loop (the first element with an explicit xml:lang establishes it),
        // so units buffer first and receive their language once it is final.
        let source_language = source_language.or_else(|| fallback(srclang));
        let target_language = target_language.or_else(|| fallback(lang));
        for unit in &mut source_units {
            unit.lang = source_language.clone();
        }
        for unit in &mut target_units {
            unit.lang = target_language.clone();
        }

        self.units.extend(source_units);
        self.units.extend(target_units);
        Ok(())
    }

    /// Serializes the store into a complete, pretty-printed XLIFF 1.2
    /// document.
    ///
    /// Fails with [`Error::EmptyStore`] when the store holds no units: a
    /// document without trans-units has no meaning under the single-file
    /// model. Every unit emits a `source` element carrying its key; a
    /// `target` element is emitted only for units with a non-blank value.
    /// `trans-unit` ids are dense, zero-based, and follow insertion order.
    pub fn serialize(&self) -> Result<String, Error> {
        if self.units.is_empty() {
            return Err(Error::EmptyStore);
        }

        let mut root = Element::new(tag::XLIFF);
        root.set_attr(attr::VERSION, Self::VERSION);

        // The XLIFF 1.2 schema requires both languages on the file element.
        // Units carry their own `lang`, but one file element can only name a
        // single language pair, so fixed placeholders go out instead of
        // values derived from the collection.
        let file = root.push_child(Element::new(tag::FILE));
        file.set_attr(attr::SOURCE_LANGUAGE, "en");
        file.set_attr(attr::TARGET_LANGUAGE, "todo");

        let body = file.push_child(Element::new(tag::BODY));
        for (index, unit) in self.units.iter().enumerate() {
            let trans_unit = body.push_child(Element::new(tag::TRANS_UNIT));
            trans_unit.set_attr(attr::ID, index.to_string());
            trans_unit.push_child(Element::with_text(tag::SOURCE, unit.key.as_str()));

            // Target is optional: a missing or blank translation emits no
            // element at all, not an empty one.
            if unit.has_translation() {
                let value = unit.value.as_deref().unwrap_or_default();
                trans_unit.push_child(Element::with_text(tag::TARGET, value));
            }
        }

        root.to_pretty_string()
    }

    /// Serializes the store and writes the document to disk.
    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let document = self.serialize()?;
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(document.as_bytes()).map_err(Error::Io)
    }
}

/// Resolves an element's `xml:lang` against the file-level language.
///
/// A missing file-level language is established by the first element that
/// declares one; once established, any differing element-level language is a
/// hard error naming both values.
fn validate_language(element: &Element, base_language: Option<String>) -> Result<Option<String>, Error> {
    let element_language = element.attr(attr::XML_LANG);

    match base_language {
        None => Ok(element_language.map(str::to_string)),
        Some(base) => {
            if let Some(element_language) = element_language {
                if element_language != base {
                    return Err(Error::LanguageMismatch {
                        element: element_language.to_string(),
                        file: base,
                    });
                }
            }
            Ok(Some(base))
        }
    }
}

/// A fallback language tag is only usable when non-empty.
fn fallback(tag: &str) -> Option<String> {
    if tag.is_empty() {
        None
    } else {
        Some(tag.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element(xml: &str) -> Element {
        Element::from_str(xml).unwrap()
    }

    #[test]
    fn test_validate_language_establishes_missing_base() {
        let source = element(r#"<source xml:lang="en-GB">London</source>"#);
        let resolved = validate_language(&source, None).unwrap();
        assert_eq!(resolved.as_deref(), Some("en-GB"));
    }

    #[test]
    fn test_validate_language_without_base_or_element_language() {
        let source = element("<source>London</source>");
        assert_eq!(validate_language(&source, None).unwrap(), None);
    }

    #[test]
    fn test_validate_language_keeps_matching_base() {
        let source = element(r#"<source xml:lang="en-US">London</source>"#);
        let resolved = validate_language(&source, Some("en-US".to_string())).unwrap();
        assert_eq!(resolved.as_deref(), Some("en-US"));
    }

    #[test]
    fn test_validate_language_base_wins_when_element_silent() {
        let source = element("<source>London</source>");
        let resolved = validate_language(&source, Some("en-US".to_string())).unwrap();
        assert_eq!(resolved.as_deref(), Some("en-US"));
    }

    #[test]
    fn test_validate_language_mismatch() {
        let source = element(r#"<source xml:lang="fr">Londres</source>"#);
        let result = validate_language(&source, Some("en-US".to_string()));
        match result {
            Err(Error::LanguageMismatch { element, file }) => {
                assert_eq!(element, "fr");
                assert_eq!(file, "en-US");
            }
            other => panic!("expected LanguageMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_fallback_rejects_empty() {
        assert_eq!(fallback(""), None);
        assert_eq!(fallback("pt-BR").as_deref(), Some("pt-BR"));
    }

    #[test]
    fn test_read_missing_source_fails() {
        let xml = r#"
        <xliff version="1.2">
            <file>
                <body>
                    <trans-unit id="0">
                        <target>Londres</target>
                    </trans-unit>
                </body>
            </file>
        </xliff>
        "#;
        let mut store = XliffStore::new();
        let result = store.read_str(xml, "pt-BR", "en");
        assert!(matches!(result, Err(Error::MissingSource)));
    }

    #[test]
    fn test_read_skips_file_without_body() {
        let xml = r#"
        <xliff version="1.2">
            <file source-language="en" target-language="pt-BR"/>
        </xliff>
        "#;
        let mut store = XliffStore::new();
        store.read_str(xml, "pt-BR", "en").unwrap();
        assert!(store.units.is_empty());
    }

    #[test]
    fn test_read_empty_target_element_has_no_value() {
        let xml = r#"
        <xliff version="1.2">
            <file source-language="en" target-language="pt-BR">
                <body>
                    <trans-unit id="0">
                        <source>London</source>
                        <target/>
                    </trans-unit>
                </body>
            </file>
        </xliff>
        "#;
        let mut store = XliffStore::new();
        store.read_str(xml, "foo", "bar").unwrap();
        assert_eq!(store.units.len(), 2);
        assert_eq!(store.units[1].key, "London");
        assert_eq!(store.units[1].value, None);
        assert_eq!(store.units[1].lang.as_deref(), Some("pt-BR"));
    }

    #[test]
    fn test_read_element_language_establishes_file_language() {
        // No file-level attributes at all; the first xml:lang wins for the
        // whole file, including units buffered before it appeared.
        let xml = r#"
        <xliff version="1.2">
            <file>
                <body>
                    <trans-unit id="0">
                        <source>London</source>
                        <target>Londres</target>
                    </trans-unit>
                    <trans-unit id="1">
                        <source xml:lang="en-GB">Moscow</source>
                        <target xml:lang="pt-BR">Moscou</target>
                    </trans-unit>
                </body>
            </file>
        </xliff>
        "#;
        let mut store = XliffStore::new();
        store.read_str(xml, "foo", "bar").unwrap();
        assert_eq!(store.units.len(), 4);
        assert_eq!(store.units[0].lang.as_deref(), Some("en-GB"));
        assert_eq!(store.units[1].lang.as_deref(), Some("en-GB"));
        assert_eq!(store.units[2].lang.as_deref(), Some("pt-BR"));
        assert_eq!(store.units[3].lang.as_deref(), Some("pt-BR"));
    }

    #[test]
    fn test_read_established_language_rejects_conflict() {
        let xml = r#"
        <xliff version="1.2">
            <file>
                <body>
                    <trans-unit id="0">
                        <source xml:lang="en-GB">London</source>
                    </trans-unit>
                    <trans-unit id="1">
                        <source xml:lang="en-US">Moscow</source>
                    </trans-unit>
                </body>
            </file>
        </xliff>
        "#;
        let mut store = XliffStore::new();
        let result = store.read_str(xml, "foo", "bar");
        assert!(matches!(result, Err(Error::LanguageMismatch { .. })));
    }

    #[test]
    fn test_serialize_empty_store_fails() {
        let store = XliffStore::new();
        assert!(matches!(store.serialize(), Err(Error::EmptyStore)));
    }

    #[test]
    fn test_serialize_does_not_modify_store() {
        let mut store = XliffStore::new();
        store.units.push(Unit::new("A", Some("Alpha".to_string())));
        let before = store.units.clone();
        store.serialize().unwrap();
        assert_eq!(store.units, before);
    }

    #[test]
    fn test_glob_and_version() {
        assert_eq!(XliffStore::GLOB, &[".xlf"]);
        assert_eq!(XliffStore::VERSION, "1.2");
    }
}
