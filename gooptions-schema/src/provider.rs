//! Descriptor providers.
//!
//! A provider stands in for the introspection step: it knows which package
//! the records live in and hands out one [`RecordDescriptor`] per request.

use crate::descriptor::{PackageDocument, RecordDescriptor};
use crate::error::{ParseError, SchemaError};
use crate::parser::parse_document;
use crate::types::PackageRef;
use std::path::Path;

/// Source of record descriptors.
pub trait DescriptorProvider {
    /// Returns the package the records are declared in.
    fn package(&self) -> PackageRef;

    /// Loads the descriptor of the named record type.
    ///
    /// # Errors
    /// Returns `SchemaError::RecordNotFound` if the type is unknown, or an
    /// extraction error if the underlying source cannot be read.
    fn load(&self, type_name: &str) -> Result<RecordDescriptor, SchemaError>;
}

/// Provider backed by an already decoded [`PackageDocument`].
#[derive(Debug, Clone)]
pub struct StaticProvider {
    document: PackageDocument,
}

impl StaticProvider {
    /// Creates a provider serving the records of `document`.
    #[must_use]
    pub fn new(document: PackageDocument) -> Self {
        Self { document }
    }

    /// Returns the underlying document.
    #[must_use]
    pub fn document(&self) -> &PackageDocument {
        &self.document
    }
}

impl DescriptorProvider for StaticProvider {
    fn package(&self) -> PackageRef {
        self.document.package.to_package_ref()
    }

    fn load(&self, type_name: &str) -> Result<RecordDescriptor, SchemaError> {
        self.document
            .get_record(type_name)
            .cloned()
            .ok_or_else(|| SchemaError::RecordNotFound {
                name: type_name.to_string(),
            })
    }
}

/// Provider reading the XML descriptor format.
#[derive(Debug, Clone)]
pub struct XmlDescriptorProvider {
    inner: StaticProvider,
}

impl XmlDescriptorProvider {
    /// Parses an XML descriptor document.
    ///
    /// # Errors
    /// Returns `ParseError` if the document is malformed.
    pub fn from_xml(xml: &str) -> Result<Self, ParseError> {
        Ok(Self {
            inner: StaticProvider::new(parse_document(xml)?),
        })
    }

    /// Reads and parses an XML descriptor file.
    ///
    /// # Errors
    /// Returns `ParseError` if reading or parsing fails.
    pub fn from_file(path: &Path) -> Result<Self, ParseError> {
        let xml = std::fs::read_to_string(path)?;
        Self::from_xml(&xml)
    }
}

impl DescriptorProvider for XmlDescriptorProvider {
    fn package(&self) -> PackageRef {
        self.inner.package()
    }

    fn load(&self, type_name: &str) -> Result<RecordDescriptor, SchemaError> {
        self.inner.load(type_name)
    }
}

/// Provider reading the JSON descriptor format.
///
/// This is the serialized form an out-of-process extractor emits: an
/// internally tagged union keyed by `"kind"`.
#[derive(Debug, Clone)]
pub struct JsonDescriptorProvider {
    inner: StaticProvider,
}

impl JsonDescriptorProvider {
    /// Decodes a JSON descriptor document.
    ///
    /// # Errors
    /// Returns `ParseError` if the document is malformed.
    pub fn from_json(json: &str) -> Result<Self, ParseError> {
        let document: PackageDocument = serde_json::from_str(json)?;
        Ok(Self {
            inner: StaticProvider::new(document),
        })
    }

    /// Reads and decodes a JSON descriptor file.
    ///
    /// # Errors
    /// Returns `ParseError` if reading or decoding fails.
    pub fn from_file(path: &Path) -> Result<Self, ParseError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

impl DescriptorProvider for JsonDescriptorProvider {
    fn package(&self) -> PackageRef {
        self.inner.package()
    }

    fn load(&self, type_name: &str) -> Result<RecordDescriptor, SchemaError> {
        self.inner.load(type_name)
    }
}

/// Opens a descriptor file, choosing the format by extension: `.xml` is
/// read as XML, anything else as JSON.
///
/// # Errors
/// Returns `ParseError` if reading or decoding fails.
pub fn open_descriptor_file(path: &Path) -> Result<Box<dyn DescriptorProvider>, ParseError> {
    let is_xml = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("xml"));

    if is_xml {
        Ok(Box::new(XmlDescriptorProvider::from_file(path)?))
    } else {
        Ok(Box::new(JsonDescriptorProvider::from_file(path)?))
    }
}
