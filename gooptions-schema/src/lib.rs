//! # gooptions Schema
//!
//! Go type model and record descriptors.
//!
//! This crate provides:
//! - The closed type-shape model for record field types
//! - Serializable record descriptors and their conversion into the model
//! - Descriptor providers (XML, JSON, in-memory)
//! - Struct tag parsing and record validation
//! - Import resolution for rendering package-qualified names

pub mod descriptor;
pub mod error;
pub mod imports;
pub mod parser;
pub mod provider;
pub mod tags;
pub mod types;
pub mod validation;

pub use descriptor::{
    FieldDescriptor, PackageDescriptor, PackageDocument, ParamDescriptor, RecordDescriptor,
    TypeDescriptor,
};
pub use error::{ParseError, SchemaError};
pub use imports::{AliasTable, ImportSpec, field_packages};
pub use parser::parse_document;
pub use provider::{
    DescriptorProvider, JsonDescriptorProvider, StaticProvider, XmlDescriptorProvider,
    open_descriptor_file,
};
pub use types::{
    ArrayLen, ChanDir, FuncType, PackageRef, Parameter, RecordField, RecordType, TagOptions,
    TypeNode,
};
pub use validation::{validate_package, validate_record};

/// Loads, converts and validates a record type from a provider.
///
/// # Arguments
/// * `provider` - Descriptor source
/// * `type_name` - Name of the record type
///
/// # Returns
/// The record's package and its validated record type.
///
/// # Errors
/// Returns `SchemaError` if the record cannot be extracted, contains an
/// unsupported type shape, or fails validation.
pub fn load_record(
    provider: &dyn DescriptorProvider,
    type_name: &str,
) -> Result<(PackageRef, RecordType), SchemaError> {
    let package = provider.package();
    validate_package(&package)?;
    let descriptor = provider.load(type_name)?;
    let record = descriptor.to_record_type()?;
    validate_record(&record)?;
    Ok((package, record))
}
