//! # gooptions Codegen
//!
//! Functional-options code generation for Go record types.
//!
//! This crate provides:
//! - Package-qualified rendering of record field types
//! - Option function generation, one per record field
//! - Composition of the complete generated source file
//! - Destination resolution and atomic file output

pub mod error;
pub mod generator;
pub mod go;
pub mod model;
pub mod options;
pub mod output;

pub use error::{CodegenError, RenderError};
pub use generator::Generator;
pub use model::Model;
pub use options::{FieldVisibility, GeneratorOptions};
pub use output::{default_file_name, resolve_destination, write_output};

use gooptions_schema::{DescriptorProvider, JsonDescriptorProvider, XmlDescriptorProvider};
use std::path::{Path, PathBuf};

/// Generates the options file for a record type.
///
/// # Arguments
/// * `provider` - Descriptor source
/// * `type_name` - Name of the record type
/// * `options` - Generator options
///
/// # Returns
/// Generated Go source as a string.
///
/// # Errors
/// Returns `CodegenError` if loading, validation, or generation fails.
pub fn generate(
    provider: &dyn DescriptorProvider,
    type_name: &str,
    options: GeneratorOptions,
) -> Result<String, CodegenError> {
    let (package, record) = gooptions_schema::load_record(provider, type_name)?;
    tracing::debug!(
        "loaded record {} with {} fields from {}",
        record.name,
        record.fields.len(),
        package
    );
    let model = Model::new(options, package, record);
    Generator::new(&model).generate()
}

/// Generates the options file for a record type from an XML descriptor.
///
/// # Errors
/// Returns `CodegenError` if parsing or generation fails.
pub fn generate_from_xml(
    xml: &str,
    type_name: &str,
    options: GeneratorOptions,
) -> Result<String, CodegenError> {
    let provider = XmlDescriptorProvider::from_xml(xml)?;
    generate(&provider, type_name, options)
}

/// Generates the options file for a record type from a JSON descriptor.
///
/// # Errors
/// Returns `CodegenError` if parsing or generation fails.
pub fn generate_from_json(
    json: &str,
    type_name: &str,
    options: GeneratorOptions,
) -> Result<String, CodegenError> {
    let provider = JsonDescriptorProvider::from_json(json)?;
    generate(&provider, type_name, options)
}

/// Generates the options file and writes it next to the record's source.
///
/// # Arguments
/// * `provider` - Descriptor source
/// * `type_name` - Name of the record type
/// * `source_dir` - Directory of the package being generated into
/// * `destination` - Optional output path; relative paths join `source_dir`
/// * `options` - Generator options
///
/// # Returns
/// The path that was written.
///
/// # Errors
/// Returns `CodegenError` if generation or writing fails. Nothing is
/// written when generation fails.
pub fn generate_to_file(
    provider: &dyn DescriptorProvider,
    type_name: &str,
    source_dir: &Path,
    destination: Option<&Path>,
    options: GeneratorOptions,
) -> Result<PathBuf, CodegenError> {
    let source = generate(provider, type_name, options)?;
    let path = resolve_destination(type_name, source_dir, destination);
    write_output(&path, &source)?;
    Ok(path)
}
