//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and traits.
//!
//! ```ignore
//! use gooptions::prelude::*;
//! ```

// Type model
pub use gooptions_schema::{
    ArrayLen, ChanDir, FuncType, PackageRef, Parameter, RecordField, RecordType, TypeNode,
};

// Descriptors and providers
pub use gooptions_schema::{
    DescriptorProvider, JsonDescriptorProvider, PackageDocument, RecordDescriptor,
    StaticProvider, TypeDescriptor, XmlDescriptorProvider, open_descriptor_file,
};

// Import resolution
pub use gooptions_schema::{AliasTable, ImportSpec};

// Generation
pub use gooptions_codegen::go::{TypeRenderer, render};
pub use gooptions_codegen::{
    CodegenError, FieldVisibility, Generator, GeneratorOptions, Model, generate,
    generate_to_file,
};

// Errors
pub use gooptions_schema::{ParseError, SchemaError};
