//! # gooptions
//!
//! Generates the functional-options boilerplate for a Go struct type.
//!
//! For every field of the struct the generator emits a `With<Field>`
//! function returning an `Option` closure that sets the field, plus the
//! `Option` type and a method applying a list of options to a value. Types
//! from other packages are rendered with their import alias, and the
//! import block lists exactly the packages the fields reference.
//!
//! ## Quick Start
//!
//! ```ignore
//! use gooptions::prelude::*;
//!
//! let provider = JsonDescriptorProvider::from_file("users.json".as_ref())?;
//! let source = generate(&provider, "User", GeneratorOptions::default())?;
//! println!("{source}");
//! ```
//!
//! ## Crate Organization
//!
//! - [`schema`] - Type model, record descriptors and import resolution
//! - [`codegen`] - Type rendering, option generation and file output

pub mod prelude;

/// Type model, record descriptors and import resolution.
pub mod schema {
    pub use gooptions_schema::*;
}

/// Type rendering, option generation and file output.
pub mod codegen {
    pub use gooptions_codegen::*;
}

pub use gooptions_codegen::{GeneratorOptions, generate, generate_to_file};
pub use gooptions_schema::{DescriptorProvider, load_record};
