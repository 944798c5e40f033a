//! Go code generation modules.

pub mod builders;
pub mod naming;
pub mod render;

pub use builders::{BuilderGenerator, OptionFunction};
pub use naming::NameSanitizer;
pub use render::{TypeRenderer, render};
