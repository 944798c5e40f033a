//! Option function generation.
//!
//! Emits one option function per selected record field, in declaration
//! order:
//!
//! ```go
//! func WithEmail(email string) Option {
//!     return func(u *User) {
//!         u.email = email
//!     }
//! }
//! ```

use crate::error::CodegenError;
use crate::go::naming::{NameSanitizer, receiver_name, title};
use crate::go::render::TypeRenderer;
use crate::model::Model;
use crate::options::FieldVisibility;
use gooptions_schema::RecordField;
use std::collections::HashSet;

/// Go's blank identifier; a field with this name cannot be assigned.
const BLANK_IDENTIFIER: &str = "_";

/// One emitted option function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionFunction {
    /// Record field the option sets.
    pub field_name: String,
    /// Function name, e.g. `WithEmail`.
    pub function_name: String,
    /// Parameter name, e.g. `email`.
    pub parameter_name: String,
    /// Rendered parameter type, e.g. `string`.
    pub parameter_type: String,
}

impl OptionFunction {
    /// Renders the function declaration.
    #[must_use]
    pub fn to_source(&self, option_name: &str, receiver: &str, record_name: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "func {}({} {}) {} {{\n",
            self.function_name, self.parameter_name, self.parameter_type, option_name
        ));
        output.push_str(&format!("\treturn func({} *{}) {{\n", receiver, record_name));
        output.push_str(&format!(
            "\t\t{}.{} = {}\n",
            receiver, self.field_name, self.parameter_name
        ));
        output.push_str("\t}\n");
        output.push_str("}\n");

        output
    }
}

/// Generator for option functions.
pub struct BuilderGenerator<'a> {
    model: &'a Model,
}

impl<'a> BuilderGenerator<'a> {
    /// Creates a new builder generator.
    #[must_use]
    pub fn new(model: &'a Model) -> Self {
        Self { model }
    }

    /// Returns the receiver name used inside every option closure.
    #[must_use]
    pub fn receiver(&self) -> String {
        receiver_name(&self.model.record.name)
    }

    /// Generates the option functions.
    ///
    /// # Errors
    /// Returns `CodegenError` if a field type cannot be rendered or two
    /// fields map to the same function name.
    pub fn generate(&self) -> Result<Vec<OptionFunction>, CodegenError> {
        let renderer = TypeRenderer::new(&self.model.aliases);
        let mut sanitizer = NameSanitizer::new().reserve(self.receiver());
        let mut function_names = HashSet::new();
        let mut functions = Vec::new();

        for field in self.selected_fields() {
            let function_name =
                format!("{}{}", self.model.options.option_prefix, title(&field.name));
            if !function_names.insert(function_name.clone()) {
                return Err(CodegenError::generation(format!(
                    "fields of '{}' produce duplicate option function '{}'",
                    self.model.record.name, function_name
                )));
            }

            let function = OptionFunction {
                field_name: field.name.clone(),
                function_name,
                parameter_name: sanitizer.argument_name(&field.name),
                parameter_type: renderer.render(&field.ty)?,
            };
            tracing::debug!(
                "field '{}' -> {}({} {})",
                function.field_name,
                function.function_name,
                function.parameter_name,
                function.parameter_type
            );
            functions.push(function);
        }

        Ok(functions)
    }

    /// Fields that receive an option, in declaration order.
    ///
    /// Ignored fields, blank (`_`) fields and, under
    /// [`FieldVisibility::ExportedOnly`], unexported fields are skipped.
    pub fn selected_fields(&self) -> impl Iterator<Item = &'a RecordField> + use<'a> {
        let model = self.model;
        let visibility = model.options.visibility;
        model
            .record
            .active_fields()
            .filter(|f| f.name != BLANK_IDENTIFIER)
            .filter(move |f| visibility == FieldVisibility::All || f.is_exported())
    }
}
