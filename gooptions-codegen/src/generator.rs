//! Output composition.
//!
//! Assembles the header, package clause, imports, option type, apply method
//! and option functions into one Go source file.

use crate::error::CodegenError;
use crate::go::BuilderGenerator;
use crate::model::Model;
use gooptions_schema::{PackageRef, field_packages};

/// Main code generator.
pub struct Generator<'a> {
    model: &'a Model,
}

impl<'a> Generator<'a> {
    /// Creates a new generator for the given model.
    #[must_use]
    pub fn new(model: &'a Model) -> Self {
        Self { model }
    }

    /// Generates the complete source file.
    ///
    /// Everything is rendered in memory; nothing is written.
    ///
    /// # Errors
    /// Returns `CodegenError` if an option function cannot be generated.
    pub fn generate(&self) -> Result<String, CodegenError> {
        let builders = BuilderGenerator::new(self.model);
        let receiver = builders.receiver();
        let functions = builders.generate()?;
        let used = field_packages(builders.selected_fields());

        let mut output = String::new();

        output.push_str(&self.generate_header());
        output.push_str(&self.generate_imports(&used));
        output.push_str(&self.generate_option_type());
        output.push('\n');
        output.push_str(&self.generate_apply(&receiver));

        let options = &self.model.options;
        for function in &functions {
            output.push('\n');
            output.push_str(&function.to_source(
                &options.option_name,
                &receiver,
                &self.model.record.name,
            ));
        }

        tracing::debug!(
            "generated {} option functions for {}",
            functions.len(),
            self.model.record.name
        );

        Ok(output)
    }

    /// Generates the header comment and package clause.
    fn generate_header(&self) -> String {
        let mut output = String::new();

        if !self.model.options.header.is_empty() {
            output.push_str(&self.model.options.header);
            output.push_str("\n\n");
        }
        output.push_str(&format!("package {}\n\n", self.model.package.name()));

        output
    }

    /// Generates the import block for the packages the emitted options
    /// reference, or nothing if there are none.
    fn generate_imports(&self, used: &[PackageRef]) -> String {
        let mut output = String::new();
        let imports: Vec<_> = self.model.aliases.imports_for(used).collect();

        if imports.is_empty() {
            return output;
        }

        output.push_str("import (\n");
        for import in imports {
            if import.is_named() {
                output.push_str(&format!("\t{} \"{}\"\n", import.alias, import.path));
            } else {
                output.push_str(&format!("\t\"{}\"\n", import.path));
            }
        }
        output.push_str(")\n\n");

        output
    }

    /// Generates the option function type.
    fn generate_option_type(&self) -> String {
        format!(
            "type {} func(*{})\n",
            self.model.options.option_name, self.model.record.name
        )
    }

    /// Generates the method applying a list of options to a record.
    fn generate_apply(&self, receiver: &str) -> String {
        let mut output = String::new();
        let options = &self.model.options;
        let record = &self.model.record.name;

        output.push_str(&format!(
            "func ({} *{}) {}(options ...{}) *{} {{\n",
            receiver, record, options.apply_name, options.option_name, record
        ));
        output.push_str("\tfor _, option := range options {\n");
        output.push_str(&format!("\t\toption({})\n", receiver));
        output.push_str("\t}\n");
        output.push_str(&format!("\treturn {}\n", receiver));
        output.push_str("}\n");

        output
    }
}
