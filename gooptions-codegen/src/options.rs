//! Generator configuration.

/// Which record fields receive an option function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldVisibility {
    /// Every field that is not ignored by its tag.
    #[default]
    All,
    /// Only exported (upper-case) fields.
    ExportedOnly,
}

/// Options controlling the generated source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorOptions {
    /// Name of the function type applied to a record, `Option` by default.
    pub option_name: String,
    /// Prefix of every option function, `With` by default.
    pub option_prefix: String,
    /// Name of the method applying a list of options, `with` by default.
    pub apply_name: String,
    /// Field selection policy.
    pub visibility: FieldVisibility,
    /// Comment line placed at the top of the file.
    pub header: String,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            option_name: "Option".to_string(),
            option_prefix: "With".to_string(),
            apply_name: "with".to_string(),
            visibility: FieldVisibility::All,
            header: "// DO NOT EDIT. This file was generated by gooptions.".to_string(),
        }
    }
}

impl GeneratorOptions {
    /// Creates the default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the option type name.
    #[must_use]
    pub fn option_name(mut self, name: impl Into<String>) -> Self {
        self.option_name = name.into();
        self
    }

    /// Sets the option function prefix.
    #[must_use]
    pub fn option_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.option_prefix = prefix.into();
        self
    }

    /// Sets the apply method name.
    #[must_use]
    pub fn apply_name(mut self, name: impl Into<String>) -> Self {
        self.apply_name = name.into();
        self
    }

    /// Sets the field selection policy.
    #[must_use]
    pub fn visibility(mut self, visibility: FieldVisibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Sets the header comment.
    #[must_use]
    pub fn header(mut self, header: impl Into<String>) -> Self {
        self.header = header.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = GeneratorOptions::default();
        assert_eq!(options.option_name, "Option");
        assert_eq!(options.option_prefix, "With");
        assert_eq!(options.apply_name, "with");
        assert_eq!(options.visibility, FieldVisibility::All);
    }

    #[test]
    fn test_builder_methods() {
        let options = GeneratorOptions::new()
            .option_name("UserOption")
            .option_prefix("Set")
            .apply_name("apply")
            .visibility(FieldVisibility::ExportedOnly)
            .header("// generated");
        assert_eq!(options.option_name, "UserOption");
        assert_eq!(options.option_prefix, "Set");
        assert_eq!(options.apply_name, "apply");
        assert_eq!(options.visibility, FieldVisibility::ExportedOnly);
        assert_eq!(options.header, "// generated");
    }
}
