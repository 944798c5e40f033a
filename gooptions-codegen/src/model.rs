//! Generation model.

use crate::options::GeneratorOptions;
use gooptions_schema::{AliasTable, PackageRef, RecordType};

/// Everything a generation run reads: built once, never mutated.
#[derive(Debug, Clone)]
pub struct Model {
    /// Generator options.
    pub options: GeneratorOptions,
    /// Package the record is declared in, and generated into.
    pub package: PackageRef,
    /// The record type.
    pub record: RecordType,
    /// Aliases for every package the record references.
    pub aliases: AliasTable,
}

impl Model {
    /// Creates a model, resolving the record's imports.
    #[must_use]
    pub fn new(options: GeneratorOptions, package: PackageRef, record: RecordType) -> Self {
        let aliases = AliasTable::resolve(&package, &record);
        Self {
            options,
            package,
            record,
            aliases,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gooptions_schema::{RecordField, TypeNode};

    #[test]
    fn test_model_resolves_aliases() {
        let package = PackageRef::new("example.com/app/users");
        let mut record = RecordType::new("User");
        record.add_field(RecordField::new(
            "Org",
            TypeNode::pointer(TypeNode::named(Some(package.clone()), "Org")),
        ));
        record.add_field(RecordField::new(
            "Created",
            TypeNode::named(Some(PackageRef::new("time")), "Time"),
        ));

        let model = Model::new(GeneratorOptions::default(), package, record);
        assert_eq!(model.aliases.get("example.com/app/users"), Some(""));
        assert_eq!(model.aliases.get("time"), Some("time"));
    }
}
