//! Import resolution.
//!
//! Walks every field type of a record, collects the packages it references
//! and assigns each one the alias used when rendering its named types.

use crate::types::{FuncType, PackageRef, RecordField, RecordType, TypeNode, last_segment};
use std::collections::{BTreeMap, BTreeSet};

/// Package path to display alias.
///
/// An empty alias means the package is the one being generated into and its
/// names render unqualified. Entries are ordered by path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasTable {
    entries: BTreeMap<String, String>,
}

impl AliasTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the table for a record declared in `origin`.
    #[must_use]
    pub fn resolve(origin: &PackageRef, record: &RecordType) -> Self {
        Self::from_packages(origin, referenced_packages(record).iter())
    }

    /// Builds the table from an arbitrary set of referenced packages.
    ///
    /// Discovering the same path more than once is harmless.
    pub fn from_packages<'a>(
        origin: &PackageRef,
        packages: impl IntoIterator<Item = &'a PackageRef>,
    ) -> Self {
        let mut table = Self::new();

        for package in packages {
            if package == origin {
                table.insert(package.path(), "");
            } else {
                table.insert(package.path(), package.name());
            }
        }

        for (alias, paths) in table.collisions() {
            tracing::warn!(
                "packages {} share the name '{}'; generated imports will collide",
                paths.join(", "),
                alias
            );
        }

        table
    }

    /// Sets the alias of a package path.
    pub fn insert(&mut self, path: impl Into<String>, alias: impl Into<String>) {
        let path = path.into();
        let alias = alias.into();
        tracing::debug!("alias '{}' -> '{}'", path, alias);
        self.entries.insert(path, alias);
    }

    /// Returns the alias of a package path.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&str> {
        self.entries.get(path).map(String::as_str)
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(path, alias)` pairs ordered by path.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(p, a)| (p.as_str(), a.as_str()))
    }

    /// Iterates over the packages that need an import, ordered by path.
    pub fn imports(&self) -> impl Iterator<Item = ImportSpec<'_>> {
        self.iter()
            .filter(|(_, alias)| !alias.is_empty())
            .map(|(path, alias)| ImportSpec { path, alias })
    }

    /// Iterates over the imports needed by `packages` only, ordered by path.
    ///
    /// Packages without an entry, and the package being generated into, are
    /// skipped.
    pub fn imports_for<'a>(
        &'a self,
        packages: &[PackageRef],
    ) -> impl Iterator<Item = ImportSpec<'a>> + use<'a> {
        let used: BTreeSet<String> = packages.iter().map(|p| p.path().to_string()).collect();
        self.imports().filter(move |spec| used.contains(spec.path))
    }

    /// Returns aliases shared by more than one package path.
    ///
    /// Such collisions are reported but not resolved.
    #[must_use]
    pub fn collisions(&self) -> Vec<(String, Vec<String>)> {
        let mut by_alias: BTreeMap<&str, Vec<String>> = BTreeMap::new();
        for (path, alias) in self.imports().map(|i| (i.path, i.alias)) {
            by_alias.entry(alias).or_default().push(path.to_string());
        }

        by_alias
            .into_iter()
            .filter(|(_, paths)| paths.len() > 1)
            .map(|(alias, paths)| (alias.to_string(), paths))
            .collect()
    }
}

/// A single import line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportSpec<'a> {
    /// Import path.
    pub path: &'a str,
    /// Alias names are qualified with.
    pub alias: &'a str,
}

impl ImportSpec<'_> {
    /// Returns true if the import needs an explicit name.
    #[must_use]
    pub fn is_named(&self) -> bool {
        self.alias != last_segment(self.path)
    }
}

/// Collects every package referenced by the record's field types.
///
/// Ignored fields are included; their types are still part of the record.
#[must_use]
pub fn referenced_packages(record: &RecordType) -> Vec<PackageRef> {
    field_packages(&record.fields)
}

/// Collects every package referenced by the given fields' types.
#[must_use]
pub fn field_packages<'a>(fields: impl IntoIterator<Item = &'a RecordField>) -> Vec<PackageRef> {
    let mut packages = Vec::new();
    for field in fields {
        collect_packages(&field.ty, &mut packages);
    }
    packages
}

/// Appends the packages referenced by `node`, recursively.
pub fn collect_packages(node: &TypeNode, out: &mut Vec<PackageRef>) {
    match node {
        TypeNode::Predeclared(_) => {}
        TypeNode::Named { package, .. } => {
            if let Some(package) = package {
                out.push(package.clone());
            }
        }
        TypeNode::Pointer(elem) => collect_packages(elem, out),
        TypeNode::ArraySlice { elem, .. } => collect_packages(elem, out),
        TypeNode::Channel { elem, .. } => collect_packages(elem, out),
        TypeNode::Map { key, value } => {
            collect_packages(key, out);
            collect_packages(value, out);
        }
        TypeNode::Func(FuncType { inputs, outputs }) => {
            for param in inputs.iter().chain(outputs) {
                collect_packages(&param.ty, out);
            }
        }
    }
}
