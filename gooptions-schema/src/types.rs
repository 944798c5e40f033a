//! Go type model.
//!
//! This module contains the closed set of type shapes a record field can
//! carry, together with the record and package definitions that reference
//! them. Values are built once per generation run and never mutated.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Single-byte integer alias (`uint8`).
pub const BYTE_ALIAS: &str = "byte";

/// Single-codepoint integer alias (`int32`).
pub const RUNE_ALIAS: &str = "rune";

/// Predeclared numeric, boolean and string kinds.
pub const PRIMITIVE_KINDS: &[&str] = &[
    "bool",
    "string",
    "int",
    "int8",
    "int16",
    "int32",
    "int64",
    "uint",
    "uint8",
    "uint16",
    "uint32",
    "uint64",
    "uintptr",
    "float32",
    "float64",
    "complex64",
    "complex128",
];

/// Reference to a Go package.
///
/// Two references are equal when their import paths are equal; the short
/// name is display information only.
#[derive(Debug, Clone)]
pub struct PackageRef {
    path: String,
    name: String,
}

impl PackageRef {
    /// Creates a package reference whose short name is the last path segment.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        let name = last_segment(&path).to_string();
        Self { path, name }
    }

    /// Creates a package reference with an explicit short name.
    #[must_use]
    pub fn with_name(path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
        }
    }

    /// Returns the canonical import path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the package short name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl PartialEq for PackageRef {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Eq for PackageRef {}

impl Hash for PackageRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.path.hash(state);
    }
}

impl PartialOrd for PackageRef {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PackageRef {
    fn cmp(&self, other: &Self) -> Ordering {
        self.path.cmp(&other.path)
    }
}

impl fmt::Display for PackageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

/// Returns the last `/`-separated segment of an import path.
#[must_use]
pub fn last_segment(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Channel direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChanDir {
    /// Receive-only (`<-chan T`).
    Recv,
    /// Send-only (`chan<- T`).
    Send,
    /// Bidirectional (`chan T`).
    #[default]
    Both,
}

impl ChanDir {
    /// Parses a channel direction from a string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "recv" | "receive" | "<-chan" => Some(Self::Recv),
            "send" | "chan<-" => Some(Self::Send),
            "both" | "bidirectional" | "chan" => Some(Self::Both),
            _ => None,
        }
    }
}

/// Length of an array or slice shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArrayLen {
    /// Slice (`[]T`).
    Unbounded,
    /// Fixed-size array (`[N]T`).
    Fixed(usize),
}

/// A type shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeNode {
    /// Predeclared identifier: `int`, `string`, `byte`, `error`, `interface{}`, ...
    Predeclared(String),
    /// Declared type, optionally qualified by its package.
    Named {
        /// Declaring package; `None` for universe-scope names.
        package: Option<PackageRef>,
        /// Name inside the package.
        name: String,
    },
    /// Pointer type.
    Pointer(Box<TypeNode>),
    /// Array or slice type.
    ArraySlice {
        /// Fixed length or unbounded.
        len: ArrayLen,
        /// Element type.
        elem: Box<TypeNode>,
    },
    /// Channel type.
    Channel {
        /// Direction.
        dir: ChanDir,
        /// Element type.
        elem: Box<TypeNode>,
    },
    /// Map type.
    Map {
        /// Key type.
        key: Box<TypeNode>,
        /// Value type.
        value: Box<TypeNode>,
    },
    /// Function signature.
    Func(FuncType),
}

impl TypeNode {
    /// Creates a predeclared type.
    #[must_use]
    pub fn predeclared(name: impl Into<String>) -> Self {
        Self::Predeclared(name.into())
    }

    /// Creates a named type.
    #[must_use]
    pub fn named(package: Option<PackageRef>, name: impl Into<String>) -> Self {
        Self::Named {
            package,
            name: name.into(),
        }
    }

    /// Creates a pointer type.
    #[must_use]
    pub fn pointer(elem: TypeNode) -> Self {
        Self::Pointer(Box::new(elem))
    }

    /// Creates a slice type.
    #[must_use]
    pub fn slice(elem: TypeNode) -> Self {
        Self::ArraySlice {
            len: ArrayLen::Unbounded,
            elem: Box::new(elem),
        }
    }

    /// Creates a fixed-size array type.
    #[must_use]
    pub fn array(len: usize, elem: TypeNode) -> Self {
        Self::ArraySlice {
            len: ArrayLen::Fixed(len),
            elem: Box::new(elem),
        }
    }

    /// Creates a channel type.
    #[must_use]
    pub fn chan(dir: ChanDir, elem: TypeNode) -> Self {
        Self::Channel {
            dir,
            elem: Box::new(elem),
        }
    }

    /// Creates a map type.
    #[must_use]
    pub fn map(key: TypeNode, value: TypeNode) -> Self {
        Self::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    /// Creates a function type.
    #[must_use]
    pub fn func(inputs: Vec<Parameter>, outputs: Vec<Parameter>) -> Self {
        Self::Func(FuncType { inputs, outputs })
    }
}

/// Function signature.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FuncType {
    /// Input parameters; only the last may be variadic.
    pub inputs: Vec<Parameter>,
    /// Result parameters.
    pub outputs: Vec<Parameter>,
}

/// Function parameter or result.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Parameter {
    /// Parameter name, if declared.
    pub name: Option<String>,
    /// Parameter type. For a variadic parameter this is the element type.
    pub ty: TypeNode,
    /// Whether this is the trailing `...T` parameter.
    pub variadic: bool,
}

impl Parameter {
    /// Creates an unnamed, non-variadic parameter.
    #[must_use]
    pub fn new(ty: TypeNode) -> Self {
        Self {
            name: None,
            ty,
            variadic: false,
        }
    }

    /// Creates an unnamed variadic parameter of element type `ty`.
    #[must_use]
    pub fn variadic(ty: TypeNode) -> Self {
        Self {
            name: None,
            ty,
            variadic: true,
        }
    }

    /// Sets the parameter name.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Options read from a field's struct tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TagOptions {
    /// Skip generating a builder for this field.
    pub ignore: bool,
}

/// A field of a record type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordField {
    /// Field name as declared.
    pub name: String,
    /// Field type.
    pub ty: TypeNode,
    /// Tag options.
    pub tag_options: TagOptions,
}

impl RecordField {
    /// Creates a field with default tag options.
    #[must_use]
    pub fn new(name: impl Into<String>, ty: TypeNode) -> Self {
        Self {
            name: name.into(),
            ty,
            tag_options: TagOptions::default(),
        }
    }

    /// Returns true if the field is visible outside its package.
    #[must_use]
    pub fn is_exported(&self) -> bool {
        self.name.chars().next().is_some_and(char::is_uppercase)
    }
}

/// A record (struct) type with its fields in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordType {
    /// Type name.
    pub name: String,
    /// Fields in declaration order.
    pub fields: Vec<RecordField>,
}

impl RecordType {
    /// Creates an empty record type.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Appends a field, preserving declaration order.
    pub fn add_field(&mut self, field: RecordField) {
        self.fields.push(field);
    }

    /// Iterates over fields not marked as ignored, in declaration order.
    pub fn active_fields(&self) -> impl Iterator<Item = &RecordField> {
        self.fields.iter().filter(|f| !f.tag_options.ignore)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_package_ref_short_name() {
        let pkg = PackageRef::new("encoding/json");
        assert_eq!(pkg.path(), "encoding/json");
        assert_eq!(pkg.name(), "json");

        let pkg = PackageRef::new("time");
        assert_eq!(pkg.name(), "time");
    }

    #[test]
    fn test_package_ref_equality_by_path() {
        let a = PackageRef::new("gopkg.in/yaml.v3");
        let b = PackageRef::with_name("gopkg.in/yaml.v3", "yaml");
        assert_eq!(a, b);
        assert_eq!(b.name(), "yaml");

        let mut set = HashSet::new();
        set.insert(a);
        set.insert(b);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_chan_dir_parse() {
        assert_eq!(ChanDir::parse("recv"), Some(ChanDir::Recv));
        assert_eq!(ChanDir::parse("Send"), Some(ChanDir::Send));
        assert_eq!(ChanDir::parse("both"), Some(ChanDir::Both));
        assert_eq!(ChanDir::parse("sideways"), None);
    }

    #[test]
    fn test_record_active_fields() {
        let mut record = RecordType::new("User");
        record.add_field(RecordField::new("email", TypeNode::predeclared("string")));
        let mut hidden = RecordField::new("secret", TypeNode::predeclared("string"));
        hidden.tag_options.ignore = true;
        record.add_field(hidden);
        record.add_field(RecordField::new("Age", TypeNode::predeclared("int")));

        let names: Vec<_> = record.active_fields().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["email", "Age"]);
    }

    #[test]
    fn test_field_is_exported() {
        assert!(RecordField::new("Email", TypeNode::predeclared("string")).is_exported());
        assert!(!RecordField::new("email", TypeNode::predeclared("string")).is_exported());
    }
}
