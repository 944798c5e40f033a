//! Record descriptors.
//!
//! A descriptor is the normalized, serializable description of a record
//! type as reported by an introspection facility. Its shape inventory is a
//! superset of [`TypeNode`]: shapes the type model cannot represent are
//! carried here so that conversion can reject them by name.

use crate::error::SchemaError;
use crate::tags::parse_tag_options;
use crate::types::{
    BYTE_ALIAS, ChanDir, FuncType, PRIMITIVE_KINDS, PackageRef, Parameter, RUNE_ALIAS,
    RecordField, RecordType, TypeNode,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Package identity as reported by the extractor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageDescriptor {
    /// Import path.
    pub path: String,
    /// Package name, when it differs from the last path segment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl PackageDescriptor {
    /// Creates a descriptor for the given import path.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: None,
        }
    }

    /// Converts into a [`PackageRef`].
    #[must_use]
    pub fn to_package_ref(&self) -> PackageRef {
        match &self.name {
            Some(name) => PackageRef::with_name(self.path.clone(), name.clone()),
            None => PackageRef::new(self.path.clone()),
        }
    }
}

/// Raw type shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum TypeDescriptor {
    /// Predeclared basic type, including the `byte` and `rune` aliases.
    Basic {
        /// Type name.
        name: String,
    },
    /// Declared type.
    Named {
        /// Declaring package; absent for universe-scope names such as `error`.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        package: Option<PackageDescriptor>,
        /// Name inside the package.
        name: String,
    },
    /// Pointer.
    Pointer {
        /// Element type.
        elem: Box<TypeDescriptor>,
    },
    /// Fixed-size array.
    Array {
        /// Array length.
        len: usize,
        /// Element type.
        elem: Box<TypeDescriptor>,
    },
    /// Slice.
    Slice {
        /// Element type.
        elem: Box<TypeDescriptor>,
    },
    /// Channel.
    Chan {
        /// Direction.
        #[serde(default)]
        dir: ChanDir,
        /// Element type.
        elem: Box<TypeDescriptor>,
    },
    /// Map.
    Map {
        /// Key type.
        key: Box<TypeDescriptor>,
        /// Value type.
        value: Box<TypeDescriptor>,
    },
    /// Function signature.
    Func {
        /// Input parameters.
        #[serde(default)]
        params: Vec<ParamDescriptor>,
        /// Results.
        #[serde(default)]
        results: Vec<ParamDescriptor>,
        /// Whether the last parameter is variadic. Its descriptor is the
        /// slice type, as reflection reports it.
        #[serde(default)]
        variadic: bool,
    },
    /// Interface literal.
    Interface {
        /// Method names.
        #[serde(default)]
        methods: Vec<String>,
    },
    /// Struct literal.
    Struct {
        /// Field names.
        #[serde(default)]
        fields: Vec<String>,
    },
    /// Type parameter of a generic declaration.
    TypeParam {
        /// Parameter name.
        name: String,
    },
    /// `unsafe.Pointer`.
    UnsafePointer,
}

impl TypeDescriptor {
    /// Creates a basic type descriptor.
    #[must_use]
    pub fn basic(name: impl Into<String>) -> Self {
        Self::Basic { name: name.into() }
    }

    /// Creates a named type descriptor declared in `package`.
    #[must_use]
    pub fn named(package: Option<PackageDescriptor>, name: impl Into<String>) -> Self {
        Self::Named {
            package,
            name: name.into(),
        }
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Basic { name } => write!(f, "basic type '{name}'"),
            Self::Named {
                package: Some(p),
                name,
            } => write!(f, "named type '{}.{}'", p.path, name),
            Self::Named { package: None, name } => write!(f, "named type '{name}'"),
            Self::Pointer { .. } => f.write_str("pointer"),
            Self::Array { len, .. } => write!(f, "array of length {len}"),
            Self::Slice { .. } => f.write_str("slice"),
            Self::Chan { .. } => f.write_str("channel"),
            Self::Map { .. } => f.write_str("map"),
            Self::Func { params, .. } => write!(f, "func with {} parameters", params.len()),
            Self::Interface { methods } if methods.is_empty() => f.write_str("empty interface"),
            Self::Interface { methods } => {
                write!(f, "interface with methods ({})", methods.join(", "))
            }
            Self::Struct { fields } if fields.is_empty() => f.write_str("empty struct"),
            Self::Struct { fields } => write!(f, "struct literal with fields ({})", fields.join(", ")),
            Self::TypeParam { name } => write!(f, "type parameter '{name}'"),
            Self::UnsafePointer => f.write_str("unsafe.Pointer"),
        }
    }
}

/// Function parameter or result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamDescriptor {
    /// Parameter name, if declared.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Parameter type.
    #[serde(rename = "type")]
    pub ty: TypeDescriptor,
}

impl ParamDescriptor {
    /// Creates an unnamed parameter.
    #[must_use]
    pub fn new(ty: TypeDescriptor) -> Self {
        Self { name: None, ty }
    }
}

/// Record field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Field name.
    pub name: String,
    /// Field type.
    #[serde(rename = "type")]
    pub ty: TypeDescriptor,
    /// Raw struct tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

/// Record type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordDescriptor {
    /// Type name.
    pub name: String,
    /// Fields in declaration order.
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,
}

/// All records extracted from one package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageDocument {
    /// The package the records are declared in.
    pub package: PackageDescriptor,
    /// Record types.
    #[serde(default)]
    pub records: Vec<RecordDescriptor>,
}

impl PackageDocument {
    /// Looks up a record by type name.
    #[must_use]
    pub fn get_record(&self, name: &str) -> Option<&RecordDescriptor> {
        self.records.iter().find(|r| r.name == name)
    }
}

impl TypeNode {
    /// Converts a descriptor into a type node.
    ///
    /// `path` names the field being converted and is only used for errors.
    ///
    /// # Errors
    /// Returns `SchemaError::UnsupportedShape` for shapes outside the model.
    pub fn from_descriptor(desc: &TypeDescriptor, path: &str) -> Result<Self, SchemaError> {
        match desc {
            TypeDescriptor::Named {
                package: Some(package),
                name,
            } => Ok(Self::named(Some(package.to_package_ref()), name.clone())),
            TypeDescriptor::Named {
                package: None,
                name,
            } if name == "error" => Ok(Self::predeclared("error")),
            TypeDescriptor::Named {
                package: None,
                name,
            } => Ok(Self::named(None, name.clone())),

            // The aliases share their underlying kind, so identity is checked
            // before the generic classification.
            TypeDescriptor::Basic { name } if name == BYTE_ALIAS || name == RUNE_ALIAS => {
                Ok(Self::predeclared(name.clone()))
            }
            TypeDescriptor::Basic { name }
                if PRIMITIVE_KINDS.contains(&name.as_str()) || name == "any" =>
            {
                Ok(Self::predeclared(name.clone()))
            }
            TypeDescriptor::Basic { .. } => Err(SchemaError::unsupported(path, desc.to_string())),

            TypeDescriptor::Pointer { elem } => Ok(Self::pointer(Self::from_descriptor(elem, path)?)),
            TypeDescriptor::Array { len, elem } => {
                Ok(Self::array(*len, Self::from_descriptor(elem, path)?))
            }
            TypeDescriptor::Slice { elem } => Ok(Self::slice(Self::from_descriptor(elem, path)?)),
            TypeDescriptor::Chan { dir, elem } => {
                Ok(Self::chan(*dir, Self::from_descriptor(elem, path)?))
            }
            TypeDescriptor::Map { key, value } => Ok(Self::map(
                Self::from_descriptor(key, path)?,
                Self::from_descriptor(value, path)?,
            )),
            TypeDescriptor::Func {
                params,
                results,
                variadic,
            } => Ok(Self::Func(func_from_descriptor(
                params, results, *variadic, path,
            )?)),

            TypeDescriptor::Interface { methods } if methods.is_empty() => {
                Ok(Self::predeclared("interface{}"))
            }
            TypeDescriptor::Struct { fields } if fields.is_empty() => {
                Ok(Self::predeclared("struct{}"))
            }
            TypeDescriptor::Interface { .. }
            | TypeDescriptor::Struct { .. }
            | TypeDescriptor::TypeParam { .. }
            | TypeDescriptor::UnsafePointer => Err(SchemaError::unsupported(path, desc.to_string())),
        }
    }
}

fn func_from_descriptor(
    params: &[ParamDescriptor],
    results: &[ParamDescriptor],
    variadic: bool,
    path: &str,
) -> Result<FuncType, SchemaError> {
    let fixed = if variadic {
        params.len().checked_sub(1).ok_or_else(|| {
            SchemaError::unsupported(path, "variadic func without parameters")
        })?
    } else {
        params.len()
    };

    let mut inputs = params[..fixed]
        .iter()
        .map(|p| param_from_descriptor(p, path))
        .collect::<Result<Vec<_>, _>>()?;

    if let Some(last) = params.get(fixed) {
        let TypeDescriptor::Slice { elem } = &last.ty else {
            return Err(SchemaError::unsupported(
                path,
                format!("variadic parameter of {} instead of slice", last.ty),
            ));
        };
        inputs.push(Parameter {
            name: last.name.clone(),
            ty: TypeNode::from_descriptor(elem, path)?,
            variadic: true,
        });
    }

    let outputs = results
        .iter()
        .map(|p| param_from_descriptor(p, path))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(FuncType { inputs, outputs })
}

fn param_from_descriptor(param: &ParamDescriptor, path: &str) -> Result<Parameter, SchemaError> {
    Ok(Parameter {
        name: param.name.clone(),
        ty: TypeNode::from_descriptor(&param.ty, path)?,
        variadic: false,
    })
}

impl RecordDescriptor {
    /// Converts the descriptor into a record type, preserving field order.
    ///
    /// # Errors
    /// Returns `SchemaError::UnsupportedShape` if any field type cannot be
    /// modelled.
    pub fn to_record_type(&self) -> Result<RecordType, SchemaError> {
        let mut record = RecordType::new(self.name.clone());

        for field in &self.fields {
            let path = format!("{}.{}", self.name, field.name);
            let ty = TypeNode::from_descriptor(&field.ty, &path)?;
            let tag_options = field
                .tag
                .as_deref()
                .map(parse_tag_options)
                .unwrap_or_default();

            record.add_field(RecordField {
                name: field.name.clone(),
                ty,
                tag_options,
            });
        }

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ArrayLen;

    fn int() -> TypeDescriptor {
        TypeDescriptor::basic("int")
    }

    #[test]
    fn test_byte_and_rune_keep_alias_names() {
        let node = TypeNode::from_descriptor(&TypeDescriptor::basic("byte"), "T.b").unwrap();
        assert_eq!(node, TypeNode::predeclared("byte"));
        let node = TypeNode::from_descriptor(&TypeDescriptor::basic("rune"), "T.r").unwrap();
        assert_eq!(node, TypeNode::predeclared("rune"));
        let node = TypeNode::from_descriptor(&TypeDescriptor::basic("uint8"), "T.u").unwrap();
        assert_eq!(node, TypeNode::predeclared("uint8"));
    }

    #[test]
    fn test_unknown_basic_rejected() {
        let err = TypeNode::from_descriptor(&TypeDescriptor::basic("int128"), "T.x").unwrap_err();
        assert!(matches!(err, SchemaError::UnsupportedShape { ref path, .. } if path == "T.x"));
    }

    #[test]
    fn test_named_with_and_without_package() {
        let desc = TypeDescriptor::named(Some(PackageDescriptor::new("time")), "Time");
        let node = TypeNode::from_descriptor(&desc, "T.t").unwrap();
        assert_eq!(node, TypeNode::named(Some(PackageRef::new("time")), "Time"));

        let node = TypeNode::from_descriptor(&TypeDescriptor::named(None, "error"), "T.e").unwrap();
        assert_eq!(node, TypeNode::predeclared("error"));
    }

    #[test]
    fn test_containers() {
        let desc = TypeDescriptor::Map {
            key: Box::new(TypeDescriptor::basic("string")),
            value: Box::new(TypeDescriptor::Pointer {
                elem: Box::new(TypeDescriptor::Array {
                    len: 16,
                    elem: Box::new(TypeDescriptor::basic("byte")),
                }),
            }),
        };
        let node = TypeNode::from_descriptor(&desc, "T.m").unwrap();
        let TypeNode::Map { value, .. } = node else {
            panic!("expected map");
        };
        let TypeNode::Pointer(elem) = *value else {
            panic!("expected pointer");
        };
        assert!(matches!(*elem, TypeNode::ArraySlice { len: ArrayLen::Fixed(16), .. }));
    }

    #[test]
    fn test_variadic_func_unwraps_slice() {
        let desc = TypeDescriptor::Func {
            params: vec![
                ParamDescriptor::new(int()),
                ParamDescriptor::new(int()),
                ParamDescriptor::new(TypeDescriptor::Slice {
                    elem: Box::new(TypeDescriptor::basic("string")),
                }),
            ],
            results: vec![ParamDescriptor::new(TypeDescriptor::basic("bool"))],
            variadic: true,
        };
        let TypeNode::Func(func) = TypeNode::from_descriptor(&desc, "T.f").unwrap() else {
            panic!("expected func");
        };
        assert_eq!(func.inputs.len(), 3);
        assert!(func.inputs[2].variadic);
        assert_eq!(func.inputs[2].ty, TypeNode::predeclared("string"));
        assert!(!func.inputs[0].variadic);
        assert_eq!(func.outputs.len(), 1);
    }

    #[test]
    fn test_variadic_func_requires_slice() {
        let desc = TypeDescriptor::Func {
            params: vec![ParamDescriptor::new(int())],
            results: vec![],
            variadic: true,
        };
        assert!(TypeNode::from_descriptor(&desc, "T.f").is_err());

        let desc = TypeDescriptor::Func {
            params: vec![],
            results: vec![],
            variadic: true,
        };
        assert!(TypeNode::from_descriptor(&desc, "T.f").is_err());
    }

    #[test]
    fn test_special_interface_and_struct() {
        let node =
            TypeNode::from_descriptor(&TypeDescriptor::Interface { methods: vec![] }, "T.i").unwrap();
        assert_eq!(node, TypeNode::predeclared("interface{}"));
        let node =
            TypeNode::from_descriptor(&TypeDescriptor::Struct { fields: vec![] }, "T.s").unwrap();
        assert_eq!(node, TypeNode::predeclared("struct{}"));
    }

    #[test]
    fn test_unsupported_shapes_named_in_error() {
        let desc = TypeDescriptor::Interface {
            methods: vec!["A".to_string(), "B".to_string()],
        };
        let err = TypeNode::from_descriptor(&desc, "User.I").unwrap_err();
        assert_eq!(
            err.to_string(),
            "unsupported type shape in 'User.I': interface with methods (A, B)"
        );

        let desc = TypeDescriptor::TypeParam {
            name: "T".to_string(),
        };
        assert!(TypeNode::from_descriptor(&desc, "Box.V").is_err());
        assert!(TypeNode::from_descriptor(&TypeDescriptor::UnsafePointer, "T.p").is_err());
    }

    #[test]
    fn test_unsupported_nested_shape_fails_whole_field() {
        let desc = TypeDescriptor::Slice {
            elem: Box::new(TypeDescriptor::TypeParam {
                name: "T".to_string(),
            }),
        };
        assert!(TypeNode::from_descriptor(&desc, "T.s").is_err());
    }

    #[test]
    fn test_record_to_record_type_preserves_order_and_tags() {
        let record = RecordDescriptor {
            name: "User".to_string(),
            fields: vec![
                FieldDescriptor {
                    name: "email".to_string(),
                    ty: TypeDescriptor::basic("string"),
                    tag: Some(r#"gooptions:"foobar""#.to_string()),
                },
                FieldDescriptor {
                    name: "secret".to_string(),
                    ty: TypeDescriptor::basic("string"),
                    tag: Some(r#"gooptions:"-""#.to_string()),
                },
                FieldDescriptor {
                    name: "Age".to_string(),
                    ty: int(),
                    tag: None,
                },
            ],
        };
        let rt = record.to_record_type().unwrap();
        let names: Vec<_> = rt.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["email", "secret", "Age"]);
        assert!(!rt.fields[0].tag_options.ignore);
        assert!(rt.fields[1].tag_options.ignore);
    }

    #[test]
    fn test_json_shape() {
        let json = r#"{"kind":"chan","dir":"recv","elem":{"kind":"basic","name":"int"}}"#;
        let desc: TypeDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(
            desc,
            TypeDescriptor::Chan {
                dir: ChanDir::Recv,
                elem: Box::new(int()),
            }
        );
        assert_eq!(serde_json::to_string(&desc).unwrap(), json);
    }
}
