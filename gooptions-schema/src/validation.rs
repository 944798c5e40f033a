//! Record validation utilities.
//!
//! This module checks the structural invariants of a converted record type
//! before any code is generated from it.

use crate::error::SchemaError;
use crate::types::{FuncType, PackageRef, RecordType, TypeNode};
use std::collections::HashSet;

/// Validates a record type for correctness.
///
/// # Arguments
/// * `record` - The record to validate
///
/// # Returns
/// Ok(()) if valid, or SchemaError describing the issue.
///
/// # Errors
/// Returns `SchemaError` if validation fails.
pub fn validate_record(record: &RecordType) -> Result<(), SchemaError> {
    if !is_identifier(&record.name) {
        return Err(SchemaError::validation(format!(
            "invalid record name '{}'",
            record.name
        )));
    }

    let mut seen = HashSet::new();
    for field in &record.fields {
        if !is_identifier(&field.name) {
            return Err(SchemaError::validation(format!(
                "invalid field name '{}' in record '{}'",
                field.name, record.name
            )));
        }
        // Go allows any number of blank fields.
        if field.name != "_" && !seen.insert(field.name.as_str()) {
            return Err(SchemaError::validation(format!(
                "duplicate field '{}' in record '{}'",
                field.name, record.name
            )));
        }
        validate_type(&field.ty).map_err(|message| {
            SchemaError::validation(format!("{}.{}: {}", record.name, field.name, message))
        })?;
    }

    Ok(())
}

/// Validates a type node recursively.
fn validate_type(node: &TypeNode) -> Result<(), String> {
    match node {
        TypeNode::Predeclared(name) if name.is_empty() => Err("empty predeclared name".to_string()),
        TypeNode::Predeclared(_) => Ok(()),
        TypeNode::Named { name, .. } if !is_identifier(name) => {
            Err(format!("invalid type name '{name}'"))
        }
        TypeNode::Named {
            package: Some(package),
            ..
        } => check_package_name(package),
        TypeNode::Named { package: None, .. } => Ok(()),
        TypeNode::Pointer(elem)
        | TypeNode::ArraySlice { elem, .. }
        | TypeNode::Channel { elem, .. } => validate_type(elem),
        TypeNode::Map { key, value } => {
            validate_type(key)?;
            validate_type(value)
        }
        TypeNode::Func(func) => validate_func(func),
    }
}

fn validate_func(func: &FuncType) -> Result<(), String> {
    let last = func.inputs.len().saturating_sub(1);
    for (i, param) in func.inputs.iter().enumerate() {
        if param.variadic && i != last {
            return Err(format!("variadic parameter at position {i} is not last"));
        }
        validate_type(&param.ty)?;
    }
    if func.outputs.iter().any(|p| p.variadic) {
        return Err("variadic result parameter".to_string());
    }
    for param in &func.outputs {
        validate_type(&param.ty)?;
    }
    Ok(())
}

/// Validates that a package's short name can appear in Go source.
///
/// Paths such as `gopkg.in/yaml.v3` need an explicit name in the descriptor.
///
/// # Errors
/// Returns `SchemaError::Validation` if the short name is not an identifier.
pub fn validate_package(package: &PackageRef) -> Result<(), SchemaError> {
    check_package_name(package).map_err(SchemaError::validation)
}

fn check_package_name(package: &PackageRef) -> Result<(), String> {
    if is_identifier(package.name()) {
        Ok(())
    } else {
        Err(format!(
            "package '{}' has short name '{}', which is not an identifier; set an explicit package name",
            package.path(),
            package.name()
        ))
    }
}

/// Returns true if `s` is a valid Go identifier.
#[must_use]
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_')
}
