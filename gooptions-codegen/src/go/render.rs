//! Type expression rendering.
//!
//! Renders a [`TypeNode`] as Go source text, qualifying named types with the
//! alias assigned to their package. Output is already in the form `gofmt`
//! produces, so regenerating against an unchanged record is byte-stable.

use crate::error::RenderError;
use gooptions_schema::{AliasTable, ArrayLen, ChanDir, FuncType, Parameter, TypeNode};

/// Renders type nodes against an alias table.
#[derive(Debug, Clone, Copy)]
pub struct TypeRenderer<'a> {
    aliases: &'a AliasTable,
}

impl<'a> TypeRenderer<'a> {
    /// Creates a renderer.
    #[must_use]
    pub fn new(aliases: &'a AliasTable) -> Self {
        Self { aliases }
    }

    /// Renders a type expression.
    ///
    /// # Errors
    /// Returns `RenderError` if a function signature breaks the variadic
    /// placement rule.
    pub fn render(&self, node: &TypeNode) -> Result<String, RenderError> {
        let mut output = String::new();
        self.write_type(node, &mut output)?;
        Ok(output)
    }

    fn write_type(&self, node: &TypeNode, output: &mut String) -> Result<(), RenderError> {
        match node {
            TypeNode::Predeclared(name) => output.push_str(name),
            TypeNode::Named { package, name } => {
                let alias = package.as_ref().and_then(|p| {
                    let alias = self.aliases.get(p.path());
                    if alias.is_none() {
                        tracing::debug!("no alias for package '{}', rendering '{}' bare", p, name);
                    }
                    alias
                });
                if let Some(alias) = alias.filter(|a| !a.is_empty()) {
                    output.push_str(alias);
                    output.push('.');
                }
                output.push_str(name);
            }
            TypeNode::Pointer(elem) => {
                output.push('*');
                self.write_type(elem, output)?;
            }
            TypeNode::ArraySlice { len, elem } => {
                output.push('[');
                if let ArrayLen::Fixed(n) = len {
                    output.push_str(&n.to_string());
                }
                output.push(']');
                self.write_type(elem, output)?;
            }
            TypeNode::Channel { dir, elem } => {
                output.push_str(match dir {
                    ChanDir::Recv => "<-chan ",
                    ChanDir::Send => "chan<- ",
                    ChanDir::Both => "chan ",
                });
                // `chan <-chan T` would parse as `chan<- chan T`.
                let needs_parens = *dir == ChanDir::Both
                    && matches!(
                        elem.as_ref(),
                        TypeNode::Channel {
                            dir: ChanDir::Recv,
                            ..
                        }
                    );
                if needs_parens {
                    output.push('(');
                }
                self.write_type(elem, output)?;
                if needs_parens {
                    output.push(')');
                }
            }
            TypeNode::Map { key, value } => {
                output.push_str("map[");
                self.write_type(key, output)?;
                output.push(']');
                self.write_type(value, output)?;
            }
            TypeNode::Func(func) => {
                output.push_str("func");
                self.write_signature(func, output)?;
            }
        }
        Ok(())
    }

    /// Writes `(inputs) results` without the `func` keyword.
    fn write_signature(&self, func: &FuncType, output: &mut String) -> Result<(), RenderError> {
        let count = func.inputs.len();
        if let Some(position) = func.inputs[..count.saturating_sub(1)]
            .iter()
            .position(|p| p.variadic)
        {
            return Err(RenderError::VariadicNotLast { position, count });
        }
        if let Some(position) = func.outputs.iter().position(|p| p.variadic) {
            return Err(RenderError::VariadicResult { position });
        }

        output.push('(');
        self.write_params(&func.inputs, output)?;
        output.push(')');

        match func.outputs.as_slice() {
            [] => {}
            [single] if single.name.is_none() => {
                output.push(' ');
                self.write_type(&single.ty, output)?;
            }
            outputs => {
                output.push_str(" (");
                self.write_params(outputs, output)?;
                output.push(')');
            }
        }
        Ok(())
    }

    fn write_params(&self, params: &[Parameter], output: &mut String) -> Result<(), RenderError> {
        for (i, param) in params.iter().enumerate() {
            if i > 0 {
                output.push_str(", ");
            }
            if let Some(name) = &param.name {
                output.push_str(name);
                output.push(' ');
            }
            if param.variadic {
                output.push_str("...");
            }
            self.write_type(&param.ty, output)?;
        }
        Ok(())
    }
}

/// Renders a type expression against an alias table.
///
/// # Errors
/// Returns `RenderError` if a function signature breaks the variadic
/// placement rule.
pub fn render(node: &TypeNode, aliases: &AliasTable) -> Result<String, RenderError> {
    TypeRenderer::new(aliases).render(node)
}
