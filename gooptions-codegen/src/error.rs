//! Error types for code generation.

use std::path::PathBuf;
use thiserror::Error;

/// Error type for code generation operations.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// Descriptor parsing error.
    #[error("descriptor parse error: {0}")]
    Parse(#[from] gooptions_schema::ParseError),

    /// Record extraction or modelling error.
    #[error("schema error: {0}")]
    Schema(#[from] gooptions_schema::SchemaError),

    /// Type rendering error.
    #[error("render error: {0}")]
    Render(#[from] RenderError),

    /// Destination could not be written.
    #[error("failed to write '{}': {source}", path.display())]
    Output {
        /// Destination path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Code generation error.
    #[error("generation error: {message}")]
    Generation {
        /// Error message.
        message: String,
    },
}

impl CodegenError {
    /// Creates a generation error with the given message.
    pub fn generation(message: impl Into<String>) -> Self {
        Self::Generation {
            message: message.into(),
        }
    }

    /// Creates an output error for the given destination.
    pub fn output(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Output {
            path: path.into(),
            source,
        }
    }
}

/// Error type for type rendering.
///
/// Validated records never produce these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// A variadic input parameter that is not the last one.
    #[error("variadic parameter at position {position} of {count} is not last")]
    VariadicNotLast {
        /// Zero-based parameter position.
        position: usize,
        /// Number of input parameters.
        count: usize,
    },

    /// A variadic result parameter.
    #[error("variadic result parameter at position {position}")]
    VariadicResult {
        /// Zero-based result position.
        position: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_error_names_path() {
        let err = CodegenError::output(
            "/tmp/out/user_options.go",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(
            err.to_string(),
            "failed to write '/tmp/out/user_options.go': denied"
        );
    }

    #[test]
    fn test_render_error_wraps() {
        let err: CodegenError = RenderError::VariadicNotLast {
            position: 0,
            count: 2,
        }
        .into();
        assert!(err.to_string().starts_with("render error: variadic parameter"));
    }
}
