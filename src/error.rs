//! Error types for scaffold.
//!
//! Uses thiserror for derive macros and provides user-actionable error messages.

use crate::template::TemplateError;
use thiserror::Error;

/// Main error type for scaffold operations.
#[derive(Error, Debug)]
pub enum ScaffoldError {
    /// A standalone template failed to parse or render.
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// One of the entity fragments failed to parse or render.
    #[error("{fragment} template: {source}")]
    Fragment {
        fragment: String,
        #[source]
        source: TemplateError,
    },

    /// Invalid configuration or entity description.
    #[error("{0}")]
    Config(String),
}

impl ScaffoldError {
    /// The underlying template error, if any.
    pub fn template_error(&self) -> Option<&TemplateError> {
        match self {
            ScaffoldError::Template(err) | ScaffoldError::Fragment { source: err, .. } => Some(err),
            ScaffoldError::Config(_) => None,
        }
    }
}

/// Result type alias for scaffold operations.
pub type Result<T> = std::result::Result<T, ScaffoldError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::Location;

    fn origin() -> Location {
        Location {
            offset: 0,
            line: 1,
            column: 1,
        }
    }

    #[test]
    fn template_error_converts_transparently() {
        let inner = TemplateError::UnterminatedPlaceholder { location: origin() };
        let err: ScaffoldError = inner.clone().into();
        assert_eq!(err.to_string(), inner.to_string());
        assert_eq!(err.template_error(), Some(&inner));
    }

    #[test]
    fn fragment_error_names_the_fragment() {
        let err = ScaffoldError::Fragment {
            fragment: "getter".to_string(),
            source: TemplateError::UnboundPlaceholder {
                name: "type".to_string(),
                location: origin(),
            },
        };
        assert_eq!(
            err.to_string(),
            "getter template: unbound placeholder '${type}' at line 1, column 1"
        );
        assert!(err.template_error().is_some());
    }

    #[test]
    fn config_error_has_no_template_error() {
        let err = ScaffoldError::Config("bad entity".to_string());
        assert_eq!(err.to_string(), "bad entity");
        assert!(err.template_error().is_none());
    }
}
