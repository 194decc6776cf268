//! Template error and source location types.

use std::fmt;
use thiserror::Error;

/// Where a placeholder marker starts in the template source.
///
/// `offset` is a byte offset; `line` and `column` are 1-based, with columns
/// counted in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl Location {
    /// Locate a byte offset within `source`.
    ///
    /// `offset` must fall on a char boundary.
    pub(crate) fn locate(source: &str, offset: usize) -> Self {
        let before = &source[..offset];
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map_or(0, |nl| nl + 1);
        let column = before[line_start..].chars().count() + 1;

        Self {
            offset,
            line,
            column,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Error type for template parsing and rendering failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// A `${` was found without a matching `}`.
    #[error("unterminated placeholder: '${{' at {location} has no closing '}}'")]
    UnterminatedPlaceholder { location: Location },

    /// The text between `${` and `}` is not an identifier.
    #[error("invalid placeholder name '{name}' at {location}: expected [A-Za-z_][A-Za-z0-9_]*")]
    InvalidPlaceholderName { name: String, location: Location },

    /// A placeholder was referenced but no binding was provided.
    #[error("unbound placeholder '${{{name}}}' at {location}")]
    UnboundPlaceholder { name: String, location: Location },
}

impl TemplateError {
    /// The location of the marker that caused the error.
    pub fn location(&self) -> Location {
        match self {
            TemplateError::UnterminatedPlaceholder { location }
            | TemplateError::InvalidPlaceholderName { location, .. }
            | TemplateError::UnboundPlaceholder { location, .. } => *location,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locate_first_line() {
        let loc = Location::locate("Hello ${name}", 6);
        assert_eq!(loc.offset, 6);
        assert_eq!(loc.line, 1);
        assert_eq!(loc.column, 7);
    }

    #[test]
    fn test_locate_later_line() {
        let loc = Location::locate("first\nsecond\n  ${x}", 15);
        assert_eq!(loc.line, 3);
        assert_eq!(loc.column, 3);
    }

    #[test]
    fn test_locate_counts_chars_not_bytes() {
        // "日本" is six bytes but two columns
        let loc = Location::locate("日本${x}", 6);
        assert_eq!(loc.column, 3);
    }

    #[test]
    fn test_error_display() {
        let location = Location {
            offset: 0,
            line: 1,
            column: 1,
        };

        let err = TemplateError::UnterminatedPlaceholder { location };
        assert_eq!(
            err.to_string(),
            "unterminated placeholder: '${' at line 1, column 1 has no closing '}'"
        );

        let err = TemplateError::UnboundPlaceholder {
            name: "missing".to_string(),
            location,
        };
        assert_eq!(
            err.to_string(),
            "unbound placeholder '${missing}' at line 1, column 1"
        );

        let err = TemplateError::InvalidPlaceholderName {
            name: "a b".to_string(),
            location,
        };
        assert_eq!(
            err.to_string(),
            "invalid placeholder name 'a b' at line 1, column 1: expected [A-Za-z_][A-Za-z0-9_]*"
        );
    }
}
