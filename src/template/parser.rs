//! Left-to-right scanner splitting a template into segments.

use super::error::{Location, TemplateError};
use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

static IDENTIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier pattern must compile")
});

/// Check whether `name` is a valid placeholder identifier.
pub(crate) fn is_identifier(name: &str) -> bool {
    IDENTIFIER.is_match(name)
}

/// A piece of a parsed template. Ranges index into the template source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Segment {
    /// Text copied verbatim.
    Literal(Range<usize>),
    /// A `${name}` marker. `marker` covers the whole marker.
    Placeholder { marker: Range<usize> },
}

impl Segment {
    /// Byte range of the placeholder name (without `${` and `}`).
    pub(crate) fn name_range(marker: &Range<usize>) -> Range<usize> {
        marker.start + 2..marker.end - 1
    }
}

/// Parse `source` into literal and placeholder segments.
///
/// A `$` not followed by `{` is literal text, as is a lone `}`. Once `${`
/// is seen, everything up to the first `}` is taken as the name.
pub(crate) fn parse(source: &str) -> Result<Vec<Segment>, TemplateError> {
    let mut segments = Vec::new();
    let mut literal_start = 0;
    let mut chars = source.char_indices().peekable();

    while let Some((pos, ch)) = chars.next() {
        if ch != '$' || !matches!(chars.peek(), Some((_, '{'))) {
            continue;
        }
        chars.next(); // consume the {

        let end = loop {
            match chars.next() {
                Some((close, '}')) => break close + 1,
                Some(_) => {}
                None => {
                    return Err(TemplateError::UnterminatedPlaceholder {
                        location: Location::locate(source, pos),
                    });
                }
            }
        };

        let marker = pos..end;
        let name = &source[Segment::name_range(&marker)];
        if !is_identifier(name) {
            return Err(TemplateError::InvalidPlaceholderName {
                name: name.to_string(),
                location: Location::locate(source, pos),
            });
        }

        if literal_start < pos {
            segments.push(Segment::Literal(literal_start..pos));
        }
        segments.push(Segment::Placeholder { marker });
        literal_start = end;
    }

    if literal_start < source.len() {
        segments.push(Segment::Literal(literal_start..source.len()));
    }

    Ok(segments)
}
