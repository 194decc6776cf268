//! Template engine for flat placeholder substitution.
//!
//! # Syntax
//!
//! - `${name}` - Substitutes the value bound to `name`, where `name`
//!   matches `[A-Za-z_][A-Za-z0-9_]*`
//! - `$` not followed by `{`, and a lone `}`, are plain text
//!
//! There are no escapes, defaults, conditionals or nested markers. Bound
//! values are inserted as-is and never scanned for further placeholders.
//!
//! # Error Handling
//!
//! An unterminated `${` or a malformed name fails at parse time. Unbound
//! placeholders fail at render time unless the renderer was built with
//! [`UnboundPolicy::Keep`].

mod bindings;
mod compose;
mod error;
mod parser;
mod render;


pub use bindings::Bindings;
pub use compose::render_each;
pub use error::{Location, TemplateError};
pub use render::{Renderer, UnboundPolicy, render};

pub(crate) use parser::is_identifier;

use parser::Segment;
use std::fmt;
use std::str::FromStr;

/// A parsed, immutable template.
///
/// Parse once with [`Template::parse`] and render as many times as needed.
///
/// # Examples
///
/// ```
/// use scaffold::{Bindings, Template};
///
/// let template = Template::parse("${a}${a}").unwrap();
/// assert_eq!(template.placeholders(), vec!["a"]);
///
/// let result = template.render(&Bindings::from([("a", "x")])).unwrap();
/// assert_eq!(result, "xx");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
    segments: Vec<Segment>,
}

impl Template {
    /// Parse template text.
    ///
    /// # Returns
    ///
    /// * `Ok(Template)` - The parsed template
    /// * `Err(TemplateError)` - An unterminated marker or invalid name
    pub fn parse(source: impl Into<String>) -> Result<Self, TemplateError> {
        let source = source.into();
        let segments = parser::parse(&source)?;
        Ok(Self { source, segments })
    }

    /// The original template text.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Unique placeholder names in order of first appearance.
    pub fn placeholders(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for name in self.placeholder_names() {
            if !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }

    /// Placeholder names (unique, first-appearance order) that `bindings`
    /// does not cover.
    pub fn unbound(&self, bindings: &Bindings) -> Vec<&str> {
        self.placeholders()
            .into_iter()
            .filter(|name| !bindings.contains(name))
            .collect()
    }

    /// Render with the default fail-fast policy.
    pub fn render(&self, bindings: &Bindings) -> Result<String, TemplateError> {
        Renderer::new().render_template(self, bindings)
    }

    /// Render with an explicit unbound-placeholder policy.
    pub fn render_with(
        &self,
        bindings: &Bindings,
        policy: UnboundPolicy,
    ) -> Result<String, TemplateError> {
        Renderer::with_policy(policy).render_template(self, bindings)
    }

    /// Number of placeholder markers, counting repeats.
    pub(crate) fn placeholder_count(&self) -> usize {
        self.placeholder_names().count()
    }

    pub(crate) fn segments(&self) -> &[Segment] {
        &self.segments
    }

    fn placeholder_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Placeholder { marker } => Some(&self.source[Segment::name_range(marker)]),
            Segment::Literal(_) => None,
        })
    }
}

impl FromStr for Template {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
