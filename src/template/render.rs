//! Rendering parsed templates against bindings.

use super::Template;
use super::bindings::Bindings;
use super::error::{Location, TemplateError};
use super::parser::Segment;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// What to do with a placeholder that has no binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UnboundPolicy {
    /// Abort rendering with `TemplateError::UnboundPlaceholder` (default).
    #[default]
    Fail,
    /// Copy the `${name}` marker into the output unchanged.
    Keep,
}

impl UnboundPolicy {
    /// Parse a policy from a string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "fail" => Some(Self::Fail),
            "keep" => Some(Self::Keep),
            _ => None,
        }
    }
}

/// Renders templates under a fixed `UnboundPolicy`.
///
/// A `Renderer` holds only its settings; it can be shared freely between
/// threads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Renderer {
    policy: UnboundPolicy,
    indent_values: bool,
}

impl Renderer {
    /// A renderer that fails on unbound placeholders.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: UnboundPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// Indent multi-line values to match their placeholder.
    ///
    /// When a placeholder is preceded on its line by whitespace only, every
    /// following non-empty line of the value gets that same whitespace
    /// prefix. Off by default, in which case values are inserted verbatim.
    pub fn with_indented_values(mut self, indent_values: bool) -> Self {
        self.indent_values = indent_values;
        self
    }

    pub fn policy(&self) -> UnboundPolicy {
        self.policy
    }

    pub fn indents_values(&self) -> bool {
        self.indent_values
    }

    /// Parse `template` and render it in one step.
    pub fn render(&self, template: &str, bindings: &Bindings) -> Result<String, TemplateError> {
        self.render_template(&Template::parse(template)?, bindings)
    }

    /// Render an already parsed template.
    ///
    /// Rendering is all-or-nothing: on error no partial output is returned.
    pub fn render_template(
        &self,
        template: &Template,
        bindings: &Bindings,
    ) -> Result<String, TemplateError> {
        debug!(
            placeholders = template.placeholder_count(),
            bindings = bindings.len(),
            policy = ?self.policy,
            "rendering template"
        );

        let source = template.source();
        let mut result = String::with_capacity(source.len());

        for segment in template.segments() {
            match segment {
                Segment::Literal(range) => result.push_str(&source[range.clone()]),
                Segment::Placeholder { marker } => {
                    let name = &source[Segment::name_range(marker)];
                    match (bindings.get(name), self.policy) {
                        (Some(value), _) if self.indent_values => {
                            push_indented(&mut result, value)
                        }
                        (Some(value), _) => result.push_str(value),
                        (None, UnboundPolicy::Fail) => {
                            return Err(TemplateError::UnboundPlaceholder {
                                name: name.to_string(),
                                location: Location::locate(source, marker.start),
                            });
                        }
                        (None, UnboundPolicy::Keep) => {
                            let location = Location::locate(source, marker.start);
                            warn!(%name, %location, "leaving unbound placeholder in output");
                            result.push_str(&source[marker.clone()]);
                        }
                    }
                }
            }
        }

        Ok(result)
    }
}

/// Append `value`, prefixing its continuation lines with the whitespace
/// that precedes the placeholder on the current output line.
fn push_indented(result: &mut String, value: &str) {
    let line_start = result.rfind('\n').map_or(0, |nl| nl + 1);
    let prefix = &result[line_start..];
    if prefix.is_empty() || !prefix.chars().all(|c| c == ' ' || c == '\t') {
        result.push_str(value);
        return;
    }

    let prefix = prefix.to_string();
    for (i, line) in value.split('\n').enumerate() {
        if i > 0 {
            result.push('\n');
            if !line.is_empty() {
                result.push_str(&prefix);
            }
        }
        result.push_str(line);
    }
}

/// Render a template string by substituting `${name}` placeholders.
///
/// Unbound placeholders are an error. Use [`Renderer::with_policy`] to keep
/// them in the output instead.
///
/// # Examples
///
/// ```
/// use scaffold::{Bindings, render};
///
/// let bindings = Bindings::from([("name", "Alice"), ("id", "42")]);
/// let result = render("Hello ${name}, id=${id}", &bindings).unwrap();
/// assert_eq!(result, "Hello Alice, id=42");
/// ```
pub fn render(template: &str, bindings: &Bindings) -> Result<String, TemplateError> {
    Renderer::new().render(template, bindings)
}
