//! Fragment composition.
//!
//! A fragment is a template rendered once per row of bindings. The joined
//! output is then bound into an outer template by the caller, e.g. one
//! property fragment per entity property bound as `${properties}`.

use super::bindings::Bindings;
use super::error::TemplateError;
use super::render::Renderer;
use super::Template;

/// Render `template` once per row and join the results with `separator`.
///
/// Returns an empty string when there are no rows. The first failing row
/// aborts the whole call.
///
/// # Examples
///
/// ```
/// use scaffold::{Bindings, Template, render_each};
///
/// let item = Template::parse("- ${name}\n").unwrap();
/// let rows = [Bindings::from([("name", "a")]), Bindings::from([("name", "b")])];
/// assert_eq!(render_each(&item, &rows, "").unwrap(), "- a\n- b\n");
/// ```
pub fn render_each<'a, I>(
    template: &Template,
    rows: I,
    separator: &str,
) -> Result<String, TemplateError>
where
    I: IntoIterator<Item = &'a Bindings>,
{
    Renderer::new().render_each(template, rows, separator)
}

impl Renderer {
    /// Policy-aware variant of [`render_each`].
    pub fn render_each<'a, I>(
        &self,
        template: &Template,
        rows: I,
        separator: &str,
    ) -> Result<String, TemplateError>
    where
        I: IntoIterator<Item = &'a Bindings>,
    {
        let mut result = String::new();
        for (i, row) in rows.into_iter().enumerate() {
            if i > 0 {
                result.push_str(separator);
            }
            result.push_str(&self.render_template(template, row)?);
        }
        Ok(result)
    }
}
