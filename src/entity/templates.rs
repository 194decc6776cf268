//! Entity template sets.
//!
//! A template set is an outer `entity` template plus named fragments. Each
//! fragment is rendered once per row of some [`RowSource`] and the joined
//! output is bound into the entity template under the fragment's name, e.g.
//! the `getters` fragment fills `${getters}`.
//!
//! Fragments whose rows are method parameters or preconditions are rendered
//! per method instead and bound into each method row, so a `methods`
//! fragment can use `${method_params}`.
//!
//! A YAML template set starts from a [`TemplatePreset`] and overrides parts
//! of it:
//!
//! ```yaml
//! preset: dotnet_entity
//! defaults:
//!   id_type: long
//! fragments:
//!   domain_events: ~          # drop a preset fragment
//!   summary:
//!     separator: ", "
//!     parts:
//!       - rows: properties
//!         template: "${PropertyName}"
//! ```

use super::presets::TemplatePreset;
use crate::error::{Result, ScaffoldError};
use crate::template::{Template, UnboundPolicy, is_identifier};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Where a fragment part takes its rows from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowSource {
    /// Every property, in order.
    Properties,
    /// Properties marked `required`.
    RequiredProperties,
    /// One row per rule of every property.
    PropertyRules,
    Methods,
    Events,
    /// Repository queries.
    Queries,
    /// Navigation properties.
    Navigations,
    /// Parameters of the current method.
    Parameters,
    /// Preconditions of the current method.
    Preconditions,
}

impl RowSource {
    /// Parse a row source from a string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "properties" => Some(Self::Properties),
            "required_properties" => Some(Self::RequiredProperties),
            "property_rules" => Some(Self::PropertyRules),
            "methods" => Some(Self::Methods),
            "events" => Some(Self::Events),
            "queries" => Some(Self::Queries),
            "navigations" => Some(Self::Navigations),
            "parameters" => Some(Self::Parameters),
            "preconditions" => Some(Self::Preconditions),
            _ => None,
        }
    }

    /// Rows that only exist inside a method.
    pub fn is_method_scoped(self) -> bool {
        matches!(self, Self::Parameters | Self::Preconditions)
    }
}

/// One template rendered over one row source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FragmentPart {
    pub rows: RowSource,
    pub template: String,
}

/// A named fragment: one or more parts, joined by `separator`.
///
/// Each part is rendered over its rows with `separator` between rows; the
/// non-empty part outputs are then joined with the same separator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FragmentTemplate {
    #[serde(default = "default_separator")]
    pub separator: String,

    #[serde(default)]
    pub parts: Vec<FragmentPart>,
}

fn default_separator() -> String {
    "\n".to_string()
}

impl FragmentTemplate {
    /// A fragment with no parts yet.
    pub fn new(separator: impl Into<String>) -> Self {
        Self {
            separator: separator.into(),
            parts: Vec::new(),
        }
    }

    /// A fragment with a single part.
    pub fn single(
        rows: RowSource,
        template: impl Into<String>,
        separator: impl Into<String>,
    ) -> Self {
        Self::new(separator).with_part(rows, template)
    }

    /// Builder-style part append.
    pub fn with_part(mut self, rows: RowSource, template: impl Into<String>) -> Self {
        self.parts.push(FragmentPart {
            rows,
            template: template.into(),
        });
        self
    }

    /// Whether the fragment is rendered per method.
    pub fn is_method_scoped(&self) -> bool {
        self.parts.first().is_some_and(|p| p.rows.is_method_scoped())
    }
}

/// A complete template set used to scaffold one kind of file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityTemplates {
    /// The preset this set was derived from.
    pub preset: TemplatePreset,

    /// The outer file template.
    pub entity: String,

    /// Fragments by binding name.
    pub fragments: BTreeMap<String, FragmentTemplate>,

    /// Fallback bindings, used when neither the entity nor its extras bind
    /// the name (e.g. `id_type`).
    pub defaults: BTreeMap<String, String>,

    /// Applied to every template when rendering.
    pub unbound: UnboundPolicy,

    /// Indent multi-line values to their placeholder's column.
    pub indent_values: bool,
}

impl Default for EntityTemplates {
    fn default() -> Self {
        TemplatePreset::default().templates()
    }
}

impl From<TemplatePreset> for EntityTemplates {
    fn from(preset: TemplatePreset) -> Self {
        preset.templates()
    }
}

/// The YAML form: a preset plus overrides. Every field is optional and
/// unknown fields are ignored.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct TemplateOverrides {
    preset: TemplatePreset,

    #[serde(skip_serializing_if = "Option::is_none")]
    entity: Option<String>,

    /// `~` removes a preset fragment.
    fragments: BTreeMap<String, Option<FragmentTemplate>>,

    defaults: BTreeMap<String, String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    unbound: Option<UnboundPolicy>,

    #[serde(skip_serializing_if = "Option::is_none")]
    indent_values: Option<bool>,
}

impl TemplateOverrides {
    fn apply(self) -> EntityTemplates {
        let mut templates = self.preset.templates();

        if let Some(entity) = self.entity {
            templates.entity = entity;
        }
        for (name, fragment) in self.fragments {
            match fragment {
                Some(fragment) => {
                    templates.fragments.insert(name, fragment);
                }
                None => {
                    templates.fragments.remove(&name);
                }
            }
        }
        templates.defaults.extend(self.defaults);
        if let Some(unbound) = self.unbound {
            templates.unbound = unbound;
        }
        if let Some(indent_values) = self.indent_values {
            templates.indent_values = indent_values;
        }

        templates
    }
}

/// The parsed form of an `EntityTemplates` set.
#[derive(Debug, Clone)]
pub(crate) struct CompiledTemplates {
    pub entity: Template,
    pub fragments: Vec<CompiledFragment>,
}

#[derive(Debug, Clone)]
pub(crate) struct CompiledFragment {
    pub name: String,
    pub separator: String,
    pub method_scoped: bool,
    pub parts: Vec<(RowSource, Template)>,
}

impl EntityTemplates {
    /// Parse a template set from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let overrides: TemplateOverrides = serde_yaml::from_str(yaml).map_err(|e| {
            ScaffoldError::Config(format!("failed to parse entity templates YAML: {}", e))
        })?;

        let templates = overrides.apply();
        templates.validate()?;
        Ok(templates)
    }

    /// Serialize the template set to a YAML string.
    ///
    /// The output names the preset and spells out every template, so it
    /// loads back to an equal set.
    pub fn to_yaml(&self) -> Result<String> {
        let mut fragments: BTreeMap<String, Option<FragmentTemplate>> = self
            .fragments
            .iter()
            .map(|(name, fragment)| (name.clone(), Some(fragment.clone())))
            .collect();
        for name in self.preset.templates().fragments.into_keys() {
            fragments.entry(name).or_insert(None);
        }

        let overrides = TemplateOverrides {
            preset: self.preset,
            entity: Some(self.entity.clone()),
            fragments,
            defaults: self.defaults.clone(),
            unbound: Some(self.unbound),
            indent_values: Some(self.indent_values),
        };

        serde_yaml::to_string(&overrides).map_err(|e| {
            ScaffoldError::Config(format!("failed to serialize entity templates to YAML: {}", e))
        })
    }

    /// Check that every template parses and every fragment is well formed.
    pub fn validate(&self) -> Result<()> {
        self.compile().map(|_| ())
    }

    pub(crate) fn compile(&self) -> Result<CompiledTemplates> {
        let entity = Template::parse(self.entity.as_str()).map_err(|source| {
            ScaffoldError::Fragment {
                fragment: "entity".to_string(),
                source,
            }
        })?;

        let mut fragments = Vec::with_capacity(self.fragments.len());
        for (name, fragment) in &self.fragments {
            fragments.push(compile_fragment(name, fragment)?);
        }

        Ok(CompiledTemplates { entity, fragments })
    }
}

fn compile_fragment(name: &str, fragment: &FragmentTemplate) -> Result<CompiledFragment> {
    if !is_identifier(name) {
        return Err(ScaffoldError::Config(format!(
            "entity templates validation failed: '{}' is not a valid fragment name",
            name
        )));
    }

    let method_scoped = fragment.is_method_scoped();
    let mut parts = Vec::with_capacity(fragment.parts.len());
    for part in &fragment.parts {
        if part.rows.is_method_scoped() != method_scoped {
            return Err(ScaffoldError::Config(format!(
                "entity templates validation failed: fragment '{}' mixes method rows with entity rows",
                name
            )));
        }
        let template =
            Template::parse(part.template.as_str()).map_err(|source| ScaffoldError::Fragment {
                fragment: name.to_string(),
                source,
            })?;
        parts.push((part.rows, template));
    }

    Ok(CompiledFragment {
        name: name.to_string(),
        separator: fragment.separator.clone(),
        method_scoped,
        parts,
    })
}
