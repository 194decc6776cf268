//! Entity source generation.
//!
//! Fragments are rendered first and joined, then bound into the entity
//! template as plain values. Nothing is expanded recursively.
//!
//! Bindings available to every template:
//!
//! - entity: `package`, `namespace`, `module` (all the package),
//!   `entity_name`, `vo_name`, `entity_name_snake`, `entity_name_plural`,
//!   `entity_description`, `vo_description`, `id_type`, `entity_base`,
//!   `vo_base`, `id_assignment`, plus `extra` keys and template defaults
//! - property rows: `property_name`, `PropertyName`, `param_name`,
//!   `property_type`, `property_description`, `other_properties`,
//!   `with_arguments`; rule rows add `condition` and `message`
//! - method rows: `method_name`, `MethodName`, `method_description`,
//!   `return_type`, `return_description`, `raises_doc`, `method_body`,
//!   `event_name`, plus every method-scoped fragment
//! - parameter rows: `param_name`, `param_type`, `param_description`;
//!   precondition rows: `param_name`, `condition`, `message`
//! - event rows: `event_name`, `event_description`
//! - query rows: `method_name`, `MethodName`, `method_description`,
//!   `return_type`, `params`, `condition`, `projection`
//! - navigation rows: `navigation_property`
//!
//! The outer entity template also sees every entity-level fragment.

use super::model::{EntitySpec, MethodSpec, PropertySpec, RuleSpec};
use super::naming::{capitalize, pluralize, snake_case};
use super::templates::{CompiledFragment, CompiledTemplates, EntityTemplates, RowSource};
use crate::error::{Result, ScaffoldError};
use crate::template::{Bindings, Renderer};
use std::collections::BTreeMap;
use tracing::debug;

/// Renders entity source files from a parsed template set.
///
/// Templates are parsed once in [`EntityGenerator::new`]; `generate` can be
/// called for any number of entities.
///
/// # Examples
///
/// ```
/// use scaffold::entity::{EntityGenerator, EntitySpec, EntityTemplates};
///
/// let entity = EntitySpec::from_yaml(r#"
/// package: com.example
/// name: Tag
/// properties:
///   - name: label
///     type: String
///     required: true
/// "#).unwrap();
///
/// let generator = EntityGenerator::new(&EntityTemplates::default()).unwrap();
/// let source = generator.generate(&entity).unwrap();
/// assert!(source.starts_with("package com.example.domain.entities;"));
/// assert!(source.contains("public class Tag extends Entity<UUID> {"));
/// assert!(source.contains("public String getLabel()"));
/// ```
#[derive(Debug, Clone)]
pub struct EntityGenerator {
    templates: CompiledTemplates,
    defaults: BTreeMap<String, String>,
    renderer: Renderer,
}

impl EntityGenerator {
    /// Parse every template in `templates`.
    ///
    /// # Returns
    ///
    /// * `Ok(EntityGenerator)` - All templates parsed
    /// * `Err(ScaffoldError::Fragment)` - Names the template that failed
    /// * `Err(ScaffoldError::Config)` - A malformed fragment
    pub fn new(templates: &EntityTemplates) -> Result<Self> {
        Ok(Self {
            templates: templates.compile()?,
            defaults: templates.defaults.clone(),
            renderer: Renderer::with_policy(templates.unbound)
                .with_indented_values(templates.indent_values),
        })
    }

    /// Render the source file for `entity`.
    ///
    /// The entity is validated first. Rendering is all-or-nothing.
    pub fn generate(&self, entity: &EntitySpec) -> Result<String> {
        entity.validate()?;

        debug!(
            entity = %entity.name,
            package = %entity.package,
            properties = entity.properties.len(),
            methods = entity.methods.len(),
            fragments = self.templates.fragments.len(),
            "generating entity"
        );

        let base = self.base_bindings(entity);
        let mut bindings = base.clone();
        for fragment in self.templates.fragments.iter().filter(|f| !f.method_scoped) {
            let value =
                self.render_fragment(fragment, |source| self.entity_rows(source, entity, &base))?;
            debug!(fragment = %fragment.name, bytes = value.len(), "rendered fragment");
            bindings.insert(fragment.name.as_str(), value);
        }

        self.renderer
            .render_template(&self.templates.entity, &bindings)
            .map_err(|source| ScaffoldError::Fragment {
                fragment: "entity".to_string(),
                source,
            })
    }

    /// Render each part over its rows, then join the non-empty outputs.
    fn render_fragment<F>(&self, fragment: &CompiledFragment, rows_for: F) -> Result<String>
    where
        F: Fn(RowSource) -> Result<Vec<Bindings>>,
    {
        let mut outputs = Vec::with_capacity(fragment.parts.len());
        for (row_source, template) in &fragment.parts {
            let rows = rows_for(*row_source)?;
            let output = self
                .renderer
                .render_each(template, &rows, &fragment.separator)
                .map_err(|source| ScaffoldError::Fragment {
                    fragment: fragment.name.clone(),
                    source,
                })?;
            if !output.is_empty() {
                outputs.push(output);
            }
        }
        Ok(outputs.join(&fragment.separator))
    }

    fn base_bindings(&self, entity: &EntitySpec) -> Bindings {
        let plural = entity
            .plural
            .clone()
            .unwrap_or_else(|| pluralize(&entity.name));

        let mut bindings = Bindings::new()
            .with("package", entity.package.as_str())
            .with("namespace", entity.package.as_str())
            .with("module", entity.package.as_str())
            .with("entity_name", entity.name.as_str())
            .with("vo_name", entity.name.as_str())
            .with("entity_name_snake", snake_case(&entity.name))
            .with("entity_name_plural", plural)
            .with("entity_description", entity.description.as_str())
            .with("vo_description", entity.description.as_str());
        if let Some(id_type) = &entity.id_type {
            bindings.insert("id_type", id_type.as_str());
        }
        if let Some(base) = &entity.base {
            bindings.insert("entity_base", base.as_str());
            bindings.insert("vo_base", base.as_str());
        }
        if let Some(id_assignment) = &entity.id_assignment {
            bindings.insert("id_assignment", id_assignment.as_str());
        }

        for (name, value) in &entity.extra {
            bindings.insert_if_absent(name.as_str(), value.as_str());
        }
        for (name, value) in &self.defaults {
            bindings.insert_if_absent(name.as_str(), value.as_str());
        }
        bindings
    }

    fn entity_rows(
        &self,
        source: RowSource,
        entity: &EntitySpec,
        base: &Bindings,
    ) -> Result<Vec<Bindings>> {
        let rows: Vec<Bindings> = match source {
            RowSource::Properties => entity
                .properties
                .iter()
                .map(|p| property_row(base, entity, p))
                .collect(),
            RowSource::RequiredProperties => entity
                .required_properties()
                .map(|p| property_row(base, entity, p))
                .collect(),
            RowSource::PropertyRules => entity
                .properties
                .iter()
                .flat_map(|p| {
                    let row = property_row(base, entity, p);
                    p.rules.iter().map(move |rule| rule_row(&row, rule))
                })
                .collect(),
            RowSource::Methods => {
                let mut rows = Vec::with_capacity(entity.methods.len());
                for method in &entity.methods {
                    rows.push(self.method_row(base, entity, method)?);
                }
                rows
            }
            RowSource::Events => entity
                .events
                .iter()
                .map(|event| {
                    base.clone()
                        .with("event_name", event.name.as_str())
                        .with("event_description", or_name(&event.description, &event.name))
                })
                .collect(),
            RowSource::Queries => entity
                .queries
                .iter()
                .map(|query| {
                    base.clone()
                        .with("method_name", query.name.as_str())
                        .with("MethodName", capitalize(&query.name))
                        .with("method_description", or_name(&query.description, &query.name))
                        .with("return_type", query.return_type.as_str())
                        .with("params", query.params.as_str())
                        .with("condition", query.condition.as_str())
                        .with("projection", query.projection.as_str())
                })
                .collect(),
            RowSource::Navigations => entity
                .navigations
                .iter()
                .map(|navigation| base.clone().with("navigation_property", navigation.as_str()))
                .collect(),
            // Only reachable from method-scoped fragments.
            RowSource::Parameters | RowSource::Preconditions => Vec::new(),
        };
        Ok(rows)
    }

    /// A method row, including every method-scoped fragment.
    fn method_row(
        &self,
        base: &Bindings,
        entity: &EntitySpec,
        method: &MethodSpec,
    ) -> Result<Bindings> {
        let mut row = base
            .clone()
            .with("method_name", method.name.as_str())
            .with("MethodName", capitalize(&method.name))
            .with("method_description", or_name(&method.description, &method.name))
            .with("return_description", method.return_description.as_str())
            .with("raises_doc", method.raises.as_str())
            .with("method_body", method.body.as_str())
            .with("event_name", method.event_name(entity));
        if let Some(return_type) = &method.return_type {
            row.insert("return_type", return_type.as_str());
        }

        let mut scoped = Vec::new();
        for fragment in self.templates.fragments.iter().filter(|f| f.method_scoped) {
            let value =
                self.render_fragment(fragment, |source| Ok(method_rows(source, &row, method)))?;
            scoped.push((fragment.name.as_str(), value));
        }
        row.extend(scoped);
        Ok(row)
    }
}

fn property_row(base: &Bindings, entity: &EntitySpec, property: &PropertySpec) -> Bindings {
    let others: Vec<String> = entity
        .properties
        .iter()
        .filter(|p| p.name != property.name)
        .map(PropertySpec::pascal_name)
        .collect();
    let with_arguments: Vec<String> = entity
        .properties
        .iter()
        .map(|p| {
            if p.name == property.name {
                format!("new{}", p.pascal_name())
            } else {
                p.pascal_name()
            }
        })
        .collect();

    base.clone()
        .with("property_name", property.name.as_str())
        .with("PropertyName", property.pascal_name())
        .with("param_name", property.param_name())
        .with("property_type", property.type_name.as_str())
        .with("property_description", property.description_or_default())
        .with("other_properties", others.join(", "))
        .with("with_arguments", with_arguments.join(", "))
}

fn rule_row(row: &Bindings, rule: &RuleSpec) -> Bindings {
    let mut row = row
        .clone()
        .with("condition", rule.condition.as_str())
        .with("message", rule.message.as_str());
    if !rule.param.is_empty() {
        row.insert("param_name", rule.param.as_str());
    }
    row
}

fn method_rows(source: RowSource, row: &Bindings, method: &MethodSpec) -> Vec<Bindings> {
    match source {
        RowSource::Parameters => method
            .parameters
            .iter()
            .map(|param| {
                row.clone()
                    .with("param_name", param.name.as_str())
                    .with("param_type", param.type_name.as_str())
                    .with("param_description", or_name(&param.description, &param.name))
            })
            .collect(),
        RowSource::Preconditions => method
            .preconditions
            .iter()
            .map(|rule| {
                row.clone()
                    .with("param_name", rule.param.as_str())
                    .with("condition", rule.condition.as_str())
                    .with("message", rule.message.as_str())
            })
            .collect(),
        // Entity-level sources never appear in a method-scoped fragment.
        _ => Vec::new(),
    }
}

fn or_name(description: &str, name: &str) -> String {
    if description.trim().is_empty() {
        name.to_string()
    } else {
        description.to_string()
    }
}
