//! Entity description model.
//!
//! An `EntitySpec` describes one domain entity (or value object) to
//! scaffold. It is usually written as YAML:
//!
//! ```yaml
//! package: com.example.shop
//! name: Customer
//! description: A registered shop customer.
//! id_type: Long
//! properties:
//!   - name: email
//!     type: String
//!     description: email address
//!     required: true
//!     rules:
//!       - condition: email.isBlank()
//!         message: email must not be blank
//! methods:
//!   - name: changeEmail
//!     parameters:
//!       - name: newEmail
//!         type: String
//!     body: this.email = newEmail;
//!     event: CustomerEmailChanged
//! events:
//!   - name: CustomerEmailChanged
//! ```

use super::naming::{capitalize, lower_first};
use crate::error::{Result, ScaffoldError};
use crate::template::is_identifier;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// A domain entity to scaffold.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntitySpec {
    /// Package, namespace or module the entity lives in.
    pub package: String,

    /// Entity type name (PascalCase).
    pub name: String,

    /// Free-form description placed in the entity's doc comment.
    pub description: String,

    /// Identifier type, e.g. `UUID` or `Guid`. Falls back to the template
    /// set's `id_type` default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_type: Option<String>,

    /// Base class (entity or value-object base).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,

    /// Expression producing a fresh identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_assignment: Option<String>,

    /// Plural name used for collections; derived from `name` when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plural: Option<String>,

    pub properties: Vec<PropertySpec>,

    pub methods: Vec<MethodSpec>,

    /// Domain events the entity raises.
    pub events: Vec<EventSpec>,

    /// Custom repository queries.
    pub queries: Vec<QuerySpec>,

    /// Navigation properties eagerly loaded by the repository.
    pub navigations: Vec<String>,

    /// Additional bindings for custom templates (e.g. `author`). They never
    /// override the generated bindings.
    pub extra: BTreeMap<String, String>,
}

/// A single entity property.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropertySpec {
    pub name: String,

    /// Type name as written in the target language.
    #[serde(rename = "type")]
    pub type_name: String,

    pub description: String,

    /// Required properties get a null/empty check.
    pub required: bool,

    /// Invariants checked when the entity is constructed.
    pub rules: Vec<RuleSpec>,
}

/// A guard: raise `message` when `condition` holds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSpec {
    /// Parameter the rule is about. Property rules default to the property.
    pub param: String,
    pub condition: String,
    pub message: String,
}

/// A business method carried into the entity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MethodSpec {
    pub name: String,

    pub description: String,

    /// Falls back to the template set's `return_type` default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_type: Option<String>,

    pub return_description: String,

    /// Documentation of raised errors.
    pub raises: String,

    pub parameters: Vec<ParamSpec>,

    pub preconditions: Vec<RuleSpec>,

    pub body: String,

    /// Event raised by the method; `<Entity><Method>Event` when empty.
    pub event: String,
}

/// A method parameter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParamSpec {
    pub name: String,

    #[serde(rename = "type")]
    pub type_name: String,

    pub description: String,
}

/// A domain event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventSpec {
    pub name: String,
    pub description: String,
}

/// A custom repository query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuerySpec {
    pub name: String,
    pub description: String,
    pub return_type: String,
    /// Parameter list as written between the parentheses.
    pub params: String,
    /// Filter expression over `e`.
    pub condition: String,
    /// Optional projection clause, e.g. `.Select(e => e.Name)`.
    pub projection: String,
}

impl PropertySpec {
    /// `email` -> `Email`.
    pub fn pascal_name(&self) -> String {
        capitalize(&self.name)
    }

    /// Name used for constructor/factory parameters: `Email` -> `email`.
    pub fn param_name(&self) -> String {
        lower_first(&self.name)
    }

    /// The description, or the property name when empty.
    pub fn description_or_default(&self) -> String {
        if self.description.trim().is_empty() {
            self.name.clone()
        } else {
            self.description.clone()
        }
    }
}

impl MethodSpec {
    /// The event the method raises.
    pub fn event_name(&self, entity: &EntitySpec) -> String {
        if self.event.trim().is_empty() {
            format!("{}{}Event", entity.name, capitalize(&self.name))
        } else {
            self.event.clone()
        }
    }
}

impl EntitySpec {
    /// Parse an entity from a YAML string and validate it.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let entity: EntitySpec = serde_yaml::from_str(yaml)
            .map_err(|e| ScaffoldError::Config(format!("failed to parse entity YAML: {}", e)))?;

        entity.validate()?;
        Ok(entity)
    }

    /// Parse an entity from a JSON string and validate it.
    pub fn from_json(json: &str) -> Result<Self> {
        let entity: EntitySpec = serde_json::from_str(json)
            .map_err(|e| ScaffoldError::Config(format!("failed to parse entity JSON: {}", e)))?;

        entity.validate()?;
        Ok(entity)
    }

    /// Serialize the entity to a YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| {
            ScaffoldError::Config(format!("failed to serialize entity to YAML: {}", e))
        })
    }

    /// Validate the entity description.
    ///
    /// Validation rules:
    /// - `package` must be non-empty
    /// - the entity name and every property, method, parameter, event,
    ///   query and navigation name must be an identifier
    /// - property names must be unique
    /// - properties and parameters must have a type; queries a return type
    /// - every rule and precondition must have a condition
    pub fn validate(&self) -> Result<()> {
        if self.package.trim().is_empty() {
            return Err(invalid("package must be non-empty".to_string()));
        }

        check_identifier("entity", &self.name, &self.name)?;

        let mut seen = HashSet::new();
        for property in &self.properties {
            check_identifier("property", &property.name, &self.name)?;
            if property.type_name.trim().is_empty() {
                return Err(invalid(format!(
                    "property '{}.{}' has no type",
                    self.name, property.name
                )));
            }
            if !seen.insert(property.name.as_str()) {
                return Err(invalid(format!(
                    "duplicate property '{}' in {}",
                    property.name, self.name
                )));
            }
            check_rules(&property.rules, &property.name, &self.name)?;
        }

        for method in &self.methods {
            check_identifier("method", &method.name, &self.name)?;
            for param in &method.parameters {
                check_identifier("parameter", &param.name, &self.name)?;
                if param.type_name.trim().is_empty() {
                    return Err(invalid(format!(
                        "parameter '{}' of {}.{} has no type",
                        param.name, self.name, method.name
                    )));
                }
            }
            check_rules(&method.preconditions, &method.name, &self.name)?;
        }

        for event in &self.events {
            check_identifier("event", &event.name, &self.name)?;
        }

        for query in &self.queries {
            check_identifier("query", &query.name, &self.name)?;
            if query.return_type.trim().is_empty() {
                return Err(invalid(format!(
                    "query '{}.{}' has no return type",
                    self.name, query.name
                )));
            }
        }

        for navigation in &self.navigations {
            check_identifier("navigation", navigation, &self.name)?;
        }

        Ok(())
    }

    /// Properties that get a required-value check.
    pub fn required_properties(&self) -> impl Iterator<Item = &PropertySpec> {
        self.properties.iter().filter(|p| p.required)
    }
}

fn invalid(detail: String) -> ScaffoldError {
    ScaffoldError::Config(format!("entity validation failed: {}", detail))
}

fn check_identifier(kind: &str, name: &str, entity: &str) -> Result<()> {
    if is_identifier(name) {
        return Ok(());
    }
    if kind == "entity" {
        Err(invalid(format!("'{}' is not a valid entity name", name)))
    } else {
        Err(invalid(format!(
            "'{}' is not a valid {} name in {}",
            name, kind, entity
        )))
    }
}

fn check_rules(rules: &[RuleSpec], owner: &str, entity: &str) -> Result<()> {
    for rule in rules {
        if rule.condition.trim().is_empty() {
            return Err(invalid(format!(
                "rule on '{}.{}' has no condition",
                entity, owner
            )));
        }
    }
    Ok(())
}
