//! Domain-entity scaffolding.
//!
//! This module provides:
//!
//! - **Model**: `EntitySpec` describing the entity, its properties, methods,
//!   events and repository queries
//! - **Templates**: `EntityTemplates`, an outer template plus named
//!   fragments, loaded from YAML over a built-in preset
//! - **Presets**: Java entity, .NET entity, value object and repository,
//!   and Python entity template sets
//! - **Generator**: renders fragments and binds them into the entity template
//!
//! Each fragment is an ordinary flat template. The generator renders it once
//! per row (property, method, event, ...), joins the results and binds the
//! joined text to a placeholder of the entity template, e.g. `${getters}`.

mod generator;
mod model;
mod naming;
mod presets;
mod templates;


pub use generator::EntityGenerator;
pub use model::{EntitySpec, EventSpec, MethodSpec, ParamSpec, PropertySpec, QuerySpec, RuleSpec};
pub use presets::TemplatePreset;
pub use templates::{EntityTemplates, FragmentPart, FragmentTemplate, RowSource};
