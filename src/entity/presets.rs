//! Built-in template sets.
//!
//! Each preset is a complete [`EntityTemplates`] for one target layout:
//! a Java entity, a .NET entity, value object or repository, or a Python
//! dataclass entity.

use super::templates::{EntityTemplates, FragmentTemplate, RowSource};
use crate::template::UnboundPolicy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A built-in template set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TemplatePreset {
    /// Java entity with JPA constructor and domain events (default).
    #[default]
    JavaEntity,
    /// C# entity class.
    DotnetEntity,
    /// C# sealed value object.
    DotnetValueObject,
    /// C# repository interface and EF Core implementation.
    DotnetRepository,
    /// Python dataclass entity.
    PythonEntity,
}

impl TemplatePreset {
    /// Every preset, in declaration order.
    pub const ALL: [TemplatePreset; 5] = [
        Self::JavaEntity,
        Self::DotnetEntity,
        Self::DotnetValueObject,
        Self::DotnetRepository,
        Self::PythonEntity,
    ];

    /// Parse a preset from a string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|preset| preset.name() == s)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::JavaEntity => "java_entity",
            Self::DotnetEntity => "dotnet_entity",
            Self::DotnetValueObject => "dotnet_value_object",
            Self::DotnetRepository => "dotnet_repository",
            Self::PythonEntity => "python_entity",
        }
    }

    /// The full template set for this preset.
    pub fn templates(self) -> EntityTemplates {
        let (entity, fragments, defaults) = match self {
            Self::JavaEntity => (JAVA_ENTITY, java_fragments(), JAVA_DEFAULTS),
            Self::DotnetEntity => (DOTNET_ENTITY, dotnet_entity_fragments(), DOTNET_DEFAULTS),
            Self::DotnetValueObject => (
                DOTNET_VALUE_OBJECT,
                dotnet_value_object_fragments(),
                DOTNET_VALUE_OBJECT_DEFAULTS,
            ),
            Self::DotnetRepository => (
                DOTNET_REPOSITORY,
                dotnet_repository_fragments(),
                DOTNET_REPOSITORY_DEFAULTS,
            ),
            Self::PythonEntity => (PYTHON_ENTITY, python_fragments(), PYTHON_DEFAULTS),
        };

        EntityTemplates {
            preset: self,
            entity: entity.to_string(),
            fragments: fragments
                .into_iter()
                .map(|(name, fragment)| (name.to_string(), fragment))
                .collect(),
            defaults: defaults
                .iter()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect::<BTreeMap<_, _>>(),
            unbound: UnboundPolicy::Fail,
            indent_values: true,
        }
    }
}

type Fragments = Vec<(&'static str, FragmentTemplate)>;

// Java

const JAVA_DEFAULTS: &[(&str, &str)] = &[
    ("entity_base", "Entity"),
    ("id_assignment", "UUID.randomUUID()"),
    ("id_type", "UUID"),
    ("return_type", "void"),
];

const JAVA_ENTITY: &str = r#"package ${package}.domain.entities;

import java.util.*;
import ${package}.domain.shared.*;
import ${package}.domain.events.*;

/**
 * ${entity_description}
 */
public class ${entity_name} extends ${entity_base}<${id_type}> {

    // ============================================
    // Properties
    // ============================================

    ${properties}

    // ============================================
    // Constructors
    // ============================================

    /**
     * Creates a new {@link ${entity_name}} instance.
     */
    public ${entity_name}(${constructor_params}) {
        super(${id_assignment});

        // Validate invariants
        ${constructor_validations}

        // Set properties
        ${constructor_assignments}
    }

    /**
     * Protected constructor for JPA.
     */
    protected ${entity_name}() {
        super();
    }

    // ============================================
    // Getters
    // ============================================

    ${getters}

    // ============================================
    // Business Methods
    // ============================================

    ${methods}

    // ============================================
    // Domain Events
    // ============================================

    ${domain_events}
}
"#;

const JAVA_GETTER: &str = r#"/**
 * Gets the ${property_description}.
 */
public ${property_type} get${PropertyName}() {
    return ${property_name};
}"#;

const JAVA_METHOD: &str = r#"/**
 * ${method_description}
 */
public ${return_type} ${method_name}(${method_params}) {
    // Validate preconditions
    ${method_validations}

    // Perform operation
    ${method_body}

    // Raise domain event if needed
    registerDomainEvent(new ${event_name}(this));
}"#;

const JAVA_RULE: &str = r#"if (${condition}) {
    throw new IllegalArgumentException("${message}");
}"#;

const JAVA_EVENT: &str = r#"/**
 * ${event_description}
 */
protected void raise${event_name}() {
    registerDomainEvent(new ${event_name}(this));
}"#;

fn java_fragments() -> Fragments {
    use RowSource::*;

    vec![
        (
            "properties",
            FragmentTemplate::single(
                Properties,
                "private ${property_type} ${property_name};",
                "\n",
            ),
        ),
        (
            "constructor_params",
            FragmentTemplate::single(Properties, "${property_type} ${param_name}", ", "),
        ),
        (
            "constructor_validations",
            FragmentTemplate::new("\n")
                .with_part(
                    RequiredProperties,
                    r#"Objects.requireNonNull(${param_name}, "${param_name} cannot be null");"#,
                )
                .with_part(PropertyRules, JAVA_RULE),
        ),
        (
            "constructor_assignments",
            FragmentTemplate::single(Properties, "this.${property_name} = ${param_name};", "\n"),
        ),
        ("getters", FragmentTemplate::single(Properties, JAVA_GETTER, "\n\n")),
        ("methods", FragmentTemplate::single(Methods, JAVA_METHOD, "\n\n")),
        (
            "method_params",
            FragmentTemplate::single(Parameters, "${param_type} ${param_name}", ", "),
        ),
        (
            "method_validations",
            FragmentTemplate::single(Preconditions, JAVA_RULE, "\n"),
        ),
        ("domain_events", FragmentTemplate::single(Events, JAVA_EVENT, "\n\n")),
    ]
}

// .NET entity

const DOTNET_DEFAULTS: &[(&str, &str)] = &[
    ("entity_base", "Entity"),
    ("id_type", "Guid"),
    ("return_type", "void"),
];

const DOTNET_ENTITY: &str = r#"using System;
using System.Collections.Generic;
using ${namespace}.Domain.Shared;

namespace ${namespace}.Domain.Entities
{
    /// <summary>
    /// ${entity_description}
    /// </summary>
    public class ${entity_name} : ${entity_base}<${id_type}>
    {
        #region Properties

        ${properties}

        #endregion

        #region Constructors

        /// <summary>
        /// Creates a new <see cref="${entity_name}"/> instance.
        /// </summary>
        public ${entity_name}(${constructor_params})
        {
            // Validate invariants
            ${constructor_validations}

            // Set properties
            ${constructor_assignments}
        }

        /// <summary>
        /// Private constructor for ORM.
        /// </summary>
        private ${entity_name}() { }

        #endregion

        #region Business Methods

        ${methods}

        #endregion

        #region Domain Events

        ${domain_events}

        #endregion
    }
}
"#;

const DOTNET_PROPERTY: &str = r#"/// <summary>
/// ${property_description}
/// </summary>
public ${property_type} ${PropertyName} { get; private set; }"#;

const DOTNET_METHOD: &str = r#"/// <summary>
/// ${method_description}
/// </summary>
public ${return_type} ${MethodName}(${method_params})
{
    // Validate preconditions
    ${method_validations}

    // Perform operation
    ${method_body}

    // Raise domain event if needed
    AddDomainEvent(new ${event_name}(this));
}"#;

const DOTNET_RULE: &str = r#"if (${condition})
{
    throw new ArgumentException("${message}", nameof(${param_name}));
}"#;

const DOTNET_EVENT: &str = r#"/// <summary>
/// ${event_description}
/// </summary>
protected void Raise${event_name}() => AddDomainEvent(new ${event_name}(this));"#;

const DOTNET_REQUIRED: &str = "ArgumentNullException.ThrowIfNull(${param_name});";

fn dotnet_entity_fragments() -> Fragments {
    use RowSource::*;

    vec![
        ("properties", FragmentTemplate::single(Properties, DOTNET_PROPERTY, "\n\n")),
        (
            "constructor_params",
            FragmentTemplate::single(Properties, "${property_type} ${param_name}", ", "),
        ),
        (
            "constructor_validations",
            FragmentTemplate::new("\n")
                .with_part(RequiredProperties, DOTNET_REQUIRED)
                .with_part(PropertyRules, DOTNET_RULE),
        ),
        (
            "constructor_assignments",
            FragmentTemplate::single(Properties, "${PropertyName} = ${param_name};", "\n"),
        ),
        ("methods", FragmentTemplate::single(Methods, DOTNET_METHOD, "\n\n")),
        (
            "method_params",
            FragmentTemplate::single(Parameters, "${param_type} ${param_name}", ", "),
        ),
        (
            "method_validations",
            FragmentTemplate::single(Preconditions, DOTNET_RULE, "\n"),
        ),
        ("domain_events", FragmentTemplate::single(Events, DOTNET_EVENT, "\n\n")),
    ]
}

// .NET value object

const DOTNET_VALUE_OBJECT_DEFAULTS: &[(&str, &str)] = &[("vo_base", "ValueObject")];

const DOTNET_VALUE_OBJECT: &str = r#"using System;
using System.Collections.Generic;
using ${namespace}.Domain.Shared;

namespace ${namespace}.Domain.ValueObjects
{
    /// <summary>
    /// ${vo_description}
    /// </summary>
    public sealed class ${vo_name} : ${vo_base}
    {
        #region Properties

        ${properties}

        #endregion

        #region Constructor

        /// <summary>
        /// Creates a new <see cref="${vo_name}"/> instance.
        /// </summary>
        public ${vo_name}(${constructor_params})
        {
            // Validate invariants
            ${validations}

            // Set properties
            ${assignments}
        }

        #endregion

        #region Equality

        protected override IEnumerable<object> GetEqualityComponents()
        {
            ${equality_members}
        }

        #endregion

        #region Transformation Methods

        ${transformation_methods}

        #endregion

        #region Factory Methods

        ${factory_methods}

        #endregion

        public override string ToString() => $"${to_string_format}";
    }
}
"#;

const DOTNET_READONLY_PROPERTY: &str = r#"/// <summary>
/// ${property_description}
/// </summary>
public ${property_type} ${PropertyName} { get; }"#;

const DOTNET_TRANSFORMATION: &str = r#"/// <summary>
/// Creates a new ${vo_name} with updated ${PropertyName}.
/// </summary>
public ${vo_name} With${PropertyName}(${property_type} new${PropertyName})
{
    return new ${vo_name}(${with_arguments});
}"#;

const DOTNET_FACTORY: &str = r#"/// <summary>
/// ${method_description}
/// </summary>
public static ${vo_name} ${MethodName}(${method_params})
{
    ${method_body}
}"#;

fn dotnet_value_object_fragments() -> Fragments {
    use RowSource::*;

    vec![
        (
            "properties",
            FragmentTemplate::single(Properties, DOTNET_READONLY_PROPERTY, "\n\n"),
        ),
        (
            "constructor_params",
            FragmentTemplate::single(Properties, "${property_type} ${param_name}", ", "),
        ),
        (
            "validations",
            FragmentTemplate::new("\n")
                .with_part(RequiredProperties, DOTNET_REQUIRED)
                .with_part(PropertyRules, DOTNET_RULE),
        ),
        (
            "assignments",
            FragmentTemplate::single(Properties, "${PropertyName} = ${param_name};", "\n"),
        ),
        (
            "equality_members",
            FragmentTemplate::single(Properties, "yield return ${PropertyName};", "\n"),
        ),
        (
            "transformation_methods",
            FragmentTemplate::single(Properties, DOTNET_TRANSFORMATION, "\n\n"),
        ),
        ("factory_methods", FragmentTemplate::single(Methods, DOTNET_FACTORY, "\n\n")),
        (
            "method_params",
            FragmentTemplate::single(Parameters, "${param_type} ${param_name}", ", "),
        ),
        (
            "to_string_format",
            FragmentTemplate::single(Properties, "{${PropertyName}}", ", "),
        ),
    ]
}

// .NET repository

const DOTNET_REPOSITORY_DEFAULTS: &[(&str, &str)] =
    &[("db_context", "AppDbContext"), ("id_type", "Guid")];

const DOTNET_REPOSITORY: &str = r#"// ============================================
// Interface (Domain Layer)
// ============================================

using System;
using System.Collections.Generic;
using System.Threading;
using System.Threading.Tasks;
using ${namespace}.Domain.Entities;

namespace ${namespace}.Domain.Repositories
{
    /// <summary>
    /// Repository interface for <see cref="${entity_name}"/> aggregate.
    /// </summary>
    public interface I${entity_name}Repository
    {
        /// <summary>
        /// Finds an entity by its identifier.
        /// </summary>
        Task<${entity_name}?> FindByIdAsync(${id_type} id, CancellationToken cancellationToken = default);

        /// <summary>
        /// Adds a new entity to the repository.
        /// </summary>
        Task AddAsync(${entity_name} entity, CancellationToken cancellationToken = default);

        /// <summary>
        /// Updates an existing entity.
        /// </summary>
        void Update(${entity_name} entity);

        /// <summary>
        /// Removes an entity from the repository.
        /// </summary>
        void Remove(${entity_name} entity);

        /// <summary>
        /// Checks if an entity exists by its identifier.
        /// </summary>
        Task<bool> ExistsAsync(${id_type} id, CancellationToken cancellationToken = default);

        ${custom_method_interfaces}
    }
}

// ============================================
// Implementation (Infrastructure Layer)
// ============================================

using System;
using System.Collections.Generic;
using System.Linq;
using System.Threading;
using System.Threading.Tasks;
using Microsoft.EntityFrameworkCore;
using ${namespace}.Domain.Entities;
using ${namespace}.Domain.Repositories;
using ${namespace}.Infrastructure.Data;

namespace ${namespace}.Infrastructure.Repositories
{
    /// <summary>
    /// Repository implementation for <see cref="${entity_name}"/> aggregate.
    /// </summary>
    public class ${entity_name}Repository : I${entity_name}Repository
    {
        private readonly ${db_context} _context;

        public ${entity_name}Repository(${db_context} context)
        {
            _context = context ?? throw new ArgumentNullException(nameof(context));
        }

        public async Task<${entity_name}?> FindByIdAsync(${id_type} id, CancellationToken cancellationToken = default)
        {
            return await _context.${entity_name_plural}
                ${include_statements}
                .FirstOrDefaultAsync(e => e.Id == id, cancellationToken);
        }

        public async Task AddAsync(${entity_name} entity, CancellationToken cancellationToken = default)
        {
            await _context.${entity_name_plural}.AddAsync(entity, cancellationToken);
        }

        public void Update(${entity_name} entity)
        {
            _context.${entity_name_plural}.Update(entity);
        }

        public void Remove(${entity_name} entity)
        {
            _context.${entity_name_plural}.Remove(entity);
        }

        public async Task<bool> ExistsAsync(${id_type} id, CancellationToken cancellationToken = default)
        {
            return await _context.${entity_name_plural}
                .AnyAsync(e => e.Id == id, cancellationToken);
        }

        ${custom_method_implementations}
    }
}
"#;

const DOTNET_QUERY_INTERFACE: &str = r#"/// <summary>
/// ${method_description}
/// </summary>
Task<${return_type}> ${MethodName}Async(${params}, CancellationToken cancellationToken = default);"#;

const DOTNET_QUERY_IMPLEMENTATION: &str = r#"public async Task<${return_type}> ${MethodName}Async(${params}, CancellationToken cancellationToken = default)
{
    return await _context.${entity_name_plural}
        .Where(e => ${condition})
        ${projection}
        .ToListAsync(cancellationToken);
}"#;

fn dotnet_repository_fragments() -> Fragments {
    use RowSource::*;

    vec![
        (
            "custom_method_interfaces",
            FragmentTemplate::single(Queries, DOTNET_QUERY_INTERFACE, "\n\n"),
        ),
        (
            "custom_method_implementations",
            FragmentTemplate::single(Queries, DOTNET_QUERY_IMPLEMENTATION, "\n\n"),
        ),
        (
            "include_statements",
            FragmentTemplate::single(
                Navigations,
                ".Include(e => e.${navigation_property})",
                "\n",
            ),
        ),
    ]
}

// Python

const PYTHON_DEFAULTS: &[(&str, &str)] = &[
    ("entity_base", "Entity"),
    ("id_assignment", "uuid4()"),
    ("id_type", "UUID"),
    ("return_type", "None"),
];

const PYTHON_ENTITY: &str = r#"from dataclasses import dataclass, field
from typing import List, Optional
from uuid import UUID, uuid4
from datetime import datetime

from ${module}.domain.shared.entity import ${entity_base}
from ${module}.domain.events import *


@dataclass
class ${entity_name}(${entity_base}[${id_type}]):
    """
    ${entity_description}
    """

    # ============================================
    # Properties
    # ============================================

    ${properties}

    # ============================================
    # Factory Methods
    # ============================================

    @classmethod
    def create(cls, ${factory_params}) -> "${entity_name}":
        """
        Creates a new ${entity_name} instance.

        Args:
            ${factory_args_doc}

        Returns:
            ${entity_name}: The created entity.

        Raises:
            ValueError: If validation fails.
        """
        # Validate invariants
        ${factory_validations}

        entity = cls(
            id=${id_assignment},
            ${factory_assignments}
        )

        # Register creation event
        entity._register_domain_event(${entity_name}CreatedEvent(entity))

        return entity

    # ============================================
    # Business Methods
    # ============================================

    ${methods}

    # ============================================
    # Invariant Validation
    # ============================================

    def _validate_invariants(self) -> None:
        """Validates entity invariants."""
        ${invariant_validations}
"#;

const PYTHON_METHOD: &str = r#"def ${method_name}(self, ${method_params}) -> ${return_type}:
    """
    ${method_description}

    Args:
        ${method_args_doc}

    Returns:
        ${return_description}

    Raises:
        ${raises_doc}
    """
    # Validate preconditions
    ${method_validations}

    # Perform operation
    ${method_body}

    # Raise domain event if needed
    self._register_domain_event(${event_name}(self))"#;

const PYTHON_RULE: &str = r#"if ${condition}:
    raise ValueError("${message}")"#;

fn python_fragments() -> Fragments {
    use RowSource::*;

    vec![
        (
            "properties",
            FragmentTemplate::single(Properties, "${property_name}: ${property_type}", "\n"),
        ),
        (
            "factory_params",
            FragmentTemplate::single(Properties, "${param_name}: ${property_type}", ", "),
        ),
        (
            "factory_args_doc",
            FragmentTemplate::single(Properties, "${param_name}: ${property_description}", "\n"),
        ),
        (
            "factory_validations",
            FragmentTemplate::new("\n")
                .with_part(
                    RequiredProperties,
                    "if not ${param_name}:\n    raise ValueError(\"${param_name} cannot be empty\")",
                )
                .with_part(PropertyRules, PYTHON_RULE),
        ),
        (
            "factory_assignments",
            FragmentTemplate::single(Properties, "${property_name}=${param_name},", "\n"),
        ),
        ("methods", FragmentTemplate::single(Methods, PYTHON_METHOD, "\n\n")),
        (
            "method_params",
            FragmentTemplate::single(Parameters, "${param_name}: ${param_type}", ", "),
        ),
        (
            "method_args_doc",
            FragmentTemplate::single(Parameters, "${param_name}: ${param_description}", "\n"),
        ),
        (
            "method_validations",
            FragmentTemplate::single(Preconditions, PYTHON_RULE, "\n"),
        ),
        (
            "invariant_validations",
            FragmentTemplate::single(
                RequiredProperties,
                "if not self.${property_name}:\n    raise ValueError(\"${property_name} cannot be empty\")",
                "\n",
            ),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_preset_compiles() {
        for preset in TemplatePreset::ALL {
            let templates = preset.templates();
            assert_eq!(templates.preset, preset);
            templates
                .validate()
                .unwrap_or_else(|e| panic!("{} failed: {}", preset.name(), e));
        }
    }

    #[test]
    fn test_preset_names_round_trip() {
        for preset in TemplatePreset::ALL {
            assert_eq!(TemplatePreset::from_str(preset.name()), Some(preset));
        }
        assert_eq!(TemplatePreset::from_str("cobol_entity"), None);
    }

    #[test]
    fn test_preset_templates_have_no_trailing_whitespace() {
        for preset in TemplatePreset::ALL {
            let templates = preset.templates();
            for line in templates.entity.lines() {
                assert_eq!(line, line.trim_end(), "{}: {:?}", preset.name(), line);
            }
        }
    }
}
