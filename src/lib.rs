//! Scaffold: flat `${name}` placeholder templates for scaffolding source files.
//!
//! The core is a small, pure renderer: parse a [`Template`], bind values in
//! [`Bindings`], render to a `String`. The [`entity`] module builds on it to
//! generate domain-entity classes from a YAML description.
//!
//! ```
//! use scaffold::{Bindings, render};
//!
//! let out = render("${greeting}, ${name}!", &Bindings::from([
//!     ("greeting", "Hello"),
//!     ("name", "Alice"),
//! ])).unwrap();
//! assert_eq!(out, "Hello, Alice!");
//! ```

pub mod entity;
pub mod error;
pub mod template;

pub use error::{Result, ScaffoldError};
pub use template::{
    Bindings, Location, Renderer, Template, TemplateError, UnboundPolicy, render, render_each,
};
