//! Core types for the mini-program page builder.
//!
//! This crate provides the data shapes shared by the editor store and the
//! code generator:
//! - Project, page and component tree types
//! - Component templates used for insertion
//! - The component palette catalog
//! - Error types

pub mod errors;
pub mod model;
pub mod palette;

pub use errors::*;
pub use model::*;
pub use palette::{ComponentDefinition, ControlKind, Palette, PropSchema, SelectOption};
