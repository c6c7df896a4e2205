//! Schema-driven validation of untyped configuration payloads
//!
//! This module provides:
//! - `EntitySchema` field tables describing each entity
//! - `SchemaValidator`, the single routine interpreting those tables
//! - `Field`, the tri-state value for optional fields without defaults
//! - `SchemaError`, the structured validation error

pub mod descriptor;
pub mod entity;
pub mod error;
pub mod field;
pub mod options;
pub mod path;
pub mod validator;

pub use descriptor::{EntitySchema, FieldKind, FieldSpec, LiteralSet, Presence};
pub use entity::SchemaEntity;
pub use error::SchemaError;
pub use field::Field;
pub use options::ValidationOptions;
pub use path::{FieldPath, PathSegment};
pub use validator::SchemaValidator;
