//! Trait implemented by every validatable entity

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::descriptor::EntitySchema;
use super::error::SchemaError;
use super::options::ValidationOptions;
use super::path::FieldPath;
use super::validator::SchemaValidator;

/// An immutable configuration value backed by a schema descriptor.
///
/// Instances only come into existence through [`SchemaValidator::validate`],
/// so structural constraints hold for their whole lifetime.
pub trait SchemaEntity: Serialize + DeserializeOwned + Sized {
    /// Field table for this entity
    fn schema() -> &'static EntitySchema;

    /// Cross-field checks, run only when `strict_correlations` is enabled.
    ///
    /// `path` locates this entity inside the payload being validated.
    fn check_correlations(&self, _path: &FieldPath) -> Result<(), SchemaError> {
        Ok(())
    }

    /// Validate with default (tolerant) options
    fn from_value(input: &Value) -> Result<Self, SchemaError> {
        SchemaValidator::default().validate(input)
    }

    fn from_value_with(input: &Value, options: ValidationOptions) -> Result<Self, SchemaError> {
        SchemaValidator::new(options).validate(input)
    }

    /// Encode back to the wire representation
    fn to_value(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}
