//! Structured validation errors

use serde::Serialize;
use thiserror::Error;

use super::path::FieldPath;

/// Validation failure for a single payload.
///
/// `entity` names the innermost entity declaring the failing field and
/// `path` is the full trail from the payload root.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SchemaError {
    #[error("{entity}: missing required field `{path}`")]
    MissingField {
        entity: &'static str,
        path: FieldPath,
    },

    #[error("{entity}: field `{path}` expected {expected}, got {actual}")]
    TypeMismatch {
        entity: &'static str,
        path: FieldPath,
        expected: String,
        actual: String,
    },

    #[error("{entity}: field `{path}` must be one of [{}], got {actual}", allowed.join(", "))]
    InvalidEnumValue {
        entity: &'static str,
        path: FieldPath,
        allowed: Vec<&'static str>,
        actual: String,
    },

    #[error("{entity}: unknown field `{path}`")]
    UnknownField {
        entity: &'static str,
        path: FieldPath,
    },

    #[error("{entity}: field `{path}` violates constraint: {message}")]
    ConstraintViolation {
        entity: &'static str,
        path: FieldPath,
        message: String,
    },

    #[error("{entity}: failed to decode normalized payload: {message}")]
    Decode {
        entity: &'static str,
        message: String,
    },
}

impl SchemaError {
    pub fn missing_field(entity: &'static str, path: FieldPath) -> Self {
        Self::MissingField { entity, path }
    }

    pub fn type_mismatch(
        entity: &'static str,
        path: FieldPath,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::TypeMismatch {
            entity,
            path,
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    pub fn invalid_enum_value(
        entity: &'static str,
        path: FieldPath,
        allowed: &[&'static str],
        actual: impl Into<String>,
    ) -> Self {
        Self::InvalidEnumValue {
            entity,
            path,
            allowed: allowed.to_vec(),
            actual: actual.into(),
        }
    }

    pub fn unknown_field(entity: &'static str, path: FieldPath) -> Self {
        Self::UnknownField { entity, path }
    }

    pub fn constraint(entity: &'static str, path: FieldPath, message: impl Into<String>) -> Self {
        Self::ConstraintViolation {
            entity,
            path,
            message: message.into(),
        }
    }

    pub fn decode(entity: &'static str, message: impl Into<String>) -> Self {
        Self::Decode {
            entity,
            message: message.into(),
        }
    }

    /// Entity that declared the failing field
    pub fn entity(&self) -> &'static str {
        match self {
            Self::MissingField { entity, .. }
            | Self::TypeMismatch { entity, .. }
            | Self::InvalidEnumValue { entity, .. }
            | Self::UnknownField { entity, .. }
            | Self::ConstraintViolation { entity, .. }
            | Self::Decode { entity, .. } => *entity,
        }
    }

    /// Path of the failing field, when the error is tied to one
    pub fn path(&self) -> Option<&FieldPath> {
        match self {
            Self::MissingField { path, .. }
            | Self::TypeMismatch { path, .. }
            | Self::InvalidEnumValue { path, .. }
            | Self::UnknownField { path, .. }
            | Self::ConstraintViolation { path, .. } => Some(path),
            Self::Decode { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_message() {
        let error = SchemaError::missing_field(
            "KnowledgeConfig",
            FieldPath::root().key("indexing_technique"),
        );
        assert_eq!(
            error.to_string(),
            "KnowledgeConfig: missing required field `indexing_technique`"
        );
        assert_eq!(error.entity(), "KnowledgeConfig");
    }

    #[test]
    fn test_invalid_enum_message_lists_allowed() {
        let error = SchemaError::invalid_enum_value(
            "Rule",
            FieldPath::root().key("parent_mode"),
            &["full-doc", "paragraph"],
            "chapter",
        );
        assert_eq!(
            error.to_string(),
            "Rule: field `parent_mode` must be one of [full-doc, paragraph], got chapter"
        );
    }

    #[test]
    fn test_serializes_with_kind_tag() {
        let error = SchemaError::type_mismatch(
            "Segmentation",
            FieldPath::root().key("max_tokens"),
            "integer",
            "string",
        );
        let value = serde_json::to_value(&error).unwrap();
        assert_eq!(value["kind"], "type_mismatch");
        assert_eq!(value["path"], "max_tokens");
        assert_eq!(value["expected"], "integer");
    }
}
