//! Domain layer - Configuration entities and their validation

pub mod error;
pub mod knowledge;
pub mod schema;

use serde_json::Value;

pub use error::DomainError;
pub use knowledge::{
    ApiTemplateSetting, Authorization, AuthorizationConfig, AuthorizationConfigType,
    AuthorizationType, DataSource, DataSourceType, EntityKind, FileInfo, IndexingTechnique,
    InfoList, KnowledgeConfig, NotionInfo, NotionPage, ParentMode, PreProcessingRule, ProcessMode,
    ProcessRule, ProcessStatusSetting, RerankingModel, RetrievalModel, Rule, SearchMethod,
    Segmentation, WebsiteInfo,
};
pub use schema::{
    EntitySchema, Field, FieldKind, FieldPath, FieldSpec, LiteralSet, PathSegment, Presence,
    SchemaEntity, SchemaError, SchemaValidator, ValidationOptions,
};

/// Parse JSON text and validate it as `T`
pub fn parse_json<T: SchemaEntity>(
    text: &str,
    options: ValidationOptions,
) -> Result<T, DomainError> {
    let value: Value = serde_json::from_str(text)?;
    Ok(SchemaValidator::new(options).validate(&value)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_json_success() {
        let segmentation: Segmentation =
            parse_json(r#"{"max_tokens": 500}"#, ValidationOptions::default()).unwrap();
        assert_eq!(segmentation.chunk_overlap, 0);
    }

    #[test]
    fn test_parse_json_malformed_text() {
        let error = parse_json::<Segmentation>("{", ValidationOptions::default()).unwrap_err();
        assert!(matches!(error, DomainError::Parse { .. }));
    }

    #[test]
    fn test_parse_json_schema_failure() {
        let error = parse_json::<FileInfo>(r#"{"file_ids": "f1"}"#, ValidationOptions::default())
            .unwrap_err();
        assert!(matches!(
            error.as_schema_error(),
            Some(SchemaError::TypeMismatch { .. })
        ));
    }
}
