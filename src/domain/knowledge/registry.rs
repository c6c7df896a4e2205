//! Lookup of validatable entities by name

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use super::authorization::{
    ApiTemplateSetting, Authorization, AuthorizationConfig, ProcessStatusSetting,
};
use super::data_source::{DataSource, FileInfo, InfoList, NotionInfo, NotionPage, WebsiteInfo};
use super::knowledge_config::KnowledgeConfig;
use super::process_rule::{PreProcessingRule, ProcessRule, Rule, Segmentation};
use super::retrieval::{RerankingModel, RetrievalModel};
use crate::domain::schema::{EntitySchema, SchemaEntity, SchemaValidator};
use crate::domain::DomainError;

/// Every entity a payload can be validated as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    AuthorizationConfig,
    Authorization,
    ProcessStatusSetting,
    ApiTemplateSetting,
    NotionPage,
    NotionInfo,
    WebsiteInfo,
    FileInfo,
    InfoList,
    DataSource,
    PreProcessingRule,
    Segmentation,
    Rule,
    ProcessRule,
    RerankingModel,
    RetrievalModel,
    KnowledgeConfig,
}

impl EntityKind {
    pub const ALL: [EntityKind; 17] = [
        Self::AuthorizationConfig,
        Self::Authorization,
        Self::ProcessStatusSetting,
        Self::ApiTemplateSetting,
        Self::NotionPage,
        Self::NotionInfo,
        Self::WebsiteInfo,
        Self::FileInfo,
        Self::InfoList,
        Self::DataSource,
        Self::PreProcessingRule,
        Self::Segmentation,
        Self::Rule,
        Self::ProcessRule,
        Self::RerankingModel,
        Self::RetrievalModel,
        Self::KnowledgeConfig,
    ];

    /// Kebab-case name used on the command line
    pub fn name(&self) -> &'static str {
        match self {
            Self::AuthorizationConfig => "authorization-config",
            Self::Authorization => "authorization",
            Self::ProcessStatusSetting => "process-status-setting",
            Self::ApiTemplateSetting => "api-template-setting",
            Self::NotionPage => "notion-page",
            Self::NotionInfo => "notion-info",
            Self::WebsiteInfo => "website-info",
            Self::FileInfo => "file-info",
            Self::InfoList => "info-list",
            Self::DataSource => "data-source",
            Self::PreProcessingRule => "pre-processing-rule",
            Self::Segmentation => "segmentation",
            Self::Rule => "rule",
            Self::ProcessRule => "process-rule",
            Self::RerankingModel => "reranking-model",
            Self::RetrievalModel => "retrieval-model",
            Self::KnowledgeConfig => "knowledge-config",
        }
    }

    pub fn schema(&self) -> &'static EntitySchema {
        match self {
            Self::AuthorizationConfig => AuthorizationConfig::schema(),
            Self::Authorization => Authorization::schema(),
            Self::ProcessStatusSetting => ProcessStatusSetting::schema(),
            Self::ApiTemplateSetting => ApiTemplateSetting::schema(),
            Self::NotionPage => NotionPage::schema(),
            Self::NotionInfo => NotionInfo::schema(),
            Self::WebsiteInfo => WebsiteInfo::schema(),
            Self::FileInfo => FileInfo::schema(),
            Self::InfoList => InfoList::schema(),
            Self::DataSource => DataSource::schema(),
            Self::PreProcessingRule => PreProcessingRule::schema(),
            Self::Segmentation => Segmentation::schema(),
            Self::Rule => Rule::schema(),
            Self::ProcessRule => ProcessRule::schema(),
            Self::RerankingModel => RerankingModel::schema(),
            Self::RetrievalModel => RetrievalModel::schema(),
            Self::KnowledgeConfig => KnowledgeConfig::schema(),
        }
    }

    /// Validate `input` as this entity and return its normalized encoding
    pub fn normalize(
        &self,
        validator: &SchemaValidator,
        input: &Value,
    ) -> Result<Value, DomainError> {
        match self {
            Self::AuthorizationConfig => normalize_as::<AuthorizationConfig>(validator, input),
            Self::Authorization => normalize_as::<Authorization>(validator, input),
            Self::ProcessStatusSetting => normalize_as::<ProcessStatusSetting>(validator, input),
            Self::ApiTemplateSetting => normalize_as::<ApiTemplateSetting>(validator, input),
            Self::NotionPage => normalize_as::<NotionPage>(validator, input),
            Self::NotionInfo => normalize_as::<NotionInfo>(validator, input),
            Self::WebsiteInfo => normalize_as::<WebsiteInfo>(validator, input),
            Self::FileInfo => normalize_as::<FileInfo>(validator, input),
            Self::InfoList => normalize_as::<InfoList>(validator, input),
            Self::DataSource => normalize_as::<DataSource>(validator, input),
            Self::PreProcessingRule => normalize_as::<PreProcessingRule>(validator, input),
            Self::Segmentation => normalize_as::<Segmentation>(validator, input),
            Self::Rule => normalize_as::<Rule>(validator, input),
            Self::ProcessRule => normalize_as::<ProcessRule>(validator, input),
            Self::RerankingModel => normalize_as::<RerankingModel>(validator, input),
            Self::RetrievalModel => normalize_as::<RetrievalModel>(validator, input),
            Self::KnowledgeConfig => normalize_as::<KnowledgeConfig>(validator, input),
        }
    }
}

fn normalize_as<T: SchemaEntity>(
    validator: &SchemaValidator,
    input: &Value,
) -> Result<Value, DomainError> {
    let entity: T = validator.validate(input)?;

    entity
        .to_value()
        .map_err(|e| DomainError::internal(format!("Failed to encode {}: {}", T::schema().name, e)))
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EntityKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s || kind.schema().name == s)
            .ok_or_else(|| DomainError::not_found(format!("Unknown entity '{}'", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::schema::{FieldKind, FieldPath, SchemaError, ValidationOptions};
    use serde_json::json;

    /// A valid payload for `kind` with every declared field set
    fn fixture(kind: EntityKind) -> Value {
        match kind {
            EntityKind::AuthorizationConfig => {
                json!({"type": "custom", "api_key": "k-1", "header": "X-Api-Key"})
            }
            EntityKind::Authorization => {
                json!({"type": "api-key", "config": fixture(EntityKind::AuthorizationConfig)})
            }
            EntityKind::ProcessStatusSetting => {
                json!({"request_method": "GET", "url": "https://kb.local/status"})
            }
            EntityKind::ApiTemplateSetting => json!({
                "method": "retrieval",
                "url": "https://kb.local/retrieval",
                "request_method": "POST",
                "api_token": "t-1",
                "headers": {"X-Trace": "1"},
                "params": {"limit": 5}
            }),
            EntityKind::NotionPage => {
                json!({"page_id": "p1", "page_name": "Home", "page_icon": "house"})
            }
            EntityKind::NotionInfo => {
                json!({"workspace_id": "ws-1", "pages": [fixture(EntityKind::NotionPage)]})
            }
            EntityKind::WebsiteInfo => json!({
                "provider": "firecrawl",
                "job_id": "job-1",
                "urls": ["https://docs.local"],
                "only_main_content": true
            }),
            EntityKind::FileInfo => json!({"file_ids": ["f1", "f2"]}),
            EntityKind::InfoList => json!({
                "data_source_type": "upload_file",
                "notion_info_list": [fixture(EntityKind::NotionInfo)],
                "file_info_list": fixture(EntityKind::FileInfo),
                "website_info_list": fixture(EntityKind::WebsiteInfo)
            }),
            EntityKind::DataSource => json!({"info_list": fixture(EntityKind::InfoList)}),
            EntityKind::PreProcessingRule => json!({"id": "remove_urls_emails", "enabled": false}),
            EntityKind::Segmentation => {
                json!({"separator": "###", "max_tokens": 500, "chunk_overlap": 20})
            }
            EntityKind::Rule => json!({
                "pre_processing_rules": [fixture(EntityKind::PreProcessingRule)],
                "segmentation": fixture(EntityKind::Segmentation),
                "parent_mode": "paragraph",
                "subchunk_segmentation": fixture(EntityKind::Segmentation)
            }),
            EntityKind::ProcessRule => {
                json!({"mode": "hierarchical", "rules": fixture(EntityKind::Rule)})
            }
            EntityKind::RerankingModel => json!({
                "reranking_provider_name": "cohere",
                "reranking_model_name": "rerank-v3"
            }),
            EntityKind::RetrievalModel => json!({
                "search_method": "semantic_search",
                "reranking_enable": true,
                "reranking_model": fixture(EntityKind::RerankingModel),
                "top_k": 4,
                "score_threshold_enabled": true,
                "score_threshold": 0.5
            }),
            EntityKind::KnowledgeConfig => json!({
                "original_document_id": "doc-1",
                "duplicate": false,
                "indexing_technique": "high_quality",
                "data_source": fixture(EntityKind::DataSource),
                "process_rule": fixture(EntityKind::ProcessRule),
                "retrieval_model": fixture(EntityKind::RetrievalModel),
                "doc_form": "text_model",
                "doc_language": "English",
                "embedding_model": "text-embedding-3-small",
                "embedding_model_provider": "openai"
            }),
        }
    }

    fn normalize(kind: EntityKind, input: &Value) -> Result<Value, DomainError> {
        kind.normalize(&SchemaValidator::default(), input)
    }

    #[test]
    fn test_every_kind_round_trips() {
        for kind in EntityKind::ALL {
            let input = fixture(kind);

            let encoded = normalize(kind, &input).unwrap();
            assert_eq!(encoded, input, "{kind}");
            assert_eq!(normalize(kind, &encoded).unwrap(), encoded, "{kind}");
        }
    }

    #[test]
    fn test_every_kind_accepts_required_fields_only() {
        for kind in EntityKind::ALL {
            let schema = kind.schema();
            let mut input = fixture(kind);
            input
                .as_object_mut()
                .unwrap()
                .retain(|key, _| schema.required_fields().any(|spec| spec.name == key.as_str()));

            let encoded = normalize(kind, &input).unwrap();
            assert_eq!(normalize(kind, &encoded).unwrap(), encoded, "{kind}");
        }
    }

    #[test]
    fn test_every_required_field_is_reported_missing() {
        for kind in EntityKind::ALL {
            let schema = kind.schema();

            for spec in schema.required_fields() {
                let mut input = fixture(kind);
                input.as_object_mut().unwrap().remove(spec.name);

                let error = normalize(kind, &input).unwrap_err();
                assert_eq!(
                    error.as_schema_error(),
                    Some(&SchemaError::missing_field(
                        schema.name,
                        FieldPath::root().key(spec.name)
                    )),
                    "{kind}.{}",
                    spec.name
                );
            }
        }
    }

    #[test]
    fn test_every_literal_field_rejects_unknown_values() {
        let mut checked = 0;

        for kind in EntityKind::ALL {
            let schema = kind.schema();

            for spec in &schema.fields {
                let FieldKind::Literal { allowed } = &spec.kind else {
                    continue;
                };

                let mut input = fixture(kind);
                input[spec.name] = json!("Not-A-Literal");

                let error = normalize(kind, &input).unwrap_err();
                assert_eq!(
                    error.as_schema_error(),
                    Some(&SchemaError::invalid_enum_value(
                        schema.name,
                        FieldPath::root().key(spec.name),
                        allowed,
                        "Not-A-Literal"
                    )),
                    "{kind}.{}",
                    spec.name
                );
                checked += 1;
            }
        }

        // type (x2), data_source_type, parent_mode, mode, search_method, indexing_technique
        assert_eq!(checked, 7);
    }

    #[test]
    fn test_names_round_trip() {
        for kind in EntityKind::ALL {
            assert_eq!(kind.name().parse::<EntityKind>().unwrap(), kind);
            assert_eq!(kind.schema().name.parse::<EntityKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_unknown_entity() {
        let error = "parent-mode".parse::<EntityKind>().unwrap_err();
        assert!(matches!(error, DomainError::NotFound { .. }));
    }

    #[test]
    fn test_normalize_fills_defaults() {
        let validator = SchemaValidator::default();
        let normalized = EntityKind::Segmentation
            .normalize(&validator, &json!({"max_tokens": 500}))
            .unwrap();

        assert_eq!(
            normalized,
            json!({"separator": "\n", "max_tokens": 500, "chunk_overlap": 0})
        );
    }

    #[test]
    fn test_normalize_surfaces_schema_error() {
        let validator = SchemaValidator::new(ValidationOptions::default());
        let error = EntityKind::FileInfo
            .normalize(&validator, &json!({}))
            .unwrap_err();

        assert!(matches!(
            error,
            DomainError::Schema(SchemaError::MissingField { .. })
        ));
    }
}
