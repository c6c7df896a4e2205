//! Root configuration of a knowledge-base ingestion request

use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::data_source::DataSource;
use super::process_rule::ProcessRule;
use super::retrieval::RetrievalModel;
use crate::domain::schema::{
    EntitySchema, Field, FieldKind, FieldPath, LiteralSet, SchemaEntity, SchemaError,
};

pub const DEFAULT_DOC_FORM: &str = "text_model";
pub const DEFAULT_DOC_LANGUAGE: &str = "English";

static KNOWLEDGE_CONFIG_SCHEMA: Lazy<EntitySchema> = Lazy::new(|| {
    EntitySchema::new("KnowledgeConfig")
        .optional("original_document_id", FieldKind::String)
        .with_default("duplicate", FieldKind::Bool, json!(true))
        .required("indexing_technique", IndexingTechnique::field_kind())
        .required("data_source", FieldKind::object(DataSource::schema()))
        .optional("process_rule", FieldKind::object(ProcessRule::schema()))
        .required("retrieval_model", FieldKind::object(RetrievalModel::schema()))
        .with_default("doc_form", FieldKind::String, json!(DEFAULT_DOC_FORM))
        .with_default("doc_language", FieldKind::String, json!(DEFAULT_DOC_LANGUAGE))
        .optional("embedding_model", FieldKind::String)
        .optional("embedding_model_provider", FieldKind::String)
});

/// Indexing quality: embeddings (`high_quality`) or keyword-only (`economy`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexingTechnique {
    HighQuality,
    Economy,
}

impl LiteralSet for IndexingTechnique {
    const VALUES: &'static [&'static str] = &["high_quality", "economy"];

    fn as_str(&self) -> &'static str {
        match self {
            Self::HighQuality => "high_quality",
            Self::Economy => "economy",
        }
    }
}

impl fmt::Display for IndexingTechnique {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the ingestion pipeline needs to index a batch of documents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeConfig {
    /// Set when re-indexing an existing document
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub original_document_id: Field<String>,
    pub duplicate: bool,
    pub indexing_technique: IndexingTechnique,
    pub data_source: DataSource,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub process_rule: Field<ProcessRule>,
    pub retrieval_model: RetrievalModel,
    pub doc_form: String,
    pub doc_language: String,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub embedding_model: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub embedding_model_provider: Field<String>,
}

impl SchemaEntity for KnowledgeConfig {
    fn schema() -> &'static EntitySchema {
        &KNOWLEDGE_CONFIG_SCHEMA
    }

    fn check_correlations(&self, path: &FieldPath) -> Result<(), SchemaError> {
        self.data_source
            .check_correlations(&path.key("data_source"))?;

        if let Some(process_rule) = self.process_rule.as_option() {
            process_rule.check_correlations(&path.key("process_rule"))?;
        }

        self.retrieval_model
            .check_correlations(&path.key("retrieval_model"))
    }
}
