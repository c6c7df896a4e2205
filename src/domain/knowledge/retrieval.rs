//! Retrieval settings: search method, reranking and score threshold

use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::domain::schema::{
    EntitySchema, Field, FieldKind, FieldPath, LiteralSet, SchemaEntity, SchemaError,
};

static RERANKING_MODEL_SCHEMA: Lazy<EntitySchema> = Lazy::new(|| {
    EntitySchema::new("RerankingModel")
        .required("reranking_provider_name", FieldKind::String)
        .required("reranking_model_name", FieldKind::String)
});

static RETRIEVAL_MODEL_SCHEMA: Lazy<EntitySchema> = Lazy::new(|| {
    EntitySchema::new("RetrievalModel")
        .required("search_method", SearchMethod::field_kind())
        .required("reranking_enable", FieldKind::Bool)
        .optional("reranking_model", FieldKind::object(&RERANKING_MODEL_SCHEMA))
        .required("top_k", FieldKind::Integer)
        .required("score_threshold_enabled", FieldKind::Bool)
        .optional("score_threshold", FieldKind::Float)
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMethod {
    HybridSearch,
    SemanticSearch,
    FullTextSearch,
}

impl LiteralSet for SearchMethod {
    const VALUES: &'static [&'static str] =
        &["hybrid_search", "semantic_search", "full_text_search"];

    fn as_str(&self) -> &'static str {
        match self {
            Self::HybridSearch => "hybrid_search",
            Self::SemanticSearch => "semantic_search",
            Self::FullTextSearch => "full_text_search",
        }
    }
}

impl fmt::Display for SearchMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RerankingModel {
    pub reranking_provider_name: String,
    pub reranking_model_name: String,
}

impl SchemaEntity for RerankingModel {
    fn schema() -> &'static EntitySchema {
        &RERANKING_MODEL_SCHEMA
    }
}

/// How documents are retrieved from the knowledge base
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievalModel {
    pub search_method: SearchMethod,
    pub reranking_enable: bool,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub reranking_model: Field<RerankingModel>,
    pub top_k: i64,
    pub score_threshold_enabled: bool,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub score_threshold: Field<f64>,
}

impl RetrievalModel {
    /// Threshold to apply, if thresholding is enabled and a value was sent
    pub fn effective_score_threshold(&self) -> Option<f64> {
        if self.score_threshold_enabled {
            self.score_threshold.as_option().copied()
        } else {
            None
        }
    }
}

impl SchemaEntity for RetrievalModel {
    fn schema() -> &'static EntitySchema {
        &RETRIEVAL_MODEL_SCHEMA
    }

    fn check_correlations(&self, path: &FieldPath) -> Result<(), SchemaError> {
        let entity = Self::schema().name;

        if self.top_k < 1 {
            return Err(SchemaError::constraint(
                entity,
                path.key("top_k"),
                "top_k must be at least 1",
            ));
        }

        if self.reranking_enable && !self.reranking_model.is_present() {
            return Err(SchemaError::constraint(
                entity,
                path.key("reranking_model"),
                "reranking_model is required when reranking_enable is true",
            ));
        }

        if self.score_threshold_enabled {
            let Some(threshold) = self.score_threshold.as_option() else {
                return Err(SchemaError::constraint(
                    entity,
                    path.key("score_threshold"),
                    "score_threshold is required when score_threshold_enabled is true",
                ));
            };

            if !(0.0..=1.0).contains(threshold) {
                return Err(SchemaError::constraint(
                    entity,
                    path.key("score_threshold"),
                    format!("score_threshold {} must be between 0.0 and 1.0", threshold),
                ));
            }
        }

        Ok(())
    }
}
