//! Knowledge-base ingestion configuration entities
//!
//! This module provides:
//! - External knowledge API settings (`Authorization`, `ApiTemplateSetting`, ...)
//! - Data source descriptors (`InfoList`, `NotionInfo`, `WebsiteInfo`, ...)
//! - Processing rules (`ProcessRule`, `Segmentation`, ...)
//! - Retrieval settings (`RetrievalModel`, `RerankingModel`)
//! - The root `KnowledgeConfig` aggregate and the `EntityKind` lookup

pub mod authorization;
pub mod data_source;
pub mod knowledge_config;
pub mod process_rule;
pub mod registry;
pub mod retrieval;

pub use authorization::{
    ApiTemplateSetting, Authorization, AuthorizationConfig, AuthorizationConfigType,
    AuthorizationType, ProcessStatusSetting,
};
pub use data_source::{
    DataSource, DataSourceType, FileInfo, InfoList, NotionInfo, NotionPage, WebsiteInfo,
};
pub use knowledge_config::{
    IndexingTechnique, KnowledgeConfig, DEFAULT_DOC_FORM, DEFAULT_DOC_LANGUAGE,
};
pub use process_rule::{
    ParentMode, PreProcessingRule, ProcessMode, ProcessRule, Rule, Segmentation,
    DEFAULT_CHUNK_OVERLAP, DEFAULT_SEPARATOR,
};
pub use registry::EntityKind;
pub use retrieval::{RerankingModel, RetrievalModel, SearchMethod};
