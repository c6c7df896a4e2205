//! Knowledge Config Schema
//!
//! Validation and normalization layer for knowledge-base ingestion payloads:
//! - Data-driven schema tables interpreted by one generic validator
//! - Typed, immutable entities (`KnowledgeConfig`, `RetrievalModel`, ...)
//! - Structured errors with a field-path trail
//! - Opt-in correlation checks for cross-field invariants

pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;
pub use domain::{
    parse_json, DomainError, EntityKind, Field, KnowledgeConfig, SchemaEntity, SchemaError,
    SchemaValidator, ValidationOptions,
};
