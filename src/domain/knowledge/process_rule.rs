//! Document processing rules: cleaning and chunk segmentation

use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::schema::{
    EntitySchema, Field, FieldKind, FieldPath, LiteralSet, SchemaEntity, SchemaError,
};

pub const DEFAULT_SEPARATOR: &str = "\n";
pub const DEFAULT_CHUNK_OVERLAP: i64 = 0;

static PRE_PROCESSING_RULE_SCHEMA: Lazy<EntitySchema> = Lazy::new(|| {
    EntitySchema::new("PreProcessingRule")
        .required("id", FieldKind::String)
        .required("enabled", FieldKind::Bool)
});

static SEGMENTATION_SCHEMA: Lazy<EntitySchema> = Lazy::new(|| {
    EntitySchema::new("Segmentation")
        .with_default("separator", FieldKind::String, json!(DEFAULT_SEPARATOR))
        .required("max_tokens", FieldKind::Integer)
        .with_default("chunk_overlap", FieldKind::Integer, json!(DEFAULT_CHUNK_OVERLAP))
});

static RULE_SCHEMA: Lazy<EntitySchema> = Lazy::new(|| {
    EntitySchema::new("Rule")
        .optional(
            "pre_processing_rules",
            FieldKind::list_of(FieldKind::object(&PRE_PROCESSING_RULE_SCHEMA)),
        )
        .optional("segmentation", FieldKind::object(&SEGMENTATION_SCHEMA))
        .optional("parent_mode", ParentMode::field_kind())
        .optional("subchunk_segmentation", FieldKind::object(&SEGMENTATION_SCHEMA))
});

static PROCESS_RULE_SCHEMA: Lazy<EntitySchema> = Lazy::new(|| {
    EntitySchema::new("ProcessRule")
        .required("mode", ProcessMode::field_kind())
        .optional("rules", FieldKind::object(&RULE_SCHEMA))
});

/// How parent chunks are formed in hierarchical mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ParentMode {
    FullDoc,
    Paragraph,
}

impl LiteralSet for ParentMode {
    const VALUES: &'static [&'static str] = &["full-doc", "paragraph"];

    fn as_str(&self) -> &'static str {
        match self {
            Self::FullDoc => "full-doc",
            Self::Paragraph => "paragraph",
        }
    }
}

impl fmt::Display for ParentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessMode {
    Automatic,
    Custom,
    Hierarchical,
}

impl LiteralSet for ProcessMode {
    const VALUES: &'static [&'static str] = &["automatic", "custom", "hierarchical"];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Automatic => "automatic",
            Self::Custom => "custom",
            Self::Hierarchical => "hierarchical",
        }
    }
}

impl fmt::Display for ProcessMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Toggle for one text-cleaning step (e.g. `remove_extra_spaces`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreProcessingRule {
    pub id: String,
    pub enabled: bool,
}

impl SchemaEntity for PreProcessingRule {
    fn schema() -> &'static EntitySchema {
        &PRE_PROCESSING_RULE_SCHEMA
    }
}

/// Chunk size and boundary settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segmentation {
    pub separator: String,
    pub max_tokens: i64,
    pub chunk_overlap: i64,
}

impl SchemaEntity for Segmentation {
    fn schema() -> &'static EntitySchema {
        &SEGMENTATION_SCHEMA
    }

    fn check_correlations(&self, path: &FieldPath) -> Result<(), SchemaError> {
        let entity = Self::schema().name;

        if self.max_tokens <= 0 {
            return Err(SchemaError::constraint(
                entity,
                path.key("max_tokens"),
                "max_tokens must be greater than 0",
            ));
        }

        if self.chunk_overlap < 0 {
            return Err(SchemaError::constraint(
                entity,
                path.key("chunk_overlap"),
                "chunk_overlap cannot be negative",
            ));
        }

        if self.chunk_overlap >= self.max_tokens {
            return Err(SchemaError::constraint(
                entity,
                path.key("chunk_overlap"),
                "chunk_overlap must be less than max_tokens",
            ));
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub pre_processing_rules: Field<Vec<PreProcessingRule>>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub segmentation: Field<Segmentation>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub parent_mode: Field<ParentMode>,
    /// Child chunk settings, only meaningful in hierarchical mode
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub subchunk_segmentation: Field<Segmentation>,
}

impl Rule {
    /// Whether the pre-processing rule with `id` is present and enabled
    pub fn is_enabled(&self, id: &str) -> bool {
        self.pre_processing_rules
            .as_option()
            .is_some_and(|rules| rules.iter().any(|rule| rule.id == id && rule.enabled))
    }
}

impl SchemaEntity for Rule {
    fn schema() -> &'static EntitySchema {
        &RULE_SCHEMA
    }

    fn check_correlations(&self, path: &FieldPath) -> Result<(), SchemaError> {
        if let Some(segmentation) = self.segmentation.as_option() {
            segmentation.check_correlations(&path.key("segmentation"))?;
        }

        if let Some(segmentation) = self.subchunk_segmentation.as_option() {
            segmentation.check_correlations(&path.key("subchunk_segmentation"))?;
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessRule {
    pub mode: ProcessMode,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub rules: Field<Rule>,
}

impl SchemaEntity for ProcessRule {
    fn schema() -> &'static EntitySchema {
        &PROCESS_RULE_SCHEMA
    }

    fn check_correlations(&self, path: &FieldPath) -> Result<(), SchemaError> {
        let entity = Self::schema().name;
        let rules_path = path.key("rules");

        let Some(rules) = self.rules.as_option() else {
            return match self.mode {
                ProcessMode::Automatic => Ok(()),
                mode => Err(SchemaError::constraint(
                    entity,
                    rules_path,
                    format!("rules are required in '{}' mode", mode),
                )),
            };
        };

        if self.mode == ProcessMode::Hierarchical && !rules.parent_mode.is_present() {
            return Err(SchemaError::constraint(
                entity,
                rules_path.key("parent_mode"),
                "parent_mode is required in 'hierarchical' mode",
            ));
        }

        rules.check_correlations(&rules_path)
    }
}
