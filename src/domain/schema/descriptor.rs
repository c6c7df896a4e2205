//! Data-driven schema descriptors
//!
//! Each entity declares its fields once as an [`EntitySchema`]; the generic
//! validator interprets these tables instead of per-entity validation code.

use serde::Serialize;
use serde_json::Value;

/// Semantic type of a field
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldKind {
    String,
    Bool,
    Integer,
    Float,
    /// Closed set of case-sensitive string literals
    Literal { allowed: &'static [&'static str] },
    /// Nested entity
    Object { schema: &'static EntitySchema },
    /// Ordered sequence of a single element kind
    List { item: Box<FieldKind> },
    /// String-keyed mapping of arbitrary JSON values
    Map,
}

impl FieldKind {
    pub fn literal(allowed: &'static [&'static str]) -> Self {
        Self::Literal { allowed }
    }

    pub fn object(schema: &'static EntitySchema) -> Self {
        Self::Object { schema }
    }

    pub fn list_of(item: FieldKind) -> Self {
        Self::List {
            item: Box::new(item),
        }
    }

    /// Human-readable name used in type mismatch errors
    pub fn expected(&self) -> String {
        match self {
            Self::String => "string".to_string(),
            Self::Bool => "boolean".to_string(),
            Self::Integer => "integer".to_string(),
            Self::Float => "float".to_string(),
            Self::Literal { .. } => "string literal".to_string(),
            Self::Object { schema } => format!("object ({})", schema.name),
            Self::List { item } => format!("list of {}", item.expected()),
            Self::Map => "object".to_string(),
        }
    }
}

/// Whether a field must be sent and what happens when it is not
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "presence", content = "default", rename_all = "snake_case")]
pub enum Presence {
    /// Must be present and non-null
    Required,
    /// Must be present; `null` is an accepted value
    RequiredNullable,
    /// May be absent or null; no default is filled in
    Optional,
    /// Filled with the given value when absent
    Default(Value),
}

/// Declaration of one field of an entity
#[derive(Debug, Clone, Serialize)]
pub struct FieldSpec {
    pub name: &'static str,
    #[serde(flatten)]
    pub presence: Presence,
    pub kind: FieldKind,
}

/// Declaration of an entity: its name and ordered fields
#[derive(Debug, Clone, Serialize)]
pub struct EntitySchema {
    pub name: &'static str,
    pub fields: Vec<FieldSpec>,
}

impl EntitySchema {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            fields: Vec::new(),
        }
    }

    pub fn required(self, name: &'static str, kind: FieldKind) -> Self {
        self.with_field(name, kind, Presence::Required)
    }

    pub fn required_nullable(self, name: &'static str, kind: FieldKind) -> Self {
        self.with_field(name, kind, Presence::RequiredNullable)
    }

    pub fn optional(self, name: &'static str, kind: FieldKind) -> Self {
        self.with_field(name, kind, Presence::Optional)
    }

    pub fn with_default(self, name: &'static str, kind: FieldKind, default: Value) -> Self {
        self.with_field(name, kind, Presence::Default(default))
    }

    fn with_field(mut self, name: &'static str, kind: FieldKind, presence: Presence) -> Self {
        self.fields.push(FieldSpec {
            name,
            presence,
            kind,
        });
        self
    }

    /// Look up a declared field by name
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|spec| spec.name == name)
    }

    pub fn required_fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter().filter(|spec| {
            matches!(
                spec.presence,
                Presence::Required | Presence::RequiredNullable
            )
        })
    }
}

/// A Rust enum backed by a closed set of wire literals
pub trait LiteralSet: Sized + Copy + 'static {
    /// Allowed wire values, in declaration order
    const VALUES: &'static [&'static str];

    fn as_str(&self) -> &'static str;

    fn field_kind() -> FieldKind {
        FieldKind::literal(Self::VALUES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn segmentation_like() -> EntitySchema {
        EntitySchema::new("Segmentation")
            .with_default("separator", FieldKind::String, json!("\n"))
            .required("max_tokens", FieldKind::Integer)
            .with_default("chunk_overlap", FieldKind::Integer, json!(0))
    }

    #[test]
    fn test_builder_keeps_declaration_order() {
        let schema = segmentation_like();
        let names: Vec<_> = schema.fields.iter().map(|spec| spec.name).collect();
        assert_eq!(names, vec!["separator", "max_tokens", "chunk_overlap"]);
    }

    #[test]
    fn test_required_fields() {
        let schema = segmentation_like();
        let required: Vec<_> = schema.required_fields().map(|spec| spec.name).collect();
        assert_eq!(required, vec!["max_tokens"]);
    }

    #[test]
    fn test_expected_names() {
        assert_eq!(
            FieldKind::list_of(FieldKind::String).expected(),
            "list of string"
        );
        assert_eq!(FieldKind::Map.expected(), "object");
    }

    #[test]
    fn test_descriptor_serialization() {
        let schema = segmentation_like();
        let value = serde_json::to_value(&schema).unwrap();

        assert_eq!(value["name"], "Segmentation");
        assert_eq!(value["fields"][0]["presence"], "default");
        assert_eq!(value["fields"][0]["default"], "\n");
        assert_eq!(value["fields"][1]["presence"], "required");
        assert_eq!(value["fields"][1]["kind"]["type"], "integer");
    }
}
