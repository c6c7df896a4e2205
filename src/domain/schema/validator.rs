//! Generic schema interpreter
//!
//! Walks an untyped JSON value against an [`EntitySchema`], producing a
//! normalized value: declared defaults filled in, integral floats turned
//! into integers, absent optional keys left absent and explicit nulls kept.
//! Unless `strict_scalars` is set, numeric strings and 0/1 or yes/no style
//! booleans are coerced to the declared scalar type.
//! Typed entities are then decoded from the normalized value.

use serde_json::{Map, Number, Value};
use tracing::debug;

use super::descriptor::{EntitySchema, FieldKind, FieldSpec, Presence};
use super::entity::SchemaEntity;
use super::error::SchemaError;
use super::options::ValidationOptions;
use super::path::FieldPath;

/// Stateless validator parameterised by [`ValidationOptions`]
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaValidator {
    options: ValidationOptions,
}

impl SchemaValidator {
    pub fn new(options: ValidationOptions) -> Self {
        Self { options }
    }

    /// Validate a payload into a typed entity
    pub fn validate<T: SchemaEntity>(&self, input: &Value) -> Result<T, SchemaError> {
        let schema = T::schema();
        debug!(entity = schema.name, "Validating payload");

        let result = self.decode::<T>(schema, input);

        if let Err(e) = &result {
            debug!(entity = schema.name, error = %e, "Payload rejected");
        }

        result
    }

    fn decode<T: SchemaEntity>(
        &self,
        schema: &'static EntitySchema,
        input: &Value,
    ) -> Result<T, SchemaError> {
        let normalized = self.normalize(schema, input)?;
        let entity: T = serde_json::from_value(normalized)
            .map_err(|e| SchemaError::decode(schema.name, e.to_string()))?;

        if self.options.strict_correlations {
            entity.check_correlations(&FieldPath::root())?;
        }

        Ok(entity)
    }

    /// Validate a payload against a schema, returning the normalized value
    pub fn normalize(&self, schema: &EntitySchema, input: &Value) -> Result<Value, SchemaError> {
        self.normalize_object(schema, input, &FieldPath::root())
    }

    fn normalize_object(
        &self,
        schema: &EntitySchema,
        input: &Value,
        path: &FieldPath,
    ) -> Result<Value, SchemaError> {
        let Value::Object(map) = input else {
            return Err(SchemaError::type_mismatch(
                schema.name,
                path.clone(),
                format!("object ({})", schema.name),
                describe(input),
            ));
        };

        if self.options.reject_unknown_fields {
            if let Some(key) = map.keys().find(|key| schema.field(key).is_none()) {
                return Err(SchemaError::unknown_field(schema.name, path.key(key.as_str())));
            }
        }

        let mut normalized = Map::new();

        for spec in &schema.fields {
            let field_path = path.key(spec.name);

            if let Some(value) = self.resolve_field(schema, spec, map.get(spec.name), &field_path)? {
                normalized.insert(spec.name.to_string(), value);
            }
        }

        Ok(Value::Object(normalized))
    }

    /// Resolve one declared field; `None` means the key stays absent
    fn resolve_field(
        &self,
        schema: &EntitySchema,
        spec: &FieldSpec,
        value: Option<&Value>,
        path: &FieldPath,
    ) -> Result<Option<Value>, SchemaError> {
        match (value, &spec.presence) {
            (None, Presence::Required | Presence::RequiredNullable)
            | (Some(Value::Null), Presence::Required) => {
                Err(SchemaError::missing_field(schema.name, path.clone()))
            }
            (None, Presence::Optional) => Ok(None),
            (None, Presence::Default(default)) => Ok(Some(default.clone())),
            (Some(Value::Null), Presence::RequiredNullable | Presence::Optional) => {
                Ok(Some(Value::Null))
            }
            (Some(value), _) => self
                .normalize_value(schema.name, &spec.kind, value, path)
                .map(Some),
        }
    }

    fn normalize_value(
        &self,
        entity: &'static str,
        kind: &FieldKind,
        value: &Value,
        path: &FieldPath,
    ) -> Result<Value, SchemaError> {
        let mismatch = || SchemaError::type_mismatch(entity, path.clone(), kind.expected(), describe(value));

        match kind {
            FieldKind::String => match value {
                Value::String(_) => Ok(value.clone()),
                _ => Err(mismatch()),
            },
            FieldKind::Bool => match value {
                Value::Bool(_) => Ok(value.clone()),
                _ if self.options.strict_scalars => Err(mismatch()),
                _ => bool_from_scalar(value).map(Value::Bool).ok_or_else(mismatch),
            },
            FieldKind::Integer => match value {
                Value::Number(number) => integer_from_number(number)
                    .map(Value::from)
                    .ok_or_else(mismatch),
                _ if self.options.strict_scalars => Err(mismatch()),
                Value::Bool(flag) => Ok(Value::from(i64::from(*flag))),
                Value::String(text) => integer_from_text(text)
                    .map(Value::from)
                    .ok_or_else(mismatch),
                _ => Err(mismatch()),
            },
            FieldKind::Float => match value {
                Value::Number(number) => float_value(number.as_f64()).ok_or_else(mismatch),
                _ if self.options.strict_scalars => Err(mismatch()),
                Value::Bool(flag) => float_value(Some(if *flag { 1.0 } else { 0.0 }))
                    .ok_or_else(mismatch),
                Value::String(text) => {
                    float_value(text.trim().parse::<f64>().ok()).ok_or_else(mismatch)
                }
                _ => Err(mismatch()),
            },
            FieldKind::Literal { allowed } => match value {
                Value::String(text) if allowed.contains(&text.as_str()) => Ok(value.clone()),
                _ => Err(SchemaError::invalid_enum_value(
                    entity,
                    path.clone(),
                    allowed,
                    render(value),
                )),
            },
            FieldKind::Object { schema } => match value {
                Value::Object(_) => self.normalize_object(schema, value, path),
                _ => Err(mismatch()),
            },
            FieldKind::List { item } => match value {
                Value::Array(items) => items
                    .iter()
                    .enumerate()
                    .map(|(index, element)| {
                        self.normalize_value(entity, item, element, &path.index(index))
                    })
                    .collect::<Result<Vec<_>, _>>()
                    .map(Value::Array),
                _ => Err(mismatch()),
            },
            FieldKind::Map => match value {
                Value::Object(_) => Ok(value.clone()),
                _ => Err(mismatch()),
            },
        }
    }
}

/// Integer view of a JSON number; integral floats within range are accepted
fn integer_from_number(number: &Number) -> Option<i64> {
    if let Some(integer) = number.as_i64() {
        return Some(integer);
    }

    if number.is_u64() {
        return None;
    }

    let float = number.as_f64()?;
    let in_range = float >= i64::MIN as f64 && float < i64::MAX as f64;

    (float.fract() == 0.0 && in_range).then_some(float as i64)
}

/// Integer parsed from text: plain integers, or decimals whose fraction is all zeros
fn integer_from_text(text: &str) -> Option<i64> {
    let text = text.trim();
    let (whole, fraction) = text.split_once('.').unwrap_or((text, ""));

    if !fraction.chars().all(|c| c == '0') {
        return None;
    }

    whole.parse().ok()
}

/// Boolean view of a non-boolean scalar: 0/1 and the usual yes/no spellings
fn bool_from_scalar(value: &Value) -> Option<bool> {
    match value {
        Value::Number(number) => match integer_from_number(number)? {
            0 => Some(false),
            1 => Some(true),
            _ => None,
        },
        Value::String(text) => match text.trim().to_ascii_lowercase().as_str() {
            "1" | "on" | "t" | "true" | "y" | "yes" => Some(true),
            "0" | "off" | "f" | "false" | "n" | "no" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Finite float as a JSON number
fn float_value(float: Option<f64>) -> Option<Value> {
    float.and_then(Number::from_f64).map(Value::Number)
}

/// JSON type name used as the `actual` side of a type mismatch
fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(number) if number.is_f64() => "float",
        Value::Number(number) if number.as_i64().is_none() => "integer (out of i64 range)",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
    .to_string()
}

/// Offending value as shown in enum errors: raw text for strings, JSON otherwise
fn render(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
