//! Authorization and API settings for external knowledge sources

use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::schema::{
    EntitySchema, Field, FieldKind, FieldPath, LiteralSet, SchemaEntity, SchemaError,
};

/// Credential scheme used by an external knowledge API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthorizationConfigType {
    Basic,
    Bearer,
    Custom,
}

impl LiteralSet for AuthorizationConfigType {
    const VALUES: &'static [&'static str] = &["basic", "bearer", "custom"];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Bearer => "bearer",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for AuthorizationConfigType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether an external knowledge API is called with a key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AuthorizationType {
    NoAuth,
    ApiKey,
}

impl LiteralSet for AuthorizationType {
    const VALUES: &'static [&'static str] = &["no-auth", "api-key"];

    fn as_str(&self) -> &'static str {
        match self {
            Self::NoAuth => "no-auth",
            Self::ApiKey => "api-key",
        }
    }
}

impl fmt::Display for AuthorizationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

static AUTHORIZATION_CONFIG_SCHEMA: Lazy<EntitySchema> = Lazy::new(|| {
    EntitySchema::new("AuthorizationConfig")
        .required_nullable("type", AuthorizationConfigType::field_kind())
        .optional("api_key", FieldKind::String)
        .optional("header", FieldKind::String)
});

static AUTHORIZATION_SCHEMA: Lazy<EntitySchema> = Lazy::new(|| {
    EntitySchema::new("Authorization")
        .required("type", AuthorizationType::field_kind())
        .optional("config", FieldKind::object(&AUTHORIZATION_CONFIG_SCHEMA))
});

static PROCESS_STATUS_SETTING_SCHEMA: Lazy<EntitySchema> = Lazy::new(|| {
    EntitySchema::new("ProcessStatusSetting")
        .required("request_method", FieldKind::String)
        .required("url", FieldKind::String)
});

static API_TEMPLATE_SETTING_SCHEMA: Lazy<EntitySchema> = Lazy::new(|| {
    EntitySchema::new("ApiTemplateSetting")
        .required("method", FieldKind::String)
        .required("url", FieldKind::String)
        .required("request_method", FieldKind::String)
        .required("api_token", FieldKind::String)
        .optional("headers", FieldKind::Map)
        .optional("params", FieldKind::Map)
});

/// Credentials for an external knowledge API.
///
/// `auth_type` is `None` when the payload sends `"type": null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorizationConfig {
    #[serde(rename = "type")]
    pub auth_type: Option<AuthorizationConfigType>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub api_key: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub header: Field<String>,
}

impl SchemaEntity for AuthorizationConfig {
    fn schema() -> &'static EntitySchema {
        &AUTHORIZATION_CONFIG_SCHEMA
    }

    fn check_correlations(&self, path: &FieldPath) -> Result<(), SchemaError> {
        let entity = Self::schema().name;

        match self.auth_type {
            Some(kind @ (AuthorizationConfigType::Basic | AuthorizationConfigType::Bearer))
                if !self.api_key.is_present() =>
            {
                Err(SchemaError::constraint(
                    entity,
                    path.key("api_key"),
                    format!("api_key is required for '{}' authorization", kind),
                ))
            }
            Some(AuthorizationConfigType::Custom) if !self.api_key.is_present() => {
                Err(SchemaError::constraint(
                    entity,
                    path.key("api_key"),
                    "api_key is required for 'custom' authorization",
                ))
            }
            Some(AuthorizationConfigType::Custom) if !self.header.is_present() => {
                Err(SchemaError::constraint(
                    entity,
                    path.key("header"),
                    "header is required for 'custom' authorization",
                ))
            }
            _ => Ok(()),
        }
    }
}

/// Authorization settings for an external knowledge API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Authorization {
    #[serde(rename = "type")]
    pub auth_type: AuthorizationType,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub config: Field<AuthorizationConfig>,
}

impl SchemaEntity for Authorization {
    fn schema() -> &'static EntitySchema {
        &AUTHORIZATION_SCHEMA
    }

    fn check_correlations(&self, path: &FieldPath) -> Result<(), SchemaError> {
        let config_path = path.key("config");

        match (&self.auth_type, self.config.as_option()) {
            (AuthorizationType::ApiKey, None) => Err(SchemaError::constraint(
                Self::schema().name,
                config_path,
                "config is required for 'api-key' authorization",
            )),
            (_, Some(config)) => config.check_correlations(&config_path),
            (AuthorizationType::NoAuth, None) => Ok(()),
        }
    }
}

/// Endpoint polled for the processing status of an external job
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessStatusSetting {
    pub request_method: String,
    pub url: String,
}

impl SchemaEntity for ProcessStatusSetting {
    fn schema() -> &'static EntitySchema {
        &PROCESS_STATUS_SETTING_SCHEMA
    }
}

/// Request template for calling an external knowledge API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiTemplateSetting {
    pub method: String,
    pub url: String,
    pub request_method: String,
    pub api_token: String,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub headers: Field<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub params: Field<Map<String, Value>>,
}

impl SchemaEntity for ApiTemplateSetting {
    fn schema() -> &'static EntitySchema {
        &API_TEMPLATE_SETTING_SCHEMA
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::schema::ValidationOptions;
    use serde_json::json;

    fn strict() -> ValidationOptions {
        ValidationOptions::default().with_strict_correlations(true)
    }

    #[test]
    fn test_null_type_is_unset() {
        let config = AuthorizationConfig::from_value(&json!({"type": null})).unwrap();

        assert_eq!(config.auth_type, None);
        assert!(config.api_key.is_absent());
        assert!(config.header.is_absent());
    }

    #[test]
    fn test_type_key_is_required() {
        let error = AuthorizationConfig::from_value(&json!({"api_key": "k"})).unwrap_err();
        assert_eq!(
            error,
            SchemaError::missing_field("AuthorizationConfig", FieldPath::root().key("type"))
        );
    }

    #[test]
    fn test_bearer_without_key_is_loose_by_default() {
        let config = AuthorizationConfig::from_value(&json!({"type": "bearer"})).unwrap();
        assert_eq!(config.auth_type, Some(AuthorizationConfigType::Bearer));

        let error =
            AuthorizationConfig::from_value_with(&json!({"type": "bearer"}), strict()).unwrap_err();
        assert!(matches!(error, SchemaError::ConstraintViolation { .. }));
        assert_eq!(error.path().unwrap().to_string(), "api_key");
    }

    #[test]
    fn test_custom_requires_header_when_strict() {
        let input = json!({"type": "custom", "api_key": "secret"});
        let error = AuthorizationConfig::from_value_with(&input, strict()).unwrap_err();
        assert_eq!(error.path().unwrap().to_string(), "header");

        let input = json!({"type": "custom", "api_key": "secret", "header": "X-Api-Key"});
        assert!(AuthorizationConfig::from_value_with(&input, strict()).is_ok());
    }

    #[test]
    fn test_authorization_type_literals() {
        let error = Authorization::from_value(&json!({"type": "oauth"})).unwrap_err();
        match error {
            SchemaError::InvalidEnumValue { allowed, actual, .. } => {
                assert_eq!(allowed, vec!["no-auth", "api-key"]);
                assert_eq!(actual, "oauth");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_authorization_nested_config_path() {
        let input = json!({"type": "api-key", "config": {"type": "basic"}});
        assert!(Authorization::from_value(&input).is_ok());

        let error = Authorization::from_value_with(&input, strict()).unwrap_err();
        assert_eq!(error.entity(), "AuthorizationConfig");
        assert_eq!(error.path().unwrap().to_string(), "config.api_key");
    }

    #[test]
    fn test_api_key_authorization_requires_config_when_strict() {
        let input = json!({"type": "api-key"});
        assert!(Authorization::from_value(&input).unwrap().config.is_absent());

        let error = Authorization::from_value_with(&input, strict()).unwrap_err();
        assert_eq!(error.entity(), "Authorization");
    }

    #[test]
    fn test_api_template_setting() {
        let input = json!({
            "method": "retrieval",
            "url": "https://kb.example.com/retrieval",
            "request_method": "POST",
            "api_token": "token",
            "headers": {"X-Trace": true},
        });
        let setting = ApiTemplateSetting::from_value(&input).unwrap();

        assert_eq!(setting.headers.as_option().unwrap()["X-Trace"], json!(true));
        assert!(setting.params.is_absent());
        assert_eq!(setting.to_value().unwrap(), input);
    }

    #[test]
    fn test_api_template_params_must_be_mapping() {
        let input = json!({
            "method": "retrieval",
            "url": "u",
            "request_method": "GET",
            "api_token": "t",
            "params": ["a"],
        });
        let error = ApiTemplateSetting::from_value(&input).unwrap_err();
        assert_eq!(
            error,
            SchemaError::type_mismatch(
                "ApiTemplateSetting",
                FieldPath::root().key("params"),
                "object",
                "list"
            )
        );
    }

    #[test]
    fn test_process_status_setting_missing_url() {
        let error = ProcessStatusSetting::from_value(&json!({"request_method": "GET"})).unwrap_err();
        assert_eq!(error.path().unwrap().to_string(), "url");
    }
}
