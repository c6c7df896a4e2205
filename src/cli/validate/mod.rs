//! Validate command - checks a payload file against an entity schema

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use serde_json::Value;
use tracing::{error, info};

use crate::domain::{DomainError, EntityKind, SchemaValidator, ValidationOptions};

/// Arguments for the validate command
#[derive(Args, Clone)]
pub struct ValidateArgs {
    /// JSON payload file to validate
    pub file: PathBuf,

    /// Entity to validate the payload as (e.g. knowledge-config, retrieval-model)
    #[arg(long, short, default_value = "knowledge-config")]
    pub entity: EntityKind,

    /// Also enforce cross-field correlations
    #[arg(long)]
    pub strict: bool,

    /// Only accept scalars of the exact JSON type (no "500" for integers)
    #[arg(long)]
    pub strict_scalars: bool,

    /// Reject keys the entity does not declare
    #[arg(long)]
    pub reject_unknown: bool,

    /// Enable every check: correlations, exact scalars and unknown keys
    #[arg(long)]
    pub all_checks: bool,

    /// Print compact JSON instead of pretty-printed
    #[arg(long)]
    pub compact: bool,
}

impl ValidateArgs {
    /// Flags only switch checks on; they never relax the loaded config
    fn options(&self, base: ValidationOptions) -> ValidationOptions {
        if self.all_checks {
            return ValidationOptions::strict();
        }

        base.with_strict_correlations(base.strict_correlations || self.strict)
            .with_strict_scalars(base.strict_scalars || self.strict_scalars)
            .with_reject_unknown_fields(base.reject_unknown_fields || self.reject_unknown)
    }
}

/// Run the validate command
pub async fn run(args: ValidateArgs) -> anyhow::Result<()> {
    let config = super::bootstrap()?;
    let options = args.options(config.validation);

    info!(
        file = %args.file.display(),
        entity = %args.entity,
        ?options,
        "Validating payload file"
    );

    match validate_file(&args.file, args.entity, options).await {
        Ok(normalized) => {
            println!("{}", render(&normalized, args.compact)?);
            Ok(())
        }
        Err(e) => {
            if let Some(schema_error) = e
                .downcast_ref::<DomainError>()
                .and_then(DomainError::as_schema_error)
            {
                error!(error = %schema_error, "Payload is invalid");
                println!("{}", render(&serde_json::to_value(schema_error)?, args.compact)?);
            }

            Err(e)
        }
    }
}

/// Read `path`, validate it as `entity` and return the normalized payload
pub async fn validate_file(
    path: &Path,
    entity: EntityKind,
    options: ValidationOptions,
) -> anyhow::Result<Value> {
    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read payload file: {}", path.display()))?;

    let input: Value = serde_json::from_str(&text).map_err(DomainError::from)?;
    let normalized = entity.normalize(&SchemaValidator::new(options), &input)?;

    Ok(normalized)
}

fn render(value: &Value, compact: bool) -> serde_json::Result<String> {
    if compact {
        serde_json::to_string(value)
    } else {
        serde_json::to_string_pretty(value)
    }
}
