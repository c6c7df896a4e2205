//! CLI module for the knowledge config schema tool
//!
//! Provides subcommands:
//! - `validate`: validate a JSON payload file against an entity
//! - `schema`: print an entity's schema descriptor
//! - `entities`: list the entities that can be validated

pub mod schema;
pub mod validate;

use anyhow::Context;
use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::infrastructure::logging;

/// Validate knowledge-base ingestion payloads
#[derive(Parser)]
#[command(name = "kb-config-schema")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Validate a JSON payload file and print its normalized form
    Validate(validate::ValidateArgs),

    /// Print the schema descriptor of an entity as JSON
    Schema(schema::SchemaArgs),

    /// List the entities that can be validated
    Entities,
}

/// Load `.env`, the application config and install logging
pub(crate) fn bootstrap() -> anyhow::Result<AppConfig> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load application config")?;
    logging::init_logging(&config.logging);

    Ok(config)
}
