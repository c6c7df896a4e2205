//! Schema and entities commands - describe what can be validated

use clap::Args;

use crate::domain::EntityKind;

/// Arguments for the schema command
#[derive(Args, Clone)]
pub struct SchemaArgs {
    /// Entity whose schema to print (e.g. segmentation, knowledge-config)
    pub entity: EntityKind,
}

/// Print an entity's schema descriptor
pub fn run(args: SchemaArgs) -> anyhow::Result<()> {
    super::bootstrap()?;

    println!(
        "{}",
        serde_json::to_string_pretty(args.entity.schema())?
    );

    Ok(())
}

/// List every entity kind with its schema name
pub fn list_entities() -> anyhow::Result<()> {
    super::bootstrap()?;

    println!("{:<24} SCHEMA", "ENTITY");
    for kind in EntityKind::ALL {
        println!("{:<24} {}", kind.name(), kind.schema().name);
    }

    Ok(())
}
