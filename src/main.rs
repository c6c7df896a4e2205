use clap::Parser;
use kb_config_schema::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Validate(args) => cli::validate::run(args).await,
        Command::Schema(args) => cli::schema::run(args),
        Command::Entities => cli::schema::list_entities(),
    }
}
