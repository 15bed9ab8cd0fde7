//! anq-scaff CLI tool

use anq_scaff_cli::AddCommand;
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "anq-scaff")]
#[command(version)]
#[command(about = "Scaffold unified-action CRUD resources", long_about = None)]
struct Cli {
    /// Show debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate model, schema, service and API files for a resource
    Add {
        /// Resource name (e.g. `user`, `order-item`); prompted when omitted
        name: Option<String>,
        /// Backing table name; prompted when omitted
        #[arg(long)]
        table: Option<String>,
        /// Comma-separated business fields (e.g. `name,email`); prompted when omitted
        #[arg(long)]
        fields: Option<String>,
        /// Project root containing Cargo.toml
        #[arg(long, default_value = ".")]
        path: PathBuf,
        /// API version directory (e.g. `v1`); defaults to the configured version
        #[arg(long = "version", value_name = "VERSION")]
        api_version: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    anq_scaff::observability::init_cli(cli.verbose)?;

    match cli.command {
        Commands::Add {
            name,
            table,
            fields,
            path,
            api_version,
        } => {
            let cmd = AddCommand::new(name, table, fields, path, api_version);
            cmd.execute()?;
        }
    }

    Ok(())
}
