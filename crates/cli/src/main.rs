//! Shiptalk CLI
//!
//! Register, edit, inspect and remove shipping-industry experts from the
//! command line.

mod commands;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use shiptalk_client::{ClientConfig, ExpertClient};
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt};

/// Shiptalk CLI: manage expert records.
#[derive(Parser, Debug)]
#[command(name = "shiptalk", version, about)]
struct Cli {
    /// Experts API base URL. Overrides the config file.
    #[arg(long, env = "SHIPTALK_API_URL", global = true)]
    endpoint: Option<String>,

    /// TOML config file with `endpoint` and `timeout_secs`.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format.
    #[arg(long, default_value = "text", global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Args, Debug)]
struct IdArg {
    /// Expert ID.
    id: String,
}

#[derive(Args, Debug)]
struct UpdateArgs {
    /// Expert ID.
    id: String,
    #[command(flatten)]
    fields: commands::fields::FieldArgs,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List all experts.
    List,
    /// Show one expert.
    Get(IdArg),
    /// Register a new expert.
    Create(commands::fields::FieldArgs),
    /// Edit an existing expert.
    Update(UpdateArgs),
    /// Delete an expert.
    Delete(commands::delete::DeleteArgs),
    /// Check a draft locally without submitting it.
    Validate(commands::validate::ValidateArgs),
}

fn load_config(cli: &Cli) -> anyhow::Result<ClientConfig> {
    let config = match &cli.config {
        Some(path) => ClientConfig::from_toml_file(path)?,
        None => ClientConfig::from_env(),
    };
    Ok(match &cli.endpoint {
        Some(endpoint) => config.with_endpoint(endpoint),
        None => config,
    })
}

fn connect(cli: &Cli) -> anyhow::Result<ExpertClient> {
    let config = load_config(cli)?;
    debug!(endpoint = %config.endpoint, "using experts API");
    Ok(ExpertClient::from_config(&config)?)
}

async fn run(cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Command::List => commands::list::run(&connect(cli)?, &cli.format).await,
        Command::Get(args) => commands::get::run(&connect(cli)?, &args.id, &cli.format).await,
        Command::Create(args) => commands::create::run(&connect(cli)?, args, &cli.format).await,
        Command::Update(args) => {
            commands::update::run(&connect(cli)?, &args.id, &args.fields, &cli.format).await
        }
        Command::Delete(args) => commands::delete::run(&connect(cli)?, args, &cli.format).await,
        Command::Validate(args) => commands::validate::run(args, &cli.format),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    run(&cli).await
}
