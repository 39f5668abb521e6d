//! ---
//! mv_section: "05-networking-external-interfaces"
//! mv_subsection: "binary"
//! mv_type: "source"
//! mv_scope: "code"
//! mv_description: "Control CLI that reproduces or clears a Megaverse goal map."
//! mv_version: "v0.1.0"
//! mv_owner: "tbd"
//! ---
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use clap::{ArgAction, Args, CommandFactory, Parser, Subcommand};
use megaverse_api::{ClientSettings, MegaverseClient};
use megaverse_common::config::{AppConfig, ConfigOverrides, LoadedAppConfig};
use megaverse_common::logging::{self, LogFormat};
use megaverse_common::version::VersionInfo;
use megaverse_core::WalkMode;
use tracing::info;

mod goal;
mod walk;

const SERVICE_NAME: &str = "megaversectl";

#[derive(Debug, Parser)]
#[command(
    author,
    disable_version_flag = true,
    about = "Reproduce or clear a Megaverse goal map through the REST API",
    long_about = None
)]
struct Cli {
    #[arg(
        short = 'V',
        long = "version",
        action = ArgAction::SetTrue,
        help = "Print extended version information and exit"
    )]
    version: bool,
    #[command(flatten)]
    connection: ConnectionArgs,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Create every entity of the goal map")]
    Apply(walk::WalkOptions),
    #[command(about = "Delete every entity of the goal map")]
    Reset(walk::WalkOptions),
    #[command(about = "Print the calls a walk would issue without issuing them")]
    Plan(walk::PlanOptions),
    #[command(about = "Fetch and print the goal map")]
    Goal(goal::GoalOptions),
}

/// Connection and logging overrides shared by every subcommand.
#[derive(Debug, Args)]
struct ConnectionArgs {
    /// Configuration file (defaults to megaverse.toml or configs/megaverse.toml).
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// API root URL.
    #[arg(long = "base-url", value_name = "URL", env = "MEGAVERSE_BASE_URL", global = true)]
    base_url: Option<String>,

    /// Candidate identifier sent with every request.
    #[arg(
        long = "candidate-id",
        value_name = "ID",
        env = "MEGAVERSE_CANDIDATE_ID",
        global = true
    )]
    candidate_id: Option<String>,

    /// Minimum spacing between requests, in milliseconds.
    #[arg(long = "min-interval-ms", value_name = "MS", global = true)]
    min_interval_ms: Option<u64>,

    /// Console log format: `pretty` or `structured-json` (alias `json`).
    #[arg(long = "log-format", value_name = "FORMAT", global = true)]
    log_format: Option<LogFormat>,
}

impl ConnectionArgs {
    fn resolve(&self) -> Result<LoadedAppConfig> {
        let mut candidates = Vec::new();
        if let Some(path) = &self.config {
            if !path.exists() {
                return Err(anyhow!("config file {} does not exist", path.display()));
            }
            candidates.push(path.clone());
        }
        candidates.push(PathBuf::from("megaverse.toml"));
        candidates.push(PathBuf::from("configs/megaverse.toml"));

        let overrides = ConfigOverrides {
            base_url: self.base_url.clone(),
            candidate_id: self.candidate_id.clone(),
            min_request_interval: self.min_interval_ms.map(Duration::from_millis),
            log_format: self.log_format,
        };
        AppConfig::resolve(candidates.as_slice(), &overrides)
    }
}

/// Build the HTTP client from the resolved configuration.
pub(crate) fn build_client(config: &AppConfig) -> Result<MegaverseClient> {
    MegaverseClient::new(ClientSettings {
        base_url: config.api.base_url.clone(),
        candidate_id: config.api.candidate_id.clone(),
        min_request_interval: config.api.min_request_interval,
        request_timeout: config.api.request_timeout,
    })
    .context("failed to construct megaverse client")
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let version = VersionInfo::current();
    if cli.version {
        println!("{}", version.extended());
        return Ok(());
    }
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let loaded = cli.connection.resolve()?;
    logging::init_tracing(SERVICE_NAME, &loaded.config.logging)?;
    info!(
        version = %version.banner(),
        config = %loaded
            .source
            .as_ref()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| "defaults".to_owned()),
        base_url = %loaded.config.api.base_url,
        "configuration loaded"
    );

    let config = &loaded.config;
    match command {
        Commands::Apply(options) => walk::run(WalkMode::Apply, &options, config),
        Commands::Reset(options) => walk::run(WalkMode::Reset, &options, config),
        Commands::Plan(options) => walk::plan(&options, config),
        Commands::Goal(options) => goal::run(&options, config),
    }
}
