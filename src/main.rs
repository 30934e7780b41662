//! Folio - renders a portfolio page from a site profile and a project list.

mod build;
mod cli;
mod config;
mod dom;
mod init;
mod list;
mod logger;
mod model;
mod notify;
mod page;
mod pipeline;
mod render;
mod source;
mod theme;
mod utils;

use anyhow::{Result, bail};
use build::build_page;
use clap::Parser;
use cli::{Cli, Commands};
use config::FolioConfig;
use init::new_site;
use list::list_projects;
use std::path::Path;
use theme::run_theme_command;

fn main() -> Result<()> {
    let cli: &'static Cli = Box::leak(Box::new(Cli::parse()));
    let config: &'static FolioConfig = Box::leak(Box::new(load_config(cli)?));

    match &cli.command {
        Commands::Init { name } => new_site(config, name.is_some()),
        Commands::Build { .. } => build_page(config, cli),
        Commands::List { .. } => list_projects(config, cli),
        Commands::Theme { action } => run_theme_command(config, *action),
    }
}

/// Load and validate configuration from CLI arguments
fn load_config(cli: &'static Cli) -> Result<FolioConfig> {
    let root = cli.root.as_deref().unwrap_or(Path::new("./"));
    let config_path = root.join(&cli.config);

    let mut config = if config_path.exists() {
        FolioConfig::from_path(&config_path)?
    } else {
        FolioConfig::default()
    };
    config.update_with_cli(cli);

    let config_exists = config.config_path.exists();
    if cli.is_init() && config_exists {
        bail!("Config file already exists. Remove it manually or init in a different path.")
    }

    if !cli.is_init() {
        config.validate()?;
    }

    Ok(config)
}
