//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Folio portfolio renderer CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Site root directory (default: current directory)
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Output directory path (relative to site root)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Config file name (default: folio.toml)
    #[arg(short = 'C', long, default_value = "folio.toml")]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Project list controls shared by Build and List commands.
///
/// These mirror the three filter controls on the page.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Free-text search query (case-insensitive)
    #[arg(short, long, default_value = "")]
    pub query: String,

    /// Only show projects carrying this tag
    #[arg(short, long, default_value = "")]
    pub tag: String,

    /// Sort mode: `alpha`, `stars`, anything else sorts by date
    #[arg(short, long, default_value = "recent")]
    pub sort: String,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Init a template site with default data documents
    Init {
        /// the name(path) of site directory, related to `root`
        name: Option<PathBuf>,
    },

    /// Render the page into the output directory
    Build {
        #[command(flatten)]
        filter: FilterArgs,

        /// Open the detail modal for the project with this title
        #[arg(long)]
        open: Option<String>,

        /// Minify the html content
        #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
        minify: Option<bool>,
    },

    /// Print the visible projects for the given controls
    List {
        #[command(flatten)]
        filter: FilterArgs,

        /// Print tags available to the tag filter as well
        #[arg(long)]
        tags: bool,
    },

    /// Show or flip the stored display theme
    Theme {
        #[arg(value_enum, default_value_t = ThemeAction::Show)]
        action: ThemeAction,
    },
}

/// What the `theme` subcommand does.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeAction {
    /// Print the resolved theme
    Show,
    /// Flip and persist the theme
    Toggle,
}

#[allow(unused)]
impl Cli {
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Commands::Init { .. })
    }
    pub const fn is_build(&self) -> bool {
        matches!(self.command, Commands::Build { .. })
    }
    pub const fn is_list(&self) -> bool {
        matches!(self.command, Commands::List { .. })
    }

    /// Filter controls passed on the command line, if the command has any.
    pub fn filter(&self) -> FilterArgs {
        match &self.command {
            Commands::Build { filter, .. } | Commands::List { filter, .. } => filter.clone(),
            _ => FilterArgs::default(),
        }
    }
}
