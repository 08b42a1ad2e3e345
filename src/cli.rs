use crate::config::UnresolvedPolicy;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "modgate")]
#[command(about = "Verify that modules only use each other's public packages")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Unit manifest or directory of manifests (defaults to current directory)
    /// Used when no subcommand is specified
    #[arg(default_value = ".")]
    pub path: PathBuf,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Check module boundaries and cycles (default behavior)
    Check(CheckArgs),

    /// Generate a starter .modgate.toml configuration file
    Init(InitArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct CheckArgs {
    /// Unit manifest (*.json, *.toml) or a directory searched for *.units.json / *.units.toml
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Package segment marking module internals (overrides config)
    #[arg(long)]
    pub internal_marker: Option<String>,

    /// What to do with references to unknown symbols (overrides config)
    #[arg(long)]
    pub on_unresolved: Option<UnresolvedPolicy>,

    /// Base package whose direct sub-packages are the modules (overrides config)
    #[arg(long)]
    pub root_package: Option<String>,

    /// Only report findings for this module
    #[arg(short, long)]
    pub module: Option<String>,

    /// List modules and skipped references in text output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Default for CheckArgs {
    fn default() -> Self {
        Self {
            path: PathBuf::from("."),
            format: OutputFormat::Text,
            output: None,
            internal_marker: None,
            on_unresolved: None,
            root_package: None,
            module: None,
            verbose: false,
        }
    }
}

#[derive(Parser, Debug, Clone)]
pub struct InitArgs {
    /// Directory where to create .modgate.toml (defaults to current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Markdown,
    Json,
}
