//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// addon-overlay - Compose module aliases for addon-based frontends
#[derive(Parser)]
#[command(name = "addon-overlay")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Project directory (defaults to the nearest one above the current directory)
    #[arg(long, global = true, env = "ADDON_OVERLAY_PROJECT")]
    pub project: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the composed alias table
    Aliases(AliasesArgs),

    /// Apply the overlay to a build configuration document
    Configure(ConfigureArgs),

    /// List the customizable files an addon declares
    Sources(SourcesArgs),

    /// Compose and report problems
    Check(CheckArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct AliasesArgs {
    /// Print the table as JSON
    #[arg(long)]
    pub json: bool,

    /// Print only the table's fingerprint
    #[arg(long, conflicts_with = "json")]
    pub fingerprint: bool,
}

#[derive(Args)]
pub struct ConfigureArgs {
    /// Configuration document to read (`-` for stdin)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Where to write the result (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Configure a production build
    #[arg(long)]
    pub production: bool,

    /// Configure the server bundle
    #[arg(long)]
    pub server: bool,
}

#[derive(Args)]
pub struct SourcesArgs {
    /// Addon package name
    pub addon: String,
}

#[derive(Args)]
pub struct CheckArgs {
    /// Fail on any warning
    #[arg(long)]
    pub strict: bool,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
