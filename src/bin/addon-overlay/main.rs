//! addon-overlay CLI - module alias composition for addon-based frontends

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use addon_overlay::GlobalContext;
use cli::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging; stdout is reserved for command output
    let filter = if cli.verbose {
        EnvFilter::new("addon_overlay=debug")
    } else {
        EnvFilter::new("addon_overlay=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let mut ctx = match &cli.project {
        Some(dir) => GlobalContext::with_cwd(dir.clone())?,
        None => GlobalContext::new()?,
    };
    ctx.set_verbose(cli.verbose);
    ctx.set_color(!cli.no_color);

    // Execute command
    match cli.command {
        Commands::Aliases(args) => commands::aliases::execute(args, &ctx),
        Commands::Configure(args) => commands::configure::execute(args, &ctx),
        Commands::Sources(args) => commands::sources::execute(args, &ctx),
        Commands::Check(args) => commands::check::execute(args, &ctx),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
