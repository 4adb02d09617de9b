//! `addon-overlay configure` command
//!
//! Reads a build configuration document, applies the overlay and writes
//! the result back out.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};

use crate::cli::ConfigureArgs;
use crate::commands::open_project;
use addon_overlay::core::build_config::{BuildConfiguration, BuildTarget, Environment};
use addon_overlay::ops::{configure, ConfigureOptions};
use addon_overlay::util::diagnostic::emit_all;
use addon_overlay::util::fs;
use addon_overlay::GlobalContext;

fn read_input(input: &Path) -> Result<String> {
    if input == Path::new("-") {
        let mut contents = String::new();
        std::io::stdin()
            .read_to_string(&mut contents)
            .context("failed to read configuration from stdin")?;
        Ok(contents)
    } else {
        fs::read_to_string(input)
    }
}

pub fn execute(args: ConfigureArgs, ctx: &GlobalContext) -> Result<()> {
    let contents = read_input(&args.input)?;
    let mut config = BuildConfiguration::from_json(&contents).with_context(|| {
        format!(
            "failed to parse build configuration {}",
            args.input.display()
        )
    })?;

    let options = ConfigureOptions {
        environment: if args.production {
            Environment::Production
        } else {
            Environment::Development
        },
        target: if args.server {
            BuildTarget::Node
        } else {
            BuildTarget::Web
        },
    };

    let project = open_project(ctx)?;
    let composition = configure(&project, &mut config, &options)?;
    emit_all(&composition.diagnostics, ctx.color());

    let output = config.to_json_pretty()?;
    match &args.output {
        Some(path) => {
            fs::write_string(path, &output)?;
            tracing::info!("Wrote {}", path.display());
        }
        None => println!("{}", output),
    }

    Ok(())
}
