//! `addon-overlay sources` command

use anyhow::Result;

use crate::cli::SourcesArgs;
use crate::commands::open_project;
use addon_overlay::core::alias::AliasTable;
use addon_overlay::ops::seed_path_mappings;
use addon_overlay::{GlobalContext, PackageDescriptor};

pub fn execute(args: SourcesArgs, ctx: &GlobalContext) -> Result<()> {
    let project = open_project(ctx)?;

    let mut aliases = AliasTable::new();
    seed_path_mappings(&mut aliases, &project);

    let addon =
        PackageDescriptor::resolve(&args.addon, &aliases, project.root(), project.settings())?;

    if !project.addons().iter().any(|a| a == &addon.name) {
        tracing::warn!("{} is not a configured addon", addon.name);
    }

    for source in &addon.declared_sources {
        println!("{}", source);
    }

    Ok(())
}
