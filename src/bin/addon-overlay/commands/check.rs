//! `addon-overlay check` command
//!
//! Runs a full composition and reports what it found.

use std::collections::BTreeMap;

use anyhow::Result;

use crate::cli::CheckArgs;
use crate::commands::open_project;
use addon_overlay::ops::compose;
use addon_overlay::util::diagnostic::{emit, emit_all, Diagnostic};
use addon_overlay::GlobalContext;

pub fn execute(args: CheckArgs, ctx: &GlobalContext) -> Result<()> {
    let project = open_project(ctx)?;
    let composition = compose(&project, &BTreeMap::new())?;
    let warnings = composition.diagnostics.len();

    emit_all(&composition.diagnostics, ctx.color());

    if warnings > 0 && args.strict {
        anyhow::bail!("{} warning(s) in strict mode", warnings);
    }

    if ctx.is_verbose() {
        for addon in &composition.addons {
            println!(
                "{}  {} declared file(s){}",
                addon.name,
                addon.declared_sources.len(),
                if addon.customizes_base() {
                    ", customizes base"
                } else {
                    ""
                }
            );
        }
    }

    let mut per_addon: BTreeMap<&str, usize> = BTreeMap::new();
    for warning in composition.diagnostics.warnings() {
        *per_addon.entry(warning.addon()).or_default() += 1;
    }

    let customized: usize = composition
        .addons
        .iter()
        .filter(|a| a.customizes_base())
        .count();
    let mut summary = Diagnostic::note(format!(
        "{} addon(s) checked, {} customize the base framework, {} warning(s)",
        composition.addons.len(),
        customized,
        warnings
    ))
    .with_context(format!(
        "alias table {}",
        composition.resolved().fingerprint_short()
    ))
    .with_location(project.root());
    for (addon, count) in &per_addon {
        summary = summary.with_context(format!("{}: {} warning(s)", addon, count));
    }
    emit(&summary, ctx.color());

    Ok(())
}
