//! `addon-overlay aliases` command

use std::collections::BTreeMap;

use anyhow::Result;

use crate::cli::AliasesArgs;
use crate::commands::open_project;
use addon_overlay::ops::compose;
use addon_overlay::util::diagnostic::emit_all;
use addon_overlay::util::fs::relative_path;
use addon_overlay::GlobalContext;

pub fn execute(args: AliasesArgs, ctx: &GlobalContext) -> Result<()> {
    let project = open_project(ctx)?;
    let composition = compose(&project, &BTreeMap::new())?;
    let resolved = composition.resolved();

    if args.fingerprint {
        println!("{}", resolved.fingerprint());
    } else if args.json {
        println!("{}", serde_json::to_string_pretty(&resolved)?);
    } else {
        let width = resolved.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
        for (key, entry) in resolved.iter() {
            let origin = entry
                .origin
                .as_deref()
                .map(|o| format!(" ({})", o))
                .unwrap_or_default();
            println!(
                "{:width$}  {}  [{}{}]",
                key,
                relative_path(project.root(), &entry.path).display(),
                entry.layer,
                origin,
                width = width
            );
        }
    }

    emit_all(&composition.diagnostics, ctx.color());
    Ok(())
}
