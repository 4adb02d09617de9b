//! Command implementations

pub mod aliases;
pub mod check;
pub mod completions;
pub mod configure;
pub mod sources;

use anyhow::Result;

use addon_overlay::util::diagnostic::{emit, suggestions, Diagnostic};
use addon_overlay::{GlobalContext, Project};

/// Locate and load the project the command operates on.
pub fn open_project(ctx: &GlobalContext) -> Result<Project> {
    let root = match ctx.find_project_root() {
        Ok(root) => root,
        Err(e) => {
            emit(
                &Diagnostic::error(e.to_string()).with_suggestion(suggestions::NO_MANIFEST),
                ctx.color(),
            );
            anyhow::bail!("no project found");
        }
    };

    tracing::debug!("project root: {}", root.display());
    let settings = ctx.settings_for(&root);
    Ok(Project::load(&root, settings)?)
}
