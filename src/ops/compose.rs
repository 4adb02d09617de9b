//! Layer composition: one pass over every configured addon.
//!
//! Addons may customize the base framework; they cannot customize each
//! other. The project may customize any addon's declared files. For each
//! addon, in configured order, the addon's base overrides are merged first,
//! then the project's overrides of that addon. Finally the project source
//! and theme aliases are set; nothing outranks them.
//!
//! Addon code must import its own modules through the addon name
//! (`addon-a/actions`, not `./actions`) for project overrides to apply.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::core::alias::{AliasTable, Layer, ResolvedAliases};
use crate::core::package::PackageDescriptor;
use crate::core::project::Project;
use crate::resolver::{customize_addon_by_project, customize_base_by_addon, BaseFramework};
use crate::util::diagnostic::Diagnostics;

/// Outcome of a composition pass.
#[derive(Debug, Clone)]
pub struct Composition {
    /// Every alias write, in precedence order
    pub aliases: AliasTable,
    /// Descriptors of the configured addons, in configured order
    pub addons: Vec<PackageDescriptor>,
    /// Warnings raised along the way
    pub diagnostics: Diagnostics,
}

impl Composition {
    /// The final alias table.
    pub fn resolved(&self) -> ResolvedAliases {
        self.aliases.resolve()
    }

    pub fn addon(&self, name: &str) -> Option<&PackageDescriptor> {
        self.addons.iter().find(|a| a.name == name)
    }
}

/// Register local package mounts from the path mapping, unless the host
/// already aliases them.
pub fn seed_path_mappings(table: &mut AliasTable, project: &Project) {
    for (name, path) in project.path_mapping().mounts(project.root()) {
        if !table.contains_key(&name) {
            tracing::debug!("mounting {} from {}", name, path.display());
            table.insert(Layer::BaseDefault, name, path, None);
        }
    }
}

/// Compose the alias table for `project` on top of `host_aliases`.
pub fn compose(project: &Project, host_aliases: &BTreeMap<String, String>) -> Result<Composition> {
    let settings = project.settings();
    let base = BaseFramework::for_project(project);
    let override_root = project.override_root();

    let mut aliases = AliasTable::from_defaults(
        host_aliases
            .iter()
            .map(|(key, value)| (key.clone(), PathBuf::from(value))),
    );
    seed_path_mappings(&mut aliases, project);

    let mut diagnostics = Diagnostics::new();
    let mut addons = Vec::with_capacity(project.addons().len());

    for name in project.addons() {
        let addon = PackageDescriptor::resolve(name, &aliases, project.root(), settings)
            .with_context(|| format!("failed to resolve addon `{}`", name))?;

        let base_overrides = customize_base_by_addon(&base, &addon, &aliases, &mut diagnostics)
            .with_context(|| format!("failed to apply customizations of addon `{}`", name))?;
        for candidate in base_overrides {
            aliases.insert(
                candidate.layer,
                candidate.module_name,
                candidate.source_path,
                Some(name),
            );
        }

        for candidate in customize_addon_by_project(&addon, &override_root, &aliases, &mut diagnostics)
        {
            aliases.insert(
                candidate.layer,
                candidate.module_name,
                candidate.source_path,
                Some(name),
            );
        }

        addons.push(addon);
    }

    aliases.insert(
        Layer::FixedProject,
        settings.project_alias.as_str(),
        project.source_root(),
        None,
    );
    aliases.insert(
        Layer::FixedProject,
        settings.theme_alias.as_str(),
        project.theme_root(),
        None,
    );

    tracing::debug!(
        "composed {} alias write(s) with {} warning(s)",
        aliases.writes().len(),
        diagnostics.len()
    );

    Ok(Composition {
        aliases,
        addons,
        diagnostics,
    })
}
