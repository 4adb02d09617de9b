//! Addon overrides of base framework modules.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::Result;

use crate::core::alias::{AliasTable, Layer};
use crate::core::package::PackageDescriptor;
use crate::core::source_files::{customization_files, strip_script_extension};
use crate::resolver::errors::{OverlayError, Warning};
use crate::resolver::{BaseFramework, OverrideCandidate};
use crate::util::diagnostic::Diagnostics;
use crate::util::fs::module_path;

/// Map every file in the addon's base customization folder onto the base
/// module it replaces.
///
/// `<folder>/views/View.jsx` becomes `<base>/views/View`. An override whose
/// base counterpart is missing is still returned, with a warning, unless
/// the base is strict. Keys already present in `aliases` are reported as
/// collisions; the candidate still wins once merged.
pub fn customize_base_by_addon(
    base: &BaseFramework,
    addon: &PackageDescriptor,
    aliases: &AliasTable,
    diagnostics: &mut Diagnostics,
) -> Result<Vec<OverrideCandidate>> {
    let Some(folder) = addon.base_customization_path.as_deref() else {
        return Ok(Vec::new());
    };

    let mut candidates = Vec::new();
    let mut seen: BTreeMap<String, PathBuf> = BTreeMap::new();

    for file in customization_files(folder)? {
        let Ok(rel) = file.strip_prefix(folder) else {
            continue;
        };
        let rel = rel.to_path_buf();
        let rel_module = module_path(&rel);
        let target = strip_script_extension(&rel_module);
        let key = format!("{}/{}", base.name, target);

        let expected = base.source_root.join(&rel);
        if !expected.exists() {
            if base.strict_targets {
                return Err(OverlayError::MissingCustomizationTarget {
                    addon: addon.name.clone(),
                    module: key,
                    expected,
                }
                .into());
            }
            diagnostics.push(Warning::MissingCustomizationTarget {
                addon: addon.name.clone(),
                module: key.clone(),
                expected,
            });
        }

        let previous = seen
            .get(&key)
            .cloned()
            .or_else(|| aliases.path(&key).map(|p| p.to_path_buf()));
        if let Some(previous) = previous {
            diagnostics.push(Warning::AliasCollision {
                addon: addon.name.clone(),
                key: key.clone(),
                previous,
                replacement: file.clone(),
            });
        }

        tracing::info!("Base customization in {}: /{}", addon.name, target);

        seen.insert(key.clone(), file.clone());
        candidates.push(OverrideCandidate {
            source_path: file,
            module_name: key,
            layer: Layer::AddonCustomizesBase,
        });
    }

    Ok(candidates)
}
