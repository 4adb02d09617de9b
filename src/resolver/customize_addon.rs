//! Project overrides of addon modules.

use std::path::Path;

use crate::core::alias::{AliasTable, Layer};
use crate::core::package::PackageDescriptor;
use crate::core::source_files::strip_script_extension;
use crate::resolver::errors::Warning;
use crate::resolver::OverrideCandidate;
use crate::util::diagnostic::Diagnostics;

/// Map the project's override files onto the addon modules they replace.
///
/// Only files the addon declares are eligible: `<override_root>/<addon>/actions.js`
/// overrides `<addon>/actions` if, and only if, the addon ships `actions.js`.
pub fn customize_addon_by_project(
    addon: &PackageDescriptor,
    override_root: &Path,
    aliases: &AliasTable,
    diagnostics: &mut Diagnostics,
) -> Vec<OverrideCandidate> {
    let mut candidates = Vec::new();

    for filename in &addon.declared_sources {
        let local_path = override_root.join(filename);
        if !local_path.is_file() {
            continue;
        }

        let module_name = strip_script_extension(filename).to_string();

        if let Some(previous) = aliases.get(&module_name) {
            diagnostics.push(Warning::AliasCollision {
                addon: addon.name.clone(),
                key: module_name.clone(),
                previous: previous.value.clone(),
                replacement: local_path.clone(),
            });
        }

        tracing::info!("Project customization of {}", module_name);

        candidates.push(OverrideCandidate {
            source_path: local_path,
            module_name,
            layer: Layer::ProjectCustomizesAddon,
        });
    }

    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    fn addon() -> PackageDescriptor {
        PackageDescriptor {
            name: "addon-a".to_string(),
            root: PathBuf::from("/unused"),
            location: PathBuf::from("/unused/src"),
            declared_sources: vec![
                "addon-a/actions.js".to_string(),
                "addon-a/views/View.jsx".to_string(),
                "addon-a/theme/main.less".to_string(),
            ],
            base_customization_path: None,
        }
    }

    #[test]
    fn test_declared_files_are_overridden() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "addon-a/actions.js");
        touch(tmp.path(), "addon-a/theme/main.less");
        let mut diags = Diagnostics::new();

        let candidates =
            customize_addon_by_project(&addon(), tmp.path(), &AliasTable::new(), &mut diags);

        assert_eq!(
            candidates,
            vec![
                OverrideCandidate {
                    source_path: tmp.path().join("addon-a/actions.js"),
                    module_name: "addon-a/actions".to_string(),
                    layer: Layer::ProjectCustomizesAddon,
                },
                OverrideCandidate {
                    source_path: tmp.path().join("addon-a/theme/main.less"),
                    module_name: "addon-a/theme/main.less".to_string(),
                    layer: Layer::ProjectCustomizesAddon,
                },
            ]
        );
        assert!(diags.is_empty());
    }

    #[test]
    fn test_undeclared_files_are_ignored() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "addon-a/internal/helpers.js");
        touch(tmp.path(), "other-addon/actions.js");
        let mut diags = Diagnostics::new();

        let candidates =
            customize_addon_by_project(&addon(), tmp.path(), &AliasTable::new(), &mut diags);
        assert!(candidates.is_empty());
    }

    #[test]
    fn test_missing_override_root() {
        let tmp = TempDir::new().unwrap();
        let mut diags = Diagnostics::new();

        let candidates = customize_addon_by_project(
            &addon(),
            &tmp.path().join("nope"),
            &AliasTable::new(),
            &mut diags,
        );
        assert!(candidates.is_empty());
    }

    #[test]
    fn test_existing_module_alias_is_reported() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "addon-a/actions.js");
        let aliases = AliasTable::from_defaults([("addon-a/actions", "/host/actions.js")]);
        let mut diags = Diagnostics::new();

        let candidates = customize_addon_by_project(&addon(), tmp.path(), &aliases, &mut diags);
        assert_eq!(candidates.len(), 1);
        assert_eq!(diags.count_kind("alias-collision"), 1);
    }
}
