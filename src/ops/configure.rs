//! Apply the overlay to a host build configuration.
//!
//! Besides installing the composed alias table, the stylesheet rule is
//! replaced so LESS sources from the project theme, the base framework
//! theme and locally developed addons all go through the same pipeline,
//! and the script rule stops compiling dependency trees of local addons.

use anyhow::Result;
use serde_json::json;

use crate::core::build_config::{BuildConfiguration, BuildTarget, Environment, LoaderSpec, Plugin, Rule};
use crate::core::project::Project;
use crate::ops::compose::{compose, Composition};
use crate::resolver::errors::OverlayError;

/// Files the stylesheet rule must handle.
const STYLESHEET_SAMPLES: &[&str] = &["theme.less"];

/// Files the script rule must handle.
const SCRIPT_SAMPLES: &[&str] = &["index.js", "View.jsx", "module.mjs"];

/// Dependency trees of addons checked out under `src/develop`.
pub const DEVELOP_DEPENDENCIES_PATTERN: &str = "src/develop/.+/node_modules";

pub const COMPRESSION_PLUGIN: &str = "compression-webpack-plugin";
pub const CSS_EXTRACT_PLUGIN: &str = "mini-css-extract-plugin";
const CSS_EXTRACT_LOADER: &str = "mini-css-extract-plugin/loader";

/// Options for the configure operation.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigureOptions {
    /// Development or production build
    pub environment: Environment,

    /// Browser or server bundle
    pub target: BuildTarget,
}

fn css_loader(modules: Option<bool>) -> LoaderSpec {
    let mut options = json!({
        "importLoaders": 2,
        "sourceMap": true,
        "localIdentName": "[name]__[local]___[hash:base64:5]",
    });
    if let Some(modules) = modules {
        options["modules"] = json!(modules);
    }
    LoaderSpec::new("css-loader").with_options(options)
}

fn postcss_loader() -> LoaderSpec {
    LoaderSpec::new("postcss-loader").with_options(json!({
        "sourceMap": true,
        "ident": "postcss",
        "plugins": [
            "postcss-flexbugs-fixes",
            { "autoprefixer": { "flexbox": "no-2009" } },
        ],
    }))
}

fn less_loader() -> LoaderSpec {
    LoaderSpec::new("less-loader").with_options(json!({
        "outputStyle": "expanded",
        "sourceMap": true,
    }))
}

/// The LESS rule for `project` in `environment`.
pub fn stylesheet_rule(project: &Project, environment: Environment) -> Rule {
    let settings = project.settings();
    let include = vec![
        project.project_theme_root(),
        project.base_path().join("theme"),
        project
            .root()
            .join(&settings.dependency_dir)
            .join("semantic-ui-less"),
        project.root().join("src").join("develop"),
    ]
    .into_iter()
    .map(|p| p.to_string_lossy().into_owned())
    .collect();

    let loaders = if environment.is_dev() {
        vec![
            LoaderSpec::new("style-loader"),
            css_loader(None),
            postcss_loader(),
            less_loader(),
        ]
    } else {
        vec![
            LoaderSpec::new(CSS_EXTRACT_LOADER),
            css_loader(Some(false)),
            postcss_loader(),
            less_loader(),
        ]
    };

    Rule {
        test: Some(r"\.less$".to_string()),
        include,
        loaders,
        ..Rule::default()
    }
}

/// Plugins appended to every configured build.
pub fn overlay_plugins() -> Vec<Plugin> {
    vec![
        Plugin::new(COMPRESSION_PLUGIN),
        Plugin::new(CSS_EXTRACT_PLUGIN).with_options(json!({
            "filename": "static/css/bundle.[contenthash:8].css",
            "chunkFilename": "static/css/[name].[contenthash:8].chunk.css",
            "allChunks": true,
        })),
    ]
}

/// Optional plugins a host may enable on top of the overlay.
pub fn default_plugins() -> Vec<Plugin> {
    vec![Plugin::new("bundle-analyzer").with_options(json!({
        "analyzerHost": "0.0.0.0",
        "analyzerMode": "static",
        "generateStatsFile": true,
        "statsFilename": "stats.json",
        "reportFilename": "reports.html",
        "openAnalyzer": false,
    }))]
}

fn require_rule(
    config: &BuildConfiguration,
    samples: &[&str],
    what: &str,
) -> Result<usize, OverlayError> {
    config
        .find_rule(samples)
        .ok_or_else(|| OverlayError::ConfigurationShape {
            what: format!(
                "no {} rule among {} rule(s) handles {}",
                what,
                config.module.rules.len(),
                samples.join(", ")
            ),
        })
}

/// Mutate `config` in place and return the composition behind it.
///
/// Both compilation rules are located before anything changes, so a
/// configuration of the wrong shape is rejected untouched.
pub fn configure(
    project: &Project,
    config: &mut BuildConfiguration,
    options: &ConfigureOptions,
) -> Result<Composition> {
    let stylesheet_index = require_rule(config, STYLESHEET_SAMPLES, "stylesheet")?;
    let script_index = require_rule(config, SCRIPT_SAMPLES, "script")?;

    tracing::debug!(
        "configuring {} build for {} target",
        options.environment,
        options.target
    );

    let composition = compose(project, &config.resolve.alias)?;
    config.resolve.alias = composition.resolved().to_path_map();

    config.module.rules[stylesheet_index] = stylesheet_rule(project, options.environment);
    config.module.rules[script_index].exclude = vec![DEVELOP_DEPENDENCIES_PATTERN.to_string()];

    for plugin in overlay_plugins() {
        if config.plugins.iter().any(|p| p.name == plugin.name) {
            tracing::debug!("plugin {} already present", plugin.name);
            continue;
        }
        config.plugins.push(plugin);
    }

    Ok(composition)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ProjectFixture;

    fn host_config() -> BuildConfiguration {
        BuildConfiguration::from_json(
            r#"{
                "target": "web",
                "resolve": { "alias": { "react": "/deps/react" } },
                "module": { "rules": [
                    { "test": "/\\.(js|jsx|mjs)$/", "use": [ { "loader": "babel-loader" } ] },
                    { "test": "/\\.less$/", "use": [ { "loader": "less-loader" } ] },
                    { "test": "\\.svg$" }
                ] },
                "plugins": [ { "name": "define" } ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_configure_development() {
        let fixture = ProjectFixture::new(&["addon-a"])
            .base_file("views/View.jsx")
            .addon("addon-a", Some("src/customizations"))
            .addon_file("addon-a", "src/customizations/views/View.jsx")
            .build();
        let project = fixture.load().unwrap();
        let mut config = host_config();

        let composition =
            configure(&project, &mut config, &ConfigureOptions::default()).unwrap();
        assert!(composition.diagnostics.is_empty());

        let alias = &config.resolve.alias;
        assert_eq!(alias["react"], "/deps/react");
        assert!(alias.contains_key("@plone/volto/views/View"));
        assert_eq!(
            alias["~"],
            fixture.project_dir().join("src").to_string_lossy()
        );
        assert_eq!(
            alias["volto-themes"],
            fixture.base_dir().join("theme/themes").to_string_lossy()
        );

        let less = &config.module.rules[1];
        let loaders: Vec<&str> = less.loaders.iter().map(|l| l.loader.as_str()).collect();
        assert_eq!(loaders, ["style-loader", "css-loader", "postcss-loader", "less-loader"]);
        assert_eq!(less.include.len(), 4);

        assert_eq!(config.module.rules[0].exclude, [DEVELOP_DEPENDENCIES_PATTERN]);
        assert_eq!(config.module.rules[0].loaders[0].loader, "babel-loader");
        assert_eq!(config.module.rules[2].test.as_deref(), Some("\\.svg$"));

        let plugins: Vec<&str> = config.plugins.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(plugins, ["define", COMPRESSION_PLUGIN, CSS_EXTRACT_PLUGIN]);
        assert_eq!(config.extra["target"], "web");
    }

    #[test]
    fn test_configure_production_extracts_css() {
        let fixture = ProjectFixture::new(&[]).build();
        let project = fixture.load().unwrap();
        let mut config = host_config();
        let options = ConfigureOptions {
            environment: Environment::Production,
            target: BuildTarget::Node,
        };

        configure(&project, &mut config, &options).unwrap();

        let less = &config.module.rules[1];
        assert_eq!(less.loaders[0].loader, CSS_EXTRACT_LOADER);
        assert_eq!(less.loaders[1].options.as_ref().unwrap()["modules"], false);
    }

    #[test]
    fn test_missing_stylesheet_rule_fails_untouched() {
        let fixture = ProjectFixture::new(&[]).build();
        let project = fixture.load().unwrap();
        let mut config = host_config();
        config.module.rules.remove(1);
        let before = config.clone();

        let err = configure(&project, &mut config, &ConfigureOptions::default()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<OverlayError>(),
            Some(OverlayError::ConfigurationShape { .. })
        ));
        assert!(err.to_string().contains("stylesheet"));
        assert_eq!(config, before);
    }

    #[test]
    fn test_missing_script_rule_fails() {
        let fixture = ProjectFixture::new(&[]).build();
        let project = fixture.load().unwrap();
        let mut config = host_config();
        config.module.rules.remove(0);

        let err = configure(&project, &mut config, &ConfigureOptions::default()).unwrap_err();
        assert!(err.to_string().contains("script"));
    }

    #[test]
    fn test_reconfigure_does_not_duplicate_plugins() {
        let fixture = ProjectFixture::new(&[]).build();
        let project = fixture.load().unwrap();
        let mut config = host_config();

        configure(&project, &mut config, &ConfigureOptions::default()).unwrap();
        let first = config.clone();
        configure(&project, &mut config, &ConfigureOptions::default()).unwrap();

        assert_eq!(config.plugins.len(), 3);
        assert_eq!(config.resolve.alias, first.resolve.alias);
    }

    #[test]
    fn test_default_plugins() {
        let plugins = default_plugins();
        assert_eq!(plugins[0].name, "bundle-analyzer");
        assert_eq!(plugins[0].options["openAnalyzer"], false);
    }
}
