//! The host build configuration document.
//!
//! Only the parts the overlay touches are typed: the alias table, the rule
//! list and the plugin list. Every other key is carried through untouched
//! in the `extra` maps so the host gets back exactly what it sent, plus our
//! changes.

use std::collections::BTreeMap;
use std::fmt;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Target environment of a build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    pub fn is_dev(&self) -> bool {
        matches!(self, Environment::Development)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Which bundle is being built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BuildTarget {
    /// The browser bundle
    #[default]
    Web,
    /// The server bundle
    Node,
}

impl fmt::Display for BuildTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildTarget::Web => write!(f, "web"),
            BuildTarget::Node => write!(f, "node"),
        }
    }
}

/// A build configuration as exchanged with the host build tool.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuildConfiguration {
    #[serde(default)]
    pub resolve: ResolveSection,

    #[serde(default)]
    pub module: ModuleSection,

    #[serde(default)]
    pub plugins: Vec<Plugin>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolveSection {
    /// Module alias table
    #[serde(default)]
    pub alias: BTreeMap<String, String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModuleSection {
    #[serde(default)]
    pub rules: Vec<Rule>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A compilation rule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    /// File pattern, either bare (`\.less$`) or slash-delimited (`/\.less$/i`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub include: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<String>,

    #[serde(default, rename = "use", skip_serializing_if = "Vec::is_empty")]
    pub loaders: Vec<LoaderSpec>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One step of a rule's loader chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoaderSpec {
    pub loader: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Value>,
}

impl LoaderSpec {
    pub fn new(loader: impl Into<String>) -> Self {
        LoaderSpec {
            loader: loader.into(),
            options: None,
        }
    }

    pub fn with_options(mut self, options: Value) -> Self {
        self.options = Some(options);
        self
    }
}

/// A plugin instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plugin {
    pub name: String,

    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub options: Value,
}

impl Plugin {
    pub fn new(name: impl Into<String>) -> Self {
        Plugin {
            name: name.into(),
            options: Value::Null,
        }
    }

    pub fn with_options(mut self, options: Value) -> Self {
        self.options = options;
        self
    }
}

impl Rule {
    /// Compile the rule's test pattern, if it has a usable one.
    pub fn pattern(&self) -> Option<Regex> {
        let test = self.test.as_deref()?;
        let source = match test.strip_prefix('/') {
            // `/body/flags` as printed by a JavaScript RegExp
            Some(rest) => match rest.rfind('/') {
                Some(end) => &rest[..end],
                None => test,
            },
            None => test,
        };

        match Regex::new(source) {
            Ok(re) => Some(re),
            Err(e) => {
                tracing::debug!("ignoring rule with unusable test `{}`: {}", test, e);
                None
            }
        }
    }

    /// Whether the rule applies to every one of `samples`.
    pub fn matches_all(&self, samples: &[&str]) -> bool {
        match self.pattern() {
            Some(re) => samples.iter().all(|s| re.is_match(s)),
            None => false,
        }
    }
}

impl BuildConfiguration {
    /// Parse a configuration document.
    pub fn from_json(contents: &str) -> serde_json::Result<Self> {
        serde_json::from_str(contents)
    }

    /// Serialize the configuration document.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Index of the first rule that handles every one of `samples`.
    pub fn find_rule(&self, samples: &[&str]) -> Option<usize> {
        self.module
            .rules
            .iter()
            .position(|rule| rule.matches_all(samples))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unknown_keys_round_trip() {
        let doc = json!({
            "mode": "development",
            "resolve": { "alias": { "x": "/x" }, "extensions": [".js"] },
            "module": { "rules": [ { "test": "\\.png$", "type": "asset" } ], "strictExportPresence": true },
            "plugins": [ { "name": "define" } ]
        });

        let config: BuildConfiguration = serde_json::from_value(doc.clone()).unwrap();
        assert_eq!(config.extra["mode"], "development");
        assert_eq!(config.module.rules[0].extra["type"], "asset");
        assert_eq!(serde_json::to_value(&config).unwrap(), doc);
    }

    #[test]
    fn test_rule_pattern_forms() {
        let bare = Rule {
            test: Some("\\.less$".to_string()),
            ..Rule::default()
        };
        let delimited = Rule {
            test: Some("/\\.(js|jsx|mjs)$/i".to_string()),
            ..Rule::default()
        };

        assert!(bare.matches_all(&["a.less"]));
        assert!(!bare.matches_all(&["a.css"]));
        assert!(delimited.matches_all(&["a.js", "a.jsx", "a.mjs"]));
        assert!(!delimited.matches_all(&["a.ts"]));
    }

    #[test]
    fn test_rule_without_usable_test() {
        let none = Rule::default();
        let broken = Rule {
            test: Some("(".to_string()),
            ..Rule::default()
        };
        assert!(!none.matches_all(&["a.js"]));
        assert!(!broken.matches_all(&["a.js"]));
    }

    #[test]
    fn test_find_rule() {
        let config = BuildConfiguration::from_json(
            r#"{ "module": { "rules": [
                { "test": "\\.css$" },
                { "test": "\\.(js|jsx)$" },
                { "test": "\\.(js|jsx|mjs)$" }
            ] } }"#,
        )
        .unwrap();

        assert_eq!(config.find_rule(&["a.css"]), Some(0));
        assert_eq!(config.find_rule(&["a.js", "a.jsx", "a.mjs"]), Some(2));
        assert_eq!(config.find_rule(&["a.less"]), None);
    }
}
