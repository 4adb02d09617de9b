//! The module alias table.
//!
//! Composition never overwrites an entry in place. Every layer appends
//! [`AliasWrite`]s and [`AliasTable::resolve`] picks, for each key, the
//! write from the highest [`Layer`]; within one layer the latest write wins.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::util::hash::Fingerprint;

/// Where an alias write came from, lowest precedence first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Layer {
    /// Aliases the host build configuration or path mapping already had
    BaseDefault,
    /// An addon overriding a base framework module
    AddonCustomizesBase,
    /// The project overriding an addon module
    ProjectCustomizesAddon,
    /// The project source root and theme aliases
    FixedProject,
}

impl Layer {
    pub fn as_str(&self) -> &'static str {
        match self {
            Layer::BaseDefault => "base-default",
            Layer::AddonCustomizesBase => "addon-customizes-base",
            Layer::ProjectCustomizesAddon => "project-customizes-addon",
            Layer::FixedProject => "fixed-project",
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single write into the alias table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasWrite {
    pub layer: Layer,
    pub key: String,
    pub value: PathBuf,
    /// Addon whose pass produced this write, if any
    pub origin: Option<String>,
}

/// Ordered log of alias writes.
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    writes: Vec<AliasWrite>,
}

impl AliasTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a table with the host's existing aliases.
    pub fn from_defaults<I, K, V>(defaults: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<PathBuf>,
    {
        let mut table = Self::new();
        for (key, value) in defaults {
            table.insert(Layer::BaseDefault, key, value, None);
        }
        table
    }

    /// Append a write.
    pub fn insert(
        &mut self,
        layer: Layer,
        key: impl Into<String>,
        value: impl Into<PathBuf>,
        origin: Option<&str>,
    ) {
        self.writes.push(AliasWrite {
            layer,
            key: key.into(),
            value: value.into(),
            origin: origin.map(str::to_string),
        });
    }

    /// The write that currently wins for `key`.
    pub fn get(&self, key: &str) -> Option<&AliasWrite> {
        // max_by_key keeps the last of equal maxima, so later writes win ties.
        self.writes
            .iter()
            .filter(|w| w.key == key)
            .max_by_key(|w| w.layer)
    }

    /// Current target of `key`.
    pub fn path(&self, key: &str) -> Option<&Path> {
        self.get(key).map(|w| w.value.as_path())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.writes.iter().any(|w| w.key == key)
    }

    /// All writes in the order they were recorded.
    pub fn writes(&self) -> &[AliasWrite] {
        &self.writes
    }

    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }

    /// Collapse the write log into one entry per key.
    pub fn resolve(&self) -> ResolvedAliases {
        let mut entries: BTreeMap<String, ResolvedAlias> = BTreeMap::new();

        for write in &self.writes {
            let replace = entries
                .get(&write.key)
                .map_or(true, |current| write.layer >= current.layer);
            if replace {
                entries.insert(
                    write.key.clone(),
                    ResolvedAlias {
                        path: write.value.clone(),
                        layer: write.layer,
                        origin: write.origin.clone(),
                    },
                );
            }
        }

        ResolvedAliases { entries }
    }
}

/// The winning target of one alias key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedAlias {
    pub path: PathBuf,
    pub layer: Layer,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
}

/// Final alias table, sorted by key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResolvedAliases {
    entries: BTreeMap<String, ResolvedAlias>,
}

impl ResolvedAliases {
    pub fn get(&self, key: &str) -> Option<&ResolvedAlias> {
        self.entries.get(key)
    }

    pub fn path(&self, key: &str) -> Option<&Path> {
        self.entries.get(key).map(|e| e.path.as_path())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ResolvedAlias)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Plain key to path mapping, as a build tool consumes it.
    pub fn to_path_map(&self) -> BTreeMap<String, String> {
        self.entries
            .iter()
            .map(|(k, v)| (k.clone(), v.path.to_string_lossy().into_owned()))
            .collect()
    }

    fn digest(&self) -> Fingerprint {
        let mut fp = Fingerprint::new();
        for (key, path) in self.to_path_map() {
            fp.update_entry(&key, &path);
        }
        fp
    }

    /// Stable digest of the key to path mapping.
    pub fn fingerprint(&self) -> String {
        self.digest().finish()
    }

    /// Abbreviated [`fingerprint`](Self::fingerprint) for display.
    pub fn fingerprint_short(&self) -> String {
        self.digest().finish_short()
    }
}
