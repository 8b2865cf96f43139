//! Outline settings persistence and per-rebuild configuration snapshots
//!
//! Settings are stored in `~/.config/symbol-outline/config.yaml`. Every rebuild
//! re-reads them through a [`SettingsSource`] and resolves a [`ConfigSnapshot`],
//! so edits to the file show up on the next rebuild without a restart.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::outline::SymbolKind;

/// Settings entry that matches any kind not listed explicitly
pub const WILDCARD: &str = "*";

/// Outline settings that persist across sessions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutlineSettings {
    /// Sort siblings by kind priority and name
    #[serde(default = "default_true")]
    pub do_sort: bool,
    /// Activating a node selects the whole symbol instead of placing the caret
    #[serde(default = "default_true")]
    pub do_select: bool,
    /// Kind priority for sorting, may contain `*`
    #[serde(default = "default_sort_order")]
    pub sort_order: Vec<String>,
    /// Kinds shown at all, may contain `*`
    #[serde(default = "default_top_level")]
    pub top_level: Vec<String>,
    /// Kinds expanded by default, may contain `*`
    #[serde(default = "default_expand_nodes")]
    pub expand_nodes: Vec<String>,
}

fn default_true() -> bool {
    true
}

fn default_sort_order() -> Vec<String> {
    [
        "Class",
        "Module",
        "Constant",
        "Interface",
        WILDCARD,
        "Constructor",
        "Function",
        "Method",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_top_level() -> Vec<String> {
    vec![WILDCARD.to_string()]
}

fn default_expand_nodes() -> Vec<String> {
    [
        "Module",
        "Class",
        "Interface",
        "Namespace",
        "Object",
        "Package",
        "Struct",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

impl Default for OutlineSettings {
    fn default() -> Self {
        Self {
            do_sort: true,
            do_select: true,
            sort_order: default_sort_order(),
            top_level: default_top_level(),
            expand_nodes: default_expand_nodes(),
        }
    }
}

impl OutlineSettings {
    /// Load settings from `path`, falling back to defaults on any failure
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(settings) => {
                    tracing::debug!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save settings to `path`
    ///
    /// Creates the parent directory if it doesn't exist.
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize settings: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved settings to {}", path.display());
        Ok(())
    }
}

/// Where the outline model reads its settings from on each rebuild
pub trait SettingsSource: Send {
    fn settings(&self) -> OutlineSettings;
}

/// Fixed in-memory settings
impl SettingsSource for OutlineSettings {
    fn settings(&self) -> OutlineSettings {
        self.clone()
    }
}

/// Settings backed by a YAML file, re-read on every call
#[derive(Debug, Clone)]
pub struct SettingsFile {
    path: PathBuf,
}

impl SettingsFile {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// The default `config.yaml` location, if a config directory exists
    pub fn default_location() -> Option<Self> {
        crate::config_paths::config_file().map(Self::new)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsSource for SettingsFile {
    fn settings(&self) -> OutlineSettings {
        OutlineSettings::load_from(&self.path)
    }
}

/// A resolved settings entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KindMatcher {
    Kind(SymbolKind),
    Wildcard,
    /// A name that isn't a known kind; matches nothing
    Unknown,
}

impl KindMatcher {
    /// Resolve a kind name from settings
    ///
    /// Names that aren't a known kind become [`KindMatcher::Unknown`] rather
    /// than failing the rebuild. They never widen a filter, and in the sort
    /// order the kinds they might have named fall back to the wildcard's slot.
    pub fn resolve(name: &str) -> Self {
        if name == WILDCARD {
            return KindMatcher::Wildcard;
        }
        match name.parse::<SymbolKind>() {
            Ok(kind) => KindMatcher::Kind(kind),
            Err(e) => {
                tracing::debug!("{}, ignoring", e);
                KindMatcher::Unknown
            }
        }
    }
}

fn resolve_all(names: &[String]) -> Vec<KindMatcher> {
    names.iter().map(|name| KindMatcher::resolve(name)).collect()
}

/// Read-only configuration for one rebuild
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigSnapshot {
    pub do_sort: bool,
    pub do_select: bool,
    pub sort_order: Vec<KindMatcher>,
    pub top_level: Vec<KindMatcher>,
    pub expand_nodes: Vec<KindMatcher>,
}

impl Default for ConfigSnapshot {
    fn default() -> Self {
        Self::resolve(&OutlineSettings::default())
    }
}

impl ConfigSnapshot {
    pub fn resolve(settings: &OutlineSettings) -> Self {
        Self {
            do_sort: settings.do_sort,
            do_select: settings.do_select,
            sort_order: resolve_all(&settings.sort_order),
            top_level: resolve_all(&settings.top_level),
            expand_nodes: resolve_all(&settings.expand_nodes),
        }
    }

    /// Whether symbols of `kind` survive the top-level pre-filter
    pub fn keeps_kind(&self, kind: SymbolKind) -> bool {
        matches_kind(&self.top_level, kind)
    }

    /// Whether the top-level filter lets every kind through
    pub fn keeps_all_kinds(&self) -> bool {
        self.top_level.contains(&KindMatcher::Wildcard)
    }

    /// Whether nodes of `kind` start expanded
    pub fn expands_kind(&self, kind: SymbolKind) -> bool {
        matches_kind(&self.expand_nodes, kind)
    }

    /// Sort priority of `kind`, lower sorts first
    ///
    /// The kind's own index in `sort_order`, else the wildcard's index, else
    /// `None`, which orders before every listed position.
    pub fn sort_priority(&self, kind: SymbolKind) -> Option<usize> {
        let position_of = |target: KindMatcher| self.sort_order.iter().position(|m| *m == target);
        position_of(KindMatcher::Kind(kind)).or_else(|| position_of(KindMatcher::Wildcard))
    }
}

fn matches_kind(list: &[KindMatcher], kind: SymbolKind) -> bool {
    list.iter()
        .any(|m| *m == KindMatcher::Kind(kind) || *m == KindMatcher::Wildcard)
}
