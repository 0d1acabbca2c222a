use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::query::{Sort, StatusFilter};

/// Configuration from config.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub snapshot: SnapshotConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the task store, e.g. `http://localhost:8085/api`.
    /// Absent (or empty) means read-only snapshot mode.
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            base_url: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ApiConfig {
    /// The configured base URL, with blank values treated as unset
    pub fn base_url(&self) -> Option<&str> {
        self.base_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotConfig {
    #[serde(default = "default_snapshot_path")]
    pub path: PathBuf,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        SnapshotConfig {
            path: default_snapshot_path(),
        }
    }
}

fn default_snapshot_path() -> PathBuf {
    PathBuf::from("tasks.json")
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default)]
    pub theme: ThemeName,
    /// Initial sort, e.g. "priority-desc"
    #[serde(default)]
    pub sort: Sort,
    /// Initial status filter
    #[serde(default)]
    pub filter: StatusFilter,
    /// Hex color overrides applied on top of every palette, e.g. `red = "#FF4444"`
    #[serde(default)]
    pub colors: HashMap<String, String>,
}

/// Selectable accent palettes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    #[default]
    Indigo,
    Purple,
    Teal,
    Rose,
}

impl ThemeName {
    pub const ALL: [ThemeName; 4] = [
        ThemeName::Indigo,
        ThemeName::Purple,
        ThemeName::Teal,
        ThemeName::Rose,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ThemeName::Indigo => "indigo",
            ThemeName::Purple => "purple",
            ThemeName::Teal => "teal",
            ThemeName::Rose => "rose",
        }
    }

    pub fn next(self) -> ThemeName {
        match self {
            ThemeName::Indigo => ThemeName::Purple,
            ThemeName::Purple => ThemeName::Teal,
            ThemeName::Teal => ThemeName::Rose,
            ThemeName::Rose => ThemeName::Indigo,
        }
    }
}

impl FromStr for ThemeName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ThemeName::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown theme: {s} (expected indigo, purple, teal or rose)"))
    }
}

impl fmt::Display for ThemeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::query::{SortField, SortOrder};

    #[test]
    fn empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.api.base_url(), None);
        assert_eq!(config.api.timeout(), Duration::from_secs(10));
        assert_eq!(config.snapshot.path, PathBuf::from("tasks.json"));
        assert_eq!(config.ui.theme, ThemeName::Indigo);
        assert_eq!(config.ui.sort, Sort::default());
        assert_eq!(config.ui.filter, StatusFilter::All);
    }

    #[test]
    fn full_config_parses() {
        let config: Config = toml::from_str(
            r##"
[api]
base_url = "http://localhost:8085/api"
timeout_secs = 3

[snapshot]
path = "/srv/tasks.json"

[ui]
theme = "teal"
sort = "priority-desc"
filter = "active"

[ui.colors]
background = "#000000"
"##,
        )
        .unwrap();
        assert_eq!(config.api.base_url(), Some("http://localhost:8085/api"));
        assert_eq!(config.api.timeout_secs, 3);
        assert_eq!(config.snapshot.path, PathBuf::from("/srv/tasks.json"));
        assert_eq!(config.ui.theme, ThemeName::Teal);
        assert_eq!(
            config.ui.sort,
            Sort::new(SortField::Priority, SortOrder::Desc)
        );
        assert_eq!(config.ui.filter, StatusFilter::Active);
        assert_eq!(
            config.ui.colors.get("background").map(String::as_str),
            Some("#000000")
        );
    }

    #[test]
    fn blank_base_url_is_unset() {
        let config: Config = toml::from_str("[api]\nbase_url = \"  \"\n").unwrap();
        assert_eq!(config.api.base_url(), None);
    }

    #[test]
    fn bad_sort_is_rejected() {
        assert!(toml::from_str::<Config>("[ui]\nsort = \"size-up\"\n").is_err());
    }
}
