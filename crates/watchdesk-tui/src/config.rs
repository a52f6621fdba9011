//! Dashboard configuration.
//!
//! Values come from an optional JSON file and are then overridden by
//! command-line flags.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use watchdesk_core::{FilterCriteria, FilterField};

const DEFAULT_TICK_MS: u64 = 150;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// JSON dataset; the built-in data set is used when absent.
    pub data: Option<PathBuf>,
    /// Redraw interval of the terminal UI.
    pub tick_ms: u64,
    /// Criteria applied before the first render.
    pub filters: FilterCriteria,
    pub metrics_addr: Option<SocketAddr>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data: None,
            tick_ms: DEFAULT_TICK_MS,
            filters: FilterCriteria::default(),
            metrics_addr: None,
        }
    }
}

impl DashboardConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: Self = serde_json::from_str(&contents)?;
        config.validate()?;
        tracing::debug!("Loaded config from {:?}", path);
        Ok(config)
    }

    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_ms == 0 {
            return Err(ConfigError::Invalid("tick_ms must be greater than zero".into()));
        }
        Ok(())
    }

    pub fn with_data(mut self, data: Option<PathBuf>) -> Self {
        if data.is_some() {
            self.data = data;
        }
        self
    }

    pub fn with_metrics_addr(mut self, addr: Option<SocketAddr>) -> Self {
        if addr.is_some() {
            self.metrics_addr = addr;
        }
        self
    }

    /// Overlays filter flags on the file's criteria. Flags left out keep the
    /// file value.
    pub fn with_filter_overrides(mut self, overrides: FilterOverrides) -> Self {
        for (field, value) in overrides.into_fields() {
            if let Some(value) = value {
                self.filters.set(field, value);
            }
        }
        self
    }
}

/// Filter flags shared by the subcommands.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct FilterOverrides {
    /// Case-insensitive match on the incident type
    #[arg(long)]
    pub search: Option<String>,
    /// Exact report date (MM-DD-YY)
    #[arg(long)]
    pub date: Option<String>,
    /// Exact reporter name
    #[arg(long)]
    pub reporter: Option<String>,
    /// Exact incident type
    #[arg(long)]
    pub incident: Option<String>,
    /// Two-digit month, e.g. 04
    #[arg(long)]
    pub month: Option<String>,
}

impl FilterOverrides {
    fn into_fields(self) -> [(FilterField, Option<String>); 5] {
        [
            (FilterField::Search, self.search),
            (FilterField::Date, self.date),
            (FilterField::Reporter, self.reporter),
            (FilterField::Incident, self.incident),
            (FilterField::Month, self.month),
        ]
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = DashboardConfig::default();
        assert!(config.data.is_none());
        assert_eq!(config.tick_ms, 150);
        assert!(config.filters.is_unset());
        assert!(config.metrics_addr.is_none());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"filters": {{"month": "04"}}, "metrics_addr": "127.0.0.1:9100"}}"#).unwrap();

        let config = DashboardConfig::load(file.path()).unwrap();
        assert_eq!(config.tick_ms, 150);
        assert_eq!(config.filters.month, "04");
        assert!(config.filters.reporter.is_empty());
        assert_eq!(config.metrics_addr, Some("127.0.0.1:9100".parse().unwrap()));
    }

    #[test]
    fn test_cli_overrides_only_when_given() {
        let base = DashboardConfig {
            data: Some(PathBuf::from("a.json")),
            ..Default::default()
        };
        let kept = base.clone().with_data(None);
        assert_eq!(kept.data, Some(PathBuf::from("a.json")));
        let replaced = base.with_data(Some(PathBuf::from("b.json")));
        assert_eq!(replaced.data, Some(PathBuf::from("b.json")));
    }

    #[test]
    fn test_filter_flags_merge_with_file_criteria() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"filters": {{"month": "04", "incident": "Fire"}}}}"#).unwrap();

        let config = DashboardConfig::load(file.path())
            .unwrap()
            .with_filter_overrides(FilterOverrides {
                reporter: Some("Jane Smith".into()),
                incident: Some("Car Crash".into()),
                ..Default::default()
            });
        assert_eq!(config.filters.month, "04");
        assert_eq!(config.filters.reporter, "Jane Smith");
        assert_eq!(config.filters.incident, "Car Crash");
        assert!(config.filters.search.is_empty());
    }

    #[test]
    fn test_no_filter_flags_keeps_file_criteria() {
        let base = DashboardConfig {
            filters: FilterCriteria {
                month: "05".into(),
                ..Default::default()
            },
            ..Default::default()
        };
        let merged = base.clone().with_filter_overrides(FilterOverrides::default());
        assert_eq!(merged.filters, base.filters);
    }

    #[test]
    fn test_zero_tick_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"tick_ms": 0}}"#).unwrap();
        assert!(matches!(DashboardConfig::load(file.path()), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_missing_file() {
        let err = DashboardConfig::load(Path::new("/nonexistent/watchdesk.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
