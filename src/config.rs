//! Command-line arguments and the JSON config file.

use clap::Parser;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::analysis::{DailyStatsProvider, GitStatsProvider, SnapshotProvider};
use crate::error::{DashboardError, Result};

const MIN_EXPORT_WIDTH: u32 = 200;
const MAX_EXPORT_WIDTH: u32 = 4096;

#[derive(Debug, Parser)]
#[command(name = "commitdash", version, about = "Chart daily commit activity over the last 30 days")]
pub struct Cli {
    /// Config file (defaults to <config dir>/commitdash/config.json)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Repository to include; repeat for several. Replaces the configured list
    #[arg(long = "repo", value_name = "PATH")]
    pub repositories: Vec<PathBuf>,

    /// Only count commits by this author name
    #[arg(long)]
    pub author: Option<String>,

    /// Read statistics from a JSON snapshot instead of repositories
    #[arg(long, value_name = "PATH")]
    pub snapshot: Option<PathBuf>,

    /// Seconds fetched statistics stay fresh
    #[arg(long, value_name = "SECS")]
    pub stale_secs: Option<u64>,

    /// Render the chart to this PNG and exit without opening a window
    #[arg(long, value_name = "PNG")]
    pub export: Option<PathBuf>,

    /// Width of the exported image in pixels
    #[arg(long, default_value_t = 960)]
    pub width: u32,
}

impl Cli {
    pub fn validate(&self) -> Result<()> {
        if !(MIN_EXPORT_WIDTH..=MAX_EXPORT_WIDTH).contains(&self.width) {
            return Err(DashboardError::Config {
                key: "width".to_string(),
                value: self.width.to_string(),
            });
        }
        Ok(())
    }
}

/// Settings read from the config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub repositories: Vec<PathBuf>,
    pub author: Option<String>,
    pub snapshot: Option<PathBuf>,
    pub stale_secs: u64,
    /// Theme option name to `#rrggbb`
    pub theme: HashMap<String, String>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            repositories: Vec::new(),
            author: None,
            snapshot: None,
            stale_secs: 300,
            theme: HashMap::new(),
        }
    }
}

impl DashboardConfig {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("commitdash").join("config.json"))
    }

    /// Read a config file; a missing file is an error only when `required`
    pub fn load(path: &Path, required: bool) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(raw) => {
                log::debug!("Loaded config from {}", path.display());
                Ok(serde_json::from_str(&raw)?)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && !required => {
                log::debug!("No config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Load the file named on the command line, or the default one, then apply CLI overrides
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let config = match (&cli.config, Self::default_path()) {
            (Some(path), _) => Self::load(path, true)?,
            (None, Some(path)) => Self::load(&path, false)?,
            (None, None) => Self::default(),
        };
        let config = config.merge_cli(cli);
        config.validate()?;
        Ok(config)
    }

    pub fn merge_cli(mut self, cli: &Cli) -> Self {
        if !cli.repositories.is_empty() {
            self.repositories = cli.repositories.clone();
        }
        if cli.author.is_some() {
            self.author = cli.author.clone();
        }
        if cli.snapshot.is_some() {
            self.snapshot = cli.snapshot.clone();
        }
        if let Some(secs) = cli.stale_secs {
            self.stale_secs = secs;
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        let blank = |path: &Path| path.as_os_str().is_empty();
        if let Some(path) = self.repositories.iter().find(|path| blank(path.as_path())) {
            return Err(DashboardError::Config {
                key: "repositories".to_string(),
                value: format!("{:?}", path),
            });
        }
        if let Some(path) = self.snapshot.as_deref().filter(|path| blank(*path)) {
            return Err(DashboardError::Config {
                key: "snapshot".to_string(),
                value: format!("{:?}", path),
            });
        }
        if matches!(self.author.as_deref(), Some(author) if author.trim().is_empty()) {
            return Err(DashboardError::Config {
                key: "author".to_string(),
                value: String::new(),
            });
        }
        Ok(())
    }

    pub fn stale_time(&self) -> Duration {
        Duration::from_secs(self.stale_secs)
    }

    /// A snapshot, when configured, takes precedence over repositories
    pub fn build_provider(&self) -> Arc<dyn DailyStatsProvider> {
        if let Some(path) = &self.snapshot {
            return Arc::new(SnapshotProvider::new(path));
        }

        let provider = GitStatsProvider::new(self.repositories.clone());
        match &self.author {
            Some(author) => Arc::new(provider.with_author(author)),
            None => Arc::new(provider),
        }
    }

    /// Lines describing the statistics sources, for the side panel
    pub fn sources(&self) -> Vec<String> {
        if let Some(path) = &self.snapshot {
            return vec![format!("Snapshot: {}", path.display())];
        }

        let mut lines: Vec<String> = self
            .repositories
            .iter()
            .map(|path| path.display().to_string())
            .collect();
        if let Some(author) = &self.author {
            lines.push(format!("Author: {}", author));
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_missing_optional_config() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");

        assert_eq!(DashboardConfig::load(&path, false).unwrap(), DashboardConfig::default());
        assert!(DashboardConfig::load(&path, true).is_err());
    }

    #[test]
    fn test_partial_config() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        std::fs::write(
            &path,
            r##"{"repositories": ["/src/app"], "theme": {"accent-color": "#ff0000"}}"##,
        )
        .unwrap();

        let config = DashboardConfig::load(&path, true).unwrap();
        assert_eq!(config.repositories, vec![PathBuf::from("/src/app")]);
        assert_eq!(config.stale_secs, 300);
        assert_eq!(config.theme.get("accent-color").map(String::as_str), Some("#ff0000"));
    }

    #[test]
    fn test_cli_overrides() {
        let config = DashboardConfig {
            repositories: vec![PathBuf::from("/from/file")],
            author: Some("Alice".to_string()),
            ..DashboardConfig::default()
        };
        let cli = Cli::parse_from([
            "commitdash",
            "--repo",
            "/a",
            "--repo",
            "/b",
            "--stale-secs",
            "60",
        ]);

        let merged = config.merge_cli(&cli);
        assert_eq!(merged.repositories, vec![PathBuf::from("/a"), PathBuf::from("/b")]);
        assert_eq!(merged.author.as_deref(), Some("Alice"));
        assert_eq!(merged.stale_time(), Duration::from_secs(60));
        assert_eq!(merged.sources(), vec!["/a", "/b", "Author: Alice"]);
    }

    #[test]
    fn test_snapshot_takes_precedence() {
        let config = DashboardConfig {
            repositories: vec![PathBuf::from("/src/app")],
            snapshot: Some(PathBuf::from("stats.json")),
            ..DashboardConfig::default()
        };

        assert_eq!(config.build_provider().describe(), "snapshot stats.json");
        assert_eq!(config.sources(), vec!["Snapshot: stats.json"]);
    }

    #[test]
    fn test_validation() {
        let blank_repo = DashboardConfig {
            repositories: vec![PathBuf::new()],
            ..DashboardConfig::default()
        };
        assert!(matches!(
            blank_repo.validate(),
            Err(DashboardError::Config { key, .. }) if key == "repositories"
        ));

        let blank_author = DashboardConfig {
            author: Some("  ".to_string()),
            ..DashboardConfig::default()
        };
        assert!(blank_author.validate().is_err());
        assert!(DashboardConfig::default().validate().is_ok());

        let cli = Cli::parse_from(["commitdash", "--width", "50"]);
        assert!(cli.validate().is_err());
        assert!(Cli::parse_from(["commitdash"]).validate().is_ok());
    }
}
