use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};

use crate::error::ErrorCode;

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "lanes.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl ConfigError {
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Io { .. } => ErrorCode::ConfigUnreadable,
            Self::Parse { .. } => ErrorCode::ConfigParseError,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanesConfig {
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub render: RenderConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "default_data")]
    pub data: PathBuf,
    #[serde(default = "default_output")]
    pub output: PathBuf,
    #[serde(default = "default_plots")]
    pub plots: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            data: default_data(),
            output: default_output(),
            plots: default_plots(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderConfig {
    #[serde(default = "default_true")]
    pub plots: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            plots: default_true(),
        }
    }
}

/// Command-line values that take precedence over the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub data: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub plots: Option<PathBuf>,
    pub no_plots: bool,
}

/// Paths after overrides, anchored at the working directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedPaths {
    pub data: PathBuf,
    pub output: PathBuf,
    pub plots: PathBuf,
}

impl LanesConfig {
    /// Apply CLI overrides. CLI flag > config file > built-in default.
    #[must_use]
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(data) = overrides.data {
            self.paths.data = data;
        }
        if let Some(output) = overrides.output {
            self.paths.output = output;
        }
        if let Some(plots) = overrides.plots {
            self.paths.plots = plots;
        }
        if overrides.no_plots {
            self.render.plots = false;
        }
        self
    }

    /// Anchor relative paths at `root`.
    #[must_use]
    pub fn resolve_paths(&self, root: &Path) -> ResolvedPaths {
        ResolvedPaths {
            data: root.join(&self.paths.data),
            output: root.join(&self.paths.output),
            plots: root.join(&self.paths.plots),
        }
    }
}

/// Load configuration.
///
/// With `explicit = None` the default file in `root` is used if present and
/// the built-in defaults otherwise. An explicitly named file must exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] when the file cannot be read and
/// [`ConfigError::Parse`] when it is not valid TOML for this schema.
pub fn load_config(root: &Path, explicit: Option<&Path>) -> Result<LanesConfig, ConfigError> {
    let path = match explicit {
        Some(path) => root.join(path),
        None => {
            let path = root.join(DEFAULT_CONFIG_FILE);
            if !path.exists() {
                return Ok(LanesConfig::default());
            }
            path
        }
    };

    let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
        path: path.clone(),
        source,
    })?;

    tracing::debug!(path = %path.display(), "loaded config");

    toml::from_str::<LanesConfig>(&content).map_err(|source| ConfigError::Parse { path, source })
}

const fn default_true() -> bool {
    true
}

fn default_data() -> PathBuf {
    PathBuf::from("data/DataSet.txt")
}

fn default_output() -> PathBuf {
    PathBuf::from("output")
}

fn default_plots() -> PathBuf {
    PathBuf::from("plots")
}
