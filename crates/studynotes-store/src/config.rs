//! studynotes configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use studynotes_core::overlay::DEFAULT_HISTORY_LIMIT;

/// Top-level studynotes configuration, read from `studynotes.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudynotesConfig {
    /// Directory holding the persisted overlay (edits, favorites, history).
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Catalog file or directory used instead of the built-in catalog.
    #[serde(default)]
    pub catalog: Option<PathBuf>,
    /// Quiz file used instead of the built-in quiz.
    #[serde(default)]
    pub quiz: Option<PathBuf>,
    /// Subject shown when none has been selected yet.
    #[serde(default)]
    pub default_subject: Option<String>,
    /// How many distinct topics the view history keeps.
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./.studynotes")
}
fn default_history_limit() -> usize {
    DEFAULT_HISTORY_LIMIT
}

impl Default for StudynotesConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            catalog: None,
            quiz: None,
            default_subject: None,
            history_limit: default_history_limit(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are not expanded again.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        let var_name = &rest[start + 2..start + end];
        result.push_str(&rest[..start]);
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

fn resolve_path(path: &Path) -> PathBuf {
    PathBuf::from(resolve_env_vars(&path.to_string_lossy()))
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `studynotes.toml` in the current directory
/// 2. `~/.config/studynotes/config.toml`
///
/// Environment variable override: `STUDYNOTES_DATA_DIR`.
pub fn load_config() -> Result<StudynotesConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<StudynotesConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("studynotes.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<StudynotesConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => StudynotesConfig::default(),
    };

    if let Ok(dir) = std::env::var("STUDYNOTES_DATA_DIR") {
        config.data_dir = PathBuf::from(dir);
    }

    config.data_dir = resolve_path(&config.data_dir);
    config.catalog = config.catalog.as_deref().map(resolve_path);
    config.quiz = config.quiz.as_deref().map(resolve_path);

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("studynotes"))
}
