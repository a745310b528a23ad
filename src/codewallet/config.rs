//! # Configuration
//!
//! Codewallet configuration is loaded with [`confique`], layering:
//! 1. **Environment variables**: `CODEWALLET_DATA_DIR`,
//!    `CODEWALLET_DEFAULT_TAG_COLOR`, `CODEWALLET_IMPORT_EXTENSIONS`
//!    (comma separated).
//! 2. **Config file**: `codewallet.toml` in the OS config directory (via the
//!    `directories` crate). A missing file is fine.
//! 3. **Compiled defaults**.
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `data_dir` | OS data dir | Where the JSON records live |
//! | `default_tag_color` | `#6c757d` | Color for tags without one |
//! | `import_extensions` | common source extensions | Filter for `codewallet import <dir>` |

use crate::error::{Result, WalletError};
use crate::tags::DEFAULT_TAG_COLOR;
use confique::Config;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = "codewallet.toml";

fn default_import_ext() -> Vec<String> {
    [
        ".js", ".jsx", ".ts", ".tsx", ".py", ".java", ".cpp", ".c", ".h", ".css", ".html",
        ".xml", ".json", ".md", ".txt", ".sql", ".sh", ".bat",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// Configuration for codewallet, stored in `codewallet.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct WalletConfig {
    /// Directory holding the stored records. Defaults to the OS data dir.
    #[config(env = "CODEWALLET_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Color given to tags that have none set explicitly
    #[config(env = "CODEWALLET_DEFAULT_TAG_COLOR", default = "#6c757d")]
    pub default_tag_color: String,

    /// Extensions to pick up when importing a directory (e.g. ".py", ".rs").
    #[config(
        env = "CODEWALLET_IMPORT_EXTENSIONS",
        parse_env = confique::env::parse::list_by_comma
    )]
    pub import_extensions: Option<Vec<String>>,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            default_tag_color: DEFAULT_TAG_COLOR.to_string(),
            import_extensions: None,
        }
    }
}

impl WalletConfig {
    /// Load from the environment and the default config file location.
    pub fn load() -> Result<Self> {
        match default_config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::builder()
                .env()
                .load()
                .map_err(|e| WalletError::Config(e.to_string())),
        }
    }

    /// Load from the environment and `path`. Environment wins.
    pub fn load_from(path: &Path) -> Result<Self> {
        Self::builder()
            .env()
            .file(path)
            .load()
            .map_err(|e| WalletError::Config(e.to_string()))
    }

    /// The data directory, falling back to the OS default.
    pub fn data_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }
        project_dirs()
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or_else(|| WalletError::Config("Could not determine a data directory".into()))
    }

    /// Import extensions, normalized to start with a dot and lowercased.
    pub fn import_extensions(&self) -> Vec<String> {
        self.import_extensions
            .clone()
            .unwrap_or_else(default_import_ext)
            .into_iter()
            .map(|ext| {
                let ext = ext.trim().to_lowercase();
                if ext.starts_with('.') {
                    ext
                } else {
                    format!(".{}", ext)
                }
            })
            .collect()
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "codewallet")
}

pub fn default_config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = WalletConfig::default();
        assert_eq!(config.default_tag_color, "#6c757d");
        assert!(config.import_extensions().contains(&".py".to_string()));
        assert!(config.data_dir.is_none());
    }

    #[test]
    fn test_import_extensions_normalized() {
        let config = WalletConfig {
            import_extensions: Some(vec!["PY".to_string(), ".rs".to_string(), " js ".into()]),
            ..Default::default()
        };
        assert_eq!(config.import_extensions(), vec![".py", ".rs", ".js"]);
    }

    #[test]
    fn test_explicit_data_dir() {
        let config = WalletConfig {
            data_dir: Some(PathBuf::from("/tmp/wallet")),
            ..Default::default()
        };
        assert_eq!(config.data_dir().unwrap(), PathBuf::from("/tmp/wallet"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        fs::write(
            &path,
            "default_tag_color = \"#ff0000\"\nimport_extensions = [\".py\"]\n",
        )
        .unwrap();

        let config = WalletConfig::load_from(&path).unwrap();
        assert_eq!(config.default_tag_color, "#ff0000");
        assert_eq!(config.import_extensions(), vec![".py"]);
    }

    #[test]
    fn test_load_from_missing_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let config = WalletConfig::load_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config.import_extensions, None);
    }
}
