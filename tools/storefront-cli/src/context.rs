//! CLI execution context.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result};
use storefront_data::HttpBackend;
use tracing::debug;

use crate::config::{StorefrontConfig, CONFIG_FILE_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: StorefrontConfig,
    /// Where the configuration came from, if a file was found.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from an explicit config file or the nearest one found.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = match config_path {
            Some(path) => (StorefrontConfig::load(path)?, Some(PathBuf::from(path))),
            None => match find_config(&cwd) {
                Some(path) => {
                    let config = StorefrontConfig::load(&path.to_string_lossy())?;
                    (config, Some(path))
                }
                None => (StorefrontConfig::default(), None),
            },
        };

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// REST client for the configured backend.
    pub fn backend(&self) -> Result<Arc<HttpBackend>> {
        let client = self.config.client_config();
        debug!(base_url = %client.base_url, "connecting to backend");
        let backend = HttpBackend::new(client).context("Invalid backend configuration")?;
        Ok(Arc::new(backend))
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if Path::new(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.cwd.join(path)
        }
    }
}

/// Walk up from `start` looking for a config file.
pub fn find_config(start: &Path) -> Option<PathBuf> {
    start.ancestors().find_map(|dir| {
        CONFIG_FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|candidate| candidate.is_file())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("storefront-cli-{}-{}", name, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_find_config_walks_upward() {
        let root = scratch_dir("walk");
        let nested = root.join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(root.join("storefront.toml"), "currency = \"USD\"\n").unwrap();

        assert_eq!(find_config(&nested), Some(root.join("storefront.toml")));

        std::fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn test_nearest_config_wins() {
        let root = scratch_dir("nearest");
        let nested = root.join("shop");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(root.join("storefront.toml"), "").unwrap();
        std::fs::write(nested.join("storefront.json"), "{}").unwrap();

        assert_eq!(find_config(&nested), Some(nested.join("storefront.json")));

        std::fs::remove_dir_all(&root).unwrap();
    }
}
