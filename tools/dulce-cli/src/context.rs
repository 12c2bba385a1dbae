//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use dulce_cache::FileStore;
use dulce_commerce::cart::{CartRenderer, Hydration};
use dulce_storefront::{StorefrontConfig, StorefrontSession};

use crate::output::Output;

/// Config file names looked up from the working directory upwards.
pub const CONFIG_NAMES: [&str; 3] = ["dulce.toml", ".dulce.toml", "dulce.json"];

/// Execution context for CLI commands.
pub struct Context {
    /// Storefront configuration.
    pub config: StorefrontConfig,
    /// File the configuration came from, if any.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (mut config, config_path) = if let Some(path) = config_path {
            let path = resolve(&cwd, Path::new(path));
            let config = StorefrontConfig::load(&path)
                .with_context(|| format!("Failed to load config {}", path.display()))?;
            (config, Some(path))
        } else {
            match Self::find_config(&cwd) {
                Some((path, config)) => (config, Some(path)),
                None => (StorefrontConfig::default(), None),
            }
        };

        // A product file named in the config is relative to that config
        if let Some(base) = config_path.as_deref().and_then(Path::parent) {
            let anchored = config.catalog.products.as_deref().map(|p| resolve(base, p));
            if anchored.is_some() {
                config.catalog.products = anchored;
            }
        }

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<(PathBuf, StorefrontConfig)> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    match StorefrontConfig::load(&config_path) {
                        Ok(config) => return Some((config_path, config)),
                        Err(e) => {
                            tracing::warn!(path = %config_path.display(), error = %e, "skipping config")
                        }
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Directory holding the file-backed storage slots.
    ///
    /// A relative `storage.data_dir` resolves against the config file's
    /// directory. Without one, the per-user data directory is used.
    pub fn data_dir(&self) -> PathBuf {
        match &self.config.storage.data_dir {
            Some(dir) => {
                let base = self
                    .config_path
                    .as_deref()
                    .and_then(Path::parent)
                    .unwrap_or(&self.cwd);
                resolve(base, dir)
            }
            None => dirs_path().join("dulce-hogar"),
        }
    }

    /// Open the persisted storage.
    pub fn open_store(&self) -> Result<FileStore> {
        let dir = self.data_dir();
        self.output.debug(&format!("Using storage in {}", dir.display()));
        FileStore::open(dir.clone())
            .with_context(|| format!("Failed to open storage in {}", dir.display()))
    }

    /// Open a storefront session over the persisted cart.
    pub fn open_session<R: CartRenderer>(
        &self,
        renderer: R,
    ) -> Result<(StorefrontSession<FileStore, R>, Hydration)> {
        let store = self.open_store()?;
        let (session, hydration) = StorefrontSession::open(store, renderer, self.config.clone())
            .context("Failed to open storefront")?;

        if let Hydration::Recovered(e) = &hydration {
            self.output.warn(&format!(
                "Saved cart could not be read and was reset ({})",
                e
            ));
        }
        Ok((session, hydration))
    }

    /// Where `config init` writes when no config file exists yet.
    pub fn default_config_path(&self) -> PathBuf {
        self.cwd.join(CONFIG_NAMES[0])
    }
}

fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

/// Get the platform-specific data directory.
fn dirs_path() -> PathBuf {
    if let Some(home) = std::env::var_os("HOME") {
        PathBuf::from(home).join(".local").join("share")
    } else {
        PathBuf::from("/tmp")
    }
}
