//! Configuration management for `docsync.toml`.
//!
//! # Sections
//!
//! | Section        | Purpose                                         |
//! |----------------|-------------------------------------------------|
//! | `[paths]`      | Spanish/English trees, docs root, badge root    |
//! | `[freshness]`  | Staleness threshold in days                     |
//! | `[validate]`   | Required and recommended front matter fields    |
//! | `[expand]`     | Reviewers/contributors for `expand`             |
//! | `[whitespace]` | Directories skipped by the whitespace fixer     |
//!
//! The file is optional: without it every section uses its defaults.
//! Command-line flags override file values.
//!
//! # Example
//!
//! ```toml
//! [paths]
//! source = "docs"
//! target = "docs/en"
//!
//! [freshness]
//! days = 120
//! ```

mod checks;
pub mod defaults;
mod error;
mod paths;

pub use checks::{ExpandConfig, FreshnessConfig, ValidateConfig, WhitespaceConfig};
pub use paths::PathsConfig;

use error::ConfigError;

use crate::cli::{Cli, Commands, DocsArgs};
use anyhow::{Result, bail};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing docsync.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct DocsConfig {
    /// Absolute path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Documentation tree locations
    #[serde(default)]
    pub paths: PathsConfig,

    /// Staleness check settings
    #[serde(default)]
    pub freshness: FreshnessConfig,

    /// Metadata validation settings
    #[serde(default)]
    pub validate: ValidateConfig,

    /// Metadata expansion settings
    #[serde(default)]
    pub expand: ExpandConfig,

    /// Whitespace fixer settings
    #[serde(default)]
    pub whitespace: WhitespaceConfig,
}

impl DocsConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: DocsConfig = toml::from_str(content).map_err(ConfigError::Toml)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    /// Load the config file named by the CLI (if present) and apply CLI overrides.
    pub fn load(cli: &Cli) -> Result<Self> {
        let root = cli.root.as_deref().unwrap_or(Path::new("./"));
        let config_path = root.join(&cli.config);

        let mut config = if config_path.exists() {
            Self::from_path(&config_path)?
        } else {
            Self::default()
        };
        config.update_with_cli(cli);
        config.validate()?;

        Ok(config)
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        self.paths.root.as_deref().unwrap_or(Path::new("./"))
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &Cli) {
        let root = cli
            .root
            .clone()
            .unwrap_or_else(|| self.get_root().to_owned());

        match &cli.command {
            Commands::Sync {
                es_path, en_path, ..
            } => {
                Self::update_option(&mut self.paths.source, es_path.as_ref());
                Self::update_option(&mut self.paths.target, en_path.as_ref());
            }
            Commands::Freshness { days, docs_path } => {
                Self::update_option(&mut self.freshness.days, days.as_ref());
                Self::update_option(&mut self.paths.docs, docs_path.as_ref());
            }
            Commands::Stamp { docs_args, .. } | Commands::Expand { docs_args } => {
                let DocsArgs { docs_path, .. } = docs_args;
                Self::update_option(&mut self.paths.docs, docs_path.as_ref());
            }
            Commands::Validate { docs_path, .. } => {
                Self::update_option(&mut self.paths.docs, docs_path.as_ref());
            }
            Commands::Badge { docs_path, .. } => {
                Self::update_option(&mut self.paths.badge, docs_path.as_ref());
            }
            Commands::Whitespace { .. } => {}
        }

        self.update_path_with_root(&root, &cli.config);
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Resolve all paths against the root directory and normalize to absolute paths
    fn update_path_with_root(&mut self, root: &Path, config_name: &Path) {
        let root = Self::normalize_path(root);
        self.config_path = Self::normalize_path(&root.join(config_name));

        self.paths.source = Self::normalize_path(&root.join(&self.paths.source));
        self.paths.target = Self::normalize_path(&root.join(&self.paths.target));
        self.paths.docs = Self::normalize_path(&root.join(&self.paths.docs));
        self.paths.badge = Self::normalize_path(&root.join(&self.paths.badge));
        self.paths.root = Some(root);
    }

    /// Resolve a path given on the command line against the root directory
    pub fn resolve(&self, path: &Path) -> PathBuf {
        Self::normalize_path(&self.get_root().join(path))
    }

    /// Normalize a path to absolute, using canonicalize if the path exists
    fn normalize_path(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| {
            // For non-existent paths, manually make them absolute
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir()
                    .map(|cwd| cwd.join(path))
                    .unwrap_or_else(|_| path.to_path_buf())
            }
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.paths.source == self.paths.target {
            bail!(ConfigError::Validation(format!(
                "[paths.source] and [paths.target] must be different directories (config: `{}`)",
                self.config_path.display()
            )));
        }

        if self.validate.required.iter().any(|f| f.trim().is_empty()) {
            bail!(ConfigError::Validation(
                "[validate.required] must not contain empty field names".into()
            ));
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
