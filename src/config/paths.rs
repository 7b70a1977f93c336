//! `[paths]` section configuration.
//!
//! Locations of the documentation trees, relative to the project root.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[paths]` section in docsync.toml - documentation tree locations.
///
/// # Example
/// ```toml
/// [paths]
/// source = "docs"       # Spanish tree
/// target = "docs/en"    # English tree
/// docs = "docs/doc"     # Pages checked by freshness/stamp/expand/validate
/// badge = "docs"        # Pages that receive the metadata badge
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct PathsConfig {
    /// Project root, set from `--root` after loading.
    #[serde(skip)]
    #[educe(Default = defaults::paths::root())]
    pub root: Option<PathBuf>,

    /// Source-language (Spanish) documentation root.
    #[serde(default = "defaults::paths::source")]
    #[educe(Default = defaults::paths::source())]
    pub source: PathBuf,

    /// Target-language (English) documentation root.
    #[serde(default = "defaults::paths::target")]
    #[educe(Default = defaults::paths::target())]
    pub target: PathBuf,

    /// Documentation pages root for the metadata commands.
    #[serde(default = "defaults::paths::docs")]
    #[educe(Default = defaults::paths::docs())]
    pub docs: PathBuf,

    /// Root scanned by the `badge` command.
    #[serde(default = "defaults::paths::badge")]
    #[educe(Default = defaults::paths::badge())]
    pub badge: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::super::DocsConfig;
    use std::path::PathBuf;

    #[test]
    fn test_paths_config() {
        let config = r#"
            [paths]
            source = "content/es"
            target = "content/en"
            docs = "content/es/doc"
        "#;
        let config: DocsConfig = toml::from_str(config).unwrap();

        assert_eq!(config.paths.source, PathBuf::from("content/es"));
        assert_eq!(config.paths.target, PathBuf::from("content/en"));
        assert_eq!(config.paths.docs, PathBuf::from("content/es/doc"));
        assert_eq!(config.paths.badge, PathBuf::from("docs"));
    }

    #[test]
    fn test_paths_config_defaults() {
        let config: DocsConfig = toml::from_str("").unwrap();

        assert_eq!(config.paths.source, PathBuf::from("docs"));
        assert_eq!(config.paths.target, PathBuf::from("docs/en"));
        assert_eq!(config.paths.docs, PathBuf::from("docs/doc"));
        assert!(config.paths.root.is_none());
    }

    #[test]
    fn test_unknown_field_rejection() {
        let config = r#"
            [paths]
            spanish = "docs"
        "#;
        let result: Result<DocsConfig, _> = toml::from_str(config);

        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("unknown field"));
    }
}
