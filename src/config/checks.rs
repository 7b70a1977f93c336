//! `[freshness]`, `[validate]`, `[expand]` and `[whitespace]` sections.
//!
//! Tuning knobs for the individual maintenance commands.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[freshness]` section - staleness threshold.
///
/// # Example
/// ```toml
/// [freshness]
/// days = 120
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct FreshnessConfig {
    /// Days without an update before a page counts as stale.
    #[serde(default = "defaults::freshness::days")]
    #[educe(Default = defaults::freshness::days())]
    pub days: u32,
}

/// `[validate]` section - front matter completeness rules.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct ValidateConfig {
    /// Fields every page must define.
    #[serde(default = "defaults::validate::required")]
    #[educe(Default = defaults::validate::required())]
    pub required: Vec<String>,

    /// Fields a complete page should define (at most two may be missing).
    #[serde(default = "defaults::validate::recommended")]
    #[educe(Default = defaults::validate::recommended())]
    pub recommended: Vec<String>,
}

/// `[expand]` section - values for fields that cannot be inferred.
///
/// Empty lists mean the field is not added.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExpandConfig {
    #[serde(default)]
    pub reviewers: Vec<String>,

    #[serde(default)]
    pub contributors: Vec<String>,
}

/// `[whitespace]` section - directories never touched by the fixer.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct WhitespaceConfig {
    #[serde(default = "defaults::whitespace::exclude")]
    #[educe(Default = defaults::whitespace::exclude())]
    pub exclude: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::super::DocsConfig;

    #[test]
    fn test_check_sections() {
        let config = r#"
            [freshness]
            days = 30

            [validate]
            required = ["title", "updated"]

            [expand]
            reviewers = ["@docs-team"]

            [whitespace]
            exclude = ["site"]
        "#;
        let config: DocsConfig = toml::from_str(config).unwrap();

        assert_eq!(config.freshness.days, 30);
        assert_eq!(config.validate.required, vec!["title", "updated"]);
        assert_eq!(config.validate.recommended.len(), 6);
        assert_eq!(config.expand.reviewers, vec!["@docs-team"]);
        assert!(config.expand.contributors.is_empty());
        assert_eq!(config.whitespace.exclude, vec!["site"]);
    }

    #[test]
    fn test_check_sections_defaults() {
        let config: DocsConfig = toml::from_str("").unwrap();

        assert_eq!(config.freshness.days, 90);
        assert_eq!(
            config.validate.required,
            vec!["title", "updated", "difficulty", "category", "status"]
        );
        assert!(config.expand.reviewers.is_empty());
        assert!(config.whitespace.exclude.iter().any(|d| d == "node_modules"));
    }

    #[test]
    fn test_negative_days_rejected() {
        let config = r#"
            [freshness]
            days = -5
        "#;
        let result: Result<DocsConfig, _> = toml::from_str(config);
        assert!(result.is_err());
    }
}
