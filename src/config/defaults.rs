//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

// ============================================================================
// [paths] Section Defaults
// ============================================================================

pub mod paths {
    use std::path::PathBuf;

    pub fn root() -> Option<PathBuf> {
        None
    }

    pub fn source() -> PathBuf {
        "docs".into()
    }

    pub fn target() -> PathBuf {
        "docs/en".into()
    }

    pub fn docs() -> PathBuf {
        "docs/doc".into()
    }

    pub fn badge() -> PathBuf {
        "docs".into()
    }
}

// ============================================================================
// [freshness] Section Defaults
// ============================================================================

pub mod freshness {
    pub fn days() -> u32 {
        90
    }
}

// ============================================================================
// [validate] Section Defaults
// ============================================================================

pub mod validate {
    pub fn required() -> Vec<String> {
        ["title", "updated", "difficulty", "category", "status"]
            .map(String::from)
            .to_vec()
    }

    pub fn recommended() -> Vec<String> {
        [
            "description",
            "estimated_time",
            "last_reviewed",
            "prerequisites",
            "reviewers",
            "contributors",
        ]
        .map(String::from)
        .to_vec()
    }
}

// ============================================================================
// [whitespace] Section Defaults
// ============================================================================

pub mod whitespace {
    pub fn exclude() -> Vec<String> {
        ["site", ".git", "venv", "node_modules"]
            .map(String::from)
            .to_vec()
    }
}
