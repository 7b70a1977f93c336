//! Markdown whitespace fixer.
//!
//! Outside fenced code blocks:
//!
//! - trailing whitespace is trimmed
//! - list items indented by four or more spaces are re-indented to two
//! - headings get a blank line before them
//! - list blocks get a blank line before them, unless they follow a blank
//!   line, a heading, a quote, another list item or a fence
//!
//! The final newline is kept as it was. Line endings are normalized to `\n`.

use crate::{
    config::DocsConfig,
    docs::{self, DocError},
    log,
};
use anyhow::Result;
use colored::Colorize;
use regex::Regex;
use std::{
    fs,
    path::{Path, PathBuf},
    sync::LazyLock,
};

const FENCE: &str = "```";

static RE_LIST: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*[-+*]\s+").unwrap());
static RE_INDENTED_LIST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^ {4,}([-+*]\s+)").unwrap());

/// Line starts that need no blank line before a list item.
const LIST_NEIGHBOURS: [&str; 6] = ["#", ">", "-", "*", "+", FENCE];

/// Apply every fix to `text`.
pub fn fix_text(text: &str) -> String {
    let mut out: Vec<String> = Vec::new();
    let mut in_code = false;

    let prev_is_blank = |out: &[String]| out.last().is_none_or(|l| l.trim().is_empty());

    for line in text.lines() {
        if line.starts_with(FENCE) {
            out.push(line.to_string());
            in_code = !in_code;
            continue;
        }
        if in_code {
            out.push(line.to_string());
            continue;
        }

        let mut raw = line.trim_end().to_string();
        if let Some(caps) = RE_INDENTED_LIST.captures(&raw) {
            let whole = caps.get(0).map_or(0, |m| m.end());
            raw = format!("  {}{}", &caps[1], &raw[whole..]);
        }

        if raw.starts_with('#') {
            if !prev_is_blank(&out) {
                out.push(String::new());
            }
        } else if RE_LIST.is_match(&raw)
            && let Some(prev) = out.last()
        {
            let prev = prev.trim();
            if !prev.is_empty() && !LIST_NEIGHBOURS.iter().any(|p| prev.starts_with(p)) {
                out.push(String::new());
            }
        }

        out.push(raw);
    }

    let mut fixed = out.join("\n");
    if text.ends_with('\n') {
        fixed.push('\n');
    }
    fixed
}

#[derive(Debug, Default)]
pub struct WhitespaceReport {
    pub fixed: Vec<PathBuf>,
    pub checked: usize,
    pub errors: Vec<String>,
}

/// Fix every `.md` file under `root`, skipping directories named in `exclude`.
pub fn fix_tree(
    root: &Path,
    exclude: &[String],
    dry_run: bool,
) -> Result<WhitespaceReport, DocError> {
    let is_excluded = |relative: &Path| {
        relative
            .file_name()
            .is_some_and(|name| exclude.iter().any(|e| name == e.as_str()))
    };

    let tree = docs::collect_markdown(root, is_excluded)?;
    let mut report = WhitespaceReport {
        errors: tree.error_messages(),
        ..WhitespaceReport::default()
    };
    for file in tree.files {
        report.checked += 1;
        let result = fs::read_to_string(&file.path)
            .map_err(|err| DocError::Read(file.path.clone(), err))
            .and_then(|text| {
                let fixed = fix_text(&text);
                if fixed == text {
                    return Ok(false);
                }
                if !dry_run {
                    fs::write(&file.path, fixed)
                        .map_err(|err| DocError::Write(file.path.clone(), err))?;
                }
                Ok(true)
            });

        match result {
            Ok(true) => report.fixed.push(file.relative),
            Ok(false) => {}
            Err(err) => {
                log!("error"; "{}", err.describe());
                report.errors.push(err.describe());
            }
        }
    }
    Ok(report)
}

/// `docsync whitespace`: fix Markdown files under `root`.
pub fn fix_whitespace(config: &DocsConfig, root: &Path, dry_run: bool) -> Result<()> {
    let report = fix_tree(root, &config.whitespace.exclude, dry_run)?;

    if report.fixed.is_empty() {
        println!("No changes made ({} files checked)", report.checked);
    } else {
        let heading = if dry_run { "Files to fix:" } else { "Fixed files:" };
        println!("{}", heading.bold());
        for path in &report.fixed {
            println!(" - {}", path.display());
        }
    }
    if !report.errors.is_empty() {
        println!("{}", format!("{} files could not be processed", report.errors.len()).red());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_fix_text_applies_all_rules() {
        let text = "Intro\n# H\ntext\n- a\n- b\n    - c  \n```\n# not a heading   \n```\n";
        assert_eq!(
            fix_text(text),
            "Intro\n\n# H\ntext\n\n- a\n- b\n  - c\n```\n# not a heading   \n```\n"
        );
    }

    #[test]
    fn test_fix_text_is_idempotent() {
        let text = "Intro\n# H\ntext\n* a\n+ b\n      - deep\n> quote\n- after quote\n";
        let once = fix_text(text);
        assert_eq!(fix_text(&once), once);
    }

    #[test]
    fn test_clean_text_is_unchanged() {
        for text in ["", "# T\n\nBody.\n", "# T\n\n- a\n- b", "para\n\n## Sub\n"] {
            assert_eq!(fix_text(text), text);
        }
    }

    #[test]
    fn test_list_after_heading_or_quote_needs_no_blank() {
        assert_eq!(fix_text("# T\n- a\n"), "# T\n- a\n");
        assert_eq!(fix_text("> q\n- a\n"), "> q\n- a\n");
    }

    #[test]
    fn test_final_newline_preserved() {
        assert_eq!(fix_text("a  "), "a");
        assert_eq!(fix_text("a  \n"), "a\n");
        assert_eq!(fix_text("a\r\nb\r\n"), "a\nb\n");
    }

    #[test]
    fn test_fix_tree_skips_excluded_dirs() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("site")).unwrap();
        fs::create_dir_all(root.join("docs")).unwrap();
        fs::write(root.join("site/page.md"), "a  \n").unwrap();
        fs::write(root.join("docs/page.md"), "a  \n").unwrap();
        fs::write(root.join("docs/clean.md"), "a\n").unwrap();

        let exclude = vec!["site".to_string()];
        let report = fix_tree(root, &exclude, true).unwrap();
        assert_eq!(report.fixed, vec![PathBuf::from("docs/page.md")]);
        assert_eq!(report.checked, 2);
        assert_eq!(fs::read_to_string(root.join("docs/page.md")).unwrap(), "a  \n");

        fix_tree(root, &exclude, false).unwrap();
        assert_eq!(fs::read_to_string(root.join("docs/page.md")).unwrap(), "a\n");
        assert_eq!(fs::read_to_string(root.join("site/page.md")).unwrap(), "a  \n");
    }
}
