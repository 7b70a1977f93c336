//! Metadata badge macro injection.
//!
//! Every page with front matter gets a `{{ document_metadata() }}` call right
//! after the header, where the site's macro plugin renders the metadata
//! badges. Pages that already call the macro anywhere are left alone.

use crate::{
    config::DocsConfig,
    docs::{self, Document},
};
use anyhow::Result;
use colored::Colorize;
use std::path::Path;

pub const METADATA_MACRO: &str = "{{ document_metadata() }}";

/// Insert the macro after the front matter. Returns whether the page changed.
pub fn add_macro(doc: &mut Document) -> bool {
    if !doc.has_front_matter() || doc.lines().iter().any(|l| l.contains(METADATA_MACRO)) {
        return false;
    }

    let eol = if doc.uses_crlf() { "\r" } else { "" };
    let at = doc.body_start();
    doc.insert_lines(
        at,
        [
            eol.to_string(),
            format!("{METADATA_MACRO}{eol}"),
            eol.to_string(),
        ],
    );
    true
}

fn is_hidden(relative: &Path) -> bool {
    relative
        .file_name()
        .is_some_and(|name| name.to_string_lossy().starts_with('.'))
}

/// `docsync badge`: add the macro to every page under the badge root.
pub fn add_badges(config: &DocsConfig, dry_run: bool) -> Result<()> {
    let root = &config.paths.badge;
    println!("{}", "🏷️  Añadiendo macro de metadatos...".bold());
    println!("   Ruta: {}", root.display());
    println!();

    let tree = docs::collect_markdown(root, is_hidden)?;
    let mut report = docs::edit_each(&tree.files, None, dry_run, |_, doc| {
        add_macro(doc).then_some(())
    });
    report.errors.extend(tree.error_messages());

    let status = if dry_run { "📋" } else { "✓" };
    for (file, ()) in &report.changed {
        println!("{status} Added metadata macro to: {}", file.relative.display());
    }

    println!("\nSummary:");
    println!("- Files processed: {}", report.changed.len());
    println!("- Files skipped: {}", report.unchanged);
    println!("- Errors: {}", report.errors.len());
    println!(
        "- Total files checked: {}",
        report.changed.len() + report.unchanged + report.errors.len()
    );
    Ok(())
}
