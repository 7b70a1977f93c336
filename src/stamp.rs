//! Add an `updated` date to pages that lack one.
//!
//! Pages with front matter get an `updated:` line appended to the header.
//! Pages without front matter get a generated header with a title, a
//! description, tags inferred from the path and the date.

use crate::{
    cli::DocsArgs,
    config::DocsConfig,
    docs::{self, DocFile, Document, frontmatter::FieldValue},
    utils::date::{UPDATED_KEY, format_ymd, updated_date},
};
use anyhow::Result;
use chrono::NaiveDate;
use colored::Colorize;
use regex::Regex;
use std::{path::Path, sync::LazyLock};

/// Path segments that map to tags, in output order.
const PATH_TAGS: &[(&str, &[&str])] = &[
    ("cybersecurity", &["security", "cybersecurity"]),
    ("docker", &["docker"]),
    ("kubernetes", &["kubernetes"]),
    ("terraform", &["terraform"]),
    ("ansible", &["ansible"]),
    ("monitoring", &["monitoring"]),
    ("networking", &["networking"]),
    ("storage", &["storage"]),
    ("ai", &["ai"]),
];

const DEFAULT_TAG: &str = "documentation";

static RE_TITLE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^#\s+(.+)$").unwrap());

/// What stamping did to a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StampAction {
    /// `updated` appended to the existing header
    AppendedField,
    /// New header generated with this title
    CreatedHeader { title: String },
}

impl StampAction {
    fn describe(&self) -> String {
        match self {
            Self::AppendedField => "Añadido campo updated a frontmatter existente".into(),
            Self::CreatedHeader { title } => {
                format!("Creado frontmatter completo con título: {title}")
            }
        }
    }
}

/// Stamp a single page with `date`. Returns `None` when the page already
/// has an `updated` key (valid or not).
pub fn stamp(doc: &mut Document, relative: &Path, date: NaiveDate) -> Option<StampAction> {
    let fm = doc.front_matter();
    if updated_date(&fm).is_some() || fm.contains_key(UPDATED_KEY) {
        return None;
    }

    let updated = FieldValue::Scalar(format_ymd(date));
    if doc.has_front_matter() {
        doc.append_header_lines(updated.render(UPDATED_KEY));
        return Some(StampAction::AppendedField);
    }

    let title = infer_title(doc, relative);
    let mut header = vec![
        "---".to_string(),
        format!("title: \"{}\"", title.replace('"', "'")),
        format!(
            "description: \"Documentación sobre {}\"",
            title.to_lowercase().replace('"', "'")
        ),
    ];
    header.extend(FieldValue::List(infer_tags(relative)).render("tags"));
    header.extend(updated.render(UPDATED_KEY));
    header.push("---".to_string());
    header.push(String::new());

    let body = doc.render();
    let text = format!("{}\n{}", header.join("\n"), body.trim_start());
    *doc = Document::parse(&text);

    Some(StampAction::CreatedHeader { title })
}

/// First `# ` heading, else the file stem in title case.
fn infer_title(doc: &Document, relative: &Path) -> String {
    doc.body()
        .iter()
        .find_map(|line| {
            RE_TITLE
                .captures(line.trim_end())
                .map(|c| c[1].trim().to_string())
        })
        .unwrap_or_else(|| {
            let stem = relative
                .file_stem()
                .map(|s| s.to_string_lossy().replace('_', " "))
                .unwrap_or_default();
            title_case(&stem)
        })
}

/// Upper-case the first letter of every word, lower-case the rest.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for c in s.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}

fn infer_tags(relative: &Path) -> Vec<String> {
    let segments: Vec<_> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect();

    let tags: Vec<String> = PATH_TAGS
        .iter()
        .filter(|(segment, _)| segments.iter().any(|s| s == segment))
        .flat_map(|(_, tags)| tags.iter().map(|t| t.to_string()))
        .collect();

    if tags.is_empty() {
        vec![DEFAULT_TAG.to_string()]
    } else {
        tags
    }
}

/// `docsync stamp`: stamp every page under the docs root.
pub fn stamp_docs(config: &DocsConfig, args: &DocsArgs, date: NaiveDate) -> Result<()> {
    let root = &config.paths.docs;

    println!("{}", "🔍 Buscando archivos sin campo 'updated'...".bold());
    println!("   Ruta: {}", root.display());
    println!("   Fecha: {}", format_ymd(date));
    println!("   Modo dry-run: {}", if args.dry_run { "Sí" } else { "No" });
    println!();

    let tree = docs::collect_docs(root, &[])?;
    let walk_errors = tree.error_messages();
    let files = docs::select(tree.files, args.category.as_deref(), None);
    let mut report = docs::edit_each(&files, args.max_files, args.dry_run, |file: &DocFile, doc| {
        stamp(doc, &file.relative, date)
    });
    report.errors.extend(walk_errors);

    if report.changed.is_empty() && report.errors.is_empty() {
        println!("{}", "✅ No se encontraron archivos sin campo 'updated'".green());
        return Ok(());
    }

    let status = if args.dry_run { "📋" } else { "✅" };
    for (file, action) in &report.changed {
        println!("{status} {} - {}", file.relative.display(), action.describe());
    }

    println!();
    println!("{}", "=".repeat(60));
    println!("{}", "📊 RESUMEN:".bold());
    println!("  - Procesados: {}", report.changed.len());
    println!("  - Ya tenían fecha: {}", report.unchanged);
    println!("  - Errores: {}", report.errors.len());

    if args.dry_run {
        println!("\n💡 Ejecuta sin --dry-run para aplicar los cambios");
    }
    Ok(())
}
