//! Add inferred metadata fields to page headers.
//!
//! | Field            | Source                                         |
//! |------------------|------------------------------------------------|
//! | `difficulty`     | path keywords, then body keyword counts        |
//! | `estimated_time` | word count at 200 words per minute             |
//! | `category`       | first path segment with a known category       |
//! | `status`         | always `published`                             |
//! | `last_reviewed`  | copy of `updated`                              |
//! | `prerequisites`  | difficulty and technology in the path          |
//! | `reviewers`      | `[expand] reviewers` (skipped when empty)      |
//! | `contributors`   | `[expand] contributors` (skipped when empty)   |
//!
//! Keys already present are never touched; new lines are appended at the
//! end of the header. Pages without front matter are skipped.

use crate::{
    cli::DocsArgs,
    config::{DocsConfig, ExpandConfig},
    docs::{self, DocFile, Document, frontmatter::FieldValue},
    utils::date::UPDATED_KEY,
};
use anyhow::Result;
use colored::Colorize;
use std::path::Path;

const WORDS_PER_MINUTE: f64 = 200.0;

/// Difficulty levels, easiest first.
const LEVELS: [&str; 4] = ["beginner", "intermediate", "advanced", "expert"];

/// Path substrings that decide the difficulty outright, checked in order.
const PATH_DIFFICULTY: &[(&[&str], &str)] = &[
    (&["quickstart", "base", "fundamentals"], "beginner"),
    (&["advanced", "troubleshooting", "security"], "intermediate"),
    (&["enterprise", "production", "cluster"], "advanced"),
    (&["tuning", "optimization"], "expert"),
];

/// Body keywords per level, same order as [`LEVELS`].
const KEYWORDS: [&[&str]; 4] = [
    &["introducción", "primeros pasos", "básico", "fundamentos", "instalación", "quickstart"],
    &["avanzado", "configuración", "optimización", "troubleshooting", "integración"],
    &["arquitectura", "escalado", "producción", "enterprise", "cluster", "distribuido"],
    &["debugging", "performance tuning", "security hardening", "disaster recovery"],
];

const CATEGORIES: &[(&str, &str)] = &[
    ("ai", "Inteligencia Artificial"),
    ("cybersecurity", "Ciberseguridad"),
    ("networking", "Redes"),
    ("storage", "Almacenamiento"),
    ("docker", "Contenedores"),
    ("kubernetes", "Orquestación"),
    ("terraform", "Infraestructura como Código"),
    ("ansible", "Automatización"),
    ("monitoring", "Monitoreo"),
    ("backups", "Copias de Seguridad"),
    ("linux", "Sistema Operativo"),
    ("programming", "Desarrollo"),
    ("cicd", "CI/CD"),
    ("haproxy", "Load Balancing"),
    ("proxmox", "Virtualización"),
    ("openstack", "Cloud Computing"),
    ("databases", "Bases de Datos"),
    ("identity", "Gestión de Identidad"),
];

const DEFAULT_CATEGORY: &str = "General";

/// Technology prerequisite by path segment; the first match wins.
const TECH_PREREQUISITES: &[(&str, &str)] = &[
    ("kubernetes", "Docker básico"),
    ("terraform", "Conceptos de cloud"),
    ("ansible", "SSH y Linux básico"),
    ("networking", "Fundamentos de redes"),
    ("ai", "Python básico"),
    ("cybersecurity", "Linux intermedio"),
];

/// Add missing fields. Returns the keys that were added, or `None` when the
/// page has no front matter or nothing was missing.
pub fn expand(doc: &mut Document, relative: &Path, config: &ExpandConfig) -> Option<Vec<String>> {
    if !doc.has_front_matter() {
        return None;
    }

    let fm = doc.front_matter();
    let text = doc.render();
    let segments = path_segments(relative);
    let mut updates: Vec<(&str, FieldValue)> = Vec::new();

    let difficulty = match fm.scalar("difficulty") {
        Some(existing) => existing.to_string(),
        None => {
            let inferred = infer_difficulty(&text, relative).to_string();
            updates.push(("difficulty", FieldValue::Scalar(inferred.clone())));
            inferred
        }
    };
    if !fm.contains_key("estimated_time") {
        updates.push(("estimated_time", FieldValue::Scalar(estimated_time(&text))));
    }
    if !fm.contains_key("category") {
        updates.push(("category", FieldValue::Scalar(infer_category(&segments).into())));
    }
    if !fm.contains_key("status") {
        updates.push(("status", FieldValue::Scalar("published".into())));
    }
    if !fm.contains_key("last_reviewed")
        && let Some(updated) = fm.scalar(UPDATED_KEY)
    {
        updates.push(("last_reviewed", FieldValue::Scalar(updated.to_string())));
    }
    if !fm.contains_key("prerequisites") {
        updates.push((
            "prerequisites",
            FieldValue::List(infer_prerequisites(&segments, &difficulty)),
        ));
    }
    for (key, people) in [
        ("reviewers", &config.reviewers),
        ("contributors", &config.contributors),
    ] {
        if !people.is_empty() && !fm.contains_key(key) {
            updates.push((key, FieldValue::List(people.clone())));
        }
    }

    if updates.is_empty() {
        return None;
    }

    let lines = updates.iter().flat_map(|(k, v)| v.render(k)).collect();
    doc.append_header_lines(lines);
    Some(updates.into_iter().map(|(k, _)| k.to_string()).collect())
}

fn path_segments(relative: &Path) -> Vec<String> {
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect()
}

/// Difficulty from path keywords, else from the most frequent body keywords
/// (harder levels win ties), else `intermediate`.
pub fn infer_difficulty(text: &str, relative: &Path) -> &'static str {
    let path = relative.to_string_lossy().to_lowercase();
    if let Some((_, level)) = PATH_DIFFICULTY
        .iter()
        .find(|(needles, _)| needles.iter().any(|n| path.contains(n)))
    {
        return *level;
    }

    let text = text.to_lowercase();
    let counts = KEYWORDS.map(|kws| kws.iter().filter(|kw| text.contains(*kw)).count());
    let max = counts.iter().copied().max().unwrap_or(0);
    if max == 0 {
        return "intermediate";
    }

    LEVELS
        .iter()
        .zip(counts)
        .rev()
        .find(|(_, count)| *count == max)
        .map_or("intermediate", |(level, _)| *level)
}

/// Reading time at 200 words per minute, at least one minute.
///
/// Up to half an hour: `5 min`. Longer: hours and minutes, as in `0h 45min`,
/// `2h` or `1h 30min`.
pub fn estimated_time(text: &str) -> String {
    let words = text.split_whitespace().count();
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let minutes = ((words as f64 / WORDS_PER_MINUTE).round_ties_even() as u64).max(1);

    if minutes <= 30 {
        return format!("{minutes} min");
    }
    match (minutes / 60, minutes % 60) {
        (hours, 0) => format!("{hours}h"),
        (hours, rest) => format!("{hours}h {rest}min"),
    }
}

fn infer_category(segments: &[String]) -> &'static str {
    segments
        .iter()
        .find_map(|s| CATEGORIES.iter().find(|(key, _)| key == s))
        .map_or(DEFAULT_CATEGORY, |(_, name)| *name)
}

fn infer_prerequisites(segments: &[String], difficulty: &str) -> Vec<String> {
    let mut prereqs = Vec::new();
    if difficulty != "beginner" {
        prereqs.push("Conocimientos básicos de DevOps".to_string());
    }
    if let Some((_, tech)) = TECH_PREREQUISITES
        .iter()
        .find(|(segment, _)| segments.iter().any(|s| s == segment))
    {
        prereqs.push((*tech).to_string());
    }
    if prereqs.is_empty() {
        prereqs.push("Ninguno".to_string());
    }
    prereqs
}

/// `docsync expand`: expand metadata of every page under the docs root.
pub fn expand_docs(config: &DocsConfig, args: &DocsArgs) -> Result<()> {
    let root = &config.paths.docs;

    println!("{}", "🔍 Expandiendo metadatos en archivos de documentación...".bold());
    println!("   Ruta: {}", root.display());
    println!("   Modo dry-run: {}", if args.dry_run { "Sí" } else { "No" });
    if let Some(category) = &args.category {
        println!("   Categoría: {category}");
    }
    println!();

    let tree = docs::collect_docs(root, &[])?;
    let walk_errors = tree.error_messages();
    let files = docs::select(tree.files, args.category.as_deref(), args.max_files);
    if files.is_empty() && walk_errors.is_empty() {
        println!("No se encontraron archivos para procesar.");
        return Ok(());
    }
    println!("📝 Procesando {} archivos...\n", files.len());

    let mut report = docs::edit_each(&files, None, args.dry_run, |file: &DocFile, doc| {
        expand(doc, &file.relative, &config.expand)
    });
    report.errors.extend(walk_errors);

    let status = if args.dry_run { "📋" } else { "✅" };
    for (file, added) in &report.changed {
        println!(
            "{status} {} - Campos añadidos: {}",
            file.relative.display(),
            added.join(", ")
        );
    }

    println!();
    println!("{}", "=".repeat(60));
    println!("{}", "📊 RESUMEN:".bold());
    println!("  - Procesados: {}", report.changed.len());
    println!("  - Sin cambios: {}", report.unchanged);
    println!("  - Errores: {}", report.errors.len());
    println!("  - Total: {}", files.len());

    if args.dry_run {
        println!("\n💡 Ejecuta sin --dry-run para aplicar los cambios");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn people(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_expand_adds_missing_fields_in_order() {
        let mut doc = Document::parse("---\ntitle: Compose\nupdated: 2026-01-20\n---\n# Compose\n");
        let config = ExpandConfig {
            reviewers: people(&["@docs"]),
            contributors: Vec::new(),
        };

        let added = expand(&mut doc, Path::new("docker/compose.md"), &config).unwrap();
        assert_eq!(
            added,
            [
                "difficulty",
                "estimated_time",
                "category",
                "status",
                "last_reviewed",
                "prerequisites",
                "reviewers"
            ]
        );
        assert_eq!(
            doc.render(),
            "---\n\
             title: Compose\n\
             updated: 2026-01-20\n\
             difficulty: intermediate\n\
             estimated_time: 1 min\n\
             category: Contenedores\n\
             status: published\n\
             last_reviewed: 2026-01-20\n\
             prerequisites: [\"Conocimientos básicos de DevOps\"]\n\
             reviewers: [\"@docs\"]\n\
             ---\n\
             # Compose\n"
        );
    }

    #[test]
    fn test_existing_keys_are_kept() {
        let page = "---\ndifficulty: beginner\nestimated_time: 3 min\ncategory: X\nstatus: draft\n\
                    prerequisites:\n  - \"Ninguno\"\n---\nbody\n";
        let mut doc = Document::parse(page);
        assert_eq!(expand(&mut doc, Path::new("x.md"), &ExpandConfig::default()), None);
        assert_eq!(doc.render(), page);
    }

    #[test]
    fn test_no_front_matter_is_skipped() {
        let mut doc = Document::parse("# Title\n");
        assert_eq!(expand(&mut doc, Path::new("x.md"), &ExpandConfig::default()), None);
        assert_eq!(doc.render(), "# Title\n");
    }

    #[test]
    fn test_expand_is_idempotent() {
        let mut doc = Document::parse("---\ntitle: T\n---\nbody\n");
        let config = ExpandConfig {
            reviewers: people(&["@a", "@b"]),
            contributors: people(&["@a"]),
        };
        assert!(expand(&mut doc, Path::new("x.md"), &config).is_some());
        let once = doc.render();
        assert_eq!(expand(&mut doc, Path::new("x.md"), &config), None);
        assert_eq!(doc.render(), once);
        assert_eq!(
            doc.front_matter().get("reviewers"),
            Some(&FieldValue::List(people(&["@a", "@b"])))
        );
    }

    #[test]
    fn test_difficulty_from_path() {
        assert_eq!(infer_difficulty("", Path::new("docker/quickstart.md")), "beginner");
        assert_eq!(infer_difficulty("", Path::new("k8s/Troubleshooting.md")), "intermediate");
        assert_eq!(infer_difficulty("", Path::new("k8s/production.md")), "advanced");
        assert_eq!(infer_difficulty("", Path::new("db/tuning.md")), "expert");
    }

    #[test]
    fn test_difficulty_from_keywords() {
        let path = Path::new("misc/page.md");
        assert_eq!(infer_difficulty("Nada relevante", path), "intermediate");
        assert_eq!(infer_difficulty("Instalación y primeros pasos", path), "beginner");
        assert_eq!(
            infer_difficulty("Arquitectura de un cluster distribuido", path),
            "advanced"
        );
        // Tie between beginner and expert: harder level wins.
        assert_eq!(infer_difficulty("Instalación y debugging", path), "expert");
    }

    #[test]
    fn test_estimated_time() {
        assert_eq!(estimated_time(""), "1 min");
        assert_eq!(estimated_time(&"word ".repeat(1000)), "5 min");
        // 2.5 minutes rounds half to even.
        assert_eq!(estimated_time(&"word ".repeat(500)), "2 min");
        assert_eq!(estimated_time(&"word ".repeat(6_000)), "30 min");
        assert_eq!(estimated_time(&"word ".repeat(6_200)), "0h 31min");
        assert_eq!(estimated_time(&"word ".repeat(9_000)), "0h 45min");
        assert_eq!(estimated_time(&"word ".repeat(12_000)), "1h");
        assert_eq!(estimated_time(&"word ".repeat(18_000)), "1h 30min");
    }

    #[test]
    fn test_category_and_prerequisites() {
        let segments = path_segments(Path::new("doc/kubernetes/helm.md"));
        assert_eq!(infer_category(&segments), "Orquestación");
        assert_eq!(
            infer_prerequisites(&segments, "advanced"),
            ["Conocimientos básicos de DevOps", "Docker básico"]
        );

        let segments = path_segments(Path::new("doc/maintenance/x.md"));
        assert_eq!(infer_category(&segments), DEFAULT_CATEGORY);
        assert_eq!(infer_prerequisites(&segments, "beginner"), ["Ninguno"]);
    }
}
