//! Front matter completeness report.
//!
//! A page is complete when it defines every required field and misses at
//! most two recommended ones. Besides issues, the report tallies pages by
//! category, difficulty and status and summarizes `estimated_time` values.

use crate::{
    config::{DocsConfig, ValidateConfig},
    docs::{self, DocError, DocFile, Document, frontmatter::FrontMatter},
};
use anyhow::Result;
use colored::Colorize;
use regex::Regex;
use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
    sync::LazyLock,
};

/// Recommended fields a page may miss and still count as complete.
const ALLOWED_MISSING_RECOMMENDED: usize = 2;

/// Issues listed in the full report before eliding the rest.
const ISSUE_LIST_LIMIT: usize = 5;

const DIFFICULTY_ORDER: [&str; 4] = ["beginner", "intermediate", "advanced", "expert"];

/// `5 min`, `2h`, `1h 30min`
static RE_ESTIMATED_TIME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:(\d+)\s*h)?\s*(?:(\d+)\s*(?:min)?)?$").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    MissingFrontMatter,
    MissingRequired(Vec<String>),
    Unreadable(String),
}

impl Issue {
    fn describe(&self) -> String {
        match self {
            Self::MissingFrontMatter => "Sin frontmatter".into(),
            Self::MissingRequired(fields) => {
                format!("Campos requeridos faltantes: {}", fields.join(", "))
            }
            Self::Unreadable(err) => format!("Error leyendo archivo: {err}"),
        }
    }
}

/// Fields of `names` that `fm` does not define.
fn missing<'a>(fm: &FrontMatter, names: &'a [String]) -> Vec<&'a String> {
    names.iter().filter(|name| !fm.contains_key(name)).collect()
}

/// Minutes in an `estimated_time` value.
pub fn parse_estimated_time(value: &str) -> Option<u32> {
    let caps = RE_ESTIMATED_TIME.captures(value.trim())?;
    let hours = caps.get(1).map(|m| m.as_str().parse::<u32>()).transpose().ok()?;
    let minutes = caps.get(2).map(|m| m.as_str().parse::<u32>()).transpose().ok()?;
    if hours.is_none() && minutes.is_none() {
        return None;
    }
    Some(hours.unwrap_or(0) * 60 + minutes.unwrap_or(0))
}

#[derive(Debug, Default)]
pub struct MetadataStats {
    pub total: usize,
    pub with_front_matter: usize,
    pub without_front_matter: usize,
    pub complete: usize,
    pub missing_required: usize,
    pub by_category: BTreeMap<String, usize>,
    pub by_difficulty: BTreeMap<String, usize>,
    pub by_status: BTreeMap<String, usize>,
    /// Parsed `estimated_time` values, in minutes
    pub estimated_minutes: Vec<u32>,
    pub issues: Vec<(PathBuf, Issue)>,
}

impl MetadataStats {
    /// Analyze every file.
    pub fn collect(files: &[DocFile], config: &ValidateConfig) -> Self {
        let mut stats = Self::default();
        for file in files {
            match docs::read_document(&file.path) {
                Ok(doc) => stats.record(file.relative.clone(), &doc, config),
                Err(err) => {
                    stats.total += 1;
                    stats
                        .issues
                        .push((file.relative.clone(), Issue::Unreadable(err.describe())));
                }
            }
        }
        stats
    }

    /// List directories the walk could not read as unreadable entries.
    pub fn record_walk_errors(&mut self, root: &Path, errors: &[DocError]) {
        for err in errors {
            let relative = match err {
                DocError::Walk(path, _) => path.strip_prefix(root).unwrap_or(path).to_path_buf(),
                _ => root.to_path_buf(),
            };
            self.issues.push((relative, Issue::Unreadable(err.describe())));
        }
    }

    /// Add one page to the tallies.
    pub fn record(&mut self, relative: PathBuf, doc: &Document, config: &ValidateConfig) {
        self.total += 1;

        let fm = doc.front_matter();
        if fm.is_empty() {
            self.without_front_matter += 1;
            self.issues.push((relative, Issue::MissingFrontMatter));
            return;
        }
        self.with_front_matter += 1;

        let missing_required = missing(&fm, &config.required);
        let missing_recommended = missing(&fm, &config.recommended);

        for (key, tally) in [
            ("category", &mut self.by_category),
            ("difficulty", &mut self.by_difficulty),
            ("status", &mut self.by_status),
        ] {
            if let Some(value) = fm.scalar(key) {
                *tally.entry(value.to_string()).or_default() += 1;
            }
        }

        if let Some(minutes) = fm.scalar("estimated_time").and_then(parse_estimated_time) {
            self.estimated_minutes.push(minutes);
        }

        if missing_required.is_empty() {
            if missing_recommended.len() <= ALLOWED_MISSING_RECOMMENDED {
                self.complete += 1;
            }
        } else {
            self.missing_required += 1;
            let fields = missing_required.into_iter().cloned().collect();
            self.issues.push((relative, Issue::MissingRequired(fields)));
        }
    }
}

/// `docsync validate`: analyze pages and print a summary or the full report.
pub fn validate_docs(config: &DocsConfig, category: Option<&str>, full_report: bool) -> Result<()> {
    let root = &config.paths.docs;

    println!("{}", "🔍 Analizando metadatos de documentación...".bold());
    println!("   Ruta: {}", root.display());
    if let Some(category) = category {
        println!("   Categoría: {category}");
    }
    println!();

    let tree = docs::collect_docs(root, &[])?;
    let files = docs::select(tree.files, category, None);
    let mut stats = MetadataStats::collect(&files, &config.validate);
    stats.record_walk_errors(root, &tree.errors);

    if full_report {
        print_report(&stats);
    } else {
        print_summary(&stats);
    }
    Ok(())
}

#[allow(clippy::cast_precision_loss)]
fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

/// Title case for a single tally key (`published` -> `Published`).
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
    })
}

/// Tally entries sorted by count, descending, then by key.
fn by_count(tally: &BTreeMap<String, usize>) -> Vec<(&String, &usize)> {
    let mut entries: Vec<_> = tally.iter().collect();
    entries.sort_by(|a, b| b.1.cmp(a.1));
    entries
}

fn print_report(stats: &MetadataStats) {
    println!("{}", "📊 REPORTE DE METADATOS DE DOCUMENTACIÓN".bold());
    println!("{}", "=".repeat(60));
    println!("📁 Total de archivos analizados: {}", stats.total);
    println!(
        "📄 Con frontmatter: {} ({:.1}%)",
        stats.with_front_matter,
        percent(stats.with_front_matter, stats.total)
    );
    println!(
        "❌ Sin frontmatter: {} ({:.1}%)",
        stats.without_front_matter,
        percent(stats.without_front_matter, stats.total)
    );
    println!(
        "✅ Metadatos completos: {} ({:.1}%)",
        stats.complete,
        percent(stats.complete, stats.with_front_matter)
    );
    println!("⚠️  Con campos requeridos faltantes: {}", stats.missing_required);
    println!();

    if !stats.by_category.is_empty() {
        println!("{}", "📂 DISTRIBUCIÓN POR CATEGORÍA:".bold());
        for (category, count) in by_count(&stats.by_category) {
            println!("  {category}: {count}");
        }
        println!();
    }

    if !stats.by_difficulty.is_empty() {
        println!("{}", "🎯 DISTRIBUCIÓN POR DIFICULTAD:".bold());
        for level in DIFFICULTY_ORDER {
            if let Some(count) = stats.by_difficulty.get(level) {
                println!("  {}: {count}", capitalize(level));
            }
        }
        println!();
    }

    if !stats.by_status.is_empty() {
        println!("{}", "📋 DISTRIBUCIÓN POR ESTADO:".bold());
        for (status, count) in by_count(&stats.by_status) {
            println!("  {}: {count}", capitalize(status));
        }
        println!();
    }

    if let (Some(min), Some(max)) = (
        stats.estimated_minutes.iter().min(),
        stats.estimated_minutes.iter().max(),
    ) {
        let sum: u32 = stats.estimated_minutes.iter().sum();
        #[allow(clippy::cast_precision_loss)]
        let avg = f64::from(sum) / stats.estimated_minutes.len() as f64;
        println!("{}", "⏱️  ESTADÍSTICAS DE TIEMPO ESTIMADO:".bold());
        println!("  Promedio: {avg:.0} minutos");
        println!("  Mínimo: {min} minutos");
        println!("  Máximo: {max} minutos");
        println!();
    }

    if !stats.issues.is_empty() {
        println!("{}", "🚨 PROBLEMAS IDENTIFICADOS:".red().bold());
        for (path, issue) in stats.issues.iter().take(ISSUE_LIST_LIMIT) {
            println!("    {}: {}", path.display(), issue.describe());
        }
        if stats.issues.len() > ISSUE_LIST_LIMIT {
            println!("    ... y {} más", stats.issues.len() - ISSUE_LIST_LIMIT);
        }
        println!();
    }
}

fn print_summary(stats: &MetadataStats) {
    println!("{}", "📊 RESUMEN RÁPIDO:".bold());
    println!("  Total archivos: {}", stats.total);
    println!("  Con frontmatter: {}", stats.with_front_matter);
    println!("  Metadatos completos: {}", stats.complete);
    println!("  Problemas: {}", stats.issues.len());

    if !stats.by_difficulty.is_empty() {
        println!("\n🎯 Por dificultad:");
        for (level, count) in &stats.by_difficulty {
            println!("  {level}: {count}");
        }
    }

    if !stats.issues.is_empty() {
        println!("\n🚨 {} archivos con problemas", stats.issues.len());
        println!("Ejecuta con --report para ver detalles");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const COMPLETE: &str = "---\n\
        title: Compose\n\
        updated: 2026-01-20\n\
        difficulty: beginner\n\
        category: Contenedores\n\
        status: published\n\
        description: Docker Compose\n\
        estimated_time: 1h 30min\n\
        last_reviewed: 2026-01-20\n\
        prerequisites: [\"Ninguno\"]\n\
        ---\n\
        # Compose\n";

    fn record(stats: &mut MetadataStats, relative: &str, text: &str) {
        stats.record(
            PathBuf::from(relative),
            &Document::parse(text),
            &ValidateConfig::default(),
        );
    }

    #[test]
    fn test_complete_page() {
        let mut stats = MetadataStats::default();
        record(&mut stats, "a.md", COMPLETE);

        assert_eq!(stats.total, 1);
        assert_eq!(stats.complete, 1);
        assert!(stats.issues.is_empty());
        assert_eq!(stats.by_category.get("Contenedores"), Some(&1));
        assert_eq!(stats.by_difficulty.get("beginner"), Some(&1));
        assert_eq!(stats.estimated_minutes, vec![90]);
    }

    #[test]
    fn test_missing_required_and_front_matter() {
        let mut stats = MetadataStats::default();
        record(&mut stats, "no-header.md", "# Only body\n");
        record(&mut stats, "empty-header.md", "---\n---\nbody\n");
        record(&mut stats, "partial.md", "---\ntitle: T\nstatus: draft\n---\n");

        assert_eq!(stats.total, 3);
        assert_eq!(stats.without_front_matter, 2);
        assert_eq!(stats.with_front_matter, 1);
        assert_eq!(stats.missing_required, 1);
        assert_eq!(stats.complete, 0);
        assert_eq!(
            stats.issues[2],
            (
                PathBuf::from("partial.md"),
                Issue::MissingRequired(vec![
                    "updated".into(),
                    "difficulty".into(),
                    "category".into()
                ])
            )
        );
        assert_eq!(stats.issues[0].1, Issue::MissingFrontMatter);
    }

    #[test]
    fn test_too_many_missing_recommended_is_incomplete() {
        let mut stats = MetadataStats::default();
        record(
            &mut stats,
            "a.md",
            "---\ntitle: T\nupdated: 2026-01-01\ndifficulty: expert\ncategory: X\nstatus: draft\n---\n",
        );
        // All required present, but six recommended fields missing.
        assert_eq!(stats.missing_required, 0);
        assert_eq!(stats.complete, 0);
        assert!(stats.issues.is_empty());
    }

    #[test]
    fn test_parse_estimated_time() {
        assert_eq!(parse_estimated_time("5 min"), Some(5));
        assert_eq!(parse_estimated_time("45min"), Some(45));
        assert_eq!(parse_estimated_time("2h"), Some(120));
        assert_eq!(parse_estimated_time("1h 30min"), Some(90));
        assert_eq!(parse_estimated_time("12"), Some(12));
        assert_eq!(parse_estimated_time(""), None);
        assert_eq!(parse_estimated_time("soon"), None);
    }

    #[test]
    fn test_collect_counts_unreadable_pages() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.md"), COMPLETE).unwrap();
        fs::write(dir.path().join("b.md"), [0xffu8, 0xfe]).unwrap();
        let files = docs::collect_docs(dir.path(), &[]).unwrap().files;

        let stats = MetadataStats::collect(&files, &ValidateConfig::default());
        assert_eq!(stats.total, 2);
        assert_eq!(stats.complete, 1);
        assert!(matches!(stats.issues[0].1, Issue::Unreadable(_)));
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_directory_is_an_issue() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("locked")).unwrap();
        fs::write(dir.path().join("a.md"), COMPLETE).unwrap();
        fs::write(dir.path().join("locked/b.md"), COMPLETE).unwrap();
        let locked = dir.path().join("locked");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();
        if fs::read_dir(&locked).is_ok() {
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let tree = docs::collect_docs(dir.path(), &[]).unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        let mut stats = MetadataStats::collect(&tree.files, &ValidateConfig::default());
        stats.record_walk_errors(dir.path(), &tree.errors);

        assert_eq!(stats.total, 1);
        assert_eq!(stats.issues.len(), 1);
        assert_eq!(stats.issues[0].0, PathBuf::from("locked"));
        assert!(matches!(stats.issues[0].1, Issue::Unreadable(_)));
    }

    #[test]
    fn test_helpers() {
        assert_eq!(capitalize("published"), "Published");
        assert_eq!(capitalize(""), "");
        assert!((percent(1, 4) - 25.0).abs() < f64::EPSILON);
        assert!(percent(1, 0).abs() < f64::EPSILON);
    }
}
