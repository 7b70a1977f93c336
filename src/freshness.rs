//! Staleness check for documentation pages.
//!
//! A page is stale when its `updated` date is more than `threshold` days
//! before today. Pages without a usable date are reported separately.

use crate::{
    config::DocsConfig,
    docs::{self, DocError},
    log,
    utils::date::{format_ymd, updated_date},
};
use anyhow::Result;
use chrono::NaiveDate;
use colored::Colorize;
use std::path::{Path, PathBuf};

/// Undated pages listed before eliding the rest.
const UNDATED_LIST_LIMIT: usize = 10;

/// Width of the report separator lines.
const RULE_WIDTH: usize = 80;

/// Verdict for a single page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Staleness {
    Undated,
    /// Older than the threshold, `days` since the last update
    Stale { days: i64 },
    /// Within the threshold; negative for dates in the future
    Fresh { days: i64 },
}

/// Classify a page date against `today`.
pub fn classify(date: Option<NaiveDate>, today: NaiveDate, threshold: u32) -> Staleness {
    let Some(date) = date else {
        return Staleness::Undated;
    };
    let days = (today - date).num_days();
    if days > i64::from(threshold) {
        Staleness::Stale { days }
    } else {
        Staleness::Fresh { days }
    }
}

/// A page older than the threshold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaleDoc {
    pub relative: PathBuf,
    pub updated: NaiveDate,
    pub days: i64,
}

#[derive(Debug, Default)]
pub struct FreshnessReport {
    /// Sorted oldest first, ties by path
    pub stale: Vec<StaleDoc>,
    pub undated: Vec<PathBuf>,
    pub fresh: usize,
    pub errors: Vec<String>,
}

impl FreshnessReport {
    /// Pages that were read and classified.
    pub fn checked(&self) -> usize {
        self.stale.len() + self.undated.len() + self.fresh
    }
}

/// Classify every page under `root`.
pub fn find_stale_docs(
    root: &Path,
    threshold: u32,
    today: NaiveDate,
) -> Result<FreshnessReport, DocError> {
    let tree = docs::collect_docs(root, &[])?;
    let mut report = FreshnessReport {
        errors: tree.error_messages(),
        ..FreshnessReport::default()
    };

    for file in tree.files {
        let doc = match docs::read_document(&file.path) {
            Ok(doc) => doc,
            Err(err) => {
                log!("error"; "{}", err.describe());
                report.errors.push(err.describe());
                continue;
            }
        };

        let Some(updated) = updated_date(&doc.front_matter()) else {
            report.undated.push(file.relative);
            continue;
        };
        match classify(Some(updated), today, threshold) {
            Staleness::Stale { days } => report.stale.push(StaleDoc {
                relative: file.relative,
                updated,
                days,
            }),
            Staleness::Fresh { days } => {
                if days < 0 {
                    log!(
                        "warn";
                        "{}: updated {} is in the future",
                        file.relative.display(),
                        format_ymd(updated)
                    );
                }
                report.fresh += 1;
            }
            Staleness::Undated => report.undated.push(file.relative),
        }
    }

    report
        .stale
        .sort_by(|a, b| b.days.cmp(&a.days).then_with(|| a.relative.cmp(&b.relative)));

    Ok(report)
}

/// `docsync freshness`: print stale and undated pages.
pub fn check_freshness(config: &DocsConfig, today: NaiveDate) -> Result<()> {
    let threshold = config.freshness.days;
    println!(
        "{}\n",
        format!("🔍 Buscando documentos sin actualizar en más de {threshold} días...").bold()
    );

    let report = find_stale_docs(&config.paths.docs, threshold, today)?;
    print_report(&report, threshold);
    Ok(())
}

fn print_report(report: &FreshnessReport, threshold: u32) {
    let rule = "=".repeat(RULE_WIDTH);

    if report.stale.is_empty() {
        println!("{}", "✅ No hay documentos obsoletos.".green());
    } else {
        println!(
            "{}",
            format!("⚠️  DOCUMENTOS OBSOLETOS ({}):", report.stale.len()).yellow().bold()
        );
        println!("{rule}");
        for doc in &report.stale {
            println!("  📄 {}", doc.relative.display());
            println!(
                "     Última actualización: {} ({} días)",
                format_ymd(doc.updated),
                doc.days
            );
            println!();
        }
    }

    if !report.undated.is_empty() {
        println!(
            "\n{}",
            format!("📝 DOCUMENTOS SIN FECHA 'updated' ({}):", report.undated.len()).bold()
        );
        println!("{rule}");
        for path in report.undated.iter().take(UNDATED_LIST_LIMIT) {
            println!("  📄 {}", path.display());
        }
        if report.undated.len() > UNDATED_LIST_LIMIT {
            println!("  ... y {} más", report.undated.len() - UNDATED_LIST_LIMIT);
        }
    }

    if !report.errors.is_empty() {
        println!("\n{}", format!("❌ ERRORES ({}):", report.errors.len()).red().bold());
        for error in &report.errors {
            println!("  {error}");
        }
    }

    println!("\n{rule}");
    println!("{}", "📊 Resumen:".bold());
    println!("  - Obsoletos (>{threshold} días): {}", report.stale.len());
    println!("  - Sin fecha: {}", report.undated.len());
    println!("  - Total revisados: {}", report.checked());
}
