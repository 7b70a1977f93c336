//! Spanish/English translation synchronization.
//!
//! Every Spanish page is paired with the English page at the same relative
//! path and the two `updated` dates are compared.
//!
//! # Pair states
//!
//! | State                        | Fix action           |
//! |------------------------------|----------------------|
//! | English page missing         | none (reported)      |
//! | Spanish page undated         | none (warned)        |
//! | English undated, no note     | insert note          |
//! | English undated, noted       | refresh note date    |
//! | Spanish newer                | insert/refresh note  |
//! | In sync, stale note          | remove note          |
//! | In sync                      | none                 |
//!
//! A file is only rewritten when the fix actually changes its text, so a
//! second `--fix` run over an unchanged tree writes nothing.

use crate::{
    config::DocsConfig,
    docs::{self, DocError, DocFile, Document, marker},
    log,
    utils::date::{format_ymd, updated_date},
};
use anyhow::Result;
use chrono::NaiveDate;
use colored::Colorize;
use std::path::{Path, PathBuf};

/// Synced entries listed in verbose mode before eliding the rest.
const VERBOSE_LIST_LIMIT: usize = 10;

/// Width of the report separator lines.
const RULE_WIDTH: usize = 80;

// ============================================================================
// Classification
// ============================================================================

/// Relationship between a Spanish page and its English counterpart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    /// No English page at the same relative path.
    TargetMissing,
    /// The Spanish page has no usable `updated` date.
    SourceUndated,
    /// The English page has no usable `updated` date.
    TargetUndated { marked: bool },
    /// The Spanish page was updated after the English one.
    SourceNewer { marked: bool },
    /// The English page is at least as recent as the Spanish one.
    InSync { marked: bool },
}

/// Change fix mode makes to the English page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixAction {
    Insert,
    Refresh,
    Remove,
    None,
}

impl SyncState {
    /// Fix action for this state.
    pub const fn action(self) -> FixAction {
        match self {
            Self::TargetMissing | Self::SourceUndated | Self::InSync { marked: false } => {
                FixAction::None
            }
            Self::TargetUndated { marked: false } | Self::SourceNewer { marked: false } => {
                FixAction::Insert
            }
            Self::TargetUndated { marked: true } | Self::SourceNewer { marked: true } => {
                FixAction::Refresh
            }
            Self::InSync { marked: true } => FixAction::Remove,
        }
    }

    /// Whether the English page is behind.
    pub const fn is_out_of_sync(self) -> bool {
        matches!(self, Self::TargetUndated { .. } | Self::SourceNewer { .. })
    }

    /// Report label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::TargetMissing => "EN no existe",
            Self::SourceUndated => "ES sin fecha updated",
            Self::TargetUndated { marked: false } => "EN sin fecha updated",
            Self::TargetUndated { marked: true } => "EN tiene nota pendiente",
            Self::SourceNewer { marked: false } => "ES más reciente",
            Self::SourceNewer { marked: true } => "ES más reciente (nota existe)",
            Self::InSync { marked: true } => "Sincronizado pero nota pendiente",
            Self::InSync { marked: false } => "Sincronizado",
        }
    }
}

/// What is known about the English page, when it exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetInfo {
    pub date: Option<NaiveDate>,
    pub marked: bool,
}

/// Classify a pair from the Spanish date and the English page (if any).
pub fn classify(source_date: Option<NaiveDate>, target: Option<TargetInfo>) -> SyncState {
    let Some(target) = target else {
        return SyncState::TargetMissing;
    };
    let Some(source_date) = source_date else {
        return SyncState::SourceUndated;
    };
    match target.date {
        None => SyncState::TargetUndated {
            marked: target.marked,
        },
        Some(target_date) if source_date > target_date => SyncState::SourceNewer {
            marked: target.marked,
        },
        Some(_) => SyncState::InSync {
            marked: target.marked,
        },
    }
}

/// Apply `action` to an English page. Returns whether its text changed.
pub fn apply(action: FixAction, doc: &mut Document, source_date: NaiveDate) -> bool {
    match action {
        FixAction::Insert => marker::insert(doc, source_date),
        FixAction::Refresh => marker::refresh(doc, source_date),
        FixAction::Remove => marker::remove(doc),
        FixAction::None => false,
    }
}

// ============================================================================
// Synchronizer
// ============================================================================

/// Settings for one synchronization run.
#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// Spanish tree root
    pub source_root: PathBuf,
    /// English tree root
    pub target_root: PathBuf,
    /// Write fixes to English pages
    pub fix: bool,
    /// List synced pairs and missing translations as they are found
    pub verbose: bool,
}

impl SyncOptions {
    pub fn from_config(config: &DocsConfig, fix: bool, verbose: bool) -> Self {
        Self {
            source_root: config.paths.source.clone(),
            target_root: config.paths.target.clone(),
            fix,
            verbose,
        }
    }
}

/// One Spanish page and the outcome for its English counterpart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncEntry {
    /// Path relative to both tree roots
    pub relative: PathBuf,
    pub source_date: Option<NaiveDate>,
    pub target_date: Option<NaiveDate>,
    /// Date carried by the English page's pending note, if any
    pub note_date: Option<NaiveDate>,
    /// State before any fix was applied
    pub state: SyncState,
    /// Whether fix mode rewrote the English page
    pub written: bool,
}

/// Result of a synchronization run.
#[derive(Debug, Default)]
pub struct SyncReport {
    pub entries: Vec<SyncEntry>,
    pub errors: Vec<String>,
}

impl SyncReport {
    pub fn out_of_sync(&self) -> impl Iterator<Item = &SyncEntry> {
        self.entries.iter().filter(|e| e.state.is_out_of_sync())
    }

    pub fn in_sync(&self) -> impl Iterator<Item = &SyncEntry> {
        self.entries
            .iter()
            .filter(|e| matches!(e.state, SyncState::InSync { .. }))
    }

    pub fn with_state(&self, state: SyncState) -> impl Iterator<Item = &SyncEntry> {
        self.entries.iter().filter(move |e| e.state == state)
    }

    /// Number of English pages rewritten.
    pub fn writes(&self) -> usize {
        self.entries.iter().filter(|e| e.written).count()
    }
}

/// Walks the Spanish tree and checks each English counterpart.
pub struct Synchronizer {
    options: SyncOptions,
}

impl Synchronizer {
    pub const fn new(options: SyncOptions) -> Self {
        Self { options }
    }

    /// Check every pair. Only a missing Spanish root is fatal; per-file
    /// errors are collected in the report.
    pub fn run(&self) -> Result<SyncReport, DocError> {
        let SyncOptions {
            source_root,
            target_root,
            ..
        } = &self.options;

        let tree = docs::collect_docs(source_root, &[target_root.as_path()])?;
        let mut report = SyncReport {
            errors: tree.error_messages(),
            ..SyncReport::default()
        };

        for file in &tree.files {
            match self.check_pair(file, &mut report.errors) {
                Ok(entry) => report.entries.push(entry),
                Err(err) => {
                    log!("error"; "{}", err.describe());
                    report.errors.push(err.describe());
                }
            }
        }

        Ok(report)
    }

    fn check_pair(&self, file: &DocFile, errors: &mut Vec<String>) -> Result<SyncEntry, DocError> {
        let relative = file.relative.clone();
        let target_path = self.options.target_root.join(&relative);
        let source_date = updated_date(&docs::read_document(&file.path)?.front_matter());

        if !target_path.is_file() {
            if self.options.verbose {
                log!("sync"; "EN no existe: {}", target_path.display());
            }
            return Ok(SyncEntry {
                relative,
                source_date,
                target_date: None,
                note_date: None,
                state: SyncState::TargetMissing,
                written: false,
            });
        }

        let mut target = docs::read_document(&target_path)?;
        let target_date = updated_date(&target.front_matter());
        let note = marker::find(&target);
        let state = classify(
            source_date,
            Some(TargetInfo {
                date: target_date,
                marked: note.is_some(),
            }),
        );

        if state == SyncState::SourceUndated {
            log!("warn"; "ES sin fecha updated, no se puede comparar: {}", file.path.display());
        }

        let mut written = false;
        if self.options.fix
            && let Some(source_date) = source_date
            && apply(state.action(), &mut target, source_date)
        {
            match docs::write_document(&target_path, &target) {
                Ok(()) => {
                    written = true;
                    log!("fix"; "{}: {}", describe_action(state.action()), target_path.display());
                }
                Err(err) => {
                    log!("error"; "{}", err.describe());
                    errors.push(err.describe());
                }
            }
        }

        Ok(SyncEntry {
            relative,
            source_date,
            target_date,
            note_date: note.and_then(|n| n.date),
            state,
            written,
        })
    }
}

fn describe_action(action: FixAction) -> &'static str {
    match action {
        FixAction::Insert => "añadida nota de traducción pendiente",
        FixAction::Refresh => "actualizada nota de traducción pendiente",
        FixAction::Remove => "removida nota obsoleta",
        FixAction::None => "sin cambios",
    }
}

// ============================================================================
// Command
// ============================================================================

/// `docsync sync`: check both trees and print the report.
pub fn check_sync(config: &DocsConfig, fix: bool, verbose: bool) -> Result<()> {
    let options = SyncOptions::from_config(config, fix, verbose);

    println!("{}", "🔄 Verificando sincronización ES/EN...".bold());
    println!("   ES: {}", options.source_root.display());
    println!("   EN: {}", options.target_root.display());
    println!("   Modo fix: {}", if fix { "Sí" } else { "No" });
    println!();

    let report = Synchronizer::new(options.clone()).run()?;
    print_report(&report, &options);
    Ok(())
}

fn print_report(report: &SyncReport, options: &SyncOptions) {
    let rule = "=".repeat(RULE_WIDTH);
    let source = |rel: &Path| options.source_root.join(rel);
    let target = |rel: &Path| options.target_root.join(rel);

    let out_of_sync: Vec<_> = report.out_of_sync().collect();
    if !out_of_sync.is_empty() {
        println!(
            "{}",
            format!("📋 ARCHIVOS DESINCRONIZADOS ({}):", out_of_sync.len()).yellow().bold()
        );
        println!("{rule}");
        for entry in &out_of_sync {
            println!("  ES: {}", source(entry.relative.as_path()).display());
            println!("  EN: {}", target(entry.relative.as_path()).display());
            println!("  Estado: {}", entry.state.label());
            if let Some(date) = entry.source_date {
                println!("  ES updated: {}", format_ymd(date));
            }
            if let Some(date) = entry.target_date {
                println!("  EN updated: {}", format_ymd(date));
            }
            if let Some(date) = entry.note_date {
                println!("  Nota pendiente: {}", format_ymd(date));
            }
            println!();
        }
    }

    let missing: Vec<_> = report.with_state(SyncState::TargetMissing).collect();
    if !missing.is_empty() {
        println!(
            "{}",
            format!("🌐 SIN TRADUCCIÓN EN ({}):", missing.len()).cyan().bold()
        );
        println!("{rule}");
        for entry in &missing {
            println!("  {} - {}", target(entry.relative.as_path()).display(), entry.state.label());
        }
        println!();
    }

    let undated: Vec<_> = report.with_state(SyncState::SourceUndated).collect();
    if !undated.is_empty() {
        println!(
            "{}",
            format!("⚠️  ES SIN FECHA 'updated' ({}):", undated.len()).yellow().bold()
        );
        println!("{rule}");
        for entry in &undated {
            println!("  {}", source(entry.relative.as_path()).display());
        }
        println!();
    }

    let in_sync: Vec<_> = report.in_sync().collect();
    if options.verbose && !in_sync.is_empty() {
        println!(
            "{}",
            format!("✅ ARCHIVOS SINCRONIZADOS ({}):", in_sync.len()).green().bold()
        );
        println!("{rule}");
        for entry in in_sync.iter().take(VERBOSE_LIST_LIMIT) {
            println!("  {} - {}", source(entry.relative.as_path()).display(), entry.state.label());
        }
        if in_sync.len() > VERBOSE_LIST_LIMIT {
            println!("  ... y {} más", in_sync.len() - VERBOSE_LIST_LIMIT);
        }
        println!();
    }

    if !report.errors.is_empty() {
        println!(
            "{}",
            format!("❌ ERRORES ({}):", report.errors.len()).red().bold()
        );
        println!("{rule}");
        for error in &report.errors {
            println!("  {error}");
        }
        println!();
    }

    println!("{rule}");
    println!("{}", "📊 RESUMEN:".bold());
    println!("  - Desincronizados: {}", out_of_sync.len());
    println!("  - Sincronizados: {}", in_sync.len());
    println!("  - Sin traducción: {}", missing.len());
    println!("  - ES sin fecha: {}", undated.len());
    println!("  - Errores: {}", report.errors.len());
    if options.fix {
        println!("  - Archivos modificados: {}", report.writes());
    }

    if !out_of_sync.is_empty() && !options.fix {
        println!("\n💡 Ejecuta con --fix para aplicar correcciones automáticamente");
    }
}

// ============================================================================
// Tests
// ============================================================================
