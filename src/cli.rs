//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// docsync knowledge base maintenance CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Project root directory (default: current directory)
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Config file name (default: docsync.toml)
    #[arg(short = 'C', long, default_value = "docsync.toml")]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Shared arguments for commands that walk the documentation tree
#[derive(clap::Args, Debug, Clone)]
pub struct DocsArgs {
    /// Documentation directory (relative to project root)
    #[arg(long = "docs-path")]
    pub docs_path: Option<PathBuf>,

    /// Only process files whose path contains this text (case insensitive)
    #[arg(long)]
    pub category: Option<String>,

    /// Maximum number of files to process
    #[arg(long = "max-files")]
    pub max_files: Option<usize>,

    /// Show the changes without writing them
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Compare Spanish and English trees and manage translation pending notes
    Sync {
        /// Apply fixes (add, refresh or remove pending notes)
        #[arg(long)]
        fix: bool,

        /// Also list synchronized files
        #[arg(long)]
        verbose: bool,

        /// Spanish (source) documentation root
        #[arg(long = "es-path")]
        es_path: Option<PathBuf>,

        /// English (target) documentation root
        #[arg(long = "en-path")]
        en_path: Option<PathBuf>,
    },

    /// List pages whose `updated` date is older than a threshold
    Freshness {
        /// Days without updates before a page counts as stale
        #[arg(long)]
        days: Option<u32>,

        /// Documentation directory (relative to project root)
        #[arg(long = "docs-path")]
        docs_path: Option<PathBuf>,
    },

    /// Add an `updated` field to pages that lack one
    Stamp {
        #[command(flatten)]
        docs_args: DocsArgs,

        /// Date to stamp (YYYY-MM-DD, default: today)
        #[arg(long)]
        date: Option<String>,
    },

    /// Add inferred metadata fields (difficulty, category, ...) to pages
    Expand {
        #[command(flatten)]
        docs_args: DocsArgs,
    },

    /// Validate front matter and print metadata statistics
    Validate {
        /// Documentation directory (relative to project root)
        #[arg(long = "docs-path")]
        docs_path: Option<PathBuf>,

        /// Only analyze files whose path contains this text (case insensitive)
        #[arg(long)]
        category: Option<String>,

        /// Print the full report
        #[arg(long)]
        report: bool,
    },

    /// Insert the metadata badge macro after the front matter of each page
    Badge {
        /// Documentation directory (relative to project root)
        #[arg(long = "docs-path")]
        docs_path: Option<PathBuf>,

        /// Show the changes without writing them
        #[arg(long = "dry-run")]
        dry_run: bool,
    },

    /// Fix common Markdown whitespace issues
    Whitespace {
        /// Directory to scan (relative to project root)
        path: Option<PathBuf>,

        /// Show the changes without writing them
        #[arg(long = "dry-run")]
        dry_run: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sync_flags() {
        let cli = Cli::parse_from([
            "docsync", "sync", "--fix", "--verbose", "--es-path", "es", "--en-path", "es/en",
        ]);
        match cli.command {
            Commands::Sync {
                fix,
                verbose,
                es_path,
                en_path,
            } => {
                assert!(fix);
                assert!(verbose);
                assert_eq!(es_path, Some(PathBuf::from("es")));
                assert_eq!(en_path, Some(PathBuf::from("es/en")));
            }
            _ => panic!("expected sync"),
        }
    }

    #[test]
    fn test_sync_defaults_are_report_only() {
        let cli = Cli::parse_from(["docsync", "sync"]);
        assert!(matches!(
            cli.command,
            Commands::Sync {
                fix: false,
                verbose: false,
                es_path: None,
                en_path: None
            }
        ));
        assert_eq!(cli.config, PathBuf::from("docsync.toml"));
    }

    #[test]
    fn test_stamp_flattened_args() {
        let cli = Cli::parse_from([
            "docsync",
            "stamp",
            "--dry-run",
            "--max-files",
            "3",
            "--date",
            "2026-01-25",
        ]);
        match cli.command {
            Commands::Stamp { docs_args, date } => {
                assert!(docs_args.dry_run);
                assert_eq!(docs_args.max_files, Some(3));
                assert_eq!(date.as_deref(), Some("2026-01-25"));
            }
            _ => panic!("expected stamp"),
        }
    }

    #[test]
    fn test_freshness_days() {
        let cli = Cli::parse_from(["docsync", "freshness", "--days", "30"]);
        assert!(matches!(
            cli.command,
            Commands::Freshness { days: Some(30), .. }
        ));
    }
}
