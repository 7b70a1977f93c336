//! docsync - maintenance tools for a bilingual mkdocs knowledge base.

mod badge;
mod cli;
mod config;
mod docs;
mod expand;
mod freshness;
mod logger;
mod stamp;
mod sync;
mod utils;
mod validate;
mod whitespace;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use config::DocsConfig;
use std::path::Path;
use utils::date::{parse_ymd, today};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = DocsConfig::load(&cli)?;

    match &cli.command {
        Commands::Sync { fix, verbose, .. } => sync::check_sync(&config, *fix, *verbose),
        Commands::Freshness { .. } => freshness::check_freshness(&config, today()),
        Commands::Stamp { docs_args, date } => {
            let date = match date {
                Some(value) => parse_ymd(value)
                    .with_context(|| format!("invalid --date `{value}`, expected YYYY-MM-DD"))?,
                None => today(),
            };
            stamp::stamp_docs(&config, docs_args, date)
        }
        Commands::Expand { docs_args } => expand::expand_docs(&config, docs_args),
        Commands::Validate {
            category, report, ..
        } => validate::validate_docs(&config, category.as_deref(), *report),
        Commands::Badge { dry_run, .. } => badge::add_badges(&config, *dry_run),
        Commands::Whitespace { path, dry_run } => {
            let root = config.resolve(path.as_deref().unwrap_or(Path::new(".")));
            whitespace::fix_whitespace(&config, &root, *dry_run)
        }
    }
}
