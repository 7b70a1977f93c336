//! Documentation tree access shared by every command.
//!
//! - **frontmatter**: line-oriented `key: value` header reader
//! - **document**: page split into header and body lines
//! - **marker**: "translation pending" note handling
//! - **error**: per-file I/O errors
//!
//! # Scope convention
//!
//! Blog posts and section index pages are not documentation: any path with a
//! `blog` segment and any file named exactly `index.md` is skipped before it
//! is ever read.

pub mod document;
pub mod error;
pub mod frontmatter;
pub mod marker;

pub use document::Document;
pub use error::DocError;

use crate::log;
use std::{
    ffi::OsStr,
    fs,
    path::{Path, PathBuf},
};
use walkdir::WalkDir;

/// Path segment marking blog content.
const BLOG_SEGMENT: &str = "blog";

/// Section index page name.
const INDEX_FILE: &str = "index.md";

/// A Markdown file found under a tree root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocFile {
    /// Full path
    pub path: PathBuf,
    /// Path relative to the tree root
    pub relative: PathBuf,
}

/// Whether a path (relative to its tree root) is outside the documentation scope.
pub fn is_excluded(relative: &Path) -> bool {
    relative
        .components()
        .any(|c| c.as_os_str() == OsStr::new(BLOG_SEGMENT))
        || relative.file_name() == Some(OsStr::new(INDEX_FILE))
}

/// Fail early when a tree root is missing.
pub fn ensure_root(root: &Path) -> Result<(), DocError> {
    if root.is_dir() {
        Ok(())
    } else {
        Err(DocError::MissingRoot(root.to_path_buf()))
    }
}

/// Markdown files found by a walk, plus the entries the walk could not read.
#[derive(Debug, Default)]
pub struct DocTree {
    pub files: Vec<DocFile>,
    /// Unreadable directories or entries, already logged
    pub errors: Vec<DocError>,
}

impl DocTree {
    /// One-line descriptions of the walk errors.
    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(DocError::describe).collect()
    }
}

/// Collect every `.md` file under `root`, sorted by path.
///
/// `prune` receives paths relative to `root` (directories and files) and
/// returns true for entries to skip; a pruned directory is not descended.
/// Entries the walk cannot read are logged and kept in [`DocTree::errors`].
pub fn collect_markdown<F>(root: &Path, prune: F) -> Result<DocTree, DocError>
where
    F: Fn(&Path) -> bool,
{
    ensure_root(root)?;

    let relative_of = |path: &Path| path.strip_prefix(root).unwrap_or(path).to_path_buf();

    let mut tree = DocTree::default();
    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !prune(&relative_of(e.path())));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                let path = err.path().unwrap_or(root).to_path_buf();
                let err = DocError::Walk(path, err);
                log!("error"; "{}", err.describe());
                tree.errors.push(err);
                continue;
            }
        };
        if entry.file_type().is_file() && entry.path().extension() == Some(OsStr::new("md")) {
            tree.files.push(DocFile {
                relative: relative_of(entry.path()),
                path: entry.into_path(),
            });
        }
    }

    Ok(tree)
}

/// Collect documentation pages under `root`, applying the scope convention.
///
/// Directories listed in `skip` (absolute paths) are not descended; this keeps
/// a nested English tree (`docs/en` inside `docs`) out of the Spanish walk.
pub fn collect_docs(root: &Path, skip: &[&Path]) -> Result<DocTree, DocError> {
    collect_markdown(root, |relative| {
        is_excluded(relative) || skip.iter().any(|s| root.join(relative) == *s)
    })
}

/// Keep files whose path contains `category` (case insensitive), then cap
/// the list at `max_files`.
pub fn select(
    files: Vec<DocFile>,
    category: Option<&str>,
    max_files: Option<usize>,
) -> Vec<DocFile> {
    let category = category.map(str::to_lowercase);
    files
        .into_iter()
        .filter(|f| {
            category.as_ref().is_none_or(|c| {
                f.path.to_string_lossy().to_lowercase().contains(c.as_str())
            })
        })
        .take(max_files.unwrap_or(usize::MAX))
        .collect()
}

/// Read and split a page.
pub fn read_document(path: &Path) -> Result<Document, DocError> {
    fs::read_to_string(path)
        .map(|text| Document::parse(&text))
        .map_err(|err| DocError::Read(path.to_path_buf(), err))
}

/// Write a page back in place.
pub fn write_document(path: &Path, doc: &Document) -> Result<(), DocError> {
    fs::write(path, doc.render()).map_err(|err| DocError::Write(path.to_path_buf(), err))
}

/// Outcome of an edit pass over a set of pages.
#[derive(Debug)]
pub struct EditReport<T> {
    /// Pages the edit changed (written unless dry run), with what changed
    pub changed: Vec<(DocFile, T)>,
    pub unchanged: usize,
    pub errors: Vec<String>,
}

impl<T> Default for EditReport<T> {
    fn default() -> Self {
        Self {
            changed: Vec::new(),
            unchanged: 0,
            errors: Vec::new(),
        }
    }
}

/// Run `edit` over each page and write back the pages it changed.
///
/// `edit` returns `Some(change)` when it modified the document. The pass
/// stops once `limit` pages have changed. With `dry_run` nothing is written.
pub fn edit_each<T, F>(
    files: &[DocFile],
    limit: Option<usize>,
    dry_run: bool,
    mut edit: F,
) -> EditReport<T>
where
    F: FnMut(&DocFile, &mut Document) -> Option<T>,
{
    let mut report = EditReport::default();

    for file in files {
        if limit.is_some_and(|max| report.changed.len() >= max) {
            break;
        }

        let result = read_document(&file.path).and_then(|mut doc| {
            let change = edit(file, &mut doc);
            if change.is_some() && !dry_run {
                write_document(&file.path, &doc)?;
            }
            Ok(change)
        });

        match result {
            Ok(Some(change)) => report.changed.push((file.clone(), change)),
            Ok(None) => report.unchanged += 1,
            Err(err) => {
                log!("error"; "{}", err.describe());
                report.errors.push(err.describe());
            }
        }
    }

    report
}
