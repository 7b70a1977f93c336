//! "Translation pending" advisory note in English pages.
//!
//! The note is a single body line:
//!
//! ```text
//! 🚧 **TRANSLATION PENDING** - Last updated in Spanish: 2026-01-20
//! ```
//!
//! padded by one blank line on each side when inserted. The literal text is
//! shared with pages already marked by earlier tooling and must not change.
//!
//! [`insert`], [`refresh`] and [`remove`] are idempotent and return whether
//! the document changed.

use super::document::Document;
use crate::utils::date::{format_ymd, parse_ymd};
use chrono::NaiveDate;

/// Leading token identifying a marker line.
pub const MARKER_TOKEN: &str = "🚧 **TRANSLATION PENDING**";

/// Text between the token and the date.
const MARKER_DATE_LABEL: &str = " - Last updated in Spanish: ";

/// A marker found in a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Marker {
    /// Absolute line index.
    pub line: usize,
    /// Date carried by the marker, if it is readable.
    pub date: Option<NaiveDate>,
}

/// The marker line for `date`.
pub fn marker_line(date: NaiveDate) -> String {
    format!("{MARKER_TOKEN}{MARKER_DATE_LABEL}{}", format_ymd(date))
}

/// First marker in the body.
pub fn find(doc: &Document) -> Option<Marker> {
    let line = marker_lines(doc).into_iter().next()?;
    let date = doc.lines()[line]
        .split_once(MARKER_DATE_LABEL)
        .and_then(|(_, rest)| parse_ymd(rest));
    Some(Marker { line, date })
}

pub fn has_marker(doc: &Document) -> bool {
    find(doc).is_some()
}

/// Add a marker for `date`, or refresh the existing one.
pub fn insert(doc: &mut Document, date: NaiveDate) -> bool {
    if has_marker(doc) {
        return refresh(doc, date);
    }

    let eol = if doc.uses_crlf() { "\r" } else { "" };
    let at = insertion_point(doc);
    doc.insert_lines(
        at,
        [
            eol.to_string(),
            format!("{}{eol}", marker_line(date)),
            eol.to_string(),
        ],
    );
    true
}

/// Rewrite the date of the existing marker in place.
///
/// Extra marker lines left behind by older tooling are dropped so the page
/// ends up with exactly one. Does nothing when the page has no marker.
pub fn refresh(doc: &mut Document, date: NaiveDate) -> bool {
    let lines = marker_lines(doc);
    let Some((&first, duplicates)) = lines.split_first() else {
        return false;
    };

    let mut changed = false;
    for &idx in duplicates.iter().rev() {
        remove_padded(doc, idx);
        changed = true;
    }

    let eol = if doc.lines()[first].ends_with('\r') {
        "\r"
    } else {
        ""
    };
    changed |= doc.replace_line(first, format!("{}{eol}", marker_line(date)));
    changed
}

/// Delete every marker line together with its blank padding.
pub fn remove(doc: &mut Document) -> bool {
    let lines = marker_lines(doc);
    for &idx in lines.iter().rev() {
        remove_padded(doc, idx);
    }
    !lines.is_empty()
}

/// Where a new marker goes: right after the front matter, else right after
/// the first level-1 heading, else at the top of the body.
fn insertion_point(doc: &Document) -> usize {
    let start = doc.body_start();
    if doc.has_front_matter() {
        return start;
    }
    doc.body()
        .iter()
        .position(|l| l.starts_with("# "))
        .map_or(start, |offset| start + offset + 1)
}

fn marker_lines(doc: &Document) -> Vec<usize> {
    let start = doc.body_start();
    doc.body()
        .iter()
        .enumerate()
        .filter(|(_, l)| l.trim_start().starts_with(MARKER_TOKEN))
        .map(|(offset, _)| start + offset)
        .collect()
}

/// Remove the marker at `idx` and one blank line on each side of it.
fn remove_padded(doc: &mut Document, idx: usize) {
    let is_blank =
        |doc: &Document, i: usize| doc.lines().get(i).is_some_and(|l| l.trim().is_empty());

    if is_blank(doc, idx + 1) {
        doc.remove_line(idx + 1);
    }
    doc.remove_line(idx);
    if idx > doc.body_start() && is_blank(doc, idx - 1) {
        doc.remove_line(idx - 1);
    }
}
