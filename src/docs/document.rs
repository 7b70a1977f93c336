//! Structured view of a Markdown page.
//!
//! A [`Document`] keeps the raw text as lines (split on `\n`, carriage
//! returns preserved) together with the position of the front matter block,
//! so edits work on lines instead of whole-text regex replacement and an
//! untouched document renders back byte-for-byte.

use super::frontmatter::FrontMatter;
use std::ops::Range;

/// Front matter delimiter line.
pub const DELIMITER: &str = "---";

/// A page split into front matter header and body lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    lines: Vec<String>,
    /// Header lines between the delimiters, if the page has front matter.
    header: Option<Range<usize>>,
}

impl Document {
    /// Split raw page text.
    ///
    /// Front matter is recognised only when the very first line is `---`
    /// and a later line is `---` as well.
    pub fn parse(text: &str) -> Self {
        let lines: Vec<String> = text.split('\n').map(str::to_owned).collect();
        let header = match lines.first() {
            Some(first) if is_delimiter(first) => lines
                .iter()
                .skip(1)
                .position(|l| is_delimiter(l))
                .map(|offset| 1..offset + 1),
            _ => None,
        };
        Self { lines, header }
    }

    /// Join the lines back into page text.
    pub fn render(&self) -> String {
        self.lines.join("\n")
    }

    pub fn has_front_matter(&self) -> bool {
        self.header.is_some()
    }

    /// Raw header lines (empty when there is no front matter).
    pub fn header_lines(&self) -> &[String] {
        match &self.header {
            Some(range) => &self.lines[range.clone()],
            None => &[],
        }
    }

    /// Parsed front matter; empty when the page has none.
    pub fn front_matter(&self) -> FrontMatter {
        FrontMatter::parse_lines(self.header_lines().iter().map(String::as_str))
    }

    /// Index of the first body line (right after the closing delimiter).
    pub fn body_start(&self) -> usize {
        self.header.as_ref().map_or(0, |range| range.end + 1)
    }

    /// Whether the page uses `\r\n` line endings (judged by its first line).
    pub fn uses_crlf(&self) -> bool {
        self.lines.first().is_some_and(|l| l.ends_with('\r'))
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn body(&self) -> &[String] {
        &self.lines[self.body_start()..]
    }

    /// Insert `new` so that its first line lands at index `at`.
    pub fn insert_lines<I>(&mut self, at: usize, new: I)
    where
        I: IntoIterator<Item = String>,
    {
        let at = at.min(self.lines.len());
        let before = self.lines.len();
        self.lines.splice(at..at, new);
        let added = self.lines.len() - before;
        self.shift_header(at, added as isize);
    }

    /// Replace line `idx`. Returns whether the text changed.
    pub fn replace_line(&mut self, idx: usize, line: String) -> bool {
        if self.lines[idx] == line {
            return false;
        }
        self.lines[idx] = line;
        true
    }

    /// Remove line `idx`.
    pub fn remove_line(&mut self, idx: usize) {
        self.lines.remove(idx);
        self.shift_header(idx, -1);
    }

    /// Append lines at the end of the front matter header, after its last
    /// non-blank line. Does nothing when the page has no front matter.
    pub fn append_header_lines(&mut self, new: Vec<String>) {
        let Some(range) = self.header.clone() else {
            return;
        };
        let at = self.lines[range.clone()]
            .iter()
            .rposition(|l| !l.trim().is_empty())
            .map_or(range.start, |offset| range.start + offset + 1);
        let added = new.len();
        self.lines.splice(at..at, new);
        self.header = Some(range.start..range.end + added);
    }

    /// Keep the header range in step with an edit at `at` that happened
    /// in the body. Edits inside the header go through `append_header_lines`.
    fn shift_header(&mut self, at: usize, delta: isize) {
        if let Some(range) = &mut self.header
            && at <= range.start
        {
            range.start = range.start.saturating_add_signed(delta);
            range.end = range.end.saturating_add_signed(delta);
        }
    }
}

fn is_delimiter(line: &str) -> bool {
    line.strip_suffix('\r').unwrap_or(line) == DELIMITER
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docs::frontmatter::FieldValue;

    const PAGE: &str = "---\ntitle: Guía\nupdated: 2026-01-20\n---\n# Guía\n\nTexto.\n";

    #[test]
    fn test_parse_front_matter_block() {
        let doc = Document::parse(PAGE);
        assert!(doc.has_front_matter());
        assert_eq!(doc.header_lines(), ["title: Guía", "updated: 2026-01-20"]);
        assert_eq!(doc.body_start(), 4);
        assert_eq!(doc.body()[0], "# Guía");
        assert_eq!(doc.front_matter().scalar("title"), Some("Guía"));
    }

    #[test]
    fn test_render_is_byte_exact() {
        for text in [PAGE, "", "no newline", "a\r\nb\r\n", "---\r\nk: v\r\n---\r\nbody"] {
            assert_eq!(Document::parse(text).render(), text);
        }
    }

    #[test]
    fn test_crlf_delimiters() {
        let doc = Document::parse("---\r\nupdated: 2026-01-02\r\n---\r\nbody");
        assert!(doc.has_front_matter());
        assert_eq!(doc.front_matter().scalar("updated"), Some("2026-01-02"));
    }

    #[test]
    fn test_no_front_matter() {
        let doc = Document::parse("# Title\n---\nnot a header\n---\n");
        assert!(!doc.has_front_matter());
        assert!(doc.front_matter().is_empty());
        assert_eq!(doc.body_start(), 0);
    }

    #[test]
    fn test_unclosed_front_matter() {
        let doc = Document::parse("---\ntitle: x\nbody without close\n");
        assert!(!doc.has_front_matter());
        assert!(doc.front_matter().is_empty());
    }

    #[test]
    fn test_delimiter_must_be_exact() {
        let doc = Document::parse("----\ntitle: x\n----\n");
        assert!(!doc.has_front_matter());
        let doc = Document::parse(" ---\ntitle: x\n---\n");
        assert!(!doc.has_front_matter());
    }

    #[test]
    fn test_empty_header() {
        let doc = Document::parse("---\n---\nbody");
        assert!(doc.has_front_matter());
        assert!(doc.header_lines().is_empty());
        assert_eq!(doc.body(), ["body"]);
    }

    #[test]
    fn test_insert_body_lines_keeps_header() {
        let mut doc = Document::parse(PAGE);
        let at = doc.body_start();
        doc.insert_lines(at, ["".to_string(), "note".to_string()]);
        assert_eq!(doc.header_lines().len(), 2);
        assert_eq!(doc.body()[..3], ["", "note", "# Guía"]);
    }

    #[test]
    fn test_append_header_lines_after_last_value() {
        let mut doc = Document::parse("---\ntitle: x\n\n---\nbody");
        doc.append_header_lines(FieldValue::Scalar("2026-01-25".into()).render("updated"));
        assert_eq!(doc.render(), "---\ntitle: x\nupdated: 2026-01-25\n\n---\nbody");
        assert_eq!(doc.front_matter().scalar("updated"), Some("2026-01-25"));
        assert_eq!(doc.body(), ["body"]);
    }

    #[test]
    fn test_append_header_lines_to_empty_header() {
        let mut doc = Document::parse("---\n---\nbody");
        doc.append_header_lines(vec!["status: published".into()]);
        assert_eq!(doc.render(), "---\nstatus: published\n---\nbody");
    }

    #[test]
    fn test_replace_and_remove_line() {
        let mut doc = Document::parse("a\nb\nc");
        assert!(!doc.replace_line(1, "b".into()));
        assert!(doc.replace_line(1, "B".into()));
        doc.remove_line(0);
        assert_eq!(doc.render(), "B\nc");
    }
}
