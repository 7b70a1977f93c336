//! Line-oriented front matter reader.
//!
//! Front matter here is *not* YAML. Pages carry a small header of
//! `key: value` lines and simple lists, and the reader recognises exactly
//! that much:
//!
//! ```text
//! ---
//! title: "Guía de Docker"
//! updated: 2026-01-20
//! tags: [docker, containers]
//! prerequisites:
//!   - "Linux básico"
//! ---
//! ```
//!
//! Anything else degrades to an empty or partial mapping. Parsing never fails.

use regex::Regex;
use std::sync::LazyLock;

/// `key: value` with a non-empty value.
static RE_SCALAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z0-9_][A-Za-z0-9_-]*):\s*(.*\S)\s*$").unwrap());

/// `key:` with nothing after the colon.
static RE_LIST_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z0-9_][A-Za-z0-9_-]*):\s*$").unwrap());

/// Value of a front matter entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Scalar(String),
    List(Vec<String>),
}

impl FieldValue {
    /// Scalar text, `None` for lists.
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Self::Scalar(s) => Some(s),
            Self::List(_) => None,
        }
    }

    /// Serialize this value under `key` as header lines.
    ///
    /// Single-element lists use the inline form, longer lists the dashed form.
    pub fn render(&self, key: &str) -> Vec<String> {
        match self {
            Self::Scalar(value) => vec![format!("{key}: {value}")],
            Self::List(items) if items.len() == 1 => {
                vec![format!("{key}: [\"{}\"]", items[0])]
            }
            Self::List(items) => std::iter::once(format!("{key}:"))
                .chain(items.iter().map(|item| format!("  - \"{item}\"")))
                .collect(),
        }
    }
}

/// Ordered key/value mapping read from a front matter block.
///
/// Keys are unique; setting an existing key replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrontMatter {
    entries: Vec<(String, FieldValue)>,
}

/// Reader state while scanning header lines.
enum State {
    Scalar,
    List(usize),
}

impl FrontMatter {
    /// Parse header lines (the lines between the two `---` delimiters).
    pub fn parse_lines<'a, I>(lines: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut fm = Self::default();
        let mut state = State::Scalar;

        for raw in lines {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some(item) = list_item(line) {
                if let State::List(idx) = state {
                    fm.push_item(idx, unquote(item));
                }
                continue;
            }

            if let Some(caps) = RE_LIST_OPEN.captures(line) {
                let idx = fm.set(&caps[1], FieldValue::List(Vec::new()));
                state = State::List(idx);
                continue;
            }

            if let Some(caps) = RE_SCALAR.captures(line) {
                let value = match parse_inline_list(&caps[2]) {
                    Some(items) => FieldValue::List(items),
                    None => FieldValue::Scalar(unquote(&caps[2]).to_owned()),
                };
                fm.set(&caps[1], value);
                state = State::Scalar;
                continue;
            }

            if let State::List(idx) = state {
                fm.push_item(idx, unquote(line));
            }
        }

        fm
    }

    /// Set `key`, returning the entry index.
    pub fn set(&mut self, key: &str, value: FieldValue) -> usize {
        match self.entries.iter().position(|(k, _)| k == key) {
            Some(idx) => {
                self.entries[idx].1 = value;
                idx
            }
            None => {
                self.entries.push((key.to_owned(), value));
                self.entries.len() - 1
            }
        }
    }

    fn push_item(&mut self, idx: usize, item: &str) {
        if let FieldValue::List(items) = &mut self.entries[idx].1 {
            items.push(item.to_owned());
        }
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Scalar value of `key`, if present and not a list.
    pub fn scalar(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(FieldValue::as_scalar)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Text of a `- item` line.
fn list_item(line: &str) -> Option<&str> {
    if line == "-" {
        Some("")
    } else {
        line.strip_prefix("- ")
    }
}

/// Strip one layer of surrounding whitespace and quote characters.
fn unquote(s: &str) -> &str {
    s.trim().trim_matches(|c| c == '"' || c == '\'')
}

/// `[a, "b", 'c']` -> `["a", "b", "c"]`
fn parse_inline_list(value: &str) -> Option<Vec<String>> {
    let inner = value.strip_prefix('[')?.strip_suffix(']')?;
    if inner.trim().is_empty() {
        return Some(Vec::new());
    }
    Some(inner.split(',').map(|v| unquote(v).to_owned()).collect())
}
