//! Minimal keyfile reader/writer primitives.
//!
//! This is not a general-purpose INI library: it understands exactly the
//! shape the unattended config format needs — `[Section]` headers followed
//! by `key = value` lines, with `#`/`;` comment lines and blank lines
//! skipped. Sections are kept in file-declaration order, and duplicate
//! section names are preserved as separate sections so the validator can
//! diagnose them by ordinal.

use thiserror::Error;

/// A line that is neither a section header, a key/value pair, a comment,
/// nor blank.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("keyfile parse error at line {line}: {message}")]
pub struct ParseError {
    pub line: usize,
    pub message: String,
}

impl ParseError {
    fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

/// One `[Name]` section with its key/value entries in file order.
#[derive(Debug, Clone)]
pub struct Section {
    name: String,
    entries: Vec<(String, String)>,
}

impl Section {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Look up a key, returning the last occurrence if it was repeated.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// A parsed keyfile: an ordered list of sections.
#[derive(Debug, Clone, Default)]
pub struct Keyfile {
    sections: Vec<Section>,
}

impl Keyfile {
    /// Parse keyfile text. Content before the first section header is an
    /// error, as is any line that does not fit the format.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let mut sections: Vec<Section> = Vec::new();

        for (index, raw_line) in text.lines().enumerate() {
            let line_number = index + 1;
            let line = raw_line.trim();

            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            if let Some(rest) = line.strip_prefix('[') {
                let Some(name) = rest.strip_suffix(']') else {
                    return Err(ParseError::new(line_number, "unterminated section header"));
                };
                let name = name.trim();
                if name.is_empty() {
                    return Err(ParseError::new(line_number, "empty section name"));
                }
                sections.push(Section {
                    name: name.to_owned(),
                    entries: Vec::new(),
                });
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                return Err(ParseError::new(
                    line_number,
                    format!("expected 'key = value' or '[section]', found '{line}'"),
                ));
            };
            let key = key.trim();
            if key.is_empty() {
                return Err(ParseError::new(line_number, "empty key"));
            }
            let Some(section) = sections.last_mut() else {
                return Err(ParseError::new(
                    line_number,
                    "key/value pair before any section header",
                ));
            };
            section
                .entries
                .push((key.to_owned(), value.trim().to_owned()));
        }

        Ok(Self { sections })
    }

    /// All sections in file order.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// First section with the given name, if any.
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name == name)
    }
}

/// Serializes sections and entries back into keyfile text.
///
/// The writer side of the format: `section()` starts a new `[Name]` block
/// (separated from the previous one by a blank line) and `entry()` appends
/// a `key=value` line to it.
#[derive(Debug, Default)]
pub struct Builder {
    out: String,
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn section(&mut self, name: &str) -> &mut Self {
        if !self.out.is_empty() {
            self.out.push('\n');
        }
        self.out.push('[');
        self.out.push_str(name);
        self.out.push_str("]\n");
        self
    }

    pub fn entry(&mut self, key: &str, value: &str) -> &mut Self {
        self.out.push_str(key);
        self.out.push('=');
        self.out.push_str(value);
        self.out.push('\n');
        self
    }

    pub fn finish(self) -> String {
        self.out
    }
}
