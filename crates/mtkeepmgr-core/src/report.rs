//! Decoder output
//!
//! A [`Report`] is a list of titled sections, each a list of labelled values.
//! Rendering pads labels to a fixed column so the output lines up:
//!
//! ```text
//! [Device identification]
//!   MacAddr       : 00:0c:43:76:10:01
//! ```

use std::fmt;

/// Width of the label column (without the two-space indent)
const LABEL_WIDTH: usize = 14;

/// One labelled value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Field label
    pub label: String,
    /// Rendered value
    pub value: String,
    /// Nesting depth below the section (0 = top level)
    pub depth: usize,
}

/// A titled group of entries
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Section {
    /// Title printed in brackets
    pub title: String,
    /// Entries in output order
    pub entries: Vec<Entry>,
}

impl Section {
    /// Create an empty section
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            entries: Vec::new(),
        }
    }

    /// Append a top-level entry
    pub fn push(&mut self, label: impl Into<String>, value: impl fmt::Display) -> &mut Self {
        self.push_nested(0, label, value)
    }

    /// Append an entry indented by `depth` levels
    pub fn push_nested(
        &mut self,
        depth: usize,
        label: impl Into<String>,
        value: impl fmt::Display,
    ) -> &mut Self {
        self.entries.push(Entry {
            label: label.into(),
            value: value.to_string(),
            depth,
        });
        self
    }

    /// Look up the value of the first entry with `label`
    pub fn get(&self, label: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.label == label)
            .map(|e| e.value.as_str())
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[{}]", self.title)?;
        for entry in &self.entries {
            let indent = 2 * entry.depth;
            let width = LABEL_WIDTH.saturating_sub(indent);
            writeln!(
                f,
                "  {:indent$}{:<width$}: {}",
                "",
                entry.label,
                entry.value,
                indent = indent,
                width = width
            )?;
        }
        Ok(())
    }
}

/// Full decoder output
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Report {
    /// Sections in output order
    pub sections: Vec<Section>,
}

impl Report {
    /// Create an empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a section
    pub fn push(&mut self, section: Section) {
        self.sections.push(section);
    }

    /// Find a section by title
    pub fn section(&self, title: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.title == title)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for section in &self.sections {
            writeln!(f, "{}", section)?;
        }
        Ok(())
    }
}
