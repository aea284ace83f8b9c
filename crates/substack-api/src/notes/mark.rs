//! Inline formatting marks and text runs.

/// Formatting or semantic annotation applied to a run.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Mark {
    Bold,
    Italic,
    Code,
    Underline,
    /// Hyperlink to `href`.
    Link { href: String },
}

impl Mark {
    /// Create a link mark.
    #[must_use]
    pub fn link(href: impl Into<String>) -> Self {
        Self::Link { href: href.into() }
    }
}

/// Contiguous span of text sharing one set of marks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRun {
    text: String,
    marks: Vec<Mark>,
}

impl TextRun {
    /// Create a run without marks.
    #[must_use]
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            marks: Vec::new(),
        }
    }

    /// Create a run with the given marks.
    ///
    /// Marks keep their first-seen order; duplicates are dropped.
    #[must_use]
    pub fn with_marks(text: impl Into<String>, marks: impl IntoIterator<Item = Mark>) -> Self {
        let mut unique: Vec<Mark> = Vec::new();
        for mark in marks {
            if !unique.contains(&mark) {
                unique.push(mark);
            }
        }
        Self {
            text: text.into(),
            marks: unique,
        }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn marks(&self) -> &[Mark] {
        &self.marks
    }
}
