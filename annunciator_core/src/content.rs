// Copyright 2026 the Annunciator Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Annunciation text content.
//!
//! Instrument logic typically pushes the same content every frame, so the
//! comparison path works on borrowed [`ContentRef`] values and never
//! allocates. Owned [`Content`] reuses its string buffers when it does change.

use alloc::string::String;

use crate::style::ContentStyle;

/// Maximum number of text lines in one annunciation.
pub const MAX_LINES: usize = 3;

/// Borrowed annunciation content, as passed to
/// [`AnnunciationElement::set_content`](crate::element::AnnunciationElement::set_content).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ContentRef<'a> {
    /// Layout of the lines. Never [`ContentStyle::TwoColumns`]; that style is
    /// derived from the element's two-columns flag.
    pub style: ContentStyle,
    /// Left text, top to bottom. Unused lines are empty.
    pub lines: [&'a str; MAX_LINES],
    /// Right-hand value for the `*WithValue` styles, empty otherwise.
    pub value: &'a str,
}

impl<'a> ContentRef<'a> {
    /// One line of text.
    #[must_use]
    pub const fn one_line(line: &'a str) -> Self {
        Self {
            style: ContentStyle::OneLine,
            lines: [line, "", ""],
            value: "",
        }
    }

    /// One line followed by a value.
    #[must_use]
    pub const fn one_line_with_value(line: &'a str, value: &'a str) -> Self {
        Self {
            style: ContentStyle::OneLineWithValue,
            lines: [line, "", ""],
            value,
        }
    }

    /// Two stacked lines.
    #[must_use]
    pub const fn two_lines(line1: &'a str, line2: &'a str) -> Self {
        Self {
            style: ContentStyle::TwoLines,
            lines: [line1, line2, ""],
            value: "",
        }
    }

    /// Two stacked lines, the second followed by a value.
    #[must_use]
    pub const fn two_lines_with_value(line1: &'a str, line2: &'a str, value: &'a str) -> Self {
        Self {
            style: ContentStyle::TwoLinesWithValue,
            lines: [line1, line2, ""],
            value,
        }
    }

    /// Three stacked lines.
    #[must_use]
    pub const fn three_lines(line1: &'a str, line2: &'a str, line3: &'a str) -> Self {
        Self {
            style: ContentStyle::ThreeLines,
            lines: [line1, line2, line3],
            value: "",
        }
    }

    /// The first line, which decides whether there is anything to show.
    #[inline]
    #[must_use]
    pub const fn primary(&self) -> &'a str {
        self.lines[0]
    }
}

/// Owned annunciation content held by an element.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Content {
    style: ContentStyle,
    lines: [String; MAX_LINES],
    value: String,
}

impl Content {
    /// Creates blank one-line content.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the line layout.
    #[inline]
    #[must_use]
    pub fn style(&self) -> ContentStyle {
        self.style
    }

    /// Returns line `index` (0-based), or `""` if out of range.
    #[must_use]
    pub fn line(&self, index: usize) -> &str {
        self.lines.get(index).map_or("", String::as_str)
    }

    /// Returns the first line.
    #[inline]
    #[must_use]
    pub fn primary(&self) -> &str {
        &self.lines[0]
    }

    /// Returns the value text.
    #[inline]
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns `true` if nothing at all is stored.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.value.is_empty() && self.lines.iter().all(String::is_empty)
    }

    /// Returns `true` if `other` describes exactly this content.
    #[must_use]
    pub fn matches(&self, other: &ContentRef<'_>) -> bool {
        self.style == other.style
            && self.value == other.value
            && self
                .lines
                .iter()
                .zip(other.lines.iter())
                .all(|(mine, theirs)| mine == theirs)
    }

    /// Overwrites this content, reusing the existing buffers.
    pub fn assign(&mut self, other: &ContentRef<'_>) {
        self.style = other.style;
        for (mine, theirs) in self.lines.iter_mut().zip(other.lines.iter()) {
            mine.clear();
            mine.push_str(theirs);
        }
        self.value.clear();
        self.value.push_str(other.value);
    }

    /// Changes the line layout, keeping the text.
    pub fn set_style(&mut self, style: ContentStyle) {
        self.style = style;
    }

    /// Blanks every line and the value, keeping the style.
    pub fn blank(&mut self) {
        for line in &mut self.lines {
            line.clear();
        }
        self.value.clear();
    }

    /// Borrows this content.
    #[must_use]
    pub fn borrowed(&self) -> ContentRef<'_> {
        ContentRef {
            style: self.style,
            lines: [
                self.lines[0].as_str(),
                self.lines[1].as_str(),
                self.lines[2].as_str(),
            ],
            value: self.value.as_str(),
        }
    }
}
