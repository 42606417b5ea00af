// Copyright 2026 the Annunciator Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Presentation enums shared by elements, resolvers and surfaces.

/// Semantic colour of an annunciation part.
///
/// Hosts map these to concrete colours; the core never deals in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SemanticColor {
    /// Neutral markings (white on most panels).
    #[default]
    Mark,
    /// Engaged / active mode.
    Active,
    /// Armed mode.
    Armed,
    /// Managed (FMS-driven) target.
    Managed,
    /// Caution level (amber).
    Caution,
    /// Warning level (red).
    Alarm,
}

/// How the lines of an annunciation are laid out.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ContentStyle {
    /// A single line of text.
    #[default]
    OneLine,
    /// A single line followed by a value in the value colour.
    OneLineWithValue,
    /// Two stacked lines.
    TwoLines,
    /// A line, then a second line followed by a value.
    TwoLinesWithValue,
    /// Three stacked lines.
    ThreeLines,
    /// One line spanning two adjacent slots, with the divider between them
    /// erased.
    TwoColumns,
}

impl ContentStyle {
    /// Returns `true` for styles whose frame grows by an extra line.
    #[inline]
    #[must_use]
    pub const fn is_two_lines(self) -> bool {
        matches!(self, Self::TwoLines | Self::TwoLinesWithValue)
    }
}

/// Horizontal alignment of text inside the slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextAlign {
    /// Start at the slot's left anchor.
    Left,
    /// Centre on the slot's centre anchor.
    #[default]
    Center,
}

/// Glyph stacking direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextOrientation {
    /// Glyphs side by side.
    #[default]
    Horizontal,
    /// One glyph per line, top to bottom.
    Vertical,
}

/// Font size class.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FontSize {
    /// Small font.
    Small,
    /// Normal (medium) font.
    Normal,
    /// Large font.
    Large,
    /// Extra large font, the default for annunciations.
    #[default]
    Xl,
    /// Double extra large font.
    Xxl,
}

impl FontSize {
    /// All size classes, smallest first.
    pub const ALL: [Self; 5] = [Self::Small, Self::Normal, Self::Large, Self::Xl, Self::Xxl];

    /// Index into per-size tables.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Small => 0,
            Self::Normal => 1,
            Self::Large => 2,
            Self::Xl => 3,
            Self::Xxl => 4,
        }
    }
}
