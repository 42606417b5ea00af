// Copyright 2026 the Annunciator Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drawing-surface contract for host integrations.
//!
//! The core never rasterizes. Each render pass, elements issue a handful of
//! primitive calls against a [`Surface`] supplied by the host:
//!
//! - **Frame** — [`Surface::stroke_rect`] outlines the annunciation box.
//! - **Divider erase** — [`Surface::stroke_line`] in
//!   [`DrawColor::Background`] removes the separator between two merged
//!   slots.
//! - **Text** — [`Surface::fill_text`] draws a run of glyphs on a baseline.
//!
//! Geometry resolution also needs text extents, so [`TextMeasure`] is a
//! supertrait. Resolvers only receive the measuring half, which keeps them
//! free of drawing side effects.
//!
//! # Crate boundaries
//!
//! `annunciator_core` owns the contract. `annunciator_render` provides a
//! recording implementation (a display list) that hosts can replay on their
//! own canvas and that tests use to observe what was painted.
//!
//! # Render pass pseudocode
//!
//! ```rust,ignore
//! fn on_frame(now: HostTime) {
//!     let clock = epochs.snapshot(now);
//!
//!     // Push content from the avionics model.
//!     if !avionics.att_valid() {
//!         att_flag.set_text(clock.now, "ATT", SemanticColor::Caution);
//!     } else {
//!         att_flag.clear();
//!     }
//!
//!     // Paint every element against the same snapshot.
//!     att_flag.render(&clock, &pfd_layout, &mut surface);
//!     fd_flag.render(&clock, &pfd_layout, &mut surface);
//! }
//! ```

use kurbo::{Line, Point, Rect};

use crate::style::{FontSize, SemanticColor};

/// Colour requested for a primitive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DrawColor {
    /// A semantic annunciation colour.
    Semantic(SemanticColor),
    /// The instrument background, used to erase.
    Background,
}

impl From<SemanticColor> for DrawColor {
    fn from(color: SemanticColor) -> Self {
        Self::Semantic(color)
    }
}

/// Measures text in a given font size class.
pub trait TextMeasure {
    /// Returns the advance width of `text` in whole pixels.
    fn text_width(&self, font: FontSize, text: &str) -> i32;
}

/// Receives the drawing primitives of a render pass.
pub trait Surface: TextMeasure {
    /// Outlines `rect` with a one-pixel stroke.
    fn stroke_rect(&mut self, rect: Rect, color: DrawColor);

    /// Strokes a one-pixel line.
    fn stroke_line(&mut self, line: Line, color: DrawColor);

    /// Draws `text` with its baseline starting at `origin`.
    fn fill_text(&mut self, text: &str, origin: Point, font: FontSize, color: DrawColor);
}

impl<T: TextMeasure + ?Sized> TextMeasure for &T {
    fn text_width(&self, font: FontSize, text: &str) -> i32 {
        (**self).text_width(font, text)
    }
}

impl<T: TextMeasure + ?Sized> TextMeasure for &mut T {
    fn text_width(&self, font: FontSize, text: &str) -> i32 {
        (**self).text_width(font, text)
    }
}

impl<T: Surface + ?Sized> Surface for &mut T {
    fn stroke_rect(&mut self, rect: Rect, color: DrawColor) {
        (**self).stroke_rect(rect, color);
    }

    fn stroke_line(&mut self, line: Line, color: DrawColor) {
        (**self).stroke_line(line, color);
    }

    fn fill_text(&mut self, text: &str, origin: Point, font: FontSize, color: DrawColor) {
        (**self).fill_text(text, origin, font, color);
    }
}
