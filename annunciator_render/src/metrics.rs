// Copyright 2026 the Annunciator Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fixed-advance text measurement.

use annunciator_core::geometry::{FontMetrics, FontTable};
use annunciator_core::style::FontSize;
use annunciator_core::surface::TextMeasure;

/// Measures text as if every glyph were one digit wide.
///
/// Cockpit fonts are close to monospace, so this is a usable stand-in when
/// the host has no font engine (headless simulation, tests).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct MonospaceMetrics {
    fonts: FontTable,
}

impl MonospaceMetrics {
    /// Creates a measurer backed by `fonts`.
    #[must_use]
    pub const fn new(fonts: FontTable) -> Self {
        Self { fonts }
    }

    /// Derives a full table from the XL line height, scaling the other sizes
    /// the way typical panel fonts do (digits at 5/8 of the line height).
    #[must_use]
    pub fn scaled(xl_line_height: i32) -> Self {
        let metrics = |num: i32, den: i32| {
            let line_height = xl_line_height * num / den;
            FontMetrics::new(line_height, line_height * 5 / 8)
        };
        Self::new(FontTable::new([
            metrics(10, 16),
            metrics(12, 16),
            metrics(14, 16),
            metrics(16, 16),
            metrics(20, 16),
        ]))
    }

    /// Returns the backing font table.
    #[must_use]
    pub const fn fonts(&self) -> &FontTable {
        &self.fonts
    }
}

impl TextMeasure for MonospaceMetrics {
    fn text_width(&self, font: FontSize, text: &str) -> i32 {
        let glyphs = i32::try_from(text.chars().count()).unwrap_or(i32::MAX);
        glyphs.saturating_mul(self.fonts.raw(font).digit_width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_is_glyphs_times_digit() {
        let metrics = MonospaceMetrics::scaled(16);
        assert_eq!(metrics.text_width(FontSize::Xl, "ATT"), 30);
        assert_eq!(metrics.text_width(FontSize::Xl, ""), 0);
        assert_eq!(metrics.text_width(FontSize::Xxl, "FD"), 2 * 12);
    }

    #[test]
    fn counts_chars_not_bytes() {
        let metrics = MonospaceMetrics::scaled(16);
        assert_eq!(metrics.text_width(FontSize::Xl, "°C"), 20);
    }

    #[test]
    fn scaled_table_is_measured() {
        let metrics = MonospaceMetrics::scaled(32);
        for size in FontSize::ALL {
            assert!(metrics.fonts().get(size).is_some(), "{size:?}");
        }
        assert_eq!(metrics.fonts().raw(FontSize::Xl), FontMetrics::new(32, 20));
    }

    #[test]
    fn unmeasured_table_measures_zero() {
        let metrics = MonospaceMetrics::default();
        assert_eq!(metrics.text_width(FontSize::Normal, "LOC"), 0);
    }
}
