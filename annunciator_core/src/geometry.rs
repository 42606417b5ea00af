// Copyright 2026 the Annunciator Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometry resolution contract.
//!
//! A *geometry resolver* maps an element's identity and presentation
//! (slot, row, content style, font size, orientation, primary text) plus the
//! host instrument's current layout snapshot to a concrete [`Geometry`]: the
//! frame rectangle, text anchors, and for merged slots the divider to erase.
//!
//! Each instrument family implements [`GeometryResolver`] once, with its own
//! slot enum and layout snapshot type (see [`pfd`](crate::pfd) and
//! [`nd`](crate::nd)). [`TextColumnResolver`] is the generic fallback for
//! hosts that only have a text column to offer.
//!
//! # Pixel arithmetic
//!
//! Host layouts are integer pixel grids and the placement rules use
//! truncating integer division (`line_height * 15 / 16`). Resolvers compute in
//! `i32` with the same rules and convert to `kurbo` types only when building
//! the final [`Geometry`].
//!
//! # Staleness
//!
//! Resolvers return `None` when the snapshot cannot support a result yet,
//! typically because the host has not measured the requested font. Elements
//! then keep rendering with their last-known geometry.

use core::fmt;

use kurbo::{Line, Rect};

use crate::content::MAX_LINES;
use crate::style::{ContentStyle, FontSize, TextOrientation};
use crate::surface::TextMeasure;

/// Line height and digit advance of one font size class.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct FontMetrics {
    /// Distance between consecutive baselines.
    pub line_height: i32,
    /// Advance of a single digit.
    pub digit_width: i32,
}

impl FontMetrics {
    /// Creates metrics from a line height and digit width.
    #[inline]
    #[must_use]
    pub const fn new(line_height: i32, digit_width: i32) -> Self {
        Self {
            line_height,
            digit_width,
        }
    }

    /// Returns `true` once the host has measured this font.
    #[inline]
    #[must_use]
    pub const fn is_measured(&self) -> bool {
        self.line_height > 0 && self.digit_width > 0
    }
}

/// Font metrics for every [`FontSize`] class.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct FontTable {
    metrics: [FontMetrics; 5],
}

impl FontTable {
    /// A table in which no font has been measured yet.
    pub const UNMEASURED: Self = Self {
        metrics: [FontMetrics::new(0, 0); 5],
    };

    /// Creates a table from metrics ordered as [`FontSize::ALL`].
    #[must_use]
    pub const fn new(metrics: [FontMetrics; 5]) -> Self {
        Self { metrics }
    }

    /// Returns the metrics for `size`, or `None` if not measured yet.
    #[must_use]
    pub fn get(&self, size: FontSize) -> Option<FontMetrics> {
        let metrics = self.metrics[size.index()];
        metrics.is_measured().then_some(metrics)
    }

    /// Returns the metrics for `size` even if unmeasured.
    #[inline]
    #[must_use]
    pub fn raw(&self, size: FontSize) -> FontMetrics {
        self.metrics[size.index()]
    }

    /// Records measured metrics for `size`.
    pub fn set(&mut self, size: FontSize, metrics: FontMetrics) {
        self.metrics[size.index()] = metrics;
    }
}

/// Where text lines are anchored inside a slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TextAnchors {
    /// Horizontal centre used by centred text and value pairs.
    pub center_x: i32,
    /// Start position used by left-aligned text.
    pub left_x: i32,
    /// Baseline of each line, top to bottom.
    pub baselines: [i32; MAX_LINES],
}

/// Two adjacent slots drawn as one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColumnMerge {
    /// Separator between the two slots, erased before drawing.
    pub divider: Line,
    /// Horizontal centre of the merged text.
    pub center_x: i32,
}

/// Resolved placement of an annunciation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Geometry {
    /// Frame box outline.
    pub frame: Rect,
    /// Text anchors.
    pub anchors: TextAnchors,
    /// Metrics of the font the geometry was resolved for.
    pub metrics: FontMetrics,
    /// Present when the content spans two slots.
    pub merge: Option<ColumnMerge>,
}

impl Default for Geometry {
    /// Placeholder used before the first successful resolution: a unit box at
    /// `(1, 1)` with all anchors at `1`.
    fn default() -> Self {
        Self {
            frame: PixelBox::new(1, 1, 1, 1).to_rect(),
            anchors: TextAnchors {
                center_x: 1,
                left_x: 1,
                baselines: [1; MAX_LINES],
            },
            metrics: FontMetrics::new(1, 1),
            merge: None,
        }
    }
}

/// An integer pixel box, as computed by the placement rules.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PixelBox {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width.
    pub w: i32,
    /// Height.
    pub h: i32,
}

impl PixelBox {
    /// Creates a box from its origin and size.
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Converts to a `kurbo` rectangle.
    #[must_use]
    pub fn to_rect(self) -> Rect {
        Rect::new(
            f64::from(self.x),
            f64::from(self.y),
            f64::from(self.x) + f64::from(self.w),
            f64::from(self.y) + f64::from(self.h),
        )
    }
}

/// Everything a resolver may look at about the element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolveRequest<'a, S> {
    /// Family-specific slot identity.
    pub slot: S,
    /// Row within the slot, for multi-row slots.
    pub row: u8,
    /// Effective content style (two-columns already applied).
    pub style: ContentStyle,
    /// Font size class.
    pub font: FontSize,
    /// Glyph stacking direction.
    pub orientation: TextOrientation,
    /// First line of text, for extent-dependent placement.
    pub primary: &'a str,
}

/// Per-instrument-family placement rules.
///
/// Implementations must be pure: the same request, layout and measurer always
/// yield the same result. Elements call [`resolve`](Self::resolve) lazily and
/// may call it repeatedly.
pub trait GeometryResolver {
    /// Named slots of this family.
    type Slot: Copy + fmt::Debug + PartialEq;

    /// Host layout snapshot this family reads.
    type Layout;

    /// Computes the geometry for `request`, or `None` if `layout` cannot
    /// support it yet.
    fn resolve<M: TextMeasure + ?Sized>(
        &self,
        request: &ResolveRequest<'_, Self::Slot>,
        layout: &Self::Layout,
        measure: &M,
    ) -> Option<Geometry>;
}

/// Number of glyphs in `text`, as a pixel multiplier.
fn glyph_count(text: &str) -> i32 {
    i32::try_from(text.chars().count()).unwrap_or(i32::MAX)
}

/// Width of `text` as laid out in `orientation`.
///
/// Vertical text is one glyph wide, approximated by the digit advance.
#[must_use]
pub fn oriented_width<M: TextMeasure + ?Sized>(
    measure: &M,
    orientation: TextOrientation,
    font: FontSize,
    metrics: FontMetrics,
    text: &str,
) -> i32 {
    match orientation {
        TextOrientation::Horizontal => measure.text_width(font, text),
        TextOrientation::Vertical => metrics.digit_width,
    }
}

/// Height of `text` as laid out in `orientation`.
#[must_use]
pub fn oriented_height(orientation: TextOrientation, metrics: FontMetrics, text: &str) -> i32 {
    match orientation {
        TextOrientation::Horizontal => metrics.line_height,
        TextOrientation::Vertical => glyph_count(text).saturating_mul(metrics.line_height),
    }
}

/// The frame size every family starts from, before slot-specific placement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BaseFrame {
    /// Metrics of the element's font.
    pub metrics: FontMetrics,
    /// Text extent plus 11/10 of a digit.
    pub width: i32,
    /// Text extent plus 2/12 of a line.
    pub height: i32,
}

impl BaseFrame {
    /// Sizes the frame around the request's primary text, or returns `None`
    /// if the element's font has not been measured.
    #[must_use]
    pub fn new<S, M: TextMeasure + ?Sized>(
        request: &ResolveRequest<'_, S>,
        fonts: &FontTable,
        measure: &M,
    ) -> Option<Self> {
        let metrics = fonts.get(request.font)?;
        let text_w = oriented_width(
            measure,
            request.orientation,
            request.font,
            metrics,
            request.primary,
        );
        let text_h = oriented_height(request.orientation, metrics, request.primary);
        Some(Self {
            metrics,
            width: text_w + metrics.digit_width * 11 / 10,
            height: text_h + metrics.line_height * 2 / 12,
        })
    }
}

/// Layout of a plain text column: a centre line and a top edge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TextColumn {
    /// Horizontal centre of the column.
    pub center_x: i32,
    /// Top of the first frame.
    pub top: i32,
    /// Font metrics of the host.
    pub fonts: FontTable,
}

/// Generic resolver for hosts without a dedicated slot table.
///
/// Rows stack downwards from the column top, one frame height apart, and text
/// is centred on the column.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TextColumnResolver;

impl GeometryResolver for TextColumnResolver {
    type Slot = ();
    type Layout = TextColumn;

    fn resolve<M: TextMeasure + ?Sized>(
        &self,
        request: &ResolveRequest<'_, ()>,
        layout: &TextColumn,
        measure: &M,
    ) -> Option<Geometry> {
        let base = BaseFrame::new(request, &layout.fonts, measure)?;
        let lh = base.metrics.line_height;
        let mut height = base.height;
        if request.style.is_two_lines() {
            height += lh * 18 / 16;
        }

        let top = layout.top + i32::from(request.row) * height;
        let first = top + lh - lh * 2 / 16;
        let frame = PixelBox::new(layout.center_x - base.width / 2, top, base.width, height);

        Some(Geometry {
            frame: frame.to_rect(),
            anchors: TextAnchors {
                center_x: layout.center_x,
                left_x: frame.x + base.metrics.digit_width / 2,
                baselines: [first, first + lh, first + 2 * lh],
            },
            metrics: base.metrics,
            merge: None,
        })
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::{Monospace, fonts};
    use super::*;

    fn request(text: &str) -> ResolveRequest<'_, ()> {
        ResolveRequest {
            slot: (),
            row: 0,
            style: ContentStyle::OneLine,
            font: FontSize::Xl,
            orientation: TextOrientation::Horizontal,
            primary: text,
        }
    }

    #[test]
    fn unmeasured_font_is_not_resolvable() {
        let measure = Monospace(FontTable::UNMEASURED);
        assert!(BaseFrame::new(&request("ATT"), &FontTable::UNMEASURED, &measure).is_none());
    }

    #[test]
    fn base_frame_wraps_text() {
        let measure = Monospace(fonts());
        let base = BaseFrame::new(&request("ATT"), &fonts(), &measure).unwrap();
        // 3 glyphs * 10 + 10 * 11 / 10
        assert_eq!(base.width, 41);
        // 16 + 16 * 2 / 12
        assert_eq!(base.height, 18);
    }

    #[test]
    fn vertical_text_is_one_digit_wide_and_stacks() {
        let measure = Monospace(fonts());
        let mut req = request("SEL");
        req.orientation = TextOrientation::Vertical;
        let base = BaseFrame::new(&req, &fonts(), &measure).unwrap();
        assert_eq!(base.width, 10 + 11);
        assert_eq!(base.height, 3 * 16 + 2);
    }

    #[test]
    fn text_column_stacks_rows() {
        let layout = TextColumn {
            center_x: 200,
            top: 40,
            fonts: fonts(),
        };
        let measure = Monospace(fonts());
        let first = TextColumnResolver
            .resolve(&request("FD"), &layout, &measure)
            .unwrap();
        let mut req = request("FD");
        req.row = 1;
        let second = TextColumnResolver.resolve(&req, &layout, &measure).unwrap();

        assert_eq!(first.anchors.center_x, 200);
        assert_eq!(first.frame.y0, 40.0);
        assert_eq!(second.frame.y0, first.frame.y1);
        assert_eq!(first.frame.width(), second.frame.width());
    }

    #[test]
    fn two_line_styles_add_a_line() {
        let layout = TextColumn {
            center_x: 0,
            top: 0,
            fonts: fonts(),
        };
        let measure = Monospace(fonts());
        let one = TextColumnResolver
            .resolve(&request("A"), &layout, &measure)
            .unwrap();
        let mut req = request("A");
        req.style = ContentStyle::TwoLines;
        let two = TextColumnResolver.resolve(&req, &layout, &measure).unwrap();
        assert_eq!(two.frame.height() - one.frame.height(), 18.0);
    }

    #[test]
    fn placeholder_is_unit_box() {
        let g = Geometry::default();
        assert_eq!(g.frame, Rect::new(1.0, 1.0, 2.0, 2.0));
        assert!(g.merge.is_none());
    }
}
