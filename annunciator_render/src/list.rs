// Copyright 2026 the Annunciator Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Display list: an ordered record of the primitives of one render pass.

use alloc::string::String;
use alloc::vec::Vec;

use annunciator_core::style::FontSize;
use annunciator_core::surface::{DrawColor, Surface, TextMeasure};
use kurbo::{Line, Point, Rect};

/// A single recorded primitive.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawItem {
    /// A one-pixel rectangle outline.
    StrokeRect {
        /// Outline bounds.
        rect: Rect,
        /// Stroke colour.
        color: DrawColor,
    },
    /// A one-pixel line.
    StrokeLine {
        /// Line endpoints.
        line: Line,
        /// Stroke colour.
        color: DrawColor,
    },
    /// A run of text on a baseline.
    FillText {
        /// Glyphs to draw.
        text: String,
        /// Start of the baseline.
        origin: Point,
        /// Font size class.
        font: FontSize,
        /// Fill colour.
        color: DrawColor,
    },
}

/// A [`Surface`] that records primitives in paint order.
///
/// Text measurement is delegated to `M`, so geometry resolved against a
/// `DrawList` matches what the host canvas will measure on replay.
#[derive(Clone, Debug, Default)]
pub struct DrawList<M> {
    measure: M,
    items: Vec<DrawItem>,
}

impl<M: TextMeasure> DrawList<M> {
    /// Creates an empty list measuring text with `measure`.
    #[must_use]
    pub fn new(measure: M) -> Self {
        Self {
            measure,
            items: Vec::new(),
        }
    }

    /// Returns the recorded items in paint order.
    #[must_use]
    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    /// Returns `true` if nothing was painted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of recorded items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns the text of every [`DrawItem::FillText`], in paint order.
    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.items.iter().filter_map(|item| match item {
            DrawItem::FillText { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Returns the measurer.
    #[must_use]
    pub fn measure(&self) -> &M {
        &self.measure
    }

    /// Clears the list for reuse, keeping its allocation.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Paints every recorded item onto `target`, in order.
    pub fn replay<S: Surface + ?Sized>(&self, target: &mut S) {
        for item in &self.items {
            match item {
                DrawItem::StrokeRect { rect, color } => target.stroke_rect(*rect, *color),
                DrawItem::StrokeLine { line, color } => target.stroke_line(*line, *color),
                DrawItem::FillText {
                    text,
                    origin,
                    font,
                    color,
                } => target.fill_text(text, *origin, *font, *color),
            }
        }
    }
}

impl<M: TextMeasure> TextMeasure for DrawList<M> {
    fn text_width(&self, font: FontSize, text: &str) -> i32 {
        self.measure.text_width(font, text)
    }
}

impl<M: TextMeasure> Surface for DrawList<M> {
    fn stroke_rect(&mut self, rect: Rect, color: DrawColor) {
        self.items.push(DrawItem::StrokeRect { rect, color });
    }

    fn stroke_line(&mut self, line: Line, color: DrawColor) {
        self.items.push(DrawItem::StrokeLine { line, color });
    }

    fn fill_text(&mut self, text: &str, origin: Point, font: FontSize, color: DrawColor) {
        self.items.push(DrawItem::FillText {
            text: String::from(text),
            origin,
            font,
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use annunciator_core::clock::{ClockSnapshot, ConfigEpoch};
    use annunciator_core::element::AnnunciationElement;
    use annunciator_core::pfd::{AdiLayout, PfdLayout, PfdResolver, PfdSlot};
    use annunciator_core::style::SemanticColor;
    use annunciator_core::time::HostTime;

    use super::*;
    use crate::MonospaceMetrics;

    fn metrics() -> MonospaceMetrics {
        MonospaceMetrics::scaled(16)
    }

    fn layout() -> PfdLayout {
        PfdLayout {
            fonts: *metrics().fonts(),
            adi: AdiLayout {
                center_x: 300,
                att_flag_y: 150,
                ..AdiLayout::default()
            },
            ..PfdLayout::default()
        }
    }

    #[test]
    fn records_in_paint_order() {
        let mut list = DrawList::new(metrics());
        list.stroke_rect(Rect::new(0.0, 0.0, 4.0, 4.0), SemanticColor::Mark.into());
        list.fill_text(
            "A",
            Point::new(1.0, 3.0),
            FontSize::Xl,
            SemanticColor::Caution.into(),
        );
        list.stroke_line(Line::new((2.0, 0.0), (2.0, 4.0)), DrawColor::Background);

        assert_eq!(list.len(), 3);
        assert!(matches!(list.items()[0], DrawItem::StrokeRect { .. }));
        assert!(matches!(list.items()[1], DrawItem::FillText { .. }));
        assert!(matches!(list.items()[2], DrawItem::StrokeLine { .. }));

        list.clear();
        assert!(list.is_empty());
    }

    #[test]
    fn replay_reproduces_items() {
        let mut list = DrawList::new(metrics());
        list.stroke_rect(Rect::new(1.0, 2.0, 3.0, 4.0), SemanticColor::Alarm.into());
        list.fill_text(
            "GS",
            Point::new(5.0, 6.0),
            FontSize::Large,
            SemanticColor::Alarm.into(),
        );

        let mut copy = DrawList::new(metrics());
        list.replay(&mut copy);
        assert_eq!(copy.items(), list.items());
    }

    #[test]
    fn element_paints_frame_then_text() {
        let mut el =
            AnnunciationElement::new(PfdResolver, PfdSlot::Attitude, 0, SemanticColor::Alarm);
        el.set_frame_color(SemanticColor::Caution);
        el.set_text(HostTime(0), "ATT", SemanticColor::Alarm);

        let mut list = DrawList::new(metrics());
        let clock = ClockSnapshot::new(HostTime(9_999), ConfigEpoch::INITIAL);
        el.render(&clock, &layout(), &mut list);

        assert_eq!(
            list.items(),
            [
                DrawItem::StrokeRect {
                    rect: Rect::new(280.0, 135.0, 320.0, 153.0),
                    color: SemanticColor::Caution.into(),
                },
                DrawItem::FillText {
                    text: "ATT".into(),
                    origin: Point::new(285.0, 150.0),
                    font: FontSize::Xl,
                    color: SemanticColor::Alarm.into(),
                },
            ]
        );

        list.clear();
        el.render(&clock.at(HostTime(10_001)), &layout(), &mut list);
        assert_eq!(list.texts().collect::<Vec<_>>(), ["ATT"]);
        assert_eq!(list.len(), 1);
    }
}
