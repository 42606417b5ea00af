// Copyright 2026 the Annunciator Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Navigation display placement rules.
//!
//! Every ND annunciation shares one position: the heading message line,
//! centred on the map. Where that line sits depends on the panel style.

use crate::geometry::{
    BaseFrame, FontTable, Geometry, GeometryResolver, PixelBox, ResolveRequest, TextAnchors,
    oriented_width,
};
use crate::style::FontSize;
use crate::surface::TextMeasure;

/// Named annunciation slots on an ND.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NdSlot {
    /// Map failure.
    Map,
    /// Localizer.
    Loc,
    /// Heading failure.
    Hdg,
    /// DME 1.
    Dme1,
    /// DME 2.
    Dme2,
    /// Glideslope.
    Gs,
}

/// Where the heading message line is derived from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HeadingMessage {
    /// Midway between the compass rose and the bottom of the map area.
    Boeing {
        /// Vertical offset of the compass rose.
        rose_y_offset: i32,
        /// Height of the display frame.
        frame_height: i32,
        /// Height of the bottom border.
        border_bottom: i32,
        /// Distance of the map centre from the bottom in expanded modes.
        initial_center_bottom: i32,
    },
    /// Four large lines above the range/mode message.
    Airbus {
        /// Baseline of the range/mode message.
        range_mode_message_y: i32,
    },
}

impl HeadingMessage {
    fn y(self, xl_line_height: i32) -> i32 {
        match self {
            Self::Boeing {
                rose_y_offset,
                frame_height,
                border_bottom,
                initial_center_bottom,
            } => (rose_y_offset + (frame_height - border_bottom - initial_center_bottom)) / 2,
            Self::Airbus {
                range_mode_message_y,
            } => range_mode_message_y - xl_line_height * 4,
        }
    }
}

impl Default for HeadingMessage {
    fn default() -> Self {
        Self::Airbus {
            range_mode_message_y: 0,
        }
    }
}

/// Everything the ND rules read from the host.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct NdLayout {
    /// Measured fonts.
    pub fonts: FontTable,
    /// Horizontal centre of the map.
    pub map_center_x: i32,
    /// Heading message placement.
    pub heading_message: HeadingMessage,
}

/// Geometry resolver for ND annunciations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct NdResolver;

impl GeometryResolver for NdResolver {
    type Slot = NdSlot;
    type Layout = NdLayout;

    fn resolve<M: TextMeasure + ?Sized>(
        &self,
        request: &ResolveRequest<'_, NdSlot>,
        layout: &NdLayout,
        measure: &M,
    ) -> Option<Geometry> {
        let base = BaseFrame::new(request, &layout.fonts, measure)?;
        let xl = layout.fonts.get(FontSize::Xl)?;
        let lh = xl.line_height;

        let text_w = oriented_width(
            measure,
            request.orientation,
            request.font,
            base.metrics,
            request.primary,
        );
        let y = layout.heading_message.y(lh) + lh / 2 - 2;
        let mut frame = PixelBox::new(
            layout.map_center_x - text_w / 2 - xl.digit_width / 4,
            y - lh * 15 / 16,
            base.width,
            base.height,
        );
        if request.style.is_two_lines() {
            frame.h += lh * 18 / 16;
        }

        Some(Geometry {
            frame: frame.to_rect(),
            anchors: TextAnchors {
                center_x: layout.map_center_x,
                left_x: layout.map_center_x - text_w / 2,
                baselines: [y + lh, y + 2 * lh, y + 3 * lh],
            },
            metrics: base.metrics,
            merge: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Rect;

    use super::*;
    use crate::geometry::test_support::{Monospace, fonts};
    use crate::style::{ContentStyle, TextOrientation};

    fn airbus() -> NdLayout {
        NdLayout {
            fonts: fonts(),
            map_center_x: 300,
            heading_message: HeadingMessage::Airbus {
                range_mode_message_y: 400,
            },
        }
    }

    fn request(slot: NdSlot, style: ContentStyle, text: &str) -> ResolveRequest<'_, NdSlot> {
        ResolveRequest {
            slot,
            row: 0,
            style,
            font: FontSize::Xl,
            orientation: TextOrientation::Horizontal,
            primary: text,
        }
    }

    #[test]
    fn airbus_heading_message_line() {
        let g = NdResolver
            .resolve(
                &request(NdSlot::Map, ContentStyle::OneLine, "MAP"),
                &airbus(),
                &Monospace(fonts()),
            )
            .unwrap();
        // Message line at 400 - 4 * 16 = 336.
        assert_eq!(g.frame, Rect::new(283.0, 327.0, 324.0, 345.0));
        assert_eq!(g.anchors.center_x, 300);
        assert_eq!(g.anchors.left_x, 285);
        assert_eq!(g.anchors.baselines, [358, 374, 390]);
        assert!(g.merge.is_none());
    }

    #[test]
    fn boeing_heading_message_line() {
        let layout = NdLayout {
            heading_message: HeadingMessage::Boeing {
                rose_y_offset: 100,
                frame_height: 600,
                border_bottom: 20,
                initial_center_bottom: 80,
            },
            ..airbus()
        };
        let g = NdResolver
            .resolve(
                &request(NdSlot::Hdg, ContentStyle::OneLine, "HDG"),
                &layout,
                &Monospace(fonts()),
            )
            .unwrap();
        // (100 + 500) / 2 = 300, first baseline 300 + 8 - 2 + 16.
        assert_eq!(g.anchors.baselines[0], 322);
    }

    #[test]
    fn every_slot_shares_the_line() {
        let measure = Monospace(fonts());
        let reference = NdResolver
            .resolve(
                &request(NdSlot::Map, ContentStyle::OneLine, "GS"),
                &airbus(),
                &measure,
            )
            .unwrap();
        for slot in [NdSlot::Loc, NdSlot::Hdg, NdSlot::Dme1, NdSlot::Dme2, NdSlot::Gs] {
            let g = NdResolver
                .resolve(&request(slot, ContentStyle::OneLine, "GS"), &airbus(), &measure)
                .unwrap();
            assert_eq!(g, reference, "{slot:?}");
        }
    }

    #[test]
    fn two_lines_grow_and_two_columns_do_not_merge() {
        let measure = Monospace(fonts());
        let one = NdResolver
            .resolve(&request(NdSlot::Loc, ContentStyle::OneLine, "LOC"), &airbus(), &measure)
            .unwrap();
        let two = NdResolver
            .resolve(&request(NdSlot::Loc, ContentStyle::TwoLines, "LOC"), &airbus(), &measure)
            .unwrap();
        assert_eq!(two.frame.height() - one.frame.height(), 18.0);

        let cols = NdResolver
            .resolve(&request(NdSlot::Loc, ContentStyle::TwoColumns, "LOC"), &airbus(), &measure)
            .unwrap();
        assert!(cols.merge.is_none());
        assert_eq!(cols.frame, one.frame);
    }

    #[test]
    fn unmeasured_fonts_do_not_resolve() {
        let layout = NdLayout {
            fonts: FontTable::UNMEASURED,
            ..airbus()
        };
        let req = request(NdSlot::Map, ContentStyle::OneLine, "MAP");
        assert!(NdResolver.resolve(&req, &layout, &Monospace(fonts())).is_none());
    }
}
