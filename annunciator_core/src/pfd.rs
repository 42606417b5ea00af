// Copyright 2026 the Annunciator Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Primary flight display placement rules.
//!
//! Annunciations on a PFD live in two kinds of places:
//!
//! - the **flight mode annunciator** (FMA) strip along the top, split into
//!   four columns of three rows each;
//! - **flags** anchored to individual instruments (attitude indicator,
//!   altitude and speed tapes, vertical speed indicator, heading scale).
//!
//! Every placement starts from the FMA origin at the element's row, then each
//! slot moves the frame and text anchors to its own instrument. Slots without
//! dedicated rules use the first FMA column.
//!
//! A one-line element flagged as two-columns widens its frame across the
//! next column and erases the separator between FMA columns 2 and 3.

use kurbo::Line;

use crate::content::MAX_LINES;
use crate::geometry::{
    BaseFrame, ColumnMerge, FontMetrics, FontTable, Geometry, GeometryResolver, PixelBox,
    ResolveRequest, TextAnchors,
};
use crate::style::{ContentStyle, FontSize};
use crate::surface::TextMeasure;

/// Named annunciation slots on a PFD.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PfdSlot {
    /// FMA column 1 (speed modes).
    FmaCol1,
    /// FMA column 2 (vertical modes).
    FmaCol2,
    /// FMA column 3 (lateral modes).
    FmaCol3,
    /// FMA column 4 (approach capability).
    FmaCol4,
    /// Altitude tape failure flag.
    Altitude,
    /// Attitude failure flag.
    Attitude,
    /// Heading scale failure flag.
    Heading,
    /// Speed tape failure flag.
    Speed,
    /// Vertical speed failure flag.
    VerticalSpeed,
    /// Flight director flag.
    FlightDirector,
    /// Flight path vector flag.
    FlightPathVector,
    /// Radio altitude flag.
    RadioAltitude,
    /// Localizer deviation flag.
    Localizer,
    /// Glideslope deviation flag.
    Glideslope,
    /// DME distance flag.
    Dme,
    /// Landing altitude flag.
    LandingAltitude,
    /// Missing V-speeds flag.
    NoVSpeed,
    /// Speed limit flag.
    SpeedLimit,
    /// Selected speed flag.
    SelectedSpeed,
    /// Pitch flag.
    Pitch,
    /// Roll flag.
    Roll,
    /// Angle-of-attack flag.
    AngleOfAttack,
}

/// FMA strip bounds. Column offsets are relative to `left`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct FmaLayout {
    /// Left edge of the strip.
    pub left: i32,
    /// Top edge of the strip.
    pub top: i32,
    /// Width of the strip.
    pub width: i32,
    /// Height of the strip (three rows).
    pub height: i32,
    /// Start of column 1.
    pub col_1: i32,
    /// Start of column 2.
    pub col_2: i32,
    /// Start of column 3.
    pub col_3: i32,
    /// Start of column 4.
    pub col_4: i32,
}

/// Attitude indicator anchors.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct AdiLayout {
    /// Horizontal centre.
    pub center_x: i32,
    /// Vertical centre.
    pub center_y: i32,
    /// Extent left of the centre.
    pub size_left: i32,
    /// Extent right of the centre.
    pub size_right: i32,
    /// Extent above the centre.
    pub size_up: i32,
    /// Extent below the centre.
    pub size_down: i32,
    /// Baseline of the attitude flag.
    pub att_flag_y: i32,
    /// Centre of the flight director flag.
    pub fd_flag_x: i32,
    /// Baseline of the flight director and flight path vector flags.
    pub fd_flag_y: i32,
    /// Centre of the flight path vector flag.
    pub fpv_flag_x: i32,
    /// Centre of the radio altitude flag.
    pub ra_flag_x: i32,
    /// Baseline of the radio altitude flag.
    pub ra_flag_y: i32,
    /// Centre of the angle-of-attack flag.
    pub aoa_flag_x: i32,
    /// Baseline of the angle-of-attack flag.
    pub aoa_flag_y: i32,
}

/// Tape and scale anchors around the attitude indicator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TapeLayout {
    /// Left edge of the altitude flag text.
    pub alti_flag_x: i32,
    /// Centre of the altitude flag.
    pub alti_flag_cx: i32,
    /// Baseline of the altitude flag, shared by the speed and glideslope
    /// frames.
    pub alti_flag_y: i32,
    /// Centre of the speed flag.
    pub speed_flag_cx: i32,
    /// Baseline of the speed flag.
    pub speed_flag_y: i32,
    /// Left edge of the vertical speed indicator.
    pub vsi_left: i32,
    /// Width of the vertical speed indicator.
    pub vsi_width: i32,
    /// Centre of the vertical speed flag.
    pub vsi_flag_cx: i32,
    /// Baseline of the vertical speed flag.
    pub vsi_flag_y: i32,
    /// Top of the heading scale.
    pub hdg_top: i32,
}

/// Everything the PFD rules read from the host.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PfdLayout {
    /// Measured fonts.
    pub fonts: FontTable,
    /// FMA strip.
    pub fma: FmaLayout,
    /// Attitude indicator.
    pub adi: AdiLayout,
    /// Tapes and scales.
    pub tapes: TapeLayout,
}

/// Geometry resolver for PFD annunciations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PfdResolver;

/// Frame and anchors while a placement is being worked out.
#[derive(Clone, Copy, Debug)]
struct Placement {
    frame: PixelBox,
    center_x: i32,
    left_x: i32,
    baselines: [i32; MAX_LINES],
}

impl Placement {
    /// FMA origin at `row`.
    fn fma_origin(fma: &FmaLayout, xl: FontMetrics, row: i32, base: &BaseFrame) -> Self {
        let baseline = |k: i32| fma.top + fma.height * (row + k) / 3 + xl.line_height - 2;
        Self {
            frame: PixelBox::new(
                fma.left + xl.digit_width / 4,
                baseline(0) - xl.line_height * 15 / 16,
                base.width,
                base.height,
            ),
            center_x: fma.left,
            left_x: fma.left + xl.digit_width / 2,
            baselines: [baseline(0), baseline(1), baseline(2)],
        }
    }

    /// Moves into the FMA column spanning `col..next`.
    fn fma_column(&mut self, xl: FontMetrics, col: i32, next: i32) {
        self.frame.x += col;
        self.frame.w = (next - col) - xl.digit_width / 2;
        self.center_x += col + (next - col) / 2;
        self.left_x += col;
    }

    /// Centres the frame on `center_x`.
    fn center_frame(&mut self, metrics: FontMetrics) {
        self.frame.x = self.center_x - self.frame.w / 2 - metrics.digit_width * 2 / 12;
    }

    /// Vertically centres the frame on a tape flag baseline.
    fn tape_frame_y(&mut self, flag_y: i32, metrics: FontMetrics) {
        self.frame.y = flag_y + metrics.line_height * 6 / 10 - self.frame.h / 2;
    }

    /// Places a flag whose text sits on `flag_y` centred on `flag_x`. The
    /// left anchor sits two `indent` digits left of the centre.
    fn adi_flag(&mut self, flag_x: i32, flag_y: i32, metrics: FontMetrics, indent: FontMetrics) {
        self.frame.y = flag_y - metrics.line_height * 15 / 16;
        self.center_x = flag_x;
        self.left_x = flag_x - indent.digit_width * 2;
        self.baselines[0] = flag_y;
        self.center_frame(metrics);
    }
}

impl GeometryResolver for PfdResolver {
    type Slot = PfdSlot;
    type Layout = PfdLayout;

    fn resolve<M: TextMeasure + ?Sized>(
        &self,
        request: &ResolveRequest<'_, PfdSlot>,
        layout: &PfdLayout,
        measure: &M,
    ) -> Option<Geometry> {
        let base = BaseFrame::new(request, &layout.fonts, measure)?;
        let xl = layout.fonts.get(FontSize::Xl)?;
        let fma = &layout.fma;
        let adi = &layout.adi;
        let tapes = &layout.tapes;
        let m = base.metrics;
        let lh = m.line_height;
        let dw = m.digit_width;

        let mut p = Placement::fma_origin(fma, xl, i32::from(request.row), &base);
        match request.slot {
            PfdSlot::FmaCol1 => p.fma_column(xl, fma.col_1, fma.col_2),
            PfdSlot::FmaCol2 => p.fma_column(xl, fma.col_2, fma.col_3),
            PfdSlot::FmaCol3 => p.fma_column(xl, fma.col_3, fma.col_4),
            PfdSlot::FmaCol4 => p.fma_column(xl, fma.col_4, fma.width),
            PfdSlot::Altitude => {
                p.center_x = tapes.alti_flag_cx;
                p.left_x = tapes.alti_flag_x;
                p.baselines[0] = tapes.alti_flag_y;
                p.tape_frame_y(tapes.alti_flag_y, m);
                p.center_frame(m);
            }
            PfdSlot::Heading => {
                p.frame.x = adi.center_x - dw * 2;
                p.frame.y = tapes.hdg_top + lh * 2 / 16;
                p.center_x = adi.center_x;
                p.left_x = p.frame.x;
                p.baselines[0] = tapes.hdg_top + lh;
            }
            PfdSlot::Attitude => {
                // Sized for three big glyphs whatever the text.
                p.frame.x = adi.center_x - dw * 2;
                p.frame.y = adi.att_flag_y - lh * 15 / 16;
                p.frame.w = dw * 4;
                p.center_x = adi.center_x;
                p.left_x = adi.center_x - dw;
                p.baselines[0] = adi.att_flag_y;
            }
            PfdSlot::Speed => {
                p.center_x = tapes.speed_flag_cx;
                p.left_x = tapes.speed_flag_cx;
                p.baselines[0] = tapes.speed_flag_y;
                p.center_frame(m);
                p.tape_frame_y(tapes.alti_flag_y, m);
            }
            PfdSlot::VerticalSpeed => {
                p.center_x = tapes.vsi_flag_cx;
                p.left_x = tapes.vsi_left + tapes.vsi_width / 5;
                p.baselines = [
                    tapes.vsi_flag_y,
                    adi.center_y + lh / 2 - 4,
                    adi.center_y + lh * 3 / 2 - 4,
                ];
                p.center_frame(m);
                p.frame.y = tapes.vsi_flag_y - lh * 9 / 10;
            }
            PfdSlot::FlightDirector => p.adi_flag(adi.fd_flag_x, adi.fd_flag_y, m, m),
            PfdSlot::FlightPathVector => p.adi_flag(adi.fpv_flag_x, adi.fd_flag_y, m, xl),
            PfdSlot::RadioAltitude => p.adi_flag(adi.ra_flag_x, adi.ra_flag_y, m, xl),
            PfdSlot::AngleOfAttack => p.adi_flag(adi.aoa_flag_x, adi.aoa_flag_y, m, xl),
            PfdSlot::Localizer => {
                p.center_x = adi.center_x;
                p.left_x = p.frame.x;
                p.baselines[0] = adi.center_y + adi.size_down + lh * 3 / 2;
                p.center_frame(m);
                p.frame.y = p.baselines[0] - lh * 9 / 10;
            }
            PfdSlot::Glideslope => {
                p.center_x = adi.center_x + adi.size_right * 9 / 8;
                p.left_x = p.frame.x;
                p.baselines[0] = tapes.alti_flag_y;
                p.center_frame(m);
                p.tape_frame_y(tapes.alti_flag_y, m);
            }
            PfdSlot::Dme => {
                let normal = layout.fonts.get(FontSize::Normal)?;
                let large = layout.fonts.get(FontSize::Large)?;
                p.center_x = adi.center_x - adi.size_left * 6 / 8;
                p.baselines[0] =
                    adi.center_y - adi.size_up - 2 * normal.line_height - large.line_height;
                p.center_frame(m);
                p.left_x = p.frame.x;
                p.frame.y = p.baselines[0] - lh * 9 / 10;
            }
            PfdSlot::LandingAltitude
            | PfdSlot::NoVSpeed
            | PfdSlot::SpeedLimit
            | PfdSlot::SelectedSpeed
            | PfdSlot::Pitch
            | PfdSlot::Roll => {
                p.frame.w = fma.col_1 - xl.digit_width / 2;
                p.center_x += fma.col_1 / 2;
            }
        }

        let merge = (request.style == ContentStyle::TwoColumns).then(|| {
            p.frame.w += fma.col_3 - fma.col_2;
            let divider_x = f64::from(fma.left + fma.col_2);
            ColumnMerge {
                divider: Line::new(
                    (divider_x, f64::from(fma.top)),
                    (divider_x, f64::from(fma.top + fma.height * 2 / 3)),
                ),
                center_x: fma.left + fma.col_1 + (fma.col_3 - fma.col_1) / 2,
            }
        });
        if request.style.is_two_lines() {
            p.frame.h += xl.line_height * 18 / 16;
        }

        Some(Geometry {
            frame: p.frame.to_rect(),
            anchors: TextAnchors {
                center_x: p.center_x,
                left_x: p.left_x,
                baselines: p.baselines,
            },
            metrics: m,
            merge,
        })
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect};

    use super::*;
    use crate::clock::{ClockSnapshot, ConfigEpoch};
    use crate::element::AnnunciationElement;
    use crate::geometry::test_support::{Drawn, Monospace, Recorder, fonts};
    use crate::style::{SemanticColor, TextOrientation};
    use crate::surface::DrawColor;
    use crate::time::HostTime;

    fn layout() -> PfdLayout {
        PfdLayout {
            fonts: fonts(),
            fma: FmaLayout {
                left: 100,
                top: 10,
                width: 400,
                height: 60,
                col_1: 80,
                col_2: 160,
                col_3: 240,
                col_4: 320,
            },
            adi: AdiLayout {
                center_x: 300,
                center_y: 250,
                size_left: 120,
                size_right: 120,
                size_up: 100,
                size_down: 100,
                att_flag_y: 150,
                fd_flag_x: 260,
                fd_flag_y: 200,
                fpv_flag_x: 340,
                ra_flag_x: 300,
                ra_flag_y: 320,
                aoa_flag_x: 200,
                aoa_flag_y: 330,
            },
            tapes: TapeLayout {
                alti_flag_x: 440,
                alti_flag_cx: 460,
                alti_flag_y: 240,
                speed_flag_cx: 140,
                speed_flag_y: 240,
                vsi_left: 500,
                vsi_width: 40,
                vsi_flag_cx: 520,
                vsi_flag_y: 230,
                hdg_top: 380,
            },
        }
    }

    fn request(
        slot: PfdSlot,
        row: u8,
        style: ContentStyle,
        text: &str,
    ) -> ResolveRequest<'_, PfdSlot> {
        ResolveRequest {
            slot,
            row,
            style,
            font: FontSize::Xl,
            orientation: TextOrientation::Horizontal,
            primary: text,
        }
    }

    fn resolve(slot: PfdSlot, row: u8, style: ContentStyle, text: &str) -> Geometry {
        PfdResolver
            .resolve(
                &request(slot, row, style, text),
                &layout(),
                &Monospace(fonts()),
            )
            .unwrap()
    }

    #[test]
    fn fma_column_two_top_row() {
        let g = resolve(PfdSlot::FmaCol2, 0, ContentStyle::OneLine, "ALT");
        // x = 100 + 10/4 + 160, y = 10 + 16 - 2 - 15, w = 80 - 5, h = 16 + 2
        assert_eq!(g.frame, Rect::new(262.0, 9.0, 337.0, 27.0));
        assert_eq!(g.anchors.center_x, 300);
        assert_eq!(g.anchors.left_x, 265);
        assert_eq!(g.anchors.baselines, [24, 44, 64]);
        assert!(g.merge.is_none());
    }

    #[test]
    fn fma_rows_step_by_a_third() {
        let top = resolve(PfdSlot::FmaCol1, 0, ContentStyle::OneLine, "SPEED");
        let second = resolve(PfdSlot::FmaCol1, 1, ContentStyle::OneLine, "SPEED");
        assert_eq!(second.frame.y0 - top.frame.y0, 20.0);
        assert_eq!(second.anchors.baselines[0], top.anchors.baselines[1]);
    }

    #[test]
    fn last_column_ends_at_strip_width() {
        let g = resolve(PfdSlot::FmaCol4, 0, ContentStyle::OneLine, "CAT3");
        assert_eq!(g.frame.x0, 100.0 + 2.0 + 320.0);
        assert_eq!(g.frame.width(), 80.0 - 5.0);
        assert_eq!(g.anchors.center_x, 100 + 320 + 40);
    }

    #[test]
    fn two_columns_widens_and_merges() {
        let single = resolve(PfdSlot::FmaCol2, 0, ContentStyle::OneLine, "LAND");
        let merged = resolve(PfdSlot::FmaCol2, 0, ContentStyle::TwoColumns, "LAND");
        assert_eq!(merged.frame.width() - single.frame.width(), 80.0);

        let merge = merged.merge.unwrap();
        assert_eq!(merge.divider.p0, Point::new(260.0, 10.0));
        assert_eq!(merge.divider.p1, Point::new(260.0, 50.0));
        assert_eq!(merge.center_x, 260);
    }

    #[test]
    fn two_line_styles_grow_frame() {
        let one = resolve(PfdSlot::FmaCol3, 0, ContentStyle::OneLine, "NAV");
        let two = resolve(PfdSlot::FmaCol3, 0, ContentStyle::TwoLinesWithValue, "NAV");
        assert_eq!(two.frame.height() - one.frame.height(), 18.0);
        let three = resolve(PfdSlot::FmaCol3, 0, ContentStyle::ThreeLines, "NAV");
        assert_eq!(three.frame.height(), one.frame.height());
    }

    #[test]
    fn attitude_flag_is_fixed_width() {
        let g = resolve(PfdSlot::Attitude, 0, ContentStyle::OneLine, "ATT");
        assert_eq!(g.frame, Rect::new(280.0, 135.0, 320.0, 153.0));
        assert_eq!(g.anchors.center_x, 300);
        assert_eq!(g.anchors.baselines[0], 150);

        let long = resolve(PfdSlot::Attitude, 0, ContentStyle::OneLine, "ATTITUDE");
        assert_eq!(long.frame.width(), 40.0);
    }

    #[test]
    fn heading_flag_hangs_below_scale_top() {
        let g = resolve(PfdSlot::Heading, 0, ContentStyle::OneLine, "HDG");
        assert_eq!(g.frame.x0, 280.0);
        assert_eq!(g.frame.y0, 382.0);
        assert_eq!(g.anchors.baselines[0], 396);
        assert_eq!(g.anchors.left_x, 280);
    }

    #[test]
    fn tape_flags_centre_on_their_anchor() {
        let alt = resolve(PfdSlot::Altitude, 0, ContentStyle::OneLine, "ALT");
        // w = 41, x = 460 - 20 - 1
        assert_eq!(alt.frame.x0, 439.0);
        // y = 240 + 9 - 9
        assert_eq!(alt.frame.y0, 240.0);
        assert_eq!(alt.anchors.baselines[0], 240);

        let spd = resolve(PfdSlot::Speed, 0, ContentStyle::OneLine, "SPD");
        assert_eq!(spd.frame.x0, 119.0);
        assert_eq!(spd.frame.y0, alt.frame.y0);

        let gs = resolve(PfdSlot::Glideslope, 0, ContentStyle::OneLine, "G/S");
        assert_eq!(gs.anchors.center_x, 300 + 135);
        assert_eq!(gs.frame.y0, alt.frame.y0);
    }

    #[test]
    fn vertical_speed_flag_uses_three_baselines() {
        let mut req = request(PfdSlot::VerticalSpeed, 0, ContentStyle::ThreeLines, "V");
        req.orientation = TextOrientation::Vertical;
        let g = PfdResolver
            .resolve(&req, &layout(), &Monospace(fonts()))
            .unwrap();
        assert_eq!(g.anchors.baselines, [230, 254, 270]);
        assert_eq!(g.anchors.left_x, 508);
        assert_eq!(g.frame.y0, f64::from(230 - 14));
    }

    #[test]
    fn adi_flags_sit_on_their_baselines() {
        for (slot, x, y) in [
            (PfdSlot::FlightDirector, 260, 200),
            (PfdSlot::FlightPathVector, 340, 200),
            (PfdSlot::RadioAltitude, 300, 320),
            (PfdSlot::AngleOfAttack, 200, 330),
        ] {
            let g = resolve(slot, 0, ContentStyle::OneLine, "FD");
            assert_eq!(g.anchors.center_x, x, "{slot:?}");
            assert_eq!(g.anchors.baselines[0], y, "{slot:?}");
            assert_eq!(g.frame.y0, f64::from(y - 15), "{slot:?}");
        }
    }

    #[test]
    fn localizer_and_dme_flags() {
        let loc = resolve(PfdSlot::Localizer, 0, ContentStyle::OneLine, "LOC");
        assert_eq!(loc.anchors.baselines[0], 250 + 100 + 24);
        assert_eq!(loc.frame.y0, f64::from(374 - 14));

        let dme = resolve(PfdSlot::Dme, 0, ContentStyle::OneLine, "DME");
        assert_eq!(dme.anchors.center_x, 300 - 90);
        // 250 - 100 - 2 * 12 - 14
        assert_eq!(dme.anchors.baselines[0], 112);
    }

    #[test]
    fn generic_slots_use_first_column() {
        for slot in [
            PfdSlot::LandingAltitude,
            PfdSlot::NoVSpeed,
            PfdSlot::SpeedLimit,
            PfdSlot::SelectedSpeed,
            PfdSlot::Pitch,
            PfdSlot::Roll,
        ] {
            let g = resolve(slot, 0, ContentStyle::OneLine, "X");
            assert_eq!(g.frame.x0, 102.0, "{slot:?}");
            assert_eq!(g.frame.width(), 75.0, "{slot:?}");
            assert_eq!(g.anchors.center_x, 140, "{slot:?}");
        }
    }

    #[test]
    fn unmeasured_fonts_do_not_resolve() {
        let mut layout = layout();
        layout.fonts = FontTable::UNMEASURED;
        let measure = Monospace(fonts());
        let req = request(PfdSlot::Attitude, 0, ContentStyle::OneLine, "ATT");
        assert!(PfdResolver.resolve(&req, &layout, &measure).is_none());

        // DME also needs the normal and large fonts.
        let mut partial = FontTable::UNMEASURED;
        partial.set(FontSize::Xl, fonts().raw(FontSize::Xl));
        let layout = PfdLayout {
            fonts: partial,
            ..self::layout()
        };
        let req = request(PfdSlot::Dme, 0, ContentStyle::OneLine, "DME");
        assert!(PfdResolver.resolve(&req, &layout, &measure).is_none());
        let req = request(PfdSlot::Localizer, 0, ContentStyle::OneLine, "LOC");
        assert!(PfdResolver.resolve(&req, &layout, &measure).is_some());
    }

    #[test]
    fn resolution_is_deterministic() {
        let a = resolve(PfdSlot::Glideslope, 0, ContentStyle::OneLine, "G/S");
        let b = resolve(PfdSlot::Glideslope, 0, ContentStyle::OneLine, "G/S");
        assert_eq!(a, b);
    }

    #[test]
    fn merged_element_erases_divider_then_centres_text() {
        let mut el =
            AnnunciationElement::new(PfdResolver, PfdSlot::FmaCol2, 0, SemanticColor::Active);
        el.set_two_columns(true);
        el.disable_framing();
        el.set_text(HostTime(0), "LAND", SemanticColor::Active);

        let mut surface = Recorder::new();
        let clock = ClockSnapshot::new(HostTime(16), ConfigEpoch(1));
        el.render(&clock, &layout(), &mut surface);

        let divider = el.geometry().merge.unwrap().divider;
        assert_eq!(
            surface.drawn,
            [
                Drawn::Line(divider, DrawColor::Background),
                Drawn::Text(
                    "LAND".into(),
                    Point::new(240.0, 24.0),
                    SemanticColor::Active.into()
                ),
            ]
        );
    }
}
