// Copyright 2026 the Annunciator Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Simulated PFD that exercises elements, resolvers and the diagnostics
//! pipeline.
//!
//! Runs 15 seconds of render passes at 10 Hz over a small panel of flags and
//! one FMA mode. Sensors fail and recover on a script, and the window is
//! resized half way through. Events go to both a
//! [`PrettyPrintSink`](annunciator_debug::pretty::PrettyPrintSink) on stdout
//! and a [`ChromeTraceSink`](annunciator_debug::chrome::ChromeTraceSink),
//! which is written to `trace.json` at the end.

use std::fs::File;
use std::io::{self, BufWriter};

use annunciator_core::clock::EpochCounter;
use annunciator_core::element::{AnnunciationElement, ElementTag};
use annunciator_core::pfd::{AdiLayout, FmaLayout, PfdLayout, PfdResolver, PfdSlot, TapeLayout};
use annunciator_core::style::{FontSize, SemanticColor};
use annunciator_core::time::{Duration, HostTime};
use annunciator_core::trace::{
    ElementRenderedEvent, GeometryResolvedEvent, GeometryStaleEvent, PassSummary,
    PassSummaryBuilder, TraceSink, Tracer, WindowExpiredEvent,
};
use annunciator_debug::chrome::ChromeTraceSink;
use annunciator_debug::pretty::PrettyPrintSink;
use annunciator_render::{DrawItem, DrawList, MonospaceMetrics};

const PASS_INTERVAL: Duration = Duration::from_millis(100);
const RUN_TIME: Duration = Duration::from_secs(15);
const RESIZE_AT: HostTime = HostTime(8_000);

/// Forwards every event to two sinks.
struct Fanout<'a> {
    pretty: &'a mut PrettyPrintSink,
    chrome: &'a mut ChromeTraceSink,
}

impl TraceSink for Fanout<'_> {
    fn on_geometry_resolved(&mut self, e: &GeometryResolvedEvent) {
        self.pretty.on_geometry_resolved(e);
        self.chrome.on_geometry_resolved(e);
    }

    fn on_geometry_stale(&mut self, e: &GeometryStaleEvent) {
        self.pretty.on_geometry_stale(e);
        self.chrome.on_geometry_stale(e);
    }

    fn on_window_expired(&mut self, e: &WindowExpiredEvent) {
        self.pretty.on_window_expired(e);
        self.chrome.on_window_expired(e);
    }

    fn on_element_rendered(&mut self, e: &ElementRenderedEvent) {
        self.pretty.on_element_rendered(e);
        self.chrome.on_element_rendered(e);
    }

    fn on_pass_summary(&mut self, s: &PassSummary) {
        self.pretty.on_pass_summary(s);
        self.chrome.on_pass_summary(s);
    }
}

/// Sensor validity at a point of the script.
struct Sensors {
    attitude: bool,
    flight_director: bool,
    radio_altitude: bool,
    land_mode: bool,
}

impl Sensors {
    fn at(now: HostTime) -> Self {
        let ms = now.millis();
        Self {
            attitude: !(2_000..12_000).contains(&ms),
            flight_director: ms < 4_000,
            radio_altitude: ms < 9_500,
            land_mode: ms >= 6_000,
        }
    }
}

/// Panel layout for a display `width` pixels wide.
fn layout(metrics: &MonospaceMetrics, width: i32) -> PfdLayout {
    let xl = metrics.fonts().raw(FontSize::Xl);
    let lh = xl.line_height;
    let fma_height = lh * 4;
    let adi_cx = width / 2;
    let adi_cy = fma_height + width / 3;
    PfdLayout {
        fonts: *metrics.fonts(),
        fma: FmaLayout {
            left: width / 8,
            top: 4,
            width: width * 3 / 4,
            height: fma_height,
            col_1: 0,
            col_2: width * 3 / 16,
            col_3: width * 6 / 16,
            col_4: width * 9 / 16,
        },
        adi: AdiLayout {
            center_x: adi_cx,
            center_y: adi_cy,
            size_left: width / 4,
            size_right: width / 4,
            size_up: width / 4,
            size_down: width / 4,
            att_flag_y: adi_cy - lh,
            fd_flag_x: adi_cx - width / 8,
            fd_flag_y: adi_cy + lh * 2,
            fpv_flag_x: adi_cx + width / 8,
            ra_flag_x: adi_cx,
            ra_flag_y: adi_cy + width / 5,
            aoa_flag_x: adi_cx - width / 5,
            aoa_flag_y: adi_cy + width / 5,
        },
        tapes: TapeLayout {
            alti_flag_x: width * 7 / 8,
            alti_flag_cx: width * 7 / 8 + lh,
            alti_flag_y: adi_cy,
            speed_flag_cx: width / 8,
            speed_flag_y: adi_cy,
            vsi_left: width - lh * 2,
            vsi_width: lh * 2,
            vsi_flag_cx: width - lh,
            vsi_flag_y: adi_cy - lh * 3,
            hdg_top: adi_cy + width / 3,
        },
    }
}

fn main() -> io::Result<()> {
    let metrics = MonospaceMetrics::scaled(16);
    let epochs = EpochCounter::new();
    let mut panel = layout(&metrics, 480);

    // -- elements ----------------------------------------------------------
    let flag = |slot, tag| {
        AnnunciationElement::new(PfdResolver, slot, 0, SemanticColor::Alarm)
            .with_tag(ElementTag(tag))
    };
    let mut att = flag(PfdSlot::Attitude, 1);
    let mut fd = flag(PfdSlot::FlightDirector, 2);
    fd.enable_flashing();
    let mut ra = flag(PfdSlot::RadioAltitude, 3);
    ra.disable_frame_delayed();
    ra.set_frame_color(SemanticColor::Caution);
    let mut land =
        AnnunciationElement::new(PfdResolver, PfdSlot::FmaCol2, 0, SemanticColor::Active)
            .with_tag(ElementTag(4));
    land.set_two_columns(true);
    land.enable_flashing();
    land.set_frame_options(true, true, false, SemanticColor::Mark);

    // -- sinks -------------------------------------------------------------
    let mut pretty = PrettyPrintSink::new(Box::new(io::stdout())).without_render_events();
    let mut chrome = ChromeTraceSink::new();
    let mut list = DrawList::new(metrics);

    // -- simulated loop ----------------------------------------------------
    let mut now = HostTime(0);
    while now <= HostTime(0) + RUN_TIME {
        if now == RESIZE_AT {
            panel = layout(&metrics, 640);
            epochs.bump();
        }
        let clock = epochs.snapshot(now);
        let sensors = Sensors::at(now);

        if sensors.attitude {
            att.clear();
        } else {
            att.set_text(now, "ATT", SemanticColor::Alarm);
        }
        if sensors.flight_director {
            fd.clear();
        } else {
            fd.set_text(now, "FD", SemanticColor::Alarm);
        }
        if sensors.radio_altitude {
            ra.clear();
        } else {
            ra.set_text(now, "RA", SemanticColor::Caution);
        }
        if sensors.land_mode {
            land.set_text(now, "LAND", SemanticColor::Active);
        } else {
            land.clear();
        }

        list.clear();
        let mut fanout = Fanout {
            pretty: &mut pretty,
            chrome: &mut chrome,
        };
        let mut tracer = Tracer::new(&mut fanout);
        let mut summary = PassSummaryBuilder::new(&clock);
        summary.record(att.render_traced(&clock, &panel, &mut list, &mut tracer));
        summary.record(fd.render_traced(&clock, &panel, &mut list, &mut tracer));
        summary.record(ra.render_traced(&clock, &panel, &mut list, &mut tracer));
        summary.record(land.render_traced(&clock, &panel, &mut list, &mut tracer));
        let summary = summary.finish();
        if summary.texts_shown > 0 && now.millis().is_multiple_of(1_000) {
            tracer.pass_summary(&summary);
        }

        now = now + PASS_INTERVAL;
    }

    // -- last pass ---------------------------------------------------------
    println!("Last pass painted {} items:", list.len());
    for item in list.items() {
        match item {
            DrawItem::StrokeRect { rect, color } => println!("  rect {rect:?} {color:?}"),
            DrawItem::StrokeLine { line, color } => println!("  line {line:?} {color:?}"),
            DrawItem::FillText {
                text,
                origin,
                color,
                ..
            } => println!("  text {text:?} at {origin:?} {color:?}"),
        }
    }

    // -- export Chrome trace -----------------------------------------------
    let path = "trace.json";
    let mut writer = BufWriter::new(File::create(path)?);
    chrome.write(&mut writer)?;
    println!("Wrote {path} ({} events)", chrome.events().len());
    Ok(())
}
