// Copyright 2026 the Annunciator Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr). Times are
//! render-clock milliseconds.

use std::io::Write;

use annunciator_core::trace::{
    ElementRenderedEvent, GeometryResolvedEvent, GeometryStaleEvent, PassSummary, TraceSink,
    WindowExpiredEvent,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
    render_events: bool,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink")
            .field("render_events", &self.render_events)
            .finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self::with_writer(Box::new(std::io::stderr()))
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self::with_writer(writer)
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self {
            writer,
            render_events: true,
        }
    }

    /// Skips the per-element `[render]` lines, which fire every pass.
    #[must_use]
    pub fn without_render_events(mut self) -> Self {
        self.render_events = false;
        self
    }

    /// Consumes the sink and returns the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

fn on_off(shown: bool) -> &'static str {
    if shown { "on" } else { "off" }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_geometry_resolved(&mut self, e: &GeometryResolvedEvent) {
        let _ = writeln!(
            self.writer,
            "[resolve] tag={} at {}ms epoch={} frame=({:.0},{:.0} {:.0}x{:.0}){}",
            e.tag.0,
            e.now.millis(),
            e.epoch.0,
            e.frame.x0,
            e.frame.y0,
            e.frame.width(),
            e.frame.height(),
            if e.merged { " merged" } else { "" },
        );
    }

    fn on_geometry_stale(&mut self, e: &GeometryStaleEvent) {
        let kept = e
            .kept
            .map_or_else(|| String::from("placeholder"), |k| format!("epoch={}", k.0));
        let _ = writeln!(
            self.writer,
            "[stale] tag={} at {}ms epoch={} kept {kept}",
            e.tag.0,
            e.now.millis(),
            e.epoch.0,
        );
    }

    fn on_window_expired(&mut self, e: &WindowExpiredEvent) {
        let _ = writeln!(
            self.writer,
            "[expire] tag={} {} at {}ms after {}ms",
            e.tag.0,
            e.window.name(),
            e.now.millis(),
            e.now.saturating_duration_since(e.paint_start).millis(),
        );
    }

    fn on_element_rendered(&mut self, e: &ElementRenderedEvent) {
        if !self.render_events {
            return;
        }
        let _ = writeln!(
            self.writer,
            "[render] tag={} at {}ms text={} frame={} style={:?}",
            e.tag.0,
            e.now.millis(),
            on_off(e.visibility.text),
            on_off(e.visibility.frame),
            e.style,
        );
    }

    fn on_pass_summary(&mut self, s: &PassSummary) {
        let _ = writeln!(
            self.writer,
            "[pass] at {}ms epoch={} elements={} text={} frames={} phase={}",
            s.now.millis(),
            s.epoch.0,
            s.elements,
            s.texts_shown,
            s.frames_shown,
            if s.flash_phase_visible { "show" } else { "hide" },
        );
    }
}
