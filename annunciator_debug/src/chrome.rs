// Copyright 2026 the Annunciator Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chrome Trace Event Format exporter.
//!
//! [`ChromeTraceSink`] collects trace events as JSON objects and
//! [`write`](ChromeTraceSink::write)s them as [Chrome Trace Event Format][spec]
//! JSON. Each element gets its own track (`tid` is the element tag), and pass
//! summaries become counter tracks.
//!
//! [spec]: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU

use std::io::{self, Write};

use serde_json::{Value, json};

use annunciator_core::time::HostTime;
use annunciator_core::trace::{
    ElementRenderedEvent, GeometryResolvedEvent, GeometryStaleEvent, PassSummary, TraceSink,
    WindowExpiredEvent,
};

/// Collects events for export as Chrome Trace Event Format JSON.
///
/// The output is a complete JSON array of trace event objects, suitable for
/// loading into `chrome://tracing` or [Perfetto](https://ui.perfetto.dev/).
#[derive(Debug, Default)]
pub struct ChromeTraceSink {
    events: Vec<Value>,
}

impl ChromeTraceSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the collected events.
    #[must_use]
    pub fn events(&self) -> &[Value] {
        &self.events
    }

    /// Writes the collected events as a JSON array.
    pub fn write(&self, writer: &mut dyn Write) -> io::Result<()> {
        serde_json::to_writer_pretty(writer, &self.events)?;
        Ok(())
    }
}

/// Render-clock milliseconds to trace microseconds.
fn ts(t: HostTime) -> u64 {
    t.millis().saturating_mul(1000)
}

impl TraceSink for ChromeTraceSink {
    fn on_geometry_resolved(&mut self, e: &GeometryResolvedEvent) {
        self.events.push(json!({
            "ph": "i",
            "name": "GeometryResolved",
            "cat": "Geometry",
            "ts": ts(e.now),
            "pid": 0,
            "tid": e.tag.0,
            "s": "t",
            "args": {
                "epoch": e.epoch.0,
                "frame": [e.frame.x0, e.frame.y0, e.frame.width(), e.frame.height()],
                "merged": e.merged,
            }
        }));
    }

    fn on_geometry_stale(&mut self, e: &GeometryStaleEvent) {
        self.events.push(json!({
            "ph": "i",
            "name": "GeometryStale",
            "cat": "Geometry",
            "ts": ts(e.now),
            "pid": 0,
            "tid": e.tag.0,
            "s": "t",
            "args": {
                "epoch": e.epoch.0,
                "kept": e.kept.map(|k| k.0),
            }
        }));
    }

    fn on_window_expired(&mut self, e: &WindowExpiredEvent) {
        // The whole window as a complete event ending at the expiry.
        self.events.push(json!({
            "ph": "X",
            "name": e.window.name(),
            "cat": "Lifecycle",
            "ts": ts(e.paint_start),
            "dur": ts(e.now).saturating_sub(ts(e.paint_start)),
            "pid": 0,
            "tid": e.tag.0,
        }));
    }

    fn on_element_rendered(&mut self, e: &ElementRenderedEvent) {
        self.events.push(json!({
            "ph": "i",
            "name": "Render",
            "cat": "Element",
            "ts": ts(e.now),
            "pid": 0,
            "tid": e.tag.0,
            "s": "t",
            "args": {
                "text": e.visibility.text,
                "frame": e.visibility.frame,
                "style": format!("{:?}", e.style),
            }
        }));
    }

    fn on_pass_summary(&mut self, s: &PassSummary) {
        self.events.push(json!({
            "ph": "C",
            "name": "Visible",
            "cat": "Summary",
            "ts": ts(s.now),
            "pid": 0,
            "args": {
                "text": s.texts_shown,
                "frames": s.frames_shown,
            }
        }));
    }
}
