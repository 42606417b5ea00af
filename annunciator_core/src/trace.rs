// Copyright 2026 the Annunciator Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for render passes.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that
//! elements call while rendering. All method bodies default to no-ops, so
//! implementing only the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing. When **on**, each
//! method performs a single `Option` branch before dispatching.
//!
//! [`PassSummaryBuilder`] tallies the [`Visibility`] returned by each element
//! during one pass and produces a [`PassSummary`] at the end.
//!
//! # Crate features
//!
//! - `trace` enables the `Tracer` method bodies (one branch per call).

use kurbo::Rect;

use crate::clock::{ClockSnapshot, ConfigEpoch};
use crate::element::{ElementTag, Visibility};
use crate::style::ContentStyle;
use crate::time::HostTime;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Which lifecycle window ran out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExpiryWindow {
    /// The delayed frame box.
    Framed,
    /// Text flashing.
    Flash,
    /// Frame box flashing.
    FrameFlash,
}

impl ExpiryWindow {
    /// Short lowercase name, for log lines.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Framed => "framed",
            Self::Flash => "flash",
            Self::FrameFlash => "frame_flash",
        }
    }
}

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted when an element resolves fresh geometry.
#[derive(Clone, Copy, Debug)]
pub struct GeometryResolvedEvent {
    /// Element that resolved.
    pub tag: ElementTag,
    /// Clock reading of the pass.
    pub now: HostTime,
    /// Epoch the geometry is valid for.
    pub epoch: ConfigEpoch,
    /// Resolved frame box.
    pub frame: Rect,
    /// Whether the element spans two slots.
    pub merged: bool,
}

/// Emitted when the resolver could not produce geometry and the element kept
/// its previous one.
#[derive(Clone, Copy, Debug)]
pub struct GeometryStaleEvent {
    /// Element that failed to resolve.
    pub tag: ElementTag,
    /// Clock reading of the pass.
    pub now: HostTime,
    /// Epoch that was requested.
    pub epoch: ConfigEpoch,
    /// Epoch of the geometry still in use, if any was ever resolved.
    pub kept: Option<ConfigEpoch>,
}

/// Emitted when a lifecycle window expires.
#[derive(Clone, Copy, Debug)]
pub struct WindowExpiredEvent {
    /// Element whose window expired.
    pub tag: ElementTag,
    /// Which window.
    pub window: ExpiryWindow,
    /// When the window started.
    pub paint_start: HostTime,
    /// Clock reading that observed the expiry.
    pub now: HostTime,
}

/// Emitted after an element finishes painting.
#[derive(Clone, Copy, Debug)]
pub struct ElementRenderedEvent {
    /// Element that rendered.
    pub tag: ElementTag,
    /// Clock reading of the pass.
    pub now: HostTime,
    /// What was painted.
    pub visibility: Visibility,
    /// Content style that was dispatched on.
    pub style: ContentStyle,
}

/// Per-pass summary produced by [`PassSummaryBuilder`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PassSummary {
    /// Clock reading of the pass.
    pub now: HostTime,
    /// Configuration epoch of the pass.
    pub epoch: ConfigEpoch,
    /// Elements rendered.
    pub elements: u32,
    /// Elements that painted text.
    pub texts_shown: u32,
    /// Elements that painted a frame box.
    pub frames_shown: u32,
    /// Whether flashing content was in its visible phase.
    pub flash_phase_visible: bool,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from render passes.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called when an element resolves fresh geometry.
    fn on_geometry_resolved(&mut self, e: &GeometryResolvedEvent) {
        _ = e;
    }

    /// Called when geometry resolution fails and stale geometry is kept.
    fn on_geometry_stale(&mut self, e: &GeometryStaleEvent) {
        _ = e;
    }

    /// Called when a lifecycle window expires.
    fn on_window_expired(&mut self, e: &WindowExpiredEvent) {
        _ = e;
    }

    /// Called after each element render.
    fn on_element_rendered(&mut self, e: &ElementRenderedEvent) {
        _ = e;
    }

    /// Called with a per-pass summary.
    fn on_pass_summary(&mut self, s: &PassSummary) {
        _ = s;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`GeometryResolvedEvent`].
    #[inline]
    pub fn geometry_resolved(&mut self, e: &GeometryResolvedEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_geometry_resolved(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`GeometryStaleEvent`].
    #[inline]
    pub fn geometry_stale(&mut self, e: &GeometryStaleEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_geometry_stale(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`WindowExpiredEvent`].
    #[inline]
    pub fn window_expired(&mut self, e: &WindowExpiredEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_window_expired(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits an [`ElementRenderedEvent`].
    #[inline]
    pub fn element_rendered(&mut self, e: &ElementRenderedEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_element_rendered(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`PassSummary`].
    #[inline]
    pub fn pass_summary(&mut self, s: &PassSummary) {
        #[cfg(feature = "trace")]
        if let Some(sink) = &mut self.sink {
            sink.on_pass_summary(s);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = s;
        }
    }
}

// ---------------------------------------------------------------------------
// PassSummaryBuilder
// ---------------------------------------------------------------------------

/// Tallies element visibility during a pass and produces a [`PassSummary`].
#[derive(Debug)]
pub struct PassSummaryBuilder {
    clock: ClockSnapshot,
    elements: u32,
    texts_shown: u32,
    frames_shown: u32,
}

impl PassSummaryBuilder {
    /// Starts a summary for the pass running at `clock`.
    #[must_use]
    pub fn new(clock: &ClockSnapshot) -> Self {
        Self {
            clock: *clock,
            elements: 0,
            texts_shown: 0,
            frames_shown: 0,
        }
    }

    /// Records one element's render result.
    pub fn record(&mut self, visibility: Visibility) {
        self.elements = self.elements.saturating_add(1);
        self.texts_shown = self.texts_shown.saturating_add(u32::from(visibility.text));
        self.frames_shown = self
            .frames_shown
            .saturating_add(u32::from(visibility.frame));
    }

    /// Consumes the builder and produces the final [`PassSummary`].
    #[must_use]
    pub fn finish(self) -> PassSummary {
        PassSummary {
            now: self.clock.now,
            epoch: self.clock.epoch,
            elements: self.elements,
            texts_shown: self.texts_shown,
            frames_shown: self.frames_shown,
            flash_phase_visible: self.clock.flash_visible(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_rendered() -> ElementRenderedEvent {
        ElementRenderedEvent {
            tag: ElementTag(3),
            now: HostTime(1_200),
            visibility: Visibility {
                text: true,
                frame: false,
            },
            style: ContentStyle::OneLine,
        }
    }

    #[test]
    fn noop_sink_compiles() {
        let mut sink = NoopSink;
        sink.on_element_rendered(&sample_rendered());
        sink.on_window_expired(&WindowExpiredEvent {
            tag: ElementTag(3),
            window: ExpiryWindow::Flash,
            paint_start: HostTime(0),
            now: HostTime(10_001),
        });
        sink.on_pass_summary(&PassSummaryBuilder::new(&ClockSnapshot::default()).finish());
    }

    #[test]
    fn tracer_none_does_nothing() {
        let mut tracer = Tracer::none();
        tracer.element_rendered(&sample_rendered());
        tracer.geometry_stale(&GeometryStaleEvent {
            tag: ElementTag(0),
            now: HostTime(16),
            epoch: ConfigEpoch(2),
            kept: None,
        });
    }

    #[test]
    fn summary_counts_visibility() {
        let clock = ClockSnapshot::new(HostTime(2_600), ConfigEpoch(4));
        let mut builder = PassSummaryBuilder::new(&clock);
        builder.record(Visibility {
            text: true,
            frame: true,
        });
        builder.record(Visibility {
            text: true,
            frame: false,
        });
        builder.record(Visibility::HIDDEN);

        let summary = builder.finish();
        assert_eq!(summary.elements, 3);
        assert_eq!(summary.texts_shown, 2);
        assert_eq!(summary.frames_shown, 1);
        assert_eq!(summary.epoch, ConfigEpoch(4));
        assert!(!summary.flash_phase_visible);
    }

    #[test]
    fn empty_summary_is_zero() {
        let summary = PassSummaryBuilder::new(&ClockSnapshot::default()).finish();
        assert_eq!(summary.elements, 0);
        assert_eq!(summary.texts_shown, 0);
        assert_eq!(summary.frames_shown, 0);
        assert!(summary.flash_phase_visible);
    }

    #[test]
    fn window_names() {
        assert_eq!(ExpiryWindow::Framed.name(), "framed");
        assert_eq!(ExpiryWindow::FrameFlash.name(), "frame_flash");
    }

    #[cfg(feature = "trace")]
    #[test]
    fn tracer_dispatches_to_sink() {
        use alloc::vec::Vec;

        struct RecordingSink {
            expired: Vec<ExpiryWindow>,
        }
        impl TraceSink for RecordingSink {
            fn on_window_expired(&mut self, e: &WindowExpiredEvent) {
                self.expired.push(e.window);
            }
        }

        let mut sink = RecordingSink {
            expired: Vec::new(),
        };
        {
            let mut tracer = Tracer::new(&mut sink);
            tracer.window_expired(&WindowExpiredEvent {
                tag: ElementTag(1),
                window: ExpiryWindow::Framed,
                paint_start: HostTime(0),
                now: HostTime(10_001),
            });
        }
        assert_eq!(sink.expired, &[ExpiryWindow::Framed]);
    }
}
