// Copyright 2026 the Annunciator Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The annunciation element state machine.
//!
//! An [`AnnunciationElement`] is one on-screen annunciation slot. The owning
//! instrument pushes content into it every frame (usually the same content)
//! and calls [`render`](AnnunciationElement::render) once per pass. The
//! element decides on its own whether the frame box and text are visible:
//!
//! - Content changes restart the lifecycle: `paint_start` moves to `now` and
//!   the framed, flash and frame-flash windows are re-armed. Pushing identical
//!   content is a no-op.
//! - Each window expires once the clock passes `paint_start` plus its timeout.
//! - Flashing is phase-locked to the clock reading, not to `paint_start`, so
//!   every element sharing a [`ClockSnapshot`] blinks together.
//!
//! Geometry is resolved lazily through the element's [`GeometryResolver`]
//! whenever the configuration epoch advances or one of the element's own
//! layout inputs (font, orientation, content, two-columns) changes.

use core::fmt;

use kurbo::Point;

use crate::clock::{ClockSnapshot, ConfigEpoch};
use crate::content::{Content, ContentRef};
use crate::geometry::{Geometry, GeometryResolver, ResolveRequest, oriented_width};
use crate::style::{ContentStyle, FontSize, SemanticColor, TextAlign, TextOrientation};
use crate::surface::{DrawColor, Surface};
use crate::time::{Duration, HostTime};
use crate::trace::{
    ElementRenderedEvent, ExpiryWindow, GeometryResolvedEvent, GeometryStaleEvent, Tracer,
    WindowExpiredEvent,
};

/// Diagnostic label for an element. Not required to be unique.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ElementTag(pub u32);

impl fmt::Debug for ElementTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ElementTag({})", self.0)
    }
}

/// What an element painted during its last render.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Visibility {
    /// Text was drawn.
    pub text: bool,
    /// The frame box was drawn.
    pub frame: bool,
}

impl Visibility {
    /// Nothing drawn.
    pub const HIDDEN: Self = Self {
        text: false,
        frame: false,
    };
}

/// Lifecycle window lengths, measured from the last content change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Timeouts {
    /// How long a delayed frame box stays up.
    pub framed: Duration,
    /// How long text flashes.
    pub flash: Duration,
    /// How long the frame box flashes.
    pub frame_flash: Duration,
}

impl Timeouts {
    /// Default length of every window.
    pub const DEFAULT_WINDOW: Duration = Duration::from_secs(10);

    /// The same length for every window.
    #[must_use]
    pub const fn uniform(window: Duration) -> Self {
        Self {
            framed: window,
            flash: window,
            frame_flash: window,
        }
    }
}

impl Default for Timeouts {
    fn default() -> Self {
        Self::uniform(Self::DEFAULT_WINDOW)
    }
}

/// Armed and enabled lifecycle flags.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct Lifecycle {
    cleared: bool,
    framing: bool,
    framed: bool,
    frame_delayed: bool,
    flashing: bool,
    flash: bool,
    frame_flashing: bool,
    frame_flash: bool,
}

impl Lifecycle {
    const INITIAL: Self = Self {
        cleared: true,
        framing: true,
        framed: false,
        frame_delayed: true,
        flashing: false,
        flash: false,
        frame_flashing: false,
        frame_flash: false,
    };

    fn arm(&mut self) {
        self.cleared = false;
        self.framed = true;
        self.flash = true;
        self.frame_flash = true;
    }

    fn disarm(&mut self) {
        self.cleared = true;
        self.framed = false;
        self.flash = false;
        self.frame_flash = false;
    }

    fn visibility(&self, flash_phase_visible: bool) -> Visibility {
        if self.cleared {
            return Visibility::HIDDEN;
        }
        let text = !(self.flash && self.flashing) || flash_phase_visible;
        let frame = self.framing
            && (self.framed || !self.frame_delayed)
            && (!(self.frame_flash && self.frame_flashing) || flash_phase_visible);
        Visibility { text, frame }
    }
}

/// Colours of the three parts of an annunciation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct Palette {
    text: SemanticColor,
    value: SemanticColor,
    frame: SemanticColor,
}

/// One annunciation slot on an instrument.
///
/// `R` supplies the placement rules for the instrument family the element
/// belongs to.
///
/// Elements hold no locks. Callers must make every content, [`clear`] and
/// [`render`] call for one element from the same thread, normally the render
/// thread. Window expiry is only detected inside [`render`], so a skipped pass
/// delays it until the next one.
///
/// [`clear`]: Self::clear
/// [`render`]: Self::render
pub struct AnnunciationElement<R: GeometryResolver> {
    resolver: R,
    slot: R::Slot,
    row: u8,
    tag: ElementTag,

    content: Content,
    palette: Palette,
    align: TextAlign,
    orientation: TextOrientation,
    font: FontSize,
    two_columns: bool,

    lifecycle: Lifecycle,
    paint_start: HostTime,
    timeouts: Timeouts,

    geometry: Geometry,
    resolved_at: Option<ConfigEpoch>,
    inputs_changed: bool,
    visibility: Visibility,
}

impl<R: GeometryResolver> fmt::Debug for AnnunciationElement<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnnunciationElement")
            .field("tag", &self.tag)
            .field("slot", &self.slot)
            .field("row", &self.row)
            .field("content", &self.content)
            .field("lifecycle", &self.lifecycle)
            .field("paint_start", &self.paint_start)
            .field("resolved_at", &self.resolved_at)
            .finish_non_exhaustive()
    }
}

impl<R: GeometryResolver> AnnunciationElement<R> {
    /// Creates a cleared element for `slot` and `row`, drawing text in
    /// `text_color`.
    #[must_use]
    pub fn new(resolver: R, slot: R::Slot, row: u8, text_color: SemanticColor) -> Self {
        Self {
            resolver,
            slot,
            row,
            tag: ElementTag::default(),
            content: Content::new(),
            palette: Palette {
                text: text_color,
                value: SemanticColor::Armed,
                frame: SemanticColor::Mark,
            },
            align: TextAlign::Center,
            orientation: TextOrientation::Horizontal,
            font: FontSize::Xl,
            two_columns: false,
            lifecycle: Lifecycle::INITIAL,
            paint_start: HostTime::default(),
            timeouts: Timeouts::default(),
            geometry: Geometry::default(),
            resolved_at: None,
            inputs_changed: true,
            visibility: Visibility::HIDDEN,
        }
    }

    /// Attaches a diagnostic tag.
    #[must_use]
    pub fn with_tag(mut self, tag: ElementTag) -> Self {
        self.tag = tag;
        self
    }

    // -- content ----------------------------------------------------------

    /// Replaces the content if it differs from what is shown.
    ///
    /// Returns `false` without touching any state when `content` and `color`
    /// match the current content. Otherwise the content is stored,
    /// `paint_start` moves to `now`, geometry is marked for re-resolution, and
    /// the lifecycle is re-armed (or cleared, if the first line is empty).
    pub fn set_content(
        &mut self,
        now: HostTime,
        content: ContentRef<'_>,
        color: SemanticColor,
    ) -> bool {
        let content = ContentRef {
            style: self.effective_style(content.style),
            ..content
        };
        if self.content.matches(&content) && self.palette.text == color {
            return false;
        }

        self.content.assign(&content);
        self.palette.text = color;
        self.paint_start = now;
        self.inputs_changed = true;
        if content.primary().is_empty() {
            self.lifecycle.disarm();
        } else {
            self.lifecycle.arm();
        }
        true
    }

    /// Shows one line of text.
    pub fn set_text(&mut self, now: HostTime, line: &str, color: SemanticColor) -> bool {
        self.set_content(now, ContentRef::one_line(line), color)
    }

    /// Shows two stacked lines.
    pub fn set_two_lines(
        &mut self,
        now: HostTime,
        line1: &str,
        line2: &str,
        color: SemanticColor,
    ) -> bool {
        self.set_content(now, ContentRef::two_lines(line1, line2), color)
    }

    /// Shows three stacked lines.
    pub fn set_three_lines(
        &mut self,
        now: HostTime,
        line1: &str,
        line2: &str,
        line3: &str,
        color: SemanticColor,
    ) -> bool {
        self.set_content(now, ContentRef::three_lines(line1, line2, line3), color)
    }

    /// Shows a line followed by a value in the value colour.
    pub fn set_text_with_value(
        &mut self,
        now: HostTime,
        line: &str,
        value: &str,
        color: SemanticColor,
    ) -> bool {
        self.set_content(now, ContentRef::one_line_with_value(line, value), color)
    }

    /// Shows a line, then a second line followed by a value.
    pub fn set_two_lines_with_value(
        &mut self,
        now: HostTime,
        line1: &str,
        line2: &str,
        value: &str,
        color: SemanticColor,
    ) -> bool {
        self.set_content(
            now,
            ContentRef::two_lines_with_value(line1, line2, value),
            color,
        )
    }

    /// Hides the annunciation and blanks its content.
    pub fn clear(&mut self) {
        self.lifecycle.disarm();
        self.content.blank();
    }

    fn effective_style(&self, style: ContentStyle) -> ContentStyle {
        match style {
            ContentStyle::OneLine if self.two_columns => ContentStyle::TwoColumns,
            ContentStyle::TwoColumns if !self.two_columns => ContentStyle::OneLine,
            other => other,
        }
    }

    // -- lifecycle --------------------------------------------------------

    /// Arms the frame box and restarts the lifecycle clock.
    pub fn set_frame(&mut self, now: HostTime) {
        self.lifecycle.framed = true;
        self.paint_start = now;
    }

    /// Disarms the frame box.
    pub fn clear_frame(&mut self) {
        self.lifecycle.framed = false;
    }

    /// Arms text flashing and restarts the lifecycle clock.
    pub fn set_flash(&mut self, now: HostTime) {
        self.lifecycle.flash = true;
        self.paint_start = now;
    }

    /// Stops text flashing.
    pub fn clear_flash(&mut self) {
        self.lifecycle.flash = false;
    }

    /// Arms frame flashing and restarts the lifecycle clock.
    pub fn set_frame_flash(&mut self, now: HostTime) {
        self.lifecycle.frame_flash = true;
        self.paint_start = now;
    }

    /// Stops frame flashing.
    pub fn clear_frame_flash(&mut self) {
        self.lifecycle.frame_flash = false;
    }

    /// Allows the frame box to be drawn.
    pub fn enable_framing(&mut self) {
        self.lifecycle.framing = true;
    }

    /// Never draws the frame box.
    pub fn disable_framing(&mut self) {
        self.lifecycle.framing = false;
    }

    /// Makes text flash while the flash window is open.
    pub fn enable_flashing(&mut self) {
        self.lifecycle.flashing = true;
    }

    /// Keeps text steady.
    pub fn disable_flashing(&mut self) {
        self.lifecycle.flashing = false;
    }

    /// Makes the frame box flash while the frame-flash window is open.
    pub fn enable_frame_flashing(&mut self) {
        self.lifecycle.frame_flashing = true;
    }

    /// Keeps the frame box steady.
    pub fn disable_frame_flashing(&mut self) {
        self.lifecycle.frame_flashing = false;
    }

    /// Shows the frame box only during the framed window.
    pub fn enable_frame_delayed(&mut self) {
        self.lifecycle.frame_delayed = true;
    }

    /// Shows the frame box for as long as there is content.
    pub fn disable_frame_delayed(&mut self) {
        self.lifecycle.frame_delayed = false;
    }

    /// Sets all frame options at once.
    pub fn set_frame_options(
        &mut self,
        enabled: bool,
        delayed: bool,
        flashing: bool,
        color: SemanticColor,
    ) {
        self.lifecycle.framing = enabled;
        self.lifecycle.frame_delayed = delayed;
        self.lifecycle.frame_flashing = flashing;
        self.palette.frame = color;
    }

    /// Replaces the lifecycle window lengths.
    pub fn set_timeouts(&mut self, timeouts: Timeouts) {
        self.timeouts = timeouts;
    }

    // -- presentation -----------------------------------------------------

    /// Sets the frame box colour.
    pub fn set_frame_color(&mut self, color: SemanticColor) {
        self.palette.frame = color;
    }

    /// Sets the colour of values in the `*WithValue` styles.
    pub fn set_value_color(&mut self, color: SemanticColor) {
        self.palette.value = color;
    }

    /// Sets the text colour without restarting the lifecycle.
    pub fn set_text_color(&mut self, color: SemanticColor) {
        self.palette.text = color;
    }

    /// Sets horizontal text alignment.
    pub fn set_text_align(&mut self, align: TextAlign) {
        self.align = align;
    }

    /// Sets the font size class.
    pub fn set_font_size(&mut self, font: FontSize) {
        if self.font != font {
            self.font = font;
            self.inputs_changed = true;
        }
    }

    /// Sets the glyph stacking direction.
    pub fn set_text_orientation(&mut self, orientation: TextOrientation) {
        if self.orientation != orientation {
            self.orientation = orientation;
            self.inputs_changed = true;
        }
    }

    /// Spans one-line content across this slot and the next one.
    pub fn set_two_columns(&mut self, two_columns: bool) {
        if self.two_columns == two_columns {
            return;
        }
        self.two_columns = two_columns;
        let style = self.effective_style(self.content.style());
        self.content.set_style(style);
        self.inputs_changed = true;
    }

    /// Forces geometry to be resolved again on the next render.
    pub fn invalidate_geometry(&mut self) {
        self.inputs_changed = true;
    }

    // -- accessors --------------------------------------------------------

    /// Returns `true` when there is nothing to show.
    #[must_use]
    pub fn is_cleared(&self) -> bool {
        self.lifecycle.cleared
    }

    /// Returns `true` while the framed window is open.
    #[must_use]
    pub fn is_framed(&self) -> bool {
        self.lifecycle.framed
    }

    /// Returns `true` while the flash window is open.
    #[must_use]
    pub fn is_flash_active(&self) -> bool {
        self.lifecycle.flash
    }

    /// Returns `true` while the frame-flash window is open.
    #[must_use]
    pub fn is_frame_flash_active(&self) -> bool {
        self.lifecycle.frame_flash
    }

    /// Returns when the lifecycle last restarted.
    #[must_use]
    pub fn paint_start(&self) -> HostTime {
        self.paint_start
    }

    /// Returns the last resolved geometry.
    #[must_use]
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Returns the epoch the geometry was resolved at, if ever.
    #[must_use]
    pub fn resolved_at(&self) -> Option<ConfigEpoch> {
        self.resolved_at
    }

    /// Returns what was painted by the last render.
    #[must_use]
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Returns the current content.
    #[must_use]
    pub fn content(&self) -> &Content {
        &self.content
    }

    /// Returns the current content style.
    #[must_use]
    pub fn style(&self) -> ContentStyle {
        self.content.style()
    }

    /// Returns the diagnostic tag.
    #[must_use]
    pub fn tag(&self) -> ElementTag {
        self.tag
    }

    /// Returns the element's slot.
    #[must_use]
    pub fn slot(&self) -> R::Slot {
        self.slot
    }

    /// Returns the element's row.
    #[must_use]
    pub fn row(&self) -> u8 {
        self.row
    }

    // -- render -----------------------------------------------------------

    /// Paints the element for one pass.
    pub fn render<S: Surface + ?Sized>(
        &mut self,
        clock: &ClockSnapshot,
        layout: &R::Layout,
        surface: &mut S,
    ) -> Visibility {
        self.render_traced(clock, layout, surface, &mut Tracer::none())
    }

    /// Paints the element for one pass, reporting to `tracer`.
    pub fn render_traced<S: Surface + ?Sized>(
        &mut self,
        clock: &ClockSnapshot,
        layout: &R::Layout,
        surface: &mut S,
        tracer: &mut Tracer<'_>,
    ) -> Visibility {
        self.refresh_geometry(clock, layout, surface, tracer);
        self.expire_windows(clock.now, tracer);

        let visibility = self.lifecycle.visibility(clock.flash_visible());
        if visibility.frame {
            surface.stroke_rect(self.geometry.frame, self.palette.frame.into());
        }
        if visibility.text {
            self.draw_text(surface);
        }

        self.visibility = visibility;
        tracer.element_rendered(&ElementRenderedEvent {
            tag: self.tag,
            now: clock.now,
            visibility,
            style: self.content.style(),
        });
        visibility
    }

    fn refresh_geometry<S: Surface + ?Sized>(
        &mut self,
        clock: &ClockSnapshot,
        layout: &R::Layout,
        surface: &S,
        tracer: &mut Tracer<'_>,
    ) {
        let epoch = clock.epoch;
        let current = !self.inputs_changed && self.resolved_at.is_some_and(|at| at >= epoch);
        if current {
            return;
        }

        let request = ResolveRequest {
            slot: self.slot,
            row: self.row,
            style: self.content.style(),
            font: self.font,
            orientation: self.orientation,
            primary: self.content.primary(),
        };
        match self.resolver.resolve(&request, layout, surface) {
            Some(geometry) => {
                self.geometry = geometry;
                self.resolved_at = Some(epoch);
                self.inputs_changed = false;
                tracer.geometry_resolved(&GeometryResolvedEvent {
                    tag: self.tag,
                    now: clock.now,
                    epoch,
                    frame: geometry.frame,
                    merged: geometry.merge.is_some(),
                });
            }
            None => tracer.geometry_stale(&GeometryStaleEvent {
                tag: self.tag,
                now: clock.now,
                epoch,
                kept: self.resolved_at,
            }),
        }
    }

    fn expire_windows(&mut self, now: HostTime, tracer: &mut Tracer<'_>) {
        let start = self.paint_start;
        let windows = [
            (ExpiryWindow::Framed, self.timeouts.framed),
            (ExpiryWindow::Flash, self.timeouts.flash),
            (ExpiryWindow::FrameFlash, self.timeouts.frame_flash),
        ];
        for (window, timeout) in windows {
            let armed = match window {
                ExpiryWindow::Framed => &mut self.lifecycle.framed,
                ExpiryWindow::Flash => &mut self.lifecycle.flash,
                ExpiryWindow::FrameFlash => &mut self.lifecycle.frame_flash,
            };
            if *armed && now.has_elapsed(start, timeout) {
                *armed = false;
                tracer.window_expired(&WindowExpiredEvent {
                    tag: self.tag,
                    window,
                    paint_start: start,
                    now,
                });
            }
        }
    }

    // -- drawing ----------------------------------------------------------

    fn draw_text<S: Surface + ?Sized>(&self, surface: &mut S) {
        match self.content.style() {
            ContentStyle::OneLine => self.draw_line(surface, 0),
            ContentStyle::OneLineWithValue => self.draw_with_value(surface, 0),
            ContentStyle::TwoLines => {
                self.draw_line(surface, 0);
                self.draw_line(surface, 1);
            }
            ContentStyle::TwoLinesWithValue => {
                self.draw_line(surface, 0);
                self.draw_with_value(surface, 1);
            }
            ContentStyle::ThreeLines => {
                for line in 0..3 {
                    self.draw_line(surface, line);
                }
            }
            ContentStyle::TwoColumns => self.draw_merged(surface),
        }
    }

    fn draw_line<S: Surface + ?Sized>(&self, surface: &mut S, line: usize) {
        let text = self.content.line(line);
        if text.is_empty() {
            return;
        }
        let g = &self.geometry;
        let width = oriented_width(&*surface, self.orientation, self.font, g.metrics, text);
        let x = match self.align {
            TextAlign::Center => g.anchors.center_x - width / 2,
            TextAlign::Left => g.anchors.left_x,
        };
        let y = g.anchors.baselines[line];
        let color = self.palette.text.into();

        match self.orientation {
            TextOrientation::Horizontal => surface.fill_text(text, point(x, y), self.font, color),
            TextOrientation::Vertical => {
                let mut y = y;
                for (i, c) in text.char_indices() {
                    let glyph = &text[i..i + c.len_utf8()];
                    surface.fill_text(glyph, point(x, y), self.font, color);
                    y += g.metrics.line_height;
                }
            }
        }
    }

    fn draw_with_value<S: Surface + ?Sized>(&self, surface: &mut S, line: usize) {
        let text = self.content.line(line);
        let value = self.content.value();
        let g = &self.geometry;
        let label_w = surface.text_width(self.font, text);
        let value_w = surface.text_width(self.font, value);
        // The pair is centred whatever the alignment.
        let x = g.anchors.center_x - (label_w + value_w) / 2;
        let y = g.anchors.baselines[line];

        if !text.is_empty() {
            surface.fill_text(text, point(x, y), self.font, self.palette.text.into());
        }
        if !value.is_empty() {
            surface.fill_text(
                value,
                point(x + label_w, y),
                self.font,
                self.palette.value.into(),
            );
        }
    }

    fn draw_merged<S: Surface + ?Sized>(&self, surface: &mut S) {
        let Some(merge) = self.geometry.merge else {
            self.draw_line(surface, 0);
            return;
        };
        surface.stroke_line(merge.divider, DrawColor::Background);

        let text = self.content.primary();
        let width = surface.text_width(self.font, text);
        let y = self.geometry.anchors.baselines[0];
        surface.fill_text(
            text,
            point(merge.center_x - width / 2, y),
            self.font,
            self.palette.text.into(),
        );
    }
}

fn point(x: i32, y: i32) -> Point {
    Point::new(f64::from(x), f64::from(y))
}
