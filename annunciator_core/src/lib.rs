// Copyright 2026 the Annunciator Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Timing-synchronized annunciation elements for cockpit display panels.
//!
//! `annunciator_core` manages the short textual annunciations (failure flags,
//! mode labels, warnings) that glass-cockpit instruments show: when they
//! appear, when their frame box times out, how they flash, and where they sit
//! on the instrument. It is `no_std` compatible (with `alloc`) and never
//! rasterizes; drawing goes through a host-provided surface.
//!
//! # Architecture
//!
//! ```text
//!   host clock + EpochCounter
//!       │
//!       ▼
//!   ClockSnapshot { now, epoch } ──────────────┐
//!                                              ▼
//!   instrument logic ── set_text(..) ──► AnnunciationElement<R>::render()
//!                                              │          │
//!                       layout snapshot ──► R: GeometryResolver
//!                                              │
//!                                              ▼
//!                                           Surface (host canvas)
//! ```
//!
//! **[`element`]** — The per-slot state machine. Content changes restart the
//! framed and flash windows; rendering expires them and paints.
//!
//! **[`geometry`]** — The [`GeometryResolver`](geometry::GeometryResolver)
//! contract, font metrics, and the generic text-column fallback.
//!
//! **[`pfd`]** and **[`nd`]** — Placement rules for the primary flight
//! display and the navigation display.
//!
//! **[`clock`]** — Per-pass [`ClockSnapshot`](clock::ClockSnapshot) and the
//! shared [`EpochCounter`](clock::EpochCounter).
//!
//! **[`time`]** — Millisecond render-clock time and the flash phase.
//!
//! **[`content`]** and **[`style`]** — What an annunciation says and how it
//! is presented.
//!
//! **[`surface`]** — The drawing and text-measuring traits hosts implement.
//!
//! **[`trace`]** — [`TraceSink`](trace::TraceSink) trait and event types for
//! render-pass instrumentation, with zero-overhead [`Tracer`](trace::Tracer)
//! wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod clock;
pub mod content;
pub mod element;
pub mod geometry;
pub mod nd;
pub mod pfd;
pub mod style;
pub mod surface;
pub mod time;
pub mod trace;
