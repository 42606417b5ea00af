// Copyright 2026 the Annunciator Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Display-list surface and headless text metrics for annunciator.
//!
//! This crate sits between [`annunciator_core`]'s elements and a host canvas.
//! It provides:
//!
//! - [`DrawList`] — a [`Surface`](annunciator_core::surface::Surface) that
//!   records every primitive of a render pass as a [`DrawItem`], for later
//!   replay onto a real canvas or for inspection in tests
//! - [`MonospaceMetrics`] — a text measurer for hosts without a font engine,
//!   treating every glyph as one digit wide

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

mod list;
mod metrics;

pub use list::{DrawItem, DrawList};
pub use metrics::MonospaceMetrics;
