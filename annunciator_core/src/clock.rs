// Copyright 2026 the Annunciator Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-pass clock snapshot and configuration epochs.
//!
//! The host owns the render clock and a configuration epoch that advances
//! whenever display geometry, power state, or visual style changes. Once per
//! render pass it captures both into a [`ClockSnapshot`] and hands the same
//! snapshot to every element. Elements compare the snapshot's epoch with the
//! epoch their cached geometry was resolved at and re-resolve lazily.
//!
//! [`EpochCounter`] is a lock-free counter a host can share between the
//! thread that observes reconfiguration (window resize, style change) and the
//! render thread. It has a single writer and any number of readers.

use core::fmt;
use core::sync::atomic::{AtomicU64, Ordering};

use crate::time::HostTime;

/// A configuration epoch.
///
/// Epochs only move forward. Geometry resolved at epoch `N` is valid until the
/// host publishes an epoch greater than `N`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ConfigEpoch(pub u64);

impl ConfigEpoch {
    /// The epoch before any configuration has been published.
    pub const INITIAL: Self = Self(0);

    /// Returns the following epoch.
    #[inline]
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Debug for ConfigEpoch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ConfigEpoch({})", self.0)
    }
}

/// What the render loop knows about time for one pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct ClockSnapshot {
    /// Render-clock reading for this pass.
    pub now: HostTime,
    /// Configuration epoch in effect for this pass.
    pub epoch: ConfigEpoch,
}

impl ClockSnapshot {
    /// Creates a snapshot from a millisecond reading and an epoch.
    #[inline]
    #[must_use]
    pub const fn new(now: HostTime, epoch: ConfigEpoch) -> Self {
        Self { now, epoch }
    }

    /// Returns a copy of this snapshot advanced to `now`, keeping the epoch.
    #[inline]
    #[must_use]
    pub const fn at(self, now: HostTime) -> Self {
        Self {
            now,
            epoch: self.epoch,
        }
    }

    /// Returns `true` when flashing content is visible at this reading.
    #[inline]
    #[must_use]
    pub const fn flash_visible(&self) -> bool {
        self.now.flash_visible()
    }
}

/// Monotonic configuration epoch shared between threads.
///
/// Bumps use release ordering and reads use acquire ordering, so a reader that
/// observes a new epoch also observes the layout writes published before the
/// bump.
#[derive(Debug, Default)]
pub struct EpochCounter {
    current: AtomicU64,
}

impl EpochCounter {
    /// Creates a counter at [`ConfigEpoch::INITIAL`].
    #[must_use]
    pub const fn new() -> Self {
        Self {
            current: AtomicU64::new(0),
        }
    }

    /// Publishes a new epoch and returns it.
    ///
    /// Call this after the host has finished recomputing its layout.
    pub fn bump(&self) -> ConfigEpoch {
        ConfigEpoch(self.current.fetch_add(1, Ordering::Release) + 1)
    }

    /// Reads the current epoch.
    #[must_use]
    pub fn current(&self) -> ConfigEpoch {
        ConfigEpoch(self.current.load(Ordering::Acquire))
    }

    /// Captures a [`ClockSnapshot`] at `now` with the current epoch.
    #[must_use]
    pub fn snapshot(&self, now: HostTime) -> ClockSnapshot {
        ClockSnapshot::new(now, self.current())
    }
}
