// Copyright 2026 the Annunciator Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render-clock time and durations.
//!
//! [`HostTime`] is a point on the host's monotonic render clock, expressed in
//! milliseconds. Every element rendered during one pass must see the same
//! reading so that flashing stays phase-locked across the panel.
//!
//! [`Duration`] is a span in the same millisecond units. The lifecycle
//! windows (framed, flash, frame-flash) are expressed as durations measured
//! from the element's last content change.

use core::fmt;
use core::ops::{Add, Sub};

/// Milliseconds in one flash period.
pub const FLASH_PERIOD_MS: u64 = 1000;

/// Milliseconds of each flash period during which flashing content is shown.
pub const FLASH_VISIBLE_MS: u64 = 500;

/// A point in time on the host render clock, in milliseconds.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct HostTime(pub u64);

impl HostTime {
    /// Creates a time from a millisecond reading.
    #[inline]
    #[must_use]
    pub const fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    /// Returns the raw millisecond value.
    #[inline]
    #[must_use]
    pub const fn millis(self) -> u64 {
        self.0
    }

    /// Returns the position of this reading inside the current second.
    #[inline]
    #[must_use]
    pub const fn millis_of_second(self) -> u64 {
        self.0 % FLASH_PERIOD_MS
    }

    /// Returns `true` when flashing content is in the visible half of the
    /// flash period.
    ///
    /// The phase depends only on the clock reading, never on when an element
    /// started flashing, so all elements sharing a reading agree.
    #[inline]
    #[must_use]
    pub const fn flash_visible(self) -> bool {
        self.millis_of_second() < FLASH_VISIBLE_MS
    }

    /// Returns the duration between `self` and an earlier time, or zero if
    /// `earlier` is after `self`.
    #[inline]
    #[must_use]
    pub const fn saturating_duration_since(self, earlier: Self) -> Duration {
        Duration(self.0.saturating_sub(earlier.0))
    }

    /// Checked addition of a duration.
    #[inline]
    #[must_use]
    pub const fn checked_add(self, duration: Duration) -> Option<Self> {
        match self.0.checked_add(duration.0) {
            Some(t) => Some(Self(t)),
            None => None,
        }
    }

    /// Returns `true` if more than `window` has elapsed since `start`.
    ///
    /// A window ending past the end of the clock range never elapses.
    #[inline]
    #[must_use]
    pub const fn has_elapsed(self, start: Self, window: Duration) -> bool {
        match start.checked_add(window) {
            Some(deadline) => self.0 > deadline.0,
            None => false,
        }
    }
}

impl Add<Duration> for HostTime {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Duration) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for HostTime {
    type Output = Duration;

    #[inline]
    fn sub(self, rhs: Self) -> Duration {
        Duration(self.0 - rhs.0)
    }
}

impl fmt::Debug for HostTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HostTime({}ms)", self.0)
    }
}

/// A span of render-clock time, in milliseconds.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Duration(pub u64);

impl Duration {
    /// A zero-length duration.
    pub const ZERO: Self = Self(0);

    /// Creates a duration from milliseconds.
    #[inline]
    #[must_use]
    pub const fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    /// Creates a duration from whole seconds.
    #[inline]
    #[must_use]
    pub const fn from_secs(secs: u64) -> Self {
        Self(secs * 1000)
    }

    /// Returns the raw millisecond value.
    #[inline]
    #[must_use]
    pub const fn millis(self) -> u64 {
        self.0
    }

    /// Saturating addition.
    #[inline]
    #[must_use]
    pub const fn saturating_add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Add for Duration {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl fmt::Debug for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Duration({}ms)", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flash_phase_follows_millisecond_of_second() {
        assert!(HostTime(0).flash_visible(), "start of second is visible");
        assert!(HostTime(499).flash_visible(), "499 is still visible");
        assert!(!HostTime(500).flash_visible(), "500 starts hidden half");
        assert!(!HostTime(999).flash_visible(), "999 is hidden");
        assert!(HostTime(1000).flash_visible(), "next second is visible");
        assert_eq!(HostTime(12_345).millis_of_second(), 345);
    }

    #[test]
    fn elapsed_is_strictly_after_deadline() {
        let start = HostTime(1_000);
        let window = Duration::from_secs(10);
        assert!(!HostTime(11_000).has_elapsed(start, window));
        assert!(HostTime(11_001).has_elapsed(start, window));
    }

    #[test]
    fn elapsed_never_fires_past_clock_range() {
        let start = HostTime(u64::MAX - 5);
        assert!(!HostTime(u64::MAX).has_elapsed(start, Duration(10)));
    }

    #[test]
    fn duration_arithmetic() {
        assert_eq!(Duration::from_secs(10), Duration::from_millis(10_000));
        assert_eq!((Duration(100) + Duration(30)).millis(), 130);
        assert_eq!(Duration(u64::MAX).saturating_add(Duration(1)), Duration(u64::MAX));
    }

    #[test]
    fn host_time_duration_ops() {
        let t = HostTime(1000);
        assert_eq!((t + Duration(200)).millis(), 1200);
        assert_eq!(HostTime(1500) - t, Duration(500));
        assert_eq!(t.saturating_duration_since(HostTime(1500)), Duration::ZERO);
        assert_eq!(t.checked_add(Duration(u64::MAX)), None);
    }
}
