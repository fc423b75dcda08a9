// Copyright 2026 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reveal position in percent of container width.

use core::fmt;

/// How much of the overlay is revealed, in percent of the container width.
///
/// The value is always finite and within `0.0..=100.0`. The same value drives
/// both the overlay's clip width and the handle's left offset, so the two can
/// never disagree.
///
/// `Display` renders the CSS length (`"50%"`).
#[derive(Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct RevealPosition(f64);

impl RevealPosition {
    /// Nothing of the overlay is revealed.
    pub const MIN: Self = Self(0.0);
    /// Overlay and handle sit in the middle of the container.
    pub const HALF: Self = Self(50.0);
    /// The overlay covers the whole container.
    pub const MAX: Self = Self(100.0);

    /// Clamps `percent` into `0.0..=100.0`.
    ///
    /// Infinities clamp to the nearest bound. Returns `None` for NaN.
    #[must_use]
    pub fn clamped(percent: f64) -> Option<Self> {
        if percent.is_nan() {
            return None;
        }
        let v = percent.clamp(0.0, 100.0);
        // Normalize -0.0 so it never renders as "-0%".
        Some(Self(if v == 0.0 { 0.0 } else { v }))
    }

    /// Returns the position in percent.
    #[inline]
    #[must_use]
    pub const fn percent(self) -> f64 {
        self.0
    }
}

impl fmt::Debug for RevealPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RevealPosition({}%)", self.0)
    }
}

impl fmt::Display for RevealPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString as _;

    use super::*;

    #[test]
    fn clamps_out_of_range() {
        assert_eq!(RevealPosition::clamped(-16.67), Some(RevealPosition::MIN));
        assert_eq!(RevealPosition::clamped(250.0), Some(RevealPosition::MAX));
        assert_eq!(
            RevealPosition::clamped(f64::NEG_INFINITY),
            Some(RevealPosition::MIN)
        );
        assert_eq!(RevealPosition::clamped(f64::NAN), None);
    }

    #[test]
    fn renders_css_percent() {
        assert_eq!(RevealPosition::HALF.to_string(), "50%");
        assert_eq!(RevealPosition::MIN.to_string(), "0%");
        assert_eq!(
            RevealPosition::clamped(100.0 / 3.0).unwrap().to_string(),
            "33.333333333333336%"
        );
    }

    #[test]
    fn negative_zero_is_normalized() {
        let p = RevealPosition::clamped(-0.0).unwrap();
        assert_eq!(p.to_string(), "0%");
        assert!(p.percent().is_sign_positive(), "sign bit cleared");
    }
}
