// Copyright 2026 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Slider configuration.
//!
//! [`SliderConfig`] is page-wide: which selectors identify the parts of a
//! comparison, and the default behavior of every slider. Individual containers
//! may override behavior through [`ContainerOverrides`] (the web backend reads
//! these from `data-touch-scroll` and `data-initial-position`). Resolving a
//! config against a container's overrides yields the [`ControllerSettings`]
//! that one [`SliderController`](crate::controller::SliderController) runs
//! with.

use alloc::borrow::Cow;
use core::fmt;
use core::str::FromStr;

use crate::position::RevealPosition;
use crate::time::Duration;
use crate::trace::{ConfigFallbackEvent, Tracer};

/// Selectors that locate the parts of a comparison.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selectors {
    /// Matches each comparison container in the document.
    pub container: Cow<'static, str>,
    /// Matches the clipped overlay under a container.
    pub overlay: Cow<'static, str>,
    /// Matches the drag handle under a container.
    pub handle: Cow<'static, str>,
    /// Matches the top image under the overlay.
    pub image: Cow<'static, str>,
}

impl Selectors {
    /// The class-based convention used by the stock stylesheet.
    pub const DEFAULT: Self = Self {
        container: Cow::Borrowed(".comparison-container"),
        overlay: Cow::Borrowed(".comparison-overlay"),
        handle: Cow::Borrowed(".comparison-handle"),
        image: Cow::Borrowed("img"),
    };
}

impl Default for Selectors {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Whether a touch drag may also scroll the page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TouchScrollPolicy {
    /// Touch moves keep their default action; the page may scroll while the
    /// slider is being dragged.
    #[default]
    Allow,
    /// Touch moves on a dragging slider cancel the default action.
    Prevent,
}

impl FromStr for TouchScrollPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "allow" => Ok(Self::Allow),
            "prevent" => Ok(Self::Prevent),
            _ => Err(ConfigError::UnknownTouchScroll),
        }
    }
}

/// Parses a percentage such as `"30"`, `"30%"` or `" 12.5 % "`.
///
/// Finite values outside `0..=100` are clamped, matching what a drag to the
/// same spot would do.
///
/// # Errors
///
/// [`ConfigError::InvalidPercent`] if the text is not a finite number.
pub fn parse_percent(text: &str) -> Result<RevealPosition, ConfigError> {
    let trimmed = text.trim();
    let number = trimmed.strip_suffix('%').unwrap_or(trimmed).trim_end();
    let value: f64 = number.parse().map_err(|_| ConfigError::InvalidPercent)?;
    if !value.is_finite() {
        return Err(ConfigError::InvalidPercent);
    }
    RevealPosition::clamped(value).ok_or(ConfigError::InvalidPercent)
}

/// A configuration value could not be parsed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConfigError {
    /// Not a finite number, optionally suffixed with `%`.
    InvalidPercent,
    /// Neither `allow` nor `prevent`.
    UnknownTouchScroll,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPercent => f.write_str("expected a percentage between 0 and 100"),
            Self::UnknownTouchScroll => f.write_str("expected `allow` or `prevent`"),
        }
    }
}

impl core::error::Error for ConfigError {}

/// Page-wide slider configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct SliderConfig {
    /// How the parts of each comparison are found.
    pub selectors: Selectors,
    /// Default touch scroll behavior while dragging.
    pub touch_scroll: TouchScrollPolicy,
    /// Minimum interval between two applied moves of one slider.
    ///
    /// Zero applies every move event.
    pub move_throttle: Duration,
    /// Position written at attach time. `None` leaves the markup's own
    /// styling in place.
    pub initial_position: Option<RevealPosition>,
}

impl SliderConfig {
    /// Stock configuration: default selectors, page scroll allowed, no
    /// throttling, markup decides the initial position.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            selectors: Selectors::DEFAULT,
            touch_scroll: TouchScrollPolicy::Allow,
            move_throttle: Duration::ZERO,
            initial_position: None,
        }
    }

    /// Replaces the selectors.
    #[must_use]
    pub fn with_selectors(mut self, selectors: Selectors) -> Self {
        self.selectors = selectors;
        self
    }

    /// Sets the default touch scroll policy.
    #[must_use]
    pub fn with_touch_scroll(mut self, policy: TouchScrollPolicy) -> Self {
        self.touch_scroll = policy;
        self
    }

    /// Sets the move throttle interval.
    #[must_use]
    pub fn with_move_throttle(mut self, interval: Duration) -> Self {
        self.move_throttle = interval;
        self
    }

    /// Sets the position written when a slider attaches.
    #[must_use]
    pub fn with_initial_position(mut self, position: RevealPosition) -> Self {
        self.initial_position = Some(position);
        self
    }

    /// Settings for a container without overrides.
    #[must_use]
    pub fn settings(&self) -> ControllerSettings {
        self.resolve(ContainerOverrides::default())
    }

    /// Settings for a container, with its overrides taking precedence.
    #[must_use]
    pub fn resolve(&self, overrides: ContainerOverrides) -> ControllerSettings {
        ControllerSettings {
            touch_scroll: overrides.touch_scroll.unwrap_or(self.touch_scroll),
            move_throttle: self.move_throttle,
            initial_position: overrides.initial_position.or(self.initial_position),
        }
    }
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-container overrides of [`SliderConfig`] defaults.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ContainerOverrides {
    /// Overrides [`SliderConfig::touch_scroll`].
    pub touch_scroll: Option<TouchScrollPolicy>,
    /// Overrides [`SliderConfig::initial_position`].
    pub initial_position: Option<RevealPosition>,
}

impl ContainerOverrides {
    /// Attribute holding a [`TouchScrollPolicy`] override.
    pub const TOUCH_SCROLL_ATTRIBUTE: &'static str = "data-touch-scroll";
    /// Attribute holding an initial position override.
    pub const INITIAL_POSITION_ATTRIBUTE: &'static str = "data-initial-position";

    /// Reads overrides through `attribute`, which returns the raw value of a
    /// named attribute on the container.
    ///
    /// Unparsable values are traced and ignored, leaving the page default in
    /// effect for that field.
    pub fn from_attributes<V: AsRef<str>>(
        mut attribute: impl FnMut(&'static str) -> Option<V>,
        ordinal: u32,
        tracer: &mut Tracer<'_>,
    ) -> Self {
        let mut fallback = |attribute: &'static str, error: ConfigError| {
            tracer.config_fallback(&ConfigFallbackEvent {
                ordinal,
                attribute,
                error,
            });
        };

        let touch_scroll = attribute(Self::TOUCH_SCROLL_ATTRIBUTE).and_then(|raw| {
            raw.as_ref()
                .parse::<TouchScrollPolicy>()
                .map_err(|err| fallback(Self::TOUCH_SCROLL_ATTRIBUTE, err))
                .ok()
        });
        let initial_position = attribute(Self::INITIAL_POSITION_ATTRIBUTE).and_then(|raw| {
            parse_percent(raw.as_ref())
                .map_err(|err| fallback(Self::INITIAL_POSITION_ATTRIBUTE, err))
                .ok()
        });

        Self {
            touch_scroll,
            initial_position,
        }
    }
}

/// The resolved settings one controller runs with.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ControllerSettings {
    /// Touch scroll behavior while dragging.
    pub touch_scroll: TouchScrollPolicy,
    /// Minimum interval between applied moves.
    pub move_throttle: Duration,
    /// Position written at attach time.
    pub initial_position: Option<RevealPosition>,
}
