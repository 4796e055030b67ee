// Copyright 2026 the Deckswap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Configuration for the deck scheduler and content rotator.
//!
//! All configuration is plain `Copy` data with a [`Default`] and, where the
//! product has more than one flavor, named presets.

use crate::ease::Easing;
use crate::geometry::DeckGeometry;
use crate::time::Duration;

/// Timing and distance constants for the advance choreography.
///
/// Durations are in seconds so they read the way the motion was designed;
/// the deck converts them once per run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChoreographyTimings {
    /// Duration of the front card's drop.
    pub drop_secs: f64,
    /// Duration of each promoted card's move to its new slot.
    pub promote_secs: f64,
    /// Base duration of the retiring card's return into the back slot.
    pub return_secs: f64,
    /// Fraction of the drop that promotion overlaps (`0.0..=1.0`).
    pub promote_overlap: f64,
    /// Delay between successive promoted cards.
    pub stagger_secs: f64,
    /// How far the front card falls during the drop.
    pub drop_distance: f64,
    /// How far below the back slot the retiring card re-enters.
    pub return_offset: f64,
    /// Multiplier applied to [`return_secs`](Self::return_secs).
    pub return_speedup: f64,
}

impl ChoreographyTimings {
    /// Offset of the promote phase from the start of a run.
    #[must_use]
    pub fn promote_at(&self) -> Duration {
        let overlap = self.promote_overlap.clamp(0.0, 1.0);
        Duration::from_secs_f64(self.drop_secs * (1.0 - overlap))
    }

    /// Offset of the return phase: the end of the drop.
    #[must_use]
    pub fn return_at(&self) -> Duration {
        Duration::from_secs_f64(self.drop_secs)
    }

    /// Length of the drop tween.
    #[must_use]
    pub fn drop_duration(&self) -> Duration {
        Duration::from_secs_f64(self.drop_secs)
    }

    /// Length of each promote tween.
    #[must_use]
    pub fn promote_duration(&self) -> Duration {
        Duration::from_secs_f64(self.promote_secs)
    }

    /// Length of the return tween.
    #[must_use]
    pub fn return_duration(&self) -> Duration {
        Duration::from_secs_f64(self.return_secs * self.return_speedup)
    }

    /// Start offset of the `i`th promoted card, relative to the promote
    /// phase.
    #[must_use]
    pub fn stagger(&self, i: usize) -> Duration {
        let rank = u64::try_from(i).unwrap_or(u64::MAX);
        Duration::from_secs_f64(self.stagger_secs).saturating_mul(rank)
    }
}

impl Default for ChoreographyTimings {
    fn default() -> Self {
        Self {
            drop_secs: 0.6,
            promote_secs: 0.6,
            return_secs: 0.6,
            promote_overlap: 0.4,
            stagger_secs: 0.08,
            drop_distance: 200.0,
            return_offset: 100.0,
            return_speedup: 0.8,
        }
    }
}

/// Configuration for a [`DeckScheduler`](crate::deck::DeckScheduler).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DeckConfig {
    /// Slot geometry.
    pub geometry: DeckGeometry,
    /// Easing used by every deck tween.
    pub easing: Easing,
    /// Auto-advance interval. `None` (or zero) disables the internal timer;
    /// the deck then only moves on [`next`](crate::deck::DeckScheduler::next).
    pub interval: Option<Duration>,
    /// Whether pointer hover freezes the deck.
    pub pause_on_hover: bool,
    /// Choreography constants.
    pub timings: ChoreographyTimings,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            geometry: DeckGeometry::default(),
            easing: Easing::Power2Out,
            interval: Some(Duration::from_millis(5_000)),
            pause_on_hover: false,
            timings: ChoreographyTimings::default(),
        }
    }
}

/// The host's responsive breakpoint, read but never changed by the core.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Viewport {
    /// Desktop-width layout.
    #[default]
    Wide,
    /// Phone-width layout.
    Narrow,
}

impl Viewport {
    /// Widths below this many CSS pixels are narrow.
    pub const NARROW_BELOW_PX: f64 = 768.0;

    /// Classifies a viewport width in CSS pixels.
    #[must_use]
    pub fn from_width(width_px: f64) -> Self {
        if width_px < Self::NARROW_BELOW_PX {
            Self::Narrow
        } else {
            Self::Wide
        }
    }
}

/// Configuration for a [`ContentRotator`](crate::rotator::ContentRotator).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RotatorConfig {
    /// Base deck configuration. Its geometry is replaced by the preset for
    /// the current [`Viewport`].
    pub deck: DeckConfig,
    /// Geometry used on [`Viewport::Wide`].
    pub wide: DeckGeometry,
    /// Geometry used on [`Viewport::Narrow`].
    pub narrow: DeckGeometry,
    /// Cadence at which the rotator calls the deck's `next()`.
    pub auto_interval: Option<Duration>,
    /// Info panel fade-out duration in seconds.
    pub fade_out_secs: f64,
    /// Info panel fade-in duration in seconds.
    pub fade_in_secs: f64,
    /// Vertical offset of the hidden panel.
    pub fade_offset: f64,
    /// Easing for both panel fades.
    pub fade_easing: Easing,
}

impl RotatorConfig {
    /// The service showcase: the rotator drives the deck every five seconds,
    /// the deck's own timer is off, and hover freezes the deck.
    #[must_use]
    pub fn showcase() -> Self {
        Self {
            deck: DeckConfig {
                interval: None,
                pause_on_hover: true,
                ..DeckConfig::default()
            },
            wide: DeckGeometry::wide(),
            narrow: DeckGeometry::narrow(),
            auto_interval: Some(Duration::from_millis(5_000)),
            fade_out_secs: 0.3,
            fade_in_secs: 0.4,
            fade_offset: 20.0,
            fade_easing: Easing::Power2Out,
        }
    }

    /// The deck configuration for `viewport`.
    #[must_use]
    pub fn deck_for(&self, viewport: Viewport) -> DeckConfig {
        DeckConfig {
            geometry: match viewport {
                Viewport::Wide => self.wide,
                Viewport::Narrow => self.narrow,
            },
            ..self.deck
        }
    }
}

impl Default for RotatorConfig {
    fn default() -> Self {
        Self::showcase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_phase_offsets() {
        let t = ChoreographyTimings::default();
        assert_eq!(t.promote_at(), Duration::from_millis(360));
        assert_eq!(t.return_at(), Duration::from_millis(600));
        assert_eq!(t.return_duration(), Duration::from_millis(480));
        assert_eq!(t.stagger(2), Duration::from_millis(160));
        assert_eq!(t.stagger(0), Duration::ZERO);
    }

    #[test]
    fn overlap_is_clamped() {
        let t = ChoreographyTimings {
            promote_overlap: 3.0,
            ..ChoreographyTimings::default()
        };
        assert_eq!(t.promote_at(), Duration::ZERO);
    }

    #[test]
    fn viewport_breakpoint() {
        assert_eq!(Viewport::from_width(767.9), Viewport::Narrow);
        assert_eq!(Viewport::from_width(768.0), Viewport::Wide);
    }

    #[test]
    fn deck_for_viewport_swaps_geometry_only() {
        let cfg = RotatorConfig::showcase();
        let narrow = cfg.deck_for(Viewport::Narrow);
        assert_eq!(narrow.geometry, DeckGeometry::narrow());
        assert_eq!(narrow.interval, None);
        assert!(narrow.pause_on_hover);
        assert_eq!(cfg.deck_for(Viewport::Wide).geometry, DeckGeometry::wide());
    }
}
