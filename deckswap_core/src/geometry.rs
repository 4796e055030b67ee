// Copyright 2026 the Deckswap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Slot geometry for the depth-stacked deck.
//!
//! A slot is identified only by its rank: `0` is the front card, `N - 1` the
//! back. [`rest_pose`] derives the resting [`CardPose`] for a rank from the
//! three [`DeckGeometry`] scalars. It is the single source of slot
//! positions: initial layout, re-layout, and every promote/return tween
//! target all call it, so repeated cycles cannot drift.

use kurbo::Affine;

/// Geometry scalars shared by every slot in a deck.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DeckGeometry {
    /// Horizontal distance between adjacent slots. Depth spacing is derived
    /// from this as `1.2 × card_distance`.
    pub card_distance: f64,
    /// Vertical distance between adjacent slots (cards step upward).
    pub vertical_distance: f64,
    /// Vertical skew applied to every card, in degrees.
    pub skew_degrees: f64,
}

impl DeckGeometry {
    /// Ratio of depth spacing to horizontal spacing.
    pub const DEPTH_RATIO: f64 = 1.2;

    /// Tight stack used on narrow viewports.
    #[must_use]
    pub const fn narrow() -> Self {
        Self {
            card_distance: 20.0,
            vertical_distance: 30.0,
            skew_degrees: 1.0,
        }
    }

    /// Stack used on wide viewports.
    #[must_use]
    pub const fn wide() -> Self {
        Self {
            card_distance: 45.0,
            vertical_distance: 55.0,
            skew_degrees: 4.0,
        }
    }

    /// Replaces any non-finite scalar with its default value.
    ///
    /// This is the only validation geometry receives.
    #[must_use]
    pub fn sanitized(self) -> Self {
        let d = Self::default();
        let pick = |v: f64, fallback: f64| if v.is_finite() { v } else { fallback };
        Self {
            card_distance: pick(self.card_distance, d.card_distance),
            vertical_distance: pick(self.vertical_distance, d.vertical_distance),
            skew_degrees: pick(self.skew_degrees, d.skew_degrees),
        }
    }
}

impl Default for DeckGeometry {
    fn default() -> Self {
        Self {
            card_distance: 60.0,
            vertical_distance: 70.0,
            skew_degrees: 4.0,
        }
    }
}

/// The animated presentation state of one card.
///
/// Offsets are in host pixels relative to the deck anchor (the host applies
/// its own centering). Positive `y` points down, negative `z` away from the
/// viewer. Higher `z_index` draws on top.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CardPose {
    /// Horizontal offset.
    pub x: f64,
    /// Vertical offset.
    pub y: f64,
    /// Depth offset.
    pub z: f64,
    /// Vertical skew in degrees.
    pub skew_y: f64,
    /// Stacking order.
    pub z_index: i32,
}

impl CardPose {
    /// Converts the pose into a 3-D transform: translate, then skew.
    #[must_use]
    pub fn to_transform3d(&self) -> crate::transform::Transform3d {
        crate::transform::Transform3d::from_translation(self.x, self.y, self.z)
            * crate::transform::Transform3d::from_skew_y_degrees(self.skew_y)
    }

    /// Converts the pose into a 2-D affine, dropping depth.
    ///
    /// Hosts without a 3-D compositor use this together with
    /// [`z_index`](Self::z_index) for ordering.
    #[must_use]
    pub fn to_affine(&self) -> Affine {
        Affine::translate((self.x, self.y))
            * Affine::skew(0.0, libm::tan(self.skew_y.to_radians()))
    }
}

/// Returns the resting pose of the slot at `rank` in a deck of `total` cards.
///
/// This is a pure function of its inputs.
#[must_use]
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    reason = "deck sizes are tiny; stacking order fits in i32"
)]
pub fn rest_pose(rank: usize, total: usize, geometry: &DeckGeometry) -> CardPose {
    let r = rank as f64;
    CardPose {
        x: r * geometry.card_distance,
        y: -r * geometry.vertical_distance,
        z: -r * geometry.card_distance * DeckGeometry::DEPTH_RATIO,
        skew_y: geometry.skew_degrees,
        z_index: total as i32 - rank as i32,
    }
}
