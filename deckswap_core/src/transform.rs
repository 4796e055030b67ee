// Copyright 2026 the Deckswap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minimal column-major 4×4 transform for 3-D hosts.
//!
//! Card poses are authored as separate channels (see
//! [`CardPose`](crate::geometry::CardPose)). Hosts that composite in 3-D,
//! such as a CSS `matrix3d` writer or a `CATransform3D` setter, convert a
//! pose with [`CardPose::to_transform3d`](crate::geometry::CardPose::to_transform3d).

use core::ops::Mul;

/// A column-major 4×4 affine transform stored as `[[f64; 4]; 4]`.
///
/// Each inner array is one *column*, matching the layout of CSS `matrix3d()`
/// arguments.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform3d {
    /// Four columns, each a 4-element array `[x, y, z, w]`.
    pub cols: [[f64; 4]; 4],
}

impl Transform3d {
    /// The 4×4 identity matrix.
    pub const IDENTITY: Self = Self {
        cols: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    /// Returns column `i` (0-based).
    ///
    /// # Panics
    ///
    /// Panics if `i >= 4`.
    #[inline]
    #[must_use]
    pub const fn col(self, i: usize) -> [f64; 4] {
        self.cols[i]
    }

    /// Creates a pure translation transform.
    #[inline]
    #[must_use]
    pub const fn from_translation(x: f64, y: f64, z: f64) -> Self {
        Self {
            cols: [
                [1.0, 0.0, 0.0, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [x, y, z, 1.0],
            ],
        }
    }

    /// Creates a vertical skew (`skewY`) by the given angle in degrees.
    ///
    /// A point's y gains `tan(angle) * x`.
    #[inline]
    #[must_use]
    pub fn from_skew_y_degrees(degrees: f64) -> Self {
        let k = libm::tan(degrees.to_radians());
        Self {
            cols: [
                [1.0, k, 0.0, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    /// Returns the matrix as the 16 column-major values CSS `matrix3d()`
    /// expects.
    #[must_use]
    pub const fn to_css_matrix3d(self) -> [f64; 16] {
        let c = self.cols;
        [
            c[0][0], c[0][1], c[0][2], c[0][3], c[1][0], c[1][1], c[1][2], c[1][3], c[2][0],
            c[2][1], c[2][2], c[2][3], c[3][0], c[3][1], c[3][2], c[3][3],
        ]
    }

    /// Is every element of this transform [finite]?
    ///
    /// [finite]: f64::is_finite
    #[inline]
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.cols.iter().flatten().all(|v| v.is_finite())
    }
}

impl Default for Transform3d {
    #[inline]
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Transform3d {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        let a = &self.cols;
        let b = &rhs.cols;
        let mut out = [[0.0_f64; 4]; 4];
        for (j, col) in out.iter_mut().enumerate() {
            for (i, v) in col.iter_mut().enumerate() {
                *v = a[0][i] * b[j][0] + a[1][i] * b[j][1] + a[2][i] * b[j][2] + a[3][i] * b[j][3];
            }
        }
        Self { cols: out }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_multiply() {
        let t = Transform3d::from_translation(1.0, 2.0, 3.0);
        assert_eq!(Transform3d::IDENTITY * t, t);
        assert_eq!(t * Transform3d::IDENTITY, t);
        assert_eq!(Transform3d::default(), Transform3d::IDENTITY);
    }

    #[test]
    fn skew_then_translate_keeps_translation() {
        let combined =
            Transform3d::from_translation(60.0, -70.0, -72.0) * Transform3d::from_skew_y_degrees(45.0);
        assert_eq!(combined.col(3), [60.0, -70.0, -72.0, 1.0]);
        // tan(45°) lands in the x column's y component.
        assert!((combined.col(0)[1] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn zero_skew_is_identity() {
        assert_eq!(Transform3d::from_skew_y_degrees(0.0), Transform3d::IDENTITY);
    }

    #[test]
    fn css_matrix_is_column_major() {
        let m = Transform3d::from_translation(5.0, 6.0, 7.0).to_css_matrix3d();
        assert_eq!(&m[12..], &[5.0, 6.0, 7.0, 1.0]);
        assert_eq!(m[0], 1.0);
    }

    #[test]
    fn non_finite_detected() {
        let mut t = Transform3d::IDENTITY;
        assert!(t.is_finite());
        t.cols[2][1] = f64::NAN;
        assert!(!t.is_finite());
    }
}
