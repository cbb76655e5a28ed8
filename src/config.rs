// SPDX-License-Identifier: MIT
//
// Copyright (c) 2025 Alexandre Severino
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

//! Tolerances and the tuned constants used by the classifier and intersector.

use crate::error::{BrepError, BrepResult};

/// Values below this are treated as zero when deciding a sign.
pub const SMALL: f64 = 1.0e-77;

/// Probe directions for the Jordan-curve fallback, tried in order.
///
/// The order is empirically tuned and must be kept.
pub const PROBE_DIRECTIONS: [[f64; 3]; 10] = [
    [3.0, 2.0, 1.0],
    [1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, 0.0, 1.0],
    [1.0, 1.0, 1.0],
    [-3.0, -2.0, -1.0],
    [-1.0, 0.0, 0.0],
    [0.0, -1.0, 0.0],
    [0.0, 0.0, -1.0],
    [-1.0, -1.0, -1.0],
];

/// Fractions along an edge probed when both endpoints are on the target shell.
pub const EDGE_PROBE_FRACTIONS: [f64; 3] = [0.5, 0.1, 0.9];

/// Numeric slop used for every topological decision.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tolerance {
    /// Two points closer than this are the same point.
    pub dist: f64,
    /// `dist * dist`.
    pub dist_sq: f64,
    /// Cosines with magnitude at most this are perpendicular.
    pub perp: f64,
    /// Cosines with magnitude at least this are parallel (`1 - perp`).
    pub para: f64,
}

impl Tolerance {
    pub fn new(dist: f64, perp: f64) -> BrepResult<Self> {
        if !dist.is_finite() || dist <= 0.0 {
            return Err(BrepError::InvalidTolerance(format!(
                "distance tolerance must be positive and finite, got {dist}"
            )));
        }
        if !perp.is_finite() || perp <= 0.0 || perp >= 1.0 {
            return Err(BrepError::InvalidTolerance(format!(
                "perpendicular tolerance must lie in (0, 1), got {perp}"
            )));
        }
        Ok(Tolerance {
            dist,
            dist_sq: dist * dist,
            perp,
            para: 1.0 - perp,
        })
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Tolerance {
            dist: 0.0005,
            dist_sq: 0.0005 * 0.0005,
            perp: 1.0e-6,
            para: 1.0 - 1.0e-6,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_consistent() {
        let tol = Tolerance::default();
        let rebuilt = Tolerance::new(tol.dist, tol.perp).unwrap();
        assert_eq!(tol, rebuilt);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(Tolerance::new(0.0, 1e-6).is_err());
        assert!(Tolerance::new(-1.0, 1e-6).is_err());
        assert!(Tolerance::new(f64::NAN, 1e-6).is_err());
        assert!(Tolerance::new(1e-3, 0.0).is_err());
        assert!(Tolerance::new(1e-3, 1.0).is_err());
    }

    #[test]
    fn test_probe_directions_are_non_degenerate() {
        for d in PROBE_DIRECTIONS {
            assert!(d.iter().map(|c| c * c).sum::<f64>() > 0.5);
        }
    }
}
