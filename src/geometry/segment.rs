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

use crate::{
    config::{SMALL, Tolerance},
    geometry::{point::Point3, ray::Ray},
    kernel::predicates::are_parallel,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub a: Point3,
    pub b: Point3,
}

/// Where a point sits relative to a segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Proximity {
    /// Within tolerance of the segment interior; `t` is the parameter of the pca.
    OnSegment { t: f64, pca: Point3 },
    /// Within tolerance of `a`.
    AtA,
    /// Within tolerance of `b`.
    AtB,
    /// Projects before `a`; the pca is `a`.
    BeforeA { dist: f64 },
    /// Projects beyond `b`; the pca is `b`.
    BeyondB { dist: f64 },
    /// Projects onto the interior but off the segment.
    Beside { dist: f64, pca: Point3 },
}

impl Proximity {
    /// True for the three outcomes that put the point on the segment.
    pub fn is_touching(&self) -> bool {
        matches!(
            self,
            Proximity::OnSegment { .. } | Proximity::AtA | Proximity::AtB
        )
    }
}

/// Outcome of intersecting an infinite line with a segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineCrossing {
    /// `a` and `b` coincide.
    Degenerate,
    /// The line crosses the segment's carrier outside `[a, b]`.
    BeyondEnds,
    /// No intersection at all.
    Miss,
    /// The segment lies along the line.
    Collinear,
    /// Passes through `a` at line parameter `t`.
    AtA(f64),
    /// Passes through `b` at line parameter `t`.
    AtB(f64),
    /// Crosses the interior at line parameter `t`.
    Interior(f64),
}

impl Segment {
    pub fn new(a: &Point3, b: &Point3) -> Self {
        Self { a: *a, b: *b }
    }

    pub fn proximity(&self, p: &Point3, tol: &Tolerance) -> Proximity {
        if p.distance_squared_to(&self.a) <= tol.dist_sq {
            return Proximity::AtA;
        }
        if p.distance_squared_to(&self.b) <= tol.dist_sq {
            return Proximity::AtB;
        }

        let ab = &self.b - &self.a;
        let len2 = ab.norm2();
        let t = if len2 > SMALL {
            (p - &self.a).dot(&ab) / len2
        } else {
            0.0
        };

        if t < 0.0 {
            return Proximity::BeforeA {
                dist: p.distance_to(&self.a),
            };
        }
        if t > 1.0 {
            return Proximity::BeyondB {
                dist: p.distance_to(&self.b),
            };
        }

        let pca = self.a.offset(&ab, t);
        let dist = p.distance_to(&pca);
        if dist <= tol.dist {
            Proximity::OnSegment { t, pca }
        } else {
            Proximity::Beside { dist, pca }
        }
    }

    pub fn is_point_on(&self, p: &Point3, tol: &Tolerance) -> bool {
        self.proximity(p, tol).is_touching()
    }

    pub fn intersect_line(&self, ray: &Ray, tol: &Tolerance) -> LineCrossing {
        let e = &self.b - &self.a;
        if e.norm2() <= tol.dist_sq {
            return LineCrossing::Degenerate;
        }

        let da = ray.distance_to_point(&self.a);
        let db = ray.distance_to_point(&self.b);
        if da <= tol.dist && db <= tol.dist {
            return LineCrossing::Collinear;
        }
        if da <= tol.dist {
            return LineCrossing::AtA(ray.param_of(&self.a));
        }
        if db <= tol.dist {
            return LineCrossing::AtB(ray.param_of(&self.b));
        }

        // parallel but not along the line
        let cos = ray.dir.dot(&e) / e.norm2().sqrt();
        if are_parallel(cos, tol) {
            return LineCrossing::Miss;
        }
        let w = ray.dir.cross(&e);
        let w2 = w.norm2();

        let r = &self.a - &ray.origin;
        // gap between the two carrier lines
        if (r.dot(&w)).abs() / w2.sqrt() > tol.dist {
            return LineCrossing::Miss;
        }

        let t = r.cross(&e).dot(&w) / w2;
        let s = r.cross(&ray.dir).dot(&w) / w2;
        if s < 0.0 || s > 1.0 {
            LineCrossing::BeyondEnds
        } else {
            LineCrossing::Interior(t)
        }
    }
}
