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

use crate::geometry::{point::Point3, ray::Ray};

/// An axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Point3,
    pub max: Point3,
}

impl Aabb {
    pub fn new(min: Point3, max: Point3) -> Self {
        Aabb { min, max }
    }

    /// Build the smallest AABB containing two points.
    pub fn from_points(a: &Point3, b: &Point3) -> Self {
        let mins = std::array::from_fn(|i| a[i].min(b[i]));
        let maxs = std::array::from_fn(|i| a[i].max(b[i]));
        Aabb::new(Point3::from_vals(mins), Point3::from_vals(maxs))
    }

    /// Box around every point of `points`, `None` when empty.
    pub fn around<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Point3>,
    {
        let mut it = points.into_iter();
        let first = it.next()?;
        let mut b = Aabb::new(*first, *first);
        for p in it {
            b.expand(p);
        }
        Some(b)
    }

    /// Cube of half-size `r` around `p`.
    pub fn around_point(p: &Point3, r: f64) -> Self {
        Aabb::new(
            Point3::from_vals(p.coords.map(|c| c - r)),
            Point3::from_vals(p.coords.map(|c| c + r)),
        )
    }

    pub fn expand(&mut self, p: &Point3) {
        for i in 0..3 {
            self.min[i] = self.min[i].min(p[i]);
            self.max[i] = self.max[i].max(p[i]);
        }
    }

    pub fn union(&self, other: &Aabb) -> Aabb {
        let mins = std::array::from_fn(|i| self.min[i].min(other.min[i]));
        let maxs = std::array::from_fn(|i| self.max[i].max(other.max[i]));
        Aabb::new(Point3::from_vals(mins), Point3::from_vals(maxs))
    }

    /// Does this AABB intersect `other`?
    pub fn intersects(&self, other: &Aabb) -> bool {
        (0..3).all(|i| self.max[i] >= other.min[i] && other.max[i] >= self.min[i])
    }

    /// True when the boxes are separated by more than `tol` on some axis.
    pub fn disjoint_tol(&self, other: &Aabb, tol: f64) -> bool {
        (0..3).any(|i| self.min[i] > other.max[i] + tol || other.min[i] > self.max[i] + tol)
    }

    /// True when `p` is inside the box grown by `tol`.
    pub fn contains_tol(&self, p: &Point3, tol: f64) -> bool {
        (0..3).all(|i| p[i] >= self.min[i] - tol && p[i] <= self.max[i] + tol)
    }

    /// True when `other` fits inside the box grown by `tol`.
    pub fn contains_box_tol(&self, other: &Aabb, tol: f64) -> bool {
        (0..3).all(|i| other.min[i] >= self.min[i] - tol && other.max[i] <= self.max[i] + tol)
    }

    /// Center coordinate along axis `i`.
    pub fn center(&self, i: usize) -> f64 {
        0.5 * (self.min[i] + self.max[i])
    }

    /// Length along axis `i`.
    pub fn extent(&self, i: usize) -> f64 {
        self.max[i] - self.min[i]
    }

    /// Return the axis index with largest extent.
    pub fn longest_axis(&self) -> usize {
        let mut best_i = 0usize;
        let mut best = self.extent(0);
        for i in 1..3 {
            let e = self.extent(i);
            if e > best {
                best_i = i;
                best = e;
            }
        }
        best_i
    }

    pub fn max_extent(&self) -> f64 {
        self.extent(self.longest_axis())
    }

    /// Slab test of the infinite line carrying `ray` against the box grown by
    /// `tol`. Returns the entry and exit parameters.
    pub fn line_span(&self, ray: &Ray, tol: f64) -> Option<(f64, f64)> {
        let mut t_min = f64::NEG_INFINITY;
        let mut t_max = f64::INFINITY;
        for i in 0..3 {
            let lo = self.min[i] - tol;
            let hi = self.max[i] + tol;
            let o = ray.origin[i];
            let d = ray.dir[i];
            if d == 0.0 {
                if o < lo || o > hi {
                    return None;
                }
                continue;
            }
            let inv = 1.0 / d;
            let (t0, t1) = {
                let a = (lo - o) * inv;
                let b = (hi - o) * inv;
                if a <= b { (a, b) } else { (b, a) }
            };
            t_min = t_min.max(t0);
            t_max = t_max.min(t1);
            if t_min > t_max {
                return None;
            }
        }
        Some((t_min, t_max))
    }
}
