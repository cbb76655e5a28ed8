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

use num_traits::Zero;

use crate::{
    config::SMALL,
    geometry::{point::Point3, ray::Ray, vector::Vector3},
};

/// `normal · x = d` with a unit `normal`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Plane {
    pub normal: Vector3,
    pub d: f64,
}

/// Outcome of intersecting a line with a plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LinePlane {
    /// Crosses the plane at parameter `t`.
    Crosses(f64),
    /// Parallel and within tolerance of the plane.
    InPlane,
    /// Parallel and off the plane.
    Parallel,
}

impl Plane {
    pub fn new(normal: Vector3, d: f64) -> Self {
        Plane { normal, d }
    }

    /// Newell's method; the normal follows the right-hand rule over `points`.
    pub fn from_polygon(points: &[Point3]) -> Option<Self> {
        if points.len() < 3 {
            return None;
        }
        let mut n = Vector3::zero();
        let mut centroid = Vector3::zero();
        for (i, a) in points.iter().enumerate() {
            let b = &points[(i + 1) % points.len()];
            n[0] += (a.y() - b.y()) * (a.z() + b.z());
            n[1] += (a.z() - b.z()) * (a.x() + b.x());
            n[2] += (a.x() - b.x()) * (a.y() + b.y());
            centroid = centroid + a.as_vector();
        }
        let normal = n.normalized()?;
        let centroid = centroid.scale(1.0 / points.len() as f64);
        Some(Plane::new(normal, normal.dot(&centroid)))
    }

    pub fn signed_distance(&self, p: &Point3) -> f64 {
        self.normal.dot(&p.as_vector()) - self.d
    }

    /// Intersect the infinite line carrying `ray` with the plane.
    pub fn intersect_line(&self, ray: &Ray, dist_tol: f64) -> LinePlane {
        let slant = self.normal.dot(&ray.dir);
        let offset = self.signed_distance(&ray.origin);
        if slant.abs() <= SMALL {
            if offset.abs() <= dist_tol {
                LinePlane::InPlane
            } else {
                LinePlane::Parallel
            }
        } else {
            LinePlane::Crosses(-offset / slant)
        }
    }
}
