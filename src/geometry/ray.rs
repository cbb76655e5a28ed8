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
    error::{BrepError, BrepResult},
    geometry::{point::Point3, vector::Vector3},
};

/// `origin + t * dir` with a unit `dir`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Point3,
    pub dir: Vector3,
}

impl Ray {
    /// Builds a ray, normalising `dir`.
    pub fn new(origin: Point3, dir: Vector3) -> BrepResult<Self> {
        if !origin.is_finite() || !dir.is_finite() {
            return Err(BrepError::DegenerateRay);
        }
        let dir = dir.normalized().ok_or(BrepError::DegenerateRay)?;
        Ok(Ray { origin, dir })
    }

    pub fn point_at(&self, t: f64) -> Point3 {
        self.origin.offset(&self.dir, t)
    }

    /// Signed distance along the ray of the foot of `p`.
    pub fn param_of(&self, p: &Point3) -> f64 {
        (p - &self.origin).dot(&self.dir)
    }

    /// Distance from `p` to the infinite line carrying the ray.
    pub fn distance_to_point(&self, p: &Point3) -> f64 {
        (p - &self.origin).cross(&self.dir).norm()
    }
}
