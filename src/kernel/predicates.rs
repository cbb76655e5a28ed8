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

use crate::{config::Tolerance, geometry::point::Point3};

/// Points within `tol.dist` of each other.
pub fn are_equal(p1: &Point3, p2: &Point3, tol: &Tolerance) -> bool {
    p1.distance_squared_to(p2) <= tol.dist_sq
}

/// Cosine of the angle between two unit vectors says perpendicular.
pub fn are_perpendicular(cos: f64, tol: &Tolerance) -> bool {
    cos.abs() <= tol.perp
}

/// Cosine of the angle between two unit vectors says parallel.
pub fn are_parallel(cos: f64, tol: &Tolerance) -> bool {
    cos.abs() >= tol.para
}
