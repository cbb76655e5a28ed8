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

use std::ops::{Add, Index, IndexMut, Sub};

use crate::geometry::vector::Vector3;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point3 {
    pub coords: [f64; 3],
}

/// A point in a face's projection plane.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Point3 { coords: [x, y, z] }
    }

    pub fn from_vals(vals: [f64; 3]) -> Self {
        Point3 { coords: vals }
    }

    pub fn x(&self) -> f64 {
        self.coords[0]
    }

    pub fn y(&self) -> f64 {
        self.coords[1]
    }

    pub fn z(&self) -> f64 {
        self.coords[2]
    }

    pub fn as_vector(&self) -> Vector3 {
        Vector3::from_vals(self.coords)
    }

    /// Vector from `self` to `other`.
    pub fn vector_to(&self, other: &Point3) -> Vector3 {
        other - self
    }

    /// `self + t * v`
    pub fn offset(&self, v: &Vector3, t: f64) -> Point3 {
        Point3::from_vals(std::array::from_fn(|i| self.coords[i] + t * v[i]))
    }

    pub fn distance_squared_to(&self, other: &Point3) -> f64 {
        (other - self).norm2()
    }

    pub fn distance_to(&self, other: &Point3) -> f64 {
        self.distance_squared_to(other).sqrt()
    }

    /// Point at parameter `t` on the segment from `self` to `other`.
    pub fn lerp(&self, other: &Point3, t: f64) -> Point3 {
        Point3::from_vals(std::array::from_fn(|i| {
            self.coords[i] + t * (other.coords[i] - self.coords[i])
        }))
    }

    pub fn midpoint(&self, other: &Point3) -> Point3 {
        self.lerp(other, 0.5)
    }

    /// Drops coordinate `axis`, keeping the other two in cyclic order.
    pub fn project_2d(&self, axis: usize) -> Point2 {
        let u = (axis + 1) % 3;
        let v = (axis + 2) % 3;
        Point2 {
            x: self.coords[u],
            y: self.coords[v],
        }
    }

    pub fn is_finite(&self) -> bool {
        self.coords.iter().all(|c| c.is_finite())
    }
}

impl Index<usize> for Point3 {
    type Output = f64;
    fn index(&self, i: usize) -> &Self::Output {
        &self.coords[i]
    }
}

impl IndexMut<usize> for Point3 {
    fn index_mut(&mut self, i: usize) -> &mut Self::Output {
        &mut self.coords[i]
    }
}

impl<'a, 'b> Sub<&'b Point3> for &'a Point3 {
    type Output = Vector3;
    fn sub(self, rhs: &'b Point3) -> Vector3 {
        Vector3::from_vals(std::array::from_fn(|i| self.coords[i] - rhs.coords[i]))
    }
}

impl Sub for Point3 {
    type Output = Vector3;
    fn sub(self, rhs: Point3) -> Vector3 {
        <&Point3 as Sub<&Point3>>::sub(&self, &rhs)
    }
}

impl<'a, 'b> Add<&'b Vector3> for &'a Point3 {
    type Output = Point3;
    fn add(self, rhs: &'b Vector3) -> Point3 {
        Point3::from_vals(std::array::from_fn(|i| self.coords[i] + rhs[i]))
    }
}

impl Add<Vector3> for Point3 {
    type Output = Point3;
    fn add(self, rhs: Vector3) -> Point3 {
        <&Point3 as Add<&Vector3>>::add(&self, &rhs)
    }
}

impl From<[f64; 3]> for Point3 {
    fn from(vals: [f64; 3]) -> Self {
        Point3::from_vals(vals)
    }
}
