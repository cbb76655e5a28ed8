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

use std::ops::{Add, Index, IndexMut, Mul, Neg, Sub};

use num_traits::Zero;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vector3 {
    pub coords: [f64; 3],
}

impl Vector3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Vector3 { coords: [x, y, z] }
    }

    pub fn from_vals(vals: [f64; 3]) -> Self {
        Vector3 { coords: vals }
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

    pub fn dot(&self, other: &Vector3) -> f64 {
        self.coords[0] * other.coords[0]
            + self.coords[1] * other.coords[1]
            + self.coords[2] * other.coords[2]
    }

    pub fn cross(&self, other: &Vector3) -> Vector3 {
        let [ax, ay, az] = self.coords;
        let [bx, by, bz] = other.coords;
        Vector3::new(ay * bz - az * by, az * bx - ax * bz, ax * by - ay * bx)
    }

    pub fn norm2(&self) -> f64 {
        self.dot(self)
    }

    pub fn norm(&self) -> f64 {
        self.norm2().sqrt()
    }

    pub fn scale(&self, s: f64) -> Vector3 {
        Vector3::from_vals(self.coords.map(|c| c * s))
    }

    /// Unit vector in the same direction, or `None` for (near) zero vectors.
    pub fn normalized(&self) -> Option<Vector3> {
        let n = self.norm();
        if n.is_finite() && n > f64::MIN_POSITIVE {
            Some(self.scale(1.0 / n))
        } else {
            None
        }
    }

    /// Index of the component with the largest magnitude.
    pub fn dominant_axis(&self) -> usize {
        let a = self.coords.map(f64::abs);
        if a[0] >= a[1] && a[0] >= a[2] {
            0
        } else if a[1] >= a[2] {
            1
        } else {
            2
        }
    }

    pub fn is_finite(&self) -> bool {
        self.coords.iter().all(|c| c.is_finite())
    }
}

impl Index<usize> for Vector3 {
    type Output = f64;
    fn index(&self, i: usize) -> &Self::Output {
        &self.coords[i]
    }
}

impl IndexMut<usize> for Vector3 {
    fn index_mut(&mut self, i: usize) -> &mut Self::Output {
        &mut self.coords[i]
    }
}

impl Add for Vector3 {
    type Output = Vector3;
    fn add(self, rhs: Vector3) -> Vector3 {
        Vector3::from_vals(std::array::from_fn(|i| self.coords[i] + rhs.coords[i]))
    }
}

impl Sub for Vector3 {
    type Output = Vector3;
    fn sub(self, rhs: Vector3) -> Vector3 {
        Vector3::from_vals(std::array::from_fn(|i| self.coords[i] - rhs.coords[i]))
    }
}

impl Mul<f64> for Vector3 {
    type Output = Vector3;
    fn mul(self, rhs: f64) -> Vector3 {
        self.scale(rhs)
    }
}

impl Neg for Vector3 {
    type Output = Vector3;
    fn neg(self) -> Vector3 {
        self.scale(-1.0)
    }
}

impl Zero for Vector3 {
    fn zero() -> Self {
        Vector3 { coords: [0.0; 3] }
    }

    fn is_zero(&self) -> bool {
        self.coords.iter().all(|c| *c == 0.0)
    }
}

impl From<[f64; 3]> for Vector3 {
    fn from(vals: [f64; 3]) -> Self {
        Vector3::from_vals(vals)
    }
}
