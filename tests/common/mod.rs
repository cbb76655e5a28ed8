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

#![allow(dead_code)]

use brep_classify::topology::primitives::{add_box_faces, add_prism, box_vertices};
use brep_classify::{FaceId, Model, ModelBuilder, Point3, ShellId, VertexId};

pub const L_OUTLINE: [(f64, f64); 8] = [
    (0.0, 0.0),
    (10.0, 0.0),
    (10.0, 5.0),
    (15.0, 5.0),
    (15.0, 15.0),
    (5.0, 15.0),
    (5.0, 10.0),
    (0.0, 10.0),
];

pub fn p(x: f64, y: f64, z: f64) -> Point3 {
    Point3::new(x, y, z)
}

pub struct Cube {
    pub shell: ShellId,
    pub v: [VertexId; 8],
    pub faces: [FaceId; 6],
}

/// An axis-aligned box in its own shell and region.
pub fn cube(b: &mut ModelBuilder, min: Point3, max: Point3) -> Cube {
    let r = b.add_region();
    let shell = b.add_shell(r).unwrap();
    let v = box_vertices(b, min, max);
    let faces = add_box_faces(b, shell, &v).unwrap();
    Cube { shell, v, faces }
}

/// The 0..10 cube alone.
pub fn unit_cube() -> (Model, Cube) {
    let mut b = ModelBuilder::new();
    let c = cube(&mut b, p(0.0, 0.0, 0.0), p(10.0, 10.0, 10.0));
    (b.finish().unwrap(), c)
}

/// The 0..10 cube and a second box over 10..20 in x sharing its +x face
/// vertices, so the two shells share the edges of that face.
pub fn twin_cubes() -> (Model, Cube, Cube) {
    let mut b = ModelBuilder::new();
    let a = cube(&mut b, p(0.0, 0.0, 0.0), p(10.0, 10.0, 10.0));
    let r = b.add_region();
    let shell = b.add_shell(r).unwrap();
    let v: [VertexId; 8] = std::array::from_fn(|i| {
        if i & 1 == 0 {
            a.v[i | 1]
        } else {
            let y = if i & 2 != 0 { 10.0 } else { 0.0 };
            let z = if i & 4 != 0 { 10.0 } else { 0.0 };
            b.add_vertex(p(20.0, y, z))
        }
    });
    let faces = add_box_faces(&mut b, shell, &v).unwrap();
    let twin = Cube { shell, v, faces };
    (b.finish().unwrap(), a, twin)
}

/// An L-shaped prism over [`L_OUTLINE`] from z = 0 to 10 in a fresh shell.
pub fn l_prism(b: &mut ModelBuilder) -> (ShellId, Vec<VertexId>, Vec<VertexId>) {
    let r = b.add_region();
    let shell = b.add_shell(r).unwrap();
    let (bottom, top) = add_prism(b, shell, &L_OUTLINE, 0.0, 10.0).unwrap();
    (shell, bottom, top)
}
