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

//! Ready-made solids for tests and callers that need a quick model.

use std::f64::consts::PI;

use crate::{
    error::{BrepError, BrepResult},
    geometry::Point3,
    topology::{FaceId, ModelBuilder, ShellId, VertexId},
};

/// Vertex `x + 2y + 4z` of the box sits at the `max` corner along each set bit.
const BOX_FACES: [[usize; 4]; 6] = [
    [0, 2, 3, 1],
    [4, 5, 7, 6],
    [0, 1, 5, 4],
    [2, 6, 7, 3],
    [0, 4, 6, 2],
    [1, 3, 7, 5],
];

/// The eight corners of an axis-aligned box.
pub fn box_vertices(b: &mut ModelBuilder, min: Point3, max: Point3) -> [VertexId; 8] {
    std::array::from_fn(|i| {
        let pick = |axis: usize| {
            if i & (1 << axis) != 0 {
                max[axis]
            } else {
                min[axis]
            }
        };
        b.add_vertex(Point3::new(pick(0), pick(1), pick(2)))
    })
}

/// Six outward faces over corners laid out as [`box_vertices`] returns them.
pub fn add_box_faces(
    b: &mut ModelBuilder,
    shell: ShellId,
    v: &[VertexId; 8],
) -> BrepResult<[FaceId; 6]> {
    let mut faces = [FaceId(0); 6];
    for (slot, quad) in faces.iter_mut().zip(BOX_FACES.iter()) {
        *slot = b.add_face(shell, &quad.map(|i| v[i]), &[])?;
    }
    Ok(faces)
}

pub fn add_box(
    b: &mut ModelBuilder,
    shell: ShellId,
    min: Point3,
    max: Point3,
) -> BrepResult<[VertexId; 8]> {
    if (0..3).any(|i| min[i] >= max[i]) {
        return Err(BrepError::InvalidTopology(format!(
            "box corners {min:?} and {max:?} are not ordered"
        )));
    }
    let v = box_vertices(b, min, max);
    add_box_faces(b, shell, &v)?;
    Ok(v)
}

/// Extrudes a counter-clockwise outline in the xy plane from `z0` to `z1`.
/// Returns the bottom ring then the top ring of vertices.
pub fn add_prism(
    b: &mut ModelBuilder,
    shell: ShellId,
    outline: &[(f64, f64)],
    z0: f64,
    z1: f64,
) -> BrepResult<(Vec<VertexId>, Vec<VertexId>)> {
    if outline.len() < 3 || z0 >= z1 {
        return Err(BrepError::InvalidTopology(format!(
            "prism needs 3+ outline points and z0 < z1, got {} points over [{z0}, {z1}]",
            outline.len()
        )));
    }
    let bottom: Vec<_> = outline
        .iter()
        .map(|&(x, y)| b.add_vertex(Point3::new(x, y, z0)))
        .collect();
    let top: Vec<_> = outline
        .iter()
        .map(|&(x, y)| b.add_vertex(Point3::new(x, y, z1)))
        .collect();

    let floor: Vec<_> = bottom.iter().rev().copied().collect();
    b.add_face(shell, &floor, &[])?;
    b.add_face(shell, &top, &[])?;
    let n = outline.len();
    for i in 0..n {
        let j = (i + 1) % n;
        b.add_face(shell, &[bottom[i], bottom[j], top[j], top[i]], &[])?;
    }
    Ok((bottom, top))
}

/// A faceted sphere: triangle fans at the poles and planar quads between
/// `rings - 1` latitude rings of `segments` vertices each.
pub fn add_uv_sphere(
    b: &mut ModelBuilder,
    shell: ShellId,
    center: Point3,
    radius: f64,
    rings: usize,
    segments: usize,
) -> BrepResult<Vec<FaceId>> {
    if rings < 2 || segments < 3 || radius <= 0.0 {
        return Err(BrepError::InvalidTopology(format!(
            "sphere needs rings >= 2, segments >= 3 and a positive radius, got {rings}, {segments}, {radius}"
        )));
    }
    let at = |theta: f64, phi: f64| {
        Point3::new(
            center.x() + radius * theta.sin() * phi.cos(),
            center.y() + radius * theta.sin() * phi.sin(),
            center.z() + radius * theta.cos(),
        )
    };
    let north = b.add_vertex(at(0.0, 0.0));
    let south = b.add_vertex(at(PI, 0.0));
    // ring[i - 1] holds latitude i
    let ring: Vec<Vec<VertexId>> = (1..rings)
        .map(|i| {
            let theta = PI * i as f64 / rings as f64;
            (0..segments)
                .map(|j| b.add_vertex(at(theta, 2.0 * PI * j as f64 / segments as f64)))
                .collect()
        })
        .collect();

    let mut faces = Vec::with_capacity(rings * segments);
    let last = ring.len() - 1;
    for j in 0..segments {
        let k = (j + 1) % segments;
        faces.push(b.add_face(shell, &[north, ring[0][j], ring[0][k]], &[])?);
        for i in 0..last {
            faces.push(b.add_face(
                shell,
                &[ring[i][j], ring[i + 1][j], ring[i + 1][k], ring[i][k]],
                &[],
            )?);
        }
        faces.push(b.add_face(shell, &[ring[last][j], south, ring[last][k]], &[])?);
    }
    Ok(faces)
}
