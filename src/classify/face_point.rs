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

use smallvec::SmallVec;

use crate::{
    config::Tolerance,
    error::{BrepError, BrepResult},
    geometry::{Point2, Point3, Segment},
    kernel::{orientation::crossings_odd, predicates::are_equal},
    topology::{EdgeUseId, FaceId, LoopBody, LoopId, Model, VertexId},
};

/// The boundary element a point touched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Touch {
    Vertex(VertexId),
    Edge(EdgeUseId),
}

/// Position of a point of a face's plane relative to the face's area.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Containment {
    Inside,
    On(Touch),
    Outside,
}

/// Locates `p`, assumed to lie in the plane of `face`, against the face's
/// loops. Vertices win over edges; the area test applies the even-odd rule
/// over every loop, so holes fall out without special casing.
pub fn locate_in_face(
    model: &Model,
    face: FaceId,
    p: &Point3,
    tol: &Tolerance,
) -> BrepResult<Containment> {
    let plane = model.face_plane(face)?;
    Ok(locate_in_loops(
        model,
        &model.face(face).loops,
        plane.normal.dominant_axis(),
        p,
        tol,
    ))
}

/// Locates `p` against the area enclosed by one face loop, ignoring the
/// loop's orientation and the face's other loops.
pub fn locate_in_loop(
    model: &Model,
    lp: LoopId,
    p: &Point3,
    tol: &Tolerance,
) -> BrepResult<Containment> {
    let face = model.lp(lp).face.ok_or(BrepError::LoopNotInFace { lp })?;
    let plane = model.face_plane(face)?;
    Ok(locate_in_loops(
        model,
        &[lp],
        plane.normal.dominant_axis(),
        p,
        tol,
    ))
}

fn locate_in_loops(
    model: &Model,
    loops: &[LoopId],
    axis: usize,
    p: &Point3,
    tol: &Tolerance,
) -> Containment {
    for lp in loops {
        for v in model.loop_vertices(*lp) {
            if are_equal(model.point(v), p, tol) {
                return Containment::On(Touch::Vertex(v));
            }
        }
    }
    for lp in loops {
        if let LoopBody::Edges(uses) = &model.lp(*lp).body {
            for eu in uses {
                let u = model.edge_use(*eu);
                let seg = Segment::new(model.point(u.from), model.point(u.to));
                if seg.is_point_on(p, tol) {
                    return Containment::On(Touch::Edge(*eu));
                }
            }
        }
    }

    let q = p.project_2d(axis);
    let mut inside = false;
    for lp in loops {
        let ring: SmallVec<[Point2; 8]> = model
            .loop_vertices(*lp)
            .iter()
            .map(|v| model.point(*v).project_2d(axis))
            .collect();
        if ring.len() >= 3 && crossings_odd(&ring, &q) {
            inside = !inside;
        }
    }
    if inside {
        Containment::Inside
    } else {
        Containment::Outside
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::ModelBuilder;

    #[test]
    fn square_with_hole() {
        let mut b = ModelBuilder::new();
        let r = b.add_region();
        let s = b.add_shell(r).unwrap();
        let outer: Vec<_> = [(0.0, 0.0), (6.0, 0.0), (6.0, 6.0), (0.0, 6.0)]
            .iter()
            .map(|&(x, y)| b.add_vertex(Point3::new(x, y, 1.0)))
            .collect();
        let hole: Vec<_> = [(2.0, 2.0), (2.0, 4.0), (4.0, 4.0), (4.0, 2.0)]
            .iter()
            .map(|&(x, y)| b.add_vertex(Point3::new(x, y, 1.0)))
            .collect();
        let f = b.add_face(s, &outer, &[hole.clone()]).unwrap();
        let m = b.finish().unwrap();
        let tol = Tolerance::default();
        let at = |x, y| locate_in_face(&m, f, &Point3::new(x, y, 1.0), &tol).unwrap();

        assert_eq!(at(1.0, 1.0), Containment::Inside);
        assert_eq!(at(3.0, 3.0), Containment::Outside);
        assert_eq!(at(7.0, 3.0), Containment::Outside);
        assert_eq!(at(6.0, 0.0), Containment::On(Touch::Vertex(outer[1])));
        assert_eq!(at(2.0, 2.0001), Containment::On(Touch::Vertex(hole[0])));
        assert!(matches!(at(3.0, 0.0), Containment::On(Touch::Edge(_))));
        assert!(matches!(at(3.0, 4.0), Containment::On(Touch::Edge(_))));

        let hole_loop = m.face(f).loops[1];
        let in_hole = |x, y| locate_in_loop(&m, hole_loop, &Point3::new(x, y, 1.0), &tol).unwrap();
        assert_eq!(in_hole(3.0, 3.0), Containment::Inside);
        assert_eq!(in_hole(1.0, 1.0), Containment::Outside);
    }
}
