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

mod common;

use brep_classify::topology::primitives::add_uv_sphere;
use brep_classify::topology::{LoopBody, LoopOrientation, VertexUse};
use brep_classify::{BrepError, FaceUse, ModelBuilder, Orientation};
use common::{p, twin_cubes, unit_cube};

#[test]
fn test_cube_counts() {
    let (model, c) = unit_cube();
    assert_eq!(model.vertex_count(), 8);
    assert_eq!(model.edge_count(), 12);
    assert_eq!(model.face_count(), 6);
    assert!(c.faces.iter().all(|f| model.face(*f).is_three_manifold()));
    let bbox = model.bbox();
    assert_eq!(bbox.max, p(10.0, 10.0, 10.0));
}

#[test]
fn test_loop_walk() {
    let (model, c) = unit_cube();
    let lp = model.face(c.faces[0]).loops[0];
    assert_eq!(model.loop_vertices(lp).as_slice(), &[c.v[0], c.v[2], c.v[3], c.v[1]]);
    let LoopBody::Edges(uses) = &model.lp(lp).body else {
        panic!("face loop without edges");
    };
    for eu in uses {
        let next = model.next_edge_use(*eu);
        assert_eq!(model.edge_use(*eu).to, model.edge_use(next).from);
        assert_eq!(model.prev_edge_use(next), *eu);
        assert_eq!(model.edge_use_face(*eu), Some(c.faces[0]));
        assert_eq!(model.edge_use_shell(*eu), c.shell);
    }
}

#[test]
fn test_left_vector_points_into_face() {
    let (model, c) = unit_cube();
    let lp = model.face(c.faces[0]).loops[0];
    let LoopBody::Edges(uses) = &model.lp(lp).body else {
        panic!("face loop without edges");
    };
    for eu in uses {
        let u = model.edge_use(*eu);
        let mid = model.point(u.from).midpoint(model.point(u.to));
        let left = model.left_vector(*eu).unwrap().unwrap();
        let probe = mid.offset(&left, 1.0);
        assert!((0.0..=10.0).contains(&probe.x()) && (0.0..=10.0).contains(&probe.y()));
        assert_eq!(probe.z(), 0.0);
    }
}

#[test]
fn test_shared_edges_between_shells() {
    let (model, a, b) = twin_cubes();
    assert_eq!(model.vertex_count(), 12);
    assert_eq!(model.edge_count(), 20);
    let shared = model.edges_between(a.v[1], a.v[3]);
    assert_eq!(shared.len(), 1);
    let shells: Vec<_> = model
        .edge(shared[0])
        .uses()
        .iter()
        .map(|u| model.edge_use_shell(*u))
        .collect();
    assert_eq!(shells.len(), 4);
    assert!(shells.contains(&a.shell) && shells.contains(&b.shell));
    assert!(
        model
            .vertex(a.v[1])
            .uses()
            .iter()
            .any(|vu| model.vertex_use_shell(*vu) == b.shell)
    );
}

#[test]
fn test_wire_topology() {
    let mut b = ModelBuilder::new();
    let r = b.add_region();
    let s = b.add_shell(r).unwrap();
    let v0 = b.add_vertex(p(0.0, 0.0, 0.0));
    let v1 = b.add_vertex(p(1.0, 0.0, 0.0));
    let v2 = b.add_vertex(p(2.0, 0.0, 0.0));
    let eu = b.add_wire_edge(s, v0, v1).unwrap();
    let lp = b.add_vertex_loop(s, v2).unwrap();
    b.add_lone_vertex(s, v2).unwrap();
    let model = b.finish().unwrap();

    assert_eq!(model.edge_use_face(eu), None);
    assert_eq!(model.edge_use_loop(eu), None);
    assert_eq!(model.left_vector(eu), Ok(None));
    assert!(model.lp(lp).is_wire());
    assert_eq!(model.loop_vertices(lp).as_slice(), &[v2]);
    assert!(model.vertex(v2).uses().contains(&VertexUse::Shell(s)));
    assert!(model.vertex(v2).uses().contains(&VertexUse::Loop(lp)));
}

#[test]
fn test_hole_loop() {
    let mut b = ModelBuilder::new();
    let r = b.add_region();
    let s = b.add_shell(r).unwrap();
    let outer: Vec<_> = [(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]
        .iter()
        .map(|&(x, y)| b.add_vertex(p(x, y, 0.0)))
        .collect();
    let hole: Vec<_> = [(4.0, 4.0), (6.0, 4.0), (6.0, 6.0), (4.0, 6.0)]
        .iter()
        .map(|&(x, y)| b.add_vertex(p(x, y, 0.0)))
        .collect();
    let f = b.add_face(s, &outer, &[hole]).unwrap();
    let model = b.finish().unwrap();

    let face = model.face(f);
    assert_eq!(face.loops.len(), 2);
    assert_eq!(model.lp(face.loops[0]).orientation, LoopOrientation::Outer);
    assert_eq!(model.lp(face.loops[1]).orientation, LoopOrientation::Hole);
    // a lone face has no neighbours across its edges
    assert!(!face.is_three_manifold());
}

#[test]
fn test_builder_rejects() {
    assert!(matches!(
        ModelBuilder::new().finish(),
        Err(BrepError::InvalidTopology(_))
    ));

    let mut b = ModelBuilder::new();
    let r = b.add_region();
    b.add_shell(r).unwrap();
    assert!(matches!(b.finish(), Err(BrepError::InvalidTopology(_))));

    let mut b = ModelBuilder::new();
    let r = b.add_region();
    let s = b.add_shell(r).unwrap();
    let v = b.add_vertex(p(0.0, 0.0, 0.0));
    let w = b.add_vertex(p(1.0, 0.0, 0.0));
    assert!(b.add_face(s, &[v, w], &[]).is_err());
    assert!(add_uv_sphere(&mut b, s, p(0.0, 0.0, 0.0), -1.0, 4, 6).is_err());
}

#[test]
fn test_face_use_orientation() {
    let (_, c) = unit_cube();
    let fu = FaceUse::same(c.faces[0]);
    assert_eq!(fu.orientation, Orientation::Same);
    assert_eq!(fu.mate().orientation, Orientation::Opposite);
    assert_eq!(fu.mate().mate(), fu);
    assert_eq!(Orientation::Opposite.flip(), Orientation::Same);
}
