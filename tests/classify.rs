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

use brep_classify::{
    BrepError, Class, ClassList, Classifier, Entity, ModelBuilder, PointMode, Tolerance,
};
use brep_classify::topology::primitives::add_box;
use common::{cube, l_prism, p, twin_cubes, unit_cube};

#[test]
fn test_point_in_cube() {
    let (model, c) = unit_cube();
    let cl = Classifier::new(&model, Tolerance::default());
    let full = PointMode::Full;

    assert_eq!(cl.classify_point(&p(5.0, 5.0, 5.0), c.shell, full), Ok(Class::Inside));
    assert_eq!(cl.classify_point(&p(15.0, 5.0, 5.0), c.shell, full), Ok(Class::Outside));
    assert_eq!(cl.classify_point(&p(10.5, 5.0, 5.0), c.shell, full), Ok(Class::Outside));
    assert_eq!(
        cl.classify_point(&p(5.0, 5.0, 5.0), c.shell, PointMode::InOrOut),
        Ok(Class::Inside)
    );
}

#[test]
fn test_point_on_boundary() {
    let (model, c) = unit_cube();
    let cl = Classifier::new(&model, Tolerance::default());
    for q in [
        p(5.0, 5.0, 0.0),
        p(10.0, 5.0, 5.0),
        p(3.0, 10.0, 7.0),
        p(0.0, 0.0, 5.0),
        p(10.0, 10.0, 10.0),
        p(5.0, 5.0, 10.0002),
    ] {
        assert_eq!(cl.classify_point(&q, c.shell, PointMode::Full), Ok(Class::OnAnti), "{q:?}");
    }
}

#[test]
fn test_corner_is_ambiguous_without_on() {
    let (model, c) = unit_cube();
    let corner = p(0.0, 0.0, 0.0);
    let strict = Classifier::new(&model, Tolerance::default());
    assert!(matches!(
        strict.classify_point(&corner, c.shell, PointMode::InOrOut),
        Err(BrepError::ProbeDirectionsExhausted { tries: 10, .. })
    ));
    let lenient = strict.allow_unknown(true);
    assert_eq!(
        lenient.classify_point(&corner, c.shell, PointMode::InOrOut),
        Ok(Class::Unknown)
    );
}

#[test]
fn test_point_classification_is_repeatable() {
    let (model, c) = unit_cube();
    let cl = Classifier::new(&model, Tolerance::default());
    for q in [p(2.0, 3.0, 4.0), p(-1.0, 5.0, 5.0), p(5.0, 0.0, 5.0)] {
        let first = cl.classify_point(&q, c.shell, PointMode::Full);
        assert_eq!(first, cl.classify_point(&q, c.shell, PointMode::Full));
    }
}

#[test]
fn test_shared_face_is_anti() {
    let (model, a, b) = twin_cubes();
    let cl = Classifier::new(&model, Tolerance::default());
    let list = cl.classify_shell(a.shell, b.shell).unwrap();

    let plus_x = model.face(a.faces[5]).loops[0];
    let minus_x = model.face(a.faces[4]).loops[0];
    assert_eq!(list.get(plus_x), Some(Class::OnAnti));
    assert_eq!(list.get(a.faces[5]), Some(Class::OnAnti));
    assert_eq!(list.get(minus_x), Some(Class::Outside));
    assert_eq!(list.get(a.faces[4]), Some(Class::Outside));
    // shared vertices and edges follow the loop
    for v in [a.v[1], a.v[3], a.v[5], a.v[7]] {
        assert_eq!(list.get(v), Some(Class::OnAnti));
    }
    for v in [a.v[0], a.v[2], a.v[4], a.v[6]] {
        assert_eq!(list.get(v), Some(Class::Outside));
    }
    let shared = model.edges_between(a.v[1], a.v[3])[0];
    assert_eq!(list.get(shared), Some(Class::OnAnti));
}

#[test]
fn test_face_classification_lists_loops() {
    let (model, a, b) = twin_cubes();
    let cl = Classifier::new(&model, Tolerance::default());
    let mut list = ClassList::new();
    let fc = cl.classify_face(a.faces[5], b.shell, &mut list).unwrap();
    assert_eq!(fc.face, a.faces[5]);
    assert_eq!(fc.loops.len(), 1);
    assert_eq!(fc.loops[0].1, Class::OnAnti);
    assert_eq!(fc.summary(), Class::OnAnti);

    let fc = cl.classify_face(a.faces[0], b.shell, &mut list).unwrap();
    assert_eq!(fc.summary(), Class::Outside);
}

#[test]
fn test_loop_against_own_shell() {
    let (model, a, _) = twin_cubes();
    let cl = Classifier::new(&model, Tolerance::default());
    let lp = model.face(a.faces[0]).loops[0];
    assert_eq!(
        cl.classify_loop(lp, a.shell, &mut ClassList::new()),
        Err(BrepError::SelfClassification { lp, shell: a.shell })
    );
}

#[test]
fn test_edge_not_cut() {
    let mut b = ModelBuilder::new();
    let a = cube(&mut b, p(0.0, 0.0, 0.0), p(10.0, 10.0, 10.0));
    let r = b.add_region();
    let wire = b.add_shell(r).unwrap();
    let start = b.add_vertex(p(5.0, 5.0, 5.0));
    let end = b.add_vertex(p(15.0, 5.0, 5.0));
    b.add_wire_edge(wire, start, end).unwrap();
    let model = b.finish().unwrap();

    let cl = Classifier::new(&model, Tolerance::default());
    match cl.classify_shell(wire, a.shell) {
        Err(BrepError::EdgeNotCut { start, end, .. }) => {
            assert_eq!(start, Class::Inside);
            assert_eq!(end, Class::Outside);
        }
        other => panic!("expected EdgeNotCut, got {other:?}"),
    }
}

#[test]
fn test_wire_edges() {
    let mut b = ModelBuilder::new();
    let a = cube(&mut b, p(0.0, 0.0, 0.0), p(10.0, 10.0, 10.0));
    let r = b.add_region();
    let wire = b.add_shell(r).unwrap();
    let far0 = b.add_vertex(p(30.0, 30.0, 30.0));
    let far1 = b.add_vertex(p(40.0, 30.0, 30.0));
    let far = b.add_wire_edge(wire, far0, far1).unwrap();
    let top_diagonal = b.add_wire_edge(wire, a.v[4], a.v[7]).unwrap();
    let through = b.add_wire_edge(wire, a.v[0], a.v[7]).unwrap();
    let model = b.finish().unwrap();

    let cl = Classifier::new(&model, Tolerance::default());
    let mut list = ClassList::new();
    assert_eq!(cl.classify_edge(far, a.shell, &mut list), Ok(Class::Outside));
    assert_eq!(list.get(far0), Some(Class::Outside));
    assert_eq!(list.get(far1), Some(Class::Outside));
    assert_eq!(cl.classify_edge(top_diagonal, a.shell, &mut list), Ok(Class::OnAnti));
    assert_eq!(list.get(a.v[4]), Some(Class::OnShared));
    assert_eq!(cl.classify_edge(through, a.shell, &mut list), Ok(Class::Inside));

    // cached verdicts come back unchanged
    assert_eq!(cl.classify_edge(through, a.shell, &mut list), Ok(Class::Inside));
    let edge = model.edge_use(through).edge;
    assert_eq!(list.get(Entity::Edge(edge)), Some(Class::Inside));
}

#[test]
fn test_loop_straddles() {
    let mut b = ModelBuilder::new();
    let a = cube(&mut b, p(0.0, 0.0, 0.0), p(10.0, 10.0, 10.0));
    let r = b.add_region();
    let wire = b.add_shell(r).unwrap();
    let inner = b.add_vertex(p(5.0, 5.0, 5.0));
    let outer = b.add_vertex(p(20.0, 5.0, 0.0));
    let lp = b.add_wire_loop(wire, &[inner, a.v[1], outer, a.v[3]]).unwrap();
    let model = b.finish().unwrap();

    let cl = Classifier::new(&model, Tolerance::default());
    assert!(matches!(
        cl.classify_loop(lp, a.shell, &mut ClassList::new()),
        Err(BrepError::LoopStraddles {
            inside: 2,
            outside: 2,
            ..
        })
    ));
}

#[test]
fn test_wire_loop_on_boundary_is_shared() {
    let mut b = ModelBuilder::new();
    let a = cube(&mut b, p(0.0, 0.0, 0.0), p(10.0, 10.0, 10.0));
    let r = b.add_region();
    let wire = b.add_shell(r).unwrap();
    let lp = b.add_wire_loop(wire, &[a.v[0], a.v[1], a.v[3]]).unwrap();
    let dot = b.add_vertex_loop(wire, a.v[6]).unwrap();
    let model = b.finish().unwrap();

    let cl = Classifier::new(&model, Tolerance::default());
    let mut list = ClassList::new();
    assert_eq!(cl.classify_loop(lp, a.shell, &mut list), Ok(Class::OnShared));
    assert_eq!(cl.classify_loop(dot, a.shell, &mut list), Ok(Class::OnShared));
}

#[test]
fn test_nested_box_is_inside() {
    let mut b = ModelBuilder::new();
    let outer = cube(&mut b, p(0.0, 0.0, 0.0), p(10.0, 10.0, 10.0));
    let inner = cube(&mut b, p(4.0, 4.0, 4.0), p(6.0, 6.0, 6.0));
    let model = b.finish().unwrap();

    let cl = Classifier::new(&model, Tolerance::default());
    let list = cl.classify_shell(inner.shell, outer.shell).unwrap();
    assert!(!list.is_empty());
    assert!(list.iter().all(|(_, class)| class == Class::Inside));

    let list = cl.classify_shell(outer.shell, inner.shell).unwrap();
    assert!(list.iter().all(|(_, class)| class == Class::Outside));
}

#[test]
fn test_bridge_face_inside_prism() {
    let mut b = ModelBuilder::new();
    let (prism, bottom, top) = l_prism(&mut b);
    let r = b.add_region();
    let bridge = b.add_shell(r).unwrap();
    let face = b
        .add_face(bridge, &[bottom[2], top[2], top[6], bottom[6]], &[])
        .unwrap();
    let model = b.finish().unwrap();

    let cl = Classifier::new(&model, Tolerance::default());
    let mut list = ClassList::new();
    let fc = cl.classify_face(face, prism, &mut list).unwrap();
    assert_eq!(fc.loops[0].1, Class::Inside);

    // the diagonals across the floor and roof lie on the prism's faces
    let floor = model.edges_between(bottom[2], bottom[6])[0];
    let roof = model.edges_between(top[2], top[6])[0];
    assert_eq!(list.get(floor), Some(Class::OnAnti));
    assert_eq!(list.get(roof), Some(Class::OnAnti));
    let riser = model.edges_between(bottom[2], top[2])[0];
    assert_eq!(list.get(riser), Some(Class::OnShared));
}

#[test]
fn test_prism_points() {
    let mut b = ModelBuilder::new();
    let (prism, _, _) = l_prism(&mut b);
    let model = b.finish().unwrap();
    let cl = Classifier::new(&model, Tolerance::default());
    let full = PointMode::Full;
    assert_eq!(cl.classify_point(&p(12.0, 12.0, 5.0), prism, full), Ok(Class::Inside));
    assert_eq!(cl.classify_point(&p(2.0, 2.0, 5.0), prism, full), Ok(Class::Inside));
    // the notch of the L
    assert_eq!(cl.classify_point(&p(12.0, 2.0, 5.0), prism, full), Ok(Class::Outside));
    assert_eq!(cl.classify_point(&p(2.0, 12.0, 5.0), prism, full), Ok(Class::Outside));
    assert_eq!(cl.classify_point(&p(12.0, 5.0, 5.0), prism, full), Ok(Class::OnAnti));
}

#[test]
fn test_point_in_loop() {
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
    let cl = Classifier::new(&model, Tolerance::default());
    let (outer_loop, hole_loop) = (model.face(f).loops[0], model.face(f).loops[1]);

    // the outer loop alone ignores the hole
    assert_eq!(cl.classify_point_in_loop(&p(5.0, 5.0, 0.0), outer_loop), Ok(Class::Inside));
    assert_eq!(cl.classify_point_in_loop(&p(1.0, 1.0, 0.0), outer_loop), Ok(Class::Inside));
    assert_eq!(cl.classify_point_in_loop(&p(20.0, 1.0, 0.0), outer_loop), Ok(Class::Outside));
    assert_eq!(cl.classify_point_in_loop(&p(5.0, 0.0, 0.0), outer_loop), Ok(Class::OnAnti));
    assert_eq!(cl.classify_point_in_loop(&p(0.0, 0.0, 0.0), outer_loop), Ok(Class::OnAnti));

    // a hole bounds the material around it
    assert_eq!(cl.classify_point_in_loop(&p(5.0, 5.0, 0.0), hole_loop), Ok(Class::Outside));
    assert_eq!(cl.classify_point_in_loop(&p(1.0, 1.0, 0.0), hole_loop), Ok(Class::Inside));
    assert_eq!(cl.classify_point_in_loop(&p(4.0, 5.0, 0.0), hole_loop), Ok(Class::OnAnti));

    assert!(matches!(
        cl.classify_point_in_loop(&p(5.0, 5.0, 1.0), outer_loop),
        Err(BrepError::PointOffFace { face, .. }) if face == f
    ));
}

#[test]
fn test_loop_in_loop() {
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
    let lid: Vec<_> = [(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)]
        .iter()
        .map(|&(x, y)| b.add_vertex(p(x, y, 5.0)))
        .collect();
    let other = b.add_face(s, &lid, &[]).unwrap();
    let a = b.add_vertex(p(20.0, 0.0, 0.0));
    let c = b.add_vertex(p(21.0, 0.0, 0.0));
    let d = b.add_vertex(p(20.0, 1.0, 0.0));
    let wire = b.add_wire_loop(s, &[a, c, d]).unwrap();
    let model = b.finish().unwrap();
    let cl = Classifier::new(&model, Tolerance::default());
    let (outer_loop, hole_loop) = (model.face(f).loops[0], model.face(f).loops[1]);
    let lid_loop = model.face(other).loops[0];

    assert_eq!(cl.classify_loop_in_loop(hole_loop, outer_loop), Ok(Class::Inside));
    // the outer boundary lies in the material around the hole
    assert_eq!(cl.classify_loop_in_loop(outer_loop, hole_loop), Ok(Class::Inside));
    assert_eq!(cl.classify_loop_in_loop(outer_loop, outer_loop), Ok(Class::OnShared));
    assert_eq!(
        cl.classify_loop_in_loop(outer_loop, lid_loop),
        Err(BrepError::LoopsInDifferentFaces {
            a: outer_loop,
            b: lid_loop
        })
    );
    assert_eq!(
        cl.classify_loop_in_loop(wire, outer_loop),
        Err(BrepError::LoopNotInFace { lp: wire })
    );
}

#[test]
fn test_shell_in_shell() {
    let mut b = ModelBuilder::new();
    let (prism, _, _) = l_prism(&mut b);
    let inside = cube(&mut b, p(2.0, 2.0, 2.0), p(4.0, 4.0, 4.0));
    // within the prism's box but in the notch of the L
    let notch = cube(&mut b, p(11.0, 1.0, 1.0), p(14.0, 4.0, 4.0));
    let r = b.add_region();
    let far = b.add_shell(r).unwrap();
    add_box(&mut b, far, p(30.0, 0.0, 0.0), p(31.0, 1.0, 1.0)).unwrap();
    let model = b.finish().unwrap();

    let cl = Classifier::new(&model, Tolerance::default());
    assert_eq!(cl.classify_shell_in_shell(inside.shell, prism), Ok(Class::Inside));
    assert_eq!(cl.classify_shell_in_shell(notch.shell, prism), Ok(Class::Outside));
    assert_eq!(cl.classify_shell_in_shell(far, prism), Ok(Class::Outside));
    assert_eq!(cl.classify_shell_in_shell(prism, inside.shell), Ok(Class::Outside));
    // every vertex lies on the shell itself
    assert_eq!(cl.classify_shell_in_shell(prism, prism), Ok(Class::Unknown));
}
