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

use ahash::AHashMap;
use smallvec::SmallVec;

use crate::{
    error::{BrepError, BrepResult},
    geometry::{Aabb, Plane, Point3, aabb_tree::AabbTree},
    topology::{
        EdgeId, EdgeUseId, FaceId, LoopId, LoopOrientation, RegionId, ShellId, VertexId,
        model::{
            Edge, EdgeUse, EdgeUseOwner, Face, Loop, LoopBody, Model, Region, Shell, Surface,
            Vertex, VertexUse,
        },
    },
};

#[derive(Default)]
struct ShellDraft {
    region: usize,
    faces: Vec<FaceId>,
    wire_loops: Vec<LoopId>,
    wire_edges: Vec<EdgeUseId>,
    lone_vertices: Vec<VertexId>,
}

/// Assembles a [`Model`]. Edges are shared automatically: every use of the
/// same vertex pair, in any loop of any shell, lands on one edge.
#[derive(Default)]
pub struct ModelBuilder {
    vertices: Vec<Vertex>,
    edges: Vec<Edge>,
    edge_uses: Vec<EdgeUse>,
    loops: Vec<Loop>,
    faces: Vec<Face>,
    shells: Vec<ShellDraft>,
    regions: Vec<Vec<ShellId>>,
    edge_index: AHashMap<(VertexId, VertexId), SmallVec<[EdgeId; 2]>>,
}

impl ModelBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_vertex(&mut self, point: Point3) -> VertexId {
        let idx = self.vertices.len();
        self.vertices.push(Vertex {
            point,
            uses: SmallVec::new(),
        });
        VertexId(idx)
    }

    pub fn add_region(&mut self) -> RegionId {
        self.regions.push(Vec::new());
        RegionId(self.regions.len() - 1)
    }

    pub fn add_shell(&mut self, region: RegionId) -> BrepResult<ShellId> {
        let shells = self.regions.get_mut(region.0).ok_or_else(|| {
            BrepError::InvalidTopology(format!("unknown region {}", region.0))
        })?;
        let id = ShellId(self.shells.len());
        shells.push(id);
        self.shells.push(ShellDraft {
            region: region.0,
            ..Default::default()
        });
        Ok(id)
    }

    /// Adds a planar face. `outer` runs counter-clockwise about the outward
    /// normal; holes are re-oriented clockwise if given the other way.
    pub fn add_face(
        &mut self,
        shell: ShellId,
        outer: &[VertexId],
        holes: &[Vec<VertexId>],
    ) -> BrepResult<FaceId> {
        self.check_shell(shell)?;
        self.check_cycle(outer, 3)?;
        let outer_pts = self.points_of(outer);
        let plane = Plane::from_polygon(&outer_pts).ok_or_else(|| {
            BrepError::InvalidTopology(format!("outer loop {outer:?} spans no plane"))
        })?;

        let mut cycles: Vec<(SmallVec<[VertexId; 8]>, LoopOrientation)> =
            vec![(SmallVec::from_slice(outer), LoopOrientation::Outer)];
        for hole in holes {
            self.check_cycle(hole, 3)?;
            let mut cycle = SmallVec::from_slice(hole);
            let hole_plane = Plane::from_polygon(&self.points_of(hole)).ok_or_else(|| {
                BrepError::InvalidTopology(format!("hole loop {hole:?} spans no plane"))
            })?;
            if hole_plane.normal.dot(&plane.normal) > 0.0 {
                cycle.reverse();
            }
            cycles.push((cycle, LoopOrientation::Hole));
        }

        self.push_face(shell, Surface::Plane(plane), &outer_pts, cycles)
    }

    /// Adds a face on a non-planar surface. The model keeps its topology but
    /// the classifier and intersector refuse to evaluate it.
    pub fn add_parametric_face(
        &mut self,
        shell: ShellId,
        outer: &[VertexId],
        kind: &str,
    ) -> BrepResult<FaceId> {
        self.check_shell(shell)?;
        self.check_cycle(outer, 3)?;
        let outer_pts = self.points_of(outer);
        let cycles = vec![(SmallVec::from_slice(outer), LoopOrientation::Outer)];
        self.push_face(
            shell,
            Surface::Parametric {
                kind: kind.to_string(),
            },
            &outer_pts,
            cycles,
        )
    }

    /// A closed chain of edges that bounds no face.
    pub fn add_wire_loop(&mut self, shell: ShellId, vertices: &[VertexId]) -> BrepResult<LoopId> {
        self.check_shell(shell)?;
        self.check_cycle(vertices, 2)?;
        let lp = self.push_loop(shell, None, LoopOrientation::Outer, vertices);
        self.shells[shell.0].wire_loops.push(lp);
        Ok(lp)
    }

    /// A loop made of a single vertex.
    pub fn add_vertex_loop(&mut self, shell: ShellId, v: VertexId) -> BrepResult<LoopId> {
        self.check_shell(shell)?;
        self.check_vertex(v)?;
        let lp = LoopId(self.loops.len());
        self.loops.push(Loop {
            shell,
            face: None,
            orientation: LoopOrientation::Outer,
            body: LoopBody::Vertex(v),
        });
        self.vertices[v.0].uses.push(VertexUse::Loop(lp));
        self.shells[shell.0].wire_loops.push(lp);
        Ok(lp)
    }

    /// A dangling edge owned directly by the shell.
    pub fn add_wire_edge(
        &mut self,
        shell: ShellId,
        from: VertexId,
        to: VertexId,
    ) -> BrepResult<EdgeUseId> {
        self.check_shell(shell)?;
        self.check_cycle(&[from, to], 2)?;
        let eu = self.push_edge_use(from, to, EdgeUseOwner::Shell(shell));
        self.vertices[to.0].uses.push(VertexUse::Edge(eu));
        self.shells[shell.0].wire_edges.push(eu);
        Ok(eu)
    }

    pub fn add_lone_vertex(&mut self, shell: ShellId, v: VertexId) -> BrepResult<()> {
        self.check_shell(shell)?;
        self.check_vertex(v)?;
        self.vertices[v.0].uses.push(VertexUse::Shell(shell));
        self.shells[shell.0].lone_vertices.push(v);
        Ok(())
    }

    /// Validates the draft and computes the derived data: face manifold
    /// flags, shell boxes and face trees, region and model boxes.
    pub fn finish(mut self) -> BrepResult<Model> {
        if let Some(i) = self.vertices.iter().position(|v| !v.point.is_finite()) {
            return Err(BrepError::InvalidTopology(format!(
                "vertex {i} has a non-finite coordinate"
            )));
        }
        if self.regions.is_empty() {
            return Err(BrepError::InvalidTopology("model has no region".into()));
        }
        if let Some(r) = self.regions.iter().position(|r| r.is_empty()) {
            return Err(BrepError::InvalidTopology(format!("region {r} has no shell")));
        }

        // An edge is manifold for a face when another face of the same shell uses it too.
        for f in 0..self.faces.len() {
            let shell = self.faces[f].shell;
            let mut manifold = true;
            'loops: for lp in &self.faces[f].loops {
                let LoopBody::Edges(uses) = &self.loops[lp.0].body else {
                    continue;
                };
                for eu in uses {
                    let edge = &self.edges[self.edge_uses[eu.0].edge.0];
                    let count = edge
                        .uses
                        .iter()
                        .filter(|u| match self.edge_uses[u.0].owner {
                            EdgeUseOwner::Loop { lp, .. } => {
                                let l = &self.loops[lp.0];
                                l.face.is_some() && l.shell == shell
                            }
                            EdgeUseOwner::Shell(_) => false,
                        })
                        .count();
                    if count < 2 {
                        manifold = false;
                        break 'loops;
                    }
                }
            }
            self.faces[f].three_manifold = manifold;
        }

        let mut shells = Vec::with_capacity(self.shells.len());
        for (s, draft) in self.shells.drain(..).enumerate() {
            let mut points: Vec<&Point3> = Vec::new();
            for f in &draft.faces {
                for lp in &self.faces[f.0].loops {
                    collect_loop_points(&self.loops[lp.0], &self.edge_uses, &self.vertices, &mut points);
                }
            }
            for lp in &draft.wire_loops {
                collect_loop_points(&self.loops[lp.0], &self.edge_uses, &self.vertices, &mut points);
            }
            for eu in &draft.wire_edges {
                let u = &self.edge_uses[eu.0];
                points.push(&self.vertices[u.from.0].point);
                points.push(&self.vertices[u.to.0].point);
            }
            for v in &draft.lone_vertices {
                points.push(&self.vertices[v.0].point);
            }
            let bbox = Aabb::around(points).ok_or_else(|| {
                BrepError::InvalidTopology(format!("shell {s} is empty"))
            })?;
            let face_tree = AabbTree::build(
                draft
                    .faces
                    .iter()
                    .map(|f| (self.faces[f.0].bbox, *f))
                    .collect(),
            );
            shells.push(Shell {
                region: RegionId(draft.region),
                faces: draft.faces,
                wire_loops: draft.wire_loops,
                wire_edges: draft.wire_edges,
                lone_vertices: draft.lone_vertices,
                bbox,
                face_tree,
            });
        }

        let mut regions = Vec::with_capacity(self.regions.len());
        for ids in self.regions {
            let mut bbox = shells[ids[0].0].bbox;
            for s in &ids[1..] {
                bbox = bbox.union(&shells[s.0].bbox);
            }
            regions.push(Region { shells: ids, bbox });
        }
        let mut bbox = regions[0].bbox;
        for r in &regions[1..] {
            bbox = bbox.union(&r.bbox);
        }

        Ok(Model {
            vertices: self.vertices,
            edges: self.edges,
            edge_uses: self.edge_uses,
            loops: self.loops,
            faces: self.faces,
            shells,
            regions,
            edge_index: self.edge_index,
            bbox,
        })
    }

    fn check_shell(&self, shell: ShellId) -> BrepResult<()> {
        if shell.0 < self.shells.len() {
            Ok(())
        } else {
            Err(BrepError::InvalidTopology(format!("unknown shell {}", shell.0)))
        }
    }

    fn check_vertex(&self, v: VertexId) -> BrepResult<()> {
        if v.0 < self.vertices.len() {
            Ok(())
        } else {
            Err(BrepError::InvalidTopology(format!("unknown vertex {}", v.0)))
        }
    }

    /// A cycle needs `min` vertices, known ids and no zero-length step.
    fn check_cycle(&self, cycle: &[VertexId], min: usize) -> BrepResult<()> {
        if cycle.len() < min {
            return Err(BrepError::InvalidTopology(format!(
                "loop {cycle:?} needs at least {min} vertices"
            )));
        }
        for v in cycle {
            self.check_vertex(*v)?;
        }
        for (i, v) in cycle.iter().enumerate() {
            if *v == cycle[(i + 1) % cycle.len()] {
                return Err(BrepError::InvalidTopology(format!(
                    "loop {cycle:?} repeats vertex {} back to back",
                    v.0
                )));
            }
        }
        Ok(())
    }

    fn points_of(&self, cycle: &[VertexId]) -> Vec<Point3> {
        cycle.iter().map(|v| self.vertices[v.0].point).collect()
    }

    fn push_face(
        &mut self,
        shell: ShellId,
        surface: Surface,
        outer_pts: &[Point3],
        cycles: Vec<(SmallVec<[VertexId; 8]>, LoopOrientation)>,
    ) -> BrepResult<FaceId> {
        let face = FaceId(self.faces.len());
        let bbox = Aabb::around(outer_pts)
            .ok_or_else(|| BrepError::InvalidTopology("face without vertices".into()))?;
        let mut loops = SmallVec::new();
        for (cycle, orientation) in cycles {
            loops.push(self.push_loop(shell, Some(face), orientation, &cycle));
        }
        self.faces.push(Face {
            shell,
            surface,
            loops,
            bbox,
            three_manifold: false,
        });
        self.shells[shell.0].faces.push(face);
        Ok(face)
    }

    fn push_loop(
        &mut self,
        shell: ShellId,
        face: Option<FaceId>,
        orientation: LoopOrientation,
        cycle: &[VertexId],
    ) -> LoopId {
        let lp = LoopId(self.loops.len());
        let n = cycle.len();
        let uses = (0..n)
            .map(|i| {
                self.push_edge_use(cycle[i], cycle[(i + 1) % n], EdgeUseOwner::Loop { lp, index: i })
            })
            .collect();
        self.loops.push(Loop {
            shell,
            face,
            orientation,
            body: LoopBody::Edges(uses),
        });
        lp
    }

    /// Creates a use of the edge `from`-`to`, making the edge if it is new.
    /// Registers the use at its start vertex.
    fn push_edge_use(&mut self, from: VertexId, to: VertexId, owner: EdgeUseOwner) -> EdgeUseId {
        let key = if from <= to { (from, to) } else { (to, from) };
        let edge = match self.edge_index.get(&key).and_then(|e| e.first()) {
            Some(e) => *e,
            None => {
                let e = EdgeId(self.edges.len());
                self.edges.push(Edge {
                    vertices: [from, to],
                    uses: SmallVec::new(),
                });
                self.edge_index.entry(key).or_default().push(e);
                e
            }
        };
        let eu = EdgeUseId(self.edge_uses.len());
        self.edge_uses.push(EdgeUse {
            edge,
            from,
            to,
            owner,
        });
        self.edges[edge.0].uses.push(eu);
        self.vertices[from.0].uses.push(VertexUse::Edge(eu));
        eu
    }
}

fn collect_loop_points<'a>(
    lp: &Loop,
    edge_uses: &[EdgeUse],
    vertices: &'a [Vertex],
    out: &mut Vec<&'a Point3>,
) {
    match &lp.body {
        LoopBody::Edges(uses) => {
            out.extend(uses.iter().map(|eu| &vertices[edge_uses[eu.0].from.0].point))
        }
        LoopBody::Vertex(v) => out.push(&vertices[v.0].point),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(b: &mut ModelBuilder, z: f64) -> [VertexId; 4] {
        [
            b.add_vertex(Point3::new(0.0, 0.0, z)),
            b.add_vertex(Point3::new(1.0, 0.0, z)),
            b.add_vertex(Point3::new(1.0, 1.0, z)),
            b.add_vertex(Point3::new(0.0, 1.0, z)),
        ]
    }

    #[test]
    fn shares_edges_between_faces() {
        let mut b = ModelBuilder::new();
        let r = b.add_region();
        let s = b.add_shell(r).unwrap();
        let v = square(&mut b, 0.0);
        b.add_face(s, &v, &[]).unwrap();
        let rev: Vec<_> = v.iter().rev().copied().collect();
        b.add_face(s, &rev, &[]).unwrap();
        let m = b.finish().unwrap();
        assert_eq!(m.edge_count(), 4);
        assert!(m.face(FaceId(0)).is_three_manifold());
        assert_eq!(m.edges_between(v[1], v[0]).len(), 1);
    }

    #[test]
    fn single_face_is_not_manifold() {
        let mut b = ModelBuilder::new();
        let r = b.add_region();
        let s = b.add_shell(r).unwrap();
        let v = square(&mut b, 0.0);
        b.add_face(s, &v, &[]).unwrap();
        let m = b.finish().unwrap();
        assert!(!m.face(FaceId(0)).is_three_manifold());
        assert_eq!(m.next_edge_use(EdgeUseId(3)), EdgeUseId(0));
        assert_eq!(m.prev_edge_use(EdgeUseId(0)), EdgeUseId(3));
    }

    #[test]
    fn rejects_bad_input() {
        let mut b = ModelBuilder::new();
        assert!(matches!(
            b.add_shell(RegionId(3)),
            Err(BrepError::InvalidTopology(_))
        ));
        let r = b.add_region();
        let s = b.add_shell(r).unwrap();
        let v = square(&mut b, 0.0);
        assert!(b.add_face(s, &v[..2], &[]).is_err());
        assert!(b.add_face(s, &[v[0], v[1], v[1]], &[]).is_err());
        let collinear = b.add_vertex(Point3::new(2.0, 0.0, 0.0));
        assert!(b.add_face(s, &[v[0], v[1], collinear], &[]).is_err());
        assert!(b.add_wire_edge(s, v[0], v[0]).is_err());

        let mut empty = ModelBuilder::new();
        let r = empty.add_region();
        empty.add_shell(r).unwrap();
        assert!(empty.finish().is_err());
        assert!(ModelBuilder::new().finish().is_err());
    }

    #[test]
    fn hole_is_reoriented() {
        let mut b = ModelBuilder::new();
        let r = b.add_region();
        let s = b.add_shell(r).unwrap();
        let outer = [
            b.add_vertex(Point3::new(0.0, 0.0, 0.0)),
            b.add_vertex(Point3::new(4.0, 0.0, 0.0)),
            b.add_vertex(Point3::new(4.0, 4.0, 0.0)),
            b.add_vertex(Point3::new(0.0, 4.0, 0.0)),
        ];
        // given counter-clockwise, must end up clockwise
        let hole = vec![
            b.add_vertex(Point3::new(1.0, 1.0, 0.0)),
            b.add_vertex(Point3::new(3.0, 1.0, 0.0)),
            b.add_vertex(Point3::new(3.0, 3.0, 0.0)),
            b.add_vertex(Point3::new(1.0, 3.0, 0.0)),
        ];
        let f = b.add_face(s, &outer, &[hole.clone()]).unwrap();
        let m = b.finish().unwrap();
        let hole_loop = m.face(f).loops[1];
        assert_eq!(m.lp(hole_loop).orientation, LoopOrientation::Hole);
        let verts = m.loop_vertices(hole_loop);
        assert_eq!(verts[0], hole[3]);
        assert_eq!(verts[1], hole[2]);
        // left of a hole edge-use points away from the hole
        let LoopBody::Edges(uses) = &m.lp(hole_loop).body else {
            panic!("hole loop has edges");
        };
        let left = m.left_vector(uses[0]).unwrap().unwrap();
        let mid = m.point(verts[0]).midpoint(m.point(verts[1]));
        let probe = mid.offset(&left, 0.5);
        assert!(probe.x() > 3.0 || probe.x() < 1.0 || probe.y() > 3.0 || probe.y() < 1.0);
    }
}
