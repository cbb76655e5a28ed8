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
    geometry::{Aabb, Plane, Point3, Vector3, aabb_tree::AabbTree},
    topology::{
        EdgeId, EdgeUseId, FaceId, LoopId, LoopOrientation, RegionId, ShellId, VertexId,
    },
};

/// A place a vertex is used.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VertexUse {
    /// Start of a loop edge-use, or either end of a wire edge-use.
    Edge(EdgeUseId),
    /// Body of a vertex-only loop.
    Loop(LoopId),
    /// A lone vertex of a shell.
    Shell(ShellId),
}

#[derive(Clone, Debug)]
pub struct Vertex {
    pub point: Point3,
    pub(crate) uses: SmallVec<[VertexUse; 6]>,
}

impl Vertex {
    pub fn uses(&self) -> &[VertexUse] {
        &self.uses
    }
}

#[derive(Clone, Debug)]
pub struct Edge {
    pub(crate) vertices: [VertexId; 2],
    /// Every use of this edge, in every loop and shell, in creation order.
    pub(crate) uses: SmallVec<[EdgeUseId; 4]>,
}

impl Edge {
    pub fn vertices(&self) -> [VertexId; 2] {
        self.vertices
    }

    pub fn uses(&self) -> &[EdgeUseId] {
        &self.uses
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EdgeUseOwner {
    /// Position `index` of a loop.
    Loop { lp: LoopId, index: usize },
    /// A wire edge of a shell.
    Shell(ShellId),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeUse {
    pub edge: EdgeId,
    pub from: VertexId,
    pub to: VertexId,
    pub owner: EdgeUseOwner,
}

#[derive(Clone, Debug, PartialEq)]
pub enum LoopBody {
    Edges(Vec<EdgeUseId>),
    Vertex(VertexId),
}

#[derive(Clone, Debug)]
pub struct Loop {
    pub shell: ShellId,
    /// `None` for a wire loop.
    pub face: Option<FaceId>,
    pub orientation: LoopOrientation,
    pub body: LoopBody,
}

impl Loop {
    pub fn is_wire(&self) -> bool {
        self.face.is_none()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Surface {
    Plane(Plane),
    /// A curved surface; carried so callers get a clear refusal.
    Parametric { kind: String },
}

#[derive(Clone, Debug)]
pub struct Face {
    pub shell: ShellId,
    pub surface: Surface,
    /// Outer loop first, then holes.
    pub loops: SmallVec<[LoopId; 2]>,
    pub bbox: Aabb,
    pub(crate) three_manifold: bool,
}

impl Face {
    /// Every edge of the face is used by at least two faces of its shell.
    pub fn is_three_manifold(&self) -> bool {
        self.three_manifold
    }
}

#[derive(Clone, Debug)]
pub struct Shell {
    pub region: RegionId,
    pub faces: Vec<FaceId>,
    pub wire_loops: Vec<LoopId>,
    pub wire_edges: Vec<EdgeUseId>,
    pub lone_vertices: Vec<VertexId>,
    pub bbox: Aabb,
    pub(crate) face_tree: Option<AabbTree<FaceId>>,
}

impl Shell {
    /// Faces whose boxes overlap `query`, sorted and without repeats.
    pub fn faces_near(&self, query: &Aabb) -> Vec<FaceId> {
        let mut out = Vec::new();
        if let Some(tree) = &self.face_tree {
            tree.query(query, &mut out);
        }
        out.sort_unstable();
        out.dedup();
        out
    }
}

#[derive(Clone, Debug)]
pub struct Region {
    pub shells: Vec<ShellId>,
    pub bbox: Aabb,
}

/// An immutable solid model, built with [`ModelBuilder`](super::ModelBuilder).
#[derive(Clone, Debug)]
pub struct Model {
    pub(crate) vertices: Vec<Vertex>,
    pub(crate) edges: Vec<Edge>,
    pub(crate) edge_uses: Vec<EdgeUse>,
    pub(crate) loops: Vec<Loop>,
    pub(crate) faces: Vec<Face>,
    pub(crate) shells: Vec<Shell>,
    pub(crate) regions: Vec<Region>,
    /// Edges keyed by their vertex pair, smaller id first.
    pub(crate) edge_index: AHashMap<(VertexId, VertexId), SmallVec<[EdgeId; 2]>>,
    pub(crate) bbox: Aabb,
}

impl Model {
    pub fn vertex(&self, v: VertexId) -> &Vertex {
        &self.vertices[v.0]
    }

    pub fn point(&self, v: VertexId) -> &Point3 {
        &self.vertices[v.0].point
    }

    pub fn edge(&self, e: EdgeId) -> &Edge {
        &self.edges[e.0]
    }

    pub fn edge_use(&self, eu: EdgeUseId) -> &EdgeUse {
        &self.edge_uses[eu.0]
    }

    pub fn lp(&self, l: LoopId) -> &Loop {
        &self.loops[l.0]
    }

    pub fn face(&self, f: FaceId) -> &Face {
        &self.faces[f.0]
    }

    pub fn shell(&self, s: ShellId) -> &Shell {
        &self.shells[s.0]
    }

    pub fn region(&self, r: RegionId) -> &Region {
        &self.regions[r.0]
    }

    pub fn bbox(&self) -> &Aabb {
        &self.bbox
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn shell_ids(&self) -> impl Iterator<Item = ShellId> + '_ {
        (0..self.shells.len()).map(ShellId)
    }

    pub fn region_ids(&self) -> impl Iterator<Item = RegionId> + '_ {
        (0..self.regions.len()).map(RegionId)
    }

    pub fn face_ids(&self) -> impl Iterator<Item = FaceId> + '_ {
        (0..self.faces.len()).map(FaceId)
    }

    /// The carrier plane of a planar face.
    pub fn face_plane(&self, f: FaceId) -> BrepResult<&Plane> {
        match &self.faces[f.0].surface {
            Surface::Plane(plane) => Ok(plane),
            Surface::Parametric { kind } => Err(BrepError::UnsupportedSurface {
                face: f,
                kind: kind.clone(),
            }),
        }
    }

    pub fn edge_use_shell(&self, eu: EdgeUseId) -> ShellId {
        match self.edge_uses[eu.0].owner {
            EdgeUseOwner::Loop { lp, .. } => self.loops[lp.0].shell,
            EdgeUseOwner::Shell(s) => s,
        }
    }

    pub fn edge_use_loop(&self, eu: EdgeUseId) -> Option<LoopId> {
        match self.edge_uses[eu.0].owner {
            EdgeUseOwner::Loop { lp, .. } => Some(lp),
            EdgeUseOwner::Shell(_) => None,
        }
    }

    pub fn edge_use_face(&self, eu: EdgeUseId) -> Option<FaceId> {
        self.edge_use_loop(eu).and_then(|lp| self.loops[lp.0].face)
    }

    pub fn vertex_use_shell(&self, vu: VertexUse) -> ShellId {
        match vu {
            VertexUse::Edge(eu) => self.edge_use_shell(eu),
            VertexUse::Loop(lp) => self.loops[lp.0].shell,
            VertexUse::Shell(s) => s,
        }
    }

    /// Successor of `eu` in its loop; a wire edge-use is its own successor.
    pub fn next_edge_use(&self, eu: EdgeUseId) -> EdgeUseId {
        self.step_in_loop(eu, 1)
    }

    /// Predecessor of `eu` in its loop.
    pub fn prev_edge_use(&self, eu: EdgeUseId) -> EdgeUseId {
        self.step_in_loop(eu, -1)
    }

    fn step_in_loop(&self, eu: EdgeUseId, step: isize) -> EdgeUseId {
        let EdgeUseOwner::Loop { lp, index } = self.edge_uses[eu.0].owner else {
            return eu;
        };
        match &self.loops[lp.0].body {
            LoopBody::Edges(uses) => {
                let n = uses.len() as isize;
                uses[(index as isize + step).rem_euclid(n) as usize]
            }
            LoopBody::Vertex(_) => eu,
        }
    }

    /// Start vertices of a loop in traversal order.
    pub fn loop_vertices(&self, lp: LoopId) -> SmallVec<[VertexId; 8]> {
        match &self.loops[lp.0].body {
            LoopBody::Edges(uses) => uses.iter().map(|eu| self.edge_uses[eu.0].from).collect(),
            LoopBody::Vertex(v) => SmallVec::from_slice(&[*v]),
        }
    }

    /// Edges joining `u` and `v`, in either direction.
    pub fn edges_between(&self, u: VertexId, v: VertexId) -> &[EdgeId] {
        let key = if u <= v { (u, v) } else { (v, u) };
        self.edge_index.get(&key).map_or(&[], |e| e.as_slice())
    }

    /// Unit vector in the face plane, perpendicular to `eu`, pointing into
    /// the face's interior. `None` for wire edge-uses and degenerate edges.
    pub fn left_vector(&self, eu: EdgeUseId) -> BrepResult<Option<Vector3>> {
        let Some(face) = self.edge_use_face(eu) else {
            return Ok(None);
        };
        let plane = self.face_plane(face)?;
        let use_ = &self.edge_uses[eu.0];
        let dir = self.point(use_.from).vector_to(self.point(use_.to));
        Ok(plane.normal.cross(&dir).normalized())
    }

    /// Unit direction of `eu` from its start to its end.
    pub fn edge_use_direction(&self, eu: EdgeUseId) -> Option<Vector3> {
        let use_ = &self.edge_uses[eu.0];
        self.point(use_.from)
            .vector_to(self.point(use_.to))
            .normalized()
    }

    pub fn edge_bbox(&self, e: EdgeId) -> Aabb {
        let [a, b] = self.edges[e.0].vertices;
        Aabb::from_points(self.point(a), self.point(b))
    }
}
