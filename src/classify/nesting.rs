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

//! Nesting questions: a point or loop against one loop of a face, and a
//! whole shell against another.

use ahash::AHashSet;
use tracing::debug;

use crate::{
    classify::{Class, Classifier, Containment, PointMode, locate_in_loop, loops::same_cycle},
    config::SMALL,
    error::{BrepError, BrepResult},
    geometry::Point3,
    topology::{LoopBody, LoopId, LoopOrientation, ShellId, VertexId},
};

impl<'a> Classifier<'a> {
    /// Classifies a point of a face's plane against the material bounded by
    /// one loop of that face. Within an outer loop's ring is inside, within
    /// a hole's ring is outside, and a point on the loop is `OnAnti`.
    pub fn classify_point_in_loop(&self, p: &Point3, lp: LoopId) -> BrepResult<Class> {
        let face = self.model.lp(lp).face.ok_or(BrepError::LoopNotInFace { lp })?;
        let distance = self.model.face_plane(face)?.signed_distance(p).abs();
        if distance > self.tol.dist {
            return Err(BrepError::PointOffFace {
                point: *p,
                face,
                distance,
                tol: self.tol.dist,
            });
        }
        self.point_in_loop(p, lp)
    }

    fn point_in_loop(&self, p: &Point3, lp: LoopId) -> BrepResult<Class> {
        let within = match locate_in_loop(self.model, lp, p, &self.tol)? {
            Containment::On(_) => return Ok(Class::OnAnti),
            Containment::Inside => true,
            Containment::Outside => false,
        };
        let hole = self.model.lp(lp).orientation == LoopOrientation::Hole;
        Ok(if within != hole {
            Class::Inside
        } else {
            Class::Outside
        })
    }

    /// Classifies loop `a` against the material bounded by loop `b` of the
    /// same face.
    ///
    /// A vertex of `a` off `b` decides first. When every vertex lies on `b`
    /// the inward vectors across a shared edge decide, then the midpoints of
    /// `a`'s edges. `Unknown` when `a` lies on `b` throughout.
    pub fn classify_loop_in_loop(&self, a: LoopId, b: LoopId) -> BrepResult<Class> {
        let face = self.model.lp(a).face.ok_or(BrepError::LoopNotInFace { lp: a })?;
        let other = self.model.lp(b).face.ok_or(BrepError::LoopNotInFace { lp: b })?;
        if face != other {
            return Err(BrepError::LoopsInDifferentFaces { a, b });
        }
        let ring_a = self.model.loop_vertices(a);
        let ring_b = self.model.loop_vertices(b);
        if a == b || same_cycle(&ring_a, &ring_b) {
            return Ok(Class::OnShared);
        }

        for v in ring_a.iter().filter(|v| !ring_b.contains(v)) {
            match self.point_in_loop(self.model.point(*v), b)? {
                Class::OnAnti => {}
                class => return Ok(class),
            }
        }
        if let Some(class) = self.shared_edge_side(a, b)? {
            return Ok(class);
        }
        if let LoopBody::Edges(uses) = &self.model.lp(a).body {
            for eu in uses {
                let u = self.model.edge_use(*eu);
                let mid = self.model.point(u.from).midpoint(self.model.point(u.to));
                match self.point_in_loop(&mid, b)? {
                    Class::OnAnti => {}
                    class => return Ok(class),
                }
            }
        }
        debug!(a = a.0, b = b.0, "loop lies on the other loop throughout");
        Ok(Class::Unknown)
    }

    /// Inside when `a` leaves a shared edge on the same side as `b`.
    fn shared_edge_side(&self, a: LoopId, b: LoopId) -> BrepResult<Option<Class>> {
        let (LoopBody::Edges(uses_a), LoopBody::Edges(uses_b)) =
            (&self.model.lp(a).body, &self.model.lp(b).body)
        else {
            return Ok(None);
        };
        for eu in uses_a {
            let edge = self.model.edge_use(*eu).edge;
            let Some(other) = uses_b.iter().find(|o| self.model.edge_use(**o).edge == edge) else {
                continue;
            };
            let (Some(left_a), Some(left_b)) =
                (self.model.left_vector(*eu)?, self.model.left_vector(*other)?)
            else {
                continue;
            };
            return Ok(Some(if left_a.dot(&left_b) < -SMALL {
                Class::Outside
            } else {
                Class::Inside
            }));
        }
        Ok(None)
    }

    /// Where shell `inner` sits as a whole relative to `outer`, for shells
    /// that do not cross each other. The first vertex of `inner` that is not
    /// on `outer` decides; `Unknown` when every vertex is on it.
    pub fn classify_shell_in_shell(&self, inner: ShellId, outer: ShellId) -> BrepResult<Class> {
        let bbox = &self.model.shell(inner).bbox;
        if !self.model.shell(outer).bbox.contains_box_tol(bbox, self.tol.dist) {
            return Ok(Class::Outside);
        }
        for v in self.shell_vertices(inner) {
            match self.locate_point(self.model.point(v), outer, PointMode::Full)? {
                class @ (Class::Inside | Class::Outside) => return Ok(class),
                class => debug!(vertex = v.0, %class, "vertex does not decide nesting"),
            }
        }
        Ok(Class::Unknown)
    }

    /// Vertices of a shell, face loops first, each once.
    fn shell_vertices(&self, shell: ShellId) -> Vec<VertexId> {
        let s = self.model.shell(shell);
        let loops = s
            .faces
            .iter()
            .flat_map(|f| self.model.face(*f).loops.iter())
            .chain(&s.wire_loops);
        let edges = s.wire_edges.iter().flat_map(|eu| {
            let u = self.model.edge_use(*eu);
            [u.from, u.to]
        });
        let mut seen = AHashSet::new();
        loops
            .flat_map(|lp| self.model.loop_vertices(*lp))
            .chain(edges)
            .chain(s.lone_vertices.iter().copied())
            .filter(|v| seen.insert(*v))
            .collect()
    }
}
