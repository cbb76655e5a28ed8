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
use tracing::debug;

use crate::{
    classify::{Class, ClassList, Classifier, FaceClassification},
    error::{BrepError, BrepResult},
    topology::{EdgeUseId, Entity, FaceId, LoopBody, LoopId, ShellId, VertexId},
};

impl<'a> Classifier<'a> {
    /// Classifies a loop of another shell against `shell`.
    pub fn classify_loop(
        &self,
        lp: LoopId,
        shell: ShellId,
        list: &mut ClassList,
    ) -> BrepResult<Class> {
        let l = self.model.lp(lp);
        if l.shell == shell {
            return Err(BrepError::SelfClassification { lp, shell });
        }
        if let Some(class) = list.get(lp) {
            return Ok(class);
        }

        let uses = match &l.body {
            LoopBody::Vertex(v) => {
                let class = match self.classify_vertex(*v, shell, list)? {
                    c if c.is_on() => Class::OnShared,
                    c => c,
                };
                return self.settle(Entity::Loop(lp), shell, class, list);
            }
            LoopBody::Edges(uses) => uses,
        };

        let (mut inside, mut outside) = (0, 0);
        for eu in uses {
            match self.classify_edge(*eu, shell, list)? {
                Class::Inside => inside += 1,
                Class::Outside => outside += 1,
                _ => {}
            }
        }
        let class = if inside > 0 && outside > 0 {
            return Err(BrepError::LoopStraddles {
                lp,
                shell,
                inside,
                outside,
            });
        } else if outside > 0 {
            Class::Outside
        } else if inside > 0 {
            Class::Inside
        } else if l.is_wire() {
            Class::OnShared
        } else {
            match self.match_identical_loop(lp, uses, shell)? {
                Some(Class::OnAnti) => {
                    for eu in uses {
                        let u = self.model.edge_use(*eu);
                        list.reclassify_anti(u.edge)?;
                        list.reclassify_anti(u.from)?;
                    }
                    Class::OnAnti
                }
                Some(class) => class,
                None => self.nearest_radial_face(uses, shell)?,
            }
        };
        self.settle(Entity::Loop(lp), shell, class, list)
    }

    /// Classifies every loop of a face. The face itself is recorded with the
    /// summary verdict.
    pub fn classify_face(
        &self,
        face: FaceId,
        shell: ShellId,
        list: &mut ClassList,
    ) -> BrepResult<FaceClassification> {
        let mut loops = Vec::with_capacity(self.model.face(face).loops.len());
        for lp in &self.model.face(face).loops {
            loops.push((*lp, self.classify_loop(*lp, shell, list)?));
        }
        let fc = FaceClassification { face, loops };
        self.settle(Entity::Face(face), shell, fc.summary(), list)?;
        Ok(fc)
    }

    /// Classifies every element of shell `a` against shell `b`.
    pub fn classify_shell(&self, a: ShellId, b: ShellId) -> BrepResult<ClassList> {
        let mut list = ClassList::new();
        let s = self.model.shell(a);
        for f in &s.faces {
            self.classify_face(*f, b, &mut list)?;
        }
        for lp in &s.wire_loops {
            self.classify_loop(*lp, b, &mut list)?;
        }
        for eu in &s.wire_edges {
            self.classify_edge(*eu, b, &mut list)?;
        }
        for v in &s.lone_vertices {
            self.classify_vertex(*v, b, &mut list)?;
        }
        Ok(list)
    }

    /// Looks around the loop's edges for a face loop of `shell` over the same
    /// vertex cycle. A shared match beats an anti-shared one.
    fn match_identical_loop(
        &self,
        lp: LoopId,
        uses: &[EdgeUseId],
        shell: ShellId,
    ) -> BrepResult<Option<Class>> {
        let cycle = self.model.loop_vertices(lp);
        let mut found = None;
        for eu in uses {
            let u = self.model.edge_use(*eu);
            let Some(left) = self.model.left_vector(*eu)? else {
                continue;
            };
            for e in self.model.edges_between(u.from, u.to) {
                for other in self.model.edge(*e).uses() {
                    let Some(other_lp) = self.model.edge_use_loop(*other) else {
                        continue;
                    };
                    let ol = self.model.lp(other_lp);
                    if ol.shell != shell || ol.is_wire() {
                        continue;
                    }
                    if !same_cycle(&cycle, &self.model.loop_vertices(other_lp)) {
                        continue;
                    }
                    let Some(other_left) = self.model.left_vector(*other)? else {
                        continue;
                    };
                    if left.dot(&other_left) <= 0.0 {
                        debug!(lp = lp.0, other = other_lp.0, "identical loop with opposing left vectors");
                        continue;
                    }
                    if self.model.edge_use(*other).from == u.from {
                        return Ok(Some(Class::OnShared));
                    }
                    found = Some(Class::OnAnti);
                }
            }
        }
        Ok(found)
    }

    /// Decides an all-ON loop from the face of `shell` radially nearest to
    /// it: inside when the loop's interior heads against that face's outward
    /// normal.
    fn nearest_radial_face(&self, uses: &[EdgeUseId], shell: ShellId) -> BrepResult<Class> {
        let mut nearest: Option<(f64, f64)> = None;
        for eu in uses {
            let Some(left) = self.model.left_vector(*eu)? else {
                continue;
            };
            let u = self.model.edge_use(*eu);
            for other in self.model.edge(u.edge).uses() {
                let Some(face) = self.model.edge_use_face(*other) else {
                    continue;
                };
                if self.model.face(face).shell != shell {
                    continue;
                }
                let Some(other_left) = self.model.left_vector(*other)? else {
                    continue;
                };
                let normal = self.model.face_plane(face)?.normal;
                let side = normal.dot(&left);
                if side.abs() <= self.tol.perp {
                    continue;
                }
                let closeness = left.dot(&other_left);
                if nearest.is_none_or(|(best, _)| closeness > best) {
                    nearest = Some((closeness, side));
                }
            }
        }
        Ok(match nearest {
            Some((_, side)) if side < 0.0 => Class::Inside,
            _ => Class::Outside,
        })
    }
}

/// Equal up to rotation, in either direction.
pub(crate) fn same_cycle(a: &[VertexId], b: &[VertexId]) -> bool {
    if a.len() != b.len() || a.is_empty() {
        return false;
    }
    let n = a.len();
    let reversed: SmallVec<[VertexId; 8]> = b.iter().rev().copied().collect();
    [b, reversed.as_slice()].iter().any(|cand| {
        (0..n).any(|shift| (0..n).all(|i| a[i] == cand[(i + shift) % n]))
    })
}
