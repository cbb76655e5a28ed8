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

use smallvec::smallvec;

use crate::{
    config::SMALL,
    error::BrepResult,
    geometry::{Point3, Segment, segment::LineCrossing},
    kernel::predicates::are_perpendicular,
    ray::{Hit, RayState, Record, SegmentEnd, intersect::Query},
    topology::{EdgeId, EdgeUseId, Entity, FaceId, FaceUse, LoopBody},
};

impl Query<'_> {
    pub(super) fn edge_use(&mut self, eu: EdgeUseId) -> BrepResult<()> {
        let u = *self.model.edge_use(eu);
        let entity = Entity::Edge(u.edge);
        if self.recorded(entity).is_some() {
            return Ok(());
        }
        let a = *self.model.point(u.from);
        let b = *self.model.point(u.to);

        match Segment::new(&a, &b).intersect_line(self.ray, &self.tol) {
            LineCrossing::Degenerate => {
                let hit_a = self.vertex(u.from, None)?;
                let hit_b = self.vertex(u.to, None)?;
                self.miss(entity, hit_a || hit_b);
            }
            LineCrossing::BeyondEnds | LineCrossing::Miss => {
                self.miss_vertex(u.from);
                self.miss_vertex(u.to);
                self.miss(entity, false);
            }
            LineCrossing::Collinear => {
                let (near, far) = if self.ray.param_of(&a) <= self.ray.param_of(&b) {
                    (u.from, u.to)
                } else {
                    (u.to, u.from)
                };
                self.vertex(near, Some(SegmentEnd::In { partner: far }))?;
                self.vertex(far, Some(SegmentEnd::Out { partner: near }))?;
                self.miss(entity, true);
            }
            LineCrossing::AtA(_) => {
                let hit = self.vertex(u.from, None)?;
                self.miss(entity, hit);
            }
            LineCrossing::AtB(_) => {
                let hit = self.vertex(u.to, None)?;
                self.miss(entity, hit);
            }
            LineCrossing::Interior(t) => self.hit_edge(eu, t, self.ray.point_at(t))?,
        }
        Ok(())
    }

    /// The boundary element of `f` the line passes within tolerance of,
    /// nearest along the line to `t`. A crossing just inside the face can
    /// still graze its boundary.
    pub(super) fn grazed_boundary(&self, f: FaceId, t: f64) -> Option<(EdgeUseId, LineCrossing)> {
        let model = self.model;
        let mut best: Option<(f64, EdgeUseId, LineCrossing)> = None;
        for lp in &model.face(f).loops {
            let LoopBody::Edges(uses) = &model.lp(*lp).body else {
                continue;
            };
            for eu in uses {
                let u = model.edge_use(*eu);
                let crossing = Segment::new(model.point(u.from), model.point(u.to))
                    .intersect_line(self.ray, &self.tol);
                let at = match crossing {
                    LineCrossing::AtA(te) | LineCrossing::AtB(te) | LineCrossing::Interior(te) => te,
                    _ => continue,
                };
                let gap = (at - t).abs();
                if best.is_none_or(|(g, _, _)| gap < g) {
                    best = Some((gap, *eu, crossing));
                }
            }
        }
        best.map(|(_, eu, crossing)| (eu, crossing))
    }

    /// Hits whatever `crossing` of the edge under `eu` touches.
    pub(super) fn touch_boundary(&mut self, eu: EdgeUseId, crossing: LineCrossing) -> BrepResult<()> {
        let u = *self.model.edge_use(eu);
        match crossing {
            LineCrossing::AtA(_) => {
                self.vertex(u.from, None)?;
            }
            LineCrossing::AtB(_) => {
                self.vertex(u.to, None)?;
            }
            LineCrossing::Interior(t) => self.hit_edge(eu, t, self.ray.point_at(t))?,
            _ => {}
        }
        Ok(())
    }

    /// Records a hit on the interior of the edge under `eu`. Its vertices
    /// are misses unless something already hit them.
    pub(super) fn hit_edge(&mut self, eu: EdgeUseId, t: f64, pt: Point3) -> BrepResult<()> {
        let u = *self.model.edge_use(eu);
        self.miss_vertex(u.from);
        self.miss_vertex(u.to);
        let entity = Entity::Edge(u.edge);
        if matches!(self.recorded(entity), Some(Record::Hit | Record::SubHit)) {
            return Ok(());
        }

        let hit = match self.edge_faces(u.edge)? {
            Some((fin, fout)) => {
                let nin = self.model.face_plane(fin)?.normal;
                let nout = self.model.face_plane(fout)?.normal;
                let cin = nin.dot(&self.ray.dir);
                let cout = nout.dot(&self.ray.dir);
                let inbound = if are_perpendicular(cin, &self.tol) {
                    RayState::On
                } else if cin < -SMALL {
                    RayState::Outside
                } else {
                    RayState::Inside
                };
                let outbound = if are_perpendicular(cout, &self.tol) {
                    RayState::On
                } else if cout > SMALL {
                    RayState::Outside
                } else {
                    RayState::Inside
                };
                Hit {
                    distance: t,
                    point: pt,
                    entity,
                    inbound,
                    outbound,
                    inbound_normal: nin,
                    outbound_normal: nout,
                    uses: smallvec![FaceUse::same(fin), FaceUse::same(fout)],
                    segment: None,
                }
            }
            None => {
                // wire edge: normal perpendicular to the edge, facing the ray
                let dir = self.ray.dir;
                let mut normal = match self.model.edge_use_direction(eu) {
                    Some(e) => e.cross(&e.cross(&dir)),
                    None => -dir,
                };
                if normal.dot(&dir) > 0.0 {
                    normal = -normal;
                }
                Hit {
                    distance: t,
                    point: pt,
                    entity,
                    inbound: RayState::Any,
                    outbound: RayState::Any,
                    inbound_normal: normal,
                    outbound_normal: normal,
                    uses: smallvec![],
                    segment: None,
                }
            }
        };
        self.push_hit(hit);
        Ok(())
    }

    /// The faces of the current shell around `edge` whose left vectors lean
    /// least and most along the ray: the ray arrives from the first and
    /// leaves into the second.
    fn edge_faces(&self, edge: EdgeId) -> BrepResult<Option<(FaceId, FaceId)>> {
        let mut inbound: Option<(f64, FaceId)> = None;
        let mut outbound: Option<(f64, FaceId)> = None;
        for u in self.model.edge(edge).uses() {
            let Some(f) = self.model.edge_use_face(*u) else {
                continue;
            };
            let face = self.model.face(f);
            if face.shell != self.shell || !face.is_three_manifold() {
                continue;
            }
            let Some(left) = self.model.left_vector(*u)? else {
                continue;
            };
            let cos = left.dot(&self.ray.dir);
            if inbound.is_none_or(|(c, _)| cos < c) {
                inbound = Some((cos, f));
            }
            if outbound.is_none_or(|(c, _)| cos > c) {
                outbound = Some((cos, f));
            }
        }
        Ok(inbound.zip(outbound).map(|((_, fin), (_, fout))| (fin, fout)))
    }
}
