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
use tracing::trace;

use crate::{
    classify::{Containment, Touch, locate_in_face},
    config::Tolerance,
    error::{BrepError, BrepResult},
    geometry::{Plane, Point3, Ray, plane::LinePlane},
    kernel::predicates::are_perpendicular,
    observer::{NoopObserver, Observer},
    ray::{Hit, HitList, RayState, Record},
    topology::{Entity, FaceId, FaceUse, LoopBody, LoopId, Model, ShellId},
};

static NOOP: NoopObserver = NoopObserver;

/// Fires rays at a model and collects ordered hit lists.
#[derive(Clone, Copy)]
pub struct RayIntersector<'a> {
    model: &'a Model,
    tol: Tolerance,
    observer: &'a dyn Observer,
}

impl<'a> RayIntersector<'a> {
    pub fn new(model: &'a Model, tol: Tolerance) -> Self {
        RayIntersector {
            model,
            tol,
            observer: &NOOP,
        }
    }

    pub fn with_observer(mut self, observer: &'a dyn Observer) -> Self {
        self.observer = observer;
        self
    }

    /// Every region whose box the line crosses, then every shell in it.
    pub fn intersect_model(&self, ray: &Ray) -> BrepResult<HitList> {
        let mut q = Query::new(self, ray, false);
        for r in self.model.region_ids() {
            let region = self.model.region(r);
            if region.bbox.line_span(ray, self.tol.dist).is_none() {
                continue;
            }
            for s in &region.shells {
                q.shell(*s)?;
            }
        }
        Ok(q.hits)
    }

    pub fn intersect_shell(&self, ray: &Ray, shell: ShellId) -> BrepResult<HitList> {
        let mut q = Query::new(self, ray, false);
        q.shell(shell)?;
        Ok(q.hits)
    }

    /// A ray fired by the point classifier: face boundaries are not touched
    /// up, so grazing a boundary shows up as tied hits.
    pub(crate) fn classifying_ray(&self, ray: &Ray, shell: ShellId) -> BrepResult<HitList> {
        let mut q = Query::new(self, ray, true);
        q.shell(shell)?;
        Ok(q.hits)
    }
}

/// State of one ray query.
pub(super) struct Query<'q> {
    pub(super) model: &'q Model,
    pub(super) tol: Tolerance,
    pub(super) observer: &'q dyn Observer,
    pub(super) ray: &'q Ray,
    pub(super) classifying: bool,
    /// Shell being intersected; hit states only look at its faces.
    pub(super) shell: ShellId,
    /// Pole distance for vertex neighborhoods.
    pub(super) dimen: f64,
    pub(super) hits: HitList,
}

impl<'q> Query<'q> {
    fn new(ri: &RayIntersector<'q>, ray: &'q Ray, classifying: bool) -> Self {
        let extent = ri.model.bbox().max_extent();
        Query {
            model: ri.model,
            tol: ri.tol,
            observer: ri.observer,
            ray,
            classifying,
            shell: ShellId(0),
            dimen: if extent > ri.tol.dist { extent } else { 1.0 },
            hits: HitList::new(),
        }
    }

    fn shell(&mut self, shell: ShellId) -> BrepResult<()> {
        let model = self.model;
        let s = model.shell(shell);
        if s.bbox.line_span(self.ray, self.tol.dist).is_none() {
            trace!(shell = shell.0, "ray misses shell box");
            return Ok(());
        }
        self.shell = shell;
        for f in &s.faces {
            self.face(*f)?;
        }
        for lp in &s.wire_loops {
            self.lp(*lp)?;
        }
        for eu in &s.wire_edges {
            self.edge_use(*eu)?;
        }
        for v in &s.lone_vertices {
            self.vertex(*v, None)?;
        }
        Ok(())
    }

    fn face(&mut self, f: FaceId) -> BrepResult<()> {
        let entity = Entity::Face(f);
        if self.hits.record_of(entity).is_some() {
            return Ok(());
        }
        let plane = *self.model.face_plane(f)?;
        let t = match plane.intersect_line(self.ray, self.tol.dist) {
            LinePlane::Crosses(t) => t,
            LinePlane::InPlane | LinePlane::Parallel => {
                self.miss(entity, false);
                return Ok(());
            }
        };
        let pt = self.ray.point_at(t);
        if !self.model.face(f).bbox.contains_tol(&pt, self.tol.dist) {
            self.miss(entity, false);
            return Ok(());
        }

        match locate_in_face(self.model, f, &pt, &self.tol)? {
            Containment::Inside | Containment::On(_) if self.classifying => {
                self.record_face_hit(f, t, pt, &plane)?
            }
            Containment::Inside => match self.grazed_boundary(f, t) {
                Some((eu, crossing)) => {
                    trace!(face = f.0, distance = t, "crossing grazes the face boundary");
                    self.touch_boundary(eu, crossing)?;
                    self.miss(entity, true);
                }
                None => self.record_face_hit(f, t, pt, &plane)?,
            },
            Containment::On(touch) => {
                match touch {
                    Touch::Vertex(v) => {
                        self.vertex(v, None)?;
                    }
                    Touch::Edge(eu) => self.hit_edge(eu, t, pt)?,
                }
                self.miss(entity, true);
            }
            Containment::Outside => self.miss(entity, false),
        }

        let model = self.model;
        for lp in &model.face(f).loops {
            self.lp(*lp)?;
        }
        Ok(())
    }

    fn record_face_hit(&mut self, f: FaceId, t: f64, pt: Point3, plane: &Plane) -> BrepResult<()> {
        let cos = plane.normal.dot(&self.ray.dir);
        let (inbound, outbound) = if !self.model.face(f).is_three_manifold() {
            (RayState::Any, RayState::Any)
        } else if are_perpendicular(cos, &self.tol) {
            return Err(BrepError::RayInFacePlane {
                face: f,
                distance: t,
                cos,
                tol: self.tol.perp,
            });
        } else if cos > 0.0 {
            (RayState::Inside, RayState::Outside)
        } else {
            (RayState::Outside, RayState::Inside)
        };
        self.push_hit(Hit {
            distance: t,
            point: pt,
            entity: Entity::Face(f),
            inbound,
            outbound,
            inbound_normal: plane.normal,
            outbound_normal: plane.normal,
            uses: smallvec![FaceUse::same(f), FaceUse::same(f)],
            segment: None,
        });
        Ok(())
    }

    fn lp(&mut self, lp: LoopId) -> BrepResult<()> {
        let model = self.model;
        match &model.lp(lp).body {
            LoopBody::Vertex(v) => {
                self.vertex(*v, None)?;
            }
            LoopBody::Edges(uses) => {
                for eu in uses {
                    self.edge_use(*eu)?;
                }
            }
        }
        Ok(())
    }

    pub(super) fn recorded(&self, entity: Entity) -> Option<Record> {
        self.hits.record_of(entity)
    }

    pub(super) fn miss(&mut self, entity: Entity, sub_hit: bool) {
        self.hits.insert_miss(entity, sub_hit);
        if let Some(m) = self.hits.misses().last() {
            self.observer.miss_recorded(m);
        }
    }

    pub(super) fn push_hit(&mut self, hit: Hit) {
        self.observer.hit_recorded(&hit);
        self.hits.insert_hit(hit);
    }
}
