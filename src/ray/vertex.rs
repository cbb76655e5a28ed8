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
    error::{BrepError, BrepResult},
    geometry::{Point3, Segment, Vector3, segment::Proximity},
    kernel::predicates::are_perpendicular,
    ray::{Hit, RayState, Record, SegmentEnd, intersect::Query},
    topology::{Entity, FaceId, FaceUse, VertexId, VertexUse},
};

/// One face corner at the hit vertex, seen from the vertex.
struct Corner {
    face: FaceId,
    normal: Vector3,
    /// Towards the next vertex of the loop, `dimen` long.
    edge_a: Segment,
    left_a: Vector3,
    /// Towards the previous vertex of the loop, `dimen` long.
    edge_b: Segment,
    left_b: Vector3,
}

impl Query<'_> {
    /// Hits `v` if the line passes within tolerance of it. Returns whether
    /// the vertex is hit after the call.
    pub(super) fn vertex(&mut self, v: VertexId, segment: Option<SegmentEnd>) -> BrepResult<bool> {
        let entity = Entity::Vertex(v);
        let previous = self.recorded(entity);
        if matches!(previous, Some(Record::Hit | Record::SubHit)) {
            return Ok(true);
        }
        let p = *self.model.point(v);
        if self.ray.distance_to_point(&p) > self.tol.dist {
            if previous.is_none() {
                self.miss(entity, false);
            }
            return Ok(false);
        }

        let t = self.ray.param_of(&p);
        let mut hit = self.vertex_states(v, &p, t)?;
        hit.segment = segment;
        self.push_hit(hit);
        Ok(true)
    }

    pub(super) fn miss_vertex(&mut self, v: VertexId) {
        let entity = Entity::Vertex(v);
        if self.recorded(entity).is_none() {
            self.miss(entity, false);
        }
    }

    /// Resolves the states at a vertex from the faces nearest to two poles,
    /// one on the line before the vertex and one after it.
    fn vertex_states(&self, v: VertexId, p: &Point3, t: f64) -> BrepResult<Hit> {
        let dir = self.ray.dir;
        let north = p.offset(&dir, -self.dimen);
        let south = p.offset(&dir, self.dimen);

        let mut nearest_north: Option<(f64, FaceId, Vector3)> = None;
        let mut nearest_south: Option<(f64, FaceId, Vector3)> = None;
        for corner in self.corners(v, p)? {
            for (pole, nearest) in [(&north, &mut nearest_north), (&south, &mut nearest_south)] {
                let dist = self.pole_distance(v, t, p, pole, &corner)?;
                if nearest.is_none_or(|(d, _, n)| self.nearer(dist, &corner.normal, d, &n)) {
                    *nearest = Some((dist, corner.face, corner.normal));
                }
            }
        }

        let mut hit = Hit::synthetic(Entity::Vertex(v), t, RayState::Any, RayState::Any);
        hit.point = *p;
        match (nearest_north, nearest_south) {
            (Some((_, fin, nin)), Some((_, fout, nout))) => {
                // north - v runs against the ray
                let cin = -nin.dot(&dir);
                let cout = nout.dot(&dir);
                hit.inbound = pole_state(cin, self);
                hit.outbound = pole_state(cout, self);
                hit.inbound_normal = nin;
                hit.outbound_normal = nout;
                hit.uses = smallvec![FaceUse::same(fin), FaceUse::same(fout)];
            }
            _ => {
                hit.inbound_normal = -dir;
                hit.outbound_normal = -dir;
            }
        }
        Ok(hit)
    }

    /// Whether a corner at `dist` with normal `n` beats the nearest so far.
    /// Corners equally near go to the face crossing the ray most steeply.
    fn nearer(&self, dist: f64, n: &Vector3, best: f64, best_n: &Vector3) -> bool {
        if dist < best - self.tol.dist {
            return true;
        }
        if dist > best + self.tol.dist {
            return false;
        }
        n.dot(&self.ray.dir).abs() > best_n.dot(&self.ray.dir).abs() + self.tol.perp
    }

    /// Face corners of the current shell at `v`.
    fn corners(&self, v: VertexId, p: &Point3) -> BrepResult<Vec<Corner>> {
        let mut out = Vec::new();
        for vu in self.model.vertex(v).uses() {
            let VertexUse::Edge(eu) = *vu else {
                continue;
            };
            let u = self.model.edge_use(eu);
            if u.from != v {
                continue;
            }
            let Some(face) = self.model.edge_use_face(eu) else {
                continue;
            };
            if self.model.face(face).shell != self.shell {
                continue;
            }
            let prev = self.model.prev_edge_use(eu);
            let next_pt = self.model.point(u.to);
            let prev_pt = self.model.point(self.model.edge_use(prev).from);
            let (Some(to_a), Some(to_b)) = (
                p.vector_to(next_pt).normalized(),
                p.vector_to(prev_pt).normalized(),
            ) else {
                continue;
            };
            let (Some(left_a), Some(left_b)) =
                (self.model.left_vector(eu)?, self.model.left_vector(prev)?)
            else {
                continue;
            };
            out.push(Corner {
                face,
                normal: self.model.face_plane(face)?.normal,
                edge_a: Segment::new(p, &p.offset(&to_a, self.dimen)),
                left_a,
                edge_b: Segment::new(p, &p.offset(&to_b, self.dimen)),
                left_b,
            });
        }
        Ok(out)
    }

    /// How far `pole` is from the face area around the corner, judged from
    /// the pole's projection onto the face plane.
    fn pole_distance(
        &self,
        v: VertexId,
        t: f64,
        p: &Point3,
        pole: &Point3,
        corner: &Corner,
    ) -> BrepResult<f64> {
        let n = &corner.normal;
        let prj = pole.offset(n, n.dot(&(p - pole)));
        let pa = corner.edge_a.proximity(&prj, &self.tol);
        let pb = corner.edge_b.proximity(&prj, &self.tol);
        // on the corner's boundary: the pole is as far as its projection
        if pa.is_touching() || pb.is_touching() {
            return Ok(prj.distance_to(pole));
        }

        let to_prj = p.vector_to(&prj);
        // inside the face when the projection is on the left of the edge
        let beside = |left: &Vector3, pca: &Point3| {
            if left.dot(&to_prj) > -SMALL {
                prj.distance_to(pole)
            } else {
                pca.distance_to(pole)
            }
        };
        match (pa, pb) {
            (Proximity::Beside { pca, .. }, Proximity::BeforeA { .. }) => {
                Ok(beside(&corner.left_a, &pca))
            }
            (Proximity::BeforeA { .. }, Proximity::Beside { pca, .. }) => {
                Ok(beside(&corner.left_b, &pca))
            }
            (
                Proximity::Beside { dist: da, pca: ca },
                Proximity::Beside { dist: db, pca: cb },
            ) => Ok(if da < db {
                beside(&corner.left_a, &ca)
            } else {
                beside(&corner.left_b, &cb)
            }),
            (Proximity::BeforeA { .. }, Proximity::BeforeA { .. }) => {
                // behind both edges: inside only for a reflex corner
                let Some(unit) = to_prj.normalized() else {
                    return Ok(p.distance_to(pole));
                };
                let dot = corner.left_a.dot(&unit).min(corner.left_b.dot(&unit));
                Ok(if dot > -SMALL {
                    prj.distance_to(pole)
                } else {
                    p.distance_to(pole)
                })
            }
            _ => Err(BrepError::NeighborhoodUnresolved {
                vertex: v,
                distance: t,
            }),
        }
    }
}

/// State on the pole's side of the nearest face: `cos` is the face normal
/// against the direction from the vertex to the pole.
fn pole_state(cos: f64, q: &Query<'_>) -> RayState {
    if are_perpendicular(cos, &q.tol) {
        RayState::On
    } else if cos > SMALL {
        RayState::Outside
    } else {
        RayState::Inside
    }
}
