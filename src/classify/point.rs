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

use tracing::debug;

use crate::{
    classify::{Class, Classifier, Containment, PointMode, locate_in_face},
    config::PROBE_DIRECTIONS,
    error::{BrepError, BrepResult},
    geometry::{Aabb, Point3, Ray, Vector3},
    ray::{Hit, RayIntersector, RayState},
    topology::ShellId,
};

impl<'a> Classifier<'a> {
    /// Classifies a point against a shell.
    ///
    /// Exhausting every probe direction is an error unless the classifier was
    /// built with `allow_unknown(true)`.
    pub fn classify_point(&self, p: &Point3, shell: ShellId, mode: PointMode) -> BrepResult<Class> {
        let class = self.locate_point(p, shell, mode)?;
        if class == Class::Unknown && !self.allow_unknown {
            return Err(BrepError::ProbeDirectionsExhausted {
                point: *p,
                shell,
                tries: PROBE_DIRECTIONS.len(),
                tol: self.tol.dist,
            });
        }
        Ok(class)
    }

    /// Same as [`classify_point`](Self::classify_point) but hands back
    /// `Unknown` when every direction was ambiguous.
    pub(crate) fn locate_point(&self, p: &Point3, shell: ShellId, mode: PointMode) -> BrepResult<Class> {
        let s = self.model.shell(shell);
        if !s.bbox.contains_tol(p, self.tol.dist) {
            self.observer.point_classified(p, shell, Class::Outside);
            return Ok(Class::Outside);
        }

        if mode == PointMode::Full {
            let probe = Aabb::around_point(p, self.tol.dist);
            for face in s.faces_near(&probe) {
                let plane = self.model.face_plane(face)?;
                if plane.signed_distance(p).abs() >= self.tol.dist {
                    continue;
                }
                match locate_in_face(self.model, face, p, &self.tol)? {
                    Containment::Inside | Containment::On(_) => {
                        self.observer.point_classified(p, shell, Class::OnAnti);
                        return Ok(Class::OnAnti);
                    }
                    Containment::Outside => {}
                }
            }
        }

        let intersector = RayIntersector::new(self.model, self.tol).with_observer(self.observer);
        for (i, dir) in PROBE_DIRECTIONS.iter().enumerate() {
            let ray = Ray::new(*p, Vector3::from_vals(*dir))?;
            let class = match intersector.classifying_ray(&ray, shell) {
                Ok(hits) => guess_class(hits.hits(), mode, self.tol.dist),
                Err(BrepError::RayInFacePlane { face, .. }) => {
                    debug!(direction = i, face = face.0, "probe ray lies in a face plane");
                    Class::Unknown
                }
                Err(e) => return Err(e),
            };
            self.observer.probe_fired(p, shell, i, class);
            if class != Class::Unknown {
                self.observer.point_classified(p, shell, class);
                return Ok(class);
            }
            debug!(direction = i, point = ?p, "ambiguous probe, trying the next direction");
        }
        self.observer.point_classified(p, shell, Class::Unknown);
        Ok(Class::Unknown)
    }
}

/// The nearest decisive hit on one side of the point.
#[derive(Default)]
struct Side {
    best: Option<(f64, RayState)>,
    /// Two hits tied for nearest.
    tied: bool,
}

impl Side {
    fn offer(&mut self, distance: f64, state: RayState, closer: impl Fn(f64, f64) -> bool) {
        match self.best {
            Some((d, _)) if d == distance => self.tied = true,
            Some((d, _)) if !closer(distance, d) => {}
            _ => {
                self.best = Some((distance, state));
                self.tied = false;
            }
        }
    }

    fn verdict(&self) -> Class {
        match self.best {
            None => Class::Outside,
            Some((_, RayState::Inside)) => Class::Inside,
            Some((_, RayState::Outside)) => Class::Outside,
            Some((_, RayState::On)) => Class::OnAnti,
            Some((_, RayState::Any)) => Class::Unknown,
        }
    }
}

/// Reads a verdict for the ray origin off a classifying hit list.
///
/// Behind the origin the nearest hit's outbound state applies, ahead of it
/// the nearest hit's inbound state; both sides must agree.
pub(crate) fn guess_class(hits: &[Hit], mode: PointMode, tol: f64) -> Class {
    let mut minus = Side::default();
    let mut plus = Side::default();
    for hit in hits {
        if hit.inbound == RayState::Any && hit.outbound == RayState::Any {
            continue;
        }
        let d = hit.distance;
        if d.abs() <= tol {
            match mode {
                PointMode::Full => return Class::OnAnti,
                PointMode::InOrOut => continue,
            }
        }
        if d < 0.0 {
            minus.offer(d, hit.outbound, |a, b| a > b);
        } else {
            plus.offer(d, hit.inbound, |a, b| a < b);
        }
    }
    if minus.tied || plus.tied {
        return Class::Unknown;
    }
    let (before, after) = (minus.verdict(), plus.verdict());
    if before == after { before } else { Class::Unknown }
}
