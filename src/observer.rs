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

//! Diagnostic hooks handed to a classifier or intersector for one call.

use tracing::{debug, trace};

use crate::{
    classify::Class,
    geometry::Point3,
    ray::{Hit, Miss},
    topology::{Entity, ShellId},
};

/// Receives classification and intersection events. Every method defaults to
/// doing nothing, so an implementation overrides only what it watches.
pub trait Observer {
    fn point_classified(&self, _point: &Point3, _shell: ShellId, _class: Class) {}

    /// A classifying ray along `PROBE_DIRECTIONS[direction]` settled on `class`.
    fn probe_fired(&self, _point: &Point3, _shell: ShellId, _direction: usize, _class: Class) {}

    fn entity_classified(&self, _entity: Entity, _shell: ShellId, _class: Class) {}

    fn hit_recorded(&self, _hit: &Hit) {}

    fn miss_recorded(&self, _miss: &Miss) {}
}

#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl Observer for NoopObserver {}

/// Forwards every event to `tracing`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingObserver;

impl Observer for TracingObserver {
    fn point_classified(&self, point: &Point3, shell: ShellId, class: Class) {
        debug!(?point, shell = shell.0, %class, "point classified");
    }

    fn probe_fired(&self, point: &Point3, shell: ShellId, direction: usize, class: Class) {
        debug!(?point, shell = shell.0, direction, %class, "classifying ray");
    }

    fn entity_classified(&self, entity: Entity, shell: ShellId, class: Class) {
        debug!(?entity, shell = shell.0, %class, "entity classified");
    }

    fn hit_recorded(&self, hit: &Hit) {
        trace!(
            entity = ?hit.entity,
            distance = hit.distance,
            inbound = ?hit.inbound,
            outbound = ?hit.outbound,
            "hit"
        );
    }

    fn miss_recorded(&self, miss: &Miss) {
        trace!(entity = ?miss.entity, sub_hit = miss.sub_hit, "miss");
    }
}
