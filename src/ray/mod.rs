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

//! Ray/model intersection and the per-query hit list.

use std::fmt;

use ahash::AHashMap;
use num_traits::Zero;
use smallvec::SmallVec;

use crate::{
    geometry::{Point3, Vector3},
    topology::{Entity, FaceUse, VertexId},
};

pub mod check;
mod edge;
pub mod intersect;
mod vertex;

pub use check::check_hit_list;
pub use intersect::RayIntersector;

/// Where the ray is relative to the material.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RayState {
    Inside,
    On,
    Outside,
    /// No material around the element (wire edges, lone vertices).
    Any,
}

impl fmt::Display for RayState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RayState::Inside => "in",
            RayState::On => "on",
            RayState::Outside => "out",
            RayState::Any => "any",
        })
    }
}

/// Marks the two vertex hits bounding an edge the ray runs along.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SegmentEnd {
    In { partner: VertexId },
    Out { partner: VertexId },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Hit {
    /// Signed distance along the unit ray direction.
    pub distance: f64,
    pub point: Point3,
    pub entity: Entity,
    pub inbound: RayState,
    pub outbound: RayState,
    pub inbound_normal: Vector3,
    pub outbound_normal: Vector3,
    /// Face uses the inbound and outbound states came from, in that order.
    pub uses: SmallVec<[FaceUse; 2]>,
    pub segment: Option<SegmentEnd>,
}

impl Hit {
    /// A bare hit with zero point and normals.
    pub fn synthetic(entity: Entity, distance: f64, inbound: RayState, outbound: RayState) -> Self {
        Hit {
            distance,
            point: Point3::default(),
            entity,
            inbound,
            outbound,
            inbound_normal: Vector3::zero(),
            outbound_normal: Vector3::zero(),
            uses: SmallVec::new(),
            segment: None,
        }
    }

    pub fn is_any_any(&self) -> bool {
        self.inbound == RayState::Any && self.outbound == RayState::Any
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Miss {
    pub entity: Entity,
    /// The entity was crossed but one of its sub-elements took the hit.
    pub sub_hit: bool,
}

/// How an entity was recorded in a query.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Record {
    Hit,
    SubHit,
    Miss,
}

/// Ordered hits plus the misses and sub-hits of one query. Every entity is
/// recorded at most once; vertex and edge misses may be upgraded to hits.
#[derive(Clone, Debug, Default)]
pub struct HitList {
    hits: Vec<Hit>,
    misses: Vec<Miss>,
    index: AHashMap<Entity, Record>,
}

impl HitList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hits in increasing distance.
    pub fn hits(&self) -> &[Hit] {
        &self.hits
    }

    pub fn misses(&self) -> &[Miss] {
        &self.misses
    }

    pub fn len(&self) -> usize {
        self.hits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    pub fn record_of(&self, entity: impl Into<Entity>) -> Option<Record> {
        self.index.get(&entity.into()).copied()
    }

    pub fn into_hits(self) -> Vec<Hit> {
        self.hits
    }

    /// Inserts before the first hit farther along the ray, replacing a miss
    /// on the same entity.
    pub(crate) fn insert_hit(&mut self, hit: Hit) {
        if self.index.get(&hit.entity) == Some(&Record::Miss) {
            self.misses.retain(|m| m.entity != hit.entity);
        }
        self.index.insert(hit.entity, Record::Hit);
        let at = self
            .hits
            .iter()
            .position(|h| h.distance > hit.distance)
            .unwrap_or(self.hits.len());
        self.hits.insert(at, hit);
    }

    pub(crate) fn insert_miss(&mut self, entity: Entity, sub_hit: bool) {
        let record = if sub_hit { Record::SubHit } else { Record::Miss };
        self.index.insert(entity, record);
        self.misses.push(Miss { entity, sub_hit });
    }
}
