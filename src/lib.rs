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

//! Solid classification and ray intersection over a boundary-representation
//! model: where a point, vertex, edge, loop or face sits relative to a shell,
//! and the ordered list of elements a line passes through.

pub mod classify;
pub mod config;
pub mod error;
pub mod geometry;
pub mod kernel;
pub mod observer;
pub mod ray;
pub mod topology;

pub use classify::{Class, ClassList, Classifier, FaceClassification, PointMode};
pub use config::Tolerance;
pub use error::{BrepError, BrepResult};
pub use geometry::{Aabb, Plane, Point3, Ray, Segment, Vector3};
pub use observer::{NoopObserver, Observer, TracingObserver};
pub use ray::{Hit, HitList, Miss, RayIntersector, RayState, SegmentEnd, check_hit_list};
pub use topology::{
    EdgeId, EdgeUseId, Entity, FaceId, FaceUse, LoopId, Model, ModelBuilder, Orientation,
    RegionId, ShellId, VertexId,
};
