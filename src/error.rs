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

//! Error types for classification and ray intersection.

use thiserror::Error;

use crate::{
    classify::Class,
    geometry::point::Point3,
    ray::RayState,
    topology::{EdgeId, Entity, FaceId, LoopId, ShellId, VertexId},
};

/// Everything that can go wrong while building a model or answering a query.
///
/// Topological inconsistencies carry the handles involved and the tolerance in
/// force, so a batch caller can log and skip a single bad query.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BrepError {
    /// Tolerance values out of range.
    #[error("invalid tolerance: {0}")]
    InvalidTolerance(String),

    /// Ray direction was the zero vector (or not finite).
    #[error("ray direction must be a finite non-zero vector")]
    DegenerateRay,

    /// The builder was handed topology it cannot represent.
    #[error("invalid topology: {0}")]
    InvalidTopology(String),

    /// A face whose surface kind has no intersector.
    #[error("face {face:?} has an unsupported {kind} surface")]
    UnsupportedSurface { face: FaceId, kind: String },

    /// No probe direction produced a definite answer.
    #[error(
        "point {point:?} could not be classified against shell {shell:?} after {tries} probe directions (tol {tol})"
    )]
    ProbeDirectionsExhausted {
        point: Point3,
        shell: ShellId,
        tries: usize,
        tol: f64,
    },

    /// An edge has one endpoint inside and the other outside the shell.
    #[error("edge {edge:?} runs from {start} to {end} of shell {shell:?} without being cut (tol {tol})")]
    EdgeNotCut {
        edge: EdgeId,
        shell: ShellId,
        start: Class,
        end: Class,
        tol: f64,
    },

    /// Both endpoints were on the shell and no probe point along the edge resolved.
    #[error("edge {edge:?} lies on shell {shell:?} at both ends but no probe along it resolved (tol {tol})")]
    EdgeProbeFailed { edge: EdgeId, shell: ShellId, tol: f64 },

    /// A loop has edges both inside and outside the shell.
    #[error("loop {lp:?} transits shell {shell:?}: {inside} edges inside, {outside} outside")]
    LoopStraddles {
        lp: LoopId,
        shell: ShellId,
        inside: usize,
        outside: usize,
    },

    /// A loop query that needs a face loop was given a wire loop.
    #[error("loop {lp:?} does not bound a face")]
    LoopNotInFace { lp: LoopId },

    /// Two loops compared within a face belong to different faces.
    #[error("loops {a:?} and {b:?} are not in the same face")]
    LoopsInDifferentFaces { a: LoopId, b: LoopId },

    /// A point classified against a loop lies off the loop's face plane.
    #[error("point {point:?} is {distance} off the plane of face {face:?} (tol {tol})")]
    PointOffFace {
        point: Point3,
        face: FaceId,
        distance: f64,
        tol: f64,
    },

    /// Asked to classify a loop against the shell that owns it.
    #[error("loop {lp:?} belongs to shell {shell:?} and cannot be classified against it")]
    SelfClassification { lp: LoopId, shell: ShellId },

    /// A second, different verdict for an already classified entity.
    #[error("{entity:?} is already {existing}, refusing to mark it {proposed}")]
    ConflictingVerdict {
        entity: Entity,
        existing: Class,
        proposed: Class,
    },

    /// The ray grazes a face in its own plane.
    #[error("ray lies in the plane of face {face:?} at distance {distance} (cos {cos}, tol {tol})")]
    RayInFacePlane {
        face: FaceId,
        distance: f64,
        cos: f64,
        tol: f64,
    },

    /// The pole projections around a vertex fell in an impossible configuration.
    #[error("neighborhood of vertex {vertex:?} at distance {distance} could not be resolved")]
    NeighborhoodUnresolved { vertex: VertexId, distance: f64 },

    /// A hit whose inbound state does not continue the running state.
    #[error("hit {index} at distance {distance}: expected inbound {expected:?}, found {found:?}")]
    BadStateTransition {
        index: usize,
        distance: f64,
        expected: RayState,
        found: RayState,
    },

    /// The hit list does not leave the ray outside.
    #[error("hit list ends in state {state:?} instead of Outside")]
    BadEndingState { state: RayState },
}

pub type BrepResult<T> = Result<T, BrepError>;
