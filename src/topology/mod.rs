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

//! The read-only B-rep arena the classifier and intersector walk.
//!
//! Every element lives in a `Vec` owned by [`Model`] and is addressed by a
//! `Copy` handle. Relationships that form cycles in a pointer-based radial-edge
//! structure (loop successors, the uses of an edge around it, the uses of a
//! vertex) are plain handle lists here.

pub mod builder;
pub mod model;
pub mod primitives;

pub use builder::ModelBuilder;
pub use model::{
    Edge, EdgeUse, EdgeUseOwner, Face, Loop, LoopBody, Model, Region, Shell, Surface, Vertex,
    VertexUse,
};

macro_rules! define_ids {
    ($($(#[$meta:meta])* $name:ident),* $(,)?) => {
        $(
            $(#[$meta])*
            #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
            pub struct $name(pub usize);

            impl $name {
                #[inline(always)]
                pub fn index(self) -> usize {
                    self.0
                }
            }
        )*
    };
}

define_ids! {
    VertexId,
    EdgeId,
    /// One directed traversal of an edge.
    EdgeUseId,
    LoopId,
    FaceId,
    ShellId,
    RegionId,
}

/// The kind and identity of a topological element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Entity {
    Vertex(VertexId),
    Edge(EdgeId),
    Loop(LoopId),
    Face(FaceId),
    Shell(ShellId),
}

impl From<VertexId> for Entity {
    fn from(v: VertexId) -> Self {
        Entity::Vertex(v)
    }
}

impl From<EdgeId> for Entity {
    fn from(e: EdgeId) -> Self {
        Entity::Edge(e)
    }
}

impl From<LoopId> for Entity {
    fn from(l: LoopId) -> Self {
        Entity::Loop(l)
    }
}

impl From<FaceId> for Entity {
    fn from(f: FaceId) -> Self {
        Entity::Face(f)
    }
}

impl From<ShellId> for Entity {
    fn from(s: ShellId) -> Self {
        Entity::Shell(s)
    }
}

/// Which side of a face a use refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Normal points out of the shell's material.
    Same,
    /// Normal points into the shell's material.
    Opposite,
}

impl Orientation {
    pub fn flip(self) -> Self {
        match self {
            Orientation::Same => Orientation::Opposite,
            Orientation::Opposite => Orientation::Same,
        }
    }
}

/// One oriented side of a face.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FaceUse {
    pub face: FaceId,
    pub orientation: Orientation,
}

impl FaceUse {
    pub fn same(face: FaceId) -> Self {
        FaceUse {
            face,
            orientation: Orientation::Same,
        }
    }

    pub fn mate(self) -> Self {
        FaceUse {
            face: self.face,
            orientation: self.orientation.flip(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LoopOrientation {
    /// Counter-clockwise about the outward normal.
    Outer,
    /// Clockwise about the outward normal.
    Hole,
}
