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

//! Classification of points and topological elements against a shell.

use std::fmt;

use ahash::AHashMap;

use crate::{
    config::Tolerance,
    error::{BrepError, BrepResult},
    observer::{NoopObserver, Observer},
    topology::{Entity, FaceId, LoopId, Model},
};

pub mod entity;
pub mod face_point;
pub mod loops;
pub mod nesting;
pub mod point;

pub use face_point::{Containment, Touch, locate_in_face, locate_in_loop};

/// Where an element sits relative to a shell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Class {
    Inside,
    /// On the shell, with topology in common and matching orientation.
    OnShared,
    /// On the shell, facing the opposite way (or geometrically coincident only).
    OnAnti,
    Outside,
    Unknown,
}

impl Class {
    pub fn is_on(self) -> bool {
        matches!(self, Class::OnShared | Class::OnAnti)
    }
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Class::Inside => "inside",
            Class::OnShared => "on (shared)",
            Class::OnAnti => "on (anti)",
            Class::Outside => "outside",
            Class::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

/// How much a point classification may conclude.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointMode {
    /// Inside, outside, or on the shell's surface.
    Full,
    /// Inside or outside only; hits at the point itself are ignored.
    InOrOut,
}

/// Verdicts cached for one classification query.
#[derive(Clone, Debug, Default)]
pub struct ClassList {
    verdicts: AHashMap<Entity, Class>,
}

impl ClassList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, entity: impl Into<Entity>) -> Option<Class> {
        self.verdicts.get(&entity.into()).copied()
    }

    /// Records a verdict. Repeating the same verdict is a no-op, anything
    /// else over an existing verdict is a conflict.
    pub fn record(&mut self, entity: impl Into<Entity>, class: Class) -> BrepResult<()> {
        let entity = entity.into();
        match self.verdicts.get(&entity) {
            None => {
                self.verdicts.insert(entity, class);
                Ok(())
            }
            Some(existing) if *existing == class => Ok(()),
            Some(existing) => Err(BrepError::ConflictingVerdict {
                entity,
                existing: *existing,
                proposed: class,
            }),
        }
    }

    /// Turns a shared ON verdict into an anti-shared one.
    pub fn reclassify_anti(&mut self, entity: impl Into<Entity>) -> BrepResult<()> {
        let entity = entity.into();
        if let Some(c) = self.verdicts.get_mut(&entity) {
            if *c == Class::OnShared {
                *c = Class::OnAnti;
                return Ok(());
            }
        }
        self.record(entity, Class::OnAnti)
    }

    pub fn len(&self) -> usize {
        self.verdicts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.verdicts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Entity, Class)> + '_ {
        self.verdicts.iter().map(|(e, c)| (*e, *c))
    }
}

/// Per-loop verdicts of a face, outer loop first.
#[derive(Clone, Debug, PartialEq)]
pub struct FaceClassification {
    pub face: FaceId,
    pub loops: Vec<(LoopId, Class)>,
}

impl FaceClassification {
    /// The single verdict recorded for the face: anti-shared if any loop
    /// is, otherwise the outer loop's verdict.
    pub fn summary(&self) -> Class {
        if self.loops.iter().any(|(_, c)| *c == Class::OnAnti) {
            return Class::OnAnti;
        }
        self.loops.first().map_or(Class::Outside, |(_, c)| *c)
    }
}

static NOOP: NoopObserver = NoopObserver;

/// Classifies points and elements of a model against its shells.
#[derive(Clone, Copy)]
pub struct Classifier<'a> {
    pub(crate) model: &'a Model,
    pub(crate) tol: Tolerance,
    pub(crate) observer: &'a dyn Observer,
    pub(crate) allow_unknown: bool,
}

impl<'a> Classifier<'a> {
    pub fn new(model: &'a Model, tol: Tolerance) -> Self {
        Classifier {
            model,
            tol,
            observer: &NOOP,
            allow_unknown: false,
        }
    }

    pub fn with_observer(mut self, observer: &'a dyn Observer) -> Self {
        self.observer = observer;
        self
    }

    /// Return `Class::Unknown` from `classify_point` instead of an error when
    /// every probe direction is ambiguous.
    pub fn allow_unknown(mut self, allow: bool) -> Self {
        self.allow_unknown = allow;
        self
    }

    pub fn model(&self) -> &'a Model {
        self.model
    }

    pub fn tolerance(&self) -> &Tolerance {
        &self.tol
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::{EdgeId, VertexId};

    #[test]
    fn class_list_conflicts() {
        let mut list = ClassList::new();
        list.record(VertexId(0), Class::Inside).unwrap();
        list.record(VertexId(0), Class::Inside).unwrap();
        let err = list.record(VertexId(0), Class::Outside).unwrap_err();
        let text = err.to_string();
        assert!(text.contains("inside") && text.contains("outside"));
        assert!(list.reclassify_anti(VertexId(0)).is_err());
        assert_eq!(list.get(VertexId(0)), Some(Class::Inside));
    }

    #[test]
    fn class_list_on_rewrite() {
        let mut list = ClassList::new();
        list.record(EdgeId(2), Class::OnShared).unwrap();
        list.reclassify_anti(EdgeId(2)).unwrap();
        assert_eq!(list.get(EdgeId(2)), Some(Class::OnAnti));
        assert!(list.record(EdgeId(2), Class::OnShared).is_err());
        list.reclassify_anti(EdgeId(3)).unwrap();
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn face_summary() {
        let fc = FaceClassification {
            face: FaceId(0),
            loops: vec![(LoopId(0), Class::OnAnti), (LoopId(1), Class::OnShared)],
        };
        assert_eq!(fc.summary(), Class::OnAnti);
        let fc = FaceClassification {
            face: FaceId(0),
            loops: vec![(LoopId(0), Class::OnShared), (LoopId(1), Class::OnShared)],
        };
        assert_eq!(fc.summary(), Class::OnShared);
        let fc = FaceClassification {
            face: FaceId(0),
            loops: vec![(LoopId(0), Class::Outside), (LoopId(1), Class::Inside)],
        };
        assert_eq!(fc.summary(), Class::Outside);
        let fc = FaceClassification {
            face: FaceId(0),
            loops: vec![(LoopId(0), Class::Inside), (LoopId(1), Class::OnShared)],
        };
        assert_eq!(fc.summary(), Class::Inside);
    }
}
