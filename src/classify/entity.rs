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
    classify::{Class, ClassList, Classifier, PointMode},
    config::EDGE_PROBE_FRACTIONS,
    error::{BrepError, BrepResult},
    topology::{Entity, EdgeUseId, ShellId, VertexId},
};

impl<'a> Classifier<'a> {
    /// ON when the vertex is used by the target shell, otherwise inside or
    /// outside by ray probing.
    pub fn classify_vertex(
        &self,
        v: VertexId,
        shell: ShellId,
        list: &mut ClassList,
    ) -> BrepResult<Class> {
        if let Some(class) = list.get(v) {
            return Ok(class);
        }
        let shared = self
            .model
            .vertex(v)
            .uses()
            .iter()
            .any(|vu| self.model.vertex_use_shell(*vu) == shell);
        let class = if shared {
            Class::OnShared
        } else {
            let p = self.model.point(v);
            match self.locate_point(p, shell, PointMode::InOrOut)? {
                Class::Unknown => {
                    return Err(BrepError::ProbeDirectionsExhausted {
                        point: *p,
                        shell,
                        tries: crate::config::PROBE_DIRECTIONS.len(),
                        tol: self.tol.dist,
                    });
                }
                class => class,
            }
        };
        self.settle(Entity::Vertex(v), shell, class, list)
    }

    /// Classifies the edge under `eu` from its endpoints, probing along the
    /// edge when both ends are on the shell without a shared edge.
    pub fn classify_edge(
        &self,
        eu: EdgeUseId,
        shell: ShellId,
        list: &mut ClassList,
    ) -> BrepResult<Class> {
        let use_ = *self.model.edge_use(eu);
        let edge = use_.edge;
        if let Some(class) = list.get(edge) {
            return Ok(class);
        }

        let s = self.model.shell(shell);
        if self.model.edge_bbox(edge).disjoint_tol(&s.bbox, self.tol.dist) {
            list.record(use_.from, Class::Outside)?;
            list.record(use_.to, Class::Outside)?;
            return self.settle(Entity::Edge(edge), shell, Class::Outside, list);
        }

        let start = self.classify_vertex(use_.from, shell, list)?;
        let end = self.classify_vertex(use_.to, shell, list)?;
        let class = match (start, end) {
            (Class::Inside, Class::Outside) | (Class::Outside, Class::Inside) => {
                return Err(BrepError::EdgeNotCut {
                    edge,
                    shell,
                    start,
                    end,
                    tol: self.tol.dist,
                });
            }
            (a, b) if a.is_on() && b.is_on() => self.classify_on_edge(eu, shell)?,
            (Class::Outside, _) | (_, Class::Outside) => Class::Outside,
            _ => Class::Inside,
        };
        self.settle(Entity::Edge(edge), shell, class, list)
    }

    /// Both endpoints are ON: the shell either shares an edge between them or
    /// the edge runs through its interior, exterior or surface.
    fn classify_on_edge(&self, eu: EdgeUseId, shell: ShellId) -> BrepResult<Class> {
        let use_ = self.model.edge_use(eu);
        let shared = self
            .model
            .edges_between(use_.from, use_.to)
            .iter()
            .flat_map(|e| self.model.edge(*e).uses())
            .any(|u| self.model.edge_use_shell(*u) == shell);
        if shared {
            return Ok(Class::OnShared);
        }

        let a = self.model.point(use_.from);
        let b = self.model.point(use_.to);
        for (i, t) in EDGE_PROBE_FRACTIONS.iter().enumerate() {
            match self.locate_point(&a.lerp(b, *t), shell, PointMode::Full)? {
                Class::Unknown => {
                    debug!(edge = use_.edge.0, try_ = i, "edge probe ambiguous");
                }
                Class::OnShared => return Ok(Class::OnAnti),
                class => return Ok(class),
            }
        }
        Err(BrepError::EdgeProbeFailed {
            edge: use_.edge,
            shell,
            tol: self.tol.dist,
        })
    }

    pub(crate) fn settle(
        &self,
        entity: Entity,
        shell: ShellId,
        class: Class,
        list: &mut ClassList,
    ) -> BrepResult<Class> {
        list.record(entity, class)?;
        self.observer.entity_classified(entity, shell, class);
        Ok(class)
    }
}
