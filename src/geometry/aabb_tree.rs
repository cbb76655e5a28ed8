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

use std::cmp::Ordering;

use crate::geometry::{aabb::Aabb, point::Point3};

/// A static AABB-tree of `Copy` payloads, built once by median split.
#[derive(Clone, Debug)]
pub enum AabbTree<D> {
    Leaf {
        aabb: Aabb,
        data: D,
    },
    Node {
        aabb: Aabb,
        left: Box<AabbTree<D>>,
        right: Box<AabbTree<D>>,
        count: usize,
    },
}

impl<D: Copy> AabbTree<D> {
    /// Build an AABB-tree over `(aabb, data)` pairs. `None` for no items.
    pub fn build(items: Vec<(Aabb, D)>) -> Option<Self> {
        if items.is_empty() {
            return None;
        }
        Some(Self::build_binary_tree(items))
    }

    fn build_binary_tree(mut items: Vec<(Aabb, D)>) -> Self {
        if items.len() == 1 {
            let (aabb, data) = items[0];
            return AabbTree::Leaf { aabb, data };
        }

        // split on the longest axis of the centroid spread
        let mut spread = Aabb::around_point(&centroid(&items[0].0), 0.0);
        for (b, _) in &items[1..] {
            spread.expand(&centroid(b));
        }
        let axis = spread.longest_axis();
        items.sort_by(|(a, _), (b, _)| {
            a.center(axis)
                .partial_cmp(&b.center(axis))
                .unwrap_or(Ordering::Equal)
        });

        let mid = items.len() / 2;
        let right_items = items.split_off(mid);

        let left = Box::new(Self::build_binary_tree(items));
        let right = Box::new(Self::build_binary_tree(right_items));

        let aabb = left.aabb().union(right.aabb());
        let count = left.size() + right.size();

        AabbTree::Node {
            aabb,
            left,
            right,
            count,
        }
    }

    /// Get AABB of this node/leaf
    pub fn aabb(&self) -> &Aabb {
        match self {
            AabbTree::Leaf { aabb, .. } => aabb,
            AabbTree::Node { aabb, .. } => aabb,
        }
    }

    /// Collect every payload whose AABB intersects `query`.
    pub fn query(&self, query: &Aabb, out: &mut Vec<D>) {
        match self {
            AabbTree::Leaf { aabb, data } => {
                if aabb.intersects(query) {
                    out.push(*data);
                }
            }
            AabbTree::Node {
                aabb, left, right, ..
            } => {
                if aabb.intersects(query) {
                    left.query(query, out);
                    right.query(query, out);
                }
            }
        }
    }

    pub fn size(&self) -> usize {
        match self {
            AabbTree::Leaf { .. } => 1,
            AabbTree::Node { count, .. } => *count,
        }
    }
}

fn centroid(b: &Aabb) -> Point3 {
    Point3::new(b.center(0), b.center(1), b.center(2))
}
