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

use crate::{
    error::{BrepError, BrepResult},
    ray::{Hit, RayState},
};

/// Verifies that `hits`, sorted by distance, form a valid state chain: each
/// inbound state continues the previous outbound state, starting and ending
/// outside. Any/Any hits carry no state and are skipped.
pub fn check_hit_list(hits: &[Hit]) -> BrepResult<()> {
    let mut state = RayState::Outside;
    for (index, hit) in hits.iter().enumerate() {
        if hit.is_any_any() {
            continue;
        }
        if hit.inbound != state {
            return Err(BrepError::BadStateTransition {
                index,
                distance: hit.distance,
                expected: state,
                found: hit.inbound,
            });
        }
        state = hit.outbound;
    }
    if state != RayState::Outside {
        return Err(BrepError::BadEndingState { state });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::{Entity, FaceId, VertexId};

    fn hit(d: f64, inbound: RayState, outbound: RayState) -> Hit {
        Hit::synthetic(Entity::Face(FaceId(0)), d, inbound, outbound)
    }

    #[test]
    fn valid_chain_with_wire() {
        let mut wire = hit(3.0, RayState::Any, RayState::Any);
        wire.entity = Entity::Vertex(VertexId(9));
        let hits = [
            hit(1.0, RayState::Outside, RayState::On),
            hit(2.0, RayState::On, RayState::Inside),
            wire,
            hit(4.0, RayState::Inside, RayState::Outside),
        ];
        assert!(check_hit_list(&hits).is_ok());
        assert!(check_hit_list(&[]).is_ok());
    }

    #[test]
    fn broken_chain() {
        let hits = [
            hit(1.0, RayState::Outside, RayState::Inside),
            hit(2.0, RayState::Outside, RayState::Inside),
        ];
        assert_eq!(
            check_hit_list(&hits),
            Err(BrepError::BadStateTransition {
                index: 1,
                distance: 2.0,
                expected: RayState::Inside,
                found: RayState::Outside,
            })
        );
        let hits = [hit(1.0, RayState::Outside, RayState::Inside)];
        assert_eq!(
            check_hit_list(&hits),
            Err(BrepError::BadEndingState {
                state: RayState::Inside
            })
        );
    }
}
