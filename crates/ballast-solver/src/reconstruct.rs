// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Index reconstruction by walking provenance backward.
//!
//! Starting from the selected scaled sum, repeatedly look up the item that
//! first reached the current sum, record it, and subtract its scaled
//! weight, until the walk lands on the empty-sum base. The walk is an
//! explicit loop: chains can be as long as the full item count, which would
//! overflow the stack under recursion.
//!
//! Provenance positions strictly decrease along the chain (an item's entry
//! always points through sums reached by earlier items), so each item
//! appears at most once and the walk always terminates.

use crate::reach::{ReachState, BASE_SENTINEL, UNREACHED_SENTINEL};
use ballast_model::index::ItemIndex;

/// Recovers the item indices forming the subset that reaches
/// `selected_sum`, in increasing position order.
///
/// `scaled_weight_of` maps an item position to the scaled weight the DP
/// used for it; the caller recomputes it from the scale factor rather than
/// storing a second weight array.
pub fn reconstruct_items<F>(
    state: &ReachState,
    selected_sum: usize,
    scaled_weight_of: F,
) -> Vec<ItemIndex>
where
    F: Fn(usize) -> usize,
{
    let mut items = Vec::new();
    let mut sum = selected_sum;

    while sum != 0 {
        let position = state.provenance_of(sum);
        debug_assert_ne!(
            position, UNREACHED_SENTINEL,
            "provenance missing for reachable sum {}",
            sum
        );
        debug_assert_ne!(
            position, BASE_SENTINEL,
            "empty-sum base recorded at non-zero sum {}",
            sum
        );

        let item = position as usize;
        let scaled_weight = scaled_weight_of(item);
        debug_assert!(
            scaled_weight >= 1 && scaled_weight <= sum,
            "provenance chain inconsistent at sum {}: item {} has scaled weight {}",
            sum,
            item,
            scaled_weight
        );

        items.push(ItemIndex::new(item));
        sum -= scaled_weight;
    }

    debug_assert_eq!(state.provenance_of(0), BASE_SENTINEL);
    // The walk yields decreasing positions; callers expect ascending.
    items.reverse();
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_sum_yields_empty_subset() {
        let mut state = ReachState::new();
        state.prepare(5);
        let items = reconstruct_items(&state, 0, |_| unreachable!());
        assert!(items.is_empty());
    }

    #[test]
    fn test_single_item_chain() {
        let mut state = ReachState::new();
        state.prepare(8);
        state.apply_item(2, 5);

        let items = reconstruct_items(&state, 5, |_| 5);
        assert_eq!(items, vec![ItemIndex::new(2)]);
    }

    #[test]
    fn test_multi_item_chain_is_distinct() {
        let weights = [3usize, 4, 2];
        let mut state = ReachState::new();
        state.prepare(10);
        for (position, &weight) in weights.iter().enumerate() {
            state.apply_item(position as u32, weight);
        }

        // Sum 9 requires all three items.
        let items = reconstruct_items(&state, 9, |item| weights[item]);
        let mut positions: Vec<usize> = items.iter().map(|i| i.get()).collect();
        positions.sort_unstable();
        assert_eq!(positions, vec![0, 1, 2]);

        let total: usize = items.iter().map(|i| weights[i.get()]).sum();
        assert_eq!(total, 9);
    }

    #[test]
    fn test_result_positions_ascend() {
        let weights = [1usize, 2, 4];
        let mut state = ReachState::new();
        state.prepare(8);
        for (position, &weight) in weights.iter().enumerate() {
            state.apply_item(position as u32, weight);
        }

        let items = reconstruct_items(&state, 7, |item| weights[item]);
        let positions: Vec<usize> = items.iter().map(|i| i.get()).collect();
        assert_eq!(positions, vec![0, 1, 2]);
    }
}
