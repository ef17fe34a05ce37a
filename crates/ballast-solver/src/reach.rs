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

//! # Reachability State
//!
//! The heart of the 0/1 selection DP: a bit-vector over scaled sums
//! (`FixedBitSet`) paired with a provenance arena recording, for every
//! reached sum, which item first reached it. Provenance is a flat `Vec<u32>`
//! of item positions with two sentinels — no per-state allocation, no
//! pointer graph.
//!
//! ## Invariants
//!
//! - Cell 0 is always reachable (the empty subset) and carries the
//!   [`BASE_SENTINEL`].
//! - `apply_item` walks sums from high to low, so an item is never combined
//!   with a sum that already includes it: strict 0/1 selection, never
//!   unbounded reuse.
//! - Provenance entries along any backtracking chain hold strictly
//!   decreasing item positions, so every chain is acyclic and at most
//!   `num_items` long.
//!
//! The state is exclusively owned by one solve call at a time; `prepare`
//! re-initializes it in place so a reused solver does not reallocate.

use fixedbitset::FixedBitSet;

/// Provenance sentinel: this sum has not been reached by any subset.
pub const UNREACHED_SENTINEL: u32 = u32::MAX;

/// Provenance sentinel: the empty-subset base at sum 0, terminating every
/// backtracking chain.
pub const BASE_SENTINEL: u32 = u32::MAX - 1;

/// Reachability bit-vector plus provenance arena for one solve call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReachState {
    reachable: FixedBitSet,
    provenance: Vec<u32>,
}

impl ReachState {
    /// Creates an empty state. Call [`ReachState::prepare`] before use.
    #[inline]
    pub fn new() -> Self {
        Self {
            reachable: FixedBitSet::new(),
            provenance: Vec::new(),
        }
    }

    /// Creates a state with storage preallocated for `num_cells` sums.
    ///
    /// # Note
    ///
    /// `prepare` grows storage on demand either way; preallocating only
    /// moves the allocation cost to construction time.
    #[inline]
    pub fn preallocated(num_cells: usize) -> Self {
        Self {
            reachable: FixedBitSet::with_capacity(num_cells),
            provenance: Vec::with_capacity(num_cells),
        }
    }

    /// Re-initializes the state for a solve over `num_cells` sums: only
    /// sum 0 (the empty subset) is reachable, all provenance is cleared.
    ///
    /// # Panics
    ///
    /// Panics if `num_cells` is zero; the empty sum always needs a cell.
    pub fn prepare(&mut self, num_cells: usize) {
        assert!(
            num_cells >= 1,
            "called `ReachState::prepare` with zero cells; sum 0 always needs a cell"
        );

        self.reachable.grow(num_cells);
        self.reachable.clear();
        self.provenance.clear();
        self.provenance.resize(num_cells, UNREACHED_SENTINEL);

        self.reachable.insert(0);
        self.provenance[0] = BASE_SENTINEL;
    }

    /// Clears the logical state without deallocating storage.
    #[inline]
    pub fn reset(&mut self) {
        self.reachable.clear();
        self.provenance.clear();
    }

    /// Returns the number of sum cells in the current solve.
    #[inline]
    pub fn num_cells(&self) -> usize {
        self.provenance.len()
    }

    /// Checks whether some subset of the items applied so far reaches
    /// exactly `sum`.
    ///
    /// # Panics
    ///
    /// Panics if `sum` is out of bounds.
    #[inline]
    pub fn is_reachable(&self, sum: usize) -> bool {
        debug_assert!(
            sum < self.provenance.len(),
            "called `ReachState::is_reachable` with sum out of bounds: the len is {} but the sum is {}",
            self.provenance.len(),
            sum
        );

        self.reachable.contains(sum)
    }

    /// Returns the provenance entry for `sum`: the position of the item
    /// that first reached it, [`BASE_SENTINEL`] at sum 0, or
    /// [`UNREACHED_SENTINEL`] if the sum was never reached.
    ///
    /// # Panics
    ///
    /// Panics if `sum` is out of bounds.
    #[inline]
    pub fn provenance_of(&self, sum: usize) -> u32 {
        debug_assert!(
            sum < self.provenance.len(),
            "called `ReachState::provenance_of` with sum out of bounds: the len is {} but the sum is {}",
            self.provenance.len(),
            sum
        );

        self.provenance[sum]
    }

    /// Folds one item into the reachability state.
    ///
    /// Walks sums from high to low, marking `sum` reachable whenever
    /// `sum - scaled_weight` already was. The descending order guarantees
    /// the item never combines with a sum produced by its own update within
    /// this pass. Provenance is recorded only for newly reached sums, so
    /// earlier items keep their entries.
    ///
    /// Items whose scaled weight does not fit the vector are a no-op.
    pub fn apply_item(&mut self, item_position: u32, scaled_weight: usize) {
        debug_assert!(
            scaled_weight >= 1,
            "called `ReachState::apply_item` with zero scaled weight"
        );
        debug_assert!(
            item_position < BASE_SENTINEL,
            "called `ReachState::apply_item` with item position colliding with a sentinel"
        );

        let num_cells = self.provenance.len();
        if scaled_weight >= num_cells {
            return;
        }

        for sum in (scaled_weight..num_cells).rev() {
            if !self.reachable.contains(sum) && self.reachable.contains(sum - scaled_weight) {
                self.reachable.insert(sum);
                self.provenance[sum] = item_position;
            }
        }
    }
}

impl Default for ReachState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prepare_only_empty_sum_reachable() {
        let mut state = ReachState::new();
        state.prepare(8);

        assert_eq!(state.num_cells(), 8);
        assert!(state.is_reachable(0));
        assert_eq!(state.provenance_of(0), BASE_SENTINEL);
        for sum in 1..8 {
            assert!(!state.is_reachable(sum));
            assert_eq!(state.provenance_of(sum), UNREACHED_SENTINEL);
        }
    }

    #[test]
    fn test_single_item_reaches_its_weight() {
        let mut state = ReachState::new();
        state.prepare(8);
        state.apply_item(0, 3);

        assert!(state.is_reachable(3));
        assert_eq!(state.provenance_of(3), 0);
        // One copy of the item must not be reused: 6 stays unreachable.
        assert!(!state.is_reachable(6));
    }

    #[test]
    fn test_two_items_combine() {
        let mut state = ReachState::new();
        state.prepare(8);
        state.apply_item(0, 3);
        state.apply_item(1, 3);

        assert!(state.is_reachable(6));
        assert_eq!(state.provenance_of(6), 1);
        // Item 0 reached sum 3 first; item 1 must not overwrite it.
        assert_eq!(state.provenance_of(3), 0);
    }

    #[test]
    fn test_oversized_item_is_noop() {
        let mut state = ReachState::new();
        state.prepare(4);
        state.apply_item(0, 10);

        for sum in 1..4 {
            assert!(!state.is_reachable(sum));
        }
    }

    #[test]
    fn test_prepare_reinitializes_previous_run() {
        let mut state = ReachState::new();
        state.prepare(8);
        state.apply_item(0, 2);
        assert!(state.is_reachable(2));

        state.prepare(6);
        assert_eq!(state.num_cells(), 6);
        assert!(!state.is_reachable(2));
        assert_eq!(state.provenance_of(2), UNREACHED_SENTINEL);
        assert!(state.is_reachable(0));
    }

    #[test]
    fn test_reset_clears_logical_state() {
        let mut state = ReachState::preallocated(16);
        state.prepare(16);
        state.apply_item(0, 5);
        state.reset();
        assert_eq!(state.num_cells(), 0);
    }
}
