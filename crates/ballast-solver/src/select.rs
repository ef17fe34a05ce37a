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

//! Best-sum selection over a completed reachability pass.
//!
//! The reachability vector is sized to the scaled admissible bound, so the
//! largest admissible sum is simply the highest set bit. Scanning downward
//! returns on the first hit; sum 0 (the empty subset) is set by
//! `ReachState::prepare`, so the scan always terminates with a result and
//! "no non-empty subset fits" surfaces as 0, not as an error.

use crate::reach::ReachState;

/// Returns the largest reachable scaled sum, scanning downward from the
/// admissible bound. Returns 0 when only the empty subset fits.
#[inline]
pub fn best_reachable_sum(state: &ReachState) -> usize {
    (0..state.num_cells())
        .rev()
        .find(|&sum| state.is_reachable(sum))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_state_selects_zero() {
        let mut state = ReachState::new();
        state.prepare(10);
        assert_eq!(best_reachable_sum(&state), 0);
    }

    #[test]
    fn test_selects_largest_reachable_sum() {
        let mut state = ReachState::new();
        state.prepare(12);
        state.apply_item(0, 4);
        state.apply_item(1, 4);

        // Reachable sums: {0, 4, 8}. The bound 11 itself is unreachable.
        assert_eq!(best_reachable_sum(&state), 8);
    }

    #[test]
    fn test_bound_itself_wins_when_reachable() {
        let mut state = ReachState::new();
        state.prepare(7);
        state.apply_item(0, 6);
        assert_eq!(best_reachable_sum(&state), 6);
    }
}
