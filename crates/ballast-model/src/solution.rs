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

use crate::index::ItemIndex;

/// The final solution to a subset-selection call.
///
/// Holds the selected item indices and the achieved total weight. Each index
/// appears at most once (strict 0/1 selection); the engine produces them in
/// ascending position order. Totals live in the
/// engine's `u64` sum domain, which the instance validation guarantees is
/// wide enough for any admissible sum.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solution {
    /// The achieved total weight of the selected items.
    total_weight: u64,

    /// The selected item indices, pairwise distinct.
    items: Vec<ItemIndex>,
}

impl Solution {
    /// Constructs a new `Solution`.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if `items` contains a duplicate index.
    pub fn new(total_weight: u64, items: Vec<ItemIndex>) -> Self {
        debug_assert!(
            {
                let mut sorted: Vec<usize> = items.iter().map(|i| i.get()).collect();
                sorted.sort_unstable();
                sorted.windows(2).all(|pair| pair[0] != pair[1])
            },
            "called `Solution::new` with duplicate item indices"
        );

        Self {
            total_weight,
            items,
        }
    }

    /// Constructs the empty solution (no items selected, total weight 0).
    #[inline]
    pub fn empty() -> Self {
        Self {
            total_weight: 0,
            items: Vec::new(),
        }
    }

    /// Returns the achieved total weight.
    #[inline]
    pub fn total_weight(&self) -> u64 {
        self.total_weight
    }

    /// Returns the selected item indices.
    #[inline]
    pub fn items(&self) -> &[ItemIndex] {
        &self.items
    }

    /// Returns the number of selected items.
    #[inline]
    pub fn num_items(&self) -> usize {
        self.items.len()
    }

    /// Checks whether no items were selected.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Consumes the solution and returns the selected indices as plain
    /// `usize` positions into the caller's weight array.
    #[inline]
    pub fn into_indices(self) -> Vec<usize> {
        self.items.into_iter().map(|i| i.get()).collect()
    }
}

impl std::fmt::Display for Solution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Solution(total_weight={}, num_items={})",
            self.total_weight,
            self.items.len()
        )
    }
}
