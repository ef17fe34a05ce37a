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

//! # Weight Scaler
//!
//! Chooses the bucket width `k` that keeps the reachability DP inside its
//! compute and memory budgets. The DP performs roughly one cell update per
//! item per cell, so for a given operation budget the scale factor follows
//! directly: `k` grows until the scaled capacity times the item count fits.
//!
//! The factor is derived from the capacity alone, never from the overshoot
//! allowance. If slack entered the factor, raising `allow_higher` could
//! coarsen the buckets and lower the achieved sum, breaking the guarantee
//! that more slack never yields a worse subset. Slack instead widens the
//! admissible window `floor(bound / k)`, capped at the cell limit; a window
//! wider than the capacity-derived one costs at most the capped number of
//! extra cells, and the deadline monitor, not the scaler, guards the
//! runtime of that overhang.
//!
//! The decision is a pure function of the call inputs (item count,
//! capacity, admissible bound, timeout), which keeps repeated solves
//! deterministic.
//!
//! Rounding direction matters. Scaled item weights use ceiling division and
//! the scaled admissible bound uses floor division, so for any selected set
//! `true_sum <= k * sum(scaled) <= k * floor(bound / k) <= bound`. The hard
//! `sum <= capacity + allow_higher` guarantee therefore survives scaling;
//! coarser buckets can only exclude feasible subsets, never admit
//! inadmissible ones. Ceiling division also keeps every scaled weight at
//! least 1, so no item becomes free.
//!
//! If even the maximum clamping cannot bring an adversarial instance within
//! budget, the scaler still returns a usable decision (possibly with a
//! single-cell vector) and the engine performs a best-effort pass instead
//! of failing.

use std::time::Duration;

/// Tuning parameters for the scale decision.
///
/// All constants are documented defaults, overridable per solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScalePolicy {
    ops_per_second: u64,
    default_ops_budget: u64,
    min_ops_budget: u64,
    max_scaled_cells: u64,
}

impl ScalePolicy {
    /// Assumed DP cell updates per second, used to convert a time budget
    /// into an operation budget. Deliberately conservative.
    pub const DEFAULT_OPS_PER_SECOND: u64 = 100_000_000;

    /// Operation budget for unbounded solves. Also the ceiling for
    /// timeout-derived budgets: a generous timeout must not blow up memory
    /// or runtime beyond what an unbounded solve would use.
    pub const DEFAULT_OPS_BUDGET: u64 = 500_000_000;

    /// Floor for timeout-derived budgets. Even a near-zero timeout gets a
    /// real attempt; the deadline monitor, not the scaler, is responsible
    /// for cutting such a solve short.
    pub const MIN_OPS_BUDGET: u64 = 1_000_000;

    /// Maximum number of cells in the reachability vector (2^24). Bounds
    /// the bit-vector and the provenance arena regardless of capacity.
    pub const DEFAULT_MAX_SCALED_CELLS: u64 = 1 << 24;

    /// Creates a policy with the documented defaults.
    #[inline]
    pub fn new() -> Self {
        Self {
            ops_per_second: Self::DEFAULT_OPS_PER_SECOND,
            default_ops_budget: Self::DEFAULT_OPS_BUDGET,
            min_ops_budget: Self::MIN_OPS_BUDGET,
            max_scaled_cells: Self::DEFAULT_MAX_SCALED_CELLS,
        }
    }

    /// Sets the assumed DP cell updates per second.
    #[inline]
    pub fn with_ops_per_second(mut self, ops_per_second: u64) -> Self {
        self.ops_per_second = ops_per_second;
        self
    }

    /// Sets the operation budget used for unbounded solves and as the
    /// ceiling for timeout-derived budgets.
    #[inline]
    pub fn with_default_ops_budget(mut self, default_ops_budget: u64) -> Self {
        self.default_ops_budget = default_ops_budget;
        self
    }

    /// Sets the floor for timeout-derived operation budgets.
    #[inline]
    pub fn with_min_ops_budget(mut self, min_ops_budget: u64) -> Self {
        self.min_ops_budget = min_ops_budget;
        self
    }

    /// Sets the maximum number of reachability cells.
    #[inline]
    pub fn with_max_scaled_cells(mut self, max_scaled_cells: u64) -> Self {
        self.max_scaled_cells = max_scaled_cells.max(1);
        self
    }

    /// Returns the maximum number of reachability cells.
    #[inline]
    pub fn max_scaled_cells(&self) -> u64 {
        self.max_scaled_cells
    }

    /// Computes the scale decision for an instance of `num_items` items
    /// with the given capacity, admissible bound (`capacity + allow_higher`)
    /// and optional time budget.
    ///
    /// The factor depends only on `num_items`, `capacity`, and the time
    /// budget; `admissible_bound` only sizes the window the factor induces.
    pub fn scale_for(
        &self,
        num_items: usize,
        capacity: u64,
        admissible_bound: u64,
        time_budget: Option<Duration>,
    ) -> ScaleDecision {
        debug_assert!(
            admissible_bound >= capacity,
            "called `ScalePolicy::scale_for` with a bound below the capacity"
        );

        let ops_budget = match time_budget {
            Some(budget) => {
                let raw = (budget.as_secs_f64() * self.ops_per_second as f64) as u64;
                raw.max(self.min_ops_budget).min(self.default_ops_budget)
            }
            None => self.default_ops_budget,
        };

        let cells = capacity as u128 + 1;
        let work = num_items as u128 * cells;

        let k_time = work.div_ceil(ops_budget as u128);
        let k_mem = cells.div_ceil(self.max_scaled_cells as u128);
        let factor_wide = k_time.max(k_mem).max(1);

        // Pathological combinations (huge capacity, tiny budget) can push
        // the factor past u64; saturating leaves a single-cell best-effort
        // pass.
        let factor = u64::try_from(factor_wide).unwrap_or(u64::MAX);

        // Slack widens the window but never the factor, so the window is
        // capped at the cell limit instead.
        let scaled_bound = (admissible_bound / factor).min(self.max_scaled_cells - 1);

        ScaleDecision {
            factor,
            scaled_bound,
        }
    }
}

impl Default for ScalePolicy {
    fn default() -> Self {
        Self::new()
    }
}

/// The outcome of the scaling step: the bucket width and the scaled
/// admissible bound it induces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScaleDecision {
    factor: u64,
    scaled_bound: u64,
}

impl ScaleDecision {
    /// Creates the identity decision (`k = 1`) for an exact, unscaled DP
    /// over the full admissible bound.
    #[inline]
    pub fn exact(admissible_bound: u64) -> Self {
        Self {
            factor: 1,
            scaled_bound: admissible_bound,
        }
    }

    /// Returns the bucket width `k`.
    #[inline]
    pub fn factor(&self) -> u64 {
        self.factor
    }

    /// Returns the scaled admissible bound `floor(bound / k)`.
    #[inline]
    pub fn scaled_bound(&self) -> u64 {
        self.scaled_bound
    }

    /// Returns the number of reachability cells (`scaled_bound + 1`),
    /// saturating instead of wrapping for bounds at the edge of the
    /// address space.
    #[inline]
    pub fn num_cells(&self) -> usize {
        usize::try_from(self.scaled_bound)
            .ok()
            .and_then(|bound| bound.checked_add(1))
            .unwrap_or(usize::MAX)
    }

    /// Checks whether the decision is exact (no rounding).
    #[inline]
    pub fn is_exact(&self) -> bool {
        self.factor == 1
    }
}

impl std::fmt::Display for ScaleDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ScaleDecision(factor={}, scaled_bound={})",
            self.factor, self.scaled_bound
        )
    }
}
