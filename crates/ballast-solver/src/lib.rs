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

//! # Ballast Solver
//!
//! A deadline-aware approximate subset-sum solver: given a list of item
//! weights and a capacity, find the subset whose total weight gets as
//! close to the capacity as possible without exceeding it (an optional
//! `allow_higher` slack admits sums up to `capacity + allow_higher`).
//!
//! # Approach
//!
//! The engine runs a 0/1 reachability dynamic program over a bit vector
//! of candidate sums, recording for every reachable sum the item that
//! first reached it so the subset can be reconstructed afterwards. When
//! the instance is too large for the time or memory budget, weights are
//! bucketed by a scale factor chosen up front; the returned sum is then
//! approximate but never exceeds the admissible bound.
//!
//! A wall-clock deadline is enforced passively: the engine checks the
//! clock after each item and aborts with an error when the deadline has
//! passed. There is no partial result on timeout.
//!
//! # Usage
//!
//! ```rust
//! use ballast_solver::solve;
//!
//! let weights: Vec<u64> = vec![1, 2, 3];
//! let indices = solve(&weights, 3, None, 0).unwrap();
//!
//! let total: u64 = indices.iter().map(|&i| weights[i]).sum();
//! assert_eq!(total, 3);
//! ```
//!
//! For buffer reuse across calls, monitors, or custom scale policies,
//! use [`SubsetSolver`] directly.

pub mod monitor;
pub mod reach;
pub mod reconstruct;
pub mod result;
pub mod scale;
pub mod select;
pub mod solver;
pub mod stats;

pub use crate::result::{SolveError, SolveOutcome, SolveResult};
pub use crate::solver::{SolveParams, SubsetSolver};

use ballast_model::instance::{InstanceBuilder, WeightNumeric};

/// Solves a subset-sum instance and returns the positions of the chosen
/// items, in increasing order.
///
/// `timeout_seconds` of `None` runs without a deadline. The sum of the
/// chosen weights never exceeds `capacity + allow_higher`; when no item
/// subset fits, the returned vector is empty.
///
/// # Errors
///
/// Returns [`SolveError::InvalidInstance`] for zero weights or an
/// overflowing bound, [`SolveError::InvalidTimeout`] for a non-positive
/// or non-finite timeout, and [`SolveError::DeadlineExceeded`] when the
/// deadline elapses mid-solve.
pub fn solve<T>(
    weights: &[T],
    capacity: T,
    timeout_seconds: Option<f64>,
    allow_higher: T,
) -> Result<Vec<usize>, SolveError>
where
    T: WeightNumeric,
{
    let instance = InstanceBuilder::new(capacity)
        .with_allow_higher(allow_higher)
        .with_weights(weights)
        .build()?;

    let params = match timeout_seconds {
        Some(seconds) => SolveParams::with_timeout(seconds),
        None => SolveParams::unbounded(),
    };

    let mut solver = SubsetSolver::new();
    let outcome = solver.solve(&instance, &params)?;
    Ok(outcome.into_solution().into_indices())
}

/// Solves a subset-sum instance exactly, without scaling or deadlines,
/// and returns the positions of the chosen items.
///
/// Runtime and memory grow with `num_items × capacity`; intended for
/// small instances and tests.
///
/// # Errors
///
/// Returns [`SolveError::InvalidInstance`] for zero weights or an
/// overflowing bound, and [`SolveError::ExactBoundTooLarge`] for a
/// capacity that needs more cells than an unscaled solve may allocate.
pub fn solve_exact<T>(weights: &[T], capacity: T) -> Result<Vec<usize>, SolveError>
where
    T: WeightNumeric,
{
    let instance = InstanceBuilder::new(capacity).with_weights(weights).build()?;

    let mut solver = SubsetSolver::new();
    let outcome = solver.solve_exact(&instance)?;
    Ok(outcome.into_solution().into_indices())
}
