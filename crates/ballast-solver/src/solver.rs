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

//! # Subset Solver
//!
//! The stateful engine tying the pipeline together: scale the weights,
//! run the reachability pass under monitor supervision, select the best
//! admissible sum, and reconstruct the item indices behind it. Each solve
//! call walks `SCALING → DP → SELECTING → RECONSTRUCTING`; a deadline hit
//! during the DP aborts the call with all partial state discarded.
//!
//! The solver owns a reusable [`ReachState`]; repeated solves on one
//! solver value reuse its allocations (`preallocated` moves the first
//! allocation to construction time, `reset` after each run keeps
//! capacity). A solver value is single-threaded by design — for
//! parallelism, run independent solver values on independent threads;
//! they share nothing.
//!
//! A search session object encapsulates per-run state, statistics, and
//! timing, keeping the solver itself free of per-call fields.

use crate::{
    monitor::{
        composite::CompositeMonitor,
        deadline::DeadlineMonitor,
        no_op::NoOperationMonitor,
        solve_monitor::{SearchCommand, SolveMonitor, TerminateReason},
    },
    reach::ReachState,
    reconstruct::reconstruct_items,
    result::{SolveError, SolveOutcome},
    scale::{ScaleDecision, ScalePolicy},
    select::best_reachable_sum,
    stats::{SolveStatistics, SolveStatisticsBuilder},
};
use ballast_model::{
    instance::{Instance, WeightNumeric},
    solution::Solution,
};
use std::time::{Duration, Instant};

/// Parameters of a single solve call.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SolveParams {
    timeout_seconds: Option<f64>,
}

impl SolveParams {
    /// Creates parameters with no deadline.
    #[inline]
    pub fn unbounded() -> Self {
        Self {
            timeout_seconds: None,
        }
    }

    /// Creates parameters with a wall-clock timeout in seconds.
    ///
    /// The value is validated when the solve starts: it must be positive
    /// and finite.
    #[inline]
    pub fn with_timeout(seconds: f64) -> Self {
        Self {
            timeout_seconds: Some(seconds),
        }
    }

    /// Returns the timeout in seconds, if any.
    #[inline]
    pub fn timeout_seconds(&self) -> Option<f64> {
        self.timeout_seconds
    }
}

/// A deadline-aware approximate subset-sum solver.
///
/// Holds the scale policy and the reusable reachability state. The solver
/// carries no per-call data; concurrent solves require separate solver
/// values.
#[derive(Debug, Clone)]
pub struct SubsetSolver {
    policy: ScalePolicy,
    state: ReachState,
}

impl Default for SubsetSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl SubsetSolver {
    /// Creates a new solver with the default scale policy.
    #[inline]
    pub fn new() -> Self {
        Self {
            policy: ScalePolicy::new(),
            state: ReachState::new(),
        }
    }

    /// Creates a new solver with storage preallocated for `num_cells`
    /// reachability cells.
    #[inline]
    pub fn preallocated(num_cells: usize) -> Self {
        Self {
            policy: ScalePolicy::new(),
            state: ReachState::preallocated(num_cells),
        }
    }

    /// Replaces the scale policy.
    #[inline]
    pub fn with_scale_policy(mut self, policy: ScalePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns the scale policy.
    #[inline]
    pub fn scale_policy(&self) -> &ScalePolicy {
        &self.policy
    }

    /// Solves the instance under the given parameters.
    ///
    /// The deadline, if any, is fixed once at call start from the timeout;
    /// it is enforced by a passive per-item clock check inside the
    /// reachability pass.
    ///
    /// # Errors
    ///
    /// Returns [`SolveError::InvalidTimeout`] for a non-positive or
    /// non-finite timeout (before any work), and
    /// [`SolveError::DeadlineExceeded`] if the deadline elapses before the
    /// pass completes.
    pub fn solve<T>(
        &mut self,
        instance: &Instance<T>,
        params: &SolveParams,
    ) -> Result<SolveOutcome, SolveError>
    where
        T: WeightNumeric,
    {
        let time_budget = Self::validate_timeout(params)?;

        match time_budget {
            Some(budget) => {
                // Capture the absolute deadline before scaling so the whole
                // call, not just the DP, counts against it.
                let monitor = DeadlineMonitor::from_timeout(budget);
                let decision = self.policy.scale_for(
                    instance.num_items(),
                    instance.capacity().into(),
                    instance.admissible_bound(),
                    Some(budget),
                );
                self.run(instance, decision, monitor)
            }
            None => {
                let decision = self.policy.scale_for(
                    instance.num_items(),
                    instance.capacity().into(),
                    instance.admissible_bound(),
                    None,
                );
                self.run(instance, decision, NoOperationMonitor::new())
            }
        }
    }

    /// Solves the instance with an additional caller-supplied monitor
    /// (progress logging, custom stop conditions).
    ///
    /// The deadline monitor, when a timeout is set, is polled before the
    /// caller's monitor.
    ///
    /// # Errors
    ///
    /// In addition to the errors of [`SubsetSolver::solve`], returns
    /// [`SolveError::Terminated`] carrying the monitor's reason when the
    /// caller's monitor stops the solve.
    pub fn solve_with_monitor<T, S>(
        &mut self,
        instance: &Instance<T>,
        params: &SolveParams,
        monitor: S,
    ) -> Result<SolveOutcome, SolveError>
    where
        T: WeightNumeric,
        S: SolveMonitor,
    {
        let time_budget = Self::validate_timeout(params)?;

        let mut composite = CompositeMonitor::with_capacity(2);
        if let Some(budget) = time_budget {
            composite.add_monitor(DeadlineMonitor::from_timeout(budget));
        }
        composite.add_monitor(monitor);

        let decision = self.policy.scale_for(
            instance.num_items(),
            instance.capacity().into(),
            instance.admissible_bound(),
            time_budget,
        );
        self.run(instance, decision, composite)
    }

    /// Solves the instance exactly: no scaling, no deadline.
    ///
    /// A convenience entry point for small inputs. Memory and runtime are
    /// proportional to `num_items × (capacity + allow_higher)`; for large
    /// capacities use [`SubsetSolver::solve`], which buckets weights to
    /// stay within budget.
    ///
    /// # Errors
    ///
    /// Returns [`SolveError::ExactBoundTooLarge`] before any work when the
    /// admissible bound needs more cells than the scale policy permits.
    pub fn solve_exact<T>(&mut self, instance: &Instance<T>) -> Result<SolveOutcome, SolveError>
    where
        T: WeightNumeric,
    {
        let bound = instance.admissible_bound();
        let max_cells = self.policy.max_scaled_cells();
        // An unscaled pass allocates bound + 1 cells; refuse instead of
        // attempting an allocation that cannot succeed.
        if bound as u128 + 1 > max_cells as u128 {
            return Err(SolveError::ExactBoundTooLarge {
                admissible_bound: bound,
                max_cells,
            });
        }

        let decision = ScaleDecision::exact(bound);
        match self.run(instance, decision, NoOperationMonitor::new()) {
            Ok(outcome) => Ok(outcome),
            // No monitor can terminate an undeadlined run.
            Err(_) => unreachable!("exact solve aborted without a deadline"),
        }
    }

    fn validate_timeout(params: &SolveParams) -> Result<Option<Duration>, SolveError> {
        match params.timeout_seconds() {
            Some(seconds) if seconds.is_finite() && seconds > 0.0 => {
                Ok(Some(Duration::from_secs_f64(seconds)))
            }
            Some(seconds) => Err(SolveError::InvalidTimeout { seconds }),
            None => Ok(None),
        }
    }

    fn run<T, S>(
        &mut self,
        instance: &Instance<T>,
        decision: ScaleDecision,
        monitor: S,
    ) -> Result<SolveOutcome, SolveError>
    where
        T: WeightNumeric,
        S: SolveMonitor,
    {
        let session = SolveSession::new(&mut self.state, instance, decision, monitor);
        let result = session.run();
        self.state.reset();
        result
    }
}

/// A single solve run: per-call state, statistics, and timing.
struct SolveSession<'a, T, S> {
    state: &'a mut ReachState,
    instance: &'a Instance<T>,
    decision: ScaleDecision,
    monitor: S,
    items_processed: usize,
    start_time: Instant,
}

impl<'a, T, S> SolveSession<'a, T, S>
where
    T: WeightNumeric,
    S: SolveMonitor,
{
    fn new(
        state: &'a mut ReachState,
        instance: &'a Instance<T>,
        decision: ScaleDecision,
        monitor: S,
    ) -> Self {
        Self {
            state,
            instance,
            decision,
            monitor,
            items_processed: 0,
            start_time: Instant::now(),
        }
    }

    fn run(mut self) -> Result<SolveOutcome, SolveError> {
        let num_cells = self.decision.num_cells();
        self.state.prepare(num_cells);
        self.monitor
            .on_enter_solve(self.instance.num_items(), num_cells);

        let factor = self.decision.factor();
        let scaled_bound = self.decision.scaled_bound();

        for (position, &weight) in self.instance.weights().iter().enumerate() {
            let scaled: u64 = Into::<u64>::into(weight).div_ceil(factor);
            // Items that cannot fit under the bound still count as
            // processed, but never touch the vector.
            if scaled <= scaled_bound {
                self.state.apply_item(position as u32, scaled as usize);
            }

            self.items_processed += 1;
            self.monitor.on_item_processed(self.items_processed);

            if let SearchCommand::Terminate(reason) = self.monitor.solve_command() {
                self.monitor.on_exit_solve();
                let statistics = self.build_statistics();
                return Err(match reason {
                    TerminateReason::DeadlineExceeded => {
                        SolveError::DeadlineExceeded { statistics }
                    }
                    TerminateReason::Custom(reason) => {
                        SolveError::Terminated { reason, statistics }
                    }
                });
            }
        }

        self.monitor.on_exit_solve();

        let best = best_reachable_sum(self.state);

        let instance = self.instance;
        let items = reconstruct_items(self.state, best, |item| {
            Into::<u64>::into(instance.weights()[item]).div_ceil(factor) as usize
        });

        let total_weight: u64 = items
            .iter()
            .map(|&item| Into::<u64>::into(instance.weight(item)))
            .sum();
        debug_assert!(
            total_weight <= instance.admissible_bound(),
            "achieved sum {} exceeds admissible bound {}",
            total_weight,
            instance.admissible_bound()
        );

        let solution = if items.is_empty() {
            Solution::empty()
        } else {
            Solution::new(total_weight, items)
        };
        let statistics = self.build_statistics();

        Ok(if self.decision.is_exact() {
            SolveOutcome::certified(solution, statistics)
        } else {
            SolveOutcome::approximate(solution, statistics)
        })
    }

    fn build_statistics(&self) -> SolveStatistics {
        SolveStatisticsBuilder::new()
            .scale_factor(self.decision.factor())
            .items_processed(self.items_processed)
            .num_items(self.instance.num_items())
            .dp_cells(self.decision.num_cells())
            .solve_duration(self.start_time.elapsed())
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ballast_model::instance::InstanceBuilder;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn instance(weights: &[u64], capacity: u64, allow_higher: u64) -> Instance<u64> {
        InstanceBuilder::new(capacity)
            .with_allow_higher(allow_higher)
            .with_weights(weights)
            .build()
            .unwrap()
    }

    fn achieved_sum(outcome: &SolveOutcome) -> u64 {
        outcome.solution().total_weight()
    }

    #[test]
    fn test_exact_sum_is_found() {
        let instance = instance(&[1, 2, 3], 3, 0);
        let mut solver = SubsetSolver::new();
        let outcome = solver.solve(&instance, &SolveParams::unbounded()).unwrap();

        assert!(outcome.result().is_certified());
        assert_eq!(achieved_sum(&outcome), 3);
    }

    #[test]
    fn test_indices_distinct_and_in_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let weights: Vec<u64> = (0..200).map(|_| rng.random_range(1..50)).collect();
        let total: u64 = weights.iter().sum();
        let instance = instance(&weights, total * 3 / 5, 0);

        let mut solver = SubsetSolver::new();
        let outcome = solver.solve(&instance, &SolveParams::unbounded()).unwrap();

        let mut positions: Vec<usize> =
            outcome.solution().items().iter().map(|i| i.get()).collect();
        assert!(positions.iter().all(|&p| p < weights.len()));
        positions.sort_unstable();
        assert!(positions.windows(2).all(|pair| pair[0] != pair[1]));

        let recomputed: u64 = positions.iter().map(|&p| weights[p]).sum();
        assert_eq!(recomputed, achieved_sum(&outcome));
        assert!(recomputed <= instance.admissible_bound());
    }

    #[test]
    fn test_overshoot_allows_higher_sum() {
        // Two items of weight 4 beat a single one once a slack of 4 admits
        // sums up to 11.
        let instance = instance(&[4, 4, 4], 7, 4);
        let mut solver = SubsetSolver::new();
        let outcome = solver.solve(&instance, &SolveParams::unbounded()).unwrap();

        assert_eq!(achieved_sum(&outcome), 8);
        assert_eq!(outcome.solution().num_items(), 2);
    }

    #[test]
    fn test_monotonic_in_allow_higher() {
        let weights = [5u64, 7, 9];
        let mut solver = SubsetSolver::new();

        let mut previous = 0;
        for allow_higher in 0..=6 {
            let instance = instance(&weights, 10, allow_higher);
            let outcome = solver.solve(&instance, &SolveParams::unbounded()).unwrap();
            let sum = achieved_sum(&outcome);
            assert!(
                sum >= previous,
                "allow_higher {} decreased the sum: {} < {}",
                allow_higher,
                sum,
                previous
            );
            assert!(sum <= 10 + allow_higher);
            previous = sum;
        }
    }

    #[test]
    fn test_monotonic_in_allow_higher_under_scaling() {
        // 100 items of weight 3 against capacity 99; a budget this small
        // forces bucketing, and the bucket width must not grow with the
        // overshoot allowance.
        let weights = vec![3u64; 100];
        let mut solver = SubsetSolver::new()
            .with_scale_policy(ScalePolicy::new().with_default_ops_budget(5_000));

        let mut previous = 0;
        for allow_higher in 0..=12 {
            let instance = instance(&weights, 99, allow_higher);
            let outcome = solver.solve(&instance, &SolveParams::unbounded()).unwrap();
            assert!(outcome.statistics().scale_factor > 1);

            let sum = achieved_sum(&outcome);
            assert!(
                sum >= previous,
                "allow_higher {} decreased the sum: {} < {}",
                allow_higher,
                sum,
                previous
            );
            assert!(sum <= 99 + allow_higher);
            previous = sum;
        }
    }

    #[test]
    fn test_no_feasible_subset_yields_empty_solution() {
        let instance = instance(&[10, 12, 14], 5, 2);
        let mut solver = SubsetSolver::new();
        let outcome = solver.solve(&instance, &SolveParams::unbounded()).unwrap();

        assert!(outcome.solution().is_empty());
        assert_eq!(achieved_sum(&outcome), 0);
        assert!(outcome.result().is_certified());
    }

    #[test]
    fn test_empty_instance_yields_empty_solution() {
        let instance = instance(&[], 100, 0);
        let mut solver = SubsetSolver::new();
        let outcome = solver.solve(&instance, &SolveParams::unbounded()).unwrap();
        assert!(outcome.solution().is_empty());
    }

    #[test]
    fn test_zero_capacity_yields_empty_solution() {
        let instance = instance(&[1, 2, 3], 0, 0);
        let mut solver = SubsetSolver::new();
        let outcome = solver.solve(&instance, &SolveParams::unbounded()).unwrap();
        assert!(outcome.solution().is_empty());
    }

    #[test]
    fn test_parity_blocks_odd_capacity() {
        // All weights even, capacity odd: the best admissible sum is at
        // most capacity - 1 until the slack admits an even sum above it.
        let mut solver = SubsetSolver::new();

        let blocked = instance(&[2, 4, 6], 7, 0);
        let outcome = solver.solve(&blocked, &SolveParams::unbounded()).unwrap();
        assert_eq!(achieved_sum(&outcome), 6);

        let slack = instance(&[2, 4, 6], 7, 1);
        let outcome = solver.solve(&slack, &SolveParams::unbounded()).unwrap();
        assert_eq!(achieved_sum(&outcome), 8);
    }

    #[test]
    fn test_deadline_exceeded_on_tiny_timeout() {
        let weights: Vec<u64> = (0..4_000).map(|i| (i % 997) + 1).collect();
        let instance = instance(&weights, 1_000_000, 0);

        let mut solver = SubsetSolver::new();
        let result = solver.solve(&instance, &SolveParams::with_timeout(1e-9));

        match result {
            Err(SolveError::DeadlineExceeded { statistics }) => {
                // At least one item was attempted before the abort.
                assert!(statistics.items_processed >= 1);
                assert!(statistics.items_processed < weights.len());
            }
            other => panic!("expected DeadlineExceeded, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_timeouts_rejected_before_work() {
        let instance = instance(&[1, 2, 3], 3, 0);
        let mut solver = SubsetSolver::new();

        for seconds in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            let result = solver.solve(&instance, &SolveParams::with_timeout(seconds));
            assert!(
                matches!(result, Err(SolveError::InvalidTimeout { .. })),
                "timeout {} was not rejected",
                seconds
            );
        }
    }

    #[test]
    fn test_determinism_without_time_pressure() {
        let mut rng = StdRng::seed_from_u64(99);
        let weights: Vec<u64> = (0..500).map(|_| rng.random_range(1..100)).collect();
        let total: u64 = weights.iter().sum();
        let instance = instance(&weights, total / 2, 0);

        let mut solver = SubsetSolver::new();
        let first = solver.solve(&instance, &SolveParams::with_timeout(60.0)).unwrap();
        let second = solver.solve(&instance, &SolveParams::with_timeout(60.0)).unwrap();

        assert_eq!(first.solution(), second.solution());
    }

    #[test]
    fn test_dense_instance_reaches_capacity() {
        // Weights in [3, 10) at this count make every mid-range sum
        // reachable, so the exact DP should land on the capacity itself.
        let mut rng = StdRng::seed_from_u64(42);
        let weights: Vec<u64> = (0..1_000).map(|_| rng.random_range(3..10)).collect();
        let total: u64 = weights.iter().sum();
        let capacity = total * 4 / 5;
        let instance = instance(&weights, capacity, 0);

        let mut solver = SubsetSolver::new();
        let outcome = solver.solve(&instance, &SolveParams::unbounded()).unwrap();

        let sum = achieved_sum(&outcome);
        assert!(sum <= capacity);
        assert!(
            capacity - sum <= 2,
            "achieved {} is too far below capacity {}",
            sum,
            capacity
        );
    }

    #[test]
    fn test_scaled_solve_respects_bound() {
        // A small operation budget forces bucketing; the achieved sum must
        // still respect the admissible bound.
        let mut rng = StdRng::seed_from_u64(17);
        let weights: Vec<u64> = (0..5_000).map(|_| rng.random_range(1..10_000)).collect();
        let instance = instance(&weights, 1_000_000, 0);

        let mut solver = SubsetSolver::new()
            .with_scale_policy(ScalePolicy::new().with_default_ops_budget(10_000_000));
        let outcome = solver.solve(&instance, &SolveParams::unbounded()).unwrap();

        assert!(outcome.statistics().scale_factor > 1);
        assert!(!outcome.result().is_certified());
        assert!(achieved_sum(&outcome) <= instance.admissible_bound());

        let recomputed: u64 = outcome
            .solution()
            .items()
            .iter()
            .map(|&item| instance.weight(item))
            .sum();
        assert_eq!(recomputed, achieved_sum(&outcome));
    }

    #[test]
    fn test_solve_exact_matches_unpressured_solve() {
        let weights = [3u64, 5, 8, 13, 21];
        let instance = instance(&weights, 30, 0);

        let mut solver = SubsetSolver::new();
        let exact = solver.solve_exact(&instance).unwrap();
        let solved = solver.solve(&instance, &SolveParams::unbounded()).unwrap();

        assert!(exact.result().is_certified());
        assert_eq!(
            exact.solution().total_weight(),
            solved.solution().total_weight()
        );
    }

    #[test]
    fn test_custom_monitor_stop_keeps_its_reason() {
        struct ItemLimitMonitor {
            limit: usize,
            seen: usize,
        }

        impl SolveMonitor for ItemLimitMonitor {
            fn name(&self) -> &str {
                "ItemLimitMonitor"
            }

            fn on_enter_solve(&mut self, _num_items: usize, _num_cells: usize) {}

            fn on_exit_solve(&mut self) {}

            fn on_item_processed(&mut self, items_processed: usize) {
                self.seen = items_processed;
            }

            fn solve_command(&mut self) -> SearchCommand {
                if self.seen >= self.limit {
                    SearchCommand::Terminate(TerminateReason::Custom(
                        "item limit reached".to_string(),
                    ))
                } else {
                    SearchCommand::Continue
                }
            }
        }

        let instance = instance(&[1u64; 10], 10, 0);
        let mut solver = SubsetSolver::new();
        let monitor = ItemLimitMonitor { limit: 3, seen: 0 };

        let result = solver.solve_with_monitor(&instance, &SolveParams::unbounded(), monitor);
        match result {
            Err(SolveError::Terminated { reason, statistics }) => {
                assert_eq!(reason, "item limit reached");
                assert_eq!(statistics.items_processed, 3);
            }
            other => panic!("expected Terminated, got {:?}", other),
        }
    }

    #[test]
    fn test_solve_exact_rejects_oversized_bound() {
        let instance = instance(&[1, 2, 3], u64::MAX - 1, 1);
        let mut solver = SubsetSolver::new();

        match solver.solve_exact(&instance) {
            Err(SolveError::ExactBoundTooLarge {
                admissible_bound,
                max_cells,
            }) => {
                assert_eq!(admissible_bound, u64::MAX);
                assert_eq!(max_cells, ScalePolicy::DEFAULT_MAX_SCALED_CELLS);
            }
            other => panic!("expected ExactBoundTooLarge, got {:?}", other),
        }
    }

    #[test]
    fn test_solver_reuse_across_solves() {
        let mut solver = SubsetSolver::preallocated(1024);

        let first = instance(&[1, 2, 3], 3, 0);
        let second = instance(&[4, 4, 4], 7, 4);

        assert_eq!(
            solver
                .solve(&first, &SolveParams::unbounded())
                .unwrap()
                .solution()
                .total_weight(),
            3
        );
        assert_eq!(
            solver
                .solve(&second, &SolveParams::unbounded())
                .unwrap()
                .solution()
                .total_weight(),
            8
        );
    }

    #[test]
    fn test_solve_with_monitor_observes_items() {
        use crate::monitor::log::ProgressLogMonitor;
        use std::time::Duration;

        let instance = instance(&[1, 2, 3, 4], 6, 0);
        let mut solver = SubsetSolver::new();
        let monitor = ProgressLogMonitor::new(Duration::from_secs(3600));

        let outcome = solver
            .solve_with_monitor(&instance, &SolveParams::with_timeout(60.0), monitor)
            .unwrap();
        assert_eq!(outcome.solution().total_weight(), 6);
        assert_eq!(outcome.statistics().items_processed, 4);
    }
}
