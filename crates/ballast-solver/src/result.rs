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

//! Solve results and error kinds.
//!
//! A successful call always carries a solution (possibly empty — "no item
//! fits" is a valid outcome, not an error) plus statistics. The result kind
//! records how strong the answer is: `Certified` means the pass was exact
//! (scale factor 1) and completed, so the sum is provably maximal under the
//! bound; `Approximate` means bucketing rounded weights, so a slightly
//! better subset may exist.
//!
//! A deadline hit is an error, never a degraded answer: callers must opt in
//! to approximation explicitly via the scaler, not receive it silently from
//! a timeout.

use crate::stats::SolveStatistics;
use ballast_model::{instance::InstanceError, solution::Solution};

/// The result of a completed solve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveResult {
    /// The pass was exact and complete: no admissible subset sums higher.
    Certified(Solution),
    /// The pass completed under bucketing: the sum is maximal among the
    /// scaled sums explored, but rounding may have hidden a better subset.
    Approximate(Solution),
}

impl SolveResult {
    /// Checks whether the result is certified maximal.
    #[inline]
    pub fn is_certified(&self) -> bool {
        matches!(self, SolveResult::Certified(_))
    }

    /// Returns the solution.
    #[inline]
    pub fn solution(&self) -> &Solution {
        match self {
            SolveResult::Certified(solution) | SolveResult::Approximate(solution) => solution,
        }
    }

    /// Consumes the result and returns the solution.
    #[inline]
    pub fn into_solution(self) -> Solution {
        match self {
            SolveResult::Certified(solution) | SolveResult::Approximate(solution) => solution,
        }
    }
}

impl std::fmt::Display for SolveResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolveResult::Certified(solution) => {
                write!(f, "Certified(total_weight={})", solution.total_weight())
            }
            SolveResult::Approximate(solution) => {
                write!(f, "Approximate(total_weight={})", solution.total_weight())
            }
        }
    }
}

/// Result of the solver after successful termination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolveOutcome {
    result: SolveResult,
    statistics: SolveStatistics,
}

impl SolveOutcome {
    /// Constructs a certified outcome (exact, completed pass).
    #[inline]
    pub fn certified(solution: Solution, statistics: SolveStatistics) -> Self {
        Self {
            result: SolveResult::Certified(solution),
            statistics,
        }
    }

    /// Constructs an approximate outcome (completed pass under bucketing).
    #[inline]
    pub fn approximate(solution: Solution, statistics: SolveStatistics) -> Self {
        Self {
            result: SolveResult::Approximate(solution),
            statistics,
        }
    }

    /// Returns the solve result.
    #[inline]
    pub fn result(&self) -> &SolveResult {
        &self.result
    }

    /// Returns the solution.
    #[inline]
    pub fn solution(&self) -> &Solution {
        self.result.solution()
    }

    /// Returns the solver statistics.
    #[inline]
    pub fn statistics(&self) -> &SolveStatistics {
        &self.statistics
    }

    /// Consumes the outcome and returns the solution.
    #[inline]
    pub fn into_solution(self) -> Solution {
        self.result.into_solution()
    }
}

impl std::fmt::Display for SolveOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} after {:?}", self.result, self.statistics.solve_duration)
    }
}

/// The error type for solve calls.
#[derive(Debug, Clone, PartialEq)]
pub enum SolveError {
    /// The instance failed validation. No work was performed.
    InvalidInstance(InstanceError),
    /// The timeout parameter is not a positive, finite number of seconds.
    /// No work was performed.
    InvalidTimeout {
        /// The offending timeout value.
        seconds: f64,
    },
    /// The deadline elapsed before the reachability pass completed. All
    /// partial state was discarded; the statistics record how far the pass
    /// got, but no subset — even a degraded one — is returned.
    DeadlineExceeded {
        /// Statistics of the aborted call.
        statistics: SolveStatistics,
    },
    /// A caller-supplied monitor stopped the solve before completion.
    /// Distinct from [`SolveError::DeadlineExceeded`] so that custom stop
    /// conditions are not mistaken for timeouts; the monitor's reason is
    /// preserved.
    Terminated {
        /// The reason the monitor reported.
        reason: String,
        /// Statistics of the aborted call.
        statistics: SolveStatistics,
    },
    /// The admissible bound needs more reachability cells than the scale
    /// policy permits for an unscaled solve. No work was performed.
    ExactBoundTooLarge {
        /// The requested bound.
        admissible_bound: u64,
        /// The policy's cell limit.
        max_cells: u64,
    },
}

impl std::fmt::Display for SolveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInstance(error) => write!(f, "Invalid instance: {}", error),
            Self::InvalidTimeout { seconds } => write!(
                f,
                "Timeout must be a positive, finite number of seconds, got {}",
                seconds
            ),
            Self::DeadlineExceeded { statistics } => write!(
                f,
                "Deadline elapsed after processing {} of {} items",
                statistics.items_processed, statistics.num_items
            ),
            Self::Terminated { reason, statistics } => write!(
                f,
                "Solve terminated by monitor ({}) after processing {} of {} items",
                reason, statistics.items_processed, statistics.num_items
            ),
            Self::ExactBoundTooLarge {
                admissible_bound,
                max_cells,
            } => write!(
                f,
                "Admissible bound {} exceeds the {}-cell limit for an exact solve",
                admissible_bound, max_cells
            ),
        }
    }
}

impl std::error::Error for SolveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidInstance(error) => Some(error),
            _ => None,
        }
    }
}

impl From<InstanceError> for SolveError {
    fn from(error: InstanceError) -> Self {
        Self::InvalidInstance(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::SolveStatisticsBuilder;
    use ballast_model::index::ItemIndex;

    fn sample_solution() -> Solution {
        Solution::new(7, vec![ItemIndex::new(1), ItemIndex::new(0)])
    }

    #[test]
    fn test_certified_outcome() {
        let outcome = SolveOutcome::certified(sample_solution(), SolveStatisticsBuilder::new().build());
        assert!(outcome.result().is_certified());
        assert_eq!(outcome.solution().total_weight(), 7);
    }

    #[test]
    fn test_approximate_outcome() {
        let outcome =
            SolveOutcome::approximate(sample_solution(), SolveStatisticsBuilder::new().build());
        assert!(!outcome.result().is_certified());
    }

    #[test]
    fn test_deadline_error_display() {
        let statistics = SolveStatisticsBuilder::new()
            .items_processed(3)
            .num_items(10)
            .build();
        let error = SolveError::DeadlineExceeded { statistics };
        assert_eq!(
            error.to_string(),
            "Deadline elapsed after processing 3 of 10 items"
        );
    }

    #[test]
    fn test_terminated_error_display_carries_reason() {
        let statistics = SolveStatisticsBuilder::new()
            .items_processed(3)
            .num_items(10)
            .build();
        let error = SolveError::Terminated {
            reason: "item limit reached".to_string(),
            statistics,
        };
        assert_eq!(
            error.to_string(),
            "Solve terminated by monitor (item limit reached) after processing 3 of 10 items"
        );
    }

    #[test]
    fn test_invalid_instance_has_source() {
        use std::error::Error;

        let error: SolveError = InstanceError::ZeroWeight {
            index: ItemIndex::new(0),
        }
        .into();
        assert!(error.source().is_some());
    }
}
