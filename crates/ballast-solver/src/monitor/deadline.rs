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

//! # Deadline Monitor
//!
//! Enforces a wall-clock deadline on the reachability pass. The deadline is
//! an absolute `Instant` captured once when the monitor is constructed (at
//! call start), then compared passively at every per-item checkpoint. There
//! is no preemption and no separate thread: a solve only stops at the
//! checkpoints the engine polls.
//!
//! Unlike a step-masked time limit, this monitor checks the clock at every
//! poll. The engine polls once per item, and a single item's update is
//! orders of magnitude more work than an `Instant` comparison, so no mask
//! is needed.

use crate::monitor::solve_monitor::{SearchCommand, SolveMonitor, TerminateReason};
use std::time::{Duration, Instant};

/// A monitor that requests termination once an absolute deadline passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeadlineMonitor {
    deadline: Instant,
}

impl DeadlineMonitor {
    /// Creates a monitor that terminates the solve once `deadline` passes.
    #[inline]
    pub fn until(deadline: Instant) -> Self {
        Self { deadline }
    }

    /// Creates a monitor whose deadline is `timeout` from now.
    #[inline]
    pub fn from_timeout(timeout: Duration) -> Self {
        Self {
            deadline: Instant::now() + timeout,
        }
    }

    /// Returns the absolute deadline.
    #[inline]
    pub fn deadline(&self) -> Instant {
        self.deadline
    }
}

impl SolveMonitor for DeadlineMonitor {
    fn name(&self) -> &str {
        "DeadlineMonitor"
    }

    fn on_enter_solve(&mut self, _num_items: usize, _num_cells: usize) {}

    fn on_exit_solve(&mut self) {}

    #[inline(always)]
    fn on_item_processed(&mut self, _items_processed: usize) {}

    #[inline(always)]
    fn solve_command(&mut self) -> SearchCommand {
        if Instant::now() >= self.deadline {
            return SearchCommand::Terminate(TerminateReason::DeadlineExceeded);
        }
        SearchCommand::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expired_deadline_terminates() {
        let mut monitor = DeadlineMonitor::until(Instant::now() - Duration::from_millis(50));
        assert_eq!(
            monitor.solve_command(),
            SearchCommand::Terminate(TerminateReason::DeadlineExceeded)
        );
    }

    #[test]
    fn test_future_deadline_continues() {
        let mut monitor = DeadlineMonitor::from_timeout(Duration::from_secs(3600));
        assert_eq!(monitor.solve_command(), SearchCommand::Continue);
    }

    #[test]
    fn test_zero_timeout_terminates_immediately() {
        let mut monitor = DeadlineMonitor::from_timeout(Duration::ZERO);
        assert!(matches!(
            monitor.solve_command(),
            SearchCommand::Terminate(_)
        ));
    }
}
