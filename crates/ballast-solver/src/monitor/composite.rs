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

//! Monitoring combinators for the solve loop.
//!
//! Provides `CompositeMonitor`, a fan-out monitor that forwards every event
//! to its children. This lets a caller mix progress logging and
//! early-stopping without coupling them to the engine.
//!
//! Behavior
//! - Events are dispatched to child monitors in insertion order.
//! - `solve_command` short-circuits on the first non-`Continue` response;
//!   put stricter stop conditions first.

use crate::monitor::solve_monitor::{SearchCommand, SolveMonitor};

/// A monitor that aggregates multiple monitors and forwards events to all
/// of them.
#[derive(Default)]
pub struct CompositeMonitor<'a> {
    monitors: Vec<Box<dyn SolveMonitor + 'a>>,
}

impl<'a> CompositeMonitor<'a> {
    /// Creates a new empty `CompositeMonitor`.
    #[inline(always)]
    pub fn new() -> Self {
        Self {
            monitors: Vec::new(),
        }
    }

    /// Creates a new `CompositeMonitor` with space for `capacity` monitors.
    #[inline(always)]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            monitors: Vec::with_capacity(capacity),
        }
    }

    /// Adds a new monitor to the composite monitor.
    #[inline(always)]
    pub fn add_monitor<M>(&mut self, monitor: M)
    where
        M: SolveMonitor + 'a,
    {
        self.monitors.push(Box::new(monitor));
    }

    /// Adds a boxed monitor to the composite monitor.
    #[inline(always)]
    pub fn add_monitor_boxed(&mut self, monitor: Box<dyn SolveMonitor + 'a>) {
        self.monitors.push(monitor);
    }

    /// Returns the number of monitors contained in the composite monitor.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.monitors.len()
    }

    /// Returns `true` if the composite monitor contains no monitors.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.monitors.is_empty()
    }

    /// Clears all monitors from the composite monitor.
    #[inline(always)]
    pub fn clear(&mut self) {
        self.monitors.clear();
    }
}

impl<'a> SolveMonitor for CompositeMonitor<'a> {
    fn name(&self) -> &str {
        "CompositeMonitor"
    }

    fn on_enter_solve(&mut self, num_items: usize, num_cells: usize) {
        for monitor in &mut self.monitors {
            monitor.on_enter_solve(num_items, num_cells);
        }
    }

    fn on_exit_solve(&mut self) {
        for monitor in &mut self.monitors {
            monitor.on_exit_solve();
        }
    }

    #[inline]
    fn on_item_processed(&mut self, items_processed: usize) {
        for monitor in &mut self.monitors {
            monitor.on_item_processed(items_processed);
        }
    }

    #[inline]
    fn solve_command(&mut self) -> SearchCommand {
        for monitor in &mut self.monitors {
            if let SearchCommand::Terminate(reason) = monitor.solve_command() {
                return SearchCommand::Terminate(reason);
            }
        }
        SearchCommand::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitor::deadline::DeadlineMonitor;
    use crate::monitor::no_op::NoOperationMonitor;
    use std::time::Duration;

    #[test]
    fn test_empty_composite_continues() {
        let mut composite = CompositeMonitor::new();
        assert!(composite.is_empty());
        assert_eq!(composite.solve_command(), SearchCommand::Continue);
    }

    #[test]
    fn test_terminating_child_wins() {
        let mut composite = CompositeMonitor::new();
        composite.add_monitor(NoOperationMonitor::new());
        composite.add_monitor(DeadlineMonitor::from_timeout(Duration::ZERO));
        assert_eq!(composite.len(), 2);

        assert!(matches!(
            composite.solve_command(),
            SearchCommand::Terminate(_)
        ));
    }

    #[test]
    fn test_events_fan_out_without_panicking() {
        let mut composite = CompositeMonitor::new();
        composite.add_monitor(NoOperationMonitor::new());
        composite.add_monitor(DeadlineMonitor::from_timeout(Duration::from_secs(60)));

        composite.on_enter_solve(10, 100);
        composite.on_item_processed(1);
        assert_eq!(composite.solve_command(), SearchCommand::Continue);
        composite.on_exit_solve();
    }
}
