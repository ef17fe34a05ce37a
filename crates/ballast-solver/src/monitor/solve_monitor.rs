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

//! # Solve Monitor Trait
//!
//! The observer seam of the reachability engine. A `SolveMonitor` receives
//! lifecycle events (`on_enter_solve`, `on_item_processed`, `on_exit_solve`)
//! and is polled for a [`SearchCommand`] once per processed item. Returning
//! `Terminate` aborts the pass; the engine then discards all partial
//! reachability state, so a terminated call never surfaces a degraded
//! answer.
//!
//! The per-item polling granularity is deliberate: it bounds checking
//! overhead to one virtual call per item while bounding worst-case deadline
//! overrun to the cost of a single item's update.

/// Why a monitor requested termination.
///
/// The engine maps the two cases to different errors: an expired deadline
/// is a timeout, while a caller-supplied stop condition keeps its own
/// reason instead of masquerading as one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminateReason {
    /// The wall-clock deadline for this solve has passed.
    DeadlineExceeded,
    /// A caller-supplied monitor stopped the solve, with its own reason.
    Custom(String),
}

impl std::fmt::Display for TerminateReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerminateReason::DeadlineExceeded => write!(f, "deadline exceeded"),
            TerminateReason::Custom(reason) => write!(f, "{}", reason),
        }
    }
}

/// A command returned by a monitor to control the solve process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchCommand {
    /// Continue processing items.
    Continue,
    /// Abort the solve for the given reason.
    Terminate(TerminateReason),
}

impl std::fmt::Display for SearchCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchCommand::Continue => write!(f, "Continue"),
            SearchCommand::Terminate(reason) => write!(f, "Terminate: {}", reason),
        }
    }
}

/// Trait for monitoring and controlling a reachability solve.
pub trait SolveMonitor {
    /// Returns the name of the monitor.
    fn name(&self) -> &str;

    /// Called once when the solve starts, before any item is processed.
    /// `num_items` is the instance size, `num_cells` the size of the
    /// reachability vector chosen by the scaler.
    fn on_enter_solve(&mut self, num_items: usize, num_cells: usize);

    /// Called once when the solve ends, whether it completed or aborted.
    fn on_exit_solve(&mut self);

    /// Called after each item's reachability update.
    fn on_item_processed(&mut self, items_processed: usize);

    /// Called after `on_item_processed` to determine whether the solve
    /// should continue.
    fn solve_command(&mut self) -> SearchCommand {
        SearchCommand::Continue
    }
}

impl<'a> std::fmt::Debug for dyn SolveMonitor + 'a {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SolveMonitor({})", self.name())
    }
}

impl<'a> std::fmt::Display for dyn SolveMonitor + 'a {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SolveMonitor({})", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_command_display() {
        assert_eq!(format!("{}", SearchCommand::Continue), "Continue");
        assert_eq!(
            format!("{}", SearchCommand::Terminate(TerminateReason::DeadlineExceeded)),
            "Terminate: deadline exceeded"
        );
        assert_eq!(
            format!(
                "{}",
                SearchCommand::Terminate(TerminateReason::Custom("enough".to_string()))
            ),
            "Terminate: enough"
        );
    }
}
