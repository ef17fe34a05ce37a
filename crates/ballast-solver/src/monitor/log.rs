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

//! Progress logging for long solves.
//!
//! `ProgressLogMonitor` prints a table row at a configurable interval so an
//! operator can see how far a large reachability pass has progressed. It
//! observes only; it never terminates the solve.

use crate::monitor::solve_monitor::{SearchCommand, SolveMonitor};
use std::time::{Duration, Instant};

/// A monitor that periodically prints solve progress to stdout.
#[derive(Debug, Clone)]
pub struct ProgressLogMonitor {
    log_interval: Duration,
    start_time: Instant,
    last_log_time: Instant,
    num_items: usize,
    num_cells: usize,
    items_processed: usize,
}

impl ProgressLogMonitor {
    /// Default interval between progress rows.
    const DEFAULT_LOG_INTERVAL: Duration = Duration::from_secs(1);

    /// Creates a monitor that prints one row per `log_interval`.
    pub fn new(log_interval: Duration) -> Self {
        let now = Instant::now();
        Self {
            log_interval,
            start_time: now,
            last_log_time: now,
            num_items: 0,
            num_cells: 0,
            items_processed: 0,
        }
    }

    /// Returns the number of items the monitor has observed so far.
    #[inline]
    pub fn items_processed(&self) -> usize {
        self.items_processed
    }

    fn print_header(&self) {
        println!(
            "{:<9} | {:<12} | {:<12} | {:<10}",
            "Elapsed", "Items", "Total Items", "Cells"
        );
        println!("{}", "-".repeat(51));
    }

    fn log_line(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.start_time).as_secs_f32();
        let elapsed_field = format!("{:.1}s", elapsed);

        println!(
            "{:<9} | {:<12} | {:<12} | {:<10}",
            elapsed_field, self.items_processed, self.num_items, self.num_cells
        );

        self.last_log_time = now;
    }
}

impl Default for ProgressLogMonitor {
    fn default() -> Self {
        Self::new(Self::DEFAULT_LOG_INTERVAL)
    }
}

impl SolveMonitor for ProgressLogMonitor {
    fn name(&self) -> &str {
        "ProgressLogMonitor"
    }

    fn on_enter_solve(&mut self, num_items: usize, num_cells: usize) {
        self.start_time = Instant::now();
        self.last_log_time = self.start_time;
        self.num_items = num_items;
        self.num_cells = num_cells;
        self.items_processed = 0;
        self.print_header();
    }

    fn on_exit_solve(&mut self) {
        self.log_line();
        println!("Solve finished.");
    }

    #[inline]
    fn on_item_processed(&mut self, items_processed: usize) {
        self.items_processed = items_processed;
        if self.last_log_time.elapsed() >= self.log_interval {
            self.log_line();
        }
    }

    fn solve_command(&mut self) -> SearchCommand {
        SearchCommand::Continue
    }
}
