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

/// Statistics collected during one solve call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolveStatistics {
    /// The bucket width chosen by the scaler (1 = exact).
    pub scale_factor: u64,
    /// Number of items folded into the reachability vector before
    /// completion or abort.
    pub items_processed: usize,
    /// Total number of items in the instance.
    pub num_items: usize,
    /// Number of scaled-sum cells in the reachability vector.
    pub dp_cells: usize,
    /// Total duration of the solve call.
    pub solve_duration: std::time::Duration,
}

impl std::fmt::Display for SolveStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Solve Statistics:")?;
        writeln!(f, "  Scale Factor: {}", self.scale_factor)?;
        writeln!(
            f,
            "  Items Processed: {} / {}",
            self.items_processed, self.num_items
        )?;
        writeln!(f, "  DP Cells: {}", self.dp_cells)?;
        writeln!(
            f,
            "  Solve Duration (secs): {:.3}",
            self.solve_duration.as_secs_f64()
        )
    }
}

/// Builder for `SolveStatistics`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolveStatisticsBuilder {
    scale_factor: u64,
    items_processed: usize,
    num_items: usize,
    dp_cells: usize,
    solve_duration: std::time::Duration,
}

impl Default for SolveStatisticsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SolveStatisticsBuilder {
    /// Creates a new `SolveStatisticsBuilder` with default values.
    #[inline]
    pub fn new() -> Self {
        Self {
            scale_factor: 1,
            items_processed: 0,
            num_items: 0,
            dp_cells: 0,
            solve_duration: std::time::Duration::ZERO,
        }
    }

    /// Sets the scale factor.
    #[inline]
    pub fn scale_factor(mut self, scale_factor: u64) -> Self {
        self.scale_factor = scale_factor;
        self
    }

    /// Sets the number of processed items.
    #[inline]
    pub fn items_processed(mut self, items_processed: usize) -> Self {
        self.items_processed = items_processed;
        self
    }

    /// Sets the total number of items.
    #[inline]
    pub fn num_items(mut self, num_items: usize) -> Self {
        self.num_items = num_items;
        self
    }

    /// Sets the number of DP cells.
    #[inline]
    pub fn dp_cells(mut self, dp_cells: usize) -> Self {
        self.dp_cells = dp_cells;
        self
    }

    /// Sets the total solve duration.
    #[inline]
    pub fn solve_duration(mut self, solve_duration: std::time::Duration) -> Self {
        self.solve_duration = solve_duration;
        self
    }

    /// Builds the `SolveStatistics` instance.
    #[inline]
    pub fn build(self) -> SolveStatistics {
        SolveStatistics {
            scale_factor: self.scale_factor,
            items_processed: self.items_processed,
            num_items: self.num_items,
            dp_cells: self.dp_cells,
            solve_duration: self.solve_duration,
        }
    }
}
