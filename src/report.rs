//! Human- and machine-readable views of a [`Comparison`].
//!
//! - [`Comparison::narrative`] is the plain-text log of both runs.
//! - [`Comparison::summary`] is a serde-serializable digest.
//! - [`Comparison::table_data`] and [`Comparison::render_table`] expose a
//!   window over the full DP table.
//!
//! Table views need the full table and return nothing for rolling solves.

use std::fmt;
use std::time::Duration;

use serde::Serialize;

use crate::scheduler::Comparison;
use crate::solvers::PathStep;
use crate::task::Task;
use crate::utils::{format_hours, units_to_hours};

/// Which side of a comparison a label refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SolverKind {
    Dp,
    Greedy,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolverSummary {
    pub chosen: Vec<String>,
    pub total_hours: f64,
    pub total_value: u64,
    pub elapsed_ms: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonSummary {
    pub capacity_hours: f64,
    pub dp: SolverSummary,
    pub greedy: SolverSummary,
    pub value_gap: u64,
    /// Slower run time divided by faster run time.
    pub speed_ratio: f64,
    /// True when DP took longer than greedy.
    pub dp_slower: bool,
}

/// Row/column cap applied to table views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableWindow {
    pub max_rows: usize,
    pub max_cols: usize,
}

impl Default for TableWindow {
    fn default() -> Self {
        Self {
            max_rows: 100,
            max_cols: 100,
        }
    }
}

impl TableWindow {
    /// A window large enough for any table.
    pub fn unbounded() -> Self {
        Self {
            max_rows: usize::MAX,
            max_cols: usize::MAX,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TableCell {
    pub row: usize,
    pub col: usize,
    pub value: u64,
    pub take: bool,
}

/// Windowed export of the DP table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableData {
    /// Full table dimensions.
    pub rows: usize,
    pub cols: usize,
    /// Dimensions of the window actually exported.
    pub shown_rows: usize,
    pub shown_cols: usize,
    pub truncated: bool,
    /// `"0"` for the empty prefix, then the task name of each row.
    pub row_labels: Vec<String>,
    /// Row-major cells of the window.
    pub cells: Vec<TableCell>,
}

impl TableData {
    pub fn cell(&self, row: usize, col: usize) -> Option<&TableCell> {
        if row < self.shown_rows && col < self.shown_cols {
            self.cells.get(row * self.shown_cols + col)
        } else {
            None
        }
    }
}

impl Comparison<'_> {
    /// `"Time Used: 4.5/8h"` for one solver.
    pub fn time_label(&self, solver: SolverKind) -> String {
        let used = match solver {
            SolverKind::Dp => self.dp.total_hours(),
            SolverKind::Greedy => self.greedy.total_hours(),
        };
        format!(
            "Time Used: {}/{}h",
            format_hours(used),
            format_hours(self.capacity_hours())
        )
    }

    /// Slower elapsed time over faster, and whether DP was the slower one.
    pub fn speed_ratio(&self) -> (f64, bool) {
        let dp = self.dp_elapsed.as_nanos();
        let greedy = self.greedy_elapsed.as_nanos();
        let dp_slower = dp > greedy;
        let (slow, fast) = if dp_slower { (dp, greedy) } else { (greedy, dp) };
        // sub-nanosecond runs still yield a finite ratio
        (slow.max(1) as f64 / fast.max(1) as f64, dp_slower)
    }

    pub fn summary(&self) -> ComparisonSummary {
        let (speed_ratio, dp_slower) = self.speed_ratio();
        ComparisonSummary {
            capacity_hours: self.capacity_hours(),
            dp: SolverSummary {
                chosen: names(&self.dp.chosen),
                total_hours: self.dp.total_hours(),
                total_value: self.dp.total_value,
                elapsed_ms: millis(self.dp_elapsed),
            },
            greedy: SolverSummary {
                chosen: names(&self.greedy.chosen),
                total_hours: self.greedy.total_hours(),
                total_value: self.greedy.total_value,
                elapsed_ms: millis(self.greedy_elapsed),
            },
            value_gap: self.value_gap(),
            speed_ratio,
            dp_slower,
        }
    }

    /// Plain-text log of both runs and how they compare.
    pub fn narrative(&self) -> String {
        self.to_string()
    }

    /// Backtracking walk over the full table, row `n` first.
    ///
    /// Empty when the DP ran in rolling mode.
    pub fn solution_path(&self) -> Vec<PathStep> {
        self.dp
            .table()
            .map(|table| table.solution_path())
            .unwrap_or_default()
    }

    /// The top-left `window` of the DP table, or `None` in rolling mode.
    pub fn table_data(&self, window: TableWindow) -> Option<TableData> {
        let table = self.dp.table()?;
        let shown_rows = table.rows().min(window.max_rows);
        let shown_cols = table.cols().min(window.max_cols);

        let mut row_labels = Vec::with_capacity(shown_rows);
        let mut cells = Vec::with_capacity(shown_rows * shown_cols);
        for row in 0..shown_rows {
            row_labels.push(match row {
                0 => "0".to_string(),
                i => self.tasks[i - 1].name().to_string(),
            });
            let values = &table.row(row)[..shown_cols];
            let takes = &table.take_row(row)[..shown_cols];
            cells.extend(
                values
                    .iter()
                    .zip(takes)
                    .enumerate()
                    .map(|(col, (&value, &take))| TableCell {
                        row,
                        col,
                        value,
                        take,
                    }),
            );
        }

        Some(TableData {
            rows: table.rows(),
            cols: table.cols(),
            shown_rows,
            shown_cols,
            truncated: shown_rows < table.rows() || shown_cols < table.cols(),
            row_labels,
            cells,
        })
    }

    /// Fixed-width text grid of the table window; `*` marks take cells.
    ///
    /// Column headers are capacities in hours. Returns an empty string in
    /// rolling mode.
    pub fn render_table(&self, window: TableWindow) -> String {
        self.table_data(window)
            .map(|data| TableGrid(&data).to_string())
            .unwrap_or_default()
    }
}

/// Text rendering of a [`TableData`] window.
struct TableGrid<'a>(&'a TableData);

impl fmt::Display for TableGrid<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.0;
        let label_width = data
            .row_labels
            .iter()
            .map(|l| l.chars().count())
            .max()
            .unwrap_or(0)
            .max(1);
        let headers: Vec<String> = (0..data.shown_cols)
            .map(|col| format_hours(units_to_hours(col as u64)))
            .collect();
        let cell_width = data
            .cells
            .iter()
            .map(|c| c.value.to_string().len() + 1)
            .chain(headers.iter().map(String::len))
            .max()
            .unwrap_or(1);

        write!(f, "{:label_width$}", "")?;
        for header in &headers {
            write!(f, " {header:>cell_width$}")?;
        }
        writeln!(f)?;

        for (row, label) in data.row_labels.iter().enumerate() {
            write!(f, "{label:<label_width$}")?;
            for col in 0..data.shown_cols {
                let cell = &data.cells[row * data.shown_cols + col];
                let text = if cell.take {
                    format!("{}*", cell.value)
                } else {
                    cell.value.to_string()
                };
                write!(f, " {text:>cell_width$}")?;
            }
            writeln!(f)?;
        }

        if data.truncated {
            writeln!(
                f,
                "(showing {} x {} of {} x {})",
                data.shown_rows, data.shown_cols, data.rows, data.cols
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for Comparison<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== DYNAMIC PROGRAMMING (OPTIMAL) ===")?;
        write_section(
            f,
            self.dp_elapsed,
            self.dp.total_value,
            self.dp.total_hours(),
            &self.dp.chosen,
        )?;

        writeln!(f)?;
        writeln!(f, "=== GREEDY SOLUTION ===")?;
        write_section(
            f,
            self.greedy_elapsed,
            self.greedy.total_value,
            self.greedy.total_hours(),
            &self.greedy.chosen,
        )?;

        writeln!(f)?;
        writeln!(f, "=== COMPARISON ===")?;
        let (ratio, dp_slower) = self.speed_ratio();
        let speed = if dp_slower { "slower" } else { "faster" };
        writeln!(f, " DP is {ratio:.2}x {speed} than Greedy")?;
        match self.value_gap() {
            0 => writeln!(f, " Both algorithms found the same optimal value"),
            gap => writeln!(f, " DP found {gap} more value than Greedy"),
        }
    }
}

fn write_section(
    f: &mut fmt::Formatter<'_>,
    elapsed: Duration,
    value: u64,
    hours: f64,
    chosen: &[&Task],
) -> fmt::Result {
    writeln!(f, " Execution Time: {:.3} ms", millis(elapsed))?;
    writeln!(f, " Total Value: {value} | Time Used: {}h", format_hours(hours))?;
    writeln!(f)?;
    for task in chosen {
        writeln!(
            f,
            " [] {} ({}h, v:{})",
            task.name(),
            format_hours(task.duration_hours()),
            task.productivity()
        )?;
    }
    Ok(())
}

fn names(tasks: &[&Task]) -> Vec<String> {
    tasks.iter().map(|t| t.name().to_string()).collect()
}

fn millis(elapsed: Duration) -> f64 {
    elapsed.as_secs_f64() * 1_000.0
}
