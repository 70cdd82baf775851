use std::ops::ControlFlow;
use std::time::{Duration, Instant};

use dcmetrics_eval::{CoverageObserver, CoverageProgress};
use tracing::{info, warn};

/// Logs coverage progress every 1% of rows and enforces an optional time budget.
#[derive(Debug)]
pub struct LoggingObserver {
    started: Instant,
    budget: Option<Duration>,
}

impl LoggingObserver {
    pub fn new(budget: Option<Duration>) -> Self {
        Self {
            started: Instant::now(),
            budget,
        }
    }
}

impl CoverageObserver for LoggingObserver {
    fn on_row(&mut self, progress: &CoverageProgress) -> ControlFlow<()> {
        if should_log(progress) {
            let percent = format!("{:.2}", progress.percent());
            info!(
                event = "coverage_progress",
                constraint = progress.constraint + 1,
                constraints = progress.constraints,
                rows_done = progress.rows_done,
                rows = progress.rows,
                percent = %percent
            );
        }

        if let Some(budget) = self.budget
            && self.started.elapsed() > budget
        {
            warn!(
                event = "coverage_timeout",
                budget_secs = budget.as_secs(),
                constraint = progress.constraint + 1,
                rows_done = progress.rows_done
            );
            return ControlFlow::Break(());
        }

        ControlFlow::Continue(())
    }
}

/// Log on every 1% of rows (at least every row) and on the last row.
fn should_log(progress: &CoverageProgress) -> bool {
    let interval = (progress.rows / 100).max(1);
    progress.rows_done % interval == 0 || progress.rows_done == progress.rows
}
