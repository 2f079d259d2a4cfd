use serde::{Deserialize, Serialize};

use crate::session::result::RunRecord;

pub const SCHEMA_VERSION: u32 = 1;

/// Oldest runs are dropped once the history grows past this.
pub const MAX_HISTORY: usize = 500;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunHistoryData {
    pub schema_version: u32,
    pub runs: Vec<RunRecord>,
}

impl Default for RunHistoryData {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            runs: Vec::new(),
        }
    }
}

impl RunHistoryData {
    pub fn needs_reset(&self) -> bool {
        self.schema_version != SCHEMA_VERSION
    }

    pub fn push(&mut self, record: RunRecord) {
        self.runs.push(record);
        if self.runs.len() > MAX_HISTORY {
            let excess = self.runs.len() - MAX_HISTORY;
            self.runs.drain(..excess);
        }
    }

    pub fn best_wpm(&self) -> Option<u32> {
        self.runs.iter().map(|r| r.wpm).max()
    }

    /// Mean net WPM over the last `n` runs.
    pub fn recent_average_wpm(&self, n: usize) -> Option<f64> {
        mean_wpm_tail(&self.runs, n)
    }

    /// Mean net WPM over up to `n` runs before the latest one.
    pub fn prior_average_wpm(&self, n: usize) -> Option<f64> {
        let prior = &self.runs[..self.runs.len().saturating_sub(1)];
        mean_wpm_tail(prior, n)
    }
}

fn mean_wpm_tail(runs: &[RunRecord], n: usize) -> Option<f64> {
    let tail = &runs[runs.len().saturating_sub(n)..];
    if tail.is_empty() {
        return None;
    }
    let total: u64 = tail.iter().map(|r| u64::from(r.wpm)).sum();
    Some(total as f64 / tail.len() as f64)
}
