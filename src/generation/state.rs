//! Run bookkeeping: per-index result slots and progress percentages for one batch.

use crate::angle::AngleDescriptor;
use crate::pipeline::PipelineResult;
use serde::Serialize;

/// Progress snapshot reported after each successful pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressUpdate {
    pub completed: usize,
    pub total: usize,
    pub percent: u8,
    /// Display name of the angle that just finished.
    pub angle_name: String,
}

/// Percentage of `completed` over `total`, rounded half up. Only a finished batch reports 100.
pub fn progress_percent(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    let completed = completed.min(total);
    let rounded = (completed * 100 + total / 2) / total;
    if completed < total {
        rounded.min(99) as u8
    } else {
        100
    }
}

/// Bookkeeping for one batch. Results are slotted by input index so the final
/// collection follows selection order, not completion order.
#[derive(Debug)]
pub struct RunState {
    selected_angles: Vec<AngleDescriptor>,
    completed_count: usize,
    results: Vec<Option<PipelineResult>>,
    failed_slot: Option<usize>,
}

impl RunState {
    pub fn new(selected_angles: Vec<AngleDescriptor>) -> Self {
        let results = vec![None; selected_angles.len()];
        Self {
            selected_angles,
            completed_count: 0,
            results,
            failed_slot: None,
        }
    }

    pub fn total_count(&self) -> usize {
        self.selected_angles.len()
    }

    pub fn completed_count(&self) -> usize {
        self.completed_count
    }

    pub fn percent(&self) -> u8 {
        progress_percent(self.completed_count, self.total_count())
    }

    pub fn failed_slot(&self) -> Option<usize> {
        self.failed_slot
    }

    pub fn angle(&self, index: usize) -> Option<&AngleDescriptor> {
        self.selected_angles.get(index)
    }

    /// Fill slot `index`. A slot is counted once; a repeat report leaves the count alone.
    pub fn record_success(&mut self, index: usize, result: PipelineResult) -> ProgressUpdate {
        let angle_name = result.angle_name.clone();
        if let Some(slot) = self.results.get_mut(index) {
            if slot.is_none() {
                self.completed_count += 1;
            }
            *slot = Some(result);
        }
        ProgressUpdate {
            completed: self.completed_count,
            total: self.total_count(),
            percent: self.percent(),
            angle_name,
        }
    }

    /// Remember the first failing slot; later failures are ignored.
    pub fn record_failure(&mut self, index: usize) {
        if self.failed_slot.is_none() {
            self.failed_slot = Some(index);
        }
    }

    /// All results in input order, or `None` if any slot is empty or a failure was recorded.
    pub fn into_results(self) -> Option<Vec<PipelineResult>> {
        if self.failed_slot.is_some() {
            return None;
        }
        self.results.into_iter().collect()
    }
}
