//! Per-setting summary row.  Per-timestep rows are `td_sim::ResultRow`.

use td_core::ParameterSetting;
use td_sim::{TableEntry, Trajectory};

/// Status string written for settings whose run failed.
pub const FAILED_STATUS: &str = "failed";

/// One row per setting: how long it ran and how it ended.
///
/// For a converged run `steps` is the T95 value, `max(t)` of its trajectory.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummaryRow {
    pub s:              u32,
    pub w:              u32,
    pub alpha:          f64,
    pub beta_w:         f64,
    pub beta_s:         f64,
    pub steps:          u64,
    pub final_engaged:  u64,
    /// `0` for failed settings, which never built a network.
    pub assigned_nodes: u64,
    /// `converged`, `non_convergent`, `timed_out`, or `failed`.
    pub status:         &'static str,
}

impl RunSummaryRow {
    pub fn completed(setting: &ParameterSetting, trajectory: &Trajectory) -> Self {
        Self {
            steps:          trajectory.steps(),
            final_engaged:  trajectory.final_active() as u64,
            assigned_nodes: trajectory.assigned_nodes as u64,
            status:         trajectory.status.as_str(),
            ..Self::failed(setting)
        }
    }

    pub fn failed(setting: &ParameterSetting) -> Self {
        Self {
            s:              setting.s,
            w:              setting.w,
            alpha:          setting.alpha,
            beta_w:         setting.beta_w,
            beta_s:         setting.beta_s,
            steps:          0,
            final_engaged:  0,
            assigned_nodes: 0,
            status:         FAILED_STATUS,
        }
    }
}

impl From<&TableEntry> for RunSummaryRow {
    fn from(entry: &TableEntry) -> Self {
        RunSummaryRow::completed(&entry.setting, &entry.trajectory)
    }
}
