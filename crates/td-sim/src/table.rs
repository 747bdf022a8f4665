//! The sweep's result table.

use td_core::ParameterSetting;

use crate::Trajectory;

/// One flattened row: a setting's parameters plus one timestep.
///
/// Column names follow the downstream table: `s, w, alpha, beta_w, beta_s,
/// t, num_engaged`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResultRow {
    pub s:           u32,
    pub w:           u32,
    pub alpha:       f64,
    pub beta_w:      f64,
    pub beta_s:      f64,
    pub t:           u64,
    pub num_engaged: u64,
}

impl ResultRow {
    pub fn new(setting: &ParameterSetting, t: u64, num_engaged: u64) -> Self {
        Self {
            s:      setting.s,
            w:      setting.w,
            alpha:  setting.alpha,
            beta_w: setting.beta_w,
            beta_s: setting.beta_s,
            t,
            num_engaged,
        }
    }
}

/// A completed setting: its grid position, parameters, and trajectory.
#[derive(Debug, Clone)]
pub struct TableEntry {
    pub index:      usize,
    pub setting:    ParameterSetting,
    pub trajectory: Trajectory,
}

/// Append-only map from setting to trajectory, kept in grid order.
#[derive(Debug, Clone, Default)]
pub struct ResultTable {
    entries: Vec<TableEntry>,
}

impl ResultTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, index: usize, setting: ParameterSetting, trajectory: Trajectory) {
        self.entries.push(TableEntry { index, setting, trajectory });
    }

    pub fn entries(&self) -> &[TableEntry] {
        &self.entries
    }

    /// Trajectory for `setting`, if it ran successfully.
    pub fn get(&self, setting: &ParameterSetting) -> Option<&Trajectory> {
        self.entries
            .iter()
            .find(|e| e.setting == *setting)
            .map(|e| &e.trajectory)
    }

    /// Number of settings in the table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total rows across all trajectories.
    pub fn row_count(&self) -> usize {
        self.entries.iter().map(|e| e.trajectory.points.len()).sum()
    }

    /// All rows, setting by setting in grid order, `t` ascending within each.
    pub fn rows(&self) -> impl Iterator<Item = ResultRow> + '_ {
        self.entries
            .iter()
            .flat_map(|e| e.trajectory.rows(&e.setting))
    }
}
