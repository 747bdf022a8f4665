//! Parameter grid: per-parameter levels and their cartesian product.
//!
//! Each of the five model parameters is given either as an explicit list of
//! levels or as `(min, max, num)` for `num` linearly spaced levels (both ends
//! inclusive).  Integer parameters (`s`, `w`) are rounded to the nearest
//! integer after spacing, so `{ min: 5, max: 29, num: 3 }` yields `5, 17, 29`.
//!
//! With the `serde` feature the two forms deserialize from JSON as either
//!
//! ```json
//! [5, 17, 29]
//! ```
//!
//! or
//!
//! ```json
//! { "min": 5, "max": 29, "num": 3 }
//! ```

use crate::{ParameterSetting, TdError, TdResult};

// ── Levels ────────────────────────────────────────────────────────────────────

/// The levels one parameter takes in a sweep.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Levels {
    /// Use exactly these values, in this order.
    Explicit(Vec<f64>),
    /// `num` evenly spaced values from `min` to `max` inclusive.
    Linear { min: f64, max: f64, num: usize },
}

impl Levels {
    pub fn linear(min: f64, max: f64, num: usize) -> Self {
        Levels::Linear { min, max, num }
    }

    /// Expand into concrete values.
    ///
    /// Fails when the expansion would be empty or contain a non-finite value.
    pub fn values(&self, name: &'static str) -> TdResult<Vec<f64>> {
        let values = match self {
            Levels::Explicit(v) => v.clone(),
            Levels::Linear { min, max, num } => match *num {
                0 => Vec::new(),
                1 => vec![*min],
                n => {
                    let step = (max - min) / (n - 1) as f64;
                    (0..n)
                        .map(|i| if i == n - 1 { *max } else { min + step * i as f64 })
                        .collect()
                }
            },
        };

        if values.is_empty() {
            return Err(TdError::invalid(name, "no levels given"));
        }
        if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
            return Err(TdError::invalid(name, format!("level {bad} is not finite")));
        }
        Ok(values)
    }

    /// Expand and round to non-negative integers.
    pub fn integer_values(&self, name: &'static str) -> TdResult<Vec<u32>> {
        self.values(name)?
            .into_iter()
            .map(|v| {
                let r = v.round();
                if r < 0.0 || r > u32::MAX as f64 {
                    Err(TdError::invalid(name, format!("level {v} is not a non-negative integer")))
                } else {
                    Ok(r as u32)
                }
            })
            .collect()
    }

    /// Number of levels without expanding.
    pub fn len(&self) -> usize {
        match self {
            Levels::Explicit(v) => v.len(),
            Levels::Linear { num, .. } => *num,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ── ParameterGrid ─────────────────────────────────────────────────────────────

/// Levels for all five parameters.  The sweep runs their full cartesian product.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ParameterGrid {
    pub s:      Levels,
    pub w:      Levels,
    pub alpha:  Levels,
    pub beta_w: Levels,
    pub beta_s: Levels,
}

impl Default for ParameterGrid {
    /// Three linearly spaced levels per parameter.
    fn default() -> Self {
        Self {
            s:      Levels::linear(5.0, 29.0, 3),
            w:      Levels::linear(5.0, 29.0, 3),
            alpha:  Levels::linear(0.0005, 0.01, 3),
            beta_w: Levels::linear(0.005, 0.015, 3),
            beta_s: Levels::linear(0.01, 0.07, 3),
        }
    }
}

impl ParameterGrid {
    /// Total number of settings in the cartesian product.
    pub fn len(&self) -> usize {
        self.s.len() * self.w.len() * self.alpha.len() * self.beta_w.len() * self.beta_s.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Expand the grid into validated settings.
    ///
    /// Order is `s` outermost and `beta_s` innermost; this order fixes both the
    /// per-setting RNG seed and the row order of the result table.  Every
    /// setting is validated before anything runs.
    pub fn settings(&self) -> TdResult<Vec<ParameterSetting>> {
        let s_levels      = self.s.integer_values("s")?;
        let w_levels      = self.w.integer_values("w")?;
        let alpha_levels  = self.alpha.values("alpha")?;
        let beta_w_levels = self.beta_w.values("beta_w")?;
        let beta_s_levels = self.beta_s.values("beta_s")?;

        let mut out = Vec::with_capacity(self.len());
        for &s in &s_levels {
            for &w in &w_levels {
                for &alpha in &alpha_levels {
                    for &beta_w in &beta_w_levels {
                        for &beta_s in &beta_s_levels {
                            let setting = ParameterSetting { s, w, alpha, beta_w, beta_s };
                            setting.validate()?;
                            out.push(setting);
                        }
                    }
                }
            }
        }
        Ok(out)
    }
}
