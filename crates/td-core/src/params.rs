//! One point of the parameter grid.

use std::fmt;

use crate::{TdError, TdResult};

/// Model parameters for a single simulation run.
///
/// The model is motivated by `alpha < beta_w < beta_s` (advertising is weaker
/// than a weak tie, which is weaker than a strong tie).  That ordering is not
/// enforced; see [`is_ordered`](Self::is_ordered).
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParameterSetting {
    /// Subnetwork (clique) size.  Must be at least 1.
    pub s:      u32,
    /// Weak-tie contacts sampled per node per timestep.
    pub w:      u32,
    /// Advertising effect: baseline activation probability per timestep.
    pub alpha:  f64,
    /// Activation probability contributed by each active weak tie.
    pub beta_w: f64,
    /// Activation probability contributed by each active strong tie.
    pub beta_s: f64,
}

impl ParameterSetting {
    pub fn new(s: u32, w: u32, alpha: f64, beta_w: f64, beta_s: f64) -> Self {
        Self { s, w, alpha, beta_w, beta_s }
    }

    /// Reject `s < 1` and any probability outside `[0, 1)`.
    pub fn validate(&self) -> TdResult<()> {
        if self.s < 1 {
            return Err(TdError::invalid("s", "subnetwork size must be at least 1"));
        }
        check_probability("alpha", self.alpha)?;
        check_probability("beta_w", self.beta_w)?;
        check_probability("beta_s", self.beta_s)?;
        Ok(())
    }

    /// `true` when `alpha < beta_w < beta_s`.
    pub fn is_ordered(&self) -> bool {
        self.alpha < self.beta_w && self.beta_w < self.beta_s
    }
}

impl fmt::Display for ParameterSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "s={} w={} alpha={} beta_w={} beta_s={}",
            self.s, self.w, self.alpha, self.beta_w, self.beta_s
        )
    }
}

fn check_probability(name: &'static str, p: f64) -> TdResult<()> {
    // NaN fails both comparisons.
    if (0.0..1.0).contains(&p) {
        Ok(())
    } else {
        Err(TdError::invalid(name, format!("{p} is outside [0, 1)")))
    }
}
