//! One activation pass over every node.

use td_core::{NodeAddr, ParameterSetting, RunRng};
use td_network::{ActivationState, GlobalNetwork, WeakTieSampler};

use crate::SimResult;

/// `p = 1 − (1−α)·(1−β_w)^active_weak·(1−β_s)^active_strong`
#[inline]
pub fn activation_probability(setting: &ParameterSetting, active_weak: u32, active_strong: u32) -> f64 {
    let stay_inactive = (1.0 - setting.alpha)
        * (1.0 - setting.beta_w).powi(active_weak as i32)
        * (1.0 - setting.beta_s).powi(active_strong as i32);
    1.0 - stay_inactive
}

/// Reusable buffers for the activation pass of one run.
///
/// Holds the visitation order (reshuffled each pass) and the weak-tie
/// sampler, so a pass allocates nothing.
///
/// # Sequential semantics
///
/// Nodes are visited one at a time in the shuffled order against the *same*
/// `ActivationState`.  A node activated early in the pass already counts as an
/// active strong or weak tie for nodes visited later in that pass.  Buffering
/// the activations and applying them together at the end of the pass gives
/// different dynamics.
pub struct ActivationUpdate {
    order:   Vec<NodeAddr>,
    sampler: WeakTieSampler,
}

impl ActivationUpdate {
    pub fn new(network: &GlobalNetwork, w: u32) -> Self {
        Self {
            order:   network.addresses().collect(),
            sampler: WeakTieSampler::new(w),
        }
    }

    /// Run one pass and return how many nodes it activated.
    ///
    /// Already-active nodes are skipped entirely: they draw neither weak ties
    /// nor a uniform variate.
    pub fn apply(
        &mut self,
        network: &GlobalNetwork,
        state:   &mut ActivationState,
        setting: &ParameterSetting,
        rng:     &mut RunRng,
    ) -> SimResult<usize> {
        rng.shuffle(&mut self.order);

        let mut activated = 0;
        for &addr in &self.order {
            if state.is_active(addr) {
                continue;
            }

            // `addr` is inactive, so the clique count is exactly its active strong ties.
            let active_strong = state.count_active_in(addr.subnet);

            let ties = self.sampler.sample(network, addr.subnet, rng)?;
            let active_weak = ties.iter().filter(|&&tie| state.is_active(tie)).count() as u32;

            let p = activation_probability(setting, active_weak, active_strong);
            if rng.unit() < p {
                state.activate(addr);
                activated += 1;
            }
        }
        Ok(activated)
    }
}
