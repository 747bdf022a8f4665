//! Weak-tie sampling by rejection.
//!
//! For a node in clique `own`, a weak-tie draw picks `w` distinct nodes
//! uniformly from the union of all *other* cliques:
//!
//! 1. pick a clique uniformly among the `subnet_count - 1` others;
//! 2. pick a local index uniformly in `0..s`;
//! 3. keep the pair unless it is already in the buffer.
//!
//! All cliques have the same size, so steps 1–2 are uniform over the external
//! population.  Step 3 only terminates if `w` distinct candidates exist, so the
//! population is checked first and `InsufficientPopulation` is returned
//! instead of looping.

use td_core::{NodeAddr, RunRng, SubnetId};

use crate::{GlobalNetwork, NetworkError, NetworkResult};

/// Reusable weak-tie sampler for a fixed `w`.
///
/// The candidate buffer is allocated once with capacity `w` and cleared on
/// every call, so sampling never allocates after construction.
pub struct WeakTieSampler {
    w:   u32,
    buf: Vec<NodeAddr>,
}

impl WeakTieSampler {
    pub fn new(w: u32) -> Self {
        Self { w, buf: Vec::with_capacity(w as usize) }
    }

    /// Fail unless `network` has at least `w` nodes outside any one clique.
    pub fn ensure_population(&self, network: &GlobalNetwork, own: SubnetId) -> NetworkResult<()> {
        let available = network.external_population();
        if self.w as usize > available {
            return Err(NetworkError::InsufficientPopulation {
                own,
                requested: self.w,
                available,
            });
        }
        Ok(())
    }

    /// Draw `w` distinct addresses outside `own`.
    ///
    /// The returned slice is valid until the next call.
    pub fn sample(
        &mut self,
        network: &GlobalNetwork,
        own:     SubnetId,
        rng:     &mut RunRng,
    ) -> NetworkResult<&[NodeAddr]> {
        self.ensure_population(network, own)?;
        self.buf.clear();

        let others = network.subnet_count() as u32 - 1;
        let size = network.subnet_size() as u32;

        while self.buf.len() < self.w as usize {
            // Uniform over the other cliques: skip over `own`.
            let k = rng.gen_range(0..others);
            let subnet = if k >= own.0 { k + 1 } else { k };
            let candidate = NodeAddr::new(subnet, rng.gen_range(0..size));

            if !self.buf.contains(&candidate) {
                self.buf.push(candidate);
            }
        }
        Ok(&self.buf)
    }
}
