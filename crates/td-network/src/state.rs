//! Per-node activation flags.

use td_core::{NodeAddr, SubnetId};

use crate::GlobalNetwork;

/// Monotonic "informed" flag for every assigned node, plus a per-clique
/// active count kept in step with the flags.
///
/// Flags only ever go `false → true`; there is no way to clear one short of
/// building a fresh state with [`reset`](Self::reset).
#[derive(Clone, Debug)]
pub struct ActivationState {
    subnet_size:       usize,
    /// Indexed by `NodeAddr::flat_index`.
    flags:             Vec<bool>,
    /// Indexed by `SubnetId`.
    active_per_subnet: Vec<u32>,
}

impl ActivationState {
    /// All flags `false`, sized for `network`.
    pub fn reset(network: &GlobalNetwork) -> Self {
        Self {
            subnet_size:       network.subnet_size(),
            flags:             vec![false; network.assigned_nodes()],
            active_per_subnet: vec![0; network.subnet_count()],
        }
    }

    #[inline]
    pub fn is_active(&self, addr: NodeAddr) -> bool {
        self.flags[addr.flat_index(self.subnet_size)]
    }

    /// Mark `addr` active.  Returns `true` if this call flipped the flag,
    /// `false` if it was already set.
    #[inline]
    pub fn activate(&mut self, addr: NodeAddr) -> bool {
        let flag = &mut self.flags[addr.flat_index(self.subnet_size)];
        if *flag {
            return false;
        }
        *flag = true;
        self.active_per_subnet[addr.subnet.index()] += 1;
        true
    }

    #[inline]
    pub fn count_active_in(&self, subnet: SubnetId) -> u32 {
        self.active_per_subnet[subnet.index()]
    }

    /// Active nodes across all subnetworks.  O(subnet_count).
    pub fn total_active(&self) -> usize {
        self.active_per_subnet.iter().map(|&n| n as usize).sum()
    }

    /// Number of nodes tracked (the network's assigned node count).
    pub fn node_count(&self) -> usize {
        self.flags.len()
    }
}
