//! Clique-partitioned network.
//!
//! # Layout
//!
//! The node universe `0..n_nodes` is cut into `floor(n_nodes / s)` disjoint
//! complete graphs of exactly `s` nodes each.  Nodes are addressed as
//! `(subnet, local)` and stored row-major:
//!
//! ```text
//! flat = subnet * s + local
//! ```
//!
//! The `n_nodes % s` leftover nodes are not part of the network for that run.
//! Every clique is complete, so the topology is fully described by the two
//! integers `(subnet_count, s)` and no adjacency is stored.

use td_core::{NodeAddr, SubnetId, TdError};

use crate::{NetworkError, NetworkResult};

// ── SubNetwork ────────────────────────────────────────────────────────────────

/// Read-only view of one clique.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SubNetwork {
    pub id:   SubnetId,
    pub size: u32,
}

impl SubNetwork {
    /// All node addresses in this clique, in local-index order.
    pub fn members(self) -> impl Iterator<Item = NodeAddr> {
        (0..self.size).map(move |local| NodeAddr { subnet: self.id, local })
    }
}

// ── GlobalNetwork ─────────────────────────────────────────────────────────────

/// An ordered sequence of equally sized, disjoint, fully connected subnetworks.
///
/// Construct with [`GlobalNetwork::build`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GlobalNetwork {
    n_nodes:      usize,
    subnet_size:  u32,
    subnet_count: u32,
}

impl GlobalNetwork {
    /// Partition `n_nodes` into cliques of size `s`.
    ///
    /// # Errors
    ///
    /// - `Parameter` if `s < 1`.
    /// - `EmptyNetwork` if `n_nodes < s`, i.e. not even one clique fits.
    pub fn build(n_nodes: usize, s: u32) -> NetworkResult<Self> {
        if s < 1 {
            return Err(TdError::invalid("s", "subnetwork size must be at least 1").into());
        }
        let count = n_nodes / s as usize;
        if count == 0 {
            return Err(NetworkError::EmptyNetwork { n_nodes, s });
        }
        let subnet_count = u32::try_from(count)
            .map_err(|_| TdError::invalid("n_nodes", format!("{count} subnetworks exceed u32")))?;

        Ok(Self { n_nodes, subnet_size: s, subnet_count })
    }

    #[inline]
    pub fn subnet_count(&self) -> usize {
        self.subnet_count as usize
    }

    #[inline]
    pub fn subnet_size(&self) -> usize {
        self.subnet_size as usize
    }

    /// Nodes actually placed in a clique: `subnet_count * s`.
    #[inline]
    pub fn assigned_nodes(&self) -> usize {
        self.subnet_count() * self.subnet_size()
    }

    /// Universe nodes left out of this run.
    #[inline]
    pub fn unused_nodes(&self) -> usize {
        self.n_nodes - self.assigned_nodes()
    }

    /// The `n_nodes` the network was built from.
    #[inline]
    pub fn universe_size(&self) -> usize {
        self.n_nodes
    }

    pub fn subnet(&self, id: SubnetId) -> Option<SubNetwork> {
        (id.0 < self.subnet_count).then_some(SubNetwork { id, size: self.subnet_size })
    }

    pub fn subnets(&self) -> impl Iterator<Item = SubNetwork> + '_ {
        (0..self.subnet_count).map(|i| SubNetwork { id: SubnetId(i), size: self.subnet_size })
    }

    /// Every assigned address, subnet-major.
    pub fn addresses(&self) -> impl Iterator<Item = NodeAddr> + '_ {
        self.subnets().flat_map(SubNetwork::members)
    }

    #[inline]
    pub fn contains(&self, addr: NodeAddr) -> bool {
        addr.subnet.0 < self.subnet_count && addr.local < self.subnet_size
    }

    #[inline]
    pub fn flat_index(&self, addr: NodeAddr) -> usize {
        addr.flat_index(self.subnet_size())
    }

    /// The strong ties of `addr`: every other member of its clique.
    pub fn strong_ties(&self, addr: NodeAddr) -> impl Iterator<Item = NodeAddr> {
        SubNetwork { id: addr.subnet, size: self.subnet_size }
            .members()
            .filter(move |&other| other != addr)
    }

    /// Number of nodes outside any one clique: `(subnet_count - 1) * s`.
    #[inline]
    pub fn external_population(&self) -> usize {
        (self.subnet_count() - 1) * self.subnet_size()
    }
}
