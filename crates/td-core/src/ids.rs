//! Node addressing.
//!
//! A node is addressed as `(subnetwork, local index)`.  The inner integers are
//! `pub` so hot loops can index flat `Vec`s directly, but callers should prefer
//! the `.index()` helpers for clarity.

use std::fmt;

/// Index of a subnetwork (clique) in a `GlobalNetwork`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
pub struct SubnetId(pub u32);

impl SubnetId {
    /// Cast to `usize` for direct use as a `Vec` index.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for SubnetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SubnetId({})", self.0)
    }
}

impl From<SubnetId> for usize {
    #[inline(always)]
    fn from(id: SubnetId) -> usize {
        id.0 as usize
    }
}

impl TryFrom<usize> for SubnetId {
    type Error = std::num::TryFromIntError;
    fn try_from(n: usize) -> Result<SubnetId, Self::Error> {
        u32::try_from(n).map(SubnetId)
    }
}

/// Address of one node: its subnetwork plus its position inside that clique.
///
/// Ordering is lexicographic `(subnet, local)`, which is also the flat storage
/// order used by `ActivationState`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct NodeAddr {
    pub subnet: SubnetId,
    pub local:  u32,
}

impl NodeAddr {
    #[inline(always)]
    pub fn new(subnet: u32, local: u32) -> Self {
        Self { subnet: SubnetId(subnet), local }
    }

    /// Flat index into per-node arrays given the (uniform) clique size.
    #[inline(always)]
    pub fn flat_index(self, subnet_size: usize) -> usize {
        self.subnet.index() * subnet_size + self.local as usize
    }
}

impl fmt::Display for NodeAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.subnet.0, self.local)
    }
}
