use crate::models::{LabelStack, MplsLabel, RouteDistinguisher};
use ipnet::IpNet;
use itertools::Itertools;
use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

/// A labeled network prefix with optional path ID and route distinguisher.
///
/// This is the destination carried by Labeled-Unicast NLRI (SAFI 4, RFC 8277) and, with a route
/// distinguisher, by VPN NLRI (SAFI 128, RFC 4364). An empty label stack on a withdrawn
/// destination stands for the withdraw label `0x800000`.
#[derive(PartialEq, Eq, Clone, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LabeledDestination {
    pub path_id: Option<u32>,
    pub labels: LabelStack,
    /// Route Distinguisher for VPN routes (SAFI 128) - RFC 4364
    pub route_distinguisher: Option<RouteDistinguisher>,
    pub prefix: IpNet,
}

// Attempt to reduce the size of the debug output
impl Debug for LabeledDestination {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if let Some(rd) = &self.route_distinguisher {
            write!(f, "{}:", rd)?;
        }
        write!(f, "{}", self.prefix)?;
        if let Some(path_id) = self.path_id {
            write!(f, "#{}", path_id)?;
        }
        write!(f, " [{}]", self.labels.iter().join(","))
    }
}

impl FromStr for LabeledDestination {
    type Err = ipnet::AddrParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(LabeledDestination::new(IpNet::from_str(s)?, []))
    }
}

impl LabeledDestination {
    pub fn new<L: IntoIterator<Item = MplsLabel>>(prefix: IpNet, labels: L) -> Self {
        LabeledDestination {
            path_id: None,
            labels: labels.into_iter().collect(),
            route_distinguisher: None,
            prefix,
        }
    }

    /// Create a new VPN destination with a route distinguisher
    pub fn new_vpn<L: IntoIterator<Item = MplsLabel>>(
        route_distinguisher: RouteDistinguisher,
        prefix: IpNet,
        labels: L,
    ) -> Self {
        LabeledDestination {
            path_id: None,
            labels: labels.into_iter().collect(),
            route_distinguisher: Some(route_distinguisher),
            prefix,
        }
    }

    pub fn with_path_id(mut self, path_id: u32) -> Self {
        self.path_id = Some(path_id);
        self
    }
}

impl Display for LabeledDestination {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.route_distinguisher {
            Some(rd) => write!(f, "{}:{}", rd, self.prefix),
            None => write!(f, "{}", self.prefix),
        }
    }
}

/// Number of address bytes a prefix occupies on the wire.
#[inline]
pub fn prefix_byte_len(prefix: &IpNet) -> usize {
    prefix.prefix_len().div_ceil(8) as usize
}

/// The address bytes of a prefix, truncated to its length.
pub fn prefix_bytes(prefix: &IpNet) -> Vec<u8> {
    let len = prefix_byte_len(prefix);
    match prefix {
        IpNet::V4(p) => p.network().octets()[..len].to_vec(),
        IpNet::V6(p) => p.network().octets()[..len].to_vec(),
    }
}
