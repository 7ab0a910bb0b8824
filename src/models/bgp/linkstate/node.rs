use super::{msb, Algorithm, Msd, SrCapabilities, SrLocalBlock};
use bitflags::bitflags;
use std::net::{Ipv4Addr, Ipv6Addr};

bitflags! {
    /// Node flag bits - RFC 7752 section 3.3.1.1
    #[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct NodeFlags: u8 {
        const OVERLOAD = msb(0);
        const ATTACHED = msb(1);
        const EXTERNAL = msb(2);
        const ABR = msb(3);
        const ROUTER = msb(4);
        const V6 = msb(5);
    }
}

/// Node attribute TLVs carried with a Node NLRI.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeAttributes {
    /// Multi-topology identifiers, 12 bits each
    pub multi_topology_ids: Vec<u16>,
    pub flags: Option<NodeFlags>,
    pub hostname: Option<String>,
    pub isis_area_ids: Vec<Vec<u8>>,
    pub local_ipv4_router_id: Option<Ipv4Addr>,
    pub local_ipv6_router_id: Option<Ipv6Addr>,
    pub sr_capabilities: Option<SrCapabilities>,
    pub sr_algorithms: Vec<Algorithm>,
    pub sr_local_block: Option<SrLocalBlock>,
    pub msd: Vec<Msd>,
}
