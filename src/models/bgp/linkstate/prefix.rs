use super::{msb, BindingSid, PrefixSid, ProtocolFlags, SrRange};
use bitflags::bitflags;
use std::net::{IpAddr, Ipv4Addr};

bitflags! {
    /// IGP flags - RFC 7752 section 3.3.3.1
    #[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct IgpFlags: u8 {
        const ISIS_UP_DOWN = msb(0);
        const OSPF_NO_UNICAST = msb(1);
        const OSPF_LOCAL_ADDRESS = msb(2);
        const OSPF_PROPAGATE_NSSA = msb(3);
    }
}

bitflags! {
    /// ISIS prefix attribute flags - RFC 7794
    #[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct IsisPrefixAttrFlags: u8 {
        const EXTERNAL = msb(0);
        const READVERTISEMENT = msb(1);
        const NODE = msb(2);
    }
}

bitflags! {
    /// OSPF extended prefix flags - RFC 7684
    #[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct OspfPrefixAttrFlags: u8 {
        const ATTACH = msb(0);
        const NODE = msb(1);
    }
}

pub type PrefixAttributeFlags = ProtocolFlags<IsisPrefixAttrFlags, OspfPrefixAttrFlags>;

/// Prefix attribute TLVs carried with an IPv4/IPv6 Topology Prefix NLRI.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PrefixAttributes {
    pub igp_flags: Option<IgpFlags>,
    pub route_tags: Vec<u32>,
    pub extended_route_tags: Vec<u64>,
    pub prefix_metric: Option<u32>,
    pub ospf_forwarding_address: Option<IpAddr>,
    pub prefix_sid: Option<PrefixSid>,
    pub range: Option<SrRange>,
    pub binding_sids: Vec<BindingSid>,
    pub attribute_flags: Option<PrefixAttributeFlags>,
    pub source_router_id: Option<IpAddr>,
    pub source_ospf_router_id: Option<Ipv4Addr>,
}
