use super::{NlriType, ProtocolId};
use crate::models::RouteDistinguisher;
use ipnet::IpNet;
use std::net::{Ipv4Addr, Ipv6Addr};

/// A TLV this crate does not interpret, kept so it can be written back.
#[derive(Debug, PartialEq, Clone, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tlv {
    pub tlv_type: u16,
    pub value: Vec<u8>,
}

impl Tlv {
    pub fn new(tlv_type: u16, value: Vec<u8>) -> Self {
        Self { tlv_type, value }
    }
}

/// Node Descriptor sub-TLVs (512-515)
#[derive(Debug, PartialEq, Clone, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeDescriptor {
    pub autonomous_system: Option<u32>,
    pub bgp_ls_identifier: Option<u32>,
    pub ospf_area_id: Option<u32>,
    pub igp_router_id: Option<Vec<u8>>,
    pub unknown_tlvs: Vec<Tlv>,
}

/// Link Descriptor TLVs (258-263)
#[derive(Debug, PartialEq, Clone, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LinkDescriptor {
    pub link_local_remote_identifiers: Option<(u32, u32)>,
    pub ipv4_interface_address: Option<Ipv4Addr>,
    pub ipv4_neighbor_address: Option<Ipv4Addr>,
    pub ipv6_interface_address: Option<Ipv6Addr>,
    pub ipv6_neighbor_address: Option<Ipv6Addr>,
    pub multi_topology_id: Option<u16>,
    pub unknown_tlvs: Vec<Tlv>,
}

/// Prefix Descriptor TLVs (263-265)
#[derive(Debug, PartialEq, Clone, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PrefixDescriptor {
    pub multi_topology_id: Option<u16>,
    pub ospf_route_type: Option<u8>,
    pub ip_reachability_information: Option<IpNet>,
    pub unknown_tlvs: Vec<Tlv>,
}

/// BGP Link-State NLRI - RFC 7752 section 3.2
///
/// `route_distinguisher` is carried only by BGP-LS-VPN (SAFI 72) NLRI.
#[derive(Debug, PartialEq, Clone, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LinkStateNlri {
    pub path_id: Option<u32>,
    pub route_distinguisher: Option<RouteDistinguisher>,
    pub nlri_type: NlriType,
    pub protocol_id: ProtocolId,
    pub identifier: u64,
    pub local_node_descriptors: NodeDescriptor,
    pub remote_node_descriptors: Option<NodeDescriptor>,
    pub link_descriptors: Option<LinkDescriptor>,
    pub prefix_descriptors: Option<PrefixDescriptor>,
}

impl LinkStateNlri {
    pub fn new_node_nlri(
        protocol_id: ProtocolId,
        identifier: u64,
        local_node_descriptors: NodeDescriptor,
    ) -> Self {
        Self {
            path_id: None,
            route_distinguisher: None,
            nlri_type: NlriType::Node,
            protocol_id,
            identifier,
            local_node_descriptors,
            remote_node_descriptors: None,
            link_descriptors: None,
            prefix_descriptors: None,
        }
    }

    pub fn new_link_nlri(
        protocol_id: ProtocolId,
        identifier: u64,
        local_node_descriptors: NodeDescriptor,
        remote_node_descriptors: NodeDescriptor,
        link_descriptors: LinkDescriptor,
    ) -> Self {
        Self {
            path_id: None,
            route_distinguisher: None,
            nlri_type: NlriType::Link,
            protocol_id,
            identifier,
            local_node_descriptors,
            remote_node_descriptors: Some(remote_node_descriptors),
            link_descriptors: Some(link_descriptors),
            prefix_descriptors: None,
        }
    }

    /// `nlri_type` is either [NlriType::Ipv4TopologyPrefix] or [NlriType::Ipv6TopologyPrefix].
    pub fn new_prefix_nlri(
        nlri_type: NlriType,
        protocol_id: ProtocolId,
        identifier: u64,
        local_node_descriptors: NodeDescriptor,
        prefix_descriptors: PrefixDescriptor,
    ) -> Self {
        Self {
            path_id: None,
            route_distinguisher: None,
            nlri_type,
            protocol_id,
            identifier,
            local_node_descriptors,
            remote_node_descriptors: None,
            link_descriptors: None,
            prefix_descriptors: Some(prefix_descriptors),
        }
    }

    pub fn with_path_id(mut self, path_id: u32) -> Self {
        self.path_id = Some(path_id);
        self
    }

    pub fn with_route_distinguisher(mut self, rd: RouteDistinguisher) -> Self {
        self.route_distinguisher = Some(rd);
        self
    }
}
