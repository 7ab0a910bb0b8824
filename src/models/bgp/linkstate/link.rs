use super::{msb, AdjacencySid, LanAdjacencySid, PeerSid};
use bitflags::bitflags;
use num_enum::{IntoPrimitive, TryFromPrimitive};
use std::net::{Ipv4Addr, Ipv6Addr};

/// Bandwidth in bytes per second, kept as the 4 IEEE-754 bytes found on the wire.
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bandwidth(pub [u8; 4]);

impl Bandwidth {
    pub fn from_bytes_per_second(value: f32) -> Self {
        Bandwidth(value.to_be_bytes())
    }

    pub fn bytes_per_second(&self) -> f32 {
        f32::from_be_bytes(self.0)
    }
}

/// Link protection type - RFC 5307 section 1.2
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone, TryFromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u16)]
pub enum LinkProtectionType {
    ExtraTraffic = 1,
    Unprotected = 2,
    Shared = 4,
    Dedicated1To1 = 8,
    Dedicated1Plus1 = 16,
    Enhanced = 32,
}

bitflags! {
    /// MPLS protocol mask - RFC 7752 section 3.3.2.2
    #[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct MplsProtocolMask: u8 {
        const LDP = msb(0);
        const RSVP_TE = msb(1);
    }
}

/// Link attribute TLVs carried with a Link NLRI.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LinkAttributes {
    pub local_ipv4_router_id: Option<Ipv4Addr>,
    pub local_ipv6_router_id: Option<Ipv6Addr>,
    pub remote_ipv4_router_id: Option<Ipv4Addr>,
    pub remote_ipv6_router_id: Option<Ipv6Addr>,
    pub admin_group: Option<u32>,
    pub max_link_bandwidth: Option<Bandwidth>,
    pub max_reservable_bandwidth: Option<Bandwidth>,
    /// Unreserved bandwidth for priorities 0 to 7
    pub unreserved_bandwidth: Option<[Bandwidth; 8]>,
    pub te_metric: Option<u32>,
    pub link_protection: Option<LinkProtectionType>,
    pub mpls_protocol: Option<MplsProtocolMask>,
    pub igp_metric: Option<u32>,
    pub shared_risk_link_groups: Vec<u32>,
    pub link_name: Option<String>,
    /// Extended administrative group - RFC 7308
    pub extended_admin_group: Vec<u32>,
    /// Unidirectional link delay in microseconds. The top bit is the anomalous flag.
    pub link_delay: Option<u32>,
    /// Minimum and maximum link delay, each with the anomalous flag in its top bit.
    pub link_min_max_delay: Option<(u32, u32)>,
    pub delay_variation: Option<u32>,
    /// Link loss in units of 0.000003%. The top bit is the anomalous flag.
    pub link_loss: Option<u32>,
    pub residual_bandwidth: Option<Bandwidth>,
    pub available_bandwidth: Option<Bandwidth>,
    pub utilized_bandwidth: Option<Bandwidth>,
    pub adjacency_sids: Vec<AdjacencySid>,
    pub lan_adjacency_sids: Vec<LanAdjacencySid>,
    pub peer_node_sid: Option<PeerSid>,
    pub peer_adjacency_sid: Option<PeerSid>,
    pub peer_set_sids: Vec<PeerSid>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bandwidth() {
        let bw = Bandwidth::from_bytes_per_second(1_250_000.0);
        assert_eq!(bw.0, [0x49, 0x98, 0x96, 0x80]);
        assert_eq!(bw.bytes_per_second(), 1_250_000.0);
    }

    #[test]
    fn test_link_protection() {
        assert_eq!(
            LinkProtectionType::try_from(8u16).unwrap(),
            LinkProtectionType::Dedicated1To1
        );
        assert!(LinkProtectionType::try_from(3u16).is_err());
    }
}
