//! Segment Routing sub-objects of Link-State attributes - RFC 9085, RFC 9086

use super::{msb, ProtocolFlags};
use bitflags::bitflags;
use num_enum::{FromPrimitive, IntoPrimitive};
use std::net::{Ipv4Addr, Ipv6Addr};

/// SID/Label TLV value (type 1161), distinguished by its length on the wire.
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SidLabelIndex {
    /// 3 bytes, rightmost 20 bits
    Label(u32),
    /// 4 bytes
    Index(u32),
    /// 16 bytes
    Ipv6(Ipv6Addr),
}

/// Segment Routing algorithm - RFC 8402
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone, FromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Algorithm {
    ShortestPathFirst = 0,
    StrictShortestPathFirst = 1,
    #[num_enum(catch_all)]
    Other(u8),
}

bitflags! {
    /// ISIS adjacency SID flags: `F B V L S P`
    #[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct IsisAdjFlags: u8 {
        const ADDRESS_FAMILY = msb(0);
        const BACKUP = msb(1);
        const VALUE = msb(2);
        const LOCAL = msb(3);
        const SET = msb(4);
        const PERSISTENT = msb(5);
    }
}

bitflags! {
    /// OSPF adjacency SID flags: `B V L G P`
    #[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct OspfAdjFlags: u8 {
        const BACKUP = msb(0);
        const VALUE = msb(1);
        const LOCAL = msb(2);
        const SET = msb(3);
        const PERSISTENT = msb(4);
    }
}

bitflags! {
    /// BGP peering SID flags (RFC 9086): `V L B P`
    #[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct EpeSidFlags: u8 {
        const VALUE = msb(0);
        const LOCAL = msb(1);
        const BACKUP = msb(2);
        const PERSISTENT = msb(3);
    }
}

bitflags! {
    /// SR capabilities flags for ISIS: `I V`
    #[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct SrCapabilityFlags: u8 {
        const MPLS_IPV4 = msb(0);
        const MPLS_IPV6 = msb(1);
    }
}

bitflags! {
    /// ISIS prefix SID flags: `R N P E V L`
    #[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct IsisPrefixSidFlags: u8 {
        const READVERTISEMENT = msb(0);
        const NODE_SID = msb(1);
        const NO_PHP = msb(2);
        const EXPLICIT_NULL = msb(3);
        const VALUE = msb(4);
        const LOCAL = msb(5);
    }
}

bitflags! {
    /// OSPF prefix SID flags: `NP M E V L`
    #[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct OspfPrefixSidFlags: u8 {
        const NO_PHP = msb(1);
        const MAPPING_SERVER = msb(2);
        const EXPLICIT_NULL = msb(3);
        const VALUE = msb(4);
        const LOCAL = msb(5);
    }
}

bitflags! {
    /// ISIS SID/Label binding and range flags: `F M S D A`
    #[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct IsisBindingFlags: u8 {
        const ADDRESS_FAMILY = msb(0);
        const MIRROR_CONTEXT = msb(1);
        const SPREAD_TLV = msb(2);
        const LEAKED_FROM_LEVEL_2 = msb(3);
        const ATTACHED = msb(4);
    }
}

bitflags! {
    /// OSPF SID/Label binding flags: `M`
    #[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct OspfBindingFlags: u8 {
        const MIRRORING = msb(0);
    }
}

bitflags! {
    /// OSPF extended prefix range flags: `IA`
    #[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct OspfRangeFlags: u8 {
        const INTER_AREA = msb(0);
    }
}

bitflags! {
    /// Loose hop flag of ERO sub-TLVs
    #[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct EroFlags: u8 {
        const LOOSE = msb(0);
    }
}

pub type AdjacencySidFlags = ProtocolFlags<IsisAdjFlags, OspfAdjFlags>;
pub type PrefixSidFlags = ProtocolFlags<IsisPrefixSidFlags, OspfPrefixSidFlags>;
pub type RangeFlags = ProtocolFlags<IsisBindingFlags, OspfRangeFlags>;
pub type BindingSidFlags = ProtocolFlags<IsisBindingFlags, OspfBindingFlags>;

/// Adjacency SID TLV (1099)
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AdjacencySid {
    pub flags: AdjacencySidFlags,
    pub weight: u8,
    pub sid: SidLabelIndex,
}

/// Neighbor of a LAN adjacency SID.
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NeighborId {
    /// ISIS system identifier
    IsoSystemId([u8; 6]),
    /// OSPF neighbor router identifier
    RouterId(Ipv4Addr),
}

/// LAN Adjacency SID TLV (1100)
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LanAdjacencySid {
    pub flags: AdjacencySidFlags,
    pub weight: u8,
    pub neighbor: NeighborId,
    pub sid: SidLabelIndex,
}

/// BGP Peer Node/Adjacency/Set SID TLVs (1101-1103)
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PeerSid {
    pub flags: EpeSidFlags,
    pub weight: u8,
    pub sid: SidLabelIndex,
}

/// One SRGB/SRLB range: a 3-byte range size followed by the first SID or label.
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SidRange {
    pub range_size: u32,
    pub first_sid: SidLabelIndex,
}

/// SR Capabilities TLV (1034)
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SrCapabilities {
    pub flags: SrCapabilityFlags,
    pub ranges: Vec<SidRange>,
}

/// SR Local Block TLV (1036)
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SrLocalBlock {
    pub flags: u8,
    pub ranges: Vec<SidRange>,
}

/// Maximum SID depth entry (RFC 8814)
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Msd {
    pub msd_type: u8,
    pub value: u8,
}

/// Prefix SID TLV (1158)
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PrefixSid {
    pub flags: PrefixSidFlags,
    pub algorithm: Algorithm,
    pub sid: SidLabelIndex,
}

/// Range TLV (1159)
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SrRange {
    pub flags: RangeFlags,
    pub range_size: u16,
    pub sub_tlvs: Vec<RangeSubTlv>,
}

#[derive(Debug, PartialEq, Eq, Hash, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RangeSubTlv {
    PrefixSid(PrefixSid),
    BindingSid(BindingSid),
}

/// SID/Label Binding TLV (1160)
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BindingSid {
    pub weight: u8,
    pub flags: BindingSidFlags,
    pub sub_tlvs: Vec<BindingSubTlv>,
}

/// Sub-TLVs of a SID/Label Binding TLV. `backup` selects the backup ERO code points.
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BindingSubTlv {
    SidLabel(SidLabelIndex),
    PrefixSid(PrefixSid),
    EroMetric(u32),
    Ipv4Ero {
        flags: EroFlags,
        address: Ipv4Addr,
        backup: bool,
    },
    Ipv6Ero {
        flags: EroFlags,
        address: Ipv6Addr,
        backup: bool,
    },
    UnnumberedEro {
        flags: EroFlags,
        router_id: u32,
        interface_id: u32,
        backup: bool,
    },
}
