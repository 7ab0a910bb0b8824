//! BGP Link-State data structures based on RFC 7752 and RFC 9085

mod link;
mod nlri;
mod node;
mod prefix;
mod sr;

pub use link::*;
pub use nlri::*;
pub use node::*;
pub use prefix::*;
pub use sr::*;

use bitflags::Flags;
use num_enum::{FromPrimitive, IntoPrimitive};

/// Flag bit at position `bit`, counting from the most significant bit of an octet.
pub(crate) const fn msb(bit: u8) -> u8 {
    0x80 >> bit
}

/// BGP Link-State NLRI Types as defined in RFC 7752 and IANA registry
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone, FromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u16)]
pub enum NlriType {
    #[num_enum(default)]
    Reserved = 0,
    Node = 1,
    Link = 2,
    Ipv4TopologyPrefix = 3,
    Ipv6TopologyPrefix = 4,
}

/// Protocol Identifier as defined in RFC 7752
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone, FromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum ProtocolId {
    #[num_enum(default)]
    Reserved = 0,
    IsisL1 = 1,
    IsisL2 = 2,
    Ospfv2 = 3,
    Direct = 4,
    Static = 5,
    Ospfv3 = 6,
    Bgp = 7,
}

impl ProtocolId {
    pub fn is_isis(&self) -> bool {
        matches!(self, ProtocolId::IsisL1 | ProtocolId::IsisL2)
    }

    pub fn is_ospf(&self) -> bool {
        matches!(self, ProtocolId::Ospfv2 | ProtocolId::Ospfv3)
    }
}

/// A flags octet whose meaning depends on the IGP that originated it.
///
/// Bits that are not defined for the protocol are retained so the octet is written back
/// unchanged.
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ProtocolFlags<I, O> {
    Isis(I),
    Ospf(O),
    Other(u8),
}

impl<I, O> ProtocolFlags<I, O>
where
    I: Flags<Bits = u8>,
    O: Flags<Bits = u8>,
{
    pub fn from_bits(protocol: ProtocolId, bits: u8) -> Self {
        if protocol.is_isis() {
            ProtocolFlags::Isis(I::from_bits_retain(bits))
        } else if protocol.is_ospf() {
            ProtocolFlags::Ospf(O::from_bits_retain(bits))
        } else {
            ProtocolFlags::Other(bits)
        }
    }

    pub fn bits(&self) -> u8 {
        match self {
            ProtocolFlags::Isis(f) => f.bits(),
            ProtocolFlags::Ospf(f) => f.bits(),
            ProtocolFlags::Other(b) => *b,
        }
    }
}

/// Link-State attribute (path attribute type 29) decoded according to the NLRI it travels with.
#[derive(Debug, PartialEq, Clone, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LinkStateAttribute {
    Link(LinkAttributes),
    Node(NodeAttributes),
    Prefix(PrefixAttributes),
}

impl LinkStateAttribute {
    /// Empty attribute record matching the given NLRI type.
    pub fn empty_for(nlri_type: NlriType) -> Option<Self> {
        match nlri_type {
            NlriType::Node => Some(LinkStateAttribute::Node(NodeAttributes::default())),
            NlriType::Link => Some(LinkStateAttribute::Link(LinkAttributes::default())),
            NlriType::Ipv4TopologyPrefix | NlriType::Ipv6TopologyPrefix => {
                Some(LinkStateAttribute::Prefix(PrefixAttributes::default()))
            }
            NlriType::Reserved => None,
        }
    }
}
