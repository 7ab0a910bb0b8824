//! BGP attribute structs
mod nlri;

pub use nlri::*;

use crate::models::bgp::linkstate::LinkStateAttribute;
use bitflags::bitflags;
use bytes::Bytes;
use num_enum::{FromPrimitive, IntoPrimitive};

bitflags! {
    /// The high-order bit (bit 0) of the Attribute Flags octet is the Optional bit, bit 1 the
    /// Transitive bit, bit 2 the Partial bit and bit 3 the Extended Length bit. The Extended
    /// Length bit decides whether the Attribute Length is one octet or two.
    #[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct AttrFlags: u8 {
        const OPTIONAL = 0b10000000;
        const TRANSITIVE = 0b01000000;
        const PARTIAL = 0b00100000;
        const EXTENDED = 0b00010000;
    }
}

/// Attribute types this crate decodes. Anything else is carried as [RawAttribute].
#[allow(non_camel_case_types)]
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone, FromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum AttrType {
    /// <https://tools.ietf.org/html/rfc4760>
    MP_REACHABLE_NLRI = 14,
    MP_UNREACHABLE_NLRI = 15,
    /// <https://tools.ietf.org/html/rfc7752>
    BGP_LS_ATTRIBUTE = 29,
    #[num_enum(catch_all)]
    Other(u8),
}

/// A path attribute kept as received.
#[derive(Debug, PartialEq, Clone, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawAttribute {
    pub flags: AttrFlags,
    pub attr_type: u8,
    pub value: Bytes,
}

/// Path attributes stored with a route.
///
/// MP_REACH/MP_UNREACH are not part of it: they describe the destinations, not the path.
#[derive(Debug, PartialEq, Clone, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Attributes {
    pub link_state: Option<LinkStateAttribute>,
    pub unrecognized: Vec<RawAttribute>,
}

impl Attributes {
    pub fn with_link_state(link_state: LinkStateAttribute) -> Self {
        Attributes {
            link_state: Some(link_state),
            unrecognized: vec![],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.link_state.is_none() && self.unrecognized.is_empty()
    }
}

/// All path attributes of one UPDATE message.
#[derive(Debug, PartialEq, Clone, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UpdateAttributes {
    pub attributes: Attributes,
    pub mp_reach: Option<MpReachNlri>,
    pub mp_unreach: Option<MpUnreachNlri>,
}
