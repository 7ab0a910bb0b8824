//! BGP Link-State attribute (type 29) and NLRI parsing - RFC 7752, RFC 9085
//!
//! The attribute is a flat TLV stream whose meaning depends on the NLRI it travels with, so the
//! caller names the [NlriType] and [ProtocolId] of the first destination of the UPDATE.
mod link;
mod nlri;
mod node;
mod prefix;
pub mod sr;

pub use link::*;
pub use nlri::*;
pub use node::*;
pub use prefix::*;

use crate::error::ParserError;
use crate::models::*;
use crate::parser::tlv::read_tlvs;
use crate::parser::ReadUtils;
use bytes::{Buf, Bytes, BytesMut};
use log::warn;

pub(crate) fn expect_length(value: &Bytes, expected: usize, tlv_type: u16) -> Result<(), ParserError> {
    if value.len() != expected {
        return Err(ParserError::MalformedTlv {
            tlv_type,
            reason: format!("expected {} bytes, found {}", expected, value.len()),
        });
    }
    Ok(())
}

pub(crate) fn parse_u32_list(mut value: Bytes, tlv_type: u16) -> Result<Vec<u32>, ParserError> {
    if value.len() % 4 != 0 {
        return Err(ParserError::MalformedTlv {
            tlv_type,
            reason: format!("length {} is not a multiple of 4", value.len()),
        });
    }
    let mut list = Vec::with_capacity(value.len() / 4);
    while value.has_remaining() {
        list.push(value.read_u32()?);
    }
    Ok(list)
}

pub(crate) fn read_utf8(value: Bytes, tlv_type: u16) -> Result<String, ParserError> {
    String::from_utf8(value.to_vec()).map_err(|e| ParserError::MalformedTlv {
        tlv_type,
        reason: e.to_string(),
    })
}

/// Parse a BGP-LS attribute for a destination of the given NLRI type.
///
/// Returns `None` when the NLRI type has no attribute layout.
pub fn parse_link_state_attribute(
    input: Bytes,
    nlri_type: NlriType,
    protocol: ProtocolId,
) -> Result<Option<LinkStateAttribute>, ParserError> {
    let tlvs = read_tlvs(input)?;
    let attr = match nlri_type {
        NlriType::Node => LinkStateAttribute::Node(parse_node_attributes(&tlvs, protocol)?),
        NlriType::Link => LinkStateAttribute::Link(parse_link_attributes(&tlvs, protocol)?),
        NlriType::Ipv4TopologyPrefix | NlriType::Ipv6TopologyPrefix => {
            LinkStateAttribute::Prefix(parse_prefix_attributes(&tlvs, protocol)?)
        }
        NlriType::Reserved => {
            warn!("no link-state attribute layout for NLRI type {:?}", nlri_type);
            return Ok(None);
        }
    };
    Ok(Some(attr))
}

/// Encode a BGP-LS attribute value. An attribute without fields encodes to zero bytes.
pub fn encode_link_state_attribute(attr: &LinkStateAttribute) -> Result<Bytes, ParserError> {
    let mut bytes = BytesMut::new();
    match attr {
        LinkStateAttribute::Link(link) => write_link_attributes(link, &mut bytes)?,
        LinkStateAttribute::Node(node) => write_node_attributes(node, &mut bytes)?,
        LinkStateAttribute::Prefix(prefix) => write_prefix_attributes(prefix, &mut bytes)?,
    }
    Ok(bytes.freeze())
}
