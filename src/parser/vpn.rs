//! VPN-IPv4/VPN-IPv6 NLRI (SAFI 128) - RFC 4364 section 4.3.4, RFC 4659
//!
//! Labeled-Unicast encoding with an 8-byte route distinguisher between the label stack and the
//! prefix. The NLRI length covers labels, RD and prefix.
use crate::error::ParserError;
use crate::models::*;
use crate::parser::labeled_unicast::{encode_labeled_destination, parse_labeled_destinations};
use bytes::{Bytes, BytesMut};

pub fn parse_vpn_nlri(
    input: Bytes,
    afi: Afi,
    add_path: bool,
) -> Result<Vec<LabeledDestination>, ParserError> {
    parse_labeled_destinations(input, afi, add_path, true)
}

/// Encode VPN destinations. Every destination must carry a route distinguisher.
pub fn encode_vpn_nlri(
    destinations: &[LabeledDestination],
    reachable: bool,
    add_path: bool,
) -> Result<Bytes, ParserError> {
    let mut output = BytesMut::new();
    for destination in destinations {
        if destination.route_distinguisher.is_none() {
            return Err(ParserError::UnsupportedField("route distinguisher"));
        }
        encode_labeled_destination(destination, reachable, add_path, &mut output)?;
    }
    Ok(output.freeze())
}
