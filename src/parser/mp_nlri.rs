use crate::config::PeerConstraint;
use crate::error::ParserError;
use crate::models::*;
use crate::parser::labeled_unicast::{encode_labeled_unicast_nlri, parse_labeled_unicast_nlri};
use crate::parser::linkstate::{encode_link_state_nlri, parse_link_state_nlri};
use crate::parser::next_hop::{encode_next_hop, parse_next_hop};
use crate::parser::vpn::{encode_vpn_nlri, parse_vpn_nlri};
use crate::parser::ReadUtils;
use bytes::{BufMut, Bytes, BytesMut};
use log::{debug, warn};
use std::mem::discriminant;

/// Check the table against the peer constraint and tell whether its NLRI carry path ids.
///
/// Without a constraint every table with a codec is accepted and Add-Path is off.
fn negotiated_add_path(
    table: TableKey,
    constraint: Option<&PeerConstraint>,
) -> Result<bool, ParserError> {
    if Destinations::empty_for(table).is_none() {
        return Err(ParserError::UnsupportedTable(table));
    }
    match constraint {
        Some(c) if !c.is_table_supported(&table) => Err(ParserError::UnsupportedTable(table)),
        Some(c) => Ok(c.supports_add_path(&table)),
        None => Ok(false),
    }
}

/// Parse the NLRI field of an MP_REACH/MP_UNREACH attribute with the codec of `table`.
pub fn parse_destinations(
    input: Bytes,
    table: TableKey,
    add_path: bool,
) -> Result<Destinations, ParserError> {
    let destinations = match (table.afi, table.safi) {
        (Afi::Ipv4 | Afi::Ipv6, Safi::MplsLabel) => {
            Destinations::LabeledUnicast(parse_labeled_unicast_nlri(input, table.afi, add_path)?)
        }
        (Afi::Ipv4 | Afi::Ipv6, Safi::MplsVpn) => {
            Destinations::Vpn(parse_vpn_nlri(input, table.afi, add_path)?)
        }
        (Afi::LinkState, Safi::LinkState | Safi::LinkStateVpn) => Destinations::LinkState(
            parse_link_state_nlri(input, add_path, table.safi == Safi::LinkStateVpn)?,
        ),
        _ => return Err(ParserError::UnsupportedTable(table)),
    };
    debug!("{} destinations parsed for table {}", destinations.len(), table);
    Ok(destinations)
}

/// Keep the destinations read before a malformed NLRI. Other errors are returned unchanged.
fn keep_parsed_destinations(
    result: Result<Destinations, ParserError>,
    table: TableKey,
) -> Result<Destinations, ParserError> {
    match result {
        Err(ParserError::PartialNlri { parsed, source }) => {
            warn!(
                "table {}: keeping {} destinations read before malformed NLRI: {}",
                table,
                parsed.len(),
                source
            );
            Ok(parsed)
        }
        other => other,
    }
}

/// Encode destinations for the NLRI field of `table`. Withdrawn labeled destinations carry the
/// withdraw label instead of their stack.
pub fn encode_destinations(
    destinations: &Destinations,
    table: TableKey,
    reachable: bool,
    add_path: bool,
) -> Result<Bytes, ParserError> {
    match destinations {
        Destinations::LabeledUnicast(v) => encode_labeled_unicast_nlri(v, reachable, add_path),
        Destinations::Vpn(v) => encode_vpn_nlri(v, reachable, add_path),
        Destinations::LinkState(v) => {
            let vpn = table.safi == Safi::LinkStateVpn;
            let mut bytes = BytesMut::new();
            for nlri in v {
                encode_link_state_nlri(nlri, add_path, vpn, &mut bytes)?;
            }
            Ok(bytes.freeze())
        }
    }
}

fn check_family(table: TableKey, destinations: &Destinations) -> Result<(), ParserError> {
    match Destinations::empty_for(table) {
        Some(empty) if discriminant(&empty) == discriminant(destinations) => Ok(()),
        _ => Err(ParserError::UnsupportedTable(table)),
    }
}

/// Parse MP_REACH_NLRI (type 14).
///
/// <https://datatracker.ietf.org/doc/html/rfc4760#section-3>
/// ```text
/// +---------------------------------------------------------+
/// | Address Family Identifier (2 octets)                    |
/// +---------------------------------------------------------+
/// | Subsequent Address Family Identifier (1 octet)          |
/// +---------------------------------------------------------+
/// | Length of Next Hop Network Address (1 octet)            |
/// +---------------------------------------------------------+
/// | Network Address of Next Hop (variable)                  |
/// +---------------------------------------------------------+
/// | Reserved (1 octet)                                      |
/// +---------------------------------------------------------+
/// | Network Layer Reachability Information (variable)       |
/// +---------------------------------------------------------+
/// ```
pub fn parse_mp_reach_nlri(
    mut input: Bytes,
    constraint: Option<&PeerConstraint>,
) -> Result<MpReachNlri, ParserError> {
    let afi = input.read_afi()?;
    let safi = input.read_safi()?;
    let table = TableKey::new(afi, safi);
    let add_path = negotiated_add_path(table, constraint)?;

    let next_hop_length = input.read_u8()? as usize;
    input.has_n_remaining(next_hop_length)?;
    let next_hop = parse_next_hop(input.split_to(next_hop_length), safi)?;

    if input.read_u8()? != 0 {
        warn!("MP_REACH_NLRI reserved byte not 0");
    }

    let destinations = keep_parsed_destinations(parse_destinations(input, table, add_path), table)?;
    Ok(MpReachNlri {
        afi,
        safi,
        next_hop,
        destinations,
    })
}

/// Parse MP_UNREACH_NLRI (type 15): AFI, SAFI and the withdrawn routes.
pub fn parse_mp_unreach_nlri(
    mut input: Bytes,
    constraint: Option<&PeerConstraint>,
) -> Result<MpUnreachNlri, ParserError> {
    let afi = input.read_afi()?;
    let safi = input.read_safi()?;
    let table = TableKey::new(afi, safi);
    let add_path = negotiated_add_path(table, constraint)?;
    let destinations = keep_parsed_destinations(parse_destinations(input, table, add_path), table)?;
    Ok(MpUnreachNlri {
        afi,
        safi,
        destinations,
    })
}

pub fn encode_mp_reach_nlri(
    reach: &MpReachNlri,
    constraint: Option<&PeerConstraint>,
) -> Result<Bytes, ParserError> {
    let table = reach.table();
    let add_path = negotiated_add_path(table, constraint)?;
    check_family(table, &reach.destinations)?;

    let mut bytes = BytesMut::new();
    bytes.put_u16(reach.afi.into());
    bytes.put_u8(reach.safi.into());
    let next_hop = encode_next_hop(&reach.next_hop, reach.safi);
    bytes.put_u8(next_hop.len() as u8);
    bytes.put_slice(&next_hop);
    // reserved
    bytes.put_u8(0);
    bytes.put_slice(&encode_destinations(&reach.destinations, table, true, add_path)?);
    Ok(bytes.freeze())
}

pub fn encode_mp_unreach_nlri(
    unreach: &MpUnreachNlri,
    constraint: Option<&PeerConstraint>,
) -> Result<Bytes, ParserError> {
    let table = unreach.table();
    let add_path = negotiated_add_path(table, constraint)?;
    check_family(table, &unreach.destinations)?;

    let mut bytes = BytesMut::new();
    bytes.put_u16(unreach.afi.into());
    bytes.put_u8(unreach.safi.into());
    bytes.put_slice(&encode_destinations(&unreach.destinations, table, false, add_path)?);
    Ok(bytes.freeze())
}
