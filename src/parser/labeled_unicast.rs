//! Labeled-Unicast NLRI (SAFI 4) - RFC 8277
//!
//! ```text
//! +---------------------------+
//! |   Length (1 octet)        |
//! +---------------------------+
//! |   Label (3 octets)        |
//! +---------------------------+
//! .............................
//! +---------------------------+
//! |   Prefix (variable)       |
//! +---------------------------+
//! ```
//!
//! The same encoding with a route distinguisher between the labels and the prefix is used by
//! VPN NLRI, see [crate::parser::vpn].
use crate::error::ParserError;
use crate::models::*;
use crate::parser::ReadUtils;
use bytes::{Buf, BufMut, Bytes, BytesMut};
use log::trace;

const LABEL_BITS: usize = LABEL_LENGTH * 8;
const RD_BITS: usize = RouteDistinguisher::LENGTH * 8;

/// Read label stack entries until one carries the bottom-of-stack bit.
///
/// Returns the stack and the number of 3-byte entries consumed. A first entry equal to
/// [WITHDRAW_LABEL] yields an empty stack that still accounts for one entry. `max_bits` is the
/// NLRI length, which bounds the number of entries.
pub fn parse_label_stack(
    input: &mut Bytes,
    max_bits: usize,
) -> Result<(LabelStack, usize), ParserError> {
    let mut labels = LabelStack::new();
    let mut entries = 0;
    loop {
        if (entries + 1) * LABEL_BITS > max_bits {
            return Err(ParserError::MalformedNlri(format!(
                "label stack exceeds NLRI length of {} bits",
                max_bits
            )));
        }
        let entry = input.read_u24()?;
        entries += 1;
        if entries == 1 && entry == WITHDRAW_LABEL {
            break;
        }
        let (label, bottom) = MplsLabel::from_entry(entry);
        labels.push(label);
        if bottom {
            break;
        }
    }
    Ok((labels, entries))
}

fn parse_labeled_destination(
    input: &mut Bytes,
    afi: Afi,
    add_path: bool,
    with_rd: bool,
) -> Result<LabeledDestination, ParserError> {
    let path_id = if add_path { Some(input.read_u32()?) } else { None };
    let total_bits = input.read_u8()? as usize;
    let (labels, entries) = parse_label_stack(input, total_bits)?;

    let route_distinguisher = match with_rd {
        true => Some(input.read_route_distinguisher()?),
        false => None,
    };
    let overhead = entries * LABEL_BITS + if with_rd { RD_BITS } else { 0 };
    let prefix_bits = total_bits.checked_sub(overhead).ok_or_else(|| {
        ParserError::MalformedNlri(format!(
            "NLRI length {} shorter than {} label and RD bits",
            total_bits, overhead
        ))
    })?;
    let prefix = input.read_prefix_bits(afi, prefix_bits as u8)?;

    Ok(LabeledDestination {
        path_id,
        labels,
        route_distinguisher,
        prefix,
    })
}

/// Shared parser for Labeled-Unicast (`with_rd == false`) and VPN (`with_rd == true`) NLRI.
///
/// A malformed NLRI stops the parse. When destinations were read before it, the error is
/// [ParserError::PartialNlri] carrying them.
pub(crate) fn parse_labeled_destinations(
    mut input: Bytes,
    afi: Afi,
    add_path: bool,
    with_rd: bool,
) -> Result<Vec<LabeledDestination>, ParserError> {
    let mut destinations = vec![];
    while input.has_remaining() {
        match parse_labeled_destination(&mut input, afi, add_path, with_rd) {
            Ok(destination) => {
                trace!("parsed labeled destination {:?}", destination);
                destinations.push(destination);
            }
            Err(e) => {
                let parsed = match with_rd {
                    true => Destinations::Vpn(destinations),
                    false => Destinations::LabeledUnicast(destinations),
                };
                return Err(e.after_destinations(parsed));
            }
        }
    }
    Ok(destinations)
}

/// Append one labeled destination.
///
/// Reachable destinations carry their label stack, the last entry marked bottom-of-stack.
/// Unreachable ones carry the withdraw label instead. The RD is written when present.
pub(crate) fn encode_labeled_destination(
    destination: &LabeledDestination,
    reachable: bool,
    add_path: bool,
    output: &mut BytesMut,
) -> Result<(), ParserError> {
    if add_path {
        output.put_u32(destination.path_id.unwrap_or(0));
    }
    let entries = if reachable {
        destination.labels.len()
    } else {
        1
    };
    if entries == 0 {
        return Err(ParserError::UnsupportedField("label stack"));
    }
    let rd_bits = match destination.route_distinguisher {
        Some(_) => RD_BITS,
        None => 0,
    };
    let total_bits = entries * LABEL_BITS + rd_bits + destination.prefix.prefix_len() as usize;
    let total_bits = u8::try_from(total_bits).map_err(|_| {
        ParserError::MalformedNlri(format!("NLRI length of {} bits exceeds 255", total_bits))
    })?;
    output.put_u8(total_bits);

    if reachable {
        let last = destination.labels.len() - 1;
        for (i, label) in destination.labels.iter().enumerate() {
            output.put_uint(label.to_entry(i == last) as u64, LABEL_LENGTH);
        }
    } else {
        output.put_uint(WITHDRAW_LABEL as u64, LABEL_LENGTH);
    }
    if let Some(rd) = &destination.route_distinguisher {
        output.put_slice(rd.as_bytes());
    }
    output.put_slice(&prefix_bytes(&destination.prefix));
    Ok(())
}

/// Parse the NLRI field of a Labeled-Unicast MP_REACH/MP_UNREACH attribute.
pub fn parse_labeled_unicast_nlri(
    input: Bytes,
    afi: Afi,
    add_path: bool,
) -> Result<Vec<LabeledDestination>, ParserError> {
    parse_labeled_destinations(input, afi, add_path, false)
}

/// Encode Labeled-Unicast destinations. Route distinguishers are not written.
pub fn encode_labeled_unicast_nlri(
    destinations: &[LabeledDestination],
    reachable: bool,
    add_path: bool,
) -> Result<Bytes, ParserError> {
    let mut output = BytesMut::new();
    for destination in destinations {
        let destination = LabeledDestination {
            route_distinguisher: None,
            ..destination.clone()
        };
        encode_labeled_destination(&destination, reachable, add_path, &mut output)?;
    }
    Ok(output.freeze())
}

/// Serialize the identifying part of a destination: length, route distinguisher when present,
/// and prefix. Labels and path id are left out.
pub fn encode_route_key_nlri(destination: &LabeledDestination) -> Bytes {
    let mut output = BytesMut::with_capacity(1 + RouteDistinguisher::LENGTH + 16);
    let rd_bits = match destination.route_distinguisher {
        Some(_) => RD_BITS,
        None => 0,
    };
    // at most 64 + 128 bits
    output.put_u8((rd_bits + destination.prefix.prefix_len() as usize) as u8);
    if let Some(rd) = &destination.route_distinguisher {
        output.put_slice(rd.as_bytes());
    }
    output.put_slice(&prefix_bytes(&destination.prefix));
    output.freeze()
}
