//! Path attribute stream of an UPDATE message.
//!
//! MP_REACH_NLRI, MP_UNREACH_NLRI and the BGP-LS attribute are decoded. Every other attribute
//! is kept as a [RawAttribute] so it can be stored and re-advertised unchanged.
use crate::config::PeerConstraint;
use crate::error::ParserError;
use crate::models::*;
use crate::parser::linkstate::{encode_link_state_attribute, parse_link_state_attribute};
use crate::parser::mp_nlri::{
    encode_mp_reach_nlri, encode_mp_unreach_nlri, parse_mp_reach_nlri, parse_mp_unreach_nlri,
};
use crate::parser::ReadUtils;
use bytes::{Buf, BufMut, Bytes, BytesMut};
use log::{debug, warn};

pub struct AttributeParser<'a> {
    constraint: Option<&'a PeerConstraint>,
}

impl<'a> AttributeParser<'a> {
    pub fn new(constraint: Option<&'a PeerConstraint>) -> AttributeParser<'a> {
        AttributeParser { constraint }
    }

    /// Parse the path attributes section of an UPDATE message.
    ///
    /// The BGP-LS attribute is decoded after the whole section has been read, using the NLRI type
    /// and protocol of the first Link-State destination in MP_REACH_NLRI. Without one it is kept
    /// raw.
    pub fn parse_attributes(&self, mut data: Bytes) -> Result<UpdateAttributes, ParserError> {
        let mut update = UpdateAttributes::default();
        let mut link_state: Option<(AttrFlags, Bytes)> = None;

        // a trailer too short for a flag, type and length header is truncated input
        while data.has_remaining() {
            let flags = AttrFlags::from_bits_retain(data.read_u8()?);
            let attr_type = data.read_u8()?;
            let attr_length = match flags.contains(AttrFlags::EXTENDED) {
                false => data.read_u8()? as usize,
                true => data.read_u16()? as usize,
            };
            debug!(
                "reading attribute: type -- {}, length -- {}",
                attr_type, attr_length
            );
            let value = data.read_n_bytes(attr_length)?;

            let result = match AttrType::from(attr_type) {
                AttrType::MP_REACHABLE_NLRI => {
                    parse_mp_reach_nlri(value, self.constraint).map(|v| update.mp_reach = Some(v))
                }
                AttrType::MP_UNREACHABLE_NLRI => parse_mp_unreach_nlri(value, self.constraint)
                    .map(|v| update.mp_unreach = Some(v)),
                AttrType::BGP_LS_ATTRIBUTE => {
                    link_state = Some((flags, value));
                    Ok(())
                }
                AttrType::Other(_) => {
                    update.attributes.unrecognized.push(RawAttribute {
                        flags,
                        attr_type,
                        value,
                    });
                    Ok(())
                }
            };

            match result {
                Ok(()) => {}
                Err(e) if flags.contains(AttrFlags::PARTIAL) => {
                    warn!("PARTIAL: {}", e);
                }
                Err(e) => {
                    warn!("{}", e);
                    return Err(e);
                }
            }
        }

        if let Some((flags, value)) = link_state {
            let first = match update.mp_reach.as_ref().map(|r| &r.destinations) {
                Some(Destinations::LinkState(v)) => v.first(),
                _ => None,
            };
            match first {
                Some(nlri) => {
                    match parse_link_state_attribute(value, nlri.nlri_type, nlri.protocol_id) {
                        Ok(attr) => update.attributes.link_state = attr,
                        Err(e) if flags.contains(AttrFlags::PARTIAL) => {
                            warn!("PARTIAL: {}", e);
                        }
                        Err(e) => return Err(e),
                    }
                }
                None => {
                    warn!("BGP-LS attribute without link-state destinations, kept raw");
                    update.attributes.unrecognized.push(RawAttribute {
                        flags,
                        attr_type: AttrType::BGP_LS_ATTRIBUTE.into(),
                        value,
                    });
                }
            }
        }
        Ok(update)
    }
}

pub(crate) fn write_attribute(
    flags: AttrFlags,
    attr_type: u8,
    value: &[u8],
    output: &mut BytesMut,
) -> Result<(), ParserError> {
    let length = value.len();
    if length > u16::MAX as usize {
        return Err(ParserError::TlvTooLong {
            tlv_type: attr_type as u16,
            length,
        });
    }
    let extended = length > u8::MAX as usize;
    let flags = match extended {
        true => flags | AttrFlags::EXTENDED,
        false => flags - AttrFlags::EXTENDED,
    };
    output.put_u8(flags.bits());
    output.put_u8(attr_type);
    match extended {
        true => output.put_u16(length as u16),
        false => output.put_u8(length as u8),
    }
    output.put_slice(value);
    Ok(())
}

/// Encode the path attributes section: MP_REACH_NLRI, MP_UNREACH_NLRI, the BGP-LS attribute,
/// then the unrecognized attributes in their original order.
pub fn encode_attributes(
    update: &UpdateAttributes,
    constraint: Option<&PeerConstraint>,
) -> Result<Bytes, ParserError> {
    let mut bytes = BytesMut::new();
    if let Some(reach) = &update.mp_reach {
        write_attribute(
            AttrFlags::OPTIONAL,
            AttrType::MP_REACHABLE_NLRI.into(),
            &encode_mp_reach_nlri(reach, constraint)?,
            &mut bytes,
        )?;
    }
    if let Some(unreach) = &update.mp_unreach {
        write_attribute(
            AttrFlags::OPTIONAL,
            AttrType::MP_UNREACHABLE_NLRI.into(),
            &encode_mp_unreach_nlri(unreach, constraint)?,
            &mut bytes,
        )?;
    }
    if let Some(link_state) = &update.attributes.link_state {
        write_attribute(
            AttrFlags::OPTIONAL,
            AttrType::BGP_LS_ATTRIBUTE.into(),
            &encode_link_state_attribute(link_state)?,
            &mut bytes,
        )?;
    }
    for raw in &update.attributes.unrecognized {
        write_attribute(raw.flags, raw.attr_type, &raw.value, &mut bytes)?;
    }
    Ok(bytes.freeze())
}
