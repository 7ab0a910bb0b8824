//! Prefix attribute TLVs - RFC 7752 section 3.3.3
use super::{expect_length, parse_u32_list};
use crate::error::ParserError;
use crate::models::*;
use crate::parser::linkstate::sr::*;
use crate::parser::tlv::{write_tlv, TlvMap};
use crate::parser::ReadUtils;
use bytes::{Buf, Bytes, BytesMut};
use log::{debug, warn};
use std::net::IpAddr;

const IGP_FLAGS: u16 = 1152;
const ROUTE_TAG: u16 = 1153;
const EXTENDED_ROUTE_TAG: u16 = 1154;
const PREFIX_METRIC: u16 = 1155;
const OSPF_FORWARDING_ADDRESS: u16 = 1156;
const PREFIX_OPAQUE: u16 = 1157;
const RANGE: u16 = 1159;
const PREFIX_ATTRIBUTE_FLAGS: u16 = 1170;
const SOURCE_ROUTER_ID: u16 = 1171;
const SOURCE_OSPF_ROUTER_ID: u16 = 1174;

/// IPv4 or IPv6 address, chosen by the value length.
fn read_ip_address(mut value: Bytes) -> Result<Option<IpAddr>, ParserError> {
    Ok(match value.len() {
        4 => Some(IpAddr::V4(value.read_ipv4_address()?)),
        16 => Some(IpAddr::V6(value.read_ipv6_address()?)),
        _ => None,
    })
}

fn ip_octets(addr: &IpAddr) -> Vec<u8> {
    match addr {
        IpAddr::V4(a) => a.octets().to_vec(),
        IpAddr::V6(a) => a.octets().to_vec(),
    }
}

pub fn parse_prefix_attributes(
    tlvs: &TlvMap,
    protocol: ProtocolId,
) -> Result<PrefixAttributes, ParserError> {
    let mut attrs = PrefixAttributes::default();
    for (tlv_type, value) in tlvs.iter() {
        let mut value = value.clone();
        match tlv_type {
            IGP_FLAGS => {
                expect_length(&value, 1, tlv_type)?;
                attrs.igp_flags = Some(IgpFlags::from_bits_retain(value.read_u8()?));
            }
            ROUTE_TAG => attrs.route_tags.extend(parse_u32_list(value, tlv_type)?),
            EXTENDED_ROUTE_TAG => {
                if value.len() % 8 != 0 {
                    return Err(ParserError::MalformedTlv {
                        tlv_type,
                        reason: format!("length {} is not a multiple of 8", value.len()),
                    });
                }
                while value.has_remaining() {
                    attrs.extended_route_tags.push(value.read_u64()?);
                }
            }
            PREFIX_METRIC => {
                expect_length(&value, 4, tlv_type)?;
                attrs.prefix_metric = Some(value.read_u32()?);
            }
            OSPF_FORWARDING_ADDRESS => {
                let len = value.len();
                match read_ip_address(value)? {
                    Some(addr) => attrs.ospf_forwarding_address = Some(addr),
                    None => warn!("ignoring OSPF forwarding address of {} bytes", len),
                }
            }
            PREFIX_OPAQUE => debug!("skipping opaque prefix attribute of {} bytes", value.len()),
            PREFIX_SID => attrs.prefix_sid = Some(parse_prefix_sid(value, protocol)?),
            RANGE => attrs.range = Some(parse_range(value, protocol)?),
            BINDING_SID => attrs.binding_sids.push(parse_binding_sid(value, protocol)?),
            PREFIX_ATTRIBUTE_FLAGS => {
                expect_length(&value, 1, tlv_type)?;
                attrs.attribute_flags =
                    Some(PrefixAttributeFlags::from_bits(protocol, value.read_u8()?));
            }
            SOURCE_ROUTER_ID => {
                let len = value.len();
                attrs.source_router_id =
                    Some(read_ip_address(value)?.ok_or(ParserError::MalformedTlv {
                        tlv_type,
                        reason: format!("router id of {} bytes", len),
                    })?);
            }
            SOURCE_OSPF_ROUTER_ID => {
                expect_length(&value, 4, tlv_type)?;
                attrs.source_ospf_router_id = Some(value.read_ipv4_address()?);
            }
            t => warn!("ignoring unknown prefix attribute TLV {}", t),
        }
    }
    debug!("parsed prefix attributes: {:?}", attrs);
    Ok(attrs)
}

pub fn write_prefix_attributes(
    attrs: &PrefixAttributes,
    output: &mut BytesMut,
) -> Result<(), ParserError> {
    if let Some(flags) = attrs.igp_flags {
        write_tlv(IGP_FLAGS, &[flags.bits()], output)?;
    }
    if !attrs.route_tags.is_empty() {
        let value: Vec<u8> = attrs.route_tags.iter().flat_map(|t| t.to_be_bytes()).collect();
        write_tlv(ROUTE_TAG, &value, output)?;
    }
    if !attrs.extended_route_tags.is_empty() {
        let value: Vec<u8> = attrs
            .extended_route_tags
            .iter()
            .flat_map(|t| t.to_be_bytes())
            .collect();
        write_tlv(EXTENDED_ROUTE_TAG, &value, output)?;
    }
    if let Some(metric) = attrs.prefix_metric {
        write_tlv(PREFIX_METRIC, &metric.to_be_bytes(), output)?;
    }
    if let Some(addr) = &attrs.ospf_forwarding_address {
        write_tlv(OSPF_FORWARDING_ADDRESS, &ip_octets(addr), output)?;
    }
    let mut value = BytesMut::new();
    if let Some(sid) = &attrs.prefix_sid {
        write_prefix_sid(sid, &mut value);
        write_tlv(PREFIX_SID, &value, output)?;
    }
    if let Some(range) = &attrs.range {
        value.clear();
        write_range(range, &mut value)?;
        write_tlv(RANGE, &value, output)?;
    }
    for sid in &attrs.binding_sids {
        value.clear();
        write_binding_sid(sid, &mut value)?;
        write_tlv(BINDING_SID, &value, output)?;
    }
    if let Some(flags) = &attrs.attribute_flags {
        write_tlv(PREFIX_ATTRIBUTE_FLAGS, &[flags.bits()], output)?;
    }
    if let Some(addr) = &attrs.source_router_id {
        write_tlv(SOURCE_ROUTER_ID, &ip_octets(addr), output)?;
    }
    if let Some(id) = attrs.source_ospf_router_id {
        write_tlv(SOURCE_OSPF_ROUTER_ID, &id.octets(), output)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::tlv::read_tlvs;
    use std::net::Ipv4Addr;
    use std::str::FromStr;

    fn parse(input: &BytesMut, protocol: ProtocolId) -> Result<PrefixAttributes, ParserError> {
        parse_prefix_attributes(&read_tlvs(input.clone().freeze())?, protocol)
    }

    #[test]
    fn test_prefix_attributes_round_trip() {
        let mut input = BytesMut::new();
        write_tlv(IGP_FLAGS, &[0x80], &mut input).unwrap();
        write_tlv(ROUTE_TAG, &[0, 0, 0, 1, 0, 0, 0, 2], &mut input).unwrap();
        write_tlv(EXTENDED_ROUTE_TAG, &[0, 0, 0, 0, 0, 0, 0, 9], &mut input).unwrap();
        write_tlv(PREFIX_METRIC, &[0, 0, 0, 10], &mut input).unwrap();
        write_tlv(OSPF_FORWARDING_ADDRESS, &[10, 0, 0, 1], &mut input).unwrap();
        write_tlv(PREFIX_SID, &[0xa0, 0, 0, 0, 1, 2, 3, 4], &mut input).unwrap();
        write_tlv(
            RANGE,
            &[0, 0, 0, 4, 0x04, 0x86, 0, 7, 0xac, 1, 0, 0, 1, 2, 0],
            &mut input,
        )
        .unwrap();
        write_tlv(BINDING_SID, &[5, 0x80, 0, 0, 0x04, 0x89, 0, 3, 0, 0x5d, 0xc0], &mut input)
            .unwrap();
        write_tlv(PREFIX_ATTRIBUTE_FLAGS, &[0x40], &mut input).unwrap();
        write_tlv(SOURCE_ROUTER_ID, &[192, 0, 2, 1], &mut input).unwrap();
        write_tlv(SOURCE_OSPF_ROUTER_ID, &[192, 0, 2, 2], &mut input).unwrap();

        let attrs = parse(&input, ProtocolId::IsisL1).unwrap();
        assert_eq!(attrs.igp_flags, Some(IgpFlags::ISIS_UP_DOWN));
        assert_eq!(attrs.route_tags, vec![1, 2]);
        assert_eq!(attrs.extended_route_tags, vec![9]);
        assert_eq!(attrs.prefix_metric, Some(10));
        assert_eq!(
            attrs.ospf_forwarding_address,
            Some(IpAddr::from_str("10.0.0.1").unwrap())
        );
        assert_eq!(
            attrs.prefix_sid.map(|sid| sid.sid),
            Some(SidLabelIndex::Index(0x01020304))
        );
        assert_eq!(attrs.range.as_ref().map(|r| r.range_size), Some(4));
        assert_eq!(attrs.binding_sids.len(), 1);
        assert_eq!(
            attrs.attribute_flags,
            Some(ProtocolFlags::Isis(IsisPrefixAttrFlags::READVERTISEMENT))
        );
        assert_eq!(
            attrs.source_ospf_router_id,
            Some(Ipv4Addr::new(192, 0, 2, 2))
        );

        let mut output = BytesMut::new();
        write_prefix_attributes(&attrs, &mut output).unwrap();
        assert_eq!(output, input);
    }

    #[test]
    fn test_bad_forwarding_address_is_ignored() {
        let mut input = BytesMut::new();
        write_tlv(OSPF_FORWARDING_ADDRESS, &[10, 0, 0], &mut input).unwrap();
        write_tlv(PREFIX_METRIC, &[0, 0, 0, 1], &mut input).unwrap();
        let attrs = parse(&input, ProtocolId::Ospfv2).unwrap();
        assert_eq!(attrs.ospf_forwarding_address, None);
        assert_eq!(attrs.prefix_metric, Some(1));
    }

    #[test]
    fn test_ipv6_source_router_id() {
        let addr = IpAddr::from_str("2001:db8::1").unwrap();
        let mut input = BytesMut::new();
        write_tlv(SOURCE_ROUTER_ID, &ip_octets(&addr), &mut input).unwrap();
        let attrs = parse(&input, ProtocolId::Ospfv3).unwrap();
        assert_eq!(attrs.source_router_id, Some(addr));

        let mut input = BytesMut::new();
        write_tlv(SOURCE_ROUTER_ID, &[1, 2], &mut input).unwrap();
        assert!(parse(&input, ProtocolId::Ospfv3).is_err());
    }

    #[test]
    fn test_repeated_route_tag_tlvs() {
        let mut input = BytesMut::new();
        write_tlv(ROUTE_TAG, &[0, 0, 0, 1], &mut input).unwrap();
        write_tlv(ROUTE_TAG, &[0, 0, 0, 2], &mut input).unwrap();
        let attrs = parse(&input, ProtocolId::IsisL2).unwrap();
        assert_eq!(attrs.route_tags, vec![1, 2]);

        // written back as one TLV
        let mut output = BytesMut::new();
        write_prefix_attributes(&attrs, &mut output).unwrap();
        let mut merged = BytesMut::new();
        write_tlv(ROUTE_TAG, &[0, 0, 0, 1, 0, 0, 0, 2], &mut merged).unwrap();
        assert_eq!(output, merged);
    }

    #[test]
    fn test_unknown_tlv_is_skipped() {
        let mut input = BytesMut::new();
        write_tlv(IGP_FLAGS, &[0x10], &mut input).unwrap();
        write_tlv(9999, &[0xde, 0xad, 0xbe, 0xef], &mut input).unwrap();
        write_tlv(PREFIX_OPAQUE, &[1, 2], &mut input).unwrap();
        write_tlv(PREFIX_METRIC, &[0, 0, 0, 20], &mut input).unwrap();
        let attrs = parse(&input, ProtocolId::Ospfv2).unwrap();
        assert_eq!(attrs.igp_flags, Some(IgpFlags::from_bits_retain(0x10)));
        assert_eq!(attrs.prefix_metric, Some(20));
        assert_eq!(
            attrs,
            PrefixAttributes {
                igp_flags: Some(IgpFlags::from_bits_retain(0x10)),
                prefix_metric: Some(20),
                ..Default::default()
            }
        );
    }
}
