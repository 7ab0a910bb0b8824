//! Node attribute TLVs - RFC 7752 section 3.3.1
use super::{expect_length, read_utf8};
use crate::error::ParserError;
use crate::models::*;
use crate::parser::linkstate::sr::*;
use crate::parser::tlv::{write_tlv, TlvMap};
use crate::parser::ReadUtils;
use bytes::{Buf, BytesMut};
use log::{debug, warn};

const MULTI_TOPOLOGY_ID: u16 = 263;
const NODE_MSD: u16 = 266;
const NODE_FLAG_BITS: u16 = 1024;
const NODE_OPAQUE: u16 = 1025;
const DYNAMIC_HOSTNAME: u16 = 1026;
const ISIS_AREA_ID: u16 = 1027;
const LOCAL_IPV4_ROUTER_ID: u16 = 1028;
const LOCAL_IPV6_ROUTER_ID: u16 = 1029;
const SR_CAPABILITIES: u16 = 1034;
const SR_ALGORITHMS: u16 = 1035;
const SR_LOCAL_BLOCK: u16 = 1036;

const MULTI_TOPOLOGY_MASK: u16 = 0x0fff;

pub fn parse_node_attributes(
    tlvs: &TlvMap,
    protocol: ProtocolId,
) -> Result<NodeAttributes, ParserError> {
    let mut attrs = NodeAttributes::default();
    for (tlv_type, value) in tlvs.iter() {
        let mut value = value.clone();
        match tlv_type {
            MULTI_TOPOLOGY_ID => {
                if value.len() % 2 != 0 {
                    return Err(ParserError::MalformedTlv {
                        tlv_type,
                        reason: format!("odd multi-topology length {}", value.len()),
                    });
                }
                while value.has_remaining() {
                    attrs
                        .multi_topology_ids
                        .push(value.read_u16()? & MULTI_TOPOLOGY_MASK);
                }
            }
            NODE_FLAG_BITS => {
                expect_length(&value, 1, tlv_type)?;
                attrs.flags = Some(NodeFlags::from_bits_retain(value.read_u8()?));
            }
            NODE_OPAQUE => debug!("skipping opaque node attribute of {} bytes", value.len()),
            DYNAMIC_HOSTNAME => attrs.hostname = Some(read_utf8(value, tlv_type)?),
            ISIS_AREA_ID => attrs.isis_area_ids.push(value.to_vec()),
            LOCAL_IPV4_ROUTER_ID => {
                expect_length(&value, 4, tlv_type)?;
                attrs.local_ipv4_router_id = Some(value.read_ipv4_address()?);
            }
            LOCAL_IPV6_ROUTER_ID => {
                expect_length(&value, 16, tlv_type)?;
                attrs.local_ipv6_router_id = Some(value.read_ipv6_address()?);
            }
            SR_CAPABILITIES => attrs.sr_capabilities = Some(parse_sr_capabilities(value)?),
            SR_ALGORITHMS => attrs.sr_algorithms.extend(parse_sr_algorithms(value)),
            SR_LOCAL_BLOCK => attrs.sr_local_block = Some(parse_sr_local_block(value)?),
            NODE_MSD => attrs.msd.extend(parse_msd(value, tlv_type)?),
            t => warn!("ignoring unknown node attribute TLV {}", t),
        }
    }
    debug!("parsed {:?} node attributes: {:?}", protocol, attrs);
    Ok(attrs)
}

pub fn write_node_attributes(
    attrs: &NodeAttributes,
    output: &mut BytesMut,
) -> Result<(), ParserError> {
    if !attrs.multi_topology_ids.is_empty() {
        let value: Vec<u8> = attrs
            .multi_topology_ids
            .iter()
            .flat_map(|id| (id & MULTI_TOPOLOGY_MASK).to_be_bytes())
            .collect();
        write_tlv(MULTI_TOPOLOGY_ID, &value, output)?;
    }
    if let Some(flags) = attrs.flags {
        write_tlv(NODE_FLAG_BITS, &[flags.bits()], output)?;
    }
    if let Some(hostname) = &attrs.hostname {
        write_tlv(DYNAMIC_HOSTNAME, hostname.as_bytes(), output)?;
    }
    for area in &attrs.isis_area_ids {
        write_tlv(ISIS_AREA_ID, area, output)?;
    }
    if let Some(id) = attrs.local_ipv4_router_id {
        write_tlv(LOCAL_IPV4_ROUTER_ID, &id.octets(), output)?;
    }
    if let Some(id) = attrs.local_ipv6_router_id {
        write_tlv(LOCAL_IPV6_ROUTER_ID, &id.octets(), output)?;
    }
    if let Some(caps) = &attrs.sr_capabilities {
        let mut value = BytesMut::new();
        write_sr_capabilities(caps, &mut value)?;
        write_tlv(SR_CAPABILITIES, &value, output)?;
    }
    if !attrs.sr_algorithms.is_empty() {
        let value: Vec<u8> = attrs.sr_algorithms.iter().map(|a| u8::from(*a)).collect();
        write_tlv(SR_ALGORITHMS, &value, output)?;
    }
    if let Some(block) = &attrs.sr_local_block {
        let mut value = BytesMut::new();
        write_sr_local_block(block, &mut value)?;
        write_tlv(SR_LOCAL_BLOCK, &value, output)?;
    }
    if !attrs.msd.is_empty() {
        let value: Vec<u8> = attrs.msd.iter().flat_map(|m| [m.msd_type, m.value]).collect();
        write_tlv(NODE_MSD, &value, output)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::tlv::read_tlvs;
    use std::net::Ipv4Addr;

    fn parse(input: &BytesMut) -> Result<NodeAttributes, ParserError> {
        parse_node_attributes(&read_tlvs(input.clone().freeze())?, ProtocolId::IsisL2)
    }

    #[test]
    fn test_node_attributes_round_trip() {
        let mut input = BytesMut::new();
        write_tlv(MULTI_TOPOLOGY_ID, &[0x00, 0x00, 0x00, 0x02], &mut input).unwrap();
        write_tlv(NODE_FLAG_BITS, &[0x28], &mut input).unwrap();
        write_tlv(DYNAMIC_HOSTNAME, b"core-1", &mut input).unwrap();
        write_tlv(ISIS_AREA_ID, &[0x49, 0x00, 0x01], &mut input).unwrap();
        write_tlv(ISIS_AREA_ID, &[0x49, 0x00, 0x02], &mut input).unwrap();
        write_tlv(LOCAL_IPV4_ROUTER_ID, &[192, 0, 2, 1], &mut input).unwrap();
        write_tlv(
            SR_CAPABILITIES,
            &[0xc0, 0x00, 0x00, 0x00, 0x0a, 0x04, 0x89, 0x00, 0x04, 0x01, 0x02, 0x03, 0x04],
            &mut input,
        )
        .unwrap();
        write_tlv(SR_ALGORITHMS, &[0, 1], &mut input).unwrap();
        write_tlv(SR_LOCAL_BLOCK, &[0, 0, 0, 0, 10, 4, 0x89, 0, 3, 0, 1, 2], &mut input).unwrap();
        write_tlv(NODE_MSD, &[1, 10, 2, 8], &mut input).unwrap();

        let attrs = parse(&input).unwrap();
        assert_eq!(attrs.multi_topology_ids, vec![0, 2]);
        assert_eq!(attrs.flags, Some(NodeFlags::EXTERNAL | NodeFlags::ROUTER));
        assert_eq!(attrs.hostname.as_deref(), Some("core-1"));
        assert_eq!(attrs.isis_area_ids, vec![vec![0x49, 0, 1], vec![0x49, 0, 2]]);
        assert_eq!(attrs.local_ipv4_router_id, Some(Ipv4Addr::new(192, 0, 2, 1)));
        assert_eq!(attrs.sr_capabilities.as_ref().map(|c| c.ranges.len()), Some(1));
        assert_eq!(attrs.sr_algorithms.len(), 2);
        assert_eq!(
            attrs.sr_local_block.as_ref().map(|b| b.ranges[0].first_sid),
            Some(SidLabelIndex::Label(258))
        );
        assert_eq!(attrs.msd.len(), 2);

        let mut output = BytesMut::new();
        write_node_attributes(&attrs, &mut output).unwrap();
        assert_eq!(output, input);
    }

    #[test]
    fn test_multi_topology_mask() {
        let mut input = BytesMut::new();
        write_tlv(MULTI_TOPOLOGY_ID, &[0x80, 0x02], &mut input).unwrap();
        assert_eq!(parse(&input).unwrap().multi_topology_ids, vec![2]);
    }

    #[test]
    fn test_unknown_tlv_is_skipped() {
        let mut input = BytesMut::new();
        write_tlv(DYNAMIC_HOSTNAME, b"r1", &mut input).unwrap();
        write_tlv(9999, &[0xde, 0xad], &mut input).unwrap();
        write_tlv(NODE_OPAQUE, &[1, 2, 3], &mut input).unwrap();
        write_tlv(NODE_FLAG_BITS, &[0x80], &mut input).unwrap();
        let attrs = parse(&input).unwrap();
        assert_eq!(attrs.hostname.as_deref(), Some("r1"));
        assert_eq!(attrs.flags, Some(NodeFlags::OVERLOAD));
    }

    #[test]
    fn test_repeated_algorithm_and_msd_tlvs() {
        let mut input = BytesMut::new();
        write_tlv(SR_ALGORITHMS, &[0], &mut input).unwrap();
        write_tlv(SR_ALGORITHMS, &[1], &mut input).unwrap();
        write_tlv(NODE_MSD, &[1, 10], &mut input).unwrap();
        write_tlv(NODE_MSD, &[2, 8], &mut input).unwrap();
        let attrs = parse(&input).unwrap();
        assert_eq!(
            attrs.sr_algorithms,
            vec![Algorithm::from(0), Algorithm::from(1)]
        );
        let msd: Vec<(u8, u8)> = attrs.msd.iter().map(|m| (m.msd_type, m.value)).collect();
        assert_eq!(msd, vec![(1, 10), (2, 8)]);
    }
}
