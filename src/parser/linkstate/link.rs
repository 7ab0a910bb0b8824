//! Link attribute TLVs - RFC 7752 section 3.3.2, RFC 8571 performance metrics
use super::{expect_length, parse_u32_list, read_utf8};
use crate::error::ParserError;
use crate::models::*;
use crate::parser::linkstate::sr::*;
use crate::parser::tlv::{write_tlv, TlvMap};
use crate::parser::utils::read_variable_uint;
use crate::parser::ReadUtils;
use bytes::{BufMut, Bytes, BytesMut};
use log::{debug, warn};

const LOCAL_IPV4_ROUTER_ID: u16 = 1028;
const LOCAL_IPV6_ROUTER_ID: u16 = 1029;
const REMOTE_IPV4_ROUTER_ID: u16 = 1030;
const REMOTE_IPV6_ROUTER_ID: u16 = 1031;
const ADMIN_GROUP: u16 = 1088;
const MAX_BANDWIDTH: u16 = 1089;
const MAX_RESERVABLE_BANDWIDTH: u16 = 1090;
const UNRESERVED_BANDWIDTH: u16 = 1091;
const TE_METRIC: u16 = 1092;
const LINK_PROTECTION: u16 = 1093;
const MPLS_PROTOCOL: u16 = 1094;
const IGP_METRIC: u16 = 1095;
const SHARED_RISK_LINK_GROUP: u16 = 1096;
const LINK_OPAQUE: u16 = 1097;
const LINK_NAME: u16 = 1098;
const ADJ_SID: u16 = 1099;
const LAN_ADJ_SID: u16 = 1100;
const PEER_NODE_SID: u16 = 1101;
const PEER_ADJ_SID: u16 = 1102;
const PEER_SET_SID: u16 = 1103;
const LINK_DELAY: u16 = 1114;
const LINK_MIN_MAX_DELAY: u16 = 1115;
const DELAY_VARIATION: u16 = 1116;
const LINK_LOSS: u16 = 1117;
const RESIDUAL_BANDWIDTH: u16 = 1118;
const AVAILABLE_BANDWIDTH: u16 = 1119;
const UTILIZED_BANDWIDTH: u16 = 1120;
const EXTENDED_ADMIN_GROUP: u16 = 1173;

const PRIORITIES: usize = 8;
const BANDWIDTH_LENGTH: usize = 4;
const IGP_METRIC_MAX_LENGTH: usize = 3;
const TE_METRIC_LENGTH: usize = 4;

fn parse_bandwidth(value: &Bytes, tlv_type: u16) -> Result<Bandwidth, ParserError> {
    expect_length(value, BANDWIDTH_LENGTH, tlv_type)?;
    let mut bw = [0u8; BANDWIDTH_LENGTH];
    bw.copy_from_slice(value);
    Ok(Bandwidth(bw))
}

fn parse_unreserved_bandwidth(mut value: Bytes) -> Result<[Bandwidth; PRIORITIES], ParserError> {
    expect_length(&value, PRIORITIES * BANDWIDTH_LENGTH, UNRESERVED_BANDWIDTH)?;
    let mut unreserved = [Bandwidth::default(); PRIORITIES];
    for bw in unreserved.iter_mut() {
        *bw = parse_bandwidth(&value.split_to(BANDWIDTH_LENGTH), UNRESERVED_BANDWIDTH)?;
    }
    Ok(unreserved)
}

/// Build [LinkAttributes] from the TLVs of a Link-State attribute that travels with a Link NLRI.
pub fn parse_link_attributes(
    tlvs: &TlvMap,
    protocol: ProtocolId,
) -> Result<LinkAttributes, ParserError> {
    let mut attrs = LinkAttributes::default();
    for (tlv_type, value) in tlvs.iter() {
        let mut value = value.clone();
        match tlv_type {
            LOCAL_IPV4_ROUTER_ID => {
                expect_length(&value, 4, tlv_type)?;
                attrs.local_ipv4_router_id = Some(value.read_ipv4_address()?);
            }
            LOCAL_IPV6_ROUTER_ID => {
                expect_length(&value, 16, tlv_type)?;
                attrs.local_ipv6_router_id = Some(value.read_ipv6_address()?);
            }
            REMOTE_IPV4_ROUTER_ID => {
                expect_length(&value, 4, tlv_type)?;
                attrs.remote_ipv4_router_id = Some(value.read_ipv4_address()?);
            }
            REMOTE_IPV6_ROUTER_ID => {
                expect_length(&value, 16, tlv_type)?;
                attrs.remote_ipv6_router_id = Some(value.read_ipv6_address()?);
            }
            ADMIN_GROUP => {
                expect_length(&value, 4, tlv_type)?;
                attrs.admin_group = Some(value.read_u32()?);
            }
            MAX_BANDWIDTH => attrs.max_link_bandwidth = Some(parse_bandwidth(&value, tlv_type)?),
            MAX_RESERVABLE_BANDWIDTH => {
                attrs.max_reservable_bandwidth = Some(parse_bandwidth(&value, tlv_type)?)
            }
            UNRESERVED_BANDWIDTH => {
                attrs.unreserved_bandwidth = Some(parse_unreserved_bandwidth(value)?)
            }
            TE_METRIC => {
                attrs.te_metric = Some(read_variable_uint(value, TE_METRIC_LENGTH, tlv_type)?)
            }
            LINK_PROTECTION => {
                expect_length(&value, 2, tlv_type)?;
                let raw = value.read_u16()?;
                match LinkProtectionType::try_from(raw) {
                    Ok(t) => attrs.link_protection = Some(t),
                    Err(_) => warn!("unknown link protection type {}", raw),
                }
            }
            MPLS_PROTOCOL => {
                expect_length(&value, 1, tlv_type)?;
                attrs.mpls_protocol = Some(MplsProtocolMask::from_bits_retain(value.read_u8()?));
            }
            IGP_METRIC => {
                attrs.igp_metric = Some(read_variable_uint(value, IGP_METRIC_MAX_LENGTH, tlv_type)?)
            }
            SHARED_RISK_LINK_GROUP => attrs
                .shared_risk_link_groups
                .extend(parse_u32_list(value, tlv_type)?),
            LINK_OPAQUE => debug!("skipping opaque link attribute of {} bytes", value.len()),
            LINK_NAME => attrs.link_name = Some(read_utf8(value, tlv_type)?),
            ADJ_SID => attrs
                .adjacency_sids
                .push(parse_adjacency_sid(value, protocol, tlv_type)?),
            LAN_ADJ_SID => attrs
                .lan_adjacency_sids
                .push(parse_lan_adjacency_sid(value, protocol, tlv_type)?),
            PEER_NODE_SID => attrs.peer_node_sid = Some(parse_peer_sid(value, tlv_type)?),
            PEER_ADJ_SID => attrs.peer_adjacency_sid = Some(parse_peer_sid(value, tlv_type)?),
            PEER_SET_SID => attrs.peer_set_sids.push(parse_peer_sid(value, tlv_type)?),
            LINK_DELAY => {
                expect_length(&value, 4, tlv_type)?;
                attrs.link_delay = Some(value.read_u32()?);
            }
            LINK_MIN_MAX_DELAY => {
                expect_length(&value, 8, tlv_type)?;
                attrs.link_min_max_delay = Some((value.read_u32()?, value.read_u32()?));
            }
            DELAY_VARIATION => {
                expect_length(&value, 4, tlv_type)?;
                attrs.delay_variation = Some(value.read_u32()?);
            }
            LINK_LOSS => {
                expect_length(&value, 4, tlv_type)?;
                attrs.link_loss = Some(value.read_u32()?);
            }
            RESIDUAL_BANDWIDTH => {
                attrs.residual_bandwidth = Some(parse_bandwidth(&value, tlv_type)?)
            }
            AVAILABLE_BANDWIDTH => {
                attrs.available_bandwidth = Some(parse_bandwidth(&value, tlv_type)?)
            }
            UTILIZED_BANDWIDTH => {
                attrs.utilized_bandwidth = Some(parse_bandwidth(&value, tlv_type)?)
            }
            EXTENDED_ADMIN_GROUP => attrs
                .extended_admin_group
                .extend(parse_u32_list(value, tlv_type)?),
            t => warn!("ignoring unknown link attribute TLV {}", t),
        }
    }
    debug!("parsed link attributes: {:?}", attrs);
    Ok(attrs)
}

pub fn write_link_attributes(
    attrs: &LinkAttributes,
    output: &mut BytesMut,
) -> Result<(), ParserError> {
    if let Some(id) = attrs.local_ipv4_router_id {
        write_tlv(LOCAL_IPV4_ROUTER_ID, &id.octets(), output)?;
    }
    if let Some(id) = attrs.local_ipv6_router_id {
        write_tlv(LOCAL_IPV6_ROUTER_ID, &id.octets(), output)?;
    }
    if let Some(id) = attrs.remote_ipv4_router_id {
        write_tlv(REMOTE_IPV4_ROUTER_ID, &id.octets(), output)?;
    }
    if let Some(id) = attrs.remote_ipv6_router_id {
        write_tlv(REMOTE_IPV6_ROUTER_ID, &id.octets(), output)?;
    }
    if let Some(group) = attrs.admin_group {
        write_tlv(ADMIN_GROUP, &group.to_be_bytes(), output)?;
    }
    if let Some(bw) = &attrs.max_link_bandwidth {
        write_tlv(MAX_BANDWIDTH, &bw.0, output)?;
    }
    if let Some(bw) = &attrs.max_reservable_bandwidth {
        write_tlv(MAX_RESERVABLE_BANDWIDTH, &bw.0, output)?;
    }
    if let Some(unreserved) = &attrs.unreserved_bandwidth {
        let value: Vec<u8> = unreserved.iter().flat_map(|bw| bw.0).collect();
        write_tlv(UNRESERVED_BANDWIDTH, &value, output)?;
    }
    if let Some(metric) = attrs.te_metric {
        write_tlv(TE_METRIC, &metric.to_be_bytes(), output)?;
    }
    if let Some(protection) = attrs.link_protection {
        write_tlv(LINK_PROTECTION, &u16::from(protection).to_be_bytes(), output)?;
    }
    if let Some(mask) = attrs.mpls_protocol {
        write_tlv(MPLS_PROTOCOL, &[mask.bits()], output)?;
    }
    if let Some(metric) = attrs.igp_metric {
        write_tlv(IGP_METRIC, &metric.to_be_bytes()[1..], output)?;
    }
    if !attrs.shared_risk_link_groups.is_empty() {
        let value: Vec<u8> = attrs
            .shared_risk_link_groups
            .iter()
            .flat_map(|srlg| srlg.to_be_bytes())
            .collect();
        write_tlv(SHARED_RISK_LINK_GROUP, &value, output)?;
    }
    if let Some(name) = &attrs.link_name {
        write_tlv(LINK_NAME, name.as_bytes(), output)?;
    }
    if let Some(delay) = attrs.link_delay {
        write_tlv(LINK_DELAY, &delay.to_be_bytes(), output)?;
    }
    if let Some((min, max)) = attrs.link_min_max_delay {
        let mut value = [0u8; 8];
        value[..4].copy_from_slice(&min.to_be_bytes());
        value[4..].copy_from_slice(&max.to_be_bytes());
        write_tlv(LINK_MIN_MAX_DELAY, &value, output)?;
    }
    if let Some(variation) = attrs.delay_variation {
        write_tlv(DELAY_VARIATION, &variation.to_be_bytes(), output)?;
    }
    if let Some(loss) = attrs.link_loss {
        write_tlv(LINK_LOSS, &loss.to_be_bytes(), output)?;
    }
    let performance_bandwidths = [
        (RESIDUAL_BANDWIDTH, &attrs.residual_bandwidth),
        (AVAILABLE_BANDWIDTH, &attrs.available_bandwidth),
        (UTILIZED_BANDWIDTH, &attrs.utilized_bandwidth),
    ];
    for (tlv_type, bw) in performance_bandwidths {
        if let Some(bw) = bw {
            write_tlv(tlv_type, &bw.0, output)?;
        }
    }
    if !attrs.extended_admin_group.is_empty() {
        let value: Vec<u8> = attrs
            .extended_admin_group
            .iter()
            .flat_map(|group| group.to_be_bytes())
            .collect();
        write_tlv(EXTENDED_ADMIN_GROUP, &value, output)?;
    }

    let mut value = BytesMut::new();
    for sid in &attrs.adjacency_sids {
        value.clear();
        write_adjacency_sid(sid, &mut value);
        write_tlv(ADJ_SID, &value, output)?;
    }
    for sid in &attrs.lan_adjacency_sids {
        value.clear();
        write_lan_adjacency_sid(sid, &mut value);
        write_tlv(LAN_ADJ_SID, &value, output)?;
    }
    let peer_sids = attrs
        .peer_node_sid
        .iter()
        .map(|sid| (PEER_NODE_SID, sid))
        .chain(attrs.peer_adjacency_sid.iter().map(|sid| (PEER_ADJ_SID, sid)))
        .chain(attrs.peer_set_sids.iter().map(|sid| (PEER_SET_SID, sid)));
    for (tlv_type, sid) in peer_sids {
        value.clear();
        write_peer_sid(sid, &mut value);
        write_tlv(tlv_type, &value, output)?;
    }
    Ok(())
}
