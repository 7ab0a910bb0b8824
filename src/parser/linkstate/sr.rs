//! Segment Routing TLVs of BGP-LS attributes - RFC 9085 and RFC 9086
use crate::error::ParserError;
use crate::models::*;
use crate::parser::tlv::{read_tlvs, write_tlv};
use crate::parser::ReadUtils;
use bytes::{Buf, BufMut, Bytes, BytesMut};
use log::{debug, warn};

pub const PREFIX_SID: u16 = 1158;
pub const BINDING_SID: u16 = 1160;
pub const SID_LABEL: u16 = 1161;
const ERO_METRIC: u16 = 1162;
const IPV4_ERO: u16 = 1163;
const IPV6_ERO: u16 = 1164;
const UNNUMBERED_ERO: u16 = 1165;
const IPV4_BACKUP_ERO: u16 = 1166;
const IPV6_BACKUP_ERO: u16 = 1167;
const UNNUMBERED_BACKUP_ERO: u16 = 1168;

const LABEL_MASK: u32 = 0x000f_ffff;
const ISO_SYSTEM_ID_LENGTH: usize = 6;

/// SID, label or IPv6 SID, chosen by the length of `input`.
pub fn parse_sid_label_index(mut input: Bytes, tlv_type: u16) -> Result<SidLabelIndex, ParserError> {
    match input.len() {
        3 => Ok(SidLabelIndex::Label(input.read_u24()? & LABEL_MASK)),
        4 => Ok(SidLabelIndex::Index(input.read_u32()?)),
        16 => Ok(SidLabelIndex::Ipv6(input.read_ipv6_address()?)),
        len => Err(ParserError::MalformedTlv {
            tlv_type,
            reason: format!("SID/label of {} bytes", len),
        }),
    }
}

pub fn write_sid_label_index(sid: &SidLabelIndex, output: &mut BytesMut) {
    match sid {
        SidLabelIndex::Label(label) => output.put_uint((label & LABEL_MASK) as u64, 3),
        SidLabelIndex::Index(index) => output.put_u32(*index),
        SidLabelIndex::Ipv6(addr) => output.put_slice(&addr.octets()),
    }
}

/// Read a SID/Label sub-TLV (1161) header and value from the front of `input`.
fn read_sid_label_sub_tlv(input: &mut Bytes) -> Result<SidLabelIndex, ParserError> {
    let sub_type = input.read_u16()?;
    let length = input.read_u16()? as usize;
    if sub_type != SID_LABEL {
        return Err(ParserError::MalformedTlv {
            tlv_type: sub_type,
            reason: format!("expected SID/label sub-TLV {}", SID_LABEL),
        });
    }
    if input.remaining() < length {
        return Err(ParserError::TruncatedTlv {
            tlv_type: Some(sub_type),
            expected: length,
            remaining: input.remaining(),
        });
    }
    parse_sid_label_index(input.split_to(length), SID_LABEL)
}

fn write_sid_label_sub_tlv(sid: &SidLabelIndex, output: &mut BytesMut) -> Result<(), ParserError> {
    let mut value = BytesMut::with_capacity(16);
    write_sid_label_index(sid, &mut value);
    write_tlv(SID_LABEL, &value, output)
}

/// Flags, weight and two reserved bytes shared by the adjacency and peer SID TLVs.
fn read_sid_header(input: &mut Bytes) -> Result<(u8, u8), ParserError> {
    let flags = input.read_u8()?;
    let weight = input.read_u8()?;
    input.read_u16()?;
    Ok((flags, weight))
}

fn write_sid_header(flags: u8, weight: u8, output: &mut BytesMut) {
    output.put_u8(flags);
    output.put_u8(weight);
    output.put_u16(0);
}

/// Adjacency SID (1099)
///
/// ```text
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |     Flags     |     Weight    |             Reserved          |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                   SID/Label/Index (variable)                  |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
pub fn parse_adjacency_sid(
    mut input: Bytes,
    protocol: ProtocolId,
    tlv_type: u16,
) -> Result<AdjacencySid, ParserError> {
    let (flags, weight) = read_sid_header(&mut input)?;
    Ok(AdjacencySid {
        flags: AdjacencySidFlags::from_bits(protocol, flags),
        weight,
        sid: parse_sid_label_index(input, tlv_type)?,
    })
}

pub fn write_adjacency_sid(sid: &AdjacencySid, output: &mut BytesMut) {
    write_sid_header(sid.flags.bits(), sid.weight, output);
    write_sid_label_index(&sid.sid, output);
}

/// LAN Adjacency SID (1100): the adjacency SID layout with the neighbor identifier placed
/// between the reserved bytes and the SID.
pub fn parse_lan_adjacency_sid(
    mut input: Bytes,
    protocol: ProtocolId,
    tlv_type: u16,
) -> Result<LanAdjacencySid, ParserError> {
    let (flags, weight) = read_sid_header(&mut input)?;
    let neighbor = if protocol.is_isis() {
        input.has_n_remaining(ISO_SYSTEM_ID_LENGTH)?;
        let mut system_id = [0u8; ISO_SYSTEM_ID_LENGTH];
        input.copy_to_slice(&mut system_id);
        NeighborId::IsoSystemId(system_id)
    } else {
        NeighborId::RouterId(input.read_ipv4_address()?)
    };
    Ok(LanAdjacencySid {
        flags: AdjacencySidFlags::from_bits(protocol, flags),
        weight,
        neighbor,
        sid: parse_sid_label_index(input, tlv_type)?,
    })
}

pub fn write_lan_adjacency_sid(sid: &LanAdjacencySid, output: &mut BytesMut) {
    write_sid_header(sid.flags.bits(), sid.weight, output);
    match &sid.neighbor {
        NeighborId::IsoSystemId(system_id) => output.put_slice(system_id),
        NeighborId::RouterId(router_id) => output.put_slice(&router_id.octets()),
    }
    write_sid_label_index(&sid.sid, output);
}

/// Peer Node, Peer Adjacency and Peer Set SID (1101-1103)
pub fn parse_peer_sid(mut input: Bytes, tlv_type: u16) -> Result<PeerSid, ParserError> {
    let (flags, weight) = read_sid_header(&mut input)?;
    Ok(PeerSid {
        flags: EpeSidFlags::from_bits_retain(flags),
        weight,
        sid: parse_sid_label_index(input, tlv_type)?,
    })
}

pub fn write_peer_sid(sid: &PeerSid, output: &mut BytesMut) {
    write_sid_header(sid.flags.bits(), sid.weight, output);
    write_sid_label_index(&sid.sid, output);
}

fn parse_sid_ranges(mut input: Bytes) -> Result<Vec<SidRange>, ParserError> {
    let mut ranges = vec![];
    while input.has_remaining() {
        let range_size = input.read_u24()?;
        let first_sid = read_sid_label_sub_tlv(&mut input)?;
        ranges.push(SidRange {
            range_size,
            first_sid,
        });
    }
    Ok(ranges)
}

fn write_sid_ranges(ranges: &[SidRange], output: &mut BytesMut) -> Result<(), ParserError> {
    for range in ranges {
        output.put_uint(range.range_size as u64, 3);
        write_sid_label_sub_tlv(&range.first_sid, output)?;
    }
    Ok(())
}

/// SR Capabilities (1034): flags, reserved, then SRGB ranges.
pub fn parse_sr_capabilities(mut input: Bytes) -> Result<SrCapabilities, ParserError> {
    let flags = SrCapabilityFlags::from_bits_retain(input.read_u8()?);
    input.read_u8()?;
    let ranges = parse_sid_ranges(input)?;
    debug!("SR capabilities with {} ranges", ranges.len());
    Ok(SrCapabilities { flags, ranges })
}

pub fn write_sr_capabilities(
    caps: &SrCapabilities,
    output: &mut BytesMut,
) -> Result<(), ParserError> {
    output.put_u8(caps.flags.bits());
    output.put_u8(0);
    write_sid_ranges(&caps.ranges, output)
}

/// SR Local Block (1036)
pub fn parse_sr_local_block(mut input: Bytes) -> Result<SrLocalBlock, ParserError> {
    let flags = input.read_u8()?;
    input.read_u8()?;
    Ok(SrLocalBlock {
        flags,
        ranges: parse_sid_ranges(input)?,
    })
}

pub fn write_sr_local_block(
    block: &SrLocalBlock,
    output: &mut BytesMut,
) -> Result<(), ParserError> {
    output.put_u8(block.flags);
    output.put_u8(0);
    write_sid_ranges(&block.ranges, output)
}

/// SR Algorithm (1035)
pub fn parse_sr_algorithms(input: Bytes) -> Vec<Algorithm> {
    input.iter().map(|b| Algorithm::from(*b)).collect()
}

/// Node MSD (266): `(type, value)` octet pairs.
pub fn parse_msd(mut input: Bytes, tlv_type: u16) -> Result<Vec<Msd>, ParserError> {
    if input.len() % 2 != 0 {
        return Err(ParserError::MalformedTlv {
            tlv_type,
            reason: format!("odd MSD length {}", input.len()),
        });
    }
    let mut msd = Vec::with_capacity(input.len() / 2);
    while input.has_remaining() {
        msd.push(Msd {
            msd_type: input.get_u8(),
            value: input.get_u8(),
        });
    }
    Ok(msd)
}

/// Prefix SID (1158)
///
/// ```text
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |     Flags     |   Algorithm   |           Reserved            |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                   SID/Index/Label (variable)                  |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
pub fn parse_prefix_sid(mut input: Bytes, protocol: ProtocolId) -> Result<PrefixSid, ParserError> {
    let flags = PrefixSidFlags::from_bits(protocol, input.read_u8()?);
    let algorithm = Algorithm::from(input.read_u8()?);
    input.read_u16()?;
    Ok(PrefixSid {
        flags,
        algorithm,
        sid: parse_sid_label_index(input, PREFIX_SID)?,
    })
}

pub fn write_prefix_sid(sid: &PrefixSid, output: &mut BytesMut) {
    output.put_u8(sid.flags.bits());
    output.put_u8(sid.algorithm.into());
    output.put_u16(0);
    write_sid_label_index(&sid.sid, output);
}

/// Range (1159): flags, reserved, range size, then prefix SID or binding SID sub-TLVs.
pub fn parse_range(mut input: Bytes, protocol: ProtocolId) -> Result<SrRange, ParserError> {
    let flags = RangeFlags::from_bits(protocol, input.read_u8()?);
    input.read_u8()?;
    let range_size = input.read_u16()?;

    let mut sub_tlvs = vec![];
    for (sub_type, value) in read_tlvs(input)? {
        match sub_type {
            PREFIX_SID => sub_tlvs.push(RangeSubTlv::PrefixSid(parse_prefix_sid(value, protocol)?)),
            BINDING_SID => {
                sub_tlvs.push(RangeSubTlv::BindingSid(parse_binding_sid(value, protocol)?))
            }
            t => warn!("unknown range sub-TLV type {} with {} bytes", t, value.len()),
        }
    }
    Ok(SrRange {
        flags,
        range_size,
        sub_tlvs,
    })
}

pub fn write_range(range: &SrRange, output: &mut BytesMut) -> Result<(), ParserError> {
    output.put_u8(range.flags.bits());
    output.put_u8(0);
    output.put_u16(range.range_size);
    for sub_tlv in &range.sub_tlvs {
        let mut value = BytesMut::new();
        match sub_tlv {
            RangeSubTlv::PrefixSid(sid) => {
                write_prefix_sid(sid, &mut value);
                write_tlv(PREFIX_SID, &value, output)?;
            }
            RangeSubTlv::BindingSid(sid) => {
                write_binding_sid(sid, &mut value)?;
                write_tlv(BINDING_SID, &value, output)?;
            }
        }
    }
    Ok(())
}

/// Flags and 3 reserved bytes in front of every ERO sub-TLV.
fn read_ero_flags(input: &mut Bytes) -> Result<EroFlags, ParserError> {
    let flags = EroFlags::from_bits_retain(input.read_u8()?);
    input.read_u24()?;
    Ok(flags)
}

/// SID/Label Binding (1160)
///
/// ```text
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |    Weight     |     Flags     |            Reserved           |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                      Sub-TLVs (variable)                      |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
pub fn parse_binding_sid(mut input: Bytes, protocol: ProtocolId) -> Result<BindingSid, ParserError> {
    let weight = input.read_u8()?;
    let flags = BindingSidFlags::from_bits(protocol, input.read_u8()?);
    input.read_u16()?;

    let mut sub_tlvs = vec![];
    for (sub_type, mut value) in read_tlvs(input)? {
        let sub_tlv = match sub_type {
            SID_LABEL => BindingSubTlv::SidLabel(parse_sid_label_index(value, SID_LABEL)?),
            PREFIX_SID => BindingSubTlv::PrefixSid(parse_prefix_sid(value, protocol)?),
            ERO_METRIC => BindingSubTlv::EroMetric(value.read_u32()?),
            IPV4_ERO | IPV4_BACKUP_ERO => BindingSubTlv::Ipv4Ero {
                flags: read_ero_flags(&mut value)?,
                address: value.read_ipv4_address()?,
                backup: sub_type == IPV4_BACKUP_ERO,
            },
            IPV6_ERO | IPV6_BACKUP_ERO => BindingSubTlv::Ipv6Ero {
                flags: read_ero_flags(&mut value)?,
                address: value.read_ipv6_address()?,
                backup: sub_type == IPV6_BACKUP_ERO,
            },
            UNNUMBERED_ERO | UNNUMBERED_BACKUP_ERO => BindingSubTlv::UnnumberedEro {
                flags: read_ero_flags(&mut value)?,
                router_id: value.read_u32()?,
                interface_id: value.read_u32()?,
                backup: sub_type == UNNUMBERED_BACKUP_ERO,
            },
            t => {
                warn!("unknown binding SID sub-TLV type {} with {} bytes", t, value.len());
                continue;
            }
        };
        sub_tlvs.push(sub_tlv);
    }
    Ok(BindingSid {
        weight,
        flags,
        sub_tlvs,
    })
}

pub fn write_binding_sid(sid: &BindingSid, output: &mut BytesMut) -> Result<(), ParserError> {
    output.put_u8(sid.weight);
    output.put_u8(sid.flags.bits());
    output.put_u16(0);
    for sub_tlv in &sid.sub_tlvs {
        let mut value = BytesMut::new();
        let sub_type = match sub_tlv {
            BindingSubTlv::SidLabel(sid) => {
                write_sid_label_index(sid, &mut value);
                SID_LABEL
            }
            BindingSubTlv::PrefixSid(sid) => {
                write_prefix_sid(sid, &mut value);
                PREFIX_SID
            }
            BindingSubTlv::EroMetric(metric) => {
                value.put_u32(*metric);
                ERO_METRIC
            }
            BindingSubTlv::Ipv4Ero {
                flags,
                address,
                backup,
            } => {
                value.put_u8(flags.bits());
                value.put_uint(0, 3);
                value.put_slice(&address.octets());
                if *backup {
                    IPV4_BACKUP_ERO
                } else {
                    IPV4_ERO
                }
            }
            BindingSubTlv::Ipv6Ero {
                flags,
                address,
                backup,
            } => {
                value.put_u8(flags.bits());
                value.put_uint(0, 3);
                value.put_slice(&address.octets());
                if *backup {
                    IPV6_BACKUP_ERO
                } else {
                    IPV6_ERO
                }
            }
            BindingSubTlv::UnnumberedEro {
                flags,
                router_id,
                interface_id,
                backup,
            } => {
                value.put_u8(flags.bits());
                value.put_uint(0, 3);
                value.put_u32(*router_id);
                value.put_u32(*interface_id);
                if *backup {
                    UNNUMBERED_BACKUP_ERO
                } else {
                    UNNUMBERED_ERO
                }
            }
        };
        write_tlv(sub_type, &value, output)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    #[test]
    fn test_sid_label_index() {
        let sid = parse_sid_label_index(Bytes::from_static(&[0xff, 0x5d, 0xc0]), 1099).unwrap();
        assert_eq!(sid, SidLabelIndex::Label(0xf5dc0));
        let sid = parse_sid_label_index(Bytes::from_static(&[1, 2, 3, 4]), 1099).unwrap();
        assert_eq!(sid, SidLabelIndex::Index(0x01020304));
        assert!(matches!(
            parse_sid_label_index(Bytes::from_static(&[1, 2]), 1099),
            Err(ParserError::MalformedTlv { tlv_type: 1099, .. })
        ));
    }

    #[test]
    fn test_adjacency_sid() {
        let input = Bytes::from_static(&[0x74, 0x0a, 0x00, 0x00, 0x00, 0x5d, 0xc0]);
        let sid = parse_adjacency_sid(input.clone(), ProtocolId::IsisL1, 1099).unwrap();
        assert_eq!(
            sid.flags,
            ProtocolFlags::Isis(
                IsisAdjFlags::BACKUP
                    | IsisAdjFlags::VALUE
                    | IsisAdjFlags::LOCAL
                    | IsisAdjFlags::PERSISTENT
            )
        );
        assert_eq!(sid.weight, 10);
        assert_eq!(sid.sid, SidLabelIndex::Label(24000));

        let mut output = BytesMut::new();
        write_adjacency_sid(&sid, &mut output);
        assert_eq!(output.freeze(), input);
    }

    #[test]
    fn test_lan_adjacency_sid() {
        let input = Bytes::from_static(&[
            0x60, 0x0a, 0x00, 0x00, 0x01, 0x02, 0x03, 0x04, 0x00, 0x5d, 0xc0,
        ]);
        let sid = parse_lan_adjacency_sid(input.clone(), ProtocolId::Ospfv2, 1100).unwrap();
        assert_eq!(
            sid.flags,
            ProtocolFlags::Ospf(OspfAdjFlags::VALUE | OspfAdjFlags::LOCAL)
        );
        assert_eq!(sid.neighbor, NeighborId::RouterId(Ipv4Addr::new(1, 2, 3, 4)));
        let mut output = BytesMut::new();
        write_lan_adjacency_sid(&sid, &mut output);
        assert_eq!(output.freeze(), input);

        let input = Bytes::from_static(&[
            0x74, 0x0a, 0x00, 0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x00, 0x5d, 0xc0,
        ]);
        let sid = parse_lan_adjacency_sid(input.clone(), ProtocolId::IsisL2, 1100).unwrap();
        assert_eq!(sid.neighbor, NeighborId::IsoSystemId([1, 2, 3, 4, 5, 6]));
        assert_eq!(sid.sid, SidLabelIndex::Label(24000));
        let mut output = BytesMut::new();
        write_lan_adjacency_sid(&sid, &mut output);
        assert_eq!(output.freeze(), input);
    }

    #[test]
    fn test_peer_sid() {
        let input = Bytes::from_static(&[0xc0, 0x01, 0x00, 0x00, 0x00, 0x5d, 0xc0]);
        let sid = parse_peer_sid(input.clone(), 1101).unwrap();
        assert_eq!(sid.flags, EpeSidFlags::VALUE | EpeSidFlags::LOCAL);
        let mut output = BytesMut::new();
        write_peer_sid(&sid, &mut output);
        assert_eq!(output.freeze(), input);
    }

    #[test]
    fn test_sr_capabilities() {
        let input = Bytes::from_static(&[
            0xc0, 0x00, 0x00, 0x00, 0x0a, 0x04, 0x89, 0x00, 0x04, 0x01, 0x02, 0x03, 0x04,
        ]);
        let caps = parse_sr_capabilities(input.clone()).unwrap();
        assert_eq!(
            caps.flags,
            SrCapabilityFlags::MPLS_IPV4 | SrCapabilityFlags::MPLS_IPV6
        );
        assert_eq!(
            caps.ranges,
            vec![SidRange {
                range_size: 10,
                first_sid: SidLabelIndex::Index(0x01020304)
            }]
        );
        let mut output = BytesMut::new();
        write_sr_capabilities(&caps, &mut output).unwrap();
        assert_eq!(output.freeze(), input);
    }

    #[test]
    fn test_sr_local_block() {
        let input = Bytes::from_static(&[0, 0, 0, 0, 10, 0x04, 0x89, 0, 3, 0, 1, 2]);
        let block = parse_sr_local_block(input.clone()).unwrap();
        assert_eq!(block.ranges[0].range_size, 10);
        assert_eq!(block.ranges[0].first_sid, SidLabelIndex::Label(258));
        let mut output = BytesMut::new();
        write_sr_local_block(&block, &mut output).unwrap();
        assert_eq!(output.freeze(), input);
    }

    #[test]
    fn test_msd_and_algorithms() {
        let msd = parse_msd(Bytes::from_static(&[1, 10, 2, 8]), 266).unwrap();
        assert_eq!(
            msd,
            vec![
                Msd {
                    msd_type: 1,
                    value: 10
                },
                Msd {
                    msd_type: 2,
                    value: 8
                }
            ]
        );
        assert!(parse_msd(Bytes::from_static(&[1]), 266).is_err());
        assert_eq!(
            parse_sr_algorithms(Bytes::from_static(&[0, 1, 128])),
            vec![
                Algorithm::ShortestPathFirst,
                Algorithm::StrictShortestPathFirst,
                Algorithm::Other(128)
            ]
        );
    }

    #[test]
    fn test_prefix_sid() {
        let input = Bytes::from_static(&[0xa0, 0x00, 0x00, 0x00, 0x01, 0x02, 0x03, 0x04]);
        let sid = parse_prefix_sid(input.clone(), ProtocolId::IsisL2).unwrap();
        assert_eq!(
            sid.flags,
            ProtocolFlags::Isis(IsisPrefixSidFlags::READVERTISEMENT | IsisPrefixSidFlags::NO_PHP)
        );
        assert_eq!(sid.algorithm, Algorithm::ShortestPathFirst);
        assert_eq!(sid.sid, SidLabelIndex::Index(0x01020304));
        let mut output = BytesMut::new();
        write_prefix_sid(&sid, &mut output);
        assert_eq!(output.freeze(), input);
    }

    #[test]
    fn test_range() {
        let input = Bytes::from_static(&[
            0x00, 0x00, 0x00, 0x04, 0x04, 0x86, 0x00, 0x07, 0xac, 0x01, 0x00, 0x00, 0x01, 0x02,
            0x00,
        ]);
        let range = parse_range(input.clone(), ProtocolId::Ospfv2).unwrap();
        assert_eq!(range.range_size, 4);
        match &range.sub_tlvs[..] {
            [RangeSubTlv::PrefixSid(sid)] => {
                assert_eq!(sid.algorithm, Algorithm::StrictShortestPathFirst);
                assert_eq!(sid.sid, SidLabelIndex::Label(66048));
                assert_eq!(sid.flags.bits(), 0xac);
            }
            other => panic!("unexpected sub-TLVs {:?}", other),
        }
        let mut output = BytesMut::new();
        write_range(&range, &mut output).unwrap();
        assert_eq!(output.freeze(), input);
    }

    #[test]
    fn test_binding_sid() {
        let mut input = BytesMut::new();
        input.put_u8(5); // weight
        input.put_u8(0x80); // flags
        input.put_u16(0);
        input.put_slice(&[0x04, 0x89, 0x00, 0x03, 0x00, 0x5d, 0xc0]);
        input.put_slice(&[0x04, 0x8a, 0x00, 0x04, 0x00, 0x00, 0x00, 0x64]);
        input.put_slice(&[0x04, 0x8b, 0x00, 0x08, 0x80, 0x00, 0x00, 0x00, 10, 0, 0, 1]);
        input.put_slice(&[
            0x04, 0x90, 0x00, 0x0c, 0x00, 0x00, 0x00, 0x00, 0, 0, 0, 1, 0, 0, 0, 2,
        ]);
        // unknown sub-TLV is skipped
        input.put_slice(&[0x04, 0xff, 0x00, 0x01, 0xee]);
        let sid = parse_binding_sid(input.freeze(), ProtocolId::Ospfv3).unwrap();

        assert_eq!(sid.weight, 5);
        assert_eq!(sid.flags, ProtocolFlags::Ospf(OspfBindingFlags::MIRRORING));
        assert_eq!(
            sid.sub_tlvs,
            vec![
                BindingSubTlv::SidLabel(SidLabelIndex::Label(24000)),
                BindingSubTlv::EroMetric(100),
                BindingSubTlv::Ipv4Ero {
                    flags: EroFlags::LOOSE,
                    address: Ipv4Addr::new(10, 0, 0, 1),
                    backup: false
                },
                BindingSubTlv::UnnumberedEro {
                    flags: EroFlags::empty(),
                    router_id: 1,
                    interface_id: 2,
                    backup: true
                },
            ]
        );

        let mut output = BytesMut::new();
        write_binding_sid(&sid, &mut output).unwrap();
        let reparsed = parse_binding_sid(output.freeze(), ProtocolId::Ospfv3).unwrap();
        assert_eq!(reparsed, sid);
    }
}
