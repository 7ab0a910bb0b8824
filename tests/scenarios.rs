#[cfg(test)]
mod tests {
    use bgpkit_extensions::models::*;
    use bgpkit_extensions::parser::*;
    use bgpkit_extensions::rib::*;
    use bytes::Bytes;
    use ipnet::IpNet;
    use std::net::Ipv4Addr;
    use std::str::FromStr;

    fn fixture(hex_str: &str) -> Bytes {
        Bytes::from(hex::decode(hex_str.replace(' ', "")).unwrap())
    }

    #[test]
    fn test_three_label_stack() {
        let input = fixture("60 00 16 30 00 16 40 00 16 51 22 01 16");
        let destinations = parse_labeled_unicast_nlri(input.clone(), Afi::Ipv4, false).unwrap();
        assert_eq!(destinations.len(), 1);
        let labels: Vec<u32> = destinations[0].labels.iter().map(|l| l.value).collect();
        assert_eq!(labels, vec![355, 356, 357]);
        assert_eq!(
            destinations[0].prefix,
            IpNet::from_str("34.1.22.0/24").unwrap()
        );
        assert_eq!(
            encode_labeled_unicast_nlri(&destinations, true, false).unwrap(),
            input
        );
    }

    #[test]
    fn test_withdraw_sentinel() {
        let input = fixture("30 80 00 00 22 01 16");
        let destinations = parse_labeled_unicast_nlri(input.clone(), Afi::Ipv4, false).unwrap();
        assert!(destinations[0].labels.is_empty());
        assert_eq!(
            destinations[0].prefix,
            IpNet::from_str("34.1.22.0/24").unwrap()
        );
        assert_eq!(
            encode_labeled_unicast_nlri(&destinations, false, false).unwrap(),
            input
        );
    }

    #[test]
    fn test_vpn_route_key_excludes_labels() {
        let support = VpnIpv4RibSupport::default();
        let rd = RouteDistinguisher::from_str("0:0").unwrap();
        let prefix = IpNet::from_str("34.1.22.0/24").unwrap();

        let withdrawn = Destination::Labeled(LabeledDestination::new_vpn(rd, prefix, []));
        let advertised = Destination::Labeled(LabeledDestination::new_vpn(
            rd,
            prefix,
            [MplsLabel::new(355), MplsLabel::new(356)],
        ));
        assert_eq!(
            support.route_key(&withdrawn).unwrap(),
            support.route_key(&advertised).unwrap()
        );
    }

    #[test]
    fn test_unknown_node_tlv_ignored() {
        // hostname "r1", TLV 9999, local IPv4 router id 10.0.0.1
        let input = fixture("0402 0002 7231 270f 0002 aabb 0404 0004 0a000001");
        let attr = parse_link_state_attribute(input, NlriType::Node, ProtocolId::IsisL2)
            .unwrap()
            .unwrap();
        match attr {
            LinkStateAttribute::Node(node) => {
                assert_eq!(node.hostname.as_deref(), Some("r1"));
                assert_eq!(node.local_ipv4_router_id, Some(Ipv4Addr::new(10, 0, 0, 1)));
            }
            other => panic!("unexpected attribute {:?}", other),
        }
    }

    #[test]
    fn test_label_stack_termination() {
        for depth in 1..=8u32 {
            let labels: Vec<MplsLabel> = (0..depth).map(|i| MplsLabel::new(1000 + i)).collect();
            let destination =
                LabeledDestination::new(IpNet::from_str("10.20.0.0/14").unwrap(), labels);
            let encoded =
                encode_labeled_unicast_nlri(std::slice::from_ref(&destination), true, false)
                    .unwrap();
            let decoded = parse_labeled_unicast_nlri(encoded, Afi::Ipv4, false).unwrap();
            assert_eq!(decoded[0].labels.len(), depth as usize);
            assert_eq!(decoded[0].prefix.prefix_len(), 14);
        }
    }

    #[test]
    fn test_vpn_mp_reach_round_trip() {
        // MP_REACH: VPN-IPv4, next hop RD 0:0 + 192.0.2.1, label 1500, RD 65001:100, 34.1.22.0/24
        let input = fixture(
            "0001 80 0c 0000000000000000 c0000201 00 70 005dc1 0000fde900000064 220116",
        );
        let reach = parse_mp_reach_nlri(input.clone(), None).unwrap();
        assert_eq!(reach.next_hop, NextHopAddress::Ipv4(Ipv4Addr::new(192, 0, 2, 1)));
        match &reach.destinations {
            Destinations::Vpn(v) => {
                assert_eq!(v[0].route_distinguisher.unwrap().to_string(), "65001:100");
                assert_eq!(v[0].labels.as_slice(), &[MplsLabel::new(1500)]);
            }
            other => panic!("unexpected destinations {:?}", other),
        }
        assert_eq!(encode_mp_reach_nlri(&reach, None).unwrap(), input);
    }

    #[test]
    fn test_link_state_vpn_node() {
        // node NLRI: RD 65001:100, IS-IS L2, identifier 0, AS 65001
        let input = fixture(
            "0001 001d 0000fde900000064 02 0000000000000000 0100 0008 0200 0004 0000fde9",
        );
        let table = TableKey::new(Afi::LinkState, Safi::LinkStateVpn);
        let destinations = parse_destinations(input.clone(), table, false).unwrap();
        match &destinations {
            Destinations::LinkState(v) => {
                assert_eq!(v[0].protocol_id, ProtocolId::IsisL2);
                assert_eq!(v[0].local_node_descriptors.autonomous_system, Some(65001));
                assert_eq!(
                    v[0].route_distinguisher.unwrap().to_string(),
                    "65001:100"
                );
            }
            other => panic!("unexpected destinations {:?}", other),
        }
        assert_eq!(
            encode_destinations(&destinations, table, true, false).unwrap(),
            input
        );
    }

    #[test]
    fn test_labeled_unicast_partial_recovery() {
        let input = fixture("30 001001 220116 10 001001");
        match parse_labeled_unicast_nlri(input, Afi::Ipv4, false) {
            Err(ParserError::PartialNlri {
                parsed: Destinations::LabeledUnicast(parsed),
                ..
            }) => {
                assert_eq!(parsed.len(), 1);
                assert_eq!(parsed[0].prefix, IpNet::from_str("34.1.22.0/24").unwrap());
            }
            other => panic!("unexpected result {:?}", other),
        }
    }
}
