#[cfg(test)]
mod tests {
    use bgpkit_extensions::models::*;
    use bgpkit_extensions::parser::{encode_attributes, AttributeParser};
    use bgpkit_extensions::rib::*;
    use bgpkit_extensions::PeerConstraint;
    use ipnet::IpNet;
    use std::net::Ipv4Addr;
    use std::str::FromStr;

    fn vpn_update(path_ids: &[u32], labels: &[u32]) -> UpdateAttributes {
        let destinations = path_ids
            .iter()
            .zip(labels)
            .map(|(path_id, label)| {
                LabeledDestination::new_vpn(
                    RouteDistinguisher::from_str("65001:100").unwrap(),
                    IpNet::from_str("172.16.0.0/12").unwrap(),
                    [MplsLabel::new(*label)],
                )
                .with_path_id(*path_id)
            })
            .collect();
        UpdateAttributes {
            attributes: Attributes::default(),
            mp_reach: Some(MpReachNlri {
                afi: Afi::Ipv4,
                safi: Safi::MplsVpn,
                next_hop: NextHopAddress::Ipv4(Ipv4Addr::new(192, 0, 2, 1)),
                destinations: Destinations::Vpn(destinations),
            }),
            mp_unreach: None,
        }
    }

    #[test]
    fn test_inbound_to_outbound() {
        let table = TableKey::new(Afi::Ipv4, Safi::MplsVpn);
        let constraint = PeerConstraint::new().with_add_path(table);
        let registry = RibSupportRegistry::with_defaults();
        let context = TableContext::for_peer(registry.get(&table).unwrap(), &constraint);

        // wire bytes from the peer
        let wire = encode_attributes(&vpn_update(&[1, 2], &[100, 200]), Some(&constraint)).unwrap();
        let update = AttributeParser::new(Some(&constraint))
            .parse_attributes(wire)
            .unwrap();

        let mut store = MemoryStore::new();
        let mut tx = store.begin();
        context.create_table(&mut tx);
        let ids = context
            .write_routes(&mut tx, update.mp_reach.as_ref().unwrap(), &update.attributes)
            .unwrap();
        context.set_up_to_date(&mut tx, true);
        store.commit(tx).unwrap();

        // two paths for the same RD and prefix are kept apart
        assert_eq!(ids.len(), 2);
        assert_eq!(ids[0].route_key, ids[1].route_key);
        assert_eq!(store.routes(&table).count(), 2);

        // re-advertise the stored routes
        let routes: Vec<StoredRoute> = store.routes(&table).cloned().collect();
        let outbound = context
            .build_update(
                &routes,
                &[],
                &Attributes::default(),
                Some(NextHopAddress::Ipv4(Ipv4Addr::new(198, 51, 100, 1))),
            )
            .unwrap();
        let reparsed = AttributeParser::new(Some(&constraint))
            .parse_attributes(outbound)
            .unwrap();
        let reach = reparsed.mp_reach.unwrap();
        assert_eq!(reach.destinations.len(), 2);
        assert_eq!(
            reach.next_hop,
            NextHopAddress::Ipv4(Ipv4Addr::new(198, 51, 100, 1))
        );

        // withdraw one path
        let unreach = MpUnreachNlri {
            afi: Afi::Ipv4,
            safi: Safi::MplsVpn,
            destinations: Destinations::Vpn(vec![LabeledDestination::new_vpn(
                RouteDistinguisher::from_str("65001:100").unwrap(),
                IpNet::from_str("172.16.0.0/12").unwrap(),
                [],
            )
            .with_path_id(2)]),
        };
        let mut tx = store.begin();
        context.remove_routes(&mut tx, &unreach).unwrap();
        store.commit(tx).unwrap();
        let remaining: Vec<&StoredRoute> = store.routes(&table).collect();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].route_id.path_id, 1);

        // session down
        let mut tx = store.begin();
        context.remove_table(&mut tx);
        store.commit(tx).unwrap();
        assert!(store.table(&table).is_none());
    }

    #[test]
    fn test_without_add_path_paths_collapse() {
        let table = TableKey::new(Afi::Ipv4, Safi::MplsVpn);
        let support = VpnIpv4RibSupport::default();
        let context = TableContext::new(&support, false);

        let update = vpn_update(&[1, 2], &[100, 200]);
        let mut store = MemoryStore::new();
        let mut tx = store.begin();
        context.create_table(&mut tx);
        context
            .write_routes(&mut tx, update.mp_reach.as_ref().unwrap(), &update.attributes)
            .unwrap();
        store.commit(tx).unwrap();

        let routes: Vec<&StoredRoute> = store.routes(&table).collect();
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].route_id.path_id, NON_PATH_ID);
        // the later destination wins
        match &routes[0].destination {
            Destination::Labeled(d) => assert_eq!(d.labels.as_slice(), &[MplsLabel::new(200)]),
            other => panic!("unexpected destination {:?}", other),
        }
    }

    #[test]
    fn test_link_state_table() {
        let table = TableKey::new(Afi::LinkState, Safi::LinkState);
        let registry = RibSupportRegistry::with_defaults();
        let context = TableContext::new(registry.get(&table).unwrap(), false);

        let nlri = LinkStateNlri::new_node_nlri(
            ProtocolId::Ospfv2,
            7,
            NodeDescriptor {
                autonomous_system: Some(65001),
                ospf_area_id: Some(0),
                igp_router_id: Some(vec![10, 0, 0, 1]),
                ..Default::default()
            },
        );
        let attributes = Attributes::with_link_state(LinkStateAttribute::Node(NodeAttributes {
            hostname: Some("p1".to_string()),
            ..Default::default()
        }));
        let reach = MpReachNlri {
            afi: Afi::LinkState,
            safi: Safi::LinkState,
            next_hop: NextHopAddress::Ipv4(Ipv4Addr::new(10, 0, 0, 1)),
            destinations: Destinations::LinkState(vec![nlri]),
        };

        let mut store = MemoryStore::new();
        let mut tx = store.begin();
        context.create_table(&mut tx);
        context.write_routes(&mut tx, &reach, &attributes).unwrap();
        store.commit(tx).unwrap();

        let routes: Vec<StoredRoute> = store.routes(&table).cloned().collect();
        assert_eq!(routes[0].attributes, attributes);

        let bytes = context
            .build_update(
                &routes,
                &[],
                &routes[0].attributes,
                Some(NextHopAddress::Ipv4(Ipv4Addr::new(10, 0, 0, 1))),
            )
            .unwrap();
        let update = AttributeParser::new(None).parse_attributes(bytes).unwrap();
        assert_eq!(update.mp_reach, Some(reach));
        assert_eq!(update.attributes, attributes);
    }
}
