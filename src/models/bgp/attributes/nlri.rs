use crate::models::*;

/// Destinations carried by one MP_REACH/MP_UNREACH attribute.
#[derive(Debug, PartialEq, Clone, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Destinations {
    /// SAFI 4 - RFC 8277
    LabeledUnicast(Vec<LabeledDestination>),
    /// SAFI 128 - RFC 4364
    Vpn(Vec<LabeledDestination>),
    /// AFI 16388 - RFC 7752
    LinkState(Vec<LinkStateNlri>),
}

/// A single destination, the unit a route is stored under.
#[derive(Debug, PartialEq, Clone, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Destination {
    Labeled(LabeledDestination),
    LinkState(LinkStateNlri),
}

impl Destination {
    pub fn path_id(&self) -> Option<u32> {
        match self {
            Destination::Labeled(d) => d.path_id,
            Destination::LinkState(d) => d.path_id,
        }
    }
}

impl Destinations {
    /// Empty destination list of the family used by `table`.
    pub fn empty_for(table: TableKey) -> Option<Self> {
        match (table.afi, table.safi) {
            (Afi::Ipv4 | Afi::Ipv6, Safi::MplsLabel) => Some(Destinations::LabeledUnicast(vec![])),
            (Afi::Ipv4 | Afi::Ipv6, Safi::MplsVpn) => Some(Destinations::Vpn(vec![])),
            (Afi::LinkState, Safi::LinkState | Safi::LinkStateVpn) => {
                Some(Destinations::LinkState(vec![]))
            }
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Destinations::LabeledUnicast(v) | Destinations::Vpn(v) => v.len(),
            Destinations::LinkState(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Appends a destination. Returns `false` when it does not belong to this family.
    pub fn push(&mut self, destination: Destination) -> bool {
        match (self, destination) {
            (Destinations::LabeledUnicast(v), Destination::Labeled(d))
                if d.route_distinguisher.is_none() =>
            {
                v.push(d)
            }
            (Destinations::Vpn(v), Destination::Labeled(d)) if d.route_distinguisher.is_some() => {
                v.push(d)
            }
            (Destinations::LinkState(v), Destination::LinkState(d)) => v.push(d),
            _ => return false,
        }
        true
    }

    /// NLRI type of the first Link-State destination, used to pick the attribute layout.
    pub fn first_link_state_type(&self) -> Option<NlriType> {
        match self {
            Destinations::LinkState(v) => v.first().map(|n| n.nlri_type),
            _ => None,
        }
    }

    pub fn to_destinations(&self) -> Vec<Destination> {
        match self {
            Destinations::LabeledUnicast(v) | Destinations::Vpn(v) => {
                v.iter().cloned().map(Destination::Labeled).collect()
            }
            Destinations::LinkState(v) => v.iter().cloned().map(Destination::LinkState).collect(),
        }
    }
}

/// MP_REACH_NLRI - RFC 4760 section 3
#[derive(Debug, PartialEq, Clone, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MpReachNlri {
    pub afi: Afi,
    pub safi: Safi,
    pub next_hop: NextHopAddress,
    pub destinations: Destinations,
}

/// MP_UNREACH_NLRI - RFC 4760 section 4
#[derive(Debug, PartialEq, Clone, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MpUnreachNlri {
    pub afi: Afi,
    pub safi: Safi,
    pub destinations: Destinations,
}

impl MpReachNlri {
    pub const fn table(&self) -> TableKey {
        TableKey::new(self.afi, self.safi)
    }
}

impl MpUnreachNlri {
    pub const fn table(&self) -> TableKey {
        TableKey::new(self.afi, self.safi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ipnet::IpNet;
    use std::str::FromStr;

    #[test]
    fn test_destinations_push() {
        let table = TableKey::new(Afi::Ipv4, Safi::MplsLabel);
        let mut destinations = Destinations::empty_for(table).unwrap();
        let prefix = IpNet::from_str("10.0.0.0/8").unwrap();

        assert!(destinations.push(Destination::Labeled(LabeledDestination::new(prefix, []))));
        assert!(!destinations.push(Destination::Labeled(LabeledDestination::new_vpn(
            RouteDistinguisher::default(),
            prefix,
            []
        ))));
        assert_eq!(destinations.len(), 1);
        assert_eq!(destinations.first_link_state_type(), None);
    }

    #[test]
    fn test_unsupported_table() {
        assert!(Destinations::empty_for(TableKey::new(Afi::Ipv4, Safi::Unicast)).is_none());
        assert!(matches!(
            Destinations::empty_for(TableKey::new(Afi::LinkState, Safi::LinkState)),
            Some(Destinations::LinkState(_))
        ));
    }
}
