//! RIB support shared by the Labeled-Unicast and VPN tables.
//!
//! Both families store one route per prefix (per RD for VPN) and path id. The label stack is not
//! part of the route key, so a new label for the same prefix replaces the stored route.
use crate::error::RibError;
use crate::models::*;
use crate::parser::labeled_unicast::encode_route_key_nlri;
use crate::rib::route::*;
use crate::rib::support::RibSupport;
use log::{debug, trace};
use std::marker::PhantomData;

/// Table family of a [LabeledRibSupport].
pub trait LabeledFamily {
    const AFI: Afi;
    const SAFI: Safi;
    /// Whether destinations carry a route distinguisher.
    const WITH_RD: bool;

    /// Destination list of this family.
    fn wrap(destinations: Vec<LabeledDestination>) -> Destinations;

    /// The labeled destination, if it belongs to this family.
    fn extract_destination(destination: &Destination) -> Option<&LabeledDestination> {
        match destination {
            Destination::Labeled(d)
                if d.route_distinguisher.is_some() == Self::WITH_RD
                    && Afi::from(d.prefix.addr()) == Self::AFI =>
            {
                Some(d)
            }
            _ => None,
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct LabeledUnicastIpv4;

#[derive(Debug, Default, Clone, Copy)]
pub struct LabeledUnicastIpv6;

impl LabeledFamily for LabeledUnicastIpv4 {
    const AFI: Afi = Afi::Ipv4;
    const SAFI: Safi = Safi::MplsLabel;
    const WITH_RD: bool = false;

    fn wrap(destinations: Vec<LabeledDestination>) -> Destinations {
        Destinations::LabeledUnicast(destinations)
    }
}

impl LabeledFamily for LabeledUnicastIpv6 {
    const AFI: Afi = Afi::Ipv6;
    const SAFI: Safi = Safi::MplsLabel;
    const WITH_RD: bool = false;

    fn wrap(destinations: Vec<LabeledDestination>) -> Destinations {
        Destinations::LabeledUnicast(destinations)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct LabeledRibSupport<F: LabeledFamily> {
    _family: PhantomData<F>,
}

pub type LabeledUnicastIpv4RibSupport = LabeledRibSupport<LabeledUnicastIpv4>;
pub type LabeledUnicastIpv6RibSupport = LabeledRibSupport<LabeledUnicastIpv6>;

impl<F: LabeledFamily> LabeledRibSupport<F> {
    fn destination<'a>(&self, destination: &'a Destination) -> Result<&'a LabeledDestination, RibError> {
        F::extract_destination(destination).ok_or(RibError::DestinationMismatch(self.table()))
    }

    fn destinations(&self, routes: &[StoredRoute]) -> Result<Vec<LabeledDestination>, RibError> {
        debug!("{} routes are found", routes.len());
        routes
            .iter()
            .map(|route| self.destination(&route.destination).cloned())
            .collect()
    }
}

impl<F: LabeledFamily> RibSupport for LabeledRibSupport<F> {
    fn table(&self) -> TableKey {
        TableKey::new(F::AFI, F::SAFI)
    }

    fn route_key(&self, destination: &Destination) -> Result<RouteKey, RibError> {
        let destination = self.destination(destination)?;
        let key = RouteKey::from_nlri_bytes(&encode_route_key_nlri(destination));
        trace!("route key {} for {:?}", key, destination);
        Ok(key)
    }

    fn build_reach(
        &self,
        routes: &[StoredRoute],
        next_hop: NextHopAddress,
    ) -> Result<MpReachNlri, RibError> {
        Ok(MpReachNlri {
            afi: F::AFI,
            safi: F::SAFI,
            next_hop,
            destinations: F::wrap(self.destinations(routes)?),
        })
    }

    fn build_unreach(&self, routes: &[StoredRoute]) -> Result<MpUnreachNlri, RibError> {
        Ok(MpUnreachNlri {
            afi: F::AFI,
            safi: F::SAFI,
            destinations: F::wrap(self.destinations(routes)?),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ipnet::IpNet;
    use std::net::Ipv4Addr;
    use std::str::FromStr;

    fn labeled(prefix: &str, labels: &[u32]) -> Destination {
        Destination::Labeled(LabeledDestination::new(
            IpNet::from_str(prefix).unwrap(),
            labels.iter().map(|l| MplsLabel::new(*l)),
        ))
    }

    #[test]
    fn test_route_key_ignores_labels() {
        let support = LabeledUnicastIpv4RibSupport::default();
        let a = support.route_key(&labeled("34.1.22.0/24", &[355])).unwrap();
        let b = support
            .route_key(&labeled("34.1.22.0/24", &[355, 356, 357]))
            .unwrap();
        let c = support.route_key(&labeled("34.1.0.0/16", &[355])).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_route_id_add_path() {
        let support = LabeledUnicastIpv4RibSupport::default();
        let one = match labeled("10.0.0.0/8", &[16]) {
            Destination::Labeled(d) => Destination::Labeled(d.with_path_id(1)),
            other => other,
        };
        let two = match labeled("10.0.0.0/8", &[16]) {
            Destination::Labeled(d) => Destination::Labeled(d.with_path_id(2)),
            other => other,
        };
        assert_ne!(
            support.route_id(&one, true).unwrap(),
            support.route_id(&two, true).unwrap()
        );
        // without Add-Path both collapse on path id 0
        let id = support.route_id(&one, false).unwrap();
        assert_eq!(id, support.route_id(&two, false).unwrap());
        assert_eq!(id.path_id, NON_PATH_ID);
    }

    #[test]
    fn test_family_mismatch() {
        let support = LabeledUnicastIpv6RibSupport::default();
        assert!(matches!(
            support.route_key(&labeled("10.0.0.0/8", &[16])),
            Err(RibError::DestinationMismatch(_))
        ));
    }

    #[test]
    fn test_build_reach_and_unreach() {
        let support = LabeledUnicastIpv4RibSupport::default();
        let destination = labeled("34.1.22.0/24", &[355, 356]);
        let route = StoredRoute {
            route_id: support.route_id(&destination, false).unwrap(),
            destination: destination.clone(),
            attributes: Attributes::default(),
        };
        let next_hop = NextHopAddress::Ipv4(Ipv4Addr::new(192, 0, 2, 1));
        let reach = support
            .build_reach(std::slice::from_ref(&route), next_hop)
            .unwrap();
        assert_eq!(reach.table(), support.table());
        assert_eq!(reach.destinations.to_destinations(), vec![destination]);

        let unreach = support.build_unreach(&[route]).unwrap();
        assert_eq!(unreach.destinations.len(), 1);
        assert!(support.build_unreach(&[]).unwrap().destinations.is_empty());
    }
}
