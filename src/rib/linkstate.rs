use crate::error::RibError;
use crate::models::*;
use crate::parser::linkstate::encode_link_state_nlri;
use crate::rib::route::*;
use crate::rib::support::{collect_destinations, CacheableObject, RibSupport};
use bytes::BytesMut;
use log::{debug, trace};

/// BGP-LS (SAFI 71) and BGP-LS-VPN (SAFI 72) tables.
///
/// The route key is the serialized NLRI without path id, including the route distinguisher of
/// BGP-LS-VPN NLRI. Attributes of topology objects are
/// repeated across many updates, so the Link-State attribute is declared cacheable.
#[derive(Debug, Clone, Copy)]
pub struct LinkStateRibSupport {
    safi: Safi,
}

impl LinkStateRibSupport {
    pub fn new(safi: Safi) -> Self {
        LinkStateRibSupport { safi }
    }
}

impl Default for LinkStateRibSupport {
    fn default() -> Self {
        Self::new(Safi::LinkState)
    }
}

impl RibSupport for LinkStateRibSupport {
    fn table(&self) -> TableKey {
        TableKey::new(Afi::LinkState, self.safi)
    }

    fn route_key(&self, destination: &Destination) -> Result<RouteKey, RibError> {
        let nlri = match destination {
            Destination::LinkState(nlri) => nlri,
            _ => return Err(RibError::DestinationMismatch(self.table())),
        };
        let mut bytes = BytesMut::new();
        encode_link_state_nlri(nlri, false, self.safi == Safi::LinkStateVpn, &mut bytes)?;
        let key = RouteKey::from_nlri_bytes(&bytes.freeze());
        trace!("route key {} for {:?} NLRI", key, nlri.nlri_type);
        Ok(key)
    }

    fn build_reach(
        &self,
        routes: &[StoredRoute],
        next_hop: NextHopAddress,
    ) -> Result<MpReachNlri, RibError> {
        debug!("{} routes are found", routes.len());
        Ok(MpReachNlri {
            afi: Afi::LinkState,
            safi: self.safi,
            next_hop,
            destinations: collect_destinations(self.table(), routes)?,
        })
    }

    fn build_unreach(&self, routes: &[StoredRoute]) -> Result<MpUnreachNlri, RibError> {
        debug!("{} routes are found", routes.len());
        Ok(MpUnreachNlri {
            afi: Afi::LinkState,
            safi: self.safi,
            destinations: collect_destinations(self.table(), routes)?,
        })
    }

    fn cacheable_attribute_objects(&self) -> &'static [CacheableObject] {
        &[CacheableObject::LinkStateAttribute]
    }
}
