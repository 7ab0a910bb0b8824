//! Per-table RIB support contract and the registry selecting an implementation by table.
use crate::error::RibError;
use crate::models::*;
use crate::rib::labeled_unicast::{LabeledUnicastIpv4RibSupport, LabeledUnicastIpv6RibSupport};
use crate::rib::linkstate::LinkStateRibSupport;
use crate::rib::route::*;
use crate::rib::table::TableSkeleton;
use crate::rib::vpn::{VpnIpv4RibSupport, VpnIpv6RibSupport};
use std::collections::HashMap;

/// Sub-objects whose serialized form a table context may memoize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheableObject {
    LinkStateAttribute,
}

pub trait RibSupport {
    fn table(&self) -> TableKey;

    /// Route key of a destination. Stable across label stacks and path ids.
    fn route_key(&self, destination: &Destination) -> Result<RouteKey, RibError>;

    /// Store key of a destination. Path ids only take part when `add_path` is set.
    fn route_id(&self, destination: &Destination, add_path: bool) -> Result<RouteId, RibError> {
        let path_id = match add_path {
            true => extract_path_id(destination),
            false => NON_PATH_ID,
        };
        Ok(route_id_for_path(path_id, self.route_key(destination)?))
    }

    /// Rebuild MP_REACH_NLRI with one destination per stored route.
    fn build_reach(
        &self,
        routes: &[StoredRoute],
        next_hop: NextHopAddress,
    ) -> Result<MpReachNlri, RibError>;

    /// Rebuild MP_UNREACH_NLRI with one destination per stored route.
    fn build_unreach(&self, routes: &[StoredRoute]) -> Result<MpUnreachNlri, RibError>;

    fn empty_table(&self) -> TableSkeleton {
        TableSkeleton::new(self.table())
    }

    /// Whether a route has to be rebuilt from its full content rather than from its key.
    fn is_complex_route(&self) -> bool {
        true
    }

    fn cacheable_nlri_objects(&self) -> &'static [CacheableObject] {
        &[]
    }

    fn cacheable_attribute_objects(&self) -> &'static [CacheableObject] {
        &[]
    }
}

/// Collect the destinations of stored routes into the family of `table`.
pub(crate) fn collect_destinations(
    table: TableKey,
    routes: &[StoredRoute],
) -> Result<Destinations, RibError> {
    let mut destinations =
        Destinations::empty_for(table).ok_or(RibError::UnsupportedTable(table))?;
    for route in routes {
        if !destinations.push(route.destination.clone()) {
            return Err(RibError::DestinationMismatch(table));
        }
    }
    Ok(destinations)
}

/// Table to [RibSupport] map, built once and then only read.
#[derive(Default)]
pub struct RibSupportRegistry {
    supports: HashMap<TableKey, Box<dyn RibSupport>>,
}

impl RibSupportRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every table family this crate implements.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(LabeledUnicastIpv4RibSupport::default()));
        registry.register(Box::new(LabeledUnicastIpv6RibSupport::default()));
        registry.register(Box::new(VpnIpv4RibSupport::default()));
        registry.register(Box::new(VpnIpv6RibSupport::default()));
        registry.register(Box::new(LinkStateRibSupport::new(Safi::LinkState)));
        registry.register(Box::new(LinkStateRibSupport::new(Safi::LinkStateVpn)));
        registry
    }

    /// Register a support, replacing any previous one for the same table.
    pub fn register(&mut self, support: Box<dyn RibSupport>) {
        self.supports.insert(support.table(), support);
    }

    pub fn get(&self, table: &TableKey) -> Result<&dyn RibSupport, RibError> {
        self.supports
            .get(table)
            .map(|s| s.as_ref())
            .ok_or(RibError::UnsupportedTable(*table))
    }

    pub fn tables(&self) -> impl Iterator<Item = &TableKey> {
        self.supports.keys()
    }
}
