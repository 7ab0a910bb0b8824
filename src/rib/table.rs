//! Binding of one table to the store.
use crate::config::PeerConstraint;
use crate::error::{ParserError, RibError};
use crate::models::*;
use crate::parser::attributes::write_attribute;
use crate::parser::linkstate::encode_link_state_attribute;
use crate::parser::mp_nlri::{encode_mp_reach_nlri, encode_mp_unreach_nlri};
use crate::rib::route::{RouteId, StoredRoute};
use crate::rib::store::{StorePath, StoreValue, WriteTransaction};
use crate::rib::support::{CacheableObject, RibSupport};
use bytes::{Bytes, BytesMut};
use log::{debug, trace};
use std::cell::{OnceCell, RefCell};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TableAttributes {
    /// Set once the initial table transfer from the peer has completed.
    pub up_to_date: bool,
}

/// What a table holds apart from its routes.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TableSkeleton {
    pub table: TableKey,
    pub attributes: TableAttributes,
}

impl TableSkeleton {
    pub fn new(table: TableKey) -> Self {
        TableSkeleton {
            table,
            attributes: TableAttributes::default(),
        }
    }
}

/// Number of encoded Link-State attributes kept per table before the cache starts over.
const LINK_STATE_CACHE_CAPACITY: usize = 4096;

/// Path attribute serializer memoizing the encoded form of cacheable attributes.
struct AttributeCodec {
    cache_link_state: bool,
    capacity: usize,
    link_state_cache: RefCell<HashMap<LinkStateAttribute, Bytes>>,
}

impl AttributeCodec {
    fn new(cacheable: &[CacheableObject]) -> Self {
        Self::with_capacity(cacheable, LINK_STATE_CACHE_CAPACITY)
    }

    fn with_capacity(cacheable: &[CacheableObject], capacity: usize) -> Self {
        AttributeCodec {
            cache_link_state: cacheable.contains(&CacheableObject::LinkStateAttribute),
            capacity,
            link_state_cache: RefCell::new(HashMap::new()),
        }
    }

    fn encode_link_state(&self, attr: &LinkStateAttribute) -> Result<Bytes, ParserError> {
        if !self.cache_link_state {
            return encode_link_state_attribute(attr);
        }
        if let Some(bytes) = self.link_state_cache.borrow().get(attr) {
            return Ok(bytes.clone());
        }
        let bytes = encode_link_state_attribute(attr)?;
        let mut cache = self.link_state_cache.borrow_mut();
        if cache.len() >= self.capacity {
            debug!("link-state attribute cache reached {} entries, clearing", cache.len());
            cache.clear();
        }
        cache.insert(attr.clone(), bytes.clone());
        Ok(bytes)
    }

    fn encode(&self, attributes: &Attributes, output: &mut BytesMut) -> Result<(), ParserError> {
        if let Some(link_state) = &attributes.link_state {
            write_attribute(
                AttrFlags::OPTIONAL,
                AttrType::BGP_LS_ATTRIBUTE.into(),
                &self.encode_link_state(link_state)?,
                output,
            )?;
        }
        for raw in &attributes.unrecognized {
            write_attribute(raw.flags, raw.attr_type, &raw.value, output)?;
        }
        Ok(())
    }
}

/// MP_REACH/MP_UNREACH serializer bound to the table's Add-Path setting.
struct NlriCodec {
    constraint: PeerConstraint,
}

impl NlriCodec {
    fn new(table: TableKey, add_path: bool) -> Self {
        let constraint = match add_path {
            true => PeerConstraint::new().with_add_path(table),
            false => PeerConstraint::new().with_table(table),
        };
        NlriCodec { constraint }
    }

    fn encode_reach(&self, reach: &MpReachNlri, output: &mut BytesMut) -> Result<(), ParserError> {
        write_attribute(
            AttrFlags::OPTIONAL,
            AttrType::MP_REACHABLE_NLRI.into(),
            &encode_mp_reach_nlri(reach, Some(&self.constraint))?,
            output,
        )
    }

    fn encode_unreach(
        &self,
        unreach: &MpUnreachNlri,
        output: &mut BytesMut,
    ) -> Result<(), ParserError> {
        write_attribute(
            AttrFlags::OPTIONAL,
            AttrType::MP_UNREACHABLE_NLRI.into(),
            &encode_mp_unreach_nlri(unreach, Some(&self.constraint))?,
            output,
        )
    }
}

/// Table of one peer: writes routes through its [RibSupport] and builds outbound updates.
///
/// Codecs are created on first use and live as long as the context. A context belongs to a
/// single peer and is not shared between threads.
pub struct TableContext<'a> {
    support: &'a dyn RibSupport,
    add_path: bool,
    attribute_codec: OnceCell<AttributeCodec>,
    nlri_codec: OnceCell<NlriCodec>,
}

impl<'a> TableContext<'a> {
    pub fn new(support: &'a dyn RibSupport, add_path: bool) -> Self {
        TableContext {
            support,
            add_path,
            attribute_codec: OnceCell::new(),
            nlri_codec: OnceCell::new(),
        }
    }

    /// Context for a peer, with Add-Path as negotiated in `constraint`.
    pub fn for_peer(support: &'a dyn RibSupport, constraint: &PeerConstraint) -> Self {
        Self::new(support, constraint.supports_add_path(&support.table()))
    }

    pub fn table(&self) -> TableKey {
        self.support.table()
    }

    pub fn add_path(&self) -> bool {
        self.add_path
    }

    fn attribute_codec(&self) -> &AttributeCodec {
        self.attribute_codec
            .get_or_init(|| AttributeCodec::new(self.support.cacheable_attribute_objects()))
    }

    fn nlri_codec(&self) -> &NlriCodec {
        self.nlri_codec
            .get_or_init(|| NlriCodec::new(self.table(), self.add_path))
    }

    /// Write an empty table, replacing any existing one.
    pub fn create_table<T: WriteTransaction>(&self, tx: &mut T) {
        debug!("creating table {}", self.table());
        tx.put(
            StorePath::Table(self.table()),
            StoreValue::Table(self.support.empty_table()),
        );
    }

    pub fn remove_table<T: WriteTransaction>(&self, tx: &mut T) {
        debug!("removing table {}", self.table());
        tx.delete(StorePath::Table(self.table()));
    }

    pub fn set_up_to_date<T: WriteTransaction>(&self, tx: &mut T, up_to_date: bool) {
        let mut skeleton = self.support.empty_table();
        skeleton.attributes.up_to_date = up_to_date;
        tx.merge(StorePath::Table(self.table()), StoreValue::Table(skeleton));
    }

    fn check_table(&self, table: TableKey) -> Result<(), RibError> {
        match table == self.table() {
            true => Ok(()),
            false => Err(RibError::DestinationMismatch(table)),
        }
    }

    /// Merge every advertised destination with `attributes` into the table.
    ///
    /// Route ids are derived for all destinations before anything is submitted, so a destination
    /// without a valid key leaves the transaction untouched.
    pub fn write_routes<T: WriteTransaction>(
        &self,
        tx: &mut T,
        reach: &MpReachNlri,
        attributes: &Attributes,
    ) -> Result<Vec<RouteId>, RibError> {
        self.check_table(reach.table())?;
        let routes = self.stored_routes(&reach.destinations, attributes)?;
        let ids = routes.iter().map(|r| r.route_id.clone()).collect();
        for route in routes {
            tx.merge(
                StorePath::Route(self.table(), route.route_id.clone()),
                StoreValue::Route(route),
            );
        }
        Ok(ids)
    }

    /// Delete every withdrawn destination from the table.
    pub fn remove_routes<T: WriteTransaction>(
        &self,
        tx: &mut T,
        unreach: &MpUnreachNlri,
    ) -> Result<Vec<RouteId>, RibError> {
        self.check_table(unreach.table())?;
        let ids = self.route_ids(&unreach.destinations)?;
        for id in &ids {
            tx.delete(StorePath::Route(self.table(), id.clone()));
        }
        Ok(ids)
    }

    fn route_ids(&self, destinations: &Destinations) -> Result<Vec<RouteId>, RibError> {
        debug!("{} routes are found", destinations.len());
        destinations
            .to_destinations()
            .iter()
            .map(|destination| {
                let id = self.support.route_id(destination, self.add_path)?;
                trace!("Route {} is processed", id);
                Ok(id)
            })
            .collect()
    }

    fn stored_routes(
        &self,
        destinations: &Destinations,
        attributes: &Attributes,
    ) -> Result<Vec<StoredRoute>, RibError> {
        let ids = self.route_ids(destinations)?;
        Ok(ids
            .into_iter()
            .zip(destinations.to_destinations())
            .map(|(route_id, destination)| StoredRoute {
                route_id,
                destination,
                attributes: attributes.clone(),
            })
            .collect())
    }

    /// Encode the path attributes of an UPDATE advertising `advertised` and withdrawing
    /// `withdrawn`.
    ///
    /// A next hop is required when routes are advertised.
    pub fn build_update(
        &self,
        advertised: &[StoredRoute],
        withdrawn: &[StoredRoute],
        attributes: &Attributes,
        next_hop: Option<NextHopAddress>,
    ) -> Result<Bytes, RibError> {
        let mut bytes = BytesMut::new();
        if !advertised.is_empty() {
            let next_hop = next_hop.ok_or(ParserError::UnsupportedField("next hop"))?;
            let reach = self.support.build_reach(advertised, next_hop)?;
            self.nlri_codec().encode_reach(&reach, &mut bytes)?;
        }
        if !withdrawn.is_empty() {
            let unreach = self.support.build_unreach(withdrawn)?;
            self.nlri_codec().encode_unreach(&unreach, &mut bytes)?;
        }
        self.attribute_codec().encode(attributes, &mut bytes)?;
        Ok(bytes.freeze())
    }
}
