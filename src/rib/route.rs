//! Route identifiers and stored route records.
use crate::models::*;
use base64::Engine;
use bytes::Bytes;
use std::fmt::{Display, Formatter};

/// Path id used by tables without Add-Path.
pub const NON_PATH_ID: u32 = 0;

/// Opaque route key: base64 of the serialized identifying fields of a destination.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteKey(pub String);

impl RouteKey {
    pub fn from_nlri_bytes(bytes: &Bytes) -> Self {
        RouteKey(base64::engine::general_purpose::STANDARD.encode(bytes))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for RouteKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Key of a stored route: the path id and the route key of its destination.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteId {
    pub path_id: u32,
    pub route_key: RouteKey,
}

impl Display for RouteId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#{}", self.route_key, self.path_id)
    }
}

/// Path id of a destination, or [NON_PATH_ID] when it carries none.
pub fn extract_path_id(destination: &Destination) -> u32 {
    destination.path_id().unwrap_or(NON_PATH_ID)
}

pub fn route_id_for_path(path_id: u32, base_key: RouteKey) -> RouteId {
    RouteId {
        path_id,
        route_key: base_key,
    }
}

/// A route as written to a table.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StoredRoute {
    pub route_id: RouteId,
    pub destination: Destination,
    pub attributes: Attributes,
}
