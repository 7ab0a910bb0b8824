/*!
Per-peer capability constraints consulted by the NLRI parsers and the RIB layer.
*/
use crate::models::{Afi, Safi, TableKey};
use std::collections::BTreeSet;

/// Tables negotiated with one peer, and the subset that negotiated Add-Path (RFC 7911).
///
/// An unconstrained parser (no [PeerConstraint]) accepts every table this crate has a codec for
/// and never expects path identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PeerConstraint {
    #[cfg_attr(feature = "serde", serde(default))]
    pub tables: BTreeSet<TableKey>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub add_path_tables: BTreeSet<TableKey>,
}

impl PeerConstraint {
    pub fn new() -> Self {
        Self::default()
    }

    /// Constraint supporting every table this crate handles, without Add-Path.
    pub fn all_tables() -> Self {
        let tables = [
            TableKey::new(Afi::Ipv4, Safi::MplsLabel),
            TableKey::new(Afi::Ipv6, Safi::MplsLabel),
            TableKey::new(Afi::Ipv4, Safi::MplsVpn),
            TableKey::new(Afi::Ipv6, Safi::MplsVpn),
            TableKey::new(Afi::LinkState, Safi::LinkState),
            TableKey::new(Afi::LinkState, Safi::LinkStateVpn),
        ];
        PeerConstraint {
            tables: tables.into_iter().collect(),
            add_path_tables: BTreeSet::new(),
        }
    }

    pub fn with_table(mut self, table: TableKey) -> Self {
        self.tables.insert(table);
        self
    }

    /// Enable Add-Path for a table. The table becomes supported as well.
    pub fn with_add_path(mut self, table: TableKey) -> Self {
        self.tables.insert(table);
        self.add_path_tables.insert(table);
        self
    }

    pub fn is_table_supported(&self, table: &TableKey) -> bool {
        self.tables.contains(table)
    }

    pub fn supports_add_path(&self, table: &TableKey) -> bool {
        self.add_path_tables.contains(table)
    }
}
