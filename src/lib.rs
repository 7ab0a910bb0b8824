/*!
bgpkit-extensions encodes and decodes BGP UPDATE path attributes and NLRI for the Link-State
(RFC 7752, RFC 9085), Labeled-Unicast (RFC 8277) and L3VPN (RFC 4364, RFC 4659) address families,
and synchronizes decoded routes with per-table RIB storage.

# Decoding NLRI

```
use bgpkit_extensions::models::*;
use bgpkit_extensions::parser::parse_labeled_unicast_nlri;
use bytes::Bytes;

// three labels: 355, 356, 357 and prefix 34.1.22.0/24
let input = Bytes::from_static(&[
    0x60, 0x00, 0x16, 0x30, 0x00, 0x16, 0x40, 0x00, 0x16, 0x51, 0x22, 0x01, 0x16,
]);
let destinations = parse_labeled_unicast_nlri(input, Afi::Ipv4, false).unwrap();
assert_eq!(destinations[0].labels.len(), 3);
assert_eq!(destinations[0].prefix.to_string(), "34.1.22.0/24");
```

# Decoding path attributes

[parser::AttributeParser] reads the path attribute section of an UPDATE. MP_REACH_NLRI and
MP_UNREACH_NLRI are decoded with the codec of their AFI/SAFI, and the BGP-LS attribute with the
layout of the NLRI it travels with. A [config::PeerConstraint] restricts the accepted tables and
enables Add-Path path identifiers per table.

# Synchronizing tables

The [rib] module turns decoded destinations into stored routes keyed by a route id, and rebuilds
MP_REACH/MP_UNREACH attributes from stored routes. See [rib::TableContext].
*/

pub mod config;
pub mod error;
pub mod models;
pub mod parser;
pub mod rib;

pub use config::PeerConstraint;
pub use error::{ParserError, RibError};
