/*!
rib module synchronizes decoded routes with per-table storage.

A [TableContext] binds one table of one peer to a store transaction. It derives route ids through
the table's [RibSupport], writes and deletes [StoredRoute]s, and rebuilds MP_REACH/MP_UNREACH
attributes from stored routes for re-advertisement.

```
use bgpkit_extensions::models::*;
use bgpkit_extensions::rib::*;
use std::str::FromStr;

let registry = RibSupportRegistry::with_defaults();
let support = registry.get(&TableKey::new(Afi::Ipv4, Safi::MplsLabel)).unwrap();
let context = TableContext::new(support, false);

let mut store = MemoryStore::new();
let mut tx = store.begin();
context.create_table(&mut tx);
let reach = MpReachNlri {
    afi: Afi::Ipv4,
    safi: Safi::MplsLabel,
    next_hop: NextHopAddress::Ipv4("192.0.2.1".parse().unwrap()),
    destinations: Destinations::LabeledUnicast(vec![LabeledDestination::new(
        ipnet::IpNet::from_str("34.1.22.0/24").unwrap(),
        [MplsLabel::new(355)],
    )]),
};
context.write_routes(&mut tx, &reach, &Attributes::default()).unwrap();
store.commit(tx).unwrap();
assert_eq!(store.routes(&context.table()).count(), 1);
```
*/
pub mod labeled_unicast;
pub mod linkstate;
pub mod route;
pub mod store;
pub mod support;
pub mod table;
pub mod vpn;

pub use labeled_unicast::{
    LabeledFamily, LabeledRibSupport, LabeledUnicastIpv4RibSupport, LabeledUnicastIpv6RibSupport,
};
pub use linkstate::LinkStateRibSupport;
pub use route::*;
pub use store::{MemoryStore, MemoryTransaction, StorePath, StoreValue, WriteTransaction};
pub use support::{CacheableObject, RibSupport, RibSupportRegistry};
pub use table::{TableAttributes, TableContext, TableSkeleton};
pub use vpn::{VpnIpv4RibSupport, VpnIpv6RibSupport};
