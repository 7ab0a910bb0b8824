#![no_main]
use libfuzzer_sys::fuzz_target;
use bytes::Bytes;
use bgpkit_extensions::models::{Afi, Safi, TableKey};
use bgpkit_extensions::parser::parse_destinations;

fuzz_target!(|data: &[u8]| {
    let bytes = Bytes::copy_from_slice(data);
    for (afi, safi) in [
        (Afi::Ipv4, Safi::MplsLabel),
        (Afi::Ipv6, Safi::MplsLabel),
        (Afi::Ipv4, Safi::MplsVpn),
        (Afi::Ipv6, Safi::MplsVpn),
        (Afi::LinkState, Safi::LinkState),
    ] {
        let table = TableKey::new(afi, safi);
        let _ = parse_destinations(bytes.clone(), table, false);
        let _ = parse_destinations(bytes.clone(), table, true);
    }
});
