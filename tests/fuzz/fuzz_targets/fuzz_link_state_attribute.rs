#![no_main]
use libfuzzer_sys::fuzz_target;
use bytes::Bytes;
use bgpkit_extensions::models::{NlriType, ProtocolId};
use bgpkit_extensions::parser::parse_link_state_attribute;

fuzz_target!(|data: &[u8]| {
    let bytes = Bytes::copy_from_slice(data);
    for nlri_type in [NlriType::Node, NlriType::Link, NlriType::Ipv4TopologyPrefix] {
        for protocol in [ProtocolId::IsisL2, ProtocolId::Ospfv2] {
            let _ = parse_link_state_attribute(bytes.clone(), nlri_type, protocol);
        }
    }
});
