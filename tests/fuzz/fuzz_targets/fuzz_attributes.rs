#![no_main]
use libfuzzer_sys::fuzz_target;
use bytes::Bytes;
use bgpkit_extensions::parser::AttributeParser;
use bgpkit_extensions::PeerConstraint;

fuzz_target!(|data: &[u8]| {
    let bytes = Bytes::copy_from_slice(data);
    let _ = AttributeParser::new(None).parse_attributes(bytes.clone());
    let constraint = PeerConstraint::all_tables();
    let _ = AttributeParser::new(Some(&constraint)).parse_attributes(bytes);
});
