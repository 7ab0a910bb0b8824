/*!
models module defines the data structures carried by the Link-State, Labeled-Unicast and VPN
address families and the records stored in RIB tables.
*/
pub mod bgp;
pub mod network;

pub use bgp::*;
pub use network::*;
