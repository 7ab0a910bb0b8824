//! Common network-related structs.

mod afi;
mod label;
mod nexthop;
mod prefix;
mod rd;

pub use afi::*;
pub use label::*;
pub use nexthop::*;
pub use prefix::*;
pub use rd::*;
