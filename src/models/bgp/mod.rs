//! BGP path attributes and multiprotocol NLRI structs.

pub mod attributes;
pub mod linkstate;

pub use attributes::*;
pub use linkstate::*;
