/*!
parser module contains the wire-format codecs: the TLV reader, the Link-State attribute and NLRI
codecs, the Labeled-Unicast and VPN NLRI codecs, next hops and the MP_REACH/MP_UNREACH
attribute wrappers.
*/
pub mod attributes;
pub mod labeled_unicast;
pub mod linkstate;
pub mod mp_nlri;
pub mod next_hop;
pub mod tlv;
pub mod utils;
pub mod vpn;

pub use self::utils::ReadUtils;
pub use attributes::{encode_attributes, AttributeParser};
pub use labeled_unicast::{encode_labeled_unicast_nlri, parse_labeled_unicast_nlri};
pub use linkstate::{
    encode_link_state_attribute, encode_link_state_nlri, parse_link_state_attribute,
    parse_link_state_nlri,
};
pub use mp_nlri::{
    encode_destinations, encode_mp_reach_nlri, encode_mp_unreach_nlri, parse_destinations,
    parse_mp_reach_nlri, parse_mp_unreach_nlri,
};
pub use next_hop::{encode_next_hop, parse_next_hop};
pub use vpn::{encode_vpn_nlri, parse_vpn_nlri};

pub use crate::error::ParserError;
