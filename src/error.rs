/*!
error module defines the error types used in bgpkit-extensions.
*/
use crate::models::{Destinations, TableKey};
use num_enum::{TryFromPrimitive, TryFromPrimitiveError};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParserError {
    /// This error represents a [num_enum::TryFromPrimitiveError] error for any of a number of
    /// different types.
    ///
    /// ## Occurs during:
    ///  - Reading AFI/SAFI values of MP_REACH/MP_UNREACH attributes
    ///  - Reading enumerated TLV values such as link protection types
    #[error("unrecognized value {value} for {type_name}")]
    UnrecognizedEnumVariant { type_name: &'static str, value: u64 },
    /// This error represents a [ipnet::PrefixLenError] error. It occurs if an address mask is
    /// larger than the length of the address it is being applied to.
    ///
    /// ## Occurs during:
    ///  - Reading network prefixes out of NLRI and prefix descriptors
    #[error("invalid network prefix mask")]
    InvalidPrefixLength(#[from] ipnet::PrefixLenError),
    /// Fewer bytes are available than a length field or a fixed-size field declares.
    ///
    /// ## Occurs during:
    ///  - Reading any fixed-size value, NLRI prefix bytes and label stack entries
    #[error("truncated input: expected {expected} bytes, {remaining} remaining")]
    TruncatedInput { expected: usize, remaining: usize },
    /// A TLV header or value runs past the end of its enclosing buffer.
    ///
    /// ## Occurs during:
    ///  - Splitting Link-State attributes and descriptors into TLV records
    #[error("truncated TLV (type {tlv_type:?}): expected {expected} bytes, {remaining} remaining")]
    TruncatedTlv {
        tlv_type: Option<u16>,
        expected: usize,
        remaining: usize,
    },
    /// A TLV value does not fit in the 16-bit length field.
    ///
    /// ## Occurs during:
    ///  - Writing any TLV record
    #[error("TLV {tlv_type} value of {length} bytes exceeds 65535")]
    TlvTooLong { tlv_type: u16, length: usize },
    /// The label, route distinguisher and prefix arithmetic of an NLRI does not add up.
    ///
    /// ## Occurs during:
    ///  - Parsing Labeled-Unicast, VPN and Link-State NLRI
    #[error("malformed NLRI: {0}")]
    MalformedNlri(String),
    /// A TLV value has a length that is impossible for its type.
    ///
    /// ## Occurs during:
    ///  - Parsing Link/Node/Prefix attributes and their segment-routing sub-TLVs
    #[error("malformed TLV {tlv_type}: {reason}")]
    MalformedTlv { tlv_type: u16, reason: String },
    /// A value required to serialize an object is missing.
    ///
    /// ## Occurs during:
    ///  - Serializing MP_REACH attributes and next hops
    #[error("cannot serialize, missing {0}")]
    UnsupportedField(&'static str),
    /// No codec exists for the address family pair.
    ///
    /// ## Occurs during:
    ///  - Parsing or serializing MP_REACH/MP_UNREACH attributes
    #[error("unsupported table {0}")]
    UnsupportedTable(TableKey),
    /// An NLRI failed to parse after others of the same attribute were read. `parsed` holds the
    /// destinations read before the failing one; they remain valid.
    ///
    /// ## Occurs during:
    ///  - Parsing the NLRI list of an MP_REACH/MP_UNREACH attribute
    #[error("NLRI parsing stopped after {} destinations: {source}", .parsed.len())]
    PartialNlri {
        parsed: Destinations,
        source: Box<ParserError>,
    },
}

impl ParserError {
    /// Attach the destinations read before this error. Without any the error is returned as is.
    pub(crate) fn after_destinations(self, parsed: Destinations) -> ParserError {
        match parsed.is_empty() {
            true => self,
            false => ParserError::PartialNlri {
                parsed,
                source: Box::new(self),
            },
        }
    }
}

impl<T> From<TryFromPrimitiveError<T>> for ParserError
where
    T: TryFromPrimitive,
    T::Primitive: Into<u64>,
{
    #[inline]
    fn from(value: TryFromPrimitiveError<T>) -> Self {
        ParserError::UnrecognizedEnumVariant {
            type_name: T::NAME,
            value: value.number.into(),
        }
    }
}

/// Errors raised while synchronizing routes with a RIB table.
#[derive(Debug, Error)]
pub enum RibError {
    #[error(transparent)]
    Parser(#[from] ParserError),
    /// The table is not registered with the RIB support registry.
    #[error("no RIB support registered for table {0}")]
    UnsupportedTable(TableKey),
    /// The destinations do not belong to the table family handling them.
    #[error("destination family mismatch for table {0}")]
    DestinationMismatch(TableKey),
    /// Reported by the store when a transaction cannot be applied.
    #[error("store error: {0}")]
    Store(String),
}
