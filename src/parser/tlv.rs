//! Type-length-value records as used by BGP-LS attributes and descriptors.
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |              Type             |             Length            |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! //                       Value (variable)                      //
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```
use crate::error::ParserError;
use bytes::{Buf, BufMut, Bytes, BytesMut};

const TLV_HEADER_LENGTH: usize = 4;

/// TLV records in the order they were read. Records of one type may repeat.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TlvMap {
    entries: Vec<(u16, Bytes)>,
}

impl TlvMap {
    pub fn iter(&self) -> impl Iterator<Item = (u16, &Bytes)> {
        self.entries.iter().map(|(t, v)| (*t, v))
    }

    /// All values of one type, in encounter order.
    pub fn get_all(&self, tlv_type: u16) -> impl Iterator<Item = &Bytes> {
        self.entries
            .iter()
            .filter(move |(t, _)| *t == tlv_type)
            .map(|(_, v)| v)
    }

    pub fn get(&self, tlv_type: u16) -> Option<&Bytes> {
        self.get_all(tlv_type).next()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl IntoIterator for TlvMap {
    type Item = (u16, Bytes);
    type IntoIter = std::vec::IntoIter<(u16, Bytes)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Split a buffer into TLV records until it is exhausted.
pub fn read_tlvs(mut input: Bytes) -> Result<TlvMap, ParserError> {
    let mut map = TlvMap::default();
    while input.has_remaining() {
        if input.remaining() < TLV_HEADER_LENGTH {
            return Err(ParserError::TruncatedTlv {
                tlv_type: None,
                expected: TLV_HEADER_LENGTH,
                remaining: input.remaining(),
            });
        }
        let tlv_type = input.get_u16();
        let length = input.get_u16() as usize;
        if input.remaining() < length {
            return Err(ParserError::TruncatedTlv {
                tlv_type: Some(tlv_type),
                expected: length,
                remaining: input.remaining(),
            });
        }
        map.entries.push((tlv_type, input.split_to(length)));
    }
    Ok(map)
}

/// Append one TLV record to `output`.
pub fn write_tlv(tlv_type: u16, value: &[u8], output: &mut BytesMut) -> Result<(), ParserError> {
    let length = u16::try_from(value.len()).map_err(|_| ParserError::TlvTooLong {
        tlv_type,
        length: value.len(),
    })?;
    output.put_u16(tlv_type);
    output.put_u16(length);
    output.put_slice(value);
    Ok(())
}
