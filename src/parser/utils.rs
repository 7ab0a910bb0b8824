/*!
Provides IO utility functions for read bytes of different length and converting to corresponding structs.
*/
use ipnet::IpNet;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use crate::error::ParserError;
use crate::models::*;
use bytes::{Buf, Bytes};

impl ReadUtils for Bytes {}

// Allow reading IPs from Reads
pub trait ReadUtils: Buf {
    #[inline]
    fn has_n_remaining(&self, n: usize) -> Result<(), ParserError> {
        if self.remaining() < n {
            Err(ParserError::TruncatedInput {
                expected: n,
                remaining: self.remaining(),
            })
        } else {
            Ok(())
        }
    }

    #[inline]
    fn read_u8(&mut self) -> Result<u8, ParserError> {
        self.has_n_remaining(1)?;
        Ok(self.get_u8())
    }

    #[inline]
    fn read_u16(&mut self) -> Result<u16, ParserError> {
        self.has_n_remaining(2)?;
        Ok(self.get_u16())
    }

    /// Read a 3-byte big-endian value, as used by label stack entries and SR ranges.
    #[inline]
    fn read_u24(&mut self) -> Result<u32, ParserError> {
        self.has_n_remaining(3)?;
        Ok(self.get_uint(3) as u32)
    }

    #[inline]
    fn read_u32(&mut self) -> Result<u32, ParserError> {
        self.has_n_remaining(4)?;
        Ok(self.get_u32())
    }

    #[inline]
    fn read_u64(&mut self) -> Result<u64, ParserError> {
        self.has_n_remaining(8)?;
        Ok(self.get_u64())
    }

    fn read_ipv4_address(&mut self) -> Result<Ipv4Addr, ParserError> {
        let addr = self.read_u32()?;
        Ok(Ipv4Addr::from(addr))
    }

    fn read_ipv6_address(&mut self) -> Result<Ipv6Addr, ParserError> {
        self.has_n_remaining(16)?;
        let buf = self.get_u128();
        Ok(Ipv6Addr::from(buf))
    }

    fn read_afi(&mut self) -> Result<Afi, ParserError> {
        Afi::try_from(self.read_u16()?).map_err(ParserError::from)
    }

    fn read_safi(&mut self) -> Result<Safi, ParserError> {
        Safi::try_from(self.read_u8()?).map_err(ParserError::from)
    }

    fn read_route_distinguisher(&mut self) -> Result<RouteDistinguisher, ParserError> {
        self.has_n_remaining(RouteDistinguisher::LENGTH)?;
        let mut rd = [0u8; RouteDistinguisher::LENGTH];
        self.copy_to_slice(&mut rd);
        Ok(RouteDistinguisher(rd))
    }

    /// Read `ceil(bit_len / 8)` address bytes of a prefix. Bits beyond `bit_len` are cleared.
    fn read_prefix_bits(&mut self, afi: Afi, bit_len: u8) -> Result<IpNet, ParserError> {
        let max_len = match afi {
            Afi::Ipv4 => 32,
            Afi::Ipv6 => 128,
            Afi::LinkState => {
                return Err(ParserError::MalformedNlri(
                    "link-state address family carries no IP prefix".to_string(),
                ))
            }
        };
        if bit_len > max_len {
            return Err(ParserError::MalformedNlri(format!(
                "prefix length {} exceeds {} bits",
                bit_len, max_len
            )));
        }
        let byte_len = (bit_len as usize).div_ceil(8);
        self.has_n_remaining(byte_len)?;

        let addr = match afi {
            Afi::Ipv6 => {
                let mut buff = [0u8; 16];
                self.copy_to_slice(&mut buff[..byte_len]);
                IpAddr::V6(Ipv6Addr::from(buff))
            }
            _ => {
                let mut buff = [0u8; 4];
                self.copy_to_slice(&mut buff[..byte_len]);
                IpAddr::V4(Ipv4Addr::from(buff))
            }
        };
        Ok(IpNet::new(addr, bit_len)?.trunc())
    }

    fn read_n_bytes(&mut self, n_bytes: usize) -> Result<Bytes, ParserError> {
        self.has_n_remaining(n_bytes)?;
        Ok(self.copy_to_bytes(n_bytes))
    }

    fn read_n_bytes_to_string(&mut self, n_bytes: usize) -> Result<String, ParserError> {
        let buffer = self.read_n_bytes(n_bytes)?;
        Ok(buffer.iter().map(|x| *x as char).collect::<String>())
    }
}

/// Zero-extend a 1 to `max` byte big-endian value.
pub(crate) fn read_variable_uint(
    mut input: Bytes,
    max: usize,
    tlv_type: u16,
) -> Result<u32, ParserError> {
    if input.is_empty() || input.len() > max {
        return Err(ParserError::MalformedTlv {
            tlv_type,
            reason: format!("expected 1 to {} bytes, found {}", max, input.len()),
        });
    }
    let len = input.len();
    Ok(input.get_uint(len) as u32)
}
