use std::fmt::{Debug, Display, Formatter};
use std::net::Ipv4Addr;
use std::str::FromStr;
use thiserror::Error;

/// Route Distinguisher - RFC 4364 section 4.2
///
/// Carried as 8 opaque bytes by the codecs. The type/administrator/assigned-number split is only
/// interpreted for display and for parsing from text.
#[derive(PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteDistinguisher(pub [u8; 8]);

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid route distinguisher {0:?}")]
pub struct InvalidRouteDistinguisher(pub String);

impl RouteDistinguisher {
    pub const LENGTH: usize = 8;

    pub fn rd_type(&self) -> u16 {
        u16::from_be_bytes([self.0[0], self.0[1]])
    }

    pub fn as_bytes(&self) -> &[u8; 8] {
        &self.0
    }
}

impl From<[u8; 8]> for RouteDistinguisher {
    fn from(value: [u8; 8]) -> Self {
        RouteDistinguisher(value)
    }
}

impl Display for RouteDistinguisher {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let b = &self.0;
        match self.rd_type() {
            0 => write!(
                f,
                "{}:{}",
                u16::from_be_bytes([b[2], b[3]]),
                u32::from_be_bytes([b[4], b[5], b[6], b[7]])
            ),
            1 => write!(
                f,
                "{}:{}",
                Ipv4Addr::new(b[2], b[3], b[4], b[5]),
                u16::from_be_bytes([b[6], b[7]])
            ),
            2 => write!(
                f,
                "{}:{}",
                u32::from_be_bytes([b[2], b[3], b[4], b[5]]),
                u16::from_be_bytes([b[6], b[7]])
            ),
            _ => {
                for byte in b {
                    write!(f, "{:02x}", byte)?;
                }
                Ok(())
            }
        }
    }
}

impl Debug for RouteDistinguisher {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "RD({})", self)
    }
}

impl FromStr for RouteDistinguisher {
    type Err = InvalidRouteDistinguisher;

    /// Parses `asn:number`, `ipv4:number` or `asn4:number`, picking type 0, 1 or 2 respectively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || InvalidRouteDistinguisher(s.to_string());
        let (admin, assigned) = s.split_once(':').ok_or_else(err)?;
        let mut bytes = [0u8; 8];

        if let Ok(ip) = Ipv4Addr::from_str(admin) {
            let assigned: u16 = assigned.parse().map_err(|_| err())?;
            bytes[..2].copy_from_slice(&1u16.to_be_bytes());
            bytes[2..6].copy_from_slice(&ip.octets());
            bytes[6..].copy_from_slice(&assigned.to_be_bytes());
            return Ok(RouteDistinguisher(bytes));
        }

        let admin: u32 = admin.parse().map_err(|_| err())?;
        match u16::try_from(admin) {
            Ok(asn) => {
                let assigned: u32 = assigned.parse().map_err(|_| err())?;
                bytes[2..4].copy_from_slice(&asn.to_be_bytes());
                bytes[4..].copy_from_slice(&assigned.to_be_bytes());
            }
            Err(_) => {
                let assigned: u16 = assigned.parse().map_err(|_| err())?;
                bytes[..2].copy_from_slice(&2u16.to_be_bytes());
                bytes[2..6].copy_from_slice(&admin.to_be_bytes());
                bytes[6..].copy_from_slice(&assigned.to_be_bytes());
            }
        }
        Ok(RouteDistinguisher(bytes))
    }
}
