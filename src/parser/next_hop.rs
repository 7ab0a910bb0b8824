//! Next hop field of MP_REACH_NLRI.
//!
//! VPN families prefix every address with a route distinguisher that is always zero
//! (RFC 4364 section 4.3.2, RFC 4659 section 3.2.1).
use crate::error::ParserError;
use crate::models::*;
use crate::parser::ReadUtils;
use bytes::{BufMut, Bytes, BytesMut};
use log::warn;

const RD_LENGTH: usize = RouteDistinguisher::LENGTH;

fn is_vpn(safi: Safi) -> bool {
    matches!(safi, Safi::MplsVpn | Safi::LinkStateVpn)
}

fn skip_zero_rd(input: &mut Bytes) -> Result<(), ParserError> {
    let rd = input.read_route_distinguisher()?;
    if rd != RouteDistinguisher::default() {
        warn!("non-zero route distinguisher {} in VPN next hop", rd);
    }
    Ok(())
}

pub fn parse_next_hop(mut input: Bytes, safi: Safi) -> Result<NextHopAddress, ParserError> {
    let vpn = is_vpn(safi);
    let next_hop = match (vpn, input.len()) {
        (false, 4) => NextHopAddress::Ipv4(input.read_ipv4_address()?),
        (false, 16) => NextHopAddress::Ipv6(input.read_ipv6_address()?),
        (false, 32) => NextHopAddress::Ipv6LinkLocal(
            input.read_ipv6_address()?,
            input.read_ipv6_address()?,
        ),
        (true, 12) => {
            skip_zero_rd(&mut input)?;
            NextHopAddress::Ipv4(input.read_ipv4_address()?)
        }
        (true, 24) => {
            skip_zero_rd(&mut input)?;
            NextHopAddress::Ipv6(input.read_ipv6_address()?)
        }
        (true, 48) => {
            skip_zero_rd(&mut input)?;
            let global = input.read_ipv6_address()?;
            skip_zero_rd(&mut input)?;
            NextHopAddress::Ipv6LinkLocal(global, input.read_ipv6_address()?)
        }
        (_, len) => {
            return Err(ParserError::MalformedNlri(format!(
                "invalid next hop length {} for {:?}",
                len, safi
            )))
        }
    };
    Ok(next_hop)
}

pub fn encode_next_hop(next_hop: &NextHopAddress, safi: Safi) -> Bytes {
    let vpn = is_vpn(safi);
    let mut output = BytesMut::with_capacity(48);
    let mut put_address = |octets: &[u8]| {
        if vpn {
            output.put_bytes(0, RD_LENGTH);
        }
        output.put_slice(octets);
    };
    match next_hop {
        NextHopAddress::Ipv4(addr) => put_address(&addr.octets()),
        NextHopAddress::Ipv6(addr) => put_address(&addr.octets()),
        NextHopAddress::Ipv6LinkLocal(global, local) => {
            put_address(&global.octets());
            put_address(&local.octets());
        }
    }
    output.freeze()
}
