//! VPN-IPv4/VPN-IPv6 tables (SAFI 128). Route keys include the route distinguisher.
use crate::models::*;
use crate::rib::labeled_unicast::{LabeledFamily, LabeledRibSupport};

#[derive(Debug, Default, Clone, Copy)]
pub struct VpnIpv4;

#[derive(Debug, Default, Clone, Copy)]
pub struct VpnIpv6;

impl LabeledFamily for VpnIpv4 {
    const AFI: Afi = Afi::Ipv4;
    const SAFI: Safi = Safi::MplsVpn;
    const WITH_RD: bool = true;

    fn wrap(destinations: Vec<LabeledDestination>) -> Destinations {
        Destinations::Vpn(destinations)
    }
}

impl LabeledFamily for VpnIpv6 {
    const AFI: Afi = Afi::Ipv6;
    const SAFI: Safi = Safi::MplsVpn;
    const WITH_RD: bool = true;

    fn wrap(destinations: Vec<LabeledDestination>) -> Destinations {
        Destinations::Vpn(destinations)
    }
}

pub type VpnIpv4RibSupport = LabeledRibSupport<VpnIpv4>;
pub type VpnIpv6RibSupport = LabeledRibSupport<VpnIpv6>;
