use std::net::Ipv4Addr;

use pnet::ipnetwork::Ipv4Network;

/// An inclusive span of IPv4 addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ipv4Range {
    pub start_addr: Ipv4Addr,
    pub end_addr: Ipv4Addr,
}

impl Ipv4Range {
    pub fn new(start_addr: Ipv4Addr, end_addr: Ipv4Addr) -> Self {
        Self {
            start_addr,
            end_addr,
        }
    }

    pub fn to_iter(&self) -> impl Iterator<Item = Ipv4Addr> + use<> {
        let start: u32 = self.start_addr.into();
        let end: u32 = self.end_addr.into();
        (start..=end).map(Ipv4Addr::from)
    }
}

/// Usable host range of a CIDR block.
///
/// Network and broadcast addresses are stripped unless the block is a /31 or
/// /32, where every address is a host.
pub fn host_range(network: Ipv4Network) -> Ipv4Range {
    let net_u32: u32 = network.network().into();
    let broadcast_u32: u32 = network.broadcast().into();

    if network.prefix() >= 31 {
        return Ipv4Range::new(network.network(), network.broadcast());
    }

    Ipv4Range::new(
        Ipv4Addr::from(net_u32.saturating_add(1)),
        Ipv4Addr::from(broadcast_u32.saturating_sub(1)),
    )
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
