use std::net::Ipv4Addr;

use pnet::datalink::NetworkInterface;
use pnet::ipnetwork::{IpNetwork, Ipv4Network};
use pnet::util::MacAddr;

use crate::network::interface::InterfaceError;

/// Identity the local host uses as the sender of ARP requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SenderConfig {
    pub local_mac: MacAddr,
    pub ipv4_net: Ipv4Network,
}

impl TryFrom<&NetworkInterface> for SenderConfig {
    type Error = InterfaceError;

    fn try_from(interface: &NetworkInterface) -> Result<Self, Self::Error> {
        let local_mac: MacAddr = interface
            .mac
            .filter(|mac| *mac != MacAddr::zero())
            .ok_or_else(|| InterfaceError::NoMacAddress(interface.name.clone()))?;

        let ipv4_net: Ipv4Network = interface
            .ips
            .iter()
            .find_map(|net| match net {
                IpNetwork::V4(v4) if !v4.ip().is_loopback() => Some(*v4),
                _ => None,
            })
            .ok_or_else(|| InterfaceError::NoIpv4Address(interface.name.clone()))?;

        Ok(Self {
            local_mac,
            ipv4_net,
        })
    }
}

impl SenderConfig {
    pub fn new(local_mac: MacAddr, ipv4_net: Ipv4Network) -> Self {
        Self {
            local_mac,
            ipv4_net,
        }
    }

    pub fn local_ip(&self) -> Ipv4Addr {
        self.ipv4_net.ip()
    }

    /// Same identity with a different sender MAC, used for the query burst.
    pub fn with_mac(self, local_mac: MacAddr) -> Self {
        Self { local_mac, ..self }
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
