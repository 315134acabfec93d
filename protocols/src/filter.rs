use std::fmt;
use std::net::Ipv4Addr;

use pnet::ipnetwork::Ipv4Network;
use pnet::packet::ethernet::EtherTypes;

use crate::arp;
use crate::ethernet::LinkFrame;

/// Which frames a capture hands to its consumer.
///
/// Renders as the equivalent BPF expression so logs read like a `tcpdump`
/// invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureFilter {
    /// `arp`
    Arp,
    /// `arp and dst net <net>`: the ARP target protocol address lies in `net`.
    ArpToNetwork(Ipv4Network),
}

impl CaptureFilter {
    pub fn to_host(addr: Ipv4Addr) -> Self {
        // A /32 is always a valid prefix.
        CaptureFilter::ArpToNetwork(Ipv4Network::from(addr))
    }

    pub fn matches(&self, frame: &LinkFrame) -> bool {
        match self {
            CaptureFilter::Arp => frame
                .header()
                .is_ok_and(|eth| eth.get_ethertype() == EtherTypes::Arp),
            CaptureFilter::ArpToNetwork(net) => {
                arp::decode(frame).is_ok_and(|arp| net.contains(arp.target_ip()))
            }
        }
    }
}

impl fmt::Display for CaptureFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureFilter::Arp => write!(f, "arp"),
            CaptureFilter::ArpToNetwork(net) if net.prefix() == 32 => {
                write!(f, "arp and dst net {}", net.ip())
            }
            CaptureFilter::ArpToNetwork(net) => {
                write!(f, "arp and dst net {}/{}", net.network(), net.prefix())
            }
        }
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
