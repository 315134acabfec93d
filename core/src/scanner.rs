//! ARP host discovery.
//!
//! A scan broadcasts one "who has" request per target address and turns every
//! reply seen before the timeout into a [`HostRecord`]. Silence is not an
//! error: an absent host and a lost frame both yield an empty result.

use std::fmt;
use std::net::Ipv4Addr;
use std::time::Duration;

use arpr_common::config::Config;
use arpr_common::error::AddressError;
use arpr_common::network::sender::SenderConfig;
use arpr_common::network::target::Target;
use arpr_common::validate;
use arpr_protocols::{LinkFrame, arp};
use pnet::util::MacAddr;
use tracing::{debug, info};

use crate::error::Result;
use crate::stop::StopToken;
use crate::transport::LinkTransport;

/// An `(ip, mac)` binding learned from a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HostRecord {
    pub ip: Ipv4Addr,
    pub mac: MacAddr,
}

impl fmt::Display for HostRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} is at {}", self.ip, self.mac)
    }
}

/// Shortest prefix a scan accepts; a /16 already means 65534 requests.
pub const MIN_SCAN_PREFIX: u8 = 16;

/// Distinct bindings in the order their first reply arrived.
pub type ScanResult = Vec<HostRecord>;

pub struct HostScanner<T: LinkTransport> {
    transport: T,
    sender: SenderConfig,
    timeout: Duration,
    burst_count: usize,
    burst_interval: Duration,
    source_mac: Option<MacAddr>,
}

impl<T: LinkTransport> HostScanner<T> {
    pub fn new(transport: T, sender: SenderConfig, config: &Config) -> Self {
        Self {
            transport,
            sender,
            timeout: config.scan_timeout,
            burst_count: config.burst_count,
            burst_interval: config.burst_interval,
            source_mac: config.source_mac,
        }
    }

    /// Resolves an IPv4 address or every host of a CIDR block.
    pub fn scan(&mut self, target: &str) -> Result<ScanResult> {
        let target: Target = validate::parse_target(target)?;
        self.scan_target(&target)
    }

    pub fn scan_target(&mut self, target: &Target) -> Result<ScanResult> {
        resolve(&mut self.transport, &self.sender, target, self.timeout)
    }

    /// Floods the segment with requests for `ip`, then resolves it once and
    /// reports what answered.
    ///
    /// The burst only raises the odds of a reply on a lossy segment; its
    /// count and spacing come from [`Config`]. Cancelling `stop` cuts the
    /// burst short and skips the final scan.
    pub fn query(&mut self, ip: &str, stop: &StopToken) -> Result<ScanResult> {
        let target_addr: Ipv4Addr = validate::parse_ip(ip)?;

        let burst_sender = match self.source_mac {
            Some(mac) => self.sender.with_mac(mac),
            None => self.sender,
        };
        let request = arp::build_request(
            burst_sender.local_mac,
            burst_sender.local_ip(),
            target_addr,
        );
        let frame: LinkFrame = arp::encapsulate(&request, MacAddr::broadcast())?;

        info!(
            "Sending {} request(s) for {target_addr} every {:?}",
            self.burst_count, self.burst_interval
        );
        let sent: usize =
            self.transport
                .send_repeated(&frame, self.burst_interval, self.burst_count, stop)?;
        debug!("Burst finished after {sent} frame(s)");

        if stop.is_cancelled() {
            return Ok(Vec::new());
        }

        let hosts = self.scan_target(&Target::Host { target_addr })?;
        for host in &hosts {
            info!("MAC address of {} is {}", host.ip, host.mac);
        }
        Ok(hosts)
    }

    pub fn into_transport(self) -> T {
        self.transport
    }
}

/// Broadcasts a request for every address of `target` and gathers the replies.
///
/// Blocks wider than [`MIN_SCAN_PREFIX`] are rejected before anything is built.
pub fn resolve<T: LinkTransport + ?Sized>(
    transport: &mut T,
    sender: &SenderConfig,
    target: &Target,
    timeout: Duration,
) -> Result<ScanResult> {
    if let Target::Network { ipv4_net } = target {
        if ipv4_net.prefix() < MIN_SCAN_PREFIX {
            return Err(AddressError::Network {
                input: target.to_string(),
                reason: format!("block too large to scan (shorter than /{MIN_SCAN_PREFIX})"),
            }
            .into());
        }
    }

    let requests: Vec<LinkFrame> = target
        .addresses()
        .into_iter()
        .map(|addr| {
            let request = arp::build_request(sender.local_mac, sender.local_ip(), addr);
            arp::encapsulate(&request, MacAddr::broadcast())
        })
        .collect::<std::result::Result<_, _>>()?;

    debug!("Scanning {target} with {} request(s)", requests.len());
    let frames: Vec<LinkFrame> = transport.send_and_collect(&requests, timeout)?;
    Ok(collect_hosts(&frames, target))
}

fn collect_hosts(frames: &[LinkFrame], target: &Target) -> ScanResult {
    let mut hosts: ScanResult = Vec::new();
    for frame in frames {
        let reply = match arp::decode(frame) {
            Ok(reply) if reply.is_reply() => reply,
            Ok(_) => continue,
            Err(e) => {
                debug!("Skipping frame: {e}");
                continue;
            }
        };
        if !target.contains(reply.sender_ip()) {
            continue;
        }
        let record = HostRecord {
            ip: reply.sender_ip(),
            mac: reply.sender_mac(),
        };
        if !hosts.contains(&record) {
            hosts.push(record);
        }
    }
    hosts
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
