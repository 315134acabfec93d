//! Passive ARP monitoring. Nothing here ever writes to the wire.

use arpr_common::network::target::Target;
use arpr_common::validate;
use arpr_protocols::{ArpFrame, CaptureFilter, LinkFrame, arp};
use tracing::{debug, info};

use crate::error::Result;
use crate::stop::StopToken;
use crate::transport::LinkTransport;

/// What a capture saw, returned once it is stopped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SniffStats {
    pub requests: usize,
    pub replies: usize,
    /// Frames that passed the filter but did not decode as Ethernet/IPv4 ARP.
    pub skipped: usize,
}

pub struct PacketSniffer<T: LinkTransport> {
    transport: T,
}

impl<T: LinkTransport> PacketSniffer<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Hands every ARP frame on the segment to `on_arp` until `stop` is cancelled.
    pub fn sniff_all(
        &mut self,
        stop: &StopToken,
        on_arp: impl FnMut(&ArpFrame),
    ) -> Result<SniffStats> {
        self.run(&CaptureFilter::Arp, stop, on_arp)
    }

    /// Like [`sniff_all`](Self::sniff_all), restricted to frames whose target
    /// protocol address lies in `target` (an address or a CIDR block).
    pub fn sniff_filtered(
        &mut self,
        target: &str,
        stop: &StopToken,
        on_arp: impl FnMut(&ArpFrame),
    ) -> Result<SniffStats> {
        let filter = match validate::parse_target(target)? {
            Target::Host { target_addr } => CaptureFilter::to_host(target_addr),
            Target::Network { ipv4_net } => CaptureFilter::ArpToNetwork(ipv4_net),
        };
        self.run(&filter, stop, on_arp)
    }

    fn run(
        &mut self,
        filter: &CaptureFilter,
        stop: &StopToken,
        mut on_arp: impl FnMut(&ArpFrame),
    ) -> Result<SniffStats> {
        info!("Sniffing with filter '{filter}'");
        let mut stats = SniffStats::default();

        self.transport.sniff(filter, stop, &mut |frame: &LinkFrame| {
            match arp::decode(frame) {
                Ok(arp) => {
                    if arp.is_request() {
                        stats.requests += 1;
                    } else {
                        stats.replies += 1;
                    }
                    on_arp(&arp);
                }
                Err(e) => {
                    debug!("Skipping frame: {e}");
                    stats.skipped += 1;
                }
            }
        })?;

        debug!(
            "Capture stopped: {} request(s), {} reply(ies), {} skipped",
            stats.requests, stats.replies, stats.skipped
        );
        Ok(stats)
    }

    pub fn into_transport(self) -> T {
        self.transport
    }
}

/// The line reported for an observed frame.
pub fn describe(arp: &ArpFrame) -> String {
    if arp.is_request() {
        format!("who has {}? tell {}", arp.target_ip(), arp.sender_ip())
    } else {
        arp.summary()
    }
}

/// Default `on_arp` handler: logs each frame at info level.
pub fn report(arp: &ArpFrame) {
    info!("{}", describe(arp));
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
