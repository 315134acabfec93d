use std::net::Ipv4Addr;
use std::time::Duration;

use pnet::util::MacAddr;

pub const DEFAULT_SCAN_TIMEOUT: Duration = Duration::from_secs(1);
pub const DEFAULT_BURST_COUNT: usize = 60;
pub const DEFAULT_BURST_INTERVAL: Duration = Duration::from_secs(1);

/// Runtime settings shared by the scanner, sniffer and spoofer.
///
/// Everything the protocol engine needs beyond its arguments lives here, so
/// demonstration values (a gateway, an attacker MAC) are passed in explicitly
/// instead of being baked into the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Interface to bind to. `None` picks the best LAN interface.
    pub interface: Option<String>,
    /// Address impersonated by forged replies.
    pub gateway: Option<Ipv4Addr>,
    /// Overrides the sender MAC of the query burst.
    pub source_mac: Option<MacAddr>,
    /// How long a scan keeps collecting replies.
    pub scan_timeout: Duration,
    pub burst_count: usize,
    pub burst_interval: Duration,
    /// Look up the victim's real MAC after a spoof.
    pub resolve_victim: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            interface: None,
            gateway: None,
            source_mac: None,
            scan_timeout: DEFAULT_SCAN_TIMEOUT,
            burst_count: DEFAULT_BURST_COUNT,
            burst_interval: DEFAULT_BURST_INTERVAL,
            resolve_victim: true,
        }
    }
}
