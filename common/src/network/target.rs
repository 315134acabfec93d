//! # Scan Target Model
//!
//! A target is what the user asks `arpr` to resolve or watch:
//! * A single IPv4 address (e.g. `10.0.0.5`).
//! * A CIDR block (e.g. `192.168.1.0/24`), expanded to its usable hosts.

use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

use pnet::ipnetwork::Ipv4Network;

use crate::error::AddressError;
use crate::network::range;
use crate::validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Host { target_addr: Ipv4Addr },
    Network { ipv4_net: Ipv4Network },
}

impl FromStr for Target {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('/') {
            Some((ip_str, prefix_str)) => parse_cidr(s, ip_str, prefix_str),
            None => validate::parse_ip(s).map(|target_addr| Target::Host { target_addr }),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Host { target_addr } => write!(f, "{target_addr}"),
            Target::Network { ipv4_net } => write!(f, "{}/{}", ipv4_net.network(), ipv4_net.prefix()),
        }
    }
}

impl Target {
    /// Every address a probe should be sent to, in ascending order.
    pub fn addresses(&self) -> Vec<Ipv4Addr> {
        match self {
            Target::Host { target_addr } => vec![*target_addr],
            Target::Network { ipv4_net } => range::host_range(*ipv4_net).to_iter().collect(),
        }
    }

    /// Whether `addr` falls inside this target.
    ///
    /// A network matches every address of the block, including network and
    /// broadcast, which is how `dst net` capture filters behave.
    pub fn contains(&self, addr: Ipv4Addr) -> bool {
        match self {
            Target::Host { target_addr } => *target_addr == addr,
            Target::Network { ipv4_net } => ipv4_net.contains(addr),
        }
    }
}

fn parse_cidr(input: &str, ip_str: &str, prefix_str: &str) -> Result<Target, AddressError> {
    let network_error = |reason: String| AddressError::Network {
        input: input.to_string(),
        reason,
    };

    let ipv4_addr: Ipv4Addr =
        validate::parse_ip(ip_str).map_err(|e| network_error(e.to_string()))?;

    if prefix_str.is_empty() || !prefix_str.bytes().all(|b| b.is_ascii_digit()) {
        return Err(network_error(format!("prefix '{prefix_str}' is not a number")));
    }
    let prefix: u8 = prefix_str
        .parse()
        .map_err(|_| network_error(format!("prefix '{prefix_str}' is out of range")))?;

    let ipv4_net = Ipv4Network::new(ipv4_addr, prefix).map_err(|e| network_error(e.to_string()))?;
    Ok(Target::Network { ipv4_net })
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
