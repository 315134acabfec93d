pub mod query;
pub mod sniff;
pub mod spoof;

use std::ffi::OsString;
use std::net::Ipv4Addr;
use std::time::Duration;

use anyhow::Context;
use arpr_common::config::{self, Config};
use arpr_common::network::interface;
use arpr_common::validate;
use arpr_core::StopToken;
use arpr_core::network::channel::PnetTransport;
use clap::error::ErrorKind;
use clap::{ArgAction, CommandFactory, Parser};
use pnet::datalink::NetworkInterface;
use pnet::util::MacAddr;
use tracing::info;

const USAGE: &str = "arpr -l -a
       arpr -l <IP|CIDR>
       arpr -q <IP>
       arpr <MAC> <IP>";

const AFTER_HELP: &str = "Modes:
  -l -a            Sniff all ARP traffic
  -l <IP|CIDR>     Sniff ARP traffic destined to <IP|CIDR>
  -q <IP>          Query <IP> and print its MAC address
  <MAC> <IP>       Spoof: claim <IP> is at <MAC>";

#[derive(Parser, Debug)]
#[command(name = "arpr", version)]
#[command(about = "ARP reconnaissance and spoofing for the local network.")]
#[command(override_usage = USAGE, after_help = AFTER_HELP)]
pub struct CommandLine {
    /// Listen for ARP traffic
    #[arg(short = 'l', long = "listen")]
    pub listen: bool,
    /// With -l, capture every ARP frame
    #[arg(short = 'a', long = "all", requires = "listen")]
    pub all: bool,
    /// Query a single address
    #[arg(short = 'q', long = "query")]
    pub query: bool,
    #[arg(value_name = "ADDR")]
    pub addresses: Vec<String>,

    /// Interface to use instead of the auto-detected LAN interface
    #[arg(short = 'i', long = "iface")]
    pub iface: Option<String>,
    /// Gateway address impersonated by forged replies
    #[arg(short = 'g', long, value_parser = validate::parse_ip)]
    pub gateway: Option<Ipv4Addr>,
    /// Milliseconds to wait for replies
    #[arg(long, value_name = "MS", default_value_t = config::DEFAULT_SCAN_TIMEOUT.as_millis() as u64)]
    pub timeout: u64,
    /// Requests sent by the query burst
    #[arg(long, default_value_t = config::DEFAULT_BURST_COUNT)]
    pub count: usize,
    /// Milliseconds between burst requests
    #[arg(long, value_name = "MS", default_value_t = config::DEFAULT_BURST_INTERVAL.as_millis() as u64)]
    pub interval: u64,
    /// Sender MAC of the query burst
    #[arg(long, value_parser = validate::parse_mac)]
    pub source_mac: Option<MacAddr>,
    /// Do not look up the victim's real MAC after spoofing
    #[arg(long)]
    pub no_resolve: bool,
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,
}

/// The four mutually exclusive operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    SniffAll,
    SniffFiltered { target: String },
    Query { ip: String },
    Spoof { mac: String, ip: String },
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse_from(normalize_args(std::env::args_os()))
    }

    /// Maps the flag/positional shape onto a [`Mode`].
    ///
    /// Anything outside the four documented shapes is a usage error.
    pub fn mode(&self) -> Result<Mode, clap::Error> {
        let addresses: Vec<&str> = self.addresses.iter().map(String::as_str).collect();
        match (self.listen, self.all, self.query, addresses.as_slice()) {
            (true, true, false, []) => Ok(Mode::SniffAll),
            (true, false, false, [target]) => {
                validate::parse_target(target).map_err(invalid_value)?;
                Ok(Mode::SniffFiltered {
                    target: target.to_string(),
                })
            }
            (false, false, true, [ip]) => {
                validate::parse_ip(ip).map_err(invalid_value)?;
                Ok(Mode::Query { ip: ip.to_string() })
            }
            (false, false, false, [mac, ip]) => {
                validate::parse_mac(mac).map_err(invalid_value)?;
                validate::parse_ip(ip).map_err(invalid_value)?;
                Ok(Mode::Spoof {
                    mac: mac.to_string(),
                    ip: ip.to_string(),
                })
            }
            _ => Err(Self::command().error(
                ErrorKind::MissingRequiredArgument,
                "arguments match none of the supported modes",
            )),
        }
    }

    pub fn config(&self) -> Config {
        Config {
            interface: self.iface.clone(),
            gateway: self.gateway,
            source_mac: self.source_mac,
            scan_timeout: Duration::from_millis(self.timeout),
            burst_count: self.count,
            burst_interval: Duration::from_millis(self.interval),
            resolve_victim: !self.no_resolve,
        }
    }
}

/// Accepts the single-dash `-help` spelling alongside clap's own flags.
pub fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .map(|arg| if arg == "-help" { OsString::from("--help") } else { arg })
        .collect()
}

fn invalid_value(e: impl std::fmt::Display) -> clap::Error {
    CommandLine::command().error(ErrorKind::InvalidValue, e)
}

/// Runs the selected mode to completion on the calling thread.
pub fn run(mode: Mode, cfg: &Config, stop: &StopToken) -> anyhow::Result<()> {
    match mode {
        Mode::SniffAll => sniff::sniff(None, cfg, stop),
        Mode::SniffFiltered { target } => sniff::sniff(Some(&target), cfg, stop),
        Mode::Query { ip } => query::query(&ip, cfg, stop),
        Mode::Spoof { mac, ip } => spoof::spoof(&mac, &ip, cfg),
    }
}

/// Picks the interface and opens a raw channel on it.
pub(crate) fn open_link(cfg: &Config) -> anyhow::Result<(NetworkInterface, PnetTransport)> {
    let interface: NetworkInterface = interface::get_lan_interface(cfg.interface.as_deref())?;
    info!("Using interface {}", interface.name);
    let transport = PnetTransport::open(interface.clone())
        .with_context(|| format!("cannot capture on {}", interface.name))?;
    Ok((interface, transport))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
