use arpr_common::config::Config;
use arpr_common::network::sender::SenderConfig;
use arpr_core::StopToken;
use arpr_core::scanner::{HostRecord, HostScanner};
use tracing::warn;

use super::open_link;
use crate::terminal::format::{self, Detail};
use crate::terminal::{print, spinner};

pub fn query(ip: &str, cfg: &Config, stop: &StopToken) -> anyhow::Result<()> {
    let (interface, transport) = open_link(cfg)?;
    let sender: SenderConfig = SenderConfig::try_from(&interface)?;
    let mut scanner = HostScanner::new(transport, sender, cfg);

    print::header("querying host");
    spinner::start(format!("Asking the segment who has {ip}..."));
    let result = scanner.query(ip, stop);
    spinner::finish();
    let hosts: Vec<HostRecord> = result?;

    if hosts.is_empty() {
        warn!("No reply from {ip}");
        return Ok(());
    }

    print::header("query results");
    for (idx, host) in hosts.iter().enumerate() {
        print_host_tree(idx, host);
    }
    Ok(())
}

fn print_host_tree(idx: usize, host: &HostRecord) {
    print::tree_head(idx, host.ip);
    let mut details: Vec<Detail> = vec![format::mac_detail("MAC", host.mac)];
    if let Some(vendor_detail) = format::vendor_detail(host.mac) {
        details.push(vendor_detail);
    }
    print::as_tree_one_level(details);
}
