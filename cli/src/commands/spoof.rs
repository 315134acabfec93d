use arpr_common::config::Config;
use arpr_common::network::sender::SenderConfig;
use arpr_core::spoofer::{SpoofReport, Spoofer};
use tracing::warn;

use super::open_link;
use crate::terminal::format::{self, Detail};
use crate::terminal::print;

pub fn spoof(mac: &str, ip: &str, cfg: &Config) -> anyhow::Result<()> {
    let (interface, transport) = open_link(cfg)?;
    let mut spoofer = Spoofer::new(transport, cfg);
    if cfg.resolve_victim {
        match SenderConfig::try_from(&interface) {
            Ok(sender) => spoofer = spoofer.with_resolver(sender),
            Err(e) => warn!("Victim lookup disabled: {e}"),
        }
    }

    print::header("sending forged reply");
    let report: SpoofReport = spoofer.spoof(mac, ip)?;
    print_report(&report);
    Ok(())
}

fn print_report(report: &SpoofReport) {
    let frame = &report.frame;
    print::tree_head(0, frame.sender_ip());
    let mut details: Vec<Detail> = vec![
        format::mac_detail("Claimed", frame.sender_mac()),
        format::ip_detail("Gateway", frame.target_ip()),
    ];
    if let Some(mac) = report.victim_mac {
        details.push(format::mac_detail("Real", mac));
        if let Some(vendor_detail) = format::vendor_detail(mac) {
            details.push(vendor_detail);
        }
    }
    print::as_tree_one_level(details);
}
