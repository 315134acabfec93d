use std::time::Instant;

use arpr_common::config::Config;
use arpr_core::StopToken;
use arpr_core::sniffer::{self, PacketSniffer, SniffStats};
use colored::*;

use super::open_link;
use crate::terminal::{colors, print, spinner};

pub fn sniff(target: Option<&str>, cfg: &Config, stop: &StopToken) -> anyhow::Result<()> {
    let (_, transport) = open_link(cfg)?;
    let mut sniffer = PacketSniffer::new(transport);

    print::header("listening for arp traffic");
    spinner::start("Listening... press Ctrl-C to stop");
    let start_time: Instant = Instant::now();
    let result = match target {
        None => sniffer.sniff_all(stop, sniffer::report),
        Some(target) => sniffer.sniff_filtered(target, stop, sniffer::report),
    };
    spinner::finish();

    print_summary(&result?, start_time);
    Ok(())
}

fn print_summary(stats: &SniffStats, start_time: Instant) {
    let requests: ColoredString = format!("{} requests", stats.requests).bold().green();
    let replies: ColoredString = format!("{} replies", stats.replies).bold().green();
    let elapsed: ColoredString = format!("{:.2}s", start_time.elapsed().as_secs_f64())
        .bold()
        .yellow();

    print::fat_separator();
    print::print_status(format!("Captured {requests} and {replies} in {elapsed}"));
    if stats.skipped > 0 {
        print::print_status(
            format!("{} malformed frame(s) skipped", stats.skipped)
                .color(colors::SEPARATOR)
                .to_string(),
        );
    }
}
