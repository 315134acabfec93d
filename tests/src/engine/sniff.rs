#![cfg(test)]
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use arpr_core::sniffer::{self, PacketSniffer};
use arpr_core::{Error, StopToken};
use arpr_protocols::{ArpFrame, LinkFrame, arp};
use pnet::util::MacAddr;

use crate::support::{Broken, Segment, ip, mac};

fn who_has(target: &str, tell: &str) -> ArpFrame {
    arp::build_request(mac("00:11:22:33:44:55"), ip(tell), ip(target))
}

fn is_at(sender: &str, hw: &str) -> ArpFrame {
    arp::build_reply(mac(hw), ip(sender), mac("00:11:22:33:44:55"), ip("10.0.0.1"))
}

fn on_wire(frames: &[ArpFrame]) -> Vec<LinkFrame> {
    frames
        .iter()
        .map(|f| arp::encapsulate(f, MacAddr::broadcast()).unwrap())
        .collect()
}

/// Runs a capture on its own thread, stopping it once `expected` frames arrived.
fn capture(
    segment: Segment,
    target: Option<&'static str>,
    expected: usize,
) -> (Vec<ArpFrame>, arpr_core::Result<sniffer::SniffStats>) {
    let stop = StopToken::new();
    let (tx, rx) = mpsc::channel();
    let worker_stop = stop.clone();
    let worker = thread::spawn(move || {
        let mut sniffer = PacketSniffer::new(segment);
        let handler = |frame: &ArpFrame| {
            let _ = tx.send(*frame);
        };
        match target {
            None => sniffer.sniff_all(&worker_stop, handler),
            Some(target) => sniffer.sniff_filtered(target, &worker_stop, handler),
        }
    });

    let mut seen = Vec::new();
    while seen.len() < expected {
        match rx.recv_timeout(Duration::from_secs(5)) {
            Ok(frame) => seen.push(frame),
            Err(_) => break,
        }
    }
    stop.cancel();
    let result = worker.join().unwrap();
    (seen, result)
}

#[test]
fn sniff_all_sees_requests_and_replies_until_cancelled() {
    let traffic = vec![who_has("10.0.0.5", "10.0.0.1"), is_at("10.0.0.5", "aa:bb:cc:dd:ee:ff")];
    let segment = Segment::default().with_traffic(on_wire(&traffic));

    let (seen, result) = capture(segment, None, 2);

    assert_eq!(seen, traffic);
    let stats = result.unwrap();
    assert_eq!((stats.requests, stats.replies, stats.skipped), (1, 1, 0));
}

#[test]
fn sniff_filtered_keeps_only_frames_for_the_target() {
    let traffic = vec![
        who_has("10.0.0.6", "10.0.0.1"),
        who_has("10.0.0.5", "10.0.0.1"),
        who_has("10.0.0.7", "10.0.0.5"),
    ];
    let segment = Segment::default().with_traffic(on_wire(&traffic));

    let (seen, result) = capture(segment, Some("10.0.0.5"), 1);

    assert_eq!(seen, vec![traffic[1]]);
    assert_eq!(result.unwrap().requests, 1);
}

#[test]
fn sniff_filtered_accepts_a_network() {
    let traffic = vec![who_has("10.0.1.6", "10.0.0.1"), who_has("10.0.0.200", "10.0.0.1")];
    let segment = Segment::default().with_traffic(on_wire(&traffic));

    let (seen, _) = capture(segment, Some("10.0.0.0/24"), 1);

    assert_eq!(seen, vec![traffic[1]]);
}

#[test]
fn malformed_frames_are_skipped_without_stopping() {
    let good = on_wire(&[who_has("10.0.0.5", "10.0.0.1")]);
    let mut truncated = good[0].clone().into_bytes();
    truncated.truncate(20);
    let segment = Segment::default().with_traffic(vec![LinkFrame::from(truncated), good[0].clone()]);

    let (seen, result) = capture(segment, None, 1);

    assert_eq!(seen.len(), 1);
    assert_eq!(result.unwrap().skipped, 1);
}

#[test]
fn invalid_filter_address_is_rejected() {
    let mut sniffer = PacketSniffer::new(Segment::default());
    let err = sniffer
        .sniff_filtered("10.0.0.256", &StopToken::new(), sniffer::report)
        .unwrap_err();
    assert!(matches!(err, Error::InvalidAddress(_)));
}

#[test]
fn capture_errors_are_returned() {
    let mut sniffer = PacketSniffer::new(Broken);
    let err = sniffer.sniff_all(&StopToken::new(), |_| {}).unwrap_err();
    assert!(matches!(err, Error::Transport(_)));
}
