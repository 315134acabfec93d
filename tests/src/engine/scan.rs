#![cfg(test)]
use std::time::{Duration, Instant};

use arpr_common::config::Config;
use arpr_common::network::sender::SenderConfig;
use arpr_core::scanner::{HostRecord, HostScanner};
use arpr_core::{Error, StopToken};
use arpr_protocols::arp;
use pnet::util::MacAddr;

use crate::support::{Broken, LOCAL_MAC, Segment, Silent, ip, mac};

fn sender() -> SenderConfig {
    SenderConfig::new(LOCAL_MAC, "10.0.0.2/24".parse().unwrap())
}

fn fast_config() -> Config {
    Config {
        scan_timeout: Duration::from_millis(50),
        burst_count: 4,
        burst_interval: Duration::ZERO,
        ..Config::default()
    }
}

#[test]
fn scan_finds_the_single_responder() {
    let segment = Segment::default().with_host("10.0.0.5", "aa:bb:cc:dd:ee:ff");
    let mut scanner = HostScanner::new(segment, sender(), &fast_config());

    let hosts: Vec<HostRecord> = scanner.scan("10.0.0.5").unwrap();

    assert_eq!(
        hosts,
        vec![HostRecord {
            ip: ip("10.0.0.5"),
            mac: mac("aa:bb:cc:dd:ee:ff"),
        }]
    );

    let segment = scanner.into_transport();
    assert_eq!(segment.requests_seen.len(), 1);
    let request = arp::decode(&segment.requests_seen[0]).unwrap();
    assert!(request.is_request());
    assert_eq!(request.sender_mac(), LOCAL_MAC);
    assert_eq!(request.sender_ip(), ip("10.0.0.2"));
    assert_eq!(request.target_mac(), MacAddr::broadcast());
    assert_eq!(
        segment.requests_seen[0].header().unwrap().get_destination(),
        MacAddr::broadcast()
    );
}

#[test]
fn scan_without_responder_is_empty_and_bounded() {
    let mut scanner = HostScanner::new(Silent::default(), sender(), &fast_config());
    let start = Instant::now();
    let hosts = scanner.scan("10.0.0.5").unwrap();
    assert!(hosts.is_empty());
    assert!(start.elapsed() < Duration::from_secs(2));
}

#[test]
fn scan_of_a_subnet_reports_each_host_once() {
    let segment = Segment::default()
        .with_host("192.168.1.10", "00:11:22:33:44:55")
        .with_host("192.168.1.20", "66:77:88:99:aa:bb")
        .with_host("192.168.1.20", "66:77:88:99:aa:bb");
    let sender = SenderConfig::new(LOCAL_MAC, "192.168.1.2/24".parse().unwrap());
    let mut scanner = HostScanner::new(segment, sender, &fast_config());

    let hosts = scanner.scan("192.168.1.0/24").unwrap();

    assert_eq!(
        hosts.iter().map(|h| h.ip).collect::<Vec<_>>(),
        vec![ip("192.168.1.10"), ip("192.168.1.20")]
    );
    assert_eq!(scanner.into_transport().requests_seen.len(), 254);
}

#[test]
fn malformed_targets_are_rejected_up_front() {
    for target in ["256.1.1.1", "1.2.3", "1.2.3.4.5", "10.0.0.0/33", "host", "0.0.0.0/0"] {
        let mut scanner = HostScanner::new(Segment::default(), sender(), &fast_config());
        let err = scanner.scan(target).unwrap_err();
        assert!(matches!(err, Error::InvalidAddress(_)), "{target}: {err}");
        assert_eq!(scanner.into_transport().send_count(), 0, "{target}");
    }
}

#[test]
fn transport_failures_surface_to_the_caller() {
    let mut scanner = HostScanner::new(Broken, sender(), &fast_config());
    assert!(matches!(scanner.scan("10.0.0.5"), Err(Error::Transport(_))));
}

#[test]
fn query_sends_the_configured_burst_before_scanning() {
    let segment = Segment::default().with_host("10.0.0.5", "aa:bb:cc:dd:ee:ff");
    let mut scanner = HostScanner::new(segment, sender(), &fast_config());

    let hosts = scanner.query("10.0.0.5", &StopToken::new()).unwrap();
    assert_eq!(hosts.len(), 1);

    let segment = scanner.into_transport();
    assert_eq!(segment.sent.len(), 4);
    assert!(segment.sent.windows(2).all(|pair| pair[0] == pair[1]));
    assert_eq!(segment.collect_calls, 1);
}

#[test]
fn query_stops_when_interrupted() {
    let config = Config {
        burst_count: 1_000,
        burst_interval: Duration::from_secs(1),
        ..fast_config()
    };
    let stop = StopToken::new();
    let interrupt = stop.clone();
    let canceller = std::thread::spawn(move || {
        std::thread::sleep(Duration::from_millis(100));
        interrupt.cancel();
    });

    let mut scanner = HostScanner::new(Segment::default(), sender(), &config);
    let start = Instant::now();
    let hosts = scanner.query("10.0.0.5", &stop).unwrap();
    canceller.join().unwrap();

    assert!(hosts.is_empty());
    assert!(start.elapsed() < Duration::from_secs(5));
    let segment = scanner.into_transport();
    assert!(segment.sent.len() < 1_000);
    assert_eq!(segment.collect_calls, 0);
}
