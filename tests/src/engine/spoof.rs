#![cfg(test)]
use std::time::Duration;

use arpr_common::config::Config;
use arpr_common::network::sender::SenderConfig;
use arpr_core::Error;
use arpr_core::spoofer::Spoofer;
use arpr_protocols::arp;
use pnet::util::MacAddr;

use crate::support::{Broken, LOCAL_MAC, Segment, ip, mac};

fn config(gateway: Option<&str>) -> Config {
    Config {
        gateway: gateway.map(ip),
        scan_timeout: Duration::from_millis(50),
        ..Config::default()
    }
}

fn resolver() -> SenderConfig {
    SenderConfig::new(LOCAL_MAC, "10.0.0.2/24".parse().unwrap())
}

#[test]
fn invalid_mac_sends_nothing() {
    let mut spoofer = Spoofer::new(Segment::default(), &config(None)).with_resolver(resolver());
    let err = spoofer.spoof("not-a-mac", "10.0.0.5").unwrap_err();
    assert!(matches!(err, Error::InvalidAddress(_)));
    assert_eq!(spoofer.into_transport().send_count(), 0);
}

#[test]
fn invalid_ip_sends_nothing() {
    let mut spoofer = Spoofer::new(Segment::default(), &config(None)).with_resolver(resolver());
    assert!(spoofer.spoof("74:d0:2b:9a:3f:63", "10.0.0").is_err());
    assert_eq!(spoofer.into_transport().send_count(), 0);
}

#[test]
fn forged_reply_claims_the_victim_address() {
    let segment = Segment::default().with_host("10.0.0.5", "aa:bb:cc:dd:ee:ff");
    let mut spoofer = Spoofer::new(segment, &config(Some("10.0.0.1"))).with_resolver(resolver());

    let report = spoofer.spoof("74:d0:2b:9a:3f:63", "10.0.0.5").unwrap();
    assert_eq!(report.victim_mac, Some(mac("aa:bb:cc:dd:ee:ff")));

    let segment = spoofer.into_transport();
    assert_eq!(segment.sent.len(), 1);
    let wire = &segment.sent[0];
    assert_eq!(wire.header().unwrap().get_destination(), MacAddr::broadcast());

    let forged = arp::decode(wire).unwrap();
    assert!(forged.is_reply());
    assert_eq!(forged.sender_mac(), mac("74:d0:2b:9a:3f:63"));
    assert_eq!(forged.sender_ip(), ip("10.0.0.5"));
    assert_eq!(forged.target_mac(), MacAddr::broadcast());
    assert_eq!(forged.target_ip(), ip("10.0.0.1"));
}

#[test]
fn unresolvable_victim_still_gets_spoofed() {
    let mut spoofer = Spoofer::new(Segment::default(), &config(None)).with_resolver(resolver());
    let report = spoofer.spoof("74-d0-2b-9a-3f-63", "10.0.0.9").unwrap();
    assert_eq!(report.victim_mac, None);
    assert_eq!(report.frame.target_ip(), ip("0.0.0.0"));
    assert_eq!(spoofer.into_transport().sent.len(), 1);
}

#[test]
fn lookup_is_skipped_when_disabled() {
    let cfg = Config {
        resolve_victim: false,
        ..config(None)
    };
    let segment = Segment::default().with_host("10.0.0.5", "aa:bb:cc:dd:ee:ff");
    let mut spoofer = Spoofer::new(segment, &cfg).with_resolver(resolver());
    let report = spoofer.spoof("74:d0:2b:9a:3f:63", "10.0.0.5").unwrap();
    assert_eq!(report.victim_mac, None);
    assert_eq!(spoofer.into_transport().collect_calls, 0);
}

#[test]
fn send_failure_is_reported() {
    let mut spoofer = Spoofer::new(Broken, &config(None));
    let err = spoofer.spoof("74:d0:2b:9a:3f:63", "10.0.0.5").unwrap_err();
    assert!(matches!(err, Error::Transport(_)));
}
