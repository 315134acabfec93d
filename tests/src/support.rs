#![cfg(test)]
//! Simulated segments standing in for a raw Ethernet channel.

use std::net::Ipv4Addr;
use std::time::{Duration, Instant};

use arpr_core::{LinkTransport, StopToken, TransportError};
use arpr_protocols::{CaptureFilter, LinkFrame, arp};
use pnet::util::MacAddr;

pub const LOCAL_MAC: MacAddr = MacAddr(0x02, 0x00, 0x00, 0x00, 0x00, 0x01);

pub fn mac(s: &str) -> MacAddr {
    s.parse().unwrap()
}

pub fn ip(s: &str) -> Ipv4Addr {
    s.parse().unwrap()
}

/// A segment where each configured host answers requests for its address.
#[derive(Default)]
pub struct Segment {
    hosts: Vec<(Ipv4Addr, MacAddr)>,
    /// Frames replayed to sniffers, in order.
    pub traffic: Vec<LinkFrame>,
    pub sent: Vec<LinkFrame>,
    pub requests_seen: Vec<LinkFrame>,
    pub collect_calls: usize,
}

impl Segment {
    pub fn with_host(mut self, addr: &str, hw: &str) -> Self {
        self.hosts.push((ip(addr), mac(hw)));
        self
    }

    pub fn with_traffic(mut self, frames: Vec<LinkFrame>) -> Self {
        self.traffic = frames;
        self
    }

    /// Every frame the engine put on the wire, collected or not.
    pub fn send_count(&self) -> usize {
        self.sent.len() + self.requests_seen.len()
    }

    fn answer(&self, request: &LinkFrame) -> Vec<LinkFrame> {
        let Ok(request) = arp::decode(request) else {
            return Vec::new();
        };
        if !request.is_request() {
            return Vec::new();
        }
        self.hosts
            .iter()
            .filter(|(addr, _)| *addr == request.target_ip())
            .map(|(addr, hw)| {
                let reply = arp::build_reply(*hw, *addr, request.sender_mac(), request.sender_ip());
                arp::encapsulate(&reply, request.sender_mac()).unwrap()
            })
            .collect()
    }
}

impl LinkTransport for Segment {
    fn send(&mut self, frame: &LinkFrame) -> Result<(), TransportError> {
        self.sent.push(frame.clone());
        Ok(())
    }

    fn sniff(
        &mut self,
        filter: &CaptureFilter,
        stop: &StopToken,
        on_frame: &mut dyn FnMut(&LinkFrame),
    ) -> Result<(), TransportError> {
        for frame in &self.traffic {
            if stop.is_cancelled() {
                return Ok(());
            }
            if filter.matches(frame) {
                on_frame(frame);
            }
        }
        // An idle segment: wait for cancellation like a real capture.
        while !stop.sleep(Duration::from_millis(10)) {}
        Ok(())
    }

    fn send_and_collect(
        &mut self,
        requests: &[LinkFrame],
        _timeout: Duration,
    ) -> Result<Vec<LinkFrame>, TransportError> {
        self.collect_calls += 1;
        self.requests_seen.extend_from_slice(requests);
        Ok(requests.iter().flat_map(|request| self.answer(request)).collect())
    }
}

/// Nobody answers; collection runs out the full timeout.
#[derive(Default)]
pub struct Silent {
    pub sent: usize,
}

impl LinkTransport for Silent {
    fn send(&mut self, _frame: &LinkFrame) -> Result<(), TransportError> {
        self.sent += 1;
        Ok(())
    }

    fn sniff(
        &mut self,
        _filter: &CaptureFilter,
        stop: &StopToken,
        _on_frame: &mut dyn FnMut(&LinkFrame),
    ) -> Result<(), TransportError> {
        while !stop.sleep(Duration::from_millis(10)) {}
        Ok(())
    }

    fn send_and_collect(
        &mut self,
        requests: &[LinkFrame],
        timeout: Duration,
    ) -> Result<Vec<LinkFrame>, TransportError> {
        self.sent += requests.len();
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(5));
        }
        Ok(Vec::new())
    }
}

/// A segment whose link is gone.
pub struct Broken;

impl LinkTransport for Broken {
    fn send(&mut self, _frame: &LinkFrame) -> Result<(), TransportError> {
        Err(TransportError::SendUnavailable("sim0".into()))
    }

    fn sniff(
        &mut self,
        _filter: &CaptureFilter,
        _stop: &StopToken,
        _on_frame: &mut dyn FnMut(&LinkFrame),
    ) -> Result<(), TransportError> {
        Err(TransportError::Receive(std::io::Error::other("link down")))
    }

    fn send_and_collect(
        &mut self,
        _requests: &[LinkFrame],
        _timeout: Duration,
    ) -> Result<Vec<LinkFrame>, TransportError> {
        Err(TransportError::SendUnavailable("sim0".into()))
    }
}
