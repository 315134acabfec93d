use std::io;
use std::time::{Duration, Instant};

use arpr_protocols::{CaptureFilter, LinkFrame};
use pnet::datalink::{self, Channel, Config, DataLinkReceiver, DataLinkSender, NetworkInterface};
use tracing::{debug, trace};

use crate::error::TransportError;
use crate::stop::StopToken;
use crate::transport::LinkTransport;

const READ_TIMEOUT: Duration = Duration::from_millis(50);

/// Raw Ethernet channel on one interface, exclusively owned for the
/// lifetime of a single mode and released on drop.
pub struct PnetTransport {
    interface: NetworkInterface,
    tx: Box<dyn DataLinkSender>,
    rx: Box<dyn DataLinkReceiver>,
}

impl PnetTransport {
    pub fn open(interface: NetworkInterface) -> Result<Self, TransportError> {
        Self::open_with(interface, datalink::channel)
    }

    pub fn open_with<F>(interface: NetworkInterface, channel_opener: F) -> Result<Self, TransportError>
    where
        F: FnOnce(&NetworkInterface, Config) -> io::Result<Channel>,
    {
        let (tx, rx) = open_eth_channel(&interface, &get_config(), channel_opener)?;
        debug!("Link-layer channel open on {}", interface.name);
        Ok(Self { interface, tx, rx })
    }

    pub fn interface(&self) -> &NetworkInterface {
        &self.interface
    }

    /// Next frame off the wire, or `None` when the read timed out.
    fn next_frame(&mut self) -> Result<Option<LinkFrame>, TransportError> {
        match self.rx.next() {
            Ok(bytes) => Ok(Some(LinkFrame::from(bytes))),
            Err(e) if is_idle(&e) => Ok(None),
            Err(e) => Err(TransportError::Receive(e)),
        }
    }
}

impl LinkTransport for PnetTransport {
    fn send(&mut self, frame: &LinkFrame) -> Result<(), TransportError> {
        trace!("Sending {} byte frame on {}", frame.len(), self.interface.name);
        match self.tx.send_to(frame.as_bytes(), None) {
            Some(Ok(())) => Ok(()),
            Some(Err(e)) => Err(TransportError::Send(e)),
            None => Err(TransportError::SendUnavailable(self.interface.name.clone())),
        }
    }

    fn sniff(
        &mut self,
        filter: &CaptureFilter,
        stop: &StopToken,
        on_frame: &mut dyn FnMut(&LinkFrame),
    ) -> Result<(), TransportError> {
        debug!("Capturing on {} with filter '{filter}'", self.interface.name);
        while !stop.is_cancelled() {
            if let Some(frame) = self.next_frame()? {
                if filter.matches(&frame) {
                    on_frame(&frame);
                }
            }
        }
        Ok(())
    }

    fn send_and_collect(
        &mut self,
        requests: &[LinkFrame],
        timeout: Duration,
    ) -> Result<Vec<LinkFrame>, TransportError> {
        for request in requests {
            self.send(request)?;
        }

        let mut frames: Vec<LinkFrame> = Vec::new();
        let deadline = Instant::now() + timeout;
        while deadline > Instant::now() {
            if let Some(frame) = self.next_frame()? {
                if CaptureFilter::Arp.matches(&frame) {
                    frames.push(frame);
                }
            }
        }
        debug!("Collected {} ARP frame(s) in {:?}", frames.len(), timeout);
        Ok(frames)
    }
}

fn open_eth_channel<F>(
    intf: &NetworkInterface,
    cfg: &Config,
    channel_opener: F,
) -> Result<(Box<dyn DataLinkSender>, Box<dyn DataLinkReceiver>), TransportError>
where
    F: FnOnce(&NetworkInterface, Config) -> io::Result<Channel>,
{
    let ch: Channel = channel_opener(intf, *cfg).map_err(|source| TransportError::Open {
        interface: intf.name.clone(),
        source,
    })?;
    match ch {
        Channel::Ethernet(tx, rx) => Ok((tx, rx)),
        _ => Err(TransportError::NotEthernet(intf.name.clone())),
    }
}

fn get_config() -> Config {
    Config {
        read_timeout: Some(READ_TIMEOUT),
        ..Default::default()
    }
}

fn is_idle(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock | io::ErrorKind::Interrupted
    )
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
