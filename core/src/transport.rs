//! The link-layer boundary of the engine.
//!
//! Everything above this trait deals in [`LinkFrame`]s and never touches a
//! socket. ARP offers no delivery guarantee, so sends are fire-and-forget.

use std::time::Duration;

use arpr_protocols::{CaptureFilter, LinkFrame};

use crate::error::TransportError;
use crate::stop::StopToken;

pub trait LinkTransport {
    /// Puts one frame on the wire.
    fn send(&mut self, frame: &LinkFrame) -> Result<(), TransportError>;

    /// Sends `count` copies of `frame`, `interval` apart.
    ///
    /// Stops early once `stop` is cancelled and returns how many copies went out.
    fn send_repeated(
        &mut self,
        frame: &LinkFrame,
        interval: Duration,
        count: usize,
        stop: &StopToken,
    ) -> Result<usize, TransportError> {
        let mut sent: usize = 0;
        while sent < count && !stop.is_cancelled() {
            self.send(frame)?;
            sent += 1;
            if sent < count && stop.sleep(interval) {
                break;
            }
        }
        Ok(sent)
    }

    /// Blocks, calling `on_frame` for every frame matching `filter`, until
    /// `stop` is cancelled.
    fn sniff(
        &mut self,
        filter: &CaptureFilter,
        stop: &StopToken,
        on_frame: &mut dyn FnMut(&LinkFrame),
    ) -> Result<(), TransportError>;

    /// Sends every request, then gathers the ARP frames seen until `timeout`
    /// elapses, in arrival order.
    fn send_and_collect(
        &mut self,
        requests: &[LinkFrame],
        timeout: Duration,
    ) -> Result<Vec<LinkFrame>, TransportError>;
}

impl<T: LinkTransport + ?Sized> LinkTransport for &mut T {
    fn send(&mut self, frame: &LinkFrame) -> Result<(), TransportError> {
        (**self).send(frame)
    }

    fn send_repeated(
        &mut self,
        frame: &LinkFrame,
        interval: Duration,
        count: usize,
        stop: &StopToken,
    ) -> Result<usize, TransportError> {
        (**self).send_repeated(frame, interval, count, stop)
    }

    fn sniff(
        &mut self,
        filter: &CaptureFilter,
        stop: &StopToken,
        on_frame: &mut dyn FnMut(&LinkFrame),
    ) -> Result<(), TransportError> {
        (**self).sniff(filter, stop, on_frame)
    }

    fn send_and_collect(
        &mut self,
        requests: &[LinkFrame],
        timeout: Duration,
    ) -> Result<Vec<LinkFrame>, TransportError> {
        (**self).send_and_collect(requests, timeout)
    }
}

impl<T: LinkTransport + ?Sized> LinkTransport for Box<T> {
    fn send(&mut self, frame: &LinkFrame) -> Result<(), TransportError> {
        (**self).send(frame)
    }

    fn send_repeated(
        &mut self,
        frame: &LinkFrame,
        interval: Duration,
        count: usize,
        stop: &StopToken,
    ) -> Result<usize, TransportError> {
        (**self).send_repeated(frame, interval, count, stop)
    }

    fn sniff(
        &mut self,
        filter: &CaptureFilter,
        stop: &StopToken,
        on_frame: &mut dyn FnMut(&LinkFrame),
    ) -> Result<(), TransportError> {
        (**self).sniff(filter, stop, on_frame)
    }

    fn send_and_collect(
        &mut self,
        requests: &[LinkFrame],
        timeout: Duration,
    ) -> Result<Vec<LinkFrame>, TransportError> {
        (**self).send_and_collect(requests, timeout)
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
