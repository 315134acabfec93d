//! The ARP engine behind `arpr`.
//!
//! Three operations are built on top of a [`transport::LinkTransport`]:
//! * [`scanner::HostScanner`] resolves addresses to MACs by broadcasting requests.
//! * [`sniffer::PacketSniffer`] watches ARP traffic until told to stop.
//! * [`spoofer::Spoofer`] injects a forged reply binding an address to a chosen MAC.
//!
//! [`network::channel::PnetTransport`] is the raw-socket transport used by the binary.

pub mod error;
pub mod network;
pub mod scanner;
pub mod sniffer;
pub mod spoofer;
pub mod stop;
pub mod transport;

pub use error::{Error, Result, TransportError};
pub use stop::StopToken;
pub use transport::LinkTransport;
