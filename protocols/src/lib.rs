//! Ethernet + ARP framing for `arpr`.
//!
//! Frames are built with `pnet`'s mutable packet views and decoded back into
//! plain [`ArpFrame`] values that the rest of the workspace passes around.

pub mod arp;
pub mod error;
pub mod ethernet;
pub mod filter;

pub use arp::{ArpFrame, Operation};
pub use error::{DecodeError, EncodeError};
pub use ethernet::LinkFrame;
pub use filter::CaptureFilter;
