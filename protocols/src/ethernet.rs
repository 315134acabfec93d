use pnet::packet::ethernet::{EtherType, EthernetPacket, MutableEthernetPacket};
use pnet::util::MacAddr;

use crate::error::{DecodeError, EncodeError};

pub const ETH_HDR_LEN: usize = 14;
pub const MIN_ETH_FRAME_NO_FCS: usize = 60;

/// An owned link-layer frame as it travels on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkFrame(Vec<u8>);

impl LinkFrame {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    /// Ethernet header view, if the frame is long enough to carry one.
    pub fn header(&self) -> Result<EthernetPacket<'_>, DecodeError> {
        EthernetPacket::new(&self.0).ok_or(DecodeError::Truncated {
            layer: "Ethernet",
            len: self.0.len(),
        })
    }
}

impl From<Vec<u8>> for LinkFrame {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<&[u8]> for LinkFrame {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl AsRef<[u8]> for LinkFrame {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

pub fn make_header(
    buffer: &mut [u8],
    src_mac: MacAddr,
    dst_mac: MacAddr,
    et: EtherType,
) -> Result<(), EncodeError> {
    let len: usize = buffer.len();
    let mut eth = MutableEthernetPacket::new(buffer).ok_or(EncodeError::Buffer {
        layer: "Ethernet",
        len,
    })?;

    eth.set_source(src_mac);
    eth.set_destination(dst_mac);
    eth.set_ethertype(et);

    Ok(())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
