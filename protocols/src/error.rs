use thiserror::Error;

/// A received frame that cannot be read as Ethernet/IPv4 ARP.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("truncated or invalid {layer} header (len {len})")]
    Truncated { layer: &'static str, len: usize },
    #[error("not an ARP frame (ethertype 0x{0:04x})")]
    NotArp(u16),
    #[error(
        "unsupported ARP addressing (htype {hw_type}, ptype 0x{proto_type:04x}, hlen {hw_len}, plen {proto_len})"
    )]
    UnsupportedAddressing {
        hw_type: u16,
        proto_type: u16,
        hw_len: u8,
        proto_len: u8,
    },
    #[error("unknown ARP operation {0}")]
    UnknownOperation(u16),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    #[error("buffer too small for {layer} header (len {len})")]
    Buffer { layer: &'static str, len: usize },
}
