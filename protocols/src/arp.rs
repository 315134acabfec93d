//! ARP frame model, builders and decoder.
//!
//! Only the Ethernet/IPv4 flavour of ARP is spoken: hardware type 1, protocol
//! type `0x0800`, 6 byte hardware and 4 byte protocol addresses.

use std::fmt;
use std::net::Ipv4Addr;

use pnet::packet::Packet;
use pnet::packet::arp::{ArpHardwareTypes, ArpOperation, ArpOperations, ArpPacket, MutableArpPacket};
use pnet::packet::ethernet::EtherTypes;
use pnet::util::MacAddr;

use crate::error::{DecodeError, EncodeError};
use crate::ethernet::{self, ETH_HDR_LEN, LinkFrame, MIN_ETH_FRAME_NO_FCS};

pub const ARP_LEN: usize = 28;

const HW_ADDR_LEN: u8 = 6;
const PROTO_ADDR_LEN: u8 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Request,
    Reply,
}

impl Operation {
    pub fn code(self) -> ArpOperation {
        match self {
            Operation::Request => ArpOperations::Request,
            Operation::Reply => ArpOperations::Reply,
        }
    }

    pub fn from_code(op: ArpOperation) -> Option<Self> {
        match op {
            ArpOperations::Request => Some(Operation::Request),
            ArpOperations::Reply => Some(Operation::Reply),
            _ => None,
        }
    }
}

/// A single ARP message. Immutable once built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArpFrame {
    operation: Operation,
    sender_mac: MacAddr,
    sender_ip: Ipv4Addr,
    target_mac: MacAddr,
    target_ip: Ipv4Addr,
}

impl ArpFrame {
    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn sender_mac(&self) -> MacAddr {
        self.sender_mac
    }

    pub fn sender_ip(&self) -> Ipv4Addr {
        self.sender_ip
    }

    pub fn target_mac(&self) -> MacAddr {
        self.target_mac
    }

    pub fn target_ip(&self) -> Ipv4Addr {
        self.target_ip
    }

    pub fn is_request(&self) -> bool {
        self.operation == Operation::Request
    }

    pub fn is_reply(&self) -> bool {
        self.operation == Operation::Reply
    }

    /// One line description in the familiar `Ether / ARP ...` shape.
    pub fn summary(&self) -> String {
        format!("Ether / {self}")
    }
}

impl fmt::Display for ArpFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.operation {
            Operation::Request => {
                write!(f, "ARP who has {} says {}", self.target_ip, self.sender_ip)
            }
            Operation::Reply => {
                write!(f, "ARP is at {} says {}", self.sender_mac, self.sender_ip)
            }
        }
    }
}

/// "Who has `target_ip`? Tell `sender_ip`", asked to the whole segment.
pub fn build_request(sender_mac: MacAddr, sender_ip: Ipv4Addr, target_ip: Ipv4Addr) -> ArpFrame {
    ArpFrame {
        operation: Operation::Request,
        sender_mac,
        sender_ip,
        target_mac: MacAddr::broadcast(),
        target_ip,
    }
}

/// "`sender_ip` is at `sender_mac`". Nothing here checks that the claim is true.
pub fn build_reply(
    sender_mac: MacAddr,
    sender_ip: Ipv4Addr,
    target_mac: MacAddr,
    target_ip: Ipv4Addr,
) -> ArpFrame {
    ArpFrame {
        operation: Operation::Reply,
        sender_mac,
        sender_ip,
        target_mac,
        target_ip,
    }
}

/// Wraps `frame` in an Ethernet header addressed to `ether_dst`.
///
/// The Ethernet source is the frame's sender MAC; the frame is padded to the
/// 60 byte minimum.
pub fn encapsulate(frame: &ArpFrame, ether_dst: MacAddr) -> Result<LinkFrame, EncodeError> {
    let mut buffer = [0u8; MIN_ETH_FRAME_NO_FCS];
    ethernet::make_header(&mut buffer, frame.sender_mac, ether_dst, EtherTypes::Arp)?;

    let mut arp_packet = MutableArpPacket::new(&mut buffer[ETH_HDR_LEN..ETH_HDR_LEN + ARP_LEN])
        .ok_or(EncodeError::Buffer {
            layer: "ARP",
            len: ARP_LEN,
        })?;
    arp_packet.set_hardware_type(ArpHardwareTypes::Ethernet);
    arp_packet.set_protocol_type(EtherTypes::Ipv4);
    arp_packet.set_hw_addr_len(HW_ADDR_LEN);
    arp_packet.set_proto_addr_len(PROTO_ADDR_LEN);
    arp_packet.set_operation(frame.operation.code());
    arp_packet.set_sender_hw_addr(frame.sender_mac);
    arp_packet.set_target_hw_addr(frame.target_mac);
    arp_packet.set_sender_proto_addr(frame.sender_ip);
    arp_packet.set_target_proto_addr(frame.target_ip);

    Ok(LinkFrame::new(Vec::from(buffer)))
}

/// Reads the ARP message carried by a link-layer frame.
pub fn decode(frame: &LinkFrame) -> Result<ArpFrame, DecodeError> {
    let eth = frame.header()?;
    let ethertype = eth.get_ethertype();
    if ethertype != EtherTypes::Arp {
        return Err(DecodeError::NotArp(ethertype.0));
    }

    let payload: &[u8] = eth.payload();
    let arp = ArpPacket::new(payload)
        .filter(|_| payload.len() >= ARP_LEN)
        .ok_or(DecodeError::Truncated {
            layer: "ARP",
            len: payload.len(),
        })?;

    if arp.get_hardware_type() != ArpHardwareTypes::Ethernet
        || arp.get_protocol_type() != EtherTypes::Ipv4
        || arp.get_hw_addr_len() != HW_ADDR_LEN
        || arp.get_proto_addr_len() != PROTO_ADDR_LEN
    {
        return Err(DecodeError::UnsupportedAddressing {
            hw_type: arp.get_hardware_type().0,
            proto_type: arp.get_protocol_type().0,
            hw_len: arp.get_hw_addr_len(),
            proto_len: arp.get_proto_addr_len(),
        });
    }

    let op = arp.get_operation();
    let operation = Operation::from_code(op).ok_or(DecodeError::UnknownOperation(op.0))?;

    Ok(ArpFrame {
        operation,
        sender_mac: arp.get_sender_hw_addr(),
        sender_ip: arp.get_sender_proto_addr(),
        target_mac: arp.get_target_hw_addr(),
        target_ip: arp.get_target_proto_addr(),
    })
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
