//! # Address Validation
//!
//! Syntactic checks for the two address kinds a user can type on the command line.
//!
//! * **IPv4**: exactly four dot separated decimal components, each in `0..=255`.
//! * **MAC**: six groups of two hex digits, each separator being `:` or `-`.
//!
//! The predicates never fail; the `parse_*` counterparts accept exactly the same
//! language and hand back typed addresses for the protocol engine.

use std::net::Ipv4Addr;

use pnet::util::MacAddr;

use crate::error::AddressError;
use crate::network::target::Target;

const IPV4_COMPONENTS: usize = 4;
const MAC_GROUPS: usize = 6;

/// Returns `true` if `s` is a dotted-decimal IPv4 address.
pub fn is_valid_ip(s: &str) -> bool {
    ipv4_octets(s).is_some()
}

/// Returns `true` if `s` is six 2-digit hex groups separated by `:` or `-`.
///
/// Separators may be mixed (`74-d0:2b...` is accepted).
pub fn is_valid_mac(s: &str) -> bool {
    mac_octets(s).is_some()
}

pub fn parse_ip(s: &str) -> Result<Ipv4Addr, AddressError> {
    ipv4_octets(s)
        .map(Ipv4Addr::from)
        .ok_or_else(|| AddressError::Ip(s.to_string()))
}

/// Parses a MAC address, normalizing it to the canonical lowercase colon form.
pub fn parse_mac(s: &str) -> Result<MacAddr, AddressError> {
    mac_octets(s)
        .map(|[a, b, c, d, e, f]| MacAddr::new(a, b, c, d, e, f))
        .ok_or_else(|| AddressError::Mac(s.to_string()))
}

/// Parses a single address or a CIDR block.
pub fn parse_target(s: &str) -> Result<Target, AddressError> {
    s.parse()
}

fn ipv4_octets(s: &str) -> Option<[u8; IPV4_COMPONENTS]> {
    let mut octets = [0u8; IPV4_COMPONENTS];
    let mut count: usize = 0;

    for component in s.split('.') {
        if count == IPV4_COMPONENTS {
            return None;
        }
        if component.is_empty()
            || component.len() > 3
            || !component.bytes().all(|b| b.is_ascii_digit())
        {
            return None;
        }
        let value: u16 = component.parse().ok()?;
        octets[count] = u8::try_from(value).ok()?;
        count += 1;
    }

    (count == IPV4_COMPONENTS).then_some(octets)
}

fn mac_octets(s: &str) -> Option<[u8; MAC_GROUPS]> {
    let mut octets = [0u8; MAC_GROUPS];
    let mut count: usize = 0;

    for group in s.split([':', '-']) {
        if count == MAC_GROUPS {
            return None;
        }
        if group.len() != 2 || !group.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        octets[count] = u8::from_str_radix(group, 16).ok()?;
        count += 1;
    }

    (count == MAC_GROUPS).then_some(octets)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
