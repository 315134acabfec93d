use pnet::datalink::{self, NetworkInterface};
use pnet::ipnetwork::IpNetwork;
use thiserror::Error;
use tracing::debug;

#[cfg(target_os = "linux")]
use linux_impl::{is_physical, is_wireless};
#[cfg(not(target_os = "linux"))]
use fallback_impl::{is_physical, is_wireless};

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ViabilityError {
    /// The interface is operationally down.
    IsDown,
    /// The interface was filtered out as "not physical" by the provided logic.
    NotPhysical,
    /// The interface does not have a MAC address.
    NoMacAddress,
    /// The interface does not support broadcast (required for ARP).
    NotBroadcast,
    /// The interface is a point-to-point link (e.g., a VPN).
    IsPointToPoint,
    /// The interface has no private IPv4 address to speak ARP from.
    NoValidLanIp,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InterfaceError {
    #[error("no network interface named '{0}'")]
    NotFound(String),
    #[error("no interface available for ARP on the local network")]
    NoViableInterface,
    #[error("interface '{0}' has no MAC address")]
    NoMacAddress(String),
    #[error("interface '{0}' has no IPv4 address")]
    NoIpv4Address(String),
}

/// Resolves the interface to bind to.
///
/// An explicit `name` wins; otherwise the best viable LAN interface is picked,
/// preferring wired over wireless.
pub fn get_lan_interface(name: Option<&str>) -> Result<NetworkInterface, InterfaceError> {
    let interfaces: Vec<NetworkInterface> = datalink::interfaces();
    debug!("Identified {} network interface(s)", interfaces.len());
    select(name, interfaces, is_physical, is_wired)
}

fn select(
    name: Option<&str>,
    interfaces: Vec<NetworkInterface>,
    is_physical: impl Fn(&NetworkInterface) -> bool,
    is_wired: impl Fn(&NetworkInterface) -> bool,
) -> Result<NetworkInterface, InterfaceError> {
    if let Some(name) = name {
        return interfaces
            .into_iter()
            .find(|interface| interface.name == name)
            .ok_or_else(|| InterfaceError::NotFound(name.to_string()));
    }

    let candidates: Vec<NetworkInterface> = interfaces
        .into_iter()
        .filter(|interface| match is_viable_lan_interface(interface, &is_physical) {
            Ok(()) => true,
            Err(reason) => {
                debug!("Skipping {}: {reason:?}", interface.name);
                false
            }
        })
        .collect();

    select_best_lan_interface(candidates, is_wired).ok_or(InterfaceError::NoViableInterface)
}

fn is_viable_lan_interface(
    interface: &NetworkInterface,
    is_physical: impl Fn(&NetworkInterface) -> bool,
) -> Result<(), ViabilityError> {
    if !interface.is_up() {
        return Err(ViabilityError::IsDown);
    }
    if interface.is_loopback() || !is_physical(interface) {
        return Err(ViabilityError::NotPhysical);
    }
    if interface.mac.is_none() {
        return Err(ViabilityError::NoMacAddress);
    }
    if !interface.is_broadcast() {
        return Err(ViabilityError::NotBroadcast);
    }
    if interface.is_point_to_point() {
        return Err(ViabilityError::IsPointToPoint);
    }
    let has_valid_ip = interface.ips.iter().any(|net| match net {
        IpNetwork::V4(ipv4) => ipv4.ip().is_private(),
        IpNetwork::V6(_) => false,
    });
    if !has_valid_ip {
        return Err(ViabilityError::NoValidLanIp);
    }

    Ok(())
}

fn select_best_lan_interface(
    mut interfaces: Vec<NetworkInterface>,
    is_wired: impl Fn(&NetworkInterface) -> bool,
) -> Option<NetworkInterface> {
    match interfaces.iter().position(|interface| is_wired(interface)) {
        Some(idx) => Some(interfaces.swap_remove(idx)),
        None if interfaces.is_empty() => None,
        None => Some(interfaces.swap_remove(0)),
    }
}

fn is_wired(interface: &NetworkInterface) -> bool {
    is_physical(interface) && !is_wireless(interface)
}

#[cfg(target_os = "linux")]
mod linux_impl {
    use super::*;
    use std::path::Path;

    pub fn is_physical(interface: &NetworkInterface) -> bool {
        Path::new(&format!("/sys/class/net/{}/device", interface.name)).exists()
    }

    pub fn is_wireless(interface: &NetworkInterface) -> bool {
        Path::new(&format!("/sys/class/net/{}/wireless", interface.name)).exists()
    }
}

// Without sysfs every broadcast-capable interface counts as physical and wired.
#[cfg(not(target_os = "linux"))]
mod fallback_impl {
    use super::*;

    pub fn is_physical(_interface: &NetworkInterface) -> bool {
        true
    }

    pub fn is_wireless(_interface: &NetworkInterface) -> bool {
        false
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
