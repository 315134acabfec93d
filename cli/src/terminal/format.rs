use std::sync::OnceLock;

use colored::*;
use mac_oui::Oui;
use pnet::util::MacAddr;
use tracing::debug;

use crate::terminal::colors;

pub type Detail = (String, ColoredString);

static OUI_DB: OnceLock<Option<Oui>> = OnceLock::new();

fn get_oui_db() -> Option<&'static Oui> {
    OUI_DB
        .get_or_init(|| match Oui::default() {
            Ok(db) => Some(db),
            Err(e) => {
                debug!("OUI database unavailable: {e}");
                None
            }
        })
        .as_ref()
}

/// Manufacturer registered for the MAC's OUI prefix.
pub fn vendor(mac: MacAddr) -> Option<String> {
    let db = get_oui_db()?;
    match db.lookup_by_mac(&mac.to_string()) {
        Ok(Some(entry)) => Some(entry.company_name.clone()),
        _ => None,
    }
}

pub fn ip_detail(key: &str, ip: impl ToString) -> Detail {
    (key.to_string(), ip.to_string().color(colors::IPV4_ADDR))
}

pub fn mac_detail(key: &str, mac: MacAddr) -> Detail {
    (key.to_string(), mac.to_string().color(colors::MAC_ADDR))
}

pub fn vendor_detail(mac: MacAddr) -> Option<Detail> {
    vendor(mac).map(|name| ("Vendor".to_string(), name.color(colors::VENDOR)))
}
