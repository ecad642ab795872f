//! # Printer Discovery
//!
//! Scanning returns every nearby peripheral; [`DiscoveryFilter`] keeps the
//! ones that look like printers and a [`DeviceChooser`] picks one. A chooser
//! may be an interactive picker, so it is async and may return `None` when
//! the user cancels.

use async_trait::async_trait;
use serde::Serialize;
use uuid::Uuid;

use super::config::TransportConfig;

/// A peripheral seen during scanning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscoveredPrinter {
    /// Backend-specific peripheral id
    pub id: String,
    /// Bluetooth address (`XX:XX:XX:XX:XX:XX`) when the platform exposes it
    pub address: String,
    pub name: Option<String>,
    /// Advertised service UUIDs
    pub services: Vec<Uuid>,
}

impl DiscoveredPrinter {
    /// Name for logs and the CLI.
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.address)
    }
}

/// Decides which peripherals are printer candidates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryFilter {
    pub service_uuid: Uuid,
    pub characteristic_uuids: Vec<Uuid>,
    pub name_prefixes: Vec<String>,
}

impl DiscoveryFilter {
    /// A device matches if it advertises the print service or its name
    /// starts with a known vendor prefix (ignoring case).
    pub fn matches(&self, device: &DiscoveredPrinter) -> bool {
        if device.services.contains(&self.service_uuid) {
            return true;
        }
        let Some(name) = device.name.as_deref() else {
            return false;
        };
        let name = name.to_lowercase();
        self.name_prefixes
            .iter()
            .any(|prefix| name.starts_with(&prefix.to_lowercase()))
    }
}

impl From<&TransportConfig> for DiscoveryFilter {
    fn from(cfg: &TransportConfig) -> Self {
        Self {
            service_uuid: cfg.service_uuid,
            characteristic_uuids: cfg.characteristic_uuids.clone(),
            name_prefixes: cfg.name_prefixes.clone(),
        }
    }
}

impl Default for DiscoveryFilter {
    fn default() -> Self {
        Self::from(&TransportConfig::default())
    }
}

/// Picks one printer among the filtered candidates.
#[async_trait]
pub trait DeviceChooser: Send + Sync {
    /// `None` means nothing was selected (cancelled, or no acceptable device).
    async fn choose(&self, candidates: &[DiscoveredPrinter]) -> Option<DiscoveredPrinter>;
}

/// Takes the first candidate, in scan order.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstMatch;

#[async_trait]
impl DeviceChooser for FirstMatch {
    async fn choose(&self, candidates: &[DiscoveredPrinter]) -> Option<DiscoveredPrinter> {
        candidates.first().cloned()
    }
}

/// Takes the candidate with a given address or id (case-insensitive).
#[derive(Debug, Clone)]
pub struct ByAddress(pub String);

#[async_trait]
impl DeviceChooser for ByAddress {
    async fn choose(&self, candidates: &[DiscoveredPrinter]) -> Option<DiscoveredPrinter> {
        candidates
            .iter()
            .find(|d| d.address.eq_ignore_ascii_case(&self.0) || d.id.eq_ignore_ascii_case(&self.0))
            .cloned()
    }
}
