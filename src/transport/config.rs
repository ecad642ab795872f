//! # Transport Settings
//!
//! GATT identifiers, discovery heuristics and per-step timeouts. Every field
//! has a default, so a config file only needs the values it changes.
//!
//! ```json
//! {
//!   "serviceUuid": "000018f0-0000-1000-8000-00805f9b34fb",
//!   "namePrefixes": ["PT-", "MTP"],
//!   "connectTimeoutMs": 8000
//! }
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 16-bit SIG UUID 0x18F0, the print service on most generic BLE printers
pub const PRINT_SERVICE_UUID: Uuid = Uuid::from_u128(0x0000_18f0_0000_1000_8000_0080_5f9b_34fb);

/// 16-bit SIG UUID 0x2AF1, the usual write characteristic
pub const PRINT_CHARACTERISTIC_UUID: Uuid =
    Uuid::from_u128(0x0000_2af1_0000_1000_8000_0080_5f9b_34fb);

/// Vendor write characteristic seen on some clones
pub const ALT_CHARACTERISTIC_UUID: Uuid =
    Uuid::from_u128(0xe781_0a71_73ae_499d_8c15_faa9_aef0_c3f2);

/// Advertised name prefixes of common thermal printers
pub const DEFAULT_NAME_PREFIXES: [&str; 7] = [
    "PT-",
    "MTP",
    "RPP",
    "Printer",
    "BlueTooth Printer",
    "InnerPrinter",
    "MPT",
];

/// ATT MTU assumed when the backend cannot report one.
///
/// 23 is the BLE minimum every peripheral accepts, giving 20-byte writes.
/// Raise it in the config for printers known to negotiate more.
pub const DEFAULT_MTU: usize = 23;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TransportConfig {
    pub service_uuid: Uuid,
    /// Acceptable write characteristics, in preference order
    pub characteristic_uuids: Vec<Uuid>,
    pub name_prefixes: Vec<String>,
    /// How long to listen for advertisements
    pub scan_ms: u64,
    /// Bound on scanning plus device selection
    pub discovery_timeout_ms: u64,
    /// Bound on connecting and on service resolution
    pub connect_timeout_ms: u64,
    /// Bound on each chunk write
    pub write_timeout_ms: u64,
    /// Pause between chunks so slow printers can drain their buffer
    pub chunk_delay_ms: u64,
    pub mtu: usize,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            service_uuid: PRINT_SERVICE_UUID,
            characteristic_uuids: vec![PRINT_CHARACTERISTIC_UUID, ALT_CHARACTERISTIC_UUID],
            name_prefixes: DEFAULT_NAME_PREFIXES.iter().map(|s| s.to_string()).collect(),
            scan_ms: 4_000,
            discovery_timeout_ms: 60_000,
            connect_timeout_ms: 10_000,
            write_timeout_ms: 5_000,
            chunk_delay_ms: 20,
            mtu: DEFAULT_MTU,
        }
    }
}

impl TransportConfig {
    pub fn scan_duration(&self) -> Duration {
        Duration::from_millis(self.scan_ms)
    }

    pub fn discovery_timeout(&self) -> Duration {
        Duration::from_millis(self.discovery_timeout_ms)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn write_timeout(&self) -> Duration {
        Duration::from_millis(self.write_timeout_ms)
    }

    pub fn chunk_delay(&self) -> Duration {
        Duration::from_millis(self.chunk_delay_ms)
    }
}
