//! # Printer Transport Layer
//!
//! Delivers rendered receipts to BLE thermal printers over a GATT write
//! characteristic.
//!
//! ## Print Job Lifecycle
//!
//! ```text
//! Idle ──► Discovering ──► Connected ──► Writing ──► Disconnected
//!   │           │              │            │
//!   └───────────┴──────────────┴────────────┴──────► Failed
//! ```
//!
//! One [`PrinterSession`] per job. The session owns the GATT link from
//! connect until it ends and always disconnects, whether the job succeeded
//! or not.
//!
//! ## Backends
//!
//! - [`ble`]: `btleplug` central (feature `ble`, on by default)
//! - Anything implementing [`BleCentral`] / [`GattLink`], e.g. a test mock

#[cfg(feature = "ble")]
pub mod ble;
pub mod chunking;
pub mod config;
pub mod discovery;
mod session;

use std::time::Duration;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;

pub use config::TransportConfig;
pub use discovery::{ByAddress, DeviceChooser, DiscoveredPrinter, DiscoveryFilter, FirstMatch};
pub use session::{PrintReport, PrinterSession, SessionState};

/// A Bluetooth LE central able to scan and open GATT connections.
#[async_trait]
pub trait BleCentral: Send + Sync {
    /// Listen for advertisements for `duration` and return every peripheral seen.
    async fn scan(&self, duration: Duration) -> Result<Vec<DiscoveredPrinter>>;

    /// Open a GATT connection. Failures are reported as `ConnectionLost`.
    async fn connect(&self, device: &DiscoveredPrinter) -> Result<Box<dyn GattLink>>;
}

/// An open GATT connection to one printer.
#[async_trait]
pub trait GattLink: Send {
    /// Find the print service and its first writable characteristic among
    /// `characteristics` (preference order). Returns the chosen UUID or
    /// `ServiceNotFound`.
    async fn resolve(&mut self, service: Uuid, characteristics: &[Uuid]) -> Result<Uuid>;

    /// Negotiated ATT MTU, if the backend knows it.
    fn mtu(&self) -> Option<usize>;

    /// Write one chunk to the resolved characteristic.
    async fn write(&mut self, chunk: &[u8]) -> Result<()>;

    async fn disconnect(&mut self) -> Result<()>;
}
