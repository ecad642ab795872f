//! Single-use print job over one GATT connection.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tokio::time::{sleep, timeout};
use tracing::{debug, info, warn};

use super::chunking;
use super::config::TransportConfig;
use super::discovery::{DeviceChooser, DiscoveredPrinter, DiscoveryFilter};
use super::{BleCentral, GattLink};
use crate::error::{MizanError, Result};
use crate::printer::PrinterProfile;
use crate::receipt::{PrintableReceipt, escpos};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SessionState {
    Idle,
    Discovering,
    Connected,
    Writing,
    Disconnected,
    Failed,
}

impl SessionState {
    /// `Disconnected` and `Failed` end the session.
    pub fn is_terminal(self) -> bool {
        matches!(self, SessionState::Disconnected | SessionState::Failed)
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Outcome of a successful job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrintReport {
    pub device: DiscoveredPrinter,
    pub bytes: usize,
    pub chunks: usize,
}

/// One print job: discover, choose, connect, write, disconnect.
///
/// A session is used once. Calling [`print`](Self::print) again, even after
/// a failure, returns `SessionClosed`; start a new session to retry.
///
/// Disconnect is bounded by the connect timeout. A teardown that fails or
/// times out is logged and does not change the job's outcome, since the
/// bytes already reached the printer. Dropping the `print` future mid-job
/// drops the link without a disconnect; the backend releases it when the
/// peripheral handle goes away.
pub struct PrinterSession {
    central: Arc<dyn BleCentral>,
    chooser: Box<dyn DeviceChooser>,
    filter: DiscoveryFilter,
    config: TransportConfig,
    profile: PrinterProfile,
    state: SessionState,
}

impl PrinterSession {
    pub fn new(
        central: Arc<dyn BleCentral>,
        chooser: Box<dyn DeviceChooser>,
        config: TransportConfig,
        profile: PrinterProfile,
    ) -> Self {
        Self {
            central,
            chooser,
            filter: DiscoveryFilter::from(&config),
            config,
            profile,
            state: SessionState::Idle,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Render the receipt with the session's printer profile and print it.
    pub async fn print(&mut self, receipt: &PrintableReceipt) -> Result<PrintReport> {
        if self.state != SessionState::Idle {
            return Err(MizanError::SessionClosed);
        }
        let bytes = escpos::render(receipt, &self.profile);
        self.print_bytes(&bytes).await
    }

    /// Print an already rendered ESC/POS buffer.
    pub async fn print_bytes(&mut self, bytes: &[u8]) -> Result<PrintReport> {
        if self.state != SessionState::Idle {
            return Err(MizanError::SessionClosed);
        }

        match self.run(bytes).await {
            Ok(report) => {
                self.transition(SessionState::Disconnected);
                info!(
                    device = %report.device.label(),
                    bytes = report.bytes,
                    chunks = report.chunks,
                    "print job complete"
                );
                Ok(report)
            }
            Err(e) => {
                self.transition(SessionState::Failed);
                warn!(error = %e, retryable = e.is_retryable(), "print job failed");
                Err(e)
            }
        }
    }

    async fn run(&mut self, bytes: &[u8]) -> Result<PrintReport> {
        self.transition(SessionState::Discovering);
        let device = self.discover().await?;

        let mut link = timeout(self.config.connect_timeout(), self.central.connect(&device))
            .await
            .map_err(|_| {
                MizanError::ConnectionLost(format!("connect to {} timed out", device.label()))
            })??;
        self.transition(SessionState::Connected);

        let written = self.write_all(link.as_mut(), bytes).await;

        // Released on every path once connected.
        match timeout(self.config.connect_timeout(), link.disconnect()).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => warn!(error = %e, "disconnect failed"),
            Err(_) => warn!(device = %device.label(), "disconnect timed out"),
        }

        let chunks = written?;
        Ok(PrintReport {
            device,
            bytes: bytes.len(),
            chunks,
        })
    }

    async fn discover(&self) -> Result<DiscoveredPrinter> {
        let pick = async {
            let seen = self.central.scan(self.config.scan_duration()).await?;
            let candidates: Vec<DiscoveredPrinter> =
                seen.into_iter().filter(|d| self.filter.matches(d)).collect();
            debug!(candidates = candidates.len(), "scan finished");
            Ok::<_, MizanError>(self.chooser.choose(&candidates).await)
        };

        let chosen = timeout(self.config.discovery_timeout(), pick)
            .await
            .map_err(|_| MizanError::NoDeviceSelected)??;

        let device = chosen.ok_or(MizanError::NoDeviceSelected)?;
        info!(device = %device.label(), address = %device.address, "printer selected");
        Ok(device)
    }

    async fn write_all(&mut self, link: &mut dyn GattLink, bytes: &[u8]) -> Result<usize> {
        let characteristic = timeout(
            self.config.connect_timeout(),
            link.resolve(self.filter.service_uuid, &self.filter.characteristic_uuids),
        )
        .await
        .map_err(|_| MizanError::ConnectionLost("service discovery timed out".into()))??;
        debug!(%characteristic, "write characteristic resolved");

        self.transition(SessionState::Writing);

        let mtu = link.mtu().unwrap_or(self.config.mtu);
        let total = bytes.len().div_ceil(chunking::chunk_len(mtu));
        let delay = self.config.chunk_delay();
        debug!(mtu, chunks = total, "writing");

        for (i, chunk) in chunking::split(bytes, mtu).enumerate() {
            timeout(self.config.write_timeout(), link.write(chunk))
                .await
                .map_err(|_| MizanError::WriteFailed(format!("chunk {}/{} timed out", i + 1, total)))??;

            if !delay.is_zero() && i + 1 < total {
                sleep(delay).await;
            }
        }

        Ok(total)
    }

    fn transition(&mut self, next: SessionState) {
        debug!(from = %self.state, to = %next, "session state");
        self.state = next;
    }
}
