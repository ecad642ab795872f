//! # btleplug Backend
//!
//! [`BleCentral`] over the host's first Bluetooth adapter (BlueZ, CoreBluetooth
//! or WinRT via `btleplug`).
//!
//! btleplug does not expose the negotiated MTU, so writes use
//! [`TransportConfig::mtu`](super::TransportConfig::mtu), which defaults to
//! the 23-byte minimum. Unacknowledged writes are only safe at that size.

use std::time::Duration;

use async_trait::async_trait;
use btleplug::api::{
    CharPropFlags, Central, Characteristic, Manager as _, Peripheral as _, ScanFilter, WriteType,
};
use btleplug::platform::{Adapter, Manager, Peripheral};
use tracing::{debug, warn};
use uuid::Uuid;

use super::{BleCentral, DiscoveredPrinter, GattLink};
use crate::error::{MizanError, Result};

fn bt(e: btleplug::Error) -> MizanError {
    MizanError::Bluetooth(e.to_string())
}

/// Central backed by a btleplug adapter.
pub struct BtleCentral {
    adapter: Adapter,
}

impl BtleCentral {
    /// Use the first adapter the platform reports.
    pub async fn first_adapter() -> Result<Self> {
        let manager = Manager::new().await.map_err(bt)?;
        let adapter = manager
            .adapters()
            .await
            .map_err(bt)?
            .into_iter()
            .next()
            .ok_or_else(|| MizanError::Bluetooth("no Bluetooth adapter found".into()))?;
        Ok(Self { adapter })
    }

    async fn find(&self, device: &DiscoveredPrinter) -> Result<Peripheral> {
        let peripherals = self.adapter.peripherals().await.map_err(bt)?;
        peripherals
            .into_iter()
            .find(|p| p.id().to_string() == device.id)
            .ok_or_else(|| MizanError::ConnectionLost(format!("{} is gone", device.label())))
    }
}

#[async_trait]
impl BleCentral for BtleCentral {
    async fn scan(&self, duration: Duration) -> Result<Vec<DiscoveredPrinter>> {
        self.adapter
            .start_scan(ScanFilter::default())
            .await
            .map_err(bt)?;
        tokio::time::sleep(duration).await;

        let peripherals = self.adapter.peripherals().await.map_err(bt)?;
        if let Err(e) = self.adapter.stop_scan().await {
            warn!(error = %e, "stop_scan failed");
        }

        let mut found = Vec::with_capacity(peripherals.len());
        for p in peripherals {
            let props = match p.properties().await {
                Ok(Some(props)) => props,
                Ok(None) => continue,
                Err(e) => {
                    warn!(peripheral = %p.id(), error = %e, "skipping unreadable peripheral");
                    continue;
                }
            };
            found.push(DiscoveredPrinter {
                id: p.id().to_string(),
                address: props.address.to_string(),
                name: props.local_name,
                services: props.services,
            });
        }
        debug!(count = found.len(), "peripherals seen");
        Ok(found)
    }

    async fn connect(&self, device: &DiscoveredPrinter) -> Result<Box<dyn GattLink>> {
        let peripheral = self.find(device).await?;
        peripheral
            .connect()
            .await
            .map_err(|e| MizanError::ConnectionLost(e.to_string()))?;
        Ok(Box::new(BtleLink {
            peripheral,
            characteristic: None,
        }))
    }
}

struct BtleLink {
    peripheral: Peripheral,
    characteristic: Option<Characteristic>,
}

fn writable(c: &Characteristic) -> bool {
    c.properties
        .intersects(CharPropFlags::WRITE | CharPropFlags::WRITE_WITHOUT_RESPONSE)
}

/// Prefer unacknowledged writes when offered; chunks never exceed `mtu - 3`.
fn write_type(props: CharPropFlags) -> WriteType {
    if props.contains(CharPropFlags::WRITE_WITHOUT_RESPONSE) {
        WriteType::WithoutResponse
    } else {
        WriteType::WithResponse
    }
}

#[async_trait]
impl GattLink for BtleLink {
    async fn resolve(&mut self, service: Uuid, characteristics: &[Uuid]) -> Result<Uuid> {
        self.peripheral
            .discover_services()
            .await
            .map_err(|e| MizanError::ConnectionLost(e.to_string()))?;

        let in_service: Vec<Characteristic> = self
            .peripheral
            .characteristics()
            .into_iter()
            .filter(|c| c.service_uuid == service)
            .collect();
        if in_service.is_empty() {
            return Err(MizanError::ServiceNotFound(format!("service {service} not present")));
        }

        let chosen = characteristics
            .iter()
            .find_map(|uuid| in_service.iter().find(|c| c.uuid == *uuid && writable(c)))
            .cloned()
            .ok_or_else(|| {
                MizanError::ServiceNotFound(format!("no writable characteristic in {service}"))
            })?;

        let uuid = chosen.uuid;
        self.characteristic = Some(chosen);
        Ok(uuid)
    }

    fn mtu(&self) -> Option<usize> {
        None
    }

    async fn write(&mut self, chunk: &[u8]) -> Result<()> {
        let Some(ch) = &self.characteristic else {
            return Err(MizanError::WriteFailed("characteristic not resolved".into()));
        };
        self.peripheral
            .write(ch, chunk, write_type(ch.properties))
            .await
            .map_err(|e| MizanError::WriteFailed(e.to_string()))
    }

    async fn disconnect(&mut self) -> Result<()> {
        self.peripheral.disconnect().await.map_err(bt)
    }
}
