//! # Print Session Tests
//!
//! Drive [`PrinterSession`] against an in-memory BLE central.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use mizan::MizanError;
use mizan::printer::PrinterProfile;
use mizan::transport::config::{PRINT_CHARACTERISTIC_UUID, PRINT_SERVICE_UUID};
use mizan::transport::{
    BleCentral, ByAddress, DeviceChooser, DiscoveredPrinter, FirstMatch, GattLink, PrinterSession,
    SessionState, TransportConfig,
};
use pretty_assertions::assert_eq;
use uuid::Uuid;

// ============================================================================
// MOCK CENTRAL
// ============================================================================

#[derive(Debug, Default)]
struct Log {
    connected: Vec<String>,
    writes: Vec<Vec<u8>>,
    disconnects: usize,
}

#[derive(Clone, Copy, Default)]
enum Fault {
    #[default]
    None,
    ConnectRefused,
    ConnectHangs,
    NoService,
    WriteFailsAt(usize),
    WriteHangs,
    DisconnectHangs,
}

struct MockCentral {
    devices: Vec<DiscoveredPrinter>,
    fault: Fault,
    mtu: Option<usize>,
    log: Arc<Mutex<Log>>,
}

impl MockCentral {
    fn new(devices: Vec<DiscoveredPrinter>) -> Self {
        Self {
            devices,
            fault: Fault::None,
            mtu: Some(23),
            log: Arc::default(),
        }
    }

    fn fault(mut self, fault: Fault) -> Self {
        self.fault = fault;
        self
    }
}

#[async_trait]
impl BleCentral for MockCentral {
    async fn scan(&self, _duration: Duration) -> mizan::Result<Vec<DiscoveredPrinter>> {
        Ok(self.devices.clone())
    }

    async fn connect(&self, device: &DiscoveredPrinter) -> mizan::Result<Box<dyn GattLink>> {
        match self.fault {
            Fault::ConnectRefused => {
                return Err(MizanError::ConnectionLost("refused".into()));
            }
            Fault::ConnectHangs => std::future::pending::<()>().await,
            _ => {}
        }
        self.log.lock().unwrap().connected.push(device.address.clone());
        Ok(Box::new(MockLink {
            fault: self.fault,
            mtu: self.mtu,
            log: Arc::clone(&self.log),
        }))
    }
}

struct MockLink {
    fault: Fault,
    mtu: Option<usize>,
    log: Arc<Mutex<Log>>,
}

#[async_trait]
impl GattLink for MockLink {
    async fn resolve(&mut self, service: Uuid, characteristics: &[Uuid]) -> mizan::Result<Uuid> {
        if matches!(self.fault, Fault::NoService) {
            return Err(MizanError::ServiceNotFound(format!("service {service} not present")));
        }
        Ok(characteristics[0])
    }

    fn mtu(&self) -> Option<usize> {
        self.mtu
    }

    async fn write(&mut self, chunk: &[u8]) -> mizan::Result<()> {
        let written = self.log.lock().unwrap().writes.len();
        match self.fault {
            Fault::WriteFailsAt(n) if n == written => {
                return Err(MizanError::WriteFailed("GATT error 0x0e".into()));
            }
            Fault::WriteHangs => std::future::pending::<()>().await,
            _ => {}
        }
        self.log.lock().unwrap().writes.push(chunk.to_vec());
        Ok(())
    }

    async fn disconnect(&mut self) -> mizan::Result<()> {
        self.log.lock().unwrap().disconnects += 1;
        if matches!(self.fault, Fault::DisconnectHangs) {
            std::future::pending::<()>().await;
        }
        Ok(())
    }
}

/// Chooser that behaves like a cancelled picker.
struct Cancelled;

#[async_trait]
impl DeviceChooser for Cancelled {
    async fn choose(&self, _candidates: &[DiscoveredPrinter]) -> Option<DiscoveredPrinter> {
        None
    }
}

// ============================================================================
// HELPERS
// ============================================================================

fn printer(address: &str, name: Option<&str>, services: Vec<Uuid>) -> DiscoveredPrinter {
    DiscoveredPrinter {
        id: address.to_string(),
        address: address.to_string(),
        name: name.map(str::to_string),
        services,
    }
}

fn nearby() -> Vec<DiscoveredPrinter> {
    vec![
        printer("11:11:11:11:11:11", Some("Galaxy Buds"), vec![]),
        printer("22:22:22:22:22:22", Some("MPT-II"), vec![]),
        printer("33:33:33:33:33:33", None, vec![PRINT_SERVICE_UUID]),
    ]
}

fn fast_config() -> TransportConfig {
    TransportConfig {
        scan_ms: 0,
        discovery_timeout_ms: 1_000,
        connect_timeout_ms: 200,
        write_timeout_ms: 200,
        chunk_delay_ms: 0,
        ..TransportConfig::default()
    }
}

fn session(central: MockCentral, chooser: Box<dyn DeviceChooser>) -> (PrinterSession, Arc<Mutex<Log>>) {
    let log = Arc::clone(&central.log);
    let session = PrinterSession::new(
        Arc::new(central),
        chooser,
        fast_config(),
        PrinterProfile::GENERIC_58MM,
    );
    (session, log)
}

// ============================================================================
// TESTS
// ============================================================================

#[tokio::test]
async fn test_prints_in_mtu_chunks_and_disconnects() {
    let (mut session, log) = session(MockCentral::new(nearby()), Box::new(FirstMatch));
    let data: Vec<u8> = (0..=99).collect();

    let report = session.print_bytes(&data).await.unwrap();

    assert_eq!(report.device.address, "22:22:22:22:22:22");
    assert_eq!(report.bytes, 100);
    assert_eq!(report.chunks, 5);
    assert_eq!(session.state(), SessionState::Disconnected);

    let log = log.lock().unwrap();
    assert!(log.writes.iter().all(|w| w.len() <= 20));
    assert_eq!(log.writes.concat(), data);
    assert_eq!(log.disconnects, 1);
}

#[tokio::test]
async fn test_unknown_mtu_uses_configured_default() {
    let mut central = MockCentral::new(nearby());
    central.mtu = None;
    let (mut session, log) = session(central, Box::new(FirstMatch));

    let report = session.print_bytes(&[0u8; 45]).await.unwrap();
    assert_eq!(report.chunks, 3);

    let lens: Vec<usize> = log.lock().unwrap().writes.iter().map(Vec::len).collect();
    assert_eq!(lens, [20, 20, 5]);
}

#[tokio::test]
async fn test_by_address_picks_service_advertiser() {
    let chooser = Box::new(ByAddress("33:33:33:33:33:33".into()));
    let (mut session, log) = session(MockCentral::new(nearby()), chooser);

    session.print_bytes(b"hello").await.unwrap();
    assert_eq!(log.lock().unwrap().connected, vec!["33:33:33:33:33:33"]);
}

#[tokio::test]
async fn test_unfiltered_devices_are_never_offered() {
    let chooser = Box::new(ByAddress("11:11:11:11:11:11".into()));
    let (mut session, log) = session(MockCentral::new(nearby()), chooser);

    let err = session.print_bytes(b"hello").await.unwrap_err();
    assert!(matches!(err, MizanError::NoDeviceSelected));
    assert!(log.lock().unwrap().connected.is_empty());
}

#[tokio::test]
async fn test_cancelled_picker() {
    let (mut session, log) = session(MockCentral::new(nearby()), Box::new(Cancelled));

    let err = session.print_bytes(b"hello").await.unwrap_err();
    assert!(matches!(err, MizanError::NoDeviceSelected));
    assert!(err.is_retryable());
    assert_eq!(session.state(), SessionState::Failed);
    assert_eq!(log.lock().unwrap().disconnects, 0);
}

#[tokio::test]
async fn test_connect_refused() {
    let central = MockCentral::new(nearby()).fault(Fault::ConnectRefused);
    let (mut session, log) = session(central, Box::new(FirstMatch));

    let err = session.print_bytes(b"hello").await.unwrap_err();
    assert!(matches!(err, MizanError::ConnectionLost(_)));
    assert_eq!(log.lock().unwrap().disconnects, 0);
}

#[tokio::test]
async fn test_connect_timeout_is_connection_lost() {
    let central = MockCentral::new(nearby()).fault(Fault::ConnectHangs);
    let (mut session, _log) = session(central, Box::new(FirstMatch));

    let err = session.print_bytes(b"hello").await.unwrap_err();
    assert!(matches!(err, MizanError::ConnectionLost(msg) if msg.contains("timed out")));
}

#[tokio::test]
async fn test_missing_service_still_disconnects() {
    let central = MockCentral::new(nearby()).fault(Fault::NoService);
    let (mut session, log) = session(central, Box::new(FirstMatch));

    let err = session.print_bytes(b"hello").await.unwrap_err();
    assert!(matches!(err, MizanError::ServiceNotFound(_)));

    let log = log.lock().unwrap();
    assert!(log.writes.is_empty());
    assert_eq!(log.disconnects, 1);
}

#[tokio::test]
async fn test_write_failure_mid_stream_disconnects() {
    let central = MockCentral::new(nearby()).fault(Fault::WriteFailsAt(2));
    let (mut session, log) = session(central, Box::new(FirstMatch));

    let err = session.print_bytes(&[0xAB; 100]).await.unwrap_err();
    assert!(matches!(err, MizanError::WriteFailed(_)));
    assert_eq!(session.state(), SessionState::Failed);

    let log = log.lock().unwrap();
    assert_eq!(log.writes.len(), 2);
    assert_eq!(log.disconnects, 1);
}

#[tokio::test]
async fn test_write_timeout_is_write_failed() {
    let central = MockCentral::new(nearby()).fault(Fault::WriteHangs);
    let (mut session, log) = session(central, Box::new(FirstMatch));

    let err = session.print_bytes(b"hello").await.unwrap_err();
    assert!(matches!(err, MizanError::WriteFailed(msg) if msg.contains("timed out")));
    assert_eq!(log.lock().unwrap().disconnects, 1);
}

#[tokio::test]
async fn test_hung_disconnect_is_bounded() {
    let central = MockCentral::new(nearby()).fault(Fault::DisconnectHangs);
    let (mut session, log) = session(central, Box::new(FirstMatch));

    let report = tokio::time::timeout(Duration::from_secs(3), session.print_bytes(b"hello"))
        .await
        .expect("print_bytes hung on disconnect")
        .unwrap();
    assert_eq!(report.bytes, 5);
    assert_eq!(session.state(), SessionState::Disconnected);
    assert_eq!(log.lock().unwrap().disconnects, 1);
}

#[tokio::test]
async fn test_session_is_single_use() {
    let (mut session, log) = session(MockCentral::new(nearby()), Box::new(FirstMatch));

    session.print_bytes(b"first").await.unwrap();
    let err = session.print_bytes(b"second").await.unwrap_err();
    assert!(matches!(err, MizanError::SessionClosed));
    assert_eq!(log.lock().unwrap().connected.len(), 1);
}

#[tokio::test]
async fn test_failed_session_cannot_be_reused() {
    let (mut session, _log) = session(MockCentral::new(nearby()), Box::new(Cancelled));

    assert!(session.print_bytes(b"x").await.is_err());
    let err = session.print_bytes(b"x").await.unwrap_err();
    assert!(matches!(err, MizanError::SessionClosed));
}

#[tokio::test]
async fn test_print_renders_receipt() {
    let json = include_str!("fixtures/sale.json");
    let value: serde_json::Value = serde_json::from_str(json).unwrap();
    let store = serde_json::from_value(value["store"].clone()).unwrap();
    let sale = serde_json::from_value(value["sale"].clone()).unwrap();
    let receipt = mizan::receipt::ReceiptFormatter::format_with_fiscal_qr(&store, &sale);

    let (mut session, log) = session(MockCentral::new(nearby()), Box::new(FirstMatch));
    let report = session.print(&receipt).await.unwrap();

    let expected = mizan::receipt::escpos::render(&receipt, &PrinterProfile::GENERIC_58MM);
    assert_eq!(report.bytes, expected.len());
    assert_eq!(log.lock().unwrap().writes.concat(), expected);
    assert_eq!(PRINT_CHARACTERISTIC_UUID, TransportConfig::default().characteristic_uuids[0]);
}
