//! # Error Types
//!
//! This module defines error types used throughout the mizan library.
//!
//! Codec failures (`InvalidBarcodeFormat`, `FieldTooLong`, `InvalidQrPayload`)
//! are local to a single decode/encode call. Transport failures are scoped to
//! a single print attempt and are retryable by reconnecting and reprinting.

use thiserror::Error;

/// Main error type for mizan operations
#[derive(Debug, Error)]
pub enum MizanError {
    /// A scale barcode carried a malformed numeric payload
    #[error("Invalid barcode format: {0}")]
    InvalidBarcodeFormat(String),

    /// A TLV field does not fit the one-byte length slot
    #[error("Field too long: tag {tag} is {len} bytes (max 255)")]
    FieldTooLong { tag: u8, len: usize },

    /// A fiscal QR payload could not be replayed as TLV records
    #[error("Invalid QR payload: {0}")]
    InvalidQrPayload(String),

    /// Discovery found nothing acceptable, or the picker was cancelled
    #[error("No printer selected")]
    NoDeviceSelected,

    /// The chosen device lacks the print service or writable characteristic
    #[error("Print service not found: {0}")]
    ServiceNotFound(String),

    /// Writing to the print characteristic failed
    #[error("Write failed: {0}")]
    WriteFailed(String),

    /// Connecting failed, timed out, or the link dropped
    #[error("Connection lost: {0}")]
    ConnectionLost(String),

    /// A printer session was used for a second job
    #[error("Printer session already used")]
    SessionClosed,

    /// Bluetooth adapter or backend error outside a connection
    #[error("Bluetooth error: {0}")]
    Bluetooth(String),

    /// Invalid configuration file or value
    #[error("Invalid config: {0}")]
    Config(String),

    /// JSON (de)serialization error wrapper
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl MizanError {
    /// Whether the end user can reasonably retry (reconnect and reprint).
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            MizanError::NoDeviceSelected
                | MizanError::ServiceNotFound(_)
                | MizanError::WriteFailed(_)
                | MizanError::ConnectionLost(_)
                | MizanError::Bluetooth(_)
        )
    }
}

/// Result type for mizan operations
pub type Result<T> = std::result::Result<T, MizanError>;
