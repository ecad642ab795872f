//! # Printer Module
//!
//! Printer-specific profiles.
//!
//! ## Modules
//!
//! - [`config`]: Paper width, trailer, cut and QR options

pub mod config;

pub use config::{CutMode, PrinterProfile, QrMode};
