//! # QR Code Commands
//!
//! Two ways to put a QR code on paper:
//!
//! | Mode | Command | Notes |
//! |------|---------|-------|
//! | Native | `GS ( k` (function 165/167/169/180/181) | Printer renders the symbol; not every clone firmware supports it |
//! | Raster | `GS v 0` | Symbol rendered on the host with the `qrcode` crate and sent as a bit image |
//!
//! Both are opt-in; receipts print a text placeholder by default.

use qrcode::{Color, EcLevel, QrCode};

use super::commands::GS;
use crate::error::{MizanError, Result};

/// QR error correction level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QrErrorLevel {
    /// ~7% recovery
    L,
    /// ~15% recovery
    #[default]
    M,
    /// ~25% recovery
    Q,
    /// ~30% recovery
    H,
}

impl QrErrorLevel {
    fn escpos_byte(self) -> u8 {
        match self {
            QrErrorLevel::L => 0x30,
            QrErrorLevel::M => 0x31,
            QrErrorLevel::Q => 0x32,
            QrErrorLevel::H => 0x33,
        }
    }

    fn ec_level(self) -> EcLevel {
        match self {
            QrErrorLevel::L => EcLevel::L,
            QrErrorLevel::M => EcLevel::M,
            QrErrorLevel::Q => EcLevel::Q,
            QrErrorLevel::H => EcLevel::H,
        }
    }
}

/// # Native QR (GS ( k)
///
/// | Step | Hex |
/// |------|-----|
/// | Model 2 | 1D 28 6B 04 00 31 41 32 00 |
/// | Module size | 1D 28 6B 03 00 31 43 n |
/// | Error level | 1D 28 6B 03 00 31 45 n |
/// | Store data | 1D 28 6B pL pH 31 50 30 d... |
/// | Print | 1D 28 6B 03 00 31 51 30 |
///
/// `pL pH` is the little-endian data length plus 3.
pub fn native(data: &[u8], module_size: u8, level: QrErrorLevel) -> Vec<u8> {
    let module_size = module_size.clamp(1, 16);
    let data = &data[..data.len().min(u16::MAX as usize - 3)];
    let [pl, ph] = ((data.len() + 3) as u16).to_le_bytes();

    let mut cmd = Vec::with_capacity(data.len() + 40);
    cmd.extend_from_slice(&[GS, b'(', b'k', 0x04, 0x00, 0x31, 0x41, 0x32, 0x00]);
    cmd.extend_from_slice(&[GS, b'(', b'k', 0x03, 0x00, 0x31, 0x43, module_size]);
    cmd.extend_from_slice(&[GS, b'(', b'k', 0x03, 0x00, 0x31, 0x45, level.escpos_byte()]);
    cmd.extend_from_slice(&[GS, b'(', b'k', pl, ph, 0x31, 0x50, 0x30]);
    cmd.extend_from_slice(data);
    cmd.extend_from_slice(&[GS, b'(', b'k', 0x03, 0x00, 0x31, 0x51, 0x30]);
    cmd
}

/// # Raster QR (GS v 0)
///
/// Renders the symbol on the host and emits a raster bit image:
/// `GS v 0 m xL xH yL yH d...`, MSB = leftmost dot, 1 = black.
///
/// ## Errors
///
/// [`MizanError::InvalidQrPayload`] if the data does not fit a QR symbol.
pub fn raster(data: &[u8], module_size: u8, level: QrErrorLevel) -> Result<Vec<u8>> {
    let code = QrCode::with_error_correction_level(data, level.ec_level())
        .map_err(|e| MizanError::InvalidQrPayload(format!("QR code generation failed: {e}")))?;

    let scale = usize::from(module_size.max(1));
    let modules = code.width();
    let width_dots = modules * scale;
    let width_bytes = width_dots.div_ceil(8);
    let height = width_dots;

    let [xl, xh] = (width_bytes as u16).to_le_bytes();
    let [yl, yh] = (height as u16).to_le_bytes();

    let mut cmd = Vec::with_capacity(8 + width_bytes * height);
    cmd.extend_from_slice(&[GS, b'v', b'0', 0x00, xl, xh, yl, yh]);

    for y in 0..height {
        for x_byte in 0..width_bytes {
            let mut byte = 0u8;
            for bit in 0..8 {
                let x = x_byte * 8 + bit;
                if x < width_dots && code[(x / scale, y / scale)] == Color::Dark {
                    byte |= 0x80 >> bit;
                }
            }
            cmd.push(byte);
        }
    }

    Ok(cmd)
}
