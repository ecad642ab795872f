//! # QR Block Component

use tracing::warn;

use super::Component;
use crate::ir::Op;
use crate::printer::QrMode;
use crate::protocol::qr::{self, QrErrorLevel};
use crate::protocol::text::Alignment;

/// Line printed in place of the symbol in [`QrMode::Placeholder`]
pub const QR_PLACEHOLDER: &str = "[ e-invoice QR ]";

/// The fiscal QR, centered.
///
/// Empty payloads emit nothing. If a raster symbol cannot be built (payload
/// too large for any QR version) the placeholder line is printed instead.
pub struct QrBlock {
    payload: String,
    mode: QrMode,
    module_size: u8,
}

impl QrBlock {
    pub fn new(payload: impl Into<String>, mode: QrMode) -> Self {
        Self {
            payload: payload.into(),
            mode,
            module_size: 6,
        }
    }

    pub fn module_size(mut self, size: u8) -> Self {
        self.module_size = size;
        self
    }

    fn placeholder(ops: &mut Vec<Op>) {
        ops.push(Op::Text(QR_PLACEHOLDER.to_string()));
        ops.push(Op::Newline);
    }
}

impl Component for QrBlock {
    fn emit(&self, ops: &mut Vec<Op>) {
        if self.payload.is_empty() {
            return;
        }

        ops.push(Op::SetAlign(Alignment::Center));
        match self.mode {
            QrMode::Placeholder => Self::placeholder(ops),
            QrMode::Native => {
                ops.push(Op::QrCode {
                    data: self.payload.clone(),
                    module_size: self.module_size,
                    error_level: QrErrorLevel::M,
                });
                ops.push(Op::Newline);
            }
            QrMode::Raster => {
                match qr::raster(self.payload.as_bytes(), self.module_size, QrErrorLevel::M) {
                    Ok(image) => {
                        ops.push(Op::Raw(image));
                        ops.push(Op::Newline);
                    }
                    Err(e) => {
                        warn!(error = %e, "raster QR failed, printing placeholder");
                        Self::placeholder(ops);
                    }
                }
            }
        }
    }
}
