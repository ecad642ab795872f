//! # Code Generation
//!
//! Converts IR programs to ESC/POS bytes.

use super::ops::{Op, Program};
use crate::protocol::encoding::CodePage;
use crate::protocol::{commands, qr, text};

impl Program {
    /// Compile the IR program to one contiguous ESC/POS buffer.
    ///
    /// Text is encoded for the code page in effect at that point: the
    /// power-on table until a `SetCodePage`, and again after each `Init`.
    /// Chunking for the Bluetooth link happens in the transport, not here.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.ops.len() * 8);
        let mut page = CodePage::default();

        for op in &self.ops {
            match op {
                // ===== Printer Control =====
                Op::Init => {
                    out.extend_from_slice(commands::INIT);
                    page = CodePage::default();
                }
                Op::Cut { partial } => {
                    if *partial {
                        out.extend_from_slice(commands::CUT_PARTIAL);
                    } else {
                        out.extend_from_slice(commands::CUT_FULL);
                    }
                }
                Op::SetCodePage(p) => {
                    out.extend_from_slice(&p.select());
                    page = *p;
                }

                // ===== Style Changes =====
                Op::SetAlign(align) => out.extend_from_slice(text::align(*align)),
                Op::SetBold(enabled) => out.extend_from_slice(text::bold(*enabled)),
                Op::SetSize(size) => out.extend_from_slice(text::size(*size)),
                Op::ResetStyle => {
                    out.extend_from_slice(commands::SIZE_NORMAL);
                    out.extend_from_slice(commands::BOLD_OFF);
                }

                // ===== Content =====
                Op::Text(s) => out.extend(page.encode(s)),
                Op::Newline => out.push(commands::LF),
                Op::Raw(bytes) => out.extend_from_slice(bytes),

                // ===== Barcodes =====
                Op::QrCode {
                    data,
                    module_size,
                    error_level,
                } => out.extend(qr::native(data.as_bytes(), *module_size, *error_level)),
            }
        }

        out
    }
}
