//! # IR Opcodes
//!
//! Typed command tokens for receipt printing. A [`Program`] is an ordered
//! sequence of ops that is serialized to ESC/POS bytes exactly once.
//!
//! ```text
//! Components → IR (inspectable) → Codegen → Bytes
//! ```
//!
//! Each op is a single atomic operation, so tests can assert on the layout
//! without decoding escape sequences.

use crate::protocol::encoding::CodePage;
use crate::protocol::qr::QrErrorLevel;
use crate::protocol::text::{Alignment, CharSize};

/// IR opcodes - the "bytecode" for receipt printing.
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    // ========== Printer Control ==========
    /// Initialize printer (ESC @).
    Init,

    /// Cut paper. `partial: true` leaves a small hinge.
    Cut { partial: bool },

    /// Select the character code table (ESC t n). Init resets it.
    SetCodePage(CodePage),

    // ========== Style Changes ==========
    /// Set text alignment.
    SetAlign(Alignment),

    /// Enable/disable emphasis.
    SetBold(bool),

    /// Set character size.
    SetSize(CharSize),

    /// Back to normal size, emphasis off.
    ResetStyle,

    // ========== Content ==========
    /// Text (no trailing newline), encoded for the current code page.
    Text(String),

    /// Line feed.
    Newline,

    /// Pre-encoded bytes (e.g. a raster bit image).
    Raw(Vec<u8>),

    // ========== Barcodes ==========
    /// Native QR code (GS ( k).
    QrCode {
        data: String,
        module_size: u8,
        error_level: QrErrorLevel,
    },
}

/// An ordered IR program.
#[derive(Debug, Clone, Default)]
pub struct Program {
    pub ops: Vec<Op>,
}

impl Program {
    /// Create an empty program.
    pub fn new() -> Self {
        Self { ops: Vec::new() }
    }

    /// Create a program with an initial Init op.
    pub fn with_init() -> Self {
        Self {
            ops: vec![Op::Init],
        }
    }

    /// Add an op to the program.
    pub fn push(&mut self, op: Op) {
        self.ops.push(op);
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Text of every `Text` op, in order. Handy for layout assertions.
    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Text(s) => Some(s.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl FromIterator<Op> for Program {
    fn from_iter<T: IntoIterator<Item = Op>>(iter: T) -> Self {
        Self {
            ops: iter.into_iter().collect(),
        }
    }
}
