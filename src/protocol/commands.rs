//! # ESC/POS Control Sequences
//!
//! Static byte table for the ESC/POS commands used on receipts. Every
//! sequence here is a literal pattern from the ESC/POS command reference and
//! must match byte-for-byte what compatible printers expect.
//!
//! ## Escape Sequence Structure
//!
//! - Single byte: `LF`
//! - Two bytes: `ESC @`
//! - With parameter: `ESC a n`, `ESC E n`, `GS ! n`, `ESC t n`, `GS V m`
//!
//! ## Byte Order
//!
//! Multi-byte integers (QR store length, raster dimensions) are
//! **little-endian**: `u16` 0x1234 is sent as `[0x34, 0x12]`.

// ============================================================================
// PREFIX BYTES
// ============================================================================

/// ESC (Escape) - Command prefix byte
pub const ESC: u8 = 0x1B;

/// GS (Group Separator) - Extended command prefix
pub const GS: u8 = 0x1D;

/// LF (Line Feed) - Print the line buffer and advance one line
pub const LF: u8 = 0x0A;

// ============================================================================
// INITIALIZATION
// ============================================================================

/// # Initialize Printer (ESC @)
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC @ |
/// | Hex     | 1B 40 |
///
/// Clears the print buffer and resets alignment, emphasis and character
/// size to power-on defaults. Sent at the start of every receipt.
pub const INIT: &[u8] = &[ESC, b'@'];

// ============================================================================
// ALIGNMENT (ESC a n)
// ============================================================================

/// # Left Alignment (ESC a 0)
///
/// | Format  | Bytes    |
/// |---------|----------|
/// | ASCII   | ESC a 0  |
/// | Hex     | 1B 61 00 |
pub const ALIGN_LEFT: &[u8] = &[ESC, b'a', 0x00];

/// # Center Alignment (ESC a 1)
///
/// | Format  | Bytes    |
/// |---------|----------|
/// | Hex     | 1B 61 01 |
pub const ALIGN_CENTER: &[u8] = &[ESC, b'a', 0x01];

/// # Right Alignment (ESC a 2)
///
/// | Format  | Bytes    |
/// |---------|----------|
/// | Hex     | 1B 61 02 |
pub const ALIGN_RIGHT: &[u8] = &[ESC, b'a', 0x02];

// ============================================================================
// EMPHASIS (ESC E n)
// ============================================================================

/// # Emphasized On (ESC E 1)
///
/// | Format  | Bytes    |
/// |---------|----------|
/// | Hex     | 1B 45 01 |
pub const BOLD_ON: &[u8] = &[ESC, b'E', 0x01];

/// # Emphasized Off (ESC E 0)
pub const BOLD_OFF: &[u8] = &[ESC, b'E', 0x00];

// ============================================================================
// CHARACTER SIZE (GS ! n)
// ============================================================================

/// # Double Width + Height (GS ! 0x11)
///
/// | Format  | Bytes    |
/// |---------|----------|
/// | Hex     | 1D 21 11 |
///
/// High nibble is the width multiplier minus one, low nibble the height
/// multiplier minus one.
pub const SIZE_DOUBLE: &[u8] = &[GS, b'!', 0x11];

/// # Normal Size (GS ! 0x00)
pub const SIZE_NORMAL: &[u8] = &[GS, b'!', 0x00];

// ============================================================================
// CHARACTER CODE TABLE
// ============================================================================

/// # Select Character Code Table (ESC t n)
///
/// | Format  | Bytes    |
/// |---------|----------|
/// | Hex     | 1B 74 n  |
///
/// `n` is the table number in the printer's own numbering; see
/// [`CodePage`](super::encoding::CodePage). `ESC @` resets it to table 0.
#[inline]
pub fn select_code_table(n: u8) -> [u8; 3] {
    [ESC, b't', n]
}

// ============================================================================
// PAPER CONTROL
// ============================================================================

/// # Full Cut (GS V 0)
///
/// | Format  | Bytes    |
/// |---------|----------|
/// | Hex     | 1D 56 00 |
///
/// Printers without an auto-cutter ignore it.
pub const CUT_FULL: &[u8] = &[GS, b'V', 0x00];

/// # Partial Cut (GS V 1)
///
/// Leaves a small hinge so the receipt does not drop.
pub const CUT_PARTIAL: &[u8] = &[GS, b'V', 0x01];
