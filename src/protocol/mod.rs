//! # ESC/POS Protocol Implementation
//!
//! Low-level byte builders for generic ESC/POS thermal printers.
//!
//! ## Module Structure
//!
//! - [`commands`]: Static table of control sequences (init, align, emphasis, size, feed, cut)
//! - [`text`]: Typed style settings mapped onto the table
//! - [`encoding`]: Character code tables (`ESC t n`) and text encoding
//! - [`qr`]: Native (`GS ( k`) and raster (`GS v 0`) QR codes
//!
//! ## Usage Example
//!
//! ```
//! use mizan::protocol::{commands, text};
//!
//! let mut data = Vec::new();
//! data.extend_from_slice(commands::INIT);
//! data.extend_from_slice(text::align(text::Alignment::Center));
//! data.extend_from_slice(text::bold(true));
//! data.extend_from_slice(b"RECEIPT\n");
//! data.extend_from_slice(text::bold(false));
//! assert_eq!(&data[..2], &[0x1B, 0x40]);
//! ```

pub mod commands;
pub mod encoding;
pub mod qr;
pub mod text;
