//! # Character Code Tables
//!
//! ESC/POS printers print single-byte text in the selected code table, not
//! UTF-8. Text is encoded here before it reaches the printer.
//!
//! | Page | `ESC t n` | Covers |
//! |------|-----------|--------|
//! | [`CodePage::Ascii`] | 0 (PC437) | ASCII only; everything else prints as `?` |
//! | [`CodePage::Wpc1252`] | 16 | Western European |
//! | [`CodePage::Wpc1256`] | 50 | Arabic plus ASCII |
//!
//! Table numbers follow the Epson numbering most clones copy.
//!
//! Every page is single-byte and unmapped characters become one `?`, so
//! the printed width of a string is its encoded length. Column padding
//! relies on that ([`width`]).

use encoding_rs::{Encoding, WINDOWS_1252, WINDOWS_1256};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::commands;

/// Printer character code table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CodePage {
    /// Power-on table; only ASCII is sent as-is
    #[default]
    Ascii,
    Wpc1252,
    Wpc1256,
}

impl CodePage {
    /// Table number for `ESC t n`.
    pub fn table(self) -> u8 {
        match self {
            CodePage::Ascii => 0,
            CodePage::Wpc1252 => 16,
            CodePage::Wpc1256 => 50,
        }
    }

    /// `ESC t n` for this page.
    pub fn select(self) -> [u8; 3] {
        commands::select_code_table(self.table())
    }

    fn encoding(self) -> Option<&'static Encoding> {
        match self {
            CodePage::Ascii => None,
            CodePage::Wpc1252 => Some(WINDOWS_1252),
            CodePage::Wpc1256 => Some(WINDOWS_1256),
        }
    }

    /// Encode text for this page, one byte per character.
    pub fn encode(self, text: &str) -> Vec<u8> {
        let mut out = Vec::with_capacity(text.len());
        let mut buf = [0u8; 4];
        for ch in text.chars() {
            if ch.is_ascii() {
                out.push(ch as u8);
                continue;
            }
            match self.encode_char(ch.encode_utf8(&mut buf)) {
                Some(byte) => out.push(byte),
                None => {
                    warn!(page = ?self, "unmapped character U+{:04X}, printing '?'", ch as u32);
                    out.push(b'?');
                }
            }
        }
        out
    }

    fn encode_char(self, ch: &str) -> Option<u8> {
        let (bytes, _, had_errors) = self.encoding()?.encode(ch);
        match bytes.as_ref() {
            [byte] if !had_errors && *byte >= 0x80 => Some(*byte),
            _ => None,
        }
    }
}

/// Printed width of `text` in columns.
#[inline]
pub fn width(text: &str) -> usize {
    // Single-byte pages: one column per character, mapped or not.
    text.chars().count()
}

/// Longest prefix of `text` that fits in `max` columns.
pub fn truncate(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Pad to `columns` with spaces, on the left when `align_right`.
pub fn pad(text: &str, columns: usize, align_right: bool) -> String {
    let text = truncate(text, columns);
    let spaces = " ".repeat(columns - width(text));
    if align_right {
        format!("{spaces}{text}")
    } else {
        format!("{text}{spaces}")
    }
}
