//! # Text Styling
//!
//! Maps typed style settings onto the static sequences in
//! [`super::commands`].
//!
//! ```text
//! Left aligned (default)    |LEFT TEXT
//! Center aligned            |  CENTER TEXT
//! Right aligned             |      RIGHT TEXT
//! ```

use super::commands::{
    ALIGN_CENTER, ALIGN_LEFT, ALIGN_RIGHT, BOLD_OFF, BOLD_ON, SIZE_DOUBLE, SIZE_NORMAL,
};

/// Text alignment options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

/// Character size supported by the receipt layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CharSize {
    #[default]
    Normal,
    /// Double width and double height
    Double,
}

/// ESC a n for the given alignment.
#[inline]
pub fn align(alignment: Alignment) -> &'static [u8] {
    match alignment {
        Alignment::Left => ALIGN_LEFT,
        Alignment::Center => ALIGN_CENTER,
        Alignment::Right => ALIGN_RIGHT,
    }
}

/// ESC E n
#[inline]
pub fn bold(enabled: bool) -> &'static [u8] {
    if enabled { BOLD_ON } else { BOLD_OFF }
}

/// GS ! n
#[inline]
pub fn size(size: CharSize) -> &'static [u8] {
    match size {
        CharSize::Normal => SIZE_NORMAL,
        CharSize::Double => SIZE_DOUBLE,
    }
}
