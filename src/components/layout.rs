//! # Layout Components
//!
//! Separators, the fixed-width item table, and blank lines.

use super::{Component, Text};
use crate::ir::Op;
use crate::protocol::encoding;

/// Longest item name printed before truncation
pub const NAME_MAX_CHARS: usize = 15;

/// Name column width (truncated name plus at least one space)
pub const NAME_WIDTH: usize = 16;

/// Quantity column width, right-aligned
pub const QTY_WIDTH: usize = 7;

/// Total column width, right-aligned
pub const TOTAL_WIDTH: usize = 9;

/// A horizontal line of dashes across the paper.
///
/// ```
/// use mizan::components::Divider;
///
/// let div = Divider::new(32);
/// ```
pub struct Divider {
    width: usize,
}

impl Divider {
    pub fn new(width: usize) -> Self {
        Self { width }
    }
}

impl Component for Divider {
    fn emit(&self, ops: &mut Vec<Op>) {
        ops.push(Op::Text("-".repeat(self.width)));
        ops.push(Op::Newline);
    }
}

/// One row of the item table: name, quantity, total.
///
/// ```text
/// ITEM                QTY    TOTAL
/// Basmati Rice 5k       2   12.500
/// └──── 16 ─────┘└─ 7 ─┘└── 9 ──┘
/// ```
///
/// Columns are measured in printed width ([`encoding::width`]), so Arabic
/// names line up with Latin ones once encoded. Names are cut to 15 columns.
pub struct ItemRow {
    name: String,
    quantity: String,
    total: String,
}

impl ItemRow {
    pub fn new(
        name: impl Into<String>,
        quantity: impl Into<String>,
        total: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            quantity: quantity.into(),
            total: total.into(),
        }
    }

    /// The `ITEM / QTY / TOTAL` column header.
    pub fn header() -> Self {
        Self::new("ITEM", "QTY", "TOTAL")
    }

    /// The formatted row, without line feed.
    pub fn line(&self) -> String {
        let name = encoding::truncate(&self.name, NAME_MAX_CHARS);
        let mut line = encoding::pad(name, NAME_WIDTH, false);
        line.push_str(&encoding::pad(&self.quantity, QTY_WIDTH, true));
        line.push_str(&encoding::pad(&self.total, TOTAL_WIDTH, true));
        line
    }
}

impl Component for ItemRow {
    fn emit(&self, ops: &mut Vec<Op>) {
        ops.push(Op::Text(self.line()));
        ops.push(Op::Newline);
    }
}

/// A right-aligned `Label: amount` line under the item table.
///
/// ```
/// use mizan::components::TotalLine;
///
/// let total = TotalLine::new("TOTAL", "10.500").bold();
/// assert_eq!(total.line(), "TOTAL: 10.500");
/// ```
pub struct TotalLine {
    label: String,
    amount: String,
    bold: bool,
}

impl TotalLine {
    pub fn new(label: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            amount: amount.into(),
            bold: false,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn line(&self) -> String {
        format!("{}: {}", self.label, self.amount)
    }
}

impl Component for TotalLine {
    fn emit(&self, ops: &mut Vec<Op>) {
        let text = Text::new(self.line()).right();
        if self.bold {
            text.bold().emit(ops);
        } else {
            text.emit(ops);
        }
    }
}

/// N bare line feeds.
pub struct BlankLines {
    count: u8,
}

impl BlankLines {
    pub fn new(count: u8) -> Self {
        Self { count }
    }
}

impl Component for BlankLines {
    fn emit(&self, ops: &mut Vec<Op>) {
        ops.extend(std::iter::repeat_n(Op::Newline, usize::from(self.count)));
    }
}
