//! # Receipt Component
//!
//! The root container for building receipts.

use super::Component;
use crate::ir::Op;
use crate::printer::CutMode;
use crate::protocol::encoding::CodePage;

/// Receipt is the root container component.
///
/// An optional code page is selected before the first child. Children are
/// emitted in insertion order; an optional cut follows the last child.
///
/// ```
/// use mizan::components::*;
///
/// let receipt = Receipt::new()
///     .child(Text::new("STORE NAME").center())
///     .child(Divider::new(32))
///     .child(ItemRow::new("Item", "1", "9.990"));
///
/// let bytes = receipt.build();
/// ```
pub struct Receipt {
    children: Vec<Box<dyn Component>>,
    code_page: Option<CodePage>,
    cut: Option<CutMode>,
}

impl Default for Receipt {
    fn default() -> Self {
        Self::new()
    }
}

impl Receipt {
    pub fn new() -> Self {
        Self {
            children: Vec::new(),
            code_page: None,
            cut: None,
        }
    }

    /// Add a child component.
    pub fn child<C: Component + 'static>(mut self, component: C) -> Self {
        self.children.push(Box::new(component));
        self
    }

    /// Add multiple child components.
    pub fn children<I, C>(mut self, components: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Component + 'static,
    {
        for c in components {
            self.children.push(Box::new(c));
        }
        self
    }

    /// Character code table for all text in the receipt.
    pub fn code_page(mut self, page: CodePage) -> Self {
        self.code_page = Some(page);
        self
    }

    /// Cut after the last child.
    pub fn cut(mut self, mode: Option<CutMode>) -> Self {
        self.cut = mode;
        self
    }
}

impl Component for Receipt {
    fn emit(&self, ops: &mut Vec<Op>) {
        if let Some(page) = self.code_page {
            ops.push(Op::SetCodePage(page));
        }

        for child in &self.children {
            child.emit(ops);
        }

        if let Some(mode) = self.cut {
            ops.push(Op::Cut {
                partial: mode == CutMode::Partial,
            });
        }
    }
}
