//! # Declarative Components
//!
//! Building blocks for receipts. Each component describes *what* to print
//! and emits IR ops; the IR is serialized to ESC/POS bytes once at the end.
//!
//! ```
//! use mizan::components::*;
//!
//! let receipt = Receipt::new()
//!     .child(Text::new("CORNER SHOP").center().bold().double())
//!     .child(Divider::new(32))
//!     .child(ItemRow::header())
//!     .child(ItemRow::new("Espresso", "1", "1.500"))
//!     .child(BlankLines::new(4));
//!
//! // Compile to IR (inspectable)
//! let ir = receipt.compile();
//! assert!(ir.texts().contains(&"CORNER SHOP"));
//!
//! // Generate bytes
//! let bytes = receipt.build();
//! assert_eq!(&bytes[..2], &[0x1B, 0x40]);
//! ```

mod layout;
mod qr;
mod receipt;
mod text;

pub use layout::*;
pub use qr::*;
pub use receipt::*;
pub use text::*;

use crate::ir::{Op, Program};

/// Trait for declarative components.
pub trait Component {
    /// Emit IR ops for this component into the ops vector.
    fn emit(&self, ops: &mut Vec<Op>);
}

/// Extension trait for compiling components.
pub trait ComponentExt: Component {
    /// Compile this component to an IR program starting with Init.
    fn compile(&self) -> Program {
        let mut ops = vec![Op::Init];
        self.emit(&mut ops);
        Program { ops }
    }

    /// Compile and generate bytes.
    fn build(&self) -> Vec<u8> {
        self.compile().to_bytes()
    }
}

impl<T: Component> ComponentExt for T {}

impl Component for Box<dyn Component> {
    fn emit(&self, ops: &mut Vec<Op>) {
        self.as_ref().emit(ops);
    }
}

impl<T: Component + ?Sized> Component for &T {
    fn emit(&self, ops: &mut Vec<Op>) {
        (*self).emit(ops);
    }
}
