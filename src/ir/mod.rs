//! # Intermediate Representation (IR)
//!
//! The IR sits between declarative components and raw ESC/POS bytes.
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌──────────┐
//! │ Components  │ ──► │     IR      │ ──► │ Codegen  │
//! │(declarative)│     │  (Vec<Op>)  │     │ (bytes)  │
//! └─────────────┘     └─────────────┘     └──────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use mizan::ir::{Op, Program};
//! use mizan::protocol::text::Alignment;
//!
//! let mut program = Program::with_init();
//! program.push(Op::SetAlign(Alignment::Center));
//! program.push(Op::SetBold(true));
//! program.push(Op::Text("HELLO".into()));
//! program.push(Op::Newline);
//!
//! let bytes = program.to_bytes();
//! assert_eq!(&bytes[..2], &[0x1B, 0x40]);
//! ```

mod codegen;
mod ops;

pub use ops::*;
