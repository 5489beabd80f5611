//! # interp-rs — x86-64 AT&T Assembly Interpreter Front-End
//!
//! `interp-rs` is the front-end of an x86-64 assembly interpreter: it turns
//! AT&T-syntax source text into a validated, structured representation of
//! instructions ready for an evaluator.
//!
//! ## Quick Start
//!
//! ```rust
//! use interp_rs::load;
//!
//! let program = load("MOVABSQ $0x1122334455667788, %rax").unwrap();
//! assert_eq!(program.len(), 1);
//! assert_eq!(program[0].instruction.text, "MOVABSQ");
//! ```
//!
//! ## Features
//!
//! - **Full AT&T operand grammar** — registers, immediates, and every
//!   memory-addressing shape from `(%base)` to `disp(%base,%index,scale)`.
//! - **Canonical tokens** — uppercased text with source spans, so errors
//!   and listings quote the program back consistently.
//! - **Schema-driven validation** — per-mnemonic operand counts, size
//!   suffix semantics (`MOVABSQ`, `MOVZBQ`, …), and x86-64 operand rules
//!   such as the memory-to-memory prohibition.
//! - **`no_std` + `alloc`** — embeddable; no I/O, no shared mutable state.

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]
// ── Pedantic lint policy ─────────────────────────────────────────────────
// A front-end works in dense literal tables and wide integer types; the
// lints below are expected and acceptable in this context.
#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::unreadable_literal,
    clippy::match_same_arms,
    clippy::must_use_candidate,
    clippy::module_name_repetitions,
    clippy::uninlined_format_args,
    clippy::doc_markdown,
    clippy::missing_errors_doc,
    clippy::single_match_else,
    clippy::redundant_else
)]

extern crate alloc;

/// Static catalogs: supported mnemonics, size variants, and registers.
pub mod catalog;
/// Error types and source-span diagnostics.
pub mod error;
/// Data model: tokens, registers, mnemonics, variants, statements.
pub mod ir;
/// AT&T lexer with span tracking.
pub mod lexer;
/// Numeric scanner for signed decimal and hexadecimal literals.
pub mod number;
/// Statement grouping over the token stream.
pub mod parser;
/// Per-mnemonic validation schemas.
pub mod schema;
/// Validator framework and the canonical rule library.
pub mod validator;

// Re-exports
pub use catalog::{
    instruction_entry, InstructionEntry, SUPPORTED_INSTRUCTIONS, SUPPORTED_REGISTERS,
    SUPPORTED_VARIANTS,
};
pub use error::{AsmError, Span};
pub use ir::{
    ImmediateToken, InstructionToken, MemoryToken, Mnemonic, Register, RegisterToken, Statement,
    Token, Variant,
};
pub use lexer::tokenize;
pub use parser::parse;
pub use schema::SCHEMAS;
pub use validator::{validate, Schema, ValidatorFn};

use alloc::vec::Vec;

/// Tokenize, group, and validate a whole program in one call.
///
/// Newlines separate instructions; `#` starts a comment.
///
/// # Errors
///
/// Returns [`AsmError`] if the input contains a lexical error, an unknown
/// mnemonic or register, a malformed memory operand, or an operand
/// combination the instruction's schema rejects.
///
/// # Examples
///
/// ```rust
/// use interp_rs::load;
///
/// let program = load("MOV 0x123abc(%rax, %rbx, 8), %rcx").unwrap();
/// assert_eq!(program[0].operands[0].text(), "0x123ABC(%RAX,%RBX,8)");
///
/// // x86-64 has no memory-to-memory moves.
/// assert!(load("MOV (%rax), (%rbx)").is_err());
/// ```
pub fn load(source: &str) -> Result<Vec<Statement>, AsmError> {
    let tokens = lexer::tokenize(source)?;
    parser::parse(&tokens)
}
