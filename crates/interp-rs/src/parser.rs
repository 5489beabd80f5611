//! Statement grouping over the flat token stream.
//!
//! The stream is split at each `INSTRUCTION` token; the trailing operand
//! tokens (comma-separated) belong to it and are forwarded to the
//! validator. This is deliberately the thinnest possible consumer of the
//! lexer's output — the interesting grammar already lives in the tokens.

use alloc::string::String;
use alloc::vec::Vec;

use crate::error::AsmError;
use crate::ir::{Statement, Token};
use crate::validator;

/// Group a token stream into validated instruction statements.
///
/// # Errors
///
/// Returns `ExpectedInstruction` when the stream does not begin with an
/// instruction token, `ExpectedOperandAfterComma` when an operand list
/// ends on its separator, or whatever the validator reports for the first
/// statement that fails certification.
pub fn parse(tokens: &[Token]) -> Result<Vec<Statement>, AsmError> {
    // Heuristic: ~4 tokens per statement on average.
    let mut statements = Vec::with_capacity(tokens.len() / 4 + 1);
    let mut pos = 0;

    while pos < tokens.len() {
        let instruction = match &tokens[pos] {
            Token::Instruction(instruction) => instruction.clone(),
            other => {
                return Err(AsmError::ExpectedInstruction {
                    found: String::from(other.text()),
                    span: other.span(),
                });
            }
        };
        pos += 1;

        let mut operands = Vec::new();
        // The lexer only emits a comma after a completed operand; what it
        // cannot see is a comma with nothing following it.
        let mut dangling_comma = None;
        while pos < tokens.len() && !matches!(tokens[pos], Token::Instruction(_)) {
            match &tokens[pos] {
                Token::Comma(span) => dangling_comma = Some(*span),
                operand => {
                    operands.push(operand.clone());
                    dangling_comma = None;
                }
            }
            pos += 1;
        }
        if let Some(span) = dangling_comma {
            return Err(AsmError::ExpectedOperandAfterComma {
                instruction: instruction.text.clone(),
                span,
            });
        }

        validator::validate(&instruction, &operands)?;
        statements.push(Statement {
            instruction,
            operands,
        });
    }

    Ok(statements)
}
