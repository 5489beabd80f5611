//! Validator framework: a small rule engine over per-mnemonic schemas.
//!
//! Each schema declares the variants, operand counts, and an ordered list
//! of rules for one mnemonic. Rules are pure predicates over
//! `(instruction, operands)`; validation is a short-circuit fold that
//! reports the first violation and runs nothing after it.

use alloc::string::String;

use crate::error::AsmError;
use crate::ir::{InstructionToken, Mnemonic, Register, RegisterToken, Token, Variant};
use crate::schema;

/// A single validation rule.
pub type ValidatorFn = fn(&InstructionToken, &[Token]) -> Result<(), AsmError>;

/// Validation schema for one mnemonic.
#[derive(Debug, Clone, Copy)]
pub struct Schema {
    /// The mnemonic this schema certifies.
    pub mnemonic: Mnemonic,
    /// Size suffixes the mnemonic accepts.
    pub supported_variants: &'static [Variant],
    /// Allowed operand counts.
    pub operand_counts: &'static [usize],
    /// Operand-level rules, run first, in order.
    pub operand_validators: &'static [ValidatorFn],
    /// Instruction-level rules, run after the operand rules, in order.
    pub validators: &'static [ValidatorFn],
}

/// Certify an instruction and its operands against the mnemonic's schema.
///
/// # Errors
///
/// Returns the first violation: `UnknownInstruction` when no schema is
/// registered, `UnsupportedVariant`, `WrongOperandCount`, or whatever the
/// first failing rule reports. The error carries the instruction's
/// canonical text and span.
pub fn validate(instruction: &InstructionToken, operands: &[Token]) -> Result<(), AsmError> {
    let Some(schema) = schema::lookup(instruction.mnemonic) else {
        return Err(AsmError::UnknownInstruction {
            mnemonic: instruction.text.clone(),
            span: instruction.span,
        });
    };

    if let Some(variant) = instruction.variant {
        if !schema.supported_variants.contains(&variant) {
            return Err(AsmError::UnsupportedVariant {
                instruction: instruction.text.clone(),
                variant: String::from(variant.as_str()),
                span: instruction.span,
            });
        }
    }

    if !schema.operand_counts.contains(&operands.len()) {
        return Err(AsmError::WrongOperandCount {
            instruction: instruction.text.clone(),
            expected: schema.operand_counts.to_vec(),
            found: operands.len(),
            span: instruction.span,
        });
    }

    for rule in schema.operand_validators {
        rule(instruction, operands)?;
    }
    for rule in schema.validators {
        rule(instruction, operands)?;
    }

    Ok(())
}

fn invalid(instruction: &InstructionToken, detail: &str) -> AsmError {
    AsmError::InvalidOperands {
        instruction: instruction.text.clone(),
        detail: String::from(detail),
        span: instruction.span,
    }
}

fn size_mismatch(
    instruction: &InstructionToken,
    register: &RegisterToken,
    expected_bits: u16,
) -> AsmError {
    AsmError::OperandSizeMismatch {
        instruction: instruction.text.clone(),
        register: register.text.clone(),
        found_bits: register.reg.size_bits(),
        expected_bits,
        span: instruction.span,
    }
}

// ─── Canonical validator library ────────────────────────────────────────

/// The `ABSQ` form moves a 64-bit immediate into a 64-bit register and
/// nothing else.
pub fn absq_operands(instruction: &InstructionToken, operands: &[Token]) -> Result<(), AsmError> {
    if instruction.variant != Some(Variant::Absq) {
        return Ok(());
    }
    match operands {
        [Token::Immediate(_), Token::Register(dst)] if dst.reg.size_bits() == 64 => Ok(()),
        _ => Err(invalid(
            instruction,
            "absolute move takes an immediate source and a 64-bit register destination",
        )),
    }
}

/// Extending moves (`MOVS*`/`MOVZ*`) widen: the destination register takes
/// the suffix's destination width, a register source takes its source
/// width. The variant table only contains widening pairs, so destination
/// strictly wider than source holds by construction.
pub fn mov_extension_operands(
    instruction: &InstructionToken,
    operands: &[Token],
) -> Result<(), AsmError> {
    if !matches!(instruction.mnemonic, Mnemonic::Movs | Mnemonic::Movz) {
        return Ok(());
    }
    let Some((src_bits, dst_bits)) = instruction.variant.and_then(Variant::extension) else {
        return Err(invalid(
            instruction,
            "extending move requires a source/destination size suffix",
        ));
    };
    let [src, dst] = operands else {
        return Err(invalid(instruction, "extending move takes exactly two operands"));
    };
    let Token::Register(dst) = dst else {
        return Err(invalid(instruction, "extending move requires a register destination"));
    };
    if dst.reg.size_bits() != dst_bits {
        return Err(size_mismatch(instruction, dst, dst_bits));
    }
    if let Token::Register(src) = src {
        if src.reg.size_bits() != src_bits {
            return Err(size_mismatch(instruction, src, src_bits));
        }
    }
    Ok(())
}

/// x86-64 has no memory-to-memory data path.
pub fn no_memory_to_memory(
    instruction: &InstructionToken,
    operands: &[Token],
) -> Result<(), AsmError> {
    let memories = operands
        .iter()
        .filter(|op| matches!(op, Token::Memory(_)))
        .count();
    if memories >= 2 {
        return Err(AsmError::MemoryToMemoryTransfer {
            instruction: instruction.text.clone(),
            span: instruction.span,
        });
    }
    Ok(())
}

/// Shape and range checks for every memory operand: at least one field,
/// scale only with an index and drawn from {1, 2, 4, 8}, displacement in
/// signed 32-bit range (signed 64-bit for the `ABSQ` form).
pub fn valid_memory_operands(
    instruction: &InstructionToken,
    operands: &[Token],
) -> Result<(), AsmError> {
    let (min, max) = if instruction.variant == Some(Variant::Absq) {
        (i128::from(i64::MIN), i128::from(i64::MAX))
    } else {
        (i128::from(i32::MIN), i128::from(i32::MAX))
    };
    for op in operands {
        let Token::Memory(mem) = op else { continue };
        if mem.disp.is_none() && mem.base.is_none() && mem.index.is_none() {
            return Err(invalid(
                instruction,
                "memory operand has no displacement, base, or index",
            ));
        }
        if mem.scale.is_some() && mem.index.is_none() {
            return Err(invalid(instruction, "scale factor requires an index register"));
        }
        if let Some(scale) = mem.scale {
            if !matches!(scale, 1 | 2 | 4 | 8) {
                return Err(AsmError::InvalidScale {
                    scale,
                    span: mem.span,
                });
            }
        }
        if let Some(disp) = mem.disp {
            if disp < min || disp > max {
                return Err(AsmError::DisplacementOutOfRange {
                    value: disp,
                    min,
                    max,
                    span: mem.span,
                });
            }
        }
    }
    Ok(())
}

/// A `B`/`W`/`L`/`Q` suffix fixes the width of every register operand.
/// Without a suffix, register operands must agree on one size class.
/// `ABSQ` and the extending suffixes are certified by their own rules.
pub fn variant_register_operand_size(
    instruction: &InstructionToken,
    operands: &[Token],
) -> Result<(), AsmError> {
    if let Some(bits) = instruction.variant.and_then(Variant::size_bits) {
        for op in operands {
            if let Token::Register(reg) = op {
                if reg.reg.size_bits() != bits {
                    return Err(size_mismatch(instruction, reg, bits));
                }
            }
        }
        return Ok(());
    }
    if instruction.variant.is_some() {
        return Ok(());
    }
    let mut expected: Option<u16> = None;
    for op in operands {
        if let Token::Register(reg) = op {
            let bits = reg.reg.size_bits();
            match expected {
                None => expected = Some(bits),
                Some(want) if want != bits => return Err(size_mismatch(instruction, reg, want)),
                Some(_) => {}
            }
        }
    }
    Ok(())
}

/// The written (last) operand can be a register or memory, never an
/// immediate.
pub fn writable_destination(
    instruction: &InstructionToken,
    operands: &[Token],
) -> Result<(), AsmError> {
    if let Some(Token::Immediate(_)) = operands.last() {
        return Err(invalid(instruction, "destination cannot be an immediate"));
    }
    Ok(())
}

/// `LEA` computes an address: memory source, register destination.
pub fn lea_operands(instruction: &InstructionToken, operands: &[Token]) -> Result<(), AsmError> {
    match operands {
        [Token::Memory(_), Token::Register(_)] => Ok(()),
        _ => Err(invalid(
            instruction,
            "requires a memory source and a register destination",
        )),
    }
}

/// Shift count (when present) is an immediate or `%CL`; the size suffix
/// applies to the shifted destination, not to the count register.
pub fn shift_operands(instruction: &InstructionToken, operands: &[Token]) -> Result<(), AsmError> {
    if operands.len() == 2 {
        match &operands[0] {
            Token::Immediate(_) => {}
            Token::Register(reg) if reg.reg == Register::Cl => {}
            _ => return Err(invalid(instruction, "shift count must be an immediate or %CL")),
        }
    }
    if let Some(bits) = instruction.variant.and_then(Variant::size_bits) {
        if let Some(Token::Register(dst)) = operands.last() {
            if dst.reg.size_bits() != bits {
                return Err(size_mismatch(instruction, dst, bits));
            }
        }
    }
    Ok(())
}
