//! One validation schema per supported mnemonic.
//!
//! The schemas share the catalog's variant groups and draw their rules
//! from the validator library; what varies per mnemonic is the operand
//! count set and which rules run, in which order.

use crate::catalog;
use crate::ir::Mnemonic;
use crate::validator::{self, Schema, ValidatorFn};

const COUNT_0: &[usize] = &[0];
const COUNT_1: &[usize] = &[1];
const COUNT_2: &[usize] = &[2];
const COUNT_1_OR_2: &[usize] = &[1, 2];

const NO_RULES: &[ValidatorFn] = &[];

/// Shared operand-level list: memory shapes, then destination kind, then
/// register widths.
const OPERAND_RULES: &[ValidatorFn] = &[
    validator::valid_memory_operands,
    validator::writable_destination,
    validator::variant_register_operand_size,
];

/// Shifts and extending moves size their operands asymmetrically, so the
/// width rule is left to their instruction-level rule.
const UNSIZED_OPERAND_RULES: &[ValidatorFn] = &[
    validator::valid_memory_operands,
    validator::writable_destination,
];

const PUSH_OPERAND_RULES: &[ValidatorFn] = &[
    validator::valid_memory_operands,
    validator::variant_register_operand_size,
];

const MOV_RULES: &[ValidatorFn] = &[validator::absq_operands, validator::no_memory_to_memory];
const EXTEND_RULES: &[ValidatorFn] = &[
    validator::mov_extension_operands,
    validator::no_memory_to_memory,
];
const ALU_RULES: &[ValidatorFn] = &[validator::no_memory_to_memory];
const LEA_RULES: &[ValidatorFn] = &[validator::lea_operands];
const SHIFT_RULES: &[ValidatorFn] = &[validator::shift_operands];

/// Validation schema table.
/// Sorted by mnemonic for binary search lookup.
pub const SCHEMAS: &[Schema] = &[
    Schema {
        mnemonic: Mnemonic::Add,
        supported_variants: catalog::SIZE_VARIANTS,
        operand_counts: COUNT_2,
        operand_validators: OPERAND_RULES,
        validators: ALU_RULES,
    },
    Schema {
        mnemonic: Mnemonic::And,
        supported_variants: catalog::SIZE_VARIANTS,
        operand_counts: COUNT_2,
        operand_validators: OPERAND_RULES,
        validators: ALU_RULES,
    },
    Schema {
        mnemonic: Mnemonic::Cmp,
        supported_variants: catalog::SIZE_VARIANTS,
        operand_counts: COUNT_2,
        operand_validators: OPERAND_RULES,
        validators: ALU_RULES,
    },
    Schema {
        mnemonic: Mnemonic::Dec,
        supported_variants: catalog::SIZE_VARIANTS,
        operand_counts: COUNT_1,
        operand_validators: OPERAND_RULES,
        validators: NO_RULES,
    },
    Schema {
        mnemonic: Mnemonic::Imul,
        supported_variants: catalog::SIZE_VARIANTS,
        operand_counts: COUNT_1_OR_2,
        operand_validators: OPERAND_RULES,
        validators: ALU_RULES,
    },
    Schema {
        mnemonic: Mnemonic::Inc,
        supported_variants: catalog::SIZE_VARIANTS,
        operand_counts: COUNT_1,
        operand_validators: OPERAND_RULES,
        validators: NO_RULES,
    },
    Schema {
        mnemonic: Mnemonic::Lea,
        supported_variants: catalog::LEA_VARIANTS,
        operand_counts: COUNT_2,
        operand_validators: OPERAND_RULES,
        validators: LEA_RULES,
    },
    Schema {
        mnemonic: Mnemonic::Mov,
        supported_variants: catalog::MOV_VARIANTS,
        operand_counts: COUNT_2,
        operand_validators: OPERAND_RULES,
        validators: MOV_RULES,
    },
    Schema {
        mnemonic: Mnemonic::Movs,
        supported_variants: catalog::EXTEND_VARIANTS,
        operand_counts: COUNT_2,
        operand_validators: UNSIZED_OPERAND_RULES,
        validators: EXTEND_RULES,
    },
    Schema {
        mnemonic: Mnemonic::Movz,
        supported_variants: catalog::EXTEND_VARIANTS,
        operand_counts: COUNT_2,
        operand_validators: UNSIZED_OPERAND_RULES,
        validators: EXTEND_RULES,
    },
    Schema {
        mnemonic: Mnemonic::Neg,
        supported_variants: catalog::SIZE_VARIANTS,
        operand_counts: COUNT_1,
        operand_validators: OPERAND_RULES,
        validators: NO_RULES,
    },
    Schema {
        mnemonic: Mnemonic::Nop,
        supported_variants: catalog::NO_VARIANTS,
        operand_counts: COUNT_0,
        operand_validators: NO_RULES,
        validators: NO_RULES,
    },
    Schema {
        mnemonic: Mnemonic::Not,
        supported_variants: catalog::SIZE_VARIANTS,
        operand_counts: COUNT_1,
        operand_validators: OPERAND_RULES,
        validators: NO_RULES,
    },
    Schema {
        mnemonic: Mnemonic::Or,
        supported_variants: catalog::SIZE_VARIANTS,
        operand_counts: COUNT_2,
        operand_validators: OPERAND_RULES,
        validators: ALU_RULES,
    },
    Schema {
        mnemonic: Mnemonic::Pop,
        supported_variants: catalog::STACK_VARIANTS,
        operand_counts: COUNT_1,
        operand_validators: OPERAND_RULES,
        validators: NO_RULES,
    },
    Schema {
        mnemonic: Mnemonic::Push,
        supported_variants: catalog::STACK_VARIANTS,
        operand_counts: COUNT_1,
        operand_validators: PUSH_OPERAND_RULES,
        validators: NO_RULES,
    },
    Schema {
        mnemonic: Mnemonic::Ret,
        supported_variants: catalog::NO_VARIANTS,
        operand_counts: COUNT_0,
        operand_validators: NO_RULES,
        validators: NO_RULES,
    },
    Schema {
        mnemonic: Mnemonic::Sar,
        supported_variants: catalog::SIZE_VARIANTS,
        operand_counts: COUNT_1_OR_2,
        operand_validators: UNSIZED_OPERAND_RULES,
        validators: SHIFT_RULES,
    },
    Schema {
        mnemonic: Mnemonic::Shl,
        supported_variants: catalog::SIZE_VARIANTS,
        operand_counts: COUNT_1_OR_2,
        operand_validators: UNSIZED_OPERAND_RULES,
        validators: SHIFT_RULES,
    },
    Schema {
        mnemonic: Mnemonic::Shr,
        supported_variants: catalog::SIZE_VARIANTS,
        operand_counts: COUNT_1_OR_2,
        operand_validators: UNSIZED_OPERAND_RULES,
        validators: SHIFT_RULES,
    },
    Schema {
        mnemonic: Mnemonic::Sub,
        supported_variants: catalog::SIZE_VARIANTS,
        operand_counts: COUNT_2,
        operand_validators: OPERAND_RULES,
        validators: ALU_RULES,
    },
    Schema {
        mnemonic: Mnemonic::Syscall,
        supported_variants: catalog::NO_VARIANTS,
        operand_counts: COUNT_0,
        operand_validators: NO_RULES,
        validators: NO_RULES,
    },
    Schema {
        mnemonic: Mnemonic::Test,
        supported_variants: catalog::SIZE_VARIANTS,
        operand_counts: COUNT_2,
        operand_validators: OPERAND_RULES,
        validators: ALU_RULES,
    },
    Schema {
        mnemonic: Mnemonic::Xor,
        supported_variants: catalog::SIZE_VARIANTS,
        operand_counts: COUNT_2,
        operand_validators: OPERAND_RULES,
        validators: ALU_RULES,
    },
];

/// Look up the schema for a mnemonic.
pub fn lookup(mnemonic: Mnemonic) -> Option<&'static Schema> {
    SCHEMAS
        .binary_search_by_key(&mnemonic.as_str(), |s| s.mnemonic.as_str())
        .ok()
        .map(|i| &SCHEMAS[i])
}
