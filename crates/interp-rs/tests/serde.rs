//! Serde round-trip tests for `interp_rs` public types.
//!
//! Validates that the data model serializes to JSON and deserializes back
//! to identical values, so tooling can persist token streams and errors.

#![cfg(feature = "serde")]

use interp_rs::{load, tokenize, AsmError, Mnemonic, Register, Span, Statement, Token, Variant};

/// Helper: serialize to JSON, deserialize back, assert equality.
fn round_trip<T>(val: &T)
where
    T: serde::Serialize + serde::de::DeserializeOwned + PartialEq + core::fmt::Debug,
{
    let json = serde_json::to_string(val).expect("serialize");
    let back: T = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(val, &back, "round-trip mismatch for JSON: {json}");
}

// ─── Span ───────────────────────────────────────────────────────────────────

#[test]
fn serde_span() {
    round_trip(&Span::new(1, 5, 10, 3));
    round_trip(&Span::default());
}

// ─── Register / Mnemonic / Variant ──────────────────────────────────────────

#[test]
fn serde_register_samples() {
    for reg in [
        Register::Rax,
        Register::Eax,
        Register::Ax,
        Register::Al,
        Register::Ah,
        Register::Sil,
        Register::R15b,
    ] {
        round_trip(&reg);
    }
}

#[test]
fn serde_mnemonic_samples() {
    for m in [Mnemonic::Mov, Mnemonic::Movz, Mnemonic::Lea, Mnemonic::Syscall] {
        round_trip(&m);
    }
}

#[test]
fn serde_variant_samples() {
    for v in [Variant::B, Variant::Q, Variant::Absq, Variant::Bq] {
        round_trip(&v);
    }
}

// ─── Tokens ─────────────────────────────────────────────────────────────────

#[test]
fn serde_token_stream() {
    let tokens = tokenize("MOVABSQ $0x1234567890abcdef, %rax\nMOV -8(%rbp, %rsi, 4), %rbx")
        .unwrap();
    for token in &tokens {
        round_trip(token);
    }
    round_trip(&tokens);
}

#[test]
fn serde_token_kind_is_tagged() {
    let tokens = tokenize("MOV %rax, %rbx").unwrap();
    let json = serde_json::to_string(&tokens[1]).unwrap();
    assert!(json.contains("Register"), "got: {json}");
}

// ─── Statements ─────────────────────────────────────────────────────────────

#[test]
fn serde_statements() {
    let program: Vec<Statement> = load("PUSH %rbp\nMOV %rsp, %rbp\nRET").unwrap();
    round_trip(&program);
}

// ─── Errors ─────────────────────────────────────────────────────────────────

#[test]
fn serde_errors() {
    let samples = [
        tokenize("FROB").unwrap_err(),
        tokenize("MOV $, %rax").unwrap_err(),
        tokenize("MOV (%rax,,8), %rcx").unwrap_err(),
        load("MOV (%rax), (%rbx)").unwrap_err(),
        load("ADDL %rax, %ebx").unwrap_err(),
        load("MOV %rax").unwrap_err(),
        load("MOV %rax, %rbx,").unwrap_err(),
    ];
    for err in &samples {
        round_trip::<AsmError>(err);
    }

    // The token reaches JSON consumers too.
    let json = serde_json::to_string(&samples[0]).unwrap();
    assert!(json.contains("FROB"), "got: {json}");
}

#[test]
fn serde_full_memory_token() {
    let tokens = tokenize("MOV 0x123abc(%rax, %rbx, 8), %rcx").unwrap();
    let Token::Memory(mem) = &tokens[1] else {
        panic!("expected memory token");
    };
    round_trip(mem);
}
