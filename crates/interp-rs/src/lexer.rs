//! Lexer for AT&T-syntax x86-64 assembly source text.
//!
//! Produces a flat [`Token`] stream in source order. Whitespace, newlines,
//! and `#` comments separate tokens and are never emitted. The scan is
//! context-sensitive: a mnemonic is recognized only at the start of a line,
//! an operand only after a mnemonic or comma, and the AT&T memory shapes
//! (`disp(base,index,scale)` and friends) are composed into a single
//! `MEMORY` token here rather than left to a downstream grammar.
//!
//! The first error aborts the scan; there is no partial-token recovery.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use crate::catalog;
use crate::error::{AsmError, Span};
use crate::ir::{ImmediateToken, InstructionToken, MemoryToken, Register, RegisterToken, Token};
use crate::number;

/// Scan position between tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Start of a line — only a mnemonic (or blank/comment) may appear.
    LineStart,
    /// After a mnemonic or comma — an operand may appear.
    ExpectOperand,
    /// After a complete operand — a comma or end of line may follow.
    AfterOperand,
}

/// Tokenize assembly source text into a vector of tokens.
///
/// The lexer recognizes:
/// - Mnemonics with optional size suffix (`MOV`, `movq`, `MOVABSQ`)
/// - Registers (`%rax`, uppercased and checked against the catalog)
/// - Immediates (`$42`, `$-0x10`)
/// - Memory operands in every AT&T shape, including a bare displacement
/// - Commas
/// - Comments: `#` to end of line
///
/// Two instructions must be separated by at least one newline.
///
/// # Errors
///
/// Returns the first [`AsmError`] encountered; see the crate-level error
/// table for the full set of lexical error kinds.
pub fn tokenize(source: &str) -> Result<Vec<Token>, AsmError> {
    Lexer::new(source).run()
}

struct Lexer<'s> {
    src: &'s str,
    bytes: &'s [u8],
    pos: usize,
    line: u32,
    line_start: usize,
}

impl<'s> Lexer<'s> {
    fn new(source: &'s str) -> Self {
        Self {
            src: source,
            bytes: source.as_bytes(),
            pos: 0,
            line: 1,
            line_start: 0,
        }
    }

    /// Span starting at `start` on the current line.
    fn span(&self, start: usize, len: usize) -> Span {
        Span::new(self.line, (start - self.line_start) as u32 + 1, start, len)
    }

    fn run(mut self) -> Result<Vec<Token>, AsmError> {
        // Heuristic: ~4 chars per token on average.
        let mut tokens = Vec::with_capacity(self.bytes.len() / 4 + 1);
        let mut state = State::LineStart;

        while self.pos < self.bytes.len() {
            let ch = self.bytes[self.pos];
            match ch {
                // Whitespace (but not newlines): separator only.
                b' ' | b'\t' | b'\r' => self.pos += 1,

                b'\n' => {
                    self.pos += 1;
                    self.line += 1;
                    self.line_start = self.pos;
                    state = State::LineStart;
                }

                // Comment: # to EOL.
                b'#' => {
                    while self.pos < self.bytes.len() && self.bytes[self.pos] != b'\n' {
                        self.pos += 1;
                    }
                }

                // Comma: only between operands. Anywhere else (line start,
                // right after a mnemonic, doubled) it falls through to the
                // stray-glyph error below.
                b',' if state == State::AfterOperand => {
                    tokens.push(Token::Comma(self.span(self.pos, 1)));
                    self.pos += 1;
                    state = State::ExpectOperand;
                }

                _ if state == State::LineStart => {
                    if ch.is_ascii_alphabetic() {
                        tokens.push(self.lex_mnemonic()?);
                        state = State::ExpectOperand;
                    } else {
                        return Err(self.unexpected_character(ch));
                    }
                }

                // Operand position (states ExpectOperand and AfterOperand).
                _ => {
                    let token = match ch {
                        b'%' => self.lex_register()?,
                        b'$' => self.lex_immediate()?,
                        b'(' => self.lex_memory(None, self.pos)?,
                        b'0'..=b'9' | b'-' => self.lex_displacement()?,
                        b')' => {
                            return Err(AsmError::MissingOpeningParenthesis {
                                span: self.span(self.pos, 1),
                            });
                        }
                        _ if ch.is_ascii_alphabetic() => {
                            // A letter where an operand belongs can only be
                            // the next instruction started on the same line.
                            let (word, span) = self.scan_alpha_run();
                            return Err(AsmError::ExpectedNewlineBeforeSubsequentInstruction {
                                mnemonic: word,
                                span,
                            });
                        }
                        _ => return Err(self.unexpected_character(ch)),
                    };
                    tokens.push(token);
                    state = State::AfterOperand;
                }
            }
        }

        Ok(tokens)
    }

    /// Consume an alphabetic run and return it uppercased with its span.
    fn scan_alpha_run(&mut self) -> (String, Span) {
        let start = self.pos;
        while self.pos < self.bytes.len() && self.bytes[self.pos].is_ascii_alphabetic() {
            self.pos += 1;
        }
        let word = self.src[start..self.pos].to_ascii_uppercase();
        let span = self.span(start, self.pos - start);
        (word, span)
    }

    /// Consume the extent of a signed integer literal: optional `-`, then a
    /// run of alphanumerics (covers both radixes; validation happens in
    /// [`number::parse_int`]).
    fn scan_literal_extent(&mut self) -> &'s str {
        let start = self.pos;
        if self.bytes.get(self.pos) == Some(&b'-') {
            self.pos += 1;
        }
        while self.pos < self.bytes.len() && self.bytes[self.pos].is_ascii_alphanumeric() {
            self.pos += 1;
        }
        &self.src[start..self.pos]
    }

    fn lex_mnemonic(&mut self) -> Result<Token, AsmError> {
        let (word, span) = self.scan_alpha_run();
        let Some((mnemonic, variant)) = catalog::split_mnemonic(&word) else {
            return Err(AsmError::UnsupportedInstruction {
                mnemonic: word,
                span,
            });
        };
        // Whitespace (or end of input) must separate the mnemonic from
        // whatever follows.
        if let Some(&next) = self.bytes.get(self.pos) {
            if !matches!(next, b' ' | b'\t' | b'\r' | b'\n') {
                return Err(AsmError::ExpectedWhitespaceAfterInstruction {
                    mnemonic: word,
                    span,
                });
            }
        }
        Ok(Token::Instruction(InstructionToken {
            text: word,
            mnemonic,
            variant,
            span,
        }))
    }

    fn lex_register(&mut self) -> Result<Token, AsmError> {
        let start = self.pos;
        self.pos += 1; // consume '%'
        let name_start = self.pos;
        while self.pos < self.bytes.len() && self.bytes[self.pos].is_ascii_alphanumeric() {
            self.pos += 1;
        }
        let name = self.src[name_start..self.pos].to_ascii_uppercase();
        let span = self.span(start, self.pos - start);
        let Some(reg) = Register::from_name(&name) else {
            return Err(AsmError::UnexpectedRegister {
                name: format!("%{name}"),
                span,
            });
        };
        Ok(Token::Register(RegisterToken {
            text: format!("%{name}"),
            reg,
            span,
        }))
    }

    fn lex_immediate(&mut self) -> Result<Token, AsmError> {
        let start = self.pos;
        self.pos += 1; // consume '$'
        let lit_start = self.pos;
        let literal = self.scan_literal_extent();
        if literal.is_empty() || literal == "-" {
            return Err(AsmError::EmptyImmediate {
                span: self.span(start, self.pos - start),
            });
        }
        let Some(value) = number::parse_int(literal) else {
            return Err(AsmError::InvalidNumber {
                literal: number::canonicalize(literal),
                span: self.span(lit_start, self.pos - lit_start),
            });
        };
        Ok(Token::Immediate(ImmediateToken {
            text: format!("${}", number::canonicalize(literal)),
            value,
            span: self.span(start, self.pos - start),
        }))
    }

    /// A bare integer at operand position: either the displacement of a
    /// parenthesized memory operand, or a displacement-only memory operand.
    fn lex_displacement(&mut self) -> Result<Token, AsmError> {
        let start = self.pos;
        let literal = self.scan_literal_extent();
        let Some(value) = number::parse_int(literal) else {
            return Err(AsmError::InvalidNumber {
                literal: number::canonicalize(literal),
                span: self.span(start, self.pos - start),
            });
        };
        let canon = number::canonicalize(literal);
        if self.bytes.get(self.pos) == Some(&b'(') {
            return self.lex_memory(Some((value, canon)), start);
        }
        let span = self.span(start, self.pos - start);
        Ok(Token::Memory(MemoryToken {
            text: canon,
            disp: Some(value),
            base: None,
            index: None,
            scale: None,
            span,
        }))
    }

    /// Parse `(…)` at the current position into a memory token. `disp` is
    /// the already-consumed displacement (value + canonical text); `start`
    /// is where the whole operand began.
    fn lex_memory(
        &mut self,
        disp: Option<(i128, String)>,
        start: usize,
    ) -> Result<Token, AsmError> {
        let open = self.pos; // at '('
        let mut end = open + 1;
        while end < self.bytes.len() && self.bytes[end] != b')' && self.bytes[end] != b'\n' {
            end += 1;
        }
        if end >= self.bytes.len() || self.bytes[end] == b'\n' {
            return Err(AsmError::MissingClosingParenthesis {
                span: self.span(open, 1),
            });
        }
        let inner = &self.src[open + 1..end];
        self.pos = end + 1;
        let span = self.span(start, self.pos - start);

        let fields: Vec<&str> = inner.split(',').map(str::trim).collect();
        if fields.len() > 3 {
            return Err(AsmError::InvalidAddressing {
                group: self.src[open..=end].to_ascii_uppercase(),
                span,
            });
        }

        // Positional assignment: 1 field = base; 2 = base, index;
        // 3 = base, index, scale with the base slot allowed to be empty.
        let mut base = None;
        if !(fields.len() == 3 && fields[0].is_empty()) {
            base = Some(self.memory_register(fields[0], span, true)?);
        }
        let mut index = None;
        if fields.len() >= 2 {
            index = Some(self.memory_register(fields[1], span, false)?);
        }
        let mut scale = None;
        if fields.len() == 3 {
            let Some(value) = number::parse_int(fields[2]) else {
                return Err(AsmError::InvalidNumber {
                    literal: number::canonicalize(fields[2]),
                    span,
                });
            };
            scale = Some(value);
        }

        let mut text = String::with_capacity(self.pos - start);
        if let Some((_, canon)) = &disp {
            text.push_str(canon);
        }
        text.push('(');
        if let Some(b) = base {
            text.push('%');
            text.push_str(b.name());
        }
        if let Some(i) = index {
            text.push(',');
            text.push('%');
            text.push_str(i.name());
        }
        if fields.len() == 3 {
            text.push(',');
            text.push_str(&number::canonicalize(fields[2]));
        }
        text.push(')');

        Ok(Token::Memory(MemoryToken {
            text,
            disp: disp.map(|(value, _)| value),
            base,
            index,
            scale,
            span,
        }))
    }

    /// Resolve one `%name` field of a memory tuple against the catalog.
    fn memory_register(&self, field: &str, span: Span, is_base: bool) -> Result<Register, AsmError> {
        let reject = || {
            let field = field.to_ascii_uppercase();
            if is_base {
                AsmError::InvalidBaseRegister { field, span }
            } else {
                AsmError::InvalidIndexRegister { field, span }
            }
        };
        let Some(name) = field.strip_prefix('%') else {
            return Err(reject());
        };
        Register::from_name(&name.to_ascii_uppercase()).ok_or_else(reject)
    }

    fn unexpected_character(&self, ch: u8) -> AsmError {
        AsmError::UnexpectedCharacter {
            found: ch as char,
            span: self.span(self.pos, 1),
        }
    }
}
