//! Numeric scanner: signed decimal and hexadecimal integer literals.
//!
//! The grammar is deliberately narrow — two radixes, optional sign, no
//! digit separators:
//!
//! ```text
//! signed-int ::= [ "-" ] ( "0x" HEXDIGITS | DIGITS )
//! ```

use alloc::string::String;

/// Parse a literal into its value.
///
/// Returns `None` when the text matches neither the decimal nor the
/// hexadecimal grammar, including overflow past `i128`.
pub fn parse_int(literal: &str) -> Option<i128> {
    let (neg, body) = match literal.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, literal),
    };
    let magnitude = if let Some(hex) = strip_radix_prefix(body) {
        if hex.is_empty() || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        i128::from_str_radix(hex, 16).ok()?
    } else {
        if body.is_empty() || !body.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        body.parse::<i128>().ok()?
    };
    Some(if neg { -magnitude } else { magnitude })
}

/// Canonical form of a literal: sign preserved, radix prefix normalized to
/// `0x`, hex digits uppercased. Decimal digits pass through unchanged.
///
/// The input is assumed to span the literal exactly; canonicalization does
/// not validate (that is [`parse_int`]'s job) so error messages can quote a
/// canonicalized rejected literal.
pub fn canonicalize(literal: &str) -> String {
    let (sign, body) = match literal.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", literal),
    };
    let mut out = String::with_capacity(literal.len());
    out.push_str(sign);
    if let Some(digits) = strip_radix_prefix(body) {
        out.push_str("0x");
        for b in digits.bytes() {
            out.push(b.to_ascii_uppercase() as char);
        }
    } else {
        for b in body.bytes() {
            out.push(b.to_ascii_uppercase() as char);
        }
    }
    out
}

/// Strip a case-insensitive `0x` prefix.
fn strip_radix_prefix(body: &str) -> Option<&str> {
    body.strip_prefix("0x").or_else(|| body.strip_prefix("0X"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal_values() {
        assert_eq!(parse_int("0"), Some(0));
        assert_eq!(parse_int("123"), Some(123));
        assert_eq!(parse_int("-123"), Some(-123));
    }

    #[test]
    fn hex_values() {
        assert_eq!(parse_int("0x0"), Some(0));
        assert_eq!(parse_int("0xFF"), Some(255));
        assert_eq!(parse_int("0xff"), Some(255));
        assert_eq!(parse_int("0X1a"), Some(26));
        assert_eq!(parse_int("-0x10"), Some(-16));
    }

    #[test]
    fn sixty_four_bit_range() {
        assert_eq!(
            parse_int("0x1234567890ABCDEF"),
            Some(0x1234_5678_90AB_CDEF)
        );
        assert_eq!(parse_int("-0x8000000000000000"), Some(i64::MIN as i128));
    }

    #[test]
    fn rejects_bad_grammar() {
        assert_eq!(parse_int(""), None);
        assert_eq!(parse_int("-"), None);
        assert_eq!(parse_int("0x"), None);
        assert_eq!(parse_int("-0x"), None);
        assert_eq!(parse_int("abc"), None);
        assert_eq!(parse_int("12ab"), None);
        assert_eq!(parse_int("0xZZ"), None);
        assert_eq!(parse_int("1_000"), None);
        assert_eq!(parse_int("+5"), None);
        assert_eq!(parse_int("--5"), None);
    }

    #[test]
    fn canonical_hex_uppercases_digits() {
        assert_eq!(canonicalize("0x123abc"), "0x123ABC");
        assert_eq!(canonicalize("0X123abc"), "0x123ABC");
        assert_eq!(canonicalize("-0xdead"), "-0xDEAD");
    }

    #[test]
    fn canonical_decimal_passes_through() {
        assert_eq!(canonicalize("123"), "123");
        assert_eq!(canonicalize("-123"), "-123");
    }

    #[test]
    fn canonical_is_idempotent() {
        for lit in ["0x123abc", "-0Xff", "42", "-42"] {
            let once = canonicalize(lit);
            assert_eq!(canonicalize(&once), once);
        }
    }
}
