#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // Fuzz the lexer — must never panic, only return Ok/Err.
    let _ = interp_rs::tokenize(data);

    // Fuzz the full pipeline: lex, group, validate.
    let _ = interp_rs::load(data);

    // Tokens that do come out must re-lex from their canonical text.
    if let Ok(tokens) = interp_rs::tokenize(data) {
        for token in &tokens {
            let _ = interp_rs::tokenize(token.text());
        }
    }
});
