//! Program arguments
//!
//! FALSE 1.2's portable interpreter passes numeric command-line arguments to
//! the program through the variables: `a` holds the argument count and
//! `b`..`z` hold up to 25 values.
//!
//! # Usage from FALSE
//!
//! ```text
//! falsei sum.f 3 4
//! ```
//!
//! ```false
//! b;c;+.   { prints 7 }
//! ```

use false_core::{ErrorKind, Storage, Token};

/// Most arguments a program can receive (`b`..`z`)
pub const MAX_ARGUMENTS: usize = 25;

/// Parse one argument the way C's `strtol(arg, &end, 0)` does
///
/// Leading whitespace and a sign are accepted; `0x`/`0X` selects hex and a
/// leading `0` octal. Parsing stops at the first character that is not a
/// digit of the base. Values outside the 64-bit range saturate, then keep
/// their low 32 bits. An argument without any leading digits is rejected.
pub fn parse_argument(arg: &str) -> Result<i32, ErrorKind> {
    let s = arg.trim_start_matches(|c: char| c.is_ascii_whitespace());
    let (negative, s) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let (radix, digits) = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) if hex.starts_with(|c: char| c.is_ascii_hexdigit()) => (16, hex),
        _ if s.starts_with('0') => (8, s),
        _ => (10, s),
    };

    let len = digits
        .find(|c: char| !c.is_digit(radix))
        .unwrap_or(digits.len());
    if len == 0 {
        return Err(ErrorKind::NonNumericArgument);
    }

    // Accumulate towards the sign so negative input saturates at i64::MIN
    let value = digits[..len]
        .chars()
        .filter_map(|c| c.to_digit(radix))
        .fold(0i64, |acc, d| {
            let acc = acc.saturating_mul(i64::from(radix));
            if negative {
                acc.saturating_sub(i64::from(d))
            } else {
                acc.saturating_add(i64::from(d))
            }
        });

    Ok(value as i32)
}

/// Reset `storage` and bind `args` to it
///
/// `args[0]` is the source file name and is not bound.
pub fn bind_arguments(storage: &mut Storage, args: &[String]) -> Result<(), ErrorKind> {
    let (_file, rest) = args.split_first().ok_or(ErrorKind::TooFewArguments)?;
    if rest.len() > MAX_ARGUMENTS {
        return Err(ErrorKind::TooManyArguments);
    }

    storage.clear();
    storage.set('a', Token::Number(rest.len() as i32));
    for (arg, letter) in rest.iter().zip('b'..='z') {
        storage.set(letter, Token::Number(parse_argument(arg)?));
    }
    Ok(())
}
