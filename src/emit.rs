// Copyright 2025 the tput developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Writing capability output with padding delays
//!
//! Old serial terminals needed time to carry out expensive operations, so
//! their capabilities embed `$<N>` directives asking for N milliseconds of
//! delay at that point in the output. The emitter writes the segments of a
//! capability strictly in order, sleeping where a directive applies and
//! never writing the directive text itself.
//!
//! A `/` suffix marks the delay as mandatory; without it the delay is
//! advisory and skipped on terminals that use xon/xoff flow control. A `*`
//! suffix means the delay is proportional to the number of affected lines;
//! it is applied flat here, as the affected count is not known this far
//! down.

use std::io::Write;
use std::thread;
use std::time::Duration;

/// A parsed `$<N[*/]>` directive
#[derive(Debug, Clone, Copy)]
struct Directive {
    /// Delay in milliseconds, possibly fractional
    amount: f64,
    /// `/` suffix: delay even under flow control
    mandatory: bool,
}

/// Write capability output, honoring its padding directives.
///
/// `padding` enables the delays; without it segments are written
/// immediately. `xon` marks a terminal with xon/xoff flow control, which
/// downgrades non-mandatory delays to no-ops. Directive text is consumed
/// either way.
pub fn print_padded(
    writer: &mut impl Write,
    text: &[u8],
    padding: bool,
    xon: bool,
) -> std::io::Result<()> {
    let mut rest = text;
    while let Some((before, directive, after)) = next_directive(rest) {
        writer.write_all(before)?;
        if padding && (directive.mandatory || !xon) {
            writer.flush()?;
            thread::sleep(Duration::from_secs_f64(directive.amount / 1000.0));
        }
        rest = after;
    }
    writer.write_all(rest)
}

/// Split at the first well-formed directive
fn next_directive(text: &[u8]) -> Option<(&[u8], Directive, &[u8])> {
    let mut from = 0;
    while from + 2 <= text.len() {
        let Some(offset) = text[from..].windows(2).position(|w| w == b"$<") else {
            return None;
        };
        let start = from + offset;
        if let Some((directive, length)) = parse_directive(&text[start + 2..]) {
            let after = &text[start + 2 + length..];
            return Some((&text[..start], directive, after));
        }
        // Not a directive, keep the "$<" literal.
        from = start + 2;
    }
    None
}

/// Parse `N[*/]{0,2}>` after the `$<` opener
fn parse_directive(text: &[u8]) -> Option<(Directive, usize)> {
    let digits = text
        .iter()
        .take_while(|c| c.is_ascii_digit() || **c == b'.')
        .count();
    if digits == 0 {
        return None;
    }
    let amount = str::from_utf8(&text[..digits])
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(0.0);

    let mut i = digits;
    let mut mandatory = false;
    while i < digits + 2 && matches!(text.get(i), Some(b'*' | b'/')) {
        mandatory |= text[i] == b'/';
        i += 1;
    }
    (text.get(i) == Some(&b'>')).then_some((Directive { amount, mandatory }, i + 1))
}
