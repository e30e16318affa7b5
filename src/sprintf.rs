// Copyright 2025 the tput developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! printf-style formatting for capability output
//!
//! Implements the subset of printf that parameterized terminfo strings use:
//! conversions `d o x X s c`, the flags `- + # 0` and space, field width and
//! precision. Formatting never fails; a parameter of the wrong type for the
//! conversion is coerced (strings read as 0 in numeric conversions, numbers
//! print their decimal digits under `%s`).

use std::iter::repeat_n;

use crate::compile::Parameter;

/// Parsed printf flags, width and precision.
#[derive(Copy, Clone, PartialEq, Eq, Default, Debug)]
pub struct Flags {
    pub width: u16,
    pub precision: Option<u16>,
    pub alternate: bool,
    pub left: bool,
    pub sign: bool,
    pub space: bool,
    pub zero: bool,
}

fn digits(value: i32, conversion: char) -> String {
    match conversion {
        'o' => format!("{value:o}"),
        'x' => format!("{value:x}"),
        'X' => format!("{value:X}"),
        _ => format!("{}", value.abs_diff(0)),
    }
}

/// Format one parameter under the given conversion and flags.
pub fn format_value(value: &Parameter, conversion: char, flags: Flags) -> Vec<u8> {
    let number = match value {
        Parameter::Number(number) => *number,
        // Strings coerce to 0 in numeric conversions.
        Parameter::String(_) => 0,
    };

    let (mut prefix, mut body): (String, Vec<u8>) = match conversion {
        's' => {
            let mut s = match value {
                Parameter::String(s) => s.clone(),
                Parameter::Number(number) => format!("{number}").into_bytes(),
            };
            if let Some(precision) = flags.precision
                && usize::from(precision) < s.len()
            {
                s.truncate(precision.into());
            }
            (String::new(), s)
        }
        'c' => {
            // NUL prints as 0200 for ncurses compatibility; a string
            // parameter prints nothing.
            let body = match value {
                Parameter::Number(0) => vec![128u8],
                Parameter::Number(number) => vec![*number as u8],
                Parameter::String(_) => vec![],
            };
            (String::new(), body)
        }
        _ => {
            let mut body = digits(number, conversion);
            if let Some(precision) = flags.precision {
                let precision = usize::from(precision);
                while body.len() < precision {
                    body.insert(0, '0');
                }
            }
            let mut prefix = String::new();
            if conversion == 'd' {
                if number < 0 {
                    prefix.push('-');
                } else if flags.sign {
                    prefix.push('+');
                } else if flags.space {
                    prefix.push(' ');
                }
            } else if flags.alternate && number != 0 {
                match conversion {
                    'o' => {
                        // The leading octal zero counts as part of the digits.
                        if !body.starts_with('0') {
                            prefix.push('0');
                        }
                    }
                    'x' => prefix.push_str("0x"),
                    'X' => prefix.push_str("0X"),
                    _ => {}
                }
            }
            (prefix, body.into_bytes())
        }
    };

    let width = usize::from(flags.width);
    let written = prefix.len() + body.len();
    if width > written {
        let pad = width - written;
        if flags.left {
            body.extend(repeat_n(b' ', pad));
        } else if flags.zero && flags.precision.is_none() && conversion != 's' {
            // Zeros go between the sign prefix and the digits.
            let mut padded = Vec::with_capacity(width - prefix.len());
            padded.extend(repeat_n(b'0', pad));
            padded.extend(body);
            body = padded;
        } else {
            let mut padded = String::with_capacity(pad + prefix.len());
            padded.extend(repeat_n(' ', pad));
            padded.push_str(&prefix);
            prefix = padded;
        }
    }

    let mut out = prefix.into_bytes();
    out.extend(body);
    out
}

/// Parse the flag run, width and precision of a format spec.
///
/// `chars` must be positioned just after the `%`. Returns the parsed flags
/// and the conversion character, or `None` if the spec is not one of the
/// supported printf forms.
pub(crate) fn parse_spec(spec: &str) -> Option<(Flags, char, usize)> {
    let mut flags = Flags::default();
    let mut seen_digit = false;
    let mut precision = false;
    for (i, c) in spec.char_indices() {
        match c {
            'd' | 'o' | 'x' | 'X' | 's' | 'c' => return Some((flags, c, i + 1)),
            ':' if i == 0 => {}
            '-' if !seen_digit => flags.left = true,
            '+' if !seen_digit => flags.sign = true,
            '#' if !seen_digit => flags.alternate = true,
            ' ' if !seen_digit => flags.space = true,
            '0' if !seen_digit && !precision => {
                flags.zero = true;
                seen_digit = true;
            }
            '0'..='9' if precision => {
                let digit = c as u16 - u16::from(b'0');
                flags.precision =
                    Some(flags.precision.unwrap_or(0).checked_mul(10)?.checked_add(digit)?);
            }
            '0'..='9' => {
                seen_digit = true;
                let digit = c as u16 - u16::from(b'0');
                flags.width = flags.width.checked_mul(10)?.checked_add(digit)?;
            }
            '.' if !precision => {
                precision = true;
                flags.precision = Some(0);
            }
            _ => return None,
        }
    }
    None
}

/// Expand a printf format string against a parameter list.
///
/// Unrecognized `%` sequences are copied through verbatim. A conversion
/// without a matching parameter formats an absent value (0 for numeric
/// conversions, the empty string for `%s`).
pub fn sprintf(format: &str, params: &[Parameter]) -> Vec<u8> {
    let mut out = Vec::with_capacity(format.len());
    let mut params = params.iter();
    let mut rest = format;
    while let Some(percent) = rest.find('%') {
        out.extend(rest[..percent].as_bytes());
        let spec = &rest[percent + 1..];
        if spec.starts_with('%') {
            out.push(b'%');
            rest = &spec[1..];
            continue;
        }
        match parse_spec(spec) {
            Some((flags, conversion, len)) => {
                let absent = Parameter::Number(0);
                let empty = Parameter::String(vec![]);
                let param = params.next().unwrap_or(match conversion {
                    's' => &empty,
                    _ => &absent,
                });
                out.extend(format_value(param, conversion, flags));
                rest = &spec[len..];
            }
            None => {
                out.push(b'%');
                rest = spec;
            }
        }
    }
    out.extend(rest.as_bytes());
    out
}

#[cfg(test)]
mod test {
    use super::*;

    fn fmt(value: impl Into<Parameter>, spec: &str) -> String {
        let (flags, conversion, _) = parse_spec(spec).unwrap();
        String::from_utf8(format_value(&value.into(), conversion, flags)).unwrap()
    }

    #[test]
    fn decimal() {
        assert_eq!(fmt(42, "d"), "42");
        assert_eq!(fmt(-42, "d"), "-42");
        assert_eq!(fmt(7, "3d"), "  7");
        assert_eq!(fmt(7, "-3d"), "7  ");
        assert_eq!(fmt(7, "03d"), "007");
        assert_eq!(fmt(-7, "03d"), "-07");
        assert_eq!(fmt(42, "+d"), "+42");
        assert_eq!(fmt(42, " d"), " 42");
        assert_eq!(fmt(42, ".5d"), "00042");
        assert_eq!(fmt(-42, ".5d"), "-00042");
    }

    #[test]
    fn precision_beats_zero_flag() {
        assert_eq!(fmt(42, "08.5d"), "   00042");
    }

    #[test]
    fn octal() {
        assert_eq!(fmt(42, "o"), "52");
        assert_eq!(fmt(42, "#o"), "052");
        assert_eq!(fmt(42, "#.5o"), "00052");
        assert_eq!(fmt(0, "#o"), "0");
    }

    #[test]
    fn hexadecimal() {
        assert_eq!(fmt(255, "x"), "ff");
        assert_eq!(fmt(255, "X"), "FF");
        assert_eq!(fmt(255, "03X"), "0FF");
        assert_eq!(fmt(63, "#x"), "0x3f");
        assert_eq!(fmt(63, "#X"), "0X3F");
        assert_eq!(fmt(0, "#x"), "0");
        assert_eq!(fmt(42, "#06x"), "0x002a");
        assert_eq!(fmt(63, "6x"), "    3f");
        assert_eq!(fmt(63, "-6x"), "3f    ");
    }

    #[test]
    fn strings() {
        assert_eq!(fmt("One", "s"), "One");
        assert_eq!(fmt("One", "5s"), "  One");
        assert_eq!(fmt("One", "-5s"), "One  ");
        assert_eq!(fmt("One", "5.2s"), "   On");
        // The zero flag does not apply to strings.
        assert_eq!(fmt("One", "05s"), "  One");
    }

    #[test]
    fn char_conversion() {
        assert_eq!(format_value(&Parameter::Number(65), 'c', Flags::default()), b"A");
        assert_eq!(format_value(&Parameter::Number(0), 'c', Flags::default()), [128]);
        assert_eq!(format_value(&Parameter::from("x"), 'c', Flags::default()), b"");
    }

    #[test]
    fn coercion() {
        assert_eq!(fmt("word", "d"), "0");
        assert_eq!(fmt(42, "s"), "42");
    }

    #[test]
    fn colon_introduces_flags() {
        let (flags, conversion, len) = parse_spec(":-5s").unwrap();
        assert!(flags.left);
        assert_eq!(flags.width, 5);
        assert_eq!(conversion, 's');
        assert_eq!(len, 4);
    }

    #[test]
    fn format_string_expansion() {
        assert_eq!(
            sprintf("row %d col %d", &[Parameter::Number(4), Parameter::Number(2)]),
            b"row 4 col 2"
        );
        assert_eq!(sprintf("100%% %3d", &[Parameter::Number(7)]), b"100%   7");
        assert_eq!(sprintf("%q", &[]), b"%q");
        assert_eq!(sprintf("%s", &[]), b"");
    }
}
