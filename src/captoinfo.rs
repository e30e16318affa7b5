// Copyright 2025 the tput developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Translating termcap capability strings to terminfo format
//!
//! Termcap parameter codes (`%d`, `%+`, `%r`, `%>`, ...) consume parameters
//! in order from an implicit position, while terminfo programs address them
//! explicitly with `%p1`-`%p9` on a stack. The translator tracks the
//! current parameter position and rewrites each termcap code into the
//! equivalent terminfo stack program. Leading numeric padding is stripped
//! and re-appended as a mandatory `$<N/>` directive.
//!
//! Translation never fails: an unrecognized `%` code is kept verbatim with
//! a debug-level note, matching how terminal databases have always shipped
//! the occasional malformed entry.

/// Translate one termcap capability string to terminfo format.
///
/// `name` is the capability's terminfo name, used only in trace output.
pub fn captoinfo(name: &str, value: &[u8]) -> Vec<u8> {
    let mut translator = Translator {
        name,
        s: value,
        i: 0,
        out: Vec::with_capacity(value.len()),
        stack: Vec::new(),
        onstack: 0,
        seen_m: false,
        seen_n: false,
        seen_r: false,
        param: 1,
    };
    translator.run();
    translator.out
}

const MAX_PUSHED: usize = 16;

struct Translator<'a> {
    name: &'a str,
    s: &'a [u8],
    i: usize,
    out: Vec<u8>,
    /// Parameter numbers already pushed on the terminfo stack
    stack: Vec<i32>,
    /// Parameter number on top of the stack, 0 when none
    onstack: i32,
    seen_m: bool,
    seen_n: bool,
    seen_r: bool,
    /// Next termcap parameter position (1-based)
    param: i32,
}

fn is_graph(c: u8) -> bool {
    (0x21..=0x7e).contains(&c)
}

impl Translator<'_> {
    /// Convert the character at the cursor to a terminfo push
    ///
    /// Handles backslash and caret escapes. Returns the number of source
    /// bytes the character occupies; the cursor itself is not advanced.
    fn cvtchar(&mut self) -> usize {
        let sp = &self.s[self.i..];
        let (c, len) = match sp.first() {
            Some(b'\\') => match sp.get(1) {
                Some(&c @ (b'\'' | b'$' | b'\\' | b'%')) => (c, 2),
                Some(b'0'..=b'3') => {
                    let mut c = 0u32;
                    let mut len = 1;
                    while len < 4
                        && let Some(&digit) =
                            sp.get(len).filter(|digit| digit.is_ascii_digit())
                    {
                        c = c * 8 + u32::from(digit - b'0');
                        len += 1;
                    }
                    (c as u8, len)
                }
                Some(&c) => (c, 2),
                None => (b'\\', 1),
            },
            Some(b'^') => match sp.get(1) {
                Some(&c) => (c & 0x1f, 2),
                None => (b'^', 1),
            },
            Some(&c) => (c, 1),
            None => return 0,
        };
        if is_graph(c) && !matches!(c, b',' | b'\'' | b'\\' | b':') {
            self.out.extend_from_slice(b"%'");
            self.out.push(c);
            self.out.push(b'\'');
        } else {
            self.out.extend_from_slice(b"%{");
            self.out.extend(format!("{c}").into_bytes());
            self.out.push(b'}');
        }
        len
    }

    /// Push n copies of the parameter on the terminfo stack if not
    /// already there
    fn getparm(&mut self, mut parm: i32, n: u32) {
        if self.seen_r {
            if parm == 1 {
                parm = 2;
            } else if parm == 2 {
                parm = 1;
            }
        }

        if self.onstack == parm {
            if n > 1 {
                tracing::debug!(
                    capability = self.name,
                    "captoinfo: string may not be optimal"
                );
                self.out.extend_from_slice(b"%Pa");
                for _ in 0..n {
                    self.out.extend_from_slice(b"%ga");
                }
            }
            return;
        }

        if self.onstack != 0 {
            self.push();
        }
        self.onstack = parm;

        for _ in 0..n {
            self.out.extend_from_slice(b"%p");
            self.out.push((i32::from(b'0') + parm) as u8);
        }

        if self.seen_n && parm < 3 {
            self.out.extend_from_slice(b"%{96}%^");
        }
        if self.seen_m && parm < 3 {
            self.out.extend_from_slice(b"%{127}%^");
        }
    }

    fn push(&mut self) {
        if self.stack.len() >= MAX_PUSHED {
            tracing::warn!(
                capability = self.name,
                "captoinfo: string too complex to convert"
            );
        } else {
            self.stack.push(self.onstack);
        }
    }

    fn pop(&mut self) {
        match self.stack.pop() {
            Some(parm) => self.onstack = parm,
            None => {
                if self.onstack == 0 {
                    tracing::debug!(
                        capability = self.name,
                        "captoinfo: stack underflow"
                    );
                }
                self.onstack = 0;
            }
        }
        self.param += 1;
    }

    fn emit_number(&mut self, format: &[u8]) {
        self.getparm(self.param, 1);
        self.out.extend_from_slice(format);
        self.pop();
    }

    fn invalid(&mut self, code: u8) {
        self.out.push(b'%');
        self.i -= 1;
        tracing::warn!(
            capability = self.name,
            code = %(code as char),
            "captoinfo: unknown % code"
        );
    }

    fn run(&mut self) {
        // Strip leading padding; it is re-added at the end as mandatory.
        let mut padding = None;
        if self.s.first().is_some_and(u8::is_ascii_digit) {
            let length = self
                .s
                .iter()
                .take_while(|c| c.is_ascii_digit() || matches!(c, b'*' | b'.'))
                .count();
            padding = Some(&self.s[..length]);
            self.i = length;
        }

        while let Some(&c) = self.s.get(self.i) {
            if c != b'%' {
                self.out.push(c);
                self.i += 1;
                continue;
            }
            self.i += 1;
            let Some(&code) = self.s.get(self.i) else {
                self.out.push(b'%');
                break;
            };
            self.i += 1;
            match code {
                b'%' => self.out.push(b'%'),
                b'r' => {
                    if self.seen_r {
                        tracing::debug!(
                            capability = self.name,
                            "captoinfo: saw %r twice"
                        );
                    }
                    self.seen_r = true;
                }
                b'm' => {
                    if self.seen_m {
                        tracing::debug!(
                            capability = self.name,
                            "captoinfo: saw %m twice"
                        );
                    }
                    self.seen_m = true;
                }
                b'n' => {
                    if self.seen_n {
                        tracing::debug!(
                            capability = self.name,
                            "captoinfo: saw %n twice"
                        );
                    }
                    self.seen_n = true;
                }
                b'i' => self.out.extend_from_slice(b"%i"),
                // Binary-coded decimal
                b'6' | b'B' => {
                    self.getparm(self.param, 1);
                    self.out.extend_from_slice(b"%{10}%/%{16}%*");
                    self.getparm(self.param, 1);
                    self.out.extend_from_slice(b"%{10}%m%+");
                }
                // Reverse-coded (Delta Data)
                b'8' | b'D' => {
                    self.getparm(self.param, 2);
                    self.out.extend_from_slice(b"%{2}%*%-");
                }
                b'>' => {
                    self.getparm(self.param, 2);
                    self.out.extend_from_slice(b"%?");
                    self.i += self.cvtchar();
                    self.out.extend_from_slice(b"%>%t");
                    self.i += self.cvtchar();
                    self.out.extend_from_slice(b"%+%;");
                }
                b'a' => self.arithmetic(),
                b'+' => {
                    self.getparm(self.param, 1);
                    self.i += self.cvtchar();
                    self.out.extend_from_slice(b"%+%c");
                    self.pop();
                }
                b's' => {
                    self.getparm(self.param, 1);
                    self.out.extend_from_slice(b"%s");
                    self.pop();
                }
                b'-' => {
                    self.i += self.cvtchar();
                    self.getparm(self.param, 1);
                    self.out.extend_from_slice(b"%-%c");
                    self.pop();
                }
                b'.' => self.emit_number(b"%c"),
                b'0' => match self.s.get(self.i) {
                    Some(b'3') => self.emit_number(b"%3d"),
                    Some(b'2') => self.emit_number(b"%2d"),
                    _ => self.invalid(code),
                },
                b'2' => self.emit_number(b"%2d"),
                b'3' => self.emit_number(b"%3d"),
                b'd' => self.emit_number(b"%d"),
                b'f' => self.param += 1,
                b'b' => self.param -= 1,
                b'\\' => self.out.extend_from_slice(b"%\\"),
                _ => self.invalid(code),
            }
        }

        if let Some(padding) = padding {
            self.out.extend_from_slice(b"$<");
            self.out.extend_from_slice(padding);
            self.out.extend_from_slice(b"/>");
        }

        if self.s != self.out {
            tracing::debug!(
                capability = self.name,
                from = %String::from_utf8_lossy(self.s),
                to = %String::from_utf8_lossy(&self.out),
                "captoinfo: translated"
            );
        }
    }

    /// The `%a` arithmetic forms: `%a op [pc] value`
    fn arithmetic(&mut self) {
        let op = self.s.get(self.i).copied();
        let kind = self.s.get(self.i + 1).copied();
        let operand = self.s.get(self.i + 2).copied();
        let (Some(op), Some(kind), Some(operand)) = (op, kind, operand) else {
            self.plus_constant();
            return;
        };
        if !matches!(op, b'=' | b'+' | b'-' | b'*' | b'/')
            || !matches!(kind, b'p' | b'c')
            || operand == 0
        {
            self.plus_constant();
            return;
        }

        let mut length = 2;
        if op != b'=' {
            self.getparm(self.param, 1);
        }
        if kind == b'p' {
            self.getparm(self.param + i32::from(operand) - i32::from(b'@'), 1);
            if self.param != self.onstack {
                self.pop();
                self.param -= 1;
            }
            length += 1;
        } else {
            self.i += 2;
            length += self.cvtchar();
            self.i -= 2;
        }
        match op {
            b'+' => self.out.extend_from_slice(b"%+"),
            b'-' => self.out.extend_from_slice(b"%-"),
            b'*' => self.out.extend_from_slice(b"%*"),
            b'/' => self.out.extend_from_slice(b"%/"),
            b'=' => {
                self.onstack = if self.seen_r {
                    match self.param {
                        1 => 2,
                        2 => 1,
                        parm => parm,
                    }
                } else {
                    self.param
                };
            }
            _ => {}
        }
        self.i += length;
    }

    /// A `%a` that is not one of the arithmetic forms adds a character
    /// constant to the current parameter
    fn plus_constant(&mut self) {
        self.getparm(self.param, 1);
        self.i += self.cvtchar();
        self.out.extend_from_slice(b"%+");
    }
}
