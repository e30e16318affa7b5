// Copyright 2025 the tput developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Compiling parameterized capability strings
//!
//! A capability template is compiled once into a small opcode program and
//! interpreted on every invocation. The template grammar covers the termcap
//! escapes (`\E`, `^X`, octal), padding directives, and the terminfo `%`
//! operations: parameter pushes, constants, dynamic/static variables,
//! arithmetic and logical operators, printf-style output and
//! `%? %t %e %;` conditionals.
//!
//! Compilation is total: an unrecognized `%` code is emitted literally, and
//! an unclosed conditional is closed at the end of the template. Execution
//! is total as well; operand type mismatches coerce (a string reads as 0 in
//! numeric context) and division by zero yields 0.

use std::array::from_fn;

use crate::sprintf::{self, Flags};

/// Types of parameters a capability can take
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parameter {
    Number(i32),
    String(Vec<u8>),
}

impl Parameter {
    /// Numeric view; strings coerce to 0
    fn number(&self) -> i32 {
        match self {
            Self::Number(number) => *number,
            Self::String(_) => 0,
        }
    }
}

impl From<i32> for Parameter {
    fn from(value: i32) -> Self {
        Self::Number(value)
    }
}

impl From<&[u8]> for Parameter {
    fn from(value: &[u8]) -> Self {
        Self::String(value.to_vec())
    }
}

impl<const N: usize> From<&[u8; N]> for Parameter {
    fn from(value: &[u8; N]) -> Self {
        Self::String(value.to_vec())
    }
}

impl From<&str> for Parameter {
    fn from(value: &str) -> Self {
        Self::String(value.as_bytes().to_vec())
    }
}

/// One compiled capability value
///
/// Absent capabilities are filled in by the engine as `Bool(false)`,
/// `Number(-1)` or a no-op program, so every canonical name has a value.
#[derive(Debug, Clone)]
pub enum Capability {
    Bool(bool),
    Number(i32),
    String(Program),
}

/// Binary stack operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    BitAnd,
    BitOr,
    BitXor,
    Equal,
    Greater,
    Less,
    LogicalAnd,
    LogicalOr,
}

/// Unary stack operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UnOp {
    Not,
    Complement,
}

/// One interpreter instruction
#[derive(Debug, Clone, PartialEq)]
enum Op {
    /// Write literal bytes (padding directives included, when kept)
    Emit(Vec<u8>),
    /// Push parameter by 0-based index
    PushParam(u8),
    PushConst(i32),
    /// Pop into dynamic variable a-z (0-based index)
    SetDyn(u8),
    GetDyn(u8),
    /// Pop into static variable A-Z (0-based index)
    SetStat(u8),
    GetStat(u8),
    /// Pop, push string length
    StrLen,
    Bin(BinOp),
    Un(UnOp),
    /// Add one to the first two parameters, once per invocation
    IncrementParams,
    /// Pop and print plainly: `d`/`s` stringify, `c` prints a byte
    Print(char),
    /// Pop and print through the printf formatter
    Format(Flags, char),
    /// Pop; jump when falsy
    JumpIfFalse(usize),
    Jump(usize),
}

/// Options the engine hands down to template compilation
#[derive(Debug, Clone, Copy, Default)]
pub struct CompileOptions {
    /// Keep padding directives in the output for the emitter
    pub padding: bool,
    /// Route all conversions through the printf formatter
    pub printf: bool,
}

/// A compiled capability template
///
/// Holds the opcode sequence and the program's static variable file, which
/// persists across invocations; invoking therefore takes `&mut self`.
#[derive(Debug, Clone)]
pub struct Program {
    ops: Vec<Op>,
    statics: [Parameter; 26],
}

/// Compile a capability template with default options
pub fn compile(template: &[u8]) -> Program {
    compile_with(template, CompileOptions::default())
}

/// Compile a capability template
pub fn compile_with(template: &[u8], options: CompileOptions) -> Program {
    // wyse350-vb and wy350-w ship this broken template; it means a bare ESC.
    if template == b"\x1b%?" {
        return Program::literal(b"\x1b".to_vec());
    }
    Compiler::new(options).run(template)
}

/// An open `%?` conditional during compilation
#[derive(Default)]
struct Frame {
    /// Unpatched `JumpIfFalse` of the current `%t`
    pending_false: Option<usize>,
    /// Unpatched end jumps, one per `%e` seen
    end_jumps: Vec<usize>,
}

struct Compiler {
    options: CompileOptions,
    ops: Vec<Op>,
    buffer: Vec<u8>,
    frames: Vec<Frame>,
}

impl Compiler {
    fn new(options: CompileOptions) -> Self {
        Self {
            options,
            ops: Vec::new(),
            buffer: Vec::new(),
            frames: Vec::new(),
        }
    }

    fn flush(&mut self) {
        if !self.buffer.is_empty() {
            let text = std::mem::take(&mut self.buffer);
            self.ops.push(Op::Emit(text));
        }
    }

    fn push_op(&mut self, op: Op) {
        self.flush();
        self.ops.push(op);
    }

    fn close_frame(&mut self) {
        let Some(frame) = self.frames.pop() else {
            return;
        };
        let here = self.ops.len();
        if let Some(index) = frame.pending_false {
            self.ops[index] = Op::JumpIfFalse(here);
        }
        for index in frame.end_jumps {
            self.ops[index] = Op::Jump(here);
        }
    }

    fn run(mut self, template: &[u8]) -> Program {
        let mut i = 0;
        while i < template.len() {
            let rest = &template[i..];

            // Continuation newlines from source-form entries
            if rest.starts_with(b"\n ") {
                i += 2;
                continue;
            }

            // '^X' control character
            if rest[0] == b'^' && rest.len() >= 2 {
                let ch = rest[1];
                if !(b' '..=b'~').contains(&ch) {
                    self.buffer.extend_from_slice(&rest[..2]);
                } else if ch == b'?' {
                    self.buffer.push(0x7f);
                } else {
                    let ch = ch & 31;
                    self.buffer.push(if ch == 0 { 128 } else { ch });
                }
                i += 2;
                continue;
            }

            if rest[0] == b'\\' && rest.len() >= 2 {
                // Three octal digits
                if rest.len() >= 4
                    && rest[1..4].iter().all(|c| (b'0'..=b'7').contains(c))
                {
                    let value = rest[1..4]
                        .iter()
                        .fold(0u32, |acc, c| acc * 8 + u32::from(c - b'0'));
                    self.buffer.push(value as u8);
                    i += 4;
                    continue;
                }
                match rest[1] {
                    b'e' | b'E' => self.buffer.push(0x1b),
                    b'n' => self.buffer.push(b'\n'),
                    b'l' => self.buffer.push(0x85),
                    b'r' => self.buffer.push(b'\r'),
                    b't' => self.buffer.push(b'\t'),
                    b'b' => self.buffer.push(0x08),
                    b'f' => self.buffer.push(0x0c),
                    b's' => self.buffer.push(b' '),
                    b'^' | b'\\' | b',' | b':' => self.buffer.push(rest[1]),
                    b'0' => self.buffer.push(0x80),
                    b'a' => self.buffer.push(0x07),
                    // Unknown escape, keep it verbatim
                    _ => self.buffer.extend_from_slice(&rest[..2]),
                }
                i += 2;
                continue;
            }

            // '$<N>' padding directive
            if let Some(length) = match_padding(rest) {
                if self.options.padding {
                    self.buffer.extend_from_slice(&rest[..length]);
                }
                i += length;
                continue;
            }

            if rest[0] == b'%' && rest.len() >= 2 {
                if let Some(length) = self.percent(&rest[1..]) {
                    i += 1 + length;
                    continue;
                }
            }

            self.buffer.push(rest[0]);
            i += 1;
        }

        self.flush();
        while !self.frames.is_empty() {
            // Some entries (atari-color) never close their conditional.
            self.close_frame();
        }

        Program {
            ops: self.ops,
            statics: from_fn(|_| Parameter::Number(0)),
        }
    }

    /// Handle one `%` code; `spec` starts after the `%`. Returns the number
    /// of bytes consumed after the `%`, or `None` to emit the `%` literally.
    fn percent(&mut self, spec: &[u8]) -> Option<usize> {
        match spec[0] {
            b'%' => {
                self.buffer.push(b'%');
                return Some(1);
            }
            b'p' => {
                let index = *spec.get(1)?;
                if !(b'1'..=b'9').contains(&index) {
                    return None;
                }
                self.push_op(Op::PushParam(index - b'1'));
                return Some(2);
            }
            b'P' => {
                let name = *spec.get(1)?;
                match name {
                    b'a'..=b'z' => self.push_op(Op::SetDyn(name - b'a')),
                    b'A'..=b'Z' => self.push_op(Op::SetStat(name - b'A')),
                    _ => return None,
                }
                return Some(2);
            }
            b'g' => {
                let name = *spec.get(1)?;
                match name {
                    b'a'..=b'z' => self.push_op(Op::GetDyn(name - b'a')),
                    b'A'..=b'Z' => self.push_op(Op::GetStat(name - b'A')),
                    _ => return None,
                }
                return Some(2);
            }
            b'\'' => {
                if spec.get(2) == Some(&b'\'') {
                    self.push_op(Op::PushConst(i32::from(spec[1])));
                    return Some(3);
                }
                return None;
            }
            b'{' => {
                let close = spec.iter().position(|c| *c == b'}')?;
                let digits = &spec[1..close];
                if digits.is_empty() || !digits.iter().all(u8::is_ascii_digit) {
                    return None;
                }
                let mut value = 0i32;
                for digit in digits {
                    value = value
                        .checked_mul(10)?
                        .checked_add(i32::from(digit - b'0'))?;
                }
                self.push_op(Op::PushConst(value));
                return Some(close + 1);
            }
            b'l' => {
                self.push_op(Op::StrLen);
                return Some(1);
            }
            b'i' => {
                self.push_op(Op::IncrementParams);
                return Some(1);
            }
            b'!' => {
                self.push_op(Op::Un(UnOp::Not));
                return Some(1);
            }
            b'~' => {
                self.push_op(Op::Un(UnOp::Complement));
                return Some(1);
            }
            b'?' => {
                self.flush();
                self.frames.push(Frame::default());
                return Some(1);
            }
            b't' => {
                self.flush();
                if self.frames.is_empty() {
                    // Stray %t, treat as an implicit %?
                    self.frames.push(Frame::default());
                }
                let index = self.ops.len();
                self.ops.push(Op::JumpIfFalse(usize::MAX));
                if let Some(frame) = self.frames.last_mut() {
                    frame.pending_false = Some(index);
                }
                return Some(1);
            }
            b'e' => {
                self.flush();
                if let Some(frame) = self.frames.last_mut() {
                    let jump = self.ops.len();
                    self.ops.push(Op::Jump(usize::MAX));
                    frame.end_jumps.push(jump);
                    let after = self.ops.len();
                    if let Some(index) = frame.pending_false.take() {
                        self.ops[index] = Op::JumpIfFalse(after);
                    }
                }
                return Some(1);
            }
            b';' => {
                self.flush();
                self.close_frame();
                return Some(1);
            }
            _ => {}
        }

        if let Some(op) = match spec[0] {
            b'+' => Some(BinOp::Add),
            b'-' => Some(BinOp::Sub),
            b'*' => Some(BinOp::Mul),
            b'/' => Some(BinOp::Div),
            b'm' => Some(BinOp::Mod),
            b'&' => Some(BinOp::BitAnd),
            b'|' => Some(BinOp::BitOr),
            b'^' => Some(BinOp::BitXor),
            b'=' => Some(BinOp::Equal),
            b'>' => Some(BinOp::Greater),
            b'<' => Some(BinOp::Less),
            b'A' => Some(BinOp::LogicalAnd),
            b'O' => Some(BinOp::LogicalOr),
            _ => None,
        } {
            self.push_op(Op::Bin(op));
            return Some(1);
        }

        let (flags, conversion, length) = match_format(spec)?;
        let formatted = self.options.printf
            || flags != Flags::default()
            || spec[0] == b':'
            || matches!(conversion, 'o' | 'x' | 'X');
        if formatted {
            self.push_op(Op::Format(flags, conversion));
        } else {
            self.push_op(Op::Print(conversion));
        }
        Some(length)
    }
}

/// Match `$<N[*/]{0,2}>`; returns the directive's total length
fn match_padding(text: &[u8]) -> Option<usize> {
    if !text.starts_with(b"$<") {
        return None;
    }
    let mut i = 2;
    let digits = text[i..].iter().take_while(|c| c.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }
    i += digits;
    while i < text.len() && (text[i] == b'*' || text[i] == b'/') && i < 2 + digits + 2 {
        i += 1;
    }
    (text.get(i) == Some(&b'>')).then_some(i + 1)
}

/// Match a printf conversion spec after `%`
///
/// Bare flags are limited to `+ # space`; a leading `:` admits the full
/// flag set, keeping `%-` available as the subtraction operator.
fn match_format(spec: &[u8]) -> Option<(Flags, char, usize)> {
    let mut flags = Flags::default();
    let colon = spec.first() == Some(&b':');
    let mut i = usize::from(colon);
    loop {
        match spec.get(i) {
            Some(b'+') => flags.sign = true,
            Some(b'#') => flags.alternate = true,
            Some(b' ') => flags.space = true,
            Some(b'-') if colon => flags.left = true,
            Some(b'0') if colon => flags.zero = true,
            _ => break,
        }
        i += 1;
    }
    if !flags.zero && spec.get(i) == Some(&b'0') {
        flags.zero = true;
        i += 1;
    }
    while let Some(digit) = spec.get(i).filter(|c| c.is_ascii_digit()) {
        flags.width = flags
            .width
            .checked_mul(10)?
            .checked_add(u16::from(digit - b'0'))?;
        i += 1;
    }
    if spec.get(i) == Some(&b'.') {
        i += 1;
        let mut precision = 0u16;
        while let Some(digit) = spec.get(i).filter(|c| c.is_ascii_digit()) {
            precision = precision
                .checked_mul(10)?
                .checked_add(u16::from(digit - b'0'))?;
            i += 1;
        }
        flags.precision = Some(precision);
    }
    match spec.get(i) {
        Some(&c @ (b'd' | b'o' | b'x' | b'X' | b's' | b'c')) => {
            Some((flags, c as char, i + 1))
        }
        _ => None,
    }
}

impl Program {
    /// A program that produces no output
    pub fn noop() -> Self {
        Self {
            ops: Vec::new(),
            statics: from_fn(|_| Parameter::Number(0)),
        }
    }

    /// A program that writes fixed bytes
    pub fn literal(text: Vec<u8>) -> Self {
        Self {
            ops: vec![Op::Emit(text)],
            statics: from_fn(|_| Parameter::Number(0)),
        }
    }

    /// The fixed output of a parameterless program, if it has one
    pub fn as_literal(&self) -> Option<&[u8]> {
        match self.ops.as_slice() {
            [] => Some(b""),
            [Op::Emit(text)] => Some(text),
            _ => None,
        }
    }

    /// Run the program against a parameter list
    ///
    /// Execution cannot fail: missing parameters read as 0, operand types
    /// coerce, and division by zero yields 0. Static variables persist in
    /// the program across calls; dynamic variables are fresh per call.
    pub fn call(&mut self, params: &[Parameter]) -> Vec<u8> {
        let mut output = Vec::new();
        let mut stack: Vec<Parameter> = Vec::new();
        let mut dynamics: [Parameter; 26] = from_fn(|_| Parameter::Number(0));
        let mut incremented = false;

        // Make sure there are at least 9 parameters
        let mut params = params.to_vec();
        while params.len() < 9 {
            params.push(Parameter::Number(0));
        }

        let mut pc = 0;
        while let Some(op) = self.ops.get(pc) {
            pc += 1;
            match op {
                Op::Emit(text) => output.extend_from_slice(text),
                Op::PushParam(index) => stack.push(params[usize::from(*index)].clone()),
                Op::PushConst(value) => stack.push(Parameter::Number(*value)),
                Op::SetDyn(index) => {
                    dynamics[usize::from(*index)] =
                        stack.pop().unwrap_or(Parameter::Number(0));
                }
                Op::GetDyn(index) => stack.push(dynamics[usize::from(*index)].clone()),
                Op::SetStat(index) => {
                    self.statics[usize::from(*index)] =
                        stack.pop().unwrap_or(Parameter::Number(0));
                }
                Op::GetStat(index) => stack.push(self.statics[usize::from(*index)].clone()),
                Op::StrLen => {
                    let length = match stack.pop() {
                        Some(Parameter::String(s)) => s.len() as i32,
                        _ => 0,
                    };
                    stack.push(Parameter::Number(length));
                }
                Op::Bin(op) => {
                    let y = stack.pop().map_or(0, |v| v.number());
                    let x = stack.pop().map_or(0, |v| v.number());
                    let result = match op {
                        BinOp::Add => x.wrapping_add(y),
                        BinOp::Sub => x.wrapping_sub(y),
                        BinOp::Mul => x.wrapping_mul(y),
                        BinOp::Div => x.checked_div(y).unwrap_or(0),
                        BinOp::Mod => x.checked_rem(y).unwrap_or(0),
                        BinOp::BitAnd => x & y,
                        BinOp::BitOr => x | y,
                        BinOp::BitXor => x ^ y,
                        BinOp::Equal => i32::from(x == y),
                        BinOp::Greater => i32::from(x > y),
                        BinOp::Less => i32::from(x < y),
                        BinOp::LogicalAnd => i32::from(x != 0 && y != 0),
                        BinOp::LogicalOr => i32::from(x != 0 || y != 0),
                    };
                    stack.push(Parameter::Number(result));
                }
                Op::Un(op) => {
                    let x = stack.pop().map_or(0, |v| v.number());
                    let result = match op {
                        UnOp::Not => i32::from(x == 0),
                        UnOp::Complement => !x,
                    };
                    stack.push(Parameter::Number(result));
                }
                Op::IncrementParams => {
                    if !incremented
                        && let (Parameter::Number(x), Parameter::Number(y)) =
                            (&params[0], &params[1])
                    {
                        let (x, y) = (*x, *y);
                        params[0] = Parameter::Number(x + 1);
                        params[1] = Parameter::Number(y + 1);
                        incremented = true;
                    }
                }
                Op::Print(conversion) => match (stack.pop(), conversion) {
                    (None, _) => {}
                    (Some(Parameter::Number(0)), 'c') => output.push(128),
                    (Some(Parameter::Number(value)), 'c') => output.push(value as u8),
                    (Some(Parameter::String(_)), 'c') => {}
                    (Some(Parameter::Number(value)), _) => {
                        output.extend(format!("{value}").into_bytes());
                    }
                    (Some(Parameter::String(text)), _) => output.extend(text),
                },
                Op::Format(flags, conversion) => {
                    let value = stack.pop().unwrap_or(Parameter::String(Vec::new()));
                    output.extend(sprintf::format_value(&value, *conversion, *flags));
                }
                Op::JumpIfFalse(target) => {
                    if stack.pop().map_or(0, |v| v.number()) == 0 {
                        pc = *target;
                    }
                }
                Op::Jump(target) => pc = *target,
            }
        }
        output
    }
}
