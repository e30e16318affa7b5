// Copyright 2025 the tput developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! End-to-end: decode the bundled entry, compile it, and call
//! capabilities through the engine surface.

use tput::{Options, Parameter, Tput};

fn xterm_256color() -> Tput {
    let options = Options::default()
        .terminal("xterm-256color")
        .terminfo_file("usr/xterm-256color")
        .debug(true);
    Tput::new(options).unwrap()
}

#[test]
fn identity() {
    let tput = xterm_256color();
    assert_eq!(tput.terminal(), "xterm-256color");
    assert_eq!(tput.info().name, "xterm-256color");
    assert_eq!(tput.info().description, "xterm with 256 colors");
}

#[test]
fn cursor_addressing() {
    let mut tput = xterm_256color();
    assert_eq!(tput.call("cup", &[4.into(), 10.into()]), b"\x1b[5;11H");
    assert_eq!(
        tput.call("cursor_address", &[0.into(), 0.into()]),
        b"\x1b[1;1H"
    );
}

#[test]
fn colors() {
    let tput = xterm_256color();
    assert_eq!(tput.number("max_colors"), 256);
    assert_eq!(tput.number("colors"), 256);
    assert_eq!(tput.number("Co"), 256);
}

#[test]
fn booleans() {
    let tput = xterm_256color();
    assert!(tput.boolean("auto_right_margin"));
    assert!(tput.boolean("am"));
    assert!(!tput.boolean("hard_copy"));
}

#[test]
fn foreground_color_conditionals() {
    // setaf distinguishes the base, bright and indexed color ranges with
    // an else-if chain.
    let mut tput = xterm_256color();
    assert_eq!(tput.call("setaf", &[1.into()]), b"\x1b[31m");
    assert_eq!(tput.call("setaf", &[9.into()]), b"\x1b[91m");
    assert_eq!(tput.call("setaf", &[100.into()]), b"\x1b[38;5;100m");
}

#[test]
fn extended_capabilities() {
    let tput = xterm_256color();
    assert!(tput.has("AX"));
    assert!(tput.has("XT"));
    assert!(tput.has("kUP"));
}

#[test]
fn absent_capability_is_quiet() {
    let mut tput = xterm_256color();
    assert!(!tput.has("cursor_to_ll"));
    assert!(tput.call("cursor_to_ll", &[]).is_empty());
    assert!(tput.call("not-a-capability", &[]).is_empty());
    // A present string behaves the opposite way.
    assert!(tput.has("print_screen"));
    assert_eq!(tput.call("print_screen", &[]), b"\x1b[i");
}

#[test]
fn string_parameters() {
    let mut tput = xterm_256color();
    // A string where a number belongs prints through, and %i leaves
    // parameters alone unless both are numeric.
    let out = tput.call("cup", &[Parameter::from("x"), 3.into()]);
    assert_eq!(out, b"\x1b[x;3H");
}

#[test]
fn raw_templates_are_accessible() {
    let tput = xterm_256color();
    assert_eq!(tput.string("cup"), b"\x1b[%i%p1%d;%p2%dH");
    assert_eq!(tput.string("cursor_up"), b"\x1b[A");
}

#[test]
fn padded_write() {
    let mut tput = xterm_256color();
    let mut out = Vec::new();
    tput.write_cap(&mut out, "cursor_up", &[]).unwrap();
    assert_eq!(out, b"\x1b[A");
}
