// Copyright 2025 the tput developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Detecting terminal features and quirks
//!
//! Terminal databases lie, and some terminals lie harder. This module
//! inspects a parsed capability set, the terminal name and the ncurses
//! compatibility environment variables (`NCURSES_NO_UTF8_ACS`,
//! `NCURSES_NO_MAGIC_COOKIE`, `NCURSES_NO_PADDING`, `NCURSES_NO_SETBUF`)
//! to decide how the terminal actually behaves.

use std::collections::BTreeMap;
use std::env;

use crate::names;
use crate::parse::CapabilitySet;

/// Detected features and quirks of a terminal
#[derive(Debug, Clone, Default)]
pub struct Features {
    /// The terminal handles UTF-8 output
    pub unicode: bool,
    /// The alternate character set switch does not reach the DEC special
    /// graphics, so ACS line drawing cannot be trusted
    pub broken_acs: bool,
    /// The terminal maps the alternate charset to the PC ROM set rather
    /// than DEC special graphics
    pub pc_rom_set: bool,
    /// Magic cookie handling is enabled (no `NCURSES_NO_MAGIC_COOKIE`)
    pub magic_cookie: bool,
    /// Padding delays are enabled (no `NCURSES_NO_PADDING`)
    pub padding: bool,
    /// Buffered output is enabled (no `NCURSES_NO_SETBUF`)
    pub setbuf: bool,
    /// ACS source character to Unicode glyph
    pub acsc: BTreeMap<u8, char>,
    /// Unicode glyph back to ACS source character
    pub acscr: BTreeMap<char, u8>,
}

/// Inspect a capability set and the environment
pub fn detect(set: &CapabilitySet) -> Features {
    let pc_rom_set = detect_pc_rom_set(set);
    let (acsc, acscr) = parse_acs(set, pc_rom_set);
    Features {
        unicode: true,
        broken_acs: detect_broken_acs(set, pc_rom_set),
        pc_rom_set,
        magic_cookie: env::var_os("NCURSES_NO_MAGIC_COOKIE").is_none(),
        padding: env::var_os("NCURSES_NO_PADDING").is_none(),
        setbuf: env::var_os("NCURSES_NO_SETBUF").is_none(),
        acsc,
        acscr,
    }
}

/// The linux console advertises smacs/rmacs but maps them to `\x1b[11m`
/// without switching to DEC special graphics; terminals on the PC ROM
/// set have the same problem, and U8 / `NCURSES_NO_UTF8_ACS` let entries
/// and users state it outright.
fn detect_broken_acs(set: &CapabilitySet, pc_rom_set: bool) -> bool {
    if let Ok(value) = env::var("NCURSES_NO_UTF8_ACS") {
        return value.parse::<f64>().is_ok_and(|value| value != 0.0);
    }

    if let Some(&value) = set.numbers.get("U8")
        && value >= 0
    {
        return value != 0;
    }

    if set.name == "linux" || pc_rom_set {
        return true;
    }

    // Screen's termcap entry is bugged; it announces shift-in/shift-out
    // ACS switching it does not perform.
    if set.termcap
        && set.name.starts_with("screen")
        && let Ok(termcap) = env::var("TERMCAP")
        && termcap.contains("screen")
        && termcap.contains("hhII00")
    {
        let shifts = |capability: &str| {
            set.strings
                .get(capability)
                .is_some_and(|s| s.contains(&0x0e) || s.contains(&0x0f))
        };
        if shifts("enter_alt_charset_mode") || shifts("set_attributes") {
            return true;
        }
    }

    false
}

/// When entering the PC charset and the alternate charset are the same
/// sequence, the terminal does not use DEC special graphics as its ACS
fn detect_pc_rom_set(set: &CapabilitySet) -> bool {
    let strings = &set.strings;
    match (
        strings.get("enter_pc_charset_mode"),
        strings.get("enter_alt_charset_mode"),
    ) {
        (Some(pc), Some(alt)) if !pc.is_empty() && pc == alt => {
            strings.get("exit_pc_charset_mode") == strings.get("exit_alt_charset_mode")
        }
        _ => false,
    }
}

/// Build the ACS maps from the acs_chars pair list
fn parse_acs(
    set: &CapabilitySet,
    pc_rom_set: bool,
) -> (BTreeMap<u8, char>, BTreeMap<char, u8>) {
    let mut acsc = BTreeMap::new();
    let mut acscr = BTreeMap::new();

    if pc_rom_set {
        return (acsc, acscr);
    }

    let empty = Vec::new();
    let chars = set.strings.get("acs_chars").unwrap_or(&empty);
    for (source, _) in names::DEC_SPECIAL {
        let Some(position) = chars.iter().position(|&c| c == source) else {
            continue;
        };
        let Some(&target) = chars.get(position + 1) else {
            continue;
        };
        let Some(glyph) = names::dec_special(target) else {
            continue;
        };
        acsc.insert(source, glyph);
        acscr.insert(glyph, source);
    }

    (acsc, acscr)
}
