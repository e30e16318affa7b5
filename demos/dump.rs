// Copyright 2025 the tput developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Dump the capabilities of a terminal and drive a few of them.
//!
//! Usage: `cargo run --example dump [terminal-name]`

use std::{env, error::Error};

use tput::{Options, Tput};

fn main() -> Result<(), Box<dyn Error>> {
    let mut options = Options::default();
    if let Some(terminal) = env::args().nth(1) {
        options = options.terminal(terminal);
    }
    let mut tput = Tput::new(options)?;

    println!("terminal: {}", tput.terminal());
    println!("entry: {} ({})", tput.info().name, tput.info().description);
    println!("file: {}", tput.info().file.display());
    println!("unicode: {}", tput.features().unicode);
    println!("broken acs: {}", tput.features().broken_acs);
    println!();

    for (key, value) in &tput.info().bools {
        println!("\t{key}{}", if *value { "" } else { "@" });
    }
    for (key, value) in &tput.info().numbers {
        println!("\t{key}#{value}");
    }
    for (key, value) in &tput.info().strings {
        println!("\t{key}={:?}", String::from_utf8_lossy(value));
    }
    println!();

    for (row, col) in [(0, 0), (4, 10)] {
        let bytes = tput.call("cursor_address", &[row.into(), col.into()]);
        println!(
            "cursor_address({row}, {col}) = {:?}",
            String::from_utf8_lossy(&bytes)
        );
    }
    if tput.has("max_colors") {
        for color in [1, 9, 100] {
            let bytes = tput.call("set_a_foreground", &[color.into()]);
            println!(
                "set_a_foreground({color}) = {:?}",
                String::from_utf8_lossy(&bytes)
            );
        }
    }

    Ok(())
}
