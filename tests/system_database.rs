// Copyright 2025 the tput developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Smoke test over the installed terminfo database: every readable entry
//! either decodes or is reported, and at least one decodes when a
//! database is present at all.

use std::fs;

use tput::{parse, search_directories};

#[test]
fn decode_all_system_terminals() {
    let mut decoded = 0usize;
    let mut skipped = 0usize;

    for dir in search_directories(None) {
        let Ok(dir) = fs::read_dir(&dir) else {
            continue;
        };
        for leaf in dir.flatten() {
            let Ok(leaf) = fs::read_dir(leaf.path()) else {
                continue;
            };
            for term in leaf.flatten() {
                let path = term.path();
                let Ok(buffer) = fs::read(&path) else {
                    continue;
                };
                match parse::parse(&buffer, &path) {
                    Ok(set) => {
                        assert!(!set.name.is_empty(), "unnamed entry in {path:?}");
                        decoded += 1;
                    }
                    Err(error) => {
                        println!("skipping {}: {error}", path.display());
                        skipped += 1;
                    }
                }
            }
        }
    }

    println!("decoded {decoded} entries, skipped {skipped}");
    if decoded + skipped > 0 {
        assert!(decoded > 0);
    }
}
