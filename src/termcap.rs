// Copyright 2025 the tput developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Parsing termcap databases
//!
//! A termcap database is plain text: one entry per line after backslash
//! continuations are joined, `|`-separated names in the first field, then
//! `:`-separated capability fields. A field is a string when it contains
//! `=`, a number when it contains `#`, and a flag otherwise.
//!
//! Looked-up entries are translated into the terminfo model: capability
//! codes become their canonical long names where known, and string values
//! go through the [`captoinfo`](crate::captoinfo) translator so the
//! compiler only ever sees terminfo syntax.

use std::collections::BTreeMap;
use std::path::Path;

use crate::captoinfo::captoinfo;
use crate::names;
use crate::parse::CapabilitySet;

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    #[error("No termcap entry for {0:?}")]
    NoEntry(String),
}

/// One raw termcap entry, before translation
struct Entry {
    name: String,
    names: Vec<String>,
    description: String,
    bools: Vec<String>,
    numbers: BTreeMap<String, i32>,
    strings: BTreeMap<String, String>,
}

/// Find `term` in a termcap database and translate it to the terminfo
/// model.
///
/// `file` is recorded in the returned set for diagnostics only; the data
/// has already been read.
pub fn parse(data: &str, term: &str, file: &Path) -> Result<CapabilitySet, Error> {
    let entries = parse_database(data);
    let entry = entries
        .iter()
        .find(|entry| entry.name == term || entry.names.iter().any(|name| name == term))
        .ok_or_else(|| Error::NoEntry(term.to_string()))?;
    Ok(translate(entry, file))
}

/// Whether a termcap database contains an entry for `term`
pub fn contains(data: &str, term: &str) -> bool {
    parse_database(data)
        .iter()
        .any(|entry| entry.name == term || entry.names.iter().any(|name| name == term))
}

/// Join backslash-newline continuations, swallowing the indentation of
/// the continued line
fn join_continuations(data: &str) -> String {
    let mut out = String::with_capacity(data.len());
    let mut rest = data;
    while let Some(position) = rest.find("\\\n") {
        out.push_str(&rest[..position]);
        rest = rest[position + 2..].trim_start_matches([' ', '\t']);
    }
    out.push_str(rest);
    out
}

fn parse_database(data: &str) -> Vec<Entry> {
    let data = join_continuations(data);
    let mut entries = Vec::new();

    for line in data.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut fields = line.split(':').map(str::trim).filter(|f| !f.is_empty());
        let Some(first) = fields.next() else {
            continue;
        };

        let mut names: Vec<String> = first.split('|').map(str::to_string).collect();
        // The last name is the description.
        let description = if names.len() > 1 {
            names.pop().unwrap_or_default()
        } else {
            String::new()
        };
        let Some(name) = names.first().cloned() else {
            continue;
        };
        let mut entry = Entry {
            name,
            names,
            description,
            bools: Vec::new(),
            numbers: BTreeMap::new(),
            strings: BTreeMap::new(),
        };

        for field in fields {
            if let Some((code, value)) = field.split_once('=') {
                entry
                    .strings
                    .insert(code.to_string(), value.to_string());
            } else if let Some((code, value)) = field.split_once('#') {
                match value.parse() {
                    Ok(value) => {
                        entry.numbers.insert(code.to_string(), value);
                    }
                    Err(_) => tracing::debug!(
                        field,
                        "termcap: discarding unparsable number"
                    ),
                }
            } else {
                entry.bools.push(field.to_string());
            }
        }

        entries.push(entry);
    }

    entries
}

/// Map a termcap code to its canonical long name, keeping unknown codes
/// verbatim
fn canonical(code: &str) -> String {
    names::from_termcap(code)
        .map_or_else(|| code.to_string(), |alias| alias.name.to_string())
}

fn translate(entry: &Entry, file: &Path) -> CapabilitySet {
    let mut set = CapabilitySet {
        name: entry.name.clone(),
        names: entry.names.clone(),
        description: entry.description.clone(),
        file: file.to_path_buf(),
        dir: file.parent().map(Path::to_path_buf).unwrap_or_default(),
        termcap: true,
        ..CapabilitySet::default()
    };

    for code in &entry.bools {
        set.bools.insert(canonical(code), true);
    }
    for (code, value) in &entry.numbers {
        set.numbers.insert(canonical(code), *value);
    }
    for (code, value) in &entry.strings {
        let translated = captoinfo(code, value.as_bytes());
        set.strings.insert(canonical(code), translated);
    }

    set
}

#[cfg(test)]
mod test {
    use super::*;

    const VT102: &str = concat!(
        "# A classic entry, abridged.\n",
        "vt102|dec vt102:\\\n",
        "\t:do=^J:co#80:li#24:cl=50\\E[;H\\E[2J:\\\n",
        "\t:le=^H:bs:zz:cm=5\\E[%i%d;%dH:nd=2\\E[C:up=2\\E[A:\\\n",
        "\t:ku=\\EOA:kd=\\EOB:kr=\\EOC:kl=\\EOD:kb=^H:vt#3:\n",
        "dumb|80-column dumb tty:am:co#80:bl=^G:cr=^M:do=^J:\n",
    );

    fn vt102() -> CapabilitySet {
        parse(VT102, "vt102", Path::new("/etc/termcap")).unwrap()
    }

    #[test]
    fn names_and_description() {
        let set = vt102();
        assert_eq!(set.name, "vt102");
        assert_eq!(set.names, ["vt102"]);
        assert_eq!(set.description, "dec vt102");
        assert!(set.termcap);
        assert_eq!(set.file, Path::new("/etc/termcap"));
    }

    #[test]
    fn second_entry_is_found() {
        let set = parse(VT102, "dumb", Path::new("/etc/termcap")).unwrap();
        assert_eq!(set.description, "80-column dumb tty");
        assert!(set.bools["auto_right_margin"]);
        assert_eq!(set.strings["bell"], b"^G");
    }

    #[test]
    fn missing_entry() {
        let err = parse(VT102, "vt420", Path::new("/etc/termcap")).unwrap_err();
        assert_eq!(err, Error::NoEntry("vt420".to_string()));
    }

    #[test]
    fn numbers_are_canonical() {
        let set = vt102();
        assert_eq!(set.numbers["columns"], 80);
        assert_eq!(set.numbers["lines"], 24);
        assert_eq!(set.numbers["virtual_terminal"], 3);
    }

    #[test]
    fn strings_are_translated() {
        let set = vt102();
        // Parameterized strings come out in terminfo syntax, with the
        // leading termcap padding turned into a directive.
        assert_eq!(
            set.strings["cursor_address"],
            b"\\E[%i%p1%d;%p2%dH$<5/>"
        );
        assert_eq!(set.strings["cursor_up"], b"\\E[A$<2/>");
        assert_eq!(set.strings["clear_screen"], b"\\E[;H\\E[2J$<50/>");
        assert_eq!(set.strings["key_up"], b"\\EOA");
    }

    #[test]
    fn unknown_codes_kept_verbatim() {
        let set = vt102();
        // 'bs' has a canonical long name; 'zz' maps to nothing and
        // survives under its own code.
        assert!(set.bools["backspaces_with_bs"]);
        assert!(set.bools["zz"]);
        assert!(!set.bools.contains_key("bs"));
    }

    #[test]
    fn contains_checks_all_names() {
        assert!(contains(VT102, "vt102"));
        assert!(contains(VT102, "dumb"));
        assert!(!contains(VT102, "xterm"));
    }

    #[test]
    fn continuations_are_joined() {
        let joined = join_continuations("a:\\\n   :b:\\\n\t:c:");
        assert_eq!(joined, "a::b::c:");
    }
}
