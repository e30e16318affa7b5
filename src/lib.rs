// Copyright 2025 the tput developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Terminal capability engine: terminfo and termcap reading, compiling
//! and emitting
//!
//! [`Tput`] reads the capability database entry for a terminal (binary
//! terminfo with extended sections, or text termcap translated on the
//! fly), compiles every parameterized string into a small program, and
//! answers capability queries by name or by any of its aliases:
//!
//! ```no_run
//! use tput::{Options, Parameter, Tput};
//!
//! let mut tput = Tput::new(Options::default())?;
//! if tput.has("cup") {
//!     let bytes = tput.call("cursor_address", &[4.into(), 2.into()]);
//!     assert!(!bytes.is_empty());
//! }
//! # Ok::<(), tput::Error>(())
//! ```
//!
//! When no database entry can be found the engine falls back to a
//! bundled `xterm-256color` entry, so construction only fails in debug
//! mode or on invalid options.

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub mod captoinfo;
pub mod compile;
pub mod emit;
pub mod features;
pub mod locate;
pub mod names;
pub mod parse;
pub mod sprintf;
pub mod termcap;

pub use compile::{Capability, Parameter, Program};
pub use features::Features;
pub use locate::{locate, search_directories};
pub use parse::CapabilitySet;
pub use sprintf::sprintf;

use compile::CompileOptions;

/// The bundled xterm-256color terminfo entry, used when no database
/// entry can be found
const FALLBACK_TERMINFO: &[u8] = include_bytes!("../usr/xterm-256color");
const FALLBACK_TERMINFO_NAME: &str = "usr/xterm-256color";

/// The bundled xterm termcap database
const FALLBACK_TERMCAP: &str = include_str!("../usr/xterm.termcap");
const FALLBACK_TERMCAP_NAME: &str = "usr/xterm.termcap";

/// Errors reported while setting up a terminal
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] parse::Error),
    #[error(transparent)]
    Locate(#[from] locate::Error),
    #[error(transparent)]
    Termcap(#[from] termcap::Error),
    #[error("Could not read the database entry")]
    Read(#[from] std::io::Error),
}

/// Configuration for [`Tput::new`]
#[derive(Debug, Clone)]
pub struct Options {
    /// Terminal name; `TERM`, then `TERMINAL`, then `"xterm"` when unset
    pub terminal: Option<String>,
    /// Fail on the first setup or decode problem instead of falling back
    pub debug: bool,
    /// Keep padding directives and honor their delays
    pub padding: bool,
    /// Decode the extended capability section (on by default)
    pub extended: bool,
    /// Route all conversions through the printf formatter
    pub printf: bool,
    /// Prefer termcap sources over terminfo
    pub termcap: bool,
    /// Terminfo directory searched before everything else
    pub terminfo_prefix: Option<PathBuf>,
    /// Exact terminfo file to read, bypassing the search
    pub terminfo_file: Option<PathBuf>,
    /// Exact termcap file to read
    pub termcap_file: Option<PathBuf>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            terminal: None,
            debug: false,
            padding: false,
            extended: true,
            printf: false,
            termcap: false,
            terminfo_prefix: None,
            terminfo_file: None,
            termcap_file: None,
        }
    }
}

impl Options {
    #[must_use]
    pub fn terminal(mut self, name: impl Into<String>) -> Self {
        self.terminal = Some(name.into());
        self
    }

    #[must_use]
    pub const fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    #[must_use]
    pub const fn padding(mut self, padding: bool) -> Self {
        self.padding = padding;
        self
    }

    #[must_use]
    pub const fn extended(mut self, extended: bool) -> Self {
        self.extended = extended;
        self
    }

    #[must_use]
    pub const fn printf(mut self, printf: bool) -> Self {
        self.printf = printf;
        self
    }

    #[must_use]
    pub const fn termcap(mut self, termcap: bool) -> Self {
        self.termcap = termcap;
        self
    }

    #[must_use]
    pub fn terminfo_prefix(mut self, dir: impl Into<PathBuf>) -> Self {
        self.terminfo_prefix = Some(dir.into());
        self
    }

    #[must_use]
    pub fn terminfo_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.terminfo_file = Some(file.into());
        self
    }

    #[must_use]
    pub fn termcap_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.termcap_file = Some(file.into());
        self
    }
}

/// A terminal with its capabilities compiled and ready to call
#[derive(Debug)]
pub struct Tput {
    terminal: String,
    set: CapabilitySet,
    features: Features,
    capabilities: BTreeMap<String, Capability>,
    /// Effective padding: requested and not vetoed by the environment
    padding: bool,
}

impl Tput {
    /// Set up the terminal named by the options or the environment
    pub fn new(options: Options) -> Result<Self, Error> {
        let terminal = options
            .terminal
            .clone()
            .or_else(|| env::var("TERM").ok())
            .or_else(|| env::var("TERMINAL").ok())
            .unwrap_or_else(|| "xterm".to_string())
            .to_lowercase();

        let set = if options.termcap {
            Self::setup_termcap(&options, &terminal)?
        } else {
            Self::setup_terminfo(&options, &terminal)?
        };

        Ok(Self::build(&options, terminal, set))
    }

    fn setup_terminfo(options: &Options, terminal: &str) -> Result<CapabilitySet, Error> {
        match Self::read_terminfo(options, terminal) {
            Ok(set) => Ok(set),
            Err(error) if options.debug => Err(error),
            Err(error) => {
                tracing::debug!(terminal, %error, "using the bundled terminfo entry");
                Ok(parse::parse(FALLBACK_TERMINFO, FALLBACK_TERMINFO_NAME)?)
            }
        }
    }

    fn read_terminfo(options: &Options, terminal: &str) -> Result<CapabilitySet, Error> {
        let file = match &options.terminfo_file {
            Some(file) => file.clone(),
            None => locate::locate(terminal, options.terminfo_prefix.as_deref())?,
        };
        let data = fs::read(&file)?;
        let set = match (options.extended, options.debug) {
            (true, true) => parse::parse_strict(&data, &file)?,
            (true, false) => parse::parse(&data, &file)?,
            (false, _) => parse::parse_base_only(&data, &file)?,
        };
        Ok(set)
    }

    fn setup_termcap(options: &Options, terminal: &str) -> Result<CapabilitySet, Error> {
        match Self::read_termcap(options, terminal) {
            Ok(set) => Ok(set),
            Err(error) if options.debug => Err(error),
            Err(error) => {
                tracing::debug!(terminal, %error, "using the bundled termcap entry");
                let file = Path::new(FALLBACK_TERMCAP_NAME);
                let set = termcap::parse(FALLBACK_TERMCAP, terminal, file)
                    .or_else(|_| termcap::parse(FALLBACK_TERMCAP, "xterm", file))?;
                Ok(set)
            }
        }
    }

    /// Try termcap sources in order: the explicit file, the `TERMCAP`
    /// variable (a path when it starts with `/`, inline text otherwise),
    /// then `/etc/termcap`. A source that parses but lacks the terminal
    /// falls through to the next.
    fn read_termcap(options: &Options, terminal: &str) -> Result<CapabilitySet, Error> {
        let mut sources: Vec<(String, PathBuf)> = Vec::new();

        if let Some(file) = &options.termcap_file
            && let Ok(text) = fs::read_to_string(file)
        {
            sources.push((text, file.clone()));
        }

        if let Ok(value) = env::var("TERMCAP")
            && !value.is_empty()
        {
            if value.starts_with('/') {
                let path = PathBuf::from(&value);
                if let Ok(text) = fs::read_to_string(&path) {
                    sources.push((text, path));
                }
            } else {
                sources.push((value, PathBuf::from("TERMCAP")));
            }
        }

        let etc = Path::new("/etc/termcap");
        if let Ok(text) = fs::read_to_string(etc) {
            sources.push((text, etc.to_path_buf()));
        }

        for (text, path) in &sources {
            if termcap::contains(text, terminal) {
                return Ok(termcap::parse(text, terminal, path)?);
            }
        }
        Err(termcap::Error::NoEntry(terminal.to_string()).into())
    }

    fn build(options: &Options, terminal: String, set: CapabilitySet) -> Self {
        let features = features::detect(&set);
        let padding = options.padding && features.padding;
        let compile_options = CompileOptions {
            padding,
            printf: options.printf,
        };

        let mut capabilities: BTreeMap<String, Capability> = BTreeMap::new();
        for (name, &value) in &set.bools {
            capabilities.insert(name.clone(), Capability::Bool(value));
        }
        for (name, &value) in &set.numbers {
            capabilities.insert(name.clone(), Capability::Number(value));
        }
        for (name, value) in &set.strings {
            tracing::debug!(capability = name, "compiling");
            let program = if name == "init_file" || name == "reset_file" {
                Self::read_sequence_file(value)
            } else {
                compile::compile_with(value, compile_options)
            };
            capabilities.insert(name.clone(), Capability::String(program));
        }

        // Every canonical capability has a value, present or not.
        for alias in &names::BOOLEANS {
            capabilities
                .entry(alias.name.to_string())
                .or_insert(Capability::Bool(false));
        }
        for alias in &names::NUMBERS {
            capabilities
                .entry(alias.name.to_string())
                .or_insert(Capability::Number(-1));
        }
        for alias in &names::STRINGS {
            capabilities
                .entry(alias.name.to_string())
                .or_insert_with(|| Capability::String(Program::noop()));
        }

        Self {
            terminal,
            set,
            features,
            capabilities,
            padding,
        }
    }

    /// init_file and reset_file name a file whose contents are the
    /// sequence to send; unreadable files leave the capability a no-op
    fn read_sequence_file(value: &[u8]) -> Program {
        str::from_utf8(value)
            .ok()
            .and_then(|path| fs::read(path).ok())
            .map_or_else(Program::noop, Program::literal)
    }

    fn canonical<'a>(&self, name: &'a str) -> &'a str {
        names::resolve(name).map_or(name, |alias| alias.name)
    }

    /// Whether the terminal has a capability, by any alias.
    ///
    /// A number counts as present unless it is -1; a boolean when true; a
    /// string when non-empty. Unrecognized names are looked up verbatim,
    /// so extended capabilities (`AX`, `Cs`, ...) can be queried too.
    pub fn has(&self, name: &str) -> bool {
        let name = self.canonical(name);
        if let Some(&number) = self.set.numbers.get(name) {
            return number != -1;
        }
        if let Some(&flag) = self.set.bools.get(name) {
            return flag;
        }
        if let Some(string) = self.set.strings.get(name) {
            return !string.is_empty();
        }
        false
    }

    fn capability(&self, name: &str) -> Option<&Capability> {
        self.capabilities.get(self.canonical(name))
    }

    /// A boolean capability; false when absent or not a boolean
    pub fn boolean(&self, name: &str) -> bool {
        match self.capability(name) {
            Some(Capability::Bool(flag)) => *flag,
            _ => false,
        }
    }

    /// A numeric capability; -1 when absent or not a number
    pub fn number(&self, name: &str) -> i32 {
        match self.capability(name) {
            Some(Capability::Number(number)) => *number,
            _ => -1,
        }
    }

    /// The raw, uncompiled template of a string capability
    pub fn string(&self, name: &str) -> &[u8] {
        let name = self.canonical(name);
        self.set.strings.get(name).map_or(b"", Vec::as_slice)
    }

    /// Run a string capability against its parameters.
    ///
    /// Absent capabilities and non-strings produce no output. Takes
    /// `&mut self` because programs carry their static variables across
    /// calls.
    pub fn call(&mut self, name: &str, params: &[Parameter]) -> Vec<u8> {
        let name = self.canonical(name);
        match self.capabilities.get_mut(name) {
            Some(Capability::String(program)) => program.call(params),
            _ => Vec::new(),
        }
    }

    /// Run a string capability and write it out with padding applied
    pub fn write_cap(
        &mut self,
        writer: &mut impl Write,
        name: &str,
        params: &[Parameter],
    ) -> std::io::Result<()> {
        let text = self.call(name, params);
        let xon = !self.boolean("needs_xon_xoff") || self.boolean("xon_xoff");
        emit::print_padded(writer, &text, self.padding, xon)
    }

    /// The resolved terminal name
    pub fn terminal(&self) -> &str {
        &self.terminal
    }

    /// The parsed capability set the terminal was built from
    pub const fn info(&self) -> &CapabilitySet {
        &self.set
    }

    /// Detected features and quirks
    pub const fn features(&self) -> &Features {
        &self.features
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn bundled() -> Tput {
        let options = Options::default()
            .terminal("no-such-terminal-tput-1")
            .terminfo_prefix("/no/such/prefix");
        temp_env::with_vars(
            [
                ("TERMINFO", None::<&str>),
                ("TERMINFO_DIRS", None),
                ("HOME", Some("/no/such/home")),
            ],
            || Tput::new(options).unwrap(),
        )
    }

    #[test]
    fn fallback_to_bundled_entry() {
        let tput = bundled();
        assert_eq!(tput.info().name, "xterm-256color");
        assert_eq!(tput.terminal(), "no-such-terminal-tput-1");
    }

    #[test]
    fn debug_mode_does_not_fall_back() {
        let options = Options::default()
            .terminal("no-such-terminal-tput-2")
            .terminfo_prefix("/no/such/prefix")
            .debug(true);
        temp_env::with_vars(
            [
                ("TERMINFO", None::<&str>),
                ("TERMINFO_DIRS", None),
                ("HOME", Some("/no/such/home")),
            ],
            || {
                assert!(matches!(
                    Tput::new(options.clone()),
                    Err(Error::Locate(locate::Error::FileNotFound))
                ));
            },
        );
    }

    #[test]
    fn aliases_resolve_identically() {
        let tput = bundled();
        assert_eq!(tput.has("cm"), tput.has("cup"));
        assert_eq!(tput.has("cm"), tput.has("cursor_address"));
        assert!(tput.has("cursor_address"));
    }

    #[test]
    fn absent_capabilities_have_defaults() {
        let tput = bundled();
        assert!(!tput.boolean("hard_copy"));
        assert_eq!(tput.number("buttons"), -1);
        assert!(!tput.has("buttons"));
        assert_eq!(tput.string("cursor_to_ll"), b"");
        assert!(!tput.has("ll"));
    }

    #[test]
    fn call_compiles_and_runs() {
        let mut tput = bundled();
        let bytes = tput.call("cup", &[4.into(), 2.into()]);
        assert_eq!(bytes, b"\x1b[5;3H");
        // Unknown capability names are silent.
        assert!(tput.call("no_such_capability", &[]).is_empty());
    }

    #[test]
    fn extended_capabilities_are_queryable() {
        let tput = bundled();
        assert!(tput.has("AX"));
        assert!(tput.has("XT"));
        assert!(!tput.has("NoSuchSymbol"));
    }

    #[test]
    fn termcap_fallback() {
        let options = Options::default()
            .terminal("no-such-terminal-tput-3")
            .termcap(true)
            .termcap_file("/no/such/termcap");
        let tput = temp_env::with_vars([("TERMCAP", None::<&str>)], || {
            Tput::new(options.clone()).unwrap()
        });
        assert!(tput.info().termcap);
        assert!(tput.info().names.iter().any(|name| name == "xterm"));
    }
}
