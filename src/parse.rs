// Copyright 2025 the tput developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Parsing compiled terminfo database entries
//!
//! Handles the legacy binary format (magic `0x011a`, 16-bit numbers, and the
//! `0x021e` variant with 32-bit numbers) and the extended layout that
//! carries user-defined capabilities behind a symbol table. All multi-byte
//! fields are little-endian.

use std::{
    collections::BTreeMap,
    io::{Cursor, Read, Seek, SeekFrom},
    mem,
    path::{Path, PathBuf},
};

use crate::names;

/// Numeric sentinel for an absent capability.
const ABSENT: u16 = 0xffff;
/// Some entries (screen-256color) write `{0xfe, 0xff}` where they mean
/// absent. Only honored in string offset tables.
const ABSENT_BROKEN: u16 = 0xfffe;

#[repr(u16)]
enum Magic {
    /// Original format, 16-bit numbers
    Legacy = 0x011a,
    /// 32-bit numbers
    Wide = 0x021e,
}

/// Errors reported when decoding a terminfo entry
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The magic number is invalid or unsupported
    #[error("Unknown magic number")]
    BadMagic,
    /// The names section is not terminated by the NUL byte
    #[error("Names section without final NUL")]
    UnterminatedNames,
    /// A string offset points past its string table
    #[error("String offset out of range")]
    StringOutOfRange,
    /// A string is not terminated by the NUL byte
    #[error("String without final NUL")]
    UnterminatedString,
    /// The extended symbol table has fewer names than the advertised counts
    #[error("Symbol table does not cover the advertised capability counts")]
    SymbolCountMismatch,
    /// Data remains after the extended symbol table
    #[error("Trailing data after the symbol table")]
    TrailingData,
    /// Input ended early, probably a truncated entry
    #[error("I/O error")]
    Truncated(#[from] std::io::Error),
    /// An extended capability name is not valid UTF-8
    #[error("Invalid UTF-8 string")]
    Utf8(#[from] std::str::Utf8Error),
}

/// One terminal's capabilities, keyed by canonical long name
///
/// Extended (user-defined) capabilities keep the name from the entry's
/// symbol table (`AX`, `Cs`, `kDC3`, ...).
#[derive(Debug, Default, Clone)]
pub struct CapabilitySet {
    /// Primary terminal name
    pub name: String,
    /// All names of the entry, primary included, description excluded
    pub names: Vec<String>,
    /// Trailing description field
    pub description: String,
    pub bools: BTreeMap<String, bool>,
    pub numbers: BTreeMap<String, i32>,
    pub strings: BTreeMap<String, Vec<u8>>,
    /// File the entry was read from
    pub file: PathBuf,
    /// Database root directory the file was found under
    pub dir: PathBuf,
    /// Whether the entry came from a termcap source
    pub termcap: bool,
}

/// Parse a terminfo entry, extended section included
///
/// A malformed extended section is dropped with a diagnostic and the base
/// entry is returned; use [`parse_strict`] to propagate such failures.
pub fn parse(buffer: &[u8], file: impl AsRef<Path>) -> Result<CapabilitySet, Error> {
    parse_entry(buffer, file.as_ref(), true, false)
}

/// Parse a terminfo entry, failing on any malformed section
pub fn parse_strict(buffer: &[u8], file: impl AsRef<Path>) -> Result<CapabilitySet, Error> {
    parse_entry(buffer, file.as_ref(), true, true)
}

/// Parse only the base section, ignoring any extended data
pub fn parse_base_only(buffer: &[u8], file: impl AsRef<Path>) -> Result<CapabilitySet, Error> {
    parse_entry(buffer, file.as_ref(), false, false)
}

fn parse_entry(
    buffer: &[u8],
    file: &Path,
    extended: bool,
    strict: bool,
) -> Result<CapabilitySet, Error> {
    let mut reader = Cursor::new(buffer);
    let mut set = CapabilitySet {
        file: file.to_path_buf(),
        dir: file
            .parent()
            .and_then(Path::parent)
            .map(Path::to_path_buf)
            .unwrap_or_default(),
        ..CapabilitySet::default()
    };

    let number_size = parse_base(&mut reader, &mut set)?;

    if extended {
        align_cursor(&mut reader)?;
        let start = reader.position() as usize;
        // Anything shorter than the extended header is padding, not data.
        if buffer.len() > start + 1 {
            match parse_extended(&buffer[start..], number_size) {
                Ok((bools, numbers, strings)) => {
                    set.bools.extend(bools);
                    set.numbers.extend(numbers);
                    set.strings.extend(strings);
                }
                Err(err) if strict => return Err(err),
                Err(err) => {
                    tracing::warn!(terminal = %set.name, error = %err,
                        "discarding malformed extended section");
                }
            }
        }
    }

    Ok(set)
}

fn read_u8(reader: &mut impl Read) -> Result<u8, Error> {
    let mut buffer = [0u8; 1];
    reader.read_exact(&mut buffer)?;
    Ok(buffer[0])
}

fn read_le16(reader: &mut impl Read) -> Result<u16, Error> {
    let mut buffer = [0u8; 2];
    reader.read_exact(&mut buffer)?;
    Ok(u16::from_le_bytes(buffer))
}

/// Read a number of the format's width; `None` for the absent sentinel
fn read_number(reader: &mut impl Read, number_size: usize) -> Result<Option<i32>, Error> {
    if number_size == 4 {
        let mut buffer = [0u8; 4];
        reader.read_exact(&mut buffer)?;
        let value = i32::from_le_bytes(buffer);
        Ok((value >= 0).then_some(value))
    } else {
        let value = read_le16(reader)?;
        Ok((value != ABSENT).then_some(i32::from(value)))
    }
}

fn read_slice<'a>(reader: &mut Cursor<&'a [u8]>, size: usize) -> Result<&'a [u8], Error> {
    let start = reader.position() as usize;
    let end = reader.seek(SeekFrom::Current(size as i64))? as usize;
    let buffer = &reader.get_ref();
    match buffer.get(start..end) {
        Some(slice) => Ok(slice),
        None => Err(Error::Truncated(std::io::Error::from(
            std::io::ErrorKind::UnexpectedEof,
        ))),
    }
}

/// NUL-terminated string at `offset` in a string table
fn get_string(string_table: &[u8], offset: usize) -> Result<&[u8], Error> {
    let Some(string_slice) = string_table.get(offset..) else {
        return Err(Error::StringOutOfRange);
    };
    match string_slice.iter().position(|c| *c == b'\0') {
        Some(length) => Ok(&string_slice[..length]),
        None => Err(Error::UnterminatedString),
    }
}

/// Offsets 0xffff and the broken 0xfffe both mean absent in string tables
fn check_offset(offset: u16) -> Option<usize> {
    match offset {
        ABSENT | ABSENT_BROKEN => None,
        _ => Some(usize::from(offset)),
    }
}

/// Skip the pad byte if needed to restore 2-byte alignment
fn align_cursor(reader: &mut Cursor<&[u8]>) -> Result<(), Error> {
    if reader.position() & 1 == 1 {
        reader.seek_relative(1)?;
    }
    Ok(())
}

/// Parse the 12-byte header and the base capability sections
///
/// Returns the number width (2 or 4 bytes) selected by the magic.
fn parse_base(reader: &mut Cursor<&[u8]>, set: &mut CapabilitySet) -> Result<usize, Error> {
    let magic = read_le16(reader)?;
    let names_size = usize::from(read_le16(reader)?);
    let bool_count = usize::from(read_le16(reader)?);
    let num_count = usize::from(read_le16(reader)?);
    let str_count = usize::from(read_le16(reader)?);
    let str_size = usize::from(read_le16(reader)?);

    let number_size = match magic {
        m if m == Magic::Legacy as u16 => 2,
        m if m == Magic::Wide as u16 => 4,
        _ => return Err(Error::BadMagic),
    };

    let names = read_slice(reader, names_size)?;
    let Some((&0, names)) = names.split_last() else {
        return Err(Error::UnterminatedNames);
    };
    let names = str::from_utf8(names)?;
    let mut parts: Vec<String> = names.split('|').map(str::to_owned).collect();
    set.name = parts.first().cloned().unwrap_or_default();
    set.description = parts.pop().unwrap_or_default();
    set.names = parts;

    // One byte per flag; 1 means set, anything else means unset. Entries may
    // define more capabilities than the tables name; extras are skipped.
    for index in 0..bool_count {
        let value = read_u8(reader)?;
        if let Some(entry) = names::BOOLEANS.get(index) {
            set.bools.insert(entry.name.to_owned(), value == 1);
        }
    }

    align_cursor(reader)?;

    for index in 0..num_count {
        let value = read_number(reader, number_size)?;
        if let (Some(value), Some(entry)) = (value, names::NUMBERS.get(index)) {
            set.numbers.insert(entry.name.to_owned(), value);
        }
    }

    let str_offsets = read_slice(reader, mem::size_of::<u16>() * str_count)?;
    let mut str_offsets_reader = Cursor::new(str_offsets);
    let str_table = read_slice(reader, str_size)?;

    for index in 0..str_count {
        let offset = read_le16(&mut str_offsets_reader)?;
        let (Some(offset), Some(entry)) = (check_offset(offset), names::STRINGS.get(index)) else {
            continue;
        };
        let value = get_string(str_table, offset)?;
        set.strings.insert(entry.name.to_owned(), value.to_vec());
    }

    Ok(number_size)
}

type ExtendedCapabilities = (
    BTreeMap<String, bool>,
    BTreeMap<String, i32>,
    BTreeMap<String, Vec<u8>>,
);

/// Parse the extended section
///
/// Layout: a 10-byte header, flag bytes, pad, numbers, string value offsets,
/// then (skipped) symbol offsets, the string table, and the symbol table.
/// The string table is located from the end of the buffer via the header's
/// last field; the symbol table begins after the longest string value. The
/// symbols name every extended capability, flags first, then numbers, then
/// strings, and must end exactly at the end of the buffer.
fn parse_extended(data: &[u8], number_size: usize) -> Result<ExtendedCapabilities, Error> {
    let mut reader = Cursor::new(data);

    let bool_count = usize::from(read_le16(&mut reader)?);
    let num_count = usize::from(read_le16(&mut reader)?);
    let str_count = usize::from(read_le16(&mut reader)?);
    let _ext_str_usage = usize::from(read_le16(&mut reader)?);
    let last_str_table_offset = usize::from(read_le16(&mut reader)?);

    let flags = read_slice(&mut reader, bool_count)?.to_vec();
    align_cursor(&mut reader)?;

    let mut values = Vec::with_capacity(num_count);
    for _ in 0..num_count {
        values.push(read_number(&mut reader, number_size)?);
    }

    let mut offsets = Vec::with_capacity(str_count);
    for _ in 0..str_count {
        offsets.push(check_offset(read_le16(&mut reader)?));
    }

    // The symbol offsets between here and the string table are redundant;
    // the string table is found from the end of the buffer instead.
    let Some(table_start) = data.len().checked_sub(last_str_table_offset) else {
        return Err(Error::StringOutOfRange);
    };
    if table_start < reader.position() as usize {
        return Err(Error::StringOutOfRange);
    }
    let str_table = &data[table_start..];

    let mut strings = Vec::with_capacity(str_count);
    let mut longest_end = None;
    for offset in &offsets {
        let Some(offset) = offset else {
            strings.push(None);
            continue;
        };
        let value = get_string(str_table, *offset)?;
        let end = offset + value.len();
        if longest_end.is_none_or(|high| high < end) {
            longest_end = Some(end);
        }
        strings.push(Some(value.to_vec()));
    }

    // Symbols begin one NUL past the longest string value; with no string
    // values present they begin at the string table itself.
    let mut symbols = Vec::new();
    let mut position = longest_end.map_or(0, |end| end + 1);
    while position < str_table.len() {
        match str_table[position..].iter().position(|c| *c == b'\0') {
            Some(length) => {
                symbols.push(&str_table[position..position + length]);
                position += length + 1;
            }
            None => {
                symbols.push(&str_table[position..]);
                position = str_table.len();
            }
        }
    }

    let expected = bool_count + num_count + str_count;
    if symbols.len() < expected {
        return Err(Error::SymbolCountMismatch);
    }
    if symbols.len() > expected {
        return Err(Error::TrailingData);
    }

    let mut symbols = symbols.into_iter();
    let mut symbol = move || -> Result<String, Error> {
        // Counts verified above.
        let name = symbols.next().ok_or(Error::SymbolCountMismatch)?;
        Ok(str::from_utf8(name)?.to_owned())
    };

    let mut ext_bools = BTreeMap::new();
    for flag in flags {
        ext_bools.insert(symbol()?, flag == 1);
    }

    let mut ext_numbers = BTreeMap::new();
    for value in values {
        let name = symbol()?;
        if let Some(value) = value {
            ext_numbers.insert(name, value);
        }
    }

    let mut ext_strings = BTreeMap::new();
    for value in strings {
        let name = symbol()?;
        if let Some(value) = value {
            ext_strings.insert(name, value);
        }
    }

    Ok((ext_bools, ext_numbers, ext_strings))
}
