// Copyright 2025 the tput developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Search for terminfo database file for the terminal

use std::{
    env,
    ffi::OsStr,
    fs,
    path::{Path, PathBuf},
};

const TERMINFO_DIRS: &[&str] = &[
    "/etc/terminfo",
    "/lib/terminfo",
    "/usr/share/terminfo",
    "/usr/lib/terminfo",
    "/usr/share/lib/terminfo",
    "/usr/local/share/terminfo",
    "/usr/local/share/lib/terminfo",
    "/usr/local/lib/terminfo",
    "/usr/local/ncurses/lib/terminfo",
    "/boot/system/data/terminfo", // haiku
];

/// Errors reported when looking for a terminfo database file
#[derive(thiserror::Error, Debug, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// The name of the terminal is not valid
    #[error("InvalidTerminalName")]
    InvalidTerminalName,
    /// Terminfo file for the terminal could not be found
    #[error("File not found")]
    FileNotFound,
}

/// Leaf directories a terminal name can live under within a root
fn leaf_directories(term_name: &OsStr, dir: &Path) -> [PathBuf; 2] {
    let first_byte = term_name.as_encoded_bytes()[0];

    // Standard layout - leaf directories use the first character of the
    // terminal name. Systems with non-case-sensitive filesystems (MacOS,
    // Windows) use the first byte in hexadecimal form instead.
    [
        dir.join((first_byte as char).to_string()),
        dir.join(format!("{first_byte:02x}")),
    ]
}

fn find_in_directory(term_name: &OsStr, dir: &Path) -> Result<PathBuf, Error> {
    for leaf in leaf_directories(term_name, dir) {
        let filename = leaf.join(term_name);
        if filename.exists() {
            return Ok(filename);
        }
    }

    Err(Error::FileNotFound)
}

/// Scan the leaf directories for entries that extend the terminal name,
/// returning the closest one
fn find_similar(term_name: &OsStr, dir: &Path) -> Option<PathBuf> {
    let name = term_name.as_encoded_bytes();
    let mut best: Option<(usize, PathBuf)> = None;

    for leaf in leaf_directories(term_name, dir) {
        let Ok(entries) = fs::read_dir(&leaf) else {
            continue;
        };
        for entry in entries.flatten() {
            let candidate = entry.file_name();
            let bytes = candidate.as_encoded_bytes();
            if !bytes.starts_with(name) {
                continue;
            }
            let diff = bytes.len() - name.len();
            if best.as_ref().is_none_or(|(best_diff, _)| diff < *best_diff) {
                best = Some((diff, leaf.join(&candidate)));
            }
        }
    }

    best.map(|(_, file)| file)
}

/// Returns all directories that are searched for terminfo files
///
/// `prefix` is searched before everything else when given. This function
/// does not attempt to verify if the directories to be searched actually
/// exist.
///
/// Returns a vector of directories.
pub fn search_directories(prefix: Option<&Path>) -> Vec<PathBuf> {
    let mut search_dirs = vec![];

    // Lazily evaluated iterator, consumed at most once.
    let mut default_dirs = TERMINFO_DIRS.iter().map(PathBuf::from);

    if let Some(prefix) = prefix {
        search_dirs.push(prefix.to_path_buf());
    }

    // Search the directory from the `TERMINFO` environment variable.
    if let Ok(dir) = env::var("TERMINFO") {
        search_dirs.push(PathBuf::from(&dir));
    }

    // Search `.terminfo` in the home directory.
    if let Some(home_dir) = env::home_dir() {
        let dir = home_dir.join(".terminfo");
        search_dirs.push(dir);
    }

    // Search colon separated directories from the `TERMINFO_DIRS`
    // environment variable.
    if let Ok(dirs) = env::var("TERMINFO_DIRS") {
        for dir in dirs.split(':') {
            if dir.is_empty() {
                // Empty directory means search the default locations.
                search_dirs.extend(&mut default_dirs);
            } else {
                search_dirs.push(PathBuf::from(dir));
            }
        }
    }

    // Search default terminfo locations (nothing is added if used already).
    search_dirs.extend(&mut default_dirs);

    search_dirs
}

/// Find terminfo database file for the terminal name
///
/// A name containing a path separator is taken as the file itself. The
/// search tries exact matches in every directory first, then falls back
/// to the entry that extends the name by the least (so a `screen.xterm`
/// request can still land on `screen.xterm-256color`).
///
/// Returns the file path if it exists, an error otherwise.
pub fn locate(
    term_name: impl AsRef<OsStr>,
    prefix: Option<&Path>,
) -> Result<PathBuf, Error> {
    let term_name = term_name.as_ref();
    if term_name.is_empty() {
        return Err(Error::InvalidTerminalName);
    }
    if term_name.as_encoded_bytes().contains(&b'/') {
        let file = PathBuf::from(term_name);
        return if file.exists() {
            Ok(file)
        } else {
            Err(Error::FileNotFound)
        };
    }

    let search_dirs = search_directories(prefix);

    for dir in &search_dirs {
        if let Ok(file) = find_in_directory(term_name, dir) {
            return Ok(file);
        }
    }

    for dir in &search_dirs {
        if let Some(file) = find_similar(term_name, dir) {
            tracing::debug!(terminal = %term_name.display(), file = %file.display(), "soft match");
            return Ok(file);
        }
    }

    Err(Error::FileNotFound)
}

#[cfg(test)]
mod test {
    use std::fs::{File, create_dir, exists};

    use tempfile::tempdir;

    use super::*;

    const TERM_NAME: &str = "no-such-terminal-123";

    #[test]
    fn empty_name() {
        assert_eq!(locate("", None), Err(Error::InvalidTerminalName));
    }

    #[test]
    fn missing_file() {
        // Not using TERM_NAME to avoid race conditions - `temp_env::with_vars`
        // is serialized, but we are not using that function here.
        assert_eq!(locate("no-such-terminal-1", None), Err(Error::FileNotFound));
    }

    #[test]
    fn found_xterm() {
        let found_file = locate("xterm", None);
        assert!(found_file.is_ok());
        assert!(exists(found_file.unwrap()).unwrap());
    }

    #[test]
    fn path_separator_bypasses_search() {
        let temp_dir = tempdir().unwrap();
        let file = temp_dir.path().join(TERM_NAME);
        File::create(&file).unwrap();

        assert_eq!(locate(&file, None), Ok(file));
        assert_eq!(
            locate("/no/such/path/no-such-terminal-1", None),
            Err(Error::FileNotFound)
        );
    }

    #[test]
    fn found_standard_layout_terminfo_dirs() {
        let temp_dir = tempdir().unwrap();
        let temp_dir = temp_dir.path();
        let leaf_dir = temp_dir.join("n");
        let terminfo_file = leaf_dir.join(TERM_NAME);
        create_dir(leaf_dir).unwrap();
        File::create(&terminfo_file).unwrap();
        let terminfo_dirs = format!("foo:{}:bar", temp_dir.display());

        temp_env::with_vars(
            [("TERMINFO_DIRS", Some(terminfo_dirs)), ("TERMINFO", None)],
            || {
                assert_eq!(locate(TERM_NAME, None), Ok(terminfo_file));
            },
        );
    }

    #[test]
    fn found_hex_layout_terminfo_dirs() {
        let temp_dir = tempdir().unwrap();
        let temp_dir = temp_dir.path();
        let leaf_dir = temp_dir.join("6e");
        let terminfo_file = leaf_dir.join(TERM_NAME);
        create_dir(leaf_dir).unwrap();
        File::create(&terminfo_file).unwrap();
        let terminfo_dirs = format!("foo:{}:bar", temp_dir.display());

        temp_env::with_vars(
            [("TERMINFO_DIRS", Some(terminfo_dirs)), ("TERMINFO", None)],
            || {
                assert_eq!(locate(TERM_NAME, None), Ok(terminfo_file));
            },
        );
    }

    #[test]
    fn found_standard_layout_terminfo_variable() {
        let temp_dir = tempdir().unwrap();
        let temp_dir = temp_dir.path();
        let leaf_dir = temp_dir.join("n");
        let terminfo_file = leaf_dir.join(TERM_NAME);
        create_dir(leaf_dir).unwrap();
        File::create(&terminfo_file).unwrap();

        temp_env::with_vars(
            [("TERMINFO_DIRS", None), ("TERMINFO", Some(temp_dir))],
            || {
                assert_eq!(locate(TERM_NAME, None), Ok(terminfo_file));
            },
        );
    }

    #[test]
    fn dot_terminfo_standard_layout() {
        let temp_dir = tempdir().unwrap();
        let temp_dir = temp_dir.path();
        let dot_terminfo = temp_dir.join(".terminfo");
        let leaf_dir = dot_terminfo.join("n");
        let terminfo_file = leaf_dir.join(TERM_NAME);
        create_dir(dot_terminfo).unwrap();
        create_dir(leaf_dir).unwrap();
        File::create(&terminfo_file).unwrap();

        temp_env::with_vars(
            [
                ("TERMINFO_DIRS", None),
                ("TERMINFO", None),
                ("HOME", Some(temp_dir)),
            ],
            || {
                assert_eq!(locate(TERM_NAME, None), Ok(terminfo_file));
            },
        );
    }

    #[test]
    fn prefix_overrides_everything() {
        let temp_dir = tempdir().unwrap();
        let temp_dir = temp_dir.path();
        let leaf_dir = temp_dir.join("n");
        let terminfo_file = leaf_dir.join(TERM_NAME);
        create_dir(leaf_dir).unwrap();
        File::create(&terminfo_file).unwrap();

        temp_env::with_vars(
            [("TERMINFO_DIRS", None::<&str>), ("TERMINFO", None)],
            || {
                assert_eq!(locate(TERM_NAME, Some(temp_dir)), Ok(terminfo_file.clone()));
            },
        );
    }

    #[test]
    fn soft_match_picks_closest() {
        let temp_dir = tempdir().unwrap();
        let temp_dir = temp_dir.path();
        let leaf_dir = temp_dir.join("n");
        create_dir(&leaf_dir).unwrap();
        File::create(leaf_dir.join("no-such-terminal-123-wide")).unwrap();
        File::create(leaf_dir.join("no-such-terminal-123-w")).unwrap();

        temp_env::with_vars(
            [("TERMINFO_DIRS", None::<&str>), ("TERMINFO", None)],
            || {
                assert_eq!(
                    locate(TERM_NAME, Some(temp_dir)),
                    Ok(leaf_dir.join("no-such-terminal-123-w"))
                );
            },
        );
    }

    #[test]
    fn search_order() {
        let expected_dirs: Vec<PathBuf> = [
            "/my/override",
            "/my/terminfo",
            "/home/user/.terminfo",
            "/my/terminfo1",
            "/my/terminfo2",
            "/etc/terminfo",
            "/lib/terminfo",
            "/usr/share/terminfo",
            "/usr/lib/terminfo",
            "/usr/share/lib/terminfo",
            "/usr/local/share/terminfo",
            "/usr/local/share/lib/terminfo",
            "/usr/local/lib/terminfo",
            "/usr/local/ncurses/lib/terminfo",
            "/boot/system/data/terminfo",
        ]
        .iter()
        .map(PathBuf::from)
        .collect();

        temp_env::with_vars(
            [
                ("TERMINFO_DIRS", Some("/my/terminfo1:/my/terminfo2")),
                ("TERMINFO", Some("/my/terminfo")),
                ("HOME", Some("/home/user")),
            ],
            || {
                assert_eq!(
                    search_directories(Some(Path::new("/my/override"))),
                    expected_dirs
                );
            },
        );
    }

    #[test]
    fn search_order_with_empty_element() {
        let expected_dirs: Vec<PathBuf> = [
            "/my/terminfo",
            "/home/user/.terminfo",
            "/my/terminfo1",
            "/etc/terminfo",
            "/lib/terminfo",
            "/usr/share/terminfo",
            "/usr/lib/terminfo",
            "/usr/share/lib/terminfo",
            "/usr/local/share/terminfo",
            "/usr/local/share/lib/terminfo",
            "/usr/local/lib/terminfo",
            "/usr/local/ncurses/lib/terminfo",
            "/boot/system/data/terminfo",
            "/my/terminfo2",
        ]
        .iter()
        .map(PathBuf::from)
        .collect();

        temp_env::with_vars(
            [
                ("TERMINFO_DIRS", Some("/my/terminfo1::/my/terminfo2")),
                ("TERMINFO", Some("/my/terminfo")),
                ("HOME", Some("/home/user")),
            ],
            || {
                assert_eq!(search_directories(None), expected_dirs);
            },
        );
    }
}
