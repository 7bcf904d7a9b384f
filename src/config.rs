// Copyright (c) 2021 James O. D. Hunt.
//
// SPDX-License-Identifier: Apache-2.0
//

//! Config file support.
//!
//! A config file is line oriented. Each line has the form:
//!
//! ```text
//! name = value
//! ```
//!
//! `:` may be used instead of `=`, and whitespace around the name and value
//! is ignored. A `#` or `;` before the separator makes the whole line a
//! comment. Blank lines and lines without a separator are ignored. There
//! are no multi-line values and no escapes.
//!
//! Names are matched against the long names of a [Table]. Lines that are
//! not valid UTF-8 are converted lossily.

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use tracing::{debug, trace};

use crate::args::{Need, Table};
use crate::error::{Error, Result};

const COMMENT_PREFIX: &str = ";";

/// Split a config line into its name and value.
///
/// Returns [None] for blank lines, comments, lines without a separator and
/// lines with an empty name.
pub fn split_line(line: &str) -> Option<(&str, &str)> {
    let line = line.trim_start();

    let pos = line.find(|c: char| matches!(c, '=' | ':' | '#' | ';'))?;

    match line.as_bytes()[pos] {
        b'=' | b':' => (),
        _ => return None,
    }

    let name = line[..pos].trim_end();

    if name.is_empty() {
        return None;
    }

    Some((name, line[pos + 1..].trim()))
}

/// Process config lines read from `reader` against a [Table].
///
/// For each line, the action of the first definition whose long name
/// matches runs with the line's value. Unknown names are ignored.
///
/// The first failing action stops reading and is returned as
/// [Error::Config].
pub fn process_config<C, R: BufRead>(reader: R, table: &Table<C>, ctx: &mut C) -> Result<()> {
    for (i, line) in reader.split(b'\n').enumerate() {
        let line = line?;
        let line = String::from_utf8_lossy(&line);

        let (name, value) = match split_line(&line) {
            Some(found) => found,
            None => continue,
        };

        let def = match table.find_name(name) {
            Some(def) => def,
            None => {
                trace!(line = i + 1, name, "ignoring unknown config name");
                continue;
            }
        };

        debug!(line = i + 1, name, value, "handling config value");

        def.apply(Some(value), ctx).map_err(|e| Error::Config {
            line: i + 1,
            key: name.into(),
            source: Box::new(e),
        })?;
    }

    Ok(())
}

/// Process the config file at `path` against a [Table].
///
/// See [process_config()].
pub fn process_config_file<C, P: AsRef<Path>>(path: P, table: &Table<C>, ctx: &mut C) -> Result<()> {
    let path = path.as_ref();

    debug!(path = %path.display(), "reading config file");

    let file = File::open(path)?;

    process_config(BufReader::new(file), table, ctx)
}

/// Write a config file template for a [Table].
///
/// For each definition with a long name, the name and help text are written
/// as comments, followed by a `name = default` line. Reading the template
/// back with [process_config()] gives each definition its default value
/// (surrounding whitespace is not preserved).
///
/// Flags, and options without a default, have nothing to encode so their
/// line is commented out (`; name =`).
pub fn generate_config<C, W: Write>(writer: &mut W, table: &Table<C>) -> Result<()> {
    for def in table.iter() {
        let name = match def.long.as_deref() {
            Some(name) => name,
            None => continue,
        };

        writeln!(writer, "{} {}", COMMENT_PREFIX, name)?;

        for line in def.help.as_deref().unwrap_or("").lines() {
            writeln!(writer, "{}   {}", COMMENT_PREFIX, line)?;
        }

        match (def.needs(), def.default.as_deref()) {
            (Need::Argument, Some(default)) => writeln!(writer, "{} = {}", name, default)?,
            _ => writeln!(writer, "{} {} =", COMMENT_PREFIX, name)?,
        }
    }

    Ok(())
}
