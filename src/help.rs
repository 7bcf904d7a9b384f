// Copyright (c) 2021 James O. D. Hunt.
//
// SPDX-License-Identifier: Apache-2.0
//

//! Help text generation.
//!
//! Widths are counted in bytes: wrapping is not Unicode-aware.

use crate::args::{Definition, Table, DEFAULT_VALUE_NAME};
use crate::token::{LONG_OPT_PREFIX, OPT_PREFIX};

/// Default column at which descriptions start.
pub const DEFAULT_INDENT: usize = 25;

/// Default column at which descriptions are wrapped.
pub const DEFAULT_WIDTH: usize = 79;

const ENTRY_PREFIX: &str = "  ";

fn or_default(value: usize, default: usize) -> usize {
    if value == 0 {
        default
    } else {
        value
    }
}

/// Word wrap `text` so that no line goes past column `width`, indenting
/// continuation lines to column `indent`. The first line starts at column
/// `current`.
///
/// A newline directly after a word forces a break. A word too long to fit
/// on a line of its own is not split. A `width` of 0 means
/// [DEFAULT_WIDTH].
pub fn wrap_and_indent(text: &str, current: usize, indent: usize, width: usize) -> String {
    let width = or_default(width, DEFAULT_WIDTH);
    let text = text.trim_end();
    let bytes = text.as_bytes();
    let len = bytes.len();

    let mut out = String::with_capacity(len);
    let mut current = current;
    let mut start = 0;

    loop {
        // End of the text to print on this line.
        let mut end = start;
        let mut pos = start;

        loop {
            while pos < len && !bytes[pos].is_ascii_whitespace() {
                pos += 1;
            }

            if current + (pos - start) > width {
                if end == start {
                    end = pos;
                }
                break;
            }

            end = pos;

            if pos < len && bytes[pos] == b'\n' {
                break;
            }

            while pos < len && bytes[pos].is_ascii_whitespace() {
                pos += 1;
            }

            if pos >= len {
                break;
            }
        }

        if end >= len {
            out.push_str(&text[start..]);
            return out;
        }

        out.push_str(&text[start..end]);
        out.push('\n');
        out.push_str(&" ".repeat(indent));

        current = indent;
        start = end;

        while start < len && bytes[start].is_ascii_whitespace() {
            start += 1;
        }
    }
}

fn push_entry(out: &mut String, label: &str, help: Option<&str>, indent: usize, width: usize) {
    out.push_str(ENTRY_PREFIX);
    out.push_str(label);

    let pos = ENTRY_PREFIX.len() + label.len();

    if pos + 2 > indent {
        out.push('\n');
        out.push_str(&" ".repeat(indent));
    } else {
        out.push_str(&" ".repeat(indent - pos));
    }

    out.push_str(&wrap_and_indent(help.unwrap_or(""), indent, indent, width));
    out.push('\n');
}

fn env_label<C>(def: &Definition<C>) -> String {
    if def.is_positional() {
        return def
            .value_name
            .as_deref()
            .unwrap_or(DEFAULT_VALUE_NAME)
            .to_string();
    }

    match (&def.long, &def.value_name) {
        (Some(long), Some(value)) => format!("{}={}", long, value),
        (Some(long), None) => long.clone(),
        (None, _) => String::new(),
    }
}

/// Describe each command line argument in a [Table], one per line (or more
/// if wrapped).
///
/// Each entry shows the argument (`-o FILE, --output=FILE`) followed by its
/// help text starting at column `indent`. An `indent` or `width` of 0 means
/// [DEFAULT_INDENT] or [DEFAULT_WIDTH].
pub fn arg_help<C>(table: &Table<C>, indent: usize, width: usize) -> String {
    let indent = or_default(indent, DEFAULT_INDENT);
    let mut out = String::new();

    for def in table.iter() {
        push_entry(&mut out, &def.to_string(), def.help.as_deref(), indent, width);
    }

    out
}

/// Describe each environment variable in a [Table].
///
/// See [arg_help()].
pub fn env_help<C>(table: &Table<C>, indent: usize, width: usize) -> String {
    let indent = or_default(indent, DEFAULT_INDENT);
    let mut out = String::new();

    for def in table.iter() {
        push_entry(&mut out, &env_label(def), def.help.as_deref(), indent, width);
    }

    out
}

/// Describe the command line arguments and the environment variables.
pub fn help<C>(args: Option<&Table<C>>, env: Option<&Table<C>>, indent: usize, width: usize) -> String {
    let mut out = String::new();

    if let Some(table) = args {
        out.push_str("Command line arguments:\n");
        out.push_str(&arg_help(table, indent, width));
    }

    if let Some(table) = env {
        out.push_str("Environment variables:\n");
        out.push_str(&env_help(table, indent, width));
    }

    out
}

/// List the command line arguments in a [Table] on one line, for example
/// `[-o FILE|--output=FILE] [-v|--verbose] INPUT`.
///
/// If `short_only` is set, the long name is only shown for arguments
/// without a short name.
pub fn arg_list<C>(table: &Table<C>, short_only: bool) -> String {
    table
        .iter()
        .map(|def| {
            if def.is_positional() {
                return def
                    .value_name
                    .as_deref()
                    .unwrap_or(DEFAULT_VALUE_NAME)
                    .to_string();
            }

            let mut item = String::from("[");

            if let Some(short) = def.short {
                item.push(OPT_PREFIX);
                item.push(short);

                if let Some(value) = &def.value_name {
                    item.push(' ');
                    item.push_str(value);
                }
            }

            if let Some(long) = &def.long {
                if !(short_only && def.short.is_some()) {
                    if def.short.is_some() {
                        item.push('|');
                    }

                    item.push_str(LONG_OPT_PREFIX);
                    item.push_str(long);

                    if let Some(value) = &def.value_name {
                        item.push('=');
                        item.push_str(value);
                    }
                }
            }

            item.push(']');
            item
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// List the environment variables in a [Table] on one line, for example
/// `HOME=DIR DEBUG`. If `no_param` is set, value names are not shown.
pub fn env_list<C>(table: &Table<C>, no_param: bool) -> String {
    table
        .iter()
        .filter_map(|def| {
            let name = def.long.as_deref()?;

            match (&def.value_name, no_param) {
                (Some(value), false) => Some(format!("{}={}", name, value)),
                _ => Some(name.to_string()),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

fn is_path_separator(c: char) -> bool {
    c == '/' || (cfg!(windows) && (c == '\\' || c == ':'))
}

/// Get the program name from the first command line argument: the file
/// name without any leading directories (and, on Windows, without a
/// trailing `.exe`).
///
/// Returns [None] if there is no name.
pub fn program_name(argv0: &str) -> Option<&str> {
    let name = match argv0.rfind(is_path_separator) {
        Some(pos) => &argv0[pos + 1..],
        None => argv0,
    };

    let name = if cfg!(windows) {
        match name.len().checked_sub(4).and_then(|n| name.get(n..)) {
            Some(ext) if ext.eq_ignore_ascii_case(".exe") => &name[..name.len() - 4],
            _ => name,
        }
    } else {
        name
    };

    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}
