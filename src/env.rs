// Copyright (c) 2021 James O. D. Hunt.
//
// SPDX-License-Identifier: Apache-2.0
//

use std::env;

use tracing::debug;

use crate::args::Table;
use crate::error::{Error, Result};

/// Get the environment of the program as a list of `NAME=VALUE` strings.
///
/// Names and values that are not valid UTF-8 are converted lossily.
pub fn get_env() -> Vec<String> {
    env::vars_os()
        .map(|(name, value)| format!("{}={}", name.to_string_lossy(), value.to_string_lossy()))
        .collect()
}

/// Process a list of `NAME=VALUE` strings against a [Table].
///
/// For each definition with a long name (in table order), every entry whose
/// name is exactly that long name runs the definition's action with the
/// text after the first `=`. Entries without `=` are ignored.
///
/// The first failing action stops processing and is returned as
/// [Error::Variable].
pub fn process_env<C, E: AsRef<str>>(env_vars: &[E], table: &Table<C>, ctx: &mut C) -> Result<()> {
    for def in table.iter() {
        let name = match def.long.as_deref() {
            Some(name) => name,
            None => continue,
        };

        for var in env_vars {
            let value = match var.as_ref().split_once('=') {
                Some((key, value)) if key == name => value,
                _ => continue,
            };

            debug!(name, value, "handling environment variable");

            def.apply(Some(value), ctx).map_err(|e| Error::Variable {
                name: name.into(),
                source: Box::new(e),
            })?;
        }
    }

    Ok(())
}
