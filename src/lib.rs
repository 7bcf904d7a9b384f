// Copyright (c) 2021 James O. D. Hunt.
//
// SPDX-License-Identifier: Apache-2.0
//

#![deny(missing_docs)]
#![forbid(unsafe_code)]

//! Table-driven parsing of command-line arguments, environment variables
//! and config files.
//!
//! If you want derive macros, subcommands or validation, you should consider
//! the excellent [`clap`](https://crates.io/crates/clap) crate instead.
//!
//! ---
//!
//! Table of contents:
//!
//! * [Overview](#overview)
//! * [Quickstart](#quickstart)
//! * [Details](#details)
//! * [Terminology](#terminology)
//! * [Matching rules](#matching-rules)
//! * [Processing order](#processing-order)
//! * [Environment variables and config files](#environment-variables-and-config-files)
//! * [Limitations](#limitations)
//!
//! ---
//!
//! # Overview
//!
//! A program describes its options in a [Table] of [Definition]s. Each
//! definition names an option (short, long or both), says whether it takes
//! a value, and gives an [Action] to run when it is found. Actions store
//! what they find into a context value of the caller's choosing.
//!
//! The same table format is used for the command line, for the
//! environment and for config files, and the table also drives the
//! generated help output.
//!
//! # Quickstart
//!
//! 1. Create a `struct` type to record the results.
//!
//!    ```rust
//!    #[derive(Debug, Default)]
//!    struct Opts {
//!        verbose: i64,
//!        output: Option<String>,
//!        files: Vec<String>,
//!    }
//!    ```
//!
//! 1. Describe the options in a [Table] and create an [App] for it.
//!
//!    Simple actions use an accessor function which returns the field to
//!    update; anything else can use [Action::Custom].
//!
//!    A definition without a short or long name handles standalone
//!    ("positional") values.
//!
//! 1. Call [App::parse()] (or one of the `process*()` methods) to run the
//!    actions.
//!
//! ```rust
//! use argdef::{Action, App, Definition, Result, Table};
//!
//! #[derive(Debug, Default)]
//! struct Opts {
//!     verbose: i64,
//!     output: Option<String>,
//!     files: Vec<String>,
//! }
//!
//! fn add_file(_def: &Definition<Opts>, value: Option<&str>, opts: &mut Opts) -> Result<()> {
//!     opts.files.extend(value.map(String::from));
//!
//!     Ok(())
//! }
//!
//! fn main() -> Result<()> {
//!     let args = Table::from(vec![
//!         Definition::new()
//!             .short('v')
//!             .long("verbose")
//!             .help("Be chatty (can be repeated).")
//!             .action(Action::Increment(|o: &mut Opts| &mut o.verbose)),
//!         Definition::new()
//!             .short('o')
//!             .long("output")
//!             .value("FILE")
//!             .help("Write output to FILE.")
//!             .action(Action::SetStr(|o: &mut Opts| &mut o.output)),
//!         Definition::new()
//!             .value("FILE")
//!             .help("File to read.")
//!             .action(Action::Custom(add_file)),
//!     ]);
//!
//!     let app = App::new("myprog").args(args);
//!     let mut opts = Opts::default();
//!
//!     // Normally: app.parse(&mut opts)?;
//!     let cli = ["myprog", "a.txt", "-v", "--output=out", "b.txt", "-v"];
//!     let env: &[&str] = &[];
//!
//!     app.process(&cli, env, &mut opts)?;
//!
//!     assert_eq!(opts.verbose, 2);
//!     assert_eq!(opts.output, Some("out".to_string()));
//!     assert_eq!(opts.files, vec!["a.txt", "b.txt"]);
//!
//!     Ok(())
//! }
//! ```
//!
//! Runnable programs are in the `demos/` directory of the source tree.
//!
//! # Details
//!
//! ## Terminology
//!
//! - A "short option" is `-` followed by a single character, for example
//!   `-v`. Anything after that character is the option's value (`-ofile`).
//! - A "long option" is `--` followed by a name, for example `--verbose`.
//!   A value can be attached with `=` (`--output=file`).
//! - A "flag" is an option that takes no value. An option takes a value
//!   if its definition has a value name (see [Definition::value()]).
//! - A "standalone value" (or "positional argument") is any argument that
//!   is not an option. `-` and `--` on their own are standalone values.
//!
//! ## Matching rules
//!
//! - Definitions are tried in table order and the first match wins.
//! - A definition without an action terminates the table: nothing after it
//!   is ever matched (see [Definition::end()]).
//! - A value-taking short option uses the rest of its argument as the
//!   value, or the next argument if there is no rest (even if the next
//!   argument looks like an option).
//! - A short flag with trailing characters (`-vx`) does not match: flags
//!   cannot be bundled.
//! - A long name only matches up to the end of the argument or an `=`, so
//!   `--verbosity` never matches `verbose`.
//! - A long flag given a value, or a value-taking long option given no
//!   `=`, does not match.
//! - Arguments that match nothing are passed to the handler set with
//!   [App::unmatched()]. Without one, the parse stops with
//!   [Error::UnknownArg].
//! - An action that fails stops the parse with [Error::Aborted].
//!
//! ## Processing order
//!
//! [App::process()] (and [App::parse()]) handle the environment first,
//! then every option on the command line, then every standalone value.
//! This way, `prog file -v` and `prog -v file` behave the same.
//!
//! [App::process_ltr()] handles the command line strictly from left to
//! right instead.
//!
//! To find the standalone values without running any actions, use
//! [App::positionals()] or [App::next_positional()].
//!
//! ## Environment variables and config files
//!
//! An environment [Table] (see [App::env()]) is matched against the
//! environment using the long names of its definitions as the variable
//! names. Every matching variable runs the action with the variable's
//! value.
//!
//! Config files contain `name = value` lines, where `name` is a long name
//! in the table. See [process_config()], [process_config_file()] and
//! [generate_config()].
//!
//! ## Logging
//!
//! The crate logs what it does using [`tracing`](https://crates.io/crates/tracing).
//! Nothing is output unless the program installs a subscriber.
//!
//! # Limitations
//!
//! - Options with optional values are not supported.
//! - Options cannot accept multiple values, but they can be specified
//!   multiple times.
//! - `--` does not end option processing.
//! - Long names cannot be abbreviated.
//! - Help output is wrapped by counting bytes, so it is only correctly
//!   aligned for ASCII text.

mod action;
mod args;
mod config;
mod engine;
mod env;
mod error;
pub mod help;
mod token;

pub use action::{parse_int, Accessor, Action, Callback, UnmatchedHandler};
pub use args::{get_args, App, Definition, Need, Settings, Table};
pub use config::{generate_config, process_config, process_config_file, split_line};
pub use engine::{Pass, Positionals};
pub use env::{get_env, process_env};
pub use error::{Error, Result};
pub use token::Token;

/// Version of this crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
