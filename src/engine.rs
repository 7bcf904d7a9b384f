// Copyright (c) 2021 James O. D. Hunt.
//
// SPDX-License-Identifier: Apache-2.0
//

use tracing::{debug, trace, warn};

use crate::action::UnmatchedHandler;
use crate::args::{Definition, Need, Table};
use crate::error::{Error, Result};
use crate::token::Token;

/// Selects which matches a traversal of the command line acts on.
///
/// Every pass resolves every argument in exactly the same way (so that
/// option values are always skipped and unmatched arguments are always
/// reported); passes only differ in which actions they run.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Pass {
    /// Run the actions of options only.
    Flags,
    /// Run the actions of standalone values only.
    Values,
    /// Run all actions, strictly from left to right.
    All,
}

impl Pass {
    fn acts_on_flags(self) -> bool {
        matches!(self, Pass::Flags | Pass::All)
    }

    fn acts_on_values(self) -> bool {
        matches!(self, Pass::Values | Pass::All)
    }
}

/// What an argument resolved to.
#[derive(Debug)]
pub(crate) enum Match<'t, 'a, C> {
    /// A short or long option, with its value if it takes one.
    Flag {
        def: &'t Definition<C>,
        value: Option<&'a str>,
    },
    /// A standalone value, handled by the standalone definition.
    Value { def: &'t Definition<C>, value: &'a str },
    /// Nothing in the table matches.
    Unmatched,
}

/// A single resolved argument.
#[derive(Debug)]
pub(crate) struct Step<'t, 'a, C> {
    /// Position of the argument in the input sequence.
    pub index: usize,
    /// The raw argument.
    pub arg: &'a str,
    pub found: Match<'t, 'a, C>,
}

/// Traversal state over an argument list.
///
/// Each [Cursor::step()] resolves the next argument against the table and
/// moves past it (and past its value, if the value was a separate argument).
/// Consumed arguments are never revisited.
pub(crate) struct Cursor<'t, 'a, C, S> {
    table: &'t Table<C>,
    args: &'a [S],
    standalone: Option<&'t Definition<C>>,
    next: usize,
}

impl<'t, 'a, C, S: AsRef<str>> Cursor<'t, 'a, C, S> {
    pub fn new(table: &'t Table<C>, args: &'a [S], start: usize) -> Self {
        Cursor {
            table,
            args,
            standalone: table.standalone(),
            next: start,
        }
    }

    /// Index of the next argument to resolve.
    pub fn position(&self) -> usize {
        self.next
    }

    pub fn resume(&mut self, at: usize) {
        self.next = at;
    }

    /// Resolve the next argument, or return [None] at the end of the input.
    pub fn step(&mut self) -> Option<Step<'t, 'a, C>> {
        let index = self.next;
        let arg = self.args.get(index)?.as_ref();

        self.next = index + 1;

        let found = match Token::classify(arg) {
            Token::Short { name, rest } => self.short(name, rest),
            Token::Long { body } => self.long(body),
            Token::Value(value) => match self.standalone {
                Some(def) => Match::Value { def, value },
                None => Match::Unmatched,
            },
        };

        Some(Step { index, arg, found })
    }

    fn short(&mut self, name: char, rest: &'a str) -> Match<'t, 'a, C> {
        let def = match self.table.find_short(name) {
            Some(def) => def,
            None => return Match::Unmatched,
        };

        match def.needs() {
            Need::Nothing if rest.is_empty() => Match::Flag { def, value: None },
            Need::Nothing => Match::Unmatched,
            Need::Argument if !rest.is_empty() => Match::Flag {
                def,
                value: Some(rest),
            },
            Need::Argument => match self.args.get(self.next) {
                Some(value) => {
                    self.next += 1;

                    Match::Flag {
                        def,
                        value: Some(value.as_ref()),
                    }
                }
                None => Match::Unmatched,
            },
        }
    }

    fn long(&self, body: &'a str) -> Match<'t, 'a, C> {
        let (def, rest) = match self.table.find_long(body) {
            Some(found) => found,
            None => return Match::Unmatched,
        };

        match (def.needs(), rest.strip_prefix('=')) {
            (Need::Nothing, None) => Match::Flag { def, value: None },
            (Need::Argument, Some(value)) => Match::Flag {
                def,
                value: Some(value),
            },
            _ => Match::Unmatched,
        }
    }
}

/// Run a single pass over `args`, starting at index `start`.
///
/// Returns an error for the first argument that cannot be handled: either
/// nothing matches it (and `unmatched` is not set or rejects it), or its
/// action fails.
pub(crate) fn walk<C, S: AsRef<str>>(
    table: &Table<C>,
    unmatched: Option<UnmatchedHandler<C>>,
    args: &[S],
    start: usize,
    pass: Pass,
    ctx: &mut C,
) -> Result<()> {
    debug!(?pass, start, count = args.len(), "processing arguments");

    let mut cursor = Cursor::new(table, args, start);

    while let Some(Step { index, arg, found }) = cursor.step() {
        match found {
            Match::Flag { def, value } if pass.acts_on_flags() => {
                dispatch(def, value, index, arg, ctx)?
            }
            Match::Value { def, value } if pass.acts_on_values() => {
                dispatch(def, Some(value), index, arg, ctx)?
            }
            Match::Flag { .. } | Match::Value { .. } => {
                trace!(?pass, index, arg, "skipping argument")
            }
            Match::Unmatched => reject(unmatched, index, arg, ctx)?,
        }
    }

    Ok(())
}

fn dispatch<C>(
    def: &Definition<C>,
    value: Option<&str>,
    index: usize,
    arg: &str,
    ctx: &mut C,
) -> Result<()> {
    debug!(index, option = %def, ?value, "handling argument");

    def.apply(value, ctx).map_err(|e| Error::Aborted {
        index,
        token: arg.into(),
        source: Box::new(e),
    })
}

fn reject<C>(
    unmatched: Option<UnmatchedHandler<C>>,
    index: usize,
    arg: &str,
    ctx: &mut C,
) -> Result<()> {
    let handler = match unmatched {
        Some(handler) => handler,
        None => {
            warn!("Invalid command line argument: {}", arg);

            return Err(Error::UnknownArg {
                index,
                token: arg.into(),
            });
        }
    };

    debug!(index, arg, "passing unmatched argument to handler");

    handler(arg, ctx).map_err(|e| Error::Aborted {
        index,
        token: arg.into(),
        source: Box::new(e),
    })
}

/// Iterator over the standalone values of an argument list.
///
/// Yields `(index, value)` for each standalone value, in order. Options
/// (and their values) are skipped; no actions are run, so the caller's
/// state is never touched.
///
/// If an argument matches nothing, an [Error::UnknownArg] is yielded and
/// the iteration ends, unless unmatched arguments are being skipped (see
/// [App::unmatched()](crate::App::unmatched)).
///
/// The iteration can be restarted from any index with
/// [Positionals::resume()].
pub struct Positionals<'t, 'a, C, S> {
    cursor: Cursor<'t, 'a, C, S>,
    done: bool,
    skip_unmatched: bool,
}

impl<'t, 'a, C, S: AsRef<str>> Positionals<'t, 'a, C, S> {
    pub(crate) fn new(table: &'t Table<C>, args: &'a [S], start: usize) -> Self {
        Positionals {
            cursor: Cursor::new(table, args, start),
            done: false,
            skip_unmatched: false,
        }
    }

    /// Step over arguments that match nothing rather than failing. The
    /// unmatched handler itself is never called.
    pub(crate) fn skip_unmatched(self, skip_unmatched: bool) -> Self {
        Positionals {
            skip_unmatched,
            ..self
        }
    }

    /// Index of the next argument that will be examined.
    pub fn position(&self) -> usize {
        self.cursor.position()
    }

    /// Continue the iteration from index `at`.
    pub fn resume(&mut self, at: usize) {
        self.cursor.resume(at);
        self.done = false;
    }
}

impl<'t, 'a, C, S: AsRef<str>> Iterator for Positionals<'t, 'a, C, S> {
    type Item = Result<(usize, &'a str)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        while let Some(Step { index, arg, found }) = self.cursor.step() {
            match found {
                Match::Value { value, .. } => return Some(Ok((index, value))),
                Match::Flag { .. } => continue,
                Match::Unmatched if self.skip_unmatched => {
                    trace!(index, arg, "skipping unmatched argument");
                    continue;
                }
                Match::Unmatched => {
                    self.done = true;

                    return Some(Err(Error::UnknownArg {
                        index,
                        token: arg.into(),
                    }));
                }
            }
        }

        self.done = true;

        None
    }
}
