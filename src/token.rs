// Copyright (c) 2021 James O. D. Hunt.
//
// SPDX-License-Identifier: Apache-2.0
//

pub(crate) const OPT_PREFIX: char = '-';
pub(crate) const LONG_OPT_PREFIX: &str = "--";

/// The syntactic category of a single input argument.
///
/// Classification only looks at the leading characters:
///
/// - `-x...`: a short option (the second character is not `-`).
/// - `--name...`: a long option (the name is non-empty).
/// - Anything else, including `-` and `--` on their own, is a
///   standalone value.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Token<'a> {
    /// A short option. `rest` is whatever follows the option character.
    Short {
        /// The option character.
        name: char,
        /// Characters following the option character (possibly empty).
        rest: &'a str,
    },
    /// A long option. `body` is everything after the leading `--`.
    Long {
        /// Option name, plus `=value` if one was attached.
        body: &'a str,
    },
    /// A standalone (positional) value.
    Value(&'a str),
}

impl<'a> Token<'a> {
    /// Classify an argument.
    pub fn classify(arg: &'a str) -> Self {
        if let Some(body) = arg.strip_prefix(LONG_OPT_PREFIX) {
            if !body.is_empty() {
                return Token::Long { body };
            }

            return Token::Value(arg);
        }

        if let Some(tail) = arg.strip_prefix(OPT_PREFIX) {
            let mut chars = tail.chars();

            if let Some(name) = chars.next() {
                return Token::Short {
                    name,
                    rest: chars.as_str(),
                };
            }
        }

        Token::Value(arg)
    }

    /// Returns `true` for short and long options.
    pub fn is_option(&self) -> bool {
        !matches!(self, Token::Value(_))
    }
}

impl<'a> From<&'a str> for Token<'a> {
    fn from(arg: &'a str) -> Self {
        Token::classify(arg)
    }
}
