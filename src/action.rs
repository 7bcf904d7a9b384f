// Copyright (c) 2021 James O. D. Hunt.
//
// SPDX-License-Identifier: Apache-2.0
//

use std::fmt;
use std::num::{IntErrorKind, ParseIntError};
use std::str::FromStr;

use crate::args::Definition;
use crate::error::{Error, Result};

/// Function returning the field of the context an action stores into.
///
/// A non-capturing closure will do:
///
/// ```rust
/// # use argdef::Accessor;
/// struct Opts {
///     level: i64,
/// }
///
/// let level: Accessor<Opts, i64> = |o: &mut Opts| &mut o.level;
/// ```
pub type Accessor<C, T> = fn(&mut C) -> &mut T;

/// Signature of a custom action.
///
/// # Parameters
///
/// - The [Definition] that matched.
/// - The value found for it, if any. Standalone values and value-taking
///   options always get `Some(..)`; flags always get [None].
/// - The caller's context.
///
/// # Return value
///
/// `Ok(())` to continue; any error stops the traversal and is returned
/// (wrapped) to the caller.
pub type Callback<C> = fn(&Definition<C>, Option<&str>, &mut C) -> Result<()>;

/// Signature of the handler called for arguments no [Definition] matches.
///
/// Returning `Ok(())` accepts the argument and parsing continues.
pub type UnmatchedHandler<C> = fn(&str, &mut C) -> Result<()>;

/// What to do when a [Definition] matches.
pub enum Action<C> {
    /// Store the value (or [None] for a flag) in a string field.
    SetStr(Accessor<C, Option<String>>),
    /// Parse the value as a decimal integer and store it.
    SetInt(Accessor<C, i64>),
    /// Store a constant, ignoring any value.
    SetIntTo(Accessor<C, i64>, i64),
    /// Add one to an integer field.
    Increment(Accessor<C, i64>),
    /// Subtract one from an integer field.
    Decrement(Accessor<C, i64>),
    /// Do nothing (but still accept the argument).
    Noop,
    /// Reject the argument with the given message.
    Fail(&'static str),
    /// Call a function.
    Custom(Callback<C>),
}

impl<C> Action<C> {
    /// Run the action for the definition `def` which matched with `value`.
    pub fn apply(&self, def: &Definition<C>, value: Option<&str>, ctx: &mut C) -> Result<()> {
        match *self {
            Action::SetStr(field) => *field(ctx) = value.map(String::from),
            Action::SetInt(field) => *field(ctx) = parse_int(value)?,
            Action::SetIntTo(field, n) => *field(ctx) = n,
            Action::Increment(field) => {
                let v = field(ctx);
                *v = v.saturating_add(1);
            }
            Action::Decrement(field) => {
                let v = field(ctx);
                *v = v.saturating_sub(1);
            }
            Action::Noop => (),
            Action::Fail(msg) => return Err(Error::HandlerError(msg.into())),
            Action::Custom(callback) => return callback(def, value, ctx),
        }

        Ok(())
    }
}

impl<C> Clone for Action<C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C> Copy for Action<C> {}

impl<C> fmt::Debug for Action<C> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Action::SetStr(_) => write!(f, "SetStr"),
            Action::SetInt(_) => write!(f, "SetInt"),
            Action::SetIntTo(_, n) => write!(f, "SetIntTo({})", n),
            Action::Increment(_) => write!(f, "Increment"),
            Action::Decrement(_) => write!(f, "Decrement"),
            Action::Noop => write!(f, "Noop"),
            Action::Fail(msg) => write!(f, "Fail({:?})", msg),
            Action::Custom(callback) => write!(f, "Custom({:p})", *callback as *const ()),
        }
    }
}

/// Parse a decimal integer value.
///
/// Each failure has its own error so callers can tell them apart:
///
/// - [Error::EmptyValue]: no value, or an empty one.
/// - [Error::NotNumeric]: not a number (leading or trailing junk included).
/// - [Error::TooLarge] / [Error::TooSmall]: out of range for `T`.
pub fn parse_int<T>(value: Option<&str>) -> Result<T>
where
    T: FromStr<Err = ParseIntError>,
{
    let value = match value {
        Some(v) if !v.is_empty() => v,
        _ => return Err(Error::EmptyValue),
    };

    value.parse::<T>().map_err(|e| match e.kind() {
        IntErrorKind::Empty => Error::EmptyValue,
        IntErrorKind::PosOverflow => Error::TooLarge(value.into()),
        IntErrorKind::NegOverflow => Error::TooSmall(value.into()),
        _ => Error::NotNumeric(value.into()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Ctx {
        s: Option<String>,
        i: i64,
    }

    fn s(ctx: &mut Ctx) -> &mut Option<String> {
        &mut ctx.s
    }

    fn i(ctx: &mut Ctx) -> &mut i64 {
        &mut ctx.i
    }

    fn custom(def: &Definition<Ctx>, value: Option<&str>, ctx: &mut Ctx) -> Result<()> {
        ctx.s = Some(format!("{:?}={:?}", def.long, value));
        Ok(())
    }

    #[test]
    fn test_parse_int() {
        #[derive(Debug)]
        struct TestData<'a> {
            value: Option<&'a str>,
            result: Result<i64>,
        }

        let tests = &[
            TestData {
                value: None,
                result: Err(Error::EmptyValue),
            },
            TestData {
                value: Some(""),
                result: Err(Error::EmptyValue),
            },
            TestData {
                value: Some("0"),
                result: Ok(0),
            },
            TestData {
                value: Some("-17"),
                result: Ok(-17),
            },
            TestData {
                value: Some("+3"),
                result: Ok(3),
            },
            TestData {
                value: Some("12abc"),
                result: Err(Error::NotNumeric("12abc".into())),
            },
            TestData {
                value: Some(" 1"),
                result: Err(Error::NotNumeric(" 1".into())),
            },
            TestData {
                value: Some("-"),
                result: Err(Error::NotNumeric("-".into())),
            },
            TestData {
                value: Some("9223372036854775807"),
                result: Ok(i64::MAX),
            },
            TestData {
                value: Some("9223372036854775808"),
                result: Err(Error::TooLarge("9223372036854775808".into())),
            },
            TestData {
                value: Some("-9223372036854775809"),
                result: Err(Error::TooSmall("-9223372036854775809".into())),
            },
        ];

        for (n, d) in tests.iter().enumerate() {
            let msg = format!("test[{}]: {:?}", n, d);

            let result = parse_int::<i64>(d.value);

            assert_eq!(result, d.result, "{}", msg);
        }
    }

    #[test]
    fn test_parse_int_narrow() {
        assert_eq!(parse_int::<i8>(Some("127")), Ok(127));
        assert_eq!(parse_int::<i8>(Some("128")), Err(Error::TooLarge("128".into())));
        assert_eq!(parse_int::<u8>(Some("-1")), Err(Error::NotNumeric("-1".into())));
    }

    #[test]
    fn test_apply() {
        let def = Definition::<Ctx>::new().long("name");
        let mut ctx = Ctx::default();

        Action::SetStr(s).apply(&def, Some("foo"), &mut ctx).unwrap();
        assert_eq!(ctx.s, Some("foo".into()));

        Action::SetStr(s).apply(&def, None, &mut ctx).unwrap();
        assert_eq!(ctx.s, None);

        Action::SetInt(i).apply(&def, Some("42"), &mut ctx).unwrap();
        assert_eq!(ctx.i, 42);

        let result = Action::SetInt(i).apply(&def, Some("x"), &mut ctx);
        assert_eq!(result, Err(Error::NotNumeric("x".into())));
        assert_eq!(ctx.i, 42);

        Action::Increment(i).apply(&def, None, &mut ctx).unwrap();
        Action::Increment(i).apply(&def, None, &mut ctx).unwrap();
        assert_eq!(ctx.i, 44);

        Action::Decrement(i).apply(&def, None, &mut ctx).unwrap();
        assert_eq!(ctx.i, 43);

        Action::SetIntTo(i, -1).apply(&def, Some("99"), &mut ctx).unwrap();
        assert_eq!(ctx.i, -1);

        ctx.i = i64::MAX;
        Action::Increment(i).apply(&def, None, &mut ctx).unwrap();
        assert_eq!(ctx.i, i64::MAX);

        Action::Noop.apply(&def, Some("x"), &mut ctx).unwrap();
        assert_eq!(ctx.i, i64::MAX);

        let result = Action::Fail("not allowed").apply(&def, None, &mut ctx);
        assert_eq!(result, Err(Error::HandlerError("not allowed".into())));

        Action::Custom(custom).apply(&def, Some("v"), &mut ctx).unwrap();
        assert_eq!(ctx.s, Some("Some(\"name\")=Some(\"v\")".into()));
    }

    #[test]
    fn test_debug() {
        assert_eq!(format!("{:?}", Action::<Ctx>::Noop), "Noop");
        assert_eq!(format!("{:?}", Action::SetIntTo(i, 3)), "SetIntTo(3)");
        assert_eq!(format!("{:?}", Action::<Ctx>::Fail("x")), "Fail(\"x\")");
        assert!(format!("{:?}", Action::Custom(custom)).starts_with("Custom(0x"));
    }
}
