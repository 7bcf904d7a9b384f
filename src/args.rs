// Copyright (c) 2021 James O. D. Hunt.
//
// SPDX-License-Identifier: Apache-2.0
//

use std::env;
use std::fmt;
use std::io::Write;

use crate::action::{Action, UnmatchedHandler};
use crate::engine::{self, Pass, Positionals};
use crate::error::Result;
use crate::help;
use crate::token::{LONG_OPT_PREFIX, OPT_PREFIX};

const USAGE_PREFIX_SPACES: &str = "    ";

/// Name shown in help output for a positional definition without a value name.
pub(crate) const DEFAULT_VALUE_NAME: &str = "param";

/// Used to specify whether an option is a "stand-alone" flag option
/// (needs no value), or whether it requires an option argument.
#[derive(Debug, PartialEq, PartialOrd, Eq, Ord, Clone, Copy)]
pub enum Need {
    /// Option is stand-alone (no argument required).
    Nothing,
    /// Option needs an argument.
    Argument,
}

impl Default for Need {
    fn default() -> Self {
        Need::Nothing
    }
}

/// One entry in a [Table].
///
/// A definition is matched by its short name (`-o`), its long name
/// (`--output`), or, if it has neither, by any standalone (positional) value.
///
/// A definition without an [Action] terminates the table: nothing after it
/// is ever matched. See [Definition::end()].
///
/// # Note
///
/// - All members are public for action convenience.
pub struct Definition<C> {
    /// Single character short option name.
    pub short: Option<char>,
    /// Long option name (also the environment variable and config key name).
    pub long: Option<String>,
    /// Name of the value shown in help output. If set, the option
    /// requires a value.
    pub value_name: Option<String>,
    /// What to do when the definition matches.
    pub action: Option<Action<C>>,
    /// Default value written to generated config files.
    pub default: Option<String>,
    /// Description of the option.
    pub help: Option<String>,
}

impl<C> Definition<C> {
    /// Create a new (empty) definition.
    pub fn new() -> Self {
        Definition {
            short: None,
            long: None,
            value_name: None,
            action: None,
            default: None,
            help: None,
        }
    }

    /// Create a table terminator.
    pub fn end() -> Self {
        Definition::new()
    }

    /// Specify the short option name.
    pub fn short(self, short: char) -> Self {
        Definition {
            short: Some(short),
            ..self
        }
    }

    /// Specify the long option name. An empty name is ignored.
    pub fn long(self, long: &str) -> Self {
        let long = if long.is_empty() {
            None
        } else {
            Some(long.into())
        };

        Definition { long, ..self }
    }

    /// Specify that the option requires a value, and the name of that
    /// value for help output.
    pub fn value(self, value_name: &str) -> Self {
        Definition {
            value_name: Some(value_name.into()),
            ..self
        }
    }

    /// Specify the action to run when the definition matches.
    pub fn action(self, action: Action<C>) -> Self {
        Definition {
            action: Some(action),
            ..self
        }
    }

    /// Specify the default value written to generated config files.
    pub fn default_value(self, default: &str) -> Self {
        Definition {
            default: Some(default.into()),
            ..self
        }
    }

    /// Specify the help text for the option.
    pub fn help(self, help: &str) -> Self {
        Definition {
            help: Some(help.into()),
            ..self
        }
    }

    /// Whether the option is a flag or needs a value.
    pub fn needs(&self) -> Need {
        match self.value_name {
            Some(_) => Need::Argument,
            None => Need::Nothing,
        }
    }

    /// Returns `true` if this definition handles standalone values.
    pub fn is_positional(&self) -> bool {
        self.short.is_none() && self.long.is_none()
    }

    /// Returns `true` if this definition terminates the table.
    pub fn is_end(&self) -> bool {
        self.action.is_none()
    }

    /// Run the action for this definition.
    pub fn apply(&self, value: Option<&str>, ctx: &mut C) -> Result<()> {
        match &self.action {
            Some(action) => action.apply(self, value, ctx),
            None => Ok(()),
        }
    }
}

impl<C> Default for Definition<C> {
    fn default() -> Self {
        Definition::new()
    }
}

impl<C> Clone for Definition<C> {
    fn clone(&self) -> Self {
        Definition {
            short: self.short,
            long: self.long.clone(),
            value_name: self.value_name.clone(),
            action: self.action,
            default: self.default.clone(),
            help: self.help.clone(),
        }
    }
}

impl<C> fmt::Debug for Definition<C> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Definition")
            .field("short", &self.short)
            .field("long", &self.long)
            .field("value_name", &self.value_name)
            .field("action", &self.action)
            .field("default", &self.default)
            .field("help", &self.help)
            .finish()
    }
}

/// Formats the definition as it is shown in help output,
/// for example `-o FILE, --output=FILE`.
impl<C> fmt::Display for Definition<C> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_positional() {
            let name = self.value_name.as_deref().unwrap_or(DEFAULT_VALUE_NAME);
            return write!(f, "{}", name);
        }

        if let Some(short) = self.short {
            write!(f, "{}{}", OPT_PREFIX, short)?;

            if let Some(value) = &self.value_name {
                write!(f, " {}", value)?;
            }
        }

        if let Some(long) = &self.long {
            if self.short.is_some() {
                write!(f, ", ")?;
            }

            write!(f, "{}{}", LONG_OPT_PREFIX, long)?;

            if let Some(value) = &self.value_name {
                write!(f, "={}", value)?;
            }
        }

        Ok(())
    }
}

/// An ordered collection of [Definition]s.
///
/// Order matters: when more than one definition could match an argument,
/// the first one wins.
pub struct Table<C> {
    entries: Vec<Definition<C>>,
}

impl<C> Table<C> {
    /// Create a new (empty) table.
    pub fn new() -> Self {
        Table {
            entries: Vec::new(),
        }
    }

    /// Returns the number of usable definitions (those before any
    /// terminator).
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Returns `true` if the table has no usable definitions.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Convenience method to add a set of definitions in one go,
    /// replacing any existing ones.
    pub fn set(&mut self, defs: Vec<Definition<C>>) {
        self.entries = defs;
    }

    /// Append a single definition.
    pub fn add(&mut self, def: Definition<C>) {
        self.entries.push(def);
    }

    /// Iterate over the usable definitions in table order, stopping at the
    /// first terminator.
    pub fn iter(&self) -> impl Iterator<Item = &Definition<C>> {
        self.entries.iter().take_while(|def| !def.is_end())
    }

    /// Returns the definition that handles standalone values: the first
    /// one with neither a short nor a long name.
    pub fn standalone(&self) -> Option<&Definition<C>> {
        self.iter().find(|def| def.is_positional())
    }

    /// Returns the first definition with the short name `name`.
    pub fn find_short(&self, name: char) -> Option<&Definition<C>> {
        self.iter().find(|def| def.short == Some(name))
    }

    /// Returns the first definition whose long name starts `body` and is
    /// followed by either the end of `body` or `=`, along with whatever
    /// follows the name (either empty or starting with `=`).
    pub fn find_long<'b>(&self, body: &'b str) -> Option<(&Definition<C>, &'b str)> {
        self.iter().find_map(|def| {
            let name = def.long.as_deref()?;
            let rest = body.strip_prefix(name)?;

            if rest.is_empty() || rest.starts_with('=') {
                Some((def, rest))
            } else {
                None
            }
        })
    }

    /// Returns the first definition with the long name `name`.
    pub fn find_name(&self, name: &str) -> Option<&Definition<C>> {
        self.iter().find(|def| def.long.as_deref() == Some(name))
    }
}

impl<C> Default for Table<C> {
    /// Create a default (empty) table.
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Clone for Table<C> {
    fn clone(&self) -> Self {
        Table {
            entries: self.entries.clone(),
        }
    }
}

impl<C> fmt::Debug for Table<C> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Table")
            .field("entries", &self.entries)
            .finish()
    }
}

impl<C> From<Vec<Definition<C>>> for Table<C> {
    fn from(entries: Vec<Definition<C>>) -> Self {
        Table { entries }
    }
}

impl<C> std::iter::FromIterator<Definition<C>> for Table<C> {
    fn from_iter<I: IntoIterator<Item = Definition<C>>>(iter: I) -> Self {
        Table {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Settings used to control the parsers behaviour.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialOrd, Default, PartialEq)]
pub struct Settings {
    /// If set, the first argument is a regular argument rather than the
    /// program name.
    no_program_name: bool,

    /// Column at which help descriptions start (0 means the default).
    help_indent: usize,

    /// Column at which help descriptions wrap (0 means the default).
    help_width: usize,
}

impl Settings {
    /// Create a new settings object.
    pub fn new() -> Self {
        Settings::default()
    }

    /// Specify that the argument list does not start with the program
    /// name. By default, the first argument is skipped.
    pub fn no_program_name(self) -> Self {
        Settings {
            no_program_name: true,
            ..self
        }
    }

    /// Specify the column at which help descriptions start.
    pub fn help_indent(self, help_indent: usize) -> Self {
        Settings {
            help_indent,
            ..self
        }
    }

    /// Specify the column at which help descriptions wrap.
    pub fn help_width(self, help_width: usize) -> Self {
        Settings { help_width, ..self }
    }

    /// Index of the first argument to parse.
    pub(crate) fn first_index(&self) -> usize {
        if self.no_program_name {
            0
        } else {
            1
        }
    }
}

/// Get a list of all command-line arguments specified to the program,
/// including the program name (the first argument).
///
/// # Note
///
/// Used with the `process*()` methods of [App]. However, this isn't usually
/// required: just call [App::parse()].
pub fn get_args() -> Vec<String> {
    env::args().collect()
}

/// The main object used to represent the program.
///
/// An `App` binds a command line [Table], an optional environment
/// variable [Table] and an optional handler for unmatched arguments.
/// Actions receive a `&mut C` context which they use to record results.
pub struct App<C> {
    name: String,
    version: String,
    summary: String,
    help: String,
    notes: String,
    settings: Settings,
    args: Table<C>,
    env: Option<Table<C>>,
    unmatched: Option<UnmatchedHandler<C>>,
}

impl<C> App<C> {
    /// Create a new application object.
    pub fn new(name: &str) -> Self {
        App::default().name(name)
    }

    /// Specify the name of the program.
    fn name(self, name: &str) -> Self {
        App {
            name: name.into(),
            ..self
        }
    }

    /// Specify the command line definitions.
    pub fn args(self, args: Table<C>) -> Self {
        App { args, ..self }
    }

    /// Specify the environment variable definitions.
    pub fn env(self, env: Table<C>) -> Self {
        App {
            env: Some(env),
            ..self
        }
    }

    /// Specify the handler for arguments that no definition matches.
    ///
    /// Without one, the first such argument stops the parse with
    /// [Error::UnknownArg](crate::Error::UnknownArg).
    pub fn unmatched(self, handler: UnmatchedHandler<C>) -> Self {
        App {
            unmatched: Some(handler),
            ..self
        }
    }

    /// Specify the version of the program.
    pub fn version(self, version: &str) -> Self {
        App {
            version: version.into(),
            ..self
        }
    }

    /// Specify brief explanatory text for the program.
    pub fn summary(self, summary: &str) -> Self {
        App {
            summary: summary.into(),
            ..self
        }
    }

    /// Specify extended usage information for the program.
    pub fn help(self, help: &str) -> Self {
        App {
            help: help.into(),
            ..self
        }
    }

    /// Specify notes for the program.
    pub fn notes(self, notes: &str) -> Self {
        App {
            notes: notes.into(),
            ..self
        }
    }

    /// Specify any settings for the program.
    pub fn settings(self, settings: Settings) -> Self {
        App { settings, ..self }
    }

    /// If set, the first argument is not skipped as the program name.
    ///
    /// # Note
    ///
    /// This is an alternative to calling the `settings()` method.
    pub fn no_program_name(self) -> Self {
        App {
            settings: self.settings.no_program_name(),
            ..self
        }
    }

    /// Returns the command line definitions.
    pub fn arg_table(&self) -> &Table<C> {
        &self.args
    }

    /// Returns the environment variable definitions, if any.
    pub fn env_table(&self) -> Option<&Table<C>> {
        self.env.as_ref()
    }

    /// Process the environment, then all command line flags, then all
    /// command line standalone values.
    ///
    /// Every option is handled before any standalone value, wherever they
    /// appear on the command line. Standalone values are handled in the
    /// order given.
    pub fn process<S, E>(&self, cli_args: &[S], env_vars: &[E], ctx: &mut C) -> Result<()>
    where
        S: AsRef<str>,
        E: AsRef<str>,
    {
        self.process_env(env_vars, ctx)?;
        self.process_flags(cli_args, ctx)?;
        self.process_values(cli_args, ctx)
    }

    /// Process the environment, then the command line strictly from left
    /// to right.
    pub fn process_ltr<S, E>(&self, cli_args: &[S], env_vars: &[E], ctx: &mut C) -> Result<()>
    where
        S: AsRef<str>,
        E: AsRef<str>,
    {
        self.process_env(env_vars, ctx)?;
        self.process_args(cli_args, ctx)
    }

    /// Process all command line arguments from left to right.
    pub fn process_args<S: AsRef<str>>(&self, cli_args: &[S], ctx: &mut C) -> Result<()> {
        self.process_pass(cli_args, Pass::All, ctx)
    }

    /// Process only the command line options (standalone values are checked
    /// but their actions are not run).
    pub fn process_flags<S: AsRef<str>>(&self, cli_args: &[S], ctx: &mut C) -> Result<()> {
        self.process_pass(cli_args, Pass::Flags, ctx)
    }

    /// Process only the command line standalone values (options are checked
    /// but their actions are not run).
    pub fn process_values<S: AsRef<str>>(&self, cli_args: &[S], ctx: &mut C) -> Result<()> {
        self.process_pass(cli_args, Pass::Values, ctx)
    }

    /// Run a single pass over the command line.
    pub fn process_pass<S: AsRef<str>>(&self, cli_args: &[S], pass: Pass, ctx: &mut C) -> Result<()> {
        engine::walk(
            &self.args,
            self.unmatched,
            cli_args,
            self.settings.first_index(),
            pass,
            ctx,
        )
    }

    /// Process the environment variables (`NAME=VALUE` strings) against the
    /// environment [Table]. Does nothing if no such table was specified.
    pub fn process_env<E: AsRef<str>>(&self, env_vars: &[E], ctx: &mut C) -> Result<()> {
        match &self.env {
            Some(table) => crate::env::process_env(env_vars, table, ctx),
            None => Ok(()),
        }
    }

    /// Returns the index of the first standalone value at or after `start`,
    /// or [None] if there are no more. No actions are run.
    ///
    /// If an unmatched handler is set, arguments that match nothing are
    /// skipped (the handler is not called). Otherwise they are an error.
    ///
    /// To enumerate all standalone values, call again with the returned
    /// index plus one, or use [App::positionals()].
    pub fn next_positional<S: AsRef<str>>(&self, cli_args: &[S], start: usize) -> Result<Option<usize>> {
        let mut positionals =
            Positionals::new(&self.args, cli_args, start).skip_unmatched(self.unmatched.is_some());

        positionals
            .next()
            .transpose()
            .map(|found| found.map(|(index, _)| index))
    }

    /// Returns an iterator over the standalone values on the command line,
    /// yielding each value with its index. No actions are run.
    pub fn positionals<'a, S: AsRef<str>>(&'a self, cli_args: &'a [S]) -> Positionals<'a, 'a, C, S> {
        Positionals::new(&self.args, cli_args, self.settings.first_index())
            .skip_unmatched(self.unmatched.is_some())
    }

    /// Generate a help/usage statement from the registered definitions.
    pub fn generate_help<W: Write>(&self, writer: &mut W) -> Result<()> {
        let mut lines = Vec::<String>::new();

        let name: String = if self.name.is_empty() {
            env::args()
                .next()
                .as_deref()
                .and_then(help::program_name)
                .map(String::from)
                .unwrap_or_default()
        } else {
            self.name.clone()
        };

        let line = format!("NAME:\n{}{}\n", USAGE_PREFIX_SPACES, name);
        lines.push(line);

        if !self.version.is_empty() {
            let line = format!("VERSION:\n{}{}\n", USAGE_PREFIX_SPACES, self.version);
            lines.push(line);
        }

        if !self.summary.is_empty() {
            let line = format!("SUMMARY:\n{}{}\n", USAGE_PREFIX_SPACES, self.summary.trim());
            lines.push(line);
        }

        lines.push("USAGE:".into());

        let line = format!(
            "{}{} {}\n",
            USAGE_PREFIX_SPACES,
            name,
            help::arg_list(&self.args, true)
        );
        lines.push(line);

        //------------------------------------------------------------

        lines.push(help::help(
            Some(&self.args),
            self.env.as_ref(),
            self.settings.help_indent,
            self.settings.help_width,
        ));

        //------------------------------------------------------------

        if !self.help.is_empty() {
            let line = format!("\nHELP:\n\n{}", self.help.trim());
            lines.push(line);
        }

        if !self.notes.is_empty() {
            let line = format!("\nNOTES:\n\n{}", self.notes.trim());
            lines.push(line);
        }

        // Join all the lines together, remove white space at either and and
        // finally append a single newline.
        let mut final_lines = lines.join("\n").trim().to_string();
        final_lines.push('\n');

        write!(writer, "{}", final_lines)?;

        Ok(())
    }

    /// Simplest interface to the parser: process the program's own
    /// environment and command line (see [App::process()]).
    pub fn parse(&self, ctx: &mut C) -> Result<()> {
        let cli_args = get_args();
        let env_vars = crate::env::get_env();

        self.process(&cli_args, &env_vars, ctx)
    }
}

impl<C> Default for App<C> {
    fn default() -> Self {
        App {
            name: String::new(),
            version: String::new(),
            summary: String::new(),
            help: String::new(),
            notes: String::new(),
            settings: Settings::default(),
            args: Table::default(),
            env: None,
            unmatched: None,
        }
    }
}

impl<C> fmt::Debug for App<C> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("App")
            .field("name", &self.name)
            .field("version", &self.version)
            .field("settings", &self.settings)
            .field("args", &self.args)
            .field("env", &self.env)
            .field("unmatched", &self.unmatched.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::error::Error;
    use regex::Regex;

    #[derive(Clone, Debug, Default, PartialEq)]
    struct Ctx {
        calls: Vec<String>,
        home: Option<String>,
    }

    fn record(def: &Definition<Ctx>, value: Option<&str>, ctx: &mut Ctx) -> Result<()> {
        let name = match (&def.long, def.short) {
            (Some(long), _) => long.clone(),
            (None, Some(short)) => short.to_string(),
            (None, None) => "posn".into(),
        };

        let call = match value {
            Some(value) => format!("{}({})", name, value),
            None => name,
        };

        ctx.calls.push(call);

        Ok(())
    }

    fn arg_table() -> Table<Ctx> {
        Table::from(vec![
            Definition::new()
                .short('v')
                .long("verbose")
                .help("Be chatty.")
                .action(Action::Custom(record)),
            Definition::new()
                .short('o')
                .long("output")
                .value("FILE")
                .help("Write output to FILE.")
                .action(Action::Custom(record)),
            Definition::new()
                .value("FILE")
                .help("File to read.")
                .action(Action::Custom(record)),
        ])
    }

    fn env_table() -> Table<Ctx> {
        Table::from(vec![Definition::new()
            .long("HOME")
            .value("DIR")
            .help("Home directory.")
            .action(Action::SetStr(|c: &mut Ctx| &mut c.home))])
    }

    fn app() -> App<Ctx> {
        App::new("test").args(arg_table()).env(env_table())
    }

    #[test]
    fn test_need() {
        assert_eq!(Need::default(), Need::Nothing);
    }

    #[test]
    fn test_settings() {
        let new_settings = Settings::new();
        let def_settings = Settings::default();

        assert_eq!(new_settings.no_program_name, false);
        assert_eq!(new_settings.help_indent, 0);
        assert_eq!(new_settings.help_width, 0);
        assert_eq!(new_settings, def_settings);
        assert_eq!(new_settings.first_index(), 1);

        let settings = Settings::new()
            .no_program_name()
            .help_indent(10)
            .help_width(60);

        assert_eq!(settings.no_program_name, true);
        assert_eq!(settings.help_indent, 10);
        assert_eq!(settings.help_width, 60);
        assert_eq!(settings.first_index(), 0);
    }

    #[test]
    fn test_definition() {
        let def = Definition::<Ctx>::default();

        assert!(def.short.is_none());
        assert!(def.long.is_none());
        assert!(def.value_name.is_none());
        assert!(def.default.is_none());
        assert!(def.help.is_none());
        assert!(def.is_end());
        assert!(def.is_positional());
        assert_eq!(def.needs(), Need::Nothing);

        let def = Definition::<Ctx>::new()
            .short('p')
            .long("port")
            .value("PORT")
            .default_value("80")
            .help("Port number.")
            .action(Action::Noop);

        assert_eq!(def.short, Some('p'));
        assert_eq!(def.long.as_deref(), Some("port"));
        assert_eq!(def.value_name.as_deref(), Some("PORT"));
        assert_eq!(def.default.as_deref(), Some("80"));
        assert_eq!(def.help.as_deref(), Some("Port number."));
        assert!(!def.is_end());
        assert!(!def.is_positional());
        assert_eq!(def.needs(), Need::Argument);

        let def = Definition::<Ctx>::new().long("").action(Action::Noop);
        assert!(def.long.is_none());
        assert!(def.is_positional());

        // A terminator never runs anything.
        let mut ctx = Ctx::default();
        assert_eq!(Definition::end().apply(Some("x"), &mut ctx), Ok(()));
        assert_eq!(ctx, Ctx::default());
    }

    #[test]
    fn test_definition_display() {
        #[derive(Debug)]
        struct TestData<'a> {
            def: Definition<Ctx>,
            result: &'a str,
        }

        let tests = &[
            TestData {
                def: Definition::new(),
                result: "param",
            },
            TestData {
                def: Definition::new().value("INPUT"),
                result: "INPUT",
            },
            TestData {
                def: Definition::new().short('v'),
                result: "-v",
            },
            TestData {
                def: Definition::new().long("verbose"),
                result: "--verbose",
            },
            TestData {
                def: Definition::new().short('v').long("verbose"),
                result: "-v, --verbose",
            },
            TestData {
                def: Definition::new().short('o').value("FILE"),
                result: "-o FILE",
            },
            TestData {
                def: Definition::new().long("output").value("FILE"),
                result: "--output=FILE",
            },
            TestData {
                def: Definition::new().short('o').long("output").value("FILE"),
                result: "-o FILE, --output=FILE",
            },
        ];

        for (i, d) in tests.iter().enumerate() {
            let msg = format!("test[{}]: {:?}", i, d);

            assert_eq!(d.def.to_string(), d.result, "{}", msg);
        }
    }

    #[test]
    fn test_table() {
        let table = Table::<Ctx>::default();
        assert!(table.is_empty());
        assert!(table.standalone().is_none());

        let mut table = arg_table();
        assert_eq!(table.len(), 3);

        assert_eq!(table.find_short('v').and_then(|d| d.long.clone()), Some("verbose".into()));
        assert!(table.find_short('x').is_none());

        assert_eq!(table.standalone().and_then(|d| d.value_name.clone()), Some("FILE".into()));

        let (def, rest) = table.find_long("output=a=b").unwrap();
        assert_eq!(def.short, Some('o'));
        assert_eq!(rest, "=a=b");

        let (def, rest) = table.find_long("verbose").unwrap();
        assert_eq!(def.short, Some('v'));
        assert_eq!(rest, "");

        assert!(table.find_long("verb").is_none());
        assert!(table.find_long("verbosity").is_none());

        assert!(table.find_name("output").is_some());
        assert!(table.find_name("out").is_none());

        // Nothing after a terminator is visible.
        table.add(Definition::end());
        table.add(Definition::new().short('x').action(Action::Noop));

        assert_eq!(table.len(), 3);
        assert!(table.find_short('x').is_none());

        table.set(vec![Definition::new().short('x').action(Action::Noop)]);
        assert_eq!(table.len(), 1);
        assert!(table.find_short('v').is_none());

        let table: Table<Ctx> = vec![Definition::new().action(Action::Noop)]
            .into_iter()
            .collect();
        assert!(table.standalone().is_some());
    }

    #[test]
    fn test_app_process() {
        #[derive(Debug)]
        struct TestData<'a> {
            args: Vec<&'a str>,
            env_vars: Vec<&'a str>,
            ltr: bool,
            result: Result<()>,
            calls: Vec<&'a str>,
            home: Option<&'a str>,
        }

        let tests = &[
            TestData {
                args: vec![],
                env_vars: vec![],
                ltr: false,
                result: Ok(()),
                calls: vec![],
                home: None,
            },
            TestData {
                args: vec!["prog"],
                env_vars: vec!["HOME=/h"],
                ltr: false,
                result: Ok(()),
                calls: vec![],
                home: Some("/h"),
            },
            TestData {
                args: vec!["prog", "a", "-v", "--output=x", "b"],
                env_vars: vec!["HOME=/h"],
                ltr: false,
                result: Ok(()),
                calls: vec!["verbose", "output(x)", "posn(a)", "posn(b)"],
                home: Some("/h"),
            },
            TestData {
                args: vec!["prog", "a", "-v", "--output=x", "b"],
                env_vars: vec![],
                ltr: true,
                result: Ok(()),
                calls: vec!["posn(a)", "verbose", "output(x)", "posn(b)"],
                home: None,
            },
            TestData {
                args: vec!["prog", "-o", "out", "in"],
                env_vars: vec![],
                ltr: true,
                result: Ok(()),
                calls: vec!["output(out)", "posn(in)"],
                home: None,
            },
            TestData {
                args: vec!["prog", "-x"],
                env_vars: vec![],
                ltr: true,
                result: Err(Error::UnknownArg {
                    index: 1,
                    token: "-x".into(),
                }),
                calls: vec![],
                home: None,
            },
            TestData {
                args: vec!["prog", "-x"],
                env_vars: vec![],
                ltr: false,
                result: Err(Error::UnknownArg {
                    index: 1,
                    token: "-x".into(),
                }),
                calls: vec![],
                home: None,
            },
            TestData {
                // The flags pass rejects the argument before any value is
                // handled.
                args: vec!["prog", "a", "-v", "-z"],
                env_vars: vec!["HOME=/h"],
                ltr: false,
                result: Err(Error::UnknownArg {
                    index: 3,
                    token: "-z".into(),
                }),
                calls: vec!["verbose"],
                home: Some("/h"),
            },
            TestData {
                args: vec!["prog", "a", "-v", "-z"],
                env_vars: vec![],
                ltr: true,
                result: Err(Error::UnknownArg {
                    index: 3,
                    token: "-z".into(),
                }),
                calls: vec!["posn(a)", "verbose"],
                home: None,
            },
        ];

        let app = app();

        for (i, d) in tests.iter().enumerate() {
            let msg = format!("test[{}]: {:?}", i, d);

            let mut ctx = Ctx::default();

            let result = if d.ltr {
                app.process_ltr(&d.args, &d.env_vars, &mut ctx)
            } else {
                app.process(&d.args, &d.env_vars, &mut ctx)
            };

            let msg = format!("{}, result: {:?}, ctx: {:?}", msg, result, ctx);

            assert_eq!(result, d.result, "{}", msg);
            assert_eq!(ctx.calls, d.calls, "{}", msg);
            assert_eq!(ctx.home.as_deref(), d.home, "{}", msg);
        }
    }

    #[test]
    fn test_app_no_env_table() {
        let app = App::new("test").args(arg_table());

        let mut ctx = Ctx::default();
        let result = app.process(&["prog", "-v"], &["HOME=/h"], &mut ctx);

        assert_eq!(result, Ok(()));
        assert_eq!(ctx.calls, vec!["verbose"]);
        assert_eq!(ctx.home, None);
        assert!(app.env_table().is_none());
        assert_eq!(app.arg_table().len(), 3);
    }

    #[test]
    fn test_app_no_program_name() {
        let env_vars: &[&str] = &[];

        let ltr_app = app().no_program_name();
        let mut ctx = Ctx::default();

        let result = ltr_app.process_ltr(&["a", "-v"], env_vars, &mut ctx);

        assert_eq!(result, Ok(()));
        assert_eq!(ctx.calls, vec!["posn(a)", "verbose"]);

        let two_pass_app = app().settings(Settings::new().no_program_name());
        let mut ctx = Ctx::default();

        let result = two_pass_app.process(&["a", "-v"], env_vars, &mut ctx);

        assert_eq!(result, Ok(()));
        assert_eq!(ctx.calls, vec!["verbose", "posn(a)"]);
    }

    #[test]
    fn test_app_unmatched_handler() {
        fn collect(arg: &str, ctx: &mut Ctx) -> Result<()> {
            ctx.calls.push(format!("unmatched({})", arg));
            Ok(())
        }

        let app = app().unmatched(collect);
        let mut ctx = Ctx::default();

        let result = app.process_args(&["prog", "-z", "-v"], &mut ctx);

        assert_eq!(result, Ok(()));
        assert_eq!(ctx.calls, vec!["unmatched(-z)", "verbose"]);
    }

    #[test]
    fn test_app_positionals() {
        let app = app();
        let args = vec!["prog", "-o", "f", "a", "-v", "b"];

        assert_eq!(app.next_positional(&args, 1), Ok(Some(3)));
        assert_eq!(app.next_positional(&args, 4), Ok(Some(5)));
        assert_eq!(app.next_positional(&args, 6), Ok(None));
        assert_eq!(app.next_positional(&args, 100), Ok(None));

        let found: Vec<(usize, &str)> = app.positionals(&args).map(|r| r.unwrap()).collect();
        assert_eq!(found, vec![(3, "a"), (5, "b")]);

        let args = vec!["prog", "a", "--bad", "b"];
        assert_eq!(app.next_positional(&args, 1), Ok(Some(1)));
        assert_eq!(
            app.next_positional(&args, 2),
            Err(Error::UnknownArg {
                index: 2,
                token: "--bad".into(),
            })
        );
    }

    #[test]
    fn test_app_positionals_with_unmatched_handler() {
        fn accept(_arg: &str, _ctx: &mut Ctx) -> Result<()> {
            Ok(())
        }

        let args = vec!["prog", "-z", "a", "--bad", "b"];
        let env_vars: &[&str] = &[];

        let app = app().unmatched(accept);

        // The same arguments are accepted by a full parse...
        let mut ctx = Ctx::default();
        assert_eq!(app.process(&args, env_vars, &mut ctx), Ok(()));
        assert_eq!(ctx.calls, vec!["posn(a)", "posn(b)"]);

        // ...so finding the standalone values must not fail either.
        let found: Vec<Result<(usize, &str)>> = app.positionals(&args).collect();
        assert_eq!(found, vec![Ok((2, "a")), Ok((4, "b"))]);

        assert_eq!(app.next_positional(&args, 1), Ok(Some(2)));
        assert_eq!(app.next_positional(&args, 3), Ok(Some(4)));
        assert_eq!(app.next_positional(&args, 5), Ok(None));
    }

    #[test]
    fn test_generate_help() {
        let mut writer = Vec::<u8>::new();

        let name = "my app";
        let name_re = format!(r"NAME:\n\s+{}\n", name);

        let version = "1.2.3-alpha4";
        let version_re = format!(r"VERSION:\n\s+{}\n", version);

        let summary = "This is one awesome app";
        let summary_re = format!(r"SUMMARY:\n\s+{}\n", summary);

        let usage_re = format!(r"USAGE:\n\s+{} \[-v\] \[-o FILE\] FILE\n", name);

        let args_re = concat!(
            r"Command line arguments:\n",
            r"  -v, --verbose {10}Be chatty\.\n",
            r"  -o FILE, --output=FILE\n {25}Write output to FILE\.\n",
            r"  FILE {19}File to read\.\n",
        );

        let env_re = concat!(
            r"Environment variables:\n",
            r"  HOME=DIR {15}Home directory\.\n",
        );

        let help = concat!("help line 1\n", "help last line\n");
        let help_re = r"HELP:\n\nhelp line 1\nhelp last line\n";

        let notes = "some notes";
        let notes_re = r"NOTES:\n\nsome notes\n$";

        let app = app()
            .name(name)
            .version(version)
            .summary(summary)
            .help(help)
            .notes(notes);

        let result = app.generate_help(&mut writer);
        assert!(result.is_ok());

        let value = String::from_utf8(writer).unwrap();

        for re in &[
            name_re.as_str(),
            version_re.as_str(),
            summary_re.as_str(),
            usage_re.as_str(),
            args_re,
            env_re,
            help_re,
            notes_re,
        ] {
            let regex = Regex::new(re).unwrap();
            assert!(regex.is_match(&value), "re: {:?}, value: {:?}", re, value);
        }
    }

    #[test]
    fn test_generate_help_minimal() {
        let mut writer = Vec::<u8>::new();

        let app = App::<Ctx>::new("bare");
        app.generate_help(&mut writer).unwrap();

        let value = String::from_utf8(writer).unwrap();

        assert!(value.starts_with("NAME:\n    bare\n"));
        assert!(value.contains("USAGE:\n    bare \n"));
        assert!(value.ends_with("Command line arguments:\n"));
        assert!(!value.contains("VERSION"));
        assert!(!value.contains("Environment variables"));
    }

    #[test]
    fn test_get_args() {
        let args: Vec<String> = env::args().collect();

        assert_eq!(get_args(), args);
    }
}
