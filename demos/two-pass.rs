// Copyright (c) 2021 James O. D. Hunt.
//
// SPDX-License-Identifier: Apache-2.0
//

/// An example showing the difference between handling all options before
/// standalone values and handling the command line from left to right.
///
/// Try:
///
/// ```bash
/// $ cargo run --example two-pass -- one -u two -l three
/// $ cargo run --example two-pass -- --ltr one -u two -l three
/// ```
use argdef::{get_args, App, Definition, Error, Result, Table};
use tracing_subscriber::EnvFilter;

#[derive(Clone, Debug, Default)]
struct State {
    upper: bool,
    words: Vec<String>,
}

fn upper(_def: &Definition<State>, _value: Option<&str>, state: &mut State) -> Result<()> {
    state.upper = true;
    Ok(())
}

fn lower(_def: &Definition<State>, _value: Option<&str>, state: &mut State) -> Result<()> {
    state.upper = false;
    Ok(())
}

fn word(_def: &Definition<State>, value: Option<&str>, state: &mut State) -> Result<()> {
    let value = value.unwrap_or_default();

    let word = if state.upper {
        value.to_uppercase()
    } else {
        value.to_lowercase()
    };

    state.words.push(word);

    Ok(())
}

/// Reject anything unexpected with a message of our own.
fn unmatched(arg: &str, _state: &mut State) -> Result<()> {
    Err(Error::HandlerError(format!("unexpected argument {:?}", arg)))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut cli = get_args();

    // Handle our own "--ltr" switch before the parser sees the arguments.
    let ltr = cli.iter().skip(1).any(|arg| arg == "--ltr");
    cli.retain(|arg| arg != "--ltr");

    let args = Table::from(vec![
        Definition::new()
            .short('u')
            .long("upper")
            .help("Upper case words.")
            .action(argdef::Action::Custom(upper)),
        Definition::new()
            .short('l')
            .long("lower")
            .help("Lower case words.")
            .action(argdef::Action::Custom(lower)),
        Definition::new()
            .value("WORD")
            .help("Word to show.")
            .action(argdef::Action::Custom(word)),
    ]);

    let app = App::new("two-pass").args(args).unmatched(unmatched);

    let mut state = State::default();
    let env: &[&str] = &[];

    let result = if ltr {
        app.process_ltr(&cli, env, &mut state)
    } else {
        app.process(&cli, env, &mut state)
    };

    if let Err(e) = result {
        eprintln!("ERROR: {}", e);

        if let Some(index) = e.index() {
            eprintln!("ERROR: failed at argument {}", index);
        }

        return Err(e);
    }

    println!("{}", state.words.join(" "));

    Ok(())
}
