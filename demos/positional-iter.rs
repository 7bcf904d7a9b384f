// Copyright (c) 2021 James O. D. Hunt.
//
// SPDX-License-Identifier: Apache-2.0
//

/// An example showing how to find the standalone values on a command line
/// without running any actions.
///
/// Try:
///
/// ```bash
/// $ cargo run --example positional-iter -- -o out.txt first -v second
/// ```
use argdef::{get_args, Action, App, Definition, Result, Table};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Table::from(vec![
        Definition::new().short('v').long("verbose").action(Action::Noop),
        Definition::new()
            .short('o')
            .long("output")
            .value("FILE")
            .action(Action::Noop),
        Definition::new().value("FILE").action(Action::Noop),
    ]);

    let app: App<()> = App::new("positional-iter").args(args);
    let cli = get_args();

    // Count first, then visit each one.
    let count = app.positionals(&cli).count();
    println!("INFO: {} standalone value(s)", count);

    for found in app.positionals(&cli) {
        let (index, value) = found?;

        println!("INFO: argument {}: {:?}", index, value);
    }

    // The same, one at a time.
    let mut next = app.next_positional(&cli, 1)?;

    while let Some(index) = next {
        println!("INFO: next standalone value at {}", index);

        next = app.next_positional(&cli, index + 1)?;
    }

    Ok(())
}
