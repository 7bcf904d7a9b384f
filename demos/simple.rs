// Copyright (c) 2021 James O. D. Hunt.
//
// SPDX-License-Identifier: Apache-2.0
//

/// A simple example showing flags, options that need values and
/// environment variables.
///
/// Try:
///
/// ```bash
/// $ RUST_LOG=debug SIMPLE_NAME=env cargo run --example simple -- -vv -n 3 --name=cli
/// ```
use argdef::{Action, App, Definition, Result, Table};
use tracing_subscriber::EnvFilter;

/// The options this program supports.
#[derive(Clone, Debug, Default)]
struct Opts {
    verbose: i64,
    count: i64,
    name: Option<String>,
    help: bool,
}

fn show_help(_def: &Definition<Opts>, _value: Option<&str>, opts: &mut Opts) -> Result<()> {
    opts.help = true;

    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Table::from(vec![
        Definition::new()
            .short('h')
            .long("help")
            .help("Show this help.")
            .action(Action::Custom(show_help)),
        Definition::new()
            .short('v')
            .long("verbose")
            .help("Increase verbosity (can be specified multiple times).")
            .action(Action::Increment(|o: &mut Opts| &mut o.verbose)),
        Definition::new()
            .short('q')
            .long("quiet")
            .help("Disable all output.")
            .action(Action::SetIntTo(|o: &mut Opts| &mut o.verbose, -1)),
        Definition::new()
            .short('n')
            .long("count")
            .value("NUM")
            .help("Number of times to do things.")
            .action(Action::SetInt(|o: &mut Opts| &mut o.count)),
        Definition::new()
            .long("name")
            .value("NAME")
            .help("Name to use. The SIMPLE_NAME environment variable can be used instead, but this option takes priority.")
            .action(Action::SetStr(|o: &mut Opts| &mut o.name)),
    ]);

    let env = Table::from(vec![Definition::new()
        .long("SIMPLE_NAME")
        .value("NAME")
        .help("Name to use.")
        .action(Action::SetStr(|o: &mut Opts| &mut o.name))]);

    let app = App::new("simple")
        .version(argdef::VERSION)
        .summary("Show how options are handled.")
        .args(args)
        .env(env);

    let mut opts = Opts::default();

    // The environment is handled first so the command line takes priority.
    app.parse(&mut opts)?;

    if opts.help {
        app.generate_help(&mut std::io::stdout())?;
        return Ok(());
    }

    println!("INFO: Final options: {:?}", opts);

    Ok(())
}
