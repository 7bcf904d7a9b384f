// Copyright (c) 2021 James O. D. Hunt.
//
// SPDX-License-Identifier: Apache-2.0
//

/// An example showing how to use the same table for a config file and the
/// command line.
///
/// Try:
///
/// ```bash
/// $ cargo run --example config-file -- --generate > /tmp/demo.conf
/// $ cargo run --example config-file -- --config /tmp/demo.conf --port 99
/// ```
use std::io;

use argdef::{
    generate_config, get_args, process_config_file, Action, App, Definition, Result, Table,
};
use tracing_subscriber::EnvFilter;

#[derive(Clone, Debug, Default)]
struct Config {
    host: Option<String>,
    port: i64,
    retries: i64,
}

fn settings() -> Table<Config> {
    Table::from(vec![
        Definition::new()
            .long("host")
            .value("HOST")
            .default_value("localhost")
            .help("Host to connect to.")
            .action(Action::SetStr(|c: &mut Config| &mut c.host)),
        Definition::new()
            .long("port")
            .value("PORT")
            .default_value("8080")
            .help("Port to connect to.")
            .action(Action::SetInt(|c: &mut Config| &mut c.port)),
        Definition::new()
            .long("retries")
            .value("NUM")
            .default_value("3")
            .help("Number of times to retry\na failed connection.")
            .action(Action::SetInt(|c: &mut Config| &mut c.retries)),
    ])
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = get_args();

    if cli.iter().any(|arg| arg == "--generate") {
        return generate_config(&mut io::stdout(), &settings());
    }

    let mut config = Config::default();

    // Read the config file first so the command line takes priority.
    if let Some(pos) = cli.iter().position(|arg| arg == "--config") {
        match cli.get(pos + 1) {
            Some(path) => process_config_file(path, &settings(), &mut config)?,
            None => eprintln!("ERROR: --config needs a file name"),
        }
    }

    let cli: Vec<String> = cli
        .iter()
        .enumerate()
        .filter(|(i, arg)| *arg != "--config" && (*i == 0 || cli[i - 1] != "--config"))
        .map(|(_, arg)| arg.clone())
        .collect();

    let app = App::new("config-file").args(settings());
    let env: &[&str] = &[];

    app.process(&cli, env, &mut config)?;

    println!("INFO: Final config: {:?}", config);

    Ok(())
}
