use std::io;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use lancard_config::Config;
use lancard_core::Store;

mod cli;
mod commands;
mod console;
mod logging;
mod repl;
mod setup;

#[cfg(test)]
mod tests;

use self::cli::Cli;
use self::commands::Session;
use self::console::Console;

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut config = Config::new();
    cli.apply(&mut config);

    if let Err(e) = logging::init_logging(&config.log) {
        eprintln!("error: failed to initialize logging: {e}");
        return ExitCode::FAILURE;
    }

    match run(&cli, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, config: &Config) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout().lock());

    if !setup::ensure_dictionary(&cli.filename, &mut console)? {
        return Ok(());
    }

    let registry = setup::registry();
    let mut store = Store::open(&cli.filename, &registry)
        .with_context(|| format!("failed to open {}", cli.filename.display()))?;
    tracing::info!(
        "Opened {} with {} words",
        store.path().display(),
        store.len()
    );

    // The store is saved even when the session ends on an I/O error
    let outcome = Session::new(&mut store, &mut console, &config.drill).run();
    let saved = store.close();

    outcome.context("terminal I/O failed")?;
    saved.context("failed to save dictionary")?;
    Ok(())
}
