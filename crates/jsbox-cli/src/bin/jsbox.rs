#![allow(clippy::print_stderr)]

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{IsTerminal, Write};

use jsbox_cli::args::CliArgs;
use jsbox_cli::driver;
use jsbox_cli::reporter::Reporter;

fn main() -> Result<()> {
    // Installs a subscriber only when JSBOX_LOG or RUST_LOG is set.
    jsbox_cli::tracing_config::init_tracing();

    let args = CliArgs::parse();
    let result = driver::run(&args)?;

    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(result.stdout.as_bytes())
        .and_then(|()| stdout.flush())
        .context("failed to write to standard output")?;

    if !result.failures.is_empty() {
        let reporter = Reporter::new(std::io::stderr().is_terminal());
        eprintln!("{}", reporter.render(&result.failures));
    }

    let code = result.exit_code();
    if code != driver::EXIT_SUCCESS {
        std::process::exit(code);
    }
    Ok(())
}
