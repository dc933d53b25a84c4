use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};

mod cli;
mod input;
mod logging;
mod report;

fn main() -> ExitCode {
    let cli = cli::parse();
    logging::init(cli.verbose);

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Balances every equation from the arguments or stdin, returns whether all succeeded.
fn run(cli: &cli::Cli) -> Result<bool> {
    let mut all_balanced = true;

    input::for_each_equation(&cli.equations, |text| {
        let report = report::balance_line(text);
        all_balanced &= report.is_balanced();

        if report.is_balanced() || cli.format == cli::OutputFormat::Json {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{}", report.render(cli.format)?).context("failed to write result")?;
        } else if !cli.quiet {
            eprintln!("{}", report.render(cli.format)?);
        }
        Ok(())
    })?;

    Ok(all_balanced)
}
