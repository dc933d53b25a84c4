use std::io::{self, BufRead, IsTerminal, Write};

use anyhow::{Context, Result};

/// Prompt shown before each equation when stdin is a terminal
pub const PROMPT: &str = "Formula: ";

/// Calls `handle` for each equation given on the command line, or for each
/// non-blank line of stdin when there are none.
pub fn for_each_equation(args: &[String], handle: impl FnMut(&str) -> Result<()>) -> Result<()> {
    if !args.is_empty() {
        return args.iter().map(String::as_str).try_for_each(handle);
    }

    let stdin = io::stdin();
    if stdin.is_terminal() {
        read_equations(stdin.lock(), Some(io::stdout()), handle)
    } else {
        read_equations(stdin.lock(), None::<io::Stdout>, handle)
    }
}

/// Reads one equation per line, skipping blank lines; `prompt` receives [`PROMPT`]
/// before every read and a newline once input ends.
pub fn read_equations<R, W>(reader: R, mut prompt: Option<W>, mut handle: impl FnMut(&str) -> Result<()>) -> Result<()>
where
    R: BufRead,
    W: Write,
{
    let mut lines = reader.lines();
    loop {
        if let Some(out) = prompt.as_mut() {
            write!(out, "{PROMPT}").context("failed to write prompt")?;
            out.flush().context("failed to flush prompt")?;
        }

        let Some(line) = lines.next() else {
            // end the prompt line on EOF
            if let Some(out) = prompt.as_mut() {
                writeln!(out).context("failed to write prompt")?;
                out.flush().context("failed to flush prompt")?;
            }
            return Ok(());
        };
        let line = line.context("failed to read equation from stdin")?;
        if line.trim().is_empty() {
            continue;
        }
        handle(&line)?;
    }
}
