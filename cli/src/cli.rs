use clap::{ArgAction, Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "chembalance",
    about = "Balance chemical equations with the smallest integer coefficients",
    version,
    propagate_version = true
)]
pub struct Cli {
    /// Equations to balance, e.g. "Al+O2=>Al2O3" (one per line from stdin if omitted)
    #[arg(value_name = "EQUATION")]
    pub equations: Vec<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Do not print failed equations in text output (exit status still reports them)
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Balanced equation text, e.g. 4Al+3O2=>2Al2O3
    #[default]
    Text,
    /// One JSON object per equation
    Json,
}

pub fn parse() -> Cli {
    Cli::parse()
}
