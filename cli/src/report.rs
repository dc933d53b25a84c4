use anyhow::{Context, Result};
use chembalance::{balance_equation, BalanceError, Compound, ElementCount, Equation};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::cli::OutputFormat;

/// Outcome of balancing one line of input
#[derive(Debug, Serialize)]
pub struct Report {
    /// Text as the user typed it
    pub input: String,
    #[serde(flatten)]
    pub outcome: Outcome,
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Balanced {
        equation: String,
        reactants: Vec<Term>,
        products: Vec<Term>,
    },
    Failed {
        error: String,
    },
}

/// A compound with its coefficient and atoms per unit
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct Term {
    pub formula: String,
    pub coefficient: u64,
    pub composition: Vec<ElementCount>,
}

impl From<&Compound> for Term {
    fn from(compound: &Compound) -> Self {
        Self {
            formula: compound.formula_text().to_string(),
            coefficient: compound.coefficient(),
            composition: compound.composition().to_vec(),
        }
    }
}

/// Removes all whitespace, as the equation is typed freely
fn normalize(input: &str) -> String {
    input.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Parses and balances one equation
pub fn balance_line(input: &str) -> Report {
    let normalized = normalize(input);
    debug!(equation = %normalized, "balancing");

    let outcome = match balance_equation(&normalized) {
        Ok(equation) => {
            info!(equation = %equation, "balanced");
            Outcome::balanced(&equation)
        },
        Err(err) => {
            warn!(equation = %normalized, error = %err, "balancing failed");
            Outcome::failed(&err)
        },
    };

    Report {
        input: input.to_string(),
        outcome,
    }
}

impl Outcome {
    fn balanced(equation: &Equation) -> Self {
        Outcome::Balanced {
            equation: equation.to_string(),
            reactants: equation.reactants().iter().map(Term::from).collect(),
            products: equation.products().iter().map(Term::from).collect(),
        }
    }

    fn failed(error: &BalanceError) -> Self {
        Outcome::Failed { error: error.to_string() }
    }
}

impl Report {
    pub fn is_balanced(&self) -> bool {
        matches!(self.outcome, Outcome::Balanced { .. })
    }

    /// Renders the report in the requested format
    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Text => Ok(match &self.outcome {
                Outcome::Balanced { equation, .. } => equation.clone(),
                Outcome::Failed { error } => format!("{}: {}", self.input.trim(), error),
            }),
            OutputFormat::Json => serde_json::to_string(self).context("failed to serialize report"),
        }
    }
}
