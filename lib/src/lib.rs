//! Decomposes chemical formulas and balances chemical equations exactly.
//!
//! An equation such as `Al(OH)3+H2SO4=>Al2(SO4)3+H2O` is split into compounds, each
//! compound is decomposed into per-element atom counts (nested groups and
//! multi-digit subscripts included), and the balancer finds the smallest positive
//! integer coefficients that conserve every element. Balancing solves for the null
//! space of the stoichiometric matrix over the rationals, so equations where an
//! element is shared by many compounds (combustion, redox) are handled exactly.
//!
//! # Example
//! ```
//! use chembalance::{balance_equation, BalanceError};
//!
//! let equation = balance_equation("C8H18 + O2 => CO2 + H2O").unwrap();
//! assert_eq!(equation.coefficients(), vec![2, 25, 16, 18]);
//! assert_eq!(equation.to_string(), "2C8H18+25O2=>16CO2+18H2O");
//!
//! assert_eq!(balance_equation("H2O+O2").unwrap_err(), BalanceError::MalformedEquation);
//! assert_eq!(balance_equation("C+O2=>CO+CO2").unwrap_err(), BalanceError::UnderdeterminedEquation);
//! ```
//!
//! The core performs no I/O; rendering is plain [`Display`](std::fmt::Display).

pub mod balance;
mod compound;
mod elements;
mod equation;
mod error;
pub mod matrix;

pub use balance::balance;
pub use compound::{format_composition, parse_compound, Compound, ElementCount};
pub use elements::{ElementLookup, PeriodicTable};
pub use equation::{balance_equation, split_equation, Equation, ARROW, PLUS};
pub use error::BalanceError;
