use thiserror::Error;

/// Errors that can occur while decomposing or balancing an equation.
///
/// Every variant is detected at the point of violation and returned to the
/// caller unchanged. Parse failures come from [`split_equation`](crate::split_equation)
/// and [`parse_compound`](crate::parse_compound), the last three from
/// [`balance`](crate::balance).
#[derive(Clone, Debug, Eq, Hash, PartialEq, Error)]
pub enum BalanceError {
    /// The `=>` separator is missing or appears more than once.
    #[error("equation must contain exactly one `=>` separator")]
    MalformedEquation,

    /// A side of the equation, or a `+`-separated segment of it, is empty.
    #[error("equation contains an empty compound")]
    EmptyCompound,

    /// A `)` without a matching `(`, or a `(` left open at the end of a compound.
    #[error("unbalanced parentheses")]
    UnbalancedParentheses,

    /// A candidate element symbol is not present in the element lookup.
    #[error("unknown element symbol `{0}`")]
    UnknownElement(String),

    /// A character that cannot start any token of a compound formula.
    #[error("unexpected character `{0}`")]
    UnexpectedCharacter(char),

    /// An explicit zero subscript or group multiplier.
    #[error("atom counts and group multipliers must be positive")]
    ZeroCount,

    /// An atom count or coefficient does not fit in 64 bits.
    #[error("atom count or coefficient is too large")]
    Overflow,

    /// Only the trivial all-zero solution conserves every element.
    #[error("equation cannot be balanced")]
    Unbalanceable,

    /// More than one independent solution exists.
    #[error("equation has more than one independent balancing (underdetermined)")]
    UnderdeterminedEquation,

    /// The only solution needs a zero or negative coefficient on some compound.
    #[error("balancing requires a non-positive coefficient")]
    NonPositiveSolution,
}
