use crate::elements::ElementLookup;
use crate::error::BalanceError;
use std::fmt::{Display, Formatter};
use std::iter::Peekable;
use std::str::Chars;

/// Atoms of one element contributed by one compound (already multiplied out through nesting)
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ElementCount {
    /// Element symbol (e.g. `Cr`)
    pub element: String,
    /// Number of atoms, always positive
    pub count: u64,
}
impl ElementCount {
    /// Create new element count
    pub fn new(element: impl Into<String>, count: u64) -> Self {
        Self {
            element: element.into(),
            count,
        }
    }
}
impl Display for ElementCount {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.count == 1 {
            write!(f, "{}", self.element)
        } else {
            write!(f, "{}{}", self.element, self.count)
        }
    }
}

/// A chemical species on one side of an equation (e.g. H2SO4)
///
/// The composition is fixed once the compound is built; only the coefficient
/// is changed, and only by the balancer.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Compound {
    /// String from which the compound was parsed
    formula_text: String,
    /// Elements and their quantities, in first-seen order, each element at most once
    composition: Vec<ElementCount>,
    /// Stoichiometric coefficient
    coefficient: u64,
}
impl Compound {
    /// Parse compound from formula text, coefficient starts at 1
    /// # Arguments
    /// * `text` - formula text, e.g. `Ca(OH)2`
    /// * `elements` - lookup of valid element symbols
    /// # Returns
    /// * `Ok` - compound
    /// * `Err` - error that occurred during parsing
    /// # Example
    /// ```
    /// use chembalance::{Compound, ElementCount, PeriodicTable};
    ///
    /// let compound = Compound::parse("Ca(OH)2", &PeriodicTable).unwrap();
    ///
    /// assert_eq!(compound.formula_text(), "Ca(OH)2");
    /// assert_eq!(compound.coefficient(), 1);
    /// assert_eq!(compound.composition(), &[
    ///     ElementCount::new("Ca", 1),
    ///     ElementCount::new("O", 2),
    ///     ElementCount::new("H", 2),
    /// ]);
    /// ```
    pub fn parse<L: ElementLookup + ?Sized>(text: &str, elements: &L) -> Result<Self, BalanceError> {
        Ok(Self {
            formula_text: text.to_string(),
            composition: parse_compound(text, elements)?,
            coefficient: 1,
        })
    }

    /// Build compound from an already known composition
    ///
    /// Repeated elements are merged, zero counts and empty compositions are rejected.
    pub fn from_composition(
        formula_text: impl Into<String>,
        composition: impl IntoIterator<Item = ElementCount>,
    ) -> Result<Self, BalanceError> {
        let mut merged = Vec::new();
        for ElementCount { element, count } in composition {
            if count == 0 {
                return Err(BalanceError::ZeroCount);
            }
            add_atoms(&mut merged, &element, count)?;
        }
        if merged.is_empty() {
            return Err(BalanceError::EmptyCompound);
        }

        Ok(Self {
            formula_text: formula_text.into(),
            composition: merged,
            coefficient: 1,
        })
    }

    /// Returns the text from which the compound was parsed
    pub fn formula_text(&self) -> &str {
        &self.formula_text
    }

    /// Returns the elements and their quantities in the compound
    /// For example, in the compound H2O the composition is [H: 2, O: 1]
    pub fn composition(&self) -> &[ElementCount] {
        &self.composition
    }

    /// Returns the number of atoms of `element` in one unit of the compound (0 if absent)
    pub fn count_of(&self, element: &str) -> u64 {
        self.composition
            .iter()
            .find(|e| e.element == element)
            .map_or(0, |e| e.count)
    }

    /// Returns the stoichiometric coefficient (1 until balanced)
    pub fn coefficient(&self) -> u64 {
        self.coefficient
    }

    pub(crate) fn set_coefficient(&mut self, coefficient: u64) {
        self.coefficient = coefficient;
    }

    /// Builds a compound without merging repeated elements
    #[cfg(test)]
    pub(crate) fn unmerged(formula_text: &str, composition: Vec<ElementCount>) -> Self {
        Self {
            formula_text: formula_text.to_string(),
            composition,
            coefficient: 1,
        }
    }
}
impl Display for Compound {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.coefficient > 1 {
            write!(f, "{}", self.coefficient)?;
        }
        write!(f, "{}", self.formula_text)
    }
}

/// Decomposes formula text into per-element atom counts
///
/// Groups in parentheses may be nested and followed by a multiplier; each element is
/// scaled by the product of the multipliers of every group enclosing it. Repeated
/// elements are merged, the result keeps first-seen order.
/// # Arguments
/// * `text` - formula text, e.g. `(NH4)2Cr2O7`
/// * `elements` - lookup of valid element symbols
/// # Returns
/// * `Ok` - composition
/// * `Err` - error that occurred during parsing
/// # Example
/// ```
/// use chembalance::{parse_compound, BalanceError, ElementCount, PeriodicTable};
///
/// let composition = parse_compound("(NH4)2Cr2O7", &PeriodicTable).unwrap();
/// assert_eq!(composition, vec![
///     ElementCount::new("N", 2),
///     ElementCount::new("H", 8),
///     ElementCount::new("Cr", 2),
///     ElementCount::new("O", 7),
/// ]);
///
/// assert_eq!(parse_compound("Xx2", &PeriodicTable), Err(BalanceError::UnknownElement("Xx".to_string())));
/// ```
pub fn parse_compound<L: ElementLookup + ?Sized>(text: &str, elements: &L) -> Result<Vec<ElementCount>, BalanceError> {
    if text.is_empty() {
        return Err(BalanceError::EmptyCompound);
    }

    let mut chars = text.chars().peekable();

    // one accumulator per open group, index 0 is the compound itself
    let mut groups: Vec<Vec<ElementCount>> = vec![Vec::new()];

    while let Some(c) = chars.next() {
        match c {
            '(' => {
                if chars.peek() == Some(&')') {
                    return Err(BalanceError::UnexpectedCharacter(')'));
                }
                groups.push(Vec::new());
            },
            ')' => {
                if groups.len() < 2 {
                    return Err(BalanceError::UnbalancedParentheses);
                }
                let group = groups.pop().ok_or(BalanceError::UnbalancedParentheses)?;
                let multiplier = read_count(&mut chars)?;
                let parent = groups.last_mut().ok_or(BalanceError::UnbalancedParentheses)?;
                for ElementCount { element, count } in group {
                    add_atoms(parent, &element, count.checked_mul(multiplier).ok_or(BalanceError::Overflow)?)?;
                }
            },
            'A'..='Z' => {
                let mut symbol = c.to_string();
                if let Some(&next) = chars.peek() {
                    if next.is_ascii_lowercase() {
                        symbol.push(next);
                        chars.next();
                    }
                }
                if !elements.contains(&symbol) {
                    return Err(BalanceError::UnknownElement(symbol));
                }
                let count = read_count(&mut chars)?;
                let current = groups.last_mut().ok_or(BalanceError::UnbalancedParentheses)?;
                add_atoms(current, &symbol, count)?;
            },
            other => return Err(BalanceError::UnexpectedCharacter(other)),
        }
    }

    if groups.len() != 1 {
        return Err(BalanceError::UnbalancedParentheses);
    }

    groups.pop().ok_or(BalanceError::UnbalancedParentheses)
}

/// Reads an optional run of digits, 1 if there is none
fn read_count(chars: &mut Peekable<Chars<'_>>) -> Result<u64, BalanceError> {
    let mut count: Option<u64> = None;
    while let Some(digit) = chars.peek().and_then(|c| c.to_digit(10)) {
        chars.next();
        let value = count
            .unwrap_or(0)
            .checked_mul(10)
            .and_then(|v| v.checked_add(u64::from(digit)))
            .ok_or(BalanceError::Overflow)?;
        count = Some(value);
    }

    match count {
        None => Ok(1),
        Some(0) => Err(BalanceError::ZeroCount),
        Some(value) => Ok(value),
    }
}

/// Adds `count` atoms of `element`, merging with an existing entry
pub(crate) fn add_atoms(composition: &mut Vec<ElementCount>, element: &str, count: u64) -> Result<(), BalanceError> {
    match composition.iter_mut().find(|e| e.element == element) {
        Some(existing) => {
            existing.count = existing.count.checked_add(count).ok_or(BalanceError::Overflow)?;
        },
        None => composition.push(ElementCount::new(element, count)),
    }
    Ok(())
}

/// Formats a composition as canonical formula text (count 1 is omitted)
/// # Example
/// ```
/// use chembalance::{format_composition, parse_compound, PeriodicTable};
///
/// let composition = parse_compound("(NH4)2Cr2O7", &PeriodicTable).unwrap();
/// assert_eq!(format_composition(&composition), "N2H8Cr2O7");
/// ```
pub fn format_composition(composition: &[ElementCount]) -> String {
    composition.iter().map(|e| e.to_string()).collect()
}
