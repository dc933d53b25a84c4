use crate::balance::balance;
use crate::compound::{add_atoms, Compound, ElementCount};
use crate::elements::{ElementLookup, PeriodicTable};
use crate::error::BalanceError;
use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Separator between reactants and products
pub const ARROW: &str = "=>";

/// Separator between compounds on one side
pub const PLUS: &str = "+";

/// A struct that represents a chemical equation (e.g. 2H2+O2=>2H2O)
///
/// Compounds keep their input order; balancing only changes their coefficients.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Equation {
    /// A vector of reactants
    reactants: Vec<Compound>,
    /// A vector of products
    products: Vec<Compound>,
}
impl Equation {
    /// Create new equation from already built compounds
    pub fn new(reactants: Vec<Compound>, products: Vec<Compound>) -> Result<Self, BalanceError> {
        if reactants.is_empty() || products.is_empty() {
            return Err(BalanceError::EmptyCompound);
        }
        Ok(Self { reactants, products })
    }

    /// Create new equation from text, all coefficients start at 1
    /// # Arguments
    /// * `input` - equation text, e.g. `Al+O2=>Al2O3`
    /// * `elements` - lookup of valid element symbols
    /// # Returns
    /// * `Ok` - equation
    /// * `Err` - error that occurred during parsing
    /// # Example
    /// ```
    /// use chembalance::{Compound, Equation, PeriodicTable};
    ///
    /// let equation = Equation::parse("H2 + O2 => H2O", &PeriodicTable).unwrap();
    ///
    /// let expected_reactants = vec![
    ///     Compound::parse("H2", &PeriodicTable).unwrap(),
    ///     Compound::parse("O2", &PeriodicTable).unwrap(),
    /// ];
    ///
    /// assert_eq!(equation.reactants(), expected_reactants.as_slice());
    /// assert_eq!(equation.products()[0].formula_text(), "H2O");
    /// assert_eq!(equation.coefficients(), vec![1, 1, 1]);
    /// ```
    pub fn parse<L: ElementLookup + ?Sized>(input: &str, elements: &L) -> Result<Self, BalanceError> {
        let (reactants, products) = split_equation(input)?;

        let process_side = |texts: Vec<&str>| -> Result<Vec<Compound>, BalanceError> {
            texts.into_iter().map(|text| Compound::parse(text, elements)).collect()
        };

        Ok(Self {
            reactants: process_side(reactants)?,
            products: process_side(products)?,
        })
    }

    /// Balances the equation in place, see [`balance`]
    pub fn balance(&mut self) -> Result<(), BalanceError> {
        balance(self)
    }

    /// Returns the vector of reactants
    pub fn reactants(&self) -> &[Compound] {
        &self.reactants
    }

    /// Returns the vector of products
    pub fn products(&self) -> &[Compound] {
        &self.products
    }

    /// Iterates over reactants followed by products
    pub fn compounds(&self) -> impl Iterator<Item = &Compound> {
        self.reactants.iter().chain(self.products.iter())
    }

    /// Returns the coefficients of reactants followed by those of products
    pub fn coefficients(&self) -> Vec<u64> {
        self.compounds().map(Compound::coefficient).collect()
    }

    /// Sets the coefficients of reactants followed by products
    pub(crate) fn assign_coefficients(&mut self, coefficients: &[u64]) {
        for (compound, &coefficient) in self.reactants.iter_mut().chain(self.products.iter_mut()).zip(coefficients) {
            compound.set_coefficient(coefficient);
        }
    }

    /// Total atoms of every element on each side, weighted by coefficients
    /// # Returns
    /// * `Ok` - (reactant totals, product totals), each in first-seen order
    /// * `Err` - `Overflow` if a total does not fit in 64 bits
    /// # Example
    /// ```
    /// use chembalance::{ElementCount, Equation};
    ///
    /// let mut equation: Equation = "H2+O2=>H2O".parse().unwrap();
    /// equation.balance().unwrap();
    ///
    /// let (reactants, products) = equation.atom_totals().unwrap();
    /// assert_eq!(reactants, vec![ElementCount::new("H", 4), ElementCount::new("O", 2)]);
    /// assert_eq!(products, reactants);
    /// ```
    pub fn atom_totals(&self) -> Result<(Vec<ElementCount>, Vec<ElementCount>), BalanceError> {
        let reactants = side_totals(self.reactants.iter().map(|c| (c, c.coefficient())))?;
        let products = side_totals(self.products.iter().map(|c| (c, c.coefficient())))?;
        Ok((reactants, products))
    }

    /// Returns true if every element has the same total on both sides with the current coefficients
    pub fn is_balanced(&self) -> bool {
        match self.atom_totals() {
            Ok((reactants, products)) => same_totals(&reactants, &products),
            Err(_) => false,
        }
    }

    /// Renders the equation with custom separators
    /// # Example
    /// ```
    /// use chembalance::Equation;
    ///
    /// let mut equation: Equation = "Al+O2=>Al2O3".parse().unwrap();
    /// equation.balance().unwrap();
    ///
    /// assert_eq!(equation.to_string(), "4Al+3O2=>2Al2O3");
    /// assert_eq!(equation.render_with(" + ", " -> "), "4Al + 3O2 -> 2Al2O3");
    /// ```
    pub fn render_with(&self, plus: &str, arrow: &str) -> String {
        let render_side = |compounds: &[Compound]| -> String {
            compounds.iter().map(|c| c.to_string()).collect::<Vec<_>>().join(plus)
        };

        format!("{}{}{}", render_side(&self.reactants), arrow, render_side(&self.products))
    }
}
impl Display for Equation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.render_with(PLUS, ARROW))
    }
}
impl FromStr for Equation {
    type Err = BalanceError;

    /// Parses against the full periodic table
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s, &PeriodicTable)
    }
}





/// Splits equation text into reactant and product compound texts
///
/// The text must contain `=>` exactly once. Each side is split on `+` and every
/// piece is trimmed of surrounding whitespace; an empty piece is an error.
/// # Example
/// ```
/// use chembalance::{split_equation, BalanceError};
///
/// let (reactants, products) = split_equation("CH4 + O2 => CO2 + H2O").unwrap();
/// assert_eq!(reactants, vec!["CH4", "O2"]);
/// assert_eq!(products, vec!["CO2", "H2O"]);
///
/// assert_eq!(split_equation("H2O+O2"), Err(BalanceError::MalformedEquation));
/// assert_eq!(split_equation("H2++O2=>H2O"), Err(BalanceError::EmptyCompound));
/// ```
pub fn split_equation(text: &str) -> Result<(Vec<&str>, Vec<&str>), BalanceError> {
    let sides: Vec<&str> = text.split(ARROW).collect();
    let [reactants, products] = sides.as_slice() else {
        return Err(BalanceError::MalformedEquation);
    };

    Ok((split_side(*reactants)?, split_side(*products)?))
}

fn split_side(side: &str) -> Result<Vec<&str>, BalanceError> {
    side.split(PLUS)
        .map(|compound| match compound.trim() {
            "" => Err(BalanceError::EmptyCompound),
            trimmed => Ok(trimmed),
        })
        .collect()
}

/// Parses and balances equation text against the full periodic table
/// # Example
/// ```
/// use chembalance::balance_equation;
///
/// let equation = balance_equation("Al(OH)3+H2SO4=>Al2(SO4)3+H2O").unwrap();
/// assert_eq!(equation.to_string(), "2Al(OH)3+3H2SO4=>Al2(SO4)3+6H2O");
/// ```
pub fn balance_equation(text: &str) -> Result<Equation, BalanceError> {
    let mut equation: Equation = text.parse()?;
    equation.balance()?;
    Ok(equation)
}

/// Sums atoms over (compound, coefficient) pairs, first-seen order
pub(crate) fn side_totals<'a>(
    compounds: impl Iterator<Item = (&'a Compound, u64)>,
) -> Result<Vec<ElementCount>, BalanceError> {
    let mut totals = Vec::new();
    for (compound, coefficient) in compounds {
        for ElementCount { element, count } in compound.composition() {
            let atoms = count.checked_mul(coefficient).ok_or(BalanceError::Overflow)?;
            add_atoms(&mut totals, element, atoms)?;
        }
    }
    Ok(totals)
}

/// Compares two sides' totals regardless of element order
pub(crate) fn same_totals(reactants: &[ElementCount], products: &[ElementCount]) -> bool {
    let as_map = |side: &[ElementCount]| -> HashMap<String, u64> {
        side.iter().map(|e| (e.element.clone(), e.count)).collect()
    };
    as_map(reactants) == as_map(products)
}
