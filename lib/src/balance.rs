use crate::equation::{same_totals, side_totals, Equation};
use crate::error::BalanceError;
use crate::matrix::StoichiometricMatrix;
use malachite::num::arithmetic::traits::{Gcd, Lcm};
use malachite::num::basic::traits::{One, Zero};
use malachite::{Natural, Rational};

/// Balances the equation in place
///
/// Finds the null space of the stoichiometric matrix with exact rational
/// arithmetic. Exactly one free parameter must remain; its basis vector is scaled
/// to the smallest integers and oriented so that reactants are positive.
/// Coefficients are only written when every step succeeds.
/// # Arguments
/// * `equation` - equation to balance, its current coefficients are ignored
/// # Returns
/// * `Ok` - if the equation was balanced
/// * `Err` - `Unbalanceable`, `UnderdeterminedEquation`, `NonPositiveSolution` or `Overflow`
/// # Example
/// ```
/// use chembalance::{balance, Equation};
///
/// let mut equation: Equation = "N2+O2=>N2O".parse().unwrap();
/// balance(&mut equation).unwrap();
///
/// assert_eq!(equation.coefficients(), vec![2, 1, 2]);
/// assert_eq!(equation.to_string(), "2N2+O2=>2N2O");
/// ```
pub fn balance(equation: &mut Equation) -> Result<(), BalanceError> {
    let reduced = StoichiometricMatrix::new(equation.reactants(), equation.products()).row_reduce();

    let basis = match reduced.nullity() {
        0 => return Err(BalanceError::Unbalanceable),
        1 => reduced.null_space().pop().ok_or(BalanceError::Unbalanceable)?,
        _ => return Err(BalanceError::UnderdeterminedEquation),
    };

    let coefficients = positive_coefficients(&basis, equation.reactants().len())?;

    // check if solutions are correct
    let mut solved = coefficients.iter().copied();
    let reactant_totals = side_totals(equation.reactants().iter().zip(solved.by_ref()))?;
    let product_totals = side_totals(equation.products().iter().zip(solved))?;
    if !same_totals(&reactant_totals, &product_totals) {
        return Err(BalanceError::Unbalanceable);
    }

    equation.assign_coefficients(&coefficients);
    Ok(())
}

/// Scales a rational vector to the smallest integer vector with the same direction
/// # Example
/// ```
/// use chembalance::balance::minimal_integers;
/// use malachite::Rational;
/// use std::str::FromStr;
///
/// let vector = vec![
///     Rational::from_str("1/3").unwrap(),
///     Rational::from_str("-1/2").unwrap(),
///     Rational::from(0),
///     Rational::from(1),
/// ];
///
/// assert_eq!(minimal_integers(&vector), vec![
///     Rational::from(2),
///     Rational::from(-3),
///     Rational::from(0),
///     Rational::from(6),
/// ]);
/// ```
pub fn minimal_integers(vector: &[Rational]) -> Vec<Rational> {
    // multiply by the least common multiple of denominators to get integers
    let mut lcm = Natural::ONE;
    for value in vector {
        lcm = lcm.lcm(value.denominator_ref());
    }
    let lcm = Rational::from(&lcm);
    let integers: Vec<Rational> = vector.iter().map(|value| value * &lcm).collect();

    // divide by the greatest common divisor of the absolute values
    let mut gcd = Natural::ZERO;
    for value in &integers {
        gcd = gcd.gcd(value.numerator_ref());
    }
    if gcd == Natural::ZERO {
        return integers;
    }
    let gcd = Rational::from(&gcd);
    integers.iter().map(|value| value / &gcd).collect()
}

/// Turns a null-space basis vector into positive integer coefficients
///
/// The sign is fixed by the first nonzero reactant entry; any coefficient that is
/// not positive afterwards means the equation direction is inconsistent.
fn positive_coefficients(basis: &[Rational], reactant_count: usize) -> Result<Vec<u64>, BalanceError> {
    let mut integers = minimal_integers(basis);

    let orientation = integers
        .iter()
        .take(reactant_count)
        .find(|value| **value != Rational::ZERO)
        .ok_or(BalanceError::NonPositiveSolution)?;
    if *orientation < Rational::ZERO {
        integers = integers.into_iter().map(|value| -value).collect();
    }

    integers
        .iter()
        .map(|value| {
            if *value <= Rational::ZERO {
                return Err(BalanceError::NonPositiveSolution);
            }
            u64::try_from(value).map_err(|_| BalanceError::Overflow)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equation::balance_equation;
    use proptest::prelude::*;
    use std::str::FromStr;

    fn test_equation(equation: &str, solved_equation: &str) {
        let balanced = balance_equation(equation).unwrap();
        assert_eq!(balanced.to_string(), solved_equation);
        assert!(balanced.is_balanced());
    }

    fn test_failure(equation: &str, error: BalanceError) {
        let mut eq = Equation::from_str(equation).unwrap();
        let before = eq.clone();
        assert_eq!(eq.balance(), Err(error));
        assert_eq!(eq, before, "failed balancing must leave coefficients untouched");
    }

    fn gcd(mut a: u64, mut b: u64) -> u64 {
        while b != 0 {
            (a, b) = (b, a % b);
        }
        a
    }

    #[test]
    fn nitrogen_oxide() {
        test_equation("N2+O2=>N2O", "2N2+O2=>2N2O");
    }

    #[test]
    fn aluminium_hydroxide_neutralisation() {
        let equation = balance_equation("Al(OH)3+H2SO4=>Al2(SO4)3+H2O").unwrap();
        assert_eq!(equation.coefficients(), vec![2, 3, 1, 6]);
    }

    #[test]
    fn eq1() {
        test_equation("H2+O2=>H2O", "2H2+O2=>2H2O");
    }

    #[test]
    fn eq2() {
        test_equation("(Cr(N2H4CO)6)4(Cr(CN)6)3+KMnO4+H2SO4=>K2Cr2O7+MnSO4+CO2+KNO3+K2SO4+H2O", "10(Cr(N2H4CO)6)4(Cr(CN)6)3+1176KMnO4+1399H2SO4=>35K2Cr2O7+1176MnSO4+420CO2+660KNO3+223K2SO4+1879H2O");
    }

    #[test]
    fn eq3() {
        test_equation("P4O10+H2O=>H3PO4", "P4O10+6H2O=>4H3PO4");
    }

    #[test]
    fn eq4() {
        test_equation("CO2+H2O=>C6H12O6+O2", "6CO2+6H2O=>C6H12O6+6O2");
    }

    #[test]
    fn eq5() {
        test_equation("SiCl4+H2O=>H4SiO4+HCl", "SiCl4+4H2O=>H4SiO4+4HCl");
    }

    #[test]
    fn eq6() {
        test_equation("Al+HCl=>AlCl3+H2", "2Al+6HCl=>2AlCl3+3H2");
    }

    #[test]
    fn eq7() {
        test_equation("Na2CO3+HCl=>NaCl+H2O+CO2", "Na2CO3+2HCl=>2NaCl+H2O+CO2");
    }

    #[test]
    fn eq8() {
        test_equation("C7H6O2+O2=>CO2+H2O", "2C7H6O2+15O2=>14CO2+6H2O");
    }

    #[test]
    fn eq9() {
        test_equation("Fe2(SO4)3+KOH=>K2SO4+Fe(OH)3", "Fe2(SO4)3+6KOH=>3K2SO4+2Fe(OH)3");
    }

    #[test]
    fn eq10() {
        test_equation("KClO3=>KClO4+KCl", "4KClO3=>3KClO4+KCl");
    }

    #[test]
    fn eq11() {
        test_equation("H2SO4+HI=>H2S+I2+H2O", "H2SO4+8HI=>H2S+4I2+4H2O");
    }

    #[test]
    fn eq12() {
        test_equation("C8H18+O2=>CO2+H2O", "2C8H18+25O2=>16CO2+18H2O");
    }

    #[test]
    fn eq13() {
        test_equation("C57H110O6+O2=>CO2+H2O", "2C57H110O6+163O2=>114CO2+110H2O");
    }

    #[test]
    fn eq14() {
        test_equation("K4(Fe(SCN)6)+K2Cr2O7+H2SO4=>Fe2(SO4)3+Cr2(SO4)3+CO2+H2O+K2SO4+KNO3", "6K4(Fe(SCN)6)+97K2Cr2O7+355H2SO4=>3Fe2(SO4)3+97Cr2(SO4)3+36CO2+355H2O+91K2SO4+36KNO3");
    }

    #[test]
    fn eq15() {
        test_equation("Cu+HNO3=>Cu(NO3)2+NO+H2O", "3Cu+8HNO3=>3Cu(NO3)2+2NO+4H2O");
    }

    #[test]
    fn eq16() {
        test_equation("Cu2S+HNO3=>Cu(NO3)2+CuSO4+NO2+H2O", "Cu2S+12HNO3=>Cu(NO3)2+CuSO4+10NO2+6H2O");
    }

    #[test]
    fn eq17() {
        test_equation("NaBr+NaBrO3+H2SO4=>Br2+Na2SO4+H2O", "5NaBr+NaBrO3+3H2SO4=>3Br2+3Na2SO4+3H2O");
    }

    #[test]
    fn eq18() {
        test_equation("KNO3+C12H22O11=>N2+CO2+H2O+K2CO3", "48KNO3+5C12H22O11=>24N2+36CO2+55H2O+24K2CO3");
    }

    #[test]
    fn eq19() {
        test_equation("Ca3(PO4)2+SiO2=>P4O10+CaSiO3", "2Ca3(PO4)2+6SiO2=>P4O10+6CaSiO3");
    }

    #[test]
    fn eq20() {
        test_equation("(NH4)2Cr2O7=>Cr2O3+N2+H2O", "(NH4)2Cr2O7=>Cr2O3+N2+4H2O");
    }

    #[test]
    fn identity_reaction() {
        test_equation("H2O=>H2O", "H2O=>H2O");
    }

    #[test]
    fn rebalancing_gives_same_coefficients() {
        let mut equation = balance_equation("C2H6+O2=>CO2+H2O").unwrap();
        assert_eq!(equation.coefficients(), vec![2, 7, 4, 6]);
        equation.balance().unwrap();
        assert_eq!(equation.coefficients(), vec![2, 7, 4, 6]);
    }

    #[test]
    fn element_on_one_side_only() {
        test_failure("NaCl=>Na", BalanceError::Unbalanceable);
        test_failure("H2=>O2", BalanceError::Unbalanceable);
    }

    #[test]
    fn two_free_parameters() {
        test_failure("C+O2=>CO+CO2", BalanceError::UnderdeterminedEquation);
        test_failure("H2+O2+H2O2=>H2O", BalanceError::UnderdeterminedEquation);
    }

    #[test]
    fn coefficient_too_large() {
        // the HO coefficient is 2^40 * (2^40 - 1)
        test_failure("HO=>H1099511627776+O1099511627775", BalanceError::Overflow);
    }

    #[test]
    fn element_on_one_side_with_free_parameter() {
        // He can only be conserved with a zero coefficient
        test_failure("H2+He=>H2", BalanceError::NonPositiveSolution);
    }

    #[test]
    fn inconsistent_direction() {
        // H2 + H2O => O2 conserves atoms only with H2 on the product side
        test_failure("H2+H2O=>O2", BalanceError::NonPositiveSolution);
    }

    #[test]
    fn minimal_integers_of_zero_vector() {
        let zeros = vec![Rational::ZERO, Rational::ZERO];
        assert_eq!(minimal_integers(&zeros), zeros);
    }

    #[test]
    fn positive_coefficients_orientation() {
        let basis = vec![Rational::from(-2), Rational::from(-4), Rational::from(-6)];
        assert_eq!(positive_coefficients(&basis, 1), Ok(vec![1, 2, 3]));

        let mixed = vec![Rational::from(1), Rational::from(-1)];
        assert_eq!(positive_coefficients(&mixed, 1), Err(BalanceError::NonPositiveSolution));

        let zero_reactants = vec![Rational::ZERO, Rational::from(1)];
        assert_eq!(positive_coefficients(&zero_reactants, 1), Err(BalanceError::NonPositiveSolution));
    }

    const FORMULAS: [&str; 14] = [
        "H2", "O2", "H2O", "CO2", "CH4", "C2H6", "N2", "NH3", "NO2", "HNO3", "Fe", "Fe2O3", "Ca(OH)2", "CaCO3",
    ];

    fn equation_strategy() -> impl Strategy<Value = String> {
        let side = || prop::collection::vec(prop::sample::select(FORMULAS.to_vec()), 1..4);
        (side(), side()).prop_map(|(reactants, products)| format!("{}=>{}", reactants.join("+"), products.join("+")))
    }

    proptest! {
        #[test]
        fn accepted_equations_conserve_atoms_minimally(text in equation_strategy()) {
            let mut equation = Equation::from_str(&text).unwrap();
            if equation.balance().is_ok() {
                prop_assert!(equation.is_balanced());

                let coefficients = equation.coefficients();
                prop_assert!(coefficients.iter().all(|&c| c >= 1));
                prop_assert_eq!(coefficients.iter().fold(0, |acc, &c| gcd(acc, c)), 1);
            }
        }
    }
}
