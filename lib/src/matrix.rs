//! Exact rational linear algebra behind the balancer.
//!
//! An equation becomes a [`StoichiometricMatrix`] (one row per element, one column
//! per compound, product columns negated), which is reduced to a [`RowEchelon`]
//! whose null space holds every coefficient vector that conserves atoms.

use crate::compound::Compound;
use malachite::num::basic::traits::{One, Zero};
use malachite::Rational;
use std::cmp::{max, min};
use std::collections::HashMap;
use std::mem;

/// Signed atom counts, element × compound
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StoichiometricMatrix {
    /// Element of each row, first-seen order over reactants then products
    elements: Vec<String>,
    /// Rows of the matrix, each `columns` long
    rows: Vec<Vec<Rational>>,
    /// Number of compounds
    columns: usize,
}
impl StoichiometricMatrix {
    /// Builds the matrix: reactant counts are positive, product counts negative,
    /// so conservation reads `A · x = 0`
    /// # Example
    /// ```
    /// use chembalance::matrix::StoichiometricMatrix;
    /// use chembalance::Equation;
    /// use malachite::Rational;
    ///
    /// let equation: Equation = "H2+O2=>H2O".parse().unwrap();
    /// let matrix = StoichiometricMatrix::new(equation.reactants(), equation.products());
    ///
    /// assert_eq!(matrix.elements(), &["H".to_string(), "O".to_string()]);
    /// assert_eq!(matrix.rows(), &[
    ///     vec![Rational::from(2), Rational::from(0), Rational::from(-2)],
    ///     vec![Rational::from(0), Rational::from(2), Rational::from(-1)],
    /// ]);
    /// ```
    pub fn new(reactants: &[Compound], products: &[Compound]) -> Self {
        let columns = reactants.len() + products.len();

        let mut elements: Vec<String> = Vec::new();
        let mut row_of: HashMap<String, usize> = HashMap::new();
        let mut rows: Vec<Vec<Rational>> = Vec::new();

        let signed = reactants.iter().map(|c| (c, false)).chain(products.iter().map(|c| (c, true)));
        for (col, (compound, is_product)) in signed.enumerate() {
            for entry in compound.composition() {
                let row = *row_of.entry(entry.element.clone()).or_insert_with(|| {
                    elements.push(entry.element.clone());
                    rows.push(vec![Rational::ZERO; columns]);
                    rows.len() - 1
                });
                let count = Rational::from(entry.count);
                if is_product {
                    rows[row][col] -= count;
                } else {
                    rows[row][col] += count;
                }
            }
        }

        Self { elements, rows, columns }
    }

    /// Returns the element of each row
    pub fn elements(&self) -> &[String] {
        &self.elements
    }

    /// Returns the rows of the matrix
    pub fn rows(&self) -> &[Vec<Rational>] {
        &self.rows
    }

    /// Returns the number of columns (compounds)
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Reduces the matrix to reduced row echelon form
    pub fn row_reduce(self) -> RowEchelon {
        let mut rows = self.rows;
        let pivots = reduce_row_echelon(&mut rows, self.columns);
        RowEchelon {
            rows,
            pivots,
            columns: self.columns,
        }
    }
}

/// A matrix in reduced row echelon form together with its pivot columns
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RowEchelon {
    rows: Vec<Vec<Rational>>,
    pivots: Vec<usize>,
    columns: usize,
}
impl RowEchelon {
    /// Returns the reduced rows
    pub fn rows(&self) -> &[Vec<Rational>] {
        &self.rows
    }

    /// Returns the pivot column of each nonzero row, in row order
    pub fn pivot_columns(&self) -> &[usize] {
        &self.pivots
    }

    /// Returns the rank of the matrix
    pub fn rank(&self) -> usize {
        self.pivots.len()
    }

    /// Returns the dimension of the null space (number of free columns)
    pub fn nullity(&self) -> usize {
        self.columns - self.rank()
    }

    /// Returns a basis of the null space, one vector per free column
    ///
    /// Each vector has 1 at its free column, 0 at the other free columns, and the
    /// negated reduced entries at the pivot columns.
    /// # Example
    /// ```
    /// use chembalance::matrix::StoichiometricMatrix;
    /// use chembalance::Equation;
    /// use malachite::Rational;
    /// use std::str::FromStr;
    ///
    /// let equation: Equation = "H2+O2=>H2O".parse().unwrap();
    /// let reduced = StoichiometricMatrix::new(equation.reactants(), equation.products()).row_reduce();
    ///
    /// assert_eq!(reduced.null_space(), vec![vec![
    ///     Rational::from(1),
    ///     Rational::from_str("1/2").unwrap(),
    ///     Rational::from(1),
    /// ]]);
    /// ```
    pub fn null_space(&self) -> Vec<Vec<Rational>> {
        (0..self.columns)
            .filter(|col| !self.pivots.contains(col))
            .map(|free| {
                let mut vector = vec![Rational::ZERO; self.columns];
                vector[free] = Rational::ONE;
                for (row, &pivot) in self.pivots.iter().enumerate() {
                    vector[pivot] = -&self.rows[row][free];
                }
                vector
            })
            .collect()
    }
}





/// Reduces matrix to reduced row echelon form in place
///
/// The pivot of each column is the first row (from the current one down) with a
/// nonzero entry, so the result does not depend on entry magnitudes.
/// # Arguments
/// * `matrix` - rows of the matrix
/// * `columns` - number of columns
/// # Returns
/// * `Vec<usize>` - pivot column of each nonzero row
/// # Example
/// ```
/// use chembalance::matrix::reduce_row_echelon;
/// use malachite::Rational;
/// use std::str::FromStr;
///
/// let mut matrix = vec![
///     vec![Rational::from(2), Rational::from(0), Rational::from(-2)],
///     vec![Rational::from(0), Rational::from(2), Rational::from(-1)],
/// ];
///
/// let pivots = reduce_row_echelon(&mut matrix, 3);
///
/// assert_eq!(pivots, vec![0, 1]);
/// assert_eq!(matrix, vec![
///     vec![Rational::from(1), Rational::from(0), Rational::from(-1)],
///     vec![Rational::from(0), Rational::from(1), Rational::from_str("-1/2").unwrap()],
/// ]);
/// ```
pub fn reduce_row_echelon(matrix: &mut [Vec<Rational>], columns: usize) -> Vec<usize> {
    let mut pivots = Vec::new();
    let mut row = 0;

    for col in 0..columns {
        if row == matrix.len() {
            break;
        }

        let Some(pivot_row) = (row..matrix.len()).find(|&r| matrix[r][col] != Rational::ZERO) else {
            continue;
        };
        swap_rows(row, pivot_row, matrix);

        // scale pivot row so the pivot is 1
        let inverse = Rational::ONE / &matrix[row][col];
        for value in matrix[row].iter_mut().skip(col) {
            *value *= &inverse;
        }

        // clear the pivot column in every other row
        for other in 0..matrix.len() {
            if other == row || matrix[other][col] == Rational::ZERO {
                continue;
            }
            let factor = matrix[other][col].clone();
            for j in col..columns {
                let amount = &factor * &matrix[row][j];
                matrix[other][j] -= amount;
            }
        }

        pivots.push(col);
        row += 1;
    }

    pivots
}

/// Swaps two rows in a matrix
/// Used in row reduction
/// # Arguments
/// * `r1` - index of the first row
/// * `r2` - index of the second row
/// * `matrix` - rows of the matrix
/// # Example
/// ```
/// use chembalance::matrix::swap_rows;
///
/// let mut matrix = vec![
///     vec![1, 2, 3],
///     vec![4, 5, 6],
///     vec![7, 8, 9],
/// ];
///
/// swap_rows(0, 2, &mut matrix);
///
/// assert_eq!(matrix, vec![
///     vec![7, 8, 9],
///     vec![4, 5, 6],
///     vec![1, 2, 3],
/// ]);
/// ```
#[inline(always)]
pub fn swap_rows<T>(r1: usize, r2: usize, matrix: &mut [Vec<T>]) {
    if r1 != r2 {
        let bigger_r = max(r1, r2);
        let smaller_r = min(r1, r2);
        let (top, bot) = matrix.split_at_mut(bigger_r);  // index 0 in bot is bigger_r
        mem::swap(&mut top[smaller_r], &mut bot[0])
    }
}
