use mendeleev::ALL_ELEMENTS;
use std::collections::HashSet;

/// Lookup of valid element symbols used by the decomposer
///
/// The decomposer treats the lookup as opaque data: it only asks whether a candidate
/// symbol exists. Any `Fn(&str) -> bool` closure, a `HashSet<String>` or a slice of
/// symbols can be used in place of the full [`PeriodicTable`].
/// # Example
/// ```
/// use chembalance::{parse_compound, ElementLookup};
///
/// let only_hydrogen_and_oxygen = |symbol: &str| symbol == "H" || symbol == "O";
/// assert!(only_hydrogen_and_oxygen.contains("O"));
/// assert!(parse_compound("H2O", &only_hydrogen_and_oxygen).is_ok());
/// assert!(parse_compound("NaCl", &only_hydrogen_and_oxygen).is_err());
/// ```
pub trait ElementLookup {
    /// Returns true if `symbol` names a known element
    fn contains(&self, symbol: &str) -> bool;
}

/// Every element of the periodic table, as known to `mendeleev`
#[derive(Copy, Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct PeriodicTable;

impl ElementLookup for PeriodicTable {
    fn contains(&self, symbol: &str) -> bool {
        ALL_ELEMENTS.iter().any(|e| e.symbol() == symbol)
    }
}

impl<F> ElementLookup for F
where
    F: Fn(&str) -> bool,
{
    fn contains(&self, symbol: &str) -> bool {
        self(symbol)
    }
}

impl ElementLookup for HashSet<String> {
    fn contains(&self, symbol: &str) -> bool {
        HashSet::contains(self, symbol)
    }
}

impl ElementLookup for [&str] {
    fn contains(&self, symbol: &str) -> bool {
        self.iter().any(|s| *s == symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn periodic_table_knows_common_symbols() {
        for symbol in ["H", "He", "C", "N", "O", "Na", "Cl", "Cr", "Fe", "Xe", "Og"] {
            assert!(PeriodicTable.contains(symbol), "{symbol} should be known");
        }
    }

    #[test]
    fn periodic_table_rejects_unknown_symbols() {
        for symbol in ["Xx", "J", "Q", "h", "", "HE"] {
            assert!(!PeriodicTable.contains(symbol), "{symbol} should be unknown");
        }
    }

    #[test]
    fn set_and_slice_lookups() {
        let set: HashSet<String> = ["Al".to_string(), "O".to_string()].into_iter().collect();
        assert!(ElementLookup::contains(&set, "Al"));
        assert!(!ElementLookup::contains(&set, "S"));

        let slice: &[&str] = &["S", "O"];
        assert!(ElementLookup::contains(slice, "S"));
        assert!(!ElementLookup::contains(slice, "Al"));
    }
}
