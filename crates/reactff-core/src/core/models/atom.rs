use crate::core::tables;
use nalgebra::Point3;
use thiserror::Error;

/// Error returned when an element symbol is not present in the data tables.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown element symbol '{symbol}'")]
pub struct UnknownElementError {
    /// The symbol that failed to resolve.
    pub symbol: String,
}

/// Represents a single atom in a molecular structure.
///
/// The atomic number and mass are derived from the element symbol at
/// construction time; the partial charge is mutable because it is assigned
/// later from quantum-mechanical population analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// The element symbol (e.g., "C", "Cl").
    pub symbol: String,
    /// The atomic number derived from the symbol.
    pub number: u32,
    /// The atomic mass in AMU derived from the symbol.
    pub mass: f64,
    /// The 3D coordinates of the atom in Angstroms.
    pub position: Point3<f64>,
    /// The QM partial charge in elementary charge units.
    pub qm_charge: f64,
}

impl Atom {
    /// Creates a new `Atom` at the given position.
    ///
    /// Fails if the element symbol is not in the data tables; the partial
    /// charge starts at zero and can be assigned afterwards.
    pub fn new(symbol: &str, position: Point3<f64>) -> Result<Self, UnknownElementError> {
        let number = tables::atomic_number(symbol).ok_or_else(|| UnknownElementError {
            symbol: symbol.to_string(),
        })?;
        let mass = tables::atomic_mass(symbol).ok_or_else(|| UnknownElementError {
            symbol: symbol.to_string(),
        })?;
        Ok(Self {
            symbol: symbol.to_string(),
            number,
            mass,
            position,
            qm_charge: 0.0,
        })
    }

    /// Covalent radius of this atom's element in Angstroms.
    pub fn covalent_radius(&self) -> f64 {
        tables::covalent_radius(&self.symbol)
    }

    /// Van der Waals radius of this atom's element in Angstroms.
    pub fn vdw_radius(&self) -> f64 {
        tables::vdw_radius(&self.symbol)
    }

    pub fn is_hydrogen(&self) -> bool {
        self.number == 1
    }

    pub fn is_electronegative(&self) -> bool {
        tables::is_electronegative(&self.symbol)
    }

    pub fn is_halogen(&self) -> bool {
        tables::is_halogen(&self.symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn atom_new_derives_number_and_mass() {
        let atom = Atom::new("C", Point3::origin()).unwrap();
        assert_eq!(atom.number, 6);
        assert!((atom.mass - 12.0107).abs() < 1e-12);
        assert_eq!(atom.qm_charge, 0.0);
    }

    #[test]
    fn atom_new_rejects_unknown_symbol() {
        let err = Atom::new("Zz", Point3::origin()).unwrap_err();
        assert_eq!(err.symbol, "Zz");
    }

    #[test]
    fn atom_classification_predicates() {
        let h = Atom::new("H", Point3::origin()).unwrap();
        let o = Atom::new("O", Point3::origin()).unwrap();
        let br = Atom::new("Br", Point3::origin()).unwrap();
        assert!(h.is_hydrogen());
        assert!(!h.is_electronegative());
        assert!(o.is_electronegative());
        assert!(!o.is_halogen());
        assert!(br.is_halogen());
        assert!(!br.is_electronegative());
    }
}
