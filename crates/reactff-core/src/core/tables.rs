//! Immutable per-element data tables.
//!
//! All tables are compile-time `phf` maps keyed by element symbol. Lookups
//! never allocate; elements outside the tabulated range fall back to the
//! conservative defaults used by the empirical terms.

use phf::{Map, Set, phf_map, phf_set};

/// Elements counted as hydrogen-bond donors/acceptors.
pub static ELECTRONEGATIVE_SYMBOLS: Set<&'static str> = phf_set! {
    "N", "O", "F", "S", "Cl",
};

/// Elements treated as halogen-bond donors.
pub static HALOGEN_SYMBOLS: Set<&'static str> = phf_set! {
    "Cl", "Br", "I", "At",
};

static ATOMIC_NUMBERS: Map<&'static str, u32> = phf_map! {
    "H" => 1, "He" => 2, "Li" => 3, "Be" => 4, "B" => 5, "C" => 6,
    "N" => 7, "O" => 8, "F" => 9, "Ne" => 10, "Na" => 11, "Mg" => 12,
    "Al" => 13, "Si" => 14, "P" => 15, "S" => 16, "Cl" => 17, "Ar" => 18,
    "K" => 19, "Ca" => 20, "Sc" => 21, "Ti" => 22, "V" => 23, "Cr" => 24,
    "Mn" => 25, "Fe" => 26, "Co" => 27, "Ni" => 28, "Cu" => 29, "Zn" => 30,
    "Ga" => 31, "Ge" => 32, "As" => 33, "Se" => 34, "Br" => 35, "Kr" => 36,
    "Rb" => 37, "Sr" => 38, "Y" => 39, "Zr" => 40, "Nb" => 41, "Mo" => 42,
    "Tc" => 43, "Ru" => 44, "Rh" => 45, "Pd" => 46, "Ag" => 47, "Cd" => 48,
    "In" => 49, "Sn" => 50, "Sb" => 51, "Te" => 52, "I" => 53, "Xe" => 54,
    "Cs" => 55, "Ba" => 56, "La" => 57, "Hf" => 72, "Ta" => 73, "W" => 74,
    "Re" => 75, "Os" => 76, "Ir" => 77, "Pt" => 78, "Au" => 79, "Hg" => 80,
    "Tl" => 81, "Pb" => 82, "Bi" => 83, "Po" => 84, "At" => 85, "Rn" => 86,
};

static ATOMIC_MASSES: Map<&'static str, f64> = phf_map! {
    "H" => 1.00794, "He" => 4.002602, "Li" => 6.941, "Be" => 9.012182,
    "B" => 10.811, "C" => 12.0107, "N" => 14.0067, "O" => 15.9994,
    "F" => 18.9984032, "Ne" => 20.1797, "Na" => 22.98976928, "Mg" => 24.3050,
    "Al" => 26.9815386, "Si" => 28.0855, "P" => 30.973762, "S" => 32.065,
    "Cl" => 35.453, "Ar" => 39.948, "K" => 39.0983, "Ca" => 40.078,
    "Sc" => 44.955912, "Ti" => 47.867, "V" => 50.9415, "Cr" => 51.9961,
    "Mn" => 54.938045, "Fe" => 55.845, "Co" => 58.933195, "Ni" => 58.6934,
    "Cu" => 63.546, "Zn" => 65.38, "Ga" => 69.723, "Ge" => 72.64,
    "As" => 74.92160, "Se" => 78.96, "Br" => 79.904, "Kr" => 83.798,
    "Rb" => 85.4678, "Sr" => 87.62, "Y" => 88.90585, "Zr" => 91.224,
    "Nb" => 92.90638, "Mo" => 95.96, "Tc" => 98.0, "Ru" => 101.07,
    "Rh" => 102.90550, "Pd" => 106.42, "Ag" => 107.8682, "Cd" => 112.411,
    "In" => 114.818, "Sn" => 118.710, "Sb" => 121.760, "Te" => 127.60,
    "I" => 126.90447, "Xe" => 131.293, "Cs" => 132.9054519, "Ba" => 137.327,
    "La" => 138.90547, "Hf" => 178.49, "Ta" => 180.94788, "W" => 183.84,
    "Re" => 186.207, "Os" => 190.23, "Ir" => 192.217, "Pt" => 195.084,
    "Au" => 196.966569, "Hg" => 200.59, "Tl" => 204.3833, "Pb" => 207.2,
    "Bi" => 208.98040, "Po" => 209.0, "At" => 210.0, "Rn" => 222.0,
};

/// Covalent radii in Angstroms.
static COVALENT_RADII: Map<&'static str, f64> = phf_map! {
    "H" => 0.37, "He" => 0.32, "Li" => 1.34, "Be" => 0.90, "B" => 0.82,
    "C" => 0.77, "N" => 0.75, "O" => 0.73, "F" => 0.71, "Ne" => 0.69,
    "Na" => 1.54, "Mg" => 1.30, "Al" => 1.18, "Si" => 1.11, "P" => 1.06,
    "S" => 1.02, "Cl" => 0.99, "Ar" => 0.97, "K" => 1.96, "Ca" => 1.74,
    "Sc" => 1.44, "Ti" => 1.36, "V" => 1.25, "Cr" => 1.27, "Mn" => 1.39,
    "Fe" => 1.25, "Co" => 1.26, "Ni" => 1.21, "Cu" => 1.38, "Zn" => 1.31,
    "Ga" => 1.26, "Ge" => 1.22, "As" => 1.19, "Se" => 1.16, "Br" => 1.14,
    "Kr" => 1.10, "Rb" => 2.11, "Sr" => 1.92, "Y" => 1.62, "Zr" => 1.48,
    "Nb" => 1.37, "Mo" => 1.45, "Tc" => 1.56, "Ru" => 1.26, "Rh" => 1.35,
    "Pd" => 1.31, "Ag" => 1.53, "Cd" => 1.48, "In" => 1.44, "Sn" => 1.41,
    "Sb" => 1.38, "Te" => 1.35, "I" => 1.33, "Xe" => 1.30, "Cs" => 2.25,
    "Ba" => 1.98, "La" => 1.69, "Hf" => 1.50, "Ta" => 1.38, "W" => 1.46,
    "Re" => 1.59, "Os" => 1.28, "Ir" => 1.37, "Pt" => 1.28, "Au" => 1.44,
    "Hg" => 1.49, "Tl" => 1.48, "Pb" => 1.47, "Bi" => 1.46, "Po" => 1.50,
    "At" => 1.50, "Rn" => 1.45,
};

/// Van der Waals radii in Angstroms (Bondi set, common elements).
static VDW_RADII: Map<&'static str, f64> = phf_map! {
    "H" => 1.20, "He" => 1.40, "Li" => 1.82, "B" => 1.92, "C" => 1.70,
    "N" => 1.55, "O" => 1.52, "F" => 1.47, "Ne" => 1.54, "Na" => 2.27,
    "Mg" => 1.73, "Al" => 1.84, "Si" => 2.10, "P" => 1.80, "S" => 1.80,
    "Cl" => 1.75, "Ar" => 1.88, "K" => 2.75, "Ca" => 2.31, "Ni" => 1.63,
    "Cu" => 1.40, "Zn" => 1.39, "Ga" => 1.87, "Ge" => 2.11, "As" => 1.85,
    "Se" => 1.90, "Br" => 1.85, "Kr" => 2.02, "In" => 1.93, "Sn" => 2.17,
    "Sb" => 2.06, "Te" => 2.06, "I" => 1.98, "Xe" => 2.16, "Tl" => 1.96,
    "Pb" => 2.02, "Bi" => 2.07, "At" => 2.02,
};

/// Pauling electronegativities.
static ELECTRONEGATIVITIES: Map<&'static str, f64> = phf_map! {
    "H" => 2.20, "Li" => 0.98, "Be" => 1.57, "B" => 2.04, "C" => 2.55,
    "N" => 3.04, "O" => 3.44, "F" => 3.98, "Na" => 0.93, "Mg" => 1.31,
    "Al" => 1.61, "Si" => 1.90, "P" => 2.19, "S" => 2.58, "Cl" => 3.16,
    "K" => 0.82, "Ca" => 1.00, "Ti" => 1.54, "Cr" => 1.66, "Mn" => 1.55,
    "Fe" => 1.83, "Co" => 1.88, "Ni" => 1.91, "Cu" => 1.90, "Zn" => 1.65,
    "Ga" => 1.81, "Ge" => 2.01, "As" => 2.18, "Se" => 2.55, "Br" => 2.96,
    "Rb" => 0.82, "Sr" => 0.95, "Ag" => 1.93, "Sn" => 1.96, "Sb" => 2.05,
    "Te" => 2.10, "I" => 2.66, "Cs" => 0.79, "Ba" => 0.89, "Pt" => 2.28,
    "Au" => 2.54, "Hg" => 2.00, "Tl" => 1.62, "Pb" => 2.33, "Bi" => 2.02,
    "At" => 2.20,
};

/// Chemical hardness in eV (Pearson set, common elements).
static HARDNESS: Map<&'static str, f64> = phf_map! {
    "H" => 6.43, "Li" => 2.39, "Be" => 4.50, "B" => 4.01, "C" => 5.00,
    "N" => 7.23, "O" => 6.08, "F" => 7.01, "Na" => 2.30, "Mg" => 3.90,
    "Al" => 2.77, "Si" => 3.38, "P" => 4.88, "S" => 4.14, "Cl" => 4.68,
    "K" => 1.92, "Ca" => 2.87, "Fe" => 3.81, "Cu" => 3.25, "Zn" => 4.94,
    "Ge" => 3.40, "As" => 4.50, "Se" => 3.87, "Br" => 4.22, "Sn" => 3.05,
    "Sb" => 3.80, "Te" => 3.52, "I" => 3.69, "Pt" => 3.50, "Au" => 3.46,
    "Hg" => 5.54, "Pb" => 3.53,
};

/// Effective valence-electron counts for the Pauli repulsion term.
static VALENCE_ELECTRONS: Map<&'static str, f64> = phf_map! {
    "H" => 1.0, "He" => 2.0, "Li" => 1.0, "Be" => 2.0, "B" => 3.0,
    "C" => 4.0, "N" => 5.0, "O" => 6.0, "F" => 7.0, "Ne" => 8.0,
    "Na" => 1.0, "Mg" => 2.0, "Al" => 3.0, "Si" => 4.0, "P" => 5.0,
    "S" => 6.0, "Cl" => 7.0, "Ar" => 8.0, "K" => 1.0, "Ca" => 2.0,
    "Br" => 7.0, "I" => 7.0, "At" => 7.0,
};

/// Empirical C6 dispersion coefficients (common elements).
static C6_COEFFICIENTS: Map<&'static str, f64> = phf_map! {
    "H" => 0.14, "He" => 0.08, "Li" => 1.61, "Be" => 1.61, "B" => 3.13,
    "C" => 1.75, "N" => 1.23, "O" => 0.70, "F" => 0.75, "Ne" => 0.63,
    "Na" => 5.71, "Mg" => 5.71, "Al" => 10.79, "Si" => 9.23, "P" => 7.84,
    "S" => 5.57, "Cl" => 5.07, "Ar" => 4.61, "K" => 10.80, "Ca" => 10.80,
    "Br" => 12.47, "Kr" => 12.01, "I" => 31.50, "Xe" => 29.99,
};

/// Expectation-value ratios <r^4>/<r^2> used to scale C8 from C6.
static R2R4: Map<&'static str, f64> = phf_map! {
    "H" => 2.0073, "He" => 1.5664, "Li" => 5.0199, "Be" => 3.8538,
    "B" => 3.6445, "C" => 3.1049, "N" => 2.7118, "O" => 2.5936,
    "F" => 2.3883, "Ne" => 2.2152, "Na" => 6.5859, "Mg" => 5.4630,
    "Al" => 5.6522, "Si" => 4.8828, "P" => 4.2973, "S" => 4.0411,
    "Cl" => 3.7293, "Ar" => 3.4468, "K" => 7.9776, "Ca" => 7.0762,
    "Br" => 4.2439, "I" => 4.9940,
};

/// Per-element hydrogen-bond strength factors for acceptor atoms.
static HBOND_STRENGTHS: Map<&'static str, f64> = phf_map! {
    "N" => 0.8, "O" => 1.3, "F" => 1.0, "S" => 0.6, "Cl" => 0.5,
};

/// Per-element halogen-bond strength factors for donor halogens.
static HALOGEN_STRENGTHS: Map<&'static str, f64> = phf_map! {
    "Cl" => 0.3, "Br" => 0.6, "I" => 0.8, "At" => 0.9,
};

const DEFAULT_COVALENT_RADIUS: f64 = 1.50;
const DEFAULT_VDW_RADIUS: f64 = 2.00;
const DEFAULT_ELECTRONEGATIVITY: f64 = 1.50;
const DEFAULT_HARDNESS: f64 = 4.00;
const DEFAULT_VALENCE_ELECTRONS: f64 = 4.00;
const DEFAULT_C6: f64 = 5.00;
const DEFAULT_R2R4: f64 = 4.00;

/// Looks up the atomic number for an element symbol.
pub fn atomic_number(symbol: &str) -> Option<u32> {
    ATOMIC_NUMBERS.get(symbol).copied()
}

/// Looks up the atomic mass (AMU) for an element symbol.
pub fn atomic_mass(symbol: &str) -> Option<f64> {
    ATOMIC_MASSES.get(symbol).copied()
}

pub fn covalent_radius(symbol: &str) -> f64 {
    COVALENT_RADII
        .get(symbol)
        .copied()
        .unwrap_or(DEFAULT_COVALENT_RADIUS)
}

pub fn vdw_radius(symbol: &str) -> f64 {
    VDW_RADII
        .get(symbol)
        .copied()
        .unwrap_or(DEFAULT_VDW_RADIUS)
}

pub fn electronegativity(symbol: &str) -> f64 {
    ELECTRONEGATIVITIES
        .get(symbol)
        .copied()
        .unwrap_or(DEFAULT_ELECTRONEGATIVITY)
}

pub fn hardness(symbol: &str) -> f64 {
    HARDNESS.get(symbol).copied().unwrap_or(DEFAULT_HARDNESS)
}

pub fn valence_electrons(symbol: &str) -> f64 {
    VALENCE_ELECTRONS
        .get(symbol)
        .copied()
        .unwrap_or(DEFAULT_VALENCE_ELECTRONS)
}

pub fn c6_coefficient(symbol: &str) -> f64 {
    C6_COEFFICIENTS.get(symbol).copied().unwrap_or(DEFAULT_C6)
}

pub fn r2r4(symbol: &str) -> f64 {
    R2R4.get(symbol).copied().unwrap_or(DEFAULT_R2R4)
}

/// Hydrogen-bond strength factor; zero for elements that never accept.
pub fn hbond_strength(symbol: &str) -> f64 {
    HBOND_STRENGTHS.get(symbol).copied().unwrap_or(0.0)
}

/// Halogen-bond strength factor; zero for non-halogens.
pub fn halogen_strength(symbol: &str) -> f64 {
    HALOGEN_STRENGTHS.get(symbol).copied().unwrap_or(0.0)
}

pub fn is_electronegative(symbol: &str) -> bool {
    ELECTRONEGATIVE_SYMBOLS.contains(symbol)
}

pub fn is_halogen(symbol: &str) -> bool {
    HALOGEN_SYMBOLS.contains(symbol)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn atomic_number_known_elements() {
        assert_eq!(atomic_number("H"), Some(1));
        assert_eq!(atomic_number("C"), Some(6));
        assert_eq!(atomic_number("At"), Some(85));
    }

    #[test]
    fn atomic_number_unknown_symbol_is_none() {
        assert_eq!(atomic_number("Xx"), None);
        assert_eq!(atomic_number(""), None);
    }

    #[test]
    fn covalent_radius_falls_back_to_default() {
        assert_eq!(covalent_radius("C"), 0.77);
        assert_eq!(covalent_radius("Uuo"), 1.50);
    }

    #[test]
    fn electronegative_set_covers_common_acceptors() {
        for sym in ["N", "O", "F", "S", "Cl"] {
            assert!(is_electronegative(sym));
        }
        assert!(!is_electronegative("C"));
        assert!(!is_electronegative("Br"));
    }

    #[test]
    fn halogen_set_covers_heavy_halogens() {
        for sym in ["Cl", "Br", "I", "At"] {
            assert!(is_halogen(sym));
        }
        assert!(!is_halogen("F"));
    }

    #[test]
    fn strength_factors_are_zero_outside_their_sets() {
        assert!(hbond_strength("O") > 0.0);
        assert_eq!(hbond_strength("C"), 0.0);
        assert!(halogen_strength("I") > 0.0);
        assert_eq!(halogen_strength("F"), 0.0);
    }
}
