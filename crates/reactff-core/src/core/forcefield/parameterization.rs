//! Builds the potential-term lists from a populated topology.
//!
//! Equilibrium values come from the reference geometry; force constants
//! come from the QM Hessian via [`extraction`], falling back to per-class
//! defaults (with a warning) when no Hessian is available or a projection
//! direction is degenerate.

use super::extraction;
use super::potentials;
use super::terms::{
    AngleKind, BendTerm, HBondTerm, HalogenTerm, InversionTerm, StretchTerm, TorsionKind,
    TorsionTerm,
};
use crate::core::geometry;
use crate::core::models::Molecule;
use crate::core::tables;
use tracing::warn;

pub const DEFAULT_STRETCH_CONSTANT: f64 = 0.5;
pub const DEFAULT_BEND_CONSTANT: f64 = 0.3;
pub const DEFAULT_INVERSION_CONSTANT: f64 = 0.3;
pub const DEFAULT_TORSION_CONSTANT: f64 = 0.1;

/// Bridges shorter than this fraction of the covalent-radius sum are
/// treated as multiple bonds and get the rigid torsion form.
pub const MULTIPLE_BOND_FACTOR: f64 = 0.87;

/// Rebuilds all potential-term lists of the molecule from its topology,
/// current geometry, and (if present) QM Hessian.
pub fn assign_parameters(molecule: &mut Molecule) {
    molecule.stretch_terms = stretch_terms(molecule);
    molecule.stretch13_terms = stretch13_terms(molecule);
    molecule.bend_terms = bend_terms(molecule);
    molecule.torsion_terms = torsion_terms(molecule);
    molecule.inversion_terms = inversion_terms(molecule);
    molecule.hbond_terms = hbond_terms(molecule);
    molecule.halogen_terms = halogen_terms(molecule);
}

fn pair_exponent(molecule: &Molecule, i: usize, j: usize) -> f64 {
    let sym_i = &molecule.atom(i).symbol;
    let sym_j = &molecule.atom(j).symbol;
    potentials::pair_exponent(
        tables::hardness(sym_i),
        tables::hardness(sym_j),
        tables::electronegativity(sym_i),
        tables::electronegativity(sym_j),
    )
}

fn extracted_or_default(k: Option<f64>, default: f64, what: &str) -> f64 {
    match k {
        Some(k) => k,
        None => {
            warn!(default, "No {what} force constant extracted; using default");
            default
        }
    }
}

fn stretch_terms(molecule: &Molecule) -> Vec<StretchTerm> {
    molecule
        .bonds()
        .iter()
        .map(|bond| StretchTerm {
            i: bond.i,
            j: bond.j,
            r0: molecule.distance(bond.i, bond.j),
            k: extracted_or_default(
                extraction::stretch_constant(molecule, bond.i, bond.j),
                DEFAULT_STRETCH_CONSTANT,
                "stretch",
            ),
            exponent: pair_exponent(molecule, bond.i, bond.j),
        })
        .collect()
}

fn stretch13_terms(molecule: &Molecule) -> Vec<StretchTerm> {
    molecule
        .angles()
        .iter()
        .map(|angle| StretchTerm {
            i: angle.a,
            j: angle.c,
            r0: molecule.distance(angle.a, angle.c),
            k: extracted_or_default(
                extraction::stretch_constant(molecule, angle.a, angle.c),
                DEFAULT_STRETCH_CONSTANT,
                "1,3-stretch",
            ),
            exponent: pair_exponent(molecule, angle.a, angle.c),
        })
        .collect()
}

fn bend_terms(molecule: &Molecule) -> Vec<BendTerm> {
    molecule
        .angles()
        .iter()
        .map(|angle| {
            let theta0 = geometry::bond_angle(
                &molecule.atom(angle.a).position,
                &molecule.atom(angle.b).position,
                &molecule.atom(angle.c).position,
            );
            BendTerm {
                a: angle.a,
                b: angle.b,
                c: angle.c,
                theta0,
                k: extracted_or_default(
                    extraction::bend_constant(molecule, angle.a, angle.b, angle.c),
                    DEFAULT_BEND_CONSTANT,
                    "bend",
                ),
                kind: AngleKind::from_equilibrium(theta0),
            }
        })
        .collect()
}

fn torsion_terms(molecule: &Molecule) -> Vec<TorsionTerm> {
    molecule
        .dihedrals()
        .iter()
        .map(|dihedral| {
            let phi0 = geometry::dihedral_angle(
                &molecule.atom(dihedral.a).position,
                &molecule.atom(dihedral.b).position,
                &molecule.atom(dihedral.c).position,
                &molecule.atom(dihedral.d).position,
            );
            let bridge_dist = molecule.distance(dihedral.b, dihedral.c);
            let r_cov_sum = molecule.atom(dihedral.b).covalent_radius()
                + molecule.atom(dihedral.c).covalent_radius();
            let kind = if bridge_dist < MULTIPLE_BOND_FACTOR * r_cov_sum {
                TorsionKind::Rigid
            } else {
                TorsionKind::Rotatable
            };
            TorsionTerm {
                a: dihedral.a,
                b: dihedral.b,
                c: dihedral.c,
                d: dihedral.d,
                phi0,
                k: DEFAULT_TORSION_CONSTANT,
                kind,
            }
        })
        .collect()
}

fn inversion_terms(molecule: &Molecule) -> Vec<InversionTerm> {
    molecule
        .threefolds()
        .iter()
        .map(|threefold| {
            let phi0 = geometry::out_of_plane_angle(
                &molecule.atom(threefold.center).position,
                &molecule.atom(threefold.n1).position,
                &molecule.atom(threefold.n2).position,
                &molecule.atom(threefold.n3).position,
            );
            InversionTerm {
                center: threefold.center,
                n1: threefold.n1,
                n2: threefold.n2,
                n3: threefold.n3,
                phi0,
                k: extracted_or_default(
                    extraction::inversion_constant(molecule, threefold),
                    DEFAULT_INVERSION_CONSTANT,
                    "inversion",
                ),
                kind: AngleKind::from_equilibrium(phi0),
            }
        })
        .collect()
}

fn hbond_terms(molecule: &Molecule) -> Vec<HBondTerm> {
    molecule
        .hbond_triples()
        .iter()
        .map(|triple| HBondTerm {
            a: triple.a,
            h: triple.h,
            b: triple.b,
            strength_a: tables::hbond_strength(&molecule.atom(triple.a).symbol),
            strength_b: tables::hbond_strength(&molecule.atom(triple.b).symbol),
            r_cut: molecule.atom(triple.a).vdw_radius() + molecule.atom(triple.b).vdw_radius(),
        })
        .collect()
}

fn halogen_terms(molecule: &Molecule) -> Vec<HalogenTerm> {
    molecule
        .halogen_triples()
        .iter()
        .map(|triple| HalogenTerm {
            x: triple.x,
            y: triple.y,
            d: triple.d,
            strength_x: tables::halogen_strength(&molecule.atom(triple.x).symbol),
            strength_d: tables::hbond_strength(&molecule.atom(triple.d).symbol),
            r_cut: molecule.atom(triple.x).vdw_radius() + molecule.atom(triple.d).vdw_radius(),
        })
        .collect()
}
