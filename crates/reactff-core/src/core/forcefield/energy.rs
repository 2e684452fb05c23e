use super::potentials;
use super::terms::TorsionKind;
use crate::core::geometry;
use crate::core::models::Molecule;
use crate::core::models::molecule::UNCONNECTED;
use crate::core::tables;
use nalgebra::Point3;
use thiserror::Error;
use tracing::debug;

const PARTIAL_SCREENING_SCALE: f64 = 0.5;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EnergyError {
    #[error("Coordinate array length {got} does not match 3N = {expected}")]
    CoordinateLengthMismatch { expected: usize, got: usize },
}

/// Which dispersion correction the non-covalent part uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DispersionKind {
    /// Single-C6 damped r^-6 with an exponential overflow guard.
    #[default]
    ZeroDamped,
    /// Becke-Johnson damped C6 + C8 form.
    BeckeJohnson,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergyOptions {
    pub dispersion: DispersionKind,
    /// Functional-dependent global scale of the zero-damped dispersion.
    pub s6: f64,
}

impl Default for EnergyOptions {
    fn default() -> Self {
        Self {
            dispersion: DispersionKind::ZeroDamped,
            s6: 1.0,
        }
    }
}

/// Per-category energy contributions of a single evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EnergyBreakdown {
    pub stretch: f64,
    pub stretch13: f64,
    pub bend: f64,
    pub torsion: f64,
    pub inversion: f64,
    pub hbond: f64,
    pub halogen: f64,
    pub pauli: f64,
    pub electrostatic: f64,
    pub dispersion: f64,
}

impl EnergyBreakdown {
    pub fn total(&self) -> f64 {
        self.stretch
            + self.stretch13
            + self.bend
            + self.torsion
            + self.inversion
            + self.hbond
            + self.halogen
            + self.pauli
            + self.electrostatic
            + self.dispersion
    }
}

/// Total force-field energy at the given flattened 3N coordinates.
pub fn evaluate(
    molecule: &Molecule,
    coords: &[f64],
    options: &EnergyOptions,
) -> Result<f64, EnergyError> {
    Ok(evaluate_detailed(molecule, coords, options)?.total())
}

/// Like [`evaluate`], returning the per-category breakdown.
pub fn evaluate_detailed(
    molecule: &Molecule,
    coords: &[f64],
    options: &EnergyOptions,
) -> Result<EnergyBreakdown, EnergyError> {
    let positions = positions_from(molecule, coords)?;
    let mut breakdown = covalent_breakdown(molecule, &positions, None);
    noncovalent_breakdown(molecule, &positions, options, &mut breakdown);
    debug!(?breakdown, total = breakdown.total(), "Energy evaluated");
    Ok(breakdown)
}

pub(crate) fn positions_from(
    molecule: &Molecule,
    coords: &[f64],
) -> Result<Vec<Point3<f64>>, EnergyError> {
    let expected = 3 * molecule.num_atoms();
    if coords.len() != expected {
        return Err(EnergyError::CoordinateLengthMismatch {
            expected,
            got: coords.len(),
        });
    }
    Ok((0..molecule.num_atoms())
        .map(|i| Point3::new(coords[3 * i], coords[3 * i + 1], coords[3 * i + 2]))
        .collect())
}

/// Total energy with the stored covalent force constants optionally
/// replaced by `constants`, laid out as
/// [stretches, 1,3-stretches, bends, inversions]. The fitter's pure
/// objective goes through here.
pub(crate) fn total_energy_with_constants(
    molecule: &Molecule,
    positions: &[Point3<f64>],
    constants: Option<&[f64]>,
    options: &EnergyOptions,
) -> f64 {
    let mut breakdown = covalent_breakdown(molecule, positions, constants);
    noncovalent_breakdown(molecule, positions, options, &mut breakdown);
    breakdown.total()
}

fn covalent_breakdown(
    molecule: &Molecule,
    positions: &[Point3<f64>],
    constants: Option<&[f64]>,
) -> EnergyBreakdown {
    let mut breakdown = EnergyBreakdown::default();
    let mut offset = 0;

    for (n, term) in molecule.stretch_terms.iter().enumerate() {
        let dist = geometry::bond_length(&positions[term.i], &positions[term.j]);
        breakdown.stretch += match constants {
            Some(ks) => term.energy_with_k(dist, ks[offset + n]),
            None => term.energy(dist),
        };
    }
    offset += molecule.stretch_terms.len();

    for (n, term) in molecule.stretch13_terms.iter().enumerate() {
        let dist = geometry::bond_length(&positions[term.i], &positions[term.j]);
        breakdown.stretch13 += match constants {
            Some(ks) => term.energy_with_k(dist, ks[offset + n]),
            None => term.energy(dist),
        };
    }
    offset += molecule.stretch13_terms.len();

    for (n, term) in molecule.bend_terms.iter().enumerate() {
        let theta = geometry::bond_angle(&positions[term.a], &positions[term.b], &positions[term.c]);
        let damping = leg_damping(molecule, positions, term.a, term.b)
            * leg_damping(molecule, positions, term.c, term.b);
        breakdown.bend += match constants {
            Some(ks) => term.energy_with_k(theta, damping, ks[offset + n]),
            None => term.energy(theta, damping),
        };
    }
    offset += molecule.bend_terms.len();

    for (n, term) in molecule.inversion_terms.iter().enumerate() {
        let phi = geometry::out_of_plane_angle(
            &positions[term.center],
            &positions[term.n1],
            &positions[term.n2],
            &positions[term.n3],
        );
        let damping = leg_damping(molecule, positions, term.n1, term.center)
            * leg_damping(molecule, positions, term.n2, term.center)
            * leg_damping(molecule, positions, term.n3, term.center);
        breakdown.inversion += match constants {
            Some(ks) => term.energy_with_k(phi, damping, ks[offset + n]),
            None => term.energy(phi, damping),
        };
    }

    for term in &molecule.torsion_terms {
        let phi = geometry::dihedral_angle(
            &positions[term.a],
            &positions[term.b],
            &positions[term.c],
            &positions[term.d],
        );
        let damping = match term.kind {
            TorsionKind::Rigid => 1.0,
            TorsionKind::Rotatable => {
                leg_damping(molecule, positions, term.a, term.b)
                    * leg_damping(molecule, positions, term.b, term.c)
                    * leg_damping(molecule, positions, term.c, term.d)
            }
        };
        breakdown.torsion += term.energy(phi, damping);
    }

    breakdown
}

fn leg_damping(molecule: &Molecule, positions: &[Point3<f64>], i: usize, j: usize) -> f64 {
    let dist = geometry::bond_length(&positions[i], &positions[j]);
    let r_cov_sum = molecule.atom(i).covalent_radius() + molecule.atom(j).covalent_radius();
    potentials::distance_damping(dist, r_cov_sum)
}

fn noncovalent_breakdown(
    molecule: &Molecule,
    positions: &[Point3<f64>],
    options: &EnergyOptions,
    breakdown: &mut EnergyBreakdown,
) {
    for term in &molecule.hbond_terms {
        let dist_ah = geometry::bond_length(&positions[term.a], &positions[term.h]);
        let dist_bh = geometry::bond_length(&positions[term.b], &positions[term.h]);
        let dist_ab = geometry::bond_length(&positions[term.a], &positions[term.b]);
        // cos of the deviation from linearity at the bridging hydrogen.
        let cos_theta = -cos_at_vertex(positions, term.h, term.a, term.b);
        breakdown.hbond += term.energy(dist_ah, dist_bh, dist_ab, cos_theta);
    }

    for term in &molecule.halogen_terms {
        let dist_xy = geometry::bond_length(&positions[term.x], &positions[term.y]);
        let dist_xd = geometry::bond_length(&positions[term.x], &positions[term.d]);
        let dist_yd = geometry::bond_length(&positions[term.y], &positions[term.d]);
        let cos_theta = -cos_at_vertex(positions, term.x, term.y, term.d);
        breakdown.halogen += term.energy(dist_xy, dist_xd, dist_yd, cos_theta);
    }

    let separations_owned;
    let separations = match molecule.bond_separations() {
        Some(cached) => cached,
        None => {
            separations_owned = molecule.compute_bond_separations();
            &separations_owned
        }
    };

    let n = molecule.num_atoms();
    for i in 0..n {
        let atom_i = molecule.atom(i);
        let v_i = tables::valence_electrons(&atom_i.symbol);
        let c6_i = tables::c6_coefficient(&atom_i.symbol);
        for j in (i + 1)..n {
            let atom_j = molecule.atom(j);
            let sep = separations[i][j];
            if sep <= 2 {
                continue;
            }
            let screening = if sep <= 4 && sep != UNCONNECTED {
                PARTIAL_SCREENING_SCALE
            } else {
                1.0
            };

            let dist = geometry::bond_length(&positions[i], &positions[j]);
            let r_vdw_sum = atom_i.vdw_radius() + atom_j.vdw_radius();
            let v_j = tables::valence_electrons(&atom_j.symbol);

            breakdown.pauli += screening * potentials::pauli_repulsion(dist, v_i, v_j, r_vdw_sum);

            let coulomb_scale = if sep == 3 {
                potentials::ONE_FOUR_COULOMB_SCALE
            } else {
                1.0
            };
            breakdown.electrostatic +=
                coulomb_scale * potentials::coulomb(dist, atom_i.qm_charge, atom_j.qm_charge);

            let c6 = (c6_i * tables::c6_coefficient(&atom_j.symbol)).sqrt();
            breakdown.dispersion += screening
                * match options.dispersion {
                    DispersionKind::ZeroDamped => {
                        potentials::dispersion_zero_damped(dist, c6, r_vdw_sum, options.s6)
                    }
                    DispersionKind::BeckeJohnson => {
                        let c8 = 3.0 * c6 * (charge_moment(atom_i) * charge_moment(atom_j)).sqrt();
                        potentials::dispersion_becke_johnson(dist, c6, c8)
                    }
                };
        }
    }
}

fn cos_at_vertex(positions: &[Point3<f64>], vertex: usize, end1: usize, end2: usize) -> f64 {
    let u = positions[end1] - positions[vertex];
    let w = positions[end2] - positions[vertex];
    let denom = u.norm() * w.norm();
    if denom < 1e-30 {
        return 0.0;
    }
    u.dot(&w) / denom
}

fn charge_moment(atom: &crate::core::models::Atom) -> f64 {
    0.5 * (atom.number as f64).sqrt() * tables::r2r4(&atom.symbol)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::forcefield::terms::StretchTerm;
    use crate::core::models::Atom;

    const TOLERANCE: f64 = 1e-9;

    fn f64_approx_equal(a: f64, b: f64) -> bool {
        (a - b).abs() < TOLERANCE
    }

    fn diatomic(dist: f64) -> Molecule {
        let mut mol = Molecule::new("probe", 0);
        mol.add_atom(Atom::new("H", Point3::new(0.0, 0.0, 0.0)).unwrap());
        mol.add_atom(Atom::new("H", Point3::new(dist, 0.0, 0.0)).unwrap());
        mol.add_bond(0, 1).unwrap();
        mol.refresh_bond_separations();
        mol
    }

    #[test]
    fn rejects_wrong_coordinate_length() {
        let mol = diatomic(0.74);
        let err = evaluate(&mol, &[0.0; 5], &EnergyOptions::default()).unwrap_err();
        assert_eq!(
            err,
            EnergyError::CoordinateLengthMismatch {
                expected: 6,
                got: 5
            }
        );
    }

    #[test]
    fn two_atom_energy_equals_its_single_stretch_term() {
        let mut mol = diatomic(0.74);
        let term = StretchTerm {
            i: 0,
            j: 1,
            r0: 0.74,
            k: 0.5,
            exponent: 7.7,
        };
        mol.stretch_terms.push(term);

        let dist = 0.95;
        let coords = [0.0, 0.0, 0.0, dist, 0.0, 0.0];
        let total = evaluate(&mol, &coords, &EnergyOptions::default()).unwrap();
        assert!(f64_approx_equal(total, term.energy(dist)));
    }

    #[test]
    fn bonded_and_geminal_pairs_are_excluded_from_nonbonded_terms() {
        // Three atoms in a chain: separations 1 and 2 everywhere, so the
        // non-covalent part must vanish even with charges assigned.
        let mut mol = Molecule::new("probe", 0);
        for (i, x) in [0.0, 0.96, 1.8].iter().enumerate() {
            let mut atom = Atom::new("O", Point3::new(*x, 0.0, 0.0)).unwrap();
            atom.qm_charge = if i == 1 { 0.4 } else { -0.2 };
            mol.add_atom(atom);
        }
        mol.add_bond(0, 1).unwrap();
        mol.add_bond(1, 2).unwrap();
        mol.refresh_bond_separations();

        let coords = mol.cartesian_coordinates();
        let breakdown =
            evaluate_detailed(&mol, coords.as_slice(), &EnergyOptions::default()).unwrap();
        assert!(f64_approx_equal(breakdown.pauli, 0.0));
        assert!(f64_approx_equal(breakdown.electrostatic, 0.0));
        assert!(f64_approx_equal(breakdown.dispersion, 0.0));
    }

    #[test]
    fn one_four_pair_is_partially_screened() {
        // Four-atom chain: the terminal pair is 1,4 (separation 3).
        let mut mol = Molecule::new("probe", 0);
        for (i, x) in [0.0, 1.5, 3.0, 4.5].iter().enumerate() {
            let mut atom = Atom::new("C", Point3::new(*x, 0.1 * i as f64, 0.0)).unwrap();
            atom.qm_charge = 0.1;
            mol.add_atom(atom);
        }
        for i in 0..3 {
            mol.add_bond(i, i + 1).unwrap();
        }
        mol.refresh_bond_separations();

        let coords = mol.cartesian_coordinates();
        let screened =
            evaluate_detailed(&mol, coords.as_slice(), &EnergyOptions::default()).unwrap();

        // The same pair at separation >= 5 would be unscreened; compare
        // against the bare pair energies.
        let dist = geometry::bond_length(&mol.atom(0).position, &mol.atom(3).position);
        let bare_coulomb = potentials::coulomb(dist, 0.1, 0.1);
        assert!(f64_approx_equal(
            screened.electrostatic,
            potentials::ONE_FOUR_COULOMB_SCALE * bare_coulomb
        ));

        let r_vdw_sum = 2.0 * tables::vdw_radius("C");
        let v = tables::valence_electrons("C");
        let bare_pauli = potentials::pauli_repulsion(dist, v, v, r_vdw_sum);
        assert!(f64_approx_equal(screened.pauli, 0.5 * bare_pauli));
    }

    #[test]
    fn disconnected_pair_gets_full_nonbonded_interaction() {
        let mut mol = Molecule::new("probe", 0);
        let mut a = Atom::new("Ar", Point3::new(0.0, 0.0, 0.0)).unwrap();
        let mut b = Atom::new("Ar", Point3::new(4.0, 0.0, 0.0)).unwrap();
        a.qm_charge = 0.0;
        b.qm_charge = 0.0;
        mol.add_atom(a);
        mol.add_atom(b);
        mol.refresh_bond_separations();

        let coords = mol.cartesian_coordinates();
        let breakdown =
            evaluate_detailed(&mol, coords.as_slice(), &EnergyOptions::default()).unwrap();
        assert!(breakdown.pauli > 0.0);
        assert!(breakdown.dispersion < 0.0);
    }

    #[test]
    fn becke_johnson_dispersion_is_selectable_and_attractive() {
        let mut mol = Molecule::new("probe", 0);
        mol.add_atom(Atom::new("Ar", Point3::new(0.0, 0.0, 0.0)).unwrap());
        mol.add_atom(Atom::new("Ar", Point3::new(4.0, 0.0, 0.0)).unwrap());
        mol.refresh_bond_separations();

        let options = EnergyOptions {
            dispersion: DispersionKind::BeckeJohnson,
            s6: 1.0,
        };
        let coords = mol.cartesian_coordinates();
        let breakdown = evaluate_detailed(&mol, coords.as_slice(), &options).unwrap();
        assert!(breakdown.dispersion < 0.0);
    }

    #[test]
    fn total_energy_honors_constant_overrides() {
        // Bonded diatomic: the non-covalent part is screened out, so the
        // total is the stretch term alone and scales linearly with k.
        let mut mol = diatomic(0.74);
        mol.stretch_terms.push(StretchTerm {
            i: 0,
            j: 1,
            r0: 0.74,
            k: 0.5,
            exponent: 7.7,
        });
        let positions = vec![Point3::new(0.0, 0.0, 0.0), Point3::new(0.95, 0.0, 0.0)];
        let options = EnergyOptions::default();
        let stored = total_energy_with_constants(&mol, &positions, None, &options);
        let doubled = total_energy_with_constants(&mol, &positions, Some(&[1.0]), &options);
        assert!(f64_approx_equal(doubled, 2.0 * stored));
    }
}
