//! Infers the covalent and non-covalent topology of a molecule.
//!
//! Bonds come from a QM bond-order matrix when one with any nonzero entry
//! is supplied, otherwise from the covalent-radius heuristic; exactly one
//! branch runs per molecule. Angles are built from bond pairs sharing one
//! atom, dihedrals from angle pairs sharing an edge, threefold centers
//! from angle triples with a common vertex, and hydrogen/halogen-bond
//! triples from the tagged donor/acceptor index lists.

use crate::core::models::{Molecule, TopologyError};
use nalgebra::DMatrix;
use tracing::{debug, warn};

/// Minimum bond order counted as a covalent bond.
pub const DEFAULT_BOND_ORDER_CUTOFF: f64 = 0.45;
/// Scale on the covalent-radius sum in the distance heuristic.
pub const DEFAULT_DISTANCE_FACTOR: f64 = 1.3;

/// Populates bonds, angles, dihedrals, threefold centers, and the
/// hydrogen/halogen-bond triples of the molecule, then refreshes the
/// bond-separation cache.
///
/// Re-running on an already populated molecule is a no-op thanks to the
/// idempotent topology inserts.
pub fn build_topology(
    molecule: &mut Molecule,
    bond_orders: Option<&DMatrix<f64>>,
    cutoff: f64,
    distance_factor: f64,
) -> Result<(), TopologyError> {
    infer_bonds(molecule, bond_orders, cutoff, distance_factor)?;
    infer_angles(molecule)?;
    infer_dihedrals(molecule)?;
    infer_threefolds(molecule)?;
    infer_hbond_triples(molecule, distance_factor)?;
    infer_halogen_triples(molecule)?;
    molecule.refresh_bond_separations();
    debug!(
        bonds = molecule.bonds().len(),
        angles = molecule.angles().len(),
        dihedrals = molecule.dihedrals().len(),
        threefolds = molecule.threefolds().len(),
        hbond_triples = molecule.hbond_triples().len(),
        halogen_triples = molecule.halogen_triples().len(),
        "Topology built"
    );
    Ok(())
}

fn infer_bonds(
    molecule: &mut Molecule,
    bond_orders: Option<&DMatrix<f64>>,
    cutoff: f64,
    distance_factor: f64,
) -> Result<(), TopologyError> {
    let n = molecule.num_atoms();

    let usable_orders = bond_orders.filter(|orders| {
        if orders.nrows() != n || orders.ncols() != n {
            warn!(
                rows = orders.nrows(),
                cols = orders.ncols(),
                atoms = n,
                "Bond-order matrix shape mismatch; falling back to covalent radii"
            );
            return false;
        }
        orders.iter().any(|&order| order != 0.0)
    });

    if let Some(orders) = usable_orders {
        for i in 0..n {
            for j in (i + 1)..n {
                if orders[(i, j)] >= cutoff {
                    molecule.add_bond(i, j)?;
                }
            }
        }
    } else {
        for i in 0..n {
            for j in (i + 1)..n {
                let r_cov_sum =
                    molecule.atom(i).covalent_radius() + molecule.atom(j).covalent_radius();
                if molecule.distance(i, j) <= distance_factor * r_cov_sum {
                    molecule.add_bond(i, j)?;
                }
            }
        }
    }
    Ok(())
}

fn infer_angles(molecule: &mut Molecule) -> Result<(), TopologyError> {
    let bonds = molecule.bonds().to_vec();
    for (n, b1) in bonds.iter().enumerate() {
        for b2 in bonds.iter().skip(n + 1) {
            // The four ways two distinct bonds can share one atom.
            let angle = if b1.i == b2.i {
                Some((b1.j, b1.i, b2.j))
            } else if b1.i == b2.j {
                Some((b1.j, b1.i, b2.i))
            } else if b1.j == b2.i {
                Some((b1.i, b1.j, b2.j))
            } else if b1.j == b2.j {
                Some((b1.i, b1.j, b2.i))
            } else {
                None
            };
            if let Some((a, b, c)) = angle {
                molecule.add_angle(a, b, c)?;
            }
        }
    }
    Ok(())
}

fn infer_dihedrals(molecule: &mut Molecule) -> Result<(), TopologyError> {
    let angles = molecule.angles().to_vec();
    for (n, a1) in angles.iter().enumerate() {
        for a2 in angles.iter().skip(n + 1) {
            // The four adjacency orientations of two angles sharing an edge.
            let chain = if a1.b == a2.a && a1.c == a2.b {
                Some((a1.a, a1.b, a1.c, a2.c))
            } else if a1.b == a2.c && a1.c == a2.b {
                Some((a1.a, a1.b, a1.c, a2.a))
            } else if a1.b == a2.a && a1.a == a2.b {
                Some((a1.c, a1.b, a1.a, a2.c))
            } else if a1.b == a2.c && a1.a == a2.b {
                Some((a1.c, a1.b, a1.a, a2.a))
            } else {
                None
            };
            if let Some((a, b, c, d)) = chain {
                // Three-membered rings fold the chain back on itself.
                if a != d && a != c && b != d {
                    molecule.add_dihedral(a, b, c, d)?;
                }
            }
        }
    }
    Ok(())
}

fn infer_threefolds(molecule: &mut Molecule) -> Result<(), TopologyError> {
    let angles = molecule.angles().to_vec();
    for (n1, a1) in angles.iter().enumerate() {
        for (n2, a2) in angles.iter().enumerate().skip(n1 + 1) {
            for a3 in angles.iter().skip(n2 + 1) {
                if a1.b != a2.b || a2.b != a3.b {
                    continue;
                }
                // The three angles must cover exactly the three pairs of a
                // 3-atom neighbour set around the shared vertex.
                let mut neighbours = vec![a1.a, a1.c, a2.a, a2.c, a3.a, a3.c];
                neighbours.sort_unstable();
                neighbours.dedup();
                if neighbours.len() != 3 {
                    continue;
                }
                let pairs = [(a1.a, a1.c), (a2.a, a2.c), (a3.a, a3.c)];
                if pairs[0] != pairs[1] && pairs[1] != pairs[2] && pairs[0] != pairs[2] {
                    molecule.add_threefold(a1.b, neighbours[0], neighbours[1], neighbours[2])?;
                }
            }
        }
    }
    Ok(())
}

fn infer_hbond_triples(
    molecule: &mut Molecule,
    distance_factor: f64,
) -> Result<(), TopologyError> {
    let hydrogens = molecule.hydrogens().to_vec();
    let acceptors = molecule.electronegatives().to_vec();
    for &h in &hydrogens {
        for &a in &acceptors {
            let r_cov_sum = molecule.atom(a).covalent_radius() + molecule.atom(h).covalent_radius();
            if molecule.distance(a, h) > distance_factor * r_cov_sum {
                continue;
            }
            for &b in &acceptors {
                if b == a || molecule.contains_bond(h, b) {
                    continue;
                }
                let r_vdw_sum = molecule.atom(h).vdw_radius() + molecule.atom(b).vdw_radius();
                if molecule.distance(h, b) <= r_vdw_sum {
                    molecule.add_hbond_triple(a, h, b)?;
                }
            }
        }
    }
    Ok(())
}

fn infer_halogen_triples(molecule: &mut Molecule) -> Result<(), TopologyError> {
    let halogens = molecule.halogens().to_vec();
    let donors = molecule.electronegatives().to_vec();
    let bonds = molecule.bonds().to_vec();
    for &x in &halogens {
        for bond in bonds.iter().filter(|bond| bond.contains(x)) {
            let y = bond.partner(x).unwrap_or(x);
            for &d in &donors {
                if d == x || d == y || molecule.contains_bond(x, d) {
                    continue;
                }
                let r_vdw_sum = molecule.atom(x).vdw_radius() + molecule.atom(d).vdw_radius();
                if molecule.distance(x, d) <= r_vdw_sum {
                    molecule.add_halogen_triple(x, y, d)?;
                }
            }
        }
    }
    Ok(())
}
