//! Seed force constants from a QM Cartesian Hessian.
//!
//! For each internal coordinate, a 3N displacement direction is built from
//! the coordinate's analytic gradient with respect to the involved atoms,
//! normalized, and projected through the Hessian as a Rayleigh quotient
//! k = v^T H v. Degenerate (zero-norm) directions yield `None` and the
//! caller falls back to a default constant.

use crate::core::models::{Molecule, Threefold};
use nalgebra::{DVector, Vector3};
use tracing::warn;

/// Extracted constants below this value (atomic units) suggest a spurious
/// soft mode and are flagged.
pub const SOFT_MODE_THRESHOLD: f64 = 0.002;

/// Force constant of the stretch between atoms `i` and `j`.
pub fn stretch_constant(molecule: &Molecule, i: usize, j: usize) -> Option<f64> {
    let u = molecule.atom(i).position - molecule.atom(j).position;
    let norm = u.norm();
    if norm < 1e-12 {
        warn!(i, j, "Coincident atoms give a degenerate stretch direction");
        return None;
    }
    let unit = u / norm;

    let mut v = DVector::zeros(3 * molecule.num_atoms());
    set_block(&mut v, i, &unit);
    set_block(&mut v, j, &(-unit));
    rayleigh_quotient(molecule, v)
}

/// Force constant of the bend a-b-c with vertex `b`.
///
/// The displacement moves the two end atoms along the in-plane
/// perpendiculars of their bonds; the vertex stays fixed.
pub fn bend_constant(molecule: &Molecule, a: usize, b: usize, c: usize) -> Option<f64> {
    let u = molecule.atom(a).position - molecule.atom(b).position;
    let w = molecule.atom(c).position - molecule.atom(b).position;
    let normal = u.cross(&w);
    if normal.norm() < 1e-12 {
        warn!(a, b, c, "Collinear angle gives a degenerate bend direction");
        return None;
    }
    let p_a = normal.cross(&u).normalize();
    let p_c = w.cross(&normal).normalize();

    let mut v = DVector::zeros(3 * molecule.num_atoms());
    set_block(&mut v, a, &p_a);
    set_block(&mut v, c, &p_c);
    rayleigh_quotient(molecule, v)
}

/// Force constant of the out-of-plane coordinate at a threefold center.
///
/// Each terminal moves along the normal of the plane spanned by the other
/// two terminals, oriented towards itself; the center stays fixed.
pub fn inversion_constant(molecule: &Molecule, threefold: &Threefold) -> Option<f64> {
    let center = molecule.atom(threefold.center).position;
    let terminals = [threefold.n1, threefold.n2, threefold.n3];

    let mut v = DVector::zeros(3 * molecule.num_atoms());
    for t in 0..3 {
        let this = terminals[t];
        let other1 = terminals[(t + 1) % 3];
        let other2 = terminals[(t + 2) % 3];
        let normal = (molecule.atom(other1).position - center)
            .cross(&(molecule.atom(other2).position - center));
        let norm = normal.norm();
        if norm < 1e-12 {
            warn!(
                center = threefold.center,
                "Collinear neighbours give a degenerate inversion direction"
            );
            return None;
        }
        let mut direction = normal / norm;
        if direction.dot(&(molecule.atom(this).position - center)) < 0.0 {
            direction = -direction;
        }
        set_block(&mut v, this, &direction);
    }
    rayleigh_quotient(molecule, v)
}

fn set_block(v: &mut DVector<f64>, atom: usize, direction: &Vector3<f64>) {
    v[3 * atom] = direction.x;
    v[3 * atom + 1] = direction.y;
    v[3 * atom + 2] = direction.z;
}

fn rayleigh_quotient(molecule: &Molecule, v: DVector<f64>) -> Option<f64> {
    let hessian = molecule.hessian()?;
    let n3 = 3 * molecule.num_atoms();
    if hessian.nrows() != n3 || hessian.ncols() != n3 {
        warn!(
            expected = n3,
            rows = hessian.nrows(),
            cols = hessian.ncols(),
            "Hessian shape mismatch; skipping force-constant extraction"
        );
        return None;
    }

    let norm = v.norm();
    if norm < 1e-12 {
        warn!("Zero-norm displacement vector; force constant undefined");
        return None;
    }
    let v = v / norm;
    let k = (hessian * &v).dot(&v);
    if k < SOFT_MODE_THRESHOLD {
        warn!(k, "Extracted force constant is very small; possible spurious soft mode");
    }
    Some(k)
}
