//! Refines covalent force constants against the QM Hessian.
//!
//! The objective is a pure function of an explicit force-constant vector
//! [stretches, 1,3-stretches, bends, inversions]: a central
//! finite-difference force-field Hessian over all 3N coordinates is
//! compared element-wise against the QM Hessian, and the summed squared
//! deviation is minimized with BFGS. Torsions and the non-covalent terms
//! are held fixed. The optimized constants are written back into the term
//! objects once, at the end; a non-converged result is still applied.

use crate::core::forcefield::energy::{self, EnergyOptions};
use crate::core::models::Molecule;
use nalgebra::{DMatrix, DVector, Point3};
use thiserror::Error;
use tracing::{debug, warn};

/// Finite-difference displacement for the force-field Hessian.
pub const COORDINATE_STEP: f64 = 1e-5;
/// Finite-difference displacement for the objective gradient.
const CONSTANT_STEP: f64 = 1e-5;
const GRADIENT_TOLERANCE: f64 = 1e-6;
const MAX_ITERATIONS: usize = 100;
/// Minimum curvature s.y accepted for a BFGS update.
const CURVATURE_FLOOR: f64 = 1e-14;
const ARMIJO_SLOPE: f64 = 1e-4;
const MIN_STEP_SCALE: f64 = 1e-12;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FitError {
    #[error("Molecule has no QM Hessian to fit against")]
    MissingHessian,
    #[error("QM Hessian is {rows}x{cols} but the molecule needs {expected}x{expected}")]
    HessianShapeMismatch {
        rows: usize,
        cols: usize,
        expected: usize,
    },
    #[error("Molecule has no adjustable force constants")]
    NoParameters,
}

/// Outcome of a fit; non-convergence is reported, not an error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitReport {
    pub converged: bool,
    pub iterations: usize,
    /// Final summed squared Hessian deviation.
    pub cost: f64,
}

/// Fits the stretch/1,3-stretch/bend/inversion force constants and writes
/// the final iterate back into the molecule's term objects.
pub fn fit_force_constants(molecule: &mut Molecule) -> Result<FitReport, FitError> {
    let expected = 3 * molecule.num_atoms();
    let qm_hessian = molecule.hessian().ok_or(FitError::MissingHessian)?;
    if qm_hessian.nrows() != expected || qm_hessian.ncols() != expected {
        return Err(FitError::HessianShapeMismatch {
            rows: qm_hessian.nrows(),
            cols: qm_hessian.ncols(),
            expected,
        });
    }
    let qm_hessian = qm_hessian.clone();

    let k0 = collect_constants(molecule);
    if k0.is_empty() {
        return Err(FitError::NoParameters);
    }
    let reference_coords: Vec<f64> = molecule.cartesian_coordinates().iter().copied().collect();
    let options = EnergyOptions::default();

    let mut k = k0;
    let report = {
        let objective = |k: &DVector<f64>| -> f64 {
            let ff = force_field_hessian(molecule, &reference_coords, k.as_slice(), &options);
            (ff - &qm_hessian).iter().map(|d| d * d).sum()
        };
        bfgs_minimize(&objective, &mut k)
    };

    if !report.converged {
        warn!(
            iterations = report.iterations,
            cost = report.cost,
            "Force-constant fit did not converge; applying final iterate anyway"
        );
    }
    write_back(molecule, k.as_slice());
    Ok(report)
}

fn bfgs_minimize<F>(objective: &F, k: &mut DVector<f64>) -> FitReport
where
    F: Fn(&DVector<f64>) -> f64,
{
    let dim = k.len();
    let mut inverse_hessian = DMatrix::<f64>::identity(dim, dim);
    let mut cost = objective(k);
    let mut gradient = finite_difference_gradient(objective, k);

    // Counts completed quasi-Newton steps, not loop entries.
    let mut converged = false;
    let mut iterations = 0;
    for _ in 0..MAX_ITERATIONS {
        if gradient.amax() < GRADIENT_TOLERANCE {
            converged = true;
            break;
        }

        let direction = -(&inverse_hessian * &gradient);
        let slope = gradient.dot(&direction);

        let mut alpha = 1.0;
        let mut next_k;
        let mut next_cost;
        loop {
            next_k = &*k + &direction * alpha;
            next_cost = objective(&next_k);
            if next_cost <= cost + ARMIJO_SLOPE * alpha * slope || alpha < MIN_STEP_SCALE {
                break;
            }
            alpha *= 0.5;
        }
        if alpha < MIN_STEP_SCALE {
            // Line search stalled; accept what we have.
            break;
        }

        let next_gradient = finite_difference_gradient(objective, &next_k);
        let s = &next_k - &*k;
        let y = &next_gradient - &gradient;
        let curvature = s.dot(&y);
        if curvature > CURVATURE_FLOOR {
            let rho = 1.0 / curvature;
            let identity = DMatrix::<f64>::identity(dim, dim);
            let left = &identity - rho * &s * y.transpose();
            let right = &identity - rho * &y * s.transpose();
            inverse_hessian = &left * inverse_hessian * &right + rho * &s * s.transpose();
        } else {
            debug!(curvature, "Skipping BFGS update with non-positive curvature");
        }

        *k = next_k;
        cost = next_cost;
        gradient = next_gradient;
        iterations += 1;
    }

    FitReport {
        converged,
        iterations,
        cost,
    }
}

fn finite_difference_gradient<F>(objective: &F, k: &DVector<f64>) -> DVector<f64>
where
    F: Fn(&DVector<f64>) -> f64,
{
    let mut gradient = DVector::zeros(k.len());
    for p in 0..k.len() {
        let mut plus = k.clone();
        let mut minus = k.clone();
        plus[p] += CONSTANT_STEP;
        minus[p] -= CONSTANT_STEP;
        gradient[p] = (objective(&plus) - objective(&minus)) / (2.0 * CONSTANT_STEP);
    }
    gradient
}

/// Central finite-difference Hessian of the force-field energy at the
/// reference coordinates, with the covalent constants taken from `k`.
pub(crate) fn force_field_hessian(
    molecule: &Molecule,
    coords: &[f64],
    k: &[f64],
    options: &EnergyOptions,
) -> DMatrix<f64> {
    let n3 = coords.len();
    let h = COORDINATE_STEP;
    let energy_at = |coords: &[f64]| -> f64 {
        let positions: Vec<Point3<f64>> = coords
            .chunks_exact(3)
            .map(|c| Point3::new(c[0], c[1], c[2]))
            .collect();
        energy::total_energy_with_constants(molecule, &positions, Some(k), options)
    };

    let base = energy_at(coords);
    let mut hessian = DMatrix::zeros(n3, n3);
    let mut displaced = coords.to_vec();

    for p in 0..n3 {
        displaced[p] += h;
        let e_plus = energy_at(&displaced);
        displaced[p] -= 2.0 * h;
        let e_minus = energy_at(&displaced);
        displaced[p] += h;
        hessian[(p, p)] = (e_plus - 2.0 * base + e_minus) / (h * h);
    }

    for p in 0..n3 {
        for q in (p + 1)..n3 {
            displaced[p] += h;
            displaced[q] += h;
            let e_pp = energy_at(&displaced);
            displaced[q] -= 2.0 * h;
            let e_pm = energy_at(&displaced);
            displaced[p] -= 2.0 * h;
            let e_mm = energy_at(&displaced);
            displaced[q] += 2.0 * h;
            let e_mp = energy_at(&displaced);
            displaced[p] += h;
            displaced[q] -= h;

            let value = (e_pp - e_pm - e_mp + e_mm) / (4.0 * h * h);
            hessian[(p, q)] = value;
            hessian[(q, p)] = value;
        }
    }
    hessian
}

fn collect_constants(molecule: &Molecule) -> DVector<f64> {
    let ks: Vec<f64> = molecule
        .stretch_terms
        .iter()
        .map(|t| t.k)
        .chain(molecule.stretch13_terms.iter().map(|t| t.k))
        .chain(molecule.bend_terms.iter().map(|t| t.k))
        .chain(molecule.inversion_terms.iter().map(|t| t.k))
        .collect();
    DVector::from_vec(ks)
}

fn write_back(molecule: &mut Molecule, k: &[f64]) {
    let mut values = k.iter().copied();
    for term in &mut molecule.stretch_terms {
        term.k = values.next().unwrap_or(term.k);
    }
    for term in &mut molecule.stretch13_terms {
        term.k = values.next().unwrap_or(term.k);
    }
    for term in &mut molecule.bend_terms {
        term.k = values.next().unwrap_or(term.k);
    }
    for term in &mut molecule.inversion_terms {
        term.k = values.next().unwrap_or(term.k);
    }
}
