//! Reconstructs Cartesian coordinates from an interatomic distance matrix.
//!
//! Sequential placement: atom 0 sits at the origin and atom 1 on the
//! positive x-axis; every later atom is classified against the already
//! placed reference atoms as collinear, planar, or out-of-plane, and its
//! coordinates come from the corresponding closed-form solution. The
//! classification uses one shared tolerance ladder (exact, then 1e-10,
//! then 1e-5). The input matrix may be only approximately embeddable, e.g.
//! a linear interpolation of two real distance matrices; reconstruction is
//! best-effort and the residual is reported as a diagnostic.

use crate::core::models::Molecule;
use nalgebra::{DMatrix, Point3};
use thiserror::Error;
use tracing::{debug, warn};

pub const FINE_TOLERANCE: f64 = 1e-10;
pub const COARSE_TOLERANCE: f64 = 1e-5;

/// The ladder every numeric-coincidence test walks, tightest first.
const TOLERANCE_LADDER: [f64; 3] = [0.0, FINE_TOLERANCE, COARSE_TOLERANCE];

#[derive(Debug, Error, PartialEq)]
pub enum EmbedError {
    #[error("Distance matrix is {rows}x{cols} but the molecule has {atoms} atoms")]
    SizeMismatch {
        rows: usize,
        cols: usize,
        atoms: usize,
    },
    #[error("Negative square-root argument {value:.3e} while placing atom {atom}")]
    Domain { atom: usize, value: f64 },
}

/// Reference atoms accumulated while the placement advances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    /// Everything placed so far lies on the x-axis.
    Collinear,
    /// A non-collinear atom fixed the xy half-plane.
    Planar { plane_ref: usize },
    /// An out-of-plane atom disambiguates z signs.
    OutOfPlane { plane_ref: usize, oop_ref: usize },
}

/// Embeds the distance matrix and overwrites the molecule's geometry.
///
/// On any error the geometry is left untouched. A reconstructed matrix
/// deviating from the input by more than the coarse tolerance is reported
/// with a warning but still accepted.
pub fn embed_distance_matrix(
    molecule: &mut Molecule,
    distances: &DMatrix<f64>,
) -> Result<(), EmbedError> {
    let positions = embed_coordinates(distances, molecule.num_atoms())?;
    let mut coords = Vec::with_capacity(3 * positions.len());
    for p in &positions {
        coords.extend_from_slice(&[p.x, p.y, p.z]);
    }
    molecule.set_geometry(&coords);
    Ok(())
}

/// Embeds an `n`-atom distance matrix into Cartesian points.
pub fn embed_coordinates(
    distances: &DMatrix<f64>,
    n: usize,
) -> Result<Vec<Point3<f64>>, EmbedError> {
    if distances.nrows() != n || distances.ncols() != n {
        return Err(EmbedError::SizeMismatch {
            rows: distances.nrows(),
            cols: distances.ncols(),
            atoms: n,
        });
    }

    let mut positions: Vec<Point3<f64>> = Vec::with_capacity(n);
    if n == 0 {
        return Ok(positions);
    }
    positions.push(Point3::origin());
    if n == 1 {
        return Ok(positions);
    }
    positions.push(Point3::new(distances[(0, 1)], 0.0, 0.0));

    let mut stage = Stage::Collinear;
    for atom in 2..n {
        let position = match stage {
            Stage::Collinear => {
                if let Some(x) = collinear_solution(distances, atom) {
                    Point3::new(x, 0.0, 0.0)
                } else {
                    let p = planar_solution(distances, atom)?;
                    stage = Stage::Planar { plane_ref: atom };
                    p
                }
            }
            Stage::Planar { plane_ref } => {
                match in_plane_solution(distances, &positions, plane_ref, atom) {
                    Some(p) => p,
                    None => {
                        let p = out_of_plane_solution(distances, &positions, plane_ref, atom)?;
                        stage = Stage::OutOfPlane {
                            plane_ref,
                            oop_ref: atom,
                        };
                        p
                    }
                }
            }
            Stage::OutOfPlane { plane_ref, oop_ref } => {
                general_solution(distances, &positions, plane_ref, oop_ref, atom)?
            }
        };
        positions.push(position);
    }

    report_residual(distances, &positions);
    Ok(positions)
}

/// Betweenness tests against atoms 0 and 1; `Some(x)` places the atom on
/// the x-axis.
fn collinear_solution(distances: &DMatrix<f64>, atom: usize) -> Option<f64> {
    let r01 = distances[(0, 1)];
    let r0i = distances[(0, atom)];
    let r1i = distances[(1, atom)];
    for tol in TOLERANCE_LADDER {
        // Atom beyond atom 1.
        if within(r01 + r1i, r0i, tol) {
            return Some(r0i);
        }
        // Atom on the far side of the origin.
        if within(r0i + r01, r1i, tol) {
            return Some(-r0i);
        }
        // Atom between the first two.
        if within(r0i + r1i, r01, tol) {
            return Some(r0i);
        }
    }
    None
}

/// Law-of-cosines placement in the xy half-plane (y >= 0).
fn planar_solution(distances: &DMatrix<f64>, atom: usize) -> Result<Point3<f64>, EmbedError> {
    let r01 = distances[(0, 1)];
    let r0i = distances[(0, atom)];
    let r1i = distances[(1, atom)];
    let x = (r0i * r0i + r01 * r01 - r1i * r1i) / (2.0 * r01);
    let y = checked_sqrt(r0i * r0i - x * x, atom)?;
    Ok(Point3::new(x, y, 0.0))
}

/// Tests the atom for consistency with the xy plane: the direct and the
/// y-mirrored candidate against the plane reference, over the shared
/// tolerance ladder.
fn in_plane_solution(
    distances: &DMatrix<f64>,
    positions: &[Point3<f64>],
    plane_ref: usize,
    atom: usize,
) -> Option<Point3<f64>> {
    let r0i = distances[(0, atom)];
    let r_pi = distances[(plane_ref, atom)];
    let x = planar_x(distances, atom);
    let y_sq = r0i * r0i - x * x;
    if y_sq < 0.0 {
        return None;
    }
    let y = y_sq.sqrt();
    let reference = positions[plane_ref];
    for tol in TOLERANCE_LADDER {
        for candidate in [Point3::new(x, y, 0.0), Point3::new(x, -y, 0.0)] {
            if within((candidate - reference).norm(), r_pi, tol) {
                return Some(candidate);
            }
        }
    }
    None
}

/// Simultaneous quadratic equations against atoms 0, 1, and the plane
/// reference; the first out-of-plane atom fixes z > 0 by convention.
fn out_of_plane_solution(
    distances: &DMatrix<f64>,
    positions: &[Point3<f64>],
    plane_ref: usize,
    atom: usize,
) -> Result<Point3<f64>, EmbedError> {
    let (x, y) = planar_xy(distances, positions, plane_ref, atom);
    let r0i = distances[(0, atom)];
    let z = checked_sqrt(r0i * r0i - x * x - y * y, atom)?;
    Ok(Point3::new(x, y, z))
}

/// Placement once both references exist: solve for (x, y, |z|), pick the
/// z sign that reconciles the distance to the out-of-plane reference, and
/// fall back to a 1-D minimization over z when neither sign does.
fn general_solution(
    distances: &DMatrix<f64>,
    positions: &[Point3<f64>],
    plane_ref: usize,
    oop_ref: usize,
    atom: usize,
) -> Result<Point3<f64>, EmbedError> {
    let (x, y) = planar_xy(distances, positions, plane_ref, atom);
    let r0i = distances[(0, atom)];
    let z = checked_sqrt(r0i * r0i - x * x - y * y, atom)?;

    let r_oi = distances[(oop_ref, atom)];
    let reference = positions[oop_ref];
    for tol in TOLERANCE_LADDER {
        for candidate in [Point3::new(x, y, z), Point3::new(x, y, -z)] {
            if within((candidate - reference).norm(), r_oi, tol) {
                return Ok(candidate);
            }
        }
    }

    // Neither sign reconciles the reference distance; minimize the summed
    // squared residuals to every placed atom over z and accept the result
    // unconditionally.
    debug!(atom, "z-sign irreconcilable; falling back to 1-D minimization");
    let residual = |z: f64| -> f64 {
        let candidate = Point3::new(x, y, z);
        positions
            .iter()
            .enumerate()
            .map(|(j, placed)| {
                let deviation = (candidate - placed).norm() - distances[(j, atom)];
                deviation * deviation
            })
            .sum()
    };
    let bracket = r0i.abs() + 1.0;
    let z_best = golden_section_minimize(&residual, -bracket, bracket);
    Ok(Point3::new(x, y, z_best))
}

fn planar_x(distances: &DMatrix<f64>, atom: usize) -> f64 {
    let r01 = distances[(0, 1)];
    let r0i = distances[(0, atom)];
    let r1i = distances[(1, atom)];
    (r0i * r0i + r01 * r01 - r1i * r1i) / (2.0 * r01)
}

fn planar_xy(
    distances: &DMatrix<f64>,
    positions: &[Point3<f64>],
    plane_ref: usize,
    atom: usize,
) -> (f64, f64) {
    let x = planar_x(distances, atom);
    let r0i = distances[(0, atom)];
    let r_pi = distances[(plane_ref, atom)];
    let p = positions[plane_ref];
    let y = (r0i * r0i - r_pi * r_pi + p.x * p.x + p.y * p.y - 2.0 * x * p.x) / (2.0 * p.y);
    (x, y)
}

fn within(a: f64, b: f64, tol: f64) -> bool {
    if tol == 0.0 {
        a == b
    } else {
        (a - b).abs() <= tol
    }
}

fn checked_sqrt(value: f64, atom: usize) -> Result<f64, EmbedError> {
    if value < 0.0 {
        if value > -FINE_TOLERANCE {
            return Ok(0.0);
        }
        return Err(EmbedError::Domain { atom, value });
    }
    Ok(value.sqrt())
}

fn golden_section_minimize<F: Fn(f64) -> f64>(f: &F, mut lo: f64, mut hi: f64) -> f64 {
    let ratio = (5.0_f64.sqrt() - 1.0) / 2.0;
    let mut c = hi - ratio * (hi - lo);
    let mut d = lo + ratio * (hi - lo);
    while hi - lo > 1e-12 {
        if f(c) < f(d) {
            hi = d;
        } else {
            lo = c;
        }
        c = hi - ratio * (hi - lo);
        d = lo + ratio * (hi - lo);
    }
    0.5 * (lo + hi)
}

fn report_residual(distances: &DMatrix<f64>, positions: &[Point3<f64>]) {
    let mut max_deviation: f64 = 0.0;
    for i in 0..positions.len() {
        for j in (i + 1)..positions.len() {
            let reconstructed = (positions[i] - positions[j]).norm();
            max_deviation = max_deviation.max((reconstructed - distances[(i, j)]).abs());
        }
    }
    if max_deviation > COARSE_TOLERANCE {
        warn!(
            max_deviation,
            "Embedded geometry does not reproduce the input distances exactly"
        );
    } else {
        debug!(max_deviation, "Embedding residual");
    }
}
