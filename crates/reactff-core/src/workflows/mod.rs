//! # Workflows Module
//!
//! The public API tying the engine and the core together: topology
//! construction, potential-term assignment, force-field energy
//! evaluation, force-constant fitting, distance-matrix embedding, and
//! linear-transit path generation between a reactant and a product.

use crate::core::forcefield::energy::{self, EnergyError, EnergyOptions};
use crate::core::forcefield::parameterization;
use crate::core::models::{Molecule, TopologyError};
use crate::engine::embedding::{self, EmbedError};
use crate::engine::fitter::{self, FitError, FitReport};
use crate::engine::topology_builder;
use nalgebra::DMatrix;
use thiserror::Error;

pub use crate::core::geometry::xyz_string;
pub use crate::engine::topology_builder::{DEFAULT_BOND_ORDER_CUTOFF, DEFAULT_DISTANCE_FACTOR};

#[derive(Debug, Error, PartialEq)]
pub enum TransitError {
    #[error("Reactant has {reactant} atoms but product has {product}")]
    AtomCountMismatch { reactant: usize, product: usize },
    #[error(transparent)]
    Embed(#[from] EmbedError),
}

/// Infers bonds (from bond orders when any nonzero entry exists, else from
/// covalent radii), angles, dihedrals, threefold centers, and the
/// non-covalent triples.
pub fn build_topology(
    molecule: &mut Molecule,
    bond_orders: Option<&DMatrix<f64>>,
    cutoff: f64,
    distance_factor: f64,
) -> Result<(), TopologyError> {
    topology_builder::build_topology(molecule, bond_orders, cutoff, distance_factor)
}

/// Builds all potential-term lists from the topology, current geometry,
/// and (when present) QM Hessian.
pub fn assign_potential_terms(molecule: &mut Molecule) {
    parameterization::assign_parameters(molecule);
}

/// Total force-field energy at the given flattened 3N coordinates.
pub fn ff_energy(molecule: &Molecule, coords: &[f64]) -> Result<f64, EnergyError> {
    energy::evaluate(molecule, coords, &EnergyOptions::default())
}

/// Like [`ff_energy`] with an explicit dispersion selection.
pub fn ff_energy_with_options(
    molecule: &Molecule,
    coords: &[f64],
    options: &EnergyOptions,
) -> Result<f64, EnergyError> {
    energy::evaluate(molecule, coords, options)
}

/// Refines the covalent force constants against the QM Hessian and writes
/// them back into the molecule's term objects.
pub fn fit_force_constants(molecule: &mut Molecule) -> Result<FitReport, FitError> {
    fitter::fit_force_constants(molecule)
}

/// Reconstructs the molecule's Cartesian geometry from a distance matrix.
pub fn embed_from_distance_matrix(
    molecule: &mut Molecule,
    distances: &DMatrix<f64>,
) -> Result<(), EmbedError> {
    embedding::embed_distance_matrix(molecule, distances)
}

/// Linear interpolation (1 - mix) * R + mix * P of the two distance
/// matrices; `mix` = 0 reproduces the reactant matrix exactly.
pub fn mixed_distance_matrix(
    reactant: &Molecule,
    product: &Molecule,
    mix: f64,
) -> Result<DMatrix<f64>, TransitError> {
    if reactant.num_atoms() != product.num_atoms() {
        return Err(TransitError::AtomCountMismatch {
            reactant: reactant.num_atoms(),
            product: product.num_atoms(),
        });
    }
    let r = reactant.distance_matrix();
    let p = product.distance_matrix();
    Ok(r * (1.0 - mix) + p * mix)
}

/// Generates `steps` geometries along the linear-transit path from the
/// reactant to the product by embedding interpolated distance matrices.
///
/// Each returned molecule is a copy of the reactant with its geometry
/// replaced; the endpoints correspond to mix = 0 and mix = 1.
pub fn linear_transit(
    reactant: &Molecule,
    product: &Molecule,
    steps: usize,
) -> Result<Vec<Molecule>, TransitError> {
    let mut path = Vec::with_capacity(steps);
    for step in 0..steps {
        let mix = if steps > 1 {
            step as f64 / (steps - 1) as f64
        } else {
            0.0
        };
        let distances = mixed_distance_matrix(reactant, product, mix)?;
        let mut frame = reactant.clone();
        frame.name = format!("{}_transit_{step}", reactant.name);
        embedding::embed_distance_matrix(&mut frame, &distances)?;
        path.push(frame);
    }
    Ok(path)
}
