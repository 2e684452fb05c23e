//! # Force Field Module
//!
//! Energy evaluation and parameter handling for the empirical reaction
//! force field. The potential is a sum of covalent terms (stretches,
//! 1,3-stretches, bends, torsions, inversions) parametrized at
//! topology-build time, plus non-covalent terms (hydrogen and halogen
//! bonding, Pauli repulsion, electrostatics, dispersion) screened by
//! bond-graph separation.
//!
//! ## Key Components
//!
//! - [`potentials`] - pure closed-form potential functions
//! - [`terms`] - per-internal-coordinate term objects with their parameters
//! - [`energy`] - the total-energy evaluator over a coordinate array
//! - [`extraction`] - Rayleigh-quotient force constants from a QM Hessian
//! - [`parameterization`] - builds the term lists from topology + Hessian

pub mod energy;
pub mod extraction;
pub mod parameterization;
pub mod potentials;
pub mod terms;
