//! # Engine Module
//!
//! The algorithmic machinery of the force field, built on the data models
//! and evaluators in [`crate::core`]:
//!
//! - **Topology inference** ([`topology_builder`]) - bonds from bond orders
//!   or covalent radii, then angles, dihedrals, threefold centers, and the
//!   non-covalent donor/acceptor triples
//! - **Force-constant fitting** ([`fitter`]) - BFGS refinement of the
//!   covalent force constants against the QM Hessian
//! - **Distance-geometry embedding** ([`embedding`]) - sequential
//!   reconstruction of Cartesian coordinates from a distance matrix

pub mod embedding;
pub mod fitter;
pub mod topology_builder;
