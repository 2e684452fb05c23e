//! # ReactFF Core Library
//!
//! A library for fast empirical force-field assessment of reaction pathways.
//! Given atomic coordinates and quantum-mechanical reference data (bond
//! orders, a Cartesian Hessian, partial charges), it infers the bonding
//! topology that defines the force field, seeds and refines force constants
//! against the Hessian, evaluates a multi-term potential energy, and
//! reconstructs geometries from interatomic distance matrices to interpolate
//! linear-transit reaction pathways.
//!
//! ## Architectural Philosophy
//!
//! The library is designed with a strict three-layer architecture to ensure a
//! clear separation of concerns, making it modular, testable, and extensible.
//!
//! - **[`core`]: The Foundation.** Contains stateless data models
//!   ([`core::models::Molecule`]), the internal-coordinate evaluator, pure
//!   mathematical representations of the force field (`potentials`, `terms`,
//!   `energy`), and immutable element data tables.
//!
//! - **[`engine`]: The Logic Core.** Implements the algorithmic machinery:
//!   topology inference from geometry or bond orders, the Hessian-fitting
//!   optimizer, and the distance-matrix embedder.
//!
//! - **[`workflows`]: The Public API.** Ties the `engine` and `core` together
//!   to execute complete procedures: topology construction, force-field
//!   energy evaluation, force-constant fitting, and linear-transit path
//!   generation.

pub mod core;
pub mod engine;
pub mod workflows;
