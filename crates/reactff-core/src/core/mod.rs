//! # Core Module
//!
//! Fundamental building blocks for the force field: molecular data models,
//! the internal-coordinate evaluator, element data tables, and the pure
//! energy expressions.
//!
//! - **Molecular Representation** ([`models`]) - atoms, molecules, topology entries
//! - **Internal Coordinates** ([`geometry`]) - bond lengths, angles, dihedrals, out-of-plane angles
//! - **Energy Calculations** ([`forcefield`]) - potential terms, energy evaluation, force-constant extraction
//! - **Element Data** ([`tables`]) - immutable per-element lookup tables

pub mod forcefield;
pub mod geometry;
pub mod models;
pub mod tables;
