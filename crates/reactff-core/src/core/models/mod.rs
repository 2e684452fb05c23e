//! # Molecular Data Models
//!
//! Core data structures for representing molecular systems: atoms with
//! element-derived properties, topology entries (bonds, angles, dihedrals,
//! threefold centers, non-covalent triples), and the owning [`Molecule`]
//! container with its validated, idempotent topology inserts.
//!
//! Atom identity is the atom's index in its molecule's ordered atom list;
//! every topology entry and potential term references atoms by index.

pub mod atom;
pub mod molecule;
pub mod topology;

pub use atom::{Atom, UnknownElementError};
pub use molecule::Molecule;
pub use topology::{Angle, Bond, Dihedral, HBondTriple, HalogenTriple, Threefold, TopologyError};
