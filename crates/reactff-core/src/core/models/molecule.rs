use super::atom::Atom;
use super::topology::{
    Angle, Bond, Dihedral, HBondTriple, HalogenTriple, Threefold, TopologyError,
};
use crate::core::forcefield::terms::{
    BendTerm, HBondTerm, HalogenTerm, InversionTerm, StretchTerm, TorsionTerm,
};
use nalgebra::{DMatrix, DVector, Matrix3, Point3, SymmetricEigen, Vector3};
use tracing::warn;

/// Bond-graph separation marking a pair with no connecting path.
pub const UNCONNECTED: u16 = u16::MAX;

/// A molecule: an ordered atom list plus the inferred topology and the
/// potential terms parametrized on it.
///
/// Atom identity is the index into the atom list. Topology inserts are
/// validated and idempotent: out-of-range or repeated indices are rejected
/// with a [`TopologyError`], duplicates are silent no-ops. The multiplicity
/// is recomputed on every atom addition as the parity of
/// (nuclear charge - net charge).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Molecule {
    pub name: String,
    charge: i32,
    multiplicity: u32,
    atoms: Vec<Atom>,
    bonds: Vec<Bond>,
    angles: Vec<Angle>,
    dihedrals: Vec<Dihedral>,
    threefolds: Vec<Threefold>,
    hbond_triples: Vec<HBondTriple>,
    halogen_triples: Vec<HalogenTriple>,
    hydrogens: Vec<usize>,
    electronegatives: Vec<usize>,
    halogens: Vec<usize>,
    /// Stretch terms over covalent bonds.
    pub stretch_terms: Vec<StretchTerm>,
    /// 1,3-stretch terms over angle end pairs.
    pub stretch13_terms: Vec<StretchTerm>,
    pub bend_terms: Vec<BendTerm>,
    pub torsion_terms: Vec<TorsionTerm>,
    pub inversion_terms: Vec<InversionTerm>,
    pub hbond_terms: Vec<HBondTerm>,
    pub halogen_terms: Vec<HalogenTerm>,
    /// QM equilibrium energy of the reference structure.
    pub qm_energy: f64,
    hessian: Option<DMatrix<f64>>,
    separations: Option<Vec<Vec<u16>>>,
}

impl Molecule {
    /// Creates an empty molecule with the given name and net charge.
    pub fn new(name: &str, charge: i32) -> Self {
        Self {
            name: name.to_string(),
            charge,
            multiplicity: 1,
            ..Default::default()
        }
    }

    /// Appends an atom and recomputes the multiplicity.
    pub fn add_atom(&mut self, atom: Atom) {
        let index = self.atoms.len();
        if atom.is_hydrogen() {
            self.hydrogens.push(index);
        }
        if atom.is_electronegative() {
            self.electronegatives.push(index);
        }
        if atom.is_halogen() {
            self.halogens.push(index);
        }
        self.atoms.push(atom);

        let nuclear_charge: i64 = self.atoms.iter().map(|a| a.number as i64).sum();
        self.multiplicity = if (nuclear_charge - self.charge as i64) % 2 != 0 {
            2
        } else {
            1
        };
    }

    pub fn num_atoms(&self) -> usize {
        self.atoms.len()
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn atom(&self, index: usize) -> &Atom {
        &self.atoms[index]
    }

    pub fn charge(&self) -> i32 {
        self.charge
    }

    pub fn multiplicity(&self) -> u32 {
        self.multiplicity
    }

    /// Molar mass as the sum of atomic masses.
    pub fn mass(&self) -> f64 {
        self.atoms.iter().map(|a| a.mass).sum()
    }

    pub fn bonds(&self) -> &[Bond] {
        &self.bonds
    }

    pub fn angles(&self) -> &[Angle] {
        &self.angles
    }

    pub fn dihedrals(&self) -> &[Dihedral] {
        &self.dihedrals
    }

    pub fn threefolds(&self) -> &[Threefold] {
        &self.threefolds
    }

    pub fn hbond_triples(&self) -> &[HBondTriple] {
        &self.hbond_triples
    }

    pub fn halogen_triples(&self) -> &[HalogenTriple] {
        &self.halogen_triples
    }

    pub fn hydrogens(&self) -> &[usize] {
        &self.hydrogens
    }

    pub fn electronegatives(&self) -> &[usize] {
        &self.electronegatives
    }

    pub fn halogens(&self) -> &[usize] {
        &self.halogens
    }

    fn check_indices(&self, indices: &[usize]) -> Result<(), TopologyError> {
        for (pos, &index) in indices.iter().enumerate() {
            if index >= self.atoms.len() {
                return Err(TopologyError::IndexOutOfRange {
                    index,
                    count: self.atoms.len(),
                });
            }
            if indices[..pos].contains(&index) {
                return Err(TopologyError::RepeatedIndex);
            }
        }
        Ok(())
    }

    /// Inserts a bond; returns whether the list grew.
    pub fn add_bond(&mut self, a: usize, b: usize) -> Result<bool, TopologyError> {
        self.check_indices(&[a, b])?;
        let bond = Bond::new(a, b);
        if self.bonds.contains(&bond) {
            return Ok(false);
        }
        self.bonds.push(bond);
        self.separations = None;
        Ok(true)
    }

    /// Removes a bond if present; returns whether anything was removed.
    pub fn remove_bond(&mut self, a: usize, b: usize) -> bool {
        let bond = Bond::new(a, b);
        let before = self.bonds.len();
        self.bonds.retain(|&existing| existing != bond);
        if self.bonds.len() != before {
            self.separations = None;
            true
        } else {
            false
        }
    }

    pub fn contains_bond(&self, a: usize, b: usize) -> bool {
        self.bonds.contains(&Bond::new(a, b))
    }

    /// Inserts an angle with vertex `b`; returns whether the list grew.
    pub fn add_angle(&mut self, a: usize, b: usize, c: usize) -> Result<bool, TopologyError> {
        self.check_indices(&[a, b, c])?;
        let angle = Angle::new(a, b, c);
        if self.angles.contains(&angle) {
            return Ok(false);
        }
        self.angles.push(angle);
        Ok(true)
    }

    pub fn add_dihedral(
        &mut self,
        a: usize,
        b: usize,
        c: usize,
        d: usize,
    ) -> Result<bool, TopologyError> {
        self.check_indices(&[a, b, c, d])?;
        let dihedral = Dihedral::new(a, b, c, d);
        if self.dihedrals.contains(&dihedral) {
            return Ok(false);
        }
        self.dihedrals.push(dihedral);
        Ok(true)
    }

    pub fn add_threefold(
        &mut self,
        center: usize,
        n1: usize,
        n2: usize,
        n3: usize,
    ) -> Result<bool, TopologyError> {
        self.check_indices(&[center, n1, n2, n3])?;
        let threefold = Threefold::new(center, n1, n2, n3);
        if self.threefolds.contains(&threefold) {
            return Ok(false);
        }
        self.threefolds.push(threefold);
        Ok(true)
    }

    pub fn add_hbond_triple(
        &mut self,
        a: usize,
        h: usize,
        b: usize,
    ) -> Result<bool, TopologyError> {
        self.check_indices(&[a, h, b])?;
        let triple = HBondTriple { a, h, b };
        if self.hbond_triples.contains(&triple) {
            return Ok(false);
        }
        self.hbond_triples.push(triple);
        Ok(true)
    }

    pub fn add_halogen_triple(
        &mut self,
        x: usize,
        y: usize,
        d: usize,
    ) -> Result<bool, TopologyError> {
        self.check_indices(&[x, y, d])?;
        let triple = HalogenTriple { x, y, d };
        if self.halogen_triples.contains(&triple) {
            return Ok(false);
        }
        self.halogen_triples.push(triple);
        Ok(true)
    }

    /// Distance between atoms `i` and `j` in the current geometry.
    pub fn distance(&self, i: usize, j: usize) -> f64 {
        (self.atoms[i].position - self.atoms[j].position).norm()
    }

    /// The full N x N interatomic distance matrix.
    pub fn distance_matrix(&self) -> DMatrix<f64> {
        let n = self.atoms.len();
        DMatrix::from_fn(n, n, |i, j| self.distance(i, j))
    }

    /// Flattened 3N Cartesian coordinates in atom order.
    pub fn cartesian_coordinates(&self) -> DVector<f64> {
        let mut coords = DVector::zeros(3 * self.atoms.len());
        for (i, atom) in self.atoms.iter().enumerate() {
            coords[3 * i] = atom.position.x;
            coords[3 * i + 1] = atom.position.y;
            coords[3 * i + 2] = atom.position.z;
        }
        coords
    }

    /// Overwrites all atom positions from a flattened 3N array.
    ///
    /// A length mismatch is a soft failure: a warning is logged and the
    /// geometry is left untouched.
    pub fn set_geometry(&mut self, coords: &[f64]) {
        if coords.len() != 3 * self.atoms.len() {
            warn!(
                expected = 3 * self.atoms.len(),
                got = coords.len(),
                "Coordinate array length mismatch; geometry left unchanged"
            );
            return;
        }
        for (i, atom) in self.atoms.iter_mut().enumerate() {
            atom.position = Point3::new(coords[3 * i], coords[3 * i + 1], coords[3 * i + 2]);
        }
    }

    /// Rigidly translates every atom.
    pub fn translate(&mut self, shift: &Vector3<f64>) {
        for atom in &mut self.atoms {
            atom.position += shift;
        }
    }

    /// Mass-weighted center of the current geometry.
    pub fn center_of_mass(&self) -> Point3<f64> {
        let total_mass = self.mass();
        let weighted: Vector3<f64> = self
            .atoms
            .iter()
            .map(|a| a.position.coords * a.mass)
            .sum();
        Point3::from(weighted / total_mass)
    }

    /// Translates the center of mass to the origin and rotates the molecule
    /// into its principal axes of inertia.
    pub fn orient(&mut self) {
        let com = self.center_of_mass();
        self.translate(&(-com.coords));

        let mut inertia = Matrix3::zeros();
        for atom in &self.atoms {
            let r = atom.position.coords;
            inertia += atom.mass * (Matrix3::identity() * r.norm_squared() - r * r.transpose());
        }
        let eigen = SymmetricEigen::new(inertia);
        let rotation = eigen.eigenvectors.transpose();
        for atom in &mut self.atoms {
            atom.position = Point3::from(rotation * atom.position.coords);
        }
    }

    /// Stores the QM Cartesian Hessian.
    ///
    /// A shape other than 3N x 3N only warns; extraction and fitting are
    /// meaningless with it but the caller may still replace it later.
    pub fn set_hessian(&mut self, hessian: DMatrix<f64>) {
        let expected = 3 * self.atoms.len();
        if hessian.nrows() != expected || hessian.ncols() != expected {
            warn!(
                expected,
                rows = hessian.nrows(),
                cols = hessian.ncols(),
                "Hessian shape does not match 3N; extraction and fitting will be unreliable"
            );
        }
        self.hessian = Some(hessian);
    }

    pub fn hessian(&self) -> Option<&DMatrix<f64>> {
        self.hessian.as_ref()
    }

    /// Recomputes and caches the bond-graph separation matrix.
    pub fn refresh_bond_separations(&mut self) {
        self.separations = Some(self.compute_bond_separations());
    }

    /// Cached separation matrix, if [`Self::refresh_bond_separations`] ran
    /// after the last bond edit.
    pub fn bond_separations(&self) -> Option<&Vec<Vec<u16>>> {
        self.separations.as_ref()
    }

    /// Breadth-first bond-graph distances between all atom pairs;
    /// unconnected pairs get [`UNCONNECTED`].
    pub fn compute_bond_separations(&self) -> Vec<Vec<u16>> {
        let n = self.atoms.len();
        let mut adjacency = vec![Vec::new(); n];
        for bond in &self.bonds {
            adjacency[bond.i].push(bond.j);
            adjacency[bond.j].push(bond.i);
        }

        let mut matrix = vec![vec![UNCONNECTED; n]; n];
        for start in 0..n {
            let mut queue = std::collections::VecDeque::new();
            matrix[start][start] = 0;
            queue.push_back(start);
            while let Some(current) = queue.pop_front() {
                let dist = matrix[start][current];
                for &next in &adjacency[current] {
                    if matrix[start][next] == UNCONNECTED {
                        matrix[start][next] = dist + 1;
                        queue.push_back(next);
                    }
                }
            }
        }
        matrix
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn methane_like() -> Molecule {
        let mut mol = Molecule::new("probe", 0);
        mol.add_atom(Atom::new("C", Point3::new(0.0, 0.0, 0.0)).unwrap());
        mol.add_atom(Atom::new("H", Point3::new(1.09, 0.0, 0.0)).unwrap());
        mol.add_atom(Atom::new("H", Point3::new(-0.36, 1.03, 0.0)).unwrap());
        mol.add_atom(Atom::new("H", Point3::new(-0.36, -0.51, 0.89)).unwrap());
        mol.add_atom(Atom::new("H", Point3::new(-0.36, -0.51, -0.89)).unwrap());
        mol
    }

    #[test]
    fn multiplicity_follows_electron_parity() {
        let mut mol = Molecule::new("probe", 0);
        mol.add_atom(Atom::new("H", Point3::origin()).unwrap());
        assert_eq!(mol.multiplicity(), 2);
        mol.add_atom(Atom::new("H", Point3::new(0.74, 0.0, 0.0)).unwrap());
        assert_eq!(mol.multiplicity(), 1);

        let mut cation = Molecule::new("probe", 1);
        cation.add_atom(Atom::new("H", Point3::origin()).unwrap());
        cation.add_atom(Atom::new("H", Point3::new(0.74, 0.0, 0.0)).unwrap());
        assert_eq!(cation.multiplicity(), 2);
    }

    #[test]
    fn add_bond_is_idempotent_and_canonical() {
        let mut mol = methane_like();
        assert!(mol.add_bond(0, 1).unwrap());
        assert!(!mol.add_bond(1, 0).unwrap());
        assert_eq!(mol.bonds().len(), 1);
        assert!(mol.contains_bond(1, 0));
    }

    #[test]
    fn add_bond_rejects_invalid_indices() {
        let mut mol = methane_like();
        assert_eq!(
            mol.add_bond(0, 9),
            Err(TopologyError::IndexOutOfRange { index: 9, count: 5 })
        );
        assert_eq!(mol.add_bond(2, 2), Err(TopologyError::RepeatedIndex));
        assert!(mol.bonds().is_empty());
    }

    #[test]
    fn add_angle_treats_reversal_as_duplicate() {
        let mut mol = methane_like();
        assert!(mol.add_angle(1, 0, 2).unwrap());
        assert!(!mol.add_angle(2, 0, 1).unwrap());
        assert_eq!(mol.angles().len(), 1);
    }

    #[test]
    fn add_dihedral_treats_reversal_as_duplicate() {
        let mut mol = methane_like();
        assert!(mol.add_dihedral(1, 0, 2, 3).unwrap());
        assert!(!mol.add_dihedral(3, 2, 0, 1).unwrap());
        assert_eq!(mol.dihedrals().len(), 1);
    }

    #[test]
    fn remove_bond_invalidates_separation_cache() {
        let mut mol = methane_like();
        mol.add_bond(0, 1).unwrap();
        mol.add_bond(0, 2).unwrap();
        mol.refresh_bond_separations();
        assert!(mol.bond_separations().is_some());
        assert!(mol.remove_bond(0, 1));
        assert!(mol.bond_separations().is_none());
        assert!(!mol.remove_bond(0, 1));
    }

    #[test]
    fn bond_separations_count_graph_edges() {
        let mut mol = methane_like();
        mol.add_bond(0, 1).unwrap();
        mol.add_bond(0, 2).unwrap();
        mol.add_bond(0, 3).unwrap();
        let seps = mol.compute_bond_separations();
        assert_eq!(seps[1][1], 0);
        assert_eq!(seps[1][0], 1);
        assert_eq!(seps[1][2], 2);
        assert_eq!(seps[1][4], UNCONNECTED);
    }

    #[test]
    fn cached_index_lists_track_element_classes() {
        let mut mol = Molecule::new("probe", 0);
        mol.add_atom(Atom::new("O", Point3::origin()).unwrap());
        mol.add_atom(Atom::new("H", Point3::new(1.0, 0.0, 0.0)).unwrap());
        mol.add_atom(Atom::new("Br", Point3::new(2.0, 0.0, 0.0)).unwrap());
        assert_eq!(mol.hydrogens(), &[1]);
        assert_eq!(mol.electronegatives(), &[0]);
        assert_eq!(mol.halogens(), &[2]);
    }

    #[test]
    fn set_geometry_rejects_wrong_length() {
        let mut mol = methane_like();
        let original = mol.cartesian_coordinates();
        mol.set_geometry(&[1.0, 2.0, 3.0]);
        assert_eq!(mol.cartesian_coordinates(), original);
    }

    #[test]
    fn set_geometry_overwrites_positions() {
        let mut mol = Molecule::new("probe", 0);
        mol.add_atom(Atom::new("H", Point3::origin()).unwrap());
        mol.set_geometry(&[1.0, 2.0, 3.0]);
        assert_eq!(mol.atom(0).position, Point3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn orient_moves_center_of_mass_to_origin() {
        let mut mol = methane_like();
        mol.translate(&Vector3::new(3.0, -1.0, 2.0));
        mol.orient();
        let com = mol.center_of_mass();
        assert!(com.coords.norm() < 1e-9);
    }

    #[test]
    fn distance_matrix_is_symmetric_with_zero_diagonal() {
        let mol = methane_like();
        let dm = mol.distance_matrix();
        assert_eq!(dm[(2, 2)], 0.0);
        assert!((dm[(0, 1)] - dm[(1, 0)]).abs() < 1e-12);
        assert!((dm[(0, 1)] - 1.09).abs() < 1e-9);
    }

    #[test]
    fn molecular_mass_sums_atomic_masses() {
        let mol = methane_like();
        assert!((mol.mass() - (12.0107 + 4.0 * 1.00794)).abs() < 1e-9);
    }
}
