use thiserror::Error;

/// Error raised when a topology insert references invalid atom indices.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TopologyError {
    #[error("Atom index {index} out of range for molecule with {count} atoms")]
    IndexOutOfRange { index: usize, count: usize },
    #[error("Topology entry references the same atom more than once")]
    RepeatedIndex,
}

/// A covalent bond between two atoms, stored with the smaller index first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bond {
    pub i: usize,
    pub j: usize,
}

impl Bond {
    /// Creates a canonicalized bond (smaller index first).
    pub fn new(a: usize, b: usize) -> Self {
        if a <= b { Self { i: a, j: b } } else { Self { i: b, j: a } }
    }

    pub fn contains(&self, index: usize) -> bool {
        self.i == index || self.j == index
    }

    /// The atom on the other end, if `index` belongs to this bond.
    pub fn partner(&self, index: usize) -> Option<usize> {
        if index == self.i {
            Some(self.j)
        } else if index == self.j {
            Some(self.i)
        } else {
            None
        }
    }
}

/// A bond angle a-b-c with the vertex atom in the middle.
///
/// The two end atoms are stored with the smaller index first so that the
/// same physical angle always compares equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Angle {
    pub a: usize,
    pub b: usize,
    pub c: usize,
}

impl Angle {
    pub fn new(a: usize, b: usize, c: usize) -> Self {
        if a <= c { Self { a, b, c } } else { Self { a: c, b, c: a } }
    }

    /// The bond edges (a,b) and (b,c) making up this angle.
    pub fn edges(&self) -> [Bond; 2] {
        [Bond::new(self.a, self.b), Bond::new(self.b, self.c)]
    }
}

/// A proper dihedral a-b-c-d around the central b-c bridge.
///
/// Stored with the smaller terminal index first; the reversed chain
/// d-c-b-a describes the same torsion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dihedral {
    pub a: usize,
    pub b: usize,
    pub c: usize,
    pub d: usize,
}

impl Dihedral {
    pub fn new(a: usize, b: usize, c: usize, d: usize) -> Self {
        if a <= d {
            Self { a, b, c, d }
        } else {
            Self {
                a: d,
                b: c,
                c: b,
                d: a,
            }
        }
    }

    /// The central bridge bond of the torsion.
    pub fn bridge(&self) -> Bond {
        Bond::new(self.b, self.c)
    }
}

/// A threefold (inversion) center with its three bonded neighbours.
///
/// Neighbours are stored sorted so permutations compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Threefold {
    pub center: usize,
    pub n1: usize,
    pub n2: usize,
    pub n3: usize,
}

impl Threefold {
    pub fn new(center: usize, a: usize, b: usize, c: usize) -> Self {
        let mut n = [a, b, c];
        n.sort_unstable();
        Self {
            center,
            n1: n[0],
            n2: n[1],
            n3: n[2],
        }
    }
}

/// A hydrogen-bond triple: acceptor A, bridging hydrogen H, acceptor B.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HBondTriple {
    /// The electronegative atom covalently holding the hydrogen.
    pub a: usize,
    /// The bridging hydrogen.
    pub h: usize,
    /// The electronegative atom in van-der-Waals contact with the hydrogen.
    pub b: usize,
}

/// A halogen-bond triple: halogen X, its covalent partner Y, donor D.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HalogenTriple {
    /// The halogen atom.
    pub x: usize,
    /// The atom covalently bonded to the halogen.
    pub y: usize,
    /// The electronegative atom in van-der-Waals contact with the halogen.
    pub d: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bond_is_canonicalized() {
        assert_eq!(Bond::new(5, 2), Bond::new(2, 5));
        let b = Bond::new(7, 3);
        assert_eq!((b.i, b.j), (3, 7));
    }

    #[test]
    fn bond_partner_resolves_both_ends() {
        let b = Bond::new(1, 4);
        assert_eq!(b.partner(1), Some(4));
        assert_eq!(b.partner(4), Some(1));
        assert_eq!(b.partner(2), None);
    }

    #[test]
    fn angle_reversal_compares_equal() {
        assert_eq!(Angle::new(0, 1, 2), Angle::new(2, 1, 0));
        assert_eq!(Angle::new(2, 1, 0).b, 1);
    }

    #[test]
    fn dihedral_reversal_compares_equal() {
        assert_eq!(Dihedral::new(0, 1, 2, 3), Dihedral::new(3, 2, 1, 0));
        assert_eq!(Dihedral::new(3, 2, 1, 0).bridge(), Bond::new(1, 2));
    }

    #[test]
    fn threefold_neighbour_permutations_compare_equal() {
        assert_eq!(Threefold::new(0, 3, 1, 2), Threefold::new(0, 1, 2, 3));
    }
}
