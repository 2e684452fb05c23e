use super::potentials;

/// Functional form of an angular term, fixed at parameterization time.
///
/// Equilibrium angles within 0.01 rad of pi get the harmonic form; the
/// cosine form has minima at both signed equilibria.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AngleKind {
    NearLinear,
    Cosine,
}

impl AngleKind {
    pub fn from_equilibrium(theta0: f64) -> Self {
        if (theta0 - std::f64::consts::PI).abs() < 0.01 {
            Self::NearLinear
        } else {
            Self::Cosine
        }
    }
}

/// Functional form of a torsion term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TorsionKind {
    /// Single-cosine term for rigid (multiply bonded or ring) bridges.
    Rigid,
    /// Damped threefold term for rotatable single bonds.
    Rotatable,
}

/// A bonded or 1,3 stretch with a generalized Lennard-Jones profile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StretchTerm {
    pub i: usize,
    pub j: usize,
    pub r0: f64,
    pub k: f64,
    /// Pair exponent from element hardness and electronegativity difference.
    pub exponent: f64,
}

impl StretchTerm {
    pub fn energy(&self, dist: f64) -> f64 {
        potentials::generalized_lennard_jones(dist, self.r0, self.k, self.exponent)
    }

    pub fn energy_with_k(&self, dist: f64, k: f64) -> f64 {
        potentials::generalized_lennard_jones(dist, self.r0, k, self.exponent)
    }
}

/// An angle bend a-b-c with vertex b.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BendTerm {
    pub a: usize,
    pub b: usize,
    pub c: usize,
    pub theta0: f64,
    pub k: f64,
    pub kind: AngleKind,
}

impl BendTerm {
    /// Energy at angle `theta`, scaled by the product of leg damping factors.
    pub fn energy(&self, theta: f64, damping: f64) -> f64 {
        damping * self.bare_energy(theta, self.k)
    }

    pub fn energy_with_k(&self, theta: f64, damping: f64, k: f64) -> f64 {
        damping * self.bare_energy(theta, k)
    }

    fn bare_energy(&self, theta: f64, k: f64) -> f64 {
        match self.kind {
            AngleKind::NearLinear => potentials::harmonic(theta, self.theta0, k),
            AngleKind::Cosine => potentials::cosine_bend(theta, self.theta0, k),
        }
    }
}

/// A proper torsion a-b-c-d around the b-c bridge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TorsionTerm {
    pub a: usize,
    pub b: usize,
    pub c: usize,
    pub d: usize,
    pub phi0: f64,
    pub k: f64,
    pub kind: TorsionKind,
}

impl TorsionTerm {
    /// Energy at dihedral `phi`; rotatable bridges are damped by the chain
    /// leg factors, rigid ones ignore the damping.
    pub fn energy(&self, phi: f64, damping: f64) -> f64 {
        match self.kind {
            TorsionKind::Rigid => potentials::cosine_torsion(phi, self.phi0, self.k),
            TorsionKind::Rotatable => {
                damping * potentials::threefold_torsion(phi, self.phi0, self.k)
            }
        }
    }
}

/// An out-of-plane (inversion) term at a threefold center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InversionTerm {
    pub center: usize,
    pub n1: usize,
    pub n2: usize,
    pub n3: usize,
    /// Equilibrium out-of-plane angle.
    pub phi0: f64,
    pub k: f64,
    pub kind: AngleKind,
}

impl InversionTerm {
    pub fn energy(&self, phi: f64, damping: f64) -> f64 {
        damping * self.bare_energy(phi, self.k)
    }

    pub fn energy_with_k(&self, phi: f64, damping: f64, k: f64) -> f64 {
        damping * self.bare_energy(phi, k)
    }

    fn bare_energy(&self, phi: f64, k: f64) -> f64 {
        match self.kind {
            AngleKind::NearLinear => potentials::harmonic(phi, self.phi0, k),
            AngleKind::Cosine => potentials::cosine_bend(phi, self.phi0, k),
        }
    }
}

/// A hydrogen-bond term over an (acceptor, hydrogen, acceptor) triple.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HBondTerm {
    pub a: usize,
    pub h: usize,
    pub b: usize,
    /// Strength factor of the covalently bound acceptor.
    pub strength_a: f64,
    /// Strength factor of the contact acceptor.
    pub strength_b: f64,
    /// Radial cutoff, the acceptor pair's van-der-Waals contact distance.
    pub r_cut: f64,
}

impl HBondTerm {
    pub fn energy(&self, dist_ah: f64, dist_bh: f64, dist_ab: f64, cos_theta: f64) -> f64 {
        potentials::hydrogen_bond(
            dist_ah,
            dist_bh,
            dist_ab,
            cos_theta,
            self.strength_a,
            self.strength_b,
            self.r_cut,
        )
    }
}

/// A halogen-bond term over a (halogen, bonded partner, donor) triple.
///
/// Shares the hydrogen-bond functional form with the halogen playing the
/// bridging role; the angle is measured at the halogen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HalogenTerm {
    pub x: usize,
    pub y: usize,
    pub d: usize,
    pub strength_x: f64,
    pub strength_d: f64,
    pub r_cut: f64,
}

impl HalogenTerm {
    pub fn energy(&self, dist_xy: f64, dist_xd: f64, dist_yd: f64, cos_theta: f64) -> f64 {
        potentials::hydrogen_bond(
            dist_xy,
            dist_xd,
            dist_yd,
            cos_theta,
            self.strength_x,
            self.strength_d,
            self.r_cut,
        )
    }
}
