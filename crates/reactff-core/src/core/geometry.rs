//! Internal-coordinate evaluator.
//!
//! Pure geometric functions mapping Cartesian positions to the internal
//! coordinates of the force field: bond lengths, bond angles, signed
//! dihedral angles, and out-of-plane angles at threefold centers. Also
//! renders XYZ-format geometry text for downstream reporting.

use crate::core::models::Molecule;
use nalgebra::{Point3, Vector3};

/// Euclidean distance between two atom positions.
#[inline]
pub fn bond_length(p1: &Point3<f64>, p2: &Point3<f64>) -> f64 {
    (p1 - p2).norm()
}

/// Bond angle at vertex `b` of the chain a-b-c, by the law of cosines.
///
/// Range [0, pi]; the cosine is clamped into [-1, 1] so that slightly
/// inconsistent distances cannot produce NaN.
pub fn bond_angle(a: &Point3<f64>, b: &Point3<f64>, c: &Point3<f64>) -> f64 {
    let r_ab = bond_length(a, b);
    let r_bc = bond_length(b, c);
    let r_ac = bond_length(a, c);
    let cos_theta = (r_ab * r_ab + r_bc * r_bc - r_ac * r_ac) / (2.0 * r_ab * r_bc);
    cos_theta.clamp(-1.0, 1.0).acos()
}

/// Signed dihedral angle of the chain a-b-c-d around the b-c bridge.
///
/// Built from the two cross-product normals and an orthonormal frame,
/// via `atan2`; range (-pi, pi]. A *cis* chain yields 0, *trans* yields pi.
pub fn dihedral_angle(
    a: &Point3<f64>,
    b: &Point3<f64>,
    c: &Point3<f64>,
    d: &Point3<f64>,
) -> f64 {
    let bridge = c - b;
    let n1 = (a - b).cross(&bridge);
    let n2 = bridge.cross(&(c - d));
    let frame_y = n2.cross(&bridge);

    let n2_unit = n2.normalize();
    let frame_y_unit = frame_y.normalize();

    (n1.dot(&frame_y_unit)).atan2(n1.dot(&n2_unit))
}

/// Out-of-plane angle at a threefold center.
///
/// For each terminal bond, the angle between the bond and its projection
/// onto the plane spanned by the other two terminal atoms; the three
/// angles are averaged. Cosines within 1e-15 of unit magnitude clamp the
/// individual angle to 0.
pub fn out_of_plane_angle(
    center: &Point3<f64>,
    t1: &Point3<f64>,
    t2: &Point3<f64>,
    t3: &Point3<f64>,
) -> f64 {
    let u1 = t1 - center;
    let u2 = t2 - center;
    let u3 = t3 - center;

    let phi1 = bond_plane_angle(&u1, &u2, &u3);
    let phi2 = bond_plane_angle(&u2, &u3, &u1);
    let phi3 = bond_plane_angle(&u3, &u1, &u2);

    (phi1 + phi2 + phi3) / 3.0
}

fn bond_plane_angle(bond: &Vector3<f64>, plane1: &Vector3<f64>, plane2: &Vector3<f64>) -> f64 {
    let normal = plane1.cross(plane2);
    let projection = bond - normal * (bond.dot(&normal) / normal.norm_squared());

    let denom = bond.norm() * projection.norm();
    if denom < 1e-30 {
        // Bond perpendicular to the plane.
        return std::f64::consts::FRAC_PI_2;
    }
    let cos_phi = bond.dot(&projection) / denom;
    if (cos_phi.abs() - 1.0).abs() < 1e-15 {
        return 0.0;
    }
    cos_phi.clamp(-1.0, 1.0).acos()
}

/// Renders the molecule as XYZ-format text: atom-count line, title line,
/// then one `SYMBOL X Y Z` line per atom with 8 decimal places.
pub fn xyz_string(molecule: &Molecule) -> String {
    let mut out = format!("{}\n{}\n", molecule.num_atoms(), molecule.name);
    for atom in molecule.atoms() {
        out.push_str(&format!(
            "{:<3} {:15.8} {:15.8} {:15.8}\n",
            atom.symbol, atom.position.x, atom.position.y, atom.position.z
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::Atom;
    use std::f64::consts::PI;

    const TOLERANCE: f64 = 1e-9;

    fn f64_approx_equal(a: f64, b: f64) -> bool {
        (a - b).abs() < TOLERANCE
    }

    #[test]
    fn bond_length_is_euclidean_distance() {
        let p1 = Point3::new(0.0, 0.0, 0.0);
        let p2 = Point3::new(3.0, 4.0, 0.0);
        assert!(f64_approx_equal(bond_length(&p1, &p2), 5.0));
    }

    #[test]
    fn right_angle_geometry_yields_half_pi() {
        let a = Point3::new(1.0, 0.0, 0.0);
        let b = Point3::new(0.0, 0.0, 0.0);
        let c = Point3::new(0.0, 1.0, 0.0);
        assert!(f64_approx_equal(bond_angle(&a, &b, &c), PI / 2.0));
    }

    #[test]
    fn collinear_chain_yields_pi() {
        let a = Point3::new(-1.0, 0.0, 0.0);
        let b = Point3::new(0.0, 0.0, 0.0);
        let c = Point3::new(2.0, 0.0, 0.0);
        assert!(f64_approx_equal(bond_angle(&a, &b, &c), PI));
    }

    #[test]
    fn cis_chain_yields_zero_dihedral() {
        let a = Point3::new(-1.0, 1.0, 0.0);
        let b = Point3::new(0.0, 0.0, 0.0);
        let c = Point3::new(1.0, 0.0, 0.0);
        let d = Point3::new(2.0, 1.0, 0.0);
        assert!(dihedral_angle(&a, &b, &c, &d).abs() < 1e-6);
    }

    #[test]
    fn trans_chain_yields_pi_dihedral() {
        let a = Point3::new(-1.0, 1.0, 0.0);
        let b = Point3::new(0.0, 0.0, 0.0);
        let c = Point3::new(1.0, 0.0, 0.0);
        let d = Point3::new(2.0, -1.0, 0.0);
        assert!((dihedral_angle(&a, &b, &c, &d).abs() - PI).abs() < 1e-6);
    }

    #[test]
    fn perpendicular_chain_yields_signed_quarter_turns() {
        let a = Point3::new(-1.0, 1.0, 0.0);
        let b = Point3::new(0.0, 0.0, 0.0);
        let c = Point3::new(1.0, 0.0, 0.0);
        let up = Point3::new(2.0, 0.0, 1.0);
        let down = Point3::new(2.0, 0.0, -1.0);
        let phi_up = dihedral_angle(&a, &b, &c, &up);
        let phi_down = dihedral_angle(&a, &b, &c, &down);
        assert!(f64_approx_equal(phi_up.abs(), PI / 2.0));
        assert!(f64_approx_equal(phi_down.abs(), PI / 2.0));
        assert!(f64_approx_equal(phi_up, -phi_down));
    }

    #[test]
    fn planar_threefold_center_has_zero_out_of_plane_angle() {
        let center = Point3::new(0.0, 0.0, 0.0);
        let t1 = Point3::new(1.0, 0.0, 0.0);
        let t2 = Point3::new(-0.5, 0.866, 0.0);
        let t3 = Point3::new(-0.5, -0.866, 0.0);
        let phi = out_of_plane_angle(&center, &t1, &t2, &t3);
        assert!(phi.abs() < 1e-6);
    }

    #[test]
    fn pyramidal_threefold_center_has_positive_out_of_plane_angle() {
        let center = Point3::new(0.0, 0.0, 0.3);
        let t1 = Point3::new(1.0, 0.0, 0.0);
        let t2 = Point3::new(-0.5, 0.866, 0.0);
        let t3 = Point3::new(-0.5, -0.866, 0.0);
        let phi = out_of_plane_angle(&center, &t1, &t2, &t3);
        assert!(phi > 0.1);
    }

    #[test]
    fn xyz_string_has_count_title_and_coordinate_lines() {
        let mut mol = Molecule::new("water", 0);
        mol.add_atom(Atom::new("O", Point3::new(0.0, 0.0, 0.0)).unwrap());
        mol.add_atom(Atom::new("H", Point3::new(0.957, 0.0, 0.0)).unwrap());
        mol.add_atom(Atom::new("H", Point3::new(-0.24, 0.927, 0.0)).unwrap());
        let text = xyz_string(&mol);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "3");
        assert_eq!(lines[1], "water");
        assert!(lines[2].starts_with("O"));
        assert!(lines[3].contains("0.95700000"));
    }
}
