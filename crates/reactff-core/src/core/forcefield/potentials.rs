pub const PAIR_EXPONENT_HARDNESS_SCALE: f64 = 1.2;
pub const PAIR_EXPONENT_EN_SCALE: f64 = 0.4;
pub const DISTANCE_DAMPING_STRENGTH: f64 = 0.11;
pub const PAULI_PREFACTOR: f64 = 0.3;
pub const PAULI_STEEPNESS: f64 = 7.5;
pub const ONE_FOUR_COULOMB_SCALE: f64 = 0.5;
pub const DISPERSION_DAMPING_STEEPNESS: f64 = 20.0;
pub const BJ_DAMPING_A1: f64 = 0.4;
pub const BJ_DAMPING_A2: f64 = 2.7;
/// Sigmoid exponent past which the damping no longer outruns r^-6.
const DISPERSION_EXPONENT_LIMIT: f64 = 15.0;

#[inline]
pub fn harmonic(x: f64, x0: f64, k: f64) -> f64 {
    0.5 * k * (x - x0) * (x - x0)
}

#[inline]
pub fn generalized_lennard_jones(dist: f64, r0: f64, k: f64, a: f64) -> f64 {
    if dist < 1e-6 {
        return 1e10;
    }
    let rho_half = (r0 / dist).powf(0.5 * a);
    k * (rho_half * rho_half - 2.0 * rho_half + 1.0)
}

#[inline]
pub fn pair_exponent(hardness1: f64, hardness2: f64, en1: f64, en2: f64) -> f64 {
    let delta_en = en1 - en2;
    PAIR_EXPONENT_HARDNESS_SCALE * (hardness1 * hardness2).sqrt()
        + PAIR_EXPONENT_EN_SCALE * delta_en * delta_en
}

#[inline]
pub fn cosine_bend(theta: f64, theta0: f64, k: f64) -> f64 {
    let delta = theta0.cos() - theta.cos();
    k * delta * delta
}

#[inline]
pub fn cosine_torsion(phi: f64, phi0: f64, k: f64) -> f64 {
    k * (1.0 - (phi - phi0).cos())
}

#[inline]
pub fn threefold_torsion(phi: f64, phi0: f64, k: f64) -> f64 {
    k * (1.0 - (3.0 * (phi - phi0)).cos())
}

#[inline]
pub fn distance_damping(dist: f64, r_cov_sum: f64) -> f64 {
    let rho = dist / r_cov_sum;
    1.0 / (1.0 + DISTANCE_DAMPING_STRENGTH * rho.powi(4))
}

#[inline]
pub fn hydrogen_bond(
    dist_ah: f64,
    dist_bh: f64,
    dist_ab: f64,
    cos_theta: f64,
    strength_a: f64,
    strength_b: f64,
    r_cut: f64,
) -> f64 {
    if dist_ab < 1e-6 || dist_ah + dist_bh < 1e-6 {
        return 0.0;
    }
    let blend = (strength_a * dist_bh + strength_b * dist_ah) / (dist_ah + dist_bh);
    let angular = (0.5 * (cos_theta + 1.0)).powi(6);
    let radial = 1.0 / (1.0 + (dist_ab / r_cut).powi(12));
    -blend * angular * radial / (dist_ab * dist_ab * dist_ab)
}

#[inline]
pub fn pauli_repulsion(dist: f64, valence1: f64, valence2: f64, r_cut: f64) -> f64 {
    if r_cut < 1e-6 {
        return 0.0;
    }
    PAULI_PREFACTOR * (valence1 * valence2).sqrt() * (-PAULI_STEEPNESS * dist / r_cut).exp()
}

#[inline]
pub fn coulomb(dist: f64, q1: f64, q2: f64) -> f64 {
    if dist < 1e-6 {
        return q1.signum() * q2.signum() * 1e10;
    }
    q1 * q2 / dist
}

#[inline]
pub fn dispersion_zero_damped(dist: f64, c6: f64, r_vdw_sum: f64, s6: f64) -> f64 {
    if dist < 1e-6 {
        return 0.0;
    }
    // Positive-exponent form of the sigmoid damping. Deep inside the
    // contact distance the exponential suppression loses to r^-6, so the
    // term is cut to zero there instead of diverging.
    let exponent = DISPERSION_DAMPING_STEEPNESS * (1.0 - dist / r_vdw_sum);
    if exponent > DISPERSION_EXPONENT_LIMIT {
        return 0.0;
    }
    let damping = 1.0 / (1.0 + exponent.exp());
    -s6 * damping * c6 / dist.powi(6)
}

#[inline]
pub fn dispersion_becke_johnson(dist: f64, c6: f64, c8: f64) -> f64 {
    if dist < 1e-6 || c6 < 1e-12 {
        return 0.0;
    }
    let r0 = (c8 / c6).sqrt();
    let f = BJ_DAMPING_A1 * r0 + BJ_DAMPING_A2;
    -c6 / (dist.powi(6) + f.powi(6)) - c8 / (dist.powi(8) + f.powi(8))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    fn f64_approx_equal(a: f64, b: f64) -> bool {
        (a - b).abs() < TOLERANCE
    }

    #[test]
    fn harmonic_is_zero_at_equilibrium() {
        assert!(f64_approx_equal(harmonic(1.5, 1.5, 2.0), 0.0));
    }

    #[test]
    fn harmonic_is_symmetric_about_equilibrium() {
        assert!(f64_approx_equal(
            harmonic(1.0, 1.5, 2.0),
            harmonic(2.0, 1.5, 2.0)
        ));
    }

    #[test]
    fn generalized_lennard_jones_is_zero_at_equilibrium() {
        assert!(f64_approx_equal(
            generalized_lennard_jones(1.2, 1.2, 0.5, 8.0),
            0.0
        ));
    }

    #[test]
    fn generalized_lennard_jones_rises_on_both_sides_of_equilibrium() {
        let compressed = generalized_lennard_jones(1.0, 1.2, 0.5, 8.0);
        let stretched = generalized_lennard_jones(1.5, 1.2, 0.5, 8.0);
        assert!(compressed > 0.0);
        assert!(stretched > 0.0);
    }

    #[test]
    fn generalized_lennard_jones_at_very_small_distance_returns_large_positive_energy() {
        assert!(f64_approx_equal(
            generalized_lennard_jones(1e-7, 1.2, 0.5, 8.0),
            1e10
        ));
    }

    #[test]
    fn pair_exponent_grows_with_electronegativity_difference() {
        let symmetric = pair_exponent(5.0, 5.0, 2.5, 2.5);
        let polar = pair_exponent(5.0, 5.0, 2.5, 3.5);
        assert!(polar > symmetric);
        assert!(f64_approx_equal(polar - symmetric, PAIR_EXPONENT_EN_SCALE));
    }

    #[test]
    fn cosine_bend_has_minima_at_both_signed_equilibria() {
        let theta0 = 1.9;
        assert!(f64_approx_equal(cosine_bend(theta0, theta0, 0.7), 0.0));
        assert!(f64_approx_equal(cosine_bend(-theta0, theta0, 0.7), 0.0));
        assert!(cosine_bend(1.0, theta0, 0.7) > 0.0);
    }

    #[test]
    fn cosine_torsion_is_zero_at_equilibrium_and_maximal_opposite() {
        assert!(f64_approx_equal(cosine_torsion(0.3, 0.3, 1.1), 0.0));
        assert!(f64_approx_equal(
            cosine_torsion(0.3 + std::f64::consts::PI, 0.3, 1.1),
            2.2
        ));
    }

    #[test]
    fn threefold_torsion_repeats_every_120_degrees() {
        let third = 2.0 * std::f64::consts::PI / 3.0;
        let e1 = threefold_torsion(0.4, 0.1, 0.9);
        let e2 = threefold_torsion(0.4 + third, 0.1, 0.9);
        assert!(f64_approx_equal(e1, e2));
    }

    #[test]
    fn distance_damping_is_near_unity_at_short_range_and_decays() {
        let near = distance_damping(0.5, 1.5);
        let far = distance_damping(6.0, 1.5);
        assert!(near > 0.99);
        assert!(far < 0.05);
    }

    #[test]
    fn hydrogen_bond_is_attractive_in_linear_arrangement() {
        let energy = hydrogen_bond(1.0, 1.8, 2.8, 1.0, 1.3, 0.8, 3.0);
        assert!(energy < 0.0);
    }

    #[test]
    fn hydrogen_bond_vanishes_when_fully_bent() {
        // cos(theta) = -1 zeroes the angular factor entirely.
        let energy = hydrogen_bond(1.0, 1.8, 2.8, -1.0, 1.3, 0.8, 3.0);
        assert!(f64_approx_equal(energy, 0.0));
    }

    #[test]
    fn hydrogen_bond_blend_reduces_to_single_factor_for_equal_strengths() {
        let energy = hydrogen_bond(1.2, 1.2, 2.4, 1.0, 0.9, 0.9, 3.0);
        let expected = -0.9 * (1.0 / (1.0 + (2.4_f64 / 3.0).powi(12))) / 2.4_f64.powi(3);
        assert!(f64_approx_equal(energy, expected));
    }

    #[test]
    fn pauli_repulsion_decays_monotonically() {
        let near = pauli_repulsion(1.0, 4.0, 4.0, 3.0);
        let far = pauli_repulsion(4.0, 4.0, 4.0, 3.0);
        assert!(near > far);
        assert!(far > 0.0);
    }

    #[test]
    fn coulomb_sign_follows_charge_product() {
        assert!(coulomb(2.0, 0.3, 0.3) > 0.0);
        assert!(coulomb(2.0, 0.3, -0.3) < 0.0);
        assert!(f64_approx_equal(coulomb(2.0, 0.4, 0.5), 0.1));
    }

    #[test]
    fn dispersion_zero_damped_is_cut_to_zero_at_short_range() {
        // dist/r_vdw_sum near zero pushes the sigmoid exponent past the
        // limit; the contribution must be exactly zero, not divergent.
        let energy = dispersion_zero_damped(1e-3, 10.0, 3.4, 1.0);
        assert!(f64_approx_equal(energy, 0.0));
    }

    #[test]
    fn dispersion_zero_damped_vanishes_across_compressed_distances() {
        // r^-6 alone would diverge here; the cut must win at every scale.
        for dist in [1e-2, 1e-3, 1e-4] {
            assert!(f64_approx_equal(
                dispersion_zero_damped(dist, 10.0, 3.4, 1.0),
                0.0
            ));
        }
    }

    #[test]
    fn dispersion_zero_damped_approaches_plain_r6_at_long_range() {
        let dist = 12.0;
        let energy = dispersion_zero_damped(dist, 10.0, 3.4, 1.0);
        let plain = -10.0 / dist.powi(6);
        assert!((energy - plain).abs() < 1e-12);
    }

    #[test]
    fn dispersion_becke_johnson_is_finite_at_zero_separation_limit() {
        let energy = dispersion_becke_johnson(0.01, 10.0, 40.0);
        assert!(energy.is_finite());
        assert!(energy < 0.0);
    }

    #[test]
    fn dispersion_becke_johnson_is_attractive_at_contact() {
        let energy = dispersion_becke_johnson(3.0, 10.0, 40.0);
        assert!(energy < 0.0);
    }
}
