// -*- mode: rust; -*-
//
// This file is part of bn254-endo.
// See LICENSE for licensing information.

//! Pre-computed BN254 parameters: endomorphism coefficients, generators,
//! and the lattice tables driving scalar decomposition.
//!
//! All values derive from the BN254 seed \\(x = \mathtt{0x44E992B44A6909F1}\\):
//! the lattice entries are small polynomials in \\(x\\) (for example
//! \\(2x+1\\) and \\(6x^2+2x\\)), and the Babai entries are the floors of
//! \\(2^{256}\\) times the rows of the inverted lattice basis.  Field
//! constants are stored in Montgomery form, scalars in canonical form.

use crate::bigint::BigInt;
use crate::field::fp::FieldElement;
use crate::field::fp2::Fp2;
use crate::glv::decompose::DecompositionParams;
use crate::scalar::Scalar;

// ------------------------------------------------------------------------
// G1 endomorphism
// ------------------------------------------------------------------------

/// The non-trivial cube root of unity \\(\beta \in \mathbb F_p\\) defining
/// the \\(\mathbb G_1\\) endomorphism \\(\varphi(x, y) = (\beta x, y)\\).
pub const BETA: FieldElement = FieldElement::from_montgomery_limbs([
    0x3350_c88e_13e8_0b9c,
    0x7dce_557c_db5e_56b9,
    0x6001_b4b8_b615_564a,
    0x2682_e617_0202_17e0,
]);

/// The eigenvalue \\(\lambda\\) of \\(\varphi\\) on \\(\mathbb G_1\\):
/// a cube root of unity modulo the group order, with
/// \\(\varphi(P) = \[\lambda\]P\\).
pub const LAMBDA: Scalar = Scalar::from_limbs([
    0xb8ca_0b2d_3663_6f23,
    0xcc37_a73f_ec2b_c5e9,
    0x048b_6e19_3fd8_4104,
    0x3064_4e72_e131_a029,
]);

// ------------------------------------------------------------------------
// G2 endomorphism
// ------------------------------------------------------------------------

/// The eigenvalue of \\(\psi\\) on \\(\mathbb G_2\\): \\(6x^2 = p \bmod r\\),
/// with \\(\psi(Q) = \[6x^2\]Q\\).
pub const MU: Scalar = Scalar::from_limbs([
    0xf83e_9682_e87c_fd46,
    0x6f4d_8248_eeb8_59fb,
    0x0000_0000_0000_0000,
    0x0000_0000_0000_0000,
]);

/// \\(\xi^{(p-1)/3}\\) for \\(\xi = 9 + u\\): the x-coordinate coefficient
/// of the untwist-Frobenius-twist endomorphism \\(\psi\\).
pub(crate) const PSI_COEFF_X: Fp2 = Fp2::new(
    FieldElement::from_montgomery_limbs([
        0xb577_3b10_4563_ab30,
        0x347f_91c8_a9aa_6454,
        0x7a00_7127_242e_0991,
        0x1956_bcd8_1182_14ec,
    ]),
    FieldElement::from_montgomery_limbs([
        0x6e84_9f1e_a0aa_4757,
        0xaa1c_7b6d_89f8_9141,
        0xb6e7_13cd_fae0_ca3a,
        0x2669_4fbb_4e82_ebc3,
    ]),
);

/// \\(\xi^{(p-1)/2}\\): the y-coordinate coefficient of \\(\psi\\).
pub(crate) const PSI_COEFF_Y: Fp2 = Fp2::new(
    FieldElement::from_montgomery_limbs([
        0xe4bb_dd0c_2936_b629,
        0xbb30_f162_e133_bacb,
        0x31a9_d1b6_f964_5366,
        0x2535_70be_a500_f8dd,
    ]),
    FieldElement::from_montgomery_limbs([
        0xa1d7_7ce4_5ffe_77c7,
        0x07af_fd11_7826_d1db,
        0x6d16_bd27_bb7e_dc6b,
        0x2c87_2002_85de_fecc,
    ]),
);

// ------------------------------------------------------------------------
// Curve coefficients and generators
// ------------------------------------------------------------------------

/// The constant `b = 3` of the G1 curve equation, in Montgomery form.
pub(crate) const G1_B: FieldElement = FieldElement::from_montgomery_limbs([
    0x7a17_caa9_50ad_28d7,
    0x1f6a_c17a_e155_21b9,
    0x334b_ea4e_696b_d284,
    0x2a1f_6744_ce17_9d8e,
]);

/// `3b = 9` for the complete-formula fast path on G1.
pub(crate) const G1_B3: FieldElement = FieldElement::from_montgomery_limbs([
    0xf606_47ce_410d_7ff7,
    0x2f3d_6f4d_d31b_d011,
    0x2943_337e_3940_c6d1,
    0x1d95_98e8_a7e3_9857,
]);

/// The G1 generator x-coordinate (the point `(1, 2)`).
pub(crate) const G1_GENERATOR_X: FieldElement = FieldElement::from_montgomery_limbs([
    0xd35d_438d_c58f_0d9d,
    0x0a78_eb28_f5c7_0b3d,
    0x666e_a36f_7879_462c,
    0x0e0a_77c1_9a07_df2f,
]);

/// The G1 generator y-coordinate.
pub(crate) const G1_GENERATOR_Y: FieldElement = FieldElement::from_montgomery_limbs([
    0xa6ba_871b_8b1e_1b3a,
    0x14f1_d651_eb8e_167b,
    0xccdd_46de_f0f2_8c58,
    0x1c14_ef83_340f_be5e,
]);

/// The constant `b' = 3/(9+u)` of the G2 twist equation.
pub(crate) const G2_B: Fp2 = Fp2::new(
    FieldElement::from_montgomery_limbs([
        0x3bf9_38e3_77b8_02a8,
        0x020b_1b27_3633_535d,
        0x26b7_edf0_4975_5260,
        0x2514_c632_4384_a86d,
    ]),
    FieldElement::from_montgomery_limbs([
        0x38e7_eccc_d1dc_ff67,
        0x65f0_b37d_93ce_0d3e,
        0xd749_d0dd_22ac_00aa,
        0x0141_b9ce_4a68_8d4d,
    ]),
);

/// `3b'` for the complete-formula fast path on G2.
pub(crate) const G2_B3: Fp2 = Fp2::new(
    FieldElement::from_montgomery_limbs([
        0x3baa_927c_b62e_0d6a,
        0xd71e_7c52_d1b6_64fd,
        0x0387_3e63_d95d_4664,
        0x0e75_b5b1_082a_b8f4,
    ]),
    FieldElement::from_montgomery_limbs([
        0xaab7_c666_7596_fe35,
        0x31d2_1a78_bb6a_27ba,
        0x85dd_7297_6804_01ff,
        0x03c5_2d6a_df39_a7e9,
    ]),
);

/// The standard G2 generator x-coordinate.
pub(crate) const G2_GENERATOR_X: Fp2 = Fp2::new(
    FieldElement::from_montgomery_limbs([
        0x8e83_b5d1_02bc_2026,
        0xdceb_1935_497b_0172,
        0xfbb8_2647_9781_1adf,
        0x1957_3841_af96_503b,
    ]),
    FieldElement::from_montgomery_limbs([
        0xafb4_737d_a84c_6140,
        0x6043_dd5a_5802_d8c4,
        0x09e9_50fc_52a0_2f86,
        0x14fe_f083_3aea_7b6b,
    ]),
);

/// The standard G2 generator y-coordinate.
pub(crate) const G2_GENERATOR_Y: Fp2 = Fp2::new(
    FieldElement::from_montgomery_limbs([
        0x619d_fa9d_886b_e9f6,
        0xfe7f_d297_f59e_9b78,
        0xff9e_1a62_231b_7dfe,
        0x28fd_7eeb_ae9e_4206,
    ]),
    FieldElement::from_montgomery_limbs([
        0x6409_5b56_c718_56ee,
        0xdc57_f922_327d_3cbb,
        0x55f9_35be_3335_1076,
        0x0da4_a0e6_93fd_6482,
    ]),
);

// ------------------------------------------------------------------------
// Decomposition lattices
// ------------------------------------------------------------------------

/// Shorthand for a one-limb lattice magnitude.
const fn word(w: u64) -> BigInt<4> {
    BigInt::from_limbs([w, 0, 0, 0])
}

/// `2x + 1`.
const TWO_X_PLUS_1: u64 = 0x89d3_2568_94d2_13e3;
/// `2x`.
const TWO_X: u64 = 0x89d3_2568_94d2_13e2;
/// `x`.
const X: u64 = 0x44e9_92b4_4a69_09f1;
/// `x + 1`.
const X_PLUS_1: u64 = 0x44e9_92b4_4a69_09f2;

/// GLV decomposition parameters for G1 (M = 2).
///
/// Basis rows: `(2x+1, 6x^2+4x+1)` and `(6x^2+2x, -(2x+1))`; determinant
/// `-r`.
pub(crate) static G1_DECOMPOSITION: DecompositionParams<2> = DecompositionParams {
    babai: [
        (
            BigInt::from_limbs([0xd91d_232e_c7e0_b3d7, 0x0000_0000_0000_0002, 0, 0]),
            false,
        ),
        (
            BigInt::from_limbs([
                0x5398_fd03_00ff_6565,
                0x4cce_f014_a773_d2d2,
                0x0000_0000_0000_0002,
                0,
            ]),
            false,
        ),
    ],
    lattice: [
        [
            (word(TWO_X_PLUS_1), false),
            (
                BigInt::from_limbs([0x0be4_e154_1221_250b, 0x6f4d_8248_eeb8_59fd, 0, 0]),
                false,
            ),
        ],
        [
            (
                BigInt::from_limbs([0x8211_bbeb_7d4f_1128, 0x6f4d_8248_eeb8_59fc, 0, 0]),
                false,
            ),
            (word(TWO_X_PLUS_1), true),
        ],
    ],
};

/// GLV+GLS decomposition parameters for G2 (M = 4).
///
/// Basis rows (entries are small polynomials in the curve seed `x`):
/// `(2x, x+1, -x, x)`, `(-x, x, -x, -(2x+1))`, `(x+1, x, x, -2x)`,
/// `(2x+1, -x, -(x+1), -x)`; determinant `-r`.
pub(crate) static G2_DECOMPOSITION: DecompositionParams<4> = DecompositionParams {
    babai: [
        (
            BigInt::from_limbs([
                0x46f4_bda9_95d5_1bb1,
                0x08e5_da66_fc71_84ae,
                0x9e80_318a_b0d9_2b93,
                0,
            ]),
            false,
        ),
        (
            BigInt::from_limbs([
                0x2dff_2915_32e4_2728,
                0x55b4_ca7b_a3e5_577f,
                0x9e80_318a_b0d9_2b95,
                0,
            ]),
            true,
        ),
        (
            BigInt::from_limbs([
                0x071c_4c43_fac4_daff,
                0x55b4_ca7b_a3e5_5782,
                0x9e80_318a_b0d9_2b95,
                0,
            ]),
            false,
        ),
        (
            BigInt::from_limbs([
                0xc170_977d_cef3_cd3f,
                0x55b4_ca7b_a3e5_577d,
                0x9e80_318a_b0d9_2b95,
                0,
            ]),
            false,
        ),
    ],
    lattice: [
        [
            (word(TWO_X), false),
            (word(X_PLUS_1), false),
            (word(X), true),
            (word(X), false),
        ],
        [
            (word(X), true),
            (word(X), false),
            (word(X), true),
            (word(TWO_X_PLUS_1), true),
        ],
        [
            (word(X_PLUS_1), false),
            (word(X), false),
            (word(X), false),
            (word(TWO_X), true),
        ],
        [
            (word(TWO_X_PLUS_1), false),
            (word(X), true),
            (word(X_PLUS_1), true),
            (word(X), true),
        ],
    ],
};

// ------------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn beta_is_a_nontrivial_cube_root_of_unity() {
        let beta_cubed = &(&BETA * &BETA) * &BETA;
        assert_eq!(beta_cubed, FieldElement::ONE);
        assert_ne!(BETA, FieldElement::ONE);
    }

    #[test]
    fn lambda_is_a_nontrivial_cube_root_of_unity() {
        let lambda_cubed = &(&LAMBDA * &LAMBDA) * &LAMBDA;
        assert_eq!(lambda_cubed, Scalar::ONE);
        assert_ne!(LAMBDA, Scalar::ONE);
        // lambda^2 + lambda + 1 == 0 (mod r)
        let sum = &(&(&LAMBDA * &LAMBDA) + &LAMBDA) + &Scalar::ONE;
        assert_eq!(sum, Scalar::ZERO);
    }

    #[test]
    fn mu_is_six_x_squared() {
        let x = Scalar::from_u64(X);
        let six = Scalar::from_u64(6);
        assert_eq!(MU, &six * &(&x * &x));
    }

    #[test]
    fn b3_constants_are_three_b() {
        let three_b = &(&G1_B + &G1_B) + &G1_B;
        assert_eq!(G1_B3, three_b);
        let three_b2 = &(&G2_B + &G2_B) + &G2_B;
        assert_eq!(G2_B3, three_b2);
    }

    #[test]
    fn seed_polynomial_identities() {
        // The one-word lattice entries are consistent with the seed.
        assert_eq!(TWO_X, 2 * X);
        assert_eq!(TWO_X_PLUS_1, 2 * X + 1);
        assert_eq!(X_PLUS_1, X + 1);
    }
}
