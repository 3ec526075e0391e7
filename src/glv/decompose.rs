// -*- mode: rust; -*-
//
// This file is part of bn254-endo.
// See LICENSE for licensing information.

//! Scalar decomposition against the endomorphism lattice.
//!
//! Multiplication by the endomorphism eigenvalue is a lattice relation:
//! the vectors \\((v_0, \dots, v_{M-1})\\) with
//! \\(v_0 + v_1 \lambda + \dots + v_{M-1} \lambda^{M-1} \equiv 0 \pmod r\\)
//! form a lattice of determinant \\(\pm r\\), and a short basis for it is
//! known from the curve parameters.  Rounding \\((k, 0, \dots, 0)\\) to the
//! nearest lattice vector (Babai) and subtracting leaves a remainder whose
//! coordinates — the mini-scalars — are only about \\(1/M\\) the width of
//! \\(k\\).
//!
//! The rounding itself divides by the determinant.  To keep that division
//! constant-time it is pre-computed: each Babai entry stores
//! \\(\lfloor 2^{256} \cdot |w_i| \rfloor\\) for the rational rounding
//! weight \\(w_i\\), so at runtime the quotient is just the upper half of a
//! 256x256-bit product.  Truncation rounds toward \\(-\infty\\) once the
//! stored sign is folded in (negative entries add one).

use subtle::Choice;

use zeroize::Zeroize;

use crate::bigint::BigInt;
use crate::scalar::Scalar;

/// The per-curve decomposition tables: the Babai rounding vector and the
/// lattice basis, each entry a magnitude with a separate sign.
pub(crate) struct DecompositionParams<const M: usize> {
    /// `floor(2^256 * |row_i of B^-1|)` with its sign.
    pub babai: [(BigInt<4>, bool); M],
    /// The lattice basis, row-major, magnitudes with signs.
    pub lattice: [[(BigInt<4>, bool); M]; M],
}

/// Split `scalar` into `M` non-negative mini-scalars and their sign flags.
///
/// The mini-scalars satisfy
/// \\(\sum_i \mathrm{sign}_i \cdot m_i \cdot \lambda^i \equiv k \pmod r\\)
/// and each fits in \\(\lceil 254/M \rceil + 1\\) bits.  The flags tell the
/// caller which endomorphism images to negate so the minis can be treated
/// as unsigned from here on.
///
/// Everything is constant-time in `scalar`; the only branches are on the
/// compile-time parameter tables.
pub(crate) fn decompose<const M: usize>(
    scalar: &Scalar,
    params: &DecompositionParams<M>,
) -> ([BigInt<2>; M], [Choice; M]) {
    let k = &scalar.0;

    // alpha_i = floor(k * w_i): the upper words of the wide product, plus
    // one for the negative entries to round toward -infinity.
    let mut alphas = [BigInt::<4>::ZERO; M];
    for i in 0..M {
        alphas[i] = params.babai[i].0.mul_high(k);
        if params.babai[i].1 {
            alphas[i].add_assign_word(1);
        }
    }

    // k_i = (k, 0, ..., 0)_i - sum_b alpha_b * basis[b][i], accumulated in
    // 256-bit two's complement.  The subtraction flips to an addition when
    // the entry sign and the Babai sign disagree... which is their XOR,
    // since a negative Babai entry means alpha_b carries an implicit minus.
    let mut ks = [BigInt::<4>::ZERO; M];
    ks[0] = *k;

    let mut minis = [BigInt::<2>::ZERO; M];
    let mut signs = [Choice::from(0); M];

    for i in 0..M {
        for b in 0..M {
            let (ref magnitude, entry_is_neg) = params.lattice[b][i];
            // Compile-time table entries: branching here is public.
            if *magnitude == BigInt::ZERO {
                continue;
            }
            let alpha_b = if *magnitude == BigInt::ONE {
                alphas[b]
            } else {
                alphas[b].mul_low(magnitude)
            };
            if entry_is_neg ^ params.babai[b].1 {
                ks[i] = ks[i].wrapping_add(&alpha_b);
            } else {
                ks[i] = ks[i].wrapping_sub(&alpha_b);
            }
        }

        // Extract the two's complement sign, fold it out, truncate to the
        // mini-scalar width.
        let is_neg = ks[i].is_msb_set();
        signs[i] = is_neg;
        ks[i].cneg(is_neg);
        minis[i] = ks[i].truncate2();
    }

    alphas.zeroize();
    ks.zeroize();

    (minis, signs)
}

// ------------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::constants::{G1_DECOMPOSITION, G2_DECOMPOSITION, LAMBDA, MU};
    use crate::testutil::random_scalar;

    /// Lift a mini-scalar back to a `Scalar` with its sign applied.
    fn signed_scalar(mini: &BigInt<2>, sign: Choice) -> Scalar {
        let s = Scalar::from_limbs([mini.limbs[0], mini.limbs[1], 0, 0]);
        if bool::from(sign) {
            -&s
        } else {
            s
        }
    }

    struct KnownDecomposition {
        k: [u64; 4],
        mini0: [u64; 2],
        mini1: [u64; 2],
    }

    static KNOWN: [KnownDecomposition; 3] = [
        KnownDecomposition {
            k: [
                0x6f0a_e08f_8229_b3f3,
                0x373a_ebf9_2026_5c69,
                0xf001_8c95_d7fa_b106,
                0x24a0_b872_03c7_a8de,
            ],
            mini0: [0xcc9a_25d0_d953_dbfe, 0x1492_8105_460c_820c],
            mini1: [0x844b_901d_e6f4_1660, 0x13a2_f911_eb48_a578],
        },
        KnownDecomposition {
            k: [
                0xcebd_d184_2b30_92c4,
                0xd737_fc8d_83f7_692f,
                0xc51c_551d_ea8b_058c,
                0x2455_4fa6_d0c0_6f6d,
            ],
            mini0: [0xe82f_c419_e90c_c3a2, 0x028c_f742_9c3f_f8f7],
            mini1: [0x6087_df36_430a_6db6, 0x457e_fc20_1bdb_3d2e],
        },
        KnownDecomposition {
            k: [
                0xfe5f_b709_881e_6717,
                0xe75d_0555_67ff_4e05,
                0x4e56_aeb7_0eab_f269,
                0x288c_20b2_97b9_808f,
            ],
            mini0: [0x0c90_2eb5_42aa_a66b, 0x4da8_c411_566c_77e0],
            mini1: [0xf066_7770_2bd4_e41a, 0x5aa8_f2f1_5afc_3217],
        },
    ];

    #[test]
    fn known_g1_decompositions() {
        for case in KNOWN.iter() {
            let k = Scalar::from_limbs(case.k);
            let (minis, signs) = decompose(&k, &G1_DECOMPOSITION);
            assert_eq!(minis[0], BigInt::from_limbs(case.mini0));
            assert_eq!(minis[1], BigInt::from_limbs(case.mini1));
            assert_eq!(signs[0].unwrap_u8(), 0);
            assert_eq!(signs[1].unwrap_u8(), 0);
        }
    }

    #[test]
    fn g1_decomposition_recombines() {
        let mut rng = rand::thread_rng();
        for _ in 0..100 {
            let k = random_scalar(&mut rng);
            let (minis, signs) = decompose(&k, &G1_DECOMPOSITION);
            // m0 + m1 * lambda == k (mod r)
            let recombined = &signed_scalar(&minis[0], signs[0])
                + &(&signed_scalar(&minis[1], signs[1]) * &LAMBDA);
            assert_eq!(recombined, k);
        }
    }

    #[test]
    fn g2_decomposition_recombines() {
        let mut rng = rand::thread_rng();
        for _ in 0..100 {
            let k = random_scalar(&mut rng);
            let (minis, signs) = decompose(&k, &G2_DECOMPOSITION);
            // sum_i m_i * mu^i == k (mod r)
            let mut recombined = Scalar::ZERO;
            let mut mu_power = Scalar::ONE;
            for i in 0..4 {
                recombined = &recombined + &(&signed_scalar(&minis[i], signs[i]) * &mu_power);
                mu_power = &mu_power * &MU;
            }
            assert_eq!(recombined, k);
            // the quarter-width minis fit 65 bits
            for mini in minis.iter() {
                assert_eq!(mini.limbs[1] >> 1, 0);
            }
        }
    }

    #[test]
    fn degenerate_scalars_decompose() {
        for k in [Scalar::ZERO, Scalar::ONE, -&Scalar::ONE] {
            let (minis, signs) = decompose(&k, &G1_DECOMPOSITION);
            let recombined = &signed_scalar(&minis[0], signs[0])
                + &(&signed_scalar(&minis[1], signs[1]) * &LAMBDA);
            assert_eq!(recombined, k);
        }
    }
}
