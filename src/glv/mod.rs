// -*- mode: rust; -*-
//
// This file is part of bn254-endo.
// See LICENSE for licensing information.

//! Constant-time scalar multiplication accelerated by curve endomorphisms.
//!
//! The pipeline for \\(\[k\]P\\):
//!
//! 1. derive the endomorphism images \\(\varphi(P), \dots\\) of the base
//!    point (`curve::g1`, `curve::g2`);
//! 2. decompose \\(k\\) into `M` short mini-scalars and sign flags
//!    (`decompose`);
//! 3. negate the images whose mini-scalar came out negative, and force the
//!    first mini-scalar odd, remembering the original parity;
//! 4. recode the mini-scalars into sign-aligned columns (`recode`);
//! 5. build the `2^(M-1)`-entry lookup table (`table`);
//! 6. walk the columns most-significant first: double, constant-time
//!    lookup, conditional negate, complete mixed add;
//! 7. subtract the (sign-normalized) base point if the first mini-scalar
//!    was originally even.
//!
//! Steps 2-7 touch secret data and are constant-time throughout: the loop
//! lengths depend only on the curve, lookups scan the whole table, and
//! every conditional is a `subtle` selection.  Step 7 runs
//! unconditionally and selects the corrected or uncorrected result.

use core::ops::Mul;

use subtle::Choice;
use subtle::ConditionallySelectable;

use zeroize::Zeroize;

use crate::bigint::BigInt;
use crate::constants;
use crate::curve::{AffinePoint, Bn254G1, Bn254G2, Curve, ProjectivePoint};
use crate::scalar::Scalar;

pub(crate) mod decompose;
pub(crate) mod recode;
pub(crate) mod table;

use self::decompose::decompose;
use self::recode::{GlvSac, W2Recoded, W2_WINDOWS};
use self::table::{w2_table, LookupTable};

/// Bit width of the scalar field.
const SCALAR_BITS: usize = 254;

/// Mini-scalar width for an `M`-dimensional decomposition:
/// one bit of headroom over an even `M`-way split.
const fn mini_scalar_digits(m: usize) -> usize {
    (SCALAR_BITS + m - 1) / m + 1
}

/// Mini-scalar digit count for the M=2 (G1) decomposition.
const G1_DIGITS: usize = mini_scalar_digits(2);
/// Packed column bytes for the M=2 recoding.
const G1_COL_BYTES: usize = (G1_DIGITS + 7) / 8;
/// Mini-scalar digit count for the M=4 (G2) decomposition.
const G2_DIGITS: usize = mini_scalar_digits(4);
/// Packed column bytes for the M=4 recoding.
const G2_COL_BYTES: usize = (G2_DIGITS + 7) / 8;

/// Compute \\(\[k\]P\\) on \\(\mathbb G_1\\) in constant time, via the
/// 2-dimensional GLV decomposition.
///
/// The point must lie in the prime-order group (on G1 the whole curve
/// does); the scalar is interpreted modulo the group order.
pub fn mul_g1(point: &AffinePoint<Bn254G1>, scalar: &Scalar) -> ProjectivePoint<Bn254G1> {
    let (minis, signs) = decompose(scalar, &constants::G1_DECOMPOSITION);
    let images = [*point, point.endomorphism()];
    mul_endo::<Bn254G1, 2, 2, G1_COL_BYTES>(images, signs, minis, G1_DIGITS)
}

/// Compute \\(\[k\]Q\\) on \\(\mathbb G_2\\) in constant time, via the
/// 4-dimensional GLV+GLS decomposition.
///
/// The point **must** lie in the order-`r` subgroup of the twist (i.e. be
/// cofactor-cleared); for points outside it the result is unspecified,
/// though still computed in constant time.
pub fn mul_g2(point: &AffinePoint<Bn254G2>, scalar: &Scalar) -> ProjectivePoint<Bn254G2> {
    let (minis, signs) = decompose(scalar, &constants::G2_DECOMPOSITION);
    let psi = point.psi();
    let psi2 = psi.psi();
    let psi3 = psi2.psi();
    let images = [*point, psi, psi2, psi3];
    mul_endo::<Bn254G2, 4, 8, G2_COL_BYTES>(images, signs, minis, G2_DIGITS)
}

/// The shared accumulation ladder: sign-normalize, recode, build the
/// table, walk the columns, correct for the parity adjustment.
fn mul_endo<C: Curve, const M: usize, const T: usize, const B: usize>(
    mut images: [AffinePoint<C>; M],
    signs: [Choice; M],
    mut minis: [BigInt<2>; M],
    digits: usize,
) -> ProjectivePoint<C> {
    // Fold the decomposition signs into the points so the mini-scalars
    // are non-negative from here on.
    for (image, sign) in images.iter_mut().zip(signs.iter()) {
        image.conditional_negate(*sign);
    }

    // The recoding needs an odd first mini-scalar; add one if it is even
    // and remember to subtract the base point at the end.
    let k0_was_odd = minis[0].is_odd();
    minis[0].cadd(&BigInt::ONE, !k0_was_odd);

    let mut sac = GlvSac::<M, B>::recode(&minis, digits);
    let mut table = LookupTable::<C, T>::from_endo_images(&images);

    // The top column position has a guaranteed positive sign, so the
    // accumulator initializes directly from the table.
    let top = sac.len() - 1;
    let mut q = ProjectivePoint::from(&table.select(sac.table_index(top)));
    for i in (0..top).rev() {
        q = q.double();
        let mut t = table.select(sac.table_index(i));
        t.conditional_negate(sac.sign(i));
        q = q.add_mixed(&t);
    }

    // Undo the parity adjustment: always compute Q - P0 and keep Q when
    // the first mini-scalar was already odd.
    let corrected = q.add_mixed(&-&images[0]);
    q.conditional_assign(&corrected, !k0_was_odd);

    minis.zeroize();
    sac.zeroize();
    table.zeroize();
    q
}

/// Compute \\(\[k\]P\\) on \\(\mathbb G_1\\) in constant time with the
/// 2-bit-windowed ladder (`m2w2`).
///
/// Same contract as [`mul_g1`]; trades a larger (8-entry) table for half
/// as many loop iterations.
pub fn mul_g1_w2(point: &AffinePoint<Bn254G1>, scalar: &Scalar) -> ProjectivePoint<Bn254G1> {
    let (mut minis, signs) = decompose(scalar, &constants::G1_DECOMPOSITION);
    let mut images = [*point, point.endomorphism()];
    for (image, sign) in images.iter_mut().zip(signs.iter()) {
        image.conditional_negate(*sign);
    }

    let k0_was_odd = minis[0].is_odd();
    minis[0].cadd(&BigInt::ONE, !k0_was_odd);

    let mut recoded = W2Recoded::recode(&minis);
    let mut table = w2_table(&images[0], &images[1]);

    // The top window is one of {+1, +3} times P0 (plus the P1 component):
    // never negative, so the accumulator initializes from the table.
    let (index, _) = recoded.window(W2_WINDOWS - 1);
    let mut q = ProjectivePoint::from(&table.select(index));
    for i in (0..W2_WINDOWS - 1).rev() {
        q = q.double();
        q = q.double();
        let (index, is_neg) = recoded.window(i);
        let mut t = table.select(index);
        t.conditional_negate(is_neg);
        q = q.add_mixed(&t);
    }

    let corrected = q.add_mixed(&-&images[0]);
    q.conditional_assign(&corrected, !k0_was_odd);

    minis.zeroize();
    recoded.zeroize();
    table.zeroize();
    q
}

// ------------------------------------------------------------------------
// Operator sugar
// ------------------------------------------------------------------------

impl<'a, 'b> Mul<&'b Scalar> for &'a AffinePoint<Bn254G1> {
    type Output = ProjectivePoint<Bn254G1>;
    fn mul(self, scalar: &'b Scalar) -> ProjectivePoint<Bn254G1> {
        mul_g1(self, scalar)
    }
}

impl<'a, 'b> Mul<&'b AffinePoint<Bn254G1>> for &'a Scalar {
    type Output = ProjectivePoint<Bn254G1>;
    fn mul(self, point: &'b AffinePoint<Bn254G1>) -> ProjectivePoint<Bn254G1> {
        mul_g1(point, self)
    }
}

impl<'a, 'b> Mul<&'b Scalar> for &'a AffinePoint<Bn254G2> {
    type Output = ProjectivePoint<Bn254G2>;
    fn mul(self, scalar: &'b Scalar) -> ProjectivePoint<Bn254G2> {
        mul_g2(self, scalar)
    }
}

impl<'a, 'b> Mul<&'b AffinePoint<Bn254G2>> for &'a Scalar {
    type Output = ProjectivePoint<Bn254G2>;
    fn mul(self, point: &'b AffinePoint<Bn254G2>) -> ProjectivePoint<Bn254G2> {
        mul_g2(point, self)
    }
}

define_mul_variants!(
    LHS = AffinePoint<Bn254G1>,
    RHS = Scalar,
    Output = ProjectivePoint<Bn254G1>
);
define_mul_variants!(
    LHS = Scalar,
    RHS = AffinePoint<Bn254G1>,
    Output = ProjectivePoint<Bn254G1>
);
define_mul_variants!(
    LHS = AffinePoint<Bn254G2>,
    RHS = Scalar,
    Output = ProjectivePoint<Bn254G2>
);
define_mul_variants!(
    LHS = Scalar,
    RHS = AffinePoint<Bn254G2>,
    Output = ProjectivePoint<Bn254G2>
);

// ------------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------------
