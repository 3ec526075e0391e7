// -*- mode: rust; -*-
//
// This file is part of bn254-endo.
// See LICENSE for licensing information.

//! Test-only helpers: a variable-time reference ladder and scalar sampling.

use rand::RngCore;

use crate::curve::{AffinePoint, Curve, ProjectivePoint};
use crate::scalar::Scalar;
use crate::traits::Identity;

/// Plain double-and-add over raw little-endian limbs.  Variable-time; the
/// correctness oracle for the constant-time implementations.
pub(crate) fn mul_limbs_vartime<C: Curve>(
    p: &AffinePoint<C>,
    limbs: &[u64; 4],
) -> ProjectivePoint<C> {
    let mut acc = ProjectivePoint::identity();
    for i in (0..256).rev() {
        acc = acc.double();
        if (limbs[i / 64] >> (i % 64)) & 1 == 1 {
            acc = acc.add_mixed(p);
        }
    }
    acc
}

/// Reference scalar multiplication `[k]P`.
pub(crate) fn mul_vartime<C: Curve>(p: &AffinePoint<C>, k: &Scalar) -> ProjectivePoint<C> {
    mul_limbs_vartime(p, &k.0.limbs)
}

/// A uniformly random scalar.
pub(crate) fn random_scalar<R: RngCore>(rng: &mut R) -> Scalar {
    let mut bytes = [0u8; 32];
    rng.fill_bytes(&mut bytes);
    Scalar::from_bytes_mod_order(&bytes)
}
