// -*- mode: rust; -*-
//
// This file is part of bn254-endo.
// See LICENSE for licensing information.

//! Precomputed lookup tables of endomorphism-image combinations, with
//! constant-time selection.
//!
//! The computation of table entries happens once per scalar multiplication
//! on *public* data (the base point and its endomorphism images), so it
//! runs in Jacobian coordinates and batch-converts to affine with a single
//! inversion.  The lookups during the accumulation loop are indexed by
//! *secret* digits, so `select` scans every entry and picks with a
//! `Choice`; no secret ever becomes an array index.

use subtle::ConditionallySelectable;
use subtle::ConstantTimeEq;

use zeroize::Zeroize;

use crate::curve::{AffinePoint, Curve, JacobianPoint};
use crate::traits::Identity;

/// A lookup table of `T` affine points.
///
/// For the unwindowed ladder `T = 2^(M-1)` and entry `u` holds
/// \\(P + \sum_{\text{bit } j \text{ of } u} \varphi^{j+1}(P)\\).
///
/// Since `LookupTable` does not implement `Index`, it's more difficult to
/// accidentally use the table directly.
pub(crate) struct LookupTable<C: Curve, const T: usize>(pub(crate) [AffinePoint<C>; T]);

impl<C: Curve, const T: usize> LookupTable<C, T> {
    /// Build the table from the base point and its `M - 1` endomorphism
    /// images, one point addition per entry: clearing the top bit of the
    /// index names an entry that is already built, and the cleared bit
    /// names the image to add to it.
    ///
    /// The index arithmetic (`msb`) is variable-time, which is fine: `u`
    /// is a public loop counter.
    pub fn from_endo_images<const M: usize>(images: &[AffinePoint<C>; M]) -> LookupTable<C, T> {
        debug_assert_eq!(T, 1 << (M - 1));

        let mut acc = [JacobianPoint::identity(); T];
        acc[0] = JacobianPoint::from(&images[0]);
        for u in 1..T {
            let msb = usize::BITS as usize - 1 - u.leading_zeros() as usize;
            acc[u] = acc[u ^ (1 << msb)].add_mixed(&images[msb + 1]);
        }

        LookupTable(JacobianPoint::batch_to_affine(&acc))
    }

    /// Given a secret `index`, return entry `index` in constant time by
    /// scanning the full table.
    pub fn select(&self, index: u8) -> AffinePoint<C> {
        debug_assert!((index as usize) < T);

        let mut t = self.0[0];
        for j in 1..T {
            t.conditional_assign(&self.0[j], (j as u8).ct_eq(&index));
        }
        t
    }
}

impl<C: Curve, const T: usize> Zeroize for LookupTable<C, T> {
    fn zeroize(&mut self) {
        for entry in self.0.iter_mut() {
            entry.zeroize();
        }
    }
}

/// Build the eight-entry table for the windowed M=2 ladder.
///
/// The window digit pair selects `index = parity << 2 | e`: the `parity`
/// bit picks the \\(P_0\\) tier (set means the first-column digit is
/// \\(\pm 1\\), clear means \\(\pm 3\\)), and `e` picks the \\(P_1\\)
/// component: `{0, -1, +2, +1}` against the \\(P_0\\) tier,
/// `{0, +1, +2, +3}` against the \\(3 P_0\\) tier.
pub(crate) fn w2_table<C: Curve>(
    p0: &AffinePoint<C>,
    p1: &AffinePoint<C>,
) -> LookupTable<C, 8> {
    let j0 = JacobianPoint::from(p0);
    let neg_p1 = -p1;

    let p0_plus_p1 = j0.add_mixed(p1); // P0 + P1
    let p0_plus_2p1 = p0_plus_p1.add_mixed(p1); // P0 + 2 P1
    let p0_minus_p1 = j0.add_mixed(&neg_p1); // P0 - P1

    let three_p0 = j0.double().add_mixed(p0); // 3 P0
    let three_p0_p1 = three_p0.add_mixed(p1); // 3 P0 + P1
    let three_p0_2p1 = three_p0_p1.add_mixed(p1); // 3 P0 + 2 P1
    let three_p0_3p1 = three_p0_2p1.add_mixed(p1); // 3 P0 + 3 P1

    let acc = [
        three_p0,     // 0b000: 3 P0
        three_p0_p1,  // 0b001: 3 P0 + P1
        three_p0_2p1, // 0b010: 3 P0 + 2 P1
        three_p0_3p1, // 0b011: 3 P0 + 3 P1
        j0,           // 0b100: P0
        p0_minus_p1,  // 0b101: P0 - P1
        p0_plus_2p1,  // 0b110: P0 + 2 P1
        p0_plus_p1,   // 0b111: P0 + P1
    ];

    LookupTable(JacobianPoint::batch_to_affine(&acc))
}

// ------------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------------
