// -*- mode: rust; -*-
//
// This file is part of bn254-endo.
// See LICENSE for licensing information.

//! Arithmetic on scalars modulo the BN254 group order
//! \\(r = 36x^4 + 36x^3 + 18x^2 + 6x + 1\\).
//!
//! Both \\(\mathbb G_1\\) and \\(\mathbb G_2\\) have prime order \\(r\\),
//! so a multiple \\(\[k\]P\\) depends only on \\(k \bmod r\\).
//!
//! A `Scalar` is stored as its canonical little-endian limb representation
//! (*not* Montgomery form): the decomposition and recoding stages read its
//! raw bits, while the occasional modular multiplication converts through
//! Montgomery form internally.

use core::fmt::Debug;
use core::ops::{Add, Mul, Neg, Sub};

use subtle::Choice;
use subtle::ConditionallySelectable;
use subtle::ConstantTimeEq;
use subtle::CtOption;

use zeroize::Zeroize;

use crate::bigint::{adc, limbs_from_le_bytes, limbs_to_le_bytes, mac, sbb, BigInt};

/// The BN254 group order `r`, little-endian.
pub(crate) const ORDER: [u64; 4] = [
    0x43e1_f593_f000_0001,
    0x2833_e848_79b9_7091,
    0xb850_45b6_8181_585d,
    0x3064_4e72_e131_a029,
];

/// `-r^-1 mod 2^64`.
const INV: u64 = 0xc2e1_f593_efff_ffff;

/// `2^512 mod r`, used to convert into Montgomery form.
const R2: [u64; 4] = [
    0x1bb8_e645_ae21_6da7,
    0x53fe_3ab1_e35c_59e3,
    0x8c49_833d_53bb_8085,
    0x0216_d0b1_7f4e_44a5,
];

/// A scalar modulo the order of the BN254 groups, in canonical form.
#[derive(Copy, Clone)]
pub struct Scalar(pub(crate) BigInt<4>);

impl Scalar {
    /// The scalar `0`.
    pub const ZERO: Scalar = Scalar(BigInt::ZERO);

    /// The scalar `1`.
    pub const ONE: Scalar = Scalar(BigInt::ONE);

    /// Construct a scalar from canonical little-endian limbs.
    ///
    /// Used for pre-computed constants; the caller guarantees `limbs < r`.
    pub(crate) const fn from_limbs(limbs: [u64; 4]) -> Scalar {
        Scalar(BigInt::from_limbs(limbs))
    }

    /// Construct a scalar from a `u64`.
    pub fn from_u64(w: u64) -> Scalar {
        Scalar(BigInt::from_u64(w))
    }

    /// Attempt to parse 32 little-endian bytes as a canonical scalar.
    ///
    /// Returns `None` (in the `CtOption` sense) if the value is not fully
    /// reduced modulo the group order.
    pub fn from_canonical_bytes(bytes: &[u8; 32]) -> CtOption<Scalar> {
        let limbs = limbs_from_le_bytes(bytes);
        let (_, borrow) = sub_order(&limbs);
        let is_canonical = Choice::from((borrow as u8) & 1);
        CtOption::new(Scalar(BigInt::from_limbs(limbs)), is_canonical)
    }

    /// Parse 32 little-endian bytes, reducing modulo the group order.
    pub fn from_bytes_mod_order(bytes: &[u8; 32]) -> Scalar {
        let mut limbs = limbs_from_le_bytes(bytes);
        // 2^256 < 6r, so a constant count of five conditional subtractions
        // fully reduces any 256-bit value.
        for _ in 0..5 {
            limbs = reduce_once(&limbs);
        }
        Scalar(BigInt::from_limbs(limbs))
    }

    /// Serialize to 32 little-endian bytes.
    pub fn to_bytes(&self) -> [u8; 32] {
        limbs_to_le_bytes(&self.0.limbs)
    }

    /// Whether the low bit is set.
    pub fn is_odd(&self) -> Choice {
        self.0.is_odd()
    }

    /// Bit `i` of the canonical representation, for a public index `i`.
    pub fn bit(&self, i: usize) -> u8 {
        self.0.bit(i)
    }

    /// Compute `self^2 mod r`.
    pub fn square(&self) -> Scalar {
        self * self
    }
}

// ------------------------------------------------------------------------
// Limb-level reduction helpers
// ------------------------------------------------------------------------

/// Subtract the group order, returning the difference and the borrow-out.
#[inline(always)]
fn sub_order(a: &[u64; 4]) -> ([u64; 4], u64) {
    let (r0, borrow) = sbb(a[0], ORDER[0], 0);
    let (r1, borrow) = sbb(a[1], ORDER[1], borrow);
    let (r2, borrow) = sbb(a[2], ORDER[2], borrow);
    let (r3, borrow) = sbb(a[3], ORDER[3], borrow);
    ([r0, r1, r2, r3], borrow)
}

/// Subtract the group order if the value is no smaller than it.  Branchless.
#[inline(always)]
fn reduce_once(a: &[u64; 4]) -> [u64; 4] {
    let (diff, borrow) = sub_order(a);
    let mut out = [0u64; 4];
    for i in 0..4 {
        out[i] = (a[i] & borrow) | (diff[i] & !borrow);
    }
    out
}

/// Montgomery product `a * b * 2^-256 mod r` (CIOS).
fn montgomery_mul(a: &[u64; 4], b: &[u64; 4]) -> [u64; 4] {
    let (t0, carry) = mac(0, a[0], b[0], 0);
    let (t1, carry) = mac(0, a[0], b[1], carry);
    let (t2, carry) = mac(0, a[0], b[2], carry);
    let (t3, t4) = mac(0, a[0], b[3], carry);

    let (t1, carry) = mac(t1, a[1], b[0], 0);
    let (t2, carry) = mac(t2, a[1], b[1], carry);
    let (t3, carry) = mac(t3, a[1], b[2], carry);
    let (t4, t5) = mac(t4, a[1], b[3], carry);

    let (t2, carry) = mac(t2, a[2], b[0], 0);
    let (t3, carry) = mac(t3, a[2], b[1], carry);
    let (t4, carry) = mac(t4, a[2], b[2], carry);
    let (t5, t6) = mac(t5, a[2], b[3], carry);

    let (t3, carry) = mac(t3, a[3], b[0], 0);
    let (t4, carry) = mac(t4, a[3], b[1], carry);
    let (t5, carry) = mac(t5, a[3], b[2], carry);
    let (t6, t7) = mac(t6, a[3], b[3], carry);

    // Reduction, interleaved one limb at a time.
    let k = t0.wrapping_mul(INV);
    let (_, carry) = mac(t0, k, ORDER[0], 0);
    let (r1, carry) = mac(t1, k, ORDER[1], carry);
    let (r2, carry) = mac(t2, k, ORDER[2], carry);
    let (r3, carry) = mac(t3, k, ORDER[3], carry);
    let (r4, carry2) = adc(t4, 0, carry);

    let k = r1.wrapping_mul(INV);
    let (_, carry) = mac(r1, k, ORDER[0], 0);
    let (r2, carry) = mac(r2, k, ORDER[1], carry);
    let (r3, carry) = mac(r3, k, ORDER[2], carry);
    let (r4, carry) = mac(r4, k, ORDER[3], carry);
    let (r5, carry2) = adc(t5, carry2, carry);

    let k = r2.wrapping_mul(INV);
    let (_, carry) = mac(r2, k, ORDER[0], 0);
    let (r3, carry) = mac(r3, k, ORDER[1], carry);
    let (r4, carry) = mac(r4, k, ORDER[2], carry);
    let (r5, carry) = mac(r5, k, ORDER[3], carry);
    let (r6, carry2) = adc(t6, carry2, carry);

    let k = r3.wrapping_mul(INV);
    let (_, carry) = mac(r3, k, ORDER[0], 0);
    let (r4, carry) = mac(r4, k, ORDER[1], carry);
    let (r5, carry) = mac(r5, k, ORDER[2], carry);
    let (r6, carry) = mac(r6, k, ORDER[3], carry);
    let (r7, _) = adc(t7, carry2, carry);

    reduce_once(&[r4, r5, r6, r7])
}

// ------------------------------------------------------------------------
// Operators
// ------------------------------------------------------------------------

impl<'a, 'b> Add<&'b Scalar> for &'a Scalar {
    type Output = Scalar;
    fn add(self, rhs: &'b Scalar) -> Scalar {
        // Both operands are < r < 2^254, so the sum cannot carry out.
        let sum = self.0.wrapping_add(&rhs.0);
        Scalar(BigInt::from_limbs(reduce_once(&sum.limbs)))
    }
}

impl<'a, 'b> Sub<&'b Scalar> for &'a Scalar {
    type Output = Scalar;
    fn sub(self, rhs: &'b Scalar) -> Scalar {
        let (d0, borrow) = sbb(self.0.limbs[0], rhs.0.limbs[0], 0);
        let (d1, borrow) = sbb(self.0.limbs[1], rhs.0.limbs[1], borrow);
        let (d2, borrow) = sbb(self.0.limbs[2], rhs.0.limbs[2], borrow);
        let (d3, borrow) = sbb(self.0.limbs[3], rhs.0.limbs[3], borrow);
        // On underflow add the order back.
        let (r0, carry) = adc(d0, ORDER[0] & borrow, 0);
        let (r1, carry) = adc(d1, ORDER[1] & borrow, carry);
        let (r2, carry) = adc(d2, ORDER[2] & borrow, carry);
        let (r3, _) = adc(d3, ORDER[3] & borrow, carry);
        Scalar(BigInt::from_limbs([r0, r1, r2, r3]))
    }
}

impl<'a, 'b> Mul<&'b Scalar> for &'a Scalar {
    type Output = Scalar;
    fn mul(self, rhs: &'b Scalar) -> Scalar {
        // a*b*2^-256, then times 2^512 mod r and reduced again: a*b mod r.
        let ab = montgomery_mul(&self.0.limbs, &rhs.0.limbs);
        Scalar(BigInt::from_limbs(montgomery_mul(&ab, &R2)))
    }
}

impl<'a> Neg for &'a Scalar {
    type Output = Scalar;
    fn neg(self) -> Scalar {
        &Scalar::ZERO - self
    }
}

define_add_variants!(LHS = Scalar, RHS = Scalar, Output = Scalar);
define_sub_variants!(LHS = Scalar, RHS = Scalar, Output = Scalar);
define_mul_variants!(LHS = Scalar, RHS = Scalar, Output = Scalar);
define_neg_variant!(Type = Scalar, Output = Scalar);

// ------------------------------------------------------------------------
// Constant-time traits, equality, formatting
// ------------------------------------------------------------------------

impl ConditionallySelectable for Scalar {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Scalar(BigInt::conditional_select(&a.0, &b.0, choice))
    }
}

impl ConstantTimeEq for Scalar {
    fn ct_eq(&self, other: &Scalar) -> Choice {
        self.0.ct_eq(&other.0)
    }
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Scalar) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for Scalar {}

impl Default for Scalar {
    fn default() -> Scalar {
        Scalar::ZERO
    }
}

impl Debug for Scalar {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Scalar({:?})", self.0)
    }
}

impl Zeroize for Scalar {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

// ------------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    /// The scalar from decomposition test vector 1.
    const SA: [u64; 4] = [
        0x6f0a_e08f_8229_b3f3,
        0x373a_ebf9_2026_5c69,
        0xf001_8c95_d7fa_b106,
        0x24a0_b872_03c7_a8de,
    ];

    /// The scalar from decomposition test vector 2.
    const SB: [u64; 4] = [
        0xcebd_d184_2b30_92c4,
        0xd737_fc8d_83f7_692f,
        0xc51c_551d_ea8b_058c,
        0x2455_4fa6_d0c0_6f6d,
    ];

    /// sa * sb mod r.
    const SA_TIMES_SB: [u64; 4] = [
        0x4a24_4d2f_2919_7c79,
        0xca23_0762_6f7b_a8bf,
        0x3af9_4f56_4ba9_6eb2,
        0x2867_ac66_8147_4d9b,
    ];

    /// sa + sb mod r.
    const SA_PLUS_SB: [u64; 4] = [
        0xf9e6_bc7f_bd5a_46b6,
        0xe63f_003e_2a64_5507,
        0xfccd_9bfd_4104_5e35,
        0x1891_b9a5_f356_7822,
    ];

    #[test]
    fn mul_matches_constant() {
        let a = Scalar::from_limbs(SA);
        let b = Scalar::from_limbs(SB);
        assert_eq!(Scalar::from_limbs(SA_TIMES_SB), &a * &b);
        assert_eq!(Scalar::from_limbs(SA_TIMES_SB), &b * &a);
    }

    #[test]
    fn add_matches_constant() {
        let a = Scalar::from_limbs(SA);
        let b = Scalar::from_limbs(SB);
        assert_eq!(Scalar::from_limbs(SA_PLUS_SB), &a + &b);
    }

    #[test]
    fn sub_and_neg() {
        let a = Scalar::from_limbs(SA);
        let b = Scalar::from_limbs(SB);
        assert_eq!(a, &(&a + &b) - &b);
        assert_eq!(Scalar::ZERO, &a + &(-&a));
        assert_eq!(-&Scalar::ZERO, Scalar::ZERO);
    }

    #[test]
    fn mul_identities() {
        let a = Scalar::from_limbs(SA);
        assert_eq!(a, &a * &Scalar::ONE);
        assert_eq!(Scalar::ZERO, &a * &Scalar::ZERO);
    }

    #[test]
    fn canonical_byte_parsing() {
        let a = Scalar::from_limbs(SA);
        let bytes = a.to_bytes();
        assert_eq!(a, Scalar::from_canonical_bytes(&bytes).unwrap());

        // The order itself must be rejected...
        let order_bytes = limbs_to_le_bytes(&ORDER);
        assert!(bool::from(
            Scalar::from_canonical_bytes(&order_bytes).is_none()
        ));
        // ...but reduces to zero mod r.
        assert_eq!(Scalar::from_bytes_mod_order(&order_bytes), Scalar::ZERO);

        // 2^256 - 1 needs the full five conditional subtractions.
        let all_ones = [0xffu8; 32];
        let reduced = Scalar::from_bytes_mod_order(&all_ones);
        let expected = Scalar::from_limbs([
            0xac96_341c_4fff_fffa,
            0x36fc_7695_9f60_cd29,
            0x666e_a36f_7879_462e,
            0x0e0a_77c1_9a07_df2f,
        ]);
        assert_eq!(reduced, expected);
    }

    #[test]
    fn bits_and_parity() {
        let a = Scalar::from_limbs(SA);
        assert_eq!(a.bit(0), 1);
        assert_eq!(a.is_odd().unwrap_u8(), 1);
        assert_eq!(Scalar::from_u64(2).is_odd().unwrap_u8(), 0);
        // top limb of SA starts 0x24.. = 0b0010_0100.., bit 253 set
        assert_eq!(a.bit(253), 1);
        assert_eq!(a.bit(255), 0);
    }
}
