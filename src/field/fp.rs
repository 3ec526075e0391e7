// -*- mode: rust; -*-
//
// This file is part of bn254-endo.
// See LICENSE for licensing information.

//! Field arithmetic modulo the BN254 base prime
//! \\(p = 36x^4 + 36x^3 + 24x^2 + 6x + 1\\), \\(x = \mathtt{0x44E992B44A6909F1}\\).
//!
//! Elements are stored in Montgomery form (`a * 2^256 mod p`) as four
//! little-endian `u64` limbs, always fully reduced.  Multiplication is a
//! portable schoolbook product followed by Montgomery reduction; the leaf
//! functions are kept small so an accelerated backend can replace them
//! behind the same interface.

use core::fmt::Debug;
use core::ops::{Add, Mul, Neg, Sub};

use subtle::Choice;
use subtle::ConditionallySelectable;
use subtle::ConstantTimeEq;
use subtle::CtOption;

use zeroize::Zeroize;

use crate::bigint::{adc, limbs_from_le_bytes, limbs_to_le_bytes, mac, sbb};

/// The BN254 base field prime, little-endian.
pub(crate) const MODULUS: [u64; 4] = [
    0x3c20_8c16_d87c_fd47,
    0x9781_6a91_6871_ca8d,
    0xb850_45b6_8181_585d,
    0x3064_4e72_e131_a029,
];

/// `p - 2`, the Fermat inversion exponent.
const MODULUS_MINUS_2: [u64; 4] = [
    0x3c20_8c16_d87c_fd45,
    0x9781_6a91_6871_ca8d,
    0xb850_45b6_8181_585d,
    0x3064_4e72_e131_a029,
];

/// `-p^-1 mod 2^64`.
const INV: u64 = 0x87d2_0782_e486_6389;

/// `2^256 mod p`, the Montgomery form of 1.
const R: [u64; 4] = [
    0xd35d_438d_c58f_0d9d,
    0x0a78_eb28_f5c7_0b3d,
    0x666e_a36f_7879_462c,
    0x0e0a_77c1_9a07_df2f,
];

/// `2^512 mod p`, used to convert into Montgomery form.
const R2: [u64; 4] = [
    0xf32c_fc5b_538a_fa89,
    0xb5e7_1911_d445_01fb,
    0x47ab_1eff_0a41_7ff6,
    0x06d8_9f71_cab8_351f,
];

/// An element of the BN254 base field \\(\mathbb F_p\\).
#[derive(Copy, Clone)]
pub struct FieldElement(pub(crate) [u64; 4]);

impl FieldElement {
    /// The zero element.
    pub const ZERO: FieldElement = FieldElement([0, 0, 0, 0]);

    /// The one element.
    pub const ONE: FieldElement = FieldElement(R);

    /// Construct an element directly from its Montgomery-form limbs.
    ///
    /// Used for pre-computed curve constants; the caller guarantees the
    /// limbs are a fully reduced Montgomery representation.
    pub(crate) const fn from_montgomery_limbs(limbs: [u64; 4]) -> FieldElement {
        FieldElement(limbs)
    }

    /// Construct an element from a canonical (non-Montgomery) integer given
    /// as little-endian limbs, reducing is the caller's responsibility.
    #[cfg(test)]
    pub(crate) fn from_raw_limbs(limbs: [u64; 4]) -> FieldElement {
        FieldElement(limbs) * FieldElement(R2)
    }

    /// Attempt to parse 32 little-endian bytes as a canonical field element.
    ///
    /// Returns `None` (in the `CtOption` sense) if the value is not fully
    /// reduced.
    pub fn from_bytes(bytes: &[u8; 32]) -> CtOption<FieldElement> {
        let limbs = limbs_from_le_bytes(bytes);

        // The value is canonical iff subtracting the modulus borrows.
        let (_, borrow) = sub_limbs(&limbs, &MODULUS);
        let is_canonical = Choice::from((borrow as u8) & 1);

        CtOption::new(FieldElement(limbs) * FieldElement(R2), is_canonical)
    }

    /// Serialize to 32 little-endian bytes in canonical form.
    pub fn to_bytes(&self) -> [u8; 32] {
        let canonical = montgomery_reduce(
            self.0[0], self.0[1], self.0[2], self.0[3], 0, 0, 0, 0,
        );
        limbs_to_le_bytes(&canonical.0)
    }

    /// Compute `self^2`.
    pub fn square(&self) -> FieldElement {
        self * self
    }

    /// Compute `2 * self`.
    pub fn double(&self) -> FieldElement {
        self + self
    }

    /// Determine if this element is zero.
    pub fn is_zero(&self) -> Choice {
        self.ct_eq(&FieldElement::ZERO)
    }

    /// Raise this element to a public exponent given as little-endian limbs.
    ///
    /// The exponent is public (square-and-multiply branches on it); the
    /// base is processed in constant time.
    fn pow_public(&self, by: &[u64; 4]) -> FieldElement {
        let mut res = FieldElement::ONE;
        for limb in by.iter().rev() {
            for i in (0..64).rev() {
                res = res.square();
                if ((limb >> i) & 1) == 1 {
                    res = &res * self;
                }
            }
        }
        res
    }

    /// Compute the multiplicative inverse of this element.
    ///
    /// The inverse is computed as `self^(p-2)`.  This function returns zero
    /// on input zero.
    pub fn invert(&self) -> FieldElement {
        self.pow_public(&MODULUS_MINUS_2)
    }

    /// Replace each element of the array with its inverse, using a single
    /// field inversion (Montgomery's trick).
    ///
    /// All inputs **MUST** be nonzero; a zero input corrupts every output.
    pub fn batch_invert<const N: usize>(inputs: &mut [FieldElement; N]) {
        crate::field::batch_invert(inputs);
    }
}

// ------------------------------------------------------------------------
// Limb-level arithmetic
// ------------------------------------------------------------------------

/// Add two 4-limb values, returning the sum and the carry-out.
#[inline(always)]
fn add_limbs(a: &[u64; 4], b: &[u64; 4]) -> ([u64; 4], u64) {
    let (r0, carry) = adc(a[0], b[0], 0);
    let (r1, carry) = adc(a[1], b[1], carry);
    let (r2, carry) = adc(a[2], b[2], carry);
    let (r3, carry) = adc(a[3], b[3], carry);
    ([r0, r1, r2, r3], carry)
}

/// Subtract two 4-limb values, returning the difference and the borrow-out
/// (all-ones on underflow).
#[inline(always)]
fn sub_limbs(a: &[u64; 4], b: &[u64; 4]) -> ([u64; 4], u64) {
    let (r0, borrow) = sbb(a[0], b[0], 0);
    let (r1, borrow) = sbb(a[1], b[1], borrow);
    let (r2, borrow) = sbb(a[2], b[2], borrow);
    let (r3, borrow) = sbb(a[3], b[3], borrow);
    ([r0, r1, r2, r3], borrow)
}

impl FieldElement {
    /// Subtract the modulus if `self` is no smaller than it, keeping the
    /// representation fully reduced.  Branchless.
    #[inline(always)]
    fn subtract_p(&self) -> FieldElement {
        let (diff, borrow) = sub_limbs(&self.0, &MODULUS);
        // If the subtraction underflowed, keep the original limbs.
        let mut out = [0u64; 4];
        for i in 0..4 {
            out[i] = (self.0[i] & borrow) | (diff[i] & !borrow);
        }
        FieldElement(out)
    }
}

/// Montgomery reduction of a 512-bit product, with the final conditional
/// subtraction folded in.
#[allow(clippy::too_many_arguments)]
#[inline(always)]
fn montgomery_reduce(
    t0: u64,
    t1: u64,
    t2: u64,
    t3: u64,
    t4: u64,
    t5: u64,
    t6: u64,
    t7: u64,
) -> FieldElement {
    let k = t0.wrapping_mul(INV);
    let (_, carry) = mac(t0, k, MODULUS[0], 0);
    let (r1, carry) = mac(t1, k, MODULUS[1], carry);
    let (r2, carry) = mac(t2, k, MODULUS[2], carry);
    let (r3, carry) = mac(t3, k, MODULUS[3], carry);
    let (r4, carry2) = adc(t4, 0, carry);

    let k = r1.wrapping_mul(INV);
    let (_, carry) = mac(r1, k, MODULUS[0], 0);
    let (r2, carry) = mac(r2, k, MODULUS[1], carry);
    let (r3, carry) = mac(r3, k, MODULUS[2], carry);
    let (r4, carry) = mac(r4, k, MODULUS[3], carry);
    let (r5, carry2) = adc(t5, carry2, carry);

    let k = r2.wrapping_mul(INV);
    let (_, carry) = mac(r2, k, MODULUS[0], 0);
    let (r3, carry) = mac(r3, k, MODULUS[1], carry);
    let (r4, carry) = mac(r4, k, MODULUS[2], carry);
    let (r5, carry) = mac(r5, k, MODULUS[3], carry);
    let (r6, carry2) = adc(t6, carry2, carry);

    let k = r3.wrapping_mul(INV);
    let (_, carry) = mac(r3, k, MODULUS[0], 0);
    let (r4, carry) = mac(r4, k, MODULUS[1], carry);
    let (r5, carry) = mac(r5, k, MODULUS[2], carry);
    let (r6, carry) = mac(r6, k, MODULUS[3], carry);
    let (r7, _) = adc(t7, carry2, carry);

    FieldElement([r4, r5, r6, r7]).subtract_p()
}

// ------------------------------------------------------------------------
// Operators
// ------------------------------------------------------------------------

impl<'a, 'b> Add<&'b FieldElement> for &'a FieldElement {
    type Output = FieldElement;
    fn add(self, rhs: &'b FieldElement) -> FieldElement {
        // Both operands are < p < 2^254, so the sum cannot carry out.
        let (sum, _) = add_limbs(&self.0, &rhs.0);
        FieldElement(sum).subtract_p()
    }
}

impl<'a, 'b> Sub<&'b FieldElement> for &'a FieldElement {
    type Output = FieldElement;
    fn sub(self, rhs: &'b FieldElement) -> FieldElement {
        let (diff, borrow) = sub_limbs(&self.0, &rhs.0);
        // On underflow add the modulus back; the mask is all-ones iff the
        // subtraction borrowed.
        let (r0, carry) = adc(diff[0], MODULUS[0] & borrow, 0);
        let (r1, carry) = adc(diff[1], MODULUS[1] & borrow, carry);
        let (r2, carry) = adc(diff[2], MODULUS[2] & borrow, carry);
        let (r3, _) = adc(diff[3], MODULUS[3] & borrow, carry);
        FieldElement([r0, r1, r2, r3])
    }
}

impl<'a, 'b> Mul<&'b FieldElement> for &'a FieldElement {
    type Output = FieldElement;
    fn mul(self, rhs: &'b FieldElement) -> FieldElement {
        // Schoolbook 4x4 product, then Montgomery reduction.
        let a = &self.0;
        let b = &rhs.0;

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

        montgomery_reduce(t0, t1, t2, t3, t4, t5, t6, t7)
    }
}

impl<'a> Neg for &'a FieldElement {
    type Output = FieldElement;
    fn neg(self) -> FieldElement {
        &FieldElement::ZERO - self
    }
}

define_add_variants!(LHS = FieldElement, RHS = FieldElement, Output = FieldElement);
define_sub_variants!(LHS = FieldElement, RHS = FieldElement, Output = FieldElement);
define_mul_variants!(LHS = FieldElement, RHS = FieldElement, Output = FieldElement);
define_neg_variant!(Type = FieldElement, Output = FieldElement);

// ------------------------------------------------------------------------
// Constant-time traits, equality, formatting
// ------------------------------------------------------------------------

impl ConditionallySelectable for FieldElement {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        FieldElement([
            u64::conditional_select(&a.0[0], &b.0[0], choice),
            u64::conditional_select(&a.0[1], &b.0[1], choice),
            u64::conditional_select(&a.0[2], &b.0[2], choice),
            u64::conditional_select(&a.0[3], &b.0[3], choice),
        ])
    }
}

impl ConstantTimeEq for FieldElement {
    /// The representation is unique (always fully reduced), so limb
    /// comparison suffices.
    fn ct_eq(&self, other: &FieldElement) -> Choice {
        self.0[0].ct_eq(&other.0[0])
            & self.0[1].ct_eq(&other.0[1])
            & self.0[2].ct_eq(&other.0[2])
            & self.0[3].ct_eq(&other.0[3])
    }
}

impl PartialEq for FieldElement {
    fn eq(&self, other: &FieldElement) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for FieldElement {}

impl Default for FieldElement {
    fn default() -> FieldElement {
        FieldElement::ZERO
    }
}

impl Debug for FieldElement {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "FieldElement(0x")?;
        for byte in self.to_bytes().iter().rev() {
            write!(f, "{:02x}", byte)?;
        }
        write!(f, ")")
    }
}

impl Zeroize for FieldElement {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

// ------------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------------
