// -*- mode: rust; -*-
//
// This file is part of bn254-endo.
// See LICENSE for licensing information.

//! Arithmetic in the quadratic extension \\(\mathbb F_{p^2} = \mathbb F_p\[u\]/(u^2+1)\\).
//!
//! This is the coordinate field of \\(\mathbb G_2\\).  An element is a pair
//! `(c0, c1)` representing \\(c_0 + c_1 u\\).  The \\(p\\)-power Frobenius
//! on this field is conjugation, which is what the \\(\psi\\) endomorphism
//! consumes.

use core::fmt::Debug;
use core::ops::{Add, Mul, Neg, Sub};

use subtle::Choice;
use subtle::ConditionallySelectable;
use subtle::ConstantTimeEq;

use zeroize::Zeroize;

use crate::field::fp::FieldElement;

/// An element of \\(\mathbb F_{p^2}\\), as \\(c_0 + c_1 u\\) with \\(u^2 = -1\\).
#[derive(Copy, Clone)]
pub struct Fp2 {
    /// The coefficient of \\(1\\).
    pub(crate) c0: FieldElement,
    /// The coefficient of \\(u\\).
    pub(crate) c1: FieldElement,
}

impl Fp2 {
    /// The zero element.
    pub const ZERO: Fp2 = Fp2 {
        c0: FieldElement::ZERO,
        c1: FieldElement::ZERO,
    };

    /// The one element.
    pub const ONE: Fp2 = Fp2 {
        c0: FieldElement::ONE,
        c1: FieldElement::ZERO,
    };

    /// Construct from the two coefficients.
    pub(crate) const fn new(c0: FieldElement, c1: FieldElement) -> Fp2 {
        Fp2 { c0, c1 }
    }

    /// Compute `self^2`.
    pub fn square(&self) -> Fp2 {
        // (c0 + c1 u)^2 = (c0 + c1)(c0 - c1) + 2 c0 c1 u  since u^2 = -1
        let a = &self.c0 + &self.c1;
        let b = &self.c0 - &self.c1;
        let c = &self.c0 + &self.c0;
        Fp2 {
            c0: &a * &b,
            c1: &c * &self.c1,
        }
    }

    /// Compute `2 * self`.
    pub fn double(&self) -> Fp2 {
        Fp2 {
            c0: self.c0.double(),
            c1: self.c1.double(),
        }
    }

    /// The conjugate \\(c_0 - c_1 u\\).
    ///
    /// This is the image of the element under the \\(p\\)-power Frobenius.
    pub fn conjugate(&self) -> Fp2 {
        Fp2 {
            c0: self.c0,
            c1: -&self.c1,
        }
    }

    /// Determine if this element is zero.
    pub fn is_zero(&self) -> Choice {
        self.c0.is_zero() & self.c1.is_zero()
    }

    /// Compute the multiplicative inverse of this element.
    ///
    /// This function returns zero on input zero.
    pub fn invert(&self) -> Fp2 {
        // 1 / (c0 + c1 u) = (c0 - c1 u) / (c0^2 + c1^2)
        let norm = &self.c0.square() + &self.c1.square();
        let norm_inv = norm.invert();
        Fp2 {
            c0: &self.c0 * &norm_inv,
            c1: &(-&self.c1) * &norm_inv,
        }
    }
}

// ------------------------------------------------------------------------
// Operators
// ------------------------------------------------------------------------

impl<'a, 'b> Add<&'b Fp2> for &'a Fp2 {
    type Output = Fp2;
    fn add(self, rhs: &'b Fp2) -> Fp2 {
        Fp2 {
            c0: &self.c0 + &rhs.c0,
            c1: &self.c1 + &rhs.c1,
        }
    }
}

impl<'a, 'b> Sub<&'b Fp2> for &'a Fp2 {
    type Output = Fp2;
    fn sub(self, rhs: &'b Fp2) -> Fp2 {
        Fp2 {
            c0: &self.c0 - &rhs.c0,
            c1: &self.c1 - &rhs.c1,
        }
    }
}

impl<'a, 'b> Mul<&'b Fp2> for &'a Fp2 {
    type Output = Fp2;
    fn mul(self, rhs: &'b Fp2) -> Fp2 {
        // Karatsuba with u^2 = -1:
        //   c0 = a0 b0 - a1 b1
        //   c1 = (a0 + a1)(b0 + b1) - a0 b0 - a1 b1
        let v0 = &self.c0 * &rhs.c0;
        let v1 = &self.c1 * &rhs.c1;
        let s = &(&self.c0 + &self.c1) * &(&rhs.c0 + &rhs.c1);
        Fp2 {
            c0: &v0 - &v1,
            c1: &(&s - &v0) - &v1,
        }
    }
}

impl<'a> Neg for &'a Fp2 {
    type Output = Fp2;
    fn neg(self) -> Fp2 {
        Fp2 {
            c0: -&self.c0,
            c1: -&self.c1,
        }
    }
}

define_add_variants!(LHS = Fp2, RHS = Fp2, Output = Fp2);
define_sub_variants!(LHS = Fp2, RHS = Fp2, Output = Fp2);
define_mul_variants!(LHS = Fp2, RHS = Fp2, Output = Fp2);
define_neg_variant!(Type = Fp2, Output = Fp2);

// ------------------------------------------------------------------------
// Constant-time traits, equality, formatting
// ------------------------------------------------------------------------

impl ConditionallySelectable for Fp2 {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Fp2 {
            c0: FieldElement::conditional_select(&a.c0, &b.c0, choice),
            c1: FieldElement::conditional_select(&a.c1, &b.c1, choice),
        }
    }
}

impl ConstantTimeEq for Fp2 {
    fn ct_eq(&self, other: &Fp2) -> Choice {
        self.c0.ct_eq(&other.c0) & self.c1.ct_eq(&other.c1)
    }
}

impl PartialEq for Fp2 {
    fn eq(&self, other: &Fp2) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for Fp2 {}

impl Default for Fp2 {
    fn default() -> Fp2 {
        Fp2::ZERO
    }
}

impl Debug for Fp2 {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Fp2({:?} + {:?}*u)", self.c0, self.c1)
    }
}

impl Zeroize for Fp2 {
    fn zeroize(&mut self) {
        self.c0.zeroize();
        self.c1.zeroize();
    }
}

// ------------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    const A_RAW: [u64; 4] = [
        0xa451_4736_f3c3_a917,
        0x9ed1_f6f2_e1d9_e2a4,
        0x8492_bd59_0807_a703,
        0x04fe_df98_a7fa_0a68,
    ];

    const B_RAW: [u64; 4] = [
        0xffee_ddcc_bbaa_9988,
        0xedcb_a987_6543_2100,
        0xd46f_5e6a_7b8c_9daf,
        0x1b2e_4d7f_8c9a_0b35,
    ];

    fn a2() -> Fp2 {
        Fp2::new(
            FieldElement::from_raw_limbs(A_RAW),
            FieldElement::from_raw_limbs(B_RAW),
        )
    }

    fn b2() -> Fp2 {
        let a = FieldElement::from_raw_limbs(A_RAW);
        Fp2::new(FieldElement::from_raw_limbs(B_RAW), &(&a + &a) + &a)
    }

    /// a2 * b2, coefficient of 1.
    const AB_C0: [u64; 4] = [
        0x4999_b9b3_011d_6fde,
        0xc142_3c60_251c_2688,
        0x3059_b6ec_7619_5a3a,
        0x303f_9539_7f63_2269,
    ];

    /// a2 * b2, coefficient of u.
    const AB_C1: [u64; 4] = [
        0x724c_baed_3bc0_3269,
        0x6863_b258_2f5a_dd79,
        0x96e4_1071_1c63_d6e6,
        0x1553_67eb_b714_3183,
    ];

    /// a2^2 coefficients.
    const ASQ_C0: [u64; 4] = [
        0xd192_80f4_f23f_41b3,
        0x57e4_86a5_b87b_eeb9,
        0xf33e_a777_d5d6_3f72,
        0x2263_d327_32bc_862c,
    ];
    const ASQ_C1: [u64; 4] = [
        0xf286_d263_d75f_8d69,
        0xd63f_2e31_4355_a404,
        0x87f6_8eca_0b67_fe22,
        0x0024_b939_61ce_7dc0,
    ];

    /// a2^-1 coefficients.
    const AINV_C0: [u64; 4] = [
        0x6449_b605_431e_c41e,
        0x804a_55ac_f08c_daef,
        0x0b92_14cc_514b_235c,
        0x164b_2dd8_2d16_e7c2,
    ];
    const AINV_C1: [u64; 4] = [
        0xa001_66b4_a566_0bbf,
        0x9a01_c838_f650_16e1,
        0x1c10_077a_367b_3d28,
        0x2d29_3bd4_0e4f_3752,
    ];

    #[test]
    fn mul_matches_constant() {
        let expected = Fp2::new(
            FieldElement::from_raw_limbs(AB_C0),
            FieldElement::from_raw_limbs(AB_C1),
        );
        assert_eq!(expected, &a2() * &b2());
        assert_eq!(expected, &b2() * &a2());
    }

    #[test]
    fn square_matches_mul() {
        let expected = Fp2::new(
            FieldElement::from_raw_limbs(ASQ_C0),
            FieldElement::from_raw_limbs(ASQ_C1),
        );
        assert_eq!(expected, a2().square());
        assert_eq!(expected, &a2() * &a2());
    }

    #[test]
    fn invert_matches_constant() {
        let expected = Fp2::new(
            FieldElement::from_raw_limbs(AINV_C0),
            FieldElement::from_raw_limbs(AINV_C1),
        );
        let inv = a2().invert();
        assert_eq!(expected, inv);
        assert_eq!(Fp2::ONE, &a2() * &inv);
        assert_eq!(Fp2::ZERO, Fp2::ZERO.invert());
    }

    #[test]
    fn u_squared_is_minus_one() {
        let u = Fp2::new(FieldElement::ZERO, FieldElement::ONE);
        assert_eq!(u.square(), -&Fp2::ONE);
    }

    #[test]
    fn conjugation_fixes_the_base_field() {
        let x = Fp2::new(FieldElement::from_raw_limbs(A_RAW), FieldElement::ZERO);
        assert_eq!(x.conjugate(), x);
        // conj(a)*a = norm, which lies in Fp
        let n = &a2().conjugate() * &a2();
        assert_eq!(n.c1, FieldElement::ZERO);
    }

    #[test]
    fn add_sub_neg() {
        let a = a2();
        let b = b2();
        assert_eq!(a, &(&a + &b) - &b);
        assert_eq!(Fp2::ZERO, &a + &(-&a));
        assert_eq!(a.double(), &a + &a);
    }
}
