// -*- mode: rust; -*-
//
// This file is part of bn254-endo.
// See LICENSE for licensing information.

//! Finite fields underlying the BN254 groups.
//!
//! `FieldElement` is the base field \\(\mathbb F_p\\) (the coordinate field
//! of \\(\mathbb G_1\\)); `Fp2` is its quadratic extension (the coordinate
//! field of \\(\mathbb G_2\\)).  The `Field` trait is the operation set the
//! generic curve and scalar-multiplication code consume, so the same point
//! formulas monomorphize over both fields.

use core::fmt::Debug;
use core::ops::{Add, Mul, Neg, Sub};

use subtle::Choice;
use subtle::ConditionallySelectable;
use subtle::ConstantTimeEq;

use zeroize::Zeroize;

pub(crate) mod fp;
pub(crate) mod fp2;

pub use self::fp::FieldElement;
pub use self::fp2::Fp2;

/// The field operations consumed by the generic curve arithmetic.
///
/// Implemented exactly twice, by `FieldElement` and `Fp2`; all generic code
/// monomorphizes, there is no dynamic dispatch on the hot path.
pub trait Field:
    Copy
    + Clone
    + Debug
    + Default
    + PartialEq
    + Eq
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Neg<Output = Self>
    + ConditionallySelectable
    + ConstantTimeEq
    + Zeroize
{
    /// The additive identity.
    const ZERO: Self;
    /// The multiplicative identity.
    const ONE: Self;

    /// Compute `self^2`.
    fn square(&self) -> Self;
    /// Compute `2 * self`.
    fn double(&self) -> Self;
    /// Compute the multiplicative inverse; zero maps to zero.
    fn invert(&self) -> Self;
    /// Determine if this element is zero.
    fn is_zero(&self) -> Choice;
}

impl Field for FieldElement {
    const ZERO: Self = FieldElement::ZERO;
    const ONE: Self = FieldElement::ONE;

    fn square(&self) -> Self {
        FieldElement::square(self)
    }
    fn double(&self) -> Self {
        FieldElement::double(self)
    }
    fn invert(&self) -> Self {
        FieldElement::invert(self)
    }
    fn is_zero(&self) -> Choice {
        FieldElement::is_zero(self)
    }
}

impl Field for Fp2 {
    const ZERO: Self = Fp2::ZERO;
    const ONE: Self = Fp2::ONE;

    fn square(&self) -> Self {
        Fp2::square(self)
    }
    fn double(&self) -> Self {
        Fp2::double(self)
    }
    fn invert(&self) -> Self {
        Fp2::invert(self)
    }
    fn is_zero(&self) -> Choice {
        Fp2::is_zero(self)
    }
}

/// Replace each element of the array with its inverse, at the cost of a
/// single inversion (Montgomery's trick), generically over the field.
///
/// All inputs **MUST** be nonzero; a zero input corrupts every output.
pub(crate) fn batch_invert<F: Field, const N: usize>(inputs: &mut [F; N]) {
    // Montgomery's Trick and Fast Implementation of Masked AES
    // Genelle, Prouff and Quisquater
    // Section 3.2

    let mut scratch = [F::ONE; N];

    // Keep an accumulator of all of the previous products, recording the
    // prefix products in the scratch space.
    let mut acc = F::ONE;
    for (input, scratch) in inputs.iter().zip(scratch.iter_mut()) {
        *scratch = acc;
        acc = acc * *input;
    }

    // acc is nonzero iff all inputs are nonzero
    debug_assert!(bool::from(!acc.is_zero()));

    // Compute the inverse of all products
    acc = acc.invert();

    // Pass through the array backwards to compute the inverses in place
    for (input, scratch) in inputs.iter_mut().rev().zip(scratch.iter().rev()) {
        let tmp = acc * *input;
        *input = acc * *scratch;
        acc = tmp;
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn generic_batch_invert_on_fp2() {
        let x = Fp2::new(
            crate::field::fp::FieldElement::from_raw_limbs([3, 0, 0, 0]),
            crate::field::fp::FieldElement::from_raw_limbs([7, 0, 0, 0]),
        );
        let y = x.square();
        let mut arr = [x, y, Fp2::ONE];
        batch_invert(&mut arr);
        assert_eq!(arr[0], x.invert());
        assert_eq!(arr[1], y.invert());
        assert_eq!(arr[2], Fp2::ONE);
    }
}
