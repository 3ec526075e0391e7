// -*- mode: rust; -*-
//
// This file is part of bn254-endo.
// See LICENSE for licensing information.

//! Group operations on the BN254 curves, in three point models.
//!
//! # Curve representations
//!
//! Internally, we use several different models for the curve points:
//!
//! * `AffinePoint`: the affine pair \\((x, y)\\) plus a constant-time
//!   infinity flag.  Lookup-table entries and endomorphism images are
//!   affine, which makes the additions inside the scalar-multiplication
//!   loop "mixed" (cheaper) additions.
//! * `ProjectivePoint`: homogeneous coordinates \\((X : Y : Z)\\) with
//!   \\(x = X/Z\\), \\(y = Y/Z\\), identity \\((0 : 1 : 0)\\).  Addition and
//!   doubling use the *complete* formulas of Renes, Costello, and Batina
//!   (specialised for \\(a = 0\\)), which have no exceptional cases and are
//!   therefore safe to run on secret-dependent inputs.
//! * `JacobianPoint`: weighted coordinates \\((X : Y : Z)\\) with
//!   \\(x = X/Z^2\\), \\(y = Y/Z^3\\), identity at \\(Z = 0\\).  Used where
//!   the operands are public, i.e. while building the lookup table, whose
//!   entries are then batch-converted to affine with a single inversion.
//!
//! Both curves have \\(a = 0\\); the only curve-specific inputs to the
//! formulas are the coordinate field and the constants \\(b\\) and
//! \\(3b\\), so the models are generic over a small `Curve` marker trait
//! and monomorphize per group.

#![allow(non_snake_case)]

use core::fmt::Debug;
use core::ops::{Add, Neg, Sub};

use subtle::Choice;
use subtle::ConditionallySelectable;
use subtle::ConstantTimeEq;
use subtle::CtOption;

use zeroize::Zeroize;

use crate::field::{batch_invert, Field};
use crate::traits::{Identity, IsIdentity, ValidityCheck};

pub mod g1;
pub mod g2;

pub use self::g1::Bn254G1;
pub use self::g2::Bn254G2;

/// Compile-time description of a short-Weierstrass curve
/// \\(y^2 = x^3 + b\\) over its coordinate field.
pub trait Curve: Copy + Clone + Debug + PartialEq + Eq + 'static {
    /// The coordinate field.
    type Base: Field;
    /// The constant term of the curve equation.
    const B: Self::Base;
    /// `3 * B`, pre-computed for the complete addition formulas.
    const B3: Self::Base;
    /// The x-coordinate of the standard group generator.
    const GENERATOR_X: Self::Base;
    /// The y-coordinate of the standard group generator.
    const GENERATOR_Y: Self::Base;
}

// ------------------------------------------------------------------------
// Affine points
// ------------------------------------------------------------------------

/// A point on the curve in affine coordinates.
#[derive(Copy, Clone)]
pub struct AffinePoint<C: Curve> {
    pub(crate) x: C::Base,
    pub(crate) y: C::Base,
    pub(crate) infinity: Choice,
}

impl<C: Curve> AffinePoint<C> {
    /// The standard group generator.
    pub fn generator() -> AffinePoint<C> {
        AffinePoint {
            x: C::GENERATOR_X,
            y: C::GENERATOR_Y,
            infinity: Choice::from(0),
        }
    }

    /// Construct a point from coordinates, validating the curve equation.
    ///
    /// Returns `None` (in the `CtOption` sense) if \\((x, y)\\) does not
    /// satisfy \\(y^2 = x^3 + b\\).  This does **not** check subgroup
    /// membership; on BN254 both groups have cofactor-free representations
    /// in their respective coordinate fields only for G1, and callers
    /// handing points to the scalar-multiplication entry points are
    /// responsible for cofactor clearing on G2.
    pub fn from_xy(x: C::Base, y: C::Base) -> CtOption<AffinePoint<C>> {
        let lhs = y.square();
        let rhs = x.square() * x + C::B;
        let on_curve = lhs.ct_eq(&rhs);
        CtOption::new(
            AffinePoint {
                x,
                y,
                infinity: Choice::from(0),
            },
            on_curve,
        )
    }

    /// The x-coordinate of this point.  Meaningless for the identity.
    pub fn x(&self) -> C::Base {
        self.x
    }

    /// The y-coordinate of this point.  Meaningless for the identity.
    pub fn y(&self) -> C::Base {
        self.y
    }

    /// Conditionally negate this point in place.  Both paths execute
    /// identically.
    pub fn conditional_negate(&mut self, choice: Choice) {
        let neg_y = -self.y;
        self.y = C::Base::conditional_select(&self.y, &neg_y, choice);
    }
}

impl<C: Curve> Identity for AffinePoint<C> {
    fn identity() -> AffinePoint<C> {
        AffinePoint {
            x: C::Base::ZERO,
            y: C::Base::ONE,
            infinity: Choice::from(1),
        }
    }
}

impl<C: Curve> IsIdentity for AffinePoint<C> {
    fn is_identity(&self) -> Choice {
        self.infinity
    }
}

impl<C: Curve> ValidityCheck for AffinePoint<C> {
    fn is_valid(&self) -> bool {
        let on_curve = self.y.square().ct_eq(&(self.x.square() * self.x + C::B));
        bool::from(on_curve | self.infinity)
    }
}

impl<'a, C: Curve> Neg for &'a AffinePoint<C> {
    type Output = AffinePoint<C>;
    fn neg(self) -> AffinePoint<C> {
        // Keep the conventional identity encoding when negating it.
        let neg_y = C::Base::conditional_select(&-self.y, &C::Base::ONE, self.infinity);
        AffinePoint {
            x: self.x,
            y: neg_y,
            infinity: self.infinity,
        }
    }
}

impl<C: Curve> Neg for AffinePoint<C> {
    type Output = AffinePoint<C>;
    fn neg(self) -> AffinePoint<C> {
        -&self
    }
}

impl<C: Curve> ConditionallySelectable for AffinePoint<C> {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        AffinePoint {
            x: C::Base::conditional_select(&a.x, &b.x, choice),
            y: C::Base::conditional_select(&a.y, &b.y, choice),
            infinity: Choice::conditional_select(&a.infinity, &b.infinity, choice),
        }
    }
}

impl<C: Curve> ConstantTimeEq for AffinePoint<C> {
    fn ct_eq(&self, other: &Self) -> Choice {
        let both_identity = self.infinity & other.infinity;
        let neither_identity = !self.infinity & !other.infinity;
        let coords_eq = self.x.ct_eq(&other.x) & self.y.ct_eq(&other.y);
        both_identity | (neither_identity & coords_eq)
    }
}

impl<C: Curve> PartialEq for AffinePoint<C> {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl<C: Curve> Eq for AffinePoint<C> {}

impl<C: Curve> Debug for AffinePoint<C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if bool::from(self.infinity) {
            write!(f, "AffinePoint(identity)")
        } else {
            write!(f, "AffinePoint({:?}, {:?})", self.x, self.y)
        }
    }
}

impl<C: Curve> Zeroize for AffinePoint<C> {
    fn zeroize(&mut self) {
        self.x.zeroize();
        self.y.zeroize();
        self.infinity = Choice::from(0);
    }
}

// ------------------------------------------------------------------------
// Projective points (complete formulas)
// ------------------------------------------------------------------------

/// A point on the curve in homogeneous projective coordinates.
#[derive(Copy, Clone)]
pub struct ProjectivePoint<C: Curve> {
    pub(crate) X: C::Base,
    pub(crate) Y: C::Base,
    pub(crate) Z: C::Base,
}

impl<C: Curve> ProjectivePoint<C> {
    /// The standard group generator.
    pub fn generator() -> ProjectivePoint<C> {
        ProjectivePoint::from(&AffinePoint::generator())
    }

    /// Complete point addition.
    ///
    /// Renes-Costello-Batina 2015, algorithm 7 (the \\(a = 0\\)
    /// specialisation).  Valid for every input pair, including doublings
    /// and the identity.
    pub fn add(&self, rhs: &ProjectivePoint<C>) -> ProjectivePoint<C> {
        let t0 = self.X * rhs.X;
        let t1 = self.Y * rhs.Y;
        let t2 = self.Z * rhs.Z;
        let t3 = self.X + self.Y;
        let t4 = rhs.X + rhs.Y;
        let t3 = t3 * t4;
        let t4 = t0 + t1;
        let t3 = t3 - t4;
        let t4 = self.Y + self.Z;
        let X3 = rhs.Y + rhs.Z;
        let t4 = t4 * X3;
        let X3 = t1 + t2;
        let t4 = t4 - X3;
        let X3 = self.X + self.Z;
        let Y3 = rhs.X + rhs.Z;
        let X3 = X3 * Y3;
        let Y3 = t0 + t2;
        let Y3 = X3 - Y3;
        let X3 = t0 + t0;
        let t0 = X3 + t0;
        let t2 = C::B3 * t2;
        let Z3 = t1 + t2;
        let t1 = t1 - t2;
        let Y3 = C::B3 * Y3;
        let X3 = t4 * Y3;
        let t2 = t3 * t1;
        let X3 = t2 - X3;
        let Y3 = Y3 * t0;
        let t1 = t1 * Z3;
        let Y3 = t1 + Y3;
        let t0 = t0 * t3;
        let Z3 = Z3 * t4;
        let Z3 = Z3 + t0;

        ProjectivePoint {
            X: X3,
            Y: Y3,
            Z: Z3,
        }
    }

    /// Complete mixed addition of a projective and an affine point.
    ///
    /// Renes-Costello-Batina 2015, algorithm 8 (\\(a = 0\\)), which is
    /// complete for every finite affine operand; an identity operand is
    /// handled with a constant-time selection.
    pub fn add_mixed(&self, rhs: &AffinePoint<C>) -> ProjectivePoint<C> {
        let t0 = self.X * rhs.x;
        let t1 = self.Y * rhs.y;
        let t3 = rhs.x + rhs.y;
        let t4 = self.X + self.Y;
        let t3 = t3 * t4;
        let t4 = t0 + t1;
        let t3 = t3 - t4;
        let t4 = rhs.x * self.Z;
        let t4 = t4 + self.X;
        let t5 = rhs.y * self.Z;
        let t5 = t5 + self.Y;
        let X3 = t0 + t0;
        let t0 = X3 + t0;
        let t2 = C::B3 * self.Z;
        let Z3 = t1 + t2;
        let t1 = t1 - t2;
        let Y3 = C::B3 * t4;
        let X3 = t5 * Y3;
        let t2 = t3 * t1;
        let X3 = t2 - X3;
        let Y3 = Y3 * t0;
        let t1 = t1 * Z3;
        let Y3 = t1 + Y3;
        let t0 = t0 * t3;
        let Z3 = Z3 * t5;
        let Z3 = Z3 + t0;

        let sum = ProjectivePoint {
            X: X3,
            Y: Y3,
            Z: Z3,
        };
        ProjectivePoint::conditional_select(&sum, self, rhs.infinity)
    }

    /// Complete point doubling (Renes-Costello-Batina 2015, algorithm 9).
    pub fn double(&self) -> ProjectivePoint<C> {
        let t0 = self.Y.square();
        let Z3 = t0 + t0;
        let Z3 = Z3 + Z3;
        let Z3 = Z3 + Z3;
        let t1 = self.Y * self.Z;
        let t2 = self.Z.square();
        let t2 = C::B3 * t2;
        let X3 = t2 * Z3;
        let Y3 = t0 + t2;
        let Z3 = t1 * Z3;
        let t1 = t2 + t2;
        let t2 = t1 + t2;
        let t0 = t0 - t2;
        let Y3 = t0 * Y3;
        let Y3 = X3 + Y3;
        let t1 = self.X * self.Y;
        let X3 = t0 * t1;
        let X3 = X3 + X3;

        ProjectivePoint {
            X: X3,
            Y: Y3,
            Z: Z3,
        }
    }

    /// Convert to affine coordinates with a single field inversion.
    pub fn to_affine(&self) -> AffinePoint<C> {
        let zinv = self.Z.invert(); // zero stays zero for the identity
        AffinePoint {
            x: self.X * zinv,
            y: self.Y * zinv,
            infinity: self.Z.is_zero(),
        }
    }
}

impl<C: Curve> Identity for ProjectivePoint<C> {
    fn identity() -> ProjectivePoint<C> {
        ProjectivePoint {
            X: C::Base::ZERO,
            Y: C::Base::ONE,
            Z: C::Base::ZERO,
        }
    }
}

impl<C: Curve> IsIdentity for ProjectivePoint<C> {
    fn is_identity(&self) -> Choice {
        self.Z.is_zero()
    }
}

impl<C: Curve> ValidityCheck for ProjectivePoint<C> {
    fn is_valid(&self) -> bool {
        // Y^2 Z = X^3 + b Z^3
        let lhs = self.Y.square() * self.Z;
        let z3 = self.Z.square() * self.Z;
        let rhs = self.X.square() * self.X + C::B * z3;
        lhs == rhs
    }
}

impl<'a, C: Curve> From<&'a AffinePoint<C>> for ProjectivePoint<C> {
    fn from(p: &'a AffinePoint<C>) -> ProjectivePoint<C> {
        let finite = ProjectivePoint {
            X: p.x,
            Y: p.y,
            Z: C::Base::ONE,
        };
        ProjectivePoint::conditional_select(&finite, &ProjectivePoint::identity(), p.infinity)
    }
}

impl<C: Curve> ConditionallySelectable for ProjectivePoint<C> {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        ProjectivePoint {
            X: C::Base::conditional_select(&a.X, &b.X, choice),
            Y: C::Base::conditional_select(&a.Y, &b.Y, choice),
            Z: C::Base::conditional_select(&a.Z, &b.Z, choice),
        }
    }
}

impl<C: Curve> ConstantTimeEq for ProjectivePoint<C> {
    /// Projective coordinates are not unique; compare cross-multiplied.
    fn ct_eq(&self, other: &Self) -> Choice {
        let x_eq = (self.X * other.Z).ct_eq(&(other.X * self.Z));
        let y_eq = (self.Y * other.Z).ct_eq(&(other.Y * self.Z));
        let self_id = self.is_identity();
        let other_id = other.is_identity();
        (self_id & other_id) | (!self_id & !other_id & x_eq & y_eq)
    }
}

impl<C: Curve> PartialEq for ProjectivePoint<C> {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl<C: Curve> Eq for ProjectivePoint<C> {}

impl<C: Curve> Debug for ProjectivePoint<C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "ProjectivePoint({:?} : {:?} : {:?})",
            self.X, self.Y, self.Z
        )
    }
}

impl<C: Curve> Zeroize for ProjectivePoint<C> {
    fn zeroize(&mut self) {
        self.X.zeroize();
        self.Y.zeroize();
        self.Z.zeroize();
    }
}

// Operator sugar: projective +/- projective and projective +/- affine.

impl<'a, 'b, C: Curve> Add<&'b ProjectivePoint<C>> for &'a ProjectivePoint<C> {
    type Output = ProjectivePoint<C>;
    fn add(self, rhs: &'b ProjectivePoint<C>) -> ProjectivePoint<C> {
        ProjectivePoint::add(self, rhs)
    }
}

impl<'a, 'b, C: Curve> Add<&'b AffinePoint<C>> for &'a ProjectivePoint<C> {
    type Output = ProjectivePoint<C>;
    fn add(self, rhs: &'b AffinePoint<C>) -> ProjectivePoint<C> {
        self.add_mixed(rhs)
    }
}

impl<'a, 'b, C: Curve> Sub<&'b ProjectivePoint<C>> for &'a ProjectivePoint<C> {
    type Output = ProjectivePoint<C>;
    fn sub(self, rhs: &'b ProjectivePoint<C>) -> ProjectivePoint<C> {
        self + &(-rhs)
    }
}

impl<'a, 'b, C: Curve> Sub<&'b AffinePoint<C>> for &'a ProjectivePoint<C> {
    type Output = ProjectivePoint<C>;
    fn sub(self, rhs: &'b AffinePoint<C>) -> ProjectivePoint<C> {
        self.add_mixed(&-rhs)
    }
}

impl<'a, C: Curve> Neg for &'a ProjectivePoint<C> {
    type Output = ProjectivePoint<C>;
    fn neg(self) -> ProjectivePoint<C> {
        ProjectivePoint {
            X: self.X,
            Y: -self.Y,
            Z: self.Z,
        }
    }
}

impl<C: Curve> Neg for ProjectivePoint<C> {
    type Output = ProjectivePoint<C>;
    fn neg(self) -> ProjectivePoint<C> {
        -&self
    }
}

// ------------------------------------------------------------------------
// Jacobian points
// ------------------------------------------------------------------------

/// A point on the curve in Jacobian coordinates.
#[derive(Copy, Clone)]
pub struct JacobianPoint<C: Curve> {
    pub(crate) X: C::Base,
    pub(crate) Y: C::Base,
    pub(crate) Z: C::Base,
}

impl<C: Curve> JacobianPoint<C> {
    /// Point doubling (`dbl-2009-l`, \\(a = 0\\)).
    ///
    /// Correct for every input: the identity (`Z = 0`) doubles to the
    /// identity since `Z3 = 2YZ = 0`.
    pub fn double(&self) -> JacobianPoint<C> {
        let A = self.X.square();
        let B = self.Y.square();
        let C_ = B.square();
        // D = 2*((X+B)^2 - A - C)
        let D = ((self.X + B).square() - A - C_).double();
        let E = A.double() + A;
        let F = E.square();
        let X3 = F - D.double();
        let eight_c = C_.double().double().double();
        let Y3 = E * (D - X3) - eight_c;
        let Z3 = (self.Y * self.Z).double();
        JacobianPoint {
            X: X3,
            Y: Y3,
            Z: Z3,
        }
    }

    /// Mixed addition of a Jacobian and an affine point
    /// (`madd-2007-bl`), with the degenerate cases resolved by
    /// constant-time selection:
    ///
    /// * either operand the identity: the other operand;
    /// * equal operands: the doubling;
    /// * opposite operands: the identity.
    ///
    /// The table builder only ever feeds it distinct finite points, but the
    /// selects keep it total.
    pub fn add_mixed(&self, rhs: &AffinePoint<C>) -> JacobianPoint<C> {
        let Z1Z1 = self.Z.square();
        let U2 = rhs.x * Z1Z1;
        let S2 = rhs.y * self.Z * Z1Z1;
        let H = U2 - self.X;
        let HH = H.square();
        let I = HH.double().double();
        let J = H * I;
        let rr = (S2 - self.Y).double();
        let V = self.X * I;
        let X3 = rr.square() - J - V.double();
        let Y3 = rr * (V - X3) - (self.Y * J).double();
        let Z3 = (self.Z + H).square() - Z1Z1 - HH;
        let sum = JacobianPoint {
            X: X3,
            Y: Y3,
            Z: Z3,
        };

        let h_is_zero = H.is_zero();
        let r_is_zero = rr.is_zero();

        // Resolve x-collision: same point (double) or inverse pair
        // (identity).
        let mut out = sum;
        out.conditional_assign(&self.double(), h_is_zero & r_is_zero);
        out.conditional_assign(&JacobianPoint::identity(), h_is_zero & !r_is_zero);
        // Identity operands.
        out.conditional_assign(&JacobianPoint::from(rhs), self.is_identity());
        out.conditional_assign(self, rhs.infinity);
        out
    }

    /// Convert to affine coordinates with a single field inversion.
    pub fn to_affine(&self) -> AffinePoint<C> {
        let zinv = self.Z.invert(); // zero stays zero for the identity
        let zinv2 = zinv.square();
        AffinePoint {
            x: self.X * zinv2,
            y: self.Y * zinv2 * zinv,
            infinity: self.Z.is_zero(),
        }
    }

    /// Convert an array of Jacobian points to affine, sharing a single
    /// field inversion across all of them (Montgomery's trick).
    pub fn batch_to_affine<const N: usize>(points: &[JacobianPoint<C>; N]) -> [AffinePoint<C>; N] {
        // Substitute 1 for any zero Z so the batch inversion stays
        // well-defined; the infinity flag re-asserts those entries below.
        let mut zs = [C::Base::ONE; N];
        for i in 0..N {
            zs[i] = C::Base::conditional_select(&points[i].Z, &C::Base::ONE, points[i].is_identity());
        }
        batch_invert(&mut zs);

        let mut out = [AffinePoint::identity(); N];
        for i in 0..N {
            let zinv2 = zs[i].square();
            out[i] = AffinePoint {
                x: points[i].X * zinv2,
                y: points[i].Y * zinv2 * zs[i],
                infinity: points[i].is_identity(),
            };
        }
        out
    }
}

impl<C: Curve> Identity for JacobianPoint<C> {
    fn identity() -> JacobianPoint<C> {
        JacobianPoint {
            X: C::Base::ONE,
            Y: C::Base::ONE,
            Z: C::Base::ZERO,
        }
    }
}

impl<C: Curve> IsIdentity for JacobianPoint<C> {
    fn is_identity(&self) -> Choice {
        self.Z.is_zero()
    }
}

impl<C: Curve> ValidityCheck for JacobianPoint<C> {
    fn is_valid(&self) -> bool {
        // Y^2 = X^3 + b Z^6
        let z2 = self.Z.square();
        let z6 = z2.square() * z2;
        let lhs = self.Y.square();
        let rhs = self.X.square() * self.X + C::B * z6;
        lhs == rhs || bool::from(self.is_identity())
    }
}

impl<'a, C: Curve> From<&'a AffinePoint<C>> for JacobianPoint<C> {
    fn from(p: &'a AffinePoint<C>) -> JacobianPoint<C> {
        let finite = JacobianPoint {
            X: p.x,
            Y: p.y,
            Z: C::Base::ONE,
        };
        JacobianPoint::conditional_select(&finite, &JacobianPoint::identity(), p.infinity)
    }
}

impl<C: Curve> ConditionallySelectable for JacobianPoint<C> {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        JacobianPoint {
            X: C::Base::conditional_select(&a.X, &b.X, choice),
            Y: C::Base::conditional_select(&a.Y, &b.Y, choice),
            Z: C::Base::conditional_select(&a.Z, &b.Z, choice),
        }
    }
}

impl<C: Curve> ConstantTimeEq for JacobianPoint<C> {
    /// Jacobian coordinates are not unique; compare via
    /// \\(X_1 Z_2^2 = X_2 Z_1^2\\), \\(Y_1 Z_2^3 = Y_2 Z_1^3\\).
    fn ct_eq(&self, other: &Self) -> Choice {
        let z1z1 = self.Z.square();
        let z2z2 = other.Z.square();
        let x_eq = (self.X * z2z2).ct_eq(&(other.X * z1z1));
        let y_eq = (self.Y * z2z2 * other.Z).ct_eq(&(other.Y * z1z1 * self.Z));
        let self_id = self.is_identity();
        let other_id = other.is_identity();
        (self_id & other_id) | (!self_id & !other_id & x_eq & y_eq)
    }
}

impl<C: Curve> PartialEq for JacobianPoint<C> {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl<C: Curve> Eq for JacobianPoint<C> {}

impl<C: Curve> Debug for JacobianPoint<C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "JacobianPoint({:?} : {:?} : {:?})",
            self.X, self.Y, self.Z
        )
    }
}

impl<C: Curve> Zeroize for JacobianPoint<C> {
    fn zeroize(&mut self) {
        self.X.zeroize();
        self.Y.zeroize();
        self.Z.zeroize();
    }
}

// ------------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::curve::g1::Bn254G1;

    type G1Affine = AffinePoint<Bn254G1>;
    type G1Projective = ProjectivePoint<Bn254G1>;
    type G1Jacobian = JacobianPoint<Bn254G1>;

    #[test]
    fn representations_roundtrip() {
        let g = G1Affine::generator();
        assert_eq!(G1Projective::from(&g).to_affine(), g);
        assert_eq!(G1Jacobian::from(&g).to_affine(), g);

        let id = G1Affine::identity();
        assert_eq!(G1Projective::from(&id).to_affine(), id);
        assert_eq!(G1Jacobian::from(&id).to_affine(), id);
    }

    #[test]
    fn projective_group_laws() {
        let g = G1Projective::generator();
        let id = G1Projective::identity();

        // identity is neutral, in both complete addition flavors
        assert_eq!(&g + &id, g);
        assert_eq!(&id + &g, g);
        assert_eq!(id.add_mixed(&G1Affine::generator()), g);
        assert_eq!(g.add_mixed(&G1Affine::identity()), g);

        // complete addition handles doubling
        assert_eq!(&g + &g, g.double());

        // inverse pairs cancel
        assert_eq!(&g + &(-&g), id);
        assert_eq!(&g - &g, id);
        assert_eq!(&g - &G1Affine::generator(), id);

        // 2G + G == G + 2G == 3G via different paths
        let g2 = g.double();
        let g3a = &g2 + &g;
        let g3b = g2.add_mixed(&G1Affine::generator());
        assert_eq!(g3a, g3b);
        assert!(g3a.is_valid());

        // identity doubles to identity
        assert_eq!(id.double(), id);
    }

    #[test]
    fn jacobian_matches_projective() {
        let ga = G1Affine::generator();
        let j = JacobianPoint::from(&ga);
        let p = ProjectivePoint::from(&ga);

        // 2G, 3G, 5G computed in both models agree in affine
        let j2 = j.double();
        let p2 = p.double();
        assert_eq!(j2.to_affine(), p2.to_affine());

        let j3 = j2.add_mixed(&ga);
        let p3 = p2.add_mixed(&ga);
        assert_eq!(j3.to_affine(), p3.to_affine());

        let j5 = j3.add_mixed(&j2.to_affine());
        let p5 = &p3 + &p2;
        assert_eq!(j5.to_affine(), p5.to_affine());
        assert!(j5.is_valid());
    }

    #[test]
    fn jacobian_mixed_add_degenerate_cases() {
        let ga = G1Affine::generator();
        let j = G1Jacobian::from(&ga);

        // identity + P
        assert_eq!(G1Jacobian::identity().add_mixed(&ga).to_affine(), ga);
        // P + identity
        assert_eq!(j.add_mixed(&G1Affine::identity()).to_affine(), ga);
        // P + P (doubling collision)
        assert_eq!(j.add_mixed(&ga), j.double());
        // P + (-P)
        assert!(bool::from(j.add_mixed(&-&ga).is_identity()));
    }

    #[test]
    fn batch_to_affine_matches_single() {
        let ga = G1Affine::generator();
        let j1 = G1Jacobian::from(&ga);
        let j2 = j1.double();
        let j3 = j2.add_mixed(&ga);
        let arr = [j1, j2, j3, G1Jacobian::identity()];
        let affs = G1Jacobian::batch_to_affine(&arr);
        for (jac, aff) in arr.iter().zip(affs.iter()) {
            assert_eq!(jac.to_affine(), *aff);
        }
        assert!(bool::from(affs[3].is_identity()));
    }

    #[test]
    fn from_xy_validates() {
        let g = G1Affine::generator();
        assert!(bool::from(G1Affine::from_xy(g.x, g.y).is_some()));
        // perturbing y must be rejected
        let bad_y = g.y + crate::field::FieldElement::ONE;
        assert!(bool::from(G1Affine::from_xy(g.x, bad_y).is_none()));
    }

    #[test]
    fn conditional_negate_affine() {
        let mut g = G1Affine::generator();
        let minus_g = -&G1Affine::generator();
        g.conditional_negate(Choice::from(0));
        assert_eq!(g, G1Affine::generator());
        g.conditional_negate(Choice::from(1));
        assert_eq!(g, minus_g);
    }
}
