// -*- mode: rust; -*-
//
// This file is part of bn254-endo.
// See LICENSE for licensing information.

//! The group \\(\mathbb G_2\\): BN254 points over \\(\mathbb F_{p^2}\\) on
//! the sextic twist \\(y^2 = x^3 + 3/(9+u)\\), and its GLS endomorphism.

use crate::constants;
use crate::curve::{AffinePoint, Curve};
use crate::field::Fp2;

/// Marker type for the \\(\mathbb G_2\\) group of BN254.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Bn254G2;

impl Curve for Bn254G2 {
    type Base = Fp2;
    const B: Fp2 = constants::G2_B;
    const B3: Fp2 = constants::G2_B3;
    const GENERATOR_X: Fp2 = constants::G2_GENERATOR_X;
    const GENERATOR_Y: Fp2 = constants::G2_GENERATOR_Y;
}

impl AffinePoint<Bn254G2> {
    /// The GLS endomorphism \\(\psi = \Phi^{-1} \circ \pi \circ \Phi\\):
    /// untwist to the full curve, apply the \\(p\\)-power Frobenius, twist
    /// back.  On the twist coordinates this collapses to a conjugation and
    /// two constant multiplications:
    /// \\(\psi(x, y) = (c_x \bar x, c_y \bar y)\\).
    ///
    /// On the order-`r` subgroup, \\(\psi(Q) = \[6x^2\]Q\\) (the eigenvalue
    /// is \\(p \equiv t - 1 \bmod r\\)).
    pub fn psi(&self) -> AffinePoint<Bn254G2> {
        AffinePoint {
            x: &constants::PSI_COEFF_X * &self.x.conjugate(),
            y: &constants::PSI_COEFF_Y * &self.y.conjugate(),
            infinity: self.infinity,
        }
    }
}
