// -*- mode: rust; -*-
//
// This file is part of bn254-endo.
// See LICENSE for licensing information.

//! The group \\(\mathbb G_1\\): BN254 points over the base field,
//! \\(y^2 = x^3 + 3\\), and its GLV endomorphism.

use crate::constants;
use crate::curve::{AffinePoint, Curve};
use crate::field::FieldElement;

/// Marker type for the \\(\mathbb G_1\\) group of BN254.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Bn254G1;

impl Curve for Bn254G1 {
    type Base = FieldElement;
    const B: FieldElement = constants::G1_B;
    const B3: FieldElement = constants::G1_B3;
    const GENERATOR_X: FieldElement = constants::G1_GENERATOR_X;
    const GENERATOR_Y: FieldElement = constants::G1_GENERATOR_Y;
}

impl AffinePoint<Bn254G1> {
    /// The GLV endomorphism \\(\varphi(x, y) = (\beta x, y)\\), satisfying
    /// \\(\varphi(P) = \[\lambda\]P\\) for every point of order `r`.
    ///
    /// An x-coordinate twist by a cube root of unity costs a single field
    /// multiplication, which is what makes the decomposition worthwhile.
    pub fn endomorphism(&self) -> AffinePoint<Bn254G1> {
        AffinePoint {
            x: &constants::BETA * &self.x,
            y: self.y,
            infinity: self.infinity,
        }
    }
}
