// -*- mode: rust; -*-
//
// This file is part of bn254-endo.
// See LICENSE for licensing information.

#![cfg_attr(not(test), no_std)]
#![deny(missing_docs)] // refuse to compile if documentation is missing

//! # bn254-endo
//!
//! **A Rust implementation of constant-time, endomorphism-accelerated
//! scalar multiplication on the BN254 pairing-friendly curve.**
//!
//! Given a secret scalar \\(k\\) and a point \\(P\\), the crate computes
//! \\(\[k\]P\\) in time independent of \\(k\\):
//!
//! * on \\(\mathbb G_1\\) via the GLV method, splitting \\(k\\) into two
//!   half-width mini-scalars against the cube-root-of-unity endomorphism
//!   \\(\varphi(x, y) = (\beta x, y)\\);
//! * on \\(\mathbb G_2\\) via the combined GLV+GLS method, splitting
//!   \\(k\\) into four quarter-width mini-scalars against the iterated
//!   untwist-Frobenius-twist endomorphism \\(\psi\\).
//!
//! The pipeline is: Babai-rounded lattice decomposition, sign-aligned-column
//! (GLV-SAC) signed-digit recoding, a small precomputed lookup table scanned
//! with constant-time selection, and a double-and-add accumulation over
//! complete point addition formulas.  Secret data never selects a memory
//! address, shortens a loop, or picks a branch.

#[macro_use]
pub(crate) mod macros;

// Low-level integer and field arithmetic.

pub mod bigint;
pub mod field;
pub mod scalar;

// Curve groups and the scalar-multiplication engine.

pub mod curve;
pub mod glv;

// Common traits and pre-computed curve parameters.

pub mod constants;
pub mod traits;

#[cfg(test)]
pub(crate) mod testutil;

pub use crate::curve::{AffinePoint, Bn254G1, Bn254G2, JacobianPoint, ProjectivePoint};
pub use crate::field::{Field, FieldElement, Fp2};
pub use crate::glv::{mul_g1, mul_g1_w2, mul_g2};
pub use crate::scalar::Scalar;
