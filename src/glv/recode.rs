// -*- mode: rust; -*-
//
// This file is part of bn254-endo.
// See LICENSE for licensing information.

//! Sign-aligned-column (GLV-SAC) recoding of the mini-scalars.
//!
//! The first mini-scalar (required odd) becomes a string of signed
//! non-zero digits \\(\{-1, +1\}\\); every other mini-scalar becomes
//! digits \\(\{-1, 0, +1\}\\) whose *sign is shared* with the first
//! column at the same position.  Sharing the sign is the trick: one table
//! entry plus one conditional negation per position covers all \\(M\\)
//! columns at once, with no zero-digit special case to leak through.
//!
//! Digits are packed one bit per position: column 0 stores the sign
//! (0 means \\(+\\), 1 means \\(-\\)), the other columns store the digit
//! magnitude.  Digit `i` of an `L`-digit column lives in byte
//! `(L-1-i) / 8` at bit `i mod 8`; buffers are zero-initialized and
//! writes OR in, so each digit is written once.

use subtle::Choice;

use zeroize::Zeroize;

use crate::bigint::BigInt;

/// A packed column of `len` one-bit digits.
#[derive(Copy, Clone)]
pub(crate) struct Recoded<const BYTES: usize> {
    bytes: [u8; BYTES],
    len: usize,
}

impl<const BYTES: usize> Recoded<BYTES> {
    /// An all-zero column of `len` digits.
    pub fn zeroed(len: usize) -> Recoded<BYTES> {
        debug_assert!(len >= 1 && len <= 8 * BYTES);
        Recoded {
            bytes: [0u8; BYTES],
            len,
        }
    }

    /// Digit `i`, counting from the least significant.
    #[inline(always)]
    pub fn digit(&self, i: usize) -> u8 {
        (self.bytes[(self.len - 1 - i) >> 3] >> (i & 7)) & 1
    }

    /// Write digit `i`.  The buffer is write-once: bits are OR'd in.
    #[inline(always)]
    pub fn set_digit(&mut self, i: usize, bit: u8) {
        debug_assert!(bit <= 1);
        self.bytes[(self.len - 1 - i) >> 3] |= bit << (i & 7);
    }
}

impl<const BYTES: usize> Zeroize for Recoded<BYTES> {
    fn zeroize(&mut self) {
        self.bytes.zeroize();
    }
}

/// The full GLV-SAC representation: `M` packed columns of `len` digits.
pub(crate) struct GlvSac<const M: usize, const BYTES: usize> {
    pub(crate) cols: [Recoded<BYTES>; M],
    len: usize,
}

impl<const M: usize, const BYTES: usize> GlvSac<M, BYTES> {
    /// Recode the mini-scalars.  `minis[0]` **must** be odd.
    ///
    /// Column 0 positions `i < len-1` encode the digit \\(2 b_{i+1} - 1\\)
    /// of the odd `minis[0]` (stored inverted: bit 1 means digit \\(-1\\));
    /// the top position is always \\(+1\\), which the zero initialization
    /// already encodes.  The other columns consume their mini-scalar one
    /// bit at a time, adding the bit back when the shared sign at that
    /// position is negative; the carry keeps the signed value exact.
    pub fn recode(minis: &[BigInt<2>; M], len: usize) -> GlvSac<M, BYTES> {
        debug_assert!(bool::from(minis[0].is_odd()));

        let mut cols = [Recoded::<BYTES>::zeroed(len); M];

        for i in 0..len - 1 {
            cols[0].set_digit(i, 1 ^ minis[0].bit(i + 1));
        }

        for j in 1..M {
            let mut kj = minis[j];
            for i in 0..len {
                let bit = (kj.limbs[0] & 1) as u8;
                cols[j].set_digit(i, bit);
                kj.shr1();
                kj.add_assign_word((bit & cols[0].digit(i)) as u64);
            }
            kj.zeroize();
        }

        GlvSac { cols, len }
    }

    /// The number of digit positions.
    pub fn len(&self) -> usize {
        self.len
    }

    /// The (secret) lookup-table index at position `i`: bit `j-1` is the
    /// digit magnitude of column `j`.
    pub fn table_index(&self, i: usize) -> u8 {
        let mut index = 0u8;
        for j in 1..M {
            index |= self.cols[j].digit(i) << (j - 1);
        }
        index
    }

    /// The shared sign at position `i`, as a `Choice` (set means negative).
    pub fn sign(&self, i: usize) -> Choice {
        Choice::from(self.cols[0].digit(i))
    }
}

impl<const M: usize, const BYTES: usize> Zeroize for GlvSac<M, BYTES> {
    fn zeroize(&mut self) {
        for col in self.cols.iter_mut() {
            col.zeroize();
        }
    }
}

// ------------------------------------------------------------------------
// Windowed (W = 2) recoding for the M = 2 fast path
// ------------------------------------------------------------------------

/// Window count for recoding a `bits`-wide mini-scalar in `window`-bit
/// windows: \\(\lceil \mathtt{bits}/\mathtt{window} \rceil + 1\\) rounded
/// up to a multiple of the window so positions pair cleanly.
const fn recoded_windows(bits: usize, window: usize) -> usize {
    let lw = (bits + window - 1) / window + 1;
    lw + lw % window
}

/// Window count for the 128-bit G1 mini-scalars.
pub(crate) const W2_WINDOWS: usize = recoded_windows(128, 2);

/// Bytes per packed windowed column: two bits per window.
pub(crate) const W2_BYTES: usize = (2 * W2_WINDOWS + 7) / 8;

/// The windowed recoded form of an `(odd, any)` mini-scalar pair: two
/// packed columns of 2-bit digits.
///
/// A window is two adjacent sign-aligned positions.  Column 0 packs the
/// two sign bits; the four codes read as `00` \\(+3\\), `01` \\(+1\\),
/// `10` \\(-1\\), `11` \\(-3\\) (the value is \\(3 - 2c\\)).  Column 1
/// packs the two magnitude bits; combined with the sign pattern they
/// select one of the eight window-table entries.
pub(crate) struct W2Recoded {
    k0: [u8; W2_BYTES],
    k1: [u8; W2_BYTES],
}

#[inline(always)]
fn get2(buf: &[u8; W2_BYTES], i: usize) -> u8 {
    (buf[(W2_WINDOWS - 1 - i) >> 2] >> ((i & 3) * 2)) & 3
}

#[inline(always)]
fn set2(buf: &mut [u8; W2_BYTES], i: usize, v: u8) {
    debug_assert!(v <= 3);
    buf[(W2_WINDOWS - 1 - i) >> 2] |= v << ((i & 3) * 2);
}

impl W2Recoded {
    /// Recode an `(odd, any)` mini-scalar pair into 2-bit windows.
    ///
    /// This is the bit-level GLV-SAC recoding over `2 * W2_WINDOWS`
    /// positions, consumed two positions per window.
    pub fn recode(minis: &[BigInt<2>; 2]) -> W2Recoded {
        debug_assert!(bool::from(minis[0].is_odd()));

        let bits = 2 * W2_WINDOWS;
        let mut sign_bits = [0u8; 2 * W2_WINDOWS];
        let mut mag_bits = [0u8; 2 * W2_WINDOWS];

        for j in 0..bits - 1 {
            sign_bits[j] = 1 ^ minis[0].bit(j + 1);
        }
        // sign_bits[bits - 1] stays 0: the top digit is +1.

        let mut k1 = minis[1];
        for j in 0..bits {
            let bit = (k1.limbs[0] & 1) as u8;
            mag_bits[j] = bit;
            k1.shr1();
            k1.add_assign_word((bit & sign_bits[j]) as u64);
        }
        k1.zeroize();

        let mut out = W2Recoded {
            k0: [0u8; W2_BYTES],
            k1: [0u8; W2_BYTES],
        };
        for i in 0..W2_WINDOWS {
            set2(&mut out.k0, i, sign_bits[2 * i] | (sign_bits[2 * i + 1] << 1));
            set2(&mut out.k1, i, mag_bits[2 * i] | (mag_bits[2 * i + 1] << 1));
        }
        sign_bits.zeroize();
        mag_bits.zeroize();
        out
    }

    /// The (secret) window-table index and negation flag at window `i`.
    ///
    /// With `c` the sign code and `e` the magnitude code:
    /// `isNeg = bit1(c)`, `parity = bit1(c) XOR bit0(c)` (set iff the
    /// first-column window digit is \\(\pm 1\\)), and the index is
    /// `parity << 2 | e`.
    pub fn window(&self, i: usize) -> (u8, Choice) {
        let c = get2(&self.k0, i);
        let e = get2(&self.k1, i);
        let is_neg = c >> 1;
        let parity = (c >> 1) ^ (c & 1);
        ((parity << 2) | e, Choice::from(is_neg))
    }
}

impl Zeroize for W2Recoded {
    fn zeroize(&mut self) {
        self.k0.zeroize();
        self.k1.zeroize();
    }
}

// ------------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::scalar::Scalar;
    use rand::Rng;

    /// Decode a recoded column back to its signed integer value, as a
    /// `Scalar`, using column 0 for the shared signs.
    fn decode_column<const M: usize, const BYTES: usize>(
        sac: &GlvSac<M, BYTES>,
        j: usize,
    ) -> Scalar {
        let mut acc = Scalar::ZERO;
        let mut power = Scalar::ONE;
        let two = Scalar::from_u64(2);
        for i in 0..sac.len() {
            let magnitude = if j == 0 { 1 } else { sac.cols[j].digit(i) };
            let term = if magnitude == 0 {
                Scalar::ZERO
            } else if sac.cols[0].digit(i) == 1 {
                -&power
            } else {
                power
            };
            acc = &acc + &term;
            power = &power * &two;
        }
        acc
    }

    fn mini(lo: u64, hi: u64) -> BigInt<2> {
        BigInt::from_limbs([lo, hi])
    }

    #[test]
    fn small_m4_recoding_columns() {
        // minis (11, 6, 14, 3) over 5 positions recode to the columns
        //   k0 = [1, -1, 1, -1, 1], k1 = [1, -1, 0, -1, 0],
        //   k2 = [1, 0, 0, -1, 0],  k3 = [0, 0, 1, -1, 1]
        // (most significant digit first).
        let minis = [mini(11, 0), mini(6, 0), mini(14, 0), mini(3, 0)];
        let sac = GlvSac::<4, 1>::recode(&minis, 5);

        let signs: [u8; 5] = core::array::from_fn(|i| sac.cols[0].digit(4 - i));
        assert_eq!(signs, [0, 1, 0, 1, 0]);
        let k1: [u8; 5] = core::array::from_fn(|i| sac.cols[1].digit(4 - i));
        assert_eq!(k1, [1, 1, 0, 1, 0]);
        let k2: [u8; 5] = core::array::from_fn(|i| sac.cols[2].digit(4 - i));
        assert_eq!(k2, [1, 0, 0, 1, 0]);
        let k3: [u8; 5] = core::array::from_fn(|i| sac.cols[3].digit(4 - i));
        assert_eq!(k3, [0, 0, 1, 1, 1]);

        // packed layout: 5 digits fit one byte, digit i at bit i
        assert_eq!(sac.cols[0].bytes, [0x0a]);
        assert_eq!(sac.cols[1].bytes, [0x1a]);
        assert_eq!(sac.cols[2].bytes, [0x12]);
        assert_eq!(sac.cols[3].bytes, [0x07]);

        // decoded values match the inputs
        assert_eq!(decode_column(&sac, 0), Scalar::from_u64(11));
        assert_eq!(decode_column(&sac, 1), Scalar::from_u64(6));
        assert_eq!(decode_column(&sac, 2), Scalar::from_u64(14));
        assert_eq!(decode_column(&sac, 3), Scalar::from_u64(3));
    }

    #[test]
    fn recoding_roundtrips_m2() {
        let mut rng = rand::thread_rng();
        for _ in 0..200 {
            let m0 = mini(rng.gen::<u64>() | 1, rng.gen());
            let m1 = mini(rng.gen(), rng.gen());
            let minis = [m0, m1];
            let sac = GlvSac::<2, 16>::recode(&minis, 128);

            let expect = |m: &BigInt<2>| {
                // lift the 128-bit mini to a scalar
                Scalar::from_limbs([m.limbs[0], m.limbs[1], 0, 0])
            };
            assert_eq!(decode_column(&sac, 0), expect(&m0));
            assert_eq!(decode_column(&sac, 1), expect(&m1));
        }
    }

    #[test]
    fn recoding_roundtrips_m4() {
        let mut rng = rand::thread_rng();
        for _ in 0..200 {
            let m: [BigInt<2>; 4] = core::array::from_fn(|j| {
                let hi = rng.gen::<u64>() & 1;
                let lo = rng.gen::<u64>() | ((j == 0) as u64);
                mini(lo, hi)
            });
            let sac = GlvSac::<4, 9>::recode(&m, 65);
            for j in 0..4 {
                assert_eq!(
                    decode_column(&sac, j),
                    Scalar::from_limbs([m[j].limbs[0], m[j].limbs[1], 0, 0])
                );
            }
        }
    }

    #[test]
    fn sparse_mini_fills_all_positions() {
        // A small odd mini-scalar recodes across the full 128 positions:
        // everything above its width becomes +1/-1 pairs that cancel.
        let minis = [mini(0x1234_5678_9abc_def1, 0), mini(42, 0)];
        let sac = GlvSac::<2, 16>::recode(&minis, 128);
        assert_eq!(
            decode_column(&sac, 0),
            Scalar::from_limbs([0x1234_5678_9abc_def1, 0, 0, 0])
        );
    }

    #[test]
    fn w2_windows_decode() {
        let mut rng = rand::thread_rng();
        let two = Scalar::from_u64(2);
        let four = &two * &two;
        for _ in 0..100 {
            let m0 = mini(rng.gen::<u64>() | 1, rng.gen());
            let m1 = mini(rng.gen(), rng.gen());
            let recoded = W2Recoded::recode(&[m0, m1]);

            // Decode the windows: the first-column window value is 3 - 2c,
            // the second-column value is sign(first) * map(e), with the
            // tier-1 map {0, -1, 2, 1} and the tier-3 map the identity.
            let mut v0 = Scalar::ZERO;
            let mut v1 = Scalar::ZERO;
            for i in (0..W2_WINDOWS).rev() {
                v0 = &v0 * &four;
                v1 = &v1 * &four;
                let c = get2(&recoded.k0, i);
                let e = get2(&recoded.k1, i) as usize;
                let k0_val: i64 = 3 - 2 * (c as i64);
                let tier1 = [0i64, -1, 2, 1];
                let k1_val = if k0_val.abs() == 1 {
                    k0_val.signum() * tier1[e]
                } else {
                    k0_val.signum() * (e as i64)
                };
                let lift = |v: i64| {
                    let s = Scalar::from_u64(v.unsigned_abs());
                    if v < 0 {
                        -&s
                    } else {
                        s
                    }
                };
                v0 = &v0 + &lift(k0_val);
                v1 = &v1 + &lift(k1_val);
            }
            assert_eq!(v0, Scalar::from_limbs([m0.limbs[0], m0.limbs[1], 0, 0]));
            assert_eq!(v1, Scalar::from_limbs([m1.limbs[0], m1.limbs[1], 0, 0]));
        }
    }

    #[test]
    fn w2_top_window_is_positive() {
        let recoded = W2Recoded::recode(&[mini(u64::MAX, u64::MAX), mini(u64::MAX, u64::MAX)]);
        let (_, is_neg) = recoded.window(W2_WINDOWS - 1);
        assert_eq!(is_neg.unwrap_u8(), 0);
    }
}
