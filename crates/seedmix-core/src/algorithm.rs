//! The interchangeable 32-bit generators.
//!
//! Every generator is a pure function of an [`ExpandedState`]: one step of the
//! underlying PRNG is taken from the given words and only the output word is kept.
//! Nothing is retained between calls, so switching algorithm never leaves stale state
//! behind. All arithmetic wraps at 32 bits. None of these are cryptographically
//! secure.

use std::str::FromStr;

use strum::{EnumIter, EnumString, IntoStaticStr};

use crate::{error::Error, hash::ExpandedState};

/// `2^32` as a float; dividing an output word by it lands in `[0, 1)`.
const WORD_RANGE: f64 = 4_294_967_296.0;

/// Selectable generator.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumString, EnumIter, IntoStaticStr,
)]
#[strum(serialize_all = "lowercase")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Algorithm {
    /// Bob Jenkins' small fast generator, 32-bit variant.
    Jsf32,
    /// Tommy Ettinger's Mulberry32. Its single state word is the wrapping sum of all
    /// four expanded words.
    Mulberry32,
    /// Chris Doty-Humphrey's Small Fast Counting generator.
    Sfc32,
    /// 32-bit SplitMix; consumes only the first expanded word.
    #[default]
    Splitmix32,
    /// Blackman and Vigna's xoshiro128**.
    #[strum(to_string = "xoshiro128**", serialize = "xoshiro128ss")]
    #[cfg_attr(feature = "serde", serde(rename = "xoshiro128**", alias = "xoshiro128ss"))]
    Xoshiro128StarStar,
}

impl Algorithm {
    pub const ALL: [Algorithm; 5] = [
        Algorithm::Jsf32,
        Algorithm::Mulberry32,
        Algorithm::Sfc32,
        Algorithm::Splitmix32,
        Algorithm::Xoshiro128StarStar,
    ];

    /// Parses a canonical name (or the `xoshiro128ss` alias).
    pub fn from_name(name: &str) -> Result<Self, Error> {
        Self::from_str(name).map_err(|_| Error::UnknownAlgorithm(name.to_owned()))
    }

    /// Canonical name, e.g. `"xoshiro128**"`.
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// Raw 32-bit output for `state`.
    pub fn next_word(self, state: &ExpandedState) -> u32 {
        let words = state.words;
        match self {
            Algorithm::Jsf32 => jsf32(words),
            Algorithm::Mulberry32 => mulberry32(
                words[0]
                    .wrapping_add(words[1])
                    .wrapping_add(words[2])
                    .wrapping_add(words[3]),
            ),
            Algorithm::Sfc32 => sfc32(words),
            Algorithm::Splitmix32 => splitmix32(words[0]),
            Algorithm::Xoshiro128StarStar => xoshiro128_star_star(words),
        }
    }

    /// Uniform draw in `[0, 1)` for `state`.
    #[inline]
    pub fn generate(self, state: &ExpandedState) -> f64 {
        to_unit(self.next_word(state))
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Maps an output word into `[0, 1)`.
#[inline]
pub fn to_unit(word: u32) -> f64 {
    f64::from(word) / WORD_RANGE
}

/// One JSF step; returns the new `d`.
#[inline]
pub fn jsf32([a, b, c, _d]: [u32; 4]) -> u32 {
    let t = a.wrapping_sub(b.rotate_left(27));
    let a = b ^ c.rotate_left(17);
    a.wrapping_add(t)
}

#[inline]
pub fn mulberry32(state: u32) -> u32 {
    let mut t = state.wrapping_add(0x6D2B_79F5);
    t = (t ^ (t >> 15)).wrapping_mul(t | 1);
    t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
    t ^ (t >> 14)
}

/// One SFC step; returns the output counter sum `a + b + (d + 1)`.
#[inline]
pub fn sfc32([a, b, _c, d]: [u32; 4]) -> u32 {
    let d = d.wrapping_add(1);
    a.wrapping_add(b).wrapping_add(d)
}

#[inline]
pub fn splitmix32(state: u32) -> u32 {
    let z = state.wrapping_add(0x9E37_79B9);
    let mut t = z ^ (z >> 16);
    t = t.wrapping_mul(0x21F0_AAAD);
    t ^= t >> 15;
    t = t.wrapping_mul(0x735A_2D97);
    t ^ (t >> 15)
}

/// The `**` scrambler only reads `b`; the state transition is not needed for a
/// single draw.
#[inline]
pub fn xoshiro128_star_star([_a, b, _c, _d]: [u32; 4]) -> u32 {
    b.wrapping_mul(5).rotate_left(7).wrapping_mul(9)
}
