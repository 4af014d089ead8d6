//! Seed expansion.
//!
//! Turns an arbitrary seed string into the four 32-bit words every generator in
//! [`crate::algorithm`] consumes. The mixing is the 128-bit `cyrb128` string hash; the
//! constants, shift counts and update order are fixed, so outputs match other
//! implementations bit for bit. It is **not** a cryptographic hash.

const INIT: [u32; 4] = [0x6A09_E667, 0xBB67_AE85, 0x3C6E_F372, 0xA54F_F53A];
const MUL: [u32; 4] = [0x239B_961B, 0xAB0E_9789, 0x38B3_4AE5, 0xA1E3_8B93];

/// Four words of generator input derived from a seed string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExpandedState {
    pub words: [u32; 4],
}

impl ExpandedState {
    /// Hashes `seed` into four words.
    ///
    /// Characters are fed as UTF-16 code units, so a character outside the BMP
    /// contributes two steps (its surrogate pair).
    pub fn from_seed(seed: &str) -> Self {
        let [mut h1, mut h2, mut h3, mut h4] = INIT;

        for k in seed.encode_utf16().map(u32::from) {
            // Each slot reads the already-updated value of the slot before it wraps.
            h1 = h2 ^ (h1 ^ k).wrapping_mul(MUL[0]);
            h2 = h3 ^ (h2 ^ k).wrapping_mul(MUL[1]);
            h3 = h4 ^ (h3 ^ k).wrapping_mul(MUL[2]);
            h4 = h1 ^ (h4 ^ k).wrapping_mul(MUL[3]);
        }

        h1 = (h3 ^ (h1 >> 18)).wrapping_mul(MUL[0]);
        h2 = (h4 ^ (h2 >> 22)).wrapping_mul(MUL[1]);
        h3 = (h1 ^ (h3 >> 17)).wrapping_mul(MUL[2]);
        h4 = (h2 ^ (h4 >> 19)).wrapping_mul(MUL[3]);

        // Every output word is folded against the unfolded `h1`.
        Self {
            words: [h1 ^ h2 ^ h3 ^ h4, h2 ^ h1, h3 ^ h1, h4 ^ h1],
        }
    }

    /// The same words in reverse order.
    #[inline]
    pub const fn reversed(self) -> Self {
        let [a, b, c, d] = self.words;
        Self {
            words: [d, c, b, a],
        }
    }
}

impl From<&str> for ExpandedState {
    fn from(seed: &str) -> Self {
        Self::from_seed(seed)
    }
}
