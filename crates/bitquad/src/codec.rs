//! Flag/value byte codec
//!
//! ## Bit Layout (u8)
//!
//! ```text
//! Bit:  7   6   5  ...  8-N | 7-N  ...  0
//!      [F0][F1][F2] ... [FN-1][  VALUE   ]
//! ```
//!
//! Flags are written most-significant-bit first. The low `8 - N` bits carry a
//! continuous value in [0, 1], quantized from `floor(value * 255)` and capped
//! at 254 before being shifted down into the remaining width.
//!
//! Decoding runs on the normalized form `byte / 255` using only multiply,
//! floor and subtract, so the same arithmetic can run in a fragment shader
//! with no integer operators. See [`crate::shader`] for the GPU side.

use serde::{Deserialize, Serialize};

use crate::config::ColorMode;
use crate::error::{BitquadError, Result};

/// Maximum number of flags that fit in a packed byte.
pub const MAX_FLAGS: usize = 8;

/// Largest quantized value contribution before shifting.
///
/// Keeps a full-scale value from setting every low bit.
pub const MAX_VALUE_QUANTUM: u8 = 0xFE;

/// Number of decoded flag channels that map to RGB.
pub const COLOR_CHANNELS: usize = 3;

/// Validated flag count (0..=8), fixed for one run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct FlagCount(u8);

impl FlagCount {
    /// Create a flag count, rejecting anything above [`MAX_FLAGS`].
    pub fn new(n: usize) -> Result<Self> {
        if n > MAX_FLAGS {
            return Err(BitquadError::too_many_flags(n));
        }
        Ok(Self(n as u8))
    }

    #[inline]
    pub const fn get(self) -> usize {
        self.0 as usize
    }

    /// Bits left over for the continuous value.
    #[inline]
    pub const fn value_bits(self) -> usize {
        MAX_FLAGS - self.0 as usize
    }

    /// Number of flag vectors, `2^n`.
    #[inline]
    pub const fn permutation_count(self) -> usize {
        1 << self.0
    }

    /// How many decoded flags end up in color channels.
    #[inline]
    pub const fn color_channels(self) -> usize {
        if self.get() < COLOR_CHANNELS {
            self.get()
        } else {
            COLOR_CHANNELS
        }
    }
}

impl Default for FlagCount {
    fn default() -> Self {
        Self(3)
    }
}

impl TryFrom<usize> for FlagCount {
    type Error = BitquadError;

    fn try_from(n: usize) -> Result<Self> {
        Self::new(n)
    }
}

impl From<FlagCount> for usize {
    fn from(n: FlagCount) -> usize {
        n.get()
    }
}

/// Pack up to 8 flags into a byte, first flag in bit 7.
///
/// Flags past the eighth are dropped.
pub fn pack_flags(flags: &[bool]) -> u8 {
    flags
        .iter()
        .take(MAX_FLAGS)
        .enumerate()
        .filter(|&(_, &set)| set)
        .fold(0u8, |packed, (i, _)| packed | (1 << (7 - i)))
}

/// Quantize a continuous value to 0..=254. NaN maps to 0.
#[inline]
pub fn quantize_value(value: f32) -> u8 {
    if value.is_nan() {
        return 0;
    }
    let scaled = (value.clamp(0.0, 1.0) * 255.0).floor() as u8;
    scaled.min(MAX_VALUE_QUANTUM)
}

/// Pack flags and a continuous value into one byte.
///
/// The value occupies the `8 - flags.len()` low bits. A byte that carries any
/// value bits is never `0xFF`.
pub fn pack_flags_and_value(value: f32, flags: &[bool]) -> u8 {
    let count = flags.len().min(MAX_FLAGS);
    let mut packed = pack_flags(flags);
    if count < MAX_FLAGS {
        packed |= quantize_value(value) >> count;
        if packed == u8::MAX {
            packed &= !1;
        }
    }
    packed
}

/// Flags and remainder recovered from an encoded byte.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Unpacked {
    channels: [f32; MAX_FLAGS],
    count: FlagCount,
    /// Continuous value in [0, 1].
    pub remainder: f32,
}

impl Unpacked {
    /// Decoded flag channels, each 0.0 or 1.0.
    pub fn flags(&self) -> &[f32] {
        &self.channels[..self.count.get()]
    }

    /// Decoded flags as booleans.
    pub fn flag_bits(&self) -> Vec<bool> {
        self.flags().iter().map(|&c| c >= 0.5).collect()
    }

    /// Color the fragment stage writes for this decode.
    pub fn color(&self, mode: ColorMode) -> [f32; 4] {
        let rgb = [self.channels[0], self.channels[1], self.channels[2]];
        match mode {
            ColorMode::Alpha => [rgb[0], rgb[1], rgb[2], self.remainder],
            ColorMode::Grayscale => [
                rgb[0] * self.remainder,
                rgb[1] * self.remainder,
                rgb[2] * self.remainder,
                1.0,
            ],
        }
    }
}

/// Decode a normalized byte (`byte / 255`) into `n` flags and a remainder.
///
/// Mirrors the generated shader: `channel_k = floor(e * 2^(k+1)) - 2 * prefix`
/// where `prefix` is the integer formed by the channels already extracted, and
/// the remainder is `e * 2^n - prefix`. Channels saturate at 1.0 so that the
/// all-ones byte decodes to all-ones flags.
pub fn unpack(encoded: f32, n: FlagCount) -> Unpacked {
    let mut channels = [0.0f32; MAX_FLAGS];
    let mut prefix = 0.0f32;
    let mut scale = 1.0f32;

    for channel in channels.iter_mut().take(n.get()) {
        scale *= 2.0;
        let c = ((encoded * scale).floor() - prefix * 2.0).min(1.0);
        *channel = c;
        prefix = prefix * 2.0 + c;
    }

    Unpacked {
        channels,
        count: n,
        remainder: (encoded * scale - prefix).clamp(0.0, 1.0),
    }
}

/// Decode a raw byte as a normalized vertex attribute would deliver it.
#[inline]
pub fn unpack_byte(byte: u8, n: FlagCount) -> Unpacked {
    unpack(f32::from(byte) / 255.0, n)
}
