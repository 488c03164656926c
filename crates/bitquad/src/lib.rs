//! Bit-packed flag quads
//!
//! Renders one quad per boolean combination of N flags. Each quad's color is
//! decoded in the fragment stage from a single byte that packs the flags and a
//! continuous value, so the whole color scheme travels through one normalized
//! `u8` vertex attribute.
//!
//! ## Architecture
//!
//! - [`permutation`]: every flag vector for N flags, LSB-first
//! - [`codec`]: pack flags (and a value) into a byte, decode it back in `f32`
//! - [`grid`]: square grid layout and quad geometry
//! - [`mesh`]: interleaved vertex/index data for the renderer
//! - [`shader`]: WGSL with a decode routine unrolled for N
//! - [`config`]: startup configuration (JSON via serde)
//! - `gpu`: wgpu renderer (`wasm` feature)
//!
//! ## Example
//!
//! ```rust
//! use bitquad::{pack_flags_and_value, unpack_byte, FlagCount, GridConfig, QuadMesh};
//!
//! let byte = pack_flags_and_value(1.0, &[true, false, true]);
//! assert_eq!(byte, 191);
//!
//! let decoded = unpack_byte(byte, FlagCount::new(3).unwrap());
//! assert_eq!(decoded.flags(), &[1.0, 0.0, 1.0]);
//!
//! let mesh = QuadMesh::build(&GridConfig::default()).unwrap();
//! assert_eq!(mesh.vertices.len(), 8 * 6);
//! ```
//!
//! ## Design Principles
//!
//! 1. **Pure Rust Core**: packing, layout and shader generation are testable without a browser
//! 2. **Generate Once**: all vertex data is built at startup and uploaded as static buffers
//! 3. **Fixed N**: the flag count is validated once and carried as [`FlagCount`]

pub mod codec;
pub mod config;
pub mod error;
pub mod grid;
pub mod mesh;
pub mod permutation;
pub mod shader;

// WASM exports (only available with "wasm" feature)
#[cfg(feature = "wasm")]
mod util;
#[cfg(feature = "wasm")]
mod wasm;
#[cfg(feature = "wasm")]
pub use wasm::*;

// Renderer (only available with "wasm" feature)
#[cfg(feature = "wasm")]
pub mod gpu;

// Re-export core types for convenience
pub use codec::{
    pack_flags, pack_flags_and_value, quantize_value, unpack, unpack_byte, FlagCount, Unpacked,
    MAX_FLAGS,
};
pub use config::{ColorMode, CornerPattern, GridConfig, Interpolation};
pub use error::{BitquadError, Result};
pub use grid::{quad, GridLayout, VERTICES_PER_QUAD};
pub use mesh::{permutation_table, QuadMesh, QuadVertex};
pub use permutation::{permutation, permutations};
