//! WebGPU/WebGL2 renderer for the quad grid
//!
//! Thin glue around wgpu: one generated shader module, one pipeline, one
//! static vertex buffer and one u16 index buffer, drawn in a single pass.
//!
//! ## Design
//!
//! - All resources live in [`QuadGridRenderer`], created by one async init
//! - Mesh data is uploaded once and never rewritten
//! - Shader compiler messages are collected, not treated as fatal
//! - WebGPU when the browser has it, WebGL2 otherwise

mod init;
mod render;
mod renderer;

pub use renderer::QuadGridRenderer;
