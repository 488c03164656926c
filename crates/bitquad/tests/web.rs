//! Browser tests for the WASM surface
//!
//! Run with `wasm-pack test --headless --chrome crates/bitquad -- --features wasm`.

#![cfg(all(target_arch = "wasm32", feature = "wasm"))]

use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn test_uninitialized_grid() {
    let mut grid = bitquad::QuadGrid::new();
    assert!(!grid.is_initialized());
    assert!(grid.permutation_table().is_empty());
    assert!(grid.render().is_err());
}

#[wasm_bindgen_test]
fn test_default_config_json() {
    let grid = bitquad::QuadGrid::default();
    let config = bitquad::GridConfig::from_json(&grid.config_json()).unwrap();
    assert_eq!(config, bitquad::GridConfig::default());
}
