//! Browser console logging

use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    /// Console.log binding for WASM
    #[wasm_bindgen(js_namespace = console)]
    pub fn log(s: &str);

    /// Console.warn binding for WASM
    #[wasm_bindgen(js_namespace = console, js_name = warn)]
    pub fn warn(s: &str);
}
