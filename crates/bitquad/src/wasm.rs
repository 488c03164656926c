//! WASM exports for the quad grid
//!
//! `QuadGrid` wraps the mesh and renderer with a JS-friendly API. Config
//! crosses the boundary as JSON; errors come back as string `JsValue`s.

use wasm_bindgen::prelude::*;

use crate::config::GridConfig;
use crate::gpu::QuadGridRenderer;
use crate::mesh::QuadMesh;
use crate::util::{log, warn};

/// Install the panic hook when the module loads
#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Quad grid controller for WASM
#[wasm_bindgen]
pub struct QuadGrid {
    config: GridConfig,
    mesh: Option<QuadMesh>,
    renderer: Option<QuadGridRenderer>,
}

#[wasm_bindgen]
impl QuadGrid {
    /// Create an uninitialized grid
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            config: GridConfig::default(),
            mesh: None,
            renderer: None,
        }
    }

    /// Build the mesh and initialize the renderer on a canvas.
    ///
    /// `config_json` may be empty for defaults, e.g. `{"flagCount": 3}`.
    #[wasm_bindgen]
    pub async fn init(
        &mut self,
        canvas: web_sys::HtmlCanvasElement,
        config_json: &str,
    ) -> Result<(), JsValue> {
        let config = if config_json.trim().is_empty() {
            GridConfig::default()
        } else {
            GridConfig::from_json(config_json).map_err(|e| JsValue::from_str(&e.to_string()))?
        };

        let mesh = QuadMesh::build(&config).map_err(|e| JsValue::from_str(&e.to_string()))?;
        log_mesh(&mesh);

        log("[bitquad] Initializing renderer...");
        let renderer = match QuadGridRenderer::new(canvas, &config, &mesh).await {
            Ok(renderer) => renderer,
            Err(e) => {
                log(&format!("[bitquad] Failed to initialize renderer: {}", e));
                return Err(JsValue::from_str(&e));
            }
        };

        if !renderer.diagnostics().is_empty() {
            warn(&format!(
                "[bitquad] Shader compiler log:\n{}",
                renderer.diagnostics().join("\n")
            ));
        }
        log(&format!(
            "[bitquad] Renderer ready ({:?})",
            renderer.surface_format()
        ));

        self.config = config;
        self.mesh = Some(mesh);
        self.renderer = Some(renderer);
        Ok(())
    }

    /// Check if the renderer is initialized
    #[wasm_bindgen]
    pub fn is_initialized(&self) -> bool {
        self.renderer.is_some()
    }

    /// Render a frame
    #[wasm_bindgen]
    pub fn render(&mut self) -> Result<(), JsValue> {
        if let Some(renderer) = &mut self.renderer {
            renderer.render().map_err(|e| JsValue::from_str(&e))
        } else {
            Err(JsValue::from_str("Renderer not initialized"))
        }
    }

    /// Resize the surface
    #[wasm_bindgen]
    pub fn resize(&mut self, width: u32, height: u32) {
        if let Some(renderer) = &mut self.renderer {
            renderer.resize(width, height);
        }
    }

    /// Permutation table, one line per grid row, joined with newlines
    #[wasm_bindgen]
    pub fn permutation_table(&self) -> String {
        self.mesh
            .as_ref()
            .map(|mesh| mesh.table().join("\n"))
            .unwrap_or_default()
    }

    /// Active config as JSON
    #[wasm_bindgen]
    pub fn config_json(&self) -> String {
        self.config.to_json()
    }
}

impl Default for QuadGrid {
    fn default() -> Self {
        Self::new()
    }
}

fn log_mesh(mesh: &QuadMesh) {
    let layout = &mesh.layout;
    log(&format!(
        "[bitquad] {} cells, {} columns x {} rows, quad size {:.4}",
        layout.cell_count, layout.col_count, layout.row_count, layout.quad_size
    ));
    for row in mesh.table() {
        log(&row);
    }
}
