use super::init::*;
use super::render::*;
use crate::config::GridConfig;
use crate::mesh::QuadMesh;

/// Intermediate struct for GPU resources during initialization
struct GpuResources {
    device: wgpu::Device,
    queue: wgpu::Queue,
    surface_config: wgpu::SurfaceConfiguration,
    surface_format: wgpu::TextureFormat,
}

/// Intermediate struct for render resources during initialization
struct RenderResources {
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    diagnostics: Vec<String>,
}

/// Owns every GPU resource for one quad grid.
///
/// Buffers are uploaded once in [`QuadGridRenderer::new`] and never written
/// again; dropping the renderer releases them.
pub struct QuadGridRenderer {
    device: wgpu::Device,
    queue: wgpu::Queue,
    surface: wgpu::Surface<'static>,
    surface_config: wgpu::SurfaceConfiguration,
    surface_format: wgpu::TextureFormat,
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    clear: wgpu::Color,
    diagnostics: Vec<String>,
}

impl QuadGridRenderer {
    /// Create a renderer for a canvas and upload the mesh
    pub async fn new(
        canvas: web_sys::HtmlCanvasElement,
        config: &GridConfig,
        mesh: &QuadMesh,
    ) -> Result<Self, String> {
        let (instance, surface, width, height) = Self::create_surface(canvas)?;
        let gpu = Self::setup_gpu(&instance, &surface, width, height).await?;
        let resources = Self::setup_render_resources(&gpu, config, mesh).await;

        Ok(Self::assemble(surface, gpu, resources, config))
    }

    /// Create the wgpu instance and surface from canvas
    #[cfg(target_arch = "wasm32")]
    fn create_surface(
        canvas: web_sys::HtmlCanvasElement,
    ) -> Result<(wgpu::Instance, wgpu::Surface<'static>, u32, u32), String> {
        let width = canvas.width();
        let height = canvas.height();

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas))
            .map_err(|e| format!("Failed to create surface: {}", e))?;

        Ok((instance, surface, width, height))
    }

    /// Create the wgpu instance and surface from canvas (non-WASM stub)
    #[cfg(not(target_arch = "wasm32"))]
    fn create_surface(
        _canvas: web_sys::HtmlCanvasElement,
    ) -> Result<(wgpu::Instance, wgpu::Surface<'static>, u32, u32), String> {
        Err("QuadGridRenderer only supports WASM targets".to_string())
    }

    /// Setup GPU device, queue, and surface configuration
    async fn setup_gpu(
        instance: &wgpu::Instance,
        surface: &wgpu::Surface<'static>,
        width: u32,
        height: u32,
    ) -> Result<GpuResources, String> {
        let (device, queue, adapter) = create_device(instance, surface).await?;
        let (surface_config, surface_format) =
            configure_surface(surface, &adapter, &device, width, height)?;

        Ok(GpuResources {
            device,
            queue,
            surface_config,
            surface_format,
        })
    }

    /// Compile the shader, build the pipeline and upload the mesh
    async fn setup_render_resources(
        gpu: &GpuResources,
        config: &GridConfig,
        mesh: &QuadMesh,
    ) -> RenderResources {
        let shader = create_shader(&gpu.device, config);
        let diagnostics = shader_diagnostics(&shader).await;
        let pipeline = create_pipeline(&gpu.device, &shader, config, gpu.surface_format);
        let (vertex_buffer, index_buffer) = create_mesh_buffers(&gpu.device, mesh);

        RenderResources {
            pipeline,
            vertex_buffer,
            index_buffer,
            index_count: mesh.index_count(),
            diagnostics,
        }
    }

    fn assemble(
        surface: wgpu::Surface<'static>,
        gpu: GpuResources,
        resources: RenderResources,
        config: &GridConfig,
    ) -> Self {
        Self {
            device: gpu.device,
            queue: gpu.queue,
            surface,
            surface_config: gpu.surface_config,
            surface_format: gpu.surface_format,
            pipeline: resources.pipeline,
            vertex_buffer: resources.vertex_buffer,
            index_buffer: resources.index_buffer,
            index_count: resources.index_count,
            clear: clear_color(config.clear_color),
            diagnostics: resources.diagnostics,
        }
    }

    /// Shader compiler messages collected at startup
    pub fn diagnostics(&self) -> &[String] {
        &self.diagnostics
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.surface_format
    }

    /// Resize the surface
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }

        self.surface_config.width = width;
        self.surface_config.height = height;
        self.surface.configure(&self.device, &self.surface_config);
    }

    /// Render one frame
    pub fn render(&mut self) -> Result<(), String> {
        let output = self.get_surface_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Quad Grid Encoder"),
            });

        render_grid_pass(
            &mut encoder,
            &self.pipeline,
            &self.vertex_buffer,
            &self.index_buffer,
            self.index_count,
            &view,
            self.clear,
        );

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    /// Get surface texture with error handling
    fn get_surface_texture(&mut self) -> Result<wgpu::SurfaceTexture, String> {
        match self.surface.get_current_texture() {
            Ok(texture) => Ok(texture),
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.surface_config);
                Err("Surface reconfigured, skip frame".to_string())
            }
            Err(wgpu::SurfaceError::OutOfMemory) => Err("Out of GPU memory".to_string()),
            Err(wgpu::SurfaceError::Timeout) => Err("GPU timeout, skip frame".to_string()),
        }
    }
}
