use wgpu::util::DeviceExt;

use crate::config::GridConfig;
use crate::mesh::{QuadMesh, QuadVertex};
use crate::shader::{module_source, FS_ENTRY, VS_ENTRY};

/// Create wgpu device and adapter
pub async fn create_device(
    instance: &wgpu::Instance,
    surface: &wgpu::Surface<'static>,
) -> Result<(wgpu::Device, wgpu::Queue, wgpu::Adapter), String> {
    let adapter = instance
        .request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::LowPower,
            compatible_surface: Some(surface),
            force_fallback_adapter: false,
        })
        .await
        .ok_or_else(|| "Failed to find suitable GPU adapter".to_string())?;

    let (device, queue) = adapter
        .request_device(
            &wgpu::DeviceDescriptor {
                label: Some("Quad Grid Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults(),
                memory_hints: wgpu::MemoryHints::default(),
            },
            None,
        )
        .await
        .map_err(|e| format!("Failed to create device: {}", e))?;

    Ok((device, queue, adapter))
}

/// Configure the surface, preferring an alpha mode that blends with the page
pub fn configure_surface(
    surface: &wgpu::Surface<'static>,
    adapter: &wgpu::Adapter,
    device: &wgpu::Device,
    width: u32,
    height: u32,
) -> Result<(wgpu::SurfaceConfiguration, wgpu::TextureFormat), String> {
    let surface_caps = surface.get_capabilities(adapter);
    let surface_format = surface_caps
        .formats
        .iter()
        .find(|f| f.is_srgb())
        .or_else(|| surface_caps.formats.first())
        .copied()
        .ok_or_else(|| "Surface reports no supported formats".to_string())?;

    let alpha_mode = surface_caps
        .alpha_modes
        .first()
        .copied()
        .unwrap_or(wgpu::CompositeAlphaMode::Auto);

    let surface_config = wgpu::SurfaceConfiguration {
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        format: surface_format,
        width: width.max(1),
        height: height.max(1),
        present_mode: wgpu::PresentMode::AutoVsync,
        alpha_mode,
        view_formats: vec![],
        desired_maximum_frame_latency: 2,
    };
    surface.configure(device, &surface_config);

    Ok((surface_config, surface_format))
}

/// Upload the static vertex and index data
pub fn create_mesh_buffers(device: &wgpu::Device, mesh: &QuadMesh) -> (wgpu::Buffer, wgpu::Buffer) {
    let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("Quad Grid Vertex Buffer"),
        contents: mesh.vertex_bytes(),
        usage: wgpu::BufferUsages::VERTEX,
    });

    let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("Quad Grid Index Buffer"),
        contents: mesh.index_bytes(),
        usage: wgpu::BufferUsages::INDEX,
    });

    (vertex_buffer, index_buffer)
}

/// Position at location 0, packed byte (normalized) at location 1
const VERTEX_ATTRIBUTES: [wgpu::VertexAttribute; 2] = [
    wgpu::VertexAttribute {
        offset: 0,
        shader_location: 0,
        format: wgpu::VertexFormat::Float32x3,
    },
    wgpu::VertexAttribute {
        offset: 12,
        shader_location: 1,
        format: wgpu::VertexFormat::Unorm8x4,
    },
];

fn vertex_buffer_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<QuadVertex>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &VERTEX_ATTRIBUTES,
    }
}

/// Compile the generated shader module for this config
pub fn create_shader(device: &wgpu::Device, config: &GridConfig) -> wgpu::ShaderModule {
    let source = module_source(config);
    device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(&format!("Quad Grid Shader ({} flags)", config.flag_count.get())),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    })
}

/// Collect compiler messages as log lines. Empty when the shader is clean.
pub async fn shader_diagnostics(shader: &wgpu::ShaderModule) -> Vec<String> {
    shader
        .get_compilation_info()
        .await
        .messages
        .iter()
        .map(|m| match &m.location {
            Some(loc) => format!(
                "{:?} at {}:{}: {}",
                m.message_type, loc.line_number, loc.line_position, m.message
            ),
            None => format!("{:?}: {}", m.message_type, m.message),
        })
        .collect()
}

/// Create the quad grid render pipeline
pub fn create_pipeline(
    device: &wgpu::Device,
    shader: &wgpu::ShaderModule,
    config: &GridConfig,
    format: wgpu::TextureFormat,
) -> wgpu::RenderPipeline {
    let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Quad Grid Pipeline Layout"),
        bind_group_layouts: &[],
        push_constant_ranges: &[],
    });

    let blend = if config.color_mode.blends() {
        Some(wgpu::BlendState::ALPHA_BLENDING)
    } else {
        None
    };

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("Quad Grid Pipeline"),
        layout: Some(&pipeline_layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some(VS_ENTRY),
            buffers: &[vertex_buffer_layout()],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some(FS_ENTRY),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend,
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_layout_matches_record() {
        let layout = vertex_buffer_layout();
        assert_eq!(layout.array_stride, 16);
        assert_eq!(layout.attributes[1].offset, std::mem::offset_of!(QuadVertex, packed) as u64);
        assert_eq!(
            layout.attributes[1].format.size() as usize,
            std::mem::size_of::<[u8; 4]>()
        );
    }
}
