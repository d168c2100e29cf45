use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use winit::window::Window;

use crate::config::Config;
use crate::scene::SceneUniform;

use super::binding::SceneBinding;
use super::cube::BoxMesh;
use super::depth::{DepthResources, MsaaTarget, DEPTH_FORMAT};

/// Both boxes share one mesh; the shader picks matrices by instance.
const INSTANCE_COUNT: u32 = 2;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FrameStatus
{
  Presented,
  Skipped,
}

pub struct Renderer
{
  surface: wgpu::Surface<'static>,
  device: wgpu::Device,
  queue: wgpu::Queue,
  config: wgpu::SurfaceConfiguration,

  sample_count: u32,
  clear_color: wgpu::Color,
  depth: DepthResources,
  msaa: Option<MsaaTarget>,

  scene: SceneBinding,

  pipeline: wgpu::RenderPipeline,
  mesh: BoxMesh,
}

//
// ──────────────────────────────────────────────────────────────
//   Public API
// ──────────────────────────────────────────────────────────────
//

impl Renderer
{
  pub async fn new(window: Arc<Window>, settings: &Config) -> Result<Self>
  {
    let size = window.inner_size();
    anyhow::ensure!(size.width > 0 && size.height > 0, "window has zero size");

    let instance = wgpu::Instance::default();
    let surface = instance.create_surface(window).context("failed to create wgpu surface")?;

    let adapter = request_adapter(&instance, &surface).await?;
    let info = adapter.get_info();
    log::info!("using adapter {} ({:?})", info.name, info.backend);

    let (device, queue) = request_device(&adapter).await?;

    let config = configure_surface(size.width, size.height, &surface, &adapter, &device)?;
    let sample_count = settings.window.msaa_samples;
    log::info!("surface {:?} {}x{}, {}x MSAA", config.format, config.width, config.height, sample_count);

    let depth = DepthResources::create(&device, &config, sample_count);
    let msaa = MsaaTarget::create(&device, &config, sample_count);

    let scene_layout = SceneBinding::layout(&device);
    let scene = SceneBinding::create(&device, &scene_layout);

    let pipeline = create_pipeline(&device, &config, &scene_layout, sample_count);
    let mesh = BoxMesh::create(&device, settings.scene.half_extents);

    let [r, g, b, a] = settings.window.clear_color;

    Ok(Self {
      surface,
      device,
      queue,
      config,
      sample_count,
      clear_color: wgpu::Color { r, g, b, a },
      depth,
      msaa,
      scene,
      pipeline,
      mesh,
    })
  }

  /// Zero sizes (minimised window) are ignored.
  pub fn resize(&mut self, width: u32, height: u32)
  {
    if width == 0 || height == 0
    {
      return;
    }

    self.config.width = width;
    self.config.height = height;
    self.surface.configure(&self.device, &self.config);

    self.depth = DepthResources::create(&self.device, &self.config, self.sample_count);
    self.msaa = MsaaTarget::create(&self.device, &self.config, self.sample_count);

    log::debug!("resized to {width}x{height}");
  }

  pub fn render(&mut self, uniform: &SceneUniform) -> Result<FrameStatus>
  {
    let frame = match self.surface.get_current_texture()
    {
      Ok(frame) => frame,
      Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) =>
      {
        log::warn!("surface lost or outdated, reconfiguring");
        self.surface.configure(&self.device, &self.config);
        return Ok(FrameStatus::Skipped);
      }
      Err(wgpu::SurfaceError::OutOfMemory) =>
      {
        return Err(anyhow!("out of memory acquiring surface texture"));
      }
      Err(e) =>
      {
        log::warn!("skipping frame: {e}");
        return Ok(FrameStatus::Skipped);
      }
    };

    self.scene.write(&self.queue, uniform);

    let view = frame.texture.create_view(&wgpu::TextureViewDescriptor::default());

    let mut encoder =
      self.device.create_command_encoder(&wgpu::CommandEncoderDescriptor { label: Some("Render Encoder") });

    let (color_view, resolve_target) = match &self.msaa
    {
      Some(msaa) => (&msaa.view, Some(&view)),
      None => (&view, None),
    };

    record_render_pass(
      &mut encoder,
      Targets { color: color_view, resolve: resolve_target, depth: &self.depth.view },
      self.clear_color,
      &self.pipeline,
      &self.scene.bind_group,
      &self.mesh,
    );

    self.queue.submit(Some(encoder.finish()));
    frame.present();

    Ok(FrameStatus::Presented)
  }
}

//
// ──────────────────────────────────────────────────────────────
//   Initialization Helpers
// ──────────────────────────────────────────────────────────────
//

async fn request_adapter(instance: &wgpu::Instance, surface: &wgpu::Surface<'_>) -> Result<wgpu::Adapter>
{
  instance
    .request_adapter(&wgpu::RequestAdapterOptions {
      power_preference: wgpu::PowerPreference::HighPerformance,
      compatible_surface: Some(surface),
      force_fallback_adapter: false,
    })
    .await
    .context("no suitable GPU adapter found")
}

async fn request_device(adapter: &wgpu::Adapter) -> Result<(wgpu::Device, wgpu::Queue)>
{
  adapter
    .request_device(&wgpu::DeviceDescriptor {
      label: Some("Tower Device"),
      required_features: wgpu::Features::empty(),
      required_limits: wgpu::Limits::default(),
      ..Default::default()
    })
    .await
    .context("failed to create device")
}

fn configure_surface(
  width: u32,
  height: u32,
  surface: &wgpu::Surface<'_>,
  adapter: &wgpu::Adapter,
  device: &wgpu::Device,
) -> Result<wgpu::SurfaceConfiguration>
{
  let caps = surface.get_capabilities(adapter);
  let format = choose_surface_format(&caps.formats).context("surface reports no supported formats")?;
  let alpha_mode = caps.alpha_modes.first().copied().unwrap_or(wgpu::CompositeAlphaMode::Auto);

  let config = wgpu::SurfaceConfiguration {
    usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
    format,
    width,
    height,
    present_mode: wgpu::PresentMode::Fifo,
    alpha_mode,
    view_formats: vec![],
    desired_maximum_frame_latency: 2,
  };

  surface.configure(device, &config);
  Ok(config)
}

/// sRGB when available, so the lit colours come out gamma-correct.
fn choose_surface_format(formats: &[wgpu::TextureFormat]) -> Option<wgpu::TextureFormat>
{
  formats.iter().copied().find(|f| f.is_srgb()).or_else(|| formats.first().copied())
}

fn create_pipeline(
  device: &wgpu::Device,
  config: &wgpu::SurfaceConfiguration,
  scene_bgl: &wgpu::BindGroupLayout,
  sample_count: u32,
) -> wgpu::RenderPipeline
{
  let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
    label: Some("Box Shader"),
    source: wgpu::ShaderSource::Wgsl(include_str!("../shaders/cube.wgsl").into()),
  });

  let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
    label: Some("Box Pipeline Layout"),
    bind_group_layouts: &[scene_bgl],
    push_constant_ranges: &[],
  });

  let vertex_layouts = BoxMesh::vertex_layouts();

  device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
    label: Some("Box Pipeline"),
    layout: Some(&layout),
    vertex: wgpu::VertexState {
      module: &shader,
      entry_point: Some("vs_main"),
      buffers: &vertex_layouts,
      compilation_options: wgpu::PipelineCompilationOptions::default(),
    },
    fragment: Some(wgpu::FragmentState {
      module: &shader,
      entry_point: Some("fs_main"),
      targets: &[Some(wgpu::ColorTargetState {
        format: config.format,
        blend: Some(wgpu::BlendState::REPLACE),
        write_mask: wgpu::ColorWrites::ALL,
      })],
      compilation_options: wgpu::PipelineCompilationOptions::default(),
    }),
    // both windings are drawn; the mesh is not consistently wound
    primitive: wgpu::PrimitiveState {
      topology: wgpu::PrimitiveTopology::TriangleList,
      strip_index_format: None,
      front_face: wgpu::FrontFace::Ccw,
      cull_mode: None,
      unclipped_depth: false,
      polygon_mode: wgpu::PolygonMode::Fill,
      conservative: false,
    },
    depth_stencil: Some(wgpu::DepthStencilState {
      format: DEPTH_FORMAT,
      depth_write_enabled: true,
      depth_compare: wgpu::CompareFunction::Less,
      stencil: wgpu::StencilState::default(),
      bias: wgpu::DepthBiasState::default(),
    }),
    multisample: wgpu::MultisampleState { count: sample_count, mask: !0, alpha_to_coverage_enabled: false },
    multiview: None,
    cache: None,
  })
}

//
// ──────────────────────────────────────────────────────────────
//   Render Pass
// ──────────────────────────────────────────────────────────────
//

struct Targets<'a>
{
  color: &'a wgpu::TextureView,
  resolve: Option<&'a wgpu::TextureView>,
  depth: &'a wgpu::TextureView,
}

fn record_render_pass(
  encoder: &mut wgpu::CommandEncoder,
  targets: Targets<'_>,
  clear_color: wgpu::Color,
  pipeline: &wgpu::RenderPipeline,
  scene_bg: &wgpu::BindGroup,
  mesh: &BoxMesh,
)
{
  let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
    label: Some("Box Render Pass"),
    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
      view: targets.color,
      resolve_target: targets.resolve,
      ops: wgpu::Operations { load: wgpu::LoadOp::Clear(clear_color), store: wgpu::StoreOp::Store },
      depth_slice: None,
    })],
    depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
      view: targets.depth,
      depth_ops: Some(wgpu::Operations { load: wgpu::LoadOp::Clear(1.0), store: wgpu::StoreOp::Store }),
      stencil_ops: None,
    }),
    ..Default::default()
  });

  pass.set_pipeline(pipeline);
  pass.set_bind_group(0, scene_bg, &[]);
  pass.set_vertex_buffer(0, mesh.position_buffer.slice(..));
  pass.set_vertex_buffer(1, mesh.normal_buffer.slice(..));
  pass.draw(0..mesh.vertex_count, 0..INSTANCE_COUNT);
}

#[cfg(test)]
mod tests
{
  use super::*;

  #[test]
  fn srgb_format_is_preferred()
  {
    let formats = [wgpu::TextureFormat::Bgra8Unorm, wgpu::TextureFormat::Bgra8UnormSrgb];
    assert_eq!(choose_surface_format(&formats), Some(wgpu::TextureFormat::Bgra8UnormSrgb));
  }

  #[test]
  fn first_format_is_used_without_srgb()
  {
    let formats = [wgpu::TextureFormat::Rgba16Float, wgpu::TextureFormat::Bgra8Unorm];
    assert_eq!(choose_surface_format(&formats), Some(wgpu::TextureFormat::Rgba16Float));
  }

  #[test]
  fn no_formats_yields_none()
  {
    assert_eq!(choose_surface_format(&[]), None);
  }
}
