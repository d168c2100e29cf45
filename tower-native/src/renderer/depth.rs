use wgpu::*;

pub const DEPTH_FORMAT: TextureFormat = TextureFormat::Depth32Float;

//
// ──────────────────────────────────────────────────────────────
//   Size-dependent attachments, rebuilt on resize
// ──────────────────────────────────────────────────────────────
//

pub struct DepthResources
{
  pub view: TextureView,
}

impl DepthResources
{
  pub fn create(device: &Device, config: &SurfaceConfiguration, sample_count: u32) -> Self
  {
    let texture = device.create_texture(&TextureDescriptor {
      label: Some("Depth Texture"),
      size: Extent3d { width: config.width, height: config.height, depth_or_array_layers: 1 },
      mip_level_count: 1,
      sample_count,
      dimension: TextureDimension::D2,
      format: DEPTH_FORMAT,
      usage: TextureUsages::RENDER_ATTACHMENT,
      view_formats: &[],
    });

    let view = texture.create_view(&TextureViewDescriptor::default());

    Self { view }
  }
}

/// Multisampled colour target resolved into the swapchain image.
/// Absent when rendering single-sampled.
pub struct MsaaTarget
{
  pub view: TextureView,
}

impl MsaaTarget
{
  pub fn create(device: &Device, config: &SurfaceConfiguration, sample_count: u32) -> Option<Self>
  {
    if sample_count <= 1
    {
      return None;
    }

    let texture = device.create_texture(&TextureDescriptor {
      label: Some("MSAA Colour Texture"),
      size: Extent3d { width: config.width, height: config.height, depth_or_array_layers: 1 },
      mip_level_count: 1,
      sample_count,
      dimension: TextureDimension::D2,
      format: config.format,
      usage: TextureUsages::RENDER_ATTACHMENT,
      view_formats: &[],
    });

    let view = texture.create_view(&TextureViewDescriptor::default());

    Some(Self { view })
  }
}
