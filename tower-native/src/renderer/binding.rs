use wgpu::util::DeviceExt;

use crate::scene::SceneUniform;

/// The whole scene is one uniform block at group 0, binding 0,
/// read by both shader stages.
const SCENE_ENTRY: wgpu::BindGroupLayoutEntry = wgpu::BindGroupLayoutEntry {
  binding: 0,
  visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
  ty: wgpu::BindingType::Buffer {
    ty: wgpu::BufferBindingType::Uniform,
    has_dynamic_offset: false,
    min_binding_size: wgpu::BufferSize::new(std::mem::size_of::<SceneUniform>() as u64),
  },
  count: None,
};

pub struct SceneBinding
{
  buffer: wgpu::Buffer,
  pub bind_group: wgpu::BindGroup,
}

impl SceneBinding
{
  pub fn layout(device: &wgpu::Device) -> wgpu::BindGroupLayout
  {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
      label: Some("Scene BGL"),
      entries: &[SCENE_ENTRY],
    })
  }

  /// Uniform buffer starts zeroed; the first frame fills it.
  pub fn create(device: &wgpu::Device, layout: &wgpu::BindGroupLayout) -> Self
  {
    let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
      label: Some("Scene Buffer"),
      contents: bytemuck::bytes_of(&<SceneUniform as bytemuck::Zeroable>::zeroed()),
      usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
    });

    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
      label: Some("Scene BG"),
      layout,
      entries: &[wgpu::BindGroupEntry { binding: SCENE_ENTRY.binding, resource: buffer.as_entire_binding() }],
    });

    Self { buffer, bind_group }
  }

  pub fn write(&self, queue: &wgpu::Queue, uniform: &SceneUniform)
  {
    queue.write_buffer(&self.buffer, 0, bytemuck::bytes_of(uniform));
  }
}

#[cfg(test)]
mod tests
{
  use super::*;

  #[test]
  fn entry_covers_the_whole_uniform_in_both_stages()
  {
    assert_eq!(SCENE_ENTRY.binding, 0);
    assert_eq!(SCENE_ENTRY.visibility, wgpu::ShaderStages::VERTEX_FRAGMENT);

    match SCENE_ENTRY.ty
    {
      wgpu::BindingType::Buffer { ty, has_dynamic_offset, min_binding_size } =>
      {
        assert_eq!(ty, wgpu::BufferBindingType::Uniform);
        assert!(!has_dynamic_offset);
        assert_eq!(min_binding_size.map(|s| s.get()), Some(288));
      }
      other => panic!("unexpected binding type {other:?}"),
    }
  }
}
