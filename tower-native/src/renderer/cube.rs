use wgpu::util::DeviceExt;

pub const BOX_VERTEX_COUNT: usize = 36;

type Vec3 = [f32; 3];

//
// ──────────────────────────────────────────────────────────────
//   BoxMesh: non-indexed triangle list, two vertex buffers
//     slot 0 → positions  (location 0)
//     slot 1 → normals    (location 1)
// ──────────────────────────────────────────────────────────────
//

pub struct BoxMesh
{
  pub position_buffer: wgpu::Buffer,
  pub normal_buffer: wgpu::Buffer,
  pub vertex_count: u32,
}

impl BoxMesh
{
  pub fn create(device: &wgpu::Device, half_extents: Vec3) -> Self
  {
    let positions = box_positions(half_extents);
    let normals = box_normals();

    let position_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
      label: Some("Box Position Buffer"),
      contents: bytemuck::cast_slice(&positions),
      usage: wgpu::BufferUsages::VERTEX,
    });

    let normal_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
      label: Some("Box Normal Buffer"),
      contents: bytemuck::cast_slice(&normals),
      usage: wgpu::BufferUsages::VERTEX,
    });

    Self { position_buffer, normal_buffer, vertex_count: positions.len() as u32 }
  }

  pub fn vertex_layouts() -> [wgpu::VertexBufferLayout<'static>; 2]
  {
    const POSITION: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];
    const NORMAL: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![1 => Float32x3];

    [
      wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<Vec3>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &POSITION,
      },
      wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<Vec3>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &NORMAL,
      },
    ]
  }
}

//
// ──────────────────────────────────────────────────────────────
//   Geometry
//
//   Y-up box centred on the origin. Face order: front (+Z),
//   back (-Z), left (-X), right (+X), top (+Y), bottom (-Y),
//   two triangles each.
// ──────────────────────────────────────────────────────────────
//

pub fn box_positions(half_extents: Vec3) -> [Vec3; BOX_VERTEX_COUNT]
{
  let [x, y, z] = half_extents;

  #[rustfmt::skip]
  let positions = [
    // front
    [-x, -y,  z], [ x, -y,  z], [ x,  y,  z],
    [ x,  y,  z], [-x,  y,  z], [-x, -y,  z],
    // back
    [-x, -y, -z], [-x,  y, -z], [ x,  y, -z],
    [ x,  y, -z], [ x, -y, -z], [-x, -y, -z],
    // left
    [-x, -y, -z], [-x, -y,  z], [-x,  y,  z],
    [-x,  y,  z], [-x,  y, -z], [-x, -y, -z],
    // right
    [ x, -y, -z], [ x, -y,  z], [ x,  y,  z],
    [ x,  y,  z], [ x,  y, -z], [ x, -y, -z],
    // top
    [-x,  y, -z], [ x,  y, -z], [ x,  y,  z],
    [ x,  y,  z], [-x,  y,  z], [-x,  y, -z],
    // bottom
    [-x, -y, -z], [-x, -y,  z], [ x, -y,  z],
    [ x, -y,  z], [ x, -y, -z], [-x, -y, -z],
  ];

  positions
}

pub fn box_normals() -> [Vec3; BOX_VERTEX_COUNT]
{
  const FACES: [Vec3; 6] = [
    [0.0, 0.0, 1.0],  // front
    [0.0, 0.0, -1.0], // back
    [-1.0, 0.0, 0.0], // left
    [1.0, 0.0, 0.0],  // right
    [0.0, 1.0, 0.0],  // top
    [0.0, -1.0, 0.0], // bottom
  ];

  std::array::from_fn(|i| FACES[i / 6])
}
