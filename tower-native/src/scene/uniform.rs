use glam::{Mat4, Vec4};

use super::transform::FrameMatrices;

//
// ──────────────────────────────────────────────────────────────
//   Scene Uniform (GPU side)
//
//   WGSL layout (cube.wgsl):
//     mvp   : array<mat4x4<f32>, 2>   → 128 bytes
//     mv    : array<mat4x4<f32>, 2>   → 128 bytes
//     light : vec4<f32>               →  16 bytes (view space)
//     color : vec4<f32>               →  16 bytes (rgb, w = ambient)
//   Total: 288 bytes
// ──────────────────────────────────────────────────────────────
//

#[repr(C)]
#[derive(Clone, Copy, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SceneUniform
{
  pub mvp: [[[f32; 4]; 4]; 2],
  pub mv: [[[f32; 4]; 4]; 2],
  pub light: [f32; 4],
  pub color: [f32; 4],
}

// Catch CPU/GPU layout mismatches at compile time
const _: () = assert!(std::mem::size_of::<SceneUniform>() == 288);

impl SceneUniform
{
  /// `light_view` must already be in view space.
  pub fn new(m: &FrameMatrices, light_view: Vec4, base_color: [f32; 3], ambient: f32) -> Self
  {
    Self {
      mvp: [cols(m.mvp), cols(m.mvp2)],
      mv: [cols(m.mv), cols(m.mv2)],
      light: light_view.to_array(),
      color: [base_color[0], base_color[1], base_color[2], ambient],
    }
  }
}

fn cols(mat: Mat4) -> [[f32; 4]; 4]
{
  mat.to_cols_array_2d()
}

#[cfg(test)]
mod tests
{
  use super::*;

  #[test]
  fn instances_are_laid_out_in_draw_order()
  {
    let m = FrameMatrices {
      mvp: Mat4::from_scale(glam::Vec3::splat(1.0)),
      mvp2: Mat4::from_scale(glam::Vec3::splat(2.0)),
      mv: Mat4::from_scale(glam::Vec3::splat(3.0)),
      mv2: Mat4::from_scale(glam::Vec3::splat(4.0)),
    };

    let u = SceneUniform::new(&m, Vec4::new(1.0, 2.0, 3.0, 1.0), [0.5, 0.6, 0.7], 0.2);

    assert_eq!(u.mvp[0][0][0], 1.0);
    assert_eq!(u.mvp[1][0][0], 2.0);
    assert_eq!(u.mv[0][0][0], 3.0);
    assert_eq!(u.mv[1][0][0], 4.0);
    assert_eq!(u.light, [1.0, 2.0, 3.0, 1.0]);
    assert_eq!(u.color, [0.5, 0.6, 0.7, 0.2]);
  }

  #[test]
  fn matrices_are_column_major()
  {
    let t = Mat4::from_translation(glam::Vec3::new(5.0, 6.0, 7.0));
    let m = FrameMatrices { mvp: t, mvp2: t, mv: t, mv2: t };

    let u = SceneUniform::new(&m, Vec4::ZERO, [0.0; 3], 0.0);
    assert_eq!(u.mvp[0][3], [5.0, 6.0, 7.0, 1.0]);

    let bytes = bytemuck::bytes_of(&u);
    assert_eq!(bytes.len(), 288);
  }
}
