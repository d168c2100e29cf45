use glam::{Mat4, Vec3};

use crate::camera::Camera;

/// The four matrices the shader needs for one frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameMatrices
{
  pub mvp: Mat4,
  pub mvp2: Mat4,
  pub mv: Mat4,
  pub mv2: Mat4,
}

//
// ──────────────────────────────────────────────────────────────
//   Model transforms
//
//   Both models persist across frames and start at identity.
//   Each frame post-multiplies a rotation about +Y (opposite
//   directions for the two boxes) followed by a translation in
//   the XZ plane.
// ──────────────────────────────────────────────────────────────
//

pub struct SceneTransforms
{
  pub model: Mat4,
  pub model2: Mat4,
}

impl SceneTransforms
{
  pub fn new() -> Self
  {
    Self { model: Mat4::IDENTITY, model2: Mat4::IDENTITY }
  }

  pub fn advance(&mut self, angle: f32, curr_x: f32, curr_y: f32)
  {
    let step = Mat4::from_translation(Vec3::new(curr_x, 0.0, curr_y));

    self.model = self.model * Mat4::from_rotation_y(angle) * step;
    self.model2 = self.model2 * Mat4::from_rotation_y(-angle) * step;
  }

  pub fn matrices(&self, camera: &Camera) -> FrameMatrices
  {
    let view = camera.view();
    let view_proj = camera.projection() * view;

    FrameMatrices {
      mvp: view_proj * self.model,
      mvp2: view_proj * self.model2,
      mv: view * self.model,
      mv2: view * self.model2,
    }
  }
}
