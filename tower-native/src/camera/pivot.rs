use glam::{Mat4, Vec3};

use crate::config::CameraConfig;

//
// ──────────────────────────────────────────────────────────────
//   Pivot Camera (right-handed, Y-up)
//
//   The eye starts in front of the boxes and looks at a fixed
//   point at mid-height. Per-frame offsets swing it around:
//     curr_y → up/down around the look height, clamped
//     curr_x → around the vertical axis, unclamped
// ──────────────────────────────────────────────────────────────
//

pub struct Camera
{
  pub eye: Vec3,
  pub look: Vec3,
  pub up: Vec3,

  pub min_height: f32,
  pub max_height: f32,

  pub aspect: f32,
  pub fovy: f32,
  pub znear: f32,
  pub zfar: f32,
}

impl Camera
{
  pub fn from_config(config: &CameraConfig, aspect: f32) -> Self
  {
    Self {
      eye: Vec3::from_array(config.eye),
      look: Vec3::from_array(config.look),
      up: Vec3::from_array(config.up),

      min_height: config.min_height,
      max_height: config.max_height,

      aspect,
      fovy: config.fov_y_degrees.to_radians(),
      znear: config.z_near,
      zfar: config.z_far,
    }
  }

  pub fn set_aspect(&mut self, aspect: f32)
  {
    self.aspect = aspect;
  }

  /// Move the eye by one frame's offsets.
  ///
  /// The vertical swing is skipped while the eye is already past a
  /// height limit and the offset would push it further out. The
  /// horizontal swing reads the eye after the vertical one.
  pub fn apply_offsets(&mut self, curr_x: f32, curr_y: f32)
  {
    if !vertical_blocked(self, curr_y)
    {
      let eye = self.eye;
      self.eye += Vec3::new(0.0, curr_y * eye.z, -curr_y * (eye.y - self.look.y));
    }

    let eye = self.eye;
    self.eye += Vec3::new(curr_x * eye.z, 0.0, -curr_x * eye.x);
  }

  pub fn view(&self) -> Mat4
  {
    Mat4::look_at_rh(self.eye, self.look, self.up)
  }

  pub fn projection(&self) -> Mat4
  {
    Mat4::perspective_rh(self.fovy, self.aspect, self.znear, self.zfar)
  }
}

fn vertical_blocked(cam: &Camera, curr_y: f32) -> bool
{
  (cam.eye.y < cam.min_height && curr_y < 0.0) || (cam.eye.y > cam.max_height && curr_y > 0.0)
}

#[cfg(test)]
mod tests
{
  use super::*;

  fn camera() -> Camera
  {
    Camera::from_config(&CameraConfig::default(), 4.0 / 3.0)
  }

  #[test]
  fn zero_offsets_leave_eye_in_place()
  {
    let mut cam = camera();
    for _ in 0..100
    {
      cam.apply_offsets(0.0, 0.0);
    }
    assert_eq!(cam.eye, Vec3::new(0.0, 3.0, 10.0));
  }

  #[test]
  fn vertical_offset_swings_around_look_height()
  {
    let mut cam = camera();
    cam.apply_offsets(0.0, 0.1);

    // y += 0.1 * z, z -= 0.1 * (y - 3) with y still at look height
    assert!(cam.eye.abs_diff_eq(Vec3::new(0.0, 4.0, 10.0), 1e-6));

    cam.apply_offsets(0.0, 0.1);
    assert!(cam.eye.abs_diff_eq(Vec3::new(0.0, 5.0, 9.9), 1e-5));
  }

  #[test]
  fn upward_motion_stops_above_max_height()
  {
    let mut cam = camera();
    cam.eye = Vec3::new(0.0, 11.5, 4.0);

    cam.apply_offsets(0.0, 0.1);
    assert_eq!(cam.eye, Vec3::new(0.0, 11.5, 4.0));

    // moving back down is still allowed
    cam.apply_offsets(0.0, -0.1);
    assert!(cam.eye.y < 11.5);
  }

  #[test]
  fn downward_motion_stops_below_min_height()
  {
    let mut cam = camera();
    cam.eye = Vec3::new(0.0, -6.0, 4.0);

    cam.apply_offsets(0.0, -0.1);
    assert_eq!(cam.eye, Vec3::new(0.0, -6.0, 4.0));

    cam.apply_offsets(0.0, 0.1);
    assert!(cam.eye.y > -6.0);
  }

  #[test]
  fn horizontal_offset_is_never_clamped()
  {
    let mut cam = camera();
    cam.eye = Vec3::new(0.0, 20.0, 10.0);

    cam.apply_offsets(0.1, 0.1);

    // vertical part blocked, horizontal part applied: x += 0.1 * z, z -= 0.1 * x
    assert!(cam.eye.abs_diff_eq(Vec3::new(1.0, 20.0, 10.0), 1e-6));
  }

  #[test]
  fn horizontal_step_uses_eye_after_vertical_step()
  {
    let mut cam = camera();
    cam.apply_offsets(0.1, 0.1);

    // vertical: (0, 4, 10); horizontal: x += 0.1 * 10, z -= 0.1 * 0
    assert!(cam.eye.abs_diff_eq(Vec3::new(1.0, 4.0, 10.0), 1e-6));
  }

  #[test]
  fn view_maps_look_point_onto_forward_axis()
  {
    let cam = camera();
    let p = cam.view().transform_point3(cam.look);

    assert!(p.x.abs() < 1e-5 && p.y.abs() < 1e-5);
    assert!((p.z + 10.0).abs() < 1e-5);
  }

  #[test]
  fn projection_depth_range_is_zero_to_one()
  {
    let cam = camera();
    let proj = cam.projection();

    let near = proj.project_point3(Vec3::new(0.0, 0.0, -cam.znear));
    let far = proj.project_point3(Vec3::new(0.0, 0.0, -cam.zfar));

    assert!(near.z.abs() < 1e-5);
    assert!((far.z - 1.0).abs() < 1e-5);
  }
}
