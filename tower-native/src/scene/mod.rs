mod transform;
mod uniform;

use glam::Vec4;

pub use transform::SceneTransforms;
pub use uniform::SceneUniform;

use crate::camera::Camera;
use crate::config::{Config, SceneConfig};

//
// ──────────────────────────────────────────────────────────────
//   Scene: camera + two models + one light
// ──────────────────────────────────────────────────────────────
//

pub struct Scene
{
  pub camera: Camera,
  pub transforms: SceneTransforms,
  settings: SceneConfig,
}

impl Scene
{
  pub fn new(config: &Config, aspect: f32) -> Self
  {
    Self {
      camera: Camera::from_config(&config.camera, aspect),
      transforms: SceneTransforms::new(),
      settings: config.scene.clone(),
    }
  }

  /// One animation step: move the camera, spin both models and
  /// build the uniform for this frame.
  pub fn update(&mut self, curr_x: f32, curr_y: f32) -> SceneUniform
  {
    self.camera.apply_offsets(curr_x, curr_y);
    self.transforms.advance(self.settings.rotation_step, curr_x, curr_y);

    self.uniform()
  }

  pub fn uniform(&self) -> SceneUniform
  {
    let matrices = self.transforms.matrices(&self.camera);
    let light_view = self.camera.view() * Vec4::from_array(self.settings.light);

    SceneUniform::new(&matrices, light_view, self.settings.base_color, self.settings.ambient)
  }
}

#[cfg(test)]
mod tests
{
  use super::*;

  #[test]
  fn update_spins_models_by_rotation_step()
  {
    let config = Config::default();
    let mut scene = Scene::new(&config, config.aspect());

    for _ in 0..1000
    {
      scene.update(0.0, 0.0);
    }

    let expected = glam::Mat4::from_rotation_y(1000.0 * config.scene.rotation_step);
    assert!(scene.transforms.model.abs_diff_eq(expected, 1e-4));
    assert_eq!(scene.camera.eye, glam::Vec3::from_array(config.camera.eye));
  }

  #[test]
  fn light_is_sent_in_view_space()
  {
    let config = Config::default();
    let scene = Scene::new(&config, config.aspect());

    let u = scene.uniform();

    // eye (0, 3, 10) looking down -Z: world (8, 8, 8) → view (8, 5, -2)
    let light = Vec4::from_array(u.light);
    assert!(light.abs_diff_eq(Vec4::new(8.0, 5.0, -2.0, 1.0), 1e-5));
  }

  #[test]
  fn update_moves_camera_and_both_models_together()
  {
    let config = Config::default();
    let mut scene = Scene::new(&config, config.aspect());

    scene.update(0.01, 0.01);

    // vertical: y += 0.01 * 10; horizontal: x += 0.01 * 10
    assert!(scene.camera.eye.abs_diff_eq(glam::Vec3::new(0.1, 3.1, 10.0), 1e-5));

    let origin = scene.transforms.model.transform_point3(glam::Vec3::ZERO);
    let origin2 = scene.transforms.model2.transform_point3(glam::Vec3::ZERO);
    assert!(origin.abs_diff_eq(glam::Vec3::new(0.01, 0.0, 0.01), 1e-4));
    assert!(origin2.abs_diff_eq(glam::Vec3::new(0.01, 0.0, 0.01), 1e-4));
    assert_ne!(scene.transforms.model, scene.transforms.model2);
  }

  #[test]
  fn directional_light_is_rotated_but_not_translated()
  {
    let mut config = Config::default();
    config.scene.light = [0.0, 1.0, 1.0, 0.0];
    let mut scene = Scene::new(&config, config.aspect());

    // default view has no rotation, only the eye translation
    let u = scene.uniform();
    assert_eq!(u.light, [0.0, 1.0, 1.0, 0.0]);

    // swing the eye around Y; the direction follows the view rotation only
    scene.camera.eye = glam::Vec3::new(10.0, 3.0, 0.0);
    let u = scene.uniform();
    let light = Vec4::from_array(u.light);
    let expected = scene.camera.view() * Vec4::new(0.0, 1.0, 1.0, 0.0);

    assert!(light.abs_diff_eq(expected, 1e-5));
    assert_eq!(light.w, 0.0);
    assert!((light.truncate().length() - 2.0_f32.sqrt()).abs() < 1e-5);
    assert!(light.abs_diff_eq(Vec4::new(-1.0, 1.0, 0.0, 0.0), 1e-5));
  }

  #[test]
  fn uniform_carries_surface_settings()
  {
    let config = Config::default();
    let scene = Scene::new(&config, config.aspect());

    let u = scene.uniform();
    assert_eq!(u.color[3], config.scene.ambient);
    assert_eq!(&u.color[..3], &config.scene.base_color[..]);
  }
}
