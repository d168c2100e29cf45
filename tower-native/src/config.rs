use std::path::Path;

use anyhow::{ensure, Context, Result};
use serde::Deserialize;

//
// ──────────────────────────────────────────────────────────────
//   Settings
//
//   Every field has a built-in default. A JSON file named by
//   TOWER_CONFIG may override any subset of them:
//
//     { "scene": { "rotation_step": 0.002 }, "window": { "msaa_samples": 1 } }
// ──────────────────────────────────────────────────────────────
//

pub const CONFIG_ENV: &str = "TOWER_CONFIG";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config
{
  pub window: WindowConfig,
  pub camera: CameraConfig,
  pub scene: SceneConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WindowConfig
{
  pub title: String,
  pub width: u32,
  pub height: u32,
  pub msaa_samples: u32,
  pub clear_color: [f64; 4],
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CameraConfig
{
  pub fov_y_degrees: f32,
  pub z_near: f32,
  pub z_far: f32,

  pub eye: [f32; 3],
  pub look: [f32; 3],
  pub up: [f32; 3],

  /// Vertical movement stops below/above these eye heights.
  pub min_height: f32,
  pub max_height: f32,

  /// Offset fed to the camera each frame while an arrow key is held.
  pub move_speed: f32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SceneConfig
{
  /// Radians added to each model's rotation every frame.
  pub rotation_step: f32,
  pub half_extents: [f32; 3],
  /// World-space light, homogeneous: w = 0 is a directional light
  /// shining from `xyz`, w = 1 a point light at `xyz`.
  pub light: [f32; 4],
  pub base_color: [f32; 3],
  pub ambient: f32,
}

impl Default for WindowConfig
{
  fn default() -> Self
  {
    Self {
      title: "Tower".to_string(),
      width: 1024,
      height: 768,
      msaa_samples: 4,
      // dark blue
      clear_color: [0.0, 0.0, 0.2, 0.0],
    }
  }
}

impl Default for CameraConfig
{
  fn default() -> Self
  {
    Self {
      fov_y_degrees: 45.0,
      z_near: 0.1,
      z_far: 50.0,

      eye: [0.0, 3.0, 10.0],
      look: [0.0, 3.0, 0.0],
      up: [0.0, 1.0, 0.0],

      min_height: -5.0,
      max_height: 11.0,

      move_speed: 0.01,
    }
  }
}

impl Default for SceneConfig
{
  fn default() -> Self
  {
    Self {
      rotation_step: 0.0007,
      half_extents: [2.0, 5.0, 2.0],
      light: [8.0, 8.0, 8.0, 1.0],
      base_color: [0.8, 0.7, 0.5],
      ambient: 0.2,
    }
  }
}

//
// ──────────────────────────────────────────────────────────────
//   Loading
// ──────────────────────────────────────────────────────────────
//

impl Config
{
  /// Defaults, or the file named by `TOWER_CONFIG` when set.
  pub fn load() -> Result<Self>
  {
    match std::env::var_os(CONFIG_ENV)
    {
      Some(path) => Self::from_path(Path::new(&path)),
      None =>
      {
        log::info!("{CONFIG_ENV} not set, using built-in settings");
        Ok(Self::default())
      }
    }
  }

  pub fn from_path(path: &Path) -> Result<Self>
  {
    let text =
      std::fs::read_to_string(path).with_context(|| format!("failed to read config {}", path.display()))?;

    let config = Self::from_json_str(&text).with_context(|| format!("invalid config {}", path.display()))?;

    log::info!("loaded settings from {}", path.display());
    Ok(config)
  }

  pub fn from_json_str(text: &str) -> Result<Self>
  {
    let config: Self = serde_json::from_str(text).context("malformed JSON settings")?;
    config.validate()?;
    Ok(config)
  }

  pub fn validate(&self) -> Result<()>
  {
    let w = &self.window;
    ensure!(w.width > 0 && w.height > 0, "window size must be non-zero, got {}x{}", w.width, w.height);
    ensure!(matches!(w.msaa_samples, 1 | 4), "msaa_samples must be 1 or 4, got {}", w.msaa_samples);

    let c = &self.camera;
    ensure!(
      c.fov_y_degrees > 0.0 && c.fov_y_degrees < 180.0,
      "fov_y_degrees must be in (0, 180), got {}",
      c.fov_y_degrees
    );
    ensure!(c.z_near > 0.0, "z_near must be positive, got {}", c.z_near);
    ensure!(c.z_far > c.z_near, "z_far ({}) must exceed z_near ({})", c.z_far, c.z_near);
    ensure!(
      c.min_height < c.max_height,
      "min_height ({}) must be below max_height ({})",
      c.min_height,
      c.max_height
    );

    let s = &self.scene;
    ensure!(s.half_extents.iter().all(|e| *e > 0.0), "half_extents must be positive, got {:?}", s.half_extents);
    ensure!((0.0..=1.0).contains(&s.ambient), "ambient must be in [0, 1], got {}", s.ambient);
    ensure!(s.light[3] == 0.0 || s.light[3] == 1.0, "light w must be 0 (directional) or 1 (point), got {}", s.light[3]);
    ensure!(s.light[..3].iter().any(|c| *c != 0.0), "light xyz must be non-zero");

    Ok(())
  }

  /// Aspect ratio of the configured window.
  pub fn aspect(&self) -> f32
  {
    self.window.width as f32 / self.window.height as f32
  }
}
