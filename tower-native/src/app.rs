use std::sync::Arc;

use anyhow::{Context, Result};
use winit::{
  application::ApplicationHandler,
  dpi::LogicalSize,
  event::WindowEvent,
  event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
  window::{Window, WindowId},
};

use crate::config::Config;
use crate::input::InputState;
use crate::renderer::{FrameStatus, Renderer};
use crate::scene::Scene;

/// Runs until the window is closed or Escape is pressed. Returns the
/// first error that stopped the loop, if any.
pub fn run(config: Config) -> Result<()>
{
  let event_loop = EventLoop::new().context("failed to create event loop")?;
  let mut app = TowerApp::new(config);

  event_loop.run_app(&mut app).context("event loop terminated with error")?;

  match app.error.take()
  {
    Some(err) => Err(err),
    None =>
    {
      log::info!("window closed after {} frames", app.frames);
      Ok(())
    }
  }
}

struct TowerApp
{
  config: Config,

  window: Option<Arc<Window>>,
  renderer: Option<Renderer>,
  scene: Scene,
  input: InputState,

  frames: u64,
  error: Option<anyhow::Error>,
}

impl TowerApp
{
  fn new(config: Config) -> Self
  {
    let scene = Scene::new(&config, config.aspect());

    Self { config, window: None, renderer: None, scene, input: InputState::new(), frames: 0, error: None }
  }

  fn init_window_and_renderer(&mut self, event_loop: &ActiveEventLoop) -> Result<()>
  {
    if self.window.is_some()
    {
      return Ok(());
    }

    let attrs = Window::default_attributes()
      .with_title(self.config.window.title.clone())
      .with_inner_size(LogicalSize::new(self.config.window.width, self.config.window.height));

    let window = Arc::new(event_loop.create_window(attrs).context("failed to open window")?);

    let size = window.inner_size();
    if size.width > 0 && size.height > 0
    {
      self.scene.camera.set_aspect(size.width as f32 / size.height as f32);
    }

    let renderer =
      pollster::block_on(Renderer::new(window.clone(), &self.config)).context("failed to initialise renderer")?;

    self.window = Some(window);
    self.renderer = Some(renderer);
    Ok(())
  }

  fn fail(&mut self, elwt: &ActiveEventLoop, err: anyhow::Error)
  {
    log::error!("{err:#}");
    self.error.get_or_insert(err);
    elwt.exit();
  }

  fn handle_window_event(&mut self, elwt: &ActiveEventLoop, window_id: WindowId, event: WindowEvent)
  {
    let window = match &self.window
    {
      Some(w) if w.id() == window_id => w.clone(),
      _ => return,
    };

    self.input.handle_event(&event);

    if self.input.escape_pressed
    {
      elwt.exit();
      return;
    }

    match event
    {
      WindowEvent::CloseRequested =>
      {
        elwt.exit();
      }

      WindowEvent::Resized(size) =>
      {
        if size.width == 0 || size.height == 0
        {
          return;
        }

        if let Some(renderer) = &mut self.renderer
        {
          renderer.resize(size.width, size.height);
        }

        self.scene.camera.set_aspect(size.width as f32 / size.height as f32);
        window.request_redraw();
      }

      _ =>
      {}
    }
  }

  fn frame(&mut self, elwt: &ActiveEventLoop)
  {
    let (Some(window), Some(renderer)) = (&self.window, &mut self.renderer)
    else
    {
      return;
    };

    let (curr_x, curr_y) = self.input.offsets(self.config.camera.move_speed);
    let uniform = self.scene.update(curr_x, curr_y);

    match renderer.render(&uniform)
    {
      Ok(FrameStatus::Presented) => self.frames += 1,
      Ok(FrameStatus::Skipped) =>
      {}
      Err(err) =>
      {
        self.fail(elwt, err);
        return;
      }
    }

    window.request_redraw();
  }
}

impl ApplicationHandler for TowerApp
{
  fn resumed(&mut self, event_loop: &ActiveEventLoop)
  {
    event_loop.set_control_flow(ControlFlow::Wait);

    if let Err(err) = self.init_window_and_renderer(event_loop)
    {
      self.fail(event_loop, err);
    }
  }

  fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent)
  {
    self.handle_window_event(event_loop, window_id, event);
  }

  fn about_to_wait(&mut self, event_loop: &ActiveEventLoop)
  {
    if event_loop.exiting()
    {
      return;
    }

    self.frame(event_loop);
  }
}
