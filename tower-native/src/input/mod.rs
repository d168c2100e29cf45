use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{Key, NamedKey};

/// Keyboard state sampled once per frame.
pub struct InputState
{
  pub left_held: bool,
  pub right_held: bool,
  pub up_held: bool,
  pub down_held: bool,

  pub escape_pressed: bool,
}

impl InputState
{
  pub fn new() -> Self
  {
    Self { left_held: false, right_held: false, up_held: false, down_held: false, escape_pressed: false }
  }

  pub fn handle_event(&mut self, event: &WindowEvent)
  {
    let WindowEvent::KeyboardInput { event, .. } = event
    else
    {
      return;
    };

    let pressed = event.state == ElementState::Pressed;

    match &event.logical_key
    {
      Key::Named(NamedKey::ArrowLeft) => self.left_held = pressed,
      Key::Named(NamedKey::ArrowRight) => self.right_held = pressed,
      Key::Named(NamedKey::ArrowUp) => self.up_held = pressed,
      Key::Named(NamedKey::ArrowDown) => self.down_held = pressed,

      // sticky: once seen, the loop ends
      Key::Named(NamedKey::Escape) if pressed => self.escape_pressed = true,

      _ =>
      {}
    }
  }

  /// Camera offsets `(curr_x, curr_y)` for this frame. Zero when no
  /// arrow key is held; opposite keys cancel.
  pub fn offsets(&self, move_speed: f32) -> (f32, f32)
  {
    let x = axis(self.right_held, self.left_held);
    let y = axis(self.up_held, self.down_held);

    (x * move_speed, y * move_speed)
  }
}

fn axis(positive: bool, negative: bool) -> f32
{
  match (positive, negative)
  {
    (true, false) => 1.0,
    (false, true) => -1.0,
    _ => 0.0,
  }
}
