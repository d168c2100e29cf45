mod binding;
mod core;
mod cube;
mod depth;

pub use self::core::{FrameStatus, Renderer};
