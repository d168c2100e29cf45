mod pivot;

pub use pivot::Camera;
