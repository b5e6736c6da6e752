pub mod commands;
pub mod types;

pub use commands::RenderCommand;
pub use types::{Color, ImageId, Point, Rect, Viewport};
