pub mod compositor;
pub mod config;
pub mod fps;
pub mod glyphs;
pub mod scale;
pub mod scene;
pub mod views;

pub use compositor::Compositor;
pub use config::ViewerConfig;
pub use scale::ScaleController;
pub use scene::{ImageMeta, ImageProbe, Scene, SceneError, SceneObject};
