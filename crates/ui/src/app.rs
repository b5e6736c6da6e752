use std::time::Instant;

use eframe::egui;
use magnitude_core::glyphs::GlyphCache;
use magnitude_core::scene::{ImageMeta, ImageProbe, Scene, SceneError};
use magnitude_core::{Compositor, ViewerConfig};
use magnitude_protocol::{ImageId, Viewport};
use thiserror::Error;

use crate::renderer::{self, GalleyRasterizer};

/// How many egui scroll points correspond to one wheel "click".
const POINTS_PER_WHEEL_CLICK: f64 = 50.0;

#[derive(Debug, Error)]
enum ProbeError {
    #[error("read failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("decode failed: {0}")]
    Decode(#[from] image::ImageError),
}

/// Loads scene images as egui textures. Handles are held by the app for the
/// life of the scene; ids are indices into that table.
struct TextureProbe<'a> {
    ctx: &'a egui::Context,
    textures: &'a mut Vec<egui::TextureHandle>,
}

impl ImageProbe for TextureProbe<'_> {
    type Error = ProbeError;

    fn probe(&mut self, path: &str) -> Result<ImageMeta, ProbeError> {
        let bytes = std::fs::read(path)?;
        let decoded = image::load_from_memory(&bytes)?.to_rgba8();
        let (width, height) = decoded.dimensions();
        let color_image = egui::ColorImage::from_rgba_unmultiplied(
            [width as usize, height as usize],
            decoded.as_raw(),
        );
        let handle = self
            .ctx
            .load_texture(path, color_image, egui::TextureOptions::LINEAR);
        self.textures.push(handle);
        Ok(ImageMeta {
            id: ImageId(self.textures.len() - 1),
            width,
            height,
        })
    }
}

/// Main application state: the core compositor plus the backend-owned
/// resources it draws with.
pub struct MagnitudeApp {
    compositor: Compositor,
    textures: Vec<egui::TextureHandle>,
    glyphs: GlyphCache<GalleyRasterizer>,
    rasterizer: GalleyRasterizer,
    epoch: Instant,
}

impl MagnitudeApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        scene_source: &str,
        config: &ViewerConfig,
    ) -> Result<Self, SceneError> {
        let mut textures = Vec::new();
        let mut probe = TextureProbe {
            ctx: &cc.egui_ctx,
            textures: &mut textures,
        };
        let scene = Scene::parse(scene_source, &mut probe)?;

        Ok(Self {
            compositor: Compositor::new(scene, config),
            textures,
            glyphs: GlyphCache::new(config),
            rasterizer: GalleyRasterizer::new(cc.egui_ctx.clone()),
            epoch: Instant::now(),
        })
    }

    fn handle_input(&mut self, ctx: &egui::Context) {
        ctx.input(|i| {
            if i.key_pressed(egui::Key::Space) {
                self.compositor.scale_mut().toggle_pause();
            }
            let scroll = f64::from(i.raw_scroll_delta.y);
            if scroll != 0.0 {
                self.compositor
                    .scale_mut()
                    .apply_wheel(scroll / POINTS_PER_WHEEL_CLICK, i.modifiers.shift);
            }
        });
    }
}

impl eframe::App for MagnitudeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_input(ctx);

        let now_ms = self.epoch.elapsed().as_millis() as u64;
        let screen = ctx.screen_rect();
        let viewport = Viewport {
            width: f64::from(screen.width()),
            height: f64::from(screen.height()),
        };

        let commands = self.compositor.frame(&viewport, now_ms);

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                let painter = ui.painter();
                renderer::render_commands(
                    painter,
                    &commands,
                    &self.textures,
                    &mut self.glyphs,
                    &mut self.rasterizer,
                    now_ms,
                );
            });

        self.glyphs.sweep(now_ms);

        // The zoom animation runs every frame, not only on input.
        ctx.request_repaint();
    }
}
