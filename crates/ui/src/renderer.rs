use std::convert::Infallible;
use std::sync::Arc;

use eframe::egui;
use egui::{Color32, FontId, Galley, Pos2, Rect as EguiRect};
use magnitude_core::glyphs::{GlyphCache, TextRasterizer};
use magnitude_protocol::{Color, Rect, RenderCommand};

/// Lays text out through egui's font system. The returned galley is the
/// cached resource: it is reference counted and releases its glyph memory
/// when the cache drops the last handle.
pub struct GalleyRasterizer {
    ctx: egui::Context,
}

impl GalleyRasterizer {
    pub fn new(ctx: egui::Context) -> Self {
        Self { ctx }
    }
}

impl TextRasterizer for GalleyRasterizer {
    type Glyph = Arc<Galley>;
    type Error = Infallible;

    fn rasterize(&mut self, text: &str, size_px: u32, color: Color) -> Result<Arc<Galley>, Infallible> {
        Ok(self.ctx.fonts_mut(|fonts| {
            fonts.layout_no_wrap(
                text.to_owned(),
                FontId::proportional(size_px as f32),
                to_color32(color),
            )
        }))
    }
}

fn to_color32(color: Color) -> Color32 {
    Color32::from_rgb(color.r, color.g, color.b)
}

fn to_egui_rect(rect: &Rect) -> EguiRect {
    EguiRect::from_min_size(
        Pos2::new(rect.x as f32, rect.y as f32),
        egui::vec2(rect.w as f32, rect.h as f32),
    )
}

/// Interpret a frame's command list against an egui painter.
///
/// Image handles index into `textures`; text goes through the glyph cache
/// so repeated labels are laid out once per TTL window.
pub fn render_commands(
    painter: &egui::Painter,
    commands: &[RenderCommand],
    textures: &[egui::TextureHandle],
    glyphs: &mut GlyphCache<GalleyRasterizer>,
    rasterizer: &mut GalleyRasterizer,
    now_ms: u64,
) {
    let uv = EguiRect::from_min_max(Pos2::new(0.0, 0.0), Pos2::new(1.0, 1.0));

    for command in commands {
        match command {
            RenderCommand::Clear { color } => {
                painter.rect_filled(
                    painter.clip_rect(),
                    egui::CornerRadius::ZERO,
                    to_color32(*color),
                );
            }

            RenderCommand::DrawImage { image, rect, alpha } => {
                let Some(texture) = textures.get(image.0) else {
                    continue;
                };
                painter.image(
                    texture.id(),
                    to_egui_rect(rect),
                    uv,
                    Color32::from_white_alpha(*alpha),
                );
            }

            RenderCommand::DrawText {
                position,
                text,
                size,
                color,
            } => {
                if *size < 1.0 {
                    continue;
                }
                let galley = match glyphs.acquire(rasterizer, text, *size, *color, now_ms) {
                    Ok(galley) => galley.clone(),
                    Err(never) => match never {},
                };
                painter.galley(
                    Pos2::new(position.x as f32, position.y as f32),
                    galley,
                    to_color32(*color),
                );
            }

            RenderCommand::FillRect { rect, color } => {
                painter.rect_filled(
                    to_egui_rect(rect),
                    egui::CornerRadius::ZERO,
                    to_color32(*color),
                );
            }
        }
    }
}
