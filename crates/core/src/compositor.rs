use magnitude_protocol::{Color, Point, RenderCommand, Viewport};

use crate::config::ViewerConfig;
use crate::fps::FpsCounter;
use crate::scale::ScaleController;
use crate::scene::Scene;
use crate::views::{layout, readout};

/// Drives one frame: advances the scale animation, lays out every object
/// back-to-front, and appends the scale-readout overlay.
///
/// Owns the scene, the scale controller, and the FPS counter; everything is
/// touched only from the frame loop, so no locking exists here. The output
/// is a stateless command list for the frontend to interpret.
pub struct Compositor {
    scene: Scene,
    scale: ScaleController,
    fps: FpsCounter,
    show_fps: bool,
    text_size_mult: f64,
    unit: String,
}

impl Compositor {
    pub fn new(scene: Scene, config: &ViewerConfig) -> Self {
        let scale = ScaleController::new(
            scene.initial_scale,
            scene.target_scale,
            scene.step_factor,
            config,
        );
        Self {
            scene,
            scale,
            fps: FpsCounter::new(),
            show_fps: config.show_fps,
            text_size_mult: config.text_size_mult,
            unit: config.unit.clone(),
        }
    }

    pub fn scale(&self) -> &ScaleController {
        &self.scale
    }

    pub fn scale_mut(&mut self) -> &mut ScaleController {
        &mut self.scale
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Produce the command list for one frame.
    ///
    /// Objects are drawn in reverse catalog order — the last-loaded object
    /// first, the first-loaded on top. That fixed z-order is part of the
    /// scene format, not derived from size.
    pub fn frame(&mut self, viewport: &Viewport, now_ms: u64) -> Vec<RenderCommand> {
        self.scale.advance();
        let current = self.scale.current();

        let mut commands = Vec::with_capacity(self.scene.objects.len() * 2 + 4);
        commands.push(RenderCommand::Clear {
            color: Color::BLACK,
        });

        for object in self.scene.objects.iter().rev() {
            let Some(placed) = layout::layout_object(object, current, viewport) else {
                continue;
            };
            commands.push(RenderCommand::DrawImage {
                image: object.image,
                rect: placed.rect,
                alpha: placed.alpha,
            });
            commands.push(RenderCommand::DrawText {
                position: placed.label_pos,
                text: object.label.clone(),
                size: placed.font_size,
                color: Color::WHITE,
            });
        }

        let base_font = self.text_size_mult * (viewport.width * viewport.height).sqrt() / 40.0;
        commands.extend(readout::render_readout(
            viewport, current, &self.unit, base_font,
        ));

        let fps = self.fps.tick(now_ms);
        if self.show_fps {
            commands.push(RenderCommand::DrawText {
                position: Point::new(0.0, 0.0),
                text: format!("{fps} FPS"),
                size: base_font,
                color: Color::WHITE,
            });
        }

        commands
    }
}
