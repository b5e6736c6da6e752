use serde::{Deserialize, Serialize};

use crate::types::{Color, ImageId, Point, Rect};

/// A single, stateless render instruction.
///
/// The core emits a `Vec<RenderCommand>` for each frame. Renderers consume
/// the list sequentially — each command carries all the data it needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum RenderCommand {
    /// Clear the whole viewport to a solid color.
    Clear { color: Color },

    /// Draw an image resource into a destination rectangle, modulated by
    /// `alpha` (255 = fully opaque).
    DrawImage {
        image: ImageId,
        rect: Rect,
        alpha: u8,
    },

    /// Draw a text string with its top-left corner at `position`.
    DrawText {
        position: Point,
        text: String,
        size: f64,
        color: Color,
    },

    /// Draw a filled rectangle.
    FillRect { rect: Rect, color: Color },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_round_trip_through_json() {
        let cmds = vec![
            RenderCommand::Clear {
                color: Color::BLACK,
            },
            RenderCommand::DrawImage {
                image: ImageId(3),
                rect: Rect::new(10.0, 20.0, 30.0, 40.0),
                alpha: 128,
            },
            RenderCommand::DrawText {
                position: Point::new(1.0, 2.0),
                text: "Sun".to_string(),
                size: 12.0,
                color: Color::WHITE,
            },
        ];
        let json = serde_json::to_string(&cmds).expect("serialize");
        let back: Vec<RenderCommand> = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back.len(), cmds.len());
        assert!(matches!(
            back[1],
            RenderCommand::DrawImage {
                image: ImageId(3),
                alpha: 128,
                ..
            }
        ));
    }
}
