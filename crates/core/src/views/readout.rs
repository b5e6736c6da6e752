use magnitude_protocol::{Color, Point, Rect, RenderCommand, Viewport};

/// Render the "you are here" ruler: a fixed-size reference bar at 10% of the
/// viewport plus the current scale in normalized scientific notation.
pub fn render_readout(
    viewport: &Viewport,
    scale: f64,
    unit: &str,
    font_size: f64,
) -> Vec<RenderCommand> {
    vec![
        RenderCommand::FillRect {
            rect: Rect::new(
                viewport.width * 0.1,
                viewport.height * 0.1,
                viewport.width * 0.1,
                viewport.height * 0.01,
            ),
            color: Color::WHITE,
        },
        RenderCommand::DrawText {
            position: Point::new(viewport.width * 0.1, viewport.height * 0.11),
            text: format!("{} {unit}", format_scale(scale)),
            size: font_size,
            color: Color::WHITE,
        },
    ]
}

/// Format a scale value as normalized scientific notation with one digit
/// before the decimal point and two after, e.g. `4.20e7`.
///
/// The exponent comes from `floor(log10(scale * 0.1))` and the mantissa is
/// truncated (not rounded) to one decimal. When `log10` lands just under an
/// integer for an exact power of ten, the mantissa can come out as `10.0`
/// for a frame instead of rolling over — a known boundary artifact of this
/// formula, kept as-is.
pub fn format_scale(scale: f64) -> String {
    let exponent = (scale * 0.1).log10().floor() as i32;
    let mantissa = (scale / 10f64.powi(exponent)).trunc() / 10.0;
    format!("{}e{}", format_mantissa(mantissa), exponent + 1)
}

/// One digit before the decimal point, padded with zeros to two after
/// (`4.2` → `"4.20"`, `1` → `"1.00"`, the boundary case `10` → `"10.0"`).
fn format_mantissa(mantissa: f64) -> String {
    let mut s = format!("{mantissa}");
    if !s.contains('.') {
        s.push('.');
    }
    while s.len() < 4 {
        s.push('0');
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_spec_vectors() {
        assert_eq!(format_scale(4.2e7), "4.20e7");
        assert_eq!(format_scale(1.0), "1.00e0");
    }

    #[test]
    fn formats_small_and_plain_values() {
        assert_eq!(format_scale(255.0), "2.50e2");
        assert_eq!(format_scale(999.0), "9.90e2");
        assert_eq!(format_scale(5.73e-9), "5.70e-9");
    }

    #[test]
    fn survives_thirty_orders_of_magnitude() {
        assert_eq!(format_scale(1.23e30), "1.20e30");
        assert_eq!(format_scale(7.71e-24), "7.70e-24");
    }

    #[test]
    fn exact_powers_of_ten() {
        assert_eq!(format_scale(1e4), "1.00e4");
        assert_eq!(format_scale(10.0), "1.00e1");
    }

    #[test]
    fn boundary_mantissa_pads_without_rolling_over() {
        // When floating-point rounding floors the exponent one too low the
        // mantissa reaches 10; the display shows it rather than normalizing.
        assert_eq!(format_mantissa(10.0), "10.0");
        assert_eq!(format_mantissa(10.5), "10.5");
    }

    #[test]
    fn readout_draws_bar_and_label() {
        let vp = Viewport {
            width: 1000.0,
            height: 500.0,
        };
        let cmds = render_readout(&vp, 4.2e7, "m", 20.0);
        assert_eq!(cmds.len(), 2);
        match &cmds[0] {
            RenderCommand::FillRect { rect, color } => {
                assert_eq!(*rect, Rect::new(100.0, 50.0, 100.0, 5.0));
                assert_eq!(*color, Color::WHITE);
            }
            other => panic!("expected FillRect, got {other:?}"),
        }
        match &cmds[1] {
            RenderCommand::DrawText { text, position, .. } => {
                assert_eq!(text, "4.20e7 m");
                assert_eq!(*position, Point::new(100.0, 55.0));
            }
            other => panic!("expected DrawText, got {other:?}"),
        }
    }
}
