use serde::{Deserialize, Serialize};

/// Viewer configuration, constructed once at startup and passed by reference
/// into the components that read it. Replaces the classic process-wide
/// settings singleton: every knob is a typed field and the whole struct
/// (de)serializes through serde, so frontends can persist it as JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Exponent multiplier applied to one wheel click: the current scale is
    /// multiplied by `step_factor^(-wheel_sensitivity * delta)`.
    pub wheel_sensitivity: f64,
    /// Extra multiplier on `wheel_sensitivity` while the modifier key is
    /// held (high-sensitivity zoom).
    pub boost_multiplier: f64,
    /// How long an unused glyph resource survives before a sweep releases
    /// it, in milliseconds.
    pub glyph_ttl_ms: u64,
    /// Minimum wall-clock interval between cache sweeps, in milliseconds.
    /// The sweep runs synchronously inside the frame loop; this just gates
    /// how often it bothers scanning.
    pub sweep_interval_ms: u64,
    /// Shifts the glyph size-bucket index; higher values rasterize text at
    /// a larger size for the same on-screen bucket.
    pub font_quality: i32,
    /// Multiplier on the viewport-derived base font size used by overlays.
    pub text_size_mult: f64,
    /// Draw a frames-per-second readout in the top-left corner.
    pub show_fps: bool,
    /// Unit label appended to the scale readout (the scale is "units per
    /// half viewport width").
    pub unit: String,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            wheel_sensitivity: 7.0,
            boost_multiplier: 5.0,
            glyph_ttl_ms: 1100,
            sweep_interval_ms: 1000,
            font_quality: 1,
            text_size_mult: 1.0,
            show_fps: false,
            unit: "m".to_string(),
        }
    }
}
