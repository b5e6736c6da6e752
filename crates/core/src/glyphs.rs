use std::collections::HashMap;
use std::collections::hash_map::Entry as MapEntry;
use std::error::Error;

use magnitude_protocol::Color;

use crate::config::ViewerConfig;

/// Number of discrete size buckets. Bucket `b` corresponds to a rasterized
/// size of roughly `2^b` pixels, so anything up to ~1000px text lands in a
/// distinct bucket.
pub const NUM_SIZE_BUCKETS: i32 = 8;

/// Renders a text string into a backend-owned resource.
///
/// The resource type is whatever the backend hands out; the cache only
/// requires that dropping it releases the underlying handle.
pub trait TextRasterizer {
    type Glyph;
    type Error: Error;

    /// Produce a resource for `text` at `size_px` in `color`.
    fn rasterize(&mut self, text: &str, size_px: u32, color: Color) -> Result<Self::Glyph, Self::Error>;
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct GlyphKey {
    text: String,
    bucket: i32,
    color: Color,
}

struct Entry<G> {
    glyph: G,
    last_used_ms: u64,
}

/// Time-windowed cache of rendered text resources.
///
/// Keys are `(text, size bucket, color)`; requested sizes are quantized to
/// power-of-two buckets so visually-similar sizes share one resource. A hit
/// refreshes the entry's timestamp. A periodic sweep (gated to at most once
/// per `sweep_interval_ms` of wall time, independent of frame rate) drops
/// every entry unused for longer than the TTL; dropping the entry releases
/// the resource.
pub struct GlyphCache<R: TextRasterizer> {
    entries: HashMap<GlyphKey, Entry<R::Glyph>>,
    ttl_ms: u64,
    sweep_interval_ms: u64,
    last_sweep_ms: u64,
    font_quality: i32,
}

impl<R: TextRasterizer> GlyphCache<R> {
    pub fn new(config: &ViewerConfig) -> Self {
        Self {
            entries: HashMap::new(),
            ttl_ms: config.glyph_ttl_ms,
            sweep_interval_ms: config.sweep_interval_ms,
            last_sweep_ms: 0,
            font_quality: config.font_quality,
        }
    }

    /// Look up or render the resource for `text` at `size` in `color`.
    ///
    /// On a hit the entry's timestamp is refreshed and no rendering happens.
    /// On a miss the rasterizer runs; if it fails, nothing is inserted and
    /// the error propagates to the caller.
    pub fn acquire(
        &mut self,
        rasterizer: &mut R,
        text: &str,
        size: f64,
        color: Color,
        now_ms: u64,
    ) -> Result<&R::Glyph, R::Error> {
        let bucket = size_bucket(size, self.font_quality);
        let key = GlyphKey {
            text: text.to_string(),
            bucket,
            color,
        };
        let entry = match self.entries.entry(key) {
            MapEntry::Occupied(occupied) => {
                let entry = occupied.into_mut();
                entry.last_used_ms = now_ms;
                entry
            }
            MapEntry::Vacant(vacant) => {
                let glyph =
                    rasterizer.rasterize(text, bucket_px(bucket, self.font_quality), color)?;
                vacant.insert(Entry {
                    glyph,
                    last_used_ms: now_ms,
                })
            }
        };
        Ok(&entry.glyph)
    }

    /// Release every entry unused for longer than the TTL. Does nothing
    /// unless at least the sweep interval has elapsed since the last sweep.
    pub fn sweep(&mut self, now_ms: u64) {
        if now_ms - self.last_sweep_ms <= self.sweep_interval_ms {
            return;
        }
        self.last_sweep_ms = now_ms;
        let ttl = self.ttl_ms;
        self.entries
            .retain(|_, entry| now_ms - entry.last_used_ms <= ttl);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Quantize a requested pixel size into a bucket index: power-of-two
/// rounding shifted by the quality knob, clamped to the bucket range.
pub fn size_bucket(size: f64, font_quality: i32) -> i32 {
    let raw = font_quality + (size.max(0.0) + 1.0).log2() as i32;
    raw.clamp(0, NUM_SIZE_BUCKETS - 1)
}

/// Representative rasterization size for a bucket.
fn bucket_px(bucket: i32, font_quality: i32) -> u32 {
    1u32 << (bucket - font_quality).clamp(0, NUM_SIZE_BUCKETS - 1)
}
