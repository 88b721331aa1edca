//! Text layout from typeface metrics.
//!
//! Glyph outlines are not tessellated; each glyph becomes one slab sized by
//! its horizontal advance, which is enough for a decorative backdrop.

use fnv::FnvHashMap;
use glam::Vec3;
use smallvec::SmallVec;
use thiserror::Error;

// Capital-letter height as a fraction of the em size.
const CAP_HEIGHT_RATIO: f32 = 0.72;
// Fraction of each advance left empty between slabs.
const GLYPH_GAP_RATIO: f32 = 0.12;

#[derive(Debug, Error, PartialEq)]
pub enum FontError {
    #[error("font resolution must be positive, got {0}")]
    InvalidResolution(f64),
    #[error("font has no glyph table")]
    MissingGlyphTable,
    #[error("font has none of the glyphs in {0:?}")]
    NoUsableGlyphs(String),
}

/// Horizontal metrics of a typeface, in font units.
#[derive(Clone, Debug)]
pub struct FontMetrics {
    resolution: f32,
    advances: FnvHashMap<char, f32>,
}

impl FontMetrics {
    pub fn new(resolution: f64) -> Result<Self, FontError> {
        if !(resolution.is_finite() && resolution > 0.0) {
            return Err(FontError::InvalidResolution(resolution));
        }
        Ok(Self {
            resolution: resolution as f32,
            advances: FnvHashMap::default(),
        })
    }

    pub fn insert_advance(&mut self, ch: char, advance: f32) {
        self.advances.insert(ch, advance);
    }

    pub fn advance(&self, ch: char) -> Option<f32> {
        self.advances.get(&ch).copied()
    }

    pub fn resolution(&self) -> f32 {
        self.resolution
    }

    pub fn glyph_count(&self) -> usize {
        self.advances.len()
    }
}

/// Axis-aligned box in text-local space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlyphSlab {
    pub center: Vec3,
    pub size: Vec3,
}

/// Lay `text` out left to right from the local origin, baseline at y = 0.
///
/// Whitespace advances without a slab; glyphs missing from the font advance
/// by half the em size and also emit nothing.
pub fn layout_text(
    text: &str,
    metrics: &FontMetrics,
    size: f32,
    depth: f32,
) -> SmallVec<[GlyphSlab; 8]> {
    let scale = size / metrics.resolution;
    let height = size * CAP_HEIGHT_RATIO;
    let mut slabs = SmallVec::new();
    let mut cursor = 0.0_f32;
    for ch in text.chars() {
        let Some(advance) = metrics.advance(ch).map(|ha| ha * scale) else {
            cursor += size * 0.5;
            continue;
        };
        if !ch.is_whitespace() && advance > 0.0 {
            let width = advance * (1.0 - GLYPH_GAP_RATIO);
            slabs.push(GlyphSlab {
                center: Vec3::new(cursor + advance * 0.5, height * 0.5, depth * 0.5),
                size: Vec3::new(width, height, depth),
            });
        }
        cursor += advance;
    }
    slabs
}
