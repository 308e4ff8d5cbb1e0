//! Text to point-cloud rasterization.
//!
//! A string is drawn into an 8-bit alpha mask, the mask is sampled on a fixed
//! grid, and the surviving pixels become a shuffled table of 2-D points that
//! text models index modulo its length.

use std::collections::HashMap;
use std::sync::Arc;

use font8x8::{
    UnicodeFonts, BASIC_FONTS, BLOCK_FONTS, BOX_FONTS, GREEK_FONTS, HIRAGANA_FONTS, LATIN_FONTS,
};
use glam::Vec2;
use log::{debug, warn};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::GlyphConfig;
use crate::error::{MorphError, Result};

/// Shuffled glyph sample points. Shared and never mutated once built.
pub type GlyphPointTable = Arc<[Vec2]>;

/// Row-major 8-bit coverage buffer.
#[derive(Clone, Debug, PartialEq)]
pub struct AlphaMask {
    width: u32,
    height: u32,
    alpha: Vec<u8>,
}

impl AlphaMask {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            alpha: vec![0; width as usize * height as usize],
        }
    }

    /// Wrap a buffer produced elsewhere, e.g. the alpha channel of a canvas.
    pub fn from_alpha(width: u32, height: u32, alpha: Vec<u8>) -> Result<Self> {
        if alpha.len() != width as usize * height as usize {
            return Err(MorphError::MaskSize {
                width,
                height,
                len: alpha.len(),
            });
        }
        Ok(Self { width, height, alpha })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn get(&self, x: u32, y: u32) -> u8 {
        self.alpha[(y * self.width + x) as usize]
    }

    /// Set a rectangle, clipped to the mask.
    pub fn fill_rect(&mut self, x: u32, y: u32, w: u32, h: u32, value: u8) {
        let x_end = x.saturating_add(w).min(self.width);
        let y_end = y.saturating_add(h).min(self.height);
        for row in y.min(self.height)..y_end {
            let start = (row * self.width) as usize;
            self.alpha[start + x.min(x_end) as usize..start + x_end as usize].fill(value);
        }
    }

    /// Number of pixels strictly above `threshold`.
    pub fn coverage(&self, threshold: u8) -> usize {
        self.alpha.iter().filter(|&&a| a > threshold).count()
    }
}

/// Embedded 8x8 bitmap font covering Latin, Greek, box drawing, block
/// elements and Hiragana. Characters outside those sets draw nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct BitmapFont;

impl BitmapFont {
    const CELL: u32 = 8;

    pub fn glyph(ch: char) -> Option<[u8; 8]> {
        BASIC_FONTS
            .get(ch)
            .or_else(|| LATIN_FONTS.get(ch))
            .or_else(|| GREEK_FONTS.get(ch))
            .or_else(|| BOX_FONTS.get(ch))
            .or_else(|| BLOCK_FONTS.get(ch))
            .or_else(|| HIRAGANA_FONTS.get(ch))
    }

    /// Draw `text` bold and centred on a `width` x `height` mask.
    ///
    /// One font cell is `font_size` pixels tall; the run is shrunk uniformly
    /// when it would not fit the canvas.
    pub fn render(&self, text: &str, font_size: u32, width: u32, height: u32) -> AlphaMask {
        let mut mask = AlphaMask::new(width, height);
        let chars: Vec<char> = text.chars().collect();
        if chars.is_empty() || width == 0 || height == 0 {
            return mask;
        }

        let cells = chars.len() as f32 * Self::CELL as f32;
        let px = (font_size as f32 / Self::CELL as f32)
            .min(width as f32 * 0.95 / cells)
            .min(height as f32 / Self::CELL as f32);
        let origin_x = (width as f32 - cells * px) * 0.5;
        let origin_y = (height as f32 - Self::CELL as f32 * px) * 0.5;

        for (n, &ch) in chars.iter().enumerate() {
            let Some(rows) = Self::glyph(ch) else {
                debug!("no bitmap glyph for {ch:?}");
                continue;
            };
            let cell_x = origin_x + (n as u32 * Self::CELL) as f32 * px;
            for (row, bits) in rows.iter().enumerate() {
                // one-pixel smear to the right gives the bold stroke
                let bold = u16::from(*bits) | (u16::from(*bits) << 1);
                let y0 = (origin_y + row as f32 * px).floor().max(0.0) as u32;
                let y1 = (origin_y + (row + 1) as f32 * px).floor().max(0.0) as u32;
                for col in 0..=Self::CELL {
                    if (bold >> col) & 1 == 0 {
                        continue;
                    }
                    let x0 = (cell_x + col as f32 * px).floor().max(0.0) as u32;
                    let x1 = (cell_x + (col + 1) as f32 * px).floor().max(0.0) as u32;
                    mask.fill_rect(x0, y0, x1 - x0, y1 - y0, u8::MAX);
                }
            }
        }
        mask
    }
}

/// Foreground pixels of `mask` on a `step` grid, in scan order, converted to
/// centred, y-up world coordinates.
pub fn sample_mask(mask: &AlphaMask, config: &GlyphConfig) -> Vec<Vec2> {
    let step = config.step.max(1) as usize;
    let half_w = mask.width() as f32 * 0.5;
    let half_h = mask.height() as f32 * 0.5;
    let mut points = Vec::new();
    for y in (0..mask.height()).step_by(step) {
        for x in (0..mask.width()).step_by(step) {
            if mask.get(x, y) > config.alpha_threshold {
                points.push(Vec2::new(
                    (x as f32 - half_w) * config.world_scale,
                    (half_h - y as f32) * config.world_scale,
                ));
            }
        }
    }
    points
}

/// Sample and Fisher-Yates shuffle a mask into a lookup table.
///
/// Without the shuffle a particle count smaller than the table would only
/// reach the first scanned rows.
pub fn table_from_mask<R: Rng + ?Sized>(
    mask: &AlphaMask,
    config: &GlyphConfig,
    rng: &mut R,
) -> GlyphPointTable {
    let mut points = sample_mask(mask, config);
    points.shuffle(rng);
    points.into()
}

/// Render `text` with the built-in font and build its point table.
pub fn rasterize<R: Rng + ?Sized>(
    text: &str,
    font_size: u32,
    config: &GlyphConfig,
    rng: &mut R,
) -> GlyphPointTable {
    let mask = BitmapFont.render(text, font_size, config.canvas_width, config.canvas_height);
    table_from_mask(&mask, config, rng)
}

/// Entry `i` of the table, wrapping; the origin when the table is empty.
#[inline]
pub fn lookup(table: &[Vec2], i: usize) -> Vec2 {
    if table.is_empty() {
        Vec2::ZERO
    } else {
        table[i % table.len()]
    }
}

/// Point tables keyed by `(text, font size)`, built on first use and kept for
/// the life of the cache.
#[derive(Default)]
pub struct GlyphCache {
    config: GlyphConfig,
    tables: HashMap<(String, u32), GlyphPointTable>,
}

impl GlyphCache {
    pub fn new(config: GlyphConfig) -> Self {
        Self {
            config,
            tables: HashMap::new(),
        }
    }

    pub fn config(&self) -> &GlyphConfig {
        &self.config
    }

    pub fn table<R: Rng + ?Sized>(
        &mut self,
        text: &str,
        font_size: u32,
        rng: &mut R,
    ) -> GlyphPointTable {
        let key = (text.to_owned(), font_size);
        if let Some(table) = self.tables.get(&key) {
            return Arc::clone(table);
        }
        let table = rasterize(text, font_size, &self.config, rng);
        if table.is_empty() {
            warn!("text {text:?} at size {font_size} rasterized to no points");
        } else {
            debug!("glyph table {text:?}@{font_size}: {} points", table.len());
        }
        self.tables.insert(key, Arc::clone(&table));
        table
    }

    /// Supply a mask rendered by the host for `(text, font_size)`.
    ///
    /// Only fills a key that is absent or whose table came out empty; a
    /// non-empty table is kept as is. Returns the table now cached.
    pub fn insert_mask<R: Rng + ?Sized>(
        &mut self,
        text: &str,
        font_size: u32,
        mask: &AlphaMask,
        rng: &mut R,
    ) -> GlyphPointTable {
        let key = (text.to_owned(), font_size);
        if let Some(existing) = self.tables.get(&key) {
            if !existing.is_empty() {
                return Arc::clone(existing);
            }
        }
        let table = table_from_mask(mask, &self.config, rng);
        debug!("host mask {text:?}@{font_size}: {} points", table.len());
        self.tables.insert(key, Arc::clone(&table));
        table
    }

    /// Drop the table for `(text, font_size)`, e.g. when a user-edited string
    /// is replaced and will not be drawn again.
    pub fn remove(&mut self, text: &str, font_size: u32) -> Option<GlyphPointTable> {
        self.tables.remove(&(text.to_owned(), font_size))
    }

    pub fn contains(&self, text: &str, font_size: u32) -> bool {
        self.tables.contains_key(&(text.to_owned(), font_size))
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
