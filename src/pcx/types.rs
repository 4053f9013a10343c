//! PCX data types
//!
//! Shared type definitions for the decoder stages.

use serde::Serialize;

/// An 8-bit RGB triple
pub type Rgb = [u8; 3];

/// BT.601 luma of an RGB triple, rounded and clamped to 0..=255.
pub fn luma(rgb: Rgb) -> u8 {
    let [r, g, b] = rgb;
    let y = 0.299 * f64::from(r) + 0.587 * f64::from(g) + 0.114 * f64::from(b);
    y.round().clamp(0.0, 255.0) as u8
}

/// Ordered color table; the index of an entry is the pixel value it encodes.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Palette {
    colors: Vec<Rgb>,
}

impl Palette {
    pub fn new(colors: Vec<Rgb>) -> Self {
        Self { colors }
    }

    /// Build a palette from packed `r, g, b, r, g, b, ...` bytes.
    /// A trailing partial triple is ignored.
    pub fn from_rgb_bytes(bytes: &[u8]) -> Self {
        let colors = bytes
            .chunks_exact(3)
            .map(|c| [c[0], c[1], c[2]])
            .collect();
        Self { colors }
    }

    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    pub fn get(&self, index: usize) -> Option<Rgb> {
        self.colors.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Per-entry luma, indexed like the palette itself
    pub fn luma_table(&self) -> Vec<u8> {
        self.colors.iter().map(|&c| luma(c)).collect()
    }
}

/// Which palette location strategy produced a palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PaletteSource {
    /// Marker byte found exactly where the compressed image data ends
    StreamBoundary,
    /// 768 bytes found where the compressed image data ends, no marker
    StreamBoundaryUnmarked,
    /// Marker byte 769 bytes before the end of the file
    Trailing,
    /// Last 768 bytes of the file, no marker
    TrailingUnmarked,
    /// 16-color table embedded in the header
    Header,
}

impl PaletteSource {
    pub fn name(&self) -> &'static str {
        match self {
            Self::StreamBoundary => "stream boundary",
            Self::StreamBoundaryUnmarked => "stream boundary (unmarked)",
            Self::Trailing => "end of file",
            Self::TrailingUnmarked => "end of file (unmarked)",
            Self::Header => "header",
        }
    }
}

/// A palette together with where it was found
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedPalette {
    pub palette: Palette,
    pub source: PaletteSource,
    /// Offset of the first byte of the palette block (marker included),
    /// `None` for the header palette.
    pub offset: Option<usize>,
}

/// How decoded planes become RGB pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PixelFormat {
    /// Three 8-bit planes: red, green, blue
    Rgb24,
    /// One 8-bit plane of palette indices, shown as palette luma
    IndexedViaLuma,
    /// One 8-bit plane of gray levels
    Gray8,
    /// Any other plane/depth layout
    Fallback,
}

impl PixelFormat {
    /// Select the assembly policy for a plane count, bit depth and
    /// palette availability.
    pub fn select(num_planes: u8, bits_per_pixel: u8, has_palette: bool) -> Self {
        match (num_planes, bits_per_pixel, has_palette) {
            (3, 8, _) => Self::Rgb24,
            (1, 8, true) => Self::IndexedViaLuma,
            (1, 8, false) => Self::Gray8,
            _ => Self::Fallback,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Rgb24 => "24-bit RGB",
            Self::IndexedViaLuma => "8-bit indexed (grayscale via palette luma)",
            Self::Gray8 => "8-bit grayscale",
            Self::Fallback => "other (codec fallback)",
        }
    }
}
