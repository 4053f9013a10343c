//! Palette swatch rendering
//!
//! Both renderers lay colors out row-major on a grid 16 cells wide; cells
//! past the last color in the final row stay black.

use std::collections::HashMap;

use image::{Rgb, RgbImage};

use super::types::{luma, Palette, Rgb as RgbTriple};

/// Swatch grid width in cells
pub const SWATCH_COLUMNS: u32 = 16;

/// Render `colors` as a grid of `cell_size` square cells.
///
/// Returns `None` when there is nothing to draw.
pub fn render_swatches(colors: &[RgbTriple], cell_size: u32) -> Option<RgbImage> {
    if colors.is_empty() || cell_size == 0 {
        return None;
    }

    let rows = (colors.len() as u32).div_ceil(SWATCH_COLUMNS);
    let image = RgbImage::from_fn(SWATCH_COLUMNS * cell_size, rows * cell_size, |x, y| {
        let index = ((y / cell_size) * SWATCH_COLUMNS + x / cell_size) as usize;
        Rgb(colors.get(index).copied().unwrap_or([0, 0, 0]))
    });
    Some(image)
}

/// Render a file palette in index order.
///
/// With `as_luma` set each entry is drawn as its luma gray, matching how
/// images decoded through the palette's luma table are displayed.
pub fn render_palette(palette: &Palette, cell_size: u32, as_luma: bool) -> Option<RgbImage> {
    if as_luma {
        let grays: Vec<RgbTriple> = palette
            .colors()
            .iter()
            .map(|&c| {
                let l = luma(c);
                [l, l, l]
            })
            .collect();
        render_swatches(&grays, cell_size)
    } else {
        render_swatches(palette.colors(), cell_size)
    }
}

/// Count the distinct colors of `image`, most frequent first.
///
/// Equal counts are ordered by color value so the result is deterministic.
/// At most `max_entries` colors are returned.
pub fn color_histogram(image: &RgbImage, max_entries: usize) -> Vec<(RgbTriple, usize)> {
    let mut counts: HashMap<RgbTriple, usize> = HashMap::new();
    for pixel in image.pixels() {
        *counts.entry(pixel.0).or_default() += 1;
    }

    let mut entries: Vec<(RgbTriple, usize)> = counts.into_iter().collect();
    entries.sort_unstable_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    entries.truncate(max_entries);
    entries
}

/// Render the most frequent colors of a decoded image.
pub fn render_histogram(image: &RgbImage, cell_size: u32, max_entries: usize) -> Option<RgbImage> {
    let colors: Vec<RgbTriple> = color_histogram(image, max_entries)
        .into_iter()
        .map(|(color, _)| color)
        .collect();
    render_swatches(&colors, cell_size)
}
