//! Palette location and extraction
//!
//! A 256-color PCX file should end its image data with a marker byte (12)
//! followed by 768 bytes of RGB triples. Not every encoder gets this right,
//! so several candidate locations are tried in a fixed order and the first
//! hit wins:
//!
//! 1. marker at the computed end of the compressed data
//! 2. 768 bytes at the computed end, no marker
//! 3. marker 769 bytes before the end of the file
//! 4. last 768 bytes of the file, no marker
//! 5. the 16-color header table, for images of 4 bits per pixel or less
//!
//! All four 256-color strategies need a version 5+ header. The unmarked ones
//! (2 and 4) also need one 8-bit plane, since the last 768 bytes of any large
//! file would otherwise pass for a palette.

use super::header::PcxHeader;
use super::rle::stream_end;
use super::types::{ExtractedPalette, Palette, PaletteSource};

/// Byte preceding a 256-color palette block
pub const PALETTE_MARKER: u8 = 12;

/// Size of a 256-entry RGB palette block
pub const VGA_PALETTE_SIZE: usize = 768;

/// First header version that may carry a 256-color palette
const VGA_PALETTE_MIN_VERSION: u8 = 5;

/// A single palette location strategy
pub type PaletteStrategy = fn(&[u8], &PcxHeader) -> Option<ExtractedPalette>;

/// Palette location strategies in precedence order
pub const STRATEGIES: [PaletteStrategy; 5] = [
    at_stream_boundary,
    at_stream_boundary_unmarked,
    trailing,
    trailing_unmarked,
    from_header,
];

/// Locate the palette of a PCX file, if it has one.
pub fn extract_palette(data: &[u8], header: &PcxHeader) -> Option<ExtractedPalette> {
    let found = STRATEGIES.iter().find_map(|strategy| strategy(data, header));

    match &found {
        Some(extracted) => tracing::debug!(
            "PCX palette: {} colors from {}",
            extracted.palette.len(),
            extracted.source.name()
        ),
        None => tracing::debug!("PCX palette: none found"),
    }

    found
}

fn may_have_vga_palette(header: &PcxHeader) -> bool {
    header.version >= VGA_PALETTE_MIN_VERSION
}

fn may_have_unmarked_palette(header: &PcxHeader) -> bool {
    may_have_vga_palette(header) && header.is_256_color()
}

fn read_block(data: &[u8], start: usize) -> Option<Palette> {
    let block = data.get(start..start.checked_add(VGA_PALETTE_SIZE)?)?;
    Some(Palette::from_rgb_bytes(block))
}

/// Marker byte exactly where the compressed image data ends.
pub fn at_stream_boundary(data: &[u8], header: &PcxHeader) -> Option<ExtractedPalette> {
    if !may_have_vga_palette(header) {
        return None;
    }
    let boundary = stream_end(data, header);
    if data.get(boundary) != Some(&PALETTE_MARKER) {
        return None;
    }
    Some(ExtractedPalette {
        palette: read_block(data, boundary + 1)?,
        source: PaletteSource::StreamBoundary,
        offset: Some(boundary),
    })
}

/// 768 bytes starting exactly where the compressed image data ends.
pub fn at_stream_boundary_unmarked(data: &[u8], header: &PcxHeader) -> Option<ExtractedPalette> {
    if !may_have_unmarked_palette(header) {
        return None;
    }
    let boundary = stream_end(data, header);
    Some(ExtractedPalette {
        palette: read_block(data, boundary)?,
        source: PaletteSource::StreamBoundaryUnmarked,
        offset: Some(boundary),
    })
}

/// Marker byte 769 bytes before the end of the file.
pub fn trailing(data: &[u8], header: &PcxHeader) -> Option<ExtractedPalette> {
    if !may_have_vga_palette(header) || data.len() <= VGA_PALETTE_SIZE {
        return None;
    }
    let marker_pos = data.len() - VGA_PALETTE_SIZE - 1;
    if data[marker_pos] != PALETTE_MARKER {
        return None;
    }
    Some(ExtractedPalette {
        palette: read_block(data, marker_pos + 1)?,
        source: PaletteSource::Trailing,
        offset: Some(marker_pos),
    })
}

/// Last 768 bytes of the file, whatever precedes them.
pub fn trailing_unmarked(data: &[u8], header: &PcxHeader) -> Option<ExtractedPalette> {
    if !may_have_unmarked_palette(header) || data.len() < VGA_PALETTE_SIZE {
        return None;
    }
    let start = data.len() - VGA_PALETTE_SIZE;
    Some(ExtractedPalette {
        palette: read_block(data, start)?,
        source: PaletteSource::TrailingUnmarked,
        offset: Some(start),
    })
}

/// 16-color table from the header, for 1/2/4-bit images.
pub fn from_header(_data: &[u8], header: &PcxHeader) -> Option<ExtractedPalette> {
    if header.bits_per_pixel > 4 {
        return None;
    }
    Some(ExtractedPalette {
        palette: Palette::new(header.header_palette.to_vec()),
        source: PaletteSource::Header,
        offset: None,
    })
}
