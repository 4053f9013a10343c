//! PCX decode entry point

use std::path::Path;

use image::RgbImage;

use super::assemble::{assemble, Scanline};
use super::error::PcxError;
use super::header::{PcxHeader, HEADER_SIZE};
use super::info::PcxInfo;
use super::palette::extract_palette;
use super::render::{render_histogram, render_palette};
use super::rle::RleCursor;
use super::types::{ExtractedPalette, Palette, PixelFormat};
use crate::color::ColorInfo;

/// A fully decoded PCX file
#[derive(Debug, Clone)]
pub struct PcxImage {
    pub header: PcxHeader,
    /// Color table, if one was located
    pub palette: Option<ExtractedPalette>,
    /// Assembly policy used for `image`
    pub format: PixelFormat,
    /// Decoded pixels, always `width x height` RGB
    pub image: RgbImage,
}

impl PcxImage {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn palette(&self) -> Option<&Palette> {
        self.palette.as_ref().map(|p| &p.palette)
    }

    /// Swatch grid of the file palette, drawn the way the image is shown.
    pub fn palette_image(&self, cell_size: u32) -> Option<RgbImage> {
        let as_luma = self.format == PixelFormat::IndexedViaLuma;
        render_palette(self.palette()?, cell_size, as_luma)
    }

    /// Swatch grid of the most frequent colors in the decoded image.
    pub fn histogram_image(&self, cell_size: u32, max_entries: usize) -> Option<RgbImage> {
        render_histogram(&self.image, cell_size, max_entries)
    }

    /// Color readout for one pixel; `None` outside the image.
    pub fn inspect_pixel(&self, x: u32, y: u32) -> Option<ColorInfo> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        Some(ColorInfo::new(self.image.get_pixel(x, y).0))
    }

    /// Summary for the file information view
    pub fn info(&self) -> PcxInfo {
        PcxInfo::new(self)
    }
}

/// PCX file decoder
pub struct PcxReader;

impl PcxReader {
    /// Read and decode a PCX file from disk
    pub fn open(path: &Path) -> Result<PcxImage, PcxError> {
        tracing::info!("Loading PCX file: {:?}", path);
        let data = std::fs::read(path)?;
        Self::decode(&data)
    }

    /// Decode a complete PCX byte stream
    ///
    /// The output is always allocated at the header's full size, so windows
    /// whose RGB buffer would exceed `image::Limits::default().max_alloc`
    /// fail with [`PcxError::ImageTooLarge`] before any decoding.
    pub fn decode(data: &[u8]) -> Result<PcxImage, PcxError> {
        let header = PcxHeader::parse(data)?;
        header.validate()?;
        check_output_size(&header)?;

        tracing::debug!(
            "PCX header: version={}, {}x{}, {} planes x {} bpp, {} bytes/line",
            header.version,
            header.width(),
            header.height(),
            header.num_planes,
            header.bits_per_pixel,
            header.bytes_per_line
        );

        let palette = extract_palette(data, &header);

        // Never read a located 256-color palette block as image data
        let data_end = palette
            .as_ref()
            .and_then(|p| p.offset)
            .unwrap_or(data.len());

        let scanlines = decode_scanlines(data, &header, data_end);
        let format = PixelFormat::select(
            header.num_planes,
            header.bits_per_pixel,
            palette.is_some(),
        );
        let image = assemble(
            format,
            &header,
            &scanlines,
            palette.as_ref().map(|p| &p.palette),
            data,
        );

        tracing::info!(
            "Decoded PCX {}x{} as {}",
            image.width(),
            image.height(),
            format.name()
        );

        Ok(PcxImage {
            header,
            palette,
            format,
            image,
        })
    }
}

fn check_output_size(header: &PcxHeader) -> Result<(), PcxError> {
    let (width, height) = (header.width(), header.height());
    let output_bytes = u64::from(width) * u64::from(height) * 3;
    let limit = image::Limits::default().max_alloc.unwrap_or(u64::MAX);
    if output_bytes > limit {
        tracing::warn!(
            "PCX window {}x{} needs {} bytes, limit is {}",
            width,
            height,
            output_bytes,
            limit
        );
        return Err(PcxError::ImageTooLarge { width, height });
    }
    Ok(())
}

/// Decode every scanline, one plane at a time, trimming each plane to the
/// image width. Stops at `data_end`; planes that were never reached are
/// left out of their scanline.
fn decode_scanlines(data: &[u8], header: &PcxHeader, data_end: usize) -> Vec<Scanline> {
    let mut cursor = RleCursor::with_range(data, HEADER_SIZE, data_end);
    let width = header.width() as usize;
    let bytes_per_line = header.bytes_per_line as usize;
    let height = header.height() as usize;

    let mut scanlines = Vec::with_capacity(height);
    for _ in 0..height {
        let mut planes = Vec::with_capacity(header.num_planes as usize);
        for _ in 0..header.num_planes {
            if cursor.is_exhausted() {
                break;
            }
            let mut line = cursor.decode_scanline(bytes_per_line);
            line.truncate(width);
            planes.push(line);
        }
        scanlines.push(planes);
    }

    let complete = scanlines.last().is_some_and(|planes| {
        planes.len() == header.num_planes as usize
            && planes.iter().all(|p| p.len() == width.min(bytes_per_line))
    });
    if !complete {
        tracing::warn!(
            "PCX image data ended early at offset {}; missing pixels are black",
            cursor.position()
        );
    }

    scanlines
}
