//! Pixel assembly
//!
//! Turns decoded scanlines into an RGB image according to the
//! [`PixelFormat`] picked for the file. Whatever the policy, the output is
//! always a `width x height` RGB buffer; bytes missing from a truncated
//! stream come out black.

use std::io::{self, Cursor};

use image::{Rgb, RgbImage};

use super::header::PcxHeader;
use super::types::{Palette, PixelFormat};

/// One decoded scanline: a buffer per plane, each trimmed to the image width.
/// Planes past the end of a truncated stream are absent.
pub type Scanline = Vec<Vec<u8>>;

/// Build the final image from decoded scanlines.
///
/// `data` is the complete file, handed to the fallback codec for layouts
/// this module does not assemble itself.
pub fn assemble(
    format: PixelFormat,
    header: &PcxHeader,
    scanlines: &[Scanline],
    palette: Option<&Palette>,
    data: &[u8],
) -> RgbImage {
    let (width, height) = (header.width(), header.height());

    match format {
        PixelFormat::Rgb24 => RgbImage::from_fn(width, height, |x, y| {
            Rgb([
                plane_byte(scanlines, x, y, 0).unwrap_or(0),
                plane_byte(scanlines, x, y, 1).unwrap_or(0),
                plane_byte(scanlines, x, y, 2).unwrap_or(0),
            ])
        }),
        PixelFormat::IndexedViaLuma => {
            let lumas = palette.map(Palette::luma_table).unwrap_or_default();
            RgbImage::from_fn(width, height, |x, y| {
                let gray = plane_byte(scanlines, x, y, 0)
                    .and_then(|index| lumas.get(index as usize).copied())
                    .unwrap_or(0);
                Rgb([gray, gray, gray])
            })
        }
        PixelFormat::Gray8 => gray_from_first_plane(width, height, scanlines),
        PixelFormat::Fallback => match decode_with_codec(data) {
            Ok(image) if image.dimensions() == (width, height) => {
                tracing::debug!(
                    "PCX layout {} planes x {} bpp decoded by codec fallback",
                    header.num_planes,
                    header.bits_per_pixel
                );
                image
            }
            Ok(image) => {
                tracing::warn!(
                    "PCX codec fallback returned {}x{}, expected {}x{}; using first plane as grayscale",
                    image.width(),
                    image.height(),
                    width,
                    height
                );
                gray_from_first_plane(width, height, scanlines)
            }
            Err(e) => {
                tracing::warn!(
                    "PCX codec fallback failed for {} planes x {} bpp: {}; using first plane as grayscale",
                    header.num_planes,
                    header.bits_per_pixel,
                    e
                );
                gray_from_first_plane(width, height, scanlines)
            }
        },
    }
}

#[inline]
fn plane_byte(scanlines: &[Scanline], x: u32, y: u32, plane: usize) -> Option<u8> {
    scanlines
        .get(y as usize)?
        .get(plane)?
        .get(x as usize)
        .copied()
}

/// Each byte of plane 0 as a gray level
fn gray_from_first_plane(width: u32, height: u32, scanlines: &[Scanline]) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        let v = plane_byte(scanlines, x, y, 0).unwrap_or(0);
        Rgb([v, v, v])
    })
}

/// Decode the whole file with the `pcx` crate, which understands the
/// 1/2/4-bit and multi-plane layouts.
fn decode_with_codec(data: &[u8]) -> io::Result<RgbImage> {
    let mut reader = pcx::Reader::new(Cursor::new(data))?;
    let width = u32::from(reader.width());
    let height = u32::from(reader.height());
    let (w, h) = (width as usize, height as usize);

    if w == 0 || h == 0 {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "PCX codec reported an empty image",
        ));
    }

    let mut rgb = vec![0u8; w * h * 3];

    match reader.palette_length() {
        None => {
            for row in rgb.chunks_exact_mut(w * 3) {
                reader.next_row_rgb(row)?;
            }
        }
        Some(palette_length) => {
            let mut indices = vec![0u8; w * h];
            for row in indices.chunks_exact_mut(w) {
                reader.next_row_paletted(row)?;
            }

            let mut palette = vec![0u8; 3 * palette_length as usize];
            reader.read_palette(&mut palette)?;

            for (pixel, &index) in rgb.chunks_exact_mut(3).zip(&indices) {
                let offset = index as usize * 3;
                if let Some(color) = palette.get(offset..offset + 3) {
                    pixel.copy_from_slice(color);
                }
            }
        }
    }

    RgbImage::from_raw(width, height, rgb).ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidData, "PCX codec buffer size mismatch")
    })
}
