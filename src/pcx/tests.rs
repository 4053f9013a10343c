#![allow(clippy::unwrap_used)]
use image::Rgb;

use super::header::HEADER_SIZE;
use super::palette::{PALETTE_MARKER, VGA_PALETTE_SIZE};
use super::*;

/// Minimal header for a `width x height` image at offset (0, 0)
fn header_bytes(
    version: u8,
    bits_per_pixel: u8,
    num_planes: u8,
    width: u16,
    height: u16,
    bytes_per_line: u16,
) -> Vec<u8> {
    let mut data = vec![0u8; HEADER_SIZE];
    data[0] = 10;
    data[1] = version;
    data[2] = 1;
    data[3] = bits_per_pixel;
    data[8..10].copy_from_slice(&(width - 1).to_le_bytes());
    data[10..12].copy_from_slice(&(height - 1).to_le_bytes());
    data[12..14].copy_from_slice(&72u16.to_le_bytes());
    data[14..16].copy_from_slice(&72u16.to_le_bytes());
    data[65] = num_planes;
    data[66..68].copy_from_slice(&bytes_per_line.to_le_bytes());
    data[68..70].copy_from_slice(&1u16.to_le_bytes());
    data
}

fn with_body(mut header: Vec<u8>, body: &[u8]) -> Vec<u8> {
    header.extend_from_slice(body);
    header
}

fn row(image: &image::RgbImage, y: u32) -> Vec<[u8; 3]> {
    (0..image.width()).map(|x| image.get_pixel(x, y).0).collect()
}

#[test]
fn test_grayscale_literals_end_to_end() {
    let data = with_body(
        header_bytes(5, 8, 1, 4, 2, 4),
        &[10, 20, 30, 40, 50, 60, 70, 80],
    );
    let pcx = PcxReader::decode(&data).unwrap();

    assert_eq!(pcx.format, PixelFormat::Gray8);
    assert!(pcx.palette.is_none());
    assert_eq!((pcx.width(), pcx.height()), (4, 2));
    assert_eq!(
        row(&pcx.image, 0),
        vec![[10, 10, 10], [20, 20, 20], [30, 30, 30], [40, 40, 40]]
    );
    assert_eq!(
        row(&pcx.image, 1),
        vec![[50, 50, 50], [60, 60, 60], [70, 70, 70], [80, 80, 80]]
    );
}

#[test]
fn test_run_scanline_end_to_end() {
    let data = with_body(header_bytes(5, 8, 1, 3, 1, 3), &[0xC3, 0x7F]);
    let pcx = PcxReader::decode(&data).unwrap();
    assert_eq!(row(&pcx.image, 0), vec![[127, 127, 127]; 3]);
}

#[test]
fn test_padding_bytes_are_trimmed() {
    // bytes_per_line 4 for a 3-pixel-wide image; the 4th byte is padding
    let data = with_body(header_bytes(5, 8, 1, 3, 2, 4), &[1, 2, 3, 63, 4, 5, 6, 0]);
    let pcx = PcxReader::decode(&data).unwrap();
    assert_eq!(row(&pcx.image, 0), vec![[1; 3], [2; 3], [3; 3]]);
    assert_eq!(row(&pcx.image, 1), vec![[4; 3], [5; 3], [6; 3]]);
}

#[test]
fn test_rgb24_planes_per_scanline() {
    // Each scanline stores its red, green and blue planes in turn
    let body = [
        0xC2, 200, 10, 20, 30, 40, // row 0: R R, G G, B B
        1, 2, 0xC2, 3, 4, 5, // row 1
    ];
    let data = with_body(header_bytes(5, 8, 3, 2, 2, 2), &body);
    let pcx = PcxReader::decode(&data).unwrap();

    assert_eq!(pcx.format, PixelFormat::Rgb24);
    assert_eq!(row(&pcx.image, 0), vec![[200, 10, 30], [200, 20, 40]]);
    assert_eq!(row(&pcx.image, 1), vec![[1, 3, 4], [2, 3, 5]]);
}

#[test]
fn test_indexed_image_with_boundary_palette() {
    let mut body = vec![0, 1, 2, 0xC2, 3];
    body.push(PALETTE_MARKER);
    let mut palette = vec![0u8; VGA_PALETTE_SIZE];
    palette[0..3].copy_from_slice(&[255, 0, 0]);
    palette[3..6].copy_from_slice(&[0, 255, 0]);
    palette[6..9].copy_from_slice(&[0, 0, 255]);
    palette[9..12].copy_from_slice(&[255, 255, 255]);
    body.extend(palette);
    // An unrelated block at the end of the file must not win
    body.push(PALETTE_MARKER);
    body.extend(vec![0x80; VGA_PALETTE_SIZE]);

    let data = with_body(header_bytes(5, 8, 1, 5, 1, 5), &body);
    let pcx = PcxReader::decode(&data).unwrap();

    assert_eq!(pcx.format, PixelFormat::IndexedViaLuma);
    let extracted = pcx.palette.as_ref().unwrap();
    assert_eq!(extracted.source, PaletteSource::StreamBoundary);
    assert_eq!(extracted.palette.get(0), Some([255, 0, 0]));
    assert_eq!(
        row(&pcx.image, 0),
        vec![[76; 3], [150; 3], [29; 3], [255; 3], [255; 3]]
    );

    // Palette preview matches the displayed luma
    let grid = pcx.palette_image(2).unwrap();
    assert_eq!(grid.dimensions(), (32, 32));
    assert_eq!(grid.get_pixel(0, 0), &Rgb([76, 76, 76]));
    assert_eq!(grid.get_pixel(2, 0), &Rgb([150, 150, 150]));
}

#[test]
fn test_trailing_palette_bounds_image_data() {
    // Declares 2 rows but only holds one; the second row must not be read
    // out of the palette block that follows.
    let mut body = vec![9, 9, 9, 9];
    body.push(PALETTE_MARKER);
    body.extend(vec![0x7F; VGA_PALETTE_SIZE]);
    let data = with_body(header_bytes(5, 8, 1, 4, 2, 4), &body);
    let pcx = PcxReader::decode(&data).unwrap();

    let extracted = pcx.palette.as_ref().unwrap();
    assert_eq!(extracted.source, PaletteSource::Trailing);
    assert_eq!(extracted.offset, Some(HEADER_SIZE + 4));
    // index 9 -> luma of (0x7F, 0x7F, 0x7F)
    assert_eq!(row(&pcx.image, 0), vec![[0x7F; 3]; 4]);
    assert_eq!(row(&pcx.image, 1), vec![[0, 0, 0]; 4]);
}

#[test]
fn test_truncated_stream_is_not_an_error() {
    let data = with_body(header_bytes(5, 8, 1, 4, 3, 4), &[1, 2, 3, 4, 5, 6]);
    let pcx = PcxReader::decode(&data).unwrap();
    assert_eq!(pcx.image.dimensions(), (4, 3));
    assert_eq!(row(&pcx.image, 0), vec![[1; 3], [2; 3], [3; 3], [4; 3]]);
    assert_eq!(row(&pcx.image, 1), vec![[5; 3], [6; 3], [0; 3], [0; 3]]);
    assert_eq!(row(&pcx.image, 2), vec![[0; 3]; 4]);
}

#[test]
fn test_unusual_layout_still_produces_image() {
    // 1 plane, 4 bpp: handled by the codec fallback or the grayscale fallback
    let data = with_body(header_bytes(2, 4, 1, 4, 2, 2), &[0x12, 0x34, 0x56, 0x78]);
    let pcx = PcxReader::decode(&data).unwrap();
    assert_eq!(pcx.format, PixelFormat::Fallback);
    assert_eq!(pcx.image.dimensions(), (4, 2));
    assert_eq!(pcx.palette.as_ref().unwrap().source, PaletteSource::Header);
}

#[test]
fn test_ega_planes_decoded_with_header_palette() {
    // 4 planes of 1 bit: pixel 0 has every plane bit set (index 15), pixel 1 none
    let mut header = header_bytes(5, 1, 4, 8, 1, 1);
    header[16 + 15 * 3..16 + 16 * 3].copy_from_slice(&[240, 0, 0]);
    let data = with_body(header, &[0x80; 4]);
    let pcx = PcxReader::decode(&data).unwrap();

    assert_eq!(pcx.format, PixelFormat::Fallback);
    assert_eq!(pcx.palette.as_ref().unwrap().source, PaletteSource::Header);
    assert_eq!(pcx.image.dimensions(), (8, 1));
    assert_eq!(pcx.image.get_pixel(0, 0), &Rgb([240, 0, 0]));
    assert_eq!(pcx.image.get_pixel(1, 0), &Rgb([0, 0, 0]));
}

#[test]
fn test_rgb24_with_marked_palette() {
    let mut body = vec![1, 2, 3, PALETTE_MARKER];
    let mut palette = vec![0x40; VGA_PALETTE_SIZE];
    palette[0..3].copy_from_slice(&[255, 0, 0]);
    body.extend(palette);
    let data = with_body(header_bytes(5, 8, 3, 1, 1, 1), &body);
    let pcx = PcxReader::decode(&data).unwrap();

    assert_eq!(pcx.format, PixelFormat::Rgb24);
    assert_eq!(pcx.image.get_pixel(0, 0), &Rgb([1, 2, 3]));
    let extracted = pcx.palette.as_ref().unwrap();
    assert_eq!(extracted.source, PaletteSource::StreamBoundary);
    assert_eq!(extracted.offset, Some(HEADER_SIZE + 3));

    // Shown in color, not through the luma mapping
    let grid = pcx.palette_image(1).unwrap();
    assert_eq!(grid.dimensions(), (16, 16));
    assert_eq!(grid.get_pixel(0, 0), &Rgb([255, 0, 0]));
    assert_eq!(grid.get_pixel(1, 0), &Rgb([0x40, 0x40, 0x40]));
}

#[test]
fn test_fatal_errors() {
    let short = vec![10u8; 100];
    assert!(matches!(
        PcxReader::decode(&short),
        Err(PcxError::InvalidHeader)
    ));

    let mut not_pcx = header_bytes(5, 8, 1, 4, 2, 4);
    not_pcx[0] = 0x42;
    assert!(matches!(
        PcxReader::decode(&not_pcx),
        Err(PcxError::NotAPcxFile)
    ));
}

#[test]
fn test_oversized_window_rejected_before_allocation() {
    // Bare 128-byte header declaring a 65535x65535 window
    let data = header_bytes(5, 8, 1, 65535, 65535, 65535);
    assert!(matches!(
        PcxReader::decode(&data),
        Err(PcxError::ImageTooLarge {
            width: 65535,
            height: 65535
        })
    ));

    // A large but reasonable window with no image data still decodes
    let data = header_bytes(5, 8, 1, 1024, 1024, 1024);
    let pcx = PcxReader::decode(&data).unwrap();
    assert_eq!(pcx.image.dimensions(), (1024, 1024));
}

#[test]
fn test_info_summary() {
    let data = with_body(header_bytes(5, 8, 1, 4, 1, 4), &[1, 2, 3, 4]);
    let pcx = PcxReader::decode(&data).unwrap();
    let info = pcx.info();

    assert_eq!(info.fields.len(), 12);
    assert_eq!(info.fields[0].label, "Manufacturer");
    assert_eq!(info.fields[0].value, "Zsoft .pcx (10)");
    assert_eq!(info.fields[4].value, "0 0 3 0");
    assert_eq!(info.version_description, "Ver. 3.0+ of PC Paintbrush");
    assert_eq!(info.palette_info_description, "Color/BW");
    assert_eq!(info.palette_size, 0);
    assert_eq!(info.image_type_note, Some(GRAYSCALE_NOTE));

    let json = serde_json::to_value(&info).unwrap();
    assert_eq!(json["pixelFormat"], "gray8");
    assert_eq!(json["width"], 4);
    assert!(json["paletteSource"].is_null());
}

#[test]
fn test_histogram_and_inspection() {
    let data = with_body(header_bytes(5, 8, 1, 4, 1, 4), &[7, 7, 7, 3]);
    let pcx = PcxReader::decode(&data).unwrap();

    let grid = pcx.histogram_image(1, 256).unwrap();
    assert_eq!(grid.dimensions(), (16, 1));
    assert_eq!(grid.get_pixel(0, 0), &Rgb([7, 7, 7]));
    assert_eq!(grid.get_pixel(1, 0), &Rgb([3, 3, 3]));

    let color = pcx.inspect_pixel(3, 0).unwrap();
    assert_eq!(color.hex, "#030303");
    assert!(pcx.inspect_pixel(4, 0).is_none());
    assert!(pcx.palette_image(12).is_none());
}
