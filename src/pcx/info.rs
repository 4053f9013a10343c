//! File information summary for the inspector view

use serde::Serialize;

use super::reader::PcxImage;
use super::types::{PaletteSource, PixelFormat};

/// Note shown for 8-bit single-plane images that carry no palette
pub const GRAYSCALE_NOTE: &str = "This is a grayscale image (no color palette)";

/// One labelled header row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InfoField {
    pub label: &'static str,
    pub value: String,
}

/// Serializable summary of a decoded PCX file
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PcxInfo {
    /// Header fields in display order
    pub fields: Vec<InfoField>,
    pub version_description: String,
    pub palette_info_description: String,
    pub width: u32,
    pub height: u32,
    pub pixel_format: PixelFormat,
    pub palette_source: Option<PaletteSource>,
    pub palette_size: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_type_note: Option<&'static str>,
}

impl PcxInfo {
    pub fn new(pcx: &PcxImage) -> Self {
        let h = &pcx.header;

        let field = |label: &'static str, value: String| InfoField { label, value };
        let fields = vec![
            field("Manufacturer", format!("Zsoft .pcx ({})", h.manufacturer)),
            field("Version", h.version.to_string()),
            field("Encoding", h.encoding.to_string()),
            field("Bits per Pixel", h.bits_per_pixel.to_string()),
            field(
                "Image Dimensions",
                format!("{} {} {} {}", h.xmin, h.ymin, h.xmax, h.ymax),
            ),
            field("HDPI", h.hdpi.to_string()),
            field("VDPI", h.vdpi.to_string()),
            field("Number of Color Planes", h.num_planes.to_string()),
            field("Bytes per Line", h.bytes_per_line.to_string()),
            field("Palette Information", h.palette_info.to_string()),
            field("Horizontal Screen Size", h.hscreen_size.to_string()),
            field("Vertical Screen Size", h.vscreen_size.to_string()),
        ];

        let image_type_note =
            (pcx.palette.is_none() && h.is_256_color()).then_some(GRAYSCALE_NOTE);

        Self {
            fields,
            version_description: h.version_string(),
            palette_info_description: h.palette_info_string(),
            width: pcx.width(),
            height: pcx.height(),
            pixel_format: pcx.format,
            palette_source: pcx.palette.as_ref().map(|p| p.source),
            palette_size: pcx.palette().map_or(0, |p| p.len()),
            image_type_note,
        }
    }
}
