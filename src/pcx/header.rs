//! PCX file header (128 bytes)
//!
//! Layout (all 16-bit fields little-endian):
//!
//! | Offset | Size | Field                       |
//! |--------|------|-----------------------------|
//! | 0      | 1    | manufacturer (always 10)    |
//! | 1      | 1    | version                     |
//! | 2      | 1    | encoding                    |
//! | 3      | 1    | bits per pixel              |
//! | 4      | 8    | xmin, ymin, xmax, ymax      |
//! | 12     | 4    | hdpi, vdpi                  |
//! | 16     | 48   | 16-color header palette     |
//! | 64     | 1    | reserved                    |
//! | 65     | 1    | number of color planes      |
//! | 66     | 2    | bytes per line              |
//! | 68     | 2    | palette info                |
//! | 70     | 4    | horizontal/vertical screen  |
//! | 74     | 54   | padding                     |

use std::fmt;
use std::io::{Cursor, Read};

use byteorder::{LittleEndian, ReadBytesExt};

use super::error::PcxError;
use super::types::Rgb;

/// Size of the fixed header; image data starts right after it.
pub const HEADER_SIZE: usize = 128;

/// Manufacturer byte identifying a ZSoft PCX file
pub const ZSOFT_MANUFACTURER: u8 = 10;

/// Parsed PCX header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PcxHeader {
    pub manufacturer: u8,
    pub version: u8,
    pub encoding: u8,
    pub bits_per_pixel: u8,
    pub xmin: u16,
    pub ymin: u16,
    pub xmax: u16,
    pub ymax: u16,
    pub hdpi: u16,
    pub vdpi: u16,
    /// 16-entry color map embedded in the header
    pub header_palette: [Rgb; 16],
    pub reserved: u8,
    pub num_planes: u8,
    /// Decoded bytes per scanline per plane (may exceed the width)
    pub bytes_per_line: u16,
    pub palette_info: u16,
    pub hscreen_size: u16,
    pub vscreen_size: u16,
}

impl PcxHeader {
    /// Parse the header from the start of a PCX byte stream.
    ///
    /// Only the first 128 bytes are read. The manufacturer byte is not
    /// checked here; use [`PcxHeader::is_valid`].
    pub fn parse(data: &[u8]) -> Result<Self, PcxError> {
        if data.len() < HEADER_SIZE {
            return Err(PcxError::InvalidHeader);
        }

        let mut cursor = Cursor::new(&data[..HEADER_SIZE]);

        let manufacturer = cursor.read_u8()?;
        let version = cursor.read_u8()?;
        let encoding = cursor.read_u8()?;
        let bits_per_pixel = cursor.read_u8()?;

        let xmin = cursor.read_u16::<LittleEndian>()?;
        let ymin = cursor.read_u16::<LittleEndian>()?;
        let xmax = cursor.read_u16::<LittleEndian>()?;
        let ymax = cursor.read_u16::<LittleEndian>()?;

        let hdpi = cursor.read_u16::<LittleEndian>()?;
        let vdpi = cursor.read_u16::<LittleEndian>()?;

        let mut header_palette = [[0u8; 3]; 16];
        for entry in &mut header_palette {
            cursor.read_exact(entry)?;
        }

        let reserved = cursor.read_u8()?;
        let num_planes = cursor.read_u8()?;
        let bytes_per_line = cursor.read_u16::<LittleEndian>()?;
        let palette_info = cursor.read_u16::<LittleEndian>()?;
        let hscreen_size = cursor.read_u16::<LittleEndian>()?;
        let vscreen_size = cursor.read_u16::<LittleEndian>()?;

        debug_assert_eq!(cursor.position(), 74);

        Ok(Self {
            manufacturer,
            version,
            encoding,
            bits_per_pixel,
            xmin,
            ymin,
            xmax,
            ymax,
            hdpi,
            vdpi,
            header_palette,
            reserved,
            num_planes,
            bytes_per_line,
            palette_info,
            hscreen_size,
            vscreen_size,
        })
    }

    /// Check if this is a valid PCX file
    pub fn is_valid(&self) -> bool {
        self.manufacturer == ZSOFT_MANUFACTURER
    }

    /// Image width, `xmax - xmin + 1`. Zero when the window is inverted.
    pub fn width(&self) -> u32 {
        (i32::from(self.xmax) - i32::from(self.xmin) + 1).max(0) as u32
    }

    /// Image height, `ymax - ymin + 1`. Zero when the window is inverted.
    pub fn height(&self) -> u32 {
        (i32::from(self.ymax) - i32::from(self.ymin) + 1).max(0) as u32
    }

    /// Reject files that are not PCX or whose window is empty.
    pub fn validate(&self) -> Result<(), PcxError> {
        if !self.is_valid() {
            return Err(PcxError::NotAPcxFile);
        }
        if self.width() == 0 || self.height() == 0 {
            return Err(PcxError::InvalidDimensions {
                xmin: self.xmin,
                ymin: self.ymin,
                xmax: self.xmax,
                ymax: self.ymax,
            });
        }
        Ok(())
    }

    /// Human-readable version string
    pub fn version_string(&self) -> String {
        version_description(self.version)
    }

    /// Human-readable palette info string
    pub fn palette_info_string(&self) -> String {
        palette_info_description(self.palette_info)
    }

    /// Single plane, 8 bits per pixel: the layout that may carry a
    /// 256-color palette after the image data.
    pub fn is_256_color(&self) -> bool {
        self.num_planes == 1 && self.bits_per_pixel == 8
    }
}

/// Map a header version byte to the Paintbrush release it denotes.
pub fn version_description(version: u8) -> String {
    match version {
        0 => "Ver. 2.5 of PC Paintbrush".to_string(),
        2 => "Ver. 2.8 w/palette information".to_string(),
        3 => "Ver. 2.8 w/o palette information".to_string(),
        4 => "PC Paintbrush for Windows".to_string(),
        5 => "Ver. 3.0+ of PC Paintbrush".to_string(),
        other => format!("Unknown ({})", other),
    }
}

/// Map a palette info code; unknown codes are shown as raw numbers.
pub fn palette_info_description(code: u16) -> String {
    match code {
        1 => "Color/BW".to_string(),
        2 => "Grayscale".to_string(),
        other => other.to_string(),
    }
}

impl fmt::Display for PcxHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "PCX Header Information:")?;
        writeln!(f, "Manufacturer: Zsoft .pcx ({})", self.manufacturer)?;
        writeln!(f, "Version: {}", self.version)?;
        writeln!(f, "Encoding: {}", self.encoding)?;
        writeln!(f, "Bits per Pixel: {}", self.bits_per_pixel)?;
        writeln!(
            f,
            "Image Dimensions: {} {} {} {}",
            self.xmin, self.ymin, self.xmax, self.ymax
        )?;
        writeln!(f, "HDPI: {}", self.hdpi)?;
        writeln!(f, "VDPI: {}", self.vdpi)?;
        writeln!(f, "Number of Color Planes: {}", self.num_planes)?;
        writeln!(f, "Bytes per Line: {}", self.bytes_per_line)?;
        writeln!(f, "Palette Information: {}", self.palette_info)?;
        writeln!(f, "Horizontal Screen Size: {}", self.hscreen_size)?;
        write!(f, "Vertical Screen Size: {}", self.vscreen_size)
    }
}
