//! ZSoft PCX (Paintbrush) image decoder
//!
//! Decodes PCX versions 0, 2, 3, 4 and 5 into an RGB buffer, together with
//! the parsed header and any color palette found in the file.
//!
//! # Pipeline
//!
//! 1. [`header`] parses the 128-byte header and checks the signature.
//! 2. [`palette`] locates a palette, dry-running the RLE stream to find
//!    where image data ends.
//! 3. [`rle`] decompresses each scanline plane from one shared cursor.
//! 4. [`assemble`] turns the planes into RGB pixels.
//!
//! [`render`] builds swatch grids from the palette or from the decoded
//! image's colors.
//!
//! # Example
//!
//! ```ignore
//! use pcxview_lib::pcx::PcxReader;
//!
//! let pcx = PcxReader::open(std::path::Path::new("photo.pcx"))?;
//! println!("{}x{} ({})", pcx.width(), pcx.height(), pcx.format.name());
//! if let Some(grid) = pcx.palette_image(12) {
//!     grid.save("palette.png")?;
//! }
//! ```

pub mod assemble;
pub mod error;
pub mod header;
mod info;
pub mod palette;
mod reader;
pub mod render;
pub mod rle;
mod types;

pub use error::PcxError;
pub use header::PcxHeader;
pub use info::{InfoField, PcxInfo, GRAYSCALE_NOTE};
pub use reader::{PcxImage, PcxReader};
pub use types::{luma, ExtractedPalette, Palette, PaletteSource, PixelFormat, Rgb};

#[cfg(test)]
mod tests;
