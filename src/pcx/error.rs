//! PCX decoding error types

use std::io;
use thiserror::Error;

/// Fatal errors that can occur while decoding a PCX file.
///
/// Everything else (truncated scanlines, missing palettes, unusual plane
/// layouts) degrades to a best-effort image instead of failing.
#[derive(Error, Debug)]
pub enum PcxError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid PCX header: insufficient data")]
    InvalidHeader,

    #[error("Not a valid PCX file")]
    NotAPcxFile,

    #[error("Invalid image window: ({xmin}, {ymin})..({xmax}, {ymax})")]
    InvalidDimensions {
        xmin: u16,
        ymin: u16,
        xmax: u16,
        ymax: u16,
    },

    #[error("Image too large: {width}x{height} exceeds the decode memory limit")]
    ImageTooLarge { width: u32, height: u32 },
}

impl From<PcxError> for String {
    fn from(err: PcxError) -> Self {
        err.to_string()
    }
}
