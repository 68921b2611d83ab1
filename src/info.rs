use crate::error::NetpbmError;
use crate::pnm::{NetpbmFormat, scan};

/// Header fields, read without touching the raster.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageInfo {
    pub format: NetpbmFormat,
    pub width: u32,
    pub height: u32,
    /// Max sample value as declared in the header.
    pub max_value: u32,
}

impl ImageInfo {
    /// Scan only the header. `Ok(None)` for input that isn't P2/P3/P5/P6.
    pub fn from_bytes(data: &[u8]) -> Result<Option<Self>, NetpbmError> {
        Ok(scan::parse_header(data)?.map(|h| Self {
            format: h.format,
            width: h.width,
            height: h.height,
            max_value: h.maxval,
        }))
    }
}
