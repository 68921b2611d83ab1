//! Netpbm P2, P3, P5 and P6.
//!
//! Decoding runs bytes through three stages, each owning its own buffer:
//! [`scan`] produces a [`RawHeader`], [`samples`] produces the raw sample
//! buffer and [`normalize`] produces 8-bit RGBA. [`text`] mirrors the
//! pipeline for the editable ASCII form.

mod normalize;
pub(crate) mod scan;
mod samples;
pub(crate) mod text;

use core::fmt;

use crate::decode::DecodedImage;
use crate::error::NetpbmError;
use crate::limits::Limits;
use enough::Stop;

/// Supported Netpbm variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NetpbmFormat {
    /// ASCII grayscale (PGM).
    P2,
    /// ASCII RGB (PPM).
    P3,
    /// Binary grayscale (PGM).
    P5,
    /// Binary RGB (PPM).
    P6,
}

impl NetpbmFormat {
    /// Match the first two bytes of a file.
    pub fn from_magic(magic: [u8; 2]) -> Option<Self> {
        match &magic {
            b"P2" => Some(Self::P2),
            b"P3" => Some(Self::P3),
            b"P5" => Some(Self::P5),
            b"P6" => Some(Self::P6),
            _ => None,
        }
    }

    pub fn magic(self) -> &'static str {
        match self {
            Self::P2 => "P2",
            Self::P3 => "P3",
            Self::P5 => "P5",
            Self::P6 => "P6",
        }
    }

    /// Samples per pixel: 1 for grayscale, 3 for RGB.
    pub fn channels(self) -> usize {
        match self {
            Self::P2 | Self::P5 => 1,
            Self::P3 | Self::P6 => 3,
        }
    }

    /// Whether samples are stored as decimal text.
    pub fn is_ascii(self) -> bool {
        matches!(self, Self::P2 | Self::P3)
    }

    /// The ASCII variant with the same channel layout.
    pub fn ascii_counterpart(self) -> Self {
        match self {
            Self::P2 | Self::P5 => Self::P2,
            Self::P3 | Self::P6 => Self::P3,
        }
    }
}

impl fmt::Display for NetpbmFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.magic())
    }
}

/// Parsed Netpbm header (internal).
#[derive(Clone, Copy, Debug)]
pub(crate) struct RawHeader {
    pub format: NetpbmFormat,
    pub width: u32,
    pub height: u32,
    pub maxval: u32,
    /// Offset of the byte right after the max value token.
    pub data_offset: usize,
}

impl RawHeader {
    /// `width * height * channels`, checked.
    pub(crate) fn sample_count(&self) -> Result<usize, NetpbmError> {
        (self.width as usize)
            .checked_mul(self.height as usize)
            .and_then(|wh| wh.checked_mul(self.format.channels()))
            .ok_or(NetpbmError::DimensionsTooLarge {
                width: self.width,
                height: self.height,
            })
    }

    /// Samples in one raster row.
    pub(crate) fn row_samples(&self) -> usize {
        self.width as usize * self.format.channels()
    }

    /// Binary sample width: two big-endian bytes once max exceeds 255.
    pub(crate) fn bytes_per_sample(&self) -> usize {
        if self.maxval > 255 { 2 } else { 1 }
    }
}

/// Decode a Netpbm buffer to RGBA. `Ok(None)` means the magic isn't one we handle.
pub(crate) fn decode(
    data: &[u8],
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<Option<DecodedImage>, NetpbmError> {
    let Some(header) = scan::parse_header(data)? else {
        return Ok(None);
    };

    if let Some(limits) = limits {
        limits.check(header.width, header.height)?;
        limits.check_rgba(header.width, header.height)?;
    }

    stop.check()?;

    let raw = samples::read_samples(data, &header, stop)?;
    let pixels = normalize::expand_to_rgba(&raw, &header, stop)?;

    Ok(Some(DecodedImage::new(
        header.format,
        header.width,
        header.height,
        header.maxval,
        pixels,
    )))
}
