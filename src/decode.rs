use alloc::vec::Vec;

#[cfg(feature = "rgb")]
use rgb::AsPixels as _;

use enough::Stop;

use crate::error::NetpbmError;
use crate::limits::Limits;
use crate::pnm::{self, NetpbmFormat};

/// A decoded Netpbm image, always 8-bit opaque RGBA.
///
/// Produced by [`crate::decode`] and [`crate::parse_text`]. Holds no
/// reference to the input; editing the text form yields a new image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedImage {
    format: NetpbmFormat,
    width: u32,
    height: u32,
    source_max_value: u32,
    pixels: Vec<u8>,
}

impl DecodedImage {
    /// Max value of the RGBA samples, regardless of the source.
    pub const DISPLAY_MAX_VALUE: u32 = 255;

    pub(crate) fn new(
        format: NetpbmFormat,
        width: u32,
        height: u32,
        source_max_value: u32,
        pixels: Vec<u8>,
    ) -> Self {
        Self {
            format,
            width,
            height,
            source_max_value,
            pixels,
        }
    }

    /// Build an image from a caller-owned RGBA buffer.
    ///
    /// Grayscale formats (P2/P5) need R = G = B in every pixel, since the
    /// text form stores one sample per pixel; anything else is
    /// [`NetpbmError::NotGray`]. Extra trailing bytes are dropped.
    pub fn from_rgba(
        format: NetpbmFormat,
        width: u32,
        height: u32,
        source_max_value: u32,
        mut pixels: Vec<u8>,
    ) -> Result<Self, NetpbmError> {
        if width == 0 || height == 0 {
            return Err(NetpbmError::InvalidHeader(alloc::format!(
                "zero dimension: {width}x{height}"
            )));
        }
        if source_max_value == 0 {
            return Err(NetpbmError::InvalidMaxval(0));
        }
        let needed = (width as usize)
            .checked_mul(height as usize)
            .and_then(|wh| wh.checked_mul(4))
            .ok_or(NetpbmError::DimensionsTooLarge { width, height })?;
        if pixels.len() < needed {
            return Err(NetpbmError::BufferTooSmall {
                needed,
                actual: pixels.len(),
            });
        }
        pixels.truncate(needed);
        if format.channels() == 1 {
            if let Some(index) = pixels
                .chunks_exact(4)
                .position(|px| px[0] != px[1] || px[1] != px[2])
            {
                return Err(NetpbmError::NotGray { index });
            }
        }
        Ok(Self::new(format, width, height, source_max_value, pixels))
    }

    /// Format named by the source's magic number.
    pub fn format(&self) -> NetpbmFormat {
        self.format
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Always 255.
    pub fn display_max_value(&self) -> u32 {
        Self::DISPLAY_MAX_VALUE
    }

    /// Max value declared in the source header.
    pub fn source_max_value(&self) -> u32 {
        self.source_max_value
    }

    /// RGBA bytes, row-major, `width * height * 4` long.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// RGBA at (`x`, `y`), or `None` outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let off = (y as usize * self.width as usize + x as usize) * 4;
        let px = self.pixels.get(off..off + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Reinterpret pixel data as typed RGBA pixels.
    #[cfg(feature = "rgb")]
    pub fn as_rgba(&self) -> &[rgb::RGBA8] {
        self.pixels.as_pixels()
    }

    /// Zero-copy view as an [`imgref::ImgRef`] of RGBA pixels.
    #[cfg(feature = "imgref")]
    pub fn as_imgref(&self) -> imgref::ImgRef<'_, rgb::RGBA8> {
        imgref::ImgRef::new(
            self.as_rgba(),
            self.width as usize,
            self.height as usize,
        )
    }

    /// Copy into an [`imgref::ImgVec`] of RGBA pixels.
    #[cfg(feature = "imgref")]
    pub fn to_imgvec(&self) -> imgref::ImgVec<rgb::RGBA8> {
        imgref::ImgVec::new(
            self.as_rgba().to_vec(),
            self.width as usize,
            self.height as usize,
        )
    }
}

/// Decode builder for when limits or a stop token are needed.
///
/// ```
/// use zennetpbm::{DecodeRequest, Limits, Unstoppable};
///
/// let limits = Limits { max_pixels: Some(1 << 20), ..Default::default() };
/// let image = DecodeRequest::new(b"P2\n1 1\n255\n7\n")
///     .with_limits(&limits)
///     .decode(Unstoppable)?
///     .expect("P2 is netpbm");
/// assert_eq!(image.pixels(), &[7, 7, 7, 255]);
/// # Ok::<(), zennetpbm::NetpbmError>(())
/// ```
#[derive(Clone, Debug)]
pub struct DecodeRequest<'a> {
    data: &'a [u8],
    limits: Option<&'a Limits>,
}

impl<'a> DecodeRequest<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, limits: None }
    }

    /// Request over (possibly user-edited) text.
    pub fn from_text(text: &'a str) -> Self {
        Self::new(text.as_bytes())
    }

    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Decode to RGBA. `Ok(None)` means the input is not P2/P3/P5/P6 and the
    /// caller should try another decoder.
    pub fn decode(self, stop: impl Stop) -> Result<Option<DecodedImage>, NetpbmError> {
        pnm::decode(self.data, self.limits, &stop)
    }

    /// Decode the editable text form. Anything other than P2/P3 is
    /// [`NetpbmError::NotEditable`].
    pub fn parse_text(self, stop: impl Stop) -> Result<DecodedImage, NetpbmError> {
        pnm::text::parse_text(self.data, self.limits, &stop)
    }
}
