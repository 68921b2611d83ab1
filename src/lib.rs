//! # zennetpbm
//!
//! Netpbm decoder for P2, P3, P5 and P6, with an editable ASCII round trip.
//!
//! Every decode produces 8-bit opaque RGBA regardless of the source max
//! value or channel count. Any decoded image can be written back out as
//! plain-text P2/P3 with max value 255, edited by hand, and parsed again.
//!
//! ## Supported Formats
//!
//! - **P2** (PGM ASCII) and **P5** (PGM binary): grayscale
//! - **P3** (PPM ASCII) and **P6** (PPM binary): RGB
//!
//! Binary samples are one byte when the max value is at most 255, otherwise
//! two bytes big-endian.
//!
//! ## Non-Goals
//!
//! - P1/P4 bitmaps and P7 (PAM)
//! - Rendering or file I/O
//! - Writing binary Netpbm
//!
//! ## Usage
//!
//! ```
//! use zennetpbm::NetpbmFormat;
//!
//! let data = b"P5\n2 1\n65535\n\x00\x00\xff\xff";
//!
//! // Probe without decoding
//! let info = zennetpbm::probe(data)?.expect("P5 is netpbm");
//! assert_eq!((info.width, info.height, info.max_value), (2, 1, 65535));
//!
//! // `None` would mean "not netpbm, try another decoder"
//! let image = zennetpbm::decode(data)?.expect("P5 is netpbm");
//! assert_eq!(image.pixels(), &[0, 0, 0, 255, 255, 255, 255, 255]);
//!
//! // Editable text, then back
//! let text = zennetpbm::encode_text(&image);
//! assert!(text.starts_with("P2\n"));
//! let edited = text.replace("0 255", "0 128");
//! let image = zennetpbm::parse_text(&edited)?;
//! assert_eq!(image.format(), NetpbmFormat::P2);
//! assert_eq!(image.pixel(1, 0), Some([128, 128, 128, 255]));
//! # Ok::<(), zennetpbm::NetpbmError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod decode;
mod error;
mod info;
mod limits;
mod pnm;

use alloc::string::String;

// Re-exports
pub use decode::{DecodeRequest, DecodedImage};
pub use enough::{Stop, Unstoppable};
pub use error::{ErrorKind, NetpbmError};
pub use info::ImageInfo;
pub use limits::Limits;
pub use pnm::NetpbmFormat;

/// Decode P2/P3/P5/P6 bytes to RGBA.
///
/// Returns `Ok(None)` when the first two bytes aren't a supported magic
/// number, so the caller can fall back to a generic image decoder.
pub fn decode(data: &[u8]) -> Result<Option<DecodedImage>, NetpbmError> {
    DecodeRequest::new(data).decode(Unstoppable)
}

/// Read the header only.
pub fn probe(data: &[u8]) -> Result<Option<ImageInfo>, NetpbmError> {
    ImageInfo::from_bytes(data)
}

/// Write an image as editable ASCII: P2 for grayscale sources, P3 for RGB,
/// max value 255, with comments naming the source format and max value.
pub fn encode_text(image: &DecodedImage) -> String {
    pnm::text::encode_text(image)
}

/// Parse editable text back into an image.
///
/// Fails with [`NetpbmError::NotEditable`] unless the text decodes as P2 or P3.
pub fn parse_text(text: &str) -> Result<DecodedImage, NetpbmError> {
    DecodeRequest::from_text(text).parse_text(Unstoppable)
}
