use alloc::string::String;
use enough::StopReason;

/// Errors from Netpbm decoding and the editable text round trip.
///
/// A buffer that simply isn't Netpbm is not an error; see [`crate::decode`].
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum NetpbmError {
    #[error("file too small: {len} bytes")]
    FileTooSmall { len: usize },

    #[error("header malformed: {0}")]
    InvalidHeader(String),

    #[error("invalid max value: {0}")]
    InvalidMaxval(u32),

    #[error("pixel data shorter than expected: need {needed} bytes, got {actual}")]
    TruncatedPixelData { needed: usize, actual: usize },

    #[error("unexpected end of file: read {read} of {expected} samples")]
    UnexpectedEof { read: usize, expected: usize },

    #[error("non-numeric pixel value: {0:?}")]
    NonNumericSample(String),

    #[error("grayscale image has a colored pixel at index {index}")]
    NotGray { index: usize },

    #[error("editable representation requires P2 or P3")]
    NotEditable,

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("buffer too small: need {needed} bytes, got {actual}")]
    BufferTooSmall { needed: usize, actual: usize },

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

/// Coarse classification of a [`NetpbmError`].
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Width, height or max value token missing, non-numeric or out of range.
    MalformedHeader,
    /// Input ended before the header, or binary pixel data is short.
    TruncatedInput,
    /// An ASCII sample is non-numeric or missing, or a grayscale buffer
    /// holds a colored pixel.
    MalformedPixelData,
    /// Text handed to the round-trip parser didn't decode as P2 or P3.
    UnsupportedVariantForEdit,
    /// Overflowing dimensions, configured limits, or an undersized caller buffer.
    Resource,
    /// The caller's stop token fired.
    Cancelled,
}

impl NetpbmError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidHeader(_) | Self::InvalidMaxval(_) => ErrorKind::MalformedHeader,
            Self::FileTooSmall { .. } | Self::TruncatedPixelData { .. } => {
                ErrorKind::TruncatedInput
            }
            Self::UnexpectedEof { .. } | Self::NonNumericSample(_) | Self::NotGray { .. } => {
                ErrorKind::MalformedPixelData
            }
            Self::NotEditable => ErrorKind::UnsupportedVariantForEdit,
            Self::DimensionsTooLarge { .. }
            | Self::LimitExceeded(_)
            | Self::BufferTooSmall { .. } => ErrorKind::Resource,
            Self::Cancelled(_) => ErrorKind::Cancelled,
        }
    }
}

impl From<StopReason> for NetpbmError {
    fn from(r: StopReason) -> Self {
        NetpbmError::Cancelled(r)
    }
}
