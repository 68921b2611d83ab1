//! Rescale raw samples to 0..=255 and expand them to RGBA.

use alloc::vec::Vec;
use enough::Stop;

use super::{NetpbmFormat, RawHeader};
use crate::error::NetpbmError;

/// `round(v * 255 / maxval)`, halves rounding up, saturating at 255.
///
/// Samples above `maxval` are clamped rather than rejected.
#[inline]
pub(crate) fn scale_sample(v: u32, maxval: u32) -> u8 {
    if maxval == 255 {
        return v.min(255) as u8;
    }
    let m = u64::from(maxval);
    let scaled = (u64::from(v) * 510 + m) / (2 * m);
    scaled.min(255) as u8
}

/// Expand raw samples into an opaque RGBA buffer in row-major order.
pub(crate) fn expand_to_rgba(
    samples: &[u32],
    header: &RawHeader,
    stop: &dyn Stop,
) -> Result<Vec<u8>, NetpbmError> {
    let maxval = header.maxval;
    let channels = header.format.channels();
    let mut out = Vec::with_capacity(samples.len() / channels * 4);
    let samples_per_check = header.row_samples().saturating_mul(16).max(1);

    for (i, chunk) in samples.chunks(samples_per_check).enumerate() {
        if i > 0 {
            stop.check()?;
        }
        match header.format {
            NetpbmFormat::P2 | NetpbmFormat::P5 => {
                for &v in chunk {
                    let g = scale_sample(v, maxval);
                    out.extend_from_slice(&[g, g, g, 255]);
                }
            }
            NetpbmFormat::P3 | NetpbmFormat::P6 => {
                for rgb in chunk.chunks_exact(3) {
                    out.extend_from_slice(&[
                        scale_sample(rgb[0], maxval),
                        scale_sample(rgb[1], maxval),
                        scale_sample(rgb[2], maxval),
                        255,
                    ]);
                }
            }
        }
    }

    let clamped = samples.iter().filter(|&&v| v > maxval).count();
    if clamped > 0 {
        log::debug!("clamped {clamped} samples above max value {maxval}");
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use enough::Unstoppable;

    fn header(format: NetpbmFormat, width: u32, height: u32, maxval: u32) -> RawHeader {
        RawHeader {
            format,
            width,
            height,
            maxval,
            data_offset: 0,
        }
    }

    #[test]
    fn scaling_rounds_half_up() {
        assert_eq!(scale_sample(15, 15), 255);
        assert_eq!(scale_sample(0, 15), 0);
        assert_eq!(scale_sample(50, 100), 128);
        assert_eq!(scale_sample(1, 2), 128);
        assert_eq!(scale_sample(65535, 65535), 255);
        assert_eq!(scale_sample(256, 65535), 1);
        assert_eq!(scale_sample(32767, 65535), 127);
        assert_eq!(scale_sample(32768, 65535), 128);
    }

    #[test]
    fn maxval_255_passes_through() {
        for v in 0..=255 {
            assert_eq!(u32::from(scale_sample(v, 255)), v);
        }
    }

    #[test]
    fn out_of_range_samples_clamp() {
        assert_eq!(scale_sample(300, 255), 255);
        assert_eq!(scale_sample(20, 15), 255);
        assert_eq!(scale_sample(u32::MAX, 1), 255);
    }

    #[test]
    fn gray_expands_to_opaque_rgba() {
        let h = header(NetpbmFormat::P5, 2, 1, 255);
        let out = expand_to_rgba(&[128, 3], &h, &Unstoppable).unwrap();
        assert_eq!(out, [128, 128, 128, 255, 3, 3, 3, 255]);
    }

    #[test]
    fn rgb_expands_to_opaque_rgba() {
        let h = header(NetpbmFormat::P6, 1, 2, 255);
        let out = expand_to_rgba(&[10, 20, 30, 40, 50, 60], &h, &Unstoppable).unwrap();
        assert_eq!(out, [10, 20, 30, 255, 40, 50, 60, 255]);
    }

    #[test]
    fn expansion_spans_several_check_chunks() {
        let h = header(NetpbmFormat::P3, 1, 40, 1);
        let samples = [1u32; 120];
        let out = expand_to_rgba(&samples, &h, &Unstoppable).unwrap();
        assert_eq!(out.len(), 160);
        assert!(out.iter().all(|&b| b == 255));
    }
}
