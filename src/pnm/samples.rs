//! Raw sample extraction, from decimal tokens (P2/P3) or packed bytes (P5/P6).

use alloc::vec::Vec;
use enough::Stop;

use super::RawHeader;
use super::scan::{Scanner, lossy, parse_u32};
use crate::error::NetpbmError;

/// Read exactly `width * height * channels` samples, in file order.
pub(crate) fn read_samples(
    data: &[u8],
    header: &RawHeader,
    stop: &dyn Stop,
) -> Result<Vec<u32>, NetpbmError> {
    let count = header.sample_count()?;
    if header.format.is_ascii() {
        read_ascii(data, header, count, stop)
    } else {
        read_binary(data, header, count, stop)
    }
}

fn read_ascii(
    data: &[u8],
    header: &RawHeader,
    count: usize,
    stop: &dyn Stop,
) -> Result<Vec<u32>, NetpbmError> {
    let mut scanner = Scanner::new(data, header.data_offset);
    // Every sample takes at least one byte, so don't trust the header alone.
    let mut samples = Vec::with_capacity(count.min(scanner.rest().len()));
    let check_every = header.row_samples().saturating_mul(16).max(1);

    for read in 0..count {
        if read % check_every == 0 {
            stop.check()?;
        }
        let token = scanner.next_token().ok_or(NetpbmError::UnexpectedEof {
            read,
            expected: count,
        })?;
        let value = parse_u32(token).ok_or_else(|| NetpbmError::NonNumericSample(lossy(token)))?;
        samples.push(value);
    }

    Ok(samples)
}

fn read_binary(
    data: &[u8],
    header: &RawHeader,
    count: usize,
    stop: &dyn Stop,
) -> Result<Vec<u32>, NetpbmError> {
    let mut scanner = Scanner::new(data, header.data_offset);
    scanner.skip_separator();
    let pixel_data = scanner.rest();

    let bytes_per_sample = header.bytes_per_sample();
    let needed = count
        .checked_mul(bytes_per_sample)
        .ok_or(NetpbmError::DimensionsTooLarge {
            width: header.width,
            height: header.height,
        })?;
    if pixel_data.len() < needed {
        return Err(NetpbmError::TruncatedPixelData {
            needed,
            actual: pixel_data.len(),
        });
    }

    log::trace!(
        "{} raster: {count} samples, {bytes_per_sample} byte(s) each",
        header.format
    );

    let row_bytes = header.row_samples() * bytes_per_sample;
    let mut samples = Vec::with_capacity(count);
    for (row_idx, row) in pixel_data[..needed].chunks_exact(row_bytes).enumerate() {
        if row_idx % 16 == 0 {
            stop.check()?;
        }
        if bytes_per_sample == 1 {
            samples.extend(row.iter().map(|&b| u32::from(b)));
        } else {
            samples.extend(
                row.chunks_exact(2)
                    .map(|pair| u32::from(u16::from_be_bytes([pair[0], pair[1]]))),
            );
        }
    }

    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pnm::scan::parse_header;
    use alloc::vec;
    use enough::Unstoppable;

    fn samples_of(data: &[u8]) -> Result<Vec<u32>, NetpbmError> {
        let header = parse_header(data)?.expect("netpbm magic");
        read_samples(data, &header, &Unstoppable)
    }

    #[test]
    fn ascii_samples_with_comments() {
        let got = samples_of(b"P2\n2 2\n15\n0 # first\n7\r\n\t15 3\n").unwrap();
        assert_eq!(got, vec![0, 7, 15, 3]);
    }

    #[test]
    fn ascii_samples_ignore_trailing_tokens() {
        let got = samples_of(b"P2 1 1 255 9 junk").unwrap();
        assert_eq!(got, vec![9]);
    }

    #[test]
    fn ascii_runs_out() {
        let err = samples_of(b"P3\n1 2\n255\n1 2 3 4 5\n").unwrap_err();
        assert!(matches!(
            err,
            NetpbmError::UnexpectedEof {
                read: 5,
                expected: 6
            }
        ));
    }

    #[test]
    fn ascii_non_numeric() {
        let err = samples_of(b"P2\n2 1\n255\n12 1x\n").unwrap_err();
        match err {
            NetpbmError::NonNumericSample(token) => assert_eq!(token, "1x"),
            other => panic!("expected NonNumericSample, got {other:?}"),
        }
    }

    #[test]
    fn binary_one_byte_samples() {
        let got = samples_of(b"P6\n1 1\n255\n\x0a\x14\x1e").unwrap();
        assert_eq!(got, vec![10, 20, 30]);
    }

    #[test]
    fn binary_width_switches_above_255() {
        let got = samples_of(b"P5\n1 1\n256\n\x01\x00").unwrap();
        assert_eq!(got, vec![256]);
        let got = samples_of(b"P5\n1 1\n65535\n\x01\x00").unwrap();
        assert_eq!(got, vec![256]);
    }

    #[test]
    fn binary_separator_is_single_byte() {
        // The second newline is sample data.
        let got = samples_of(b"P5\n2 1\n255\n\n\x07").unwrap();
        assert_eq!(got, vec![10, 7]);
    }

    #[test]
    fn binary_separator_comment_line() {
        let got = samples_of(b"P5\n2 1\n255# raster\n\x01\x02").unwrap();
        assert_eq!(got, vec![1, 2]);
    }

    #[test]
    fn binary_truncated() {
        let err = samples_of(b"P5\n2 2\n65535\n\x00\x01\x00").unwrap_err();
        assert!(matches!(
            err,
            NetpbmError::TruncatedPixelData {
                needed: 8,
                actual: 3
            }
        ));
    }

    #[test]
    fn binary_missing_separator() {
        let err = samples_of(b"P6\n1 1\n255").unwrap_err();
        assert!(matches!(
            err,
            NetpbmError::TruncatedPixelData {
                needed: 3,
                actual: 0
            }
        ));
    }
}
