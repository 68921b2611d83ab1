//! Header and token scanner.
//!
//! Whitespace is space, tab, LF and CR. A `#` starts a comment that runs to
//! the next LF or CR. Everything else forms tokens.

use alloc::format;
use alloc::string::String;

use super::{NetpbmFormat, RawHeader};
use crate::error::NetpbmError;

#[inline]
fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}

#[inline]
fn is_line_end(b: u8) -> bool {
    matches!(b, b'\n' | b'\r')
}

/// Single-use cursor over an input buffer.
pub(crate) struct Scanner<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Scanner<'a> {
    pub(crate) fn new(data: &'a [u8], pos: usize) -> Self {
        Self {
            data,
            pos: pos.min(data.len()),
        }
    }

    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    /// Bytes not yet consumed.
    pub(crate) fn rest(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }

    /// Consume a comment starting at `#`, including its line terminator.
    fn skip_comment(&mut self) {
        match self.rest().iter().position(|&b| is_line_end(b)) {
            Some(end) => self.pos += end + 1,
            None => self.pos = self.data.len(),
        }
    }

    fn skip_whitespace_and_comments(&mut self) {
        while let Some(&b) = self.data.get(self.pos) {
            if is_whitespace(b) {
                self.pos += 1;
            } else if b == b'#' {
                self.skip_comment();
            } else {
                break;
            }
        }
    }

    /// Next maximal run of non-whitespace, non-`#` bytes, or `None` at end of input.
    pub(crate) fn next_token(&mut self) -> Option<&'a [u8]> {
        self.skip_whitespace_and_comments();
        let rest = self.rest();
        let len = rest
            .iter()
            .position(|&b| is_whitespace(b) || b == b'#')
            .unwrap_or(rest.len());
        if len == 0 {
            return None;
        }
        self.pos += len;
        Some(&rest[..len])
    }

    /// Consume the separator between a binary header and its raster: one
    /// whitespace byte, or one whole comment line.
    pub(crate) fn skip_separator(&mut self) {
        match self.data.get(self.pos) {
            Some(&b'#') => self.skip_comment(),
            Some(&b) if is_whitespace(b) => self.pos += 1,
            _ => {}
        }
    }
}

/// Parse an unsigned decimal token. Only ASCII digits are accepted; signs,
/// fractions and values past `u32::MAX` yield `None`.
pub(crate) fn parse_u32(token: &[u8]) -> Option<u32> {
    if token.is_empty() {
        return None;
    }
    token.iter().try_fold(0u32, |acc, &b| {
        if !b.is_ascii_digit() {
            return None;
        }
        acc.checked_mul(10)?.checked_add(u32::from(b - b'0'))
    })
}

pub(crate) fn lossy(token: &[u8]) -> String {
    String::from_utf8_lossy(token).into_owned()
}

fn header_field(scanner: &mut Scanner<'_>, name: &str) -> Result<u32, NetpbmError> {
    let token = scanner
        .next_token()
        .ok_or_else(|| NetpbmError::InvalidHeader(format!("missing {name}")))?;
    parse_u32(token).ok_or_else(|| {
        NetpbmError::InvalidHeader(format!("{name} is not a number: {:?}", lossy(token)))
    })
}

/// Scan the magic number and the width, height and max value tokens.
///
/// Returns `Ok(None)` when the first two bytes are not a supported magic.
pub(crate) fn parse_header(data: &[u8]) -> Result<Option<RawHeader>, NetpbmError> {
    let [m0, m1, _, ..] = *data else {
        return Err(NetpbmError::FileTooSmall { len: data.len() });
    };
    let Some(format) = NetpbmFormat::from_magic([m0, m1]) else {
        return Ok(None);
    };

    let mut scanner = Scanner::new(data, 2);
    let width = header_field(&mut scanner, "width")?;
    let height = header_field(&mut scanner, "height")?;
    let maxval = header_field(&mut scanner, "max value")?;

    if width == 0 {
        return Err(NetpbmError::InvalidHeader("zero width".into()));
    }
    if height == 0 {
        return Err(NetpbmError::InvalidHeader("zero height".into()));
    }
    if maxval == 0 {
        return Err(NetpbmError::InvalidMaxval(maxval));
    }

    log::debug!("{format} header: {width}x{height}, max value {maxval}");

    Ok(Some(RawHeader {
        format,
        width,
        height,
        maxval,
        data_offset: scanner.position(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn tokens(data: &[u8]) -> Vec<&[u8]> {
        let mut scanner = Scanner::new(data, 0);
        core::iter::from_fn(|| scanner.next_token()).collect()
    }

    #[test]
    fn tokens_split_on_whitespace_and_comments() {
        let got = tokens(b"  12\t34\r\n# note 99\r56#tail\n78");
        assert_eq!(got, [&b"12"[..], b"34", b"56", b"78"]);
    }

    #[test]
    fn comment_ends_at_carriage_return() {
        assert_eq!(tokens(b"#abc\r7"), [&b"7"[..]]);
    }

    #[test]
    fn comment_at_end_of_input() {
        assert_eq!(tokens(b"5 # trailing"), [&b"5"[..]]);
    }

    #[test]
    fn parse_u32_is_strict() {
        assert_eq!(parse_u32(b"0"), Some(0));
        assert_eq!(parse_u32(b"4294967295"), Some(u32::MAX));
        assert_eq!(parse_u32(b"4294967296"), None);
        assert_eq!(parse_u32(b"+5"), None);
        assert_eq!(parse_u32(b"-1"), None);
        assert_eq!(parse_u32(b"1.5"), None);
        assert_eq!(parse_u32(b"0x10"), None);
        assert_eq!(parse_u32(b""), None);
    }

    #[test]
    fn separator_is_one_byte() {
        let mut scanner = Scanner::new(b"\n\nXY", 0);
        scanner.skip_separator();
        assert_eq!(scanner.rest(), b"\nXY");
    }

    #[test]
    fn separator_comment_line() {
        let mut scanner = Scanner::new(b"# raster follows\n\x00\x01", 0);
        scanner.skip_separator();
        assert_eq!(scanner.rest(), b"\x00\x01");
    }

    #[test]
    fn header_with_comments_matches_plain() {
        let plain = parse_header(b"P5 3 2 255\n").unwrap().unwrap();
        let commented = parse_header(b"P5\r\n# made by hand\n3# w\r2\n#max\n255\n")
            .unwrap()
            .unwrap();
        assert_eq!(plain.format, commented.format);
        assert_eq!(
            (plain.width, plain.height, plain.maxval),
            (commented.width, commented.height, commented.maxval)
        );
    }

    #[test]
    fn data_offset_stops_after_max_value() {
        let header = parse_header(b"P6\n1 1\n255\nabc").unwrap().unwrap();
        assert_eq!(header.data_offset, 10);
    }

    #[test]
    fn short_input() {
        assert!(matches!(
            parse_header(b"XY"),
            Err(NetpbmError::FileTooSmall { len: 2 })
        ));
        assert!(matches!(
            parse_header(b""),
            Err(NetpbmError::FileTooSmall { len: 0 })
        ));
    }

    #[test]
    fn unknown_magic_is_not_an_error() {
        assert!(parse_header(b"P9\n1 1\n255\n").unwrap().is_none());
        assert!(parse_header(b"P1\n1 1\n").unwrap().is_none());
        assert!(parse_header(b"\x89PNG\r\n").unwrap().is_none());
    }

    #[test]
    fn header_failures() {
        assert!(matches!(
            parse_header(b"P2\n2\n"),
            Err(NetpbmError::InvalidHeader(_))
        ));
        assert!(matches!(
            parse_header(b"P2\nw 2 255\n"),
            Err(NetpbmError::InvalidHeader(_))
        ));
        assert!(matches!(
            parse_header(b"P2\n0 2 255\n"),
            Err(NetpbmError::InvalidHeader(_))
        ));
        assert!(matches!(
            parse_header(b"P5\n2 2\n0\n"),
            Err(NetpbmError::InvalidMaxval(0))
        ));
        assert!(matches!(
            parse_header(b"P5\n2 2\n-1\n"),
            Err(NetpbmError::InvalidHeader(_))
        ));
    }
}
