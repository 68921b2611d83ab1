//! Editable ASCII form.
//!
//! Any decoded image is written out as P2 or P3 with max value 255 and two
//! comment lines recording where it came from. Parsing goes back through the
//! regular decoder, so line layout and comments in edited text don't matter.

use alloc::format;
use alloc::string::String;
use enough::Stop;

use super::NetpbmFormat;
use crate::decode::DecodedImage;
use crate::error::NetpbmError;
use crate::limits::Limits;

const GRAY_SAMPLES_PER_LINE: usize = 20;
// 4 pixels
const RGB_SAMPLES_PER_LINE: usize = 12;

fn push_decimal(out: &mut String, v: u8) {
    if v >= 100 {
        out.push(char::from(b'0' + v / 100));
    }
    if v >= 10 {
        out.push(char::from(b'0' + v / 10 % 10));
    }
    out.push(char::from(b'0' + v % 10));
}

/// Serialize as ASCII P2 (grayscale) or P3 (RGB).
pub(crate) fn encode_text(image: &DecodedImage) -> String {
    let source = image.format();
    let target = source.ascii_counterpart();
    let channels = target.channels();
    let per_line = match target {
        NetpbmFormat::P2 | NetpbmFormat::P5 => GRAY_SAMPLES_PER_LINE,
        NetpbmFormat::P3 | NetpbmFormat::P6 => RGB_SAMPLES_PER_LINE,
    };

    let encoding = if source.is_ascii() { "ASCII" } else { "binary" };
    let max_note = match image.source_max_value() {
        255 => String::from("# Max value: 255"),
        m => format!("# Source max value: {m}, rescaled to 255"),
    };
    let header = format!(
        "{target}\n# Source format: {source} ({encoding})\n{max_note}\n{} {}\n255\n",
        image.width(),
        image.height(),
    );

    let sample_count = image.pixels().len() / 4 * channels;
    let mut out = String::with_capacity(header.len() + sample_count * 4);
    out.push_str(&header);

    let samples = image
        .pixels()
        .chunks_exact(4)
        .flat_map(|px| px[..channels].iter().copied());
    let mut on_line = 0;
    for v in samples {
        if on_line > 0 {
            out.push(' ');
        }
        push_decimal(&mut out, v);
        on_line += 1;
        if on_line == per_line {
            out.push('\n');
            on_line = 0;
        }
    }
    if on_line > 0 {
        out.push('\n');
    }

    log::trace!(
        "encoded {source} {}x{} as {target}: {} bytes",
        image.width(),
        image.height(),
        out.len()
    );
    out
}

/// Decode text that must be P2 or P3.
pub(crate) fn parse_text(
    text: &[u8],
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<DecodedImage, NetpbmError> {
    match super::decode(text, limits, stop)? {
        Some(image) if image.format().is_ascii() => Ok(image),
        Some(image) => {
            log::debug!("rejecting {} for text editing", image.format());
            Err(NetpbmError::NotEditable)
        }
        None => {
            log::debug!("rejecting text without a P2/P3 magic number");
            Err(NetpbmError::NotEditable)
        }
    }
}
