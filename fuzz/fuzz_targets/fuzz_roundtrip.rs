#![no_main]
use libfuzzer_sys::fuzz_target;
use zennetpbm::*;

fuzz_target!(|data: &[u8]| {
    // Keep allocations bounded for forged headers
    let limits = Limits {
        max_pixels: Some(1 << 20),
        ..Default::default()
    };
    let Ok(Some(decoded)) = DecodeRequest::new(data)
        .with_limits(&limits)
        .decode(enough::Unstoppable)
    else {
        return;
    };

    // Editable text must parse back to the same pixels
    let text = encode_text(&decoded);
    let Ok(reparsed) = parse_text(&text) else {
        panic!("encoded text failed to parse");
    };

    assert_eq!(decoded.pixels(), reparsed.pixels(), "roundtrip pixel mismatch");
    assert_eq!(decoded.width(), reparsed.width());
    assert_eq!(decoded.height(), reparsed.height());
    assert_eq!(reparsed.format(), decoded.format().ascii_counterpart());

    // And re-encoding is a fixed point
    assert_eq!(encode_text(&reparsed), encode_text(&parse_text(&encode_text(&reparsed)).unwrap()));
});
