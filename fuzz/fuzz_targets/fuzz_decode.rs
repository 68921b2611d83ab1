#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Bytes, header probe and the text path must never panic
    let _ = zennetpbm::decode(data);
    let _ = zennetpbm::probe(data);
    if let Ok(text) = core::str::from_utf8(data) {
        let _ = zennetpbm::parse_text(text);
    }
});
