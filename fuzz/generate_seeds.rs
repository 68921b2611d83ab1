#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn main() {
    use std::fs;
    for dir in ["fuzz/corpus/fuzz_decode", "fuzz/corpus/fuzz_roundtrip"] {
        fs::create_dir_all(dir).unwrap();

        // PGM ASCII 2x2
        fs::write(format!("{dir}/p2_2x2.pgm"), b"P2\n2 2\n255\n0 64 128 255\n").unwrap();

        // PPM ASCII 2x1 with comments and maxval 15
        let p3 = b"P3\n# hand written\n2 1\n15\n15 0 0 # red\n0 7 15\n";
        fs::write(format!("{dir}/p3_2x1.ppm"), p3).unwrap();

        // PGM binary 3x2
        fs::write(format!("{dir}/p5_3x2.pgm"), b"P5\n3 2\n255\n\x00\x40\x80\xc0\xff\x64").unwrap();

        // PPM binary 1x1, 16-bit
        fs::write(format!("{dir}/p6_16bit.ppm"), b"P6\n1 1\n65535\n\xff\xff\x01\x00\x80\x00").unwrap();

        // Truncated/malformed seeds for edge coverage
        fs::write(format!("{dir}/empty.bin"), b"").unwrap();
        fs::write(format!("{dir}/just_p6.bin"), b"P6").unwrap();
        fs::write(format!("{dir}/zero_max.bin"), b"P5\n2 2\n0\n").unwrap();
        fs::write(format!("{dir}/p2_short.bin"), b"P2\n2 2\n255\n1 2 3\n").unwrap();
        fs::write(format!("{dir}/p9.bin"), b"P9\n1 1\n255\n0\n").unwrap();

        println!("Generated seed corpus in {dir}/");
    }
}
