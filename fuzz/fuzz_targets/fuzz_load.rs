#![no_main]

use libfuzzer_sys::fuzz_target;
use rlekit::{decompress, read_from, write_to};
use std::io::Cursor;

fuzz_target!(|data: &[u8]| {
    // Loading may fail on arbitrary input - that's OK
    // We're looking for panics/crashes, not errors
    let Ok(loaded) = read_from(Cursor::new(data)) else {
        return;
    };

    // Anything that loads must decode and re-serialize to the bytes consumed
    let decoded = decompress(&loaded).expect("loaded data must decode");
    assert_eq!(decoded.len(), loaded.decompressed_size());

    let mut encoded = Vec::new();
    write_to(&loaded, &mut encoded).expect("write");
    assert_eq!(&data[..encoded.len()], &encoded[..]);
});
