#![no_main]
use libfuzzer_sys::fuzz_target;

use nbtree::{from_bytes, to_bytes, Compression, Value};

fuzz_target!(|input: (String, Value)| {
    let (name, value) = input;

    for compression in [Compression::None, Compression::Gzip, Compression::Zlib] {
        // Names and strings past the u16 limit are rejected, not written.
        let bytes = match to_bytes(&name, &value, compression) {
            Ok(bytes) => bytes,
            Err(_) => return,
        };
        let (read_name, read_value) = from_bytes(&bytes, compression).unwrap();
        assert_eq!(read_name, name);
        assert_eq!(read_value, value);
    }
});
