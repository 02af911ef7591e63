#![no_main]
use libfuzzer_sys::fuzz_target;

use nbtree::{to_bytes, Compression, ReadOpts, Reader};

fuzz_target!(|data: &[u8]| {
    let compression = Compression::detect(data);
    let opts = ReadOpts::new().max_seq_len(100);

    let mut reader = Reader::with_opts(data, compression, opts);
    if let Ok((name, value)) = reader.read_named() {
        // Anything that was read must be writable again.
        to_bytes(&name, &value, Compression::None).unwrap();
    }
});
