#![no_main]
use libfuzzer_sys::fuzz_target;
use std::io::Read;

fuzz_target!(|data: &[u8]| {
    if let Ok(decoder) = ruhuff::StreamingDecoder::new(data) {
        // a forged file_size must not make us decode forever
        let mut output = Vec::new();
        _ = decoder.take(1 << 20).read_to_end(&mut output);
    }
});
