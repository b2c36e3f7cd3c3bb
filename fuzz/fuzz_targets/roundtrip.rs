#![no_main]
use libfuzzer_sys::fuzz_target;
use ruhuff::decoding::decode_all_to_vec;
use ruhuff::encoding::compress_to_vec;

fuzz_target!(|data: &[u8]| {
    let compressed = compress_to_vec(data);
    let decoded = decode_all_to_vec(&compressed).unwrap();
    assert_eq!(data, decoded.as_slice());
});
