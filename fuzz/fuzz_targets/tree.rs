#![no_main]
use libfuzzer_sys::fuzz_target;
use ruhuff::huff0::HuffmanTree;

fuzz_target!(|data: &[u8]| {
    if let Ok(tree) = HuffmanTree::rebuild(data) {
        assert_eq!(tree.dump(), data);
        let _ = tree.build_codes();
    }
});
