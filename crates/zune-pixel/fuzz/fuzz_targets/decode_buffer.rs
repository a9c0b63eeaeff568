#![no_main]

use libfuzzer_sys::fuzz_target;
use zune_core::options::DecoderOptions;

fuzz_target!(|data: &[u8]| {
    // background streams may describe any size in a few bytes
    let options = DecoderOptions::default()
        .set_max_width(4096)
        .set_max_height(4096)
        .set_strict_mode(false);
    let mut decoder = zune_pixel::PixelDecoder::new_with_options(data, options);
    let _ = decoder.decode();
});
