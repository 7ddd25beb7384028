#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Some(bitmap) = jpeg_bitmap::image_from_data(data)
    {
        assert!(bitmap.width() > 0 && bitmap.height() > 0);
    }
    let _ = jpeg_bitmap::probe_header(data, 96);
});
