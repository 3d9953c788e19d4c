#![no_main]

use blobstream::decode_data_url;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|url: &str| {
    // Must never panic; payload after the first comma either decodes or errors
    let _ = decode_data_url(url);
});
