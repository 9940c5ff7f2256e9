#![no_main]

use libfuzzer_sys::fuzz_target;
use pts_invoice::core::normalize_text;

fuzz_target!(|s: &str| {
    let once = normalize_text(s);
    assert_eq!(normalize_text(&once), once);
});
