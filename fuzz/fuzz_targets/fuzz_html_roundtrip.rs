#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Parse → render → parse must not panic at any step.
        if let Ok(record) = pts_invoice::html::from_html(s) {
            if let Ok(markup) = pts_invoice::html::to_html(&record) {
                let _ = pts_invoice::html::from_html(&markup);
            }
        }
    }
});
