#![no_main]

use libfuzzer_sys::fuzz_target;
use pts_invoice::tabular::{IngestOptions, read_csv};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(ingested) = read_csv(s, &IngestOptions::default()) {
            let _ = pts_invoice::from_dataset(&ingested.dataset);
        }
    }
});
