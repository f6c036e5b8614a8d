#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes must parse or fail with a ParseError, never panic
    let text = String::from_utf8_lossy(data);
    if let Ok(set) = gcms_compare::report::parse_report("fuzz.csv", &text) {
        for record in &set.records {
            let _ = gcms_compare::normalize::normalize(record.identifier());
        }
    }
});
