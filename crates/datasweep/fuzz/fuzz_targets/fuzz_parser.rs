//! Fuzz target for the upload parsers.
//!
//! Feeds arbitrary bytes to both the CSV and the spreadsheet reader. Neither
//! may panic, and any table that parses must encode back to both formats.

#![no_main]

use datasweep::output::{encode_csv, encode_xlsx};
use datasweep::{FileFormat, Parser};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Only process reasonable-sized inputs to avoid OOM
    if data.len() > 100_000 {
        return;
    }

    let parser = Parser::new();
    for format in [FileFormat::Csv, FileFormat::Spreadsheet] {
        if let Ok(table) = parser.parse(data, format) {
            let _ = encode_csv(&table);
            let _ = encode_xlsx(&table);
        }
    }
});
