#![no_main]

use libfuzzer_sys::fuzz_target;
use witr::ancestry::parse_stat;
use witr::file_context::limits::parse_soft_file_limit;
use witr::file_context::locks::locked_files;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        // None of the procfs parsers may panic on arbitrary content
        let _ = parse_soft_file_limit(input);
        let _ = parse_stat(1, input);

        let files = locked_files(input, 1);
        let mut unique = files.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), files.len());
    }
});
