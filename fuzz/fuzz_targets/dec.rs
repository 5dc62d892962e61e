#![no_main]
use lenient_uri::pct_enc;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let bytes = pct_enc::unescape_to_bytes(data);
    match pct_enc::unescape(data) {
        Ok(s) => assert_eq!(s, String::from_utf8_lossy(&bytes.unwrap())),
        Err(e) => {
            assert!(e.index().unwrap() < data.len().max(1));
            assert_eq!(Err(e), bytes);
        }
    }
});
