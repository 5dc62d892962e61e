#![no_main]
use lenient_uri::pct_enc::{self, table};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let encoded = pct_enc::escape_bytes(data, table::QUERY);
    assert!(table::QUERY.or_pct_encoded().validate(encoded.as_bytes()));
    assert_eq!(data, &*pct_enc::unescape_to_bytes(&encoded).unwrap());

    if let Ok(s) = std::str::from_utf8(data) {
        let encoded = pct_enc::escape(s, table::SEGMENT);
        assert_eq!(s, pct_enc::unescape(&encoded).unwrap());
        assert!(encoded.bytes().all(|x| x == b'%' || table::SEGMENT.allows_ascii(x)));
    }
});
