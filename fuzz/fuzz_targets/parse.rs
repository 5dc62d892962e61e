#![no_main]
use lenient_uri::Uri;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let r = Uri::parse(data);
    let mut buf = String::with_capacity(data.len());
    if let Some(s) = r.raw_scheme() {
        buf.push_str(s);
        buf.push(':');
    }
    if let Some(a) = r.raw_authority() {
        buf.push_str("//");
        let start = buf.len();
        if let Some(ui) = r.raw_userinfo() {
            assert!(ui.starts_with(r.raw_username().unwrap()));
            buf.push_str(ui);
            buf.push('@');
        }
        buf.push_str(r.raw_host().unwrap());
        if let Some(p) = r.raw_port() {
            assert!(p.bytes().all(|x| x.is_ascii_digit()));
            buf.push(':');
            buf.push_str(p);
        }
        assert_eq!(&buf[start..], a);
    }
    if let Some(p) = r.raw_path() {
        assert!(!p.is_empty());
        buf.push_str(p);
    }
    if let Some(q) = r.raw_query() {
        buf.push('?');
        buf.push_str(q);
    }
    if let Some(f) = r.raw_fragment() {
        buf.push('#');
        buf.push_str(f);
    }
    assert_eq!(data, buf);
    assert_eq!(r.to_string(), data);
});
