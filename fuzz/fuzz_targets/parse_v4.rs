#![no_main]
use lenient_uri::validate;
use libfuzzer_sys::fuzz_target;
use std::net::Ipv4Addr;
use std::str::FromStr;

fuzz_target!(|data: &str| {
    assert_eq!(validate::parse_ipv4(data), Ipv4Addr::from_str(data).ok());
    assert_eq!(validate::is_ipv4(data), Ipv4Addr::from_str(data).is_ok());
});
