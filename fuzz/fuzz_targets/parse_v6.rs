#![no_main]
use lenient_uri::validate;
use libfuzzer_sys::fuzz_target;
use std::net::Ipv6Addr;
use std::str::FromStr;

fuzz_target!(|data: &str| {
    assert_eq!(validate::parse_ipv6(data), Ipv6Addr::from_str(data).ok());
});
