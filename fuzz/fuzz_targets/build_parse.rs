#![no_main]
use lenient_uri::{Uri, UriBuilder};
use libfuzzer_sys::{
    arbitrary::{self, Arbitrary},
    fuzz_target,
};

#[derive(Arbitrary, Debug)]
enum Path<'a> {
    Raw(&'a str, bool),
    Segments(Vec<&'a str>),
}

#[derive(Arbitrary, Debug)]
enum Query<'a> {
    Raw(&'a str, bool),
    Pairs(Vec<(&'a str, &'a str)>),
}

#[derive(Arbitrary, Debug)]
struct UriComponents<'a> {
    scheme: Option<&'a str>,
    credentials: Option<(&'a str, &'a str)>,
    host: Option<(&'a str, bool)>,
    port: Option<i32>,
    path: Option<Path<'a>>,
    query: Option<Query<'a>>,
    fragment: Option<(&'a str, bool)>,
}

fuzz_target!(|c: UriComponents<'_>| {
    let mut b = UriBuilder::new();

    let mut scheme_set = false;
    if let Some(scheme) = c.scheme {
        let before = b.clone();
        match b.scheme(scheme) {
            Ok(_) => scheme_set = true,
            Err(_) => assert_eq!(b, before),
        }
    }
    if let Some((username, password)) = c.credentials {
        b.credentials(username, password);
    }
    if let Some((host, encode)) = c.host {
        let before = b.clone();
        if b.host(host, encode).is_err() {
            assert_eq!(b, before);
        }
    }
    if let Some(port) = c.port {
        let before = b.clone();
        match b.port(port) {
            Ok(_) => assert!((0..=65535).contains(&port)),
            Err(_) => assert_eq!(b, before),
        }
    }
    match c.path {
        Some(Path::Raw(path, escape)) => {
            b.raw_path(path, escape);
        }
        Some(Path::Segments(segments)) => {
            for segment in segments {
                b.path_segment(segment);
            }
        }
        None => {}
    }
    match c.query {
        Some(Query::Raw(query, escape)) => {
            b.raw_query(query, escape);
        }
        Some(Query::Pairs(pairs)) => {
            for (key, value) in pairs {
                b.query_param(key, value);
            }
        }
        None => {}
    }
    if let Some((fragment, escape)) = c.fragment {
        b.fragment(fragment, escape);
    }

    let u1 = b.build();
    let u2 = Uri::parse(u1.as_str());

    assert_eq!(u1.raw_scheme(), u2.raw_scheme());
    assert_eq!(u1.raw_authority(), u2.raw_authority());
    assert_eq!(u1.raw_userinfo(), u2.raw_userinfo());
    assert_eq!(u1.raw_username(), u2.raw_username());
    assert_eq!(u1.raw_host(), u2.raw_host());
    assert_eq!(u1.raw_port(), u2.raw_port());
    assert_eq!(u1.raw_path(), u2.raw_path());
    assert_eq!(u1.raw_query(), u2.raw_query());
    assert_eq!(u1.raw_fragment(), u2.raw_fragment());

    if scheme_set {
        assert!(u1.raw_scheme().unwrap().bytes().all(|x| !x.is_ascii_uppercase()));
    }
    if let Some((username, _)) = c.credentials {
        assert_eq!(u1.username().unwrap().as_deref(), Some(username));
    }

    // A path may read back as a scheme or an authority, which
    // `to_builder` then normalizes once.
    let rebuilt = u1.to_builder().build();
    assert_eq!(rebuilt.raw_query(), u1.raw_query());
    assert_eq!(rebuilt.raw_fragment(), u1.raw_fragment());
    assert_eq!(rebuilt.to_builder().build(), rebuilt);
});
