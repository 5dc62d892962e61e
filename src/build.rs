//! URI reference building.

use crate::{
    error::{BuildError, BuildErrorKind},
    pct_enc::{self, table, Table},
    validate, Uri,
};
use borrow_or_share::Bos;

/// Segment characters without `':'`, for the second segment of a path
/// emitted without a scheme.
const SEGMENT_NO_COLON: Table = table::SEGMENT.sub(Table::new(b":"));

/// The path held by a [`UriBuilder`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PathPart {
    /// A whole path, already in its final encoded form.
    Raw(String),
    /// Unencoded path segments, encoded and joined with `'/'` when building.
    Segments(Vec<String>),
}

/// The query held by a [`UriBuilder`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QueryPart {
    /// A whole query, already in its final encoded form.
    Raw(String),
    /// Encoded `key=value` pairs, joined with `'&'` when building.
    Pairs(Vec<String>),
}

/// A builder for URI references.
///
/// Components may be set in any order and any number of times; the last
/// call wins. Setters that validate their argument return a [`BuildError`]
/// on rejection and leave the builder untouched.
///
/// [`build`] assembles the components into a string and parses it,
/// so the result is always reproducible by parsing its own string.
///
/// [`build`]: Self::build
///
/// # Examples
///
/// ```
/// use lenient_uri::UriBuilder;
///
/// let uri = UriBuilder::new()
///     .scheme("http")?
///     .host("Example.com", true)?
///     .port(8080)?
///     .path_segment("a")
///     .path_segment("b/c")
///     .query_param("name", "张三")
///     .build();
///
/// assert_eq!(uri.as_str(), "http://example.com:8080/a/b%2Fc?name=%E5%BC%A0%E4%B8%89");
/// assert_eq!(uri.port(), Some(8080));
/// # Ok::<_, lenient_uri::BuildError>(())
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UriBuilder {
    scheme: String,
    userinfo: Option<String>,
    host: Option<String>,
    port: Option<u16>,
    path: Option<PathPart>,
    query: Option<QueryPart>,
    fragment: Option<String>,
}

fn reject(e: BuildError) -> BuildError {
    tracing::debug!("rejected builder argument: {e}");
    e
}

impl UriBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder holding the raw components of a URI reference.
    ///
    /// No component is validated or re-encoded. A port that is empty
    /// or does not fit in a `u16` is dropped.
    #[must_use]
    pub fn from_uri<T: Bos<str>>(uri: &Uri<T>) -> Self {
        Self {
            scheme: uri.scheme().map(Into::into).unwrap_or_default(),
            userinfo: uri.raw_userinfo().map(Into::into),
            host: uri.raw_host().map(Into::into),
            port: uri.port(),
            path: uri.raw_path().map(|p| PathPart::Raw(p.into())),
            query: uri.raw_query().map(|q| QueryPart::Raw(q.into())),
            fragment: uri.raw_fragment().map(Into::into),
        }
    }

    /// Sets the scheme, in lowercase.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the scheme is empty, does not start with a letter,
    /// or contains a character other than letters, digits, `'+'`, `'-'` and `'.'`.
    pub fn scheme(&mut self, scheme: &str) -> Result<&mut Self, BuildError> {
        let bytes = scheme.as_bytes();
        let invalid = match bytes.first() {
            None => Some(BuildError::new(scheme, BuildErrorKind::InvalidScheme)),
            Some(x) if !x.is_ascii_alphabetic() => {
                Some(BuildError::new(scheme, BuildErrorKind::InvalidScheme).at(0))
            }
            Some(_) => bytes
                .iter()
                .position(|&x| !table::SCHEME.allows_ascii(x))
                .map(|i| BuildError::new(scheme, BuildErrorKind::InvalidScheme).at(i)),
        };
        if let Some(e) = invalid {
            return Err(reject(e));
        }

        self.scheme = scheme.to_ascii_lowercase();
        Ok(self)
    }

    /// Sets the userinfo from a user name and a password.
    ///
    /// Both parts are percent-encoded separately, so that any `':'`
    /// in them is encoded, and then joined with `':'`.
    pub fn credentials(&mut self, username: &str, password: &str) -> &mut Self {
        let username = pct_enc::escape(username, table::USERNAME);
        let password = pct_enc::escape(password, table::USERNAME);
        self.userinfo = Some(format!("{username}:{password}"));
        self
    }

    /// Sets the userinfo, percent-encoding it if `escape` is `true`.
    pub fn userinfo(&mut self, userinfo: &str, escape: bool) -> &mut Self {
        self.userinfo = Some(encode_if(userinfo, table::USERINFO, escape));
        self
    }

    /// Sets the host.
    ///
    /// A host enclosed in brackets must be an IPv6 address or an IPvFuture
    /// literal and is kept verbatim. Any other host is lowercased and,
    /// if `encode` is `true`, percent-encoded. If `encode` is `false`,
    /// it must already be an IPv4 address or a registered name.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the host is empty, if a bracketed host is not a valid
    /// IP literal, or if an unencoded host is neither an IPv4 address nor
    /// a registered name.
    ///
    /// # Examples
    ///
    /// ```
    /// use lenient_uri::{BuildErrorKind, UriBuilder};
    ///
    /// let mut builder = UriBuilder::new();
    /// builder.host("[2001:DB8::7]", true)?;
    /// assert_eq!(builder.build(), "//[2001:DB8::7]");
    ///
    /// let e = builder.host("[zz]", true).unwrap_err();
    /// assert_eq!(e.kind(), BuildErrorKind::InvalidIpLiteral);
    /// assert_eq!(builder.build(), "//[2001:DB8::7]");
    /// # Ok::<_, lenient_uri::BuildError>(())
    /// ```
    pub fn host(&mut self, host: &str, encode: bool) -> Result<&mut Self, BuildError> {
        if host.is_empty() {
            return Err(reject(BuildError::new(host, BuildErrorKind::EmptyHost)));
        }

        let bracketed = host.strip_prefix('[').and_then(|s| s.strip_suffix(']'));
        let host = match bracketed {
            Some(literal) => {
                if !validate::is_ipv6(literal) && !validate::is_ipv_future(literal) {
                    return Err(reject(BuildError::new(
                        host,
                        BuildErrorKind::InvalidIpLiteral,
                    )));
                }
                host.to_owned()
            }
            None => {
                if !encode && !validate::is_ipv4(host) && !validate::is_reg_name(host) {
                    return Err(reject(BuildError::new(host, BuildErrorKind::InvalidHost)));
                }
                encode_if(&host.to_lowercase(), table::HOST, encode)
            }
        };

        self.host = Some(host);
        Ok(self)
    }

    /// Sets the port.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the port is not within `0..=65535`.
    pub fn port(&mut self, port: i32) -> Result<&mut Self, BuildError> {
        let port = u16::try_from(port).map_err(|_| {
            reject(BuildError::new(
                port.to_string(),
                BuildErrorKind::PortOutOfRange,
            ))
        })?;
        self.port = Some(port);
        Ok(self)
    }

    /// Appends a percent-encoded `key=value` pair to the query,
    /// replacing any query set with [`raw_query`].
    ///
    /// `'&'`, `'='` and `'+'` in the key and the value are encoded.
    ///
    /// [`raw_query`]: Self::raw_query
    pub fn query_param(&mut self, key: &str, value: &str) -> &mut Self {
        let pair = format!(
            "{}={}",
            pct_enc::escape(key, table::QUERY_ARG),
            pct_enc::escape(value, table::QUERY_ARG)
        );
        match &mut self.query {
            Some(QueryPart::Pairs(pairs)) => pairs.push(pair),
            query => *query = Some(QueryPart::Pairs(vec![pair])),
        }
        self
    }

    /// Sets the whole query, percent-encoding it if `escape` is `true`.
    ///
    /// This discards any pair added with [`query_param`].
    ///
    /// [`query_param`]: Self::query_param
    pub fn raw_query(&mut self, query: &str, escape: bool) -> &mut Self {
        self.query = Some(QueryPart::Raw(encode_if(query, table::QUERY, escape)));
        self
    }

    /// Appends a path segment, replacing any path set with [`raw_path`].
    ///
    /// The segment is percent-encoded when building, including any `'/'` in it.
    ///
    /// [`raw_path`]: Self::raw_path
    pub fn path_segment(&mut self, segment: &str) -> &mut Self {
        match &mut self.path {
            Some(PathPart::Segments(segments)) => segments.push(segment.to_owned()),
            path => *path = Some(PathPart::Segments(vec![segment.to_owned()])),
        }
        self
    }

    /// Sets the whole path, percent-encoding it if `escape` is `true`.
    ///
    /// This discards any segment added with [`path_segment`].
    ///
    /// [`path_segment`]: Self::path_segment
    pub fn raw_path(&mut self, path: &str, escape: bool) -> &mut Self {
        self.path = Some(PathPart::Raw(encode_if(path, table::PATH, escape)));
        self
    }

    /// Sets the fragment, percent-encoding it if `escape` is `true`.
    pub fn fragment(&mut self, fragment: &str, escape: bool) -> &mut Self {
        self.fragment = Some(encode_if(fragment, table::FRAGMENT, escape));
        self
    }

    /// Assembles the components and parses the result into a [`Uri`].
    ///
    /// The authority is emitted only if a userinfo or a host is set,
    /// in which case the path is given a leading `'/'`.
    /// Without a scheme, every `':'` in the second path segment is encoded.
    /// No other rewriting takes place, and the result is whatever parsing
    /// the assembled string yields.
    ///
    /// # Examples
    ///
    /// ```
    /// use lenient_uri::UriBuilder;
    ///
    /// let uri = UriBuilder::new().path_segment("a").path_segment("c:d").build();
    /// assert_eq!(uri.as_str(), "a/c%3Ad");
    /// assert!(!uri.has_scheme());
    /// ```
    #[must_use]
    pub fn build(&self) -> Uri<String> {
        let mut buf = String::new();

        if !self.scheme.is_empty() {
            buf.push_str(&self.scheme);
            buf.push(':');
        }

        let has_authority = self.userinfo.is_some() || self.host.is_some();
        if has_authority {
            buf.push_str("//");
            if let Some(userinfo) = &self.userinfo {
                buf.push_str(userinfo);
                buf.push('@');
            }
            if let Some(host) = &self.host {
                buf.push_str(host);
            }
            if let Some(port) = self.port {
                buf.push(':');
                buf.push_str(&port.to_string());
            }
        }

        match &self.path {
            Some(PathPart::Raw(path)) => {
                if has_authority && !path.starts_with('/') {
                    buf.push('/');
                }
                buf.push_str(path);
            }
            Some(PathPart::Segments(segments)) => {
                for (i, segment) in segments.iter().enumerate() {
                    if i > 0 || has_authority {
                        buf.push('/');
                    }
                    let table = if i == 1 && self.scheme.is_empty() {
                        SEGMENT_NO_COLON
                    } else {
                        table::SEGMENT
                    };
                    buf.push_str(&pct_enc::escape(segment, table));
                }
            }
            None => {}
        }

        match &self.query {
            Some(QueryPart::Raw(query)) => {
                buf.push('?');
                buf.push_str(query);
            }
            Some(QueryPart::Pairs(pairs)) => {
                buf.push('?');
                buf.push_str(&pairs.join("&"));
            }
            None => {}
        }

        if let Some(fragment) = &self.fragment {
            buf.push('#');
            buf.push_str(fragment);
        }

        tracing::trace!("built URI reference {buf}");
        Uri::parse(buf)
    }
}

fn encode_if(s: &str, table: Table, encode: bool) -> String {
    if encode {
        pct_enc::escape(s, table).into_owned()
    } else {
        s.to_owned()
    }
}
