use crate::{pct_enc::table, uri::Meta};

/// Parses a URI reference into component bounds.
///
/// Parsing never fails: component boundaries are found by a single
/// forward scan and the components themselves are not validated.
pub(crate) fn parse(bytes: &[u8]) -> Meta {
    let mut parser = Parser {
        bytes,
        pos: 0,
        out: Meta::default(),
    };
    parser.parse_from_scheme();
    parser.out
}

/// URI parser.
///
/// # Invariants
///
/// `pos <= len`, `pos` is non-decreasing and on the boundary of a UTF-8 code point.
///
/// All output bounds are within `0..=len`, correctly ordered and on the boundary
/// of a UTF-8 code point, since every delimiter looked for is ASCII.
struct Parser<'a> {
    bytes: &'a [u8],
    pos: usize,
    out: Meta,
}

impl Parser<'_> {
    fn len(&self) -> usize {
        self.bytes.len()
    }

    fn peek(&self, i: usize) -> Option<u8> {
        self.bytes.get(self.pos + i).copied()
    }

    fn skip(&mut self, n: usize) {
        // INVARIANT: `pos` is non-decreasing.
        self.pos += n;
        debug_assert!(self.pos <= self.len());
    }

    fn read_str(&mut self, s: &str) -> bool {
        if self.bytes[self.pos..].starts_with(s.as_bytes()) {
            self.skip(s.len());
            true
        } else {
            false
        }
    }

    /// Returns the index of the first byte at or after `pos` that is
    /// one of `delims`, or the end of input.
    fn find_any(&self, delims: &[u8]) -> usize {
        self.bytes[self.pos..]
            .iter()
            .position(|x| delims.contains(x))
            .map_or(self.len(), |i| self.pos + i)
    }

    fn parse_from_scheme(&mut self) {
        if matches!(self.bytes.first(), Some(x) if x.is_ascii_alphabetic()) {
            let mut i = 1;
            while i < self.len() && table::SCHEME.allows_ascii(self.bytes[i]) {
                i += 1;
            }
            if self.bytes.get(i) == Some(&b':') {
                self.out.scheme = Some((0, i));
                // INVARIANT: Skipping the scheme and ":" is fine.
                self.skip(i + 1);
            }
            // Otherwise this is a relative reference and we start over.
        }

        if self.read_str("//") {
            self.parse_authority();
        }
        self.parse_from_path();
    }

    fn parse_authority(&mut self) {
        let start = self.pos;
        let end = self.find_any(b"#?/");
        self.out.authority = Some((start, end));

        let auth = &self.bytes[start..end];
        if let Some(at) = auth.iter().rposition(|&x| x == b'@') {
            let username_end = auth[..at].iter().position(|&x| x == b':').unwrap_or(at);
            self.out.userinfo = Some((start, start + at));
            self.out.username = Some((start, start + username_end));
            // INVARIANT: Skipping the userinfo and "@" is fine.
            self.skip(at + 1);
        }

        let host_start = self.pos;
        let mut port_start = end;
        while port_start > host_start && self.bytes[port_start - 1].is_ascii_digit() {
            port_start -= 1;
        }

        if port_start > host_start && self.bytes[port_start - 1] == b':' {
            self.out.host = Some((host_start, port_start - 1));
            self.out.port = Some((port_start, end));
        } else {
            self.out.host = Some((host_start, end));
        }

        // INVARIANT: `end` is not less than `pos`.
        self.pos = end;
    }

    fn parse_from_path(&mut self) {
        let path_start = self.pos;
        let path_end = self.find_any(b"?#");
        if path_end > path_start {
            self.out.path = Some((path_start, path_end));
        }
        self.pos = path_end;

        if self.read_str("?") {
            let query_start = self.pos;
            let query_end = self.find_any(b"#");
            self.out.query = Some((query_start, query_end));
            self.pos = query_end;
        }

        if self.read_str("#") {
            self.out.fragment = Some((self.pos, self.len()));
            self.pos = self.len();
        }

        debug_assert_eq!(self.peek(0), None);
    }
}
