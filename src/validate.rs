//! Host validators.
//!
//! All validators are pure predicates over a whole string slice.
//! To validate part of a string, slice it first:
//!
//! ```
//! use lenient_uri::validate;
//!
//! let host = "[2001:db8::7]";
//! assert!(validate::is_ipv6(&host[1..host.len() - 1]));
//! assert!(!validate::is_reg_name(host));
//! ```

use crate::pct_enc::{self, table};
use std::net::{Ipv4Addr, Ipv6Addr};

/// Checks whether the string is a registered name.
///
/// `reg-name = *( unreserved / pct-encoded / sub-delims )`
#[must_use]
pub fn is_reg_name(s: &str) -> bool {
    table::REG_NAME.validate(s.as_bytes())
}

/// Checks whether the string is an IPv4 address in dotted-decimal form.
///
/// Each of the four octets must be within `0..=255` and must not
/// have leading zeros.
#[must_use]
pub fn is_ipv4(s: &str) -> bool {
    parse_ipv4(s).is_some()
}

/// Checks whether the string is an IPv6 address, without brackets.
#[must_use]
pub fn is_ipv6(s: &str) -> bool {
    parse_ipv6(s).is_some()
}

/// Checks whether the string is an IPvFuture literal, without brackets.
///
/// `IPvFuture = "v" 1*HEXDIG "." 1*( unreserved / sub-delims / ":" )`
#[must_use]
pub fn is_ipv_future(s: &str) -> bool {
    let [b'v', rem @ ..] = s.as_bytes() else {
        return false;
    };
    let Some(dot) = rem.iter().position(|&x| x == b'.') else {
        return false;
    };
    let (ver, tail) = (&rem[..dot], &rem[dot + 1..]);
    !ver.is_empty()
        && table::HEXDIG.validate(ver)
        && !tail.is_empty()
        && table::IPV_FUTURE.validate(tail)
}

/// Parses an IPv4 address in dotted-decimal form.
#[must_use]
pub fn parse_ipv4(s: &str) -> Option<Ipv4Addr> {
    let mut reader = Reader::new(s.as_bytes());
    match reader.read_v4() {
        Some(addr) if !reader.has_remaining() => Some(addr.into()),
        _ => None,
    }
}

/// Parses an IPv6 address, without brackets.
///
/// An embedded IPv4 address is accepted in place of the last two groups.
#[must_use]
pub fn parse_ipv6(s: &str) -> Option<Ipv6Addr> {
    let mut reader = Reader::new(s.as_bytes());
    match reader.read_v6() {
        Some(segs) if !reader.has_remaining() => Some(segs.into()),
        _ => None,
    }
}

/// Reads an address from a host string that has already been sliced out
/// of a URI, so the end of `bytes` is the end of the literal and the caller
/// checks that nothing remains.
struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

enum Seg {
    // *1":" 1*4HEXDIG
    Normal(u16, bool),
    // "::"
    Ellipsis,
    // *1":" 1*3DIGIT "."
    MaybeV4(bool),
    // ":"
    SingleColon,
}

impl<'a> Reader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Reader { bytes, pos: 0 }
    }

    fn has_remaining(&self) -> bool {
        self.pos < self.bytes.len()
    }

    fn peek(&self, i: usize) -> Option<u8> {
        self.bytes.get(self.pos + i).copied()
    }

    fn skip(&mut self, n: usize) {
        self.pos += n;
        debug_assert!(self.pos <= self.bytes.len());
    }

    fn read_str(&mut self, s: &str) -> bool {
        if self.bytes[self.pos..].starts_with(s.as_bytes()) {
            self.skip(s.len());
            true
        } else {
            false
        }
    }

    fn read_v6(&mut self) -> Option<[u16; 8]> {
        let mut segs = [0; 8];
        let mut ellipsis_idx = 8;

        let mut i = 0;
        while i < 8 {
            match self.read_v6_segment() {
                Some(Seg::Normal(seg, colon)) => {
                    if colon == (i == 0 || i == ellipsis_idx) {
                        // Leading colon, triple colons, or no colon.
                        return None;
                    }
                    segs[i] = seg;
                    i += 1;
                }
                Some(Seg::Ellipsis) => {
                    if ellipsis_idx != 8 {
                        // Multiple ellipses.
                        return None;
                    }
                    ellipsis_idx = i;
                }
                Some(Seg::MaybeV4(colon)) => {
                    // The IPv4 tail takes the last two groups (`ls32`).
                    if i > 6 || colon == (i == 0 || i == ellipsis_idx) {
                        return None;
                    }
                    let octets = self.read_v4()?.to_be_bytes();
                    segs[i] = u16::from_be_bytes([octets[0], octets[1]]);
                    segs[i + 1] = u16::from_be_bytes([octets[2], octets[3]]);
                    i += 2;
                    break;
                }
                Some(Seg::SingleColon) => return None,
                None => break,
            }
        }

        if ellipsis_idx == 8 {
            // No ellipsis.
            if i != 8 {
                // Too short.
                return None;
            }
        } else if i == 8 {
            // Eliding nothing.
            return None;
        } else {
            // Shift the segments after the ellipsis to the right.
            for j in (ellipsis_idx..i).rev() {
                segs[8 - (i - j)] = segs[j];
                segs[j] = 0;
            }
        }

        Some(segs)
    }

    fn read_v6_segment(&mut self) -> Option<Seg> {
        let colon = self.read_str(":");
        let Some(first) = self.peek(0) else {
            return colon.then_some(Seg::SingleColon);
        };

        let mut x = match decode_hexdigit(first) {
            Some(v) => v as u16,
            None => {
                return colon.then(|| {
                    if first == b':' {
                        self.skip(1);
                        Seg::Ellipsis
                    } else {
                        Seg::SingleColon
                    }
                });
            }
        };
        let mut i = 1;

        while i < 4 {
            // No closing bracket follows the literal: the end of input ends the hextet.
            let Some(b) = self.peek(i) else {
                break;
            };
            match decode_hexdigit(b) {
                Some(v) => {
                    x = (x << 4) | v as u16;
                    i += 1;
                }
                None if b == b'.' => return Some(Seg::MaybeV4(colon)),
                None => break,
            }
        }
        self.skip(i);
        Some(Seg::Normal(x, colon))
    }

    fn read_v4(&mut self) -> Option<u32> {
        let mut addr = self.read_v4_octet()? << 24;
        for i in (0..3).rev() {
            if !self.read_str(".") {
                return None;
            }
            addr |= self.read_v4_octet()? << (i * 8);
        }
        Some(addr)
    }

    fn read_v4_octet(&mut self) -> Option<u32> {
        let mut res = self.peek_digit(0)?;
        if res == 0 {
            self.skip(1);
            return Some(0);
        }

        for i in 1..3 {
            let Some(x) = self.peek_digit(i) else {
                self.skip(i);
                return Some(res);
            };
            res = res * 10 + x;
        }
        self.skip(3);

        u8::try_from(res).is_ok().then_some(res)
    }

    fn peek_digit(&self, i: usize) -> Option<u32> {
        self.peek(i).and_then(|x| (x as char).to_digit(10))
    }
}

fn decode_hexdigit(x: u8) -> Option<u8> {
    pct_enc::is_hexdig(x).then(|| (x as char).to_digit(16).unwrap_or(0) as u8)
}
