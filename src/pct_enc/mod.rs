//! Percent-encoding utilities.
//!
//! # Examples
//!
//! ```
//! use lenient_uri::pct_enc::{escape, table, unescape};
//!
//! let s = escape("name=张三", table::QUERY_ARG);
//! assert_eq!(s, "name%3D%E5%BC%A0%E4%B8%89");
//! assert_eq!(unescape(&s)?, "name=张三");
//! # Ok::<_, lenient_uri::SyntaxError>(())
//! ```

pub mod table;

pub use table::Table;

use crate::error::{SyntaxError, SyntaxErrorKind};
use std::{borrow::Cow, ops::Range, str};

/// Percent-encodes a string with the given table.
///
/// Every byte of the UTF-8 encoding of `s` that is not [allowed] by `table`
/// is replaced by `'%'` followed by two uppercase hexadecimal digits.
/// In particular, `'%'` itself and all non-ASCII characters are always encoded.
///
/// The string is borrowed unmodified when every character is allowed,
/// so encoding an already encoded string is a no-op.
///
/// [allowed]: Table::allows
///
/// # Examples
///
/// ```
/// use lenient_uri::pct_enc::{escape, table};
/// use std::borrow::Cow;
///
/// assert_eq!(escape("b/c", table::SEGMENT), "b%2Fc");
/// assert!(matches!(escape("abc", table::SEGMENT), Cow::Borrowed("abc")));
/// ```
#[must_use]
pub fn escape(s: &str, table: Table) -> Cow<'_, str> {
    escape_bytes(s.as_bytes(), table)
}

/// Percent-encodes arbitrary bytes with the given table.
///
/// Unlike [`escape`], the input need not be valid UTF-8. The output is always
/// ASCII and decodes back to `bytes` with [`unescape_to_bytes`].
#[must_use]
pub fn escape_bytes(bytes: &[u8], table: Table) -> Cow<'_, str> {
    if bytes.iter().all(|&x| table.allows_ascii(x)) {
        // Allowed bytes are all ASCII.
        if let Ok(s) = str::from_utf8(bytes) {
            return Cow::Borrowed(s);
        }
    }

    let mut buf = String::with_capacity(bytes.len() * 3);
    for &x in bytes {
        if table.allows_ascii(x) {
            buf.push(x as char);
        } else {
            buf.push_str(encode_byte(x));
        }
    }
    Cow::Owned(buf)
}

/// Percent-decodes a string.
///
/// Every `'%'` must start a percent-encoded octet, which is replaced with
/// the byte it stands for. All other bytes pass through unchanged.
/// The decoded bytes are read as UTF-8, with invalid sequences replaced
/// by `U+FFFD`; use [`unescape_to_bytes`] to keep them exact.
/// The string is borrowed unmodified when it contains no `'%'`.
///
/// # Errors
///
/// Returns `Err` if a `'%'` is not followed by two hexadecimal digits.
///
/// # Examples
///
/// ```
/// use lenient_uri::{pct_enc::unescape, SyntaxErrorKind};
///
/// assert_eq!(unescape("a%2Fb")?, "a/b");
/// assert_eq!(unescape("%E6%B5%8B")?, "测");
/// assert_eq!(unescape("%FF")?, "\u{FFFD}");
///
/// let e = unescape("100%").unwrap_err();
/// assert_eq!(e.kind(), SyntaxErrorKind::IncompleteOctet);
/// assert_eq!(e.index(), Some(3));
/// # Ok::<_, lenient_uri::SyntaxError>(())
/// ```
pub fn unescape(s: &str) -> Result<Cow<'_, str>, SyntaxError> {
    unescape_range(s, 0..s.len())
}

/// Percent-decodes a range of a string.
///
/// This behaves like [`unescape`] on `&input[range]`, except that errors
/// carry the whole `input` and indexes relative to its start.
///
/// # Panics
///
/// Panics if `range` is out of bounds or not on character boundaries.
///
/// # Errors
///
/// Returns `Err` if a `'%'` in the range is not followed by two hexadecimal
/// digits within the range.
pub fn unescape_range(input: &str, range: Range<usize>) -> Result<Cow<'_, str>, SyntaxError> {
    Ok(match decode_octets(input, range.clone())? {
        Cow::Borrowed(_) => Cow::Borrowed(&input[range]),
        Cow::Owned(buf) => Cow::Owned(
            String::from_utf8(buf)
                .unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned()),
        ),
    })
}

/// Percent-decodes a string to bytes.
///
/// # Errors
///
/// Returns `Err` if a `'%'` is not followed by two hexadecimal digits.
pub fn unescape_to_bytes(s: &str) -> Result<Cow<'_, [u8]>, SyntaxError> {
    decode_octets(s, 0..s.len())
}

fn decode_octets(input: &str, range: Range<usize>) -> Result<Cow<'_, [u8]>, SyntaxError> {
    let offset = range.start;
    let bytes = &input.as_bytes()[range];

    let Some(first) = bytes.iter().position(|&x| x == b'%') else {
        return Ok(Cow::Borrowed(bytes));
    };

    let mut buf = Vec::with_capacity(bytes.len());
    buf.extend_from_slice(&bytes[..first]);

    let mut i = first;
    while i < bytes.len() {
        let x = bytes[i];
        if x != b'%' {
            buf.push(x);
            i += 1;
            continue;
        }

        let [hi, lo, ..] = bytes[i + 1..] else {
            let kind = if bytes[i + 1..].iter().all(|&x| is_hexdig(x)) {
                SyntaxErrorKind::IncompleteOctet
            } else {
                SyntaxErrorKind::InvalidOctet
            };
            return Err(SyntaxError::new(input, kind, offset + i));
        };
        if !is_hexdig_pair(hi, lo) {
            return Err(SyntaxError::new(
                input,
                SyntaxErrorKind::InvalidOctet,
                offset + i,
            ));
        }
        buf.push(decode_octet(hi, lo));
        i += 3;
    }
    Ok(Cow::Owned(buf))
}

const fn gen_octet_table(hi: bool) -> [u8; 256] {
    let mut out = [0xff; 256];
    let shift = if hi { 4 } else { 0 };

    let mut i = 0;
    while i < 10 {
        out[(i + b'0') as usize] = i << shift;
        i += 1;
    }
    while i < 16 {
        out[(i - 10 + b'A') as usize] = i << shift;
        out[(i - 10 + b'a') as usize] = i << shift;
        i += 1;
    }
    out
}

const OCTET_TABLE_HI: &[u8; 256] = &gen_octet_table(true);
const OCTET_TABLE_LO: &[u8; 256] = &gen_octet_table(false);

/// Decodes a percent-encoded octet, assuming that the bytes are hexadecimal.
fn decode_octet(hi: u8, lo: u8) -> u8 {
    debug_assert!(hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit());
    OCTET_TABLE_HI[hi as usize] | OCTET_TABLE_LO[lo as usize]
}

pub(crate) const fn is_hexdig(x: u8) -> bool {
    x.is_ascii_hexdigit()
}

pub(crate) const fn is_hexdig_pair(x: u8, y: u8) -> bool {
    is_hexdig(x) && is_hexdig(y)
}

pub(crate) fn encode_byte(x: u8) -> &'static str {
    const TABLE: &[u8; 256 * 3] = &{
        const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

        let mut i = 0;
        let mut table = [0; 256 * 3];
        while i < 256 {
            table[i * 3] = b'%';
            table[i * 3 + 1] = HEX_DIGITS[i >> 4];
            table[i * 3 + 2] = HEX_DIGITS[i & 0b1111];
            i += 1;
        }
        table
    };

    const TABLE_STR: &str = match str::from_utf8(TABLE) {
        Ok(s) => s,
        Err(_) => unreachable!(),
    };

    &TABLE_STR[x as usize * 3..x as usize * 3 + 3]
}
