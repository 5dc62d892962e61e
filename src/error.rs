//! Error types.

use thiserror::Error;

/// Detailed cause of a [`SyntaxError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum SyntaxErrorKind {
    /// A percent sign `'%'` is not followed by two hexadecimal digits.
    ///
    /// The error index points to the percent sign.
    InvalidOctet,
    /// The input ends before two hexadecimal digits follow a percent sign.
    ///
    /// The error index points to the percent sign.
    IncompleteOctet,
}

impl SyntaxErrorKind {
    /// Returns a short description of the cause.
    #[must_use]
    pub fn reason(self) -> &'static str {
        match self {
            Self::InvalidOctet => "invalid percent-encoded octet",
            Self::IncompleteOctet => "incomplete percent-encoded octet",
        }
    }
}

/// An error occurred when percent-decoding a URI component.
///
/// Parsing itself never fails: this error is only returned by the
/// decoding accessors of [`Uri`] and by [`unescape`].
///
/// [`Uri`]: crate::Uri
/// [`unescape`]: crate::pct_enc::unescape
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{} at {}: {input:?}", .kind.reason(), fmt_index(.index))]
pub struct SyntaxError {
    pub(crate) input: String,
    pub(crate) kind: SyntaxErrorKind,
    pub(crate) index: Option<usize>,
}

impl SyntaxError {
    pub(crate) fn new(input: &str, kind: SyntaxErrorKind, index: usize) -> Self {
        Self {
            input: input.to_owned(),
            kind,
            index: Some(index),
        }
    }

    /// Returns the input that failed to decode.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Recovers the input that failed to decode.
    #[must_use]
    pub fn into_input(self) -> String {
        self.input
    }

    /// Returns the detailed cause of the error.
    #[must_use]
    pub fn kind(&self) -> SyntaxErrorKind {
        self.kind
    }

    /// Returns a short description of the cause.
    #[must_use]
    pub fn reason(&self) -> &'static str {
        self.kind.reason()
    }

    /// Returns the approximate byte offset in the input at which the error occurred.
    #[must_use]
    pub fn index(&self) -> Option<usize> {
        self.index
    }
}

/// Detailed cause of a [`BuildError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum BuildErrorKind {
    /// The scheme is empty, does not start with a letter,
    /// or contains a character other than letters, digits, `+`, `-` and `.`.
    ///
    /// The error index points to the offending character, if any.
    InvalidScheme,
    /// The host is empty.
    EmptyHost,
    /// A bracketed host is neither an IPv6 address nor an IPvFuture literal.
    InvalidIpLiteral,
    /// An unbracketed host that should not be encoded is neither
    /// an IPv4 address nor a registered name.
    InvalidHost,
    /// The port is not within `0..=65535`.
    PortOutOfRange,
}

impl BuildErrorKind {
    /// Returns a short description of the cause.
    #[must_use]
    pub fn reason(self) -> &'static str {
        match self {
            Self::InvalidScheme => "invalid scheme",
            Self::EmptyHost => "empty host",
            Self::InvalidIpLiteral => "invalid IP literal",
            Self::InvalidHost => "neither an IPv4 address nor a registered name",
            Self::PortOutOfRange => "port out of range",
        }
    }
}

/// An error occurred when setting a component on a [`UriBuilder`].
///
/// The builder is left untouched when a setter returns this error.
///
/// [`UriBuilder`]: crate::UriBuilder
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{} at {}: {input:?}", .kind.reason(), fmt_index(.index))]
pub struct BuildError {
    pub(crate) input: String,
    pub(crate) kind: BuildErrorKind,
    pub(crate) index: Option<usize>,
}

impl BuildError {
    pub(crate) fn new(input: impl Into<String>, kind: BuildErrorKind) -> Self {
        Self {
            input: input.into(),
            kind,
            index: None,
        }
    }

    pub(crate) fn at(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }

    /// Returns the rejected argument.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Recovers the rejected argument.
    #[must_use]
    pub fn into_input(self) -> String {
        self.input
    }

    /// Returns the detailed cause of the error.
    #[must_use]
    pub fn kind(&self) -> BuildErrorKind {
        self.kind
    }

    /// Returns a short description of the cause.
    #[must_use]
    pub fn reason(&self) -> &'static str {
        self.kind.reason()
    }

    /// Returns the byte offset in the argument at which the error occurred, if known.
    #[must_use]
    pub fn index(&self) -> Option<usize> {
        self.index
    }
}

fn fmt_index(index: &Option<usize>) -> String {
    match *index {
        Some(i) => format!("index {i}"),
        None => "unknown index".to_owned(),
    }
}
