//! In-memory request body.

use std::io::{self, Cursor, Read};

/// Request body handed to a [`Handler`](crate::Handler).
///
/// Always fully buffered: both invocation surfaces materialize the payload
/// before the handler runs, so synchronous reads never block. `Body::Empty`
/// is the explicit no-payload sentinel; reading it observes end-of-input
/// immediately rather than an absent stream.
#[derive(Debug, Clone)]
pub enum Body {
    /// No payload. The first read returns `Ok(0)`.
    Empty,
    /// A buffered payload with a read cursor.
    Buffered(Cursor<Vec<u8>>),
}

impl Body {
    /// The empty-body sentinel.
    pub fn empty() -> Self {
        Body::Empty
    }

    /// The raw payload bytes, regardless of read progress.
    pub fn bytes(&self) -> &[u8] {
        match self {
            Body::Empty => &[],
            Body::Buffered(cursor) => cursor.get_ref(),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes().is_empty()
    }
}

impl Default for Body {
    fn default() -> Self {
        Body::Empty
    }
}

impl From<Vec<u8>> for Body {
    fn from(bytes: Vec<u8>) -> Self {
        Body::Buffered(Cursor::new(bytes))
    }
}

impl From<&str> for Body {
    fn from(text: &str) -> Self {
        Body::Buffered(Cursor::new(text.as_bytes().to_vec()))
    }
}

impl From<String> for Body {
    fn from(text: String) -> Self {
        Body::Buffered(Cursor::new(text.into_bytes()))
    }
}

impl Read for Body {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Body::Empty => Ok(0),
            Body::Buffered(cursor) => cursor.read(buf),
        }
    }
}
