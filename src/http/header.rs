use std::collections::HashMap;

use crate::consts::headers::CONTENT_LEN;

/// Request headers, keyed by lowercase field name.
///
/// Normalizing on insert makes every lookup case-insensitive, so a
/// client sending `content-length` or `CONTENT-LENGTH` is framed the
/// same as one sending the canonical spelling.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct HeaderMap {
    values: HashMap<String, String>,
}

impl HeaderMap {
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    pub fn insert(&mut self, key: &str, value: &str) {
        self.values
            .insert(key.to_ascii_lowercase(), value.to_owned());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(&key.to_ascii_lowercase()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The declared `Content-Length`, if present and parsable as an
    /// integer. Surrounding whitespace is ignored; anything else makes
    /// the header count as absent rather than failing the request.
    pub fn content_length(&self) -> Option<usize> {
        self.get(CONTENT_LEN)
            .and_then(|value| value.trim().parse().ok())
    }
}

impl<const N: usize> From<[(&str, &str); N]> for HeaderMap {
    fn from(pairs: [(&str, &str); N]) -> Self {
        let mut headers = HeaderMap::new();
        for (key, value) in pairs {
            headers.insert(key, value);
        }
        headers
    }
}
