use super::{header::HeaderMap, Method};

/// One framed request.
///
/// `path` is the request target up to the first `?`; the remainder is
/// kept verbatim in `query` but never interpreted — handler parameters
/// come from form-decoding the body, not from the URL.
#[derive(Debug, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    pub path: String,
    pub query: String,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}
