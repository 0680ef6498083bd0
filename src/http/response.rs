use super::StatusCode;

/// One response to serialize.
///
/// Only status, content type and body vary per route; every other
/// header (framing, `Date`, CORS) is fixed by the writer in
/// [`super::protocol::write_response`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub content_type: &'static str,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn text(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            content_type: "text/plain",
            body: body.into().into_bytes(),
        }
    }

    pub fn json(status: StatusCode, body: String) -> Self {
        Self {
            status,
            content_type: "application/json",
            body: body.into_bytes(),
        }
    }

    pub fn html(status: StatusCode, body: Vec<u8>) -> Self {
        Self {
            status,
            content_type: "text/html",
            body,
        }
    }
}
