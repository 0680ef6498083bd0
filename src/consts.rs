pub(crate) const CHUNK_END: &[u8; 4] = b"\r\n\r\n";

pub const HTTP_VER_STR: &str = "HTTP/1.1";

pub mod headers {
    //! Header names, normalized to the lowercase form used by
    //! [`crate::http::HeaderMap`].
    pub const CONTENT_LEN: &str = "content-length";
    pub const CONTENT_TYPE: &str = "content-type";
}

pub mod cors {
    //! Fixed CORS headers attached to every response.
    pub const ALLOW_ORIGIN: &str = "*";
    pub const ALLOW_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";
    pub const ALLOW_HEADERS: &str = "Content-Type";
}
