use std::io::{self, Read};

use super::protocol::{parse_request, write_response};
use super::{HeaderMap, HttpRequest, HttpResponse, Method, StatusCode};
use crate::Error;

const MAX_BODY: usize = 1024 * 1024;

/// Hands out at most `chunk` bytes per read, to exercise bodies that
/// arrive split across multiple reads.
struct DribbleReader<'a> {
    data: &'a [u8],
    pos: usize,
    chunk: usize,
}

impl<'a> DribbleReader<'a> {
    fn new(data: &'a [u8], chunk: usize) -> Self {
        Self { data, pos: 0, chunk }
    }
}

impl Read for DribbleReader<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.chunk.min(buf.len()).min(self.data.len() - self.pos);
        buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}

#[test]
fn test_parse_post_with_body() {
    let raw = b"POST /api/shipments HTTP/1.1\r\nHost: example.com\r\nContent-Length: 13\r\n\r\norigin=Berlin";
    let got = parse_request(&mut raw.as_slice(), MAX_BODY).unwrap();

    assert_eq!(
        got,
        HttpRequest {
            method: Method::Post,
            path: "/api/shipments".to_owned(),
            query: String::new(),
            headers: HeaderMap::from([
                ("host", "example.com"),
                ("content-length", "13")
            ]),
            body: b"origin=Berlin".to_vec(),
        }
    );
}

#[test]
fn test_parse_strips_query_string() {
    let raw = b"GET /api/shipments?page=2&page=3 HTTP/1.1\r\n\r\n";
    let got = parse_request(&mut raw.as_slice(), MAX_BODY).unwrap();

    assert_eq!(got.path, "/api/shipments");
    assert_eq!(got.query, "page=2&page=3");
    assert!(got.body.is_empty());
}

#[test]
fn test_parse_content_length_case_insensitive() {
    let raw = b"POST / HTTP/1.1\r\ncOnTeNt-LeNgTh: 2\r\n\r\nhi";
    let got = parse_request(&mut raw.as_slice(), MAX_BODY).unwrap();

    assert_eq!(got.headers.content_length(), Some(2));
    assert_eq!(got.body, b"hi");
}

#[test]
fn test_parse_body_split_across_reads() {
    let raw = b"POST / HTTP/1.1\r\nContent-Length: 26\r\n\r\nabcdefghijklmnopqrstuvwxyz";
    let mut reader = DribbleReader::new(raw, 5);
    let got = parse_request(&mut reader, MAX_BODY).unwrap();

    assert_eq!(got.body, b"abcdefghijklmnopqrstuvwxyz");
}

#[test]
fn test_parse_body_truncated_by_early_close() {
    let raw = b"POST / HTTP/1.1\r\nContent-Length: 20\r\n\r\nonly-ten-b";
    let got = parse_request(&mut raw.as_slice(), MAX_BODY).unwrap();

    assert_eq!(got.body, b"only-ten-b");
}

#[test]
fn test_parse_without_boundary_is_headerless() {
    let raw = b"GET /index.html HTTP/1.1\r\nContent-Length: 5";
    let got = parse_request(&mut raw.as_slice(), MAX_BODY).unwrap();

    assert_eq!(got.path, "/index.html");
    assert!(got.headers.is_empty());
    assert!(got.body.is_empty());
}

#[test]
fn test_parse_short_request_line_yields_empty_fields() {
    let raw = b"GARBAGE\r\n\r\n";
    let got = parse_request(&mut raw.as_slice(), MAX_BODY).unwrap();

    assert_eq!(got.method, Method::Other("GARBAGE".to_owned()));
    assert_eq!(got.path, "");

    let raw = b"\r\n\r\n";
    let got = parse_request(&mut raw.as_slice(), MAX_BODY).unwrap();

    assert_eq!(got.method, Method::Other(String::new()));
    assert_eq!(got.path, "");
}

#[test]
fn test_parse_header_line_without_colon_is_skipped() {
    let raw = b"GET / HTTP/1.1\r\nnot a header line\r\nHost: x\r\n\r\n";
    let got = parse_request(&mut raw.as_slice(), MAX_BODY).unwrap();

    assert_eq!(got.headers.len(), 1);
    assert_eq!(got.headers.get("Host"), Some("x"));
}

#[test]
fn test_parse_unparsable_content_length_means_no_body() {
    let raw = b"POST / HTTP/1.1\r\nContent-Length: banana\r\n\r\npayload";
    let got = parse_request(&mut raw.as_slice(), MAX_BODY).unwrap();

    assert_eq!(got.headers.content_length(), None);
    assert!(got.body.is_empty());
}

#[test]
fn test_parse_rejects_oversized_declaration() {
    let raw = b"POST / HTTP/1.1\r\nContent-Length: 4096\r\n\r\n";
    let got = parse_request(&mut raw.as_slice(), 1024);

    match got {
        Err(Error::BodyTooLarge { declared, limit }) => {
            assert_eq!(declared, 4096);
            assert_eq!(limit, 1024);
        }
        other => panic!("expected BodyTooLarge, got {other:?}"),
    }
}

#[test]
fn test_write_response_fixed_header_order() {
    let mut out = Vec::new();
    let response = HttpResponse::json(StatusCode::Created, "{\"success\":true,\"id\":7}".to_owned());
    write_response(&mut out, &response).unwrap();

    let text = String::from_utf8(out).unwrap();
    assert!(text.starts_with("HTTP/1.1 201 Created\r\n"));

    let order = [
        "Content-Type: application/json",
        "Content-Length: 23",
        "Date: ",
        "Access-Control-Allow-Origin: *",
        "Access-Control-Allow-Methods: GET, POST, PUT, DELETE, OPTIONS",
        "Access-Control-Allow-Headers: Content-Type",
    ];
    let mut last = 0;
    for header in order {
        let at = text.find(header).unwrap_or_else(|| panic!("missing header {header:?}"));
        assert!(at >= last, "header {header:?} out of order");
        last = at;
    }

    assert!(text.ends_with("\r\n\r\n{\"success\":true,\"id\":7}"));
}

#[test]
fn test_write_response_empty_body() {
    let mut out = Vec::new();
    let response = HttpResponse::text(StatusCode::Ok, "");
    write_response(&mut out, &response).unwrap();

    let text = String::from_utf8(out).unwrap();
    assert!(text.starts_with("HTTP/1.1 200 OK\r\n"));
    assert!(text.contains("Content-Length: 0\r\n"));
    assert!(text.ends_with("\r\n\r\n"));
}
