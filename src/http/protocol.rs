use std::io::{Read, Write};

use chrono::Utc;

use super::{header::HeaderMap, request::HttpRequest, response::HttpResponse, Method};
use crate::{
    consts::{cors, CHUNK_END, HTTP_VER_STR},
    Error,
};

/// Frames one request from a connection's byte stream.
///
/// The parser is deliberately tolerant: a request line with fewer than
/// three tokens yields empty fields, header lines without a colon are
/// skipped, and a body cut short by the peer closing early is returned
/// truncated. Handlers treat the resulting missing fields as validation
/// failures instead of the parser rejecting the request outright.
///
/// The only hard failure besides I/O is a declared `Content-Length`
/// above `max_body`, which must be rejected before the buffer for it is
/// ever allocated.
pub(crate) fn parse_request(
    stream: &mut impl Read,
    max_body: usize,
) -> Result<HttpRequest, Error> {
    let (head, found_boundary) = read_head(stream)?;
    let head = String::from_utf8_lossy(&head);
    let mut lines = head.split("\r\n");

    let mut request_line = lines.next().unwrap_or("").split_whitespace();
    let method = Method::from_token(request_line.next().unwrap_or(""));
    let target = request_line.next().unwrap_or("");

    let (path, query) = match target.split_once('?') {
        Some((path, query)) => (path, query),
        None => (target, ""),
    };

    // Without the double-CRLF boundary the request counts as headerless
    // and bodyless, whatever else was read.
    let mut headers = HeaderMap::new();
    if found_boundary {
        for line in lines {
            if let Some((key, value)) = line.split_once(':') {
                headers.insert(key.trim(), value.trim());
            }
        }
    }

    let content_length = headers.content_length().unwrap_or(0);
    if content_length > max_body {
        return Err(Error::BodyTooLarge {
            declared: content_length,
            limit: max_body,
        });
    }

    let body = if found_boundary && content_length > 0 {
        read_body(stream, content_length)
    } else {
        Vec::new()
    };

    Ok(HttpRequest {
        method,
        path: path.to_owned(),
        query: query.to_owned(),
        headers,
        body,
    })
}

/// Reads up to and including the first `\r\n\r\n`, returning the bytes
/// before it and whether the boundary was seen at all.
fn read_head(stream: &mut impl Read) -> Result<(Vec<u8>, bool), Error> {
    let mut total: Vec<u8> = Vec::with_capacity(128);

    let mut current = [0; 4];

    loop {
        let mut latest = [0];
        let got = stream.read(&mut latest)?;
        if got == 0 {
            break;
        }
        total.push(latest[0]);

        current[0] = current[1];
        current[1] = current[2];
        current[2] = current[3];
        current[3] = latest[0];

        if &current == CHUNK_END {
            total.truncate(total.len() - CHUNK_END.len());
            return Ok((total, true));
        }
    }

    Ok((total, false))
}

/// Blocks until `size` body bytes are collected or the peer goes away.
///
/// A single read rarely delivers the whole body, so keep reading until
/// the declared length is reached. Zero reads and errors end the body
/// early; the truncated buffer is returned as-is.
fn read_body(stream: &mut impl Read, size: usize) -> Vec<u8> {
    let mut buf = vec![0; size];
    let mut filled = 0;

    while filled < size {
        match stream.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(_) => break,
        }
    }

    buf.truncate(filled);
    buf
}

/// Serializes a response onto the wire.
///
/// Header order is fixed: status line, `Content-Type`, `Content-Length`,
/// `Date`, then the three CORS headers. The caller drops the connection
/// afterwards; there is no keep-alive.
pub(crate) fn write_response(
    stream: &mut impl Write,
    response: &HttpResponse,
) -> Result<(), Error> {
    let head = format!(
        "{ver} {status}\r\n\
         Content-Type: {content_type}\r\n\
         Content-Length: {content_length}\r\n\
         Date: {date}\r\n\
         Access-Control-Allow-Origin: {allow_origin}\r\n\
         Access-Control-Allow-Methods: {allow_methods}\r\n\
         Access-Control-Allow-Headers: {allow_headers}\r\n\
         \r\n",
        ver = HTTP_VER_STR,
        status = response.status,
        content_type = response.content_type,
        content_length = response.body.len(),
        date = http_date(),
        allow_origin = cors::ALLOW_ORIGIN,
        allow_methods = cors::ALLOW_METHODS,
        allow_headers = cors::ALLOW_HEADERS,
    );

    stream.write_all(head.as_bytes())?;
    stream.write_all(&response.body)?;
    stream.flush()?;

    Ok(())
}

/// RFC-1123 timestamp for the `Date` header, in actual UTC.
fn http_date() -> String {
    Utc::now().format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}
