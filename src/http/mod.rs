pub(crate) mod protocol;

mod header;
mod request;
mod response;
mod status;

pub use header::HeaderMap;
pub use request::HttpRequest;
pub use response::HttpResponse;
pub use status::{Method, StatusCode};

#[cfg(test)]
mod test;
