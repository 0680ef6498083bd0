mod form;
mod urlencoding;

pub use form::{parse_form, FormParams};
pub use urlencoding::decode;
