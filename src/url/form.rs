use std::collections::HashMap;

use super::urlencoding;

/// Decoded form parameters, keyed by decoded name.
pub type FormParams = HashMap<String, String>;

/// Parses an `application/x-www-form-urlencoded` body into [`FormParams`].
///
/// Pairs are split on `&`, key and value on the first `=`. Pairs without
/// an `=` and pairs with an empty key are skipped. When a key repeats,
/// the last occurrence wins.
pub fn parse_form(body: &str) -> FormParams {
    body.split('&')
        .filter_map(|pair| pair.split_once('='))
        .map(|(key, value)| (urlencoding::decode(key), urlencoding::decode(value)))
        .filter(|(key, _)| !key.is_empty())
        .collect()
}
