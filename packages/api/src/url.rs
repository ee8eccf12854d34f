//! Request URL construction.
//!
//! Parameters are joined with literal `&` and `=`. Each value is
//! percent-encoded on its own, so an `&` inside a value can never split
//! the parameter. A bare `=` inside a value stays readable because only
//! the first `=` of a pair separates key from value.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use webling_debtors_api_models::DebtorId;

/// Everything except ASCII alphanumerics, the unreserved marks, and `=`.
const VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'_')
    .remove(b'.')
    .remove(b'-')
    .remove(b'~')
    .remove(b'=');

/// Joins `base` with `endpoint` and the query `params`.
///
/// `endpoint` gets exactly one leading `/`. Empty `params` produce no
/// query string at all.
#[must_use]
pub fn api_url(base: &str, endpoint: &str, params: &[(&str, &str)]) -> String {
    let mut url = format!("{base}/{}", endpoint.trim_start_matches('/'));

    for (i, (key, value)) in params.iter().enumerate() {
        url.push(if i == 0 { '?' } else { '&' });
        url.extend(utf8_percent_encode(key, VALUE));
        url.push('=');
        url.extend(utf8_percent_encode(value, VALUE));
    }

    url
}

/// Path of the delete endpoint for `ids`: `debitor/<id>,<id>,...`.
#[must_use]
pub fn delete_path(ids: &[DebtorId]) -> String {
    format!("debitor/{}", join_ids(ids))
}

/// Comma-joins `ids` without spaces.
#[must_use]
pub fn join_ids(ids: &[DebtorId]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}
