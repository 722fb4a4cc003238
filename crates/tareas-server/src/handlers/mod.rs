//! Request handlers, one module per surface area.
//!
//! Every handler follows the same sequence: validate where applicable,
//! dispatch to the store, append an audit line with the original path and
//! resulting status, then shape the JSON response.

pub mod info;
pub mod stats;
pub mod tasks;

use axum::http::Uri;

/// Original request path including the query string, for the audit line.
pub(crate) fn original_path(uri: &Uri) -> String {
    uri.path_and_query()
        .map_or_else(|| uri.path().to_string(), ToString::to_string)
}
