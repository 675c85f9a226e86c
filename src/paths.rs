// src/paths.rs
//
// Site paths that carry an id. Ids come from data files and may hold any
// character, so they travel percent-encoded as a single path segment.

use urlencoding::{decode, encode};

pub fn listing_path(id: &str) -> String {
    format!("/listings/{}", encode(id))
}

pub fn favorite_path(id: &str) -> String {
    format!("/favorites/{}", encode(id))
}

pub fn neighborhood_path(id: &str) -> String {
    format!("/neighborhoods/{}", encode(id))
}

pub fn service_path(id: &str) -> String {
    format!("/resources/{}", encode(id))
}

/// The decoded segment after `prefix`. `None` for an empty segment, more than
/// one segment, or bytes that are not UTF-8 once decoded.
pub fn segment(path: &str, prefix: &str) -> Option<String> {
    let raw = path.strip_prefix(prefix)?.trim_end_matches('/');
    if raw.is_empty() || raw.contains('/') {
        return None;
    }
    let id = decode(raw).ok()?;
    (!id.is_empty()).then(|| id.into_owned())
}
