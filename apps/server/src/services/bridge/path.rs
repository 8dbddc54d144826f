//! Translation of request paths into backend paths.

use crate::error::{BridgeError, BridgeResult};

/// Path segment that marks the start of the backend-relative path.
pub const ROUTING_PREFIX: &str = "/sftp/";

/// Strip everything up to and including the first occurrence of `prefix`, keeping
/// the prefix's trailing separator so the backend receives an absolute-style path.
///
/// No normalization is performed; `..` segments are passed through untouched.
pub fn translate_path<'a>(request_path: &'a str, prefix: &str) -> BridgeResult<&'a str> {
    let index = request_path
        .find(prefix)
        .ok_or_else(|| BridgeError::Routing(format!("Path does not contain: {}", prefix)))?;

    // Empty prefixes have no separator to keep.
    let separator = prefix.chars().last().map_or(0, char::len_utf8);
    let keep = prefix.len() - separator;
    Ok(&request_path[index + keep..])
}
