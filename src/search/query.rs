use std::sync::LazyLock;

use regex::Regex;

use crate::error::{DocsError, Result};

const IDENT: &str = "[a-zA-Z][a-zA-Z0-9_]*";

static QUERY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^(?:{IDENT}|{IDENT}\.{IDENT}|{IDENT}\({IDENT}(?:, {IDENT})*\))$"
    ))
    .unwrap()
});

/// Accept `Name`, `Class.Member` or `Name(Arg, Arg)`; returns the trimmed
/// query. Backends do substring matching, so free-text phrases are refused
/// up front.
pub fn validate(query: &str) -> Result<String> {
    let trimmed = query.trim();
    if QUERY_RE.is_match(trimmed) {
        Ok(trimmed.to_string())
    } else {
        Err(DocsError::InvalidQuery(query.to_string()))
    }
}
