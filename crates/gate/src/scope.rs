//! Which requests the gate runs for.
//!
//! Everything under `/api` or `/trpc` is gated. Other paths are gated unless
//! they belong to the framework asset tree (`/_next`) or end in a static
//! asset extension. `.json` is deliberately not a static extension.

/// Extensions served as static assets without admission checks.
pub const STATIC_EXTENSIONS: &[&str] = &[
    "html",
    "htm",
    "css",
    "js",
    "jpg",
    "jpeg",
    "webp",
    "png",
    "gif",
    "svg",
    "ttf",
    "woff",
    "woff2",
    "ico",
    "csv",
    "doc",
    "docx",
    "xls",
    "xlsx",
    "zip",
    "webmanifest",
];

/// Whether the gate must run for `path` (no query string).
pub fn is_gated(path: &str) -> bool {
    if has_prefix_segment(path, "/api") || has_prefix_segment(path, "/trpc") {
        return true;
    }
    if path.starts_with("/_next") {
        return false;
    }
    !is_static_asset(path)
}

/// Whether the last path segment carries a static asset extension.
pub fn is_static_asset(path: &str) -> bool {
    let last = path.rsplit('/').next().unwrap_or(path);
    last.rsplit_once('.').is_some_and(|(_, ext)| {
        STATIC_EXTENSIONS
            .iter()
            .any(|candidate| candidate.eq_ignore_ascii_case(ext))
    })
}

fn has_prefix_segment(path: &str, prefix: &str) -> bool {
    path.strip_prefix(prefix)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}
