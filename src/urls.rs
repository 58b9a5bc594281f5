//! URL template helpers: placeholder substitution and full-path resolution.
//!
//! Page URL templates carry a `:num` placeholder for the page number and may
//! carry a `:max` placeholder for the total page count. Templates that do not
//! name a concrete file are completed with a default index filename and
//! extension so that every page resolves to an addressable path.

/// Substitute the `:num` placeholder with the page number, and `:max` with
/// the total page count when one is given.
pub fn format_page_number(template: &str, num: usize, total: Option<usize>) -> String {
    let mut out = template.replacen(":num", &num.to_string(), 1);
    if let Some(total) = total {
        out = out.replacen(":max", &total.to_string(), 1);
    }
    out
}

/// Ensure a URL ends with a concrete filename and extension.
///
/// A trailing slash gets `default_index` + `default_ext` appended; a last
/// segment without an extension gets `default_ext` appended; a URL that
/// already names a file is returned unchanged.
pub fn ensure_full_path(url: &str, default_index: &str, default_ext: &str) -> String {
    if url.ends_with('/') {
        return format!("{}{}{}", url, default_index, default_ext);
    }
    let last_segment = url.rsplit('/').next().unwrap_or(url);
    if !last_segment.contains('.') {
        return format!("{}{}", url, default_ext);
    }
    url.to_string()
}

/// Join a base URL and a tail, normalizing the slash between them.
pub fn join_url(base: &str, tail: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        tail.trim_start_matches('/')
    )
}

pub fn remove_leading_slash(s: &str) -> &str {
    s.strip_prefix('/').unwrap_or(s)
}
