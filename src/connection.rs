//! Connection descriptor normalization: `key=value;` strings into a `postgres://` URL.

use std::collections::HashMap;

const URL_SCHEMES: &[&str] = &["postgres://", "postgresql://"];

/// Turn a connection descriptor into a database URL.
///
/// URLs with a known scheme pass through with only surrounding whitespace removed.
/// Otherwise the input is read as `;`-separated `key=value` pairs (keys
/// case-insensitive), e.g.
/// `Host=localhost;Port=5432;Username=app;Password=secret;Database=clients`.
/// When host, username or database is missing the input is returned as-is and the
/// connection attempt downstream reports the problem.
pub fn resolve_connection_string(raw: &str) -> String {
    let trimmed = raw.trim();
    let lower = trimmed.to_ascii_lowercase();
    if URL_SCHEMES.iter().any(|scheme| lower.starts_with(scheme)) {
        return trimmed.to_string();
    }

    let parts = parse_pairs(raw);
    let get = |key: &str| parts.get(key).map(String::as_str).filter(|v| !v.is_empty());

    let host = get("host");
    let port = get("port");
    let username = get("username").or_else(|| get("user"));
    let password = parts.get("password").map(String::as_str).unwrap_or("");
    let database = get("database");

    let (Some(host), Some(username), Some(database)) = (host, username, database) else {
        return raw.to_string();
    };

    let port_part = port.map(|p| format!(":{}", p)).unwrap_or_default();
    format!(
        "postgres://{}:{}@{}{}/{}",
        percent_encode(username),
        percent_encode(password),
        host,
        port_part,
        database
    )
}

fn parse_pairs(raw: &str) -> HashMap<String, String> {
    raw.split(';')
        .map(str::trim)
        .filter_map(|chunk| chunk.split_once('='))
        .map(|(key, value)| (key.trim().to_lowercase(), value.trim().to_string()))
        .collect()
}

/// Percent-encode everything outside the RFC 3986 unreserved set.
fn percent_encode(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for b in s.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => out.push(b as char),
            _ => out.push_str(&format!("%{:02X}", b)),
        }
    }
    out
}
