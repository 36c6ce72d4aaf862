// ABOUTME: Case-scoped resource names derived from the test path.
// ABOUTME: Sanitised, salted per process, and hashed down when too long for runtime names.

use sha2::{Digest, Sha256};
use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};

/// Longest identifier handed out; container, volume and network names all accept it.
pub const MAX_IDENTIFIER_LEN: usize = 76;
const HASH_SUFFIX_LEN: usize = 8;
const SALT_LEN: usize = 6;

/// Salt shared by every identifier in this process, so concurrent runs of
/// the same test in different processes never collide.
pub fn process_salt() -> &'static str {
    static SALT: OnceLock<String> = OnceLock::new();
    SALT.get_or_init(|| {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or_default();
        let digest = Sha256::digest(format!("{}:{nanos}", std::process::id()));
        hex(&digest)[..SALT_LEN].to_string()
    })
}

/// Lower-case the path and collapse runs of characters runtimes reject into `-`.
///
/// Runtime names must start with an alphanumeric, so leading `_`, `.` and `-` are dropped.
pub fn sanitize(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut pending_dash = false;
    for c in path.chars().flat_map(char::to_lowercase) {
        if out.is_empty() && !c.is_ascii_alphanumeric() {
            continue;
        }
        if c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-') {
            if pending_dash {
                out.push('-');
            }
            pending_dash = false;
            out.push(c);
        } else {
            pending_dash = true;
        }
    }
    out
}

/// Identifier for `path` with an explicit salt.
pub fn identifier_with_salt(path: &str, salt: &str) -> String {
    let base = sanitize(path);
    if base.is_empty() {
        return shorten(salt.to_string());
    }
    shorten(format!("{base}-{salt}"))
}

/// Identifier for `path`, salted for this process.
pub fn identifier(path: &str) -> String {
    identifier_with_salt(path, process_salt())
}

/// Append a suffix, keeping the result within [`MAX_IDENTIFIER_LEN`].
pub fn with_suffix(base: &str, suffix: &str) -> String {
    shorten(format!("{base}-{}", sanitize(suffix)))
}

fn shorten(name: String) -> String {
    if name.len() <= MAX_IDENTIFIER_LEN {
        return name;
    }
    let digest = hex(&Sha256::digest(name.as_bytes()));
    let keep = MAX_IDENTIFIER_LEN - HASH_SUFFIX_LEN - 1;
    let head = name[..keep].trim_end_matches('-');
    format!("{head}-{}", &digest[..HASH_SUFFIX_LEN])
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
