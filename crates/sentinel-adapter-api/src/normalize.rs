//! Normalization helpers for the Interception Normalization Layer
//! (spec §4.4): path-argument shape normalization, command-line
//! construction, and call-site `ModuleId` extraction.

use sentinel_common::ModuleId;
use std::path::{Path, PathBuf};

/// The three accepted path-argument shapes (spec §4.4): "string, byte
/// buffer, and any value exposing a string conversion." A value that
/// only exposes a string conversion (the third shape) is handled by the
/// caller rendering it with `to_string()` before constructing a
/// [`PathArg::Utf8`]; Rust already gives such values a `Display`/
/// `ToString` impl, so no separate variant is needed for it.
#[derive(Debug, Clone)]
pub enum PathArg {
    Utf8(String),
    Bytes(Vec<u8>),
}

impl From<&str> for PathArg {
    fn from(s: &str) -> Self {
        PathArg::Utf8(s.to_string())
    }
}

impl From<String> for PathArg {
    fn from(s: String) -> Self {
        PathArg::Utf8(s)
    }
}

impl From<&[u8]> for PathArg {
    fn from(b: &[u8]) -> Self {
        PathArg::Bytes(b.to_vec())
    }
}

impl From<Vec<u8>> for PathArg {
    fn from(b: Vec<u8>) -> Self {
        PathArg::Bytes(b)
    }
}

impl PathArg {
    fn into_lossy_string(self) -> String {
        match self {
            PathArg::Utf8(s) => s,
            PathArg::Bytes(b) => String::from_utf8_lossy(&b).into_owned(),
        }
    }
}

/// Absolute-resolve `raw` against `cwd`, then symlink-resolve if the
/// target exists on disk. A target that does not yet exist (the common
/// case for `FS_WRITE`/`FS_CREATE`) is lexically normalized instead,
/// since `std::fs::canonicalize` requires the path to exist.
pub fn normalize_path(raw: impl Into<PathArg>, cwd: &Path) -> String {
    let raw = raw.into().into_lossy_string();
    let path = Path::new(&raw);
    let absolute = if path.is_absolute() { path.to_path_buf() } else { cwd.join(path) };
    match std::fs::canonicalize(&absolute) {
        Ok(resolved) => resolved.to_string_lossy().into_owned(),
        Err(_) => lexically_normalize(&absolute).to_string_lossy().into_owned(),
    }
}

fn lexically_normalize(path: &Path) -> PathBuf {
    use std::path::Component;
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::ParentDir => {
                out.pop();
            }
            Component::CurDir => {}
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Build the single-string command representation spec §4.3 requires
/// for `CMD_SPAWN`: `argv0 + " " + argv[1..]`. `CMD_EXEC` already
/// receives a single string from its call site and needs no joining.
pub fn join_argv(argv: &[String]) -> String {
    argv.join(" ")
}

const PACKAGE_ROOT_MARKERS: &[&str] = &["node_modules/", ".pnpm/"];
const STDLIB_MARKERS: &[&str] = &["node:internal/", "internal/modules/", "internal/bootstrap/"];
const FIREWALL_MARKERS: &[&str] = &[
    "sentinel-core/",
    "sentinel-adapter-api/",
    "sentinel-adapters/",
    "sentinel-policy/",
    "sentinel-monitor/",
    "sentinel-evidence/",
];

/// Walk `frames` (innermost/most-recent caller first) and return the
/// first third-party package identifier found, skipping frames inside
/// the host runtime's standard library and frames inside the firewall
/// itself (spec §4.4's call-site module extraction rule). Scoped
/// identifiers (`@scope/name`) are preserved.
pub fn extract_caller_module(frames: &[String]) -> Option<ModuleId> {
    frames
        .iter()
        .filter(|frame| !STDLIB_MARKERS.iter().any(|marker| frame.contains(marker)))
        .filter(|frame| !FIREWALL_MARKERS.iter().any(|marker| frame.contains(marker)))
        .find_map(|frame| extract_from_frame(frame))
}

fn extract_from_frame(frame: &str) -> Option<ModuleId> {
    PACKAGE_ROOT_MARKERS
        .iter()
        .find_map(|marker| frame.find(marker).map(|idx| parse_package_segment(&frame[idx + marker.len()..])))
}

fn parse_package_segment(rest: &str) -> ModuleId {
    let mut parts = rest.splitn(3, '/');
    let first = parts.next().unwrap_or("");
    if let Some(scope_name) = first.strip_prefix('@') {
        let second = parts.next().unwrap_or("");
        ModuleId::new(format!("@{scope_name}/{second}"))
    } else {
        ModuleId::new(first)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn absolute_path_is_left_as_is_when_nonexistent() {
        let cwd = env::temp_dir();
        let normalized = normalize_path("/definitely/not/a/real/path", &cwd);
        assert_eq!(normalized, "/definitely/not/a/real/path");
    }

    #[test]
    fn relative_path_is_joined_against_cwd() {
        let cwd = Path::new("/home/u/project");
        let normalized = normalize_path("src/lib.rs", cwd);
        assert_eq!(normalized, "/home/u/project/src/lib.rs");
    }

    #[test]
    fn dot_dot_segments_are_lexically_collapsed_for_nonexistent_paths() {
        let cwd = Path::new("/home/u/project");
        let normalized = normalize_path("a/../b", cwd);
        assert_eq!(normalized, "/home/u/project/b");
    }

    #[test]
    fn byte_buffer_shape_is_accepted() {
        let cwd = Path::new("/home/u/project");
        let normalized = normalize_path(&b"src/lib.rs"[..], cwd);
        assert_eq!(normalized, "/home/u/project/src/lib.rs");
    }

    #[test]
    fn spawn_command_joins_argv() {
        let argv = vec!["curl".to_string(), "-o".to_string(), "x".to_string(), "http://e".to_string()];
        assert_eq!(join_argv(&argv), "curl -o x http://e");
    }

    #[test]
    fn extracts_unscoped_package_from_node_modules_frame() {
        let frames = vec!["/app/node_modules/left-pad/index.js:10:4".to_string()];
        let module = extract_caller_module(&frames).unwrap();
        assert_eq!(module.as_str(), "left-pad");
    }

    #[test]
    fn extracts_scoped_package_preserving_scope() {
        let frames = vec!["/app/node_modules/@scope/name/lib/index.js".to_string()];
        let module = extract_caller_module(&frames).unwrap();
        assert_eq!(module.as_str(), "@scope/name");
    }

    #[test]
    fn skips_stdlib_and_firewall_frames_before_finding_a_package() {
        let frames = vec![
            "node:internal/modules/cjs/loader.js".to_string(),
            "/app/node_modules/sentinel-core/src/engine.rs".to_string(),
            "/app/node_modules/left-pad/index.js".to_string(),
        ];
        let module = extract_caller_module(&frames).unwrap();
        assert_eq!(module.as_str(), "left-pad");
    }

    #[test]
    fn no_package_root_marker_returns_none() {
        let frames = vec!["/app/src/index.js".to_string()];
        assert!(extract_caller_module(&frames).is_none());
    }
}
