//! Pattern Library (spec §4.1): pure, immutable matcher primitives over
//! already-compiled policy strings.

use regex::Regex;

/// Platform rule from spec §4.1: case-sensitive on POSIX, case-insensitive
/// on platforms whose filesystems normally are (Windows, macOS default).
#[cfg(any(target_os = "windows", target_os = "macos"))]
fn path_contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn path_contains(haystack: &str, needle: &str) -> bool {
    haystack.contains(needle)
}

/// True iff any fragment is a substring of the canonical path. Order
/// irrelevant for the boolean result; the first hit in list order is
/// returned for reporting (spec §4.1 tie-break rule).
pub fn path_hit<'a>(canonical_path: &str, fragments: &'a [String]) -> Option<&'a str> {
    fragments
        .iter()
        .find(|fragment| !fragment.is_empty() && path_contains(canonical_path, fragment))
        .map(|s| s.as_str())
}

/// True iff the path ends with any extension (dot included).
pub fn ext_hit<'a>(canonical_path: &str, extensions: &'a [String]) -> Option<&'a str> {
    extensions
        .iter()
        .find(|ext| !ext.is_empty() && path_contains_suffix(canonical_path, ext))
        .map(|s| s.as_str())
}

#[cfg(any(target_os = "windows", target_os = "macos"))]
fn path_contains_suffix(haystack: &str, suffix: &str) -> bool {
    haystack.to_lowercase().ends_with(&suffix.to_lowercase())
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn path_contains_suffix(haystack: &str, suffix: &str) -> bool {
    haystack.ends_with(suffix)
}

/// True iff `host == pattern` or `host` ends with `.pattern`. The special
/// pattern `*` matches all hosts.
pub fn domain_hit<'a>(host: &str, patterns: &'a [String]) -> Option<&'a str> {
    let host = host.to_ascii_lowercase();
    patterns.iter().find(|pattern| {
        pattern.as_str() == "*"
            || host == pattern.to_ascii_lowercase()
            || host.ends_with(&format!(".{}", pattern.to_ascii_lowercase()))
    }).map(|s| s.as_str())
}

/// First matching regex, in input order, with the byte offsets of the
/// match within `text`.
pub struct RegexHit {
    pub index: usize,
    pub start: usize,
    pub end: usize,
}

pub fn regex_hit(text: &str, regexes: &[Regex]) -> Option<RegexHit> {
    regexes.iter().enumerate().find_map(|(index, re)| {
        re.find(text).map(|m| RegexHit {
            index,
            start: m.start(),
            end: m.end(),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_hit_finds_substring() {
        let fragments = vec!["/.ssh/".to_string()];
        assert_eq!(path_hit("/home/u/.ssh/id_rsa", &fragments), Some("/.ssh/"));
        assert_eq!(path_hit("/home/u/.config", &fragments), None);
    }

    #[test]
    fn path_hit_ignores_empty_fragments() {
        let fragments = vec![String::new(), "/etc/".to_string()];
        assert_eq!(path_hit("/etc/passwd", &fragments), Some("/etc/"));
    }

    #[test]
    fn ext_hit_matches_suffix_with_dot() {
        let exts = vec![".env".to_string()];
        assert_eq!(ext_hit("/project/.env", &exts), Some(".env"));
        assert_eq!(ext_hit("/project/.environment", &exts), None);
    }

    #[test]
    fn domain_hit_matches_exact_and_subdomain() {
        let patterns = vec!["pastebin.com".to_string()];
        assert_eq!(domain_hit("pastebin.com", &patterns), Some("pastebin.com"));
        assert_eq!(domain_hit("raw.pastebin.com", &patterns), Some("pastebin.com"));
        assert_eq!(domain_hit("notpastebin.com", &patterns), None);
    }

    #[test]
    fn domain_hit_wildcard_matches_everything() {
        let patterns = vec!["*".to_string()];
        assert_eq!(domain_hit("anything.example", &patterns), Some("*"));
    }

    #[test]
    fn regex_hit_returns_first_match_in_order() {
        let regexes = vec![
            Regex::new("zzz").unwrap(),
            Regex::new("curl").unwrap(),
            Regex::new("curl.*sh").unwrap(),
        ];
        let hit = regex_hit("curl http://x | sh", &regexes).unwrap();
        assert_eq!(hit.index, 1);
    }
}
