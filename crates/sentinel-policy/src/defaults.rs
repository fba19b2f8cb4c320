//! Fixed lists the spec names but never enumerates (spec §4.3, §4.6,
//! §4.7, §6). A decision engine cannot consult a list that was never
//! materialized, so these constants give them concrete values.

use sentinel_common::Severity;

/// Extensions that mark a filesystem write as "executable by content"
/// regardless of `blockedExtensions` (spec §4.3, `FS_WRITE`/`FS_CREATE`).
pub const SCRIPT_EXTENSIONS: &[&str] = &[
    ".sh", ".bash", ".zsh", ".fish", ".command", ".exe", ".bat", ".cmd", ".ps1", ".py", ".rb",
    ".pl",
];

/// `argv0` values that always bypass command rules with `ALLOW(build_tool)`
/// (spec §4.3, escape hatch (ii)).
pub const BUILD_TOOL_ALLOWLIST: &[&str] = &[
    "make", "cmake", "gcc", "g++", "clang", "python", "python3", "node", "npm",
];

/// Caller identifiers treated as "a known first-party package-manager
/// toolchain marker" (spec §4.3, escape hatch (i)). The adapter forwards
/// the typed `ModuleId` per spec §9, so this list is matched against
/// `AccessRequest::caller_module` rather than a raw stack walk.
pub const PACKAGE_MANAGER_MARKERS: &[&str] = &["npm", "pnpm", "yarn", "corepack"];

/// `(argv0, flag-or-subcommand)` pairs that are always a threat for
/// `CMD_SPAWN`, independent of `commands.blockedPatterns` (spec §4.3:
/// "strict argument table").
pub const STRICT_ARGUMENT_TABLE: &[(&str, &str)] = &[
    ("bash", "-c"),
    ("sh", "-c"),
    ("zsh", "-c"),
    ("curl", "-o"),
    ("curl", "--output"),
    ("wget", "-O"),
    ("nc", ""),
    ("ncat", ""),
    ("eval", ""),
];

/// Minimal sensitive path substrings enforced by the Module Source
/// Scanner's resolve stage when no config file is found at all (spec
/// §6 "strict-defaults mode").
pub const STRICT_DEFAULTS_SENSITIVE_PATHS: &[&str] =
    &["/.ssh/", "/.aws/", "/.gnupg/", "/.env", "/etc/passwd", "/etc/shadow"];

/// Built-in malicious-source patterns for the Module Source Scanner
/// (spec §4.7). Config-supplied patterns are appended after these, never
/// replace them.
pub fn builtin_malicious_patterns() -> Vec<(&'static str, Severity, &'static str)> {
    vec![
        (
            r"Buffer\.from\([^)]*,\s*['\x22]base64['\x22]\)\s*\.toString\(\)\s*\)\s*;?\s*eval",
            Severity::Critical,
            "base64-decoded eval",
        ),
        (
            r"eval\(\s*Buffer\.from\(",
            Severity::Critical,
            "eval of decoded buffer",
        ),
        (
            r"\\x[0-9a-fA-F]{2}(\\x[0-9a-fA-F]{2}){8,}",
            Severity::High,
            "hex-escape obfuscation",
        ),
        (
            r"require\(['\x22]child_process['\x22]\)[^;]*\bexec\(",
            Severity::High,
            "dynamic shell exec from required module",
        ),
        (
            r"(nc|ncat)\s+-e\s+/bin/(ba)?sh",
            Severity::Critical,
            "reverse shell invocation",
        ),
        (
            r"process\.env\s*\[\s*['\x22][A-Za-z0-9_]*(TOKEN|SECRET|KEY|PASSWORD)['\x22]\s*\]",
            Severity::High,
            "credential environment access",
        ),
        (
            r"require\(['\x22]net['\x22]\)[^;]*\.connect\(",
            Severity::Medium,
            "raw socket exfiltration shape",
        ),
        (
            r"process\.dlopen|binding\.node",
            Severity::Medium,
            "native binding access",
        ),
    ]
}
