//! Build-process sentinel (spec §4.4): "probe parent process name and
//! lifecycle-event environment; if the process is a trusted native-addon
//! build (matched against a fixed list) the layer disables itself
//! wholesale and emits no interceptions." Grounded on this lineage's own
//! `/proc/{pid}` probing in its kill-switch process checks, reused here
//! to read the parent's command name rather than its liveness.

const BUILD_LIFECYCLE_EVENTS: &[&str] = &["install", "postinstall", "preinstall", "prepare", "rebuild"];
const TRUSTED_BUILD_PARENT_NAMES: &[&str] = &["node-gyp", "node-pre-gyp", "prebuild-install", "cargo", "rustc"];

/// True when this process was started as part of a trusted native
/// module build: a known package-manager lifecycle event is active
/// *and* the parent process is a recognized build toolchain binary.
/// Both conditions are required so that an ordinary `npm install` of an
/// untrusted package (which also sets `npm_lifecycle_event`) does not
/// disable the firewall.
pub fn is_trusted_build_process() -> bool {
    let lifecycle_hit = std::env::var("npm_lifecycle_event")
        .map(|event| BUILD_LIFECYCLE_EVENTS.contains(&event.as_str()))
        .unwrap_or(false);
    lifecycle_hit
        && parent_process_name()
            .is_some_and(|name| TRUSTED_BUILD_PARENT_NAMES.iter().any(|marker| name.contains(marker)))
}

#[cfg(target_os = "linux")]
fn parent_process_name() -> Option<String> {
    let status = std::fs::read_to_string("/proc/self/status").ok()?;
    let ppid: u32 = status
        .lines()
        .find(|line| line.starts_with("PPid:"))?
        .split_whitespace()
        .nth(1)?
        .parse()
        .ok()?;
    std::fs::read_to_string(format!("/proc/{ppid}/comm")).ok().map(|s| s.trim().to_string())
}

#[cfg(not(target_os = "linux"))]
fn parent_process_name() -> Option<String> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_lifecycle_event_is_never_a_trusted_build() {
        std::env::remove_var("npm_lifecycle_event");
        assert!(!is_trusted_build_process());
    }

    #[test]
    fn unrecognized_lifecycle_event_is_not_a_trusted_build() {
        std::env::set_var("npm_lifecycle_event", "start");
        assert!(!is_trusted_build_process());
        std::env::remove_var("npm_lifecycle_event");
    }
}
