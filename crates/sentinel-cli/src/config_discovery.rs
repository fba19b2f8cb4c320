//! "Walk these three paths, read the first that exists" (spec §6). This
//! logic lives only here, in the host binary: `sentinel-policy::Config`
//! itself only owns the typed shape and `from_reader`/`from_str`, not
//! file discovery (SPEC_FULL §1).

use sentinel_policy::Config;
use std::path::PathBuf;

/// Result of looking for a configuration file: either one was found and
/// loaded, or none was and strict-defaults mode applies (spec §6).
pub struct Discovered {
    pub config: Config,
    pub source: Option<PathBuf>,
    pub strict_defaults: bool,
}

fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = vec![
        PathBuf::from(".firewall-config.json"),
        PathBuf::from("firewall-config.json"),
    ];
    if let Some(home) = std::env::var_os("HOME") {
        paths.push(PathBuf::from(home).join(".firewall-config.json"));
    }
    paths
}

/// If `explicit` is set, that path is used verbatim and must exist.
/// Otherwise the three well-known paths are tried in order.
pub fn discover(explicit: Option<PathBuf>) -> anyhow::Result<Discovered> {
    if let Some(path) = explicit {
        let raw = std::fs::read_to_string(&path)
            .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", path.display()))?;
        let config = Config::from_str(&raw)?;
        return Ok(Discovered { config, source: Some(path), strict_defaults: false });
    }

    for path in candidate_paths() {
        if path.is_file() {
            let raw = std::fs::read_to_string(&path)
                .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", path.display()))?;
            let config = Config::from_str(&raw)?;
            return Ok(Discovered { config, source: Some(path), strict_defaults: false });
        }
    }

    tracing::warn!("no configuration file found in the well-known paths; strict-defaults mode active");
    Ok(Discovered { config: Config::default(), source: None, strict_defaults: true })
}
