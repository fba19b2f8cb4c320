//! The Configuration Snapshot's on-disk shape (spec §3). Discovery,
//! parsing-error recovery and persistence are host concerns (spec §1
//! Non-goals); this module only owns the typed schema `serde` derives
//! from and a `from_str`/`from_reader` entry point.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::Read;
use thiserror::Error;

use sentinel_common::Severity;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse configuration JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read configuration source: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct ModeConfig {
    pub enabled: bool,
    pub interactive: bool,
    pub strict_mode: bool,
    pub alert_only: bool,
}

impl Default for ModeConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interactive: false,
            strict_mode: false,
            alert_only: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct FilesystemConfig {
    pub blocked_read_paths: Vec<String>,
    pub blocked_write_paths: Vec<String>,
    pub blocked_extensions: Vec<String>,
    pub allowed_paths: Vec<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NetworkMode {
    Block,
    Monitor,
}

impl Default for NetworkMode {
    fn default() -> Self {
        Self::Block
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct NetworkConfig {
    pub enabled: bool,
    pub mode: NetworkMode,
    pub blocked_domains: Vec<String>,
    pub allowed_domains: Vec<String>,
    pub suspicious_ports: Vec<u16>,
    pub credential_patterns: Vec<String>,
    pub allow_localhost: bool,
    pub allow_private_networks: bool,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            mode: NetworkMode::default(),
            blocked_domains: Vec::new(),
            allowed_domains: Vec::new(),
            suspicious_ports: Vec::new(),
            credential_patterns: Vec::new(),
            allow_localhost: false,
            allow_private_networks: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BlockedCommandPattern {
    pub regex: String,
    pub severity: Severity,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct CommandsConfig {
    pub blocked_patterns: Vec<BlockedCommandPattern>,
    pub allowed_commands: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct EnvironmentConfig {
    pub protected_variables: Vec<String>,
    pub allow_trusted_modules_access: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct AlertThresholds {
    pub file_reads: Option<u64>,
    pub network_requests: Option<u64>,
    pub process_spawns: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct BehavioralConfig {
    pub monitor_lifecycle_scripts: bool,
    pub max_network_requests: Option<u64>,
    pub max_file_writes: Option<u64>,
    pub max_process_spawns: Option<u64>,
    pub alert_thresholds: AlertThresholds,
}

impl Default for BehavioralConfig {
    fn default() -> Self {
        Self {
            monitor_lifecycle_scripts: true,
            max_network_requests: None,
            max_file_writes: None,
            max_process_spawns: None,
            alert_thresholds: AlertThresholds::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ModuleException {
    pub allow_filesystem: Vec<String>,
    pub allow_network: Vec<String>,
    pub allow_commands: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ExceptionsConfig {
    pub modules: HashMap<String, ModuleException>,
}

/// Malicious-source pattern rules consumed by the Module Source Scanner
/// (spec §4.7). Not enumerated as a top-level config section in spec §3,
/// but described there as "input to the compiler" the same way
/// `commands.blockedPatterns` is; `sentinel-policy::defaults` seeds a
/// built-in set and config entries are appended to it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MaliciousSourcePattern {
    pub regex: String,
    pub severity: Severity,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ModuleScannerConfig {
    pub malicious_patterns: Vec<MaliciousSourcePattern>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ReportingConfig {
    pub log_file: Option<String>,
    pub report_file: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub mode: ModeConfig,
    pub filesystem: FilesystemConfig,
    pub network: NetworkConfig,
    pub commands: CommandsConfig,
    pub environment: EnvironmentConfig,
    pub behavioral: BehavioralConfig,
    pub trusted_modules: Vec<String>,
    pub exceptions: ExceptionsConfig,
    pub module_scanner: ModuleScannerConfig,
    pub reporting: ReportingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: ModeConfig::default(),
            filesystem: FilesystemConfig::default(),
            network: NetworkConfig::default(),
            commands: CommandsConfig::default(),
            environment: EnvironmentConfig::default(),
            behavioral: BehavioralConfig::default(),
            trusted_modules: Vec::new(),
            exceptions: ExceptionsConfig::default(),
            module_scanner: ModuleScannerConfig::default(),
            reporting: ReportingConfig::default(),
        }
    }
}

impl Config {
    pub fn from_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn from_reader<R: Read>(mut r: R) -> Result<Self, ConfigError> {
        let mut buf = String::new();
        r.read_to_string(&mut buf)?;
        Self::from_str(&buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_permissive_but_enabled() {
        let cfg = Config::default();
        assert!(cfg.mode.enabled);
        assert!(!cfg.mode.strict_mode);
        assert!(!cfg.mode.alert_only);
        assert!(cfg.filesystem.blocked_read_paths.is_empty());
    }

    #[test]
    fn parses_partial_json_filling_defaults() {
        let cfg = Config::from_str(r#"{"filesystem":{"blockedReadPaths":["/.ssh/"]}}"#).unwrap();
        assert_eq!(cfg.filesystem.blocked_read_paths, vec!["/.ssh/".to_string()]);
        assert!(cfg.mode.enabled);
        assert_eq!(cfg.network.mode, NetworkMode::Block);
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(Config::from_str("{not json").is_err());
    }

    #[test]
    fn round_trips_through_json() {
        let mut cfg = Config::default();
        cfg.mode.strict_mode = true;
        cfg.trusted_modules.push("left-pad".into());
        let json = serde_json::to_string(&cfg).unwrap();
        let back = Config::from_str(&json).unwrap();
        assert_eq!(cfg, back);
    }
}
