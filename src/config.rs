use crate::effects::BackgroundMode;
use crate::terminal::guard::DangerousPatterns;
use crate::terminal::registry::SessionIdentity;
use crate::window::registry::WindowId;
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;

const DEFAULT_WINDOW_MANIFEST: &str = "about,projects,skills,contact,terminal";
const DEFAULT_DANGEROUS_PATTERNS: &str = "sudo,rm -rf";

#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: String,
    pub interface_mode: InterfaceMode,
    pub window_manifest: Vec<WindowId>,
    /// Ids repeated in `WINDOW_MANIFEST`; reported once logging is up.
    pub duplicate_window_ids: Vec<WindowId>,
    pub dangerous_patterns: DangerousPatterns,
    pub identity: SessionIdentity,
    pub initial_background: BackgroundMode,
    pub suggestion_threshold: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterfaceMode {
    Terminal,
    Json,
}

impl FromStr for InterfaceMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "terminal" => Ok(InterfaceMode::Terminal),
            "json" => Ok(InterfaceMode::Json),
            _ => Err(anyhow::anyhow!("Invalid interface mode: {}", s)),
        }
    }
}

fn split_list(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(|s| s.trim()).filter(|s| !s.is_empty())
}

/// Splits the manifest into unique ids and the repeats that were dropped.
fn parse_manifest(raw: &str) -> (Vec<WindowId>, Vec<WindowId>) {
    let mut manifest: Vec<WindowId> = Vec::new();
    let mut duplicates: Vec<WindowId> = Vec::new();
    for id in split_list(raw) {
        let id = WindowId::from(id);
        if manifest.contains(&id) {
            duplicates.push(id);
            continue;
        }
        manifest.push(id);
    }
    (manifest, duplicates)
}

impl Config {
    /// Loads `.env` if present, then reads the process environment.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();
        let vars: HashMap<String, String> = std::env::vars().collect();
        Self::from_vars(&vars)
    }

    /// Reads a dotenv file without exporting anything into the process environment.
    pub fn from_env_file(path: &Path) -> Result<Self> {
        let vars = dotenvy::from_path_iter(path)
            .with_context(|| format!("Failed to open env file: {}", path.display()))?
            .collect::<Result<HashMap<String, String>, _>>()
            .with_context(|| format!("Failed to parse env file: {}", path.display()))?;
        Self::from_vars(&vars)
    }

    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self> {
        let get = |key: &str, default: &str| -> String {
            vars.get(key).cloned().unwrap_or_else(|| default.to_string())
        };

        let log_level = get("LOG_LEVEL", "info");

        let interface_mode = InterfaceMode::from_str(&get("INTERFACE_MODE", "terminal"))?;

        let (window_manifest, duplicate_window_ids) = parse_manifest(&get("WINDOW_MANIFEST", DEFAULT_WINDOW_MANIFEST));
        if window_manifest.is_empty() {
            anyhow::bail!("WINDOW_MANIFEST must name at least one window");
        }

        let patterns_str = get("DANGEROUS_PATTERNS", DEFAULT_DANGEROUS_PATTERNS);
        let dangerous_patterns = DangerousPatterns::new(split_list(&patterns_str))
            .context("Invalid DANGEROUS_PATTERNS")?;

        let defaults = SessionIdentity::default();
        let available = get("OWNER_AVAILABLE", "true")
            .parse::<bool>()
            .context("Invalid OWNER_AVAILABLE")?;
        let identity = SessionIdentity {
            user: get("SESSION_USER", &defaults.user),
            host: get("SESSION_HOST", &defaults.host),
            owner_name: get("OWNER_NAME", &defaults.owner_name),
            owner_email: get("OWNER_EMAIL", &defaults.owner_email),
            owner_role: get("OWNER_ROLE", &defaults.owner_role),
            available,
        };

        let initial_background = BackgroundMode::from_str(&get("INITIAL_BACKGROUND", "particles"))?;

        let suggestion_threshold = get("SUGGESTION_THRESHOLD", "0.8")
            .parse::<f64>()
            .context("Invalid SUGGESTION_THRESHOLD")?;
        if !(0.0..=1.0).contains(&suggestion_threshold) {
            anyhow::bail!("SUGGESTION_THRESHOLD must be within 0.0..=1.0, got {}", suggestion_threshold);
        }

        Ok(Config {
            log_level,
            interface_mode,
            window_manifest,
            duplicate_window_ids,
            dangerous_patterns,
            identity,
            initial_background,
            suggestion_threshold,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = Config::from_vars(&HashMap::new()).unwrap();
        assert_eq!(config.interface_mode, InterfaceMode::Terminal);
        assert_eq!(config.window_manifest.len(), 5);
        assert_eq!(config.window_manifest[0].as_str(), "about");
        assert!(config.duplicate_window_ids.is_empty());
        assert!(config.dangerous_patterns.matches("sudo ls").is_some());
        assert!(config.dangerous_patterns.matches("RM -RF /").is_some());
        assert_eq!(config.initial_background, BackgroundMode::Particles);
        assert!(config.identity.available);
    }

    #[test]
    fn duplicate_manifest_entries_are_dropped() {
        let config = Config::from_vars(&vars(&[("WINDOW_MANIFEST", "a, b,a,,c")])).unwrap();
        let ids: Vec<&str> = config.window_manifest.iter().map(|w| w.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(config.duplicate_window_ids, vec![WindowId::from("a")]);
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(Config::from_vars(&vars(&[("INTERFACE_MODE", "gui")])).is_err());
        assert!(Config::from_vars(&vars(&[("WINDOW_MANIFEST", " , ")])).is_err());
        assert!(Config::from_vars(&vars(&[("OWNER_AVAILABLE", "maybe")])).is_err());
        assert!(Config::from_vars(&vars(&[("SUGGESTION_THRESHOLD", "1.5")])).is_err());
        assert!(Config::from_vars(&vars(&[("INITIAL_BACKGROUND", "lava")])).is_err());
    }

    #[test]
    fn env_file_is_read_without_touching_process_env() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "INTERFACE_MODE=json").unwrap();
        writeln!(file, "SESSION_USER=guest").unwrap();
        writeln!(file, "DANGEROUS_PATTERNS=shutdown").unwrap();
        let config = Config::from_env_file(file.path()).unwrap();
        assert_eq!(config.interface_mode, InterfaceMode::Json);
        assert_eq!(config.identity.user, "guest");
        assert!(config.dangerous_patterns.matches("sudo").is_none());
        assert!(config.dangerous_patterns.matches("please SHUTDOWN now").is_some());
        assert!(std::env::var("SESSION_USER").map(|v| v != "guest").unwrap_or(true));
    }
}
