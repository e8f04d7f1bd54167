use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::core::RiskmapConfig;
use super::overrides::apply_overrides;
use crate::errors::RiskError;

pub const CONFIG_FILE_NAME: &str = ".riskmap.toml";
const MAX_TRAVERSAL_DEPTH: usize = 10;

/// Pure function to read config file contents
pub(crate) fn read_config_file(path: &Path) -> Result<String, std::io::Error> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Parses TOML and replaces invalid sections with their defaults.
pub fn parse_and_validate_config(contents: &str) -> Result<RiskmapConfig, String> {
    let config = parse_config(contents)?;
    Ok(config.sanitized())
}

/// Parses TOML without any validation.
pub fn parse_config(contents: &str) -> Result<RiskmapConfig, String> {
    toml::from_str::<RiskmapConfig>(contents)
        .map_err(|e| format!("Failed to parse {}: {}", CONFIG_FILE_NAME, e))
}

/// Pure function to try loading config from a specific path
pub(crate) fn try_load_config_from_path(config_path: &Path) -> Option<RiskmapConfig> {
    let contents = match read_config_file(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            handle_read_error(config_path, &e);
            return None;
        }
    };

    match parse_and_validate_config(&contents) {
        Ok(config) => {
            debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            warn!("{}. Using defaults.", e);
            None
        }
    }
}

/// Handle file read errors with appropriate logging
pub(crate) fn handle_read_error(config_path: &Path, error: &std::io::Error) {
    // Only log actual errors, not "file not found"
    if error.kind() != std::io::ErrorKind::NotFound {
        warn!(
            "Failed to read config file {}: {}",
            config_path.display(),
            error
        );
    }
}

/// Pure function to generate directory ancestors up to a depth limit
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Finds the nearest `.riskmap.toml` at or above `start`.
pub fn discover_config_path(start: &Path) -> Option<PathBuf> {
    directory_ancestors(start.to_path_buf(), MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find(|path| path.is_file())
}

/// Loads the file configuration found from `start`, or defaults.
pub fn load_config_from(start: &Path) -> RiskmapConfig {
    directory_ancestors(start.to_path_buf(), MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            RiskmapConfig::default()
        })
}

/// Loads configuration from an explicit path. Unlike discovery, a missing or
/// malformed file is an error.
pub fn load_config_from_path(path: &Path) -> Result<RiskmapConfig, RiskError> {
    let contents = read_config_file(path)
        .map_err(|e| RiskError::Config(format!("cannot read {}: {}", path.display(), e)))?;
    parse_and_validate_config(&contents).map_err(RiskError::Config)
}

pub fn load_config() -> RiskmapConfig {
    match std::env::current_dir() {
        Ok(dir) => load_config_from(&dir),
        Err(e) => {
            warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            RiskmapConfig::default()
        }
    }
}

/// File configuration exactly as written, for reporting validation problems
/// instead of repairing them. Falls back to defaults when no file is found.
pub fn load_unvalidated_config(explicit: Option<&Path>) -> Result<RiskmapConfig, RiskError> {
    let path = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => std::env::current_dir()
            .ok()
            .and_then(|dir| discover_config_path(&dir)),
    };
    let Some(path) = path else {
        return Ok(RiskmapConfig::default());
    };
    let contents = read_config_file(&path)
        .map_err(|e| RiskError::Config(format!("cannot read {}: {}", path.display(), e)))?;
    parse_config(&contents).map_err(RiskError::Config)
}

/// Resolves the effective configuration: defaults, then the file (explicit
/// or discovered), then overrides from `lookup`. Overrides that make a
/// section invalid cause that section to fall back to defaults.
pub fn resolve_config<F>(explicit: Option<&Path>, lookup: F) -> Result<RiskmapConfig, RiskError>
where
    F: Fn(&str) -> Option<String>,
{
    let file_config = match explicit {
        Some(path) => load_config_from_path(path)?,
        None => load_config(),
    };
    Ok(apply_overrides(file_config, lookup).sanitized())
}
