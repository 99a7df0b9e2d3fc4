use super::{ConfigError, RECEIPTS_DIR_NAME};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_INSTITUTION_NAME: &str = "Government Polytechnic College Chegunta 519";
pub const DEFAULT_TRANSITION_DELAY_MS: u64 = 300;
pub const MAX_TRANSITION_DELAY_MS: u64 = 5_000;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default = "default_institution_name")]
    pub institution_name: String,
    #[serde(default = "default_transition_delay_ms")]
    pub transition_delay_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub print_dir: Option<PathBuf>,
    #[serde(default = "default_true")]
    pub log_enabled: bool,
}

fn default_institution_name() -> String {
    DEFAULT_INSTITUTION_NAME.to_string()
}

fn default_transition_delay_ms() -> u64 {
    DEFAULT_TRANSITION_DELAY_MS
}

fn default_true() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            institution_name: default_institution_name(),
            transition_delay_ms: default_transition_delay_ms(),
            print_dir: None,
            log_enabled: true,
        }
    }
}

impl Settings {
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        serde_yaml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.institution_name.trim().is_empty() {
            return Err(ConfigError::Settings(
                "`institution_name` must be non-empty".to_string(),
            ));
        }
        if self.transition_delay_ms > MAX_TRANSITION_DELAY_MS {
            return Err(ConfigError::Settings(format!(
                "`transition_delay_ms` must be at most {MAX_TRANSITION_DELAY_MS}"
            )));
        }
        if let Some(print_dir) = &self.print_dir {
            if print_dir.as_os_str().is_empty() {
                return Err(ConfigError::Settings(
                    "`print_dir` must be non-empty when set".to_string(),
                ));
            }
        }
        Ok(())
    }

    pub fn transition_delay(&self) -> Duration {
        Duration::from_millis(self.transition_delay_ms)
    }

    /// Relative print directories resolve against the state root.
    pub fn resolve_print_dir(&self, state_root: &Path) -> PathBuf {
        match &self.print_dir {
            Some(dir) if dir.is_absolute() => dir.clone(),
            Some(dir) => state_root.join(dir),
            None => state_root.join(RECEIPTS_DIR_NAME),
        }
    }
}
