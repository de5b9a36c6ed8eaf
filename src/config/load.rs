use std::{env, path::PathBuf};

use super::schema::Settings;

const APP_DIR: &str = "yfitops";

/// Configuration loading helpers.
///
/// `Settings::load` layers struct defaults, an optional config file and
/// environment variables (prefix `YFITOPS__`), the latter winning.
impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("YFITOPS")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        if self.synth.sample_rate == 0 {
            return Err("synth.sample_rate must be >= 1".to_string());
        }
        if !(0.0..=1.0).contains(&self.audio.initial_volume) {
            return Err("audio.initial_volume must be within 0.0..=1.0".to_string());
        }
        if !(self.audio.volume_step > 0.0) || !self.audio.volume_step.is_finite() {
            return Err("audio.volume_step must be a finite value > 0".to_string());
        }
        Ok(())
    }

    /// Where the persisted theme lives.
    pub fn state_path(&self) -> Option<PathBuf> {
        self.storage
            .state_path
            .clone()
            .or_else(|| default_state_dir().map(|d| d.join("state.toml")))
    }

    /// Where the log file lives.
    pub fn log_path(&self) -> Option<PathBuf> {
        self.logging
            .file
            .clone()
            .or_else(|| default_state_dir().map(|d| d.join("yfitops.log")))
    }
}

/// Resolve the config path from `YFITOPS_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("YFITOPS_CONFIG_PATH") {
        return Some(PathBuf::from(p));
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/yfitops/config.toml`
/// or `~/.config/yfitops/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    let config_home = if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(".config"))
    };

    config_home.map(|d| d.join(APP_DIR).join("config.toml"))
}

/// `$XDG_STATE_HOME/yfitops` or `~/.local/state/yfitops`.
pub fn default_state_dir() -> Option<PathBuf> {
    let state_home = if let Some(xdg) = env::var_os("XDG_STATE_HOME") {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(".local").join("state"))
    };

    state_home.map(|d| d.join(APP_DIR))
}
