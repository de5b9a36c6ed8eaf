use super::load::{default_config_path, default_state_dir, resolve_config_path};
use super::schema::*;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn resolve_config_path_prefers_yfitops_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("YFITOPS_CONFIG_PATH", "/tmp/yfitops-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/yfitops-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/xdg-config-home")
            .join("yfitops")
            .join("config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/home-dir")
            .join(".config")
            .join("yfitops")
            .join("config.toml")
    );
}

#[test]
fn state_dir_falls_back_to_home_local_state() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_STATE_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    assert_eq!(
        default_state_dir().unwrap(),
        std::path::PathBuf::from("/tmp/home-dir/.local/state/yfitops")
    );

    let s = Settings::default();
    assert_eq!(
        s.state_path().unwrap(),
        std::path::PathBuf::from("/tmp/home-dir/.local/state/yfitops/state.toml")
    );
}

#[test]
fn explicit_state_path_wins_over_xdg() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_STATE_HOME", "/tmp/xdg-state");

    let mut s = Settings::default();
    assert_eq!(
        s.log_path().unwrap(),
        std::path::PathBuf::from("/tmp/xdg-state/yfitops/yfitops.log")
    );

    s.storage.state_path = Some("/tmp/custom-state.toml".into());
    assert_eq!(
        s.state_path().unwrap(),
        std::path::PathBuf::from("/tmp/custom-state.toml")
    );
}

#[test]
fn settings_load_from_config_file_and_parse_locale_aliases() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[playback]
shuffle = true
repeat = true
autoload_first = false

[audio]
initial_volume = 0.5
volume_step = 0.05
seek_seconds = 5
reject_skip_ms = 10
error_skip_ms = 20

[ui]
header_text = "hello"
locale = "french"
search_result_limit = 3
featured_count = 2

[library]
demo_catalog = false
catalog_paths = ["/music/a.mp3"]
recursive = false

[synth]
sample_rate = 22050
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("YFITOPS_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("YFITOPS__AUDIO__SEEK_SECONDS");

    let s = Settings::load().unwrap();
    assert!(s.playback.shuffle);
    assert!(s.playback.repeat);
    assert!(!s.playback.autoload_first);
    assert_eq!(s.audio.initial_volume, 0.5);
    assert_eq!(s.audio.volume_step, 0.05);
    assert_eq!(s.audio.seek_seconds, 5);
    assert_eq!(s.audio.reject_skip_ms, 10);
    assert_eq!(s.audio.error_skip_ms, 20);
    assert_eq!(s.ui.header_text, "hello");
    assert_eq!(s.ui.locale, Locale::Fr);
    assert_eq!(s.ui.search_result_limit, 3);
    assert_eq!(s.ui.featured_count, 2);
    assert!(!s.library.demo_catalog);
    assert_eq!(
        s.library.catalog_paths,
        vec![std::path::PathBuf::from("/music/a.mp3")]
    );
    assert!(!s.library.recursive);
    assert_eq!(s.synth.sample_rate, 22050);
    assert!(s.validate().is_ok());
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[audio]
seek_seconds = 30
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("YFITOPS_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("YFITOPS__AUDIO__SEEK_SECONDS", "3");

    let s = Settings::load().unwrap();
    assert_eq!(s.audio.seek_seconds, 3);
}

#[test]
fn validate_rejects_out_of_range_values() {
    let mut s = Settings::default();
    assert!(s.validate().is_ok());

    s.synth.sample_rate = 0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.audio.initial_volume = 1.5;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.audio.volume_step = 0.0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.audio.volume_step = f32::NAN;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.audio.volume_step = f32::INFINITY;
    assert!(s.validate().is_err());
}
