use log::debug;

use super::store::KeyValueStore;

pub const THEME_KEY: &str = "yfitops-theme";

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "dark" => Some(Theme::Dark),
            "light" => Some(Theme::Light),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

/// Read the persisted theme, falling back to [`Theme::Dark`] when the entry
/// is absent, unrecognized, or the store fails.
pub fn load_theme(store: &dyn KeyValueStore) -> Theme {
    match store.get(THEME_KEY) {
        Ok(Some(value)) => Theme::parse(&value).unwrap_or_default(),
        Ok(None) => Theme::default(),
        Err(e) => {
            debug!("theme read failed, using default: {e}");
            Theme::default()
        }
    }
}

/// Persist `theme`; failures are logged and otherwise ignored.
pub fn save_theme(store: &mut dyn KeyValueStore, theme: Theme) {
    if let Err(e) = store.set(THEME_KEY, theme.as_str()) {
        debug!("theme write failed: {e}");
    }
}
