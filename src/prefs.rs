//! Persisted user preferences.
//!
//! The only persisted value is the theme, stored under one key of a small
//! key-value store. Storage failures never surface to the user.

mod store;
mod theme;

pub use store::{FileStore, KeyValueStore, StoreError};
#[cfg(test)]
pub use store::MemoryStore;
pub use theme::{THEME_KEY, Theme, load_theme, save_theme};

#[cfg(test)]
mod tests;
