//! Application module: exposes the app model used by the TUI and runtime.
//!
//! The `App` model lives in `app::model` and holds the catalog, the user
//! imports, the card cursor and the input modes. Playback state lives in
//! the player's controller.

mod model;

pub use model::*;

#[cfg(test)]
mod tests;
