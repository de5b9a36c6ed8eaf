use crate::config::Locale;

use super::model::Track;

/// Artist shown when neither tags nor the file name name one.
pub fn unknown_artist(locale: Locale) -> &'static str {
    match locale {
        Locale::En => "Unknown artist",
        Locale::Fr => "Artiste inconnu",
    }
}

/// Split a file stem following the `Artist - Title` convention.
///
/// The first ` - ` separates the artist; any further separators stay in
/// the title. Returns `None` when the stem has no separator or either side
/// is blank.
pub fn split_artist_title(stem: &str) -> Option<(String, String)> {
    let mut parts = stem.split(" - ");
    let artist = parts.next()?.trim();
    let rest: Vec<&str> = parts.collect();
    if rest.is_empty() {
        return None;
    }
    let title = rest.join(" - ");
    let title = title.trim();
    if artist.is_empty() || title.is_empty() {
        return None;
    }
    Some((artist.to_string(), title.to_string()))
}

/// Single-line card label: `Title · Artist`.
pub fn card_label(track: &Track) -> String {
    format!("{} · {}", track.title, track.artist)
}
