//! Screen-reader style announcements.

use std::collections::VecDeque;

use log::info;

use crate::config::Locale;

const HISTORY_LEN: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Announcement {
    Ready,
    QueueUpdated(usize),
    Loaded { title: String, artist: String },
    Playing,
    Paused,
    NoMedia,
    PlaybackFailed(String),
    LoadError,
    Repeat(bool),
    Shuffle(bool),
    Muted(bool),
    Imported(usize),
    AddedToQueue(String),
}

impl Announcement {
    pub fn render(&self, locale: Locale) -> String {
        match locale {
            Locale::En => self.render_en(),
            Locale::Fr => self.render_fr(),
        }
    }

    fn render_en(&self) -> String {
        match self {
            Announcement::Ready => "Yfitops is ready. Enjoy the music!".to_string(),
            Announcement::QueueUpdated(n) => format!("Queue updated: {n} tracks"),
            Announcement::Loaded { title, artist } => format!("Loaded: {title} by {artist}"),
            Announcement::Playing => "Playing".to_string(),
            Announcement::Paused => "Paused".to_string(),
            Announcement::NoMedia => "No media available".to_string(),
            Announcement::PlaybackFailed(reason) => format!("Playback error: {reason}"),
            Announcement::LoadError => "Audio failed to load".to_string(),
            Announcement::Repeat(true) => "Repeat on".to_string(),
            Announcement::Repeat(false) => "Repeat off".to_string(),
            Announcement::Shuffle(true) => "Shuffle on".to_string(),
            Announcement::Shuffle(false) => "Shuffle off".to_string(),
            Announcement::Muted(true) => "Muted".to_string(),
            Announcement::Muted(false) => "Unmuted".to_string(),
            Announcement::Imported(n) => format!("{n} file(s) imported"),
            Announcement::AddedToQueue(title) => format!("Added to queue: {title}"),
        }
    }

    fn render_fr(&self) -> String {
        match self {
            Announcement::Ready => {
                "Yfitops chargé avec succès. Prêt à écouter de la musique!".to_string()
            }
            Announcement::QueueUpdated(n) => format!("File d'attente mise à jour: {n} titres"),
            Announcement::Loaded { title, artist } => format!("Chargé: {title} par {artist}"),
            Announcement::Playing => "Lecture en cours".to_string(),
            Announcement::Paused => "Pause".to_string(),
            Announcement::NoMedia => "Aucune musique disponible".to_string(),
            Announcement::PlaybackFailed(reason) => format!("Erreur de lecture: {reason}"),
            Announcement::LoadError => "Erreur de chargement audio".to_string(),
            Announcement::Repeat(true) => "Répétition activée".to_string(),
            Announcement::Repeat(false) => "Répétition désactivée".to_string(),
            Announcement::Shuffle(true) => "Aléatoire activé".to_string(),
            Announcement::Shuffle(false) => "Aléatoire désactivé".to_string(),
            Announcement::Muted(true) => "Son coupé".to_string(),
            Announcement::Muted(false) => "Son rétabli".to_string(),
            Announcement::Imported(n) => format!("{n} fichier(s) importé(s) avec succès"),
            Announcement::AddedToQueue(title) => format!("Ajouté à la file: {title}"),
        }
    }
}

/// Keeps the latest announcement for display plus a short history.
#[derive(Debug)]
pub struct Announcer {
    locale: Locale,
    last: Option<String>,
    history: VecDeque<Announcement>,
}

impl Announcer {
    pub fn new(locale: Locale) -> Self {
        Self {
            locale,
            last: None,
            history: VecDeque::with_capacity(HISTORY_LEN),
        }
    }

    pub fn announce(&mut self, announcement: Announcement) {
        let text = announcement.render(self.locale);
        info!("{text}");
        self.last = Some(text);

        if self.history.len() == HISTORY_LEN {
            self.history.pop_front();
        }
        self.history.push_back(announcement);
    }

    /// Rendered text of the most recent announcement.
    pub fn last(&self) -> Option<&str> {
        self.last.as_deref()
    }

    /// Oldest first.
    #[cfg(test)]
    pub fn history(&self) -> impl Iterator<Item = &Announcement> {
        self.history.iter()
    }

    #[cfg(test)]
    pub fn locale(&self) -> Locale {
        self.locale
    }
}
