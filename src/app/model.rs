//! Application model types: `App`, input modes and card sections.

use std::path::PathBuf;

use crate::config::{Locale, UiSettings};
use crate::library::{Track, search};
use crate::prefs::Theme;

/// What keystrokes are currently routed to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    /// Typing a search query.
    Search,
    /// Typing paths to import.
    Import,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SectionKind {
    Featured,
    Popular,
    Imports,
    Results,
}

impl SectionKind {
    pub fn label(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (SectionKind::Featured, Locale::En) => "Featured",
            (SectionKind::Featured, Locale::Fr) => "À la une",
            (SectionKind::Popular, Locale::En) => "Popular",
            (SectionKind::Popular, Locale::Fr) => "Populaires",
            (SectionKind::Imports, Locale::En) => "Your imports",
            (SectionKind::Imports, Locale::Fr) => "Vos imports",
            (SectionKind::Results, Locale::En) => "Search results",
            (SectionKind::Results, Locale::Fr) => "Résultats de recherche",
        }
    }
}

/// A titled group of cards.
#[derive(Debug)]
pub struct Section<'a> {
    pub kind: SectionKind,
    pub tracks: Vec<&'a Track>,
}

/// The main application model.
pub struct App {
    pub catalog: Vec<Track>,
    pub imports: Vec<Track>,
    /// Cursor over the flattened visible cards.
    pub selected: usize,
    pub mode: InputMode,
    pub search_query: String,
    pub import_input: String,
    pub theme: Theme,
    locale: Locale,
    featured_count: usize,
    search_limit: usize,
}

impl App {
    /// Create a new `App` showing `catalog`.
    pub fn new(catalog: Vec<Track>, ui: &UiSettings, theme: Theme) -> Self {
        Self {
            catalog,
            imports: Vec::new(),
            selected: 0,
            mode: InputMode::Normal,
            search_query: String::new(),
            import_input: String::new(),
            theme,
            locale: ui.locale,
            featured_count: ui.featured_count,
            search_limit: ui.search_result_limit,
        }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Record freshly imported tracks for the "Your imports" section.
    pub fn add_imports(&mut self, tracks: &[Track]) {
        self.imports.extend_from_slice(tracks);
    }

    /// Flip the theme and return the new one.
    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.theme
    }

    /// `true` when a non-blank query replaces the section view.
    pub fn search_active(&self) -> bool {
        !self.search_query.trim().is_empty()
    }

    /// Sections in display order.
    ///
    /// The default view omits empty sections; a search yields a single
    /// results section (possibly empty) capped at the configured limit.
    pub fn sections(&self) -> Vec<Section<'_>> {
        if let Some(mut results) = search(&self.catalog, &self.imports, &self.search_query) {
            results.truncate(self.search_limit);
            return vec![Section {
                kind: SectionKind::Results,
                tracks: results,
            }];
        }

        let split = self.featured_count.min(self.catalog.len());
        let (featured, popular) = self.catalog.split_at(split);

        [
            (SectionKind::Featured, featured),
            (SectionKind::Popular, popular),
            (SectionKind::Imports, self.imports.as_slice()),
        ]
        .into_iter()
        .filter(|(_, tracks)| !tracks.is_empty())
        .map(|(kind, tracks)| Section {
            kind,
            tracks: tracks.iter().collect(),
        })
        .collect()
    }

    /// Every visible card in display order.
    pub fn visible_tracks(&self) -> Vec<&Track> {
        self.sections()
            .into_iter()
            .flat_map(|section| section.tracks)
            .collect()
    }

    pub fn selected_track(&self) -> Option<&Track> {
        self.visible_tracks().get(self.selected).copied()
    }

    /// Move the cursor to the next card, wrapping to the first.
    pub fn next(&mut self) {
        let len = self.visible_tracks().len();
        if len > 0 {
            self.selected = (self.selected + 1) % len;
        }
    }

    /// Move the cursor to the previous card, wrapping to the last.
    pub fn prev(&mut self) {
        let len = self.visible_tracks().len();
        if len > 0 {
            self.selected = if self.selected == 0 {
                len - 1
            } else {
                self.selected - 1
            };
        }
    }

    pub fn set_selected(&mut self, idx: usize) {
        self.selected = idx;
        self.ensure_selected_visible();
    }

    /// Move the cursor onto the first visible card with `id`.
    pub fn select_track(&mut self, id: &str) {
        if let Some(pos) = self.visible_tracks().iter().position(|t| t.id == id) {
            self.set_selected(pos);
        }
    }

    // ---- search ----

    pub fn enter_search_mode(&mut self) {
        self.mode = InputMode::Search;
    }

    /// Leave search input but keep the query applied.
    pub fn exit_search_mode(&mut self) {
        self.mode = InputMode::Normal;
    }

    pub fn clear_search(&mut self) {
        self.search_query.clear();
        self.mode = InputMode::Normal;
        self.ensure_selected_visible();
    }

    pub fn push_search_char(&mut self, c: char) {
        self.search_query.push(c);
        self.selected = 0;
    }

    pub fn pop_search_char(&mut self) {
        self.search_query.pop();
        self.ensure_selected_visible();
    }

    // ---- import prompt ----

    pub fn enter_import_mode(&mut self) {
        self.mode = InputMode::Import;
        self.import_input.clear();
    }

    pub fn cancel_import(&mut self) {
        self.mode = InputMode::Normal;
        self.import_input.clear();
    }

    pub fn push_import_char(&mut self, c: char) {
        self.import_input.push(c);
    }

    pub fn pop_import_char(&mut self) {
        self.import_input.pop();
    }

    /// Close the prompt and return the typed paths.
    pub fn take_import_paths(&mut self) -> Vec<PathBuf> {
        self.mode = InputMode::Normal;
        let input = std::mem::take(&mut self.import_input);
        parse_path_list(&input)
    }

    fn ensure_selected_visible(&mut self) {
        let len = self.visible_tracks().len();
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }
}

/// Split a pasted path list the way terminals paste dropped files:
/// whitespace separated, with quotes and backslash escapes.
pub fn parse_path_list(input: &str) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut chars = input.chars();

    while let Some(c) = chars.next() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), c) => current.push(c),
            (None, '\'' | '"') => quote = Some(c),
            (None, '\\') => {
                if let Some(escaped) = chars.next() {
                    current.push(escaped);
                }
            }
            (None, c) if c.is_whitespace() => {
                if !current.is_empty() {
                    paths.push(PathBuf::from(std::mem::take(&mut current)));
                }
            }
            (None, c) => current.push(c),
        }
    }
    if !current.is_empty() {
        paths.push(PathBuf::from(current));
    }

    paths
}
