use std::path::PathBuf;

use super::*;
use crate::config::{Locale, UiSettings};
use crate::library::{Track, TrackSource};
use crate::prefs::Theme;

fn t(id: &str, title: &str, artist: &str) -> Track {
    Track {
        id: id.into(),
        title: title.into(),
        artist: artist.into(),
        source: TrackSource::File(PathBuf::from(format!("/music/{id}.wav"))),
        duration: None,
        is_user_import: false,
    }
}

fn catalog() -> Vec<Track> {
    vec![
        t("gen1", "Sunny Walk", "Yfitops Studio"),
        t("gen2", "Creative Minds", "Yfitops Beats"),
        t("gen3", "Acoustic Breeze", "Yfitops Chill"),
        t("gen4", "Happy Rock", "Yfitops Energy"),
        t("gen5", "Groovy Piano", "Yfitops Keys"),
    ]
}

fn app() -> App {
    App::new(catalog(), &UiSettings::default(), Theme::Dark)
}

fn ids(tracks: &[&Track]) -> Vec<String> {
    tracks.iter().map(|t| t.id.clone()).collect()
}

#[test]
fn default_view_splits_featured_and_popular() {
    let app = app();
    let sections = app.sections();

    assert_eq!(sections.len(), 2);
    assert_eq!(sections[0].kind, SectionKind::Featured);
    assert_eq!(ids(&sections[0].tracks), vec!["gen1", "gen2", "gen3"]);
    assert_eq!(sections[1].kind, SectionKind::Popular);
    assert_eq!(ids(&sections[1].tracks), vec!["gen4", "gen5"]);
}

#[test]
fn imports_get_their_own_section() {
    let mut app = app();
    let mut imported = t("user-1-0", "My Song", "Me");
    imported.is_user_import = true;

    app.add_imports(&[imported]);
    let sections = app.sections();

    assert_eq!(sections.len(), 3);
    assert_eq!(sections[2].kind, SectionKind::Imports);
    assert_eq!(app.visible_tracks().len(), 6);
}

#[test]
fn short_catalog_has_no_popular_section() {
    let app = App::new(catalog()[..2].to_vec(), &UiSettings::default(), Theme::Dark);
    let kinds: Vec<_> = app.sections().iter().map(|s| s.kind).collect();
    assert_eq!(kinds, vec![SectionKind::Featured]);
}

#[test]
fn search_replaces_sections_with_results() {
    let mut app = app();
    app.enter_search_mode();
    for c in "PIANO".chars() {
        app.push_search_char(c);
    }

    let sections = app.sections();
    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0].kind, SectionKind::Results);
    assert_eq!(ids(&sections[0].tracks), vec!["gen5"]);
}

#[test]
fn search_matches_artist_and_is_capped() {
    let ui = UiSettings {
        search_result_limit: 2,
        ..UiSettings::default()
    };
    let mut app = App::new(catalog(), &ui, Theme::Dark);
    app.search_query = "yfitops".into();

    assert_eq!(ids(&app.visible_tracks()), vec!["gen1", "gen2"]);
}

#[test]
fn search_without_matches_is_an_empty_results_section() {
    let mut app = app();
    app.search_query = "zzz".into();

    let sections = app.sections();
    assert_eq!(sections.len(), 1);
    assert!(sections[0].tracks.is_empty());
    assert!(app.selected_track().is_none());
}

#[test]
fn blank_query_is_default_view() {
    let mut app = app();
    app.search_query = "   ".into();

    assert!(!app.search_active());
    assert_eq!(app.sections().len(), 2);
}

#[test]
fn cursor_wraps_both_ways() {
    let mut app = app();

    app.prev();
    assert_eq!(app.selected, 4);
    assert_eq!(app.selected_track().unwrap().id, "gen5");

    app.next();
    assert_eq!(app.selected, 0);
    app.next();
    assert_eq!(app.selected_track().unwrap().id, "gen2");
}

#[test]
fn narrowing_search_clamps_cursor() {
    let mut app = app();
    app.set_selected(4);

    app.search_query = "rock".into();
    app.pop_search_char();
    app.push_search_char('k');

    assert_eq!(app.selected, 0);
    assert_eq!(app.selected_track().unwrap().id, "gen4");

    app.clear_search();
    assert_eq!(app.mode, InputMode::Normal);
    assert!(app.search_query.is_empty());
}

#[test]
fn set_selected_stays_in_range() {
    let mut app = app();
    app.set_selected(99);
    assert_eq!(app.selected, 4);
}

#[test]
fn select_track_moves_cursor_to_visible_card() {
    let mut app = app();

    app.select_track("gen4");
    assert_eq!(app.selected, 3);

    app.select_track("missing");
    assert_eq!(app.selected, 3);

    app.search_query = "piano".into();
    app.select_track("gen5");
    assert_eq!(app.selected, 0);
}

#[test]
fn import_prompt_yields_paths() {
    let mut app = app();
    app.enter_import_mode();
    for c in "/a.mp3 '/b c.ogg'".chars() {
        app.push_import_char(c);
    }
    app.push_import_char('x');
    app.pop_import_char();

    let paths = app.take_import_paths();

    assert_eq!(app.mode, InputMode::Normal);
    assert!(app.import_input.is_empty());
    assert_eq!(paths, vec![PathBuf::from("/a.mp3"), PathBuf::from("/b c.ogg")]);
}

#[test]
fn parse_path_list_handles_quotes_and_escapes() {
    assert_eq!(
        parse_path_list(r#"  /x/one\ two.mp3 "/y/it's.wav"  "#),
        vec![PathBuf::from("/x/one two.mp3"), PathBuf::from("/y/it's.wav")]
    );
    assert!(parse_path_list("   ").is_empty());
}

#[test]
fn toggle_theme_flips() {
    let mut app = app();
    assert_eq!(app.toggle_theme(), Theme::Light);
    assert_eq!(app.toggle_theme(), Theme::Dark);
}

#[test]
fn section_labels_follow_locale() {
    assert_eq!(SectionKind::Imports.label(Locale::En), "Your imports");
    assert_eq!(SectionKind::Featured.label(Locale::Fr), "À la une");
}
