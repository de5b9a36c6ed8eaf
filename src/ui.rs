//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use std::time::Duration;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Padding, Paragraph, Wrap},
};

use crate::app::{App, InputMode};
use crate::config::{Locale, Settings};
use crate::library::card_label;
use crate::player::{MediaHost, PlaybackController, Transport};
use crate::prefs::Theme;

const PROGRESS_WIDTH: usize = 24;

struct Palette {
    fg: Color,
    bg: Color,
    accent: Color,
    dim: Color,
}

fn palette(theme: Theme) -> Palette {
    match theme {
        Theme::Dark => Palette {
            fg: Color::Gray,
            bg: Color::Black,
            accent: Color::Green,
            dim: Color::DarkGray,
        },
        Theme::Light => Palette {
            fg: Color::Black,
            bg: Color::White,
            accent: Color::Blue,
            dim: Color::Gray,
        },
    }
}

/// Render the controls help text, incorporating seek seconds.
fn controls_text(seek_seconds: u64) -> String {
    [
        "[space] play/pause".to_string(),
        "[n/p] next/prev".to_string(),
        format!("[←/→] seek -/+{seek_seconds}s"),
        "[0-9] jump to 0-90%".to_string(),
        "[↑/↓] volume".to_string(),
        "[m] mute".to_string(),
        "[j/k] move".to_string(),
        "[enter] play card".to_string(),
        "[a] add to queue".to_string(),
        "[/] search".to_string(),
        "[i] import".to_string(),
        "[r] repeat".to_string(),
        "[s] shuffle".to_string(),
        "[t] theme".to_string(),
        "[q] quit".to_string(),
    ]
    .join(" | ")
}

/// Format seconds as `m:ss`. Non-finite or negative input renders `0:00`.
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "0:00".to_string();
    }
    let total = seconds.floor() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

fn format_duration(d: Duration) -> String {
    format_time(d.as_secs_f64())
}

/// Text progress bar; empty when the length is unknown.
fn progress_bar(position: Duration, duration: Option<Duration>) -> String {
    let ratio = match duration {
        Some(total) if !total.is_zero() => {
            (position.as_secs_f64() / total.as_secs_f64()).clamp(0.0, 1.0)
        }
        _ => 0.0,
    };
    let filled = (ratio * PROGRESS_WIDTH as f64).round() as usize;
    format!(
        "[{}{}]",
        "#".repeat(filled),
        "-".repeat(PROGRESS_WIDTH - filled)
    )
}

fn transport_label(transport: Transport, locale: Locale) -> &'static str {
    match (transport, locale) {
        (Transport::Stopped, Locale::En) => "Stopped",
        (Transport::Stopped, Locale::Fr) => "Arrêté",
        (Transport::Paused, Locale::En) => "Paused",
        (Transport::Paused, Locale::Fr) => "En pause",
        (Transport::Starting, Locale::En) => "Starting",
        (Transport::Starting, Locale::Fr) => "Démarrage",
        (Transport::Playing, Locale::En) => "Playing",
        (Transport::Playing, Locale::Fr) => "Lecture",
    }
}

fn no_results(locale: Locale) -> &'static str {
    match locale {
        Locale::En => "No results found",
        Locale::Fr => "Aucun résultat trouvé",
    }
}

fn on_off(flag: bool) -> &'static str {
    if flag { "ON" } else { "OFF" }
}

fn status_lines<H: MediaHost>(player: &PlaybackController<H>, locale: Locale) -> Vec<Line<'static>> {
    let now_playing = match player.current_track() {
        Some(track) => format!(
            "{} • {}",
            transport_label(player.transport(), locale),
            card_label(track)
        ),
        None => transport_label(Transport::Stopped, locale).to_string(),
    };

    let (position, duration) = player.progress();
    let time = format!(
        "{} {} / {}",
        progress_bar(position, duration),
        format_duration(position),
        duration.map_or_else(|| "-:--".to_string(), format_duration)
    );

    let volume = if player.muted() {
        "muted".to_string()
    } else {
        format!("{:.0}%", player.volume() * 100.0)
    };
    let flags = format!(
        "Volume: {volume} • Repeat: {} • Shuffle: {}",
        on_off(player.repeat()),
        on_off(player.shuffle())
    );

    let mut lines = vec![Line::from(now_playing), Line::from(time), Line::from(flags)];
    if let Some(message) = player.announcer().last() {
        lines.push(Line::from(Span::styled(
            message.to_string(),
            Style::default().add_modifier(Modifier::ITALIC),
        )));
    }
    lines
}

/// Render the entire UI into the provided `frame`.
pub fn draw<H: MediaHost>(
    frame: &mut Frame,
    app: &App,
    player: &PlaybackController<H>,
    settings: &Settings,
) {
    let colors = palette(app.theme);
    let base = Style::default().fg(colors.fg).bg(colors.bg);
    let locale = app.locale();

    let prompt_height = if app.mode == InputMode::Normal && !app.search_active() {
        0
    } else {
        3
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(6),
            Constraint::Length(prompt_height),
            Constraint::Min(1),
            Constraint::Length(4),
        ])
        .split(frame.area());

    frame.render_widget(Block::default().style(base), frame.area());

    // Header
    let header = Paragraph::new(settings.ui.header_text.as_str())
        .alignment(Alignment::Center)
        .style(base.fg(colors.accent).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" yfitops ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    // Status box
    let status = Paragraph::new(status_lines(player, locale))
        .style(base)
        .block(
            Block::bordered()
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                })
                .title(" now playing "),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(status, chunks[1]);

    // Search / import prompt
    if prompt_height > 0 {
        let (title, text) = match app.mode {
            InputMode::Import => (" import (enter: confirm, esc: cancel) ", &app.import_input),
            _ => (" search ", &app.search_query),
        };
        let cursor = if app.mode == InputMode::Normal { "" } else { "_" };
        let prompt = Paragraph::new(format!("{text}{cursor}"))
            .style(base)
            .block(Block::bordered().title(title));
        frame.render_widget(prompt, chunks[2]);
    }

    // Cards, grouped by section
    let mut items: Vec<ListItem> = Vec::new();
    let mut selected_item = None;
    let mut card = 0;
    let playing_id = player.current_track().map(|t| t.id.as_str());

    for section in app.sections() {
        items.push(ListItem::new(Line::from(Span::styled(
            section.kind.label(locale),
            Style::default()
                .fg(colors.accent)
                .add_modifier(Modifier::BOLD),
        ))));

        if section.tracks.is_empty() {
            items.push(ListItem::new(Span::styled(
                format!("  {}", no_results(locale)),
                Style::default().fg(colors.dim),
            )));
        }

        for track in section.tracks {
            if card == app.selected {
                selected_item = Some(items.len());
            }
            let marker = if Some(track.id.as_str()) == playing_id { "♪ " } else { "  " };
            let length = track
                .duration
                .map(|d| format!("  ({})", format_duration(d)))
                .unwrap_or_default();
            items.push(ListItem::new(format!("{marker}{}{length}", card_label(track))));
            card += 1;
        }
    }

    let list = List::new(items)
        .style(base)
        .block(Block::default().borders(Borders::ALL).title(" tracks "))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ListState::default();
    state.select(selected_item);
    frame.render_stateful_widget(list, chunks[3], &mut state);

    let footer = Paragraph::new(controls_text(settings.audio.seek_seconds))
        .style(base.fg(colors.dim))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[4]);
}
