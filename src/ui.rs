//! UI rendering for the terminal user interface.
//!
//! Everything here is a pure function of `App` state and `UiSettings`; the
//! runtime calls `draw` once per loop iteration.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, ListState, Padding, Paragraph, Tabs, Wrap},
};
use std::time::Duration;

use crate::app::{App, InputMode, ReflectionState, Row, SearchState, Tab};
use crate::config::{TimeField, UiSettings};
use crate::playback::{MediaSource, PlaybackSession};

const GOLD: Color = Color::Rgb(212, 175, 55);

const CONTROLS: [(&str, &str); 13] = [
    ("1/2/3", "tabs"),
    ("j/k", "up/down"),
    ("gg/G", "top/bottom"),
    ("enter", "play / open"),
    ("space/p", "play/pause"),
    ("h/l", "prev/next"),
    ("f", "favorite"),
    ("/", "search"),
    ("esc", "back"),
    ("r", "retry"),
    ("K", "details"),
    ("tab", "next tab"),
    ("q", "quit"),
];

/// Shown instead of search results when a query is refused or finds nothing.
pub const SANCTUARY_TITLE: &str = "واحة السكينة والنور";
pub const SANCTUARY_MESSAGE: &str = "عذراً، هذا التطبيق خُصص ليكون واحةً للسكينة ونوراً للقلوب عبر آيات الذكر الحكيم وتلاوات القراء العذبة فقط.";

fn controls_text() -> String {
    CONTROLS
        .iter()
        .map(|(k, v)| format!("[{k}] {v}"))
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Format a `Duration` as `MM:SS`.
fn format_mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

fn secs(value: f64) -> Duration {
    Duration::try_from_secs_f64(value).unwrap_or_default()
}

/// Build the player time text (elapsed/total/remaining) per `UiSettings`.
pub(crate) fn now_playing_time_text(session: &PlaybackSession, ui: &UiSettings) -> Option<String> {
    let elapsed = secs(session.elapsed_secs);
    let total = session.total_secs.map(secs);

    let parts: Vec<String> = ui
        .now_playing_time_fields
        .iter()
        .filter_map(|f| match f {
            TimeField::Elapsed => Some(format_mmss(elapsed)),
            TimeField::Total => total.map(format_mmss),
            TimeField::Remaining => total.map(|t| format!("-{}", format_mmss(t.saturating_sub(elapsed)))),
        })
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(&ui.now_playing_time_separator))
    }
}

/// One-line label of a list row.
pub(crate) fn row_label(row: &Row) -> String {
    match row {
        Row::Track(t) => {
            if t.subtitle.is_empty() {
                t.title.clone()
            } else {
                format!("{} · {}", t.title, t.subtitle)
            }
        }
        Row::Reciter(r) => format!("{} · {}", r.name, r.style),
        Row::Result(r) if r.source.is_empty() => format!("{} · {}", r.title, r.reciter),
        Row::Result(r) => format!("{} · {} · {}", r.title, r.reciter, r.source),
    }
}

/// Compute a centered rectangle with given size constrained to `r`.
fn centered_rect_sized(mut width: u16, mut height: u16, r: Rect) -> Rect {
    width = width.min(r.width.saturating_sub(2)).max(10);
    height = height.min(r.height.saturating_sub(2)).max(5);

    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}

fn padded(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .padding(Padding {
            left: 1,
            right: 1,
            top: 0,
            bottom: 0,
        })
}

/// Render the entire UI into `frame`.
pub fn draw<M: MediaSource>(frame: &mut Frame, app: &App<M>, ui_settings: &UiSettings) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(6),
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(4),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" tilawa ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    let tabs = Tabs::new(Tab::ALL.iter().map(|t| t.title()).collect::<Vec<_>>())
        .select(app.tab.index())
        .highlight_style(Style::default().fg(GOLD).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(tabs, chunks[1]);

    draw_panel(frame, app, chunks[2]);
    draw_search_box(frame, app, chunks[3]);
    draw_list(frame, app, chunks[4]);
    draw_player(frame, app.session(), ui_settings, chunks[5]);

    if app.details_open {
        draw_details(frame, app, chunks[4]);
    }

    let footer = Paragraph::new(controls_text())
        .block(padded(" controls "))
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[6]);
}

/// The box above the list: notice, search progress, reciter header or the
/// daily reflection, depending on state.
fn draw_panel<M: MediaSource>(frame: &mut Frame, app: &App<M>, area: Rect) {
    let (title, lines): (&str, Vec<Line>) = match (&app.search, &app.reciter, app.tab) {
        // Forbidden queries and empty results share this notice.
        (SearchState::Rejected(_), _, _) => (
            " notice ",
            vec![
                Line::from(SANCTUARY_TITLE.bold().fg(GOLD)),
                Line::from(SANCTUARY_MESSAGE),
                Line::from("[esc] back".dim()),
            ],
        ),
        (SearchState::Searching, _, _) => (
            " smart search ",
            vec![Line::from(format!("Searching for \"{}\"...", app.query.trim()))],
        ),
        (SearchState::Results(results), _, _) => (
            " smart search ",
            vec![Line::from(format!(
                "{} result(s). [enter] play, [esc] close",
                results.len()
            ))],
        ),
        (SearchState::Idle, Some(view), _) => {
            let status = if view.loading {
                "Gathering the recited mushaf...".to_string()
            } else if view.tracks.is_empty() {
                "No recitations found.".to_string()
            } else {
                format!("{} recitation(s)", view.tracks.len())
            };
            (
                " reciter ",
                vec![
                    Line::from(view.reciter.name.bold().fg(GOLD)),
                    Line::from(view.reciter.style),
                    Line::from(status.dim()),
                ],
            )
        }
        (SearchState::Idle, None, Tab::Surahs) => (" reflection of the day ", reflection_lines(&app.reflection)),
        (SearchState::Idle, None, Tab::Reciters) => (
            " reciters ",
            vec![Line::from("Choose a reciter to list their complete recitation.")],
        ),
        (SearchState::Idle, None, Tab::Favorites) => {
            let text = if app.favorites.tracks().is_empty() {
                "No favorite recitations yet. Press [f] on a track to keep it here.".to_string()
            } else {
                format!("{} favorite(s)", app.favorites.tracks().len())
            };
            (" favorites ", vec![Line::from(text)])
        }
    };

    let panel = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(padded(title))
        .wrap(Wrap { trim: true });
    frame.render_widget(panel, area);
}

fn reflection_lines(state: &ReflectionState) -> Vec<Line<'static>> {
    match state.shown() {
        None => vec![Line::from("...".dim())],
        Some(r) => vec![
            Line::from(r.verse.bold().fg(GOLD)),
            Line::from(r.reflection.italic()),
            Line::from(format!("سورة {}", r.surah_name).dim()),
        ],
    }
}

fn draw_search_box<M: MediaSource>(frame: &mut Frame, app: &App<M>, area: Rect) {
    let editing = app.input_mode == InputMode::Search;
    let mut spans = vec![Span::raw(app.query.as_str())];
    if editing {
        spans.push(Span::raw("_").add_modifier(Modifier::SLOW_BLINK));
    } else if app.query.is_empty() {
        spans.push(Span::raw("press / to search a reciter, surah or recitation").dim());
    }

    let title = if editing {
        " search ([enter] smart search, [esc] cancel) "
    } else {
        " search "
    };
    let mut block = padded(title);
    if editing {
        block = block.border_style(Style::default().fg(GOLD));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn draw_list<M: MediaSource>(frame: &mut Frame, app: &App<M>, area: Rect) {
    let rows = app.rows();

    // Only build ListItems for the visible window, keeping the cursor centered.
    let total = rows.len();
    let list_height = area.height.saturating_sub(2) as usize;
    let sel_pos = app.selected.min(total.saturating_sub(1));
    let (start, end, selected_pos_in_visible) = if total <= list_height || list_height == 0 {
        (0, total, sel_pos)
    } else {
        let half = list_height / 2;
        let mut start = sel_pos.saturating_sub(half);
        if start + list_height > total {
            start = total - list_height;
        }
        (start, start + list_height, sel_pos - start)
    };

    let items: Vec<ListItem> = rows[start..end]
        .iter()
        .map(|row| {
            let active = if app.is_active(row) { "▶ " } else { "  " };
            let favorite = if app.is_favorite(row) { " ♥" } else { "" };
            let line = Line::from(vec![
                Span::styled(active, Style::default().fg(GOLD)),
                Span::raw(row_label(row)),
                Span::styled(favorite, Style::default().fg(Color::Red)),
            ]);
            ListItem::new(line)
        })
        .collect();

    let title = match (&app.search, app.tab) {
        (SearchState::Results(_), _) => " results ",
        (_, Tab::Surahs) => " surahs ",
        (_, Tab::Reciters) if app.reciter.is_some() => " recitations ",
        (_, Tab::Reciters) => " reciters ",
        (_, Tab::Favorites) => " favorites ",
    };

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ListState::default();
    if total > 0 {
        state.select(Some(selected_pos_in_visible));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_player(frame: &mut Frame, session: &PlaybackSession, ui: &UiSettings, area: Rect) {
    let block = padded(" player ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(inner);

    let Some(track) = &session.current_track else {
        frame.render_widget(Paragraph::new("Nothing selected".dim()), lines[0]);
        return;
    };

    let state = if session.playing { "Playing" } else { "Paused" };
    let mut spans = vec![
        Span::styled(track.title.as_str(), Style::default().fg(GOLD).add_modifier(Modifier::BOLD)),
        Span::raw(format!(" · {} • {state}", track.subtitle)),
    ];
    if let Some(time) = now_playing_time_text(session, ui) {
        spans.push(Span::raw(format!(" [{time}]")));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), lines[0]);

    if let Some(err) = &session.error_message {
        let text = Line::from(vec![
            Span::styled(err.as_str(), Style::default().fg(Color::Red)),
            Span::raw(" [r] retry").dim(),
        ]);
        frame.render_widget(Paragraph::new(text), lines[1]);
    } else {
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(GOLD))
            .ratio(session.progress.clamp(0.0, 1.0))
            .label("");
        frame.render_widget(gauge, lines[1]);
    }
}

/// Overlay with the selected row's details (keeps the list visible under it).
fn draw_details<M: MediaSource>(frame: &mut Frame, app: &App<M>, list_area: Rect) {
    let popup_area = centered_rect_sized(76, 10, list_area);
    frame.render_widget(Clear, popup_area);

    let text = match app.selected_row() {
        Some(Row::Track(t)) => {
            let verses = if t.verses_count == 0 {
                "-".to_string()
            } else {
                t.verses_count.to_string()
            };
            format!(
                "Title: {}\nReciter: {}\nCategory: {}\nVerses: {}\nStream: {}\nArtwork: {}",
                t.title,
                t.subtitle,
                t.category.label(),
                verses,
                t.stream_url,
                t.artwork_url
            )
        }
        Some(Row::Reciter(r)) => format!(
            "Name: {}\nStyle: {}\nId: {}\nImage: {}",
            r.name, r.style, r.id, r.image
        ),
        Some(Row::Result(r)) => format!(
            "Title: {}\nReciter: {}\nSource: {}\nStream: {}",
            r.title, r.reciter, r.source, r.url
        ),
        None => "Nothing selected".to_string(),
    };

    let paragraph = Paragraph::new(text)
        .block(padded(" details (K closes) "))
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, popup_area);
}
