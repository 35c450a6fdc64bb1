use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::info;

use crate::ai::{AiResponse, Dispatcher};
use crate::app::{App, InputMode, Tab};
use crate::audio::AudioPlayer;
use crate::config;
use crate::mpris::{ControlCmd, MprisHandle};
use crate::playback::PlaybackState;
use crate::runtime::mpris_sync::update_mpris;
use crate::ui;

/// State tracked by the runtime event loop across iterations.
pub struct EventLoopState {
    /// Internal two-key prefix state used for `gg` handling.
    pub pending_gg: bool,
    /// Last-known current stream as emitted to MPRIS.
    pub last_mpris_url: Option<String>,
    /// Last-known playback state as emitted to MPRIS.
    pub last_mpris_playback: PlaybackState,
}

impl EventLoopState {
    pub fn new(app: &App<AudioPlayer>) -> Self {
        Self {
            pending_gg: false,
            last_mpris_url: app.player.current_track().map(|t| t.stream_url.clone()),
            last_mpris_playback: app.playback_state(),
        }
    }
}

/// Channels and handles the loop talks to besides the app itself.
pub struct Links<'a> {
    pub dispatcher: &'a Dispatcher,
    pub ai_rx: &'a mpsc::Receiver<AiResponse>,
    pub mpris: &'a MprisHandle,
    pub control_tx: &'a mpsc::Sender<ControlCmd>,
    pub control_rx: &'a mpsc::Receiver<ControlCmd>,
}

/// Main terminal event loop: handles input, UI drawing, device events, AI
/// responses and MPRIS. Returns `Ok(())` when shutdown is requested.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App<AudioPlayer>,
    links: &Links<'_>,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        let media_events = app.player.media().poll_events();
        for media_event in media_events {
            app.handle_media_event(media_event);
        }

        while let Ok(response) = links.ai_rx.try_recv() {
            app.apply_ai_response(response);
        }

        // Keep MPRIS in sync even when changes come from auto-advance or the device.
        let current_url = app.player.current_track().map(|t| t.stream_url.clone());
        let playback = app.playback_state();
        if current_url != state.last_mpris_url || playback != state.last_mpris_playback {
            update_mpris(links.mpris, app);
            state.last_mpris_url = current_url;
            state.last_mpris_playback = playback;
        }

        terminal.draw(|f| ui::draw(f, app, &settings.ui))?;

        while let Ok(cmd) = links.control_rx.try_recv() {
            if handle_control_cmd(cmd, settings, app) {
                return Ok(());
            }
        }

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, settings, app, links, state) {
                    break;
                }
            }
        }
    }

    Ok(())
}

fn quit(settings: &config::Settings, app: &App<AudioPlayer>) {
    info!("quitting");
    app.player
        .media()
        .quit_softly(Duration::from_millis(settings.audio.quit_fade_out_ms));
}

/// Execute a transport command. Returns true when the app should exit.
fn handle_control_cmd(cmd: ControlCmd, settings: &config::Settings, app: &mut App<AudioPlayer>) -> bool {
    match cmd {
        ControlCmd::Quit => {
            quit(settings, app);
            return true;
        }
        ControlCmd::Play => app.play(),
        // There is no stopped state once a track is loaded; stop pauses.
        ControlCmd::Pause | ControlCmd::Stop => app.pause(),
        ControlCmd::PlayPause => app.toggle_play_pause(),
        ControlCmd::Next => app.next_track(),
        ControlCmd::Prev => app.prev_track(),
    }
    false
}

/// Returns true when the app should exit.
fn handle_key_event(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App<AudioPlayer>,
    links: &Links<'_>,
    state: &mut EventLoopState,
) -> bool {
    if app.input_mode == InputMode::Search {
        state.pending_gg = false;
        match key.code {
            KeyCode::Esc => app.cancel_search_input(),
            KeyCode::Backspace => app.pop_query_char(),
            KeyCode::Enter => {
                if let Some(request) = app.submit_search() {
                    links.dispatcher.dispatch(request);
                }
            }
            KeyCode::Char(c) if !c.is_control() => app.push_query_char(c),
            _ => {}
        }
        return false;
    }

    if key.code != KeyCode::Char('g') {
        state.pending_gg = false;
    }

    match key.code {
        KeyCode::Char('q') => {
            quit(settings, app);
            return true;
        }
        KeyCode::Char('1') => app.switch_tab(Tab::Surahs),
        KeyCode::Char('2') => app.switch_tab(Tab::Reciters),
        KeyCode::Char('3') => app.switch_tab(Tab::Favorites),
        KeyCode::Tab => app.switch_tab(app.tab.next()),
        KeyCode::Char('/') => app.enter_search_mode(),
        KeyCode::Char('g') => {
            if state.pending_gg {
                state.pending_gg = false;
                app.select_first();
            } else {
                state.pending_gg = true;
            }
        }
        KeyCode::Char('G') => app.select_last(),
        KeyCode::Char('j') | KeyCode::Down => app.next(),
        KeyCode::Char('k') | KeyCode::Up => app.prev(),
        KeyCode::Enter => {
            if let Some(request) = app.activate_selected() {
                links.dispatcher.dispatch(request);
            }
        }
        KeyCode::Char('p') | KeyCode::Char(' ') => {
            let _ = links.control_tx.send(ControlCmd::PlayPause);
        }
        KeyCode::Char('l') => {
            let _ = links.control_tx.send(ControlCmd::Next);
        }
        KeyCode::Char('h') => {
            let _ = links.control_tx.send(ControlCmd::Prev);
        }
        KeyCode::Char('f') => app.toggle_favorite(),
        KeyCode::Char('r') => app.retry(),
        KeyCode::Char('K') => app.toggle_details(),
        KeyCode::Esc => {
            if app.details_open {
                app.toggle_details();
            } else {
                app.back();
            }
        }
        _ => {}
    }

    false
}
