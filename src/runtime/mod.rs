use std::sync::mpsc;

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{info, warn};

use crate::ai::{Dispatcher, QueryGate};
use crate::app::App;
use crate::audio::AudioPlayer;
use crate::mpris::ControlCmd;

mod event_loop;
mod mpris_sync;
mod settings;
mod startup;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (settings, config_warning) = settings::load_settings();
    let _log_guard = startup::init_logging(&settings);
    if let Some(msg) = config_warning {
        eprintln!("tilawa: {msg}");
        warn!("{msg}");
    }
    info!(version = env!("CARGO_PKG_VERSION"), "starting tilawa");

    let favorites = startup::open_favorites(&settings);
    let (dispatcher, ai_rx) = Dispatcher::new(startup::recitation_service(&settings));
    let audio_player = AudioPlayer::new(settings.audio.clone());
    let gate = QueryGate::new(&settings.search.extra_blocked_terms);
    let mut app = App::new(audio_player, favorites, gate);

    if settings.ai.reflection_on_start {
        dispatcher.dispatch(app.request_reflection());
    }

    let (control_tx, control_rx) = mpsc::channel::<ControlCmd>();
    let mpris = crate::mpris::spawn_mpris(control_tx.clone());

    mpris_sync::update_mpris(&mpris, &app);

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result: Result<(), Box<dyn std::error::Error>> = (|| {
        let mut state = event_loop::EventLoopState::new(&app);
        let links = event_loop::Links {
            dispatcher: &dispatcher,
            ai_rx: &ai_rx,
            mpris: &mpris,
            control_tx: &control_tx,
            control_rx: &control_rx,
        };

        event_loop::run(&mut terminal, &settings, &mut app, &links, &mut state)
    })();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &run_result {
        warn!(error = %e, "event loop ended with an error");
    }
    run_result
}
