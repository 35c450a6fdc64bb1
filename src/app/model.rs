//! The `App` struct: everything the TUI shows and every transition the
//! runtime drives, independent of terminal, audio device and network.

use tracing::{debug, info};

use crate::ai::{AiPayload, AiQuery, AiRequest, AiResponse, Generations, QueryGate, RequestKind};
use crate::catalog::{Reciter, Track, filter_catalog, reciters, surahs};
use crate::favorites::Favorites;
use crate::playback::{
    Direction, MediaEvent, MediaSource, PlaybackController, PlaybackSession, PlaybackState,
    advance,
};

use super::types::{
    InputMode, ReciterView, ReflectionState, RejectReason, Row, SearchState, Tab,
};

/// The main application model.
pub struct App<M: MediaSource> {
    pub player: PlaybackController<M>,
    pub favorites: Favorites,

    pub tab: Tab,
    pub selected: usize,

    pub input_mode: InputMode,
    pub query: String,
    pub search: SearchState,

    pub reciter: Option<ReciterView>,
    pub reflection: ReflectionState,
    pub details_open: bool,

    generations: Generations,
    gate: QueryGate,
}

impl<M: MediaSource> App<M> {
    /// Build the app and make the first surah current without playing it.
    pub fn new(media: M, favorites: Favorites, gate: QueryGate) -> Self {
        let mut player = PlaybackController::new(media);
        if let Some(first) = surahs().first() {
            player.select_track(first.clone());
        }

        Self {
            player,
            favorites,
            tab: Tab::default(),
            selected: 0,
            input_mode: InputMode::Normal,
            query: String::new(),
            search: SearchState::Idle,
            reciter: None,
            reflection: ReflectionState::Unavailable,
            details_open: false,
            generations: Generations::default(),
            gate,
        }
    }

    pub fn session(&self) -> &PlaybackSession {
        self.player.session()
    }

    pub fn playback_state(&self) -> PlaybackState {
        self.player.session().state()
    }

    /// The list next/previous and auto-advance walk: favorites on the
    /// favorites tab, the static catalog everywhere else.
    pub fn active_playlist(&self) -> &[Track] {
        playlist_for(self.tab, &self.favorites)
    }

    /// Rows of the main list for the current tab and search state.
    pub fn rows(&self) -> Vec<Row> {
        if let SearchState::Results(results) = &self.search {
            return results.iter().cloned().map(Row::Result).collect();
        }

        match self.tab {
            Tab::Surahs => filter_catalog(&self.query).into_iter().map(Row::Track).collect(),
            Tab::Reciters => match &self.reciter {
                Some(view) => view.tracks.iter().cloned().map(Row::Track).collect(),
                None => reciters().iter().map(Row::Reciter).collect(),
            },
            Tab::Favorites => self
                .favorites
                .tracks()
                .iter()
                .cloned()
                .map(Row::Track)
                .collect(),
        }
    }

    pub fn selected_row(&self) -> Option<Row> {
        self.rows().into_iter().nth(self.selected)
    }

    /// True when `row` is the current track.
    pub fn is_active(&self, row: &Row) -> bool {
        match (row.stream_url(), self.player.current_track()) {
            (Some(url), Some(current)) => current.stream_url == url,
            _ => false,
        }
    }

    pub fn is_favorite(&self, row: &Row) -> bool {
        row.stream_url()
            .map(|url| self.favorites.contains(url))
            .unwrap_or(false)
    }

    // ---- cursor ----

    /// Move the cursor down, wrapping to the top.
    pub fn next(&mut self) {
        let len = self.rows().len();
        if len > 0 {
            self.selected = (self.selected + 1) % len;
        }
    }

    /// Move the cursor up, wrapping to the bottom.
    pub fn prev(&mut self) {
        let len = self.rows().len();
        if len > 0 {
            self.selected = (self.selected + len - 1) % len;
        }
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.rows().len().saturating_sub(1);
    }

    fn clamp_selected(&mut self) {
        let len = self.rows().len();
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }

    pub fn toggle_details(&mut self) {
        self.details_open = !self.details_open;
    }

    // ---- tabs and navigation ----

    /// Switch tab. Leaving the reciters tab closes the open reciter; any
    /// switch drops search results and the rejection notice.
    pub fn switch_tab(&mut self, tab: Tab) {
        if tab != Tab::Reciters {
            self.close_reciter();
        }
        self.clear_search();
        self.tab = tab;
        self.selected = 0;
        debug!(tab = tab.title(), "switched tab");
    }

    /// Close whatever overlays the list: search results or notice, then the
    /// open reciter, then the live filter.
    pub fn back(&mut self) {
        if !matches!(self.search, SearchState::Idle) {
            self.clear_search();
        } else if self.reciter.is_some() {
            self.close_reciter();
        } else {
            self.query.clear();
        }
        self.selected = 0;
    }

    fn clear_search(&mut self) {
        self.generations.invalidate(RequestKind::Search);
        self.search = SearchState::Idle;
    }

    fn close_reciter(&mut self) {
        if self.reciter.take().is_some() {
            self.generations.invalidate(RequestKind::ReciterTracks);
        }
    }

    // ---- search input ----

    pub fn enter_search_mode(&mut self) {
        self.input_mode = InputMode::Search;
    }

    /// Leave the search box and drop the typed query.
    pub fn cancel_search_input(&mut self) {
        self.input_mode = InputMode::Normal;
        self.query.clear();
        self.selected = 0;
    }

    pub fn push_query_char(&mut self, c: char) {
        self.query.push(c);
        self.on_query_edited();
    }

    pub fn pop_query_char(&mut self) {
        self.query.pop();
        self.on_query_edited();
    }

    fn on_query_edited(&mut self) {
        if matches!(self.search, SearchState::Rejected(_)) {
            self.search = SearchState::Idle;
        }
        self.selected = 0;
    }

    /// Submit the typed query as a smart search.
    ///
    /// Blank queries are ignored. A denylisted query is rejected without
    /// reaching the service. Otherwise the returned request must be
    /// dispatched; its response is applied by `apply_ai_response`.
    pub fn submit_search(&mut self) -> Option<AiRequest> {
        self.input_mode = InputMode::Normal;
        let query = self.query.trim().to_string();
        if query.is_empty() {
            return None;
        }

        if !self.gate.allows(&query) {
            info!(query = %query, "search blocked by query gate");
            self.generations.invalidate(RequestKind::Search);
            self.search = SearchState::Rejected(RejectReason::Forbidden);
            self.selected = 0;
            return None;
        }

        let ticket = self.generations.issue(RequestKind::Search);
        self.search = SearchState::Searching;
        self.selected = 0;
        Some(AiRequest {
            ticket,
            query: AiQuery::Search(query),
        })
    }

    // ---- reciters and reflection ----

    /// Open `reciter` and return the request that fetches its tracks.
    pub fn open_reciter(&mut self, reciter: &'static Reciter) -> AiRequest {
        let ticket = self.generations.issue(RequestKind::ReciterTracks);
        self.reciter = Some(ReciterView {
            reciter,
            tracks: Vec::new(),
            loading: true,
        });
        self.selected = 0;
        AiRequest {
            ticket,
            query: AiQuery::ReciterTracks(reciter.name.to_string()),
        }
    }

    pub fn request_reflection(&mut self) -> AiRequest {
        let ticket = self.generations.issue(RequestKind::Reflection);
        self.reflection = ReflectionState::Loading;
        AiRequest {
            ticket,
            query: AiQuery::Reflection,
        }
    }

    /// Apply an AI result unless a newer request or an invalidation has
    /// superseded it.
    pub fn apply_ai_response(&mut self, response: AiResponse) {
        if !self.generations.is_current(&response.ticket) {
            debug!(
                kind = ?response.ticket.kind,
                generation = response.ticket.generation,
                "dropping stale AI response"
            );
            return;
        }

        match response.payload {
            AiPayload::Reflection(reflection) => {
                self.reflection = match reflection {
                    Some(r) => ReflectionState::Ready(r),
                    None => ReflectionState::Unavailable,
                };
            }
            AiPayload::Search(results) => {
                if results.is_empty() {
                    info!("smart search returned no results");
                    self.search = SearchState::Rejected(RejectReason::NoResults);
                } else {
                    debug!(count = results.len(), "smart search results");
                    self.search = SearchState::Results(results);
                }
                self.selected = 0;
            }
            AiPayload::ReciterTracks(refs) => {
                if let Some(view) = self.reciter.as_mut() {
                    let name = view.reciter.name;
                    view.tracks = refs.iter().map(|r| Track::from_track_ref(r, name)).collect();
                    view.loading = false;
                    debug!(reciter = name, count = view.tracks.len(), "reciter tracks loaded");
                }
                self.clamp_selected();
            }
        }
    }

    // ---- playback ----

    /// Act on the row under the cursor: play a track, play a search hit, or
    /// open a reciter (which returns a request to dispatch).
    pub fn activate_selected(&mut self) -> Option<AiRequest> {
        match self.selected_row()? {
            Row::Reciter(reciter) => Some(self.open_reciter(reciter)),
            Row::Result(result) => {
                self.play_track(Track::from_search_result(&result));
                self.clear_search();
                self.query.clear();
                self.selected = 0;
                None
            }
            Row::Track(track) => {
                self.play_track(track);
                None
            }
        }
    }

    /// Play `track`. Activating the current track resumes it instead of
    /// reloading.
    pub fn play_track(&mut self, track: Track) {
        let session = self.player.session();
        if session.is_current(&track) && session.error_message.is_none() {
            if !session.playing {
                self.player.toggle_play_pause();
            }
            return;
        }
        self.player.select_track(track);
    }

    pub fn toggle_play_pause(&mut self) {
        self.player.toggle_play_pause();
    }

    pub fn play(&mut self) {
        if !self.player.session().playing {
            self.player.toggle_play_pause();
        }
    }

    pub fn pause(&mut self) {
        if self.player.session().playing {
            self.player.toggle_play_pause();
        }
    }

    pub fn next_track(&mut self) {
        self.skip(Direction::Next);
    }

    pub fn prev_track(&mut self) {
        self.skip(Direction::Previous);
    }

    fn skip(&mut self, direction: Direction) {
        let playlist = playlist_for(self.tab, &self.favorites);
        if let Some(track) = advance(direction, playlist, self.player.current_track()).cloned() {
            self.player.select_track(track);
        }
    }

    pub fn retry(&mut self) {
        if self.player.session().error_message.is_some() {
            self.player.retry();
        }
    }

    pub fn handle_media_event(&mut self, event: MediaEvent) {
        match event {
            MediaEvent::Progress { position, duration } => self.player.on_progress(position, duration),
            MediaEvent::Error(reason) => {
                debug!(reason = %reason, "media error");
                self.player.on_playback_error();
            }
            MediaEvent::Ended => {
                let playlist = playlist_for(self.tab, &self.favorites);
                self.player.on_natural_completion(playlist);
            }
            MediaEvent::PlayState(playing) => self.player.on_external_play_state_change(playing),
        }
    }

    // ---- favorites ----

    /// Toggle the favorite flag of the selected track, or of the current
    /// track when the cursor is not on one.
    pub fn toggle_favorite(&mut self) {
        let track = self
            .selected_row()
            .and_then(|row| row.track())
            .or_else(|| self.player.current_track().cloned());
        let Some(track) = track else {
            return;
        };

        let now_favorite = self.favorites.toggle(&track);
        info!(title = %track.title, favorite = now_favorite, "toggled favorite");
        self.clamp_selected();
    }
}

fn playlist_for(tab: Tab, favorites: &Favorites) -> &[Track] {
    match tab {
        Tab::Favorites => favorites.tracks(),
        Tab::Surahs | Tab::Reciters => surahs(),
    }
}
