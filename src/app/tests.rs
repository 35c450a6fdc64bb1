use super::*;
use crate::ai::{
    AiPayload, AiQuery, AiRequest, AiResponse, DailyReflection, QueryGate, SearchResult, TrackRef,
};
use crate::catalog::{reciters, surahs};
use crate::error::Result;
use crate::favorites::{Favorites, FavoritesSet, KeyValueStore, MemoryStore};
use crate::playback::{MediaEvent, MediaSource, PLAYBACK_ERROR_MESSAGE};

#[derive(Default)]
struct FakeMedia {
    loads: Vec<String>,
    plays: usize,
    pauses: usize,
}

impl MediaSource for FakeMedia {
    fn load(&mut self, url: &str) {
        self.loads.push(url.to_string());
    }

    fn play(&mut self) -> Result<()> {
        self.plays += 1;
        Ok(())
    }

    fn pause(&mut self) {
        self.pauses += 1;
    }
}

fn new_app() -> (App<FakeMedia>, MemoryStore) {
    let store = MemoryStore::new();
    let favorites = Favorites::load(Box::new(store.clone()), "favorites_v1");
    (App::new(FakeMedia::default(), favorites, QueryGate::default()), store)
}

fn current_url(app: &App<FakeMedia>) -> String {
    app.player.current_track().unwrap().stream_url.clone()
}

fn hit(title: &str, url: &str) -> SearchResult {
    SearchResult {
        title: title.to_string(),
        reciter: "Maher Al-Muaiqly".to_string(),
        url: url.to_string(),
        source: "mp3quran".to_string(),
    }
}

fn respond(request: &AiRequest, payload: AiPayload) -> AiResponse {
    AiResponse {
        ticket: request.ticket,
        payload,
    }
}

fn search(app: &mut App<FakeMedia>, query: &str) -> Option<AiRequest> {
    app.enter_search_mode();
    for c in query.chars() {
        app.push_query_char(c);
    }
    app.submit_search()
}

#[test]
fn starts_on_first_surah_without_playing() {
    let (app, _) = new_app();
    assert_eq!(current_url(&app), surahs()[0].stream_url);
    assert!(!app.session().playing);
    assert_eq!(app.player.media().loads.len(), 1);
    assert_eq!(app.player.media().plays, 0);
}

#[test]
fn denylisted_query_never_reaches_the_service() {
    let (mut app, _) = new_app();
    assert!(search(&mut app, "اغاني").is_none());
    assert_eq!(app.search, SearchState::Rejected(RejectReason::Forbidden));
    assert_eq!(app.input_mode, InputMode::Normal);
}

#[test]
fn empty_results_show_the_same_notice() {
    let (mut app, _) = new_app();
    let request = search(&mut app, "الفاتحة").unwrap();
    assert_eq!(request.query, AiQuery::Search("الفاتحة".to_string()));
    assert_eq!(app.search, SearchState::Searching);

    app.apply_ai_response(respond(&request, AiPayload::Search(Vec::new())));
    assert_eq!(app.search, SearchState::Rejected(RejectReason::NoResults));
}

#[test]
fn blank_query_is_ignored() {
    let (mut app, _) = new_app();
    assert!(search(&mut app, "   ").is_none());
    assert_eq!(app.search, SearchState::Idle);
}

#[test]
fn older_search_response_is_discarded() {
    let (mut app, _) = new_app();
    let first = search(&mut app, "الكهف").unwrap();
    app.cancel_search_input();
    let second = search(&mut app, "يس").unwrap();

    app.apply_ai_response(respond(&first, AiPayload::Search(vec![hit("الكهف", "https://a/018.mp3")])));
    assert_eq!(app.search, SearchState::Searching);

    app.apply_ai_response(respond(&second, AiPayload::Search(vec![hit("يس", "https://a/036.mp3")])));
    assert!(matches!(&app.search, SearchState::Results(r) if r[0].title == "يس"));
}

#[test]
fn switching_tabs_drops_in_flight_search() {
    let (mut app, _) = new_app();
    let request = search(&mut app, "الرحمن").unwrap();
    app.switch_tab(Tab::Favorites);

    app.apply_ai_response(respond(&request, AiPayload::Search(vec![hit("الرحمن", "https://a/055.mp3")])));
    assert_eq!(app.search, SearchState::Idle);
}

#[test]
fn switching_tabs_clears_the_notice() {
    let (mut app, _) = new_app();
    search(&mut app, "music");
    app.switch_tab(Tab::Reciters);
    assert_eq!(app.search, SearchState::Idle);
}

#[test]
fn typing_clears_the_notice() {
    let (mut app, _) = new_app();
    search(&mut app, "dance");
    app.enter_search_mode();
    app.pop_query_char();
    assert_eq!(app.search, SearchState::Idle);
}

#[test]
fn playing_a_search_result_clears_results_and_query() {
    let (mut app, _) = new_app();
    let request = search(&mut app, "الكهف").unwrap();
    app.apply_ai_response(respond(
        &request,
        AiPayload::Search(vec![hit("الكهف", "https://a/018.mp3"), hit("الكهف", "https://b/018.mp3")]),
    ));
    assert_eq!(app.rows().len(), 2);

    app.next();
    assert!(app.activate_selected().is_none());
    assert_eq!(current_url(&app), "https://b/018.mp3");
    assert!(app.session().playing);
    assert_eq!(app.search, SearchState::Idle);
    assert!(app.query.is_empty());
}

#[test]
fn opening_a_reciter_loads_its_tracks() {
    let (mut app, _) = new_app();
    app.switch_tab(Tab::Reciters);
    assert!(matches!(app.selected_row(), Some(Row::Reciter(_))));

    let request = app.activate_selected().unwrap();
    assert_eq!(request.query, AiQuery::ReciterTracks(reciters()[0].name.to_string()));
    assert!(app.reciter.as_ref().unwrap().loading);

    let refs = vec![TrackRef {
        title: "الفاتحة".to_string(),
        url: "https://a/001.mp3".to_string(),
        kind: "audio".to_string(),
    }];
    app.apply_ai_response(respond(&request, AiPayload::ReciterTracks(refs)));

    let view = app.reciter.as_ref().unwrap();
    assert!(!view.loading);
    assert_eq!(view.tracks[0].subtitle, reciters()[0].name);
    assert_eq!(view.tracks[0].verses_count, 0);
    assert!(matches!(app.selected_row(), Some(Row::Track(t)) if t.stream_url == "https://a/001.mp3"));
}

#[test]
fn leaving_a_reciter_drops_its_late_tracks() {
    let (mut app, _) = new_app();
    app.switch_tab(Tab::Reciters);
    let request = app.activate_selected().unwrap();
    app.back();
    assert!(app.reciter.is_none());

    app.apply_ai_response(respond(&request, AiPayload::ReciterTracks(Vec::new())));
    assert!(app.reciter.is_none());
    assert!(matches!(app.selected_row(), Some(Row::Reciter(_))));
}

#[test]
fn next_and_previous_walk_the_catalog() {
    let (mut app, _) = new_app();
    app.next_track();
    assert_eq!(current_url(&app), surahs()[1].stream_url);
    assert!(app.session().playing);

    app.prev_track();
    app.prev_track();
    assert_eq!(current_url(&app), surahs()[surahs().len() - 1].stream_url);
}

#[test]
fn favorites_tab_makes_favorites_the_active_playlist() {
    let (mut app, _) = new_app();
    // Favorite surahs 2 and 4 from the catalog list.
    app.selected = 2;
    app.toggle_favorite();
    app.selected = 4;
    app.toggle_favorite();

    app.switch_tab(Tab::Favorites);
    assert_eq!(app.active_playlist().len(), 2);

    // The current track (surah 0) is not a favorite: next lands on the first.
    app.next_track();
    assert_eq!(current_url(&app), surahs()[2].stream_url);
    app.next_track();
    assert_eq!(current_url(&app), surahs()[4].stream_url);
    app.next_track();
    assert_eq!(current_url(&app), surahs()[2].stream_url);
}

#[test]
fn natural_end_advances_within_active_playlist() {
    let (mut app, _) = new_app();
    app.handle_media_event(MediaEvent::Ended);
    assert_eq!(current_url(&app), surahs()[1].stream_url);
    assert!(app.session().playing);
}

#[test]
fn natural_end_with_empty_favorites_pauses_and_stays_replayable() {
    let (mut app, _) = new_app();
    app.next_track();
    assert!(app.session().playing);
    let playing_url = current_url(&app);

    app.switch_tab(Tab::Favorites);
    app.handle_media_event(MediaEvent::Ended);

    assert!(!app.session().playing);
    assert_eq!(current_url(&app), playing_url);
    assert_eq!(app.player.media().loads.last(), Some(&playing_url));

    let plays = app.player.media().plays;
    app.toggle_play_pause();
    assert!(app.session().playing);
    assert_eq!(app.player.media().plays, plays + 1);
}

#[test]
fn search_results_are_never_the_active_playlist() {
    let (mut app, _) = new_app();
    let request = search(&mut app, "الكهف").unwrap();
    app.apply_ai_response(respond(&request, AiPayload::Search(vec![hit("الكهف", "https://a/018.mp3")])));
    assert_eq!(app.active_playlist().len(), surahs().len());
}

#[test]
fn media_error_blocks_toggle_until_retry() {
    let (mut app, _) = new_app();
    app.handle_media_event(MediaEvent::Error("decode failed".to_string()));
    assert_eq!(app.session().error_message.as_deref(), Some(PLAYBACK_ERROR_MESSAGE));

    app.toggle_play_pause();
    assert!(!app.session().playing);
    assert_eq!(app.player.media().plays, 0);

    app.retry();
    assert!(app.session().error_message.is_none());
    assert_eq!(app.player.media().loads.len(), 2);
    app.toggle_play_pause();
    assert!(app.session().playing);
}

#[test]
fn progress_and_device_state_events_update_session() {
    let (mut app, _) = new_app();
    app.handle_media_event(MediaEvent::Progress {
        position: 10.0,
        duration: 40.0,
    });
    assert_eq!(app.session().progress, 0.25);

    app.handle_media_event(MediaEvent::PlayState(true));
    assert!(app.session().playing);
    app.pause();
    assert!(!app.session().playing);
    assert_eq!(app.player.media().pauses, 1);
}

#[test]
fn activating_the_current_track_resumes_instead_of_reloading() {
    let (mut app, _) = new_app();
    assert!(app.activate_selected().is_none());
    assert!(app.session().playing);
    assert_eq!(app.player.media().loads.len(), 1);
}

#[test]
fn toggle_favorite_persists_and_marks_rows() {
    let (mut app, store) = new_app();
    app.selected = 1;
    app.toggle_favorite();

    let row = app.selected_row().unwrap();
    assert!(app.is_favorite(&row));
    let stored = store.get("favorites_v1").unwrap().unwrap();
    assert_eq!(FavoritesSet::deserialize(&stored).len(), 1);

    app.switch_tab(Tab::Favorites);
    app.toggle_favorite();
    assert!(app.rows().is_empty());
    assert_eq!(app.selected, 0);
}

#[test]
fn active_marker_follows_stream_url() {
    let (app, _) = new_app();
    let rows = app.rows();
    assert!(app.is_active(&rows[0]));
    assert!(!app.is_active(&rows[1]));
}

#[test]
fn padded_search_hit_matches_its_favorited_track() {
    let (mut app, _) = new_app();
    let request = search(&mut app, "الملك").unwrap();
    app.apply_ai_response(respond(
        &request,
        AiPayload::Search(vec![hit("الملك", " https://a/067.mp3 ")]),
    ));

    app.toggle_favorite();
    let row = app.selected_row().unwrap();
    assert!(app.is_favorite(&row));
    assert!(app.favorites.contains("https://a/067.mp3"));
}

#[test]
fn live_filter_narrows_surahs() {
    let (mut app, _) = new_app();
    app.enter_search_mode();
    for c in "mulk".chars() {
        app.push_query_char(c);
    }
    let rows = app.rows();
    assert_eq!(rows.len(), 1);
    assert!(matches!(&rows[0], Row::Track(t) if t.id == 67));

    app.cancel_search_input();
    assert_eq!(app.rows().len(), surahs().len());
}

#[test]
fn reflection_falls_back_when_unavailable() {
    let (mut app, _) = new_app();
    let request = app.request_reflection();
    assert_eq!(app.reflection, ReflectionState::Loading);
    assert!(app.reflection.shown().is_none());

    app.apply_ai_response(respond(&request, AiPayload::Reflection(None)));
    assert_eq!(app.reflection, ReflectionState::Unavailable);
    assert_eq!(app.reflection.shown().unwrap().surah_name, "الشرح");

    let request = app.request_reflection();
    let reflection = DailyReflection {
        verse: "v".to_string(),
        translation: "t".to_string(),
        reflection: "r".to_string(),
        surah_name: "الملك".to_string(),
    };
    app.apply_ai_response(respond(&request, AiPayload::Reflection(Some(reflection.clone()))));
    assert_eq!(app.reflection, ReflectionState::Ready(reflection));
}

#[test]
fn cursor_wraps_in_both_directions() {
    let (mut app, _) = new_app();
    app.prev();
    assert_eq!(app.selected, surahs().len() - 1);
    app.next();
    assert_eq!(app.selected, 0);
    app.select_last();
    assert_eq!(app.selected, surahs().len() - 1);
    app.select_first();
    assert_eq!(app.selected, 0);
}

#[test]
fn tab_cycles_through_all_views() {
    assert_eq!(Tab::Surahs.next(), Tab::Reciters);
    assert_eq!(Tab::Reciters.next(), Tab::Favorites);
    assert_eq!(Tab::Favorites.next(), Tab::Surahs);
}
