use super::*;
use crate::catalog::{Category, Track};
use crate::error::{Error, Result};

fn t(n: u32) -> Track {
    Track {
        id: n,
        title: format!("track {n}"),
        subtitle: "reciter".to_string(),
        category: Category::Meccan,
        stream_url: format!("https://example.com/{n:03}.mp3"),
        artwork_url: String::new(),
        verses_count: 0,
    }
}

fn urls(tracks: &[&Track]) -> Vec<String> {
    tracks.iter().map(|t| t.stream_url.clone()).collect()
}

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Load(String),
    Play,
    Pause,
}

/// Records every command; `play` can be told to refuse.
#[derive(Default)]
struct FakeMedia {
    calls: Vec<Call>,
    refuse_play: bool,
}

impl MediaSource for FakeMedia {
    fn load(&mut self, url: &str) {
        self.calls.push(Call::Load(url.to_string()));
    }

    fn play(&mut self) -> Result<()> {
        self.calls.push(Call::Play);
        if self.refuse_play {
            Err(Error::PlaybackRejected("autoplay blocked".to_string()))
        } else {
            Ok(())
        }
    }

    fn pause(&mut self) {
        self.calls.push(Call::Pause);
    }
}

// ---- navigator ----

#[test]
fn advance_on_empty_playlist_is_none() {
    assert!(advance(Direction::Next, &[], None).is_none());
    assert!(advance(Direction::Previous, &[], Some(&t(1))).is_none());
}

#[test]
fn advance_wraps_around() {
    let p = vec![t(1), t(2), t(3)];

    let next = advance(Direction::Next, &p, Some(&p[1])).unwrap();
    assert!(next.same_as(&p[2]));
    let next = advance(Direction::Next, &p, Some(next)).unwrap();
    assert!(next.same_as(&p[0]));

    let prev = advance(Direction::Previous, &p, Some(&p[0])).unwrap();
    assert!(prev.same_as(&p[2]));
}

#[test]
fn advance_from_absent_track_goes_to_the_ends() {
    let p = vec![t(1), t(2), t(3)];
    let stranger = t(9);

    assert!(advance(Direction::Next, &p, Some(&stranger)).unwrap().same_as(&p[0]));
    assert!(advance(Direction::Previous, &p, Some(&stranger)).unwrap().same_as(&p[2]));
    assert!(advance(Direction::Next, &p, None).unwrap().same_as(&p[0]));
    assert!(advance(Direction::Previous, &p, None).unwrap().same_as(&p[2]));
}

#[test]
fn next_then_previous_returns_to_start_for_every_member() {
    for n in 1..=5u32 {
        let p: Vec<Track> = (1..=n).map(t).collect();
        for member in &p {
            let next = advance(Direction::Next, &p, Some(member)).unwrap();
            let back = advance(Direction::Previous, &p, Some(next)).unwrap();
            assert!(back.same_as(member), "n={n} member={}", member.stream_url);
        }
    }
}

#[test]
fn single_track_playlist_advances_to_itself() {
    let p = vec![t(7)];
    assert!(advance(Direction::Next, &p, Some(&p[0])).unwrap().same_as(&p[0]));
    assert!(advance(Direction::Previous, &p, Some(&p[0])).unwrap().same_as(&p[0]));
}

#[test]
fn advance_locates_current_by_url() {
    let p = vec![t(1), t(2), t(3)];
    let mut copy = p[0].clone();
    copy.id = 777;
    assert!(advance(Direction::Next, &p, Some(&copy)).unwrap().same_as(&p[1]));
}

#[test]
fn full_cycle_visits_every_track() {
    let p = vec![t(1), t(2), t(3), t(4)];
    let mut seen = vec![];
    let mut cur = &p[0];
    for _ in 0..p.len() {
        cur = advance(Direction::Next, &p, Some(cur)).unwrap();
        seen.push(cur);
    }
    assert_eq!(urls(&seen), urls(&[&p[1], &p[2], &p[3], &p[0]]));
}

// ---- controller ----

#[test]
fn first_selection_loads_without_playing() {
    let mut c = PlaybackController::new(FakeMedia::default());
    c.select_track(t(1));

    assert!(!c.session().playing);
    assert_eq!(c.media().calls, vec![Call::Load(t(1).stream_url)]);
    assert_eq!(c.session().state(), PlaybackState::Paused);
}

#[test]
fn later_selections_attempt_playback() {
    let mut c = PlaybackController::new(FakeMedia::default());
    c.select_track(t(1));
    c.select_track(t(2));

    assert!(c.session().playing);
    assert_eq!(
        c.media().calls,
        vec![
            Call::Load(t(1).stream_url),
            Call::Load(t(2).stream_url),
            Call::Play
        ]
    );
}

#[test]
fn refused_play_is_silent() {
    let mut c = PlaybackController::new(FakeMedia {
        refuse_play: true,
        ..FakeMedia::default()
    });
    c.select_track(t(1));
    c.select_track(t(2));

    assert!(!c.session().playing);
    assert!(c.session().error_message.is_none());
}

#[test]
fn selecting_resets_progress_and_clears_error() {
    let mut c = PlaybackController::new(FakeMedia::default());
    c.select_track(t(1));
    c.on_progress(30.0, 60.0);
    c.on_playback_error();
    assert_eq!(c.session().progress, 0.5);

    c.select_track(t(2));
    assert_eq!(c.session().progress, 0.0);
    assert_eq!(c.session().elapsed_secs, 0.0);
    assert!(c.session().error_message.is_none());
    assert!(c.session().is_current(&t(2)));
}

#[test]
fn toggle_pauses_and_resumes() {
    let mut c = PlaybackController::new(FakeMedia::default());
    c.select_track(t(1));

    c.toggle_play_pause();
    assert!(c.session().playing);
    c.toggle_play_pause();
    assert!(!c.session().playing);
    assert_eq!(c.media().calls.last(), Some(&Call::Pause));
}

#[test]
fn toggle_without_track_is_noop() {
    let mut c = PlaybackController::new(FakeMedia::default());
    c.toggle_play_pause();
    assert!(!c.session().playing);
    assert!(c.media().calls.is_empty());
    assert_eq!(c.session().state(), PlaybackState::Stopped);
}

#[test]
fn progress_handles_degenerate_durations() {
    let mut c = PlaybackController::new(FakeMedia::default());
    c.select_track(t(1));

    c.on_progress(10.0, 0.0);
    assert_eq!(c.session().progress, 0.0);
    c.on_progress(10.0, f64::NAN);
    assert_eq!(c.session().progress, 0.0);
    assert_eq!(c.session().total_secs, None);
    c.on_progress(90.0, 60.0);
    assert_eq!(c.session().progress, 1.0);
    c.on_progress(15.0, 60.0);
    assert_eq!(c.session().progress, 0.25);
    assert_eq!(c.session().total_secs, Some(60.0));
}

#[test]
fn error_is_sticky_until_retry() {
    let mut c = PlaybackController::new(FakeMedia::default());
    c.select_track(t(1));
    c.toggle_play_pause();
    assert!(c.session().playing);

    c.on_playback_error();
    assert!(!c.session().playing);
    assert_eq!(c.session().error_message.as_deref(), Some(PLAYBACK_ERROR_MESSAGE));

    let calls_before = c.media().calls.len();
    c.toggle_play_pause();
    assert!(!c.session().playing);
    assert_eq!(c.media().calls.len(), calls_before);

    c.on_external_play_state_change(true);
    assert!(!c.session().playing);

    c.retry();
    assert!(c.session().error_message.is_none());
    assert!(!c.session().playing);
    assert_eq!(c.media().calls.last(), Some(&Call::Load(t(1).stream_url)));

    c.toggle_play_pause();
    assert!(c.session().playing);
}

#[test]
fn natural_completion_advances_through_active_playlist() {
    let p = vec![t(1), t(2), t(3)];
    let mut c = PlaybackController::new(FakeMedia::default());
    c.select_track(p[1].clone());

    let next = c.on_natural_completion(&p).unwrap();
    assert!(next.same_as(&p[2]));
    assert!(c.session().is_current(&p[2]));
    assert!(c.session().playing);

    c.on_natural_completion(&p);
    assert!(c.session().is_current(&p[0]));
}

#[test]
fn natural_completion_with_empty_playlist_keeps_track() {
    let mut c = PlaybackController::new(FakeMedia::default());
    c.select_track(t(1));
    assert!(c.on_natural_completion(&[]).is_none());
    assert!(c.session().is_current(&t(1)));
}

#[test]
fn natural_completion_without_next_pauses_and_rewinds() {
    let mut c = PlaybackController::new(FakeMedia::default());
    c.select_track(t(1));
    c.select_track(t(2));
    c.on_progress(30.0, 60.0);
    assert!(c.session().playing);

    assert!(c.on_natural_completion(&[]).is_none());
    assert!(!c.session().playing);
    assert!(c.session().is_current(&t(2)));
    assert_eq!(c.session().progress, 0.0);
    assert_eq!(c.media().calls.last(), Some(&Call::Load(t(2).stream_url)));

    c.toggle_play_pause();
    assert!(c.session().playing);
    assert_eq!(c.media().calls.last(), Some(&Call::Play));
}

#[test]
fn external_state_is_mirrored() {
    let mut c = PlaybackController::new(FakeMedia::default());
    c.select_track(t(1));
    c.on_external_play_state_change(true);
    assert!(c.session().playing);
    c.on_external_play_state_change(false);
    assert!(!c.session().playing);
    assert_eq!(c.media().calls, vec![Call::Load(t(1).stream_url)]);
}
