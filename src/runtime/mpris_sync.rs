use crate::app::App;
use crate::mpris::MprisHandle;
use crate::playback::MediaSource;

pub fn update_mpris<M: MediaSource>(mpris: &MprisHandle, app: &App<M>) {
    mpris.set_track_metadata(app.player.current_track());
    mpris.set_playback(app.playback_state());
}
