use crate::catalog::Track;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

/// Pick the track after or before `current` in `playlist`, wrapping around.
///
/// `current` is located by stream URL. When it is absent (or `None`) its
/// index counts as -1, so `Next` lands on the first track and `Previous` on
/// the last. An empty playlist yields `None`.
pub fn advance<'a>(
    direction: Direction,
    playlist: &'a [Track],
    current: Option<&Track>,
) -> Option<&'a Track> {
    if playlist.is_empty() {
        return None;
    }

    let len = playlist.len() as isize;
    let index = current
        .and_then(|c| playlist.iter().position(|t| t.same_as(c)))
        .map(|i| i as isize)
        .unwrap_or(-1);

    let target = match direction {
        Direction::Next => (index + 1).rem_euclid(len),
        Direction::Previous => (index - 1 + len).rem_euclid(len),
    };
    playlist.get(target as usize)
}
