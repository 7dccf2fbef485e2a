use std::fmt;
use std::fmt::{Display, Formatter};

/// Stamp attached to a play request. The media hands it back with the
/// result so a late answer to an old request can be told apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayTicket {
    pub generation: u64,
    pub track_index: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackError {
    /// Playback needs a user gesture first
    NotAllowed,
    NoSource,
}

impl Display for PlaybackError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            PlaybackError::NotAllowed => write!(f, "playback is not allowed before a user interaction"),
            PlaybackError::NoSource => write!(f, "no source loaded"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MediaEvent {
    TimeUpdate { position: f64, duration: f64 },
    LoadedMetadata { duration: f64 },
    Ended,
    PlayResolved { ticket: PlayTicket, result: Result<(), PlaybackError> },
}

/// Whatever actually produces sound. Commands return immediately; results
/// and progress are reported through [`MediaSource::poll_events`].
pub trait MediaSource {
    fn load(&mut self, url: &str);

    fn current_source(&self) -> Option<&str>;

    /// Answered later by a [`MediaEvent::PlayResolved`] carrying `ticket`.
    fn play(&mut self, ticket: PlayTicket);

    fn pause(&mut self);

    fn position(&self) -> f64;

    fn set_position(&mut self, secs: f64);

    /// 0 while unknown.
    fn duration(&self) -> f64;

    fn set_volume(&mut self, volume: f64);

    /// The page received its first user gesture.
    fn user_activated(&mut self) {}

    /// Events produced since the previous call, oldest first.
    fn poll_events(&mut self) -> Vec<MediaEvent>;
}

/// Browsers report absolute URLs for relative sources, so `/music/1.mp3`
/// is already loaded when the source is `https://site/music/1.mp3`.
pub fn is_same_source(loaded: Option<&str>, url: &str) -> bool {
    match loaded {
        Some(src) => src == url || src.ends_with(url),
        None => false,
    }
}
