//! Background music player.
//!
//! [`Player`] is a synchronous state machine over an abstract [`MediaSource`].
//! It never blocks and never owns a timer: deferred results come back as
//! [`MediaEvent`]s and delayed work is handed out as tokens ([`SeekRelease`]).
//! [`PlayerHandle`] runs one player on the event loop and feeds it those
//! events.

use std::fmt;
use std::fmt::{Display, Formatter};
use std::time::Duration;

use serde::{Deserialize, Serialize};

pub mod engine;
pub mod handle;
pub mod interaction;
pub mod media;
pub mod simulated_media;

pub use engine::{Player, PlayerSettings, PlayerSnapshot, PlayerState, SeekRelease};
pub use handle::{PlayerHandle, PlayerInput};
pub use interaction::{Interaction, InteractionGate};
pub use media::{MediaEvent, MediaSource, PlayTicket, PlaybackError};
pub use simulated_media::SimulatedMedia;

/// How long position updates from the media stay ignored after a seek is
/// committed. One stale update usually arrives within this window.
pub const SEEK_RELEASE_DELAY: Duration = Duration::from_millis(200);

pub const DEFAULT_VOLUME: f64 = 0.6;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Track {
    pub title: String,
    pub artist: String,
    pub url: String,
}

/// Which track plays after the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayMode {
    /// Play through the list once and stop after the last track
    Sequence,
    #[default]
    LoopAll,
    LoopOne,
    Shuffle,
}

impl PlayMode {
    pub const ALL: [PlayMode; 4] = [PlayMode::Sequence, PlayMode::LoopAll, PlayMode::LoopOne, PlayMode::Shuffle];

    /// `sequence → loop_all → loop_one → shuffle → sequence`
    pub fn next(self) -> PlayMode {
        match self {
            PlayMode::Sequence => PlayMode::LoopAll,
            PlayMode::LoopAll => PlayMode::LoopOne,
            PlayMode::LoopOne => PlayMode::Shuffle,
            PlayMode::Shuffle => PlayMode::Sequence,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PlayMode::Sequence => "sequence",
            PlayMode::LoopAll => "loop_all",
            PlayMode::LoopOne => "loop_one",
            PlayMode::Shuffle => "shuffle",
        }
    }

    /// Translation key of the mode title.
    pub fn label_key(&self) -> &'static str {
        match self {
            PlayMode::Sequence => "music.mode_sequence",
            PlayMode::LoopAll => "music.mode_loop_all",
            PlayMode::LoopOne => "music.mode_loop_one",
            PlayMode::Shuffle => "music.mode_shuffle",
        }
    }
}

impl Display for PlayMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_cycle() {
        let mut mode = PlayMode::Sequence;
        let mut seen = vec![];
        for _ in 0..5 {
            seen.push(mode);
            mode = mode.next();
        }
        assert_eq!(seen, [PlayMode::Sequence, PlayMode::LoopAll, PlayMode::LoopOne, PlayMode::Shuffle, PlayMode::Sequence]);
        assert_eq!(PlayMode::default(), PlayMode::LoopAll);
    }

    #[test]
    fn test_mode_names() {
        for mode in PlayMode::ALL {
            let json = serde_json::to_string(&mode).unwrap();
            assert_eq!(json, format!("\"{}\"", mode.as_str()));
            assert!(mode.label_key().ends_with(mode.as_str()));
        }
    }
}
