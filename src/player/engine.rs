use std::time::Duration;

use anyhow::{bail, Result};
use rand::Rng;
use serde::Serialize;
use spdlog::{debug, info, warn};

use crate::player::interaction::{Interaction, InteractionGate};
use crate::player::media::{is_same_source, MediaEvent, MediaSource, PlayTicket, PlaybackError};
use crate::player::{PlayMode, Track, DEFAULT_VOLUME, SEEK_RELEASE_DELAY};

/// Everything a player view displays.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerState {
    pub track_index: usize,
    pub playing: bool,
    /// Displayed position in seconds
    pub position: f64,
    /// Seconds, 0 while unknown
    pub duration: f64,
    pub volume: f64,
    pub muted: bool,
    pub mode: PlayMode,
    /// Set while the user drags the progress slider
    pub seeking: bool,
}

impl PlayerState {
    pub fn effective_volume(&self) -> f64 {
        if self.muted { 0.0 } else { self.volume }
    }
}

#[derive(Debug, Clone)]
pub struct PlayerSettings {
    pub mode: PlayMode,
    pub volume: f64,
    /// Start the first track once the user interacted with the page
    pub autoplay: bool,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        PlayerSettings {
            mode: PlayMode::default(),
            volume: DEFAULT_VOLUME,
            autoplay: true,
        }
    }
}

/// Ends an in-progress seek once `delay` has passed. Releasing with a token
/// from an older seek does nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeekRelease {
    pub epoch: u64,
    pub delay: Duration,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerSnapshot {
    pub state: PlayerState,
    pub track: Track,
    pub track_count: usize,
    pub interacted: bool,
}

pub struct Player<M, R> {
    tracks: Vec<Track>,
    state: PlayerState,
    media: M,
    rng: R,
    autoplay: bool,
    interaction: InteractionGate,
    // Bumped by every play request and every pause
    play_generation: u64,
    // Bumped by every seek start
    seek_epoch: u64,
}

impl<M: MediaSource, R: Rng> Player<M, R> {
    /// The first track is loaded right away but does not start.
    pub fn new(tracks: Vec<Track>, media: M, rng: R, settings: PlayerSettings) -> Result<Self> {
        if tracks.is_empty() {
            bail!("The player needs at least one track");
        }

        let volume = if settings.volume.is_finite() { settings.volume.clamp(0.0, 1.0) } else { DEFAULT_VOLUME };
        let mut player = Player {
            tracks,
            state: PlayerState {
                track_index: 0,
                playing: false,
                position: 0.0,
                duration: 0.0,
                volume,
                muted: false,
                mode: settings.mode,
                seeking: false,
            },
            media,
            rng,
            autoplay: settings.autoplay,
            interaction: InteractionGate::new(),
            play_generation: 0,
            seek_epoch: 0,
        };
        player.apply_volume();
        player.sync_track();
        Ok(player)
    }

    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn current_track(&self) -> &Track {
        &self.tracks[self.state.track_index]
    }

    pub fn media(&self) -> &M {
        &self.media
    }

    pub fn media_mut(&mut self) -> &mut M {
        &mut self.media
    }

    pub fn has_interacted(&self) -> bool {
        self.interaction.is_consumed()
    }

    pub fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            state: self.state.clone(),
            track: self.current_track().clone(),
            track_count: self.tracks.len(),
            interacted: self.interaction.is_consumed(),
        }
    }

    // Transport ---------------------------------------------------------

    pub fn toggle_play(&mut self) {
        if self.state.playing {
            self.pause();
        } else {
            self.state.playing = true;
            self.request_play();
        }
    }

    pub fn pause(&mut self) {
        self.state.playing = false;
        self.play_generation += 1;
        self.media.pause();
    }

    /// Random track under shuffle (the current one included), the following
    /// one otherwise.
    pub fn next(&mut self) {
        let index = match self.state.mode {
            PlayMode::Shuffle => self.random_index(),
            _ => (self.state.track_index + 1) % self.tracks.len(),
        };
        self.switch_to(index);
    }

    pub fn previous(&mut self) {
        let count = self.tracks.len();
        let index = match self.state.mode {
            PlayMode::Shuffle => self.random_index(),
            _ => (self.state.track_index + count - 1) % count,
        };
        self.switch_to(index);
    }

    /// Picks a track from the playlist and plays it.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.tracks.len() {
            warn!("Ignoring selection of track {} out of {}", index, self.tracks.len());
            return false;
        }
        self.switch_to(index);
        true
    }

    pub fn cycle_mode(&mut self) -> PlayMode {
        self.state.mode = self.state.mode.next();
        debug!("Play mode is now {}", self.state.mode);
        self.state.mode
    }

    // Seeking -----------------------------------------------------------

    pub fn seek_start(&mut self) {
        self.seek_epoch += 1;
        self.state.seeking = true;
    }

    /// Moves the displayed position only, the media keeps playing where it is.
    pub fn seek_move(&mut self, secs: f64) {
        if secs.is_finite() {
            self.state.position = self.clamp_position(secs);
        }
    }

    /// Moves the media to `secs`. The returned token must be handed back to
    /// [`Player::release_seek`] after its delay.
    pub fn seek_commit(&mut self, secs: f64) -> SeekRelease {
        if secs.is_finite() {
            let position = self.clamp_position(secs);
            self.media.set_position(position);
            self.state.position = position;
        } else {
            debug!("Ignoring seek to {}", secs);
        }

        SeekRelease {
            epoch: self.seek_epoch,
            delay: SEEK_RELEASE_DELAY,
        }
    }

    pub fn release_seek(&mut self, release: SeekRelease) {
        if release.epoch == self.seek_epoch {
            self.state.seeking = false;
        }
    }

    // Volume ------------------------------------------------------------

    /// Also unmutes.
    pub fn set_volume(&mut self, volume: f64) {
        if !volume.is_finite() {
            return;
        }
        self.state.volume = volume.clamp(0.0, 1.0);
        self.state.muted = false;
        self.apply_volume();
    }

    pub fn toggle_mute(&mut self) {
        self.state.muted = !self.state.muted;
        self.apply_volume();
    }

    // Events ------------------------------------------------------------

    /// Only the first interaction counts; it starts the first track when
    /// autoplay is on and nothing is playing yet.
    pub fn on_interaction(&mut self, interaction: Interaction) {
        if !self.interaction.consume(interaction) {
            return;
        }

        self.media.user_activated();
        if self.autoplay && !self.state.playing {
            info!("First interaction ({:?}), starting {}", interaction, self.current_track().title);
            self.state.playing = true;
            self.request_play();
        }
    }

    pub fn handle_media_event(&mut self, event: MediaEvent) {
        match event {
            MediaEvent::TimeUpdate { position, duration } => {
                if self.state.seeking {
                    return;
                }
                self.state.duration = sanitize_duration(duration);
                if position.is_finite() {
                    self.state.position = self.clamp_position(position);
                }
            }
            MediaEvent::LoadedMetadata { duration } => {
                self.state.duration = sanitize_duration(duration);
            }
            MediaEvent::Ended => self.on_track_ended(),
            MediaEvent::PlayResolved { ticket, result } => self.on_play_resolved(ticket, result),
        }
    }

    /// Feeds everything the media reported since the last call.
    pub fn poll_media(&mut self) {
        for event in self.media.poll_events() {
            self.handle_media_event(event);
        }
    }

    fn on_track_ended(&mut self) {
        let count = self.tracks.len();
        let current = self.state.track_index;
        match self.state.mode {
            PlayMode::LoopOne => {
                self.state.position = 0.0;
                self.media.set_position(0.0);
                self.state.playing = true;
                self.request_play();
            }
            PlayMode::Shuffle => {
                let index = self.random_index_except(current);
                self.switch_to(index);
            }
            PlayMode::Sequence if current + 1 == count => {
                debug!("Reached the end of the playlist");
                self.pause();
            }
            PlayMode::Sequence | PlayMode::LoopAll => {
                self.switch_to((current + 1) % count);
            }
        }
    }

    fn on_play_resolved(&mut self, ticket: PlayTicket, result: Result<(), PlaybackError>) {
        if ticket.generation != self.play_generation {
            debug!("Ignoring stale play result for track {}", ticket.track_index);
            return;
        }

        match result {
            Ok(()) => self.state.playing = true,
            Err(e) => {
                warn!("Playback of {} was rejected: {}", self.current_track().title, e);
                self.state.playing = false;
            }
        }
    }

    // Internals ---------------------------------------------------------

    fn switch_to(&mut self, index: usize) {
        self.state.track_index = index;
        self.state.playing = true;
        self.sync_track();
    }

    /// Loads the current track unless the media already has it, then plays
    /// it when the player is meant to be playing.
    fn sync_track(&mut self) {
        let url = self.tracks[self.state.track_index].url.as_str();
        if !is_same_source(self.media.current_source(), url) {
            self.media.load(url);
            self.state.position = 0.0;
            self.state.duration = 0.0;
        }

        if self.state.playing {
            self.request_play();
        }
    }

    fn request_play(&mut self) {
        self.play_generation += 1;
        let ticket = PlayTicket {
            generation: self.play_generation,
            track_index: self.state.track_index,
        };
        self.media.play(ticket);
    }

    fn apply_volume(&mut self) {
        self.media.set_volume(self.state.effective_volume());
    }

    fn random_index(&mut self) -> usize {
        self.rng.gen_range(0..self.tracks.len())
    }

    /// Draws again while the draw equals `excluded`. A single track has
    /// nothing else to pick, so no exclusion then.
    fn random_index_except(&mut self, excluded: usize) -> usize {
        if self.tracks.len() <= 1 {
            return self.random_index();
        }
        loop {
            let index = self.random_index();
            if index != excluded {
                return index;
            }
        }
    }

    fn clamp_position(&self, secs: f64) -> f64 {
        let secs = secs.max(0.0);
        if self.state.duration > 0.0 {
            secs.min(self.state.duration)
        } else {
            secs
        }
    }
}

fn sanitize_duration(duration: f64) -> f64 {
    if duration.is_finite() && duration > 0.0 { duration } else { 0.0 }
}
