use std::time::Duration;

use tokio::time::Instant;

use crate::player::media::{MediaEvent, MediaSource, PlayTicket, PlaybackError};

/// Silent stand-in for an audio element. Every source lasts `track_length`
/// seconds. Time comes from the tokio clock, or only from
/// [`SimulatedMedia::advance`] for a manual instance.
#[derive(Debug)]
pub struct SimulatedMedia {
    source: Option<String>,
    track_length: f64,
    position: f64,
    volume: f64,
    playing: bool,
    blocked: bool,
    // None for a manual clock
    last_tick: Option<Instant>,
    pending: Vec<MediaEvent>,
    load_count: usize,
}

impl SimulatedMedia {
    pub fn new(track_length: f64) -> Self {
        let mut media = Self::manual(track_length);
        media.last_tick = Some(Instant::now());
        media
    }

    pub fn manual(track_length: f64) -> Self {
        SimulatedMedia {
            source: None,
            track_length: if track_length.is_finite() && track_length > 0.0 { track_length } else { 0.0 },
            position: 0.0,
            volume: 1.0,
            playing: false,
            blocked: false,
            last_tick: None,
            pending: vec![],
            load_count: 0,
        }
    }

    /// Rejects play requests like a browser does until the first user gesture.
    pub fn block_until_activation(&mut self) {
        self.blocked = true;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }

    pub fn load_count(&self) -> usize {
        self.load_count
    }

    /// Moves playback forward by `elapsed`, reporting progress and the end
    /// of the track.
    pub fn advance(&mut self, elapsed: Duration) {
        if !self.playing || self.source.is_none() {
            return;
        }

        self.position = (self.position + elapsed.as_secs_f64()).min(self.track_length);
        self.pending.push(MediaEvent::TimeUpdate {
            position: self.position,
            duration: self.track_length,
        });

        if self.position >= self.track_length {
            self.playing = false;
            self.pending.push(MediaEvent::Ended);
        }
    }

    fn tick(&mut self) {
        if let Some(last_tick) = self.last_tick {
            let now = Instant::now();
            self.advance(now.duration_since(last_tick));
            self.last_tick = Some(now);
        }
    }
}

impl MediaSource for SimulatedMedia {
    /// Progress of the replaced source is dropped, only play results survive.
    fn load(&mut self, url: &str) {
        self.pending.retain(|event| matches!(event, MediaEvent::PlayResolved { .. }));
        if self.last_tick.is_some() {
            self.last_tick = Some(Instant::now());
        }
        self.source = Some(url.to_string());
        self.position = 0.0;
        self.playing = false;
        self.load_count += 1;
        self.pending.push(MediaEvent::LoadedMetadata { duration: self.track_length });
    }

    fn current_source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    fn play(&mut self, ticket: PlayTicket) {
        self.tick();
        let result = if self.source.is_none() {
            Err(PlaybackError::NoSource)
        } else if self.blocked {
            Err(PlaybackError::NotAllowed)
        } else {
            if self.position >= self.track_length {
                self.position = 0.0;
            }
            self.playing = true;
            Ok(())
        };
        self.pending.push(MediaEvent::PlayResolved { ticket, result });
    }

    fn pause(&mut self) {
        self.tick();
        self.playing = false;
    }

    fn position(&self) -> f64 {
        self.position
    }

    fn set_position(&mut self, secs: f64) {
        self.tick();
        self.position = secs.clamp(0.0, self.track_length);
    }

    fn duration(&self) -> f64 {
        if self.source.is_some() { self.track_length } else { 0.0 }
    }

    fn set_volume(&mut self, volume: f64) {
        self.volume = volume;
    }

    fn user_activated(&mut self) {
        self.blocked = false;
    }

    fn poll_events(&mut self) -> Vec<MediaEvent> {
        self.tick();
        std::mem::take(&mut self.pending)
    }
}
