use std::time::Duration;

use rand::Rng;
use spdlog::{debug, info, trace};
use tokio::sync::mpsc::{self, Sender, WeakSender};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::player::engine::{Player, PlayerSnapshot, SeekRelease};
use crate::player::interaction::Interaction;
use crate::player::media::{MediaEvent, MediaSource};

/// Everything that can happen to a running player.
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerInput {
    TogglePlay,
    Next,
    Previous,
    Select(usize),
    CycleMode,
    SeekStart,
    SeekMove(f64),
    SeekCommit(f64),
    SetVolume(f64),
    ToggleMute,
    Interaction(Interaction),
    Media(MediaEvent),
    SeekReleased(SeekRelease),
}

/// Owns a [`Player`] inside a task. Inputs are applied in the order they
/// are sent, the media is polled every `tick`, and each change is published
/// as a [`PlayerSnapshot`].
pub struct PlayerHandle {
    _player_task: JoinHandle<()>,
    sender: Sender<PlayerInput>,
    snapshots: watch::Receiver<PlayerSnapshot>,
}

impl PlayerHandle {
    pub fn spawn<M, R>(mut player: Player<M, R>, tick: Duration) -> Self
    where
        M: MediaSource + Send + 'static,
        R: Rng + Send + 'static,
    {
        let (tx, mut rx) = mpsc::channel::<PlayerInput>(64);
        let (snapshot_tx, snapshot_rx) = watch::channel(player.snapshot());
        let releases = tx.downgrade();

        let player_task = tokio::spawn(async move {
            info!("Starting player with {} tracks", player.tracks().len());
            loop {
                match tokio::time::timeout(tick, rx.recv()).await {
                    Ok(Some(input)) => {
                        trace!("Player input {:?}", input);
                        if let Some(release) = apply_input(&mut player, input) {
                            schedule_release(releases.clone(), release);
                        }
                    }
                    Ok(None) => break,
                    Err(_timeout) => {}
                }
                player.poll_media();
                snapshot_tx.send_if_modified(|current| {
                    let snapshot = player.snapshot();
                    if *current == snapshot {
                        return false;
                    }
                    *current = snapshot;
                    true
                });
            }
            player.pause();
            info!("Player stopped");
        });

        Self {
            _player_task: player_task,
            sender: tx,
            snapshots: snapshot_rx,
        }
    }

    /// False once the player task is gone.
    pub async fn send(&self, input: PlayerInput) -> bool {
        self.sender.send(input).await.is_ok()
    }

    pub fn snapshot(&self) -> PlayerSnapshot {
        self.snapshots.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<PlayerSnapshot> {
        self.snapshots.clone()
    }
}

fn apply_input<M: MediaSource, R: Rng>(player: &mut Player<M, R>, input: PlayerInput) -> Option<SeekRelease> {
    match input {
        PlayerInput::TogglePlay => player.toggle_play(),
        PlayerInput::Next => player.next(),
        PlayerInput::Previous => player.previous(),
        PlayerInput::Select(index) => {
            player.select(index);
        }
        PlayerInput::CycleMode => {
            player.cycle_mode();
        }
        PlayerInput::SeekStart => player.seek_start(),
        PlayerInput::SeekMove(secs) => player.seek_move(secs),
        PlayerInput::SeekCommit(secs) => return Some(player.seek_commit(secs)),
        PlayerInput::SetVolume(volume) => player.set_volume(volume),
        PlayerInput::ToggleMute => player.toggle_mute(),
        PlayerInput::Interaction(interaction) => player.on_interaction(interaction),
        PlayerInput::Media(event) => player.handle_media_event(event),
        PlayerInput::SeekReleased(release) => player.release_seek(release),
    }
    None
}

fn schedule_release(sender: WeakSender<PlayerInput>, release: SeekRelease) {
    tokio::spawn(async move {
        tokio::time::sleep(release.delay).await;
        match sender.upgrade() {
            Some(sender) => {
                let _ = sender.send(PlayerInput::SeekReleased(release)).await;
            }
            None => debug!("Player gone before seek release"),
        }
    });
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::player::{PlayMode, PlayerSettings, SimulatedMedia, Track, SEEK_RELEASE_DELAY};

    use super::*;

    const TICK: Duration = Duration::from_millis(50);

    fn handle(mode: PlayMode) -> PlayerHandle {
        let tracks = vec![
            Track { title: "Forest".to_string(), artist: "A".to_string(), url: "/music/forest.mp3".to_string() },
            Track { title: "Fog".to_string(), artist: "B".to_string(), url: "/music/fog.mp3".to_string() },
        ];
        let settings = PlayerSettings { mode, ..PlayerSettings::default() };
        let player = Player::new(tracks, SimulatedMedia::new(10.0), StdRng::seed_from_u64(5), settings).unwrap();
        PlayerHandle::spawn(player, TICK)
    }

    async fn settle() {
        tokio::time::sleep(TICK * 2).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_inputs_reach_player() {
        let handle = handle(PlayMode::LoopAll);
        assert!(handle.send(PlayerInput::Next).await);
        assert!(handle.send(PlayerInput::CycleMode).await);
        settle().await;
        let snapshot = handle.snapshot();
        assert_eq!(snapshot.state.track_index, 1);
        assert!(snapshot.state.playing);
        assert_eq!(snapshot.state.mode, PlayMode::LoopOne);
        assert_eq!(snapshot.track.title, "Fog");
    }

    #[tokio::test(start_paused = true)]
    async fn test_sequence_runs_through_playlist() {
        let handle = handle(PlayMode::Sequence);
        handle.send(PlayerInput::TogglePlay).await;
        tokio::time::sleep(Duration::from_secs(12)).await;
        assert_eq!(handle.snapshot().state.track_index, 1);
        assert!(handle.snapshot().state.playing);
        tokio::time::sleep(Duration::from_secs(12)).await;
        let snapshot = handle.snapshot();
        assert_eq!(snapshot.state.track_index, 1);
        assert!(!snapshot.state.playing);
    }

    #[tokio::test(start_paused = true)]
    async fn test_seek_released_after_delay() {
        let handle = handle(PlayMode::LoopAll);
        handle.send(PlayerInput::SeekStart).await;
        handle.send(PlayerInput::SeekCommit(4.0)).await;
        settle().await;
        assert!(handle.snapshot().state.seeking);
        tokio::time::sleep(SEEK_RELEASE_DELAY * 2).await;
        let snapshot = handle.snapshot();
        assert!(!snapshot.state.seeking);
        assert_eq!(snapshot.state.position, 4.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_seek_outlives_old_release() {
        let handle = handle(PlayMode::LoopAll);
        handle.send(PlayerInput::SeekStart).await;
        handle.send(PlayerInput::SeekCommit(4.0)).await;
        tokio::time::sleep(SEEK_RELEASE_DELAY / 2).await;
        handle.send(PlayerInput::SeekStart).await;
        tokio::time::sleep(SEEK_RELEASE_DELAY).await;
        assert!(handle.snapshot().state.seeking);
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_interaction_starts_playback() {
        let handle = handle(PlayMode::LoopAll);
        let mut updates = handle.subscribe();
        handle.send(PlayerInput::Interaction(Interaction::Click)).await;
        updates.changed().await.unwrap();
        settle().await;
        let snapshot = handle.snapshot();
        assert!(snapshot.interacted);
        assert!(snapshot.state.playing);
    }
}
