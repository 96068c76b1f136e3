//! Score Playback
//!
//! [`ScorePlayer`] walks a score in playback order and hands every note to an
//! [`AudioSink`], consulting a shared [`Transport`] before each one. Listeners
//! registered on the transport see a `Play` event per note (muted or not), a
//! `Loop` event when a repeated region starts its second pass, and the
//! transport's own pause/mute/stop events.
//!
//! [`spawn_playback`] runs the same loop on a worker thread so the caller can
//! pause, mute or stop it while it plays.

mod events;
mod progress;
mod transport;

pub use events::{AudioEvent, AudioEventKind, AudioEventListener};
pub use progress::ElapsedTracker;
pub use transport::{ListenerId, PlaybackState, Transport};

use crate::config::PlayerConfig;
use crate::score::Score;
use crate::sink::AudioSink;
use crate::{MelodyError, Result};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use transport::Gate;

/// How a call to [`ScorePlayer::play`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackOutcome {
    /// Every note in playback order was handled
    Completed,
    /// The transport was stopped before the end
    Stopped,
}

/// Plays scores through a sink under control of a transport.
pub struct ScorePlayer<S: AudioSink> {
    sink: S,
    transport: Arc<Transport>,
    config: PlayerConfig,
}

impl<S: AudioSink> ScorePlayer<S> {
    /// Player with its own fresh transport.
    pub fn new(sink: S, config: PlayerConfig) -> Self {
        Self::with_transport(sink, config, Arc::new(Transport::new()))
    }

    /// Player sharing an existing transport.
    pub fn with_transport(sink: S, config: PlayerConfig, transport: Arc<Transport>) -> Self {
        ScorePlayer {
            sink,
            transport,
            config,
        }
    }

    /// The transport this player obeys.
    pub fn transport(&self) -> &Arc<Transport> {
        &self.transport
    }

    /// Borrow the sink
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Mutably borrow the sink
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Consume the player and return its sink.
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Player configuration
    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    /// Play a score from start to finish.
    ///
    /// Blocks while the transport is paused. Returns
    /// [`PlaybackOutcome::Stopped`] if the transport is stopped before the
    /// last note. The sink is finished in both cases.
    pub fn play(&mut self, score: &Score) -> Result<PlaybackOutcome> {
        tracing::info!(
            title = score.title(),
            notes = score.len(),
            seconds = score.total_duration(),
            "starting playback"
        );

        self.transport.set_playing(true);
        let walked = self.walk(score);
        self.transport.set_playing(false);
        let finished = self.sink.finish();

        let outcome = walked?;
        finished?;
        tracing::info!(title = score.title(), ?outcome, "playback finished");
        Ok(outcome)
    }

    fn walk(&mut self, score: &Score) -> Result<PlaybackOutcome> {
        let amplitude = self.config.amplitude;
        let mut order = score.playback_order();
        let mut replaying = false;

        for step in order.by_ref() {
            let gate = self.transport.wait_gate();
            if gate == Gate::Stop {
                return Ok(PlaybackOutcome::Stopped);
            }

            if step.replay && !replaying {
                self.transport.notify(&AudioEvent::new(AudioEventKind::Loop));
            }
            replaying = step.replay;

            if gate == Gate::Render {
                step.note.render(&mut self.sink, amplitude)?;
            }
            self.transport.notify(&AudioEvent::play(step.note));
        }

        if order.in_repeat() {
            tracing::debug!(
                pending = order.pending().len(),
                "repeat section never closed, not replayed"
            );
        }
        Ok(PlaybackOutcome::Completed)
    }
}

/// Render a whole score into a sink, repeats included, ignoring any transport.
pub fn render_score<S: AudioSink + ?Sized>(score: &Score, sink: &mut S, amplitude: f64) -> Result<()> {
    for step in score.playback_order() {
        step.note.render(sink, amplitude)?;
    }
    sink.finish()
}

/// Handle to playback running on a worker thread.
pub struct PlaybackHandle {
    transport: Arc<Transport>,
    thread: JoinHandle<Result<PlaybackOutcome>>,
}

impl PlaybackHandle {
    /// Transport controlling the worker.
    pub fn transport(&self) -> &Arc<Transport> {
        &self.transport
    }

    /// True once the worker has returned.
    pub fn is_finished(&self) -> bool {
        self.thread.is_finished()
    }

    /// Ask the worker to stop before its next note.
    pub fn stop(&self) {
        self.transport.stop();
    }

    /// Wait for the worker and return how playback ended.
    pub fn join(self) -> Result<PlaybackOutcome> {
        self.thread
            .join()
            .map_err(|_| MelodyError::Other("playback thread panicked".to_string()))?
    }
}

/// Play a snapshot of `score` on a new thread.
///
/// The sink is built on the worker by `make_sink`, so it does not need to be
/// `Send`. The transport is used as is: a stopped transport must be
/// [reset](Transport::reset) before it can drive another playback.
pub fn spawn_playback<S, F>(
    score: &Score,
    config: PlayerConfig,
    transport: Arc<Transport>,
    make_sink: F,
) -> Result<PlaybackHandle>
where
    S: AudioSink + 'static,
    F: FnOnce() -> Result<S> + Send + 'static,
{
    let snapshot = score.clone();
    let worker_transport = Arc::clone(&transport);

    let thread = thread::Builder::new()
        .name("melody-playback".to_string())
        .spawn(move || {
            let sink = make_sink()?;
            ScorePlayer::with_transport(sink, config, worker_transport).play(&snapshot)
        })?;

    Ok(PlaybackHandle { transport, thread })
}
