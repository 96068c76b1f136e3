//! Melody command-line player
//!
//! Loads a text score, applies the requested transformations, prints the
//! result and optionally renders it to WAV or plays it on the output device.

mod args;

use anyhow::{bail, Context, Result};
use args::{CliArgs, Transform};
use melody::{load_file, render_score, PlayerConfig, Score, WavSink};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = CliArgs::parse();
    if args.show_help {
        CliArgs::print_help();
        return Ok(());
    }
    let Some(file_path) = args.file_path.as_deref() else {
        CliArgs::print_help();
        bail!("no score file given");
    };

    init_tracing(args.quiet);

    let config = match args.config_path.as_deref() {
        Some(path) => PlayerConfig::load(path)
            .with_context(|| format!("failed to load config {}", path))?,
        None => PlayerConfig::default(),
    };

    let mut score =
        load_file(file_path).with_context(|| format!("failed to load score {}", file_path))?;
    for transform in &args.transforms {
        apply(&mut score, *transform)?;
    }

    println!("{}", score);

    if let Some(wav_path) = args.wav_path.as_deref() {
        let mut sink = WavSink::create(wav_path, &config)
            .with_context(|| format!("failed to create {}", wav_path))?;
        render_score(&score, &mut sink, config.amplitude)
            .with_context(|| format!("failed to render {}", wav_path))?;
        tracing::info!(
            path = wav_path,
            seconds = sink.seconds_written(),
            "wrote WAV file"
        );
    }

    if args.play {
        play_on_device(&score, config)?;
    }

    Ok(())
}

fn init_tracing(quiet: bool) {
    let default_level = if quiet { "warn" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn apply(score: &mut Score, transform: Transform) -> Result<()> {
    match transform {
        Transform::OctaveUp => {
            if !score.octave_up() {
                tracing::warn!("Reach upper limit");
            }
        }
        Transform::OctaveDown => {
            if !score.octave_down() {
                tracing::warn!("Reach lower limit");
            }
        }
        Transform::Tempo(ratio) => score
            .change_tempo(ratio)
            .with_context(|| format!("cannot apply {}", transform))?,
        Transform::Reverse => score.reverse(),
    }
    tracing::debug!(%transform, "applied");
    Ok(())
}

#[cfg(not(feature = "streaming"))]
fn play_on_device(_score: &Score, _config: PlayerConfig) -> Result<()> {
    bail!("device playback requires the \"streaming\" feature; rebuild with `--features streaming`")
}

#[cfg(feature = "streaming")]
fn play_on_device(score: &Score, config: PlayerConfig) -> Result<()> {
    use melody::{spawn_playback, DeviceSink, ElapsedTracker, Transport};
    use std::io::BufRead;
    use std::sync::{mpsc, Arc};
    use std::time::Duration;

    let transport = Arc::new(Transport::new());
    let elapsed = Arc::new(ElapsedTracker::new());
    transport.add_listener(elapsed.clone());

    let handle = spawn_playback(score, config, Arc::clone(&transport), move || {
        DeviceSink::new(&config)
    })?;

    // stdin is read on its own thread so the loop below can notice the end
    let (keys, key_rx) = mpsc::channel::<String>();
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if keys.send(line).is_err() {
                break;
            }
        }
    });

    let total = score.total_duration();
    eprintln!("Playing {} ({:.1}s). Keys: p pause, m mute, q stop", score.title(), total);

    while !handle.is_finished() {
        match key_rx.recv_timeout(Duration::from_millis(100)) {
            Ok(line) => match line.trim() {
                "p" => transport.set_paused(!transport.is_paused()),
                "m" => transport.set_muted(!transport.is_muted()),
                "q" => handle.stop(),
                "" => {}
                other => eprintln!("Unknown key: {}", other),
            },
            Err(mpsc::RecvTimeoutError::Timeout) => {}
            Err(mpsc::RecvTimeoutError::Disconnected) => std::thread::sleep(Duration::from_millis(100)),
        }
        tracing::trace!(elapsed = elapsed.elapsed(), total, "progress");
    }

    let outcome = handle.join().context("playback failed")?;
    tracing::info!(?outcome, "playback ended");
    Ok(())
}
