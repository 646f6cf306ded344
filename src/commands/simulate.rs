//! `recsync simulate`: drive the playback engine with two simulated players.

use std::path::Path;

use anyhow::{bail, Context, Result};

use recsync::{Config, Playback, PlayerEvent, PlayerHandle, Session, SimulatedPlayer, Slot};

pub struct SimulateOptions {
    pub offset: f64,
    pub duration: Option<f64>,
    pub step: f64,
    pub skew: f64,
    pub stall_until: Option<f64>,
}

pub fn handle(path: &Path, options: SimulateOptions) -> Result<()> {
    if !options.step.is_finite() || options.step <= 0.0 {
        bail!("--step must be a positive number of seconds");
    }
    if !options.skew.is_finite() || options.skew <= 0.0 {
        bail!("--skew must be a positive factor");
    }

    let session =
        Session::load(path).with_context(|| format!("Invalid session: {}", path.display()))?;
    let config = Config::load()?;
    let duration = options
        .duration
        .unwrap_or_else(|| session.duration())
        .max(options.step);
    let with_secondary = session.has_screenshare();

    let master = SimulatedPlayer::new(0.0);
    let secondary = SimulatedPlayer::new(options.offset.max(0.0));
    secondary.set_skew(options.skew);

    println!("{}", session.title());
    let mut playback = Playback::new(session, config);
    playback.register(Slot::Master, master.clone());
    if with_secondary {
        playback.register(Slot::Secondary, secondary.clone());
    } else {
        println!("No screen-share in this session: master only (pass-through)");
    }

    master.play()?;
    playback.handle_event(PlayerEvent::Play);
    if options.stall_until.is_some() {
        secondary.set_stalled(true);
    }

    let mut updates = 0u64;
    let mut frame_changes = 0u64;
    while master.position() < duration {
        master.advance(options.step);
        secondary.advance(options.step);
        if let Some(until) = options.stall_until {
            if master.position() >= until {
                secondary.set_stalled(false);
            }
        }

        if let Some(frame) = playback.handle_event(PlayerEvent::TimeUpdate) {
            updates += 1;
            if frame.changed() {
                frame_changes += 1;
            }
        }
    }

    let stats = playback.sync_stats();
    println!(
        "Simulated {} updates over {:.2}s ({:?})",
        updates,
        master.position(),
        playback.sync_state()
    );
    println!("  corrections:        {}", stats.corrections);
    println!("  failed corrections: {}", stats.failed_corrections);
    println!("  unavailable:        {}", stats.unavailable_updates);
    match playback.last_drift() {
        Some(drift) => println!("  final drift:        {:+.3}s", drift),
        None => println!("  final drift:        -"),
    }
    println!("  frame changes:      {}", frame_changes);
    Ok(())
}
