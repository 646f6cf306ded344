//! `recsync inspect`: resolved playback state at chosen times.

use std::path::Path;

use anyhow::{Context, Result};

use recsync::{Config, Playback, Session, SimulatedPlayer};

pub fn handle(path: &Path, times: &[f64]) -> Result<()> {
    let session =
        Session::load(path).with_context(|| format!("Invalid session: {}", path.display()))?;
    let config = Config::load()?;

    println!("{}", session.title());
    let mut playback: Playback<SimulatedPlayer> = Playback::new(session, config);
    for &t in times {
        let frame = playback.resolve(t);
        print!("{}", frame.describe(playback.session()));
    }
    Ok(())
}
