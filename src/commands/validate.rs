//! `recsync validate`: integrity check of a session file.

use std::path::Path;

use anyhow::{Context, Result};

use recsync::Session;

pub fn handle(path: &Path) -> Result<()> {
    let session =
        Session::load(path).with_context(|| format!("Invalid session: {}", path.display()))?;

    println!("{}", session.title());
    for (id, count) in session.counts() {
        println!("  {:<12} {:>6}", id.name(), count);
    }
    println!("OK: session is valid");
    Ok(())
}
