//! Clock synchronization between the two media players of a recording.
//!
//! The main recording (master) is the authoritative clock. When a
//! screen-share recording exists it is the secondary player and is steered
//! to follow the master; without one the synchronizer passes the master time
//! straight through.
//!
//! - `player`: the `PlayerHandle` capability the host provides
//! - `clock`: `ClockSynchronizer`, the two-slot state machine
//! - `simulated`: an in-memory player for simulations and tests

mod clock;
mod player;
mod simulated;

pub use clock::{ClockSynchronizer, Slot, SyncState, SyncStats};
pub use player::{PlayerError, PlayerEvent, PlayerHandle};
pub use simulated::SimulatedPlayer;
