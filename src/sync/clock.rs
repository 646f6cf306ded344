//! Two-slot clock synchronizer.
//!
//! Slots are filled as the players report ready, in either order. With both
//! filled the synchronizer steers the secondary toward the master on every
//! master update; with only the master it passes the master time through.
//!
//! Nothing here returns an error. A secondary that drifts, fails a seek, or
//! stops answering is logged and retried on the next update; a master that
//! stops answering simply produces no logical time until it recovers.

use tracing::{debug, info, warn};

use crate::config::SyncConfig;
use crate::sync::player::{PlayerEvent, PlayerHandle};

/// Which player a handle belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// Main recording; its position is the logical time
    Master,
    /// Screen-share recording, steered to follow the master
    Secondary,
}

/// Synchronization state, derived from which slots are filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    /// No master registered yet
    Uninitialized,
    /// Master only: logical time is the master time, no corrections
    PassThrough,
    /// Both players registered: the secondary is steered
    Syncing,
}

/// Counters describing drift handling so far.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncStats {
    /// Secondary seeks that were accepted
    pub corrections: u64,
    /// Secondary seeks that failed (retried on the next update)
    pub failed_corrections: u64,
    /// Master seek events handled
    pub seeks: u64,
    /// Updates skipped because a player did not answer
    pub unavailable_updates: u64,
}

/// Correction bookkeeping for the secondary slot.
#[derive(Debug, Default)]
struct Steering {
    last_drift: Option<f64>,
    /// Master time of the last accepted correction
    last_correction_at: Option<f64>,
    /// Previous correction failed; retry on the next update
    retry: bool,
    unavailable: bool,
}

impl Steering {
    fn reset(&mut self) {
        *self = Self::default();
    }

    fn steer<P: PlayerHandle>(
        &mut self,
        secondary: &P,
        master_time: f64,
        forced: bool,
        config: &SyncConfig,
        stats: &mut SyncStats,
    ) {
        let secondary_time = match secondary.current_time() {
            Ok(t) if t.is_finite() => t,
            Ok(_) | Err(_) => {
                if !self.unavailable {
                    warn!("secondary player stopped responding, pausing synchronization");
                }
                self.unavailable = true;
                stats.unavailable_updates += 1;
                return;
            }
        };
        if self.unavailable {
            info!("secondary player responding again, resuming synchronization");
            self.unavailable = false;
        }

        let drift = secondary_time - master_time;
        self.last_drift = Some(drift);

        if drift.abs() <= config.tolerance_seconds {
            self.retry = false;
            return;
        }

        // A seek to the same target is still in flight; issuing it again only
        // restarts the secondary's buffering.
        let pending = self.last_correction_at == Some(master_time);
        let due = forced
            || self.retry
            || (!pending
                && self.last_correction_at.map_or(true, |at| {
                    (master_time - at).abs() >= config.min_correction_interval
                }));
        if !due {
            return;
        }

        match secondary.set_current_time(master_time) {
            Ok(()) => {
                debug!(drift, position = master_time, forced, "corrected secondary player");
                stats.corrections += 1;
                self.last_correction_at = Some(master_time);
                self.retry = false;
            }
            Err(err) => {
                debug!(
                    drift,
                    position = master_time,
                    error = %err,
                    "secondary correction failed, will retry"
                );
                stats.failed_corrections += 1;
                self.retry = true;
            }
        }
    }
}

/// Produces one logical time from a master and an optional secondary player.
#[derive(Debug)]
pub struct ClockSynchronizer<P> {
    master: Option<P>,
    secondary: Option<P>,
    config: SyncConfig,
    logical_time: f64,
    master_unavailable: bool,
    steering: Steering,
    stats: SyncStats,
}

impl<P: PlayerHandle> ClockSynchronizer<P> {
    pub fn new(config: SyncConfig) -> Self {
        Self {
            master: None,
            secondary: None,
            config,
            logical_time: 0.0,
            master_unavailable: false,
            steering: Steering::default(),
            stats: SyncStats::default(),
        }
    }

    pub fn state(&self) -> SyncState {
        match (&self.master, &self.secondary) {
            (Some(_), Some(_)) => SyncState::Syncing,
            (Some(_), None) => SyncState::PassThrough,
            (None, _) => SyncState::Uninitialized,
        }
    }

    /// Fill a slot once its player is ready. Returns the handle it replaces.
    ///
    /// Completing the pair aligns the secondary immediately.
    pub fn register(&mut self, slot: Slot, handle: P) -> Option<P> {
        let before = self.state();
        let previous = match slot {
            Slot::Master => {
                self.master_unavailable = false;
                self.master.replace(handle)
            }
            Slot::Secondary => self.secondary.replace(handle),
        };
        self.steering.reset();

        let after = self.state();
        if before != after {
            info!(?slot, ?before, ?after, "player registered");
        }
        if after == SyncState::Syncing {
            self.tick(true);
        }
        previous
    }

    /// Empty a slot. Corrections stop immediately for this pairing.
    pub fn unregister(&mut self, slot: Slot) -> Option<P> {
        let before = self.state();
        let removed = match slot {
            Slot::Master => self.master.take(),
            Slot::Secondary => self.secondary.take(),
        };
        self.steering.reset();

        let after = self.state();
        if before != after {
            info!(?slot, ?before, ?after, "player unregistered");
        }
        removed
    }

    pub fn is_registered(&self, slot: Slot) -> bool {
        match slot {
            Slot::Master => self.master.is_some(),
            Slot::Secondary => self.secondary.is_some(),
        }
    }

    pub fn master(&self) -> Option<&P> {
        self.master.as_ref()
    }

    pub fn secondary(&self) -> Option<&P> {
        self.secondary.as_ref()
    }

    /// Handle a notification from the master player.
    ///
    /// Returns the new logical time, or `None` when there is no master or it
    /// did not answer.
    pub fn handle_event(&mut self, event: PlayerEvent) -> Option<f64> {
        match event {
            PlayerEvent::TimeUpdate => self.tick(false),
            PlayerEvent::Seeked => {
                self.stats.seeks += 1;
                self.tick(true)
            }
            PlayerEvent::Play | PlayerEvent::Pause | PlayerEvent::RateChange(_) => {
                self.propagate(event);
                self.tick(false)
            }
        }
    }

    pub fn on_time_update(&mut self) -> Option<f64> {
        self.handle_event(PlayerEvent::TimeUpdate)
    }

    pub fn on_seeked(&mut self) -> Option<f64> {
        self.handle_event(PlayerEvent::Seeked)
    }

    /// Seek the master to `seconds` and run the seek path.
    ///
    /// Returns the logical time after the seek, or `None` when there is no
    /// master, it rejected the seek, or it stopped answering afterwards.
    pub fn seek(&mut self, seconds: f64) -> Option<f64> {
        let master = self.master.as_ref()?;
        if let Err(err) = master.set_current_time(seconds) {
            warn!(position = seconds, error = %err, "master player rejected seek");
            return None;
        }
        self.on_seeked()
    }

    /// Last logical time produced.
    pub fn logical_time(&self) -> f64 {
        self.logical_time
    }

    /// Secondary minus master, as measured on the last steered update.
    pub fn last_drift(&self) -> Option<f64> {
        self.steering.last_drift
    }

    pub fn stats(&self) -> SyncStats {
        self.stats
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    fn tick(&mut self, forced: bool) -> Option<f64> {
        let master = self.master.as_ref()?;
        let master_time = match master.current_time() {
            Ok(t) if t.is_finite() => t.max(0.0),
            Ok(_) | Err(_) => {
                if !self.master_unavailable {
                    warn!("master player stopped responding");
                }
                self.master_unavailable = true;
                self.stats.unavailable_updates += 1;
                return None;
            }
        };
        if self.master_unavailable {
            info!("master player responding again");
            self.master_unavailable = false;
        }

        self.logical_time = master_time;

        if let Some(secondary) = self.secondary.as_ref() {
            self.steering
                .steer(secondary, master_time, forced, &self.config, &mut self.stats);
        }

        Some(master_time)
    }

    fn propagate(&self, event: PlayerEvent) {
        if !self.config.propagate_transport {
            return;
        }
        let Some(secondary) = self.secondary.as_ref() else {
            return;
        };
        let result = match event {
            PlayerEvent::Play => secondary.play(),
            PlayerEvent::Pause => secondary.pause(),
            PlayerEvent::RateChange(rate) => secondary.set_playback_rate(rate),
            PlayerEvent::TimeUpdate | PlayerEvent::Seeked => Ok(()),
        };
        if let Err(err) = result {
            debug!(?event, error = %err, "could not mirror transport change to secondary");
        }
    }
}
